#![allow(clippy::float_cmp)]

use alloc::{borrow::Cow, string::ToString, vec::Vec};

use crate::{AccessError, Element, JsonArray, JsonObject, Value, ValueKind};

#[test]
fn change_string_in_place() {
    let mut obj = JsonObject::parse(r#"{"foo":"bar","baz":42,"aval":[2,2,4],"oval":{"foo":9}}"#).unwrap();
    assert_eq!(obj.get_string("foo").unwrap(), "bar");
    obj.put("foo", "Hello World").unwrap();
    assert_eq!(obj.get_string("foo").unwrap(), "Hello World");
    assert_eq!(
        obj.to_string(),
        r#"{"foo":"Hello World","baz":42,"aval":[2,2,4],"oval":{"foo":9}}"#
    );
}

#[test]
fn add_string() {
    let mut obj = JsonObject::parse(r#"{"foo":"bar","baz":42}"#).unwrap();
    obj.put("test", "Hello World").unwrap();
    assert_eq!(obj.get_string("test").unwrap(), "Hello World");
    assert_eq!(obj.get_string("foo").unwrap(), "bar");
    assert_eq!(obj.to_string(), r#"{"foo":"bar","baz":42,"test":"Hello World"}"#);
}

#[test]
fn add_complex_string() {
    let mut obj = JsonObject::parse(r#"{"foo":"bar","baz":42}"#).unwrap();
    let text = "Hello \n\t\r\u{8}\"\\\u{c} World";
    obj.put("test", text).unwrap();
    assert_eq!(obj.get_string("test").unwrap(), text);
    assert_eq!(
        obj.to_string(),
        r#"{"foo":"bar","baz":42,"test":"Hello \n\t\r\b\"\\\f World"}"#
    );
}

#[test]
fn build_object() {
    let mut obj = JsonObject::new();
    obj.put("foo", "bar").unwrap();
    obj.put("baz", -42).unwrap();
    obj.put("lval", 99_i64).unwrap();
    obj.put("dval", 6.02e23).unwrap();
    obj.put("floatval", 0.1_f32).unwrap();
    obj.put("fval", false).unwrap();
    obj.put("tval", true).unwrap();
    obj.put("test", "Hello World").unwrap();
    obj.put("nval", None::<&str>).unwrap();

    assert_eq!(obj.get_int("baz").unwrap(), -42);
    assert_eq!(obj.get_long("baz").unwrap(), -42);
    assert_eq!(obj.get_double("dval").unwrap(), 6.02e23);
    assert!(!obj.get_bool("fval").unwrap());
    assert!(obj.get_bool("tval").unwrap());
    assert!(obj.is_null("nval"));
    assert_eq!(
        obj.to_string(),
        r#"{"foo":"bar","baz":-42,"lval":99,"dval":6.02e23,"floatval":0.1,"fval":false,"tval":true,"test":"Hello World","nval":null}"#
    );
    assert!(obj.document().is_dirty());
}

#[test]
fn build_array() {
    let mut arr = JsonArray::new();
    arr.append("foo").unwrap();
    arr.append(42).unwrap();
    arr.append(99_i64).unwrap();
    arr.append(0.1_f32).unwrap();
    arr.append(2.9).unwrap();
    arr.append(true).unwrap();
    arr.append(false).unwrap();
    arr.append_array(&JsonArray::parse("[2,2,4]").unwrap());
    arr.append_object(&JsonObject::parse(r#"{"foo":42}"#).unwrap());
    arr.append(None::<i32>).unwrap();

    assert_eq!(arr.get_string(0).unwrap(), "foo");
    assert_eq!(arr.get_int(1).unwrap(), 42);
    assert_eq!(arr.get_long(2).unwrap(), 99);
    assert_eq!(arr.get_double(4).unwrap(), 2.9);
    assert_eq!(arr.get_array(7).unwrap().get_int(2).unwrap(), 4);
    assert_eq!(arr.get_object(8).unwrap().get_int("foo").unwrap(), 42);
    assert!(arr.is_null(9));
    assert_eq!(
        arr.to_string(),
        r#"["foo",42,99,0.1,2.9,true,false,[2,2,4],{"foo":42},null]"#
    );
}

#[test]
fn keys_follow_insertion_order() {
    let mut obj = JsonObject::parse(r#"{"test":42}"#).unwrap();
    obj.put("foo", 9).unwrap().put("bar", 10).unwrap();
    obj.remove("test");
    let keys: Vec<Cow<'_, str>> = obj.keys().collect();
    assert_eq!(keys, ["foo", "bar"]);
}

#[test]
fn put_then_remove_leaves_no_trace() {
    let mut obj = JsonObject::parse(r#"{"a":1}"#).unwrap();
    obj.put("k", "v").unwrap();
    assert!(obj.has("k"));
    assert_eq!(obj.len(), 2);
    let removed = obj.remove("k").unwrap();
    assert_eq!(removed.as_str(), Some("v"));
    assert!(!obj.has("k"));
    assert_eq!(obj.len(), 1);
    assert!(obj.remove("k").is_none());
    assert_eq!(obj.to_string(), r#"{"a":1}"#);
}

#[test]
fn removing_the_last_child_keeps_append_working() {
    let mut arr = JsonArray::parse("[1,2,3]").unwrap();
    arr.remove(2);
    arr.append(4).unwrap();
    assert_eq!(arr.to_string(), "[1,2,4]");

    arr.remove(0);
    arr.remove(0);
    arr.remove(0);
    assert!(arr.is_empty());
    arr.append(5).unwrap();
    assert_eq!(arr.to_string(), "[5]");
}

#[test]
fn insert_at_the_end_moves_the_tail() {
    let mut arr = JsonArray::parse("[1]").unwrap();
    arr.insert(1, 2).unwrap();
    arr.append(3).unwrap();
    arr.insert(0, 0).unwrap();
    assert_eq!(arr.to_string(), "[0,1,2,3]");
    let values: Vec<i64> = arr.iter().filter_map(|value| value.as_i64()).collect();
    assert_eq!(values, [0, 1, 2, 3]);
}

#[test]
fn failed_insert_changes_nothing() {
    let mut arr = JsonArray::parse("[1,2]").unwrap();
    let before = arr.document().node_count();
    assert_eq!(
        arr.insert(5, "x").map(|_| ()),
        Err(AccessError::IndexOutOfBounds { index: 5, len: 2 })
    );
    assert_eq!(
        arr.insert_object(3, &JsonObject::new()).map(|_| ()),
        Err(AccessError::IndexOutOfBounds { index: 3, len: 2 })
    );
    assert_eq!(arr.document().node_count(), before);
    assert!(!arr.document().has_mutation_buffer());
    assert!(!arr.document().is_dirty());
}

#[test]
fn adopted_subtrees_do_not_write_back() {
    let donor = JsonObject::parse(r#"{"list":[1,2,3],"other":true}"#).unwrap();
    let before = donor.to_string();

    let mut target = JsonObject::new();
    target.put_array("copy", &donor.get_array("list").unwrap());
    target.get_array_mut("copy").unwrap().append(4).unwrap();
    target.put("extra", "x").unwrap();

    assert_eq!(donor.to_string(), before);
    assert_eq!(target.to_string(), r#"{"copy":[1,2,3,4],"extra":"x"}"#);
    assert!(!donor.document().is_dirty());
}

#[test]
fn adoption_shares_buffers() {
    let donor = JsonArray::parse(r#"["a","b"]"#).unwrap();
    let mut target = JsonArray::new();
    target.append_array(&donor);
    target.append_array(&donor);
    // One buffer from the donor, registered once.
    assert_eq!(target.document().buffer_count(), 1);
    target.append("c").unwrap();
    assert_eq!(target.document().buffer_count(), 2);
    assert_eq!(target.to_string(), r#"[["a","b"],["a","b"],"c"]"#);
}

#[test]
fn replacing_a_subtree_in_a_loop_does_not_grow_the_arena() {
    let donor = JsonObject::parse(r#"{"a":[1,2,{"b":3}]}"#).unwrap();
    let mut root = JsonObject::new();
    let round = |root: &mut JsonObject| {
        root.put_object("slot", &donor);
        root.put("n", 1).unwrap();
        root.remove("n");
    };
    round(&mut root);
    round(&mut root);
    let settled = root.document().node_count();
    for _ in 0..100 {
        round(&mut root);
    }
    assert_eq!(root.document().node_count(), settled);
    assert_eq!(root.to_string(), r#"{"slot":{"a":[1,2,{"b":3}]}}"#);
    assert_eq!(root.detach().document().node_count(), 10);
}

#[test]
fn attach_an_element() {
    let mut root = JsonObject::new();
    root.put_element("a", &Element::parse("[1]").unwrap());
    root.put_element("o", &Element::parse(r#"{"k":null}"#).unwrap());
    let mut arr = JsonArray::new();
    arr.append_element(&Element::parse("{}").unwrap());
    root.put_array("arr", &arr);
    assert_eq!(root.to_string(), r#"{"a":[1],"o":{"k":null},"arr":[{}]}"#);
}

#[test]
fn nested_edits_through_mutable_views() {
    let mut root = JsonObject::parse(r#"{"outer":{"inner":[{"n":1}]}}"#).unwrap();
    {
        let mut outer = root.get_object_mut("outer").unwrap();
        let mut inner = outer.get_array_mut("inner").unwrap();
        inner.get_object_mut(0).unwrap().put("n", 2).unwrap();
        inner.append("tail").unwrap();
    }
    assert_eq!(root.to_string(), r#"{"outer":{"inner":[{"n":2},"tail"]}}"#);
    assert_eq!(
        root.get_object("outer").unwrap().kind_of("inner"),
        Ok(ValueKind::Array)
    );
}

#[test]
fn removed_values_are_independent() {
    let mut root = JsonObject::parse(r#"{"keep":1,"gone":{"a":[1,2]}}"#).unwrap();
    let Some(Value::Object(mut gone)) = root.remove("gone") else {
        panic!("expected an object");
    };
    gone.put("b", 3).unwrap();
    root.put("keep", 2).unwrap();
    assert_eq!(gone.to_string(), r#"{"a":[1,2],"b":3}"#);
    assert_eq!(root.to_string(), r#"{"keep":2}"#);
}

#[test]
fn mutation_round_trips() {
    let mut root = JsonObject::new();
    root.put("s", "quote\" and \u{1}").unwrap();
    root.put("escaped key\n", 1).unwrap();
    let mut list = JsonArray::new();
    list.append(-0.5).unwrap().append(i64::MIN).unwrap();
    root.put_array("list", &list);

    let text = root.serialize(0);
    let reparsed = JsonObject::parse(&text).unwrap();
    assert_eq!(reparsed, root);
    assert_eq!(reparsed.serialize(0), text);
    assert_eq!(reparsed.get_string("s").unwrap(), "quote\" and \u{1}");
    assert_eq!(reparsed.get_int("escaped key\n").unwrap(), 1);
}
