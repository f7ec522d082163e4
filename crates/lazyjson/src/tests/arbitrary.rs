use alloc::{boxed::Box, string::String, vec::Vec};

use quickcheck::{Arbitrary, Gen};

use crate::{Element, JsonArray, JsonObject};

#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct JsonNumber(pub(crate) f64);

impl Arbitrary for JsonNumber {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut value = f64::arbitrary(g);
        while !value.is_finite() {
            value = f64::arbitrary(g);
        }

        Self(value)
    }
}

/// A generated JSON value, built into documents through the mutation API.
#[derive(Debug, Clone)]
pub(crate) enum Tree {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Array(Vec<Tree>),
    Object(Vec<(String, Tree)>),
}

impl Tree {
    fn generate(g: &mut Gen, depth: usize) -> Self {
        let choices = if depth == 0 { 5 } else { 7 };
        match usize::arbitrary(g) % choices {
            0 => Tree::Null,
            1 => Tree::Bool(bool::arbitrary(g)),
            2 => Tree::Int(i64::arbitrary(g)),
            3 => Tree::Double(JsonNumber::arbitrary(g).0),
            4 => Tree::Str(String::arbitrary(g)),
            5 => Tree::Array(Self::items(g, depth)),
            _ => Tree::Object(Self::fields(g, depth)),
        }
    }

    fn items(g: &mut Gen, depth: usize) -> Vec<Tree> {
        let len = usize::arbitrary(g) % 4;
        (0..len).map(|_| Self::generate(g, depth.saturating_sub(1))).collect()
    }

    fn fields(g: &mut Gen, depth: usize) -> Vec<(String, Tree)> {
        let len = usize::arbitrary(g) % 4;
        (0..len)
            .map(|_| (String::arbitrary(g), Self::generate(g, depth.saturating_sub(1))))
            .collect()
    }

    /// Appends this value to `arr`.
    pub(crate) fn append_to(&self, arr: &mut JsonArray) {
        let appended = match self {
            Tree::Null => arr.append(None::<i64>),
            Tree::Bool(b) => arr.append(*b),
            Tree::Int(n) => arr.append(*n),
            Tree::Double(n) => arr.append(*n),
            Tree::Str(s) => arr.append(s),
            Tree::Array(items) => {
                arr.append_array(&to_array(items));
                return;
            }
            Tree::Object(fields) => {
                arr.append_object(&to_object(fields));
                return;
            }
        };
        appended.expect("generated numbers are finite");
    }

    /// Stores this value under `key` in `obj`.
    pub(crate) fn put_into(&self, obj: &mut JsonObject, key: &str) {
        let stored = match self {
            Tree::Null => obj.put(key, None::<i64>),
            Tree::Bool(b) => obj.put(key, *b),
            Tree::Int(n) => obj.put(key, *n),
            Tree::Double(n) => obj.put(key, *n),
            Tree::Str(s) => obj.put(key, s),
            Tree::Array(items) => {
                obj.put_array(key, &to_array(items));
                return;
            }
            Tree::Object(fields) => {
                obj.put_object(key, &to_object(fields));
                return;
            }
        };
        stored.expect("generated numbers are finite");
    }
}

impl Arbitrary for Tree {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 3;
        Self::generate(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        match self {
            Tree::Array(items) => Box::new(items.shrink().map(Tree::Array)),
            Tree::Object(fields) => Box::new(fields.shrink().map(Tree::Object)),
            Tree::Str(s) => Box::new(s.shrink().map(Tree::Str)),
            Tree::Int(n) => Box::new(n.shrink().map(Tree::Int)),
            _ => quickcheck::empty_shrinker(),
        }
    }
}

/// A generated document root, always a container.
#[derive(Debug, Clone)]
pub(crate) struct Root(pub(crate) Tree);

impl Root {
    pub(crate) fn build(&self) -> Element {
        match &self.0 {
            Tree::Object(fields) => Element::Object(to_object(fields)),
            Tree::Array(items) => Element::Array(to_array(items)),
            scalar => Element::Array(to_array(core::slice::from_ref(scalar))),
        }
    }
}

impl Arbitrary for Root {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = 1 + usize::arbitrary(g) % 3;
        let tree = if bool::arbitrary(g) {
            Tree::Array(Tree::items(g, depth))
        } else {
            Tree::Object(Tree::fields(g, depth))
        };
        Self(tree)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(Root))
    }
}

pub(crate) fn to_array(items: &[Tree]) -> JsonArray {
    let mut arr = JsonArray::new();
    for item in items {
        item.append_to(&mut arr);
    }
    arr
}

pub(crate) fn to_object(fields: &[(String, Tree)]) -> JsonObject {
    let mut obj = JsonObject::new();
    for (key, value) in fields {
        value.put_into(&mut obj, key);
    }
    obj
}
