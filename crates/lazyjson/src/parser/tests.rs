use alloc::{string::String, sync::Arc, vec::Vec};

use super::*;

fn parse(text: &str) -> Document {
    parse_with(text, ParserOptions::default())
}

fn parse_with(text: &str, options: ParserOptions) -> Document {
    parse_document(Arc::from(text), options).unwrap()
}

fn fail(text: &str, options: ParserOptions) -> (SyntaxError, usize) {
    let err = parse_document(Arc::from(text), options).unwrap_err();
    (err.kind().clone(), err.offset)
}

fn children(doc: &Document, id: NodeId) -> Vec<(NodeKind, &str)> {
    doc.children(id).map(|child| (doc.kind(child), doc.raw(child))).collect()
}

#[test]
fn leaves_record_kind_and_raw_text() {
    let doc = parse(r#"[1, -2.5e3, "s", "e\n", true, false, null, bare, 0]"#);
    assert_eq!(doc.kind(doc.root()), NodeKind::Array);
    assert_eq!(
        children(&doc, doc.root()),
        [
            (NodeKind::Integer, "1"),
            (NodeKind::Float, "-2.5e3"),
            (NodeKind::String, "s"),
            (NodeKind::EscapedString, r"e\n"),
            (NodeKind::BooleanTrue, "true"),
            (NodeKind::BooleanFalse, "false"),
            (NodeKind::Null, "null"),
            (NodeKind::String, "bare"),
            (NodeKind::Integer, "0"),
        ]
    );
}

#[test]
fn fields_own_their_values() {
    let doc = parse(r#"{"a":1,'b':[2],c:{},"d\"":null}"#);
    let root = doc.root();
    assert_eq!(
        children(&doc, root),
        [
            (NodeKind::Field, "a"),
            (NodeKind::Field, "b"),
            (NodeKind::Field, "c"),
            (NodeKind::EscapedField, r#"d\""#),
        ]
    );
    let values: Vec<NodeKind> = doc
        .children(root)
        .map(|field| doc.kind(doc.field_value(field).unwrap()))
        .collect();
    assert_eq!(values, [NodeKind::Integer, NodeKind::Array, NodeKind::Object, NodeKind::Null]);
}

#[test]
fn single_quotes_may_contain_double_quotes() {
    let doc = parse(r#"['say "hi"', "it's"]"#);
    assert_eq!(
        children(&doc, doc.root()),
        [(NodeKind::String, r#"say "hi""#), (NodeKind::String, "it's")]
    );
}

#[test]
fn keyword_case_quirk() {
    let doc = parse("[Null, True, False, NULL, tRUE, nullable, false.0]");
    let kinds: Vec<NodeKind> = doc.children(doc.root()).map(|id| doc.kind(id)).collect();
    assert_eq!(
        kinds,
        [
            NodeKind::Null,
            NodeKind::BooleanTrue,
            NodeKind::BooleanFalse,
            NodeKind::String,
            NodeKind::String,
            NodeKind::String,
            NodeKind::String,
        ]
    );
}

#[test]
fn whitespace_everywhere() {
    let doc = parse(" \n\t{ \"a\" :\r\n [ 1 ,\t2 ] } ");
    let field = doc.first_child(doc.root()).unwrap();
    let array = doc.field_value(field).unwrap();
    assert_eq!(children(&doc, array), [(NodeKind::Integer, "1"), (NodeKind::Integer, "2")]);
}

#[test]
fn parsing_leaves_the_document_clean() {
    let doc = parse(r#"{"a":[1,2,{"b":"c"}]}"#);
    assert!(!doc.is_dirty());
    assert!(!doc.has_mutation_buffer());
    assert_eq!(doc.buffer_count(), 1);
    assert_eq!(doc.node_count(), 8);
}

#[test]
fn deep_nesting_does_not_recurse() {
    let depth = 100_000;
    let mut text = String::with_capacity(depth * 2);
    text.extend(core::iter::repeat_n('[', depth));
    text.extend(core::iter::repeat_n(']', depth));
    let doc = parse(&text);
    assert_eq!(doc.node_count(), depth);
}

#[test]
fn trailing_text_is_ignored_unless_rejected() {
    let doc = parse("[1] trailing");
    assert_eq!(children(&doc, doc.root()), [(NodeKind::Integer, "1")]);

    let options = ParserOptions {
        reject_trailing_characters: true,
        ..ParserOptions::default()
    };
    assert_eq!(fail("[1] x", options), (SyntaxError::TrailingCharacters, 4));
    assert!(parse_document(Arc::from("[1] \n"), options).is_ok());
}

#[test]
fn depth_limit_counts_containers() {
    let options = ParserOptions::default().with_max_depth(2);
    parse_with(r#"[[1],{"a":2}]"#, options);
    assert_eq!(fail("[[[1]]]", options), (SyntaxError::DepthLimitExceeded(2), 2));
    assert_eq!(fail(r#"{"a":{"b":{}}}"#, options), (SyntaxError::DepthLimitExceeded(2), 10));
}

#[test]
fn structural_errors() {
    let lenient = ParserOptions::default();
    assert_eq!(fail("[1,,2]", lenient), (SyntaxError::InvalidCharacter(','), 3));
    assert_eq!(fail(r#"{"a":}"#, lenient), (SyntaxError::InvalidCharacter('}'), 5));
    assert_eq!(fail("[1,]", lenient), (SyntaxError::TrailingComma(']'), 3));
    assert_eq!(fail(r#"{"a":1,}"#, lenient), (SyntaxError::TrailingComma('}'), 7));
    assert_eq!(fail("[}", lenient), (SyntaxError::MismatchedClose('}'), 1));
    assert_eq!(fail(r#"{"a":1]"#, lenient), (SyntaxError::MismatchedClose(']'), 6));
    assert_eq!(fail("[1 2]", lenient), (SyntaxError::InvalidCharacter('2'), 3));
    assert_eq!(fail(r#"{"a" 1}"#, lenient), (SyntaxError::InvalidCharacter('1'), 5));
    assert_eq!(fail("x", lenient), (SyntaxError::NotAContainer, 0));
    assert_eq!(fail("  ", lenient), (SyntaxError::UnexpectedEndOfInput, 2));
    assert_eq!(fail(r#"["abc"#, lenient), (SyntaxError::UnexpectedEndOfInput, 5));
    assert_eq!(fail("[1", lenient), (SyntaxError::UnexpectedEndOfInput, 2));
    assert_eq!(fail(r#"["a\x"]"#, lenient), (SyntaxError::InvalidEscape('x'), 4));
}

#[test]
fn number_errors() {
    let lenient = ParserOptions::default();
    assert_eq!(fail("[01]", lenient), (SyntaxError::LeadingZero, 2));
    assert_eq!(fail("[-]", lenient), (SyntaxError::DigitExpected, 2));
    assert_eq!(fail("[1.]", lenient), (SyntaxError::DigitExpected, 3));
    assert_eq!(fail("[1e]", lenient), (SyntaxError::ExponentExpected, 3));
    assert_eq!(fail("[1e+]", lenient), (SyntaxError::DigitExpected, 4));
    assert_eq!(fail("[+-1]", lenient), (SyntaxError::DigitExpected, 2));
    assert_eq!(fail("[+]", lenient), (SyntaxError::DigitExpected, 2));
}

#[test]
fn strict_mode_rejects_extensions() {
    let strict = ParserOptions::strict();
    assert_eq!(fail("{'a':1}", strict), (SyntaxError::InvalidCharacter('\''), 1));
    assert_eq!(fail("{a:1}", strict), (SyntaxError::InvalidCharacter('a'), 1));
    assert_eq!(fail("[True]", strict), (SyntaxError::InvalidCharacter('T'), 1));
    assert_eq!(fail("[abc]", strict), (SyntaxError::InvalidCharacter('a'), 1));
    assert_eq!(fail("[1] x", strict), (SyntaxError::TrailingCharacters, 4));
    parse_with(r#"{"a":[true,false,null]}"#, strict);
}

#[test]
fn offsets_count_characters_not_bytes() {
    let err = parse_document(Arc::from("[\"é€\",\n ,]"), ParserOptions::default()).unwrap_err();
    assert_eq!(err.kind(), &SyntaxError::InvalidCharacter(','));
    assert_eq!((err.offset, err.line, err.column), (8, 2, 2));
}
