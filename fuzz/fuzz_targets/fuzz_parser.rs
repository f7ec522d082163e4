#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use lazyjson::{Element, JsonArray, JsonObject, ParserOptions, parse_with};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng; // faster than StdRng
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 2; // 1 flag byte + 1 depth byte

thread_local! {
    // One SmallRng per thread, seeded once from the host OS
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    // Not whitespace to the parser; these must be rejected, not skipped.
    "\u{00A0}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{3000}".as_bytes(),
];

/// Helper: borrow the thread-local RNG and run a closure with it.
fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8 & 0x07); // 3 bits
        data[1] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;

        while prefix < size {
            let limit = max_size - prefix;

            prefix += append_whitespace(&mut data[prefix..], limit);
            prefix += append_value(&mut data[prefix..], size, limit);
            prefix += append_whitespace(&mut data[prefix..], limit);
        }

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Append 1‒N whitespace code-points (N chosen randomly) to `buf`,
/// but never exceed `limit`.  Returns the number of bytes written.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let n_codepoints = rng.random_range(1..=limit.min(8));
        let mut written = 0;

        for _ in 0..n_codepoints {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];

            // Stop if this whitespace would overflow the caller’s slice.
            if written + w.len() > limit {
                break;
            }

            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        match ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            Ok(value) => break value,
            Err(_) => continue,
        };
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?), // Arbitrary boolean
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?), // Arbitrary string
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn parser(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let options = ParserOptions {
        strict: flags & 1 != 0,
        reject_trailing_characters: flags & 2 != 0,
        max_depth: (flags & 4 != 0).then_some(usize::from(data[1])),
    };
    let text = String::from_utf8_lossy(&data[HEADER..]).into_owned();

    let Ok(element) = parse_with(&text, options) else {
        return;
    };

    walk(&element);

    // Whatever was accepted must serialize to text that strict parsing takes
    // back unchanged.
    let compact = element.serialize(0);
    let reparsed = parse_with(&compact, ParserOptions::strict()).expect("compact output reparses");
    assert_eq!(reparsed, element, "compact round trip changed the document");
    assert_eq!(reparsed.serialize(0), compact, "serialization is not idempotent");

    let indented = element.serialize(2);
    let reparsed = parse_with(&indented, ParserOptions::strict()).expect("indented output reparses");
    assert_eq!(reparsed, element, "indented round trip changed the document");
}

/// Reads every value through the accessors. Decode errors are fine; panics
/// are not.
fn walk(element: &Element) {
    match element {
        Element::Object(object) => walk_object(object),
        Element::Array(array) => walk_array(array),
    }
}

fn walk_object<D: core::borrow::Borrow<lazyjson::Document>>(object: &JsonObject<D>) {
    for key in object.keys() {
        let _ = object.get_string(&key);
        let _ = object.get_double(&key);
        let _ = object.get_long(&key);
        let _ = object.opt_bool(&key);
        if let Ok(inner) = object.get_object(&key) {
            walk_object(&inner);
        } else if let Ok(inner) = object.get_array(&key) {
            walk_array(&inner);
        }
    }
}

fn walk_array<D: core::borrow::Borrow<lazyjson::Document>>(array: &JsonArray<D>) {
    for i in 0..array.len() {
        let _ = array.get_string(i);
        let _ = array.get_int(i);
        let _ = array.opt_double(i);
        if let Ok(inner) = array.get_object(i) {
            walk_object(&inner);
        } else if let Ok(inner) = array.get_array(i) {
            walk_array(&inner);
        }
    }
}

fuzz_target!(|data: &[u8]| parser(data));
