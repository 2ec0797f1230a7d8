//! Byte-exact form field decoding.
//!
//! Page bodies are opaque bytes, so form values are percent-decoded into
//! `Vec<u8>` and never forced through UTF-8.

use percent_encoding::percent_decode;

/// First value of `key` in an `application/x-www-form-urlencoded` string.
///
/// Works for request bodies and query strings alike. `+` decodes to a space.
/// A key without `=` has an empty value.
pub fn urlencoded_value(input: &[u8], key: &str) -> Option<Vec<u8>> {
    input
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode(name) == key.as_bytes()).then(|| decode(value))
        })
}

fn decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}
