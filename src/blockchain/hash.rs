//! Canonical block encoding and digest.
//!
//! The canonical form is JSON with object keys sorted lexicographically,
//! `", "` / `": "` separators and every non-printable-ASCII character escaped
//! as `\uXXXX`. This is byte-for-byte what the reference nodes feed to
//! SHA-256, so digests agree across implementations. Array order (the
//! transaction list) is preserved.
//!
//! Two number encodings can still differ from Python's `json.dumps`:
//! integers outside the `i64`/`u64` range, which `serde_json` (built without
//! `arbitrary_precision`) reads as `f64`, and floats whose shortest form
//! differs between ryu and Python's `repr` (`1e16` here, `1e+16` there).
//! Blocks carrying such amounts hash differently on the two kinds of node.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};
use sha2::{Digest, Sha256};

/// SHA-256 (hex) of the canonical encoding of `value`.
pub fn digest<T: Serialize>(value: &T) -> String {
    let bytes = canonical_bytes(value).expect("block fields are always JSON-encodable");
    sha256_hex(&bytes)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Encode `value` in canonical form.
pub fn canonical_bytes<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    let value = sort_keys(serde_json::to_value(value)?);
    let mut out = Vec::with_capacity(256);
    let mut ser = Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut ser)?;
    Ok(out)
}

// Rebuild maps in key order; also correct if serde_json keeps insertion order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    // Control characters, quotes and backslashes arrive via `write_char_escape`.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{canonical_bytes, digest, sha256_hex};
    use crate::blockchain::Block;
    use crate::transaction::Transaction;
    use serde_json::Number;

    fn fixed_genesis() -> Block {
        Block {
            index: 1,
            timestamp: "2024-01-01 00:00:00.000000".into(),
            proof: 1,
            previous_hash: "0".into(),
            transactions: vec![],
        }
    }

    #[test]
    fn encoding_sorts_keys_and_spaces_separators() {
        let bytes = canonical_bytes(&fixed_genesis()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"index": 1, "previous_hash": "0", "proof": 1, "timestamp": "2024-01-01 00:00:00.000000", "transactions": []}"#
        );
    }

    #[test]
    fn genesis_digest_matches_reference_node() {
        assert_eq!(
            digest(&fixed_genesis()),
            "cad612a090e91b7e87692edd4b95eb203c86ced15e5252c36469e33f3a90a784"
        );
    }

    #[test]
    fn non_ascii_and_float_amounts_match_reference_node() {
        let block = Block {
            index: 2,
            timestamp: "2024-01-01 00:00:01.000000".into(),
            proof: 533,
            previous_hash: "abc".into(),
            transactions: vec![
                Transaction::new("node", "José", 10u64),
                Transaction::new("A", "B", Number::from_f64(2.5).unwrap()),
            ],
        };
        let text = String::from_utf8(canonical_bytes(&block).unwrap()).unwrap();
        assert!(text.contains(r#""receiver": "Jos\u00e9""#));
        assert_eq!(
            digest(&block),
            "49d23c36b6a059df94fa7d05d146216a6f3ed76056b505c6647f1ebd6834bf4e"
        );
    }

    #[test]
    fn transaction_order_is_significant() {
        let mut block = fixed_genesis();
        block.transactions = vec![
            Transaction::new("A", "B", 1u64),
            Transaction::new("C", "D", 2u64),
        ];
        let forward = digest(&block);
        block.transactions.reverse();
        assert_ne!(forward, digest(&block));
    }

    #[test]
    fn field_order_does_not_matter() {
        let a = serde_json::json!({"b": 1, "a": {"y": 2, "x": 3}});
        let b = serde_json::json!({"a": {"x": 3, "y": 2}, "b": 1});
        assert_eq!(digest(&a), digest(&b));
    }

    #[test]
    fn sha256_of_signed_text() {
        assert_eq!(
            sha256_hex(b"-1"),
            "1bad6b8cf97131fceab8543e81f7757195fbb1d36b376ee994ad1cf17699c464"
        );
    }
}
