//! Tabular codec: records to/from the flat header+quoted-CSV text format.
//!
//! This is the one bit-exact boundary of the archive format. A table member
//! is a header line of column names joined by `,` (unquoted), followed by one
//! line per record with every field wrapped in double quotes. Embedded quotes
//! are escaped by doubling, so fields may safely contain commas and newlines
//! are the only forbidden content.
//!
//! Nulls and absent fields encode as the empty quoted field `""`; on decode an
//! empty field maps back to null. The codec is otherwise type-agnostic:
//! numbers and booleans round-trip as their string form, and the destination
//! store is expected to coerce them per the target column's declared type.

use crate::record::Record;
use serde_json::Value;

/// Encode a sequence of records into tabular text.
///
/// Column order is the key order of the first record; all records are
/// projected onto that column set (missing keys encode as null). An empty
/// input encodes to the empty string (no header), so callers must
/// special-case empty tables.
pub fn encode(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let columns: Vec<&str> = first.keys().map(String::as_str).collect();
    let mut out = String::new();
    out.push_str(&columns.join(","));

    for record in records {
        out.push('\n');
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_quoted(&mut out, record.get(*column));
        }
    }

    out
}

/// Decode tabular text back into records.
///
/// The first line is the header; each subsequent non-empty line is scanned
/// with a quote-aware splitter and zipped positionally with the header
/// columns. Missing trailing fields and empty fields decode as null. Empty or
/// whitespace-only input decodes to an empty sequence rather than an error.
pub fn decode(text: &str) -> Vec<Record> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut lines = trimmed.split('\n');
    let columns: Vec<&str> = match lines.next() {
        Some(header) => header.split(',').collect(),
        None => return Vec::new(),
    };

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_quoted(line);
        let mut record = Record::new();
        for (i, column) in columns.iter().enumerate() {
            let value = match fields.get(i) {
                Some(field) if !field.is_empty() => Value::String(field.clone()),
                _ => Value::Null,
            };
            record.insert((*column).to_string(), value);
        }
        records.push(record);
    }

    records
}

/// Append one field, quoted unconditionally, doubling embedded quotes.
fn push_quoted(out: &mut String, value: Option<&Value>) {
    out.push('"');
    match value {
        None | Some(Value::Null) => {}
        Some(Value::String(s)) => {
            for ch in s.chars() {
                if ch == '"' {
                    out.push('"');
                }
                out.push(ch);
            }
        }
        Some(other) => out.push_str(&other.to_string()),
    }
    out.push('"');
}

/// Split one data line on commas, honoring quoting.
///
/// A `"` toggles the in-quotes state; a doubled `""` while inside quotes is a
/// literal quote. Commas split fields only while outside quotes.
fn split_quoted(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn empty_input_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn empty_text_decodes_to_no_records() {
        assert_eq!(decode(""), Vec::<Record>::new());
        assert_eq!(decode("  \n \n"), Vec::<Record>::new());
    }

    #[test]
    fn encodes_header_from_first_record_key_order() {
        let records = vec![record(json!({"b": "1", "a": "2"}))];
        let text = encode(&records);
        assert!(text.starts_with("b,a\n"), "got: {text}");
    }

    #[test]
    fn every_field_is_quoted() {
        let records = vec![record(json!({"id": "7", "name": "bolt"}))];
        assert_eq!(encode(&records), "id,name\n\"7\",\"bolt\"");
    }

    #[test]
    fn null_and_missing_fields_encode_empty() {
        let records = vec![
            record(json!({"id": "1", "note": null})),
            record(json!({"id": "2"})),
        ];
        assert_eq!(encode(&records), "id,note\n\"1\",\"\"\n\"2\",\"\"");
    }

    #[test]
    fn numbers_and_booleans_encode_as_their_literal_form() {
        let records = vec![record(json!({"qty": 3, "active": true, "rate": 1.5}))];
        assert_eq!(encode(&records), "qty,active,rate\n\"3\",\"true\",\"1.5\"");
    }

    #[test]
    fn round_trips_string_records() {
        let records = vec![
            record(json!({"id": "1", "name": "washer", "price": "120"})),
            record(json!({"id": "2", "name": "nut", "price": "35"})),
        ];
        assert_eq!(decode(&encode(&records)), records);
    }

    #[test]
    fn round_trips_fields_containing_commas() {
        let records = vec![record(json!({"id": "1", "name": "bolt, hex, m8"}))];
        assert_eq!(decode(&encode(&records)), records);
    }

    #[test]
    fn round_trips_fields_containing_quotes() {
        let records = vec![record(json!({"id": "1", "name": "2\" pipe"}))];
        let text = encode(&records);
        assert_eq!(text, "id,name\n\"1\",\"2\"\" pipe\"");
        assert_eq!(decode(&text), records);
    }

    #[test]
    fn decode_preserves_header_column_order() {
        let records = vec![record(json!({"z": "1", "a": "2", "m": "3"}))];
        let decoded = decode(&encode(&records));
        let columns: Vec<&String> = decoded[0].keys().collect();
        assert_eq!(columns, ["z", "a", "m"]);
    }

    #[test]
    fn missing_trailing_fields_decode_as_null() {
        let decoded = decode("id,name,note\n\"1\",\"bolt\"");
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0]["id"], json!("1"));
        assert_eq!(decoded[0]["note"], Value::Null);
    }

    #[test]
    fn empty_fields_decode_as_null() {
        let decoded = decode("id,note\n\"1\",\"\"");
        assert_eq!(decoded[0]["note"], Value::Null);
    }

    #[test]
    fn header_plus_three_rows_decodes_to_three_records() {
        let text = "id,name\n\"1\",\"a\"\n\"2\",\"b\"\n\"3\",\"c\"";
        assert_eq!(decode(text).len(), 3);
    }
}
