//! Header-keyed records built from tokenized rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::headers::HeaderSet;
use super::normalize::{PriceValue, clean_field, keep_lines, parse_price};
use super::tokenize::RawRow;

/// Headers starting with this prefix hold price cells.
pub const PRICE_PREFIX: &str = "price";

/// Header whose value keeps its internal line breaks.
pub const DESCRIPTION_FIELD: &str = "description";

/// Suffix of the fully cleaned companion of the description field.
pub const CLEAN_SUFFIX: &str = "_clean";

/// A normalized cell value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Price(PriceValue),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Price(_) => None,
        }
    }

    pub fn as_price(&self) -> Option<&PriceValue> {
        match self {
            FieldValue::Price(p) => Some(p),
            FieldValue::Text(_) => None,
        }
    }
}

/// One data row keyed by canonical header, in column order.
///
/// Serializes as a flat JSON object with a trailing `rowNumber`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row_number: usize,
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    fn new(row_number: usize) -> Self {
        Self { row_number, fields: Vec::new() }
    }

    /// 1-based position among emitted records.
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn price(&self, name: &str) -> Option<&PriceValue> {
        self.get(name).and_then(FieldValue::as_price)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Number of field keys, not counting `rowNumber`.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A repeated header overwrites the earlier value but keeps its position.
    fn insert(&mut self, name: String, value: FieldValue) {
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    fn assign(&mut self, header: &str, raw: &str) {
        if header.starts_with(PRICE_PREFIX) && !raw.is_empty() {
            self.insert(header.to_string(), FieldValue::Price(parse_price(raw)));
        } else if header == DESCRIPTION_FIELD {
            self.insert(header.to_string(), FieldValue::Text(keep_lines(raw)));
            self.insert(format!("{header}{CLEAN_SUFFIX}"), FieldValue::Text(clean_field(raw)));
        } else {
            self.insert(header.to_string(), FieldValue::Text(clean_field(raw)));
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("rowNumber", &self.row_number)?;
        map.end()
    }
}

/// Build records from `rows[1..]`; row 0 is the header row.
///
/// Short rows read missing cells as empty strings. Rows with no non-empty
/// cell are skipped and do not consume a row number.
pub fn assemble(rows: &[RawRow], headers: &HeaderSet) -> Vec<Record> {
    rows.iter()
        .skip(1)
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .enumerate()
        .map(|(index, row)| {
            let mut record = Record::new(index + 1);
            for (col, header) in headers.iter().enumerate() {
                let raw = row.get(col).map(String::as_str).unwrap_or_default();
                record.assign(header, raw);
            }
            record
        })
        .collect()
}
