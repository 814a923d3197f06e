//! CSV export to normalized records.
//!
//! Pipeline: raw text is tokenized into rows, row 0 is mapped to canonical
//! headers, and the remaining rows are assembled into records. Every stage is
//! pure and infallible; degenerate input produces fewer (or zero) records.

pub mod headers;
pub mod normalize;
pub mod record;
pub mod tokenize;

pub use headers::{HeaderMapper, HeaderMatch, HeaderRule, HeaderSet, PRICE_UPDATE_MARKER};
pub use normalize::{PriceValue, clean_field, parse_price};
pub use record::{FieldValue, Record, assemble};
pub use tokenize::{RawRow, tokenize};

/// Parses CSV text with a fixed header rule set.
#[derive(Debug, Clone, Default)]
pub struct RecordParser {
    mapper: HeaderMapper,
}

impl RecordParser {
    pub fn new(mapper: HeaderMapper) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &HeaderMapper {
        &self.mapper
    }

    /// Parse the complete export text into records.
    pub fn parse(&self, text: &str) -> Vec<Record> {
        tracing::debug!(chars = text.chars().count(), "parsing csv");

        let rows = tokenize(text);
        let Some(first) = rows.first() else {
            tracing::debug!("no rows found");
            return Vec::new();
        };

        let mut headers = self.mapper.map_headers(first);
        let widest = rows.iter().skip(1).map(Vec::len).max().unwrap_or(0);
        self.mapper.extend_to(&mut headers, widest);

        let records = assemble(&rows, &headers);
        tracing::debug!(rows = rows.len(), ?headers, records = records.len(), "parsed csv");
        records
    }
}

/// Parse with the product sheet header rules.
pub fn parse_csv(text: &str) -> Vec<Record> {
    RecordParser::default().parse(text)
}
