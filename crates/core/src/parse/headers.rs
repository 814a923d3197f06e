//! Header row to canonical field names.
//!
//! Names come from an ordered rule list. For a column, the first rule whose
//! position matches and whose matcher accepts the cleaned header text wins.
//! Columns no rule claims keep their cleaned text, or `column_<index>` when
//! that text is empty.

use super::normalize::clean_field;

/// Ordered canonical names, one per column position.
pub type HeaderSet = Vec<String>;

/// Title-column marker used by the price-update sheet layout.
pub const PRICE_UPDATE_MARKER: &str = "อัพเดจราคา";

/// Predicate applied to a cleaned header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMatch {
    /// Matches whatever the header says.
    Any,
    /// Matches when the cleaned header contains the substring.
    Contains(String),
}

impl HeaderMatch {
    fn accepts(&self, cleaned: &str) -> bool {
        match self {
            HeaderMatch::Any => true,
            HeaderMatch::Contains(marker) => cleaned.contains(marker.as_str()),
        }
    }
}

/// Assigns `canonical` to the column at `position` when `matcher` accepts it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    pub position: usize,
    pub matcher: HeaderMatch,
    pub canonical: String,
}

impl HeaderRule {
    pub fn positional(position: usize, canonical: impl Into<String>) -> Self {
        Self { position, matcher: HeaderMatch::Any, canonical: canonical.into() }
    }

    pub fn containing(position: usize, marker: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self { position, matcher: HeaderMatch::Contains(marker.into()), canonical: canonical.into() }
    }
}

/// Resolves header cells to canonical names using an ordered rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapper {
    rules: Vec<HeaderRule>,
}

impl HeaderMapper {
    pub fn new(rules: Vec<HeaderRule>) -> Self {
        Self { rules }
    }

    /// Rules for the product price sheet layout.
    pub fn product_sheet() -> Self {
        Self::new(vec![
            HeaderRule::containing(0, PRICE_UPDATE_MARKER, "title"),
            HeaderRule::positional(1, "image"),
            HeaderRule::positional(2, "productCode"),
            HeaderRule::positional(3, "description"),
            HeaderRule::positional(4, "priceRange"),
            HeaderRule::positional(5, "price100_300"),
            HeaderRule::positional(6, "price301_500"),
            HeaderRule::positional(7, "price501_1000"),
        ])
    }

    pub fn rules(&self) -> &[HeaderRule] {
        &self.rules
    }

    /// Canonical name for one header cell.
    pub fn canonical_name(&self, index: usize, raw: &str) -> String {
        let cleaned = clean_field(raw);

        if let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.position == index && rule.matcher.accepts(&cleaned))
        {
            return rule.canonical.clone();
        }

        if cleaned.is_empty() { format!("column_{index}") } else { cleaned }
    }

    /// Map the first tokenized row to a `HeaderSet`.
    pub fn map_headers(&self, first_row: &[String]) -> HeaderSet {
        first_row
            .iter()
            .enumerate()
            .map(|(index, raw)| self.canonical_name(index, raw))
            .collect()
    }

    /// Grow `headers` to `width` columns, naming new positions as if their header cell were empty.
    pub fn extend_to(&self, headers: &mut HeaderSet, width: usize) {
        for index in headers.len()..width {
            headers.push(self.canonical_name(index, ""));
        }
    }
}

impl Default for HeaderMapper {
    fn default() -> Self {
        Self::product_sheet()
    }
}
