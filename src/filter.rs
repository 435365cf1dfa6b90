/// GridView Substring Filter
///
/// Keeps the records where any textual leaf (nested fields included)
/// contains the query, ignoring case. The query is matched literally; no
/// pattern syntax is interpreted. Matching records keep their original order.

use crate::record::Record;

/// A lower-cased query, prepared once and matched against many records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    /// Prepare a query. Returns `None` for empty or whitespace-only text,
    /// which matches everything.
    pub fn parse(query: &str) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }
        Some(TextQuery {
            needle: query.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, record: &Record) -> bool {
        record.any_text_leaf(|text| contains_ignore_case(text, &self.needle))
    }
}

fn contains_ignore_case(text: &str, needle: &str) -> bool {
    // Skip the allocation when the leaf is already lower-case
    if text.chars().any(char::is_uppercase) {
        text.to_lowercase().contains(needle)
    } else {
        text.contains(needle)
    }
}

/// Filter `records` by `query`, preserving order.
///
/// An empty or whitespace-only query keeps every record.
pub fn filter<'a>(records: &'a [Record], query: &str) -> Vec<&'a Record> {
    match TextQuery::parse(query) {
        None => records.iter().collect(),
        Some(query) => records.iter().filter(|r| query.matches(r)).collect(),
    }
}
