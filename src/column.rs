/// GridView Column Descriptors
///
/// Columns are a static, compile-time-known set. A descriptor ties a column
/// key (what the renderer and the sort toggle refer to) to the record field
/// it displays, a label, and whether the column may be sorted.

use crate::record::Record;
use serde::Serialize;
use serde_json::Value;

/// Describes one displayable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    /// Identifier used by sort requests and renderers.
    pub key: &'static str,
    /// Display text for the header.
    pub label: &'static str,
    /// Field path on the record, e.g. `owner.login`.
    pub field: &'static str,
    pub sortable: bool,
}

impl ColumnDescriptor {
    pub const fn new(key: &'static str, label: &'static str, field: &'static str) -> Self {
        ColumnDescriptor {
            key,
            label,
            field,
            sortable: false,
        }
    }

    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Text shown for this column's cell in the given record.
    ///
    /// Missing fields and nulls render as an empty string.
    pub fn cell_text(&self, record: &Record) -> String {
        match record.lookup(self.field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Columns of a repository search listing.
pub const REPOSITORY_COLUMNS: &[ColumnDescriptor] = &[
    ColumnDescriptor::new("name", "Name", "name"),
    ColumnDescriptor::new("description", "Description", "description"),
    ColumnDescriptor::new("owner", "Owner", "owner.login"),
    ColumnDescriptor::new("stars", "Stars", "stargazers_count").sortable(),
    ColumnDescriptor::new("forks", "Forks", "forks_count").sortable(),
    ColumnDescriptor::new("language", "Language", "language"),
];

/// An ordered, static set of column descriptors.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSet {
    columns: &'static [ColumnDescriptor],
}

impl ColumnSet {
    pub const fn new(columns: &'static [ColumnDescriptor]) -> Self {
        ColumnSet { columns }
    }

    pub const fn repositories() -> Self {
        ColumnSet::new(REPOSITORY_COLUMNS)
    }

    pub fn get(&self, key: &str) -> Option<&'static ColumnDescriptor> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn columns(&self) -> &'static [ColumnDescriptor] {
        self.columns
    }

    pub fn sortable(&self) -> impl Iterator<Item = &'static ColumnDescriptor> {
        self.columns.iter().filter(|c| c.sortable)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Cell texts for a record, one per column in order.
    pub fn row_texts(&self, record: &Record) -> Vec<String> {
        self.columns.iter().map(|c| c.cell_text(record)).collect()
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        ColumnSet::repositories()
    }
}
