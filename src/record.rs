/// GridView Record Implementation
///
/// A Record is one structured item from the source collection, stored as a
/// JSON object. Records are immutable once fetched and cheap to clone: the
/// underlying map is shared, so derived views can hold rows without copying
/// field data.
///
/// # Examples
///
/// ```
/// use gridview::Record;
/// use serde_json::json;
///
/// let record = Record::from_value(json!({
///     "id": 7,
///     "name": "gridview",
///     "owner": { "login": "octocat" },
/// })).unwrap();
///
/// assert_eq!(record.lookup("owner.login").and_then(|v| v.as_str()), Some("octocat"));
/// assert_eq!(record.key("id").as_deref(), Some("7"));
/// ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// One record from the source collection.
#[derive(Clone, PartialEq)]
pub struct Record {
    fields: Rc<Map<String, Value>>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record {
            fields: Rc::new(fields),
        }
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(fields) => Ok(Record::new(fields)),
            other => Err(format!("expected a JSON object, found {}", type_name(&other))),
        }
    }

    /// Returns the top-level field with the given name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Resolves a dotted field path such as `owner.login`.
    ///
    /// A path without dots is a plain field lookup. An exact top-level match
    /// wins over path traversal, so field names containing dots still resolve.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.fields.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Returns true if the path resolves on this record (even to `null`).
    pub fn has_field(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    /// The rendering key for this record, as text.
    pub fn key(&self, key_field: &str) -> Option<String> {
        match self.lookup(key_field)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Visits the textual form of every leaf value, nested objects and arrays
    /// included. Stops early and returns true once `visit` returns true.
    ///
    /// Strings are visited as-is, numbers and booleans by their canonical
    /// string form. Nulls have no textual form and are skipped.
    pub fn any_text_leaf<F>(&self, mut visit: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        self.fields.values().any(|value| any_leaf(value, &mut visit))
    }

    /// Collects the textual leaves in field order.
    pub fn text_leaves(&self) -> Vec<String> {
        let mut leaves = Vec::new();
        self.any_text_leaf(|text| {
            leaves.push(text.to_string());
            false
        });
        leaves
    }
}

fn any_leaf<F>(value: &Value, visit: &mut F) -> bool
where
    F: FnMut(&str) -> bool,
{
    match value {
        Value::Null => false,
        Value::Bool(b) => visit(if *b { "true" } else { "false" }),
        Value::Number(n) => visit(&n.to_string()),
        Value::String(s) => visit(s),
        Value::Array(items) => items.iter().any(|item| any_leaf(item, visit)),
        Value::Object(map) => map.values().any(|item| any_leaf(item, visit)),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.as_ref().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Record::new)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record::new(fields)
    }
}

/// An ordered, immutable sequence of records.
///
/// A collection is replaced wholesale on refetch and never mutated in place.
/// Cloning shares the same backing slice.
#[derive(Debug, Clone)]
pub struct Collection {
    records: Rc<[Record]>,
}

impl Collection {
    pub fn new(records: Vec<Record>) -> Self {
        Collection {
            records: records.into(),
        }
    }

    pub fn empty() -> Self {
        Collection::new(Vec::new())
    }

    /// Decode a JSON array of objects.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<Record> = serde_json::from_str(text)?;
        Ok(Collection::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns true if both collections share the same backing storage.
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        Rc::ptr_eq(&self.records, &other.records)
    }

    /// Checks that every record carries a unique rendering key.
    pub fn key_report(&self, key_field: &str) -> KeyReport {
        let mut seen = HashSet::with_capacity(self.len());
        let mut report = KeyReport::default();

        for record in self.records.iter() {
            match record.key(key_field) {
                Some(key) => {
                    if !seen.insert(key.clone()) {
                        report.duplicates.push(key);
                    }
                }
                None => report.missing += 1,
            }
        }

        report
    }
}

impl Default for Collection {
    fn default() -> Self {
        Collection::empty()
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Collection::new(records)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Outcome of checking rendering keys across a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyReport {
    /// Number of records without a key.
    pub missing: usize,
    /// Keys seen more than once (one entry per repeat).
    pub duplicates: Vec<String>,
}

impl KeyReport {
    pub fn is_clean(&self) -> bool {
        self.missing == 0 && self.duplicates.is_empty()
    }
}
