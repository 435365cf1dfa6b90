/// GridView Comparator Builder
///
/// Builds a total order over records from a sort key (a field path) and a
/// direction. Descending order is the exact reversal of ascending order, so
/// records that tie in one direction tie in the other.
///
/// Values of different JSON types are ranked
/// `null < boolean < number < string < array < object`; values of the same
/// type use their natural order. A field missing from one record ranks as
/// null. A field missing from both records is an invalid sort key.
///
/// # Examples
///
/// ```
/// use gridview::{Comparator, Record, SortDirection};
/// use serde_json::json;
/// use std::cmp::Ordering;
///
/// let a = Record::from_value(json!({ "stars": 10 })).unwrap();
/// let b = Record::from_value(json!({ "stars": 20 })).unwrap();
///
/// let desc = Comparator::build(Some("stars"), SortDirection::Descending);
/// assert_eq!(desc.compare(&a, &b).unwrap(), Ordering::Greater);
///
/// let unset = Comparator::build(Some("stars"), SortDirection::Unset);
/// assert_eq!(unset.compare(&a, &b).unwrap(), Ordering::Equal);
/// ```

use crate::error::{Result, ViewError};
use crate::record::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Sort direction for the active sort column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// No ordering requested; rows keep their source order
    #[default]
    Unset,
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

impl SortDirection {
    /// Next direction when the active column is clicked again.
    ///
    /// Unset moves to ascending; afterwards ascending and descending alternate.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Unset | SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }

    pub fn is_unset(self) -> bool {
        self == SortDirection::Unset
    }
}

/// A comparator over two records for one sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparator {
    key: Option<String>,
    direction: SortDirection,
}

impl Comparator {
    /// Build a comparator. With no key or an unset direction the comparator
    /// reports every pair as equal.
    pub fn build(sort_key: Option<&str>, direction: SortDirection) -> Self {
        Comparator {
            key: sort_key.map(str::to_string),
            direction,
        }
    }

    /// A comparator that never reorders.
    pub fn identity() -> Self {
        Comparator::build(None, SortDirection::Unset)
    }

    /// Returns true if this comparator reports every pair as equal.
    pub fn is_identity(&self) -> bool {
        self.key.is_none() || self.direction.is_unset()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Compare two records.
    ///
    /// A record lacking the sort field ranks as null. The call fails with
    /// `InvalidSortKey` only when both records lack it, so whether a sort over
    /// a collection fails depends on whether two such records get compared.
    pub fn compare(&self, a: &Record, b: &Record) -> Result<Ordering> {
        let key = match (&self.key, self.direction) {
            (None, _) | (_, SortDirection::Unset) => return Ok(Ordering::Equal),
            (Some(key), _) => key,
        };

        let val_a = a.lookup(key);
        let val_b = b.lookup(key);
        if val_a.is_none() && val_b.is_none() {
            return Err(ViewError::InvalidSortKey(key.clone()));
        }

        let base_cmp = compare_values(val_a, val_b);
        Ok(match self.direction {
            SortDirection::Descending => base_cmp.reverse(),
            _ => base_cmp,
        })
    }
}

/// Ascending natural order over optional JSON values. `None` ranks as null.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(x), Value::Array(y)) => {
            for (left, right) in x.iter().zip(y.iter()) {
                let cmp = compare_values(Some(left), Some(right));
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            x.len().cmp(&y.len())
        }
        // Objects have no natural order; fall back to their serialized form
        // so the result is at least deterministic.
        (Value::Object(_), Value::Object(_)) => a.to_string().cmp(&b.to_string()),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn compare_numbers(x: &Number, y: &Number) -> Ordering {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x.cmp(&y);
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x.cmp(&y);
    }
    // Mixed signed/unsigned or floating point
    let x = x.as_f64().unwrap_or(f64::NAN);
    let y = y.as_f64().unwrap_or(f64::NAN);
    x.total_cmp(&y)
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
