/// GridView - Client-Side Data Views
///
/// Turns a record collection fetched once from a remote source into a
/// presentable view: filtered by free text across every field, ordered by a
/// selected column with stable tie-breaking, and sliced into pages. A single
/// `ViewController` owns the state and recomputes the view on every change.

pub mod record;
pub mod column;
pub mod comparator;
pub mod sort;
pub mod filter;
pub mod pager;
pub mod controller;
pub mod messages;
pub mod source;
pub mod config;
pub mod error;

pub use record::{Collection, KeyReport, Record};
pub use column::{ColumnDescriptor, ColumnSet, REPOSITORY_COLUMNS};
pub use comparator::{compare_values, Comparator, SortDirection};
pub use sort::{stable_sort, stable_sort_by};
pub use filter::{filter, TextQuery};
pub use pager::{page_count, paginate};
pub use controller::{
    DerivedView, FetchOutcome, FetchTicket, Presentation, SubscriptionId, ViewController,
    ViewState, ViewStatus,
};
pub use messages::{ViewAction, ViewSnapshot};
pub use source::{decode_payload, refresh, SearchResponse, SourceProvider, StaticSource};
#[cfg(feature = "cli")]
pub use source::FileSource;
pub use config::ViewConfig;
pub use error::{FetchError, ViewError};
