/// GridView View Controller
///
/// The controller owns the raw collection and the view state (query, sort
/// column and direction, page index and size) and is the single source of
/// truth a renderer reads. Every transition synchronously recomputes the
/// derived view by running filter, then stable sort, then pagination over the
/// current collection. Nothing is cached between recomputes, so the derived
/// view can never drift from its inputs.
///
/// Renderers observe changes by registering a callback with `subscribe`.
///
/// # Examples
///
/// ```
/// use gridview::{Collection, ColumnSet, SortDirection, ViewController};
///
/// let collection = Collection::from_json(r#"[
///     {"id": 1, "name": "a", "stargazers_count": 10},
///     {"id": 2, "name": "b", "stargazers_count": 30},
///     {"id": 3, "name": "c", "stargazers_count": 20}
/// ]"#).unwrap();
///
/// let mut controller = ViewController::new(ColumnSet::repositories());
/// controller.load_collection(collection);
/// controller.set_sort("stars").unwrap();
/// controller.set_sort("stars").unwrap();
///
/// assert_eq!(controller.state().sort_direction, SortDirection::Descending);
/// let names: Vec<&str> = controller
///     .view()
///     .visible_rows()
///     .iter()
///     .map(|r| r.get("name").unwrap().as_str().unwrap())
///     .collect();
/// assert_eq!(names, vec!["b", "c", "a"]);
/// ```

use crate::column::ColumnSet;
use crate::comparator::{Comparator, SortDirection};
use crate::config::ViewConfig;
use crate::error::{FetchError, Result, ViewError};
use crate::filter::filter;
use crate::messages::ViewAction;
use crate::pager::{clamp_page_index, page_count, paginate};
use crate::record::{Collection, Record};
use crate::sort::stable_sort;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The user-controlled selections that drive derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub query: String,
    /// Column key of the active sort column.
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
    pub page_index: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        ViewState {
            query: String::new(),
            sort_key: None,
            sort_direction: SortDirection::Unset,
            page_index: 0,
            page_size,
        }
    }
}

/// The computed, render-ready page of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    visible_rows: Vec<Record>,
    total_count: usize,
    page_index: usize,
    page_size: usize,
}

impl DerivedView {
    pub fn empty(page_size: usize) -> Self {
        DerivedView {
            visible_rows: Vec::new(),
            total_count: 0,
            page_index: 0,
            page_size,
        }
    }

    /// Rows on the current page, in display order.
    pub fn visible_rows(&self) -> &[Record] {
        &self.visible_rows
    }

    /// Size of the filtered set before pagination.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_count, self.page_size)
    }

    pub fn is_empty(&self) -> bool {
        self.visible_rows.is_empty()
    }

    /// Rendering keys of the visible rows.
    pub fn row_keys(&self, key_field: &str) -> Vec<Option<String>> {
        self.visible_rows.iter().map(|r| r.key(key_field)).collect()
    }
}

/// Where the controller is in the fetch lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    /// No fetch has been started yet.
    Idle,
    /// A fetch is outstanding. Transitions still apply to the held collection.
    Loading,
    /// A collection is loaded.
    Ready,
    /// The last fetch failed; the view is empty.
    Failed(FetchError),
    /// The pipeline rejected the current state; the view is empty.
    Error(ViewError),
}

/// What a renderer should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    Loading,
    /// Show an error indicator. `retryable` is set for fetch failures.
    Failed { message: String, retryable: bool },
    /// A collection is loaded but nothing matches the current query.
    NoResults,
    Rows,
}

/// Identifies one fetch started with `begin_fetch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the collection (or recorded the failure).
    Applied,
    /// A newer fetch was started since; the result was discarded.
    Stale,
    /// The controller was torn down; the result was discarded.
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&ViewController)>;

/// Owns the collection and view state and recomputes the derived view.
pub struct ViewController {
    config: ViewConfig,
    columns: ColumnSet,
    collection: Collection,
    state: ViewState,
    view: DerivedView,
    load_status: ViewStatus,
    pipeline_error: Option<ViewError>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    latest_fetch: u64,
    torn_down: bool,
}

impl ViewController {
    /// Create a controller with the default configuration.
    pub fn new(columns: ColumnSet) -> Self {
        Self::build(columns, ViewConfig::default())
    }

    /// Create a controller with a custom configuration.
    pub fn with_config(columns: ColumnSet, config: ViewConfig) -> std::result::Result<Self, String> {
        config.validate()?;
        Ok(Self::build(columns, config))
    }

    fn build(columns: ColumnSet, config: ViewConfig) -> Self {
        let page_size = config.default_page_size;
        ViewController {
            config,
            columns,
            collection: Collection::empty(),
            state: ViewState::new(page_size),
            view: DerivedView::empty(page_size),
            load_status: ViewStatus::Idle,
            pipeline_error: None,
            subscribers: Vec::new(),
            next_subscription: 0,
            latest_fetch: 0,
            torn_down: false,
        }
    }

    // ---- read side ----

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn view(&self) -> &DerivedView {
        &self.view
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn status(&self) -> ViewStatus {
        match &self.pipeline_error {
            Some(err) => ViewStatus::Error(err.clone()),
            None => self.load_status.clone(),
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn presentation(&self) -> Presentation {
        if let Some(err) = &self.pipeline_error {
            return Presentation::Failed {
                message: err.to_string(),
                retryable: false,
            };
        }
        match &self.load_status {
            ViewStatus::Failed(err) => Presentation::Failed {
                message: err.to_string(),
                retryable: true,
            },
            ViewStatus::Idle | ViewStatus::Loading if self.collection.is_empty() => {
                Presentation::Loading
            }
            _ if self.view.total_count() == 0 => Presentation::NoResults,
            _ => Presentation::Rows,
        }
    }

    // ---- transitions ----

    /// Set the filter text.
    ///
    /// The page index is kept while it still points at a page of the new
    /// result and goes back to the first page otherwise.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
        debug!("set_query: '{}'", self.state.query);
        let matching = filter(self.collection.records(), &self.state.query).len();
        if self.state.page_index >= page_count(matching, self.state.page_size) {
            self.state.page_index = 0;
        }
        self.recompute();
    }

    /// Sort by a column, toggling the direction if it is already active.
    ///
    /// A new column starts ascending. Clicking the active column again flips
    /// between ascending and descending. The page index is kept.
    pub fn set_sort(&mut self, column_key: &str) -> Result<()> {
        let column = self
            .columns
            .get(column_key)
            .ok_or_else(|| ViewError::InvalidSortKey(column_key.to_string()))?;
        if !column.sortable {
            return Err(ViewError::ColumnNotSortable(column_key.to_string()));
        }

        if self.state.sort_key.as_deref() == Some(column_key) {
            self.state.sort_direction = self.state.sort_direction.toggled();
        } else {
            self.state.sort_key = Some(column_key.to_string());
            self.state.sort_direction = SortDirection::Ascending;
        }
        debug!(
            "set_sort: {} {:?}",
            column_key, self.state.sort_direction
        );
        self.recompute();
        Ok(())
    }

    /// Go to a page. Returns false (and changes nothing) if the index is not
    /// a valid page for the current result size.
    pub fn set_page(&mut self, index: usize) -> bool {
        let pages = page_count(self.view.total_count(), self.state.page_size);
        if index >= pages {
            debug!("set_page: {} is outside [0, {})", index, pages);
            return false;
        }
        self.state.page_index = index;
        self.recompute();
        true
    }

    /// Change the page size. The size must be one of the configured options;
    /// the page index is clamped to the new page count.
    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !self.config.allows_page_size(size) {
            return Err(ViewError::InvalidPageRequest {
                page_index: self.state.page_index,
                page_size: size,
            });
        }
        self.state.page_size = size;
        debug!("set_page_size: {}", size);
        self.recompute();
        Ok(())
    }

    /// Replace the collection with a freshly fetched one.
    ///
    /// The page resets to the first page; query and sort are kept.
    pub fn load_collection(&mut self, collection: Collection) {
        if self.torn_down {
            warn!("load_collection after teardown ignored");
            return;
        }

        let report = collection.key_report(&self.config.key_field);
        if report.missing > 0 {
            warn!(
                "{} of {} records have no '{}' key",
                report.missing,
                collection.len(),
                self.config.key_field
            );
        }
        if !report.duplicates.is_empty() {
            warn!(
                "duplicate '{}' keys in collection: {:?}",
                self.config.key_field, report.duplicates
            );
        }

        debug!("load_collection: {} records", collection.len());
        self.collection = collection;
        self.load_status = ViewStatus::Ready;
        self.state.page_index = 0;
        self.recompute();
    }

    /// Record a failed fetch. The view becomes empty and the error is kept
    /// for display.
    pub fn load_failed(&mut self, err: FetchError) {
        if self.torn_down {
            warn!("load_failed after teardown ignored: {}", err);
            return;
        }
        warn!("collection fetch failed: {}", err);
        self.collection = Collection::empty();
        self.load_status = ViewStatus::Failed(err);
        self.state.page_index = 0;
        self.recompute();
    }

    /// Mark a fetch as started and return its ticket. Only the most recently
    /// issued ticket may complete.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        if !self.torn_down {
            self.load_status = ViewStatus::Loading;
            self.notify();
        }
        debug!("begin_fetch: ticket {}", self.latest_fetch);
        FetchTicket(self.latest_fetch)
    }

    /// Apply the result of a fetch started with `begin_fetch`.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: std::result::Result<Collection, FetchError>,
    ) -> FetchOutcome {
        if self.torn_down {
            debug!("fetch {} resolved after teardown, discarded", ticket.0);
            return FetchOutcome::Dropped;
        }
        if ticket.0 != self.latest_fetch {
            warn!(
                "fetch {} resolved after newer fetch {}, discarded",
                ticket.0, self.latest_fetch
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(collection) => self.load_collection(collection),
            Err(err) => self.load_failed(err),
        }
        FetchOutcome::Applied
    }

    /// Apply a renderer intent. Returns whether the state changed.
    pub fn dispatch(&mut self, action: ViewAction) -> Result<bool> {
        match action {
            ViewAction::SetQuery { text } => {
                self.set_query(text);
                Ok(true)
            }
            ViewAction::SetSort { column } => self.set_sort(&column).map(|_| true),
            ViewAction::SetPage { index } => Ok(self.set_page(index)),
            ViewAction::SetPageSize { size } => self.set_page_size(size).map(|_| true),
        }
    }

    /// Detach the controller: subscribers are dropped and any fetch still in
    /// flight is discarded when it resolves.
    pub fn teardown(&mut self) {
        debug!("teardown: dropping {} subscribers", self.subscribers.len());
        self.torn_down = true;
        self.subscribers.clear();
    }

    // ---- subscriptions ----

    /// Register a callback invoked after every recompute and status change.
    ///
    /// The callback receives the controller by shared reference; it must not
    /// try to mutate the controller from inside the callback.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ViewController) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        if !self.torn_down {
            self.subscribers.push((id, Box::new(callback)));
        }
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let mut subscribers = std::mem::take(&mut self.subscribers);
        for (_, callback) in subscribers.iter_mut() {
            callback(&*self);
        }
        self.subscribers = subscribers;
    }

    // ---- derivation ----

    fn sort_field(&self) -> Option<&'static str> {
        let key = self.state.sort_key.as_deref()?;
        self.columns.get(key).map(|c| c.field)
    }

    /// Run filter, sort and pagination over the current collection.
    fn derive(&self) -> Result<DerivedView> {
        let filtered = filter(self.collection.records(), &self.state.query);
        let comparator = Comparator::build(self.sort_field(), self.state.sort_direction);
        let sorted = stable_sort(filtered, &comparator)?;

        let total_count = sorted.len();
        let page_size = self.state.page_size;
        let page_index = clamp_page_index(self.state.page_index, total_count, page_size);
        let page = paginate(&sorted, page_index, page_size)?;

        Ok(DerivedView {
            visible_rows: page.iter().map(|r| (*r).clone()).collect(),
            total_count,
            page_index,
            page_size,
        })
    }

    fn recompute(&mut self) {
        match self.derive() {
            Ok(view) => {
                self.state.page_index = view.page_index;
                self.view = view;
                self.pipeline_error = None;
            }
            Err(err) => {
                error!("view derivation failed: {}", err);
                self.view = DerivedView::empty(self.state.page_size);
                self.pipeline_error = Some(err);
            }
        }
        self.notify();
    }
}

impl fmt::Debug for ViewController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewController")
            .field("state", &self.state)
            .field("status", &self.status())
            .field("records", &self.collection.len())
            .field("total_count", &self.view.total_count())
            .field("subscribers", &self.subscribers.len())
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn repos(stars: &[i64]) -> Collection {
        stars
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let login = if i % 2 == 0 { "even" } else { "odd" };
                Record::from_value(json!({
                    "id": i,
                    "name": format!("repo-{}", i),
                    "owner": { "login": login },
                    "stargazers_count": s,
                    "forks_count": 100 - s,
                }))
                .unwrap()
            })
            .collect::<Vec<_>>()
            .into()
    }

    fn visible_ids(controller: &ViewController) -> Vec<u64> {
        controller
            .view()
            .visible_rows()
            .iter()
            .map(|r| r.get("id").unwrap().as_u64().unwrap())
            .collect()
    }

    fn loaded(stars: &[i64]) -> ViewController {
        let mut controller = ViewController::new(ColumnSet::repositories());
        controller.load_collection(repos(stars));
        controller
    }

    #[test]
    fn test_initial_state() {
        let controller = ViewController::new(ColumnSet::repositories());
        assert_eq!(controller.state(), &ViewState::new(5));
        assert_eq!(controller.status(), ViewStatus::Idle);
        assert_eq!(controller.presentation(), Presentation::Loading);
        assert!(controller.view().is_empty());
    }

    #[test]
    fn test_load_collection_paginates() {
        let controller = loaded(&[1; 12]);
        assert_eq!(controller.status(), ViewStatus::Ready);
        assert_eq!(controller.view().total_count(), 12);
        assert_eq!(visible_ids(&controller), vec![0, 1, 2, 3, 4]);
        assert_eq!(controller.view().page_count(), 3);
        assert_eq!(controller.presentation(), Presentation::Rows);
    }

    #[test]
    fn test_sort_toggle_cycle() {
        let mut controller = loaded(&[3, 1, 2]);

        controller.set_sort("stars").unwrap();
        assert_eq!(controller.state().sort_direction, SortDirection::Ascending);
        assert_eq!(visible_ids(&controller), vec![1, 2, 0]);

        controller.set_sort("stars").unwrap();
        assert_eq!(controller.state().sort_direction, SortDirection::Descending);
        assert_eq!(visible_ids(&controller), vec![0, 2, 1]);

        controller.set_sort("stars").unwrap();
        assert_eq!(controller.state().sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn test_switching_sort_column_starts_ascending() {
        let mut controller = loaded(&[3, 1, 2]);
        controller.set_sort("stars").unwrap();
        controller.set_sort("stars").unwrap();
        controller.set_sort("forks").unwrap();
        assert_eq!(controller.state().sort_key.as_deref(), Some("forks"));
        assert_eq!(controller.state().sort_direction, SortDirection::Ascending);
        // forks = 100 - stars, so ascending forks is descending stars
        assert_eq!(visible_ids(&controller), vec![0, 2, 1]);
    }

    #[test]
    fn test_sort_rejects_unknown_and_unsortable() {
        let mut controller = loaded(&[3, 1, 2]);
        assert_eq!(
            controller.set_sort("watchers"),
            Err(ViewError::InvalidSortKey("watchers".to_string()))
        );
        assert_eq!(
            controller.set_sort("name"),
            Err(ViewError::ColumnNotSortable("name".to_string()))
        );
        assert_eq!(controller.state().sort_key, None);
        assert_eq!(visible_ids(&controller), vec![0, 1, 2]);
    }

    #[test]
    fn test_sort_keeps_page_index() {
        let mut controller = loaded(&[1; 12]);
        assert!(controller.set_page(2));
        controller.set_sort("stars").unwrap();
        assert_eq!(controller.state().page_index, 2);
    }

    #[test]
    fn test_set_page_bounds() {
        let mut controller = loaded(&[1; 12]);
        assert!(controller.set_page(2));
        assert_eq!(visible_ids(&controller), vec![10, 11]);
        assert!(!controller.set_page(3));
        assert!(!controller.set_page(10));
        assert_eq!(controller.state().page_index, 2);
    }

    #[test]
    fn test_set_page_size_clamps() {
        let mut controller = loaded(&[1; 12]);
        controller.set_page(2);
        controller.set_page_size(20).unwrap();
        assert_eq!(controller.state().page_index, 0);
        assert_eq!(controller.view().visible_rows().len(), 12);

        controller.set_page_size(5).unwrap();
        controller.set_page(2);
        controller.set_page_size(10).unwrap();
        assert_eq!(controller.state().page_index, 1);
        assert_eq!(visible_ids(&controller), vec![10, 11]);
    }

    #[test]
    fn test_set_page_size_rejects_unlisted() {
        let mut controller = loaded(&[1; 12]);
        assert_eq!(
            controller.set_page_size(7),
            Err(ViewError::InvalidPageRequest {
                page_index: 0,
                page_size: 7
            })
        );
        assert_eq!(controller.state().page_size, 5);
    }

    #[test]
    fn test_query_resets_page() {
        let mut controller = loaded(&[1; 12]);
        controller.set_page(2);
        // Only repo-1, repo-10, repo-11 contain "repo-1"
        controller.set_query("REPO-1");
        assert_eq!(controller.view().total_count(), 3);
        assert_eq!(controller.state().page_index, 0);
        assert_eq!(visible_ids(&controller), vec![1, 10, 11]);
    }

    #[test]
    fn test_query_past_last_page_returns_to_first() {
        let mut controller = loaded(&[1; 40]);
        assert!(controller.set_page(5));
        // "even" owners: 20 matches, 4 pages of 5
        controller.set_query("even");
        assert_eq!(controller.view().total_count(), 20);
        assert_eq!(controller.state().page_index, 0);
        assert_eq!(visible_ids(&controller), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_query_keeps_page_still_in_range() {
        let mut controller = loaded(&[1; 40]);
        assert!(controller.set_page(2));
        controller.set_query("even");
        assert_eq!(controller.state().page_index, 2);
        assert_eq!(visible_ids(&controller), vec![20, 22, 24, 26, 28]);
    }

    #[test]
    fn test_query_then_sort_orders_filtered_set() {
        let mut controller = loaded(&[5, 9, 7, 3, 8]);
        controller.set_query("even");
        controller.set_sort("stars").unwrap();
        controller.set_sort("stars").unwrap();
        // even owners: ids 0 (5), 2 (7), 4 (8)
        assert_eq!(visible_ids(&controller), vec![4, 2, 0]);
    }

    #[test]
    fn test_no_results_is_not_an_error() {
        let mut controller = loaded(&[1, 2]);
        controller.set_query("zzz");
        assert_eq!(controller.view().total_count(), 0);
        assert_eq!(controller.status(), ViewStatus::Ready);
        assert_eq!(controller.presentation(), Presentation::NoResults);
    }

    #[test]
    fn test_reload_keeps_query_and_sort() {
        let mut controller = loaded(&[1; 12]);
        controller.set_query("odd");
        controller.set_sort("stars").unwrap();
        controller.set_page(1);

        controller.load_collection(repos(&[4, 3, 2, 1]));
        assert_eq!(controller.state().query, "odd");
        assert_eq!(controller.state().sort_key.as_deref(), Some("stars"));
        assert_eq!(controller.state().page_index, 0);
        assert_eq!(visible_ids(&controller), vec![3, 1]);
    }

    #[test]
    fn test_load_failed() {
        let mut controller = loaded(&[1, 2, 3]);
        let err = FetchError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        controller.load_failed(err.clone());

        assert_eq!(controller.status(), ViewStatus::Failed(err));
        assert_eq!(controller.view().total_count(), 0);
        assert!(controller.view().is_empty());
        match controller.presentation() {
            Presentation::Failed { retryable, message } => {
                assert!(retryable);
                assert!(message.contains("503"));
            }
            other => panic!("unexpected presentation {:?}", other),
        }

        // Transitions still work while failed
        controller.set_query("x");
        assert!(matches!(controller.status(), ViewStatus::Failed(_)));
    }

    #[test]
    fn test_pipeline_error_becomes_error_state() {
        let mut controller = ViewController::new(ColumnSet::repositories());
        // Records without the stars field at all
        controller.load_collection(
            Collection::from_json(r#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]"#).unwrap(),
        );
        controller.set_sort("stars").unwrap();

        assert_eq!(
            controller.status(),
            ViewStatus::Error(ViewError::InvalidSortKey("stargazers_count".to_string()))
        );
        assert!(controller.view().is_empty());
        assert!(matches!(
            controller.presentation(),
            Presentation::Failed { retryable: false, .. }
        ));

        // A fresh collection with the field recovers
        controller.load_collection(repos(&[2, 1]));
        assert_eq!(controller.status(), ViewStatus::Ready);
        assert_eq!(visible_ids(&controller), vec![1, 0]);
    }

    #[test]
    fn test_transitions_while_loading() {
        let mut controller = ViewController::new(ColumnSet::repositories());
        let ticket = controller.begin_fetch();
        assert_eq!(controller.status(), ViewStatus::Loading);

        controller.set_query("repo");
        controller.set_sort("stars").unwrap();
        assert!(controller.view().is_empty());
        assert_eq!(controller.presentation(), Presentation::Loading);

        assert_eq!(
            controller.complete_fetch(ticket, Ok(repos(&[2, 1]))),
            FetchOutcome::Applied
        );
        assert_eq!(visible_ids(&controller), vec![1, 0]);
    }

    #[test]
    fn test_stale_fetch_discarded() {
        let mut controller = ViewController::new(ColumnSet::repositories());
        let first = controller.begin_fetch();
        let second = controller.begin_fetch();

        assert_eq!(
            controller.complete_fetch(second, Ok(repos(&[1, 2]))),
            FetchOutcome::Applied
        );
        assert_eq!(
            controller.complete_fetch(first, Ok(repos(&[1, 2, 3, 4]))),
            FetchOutcome::Stale
        );
        assert_eq!(controller.view().total_count(), 2);
    }

    #[test]
    fn test_teardown_discards_fetch() {
        let mut controller = ViewController::new(ColumnSet::repositories());
        let notified = Rc::new(RefCell::new(0));
        let counter = notified.clone();
        controller.subscribe(move |_| *counter.borrow_mut() += 1);

        let ticket = controller.begin_fetch();
        controller.teardown();
        assert_eq!(
            controller.complete_fetch(ticket, Ok(repos(&[1]))),
            FetchOutcome::Dropped
        );
        assert!(controller.collection().is_empty());
        assert_eq!(controller.subscriber_count(), 0);
        // Only the begin_fetch notification arrived
        assert_eq!(*notified.borrow(), 1);
    }

    #[test]
    fn test_subscribers_see_each_recompute() {
        let mut controller = ViewController::new(ColumnSet::repositories());
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = controller.subscribe(move |c| sink.borrow_mut().push(c.view().total_count()));

        controller.load_collection(repos(&[1, 2, 3]));
        controller.set_query("repo-2");
        assert_eq!(*seen.borrow(), vec![3, 1]);

        assert!(controller.unsubscribe(id));
        assert!(!controller.unsubscribe(id));
        controller.set_query("");
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_dispatch() {
        let mut controller = loaded(&[1; 12]);
        assert!(controller
            .dispatch(ViewAction::SetPage { index: 1 })
            .unwrap());
        assert!(!controller
            .dispatch(ViewAction::SetPage { index: 5 })
            .unwrap());
        assert!(controller
            .dispatch(ViewAction::SetSort {
                column: "owner".to_string()
            })
            .is_err());
        assert!(controller
            .dispatch(ViewAction::SetQuery {
                text: "repo-3".to_string()
            })
            .unwrap());
        assert_eq!(visible_ids(&controller), vec![3]);
    }

    #[test]
    fn test_with_config() {
        let config = ViewConfig {
            page_size_options: vec![2, 4],
            default_page_size: 2,
            key_field: "id".to_string(),
        };
        let mut controller = ViewController::with_config(ColumnSet::repositories(), config).unwrap();
        controller.load_collection(repos(&[1, 2, 3]));
        assert_eq!(visible_ids(&controller), vec![0, 1]);
        assert!(controller.set_page_size(5).is_err());

        let bad = ViewConfig {
            default_page_size: 3,
            ..ViewConfig::default()
        };
        assert!(ViewController::with_config(ColumnSet::repositories(), bad).is_err());
    }
}
