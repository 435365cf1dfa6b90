/// Source providers
///
/// A source provider is the asynchronous collaborator that supplies the raw
/// collection. The view engine imposes no transport; it only needs an array of
/// records of the shape its column set expects.
///
/// `refresh` drives one fetch against a controller shared as
/// `Rc<RefCell<ViewController>>`. It holds only a weak reference across the
/// await, so a controller dropped while the fetch is outstanding is never
/// written to.

use crate::controller::{FetchOutcome, ViewController};
use crate::error::FetchError;
use crate::record::{Collection, Record};
use log::debug;
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Weak;

/// Supplies the raw collection.
#[allow(async_fn_in_trait)]
pub trait SourceProvider {
    async fn fetch_collection(&self) -> Result<Collection, FetchError>;
}

/// Payload of a repository search, as returned by the GitHub search API.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Record>,
}

impl SearchResponse {
    pub fn into_collection(self) -> Collection {
        Collection::new(self.items)
    }
}

/// Decode a payload that is either a search response (`{"items": [...]}`)
/// or a bare array of records.
pub fn decode_payload(text: &str) -> Result<Collection, FetchError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Payload {
        Search(SearchResponse),
        Records(Vec<Record>),
    }

    match serde_json::from_str::<Payload>(text) {
        Ok(Payload::Search(response)) => {
            if response.incomplete_results {
                debug!("search response is incomplete ({} total)", response.total_count);
            }
            Ok(response.into_collection())
        }
        Ok(Payload::Records(records)) => Ok(Collection::new(records)),
        Err(_) => Err(FetchError::Decode(
            "expected a search response with 'items' or an array of objects".to_string(),
        )),
    }
}

/// A provider that always answers with the same result.
#[derive(Debug, Clone)]
pub struct StaticSource {
    result: Result<Collection, FetchError>,
}

impl StaticSource {
    pub fn new(collection: Collection) -> Self {
        StaticSource {
            result: Ok(collection),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, FetchError> {
        decode_payload(text).map(StaticSource::new)
    }

    pub fn failing(err: FetchError) -> Self {
        StaticSource { result: Err(err) }
    }
}

impl SourceProvider for StaticSource {
    async fn fetch_collection(&self) -> Result<Collection, FetchError> {
        self.result.clone()
    }
}

/// Reads a saved search response from disk.
#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct FileSource {
    path: std::path::PathBuf,
}

#[cfg(feature = "cli")]
impl FileSource {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[cfg(feature = "cli")]
impl SourceProvider for FileSource {
    async fn fetch_collection(&self) -> Result<Collection, FetchError> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::Unavailable(format!("{} not found", self.path.display()))
            } else {
                FetchError::from(e)
            }
        })?;
        decode_payload(&text)
    }
}

/// Fetch from `provider` and apply the result to `controller`.
///
/// The controller is borrowed only to take a ticket and to apply the result,
/// never across the await. Returns `Dropped` when the controller no longer
/// exists or was torn down, and `Stale` when a newer fetch was started in
/// the meantime.
pub async fn refresh<P>(controller: &Weak<RefCell<ViewController>>, provider: &P) -> FetchOutcome
where
    P: SourceProvider,
{
    let ticket = match controller.upgrade() {
        Some(strong) => strong.borrow_mut().begin_fetch(),
        None => return FetchOutcome::Dropped,
    };

    let result = provider.fetch_collection().await;

    match controller.upgrade() {
        Some(strong) => strong.borrow_mut().complete_fetch(ticket, result),
        None => {
            debug!("fetch {} resolved after controller was dropped", ticket.id());
            FetchOutcome::Dropped
        }
    }
}
