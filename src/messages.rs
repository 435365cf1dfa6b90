/// Message types exchanged with a renderer
use serde::{Deserialize, Serialize};

use crate::column::ColumnDescriptor;
use crate::controller::{Presentation, ViewController, ViewState};
use crate::record::Record;

/// Intents sent from the renderer to the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewAction {
    /// Change the filter text
    SetQuery { text: String },

    /// Sort by a column (toggles direction on the active column)
    SetSort { column: String },

    /// Jump to a page
    SetPage { index: usize },

    /// Change rows per page
    SetPageSize { size: usize },
}

impl ViewAction {
    /// Decode an action from its JSON form, e.g. `{"type": "SetPage", "index": 2}`.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Everything a renderer needs to draw the current view
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub presentation: Presentation,
    pub state: ViewState,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<Record>,
    pub row_keys: Vec<Option<String>>,
    pub total_count: usize,
    pub page_count: usize,
    pub page_size_options: Vec<usize>,
}

impl ViewSnapshot {
    pub fn capture(controller: &ViewController) -> Self {
        let view = controller.view();
        let key_field = &controller.config().key_field;

        ViewSnapshot {
            presentation: controller.presentation(),
            state: controller.state().clone(),
            columns: controller.columns().columns().to_vec(),
            rows: view.visible_rows().to_vec(),
            row_keys: view.row_keys(key_field),
            total_count: view.total_count(),
            page_count: view.page_count(),
            page_size_options: controller.config().page_size_options.clone(),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}
