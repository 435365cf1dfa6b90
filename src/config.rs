/// View configuration
///
/// Page-size options, the initial page size, and the field that carries each
/// record's rendering key. Loadable from JSON or from `GRIDVIEW_*` environment
/// variables.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 20];
pub const DEFAULT_PAGE_SIZE: usize = 5;
pub const DEFAULT_KEY_FIELD: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Page sizes a renderer may offer.
    pub page_size_options: Vec<usize>,
    /// Page size on initialization. Must be one of `page_size_options`.
    pub default_page_size: usize,
    /// Field holding the unique rendering key of each record.
    pub key_field: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            key_field: DEFAULT_KEY_FIELD.to_string(),
        }
    }
}

impl ViewConfig {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let config: ViewConfig =
            serde_json::from_str(text).map_err(|e| format!("Invalid view config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from the environment, falling back to defaults.
    ///
    /// - `GRIDVIEW_PAGE_SIZES`: comma-separated list, e.g. `5,10,20`
    /// - `GRIDVIEW_PAGE_SIZE`: initial page size
    /// - `GRIDVIEW_KEY_FIELD`: rendering key field
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ViewConfig::default();

        if let Some(sizes) = lookup("GRIDVIEW_PAGE_SIZES") {
            config.page_size_options = sizes
                .split(',')
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse::<usize>()
                        .map_err(|_| format!("GRIDVIEW_PAGE_SIZES: '{}' is not a number", s))
                })
                .collect::<Result<_, _>>()?;
            if !config.page_size_options.contains(&config.default_page_size) {
                if let Some(first) = config.page_size_options.first() {
                    config.default_page_size = *first;
                }
            }
        }

        if let Some(size) = lookup("GRIDVIEW_PAGE_SIZE") {
            config.default_page_size = size
                .trim()
                .parse()
                .map_err(|_| format!("GRIDVIEW_PAGE_SIZE: '{}' is not a number", size))?;
        }

        if let Some(field) = lookup("GRIDVIEW_KEY_FIELD") {
            config.key_field = field;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.page_size_options.is_empty() {
            return Err("At least one page size option is required".to_string());
        }
        if self.page_size_options.contains(&0) {
            return Err("Page size options must be positive".to_string());
        }
        if !self.page_size_options.contains(&self.default_page_size) {
            return Err(format!(
                "Default page size {} is not one of {:?}",
                self.default_page_size, self.page_size_options
            ));
        }
        if self.key_field.is_empty() {
            return Err("Key field must not be empty".to_string());
        }
        Ok(())
    }

    pub fn allows_page_size(&self, size: usize) -> bool {
        self.page_size_options.contains(&size)
    }
}
