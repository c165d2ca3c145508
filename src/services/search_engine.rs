//! User-defined search engines, triggered by typing their command.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::item::SearchItem;
use crate::error::{ChocoError, ChocoResult};
use crate::text::normalize;

/// Placeholder in an engine URL template that receives the query.
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// A search engine the user can switch into by typing its command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEngine {
    pub id: String,
    pub name: String,
    pub command: String,
    /// URL template containing [`KEYWORD_PLACEHOLDER`]
    pub url: String,
}

impl SearchEngine {
    /// Create an engine with a fresh id.
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            command: command.into(),
            url: url.into(),
        }
    }

    /// Substitute the raw query text into the URL template.
    ///
    /// The text is inserted as typed, without percent-encoding.
    pub fn build_url(&self, keyword: &str) -> String {
        self.url.replace(KEYWORD_PLACEHOLDER, keyword)
    }

    /// Whether the (already normalized) query selects this engine.
    pub fn is_triggered_by(&self, normalized_text: &str) -> bool {
        !normalized_text.is_empty() && normalize(&self.command) == normalized_text
    }

    /// Reject engines the settings screen must not save.
    pub fn validate(&self) -> ChocoResult<()> {
        if self.name.trim().is_empty() {
            return Err(ChocoError::InvalidEngine("name is empty".to_string()));
        }
        if normalize(&self.command).is_empty() {
            return Err(ChocoError::InvalidEngine(format!(
                "'{}' has an empty command",
                self.name
            )));
        }
        if !self.url.contains(KEYWORD_PLACEHOLDER) {
            return Err(ChocoError::InvalidEngine(format!(
                "'{}' url has no {} placeholder",
                self.name, KEYWORD_PLACEHOLDER
            )));
        }
        Ok(())
    }
}

/// Engines whose command equals the whole normalized query.
///
/// Partial commands never qualify, and no cap is applied.
pub fn search(engines: &[SearchEngine], normalized_text: &str) -> Vec<SearchItem> {
    engines
        .iter()
        .filter(|engine| engine.is_triggered_by(normalized_text))
        .cloned()
        .map(SearchItem::SearchEngine)
        .collect()
}

/// The single result shown while bound to `engine`.
///
/// Returns nothing for blank input.
pub fn keyword_items(engine: &SearchEngine, raw_text: &str) -> Vec<SearchItem> {
    if raw_text.trim().is_empty() {
        return Vec::new();
    }

    vec![SearchItem::SearchEngineKeyword {
        engine: engine.clone(),
        keyword: raw_text.to_string(),
    }]
}
