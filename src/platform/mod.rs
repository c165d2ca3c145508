//! Platform abstraction layer over the browser.
//!
//! The search core never talks to the browser directly. Open tabs, the
//! bookmark tree, history and key-value storage are reached through the
//! traits defined here, so the same core runs against the real browser
//! bindings, the in-memory backend in [`memory`], or test doubles.

pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChocoResult;

pub use memory::{BrowserSnapshot, MemoryBrowser, MemoryStorage};

// ============================================================================
// Raw platform records
// ============================================================================

/// An open tab as reported by the browser.
///
/// Every field may be missing; adapters drop incomplete tabs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTab {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// A node of the bookmark tree. Folders have no URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    #[serde(default)]
    pub title: String,
    pub url: Option<String>,
    #[serde(default)]
    pub children: Vec<BookmarkNode>,
}

impl BookmarkNode {
    pub fn folder(title: impl Into<String>, children: Vec<BookmarkNode>) -> Self {
        Self {
            title: title.into(),
            url: None,
            children,
        }
    }

    pub fn bookmark(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            children: Vec::new(),
        }
    }
}

/// A history entry as reported by the browser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub url: Option<String>,
    pub title: Option<String>,
    /// Milliseconds since the Unix epoch
    pub last_visit_time: Option<i64>,
    pub visit_count: Option<u32>,
}

/// Parameters of a history pull.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryQuery {
    /// Platform-side text filter. Choco always sends an empty string and
    /// matches locally.
    pub text: String,
    /// Only entries visited at or after this time (ms since epoch)
    pub start_time: i64,
    /// Maximum entries to return, `None` for all
    pub max_results: Option<usize>,
}

// ============================================================================
// Platform traits
// ============================================================================

/// Lists the browser's open tabs.
#[async_trait]
pub trait TabSource: Send + Sync {
    async fn query_tabs(&self) -> ChocoResult<Vec<RawTab>>;
}

/// Reads the bookmark tree.
#[async_trait]
pub trait BookmarkSource: Send + Sync {
    /// Root node of the bookmark tree
    async fn tree(&self) -> ChocoResult<BookmarkNode>;
}

/// Reads browsing history.
#[async_trait]
pub trait HistorySource: Send + Sync {
    async fn search(&self, query: &HistoryQuery) -> ChocoResult<Vec<HistoryEntry>>;
}

/// Persistent key-value storage holding JSON values.
///
/// A missing key is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    async fn get(&self, key: &str) -> ChocoResult<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> ChocoResult<()>;
}

/// Opens pages and switches tabs.
#[async_trait]
pub trait TabControl: Send + Sync {
    /// Open `url` in a new tab
    async fn create(&self, url: &str, active: bool) -> ChocoResult<()>;
    /// Navigate an existing tab
    async fn update(&self, tab_id: i64, url: &str) -> ChocoResult<()>;
    /// Bring an open tab to the front
    async fn activate(&self, tab_id: i64) -> ChocoResult<()>;
    /// The active tab of the current window, if any
    async fn active_tab(&self) -> ChocoResult<Option<i64>>;
}

/// Aggregate struct holding every platform service the search core reads.
#[derive(Clone)]
pub struct Platform {
    pub tabs: Arc<dyn TabSource>,
    pub bookmarks: Arc<dyn BookmarkSource>,
    pub history: Arc<dyn HistorySource>,
    pub storage: Arc<dyn KeyValueStorage>,
}

impl Platform {
    /// Use one browser backend for tabs, bookmarks and history.
    pub fn from_browser(browser: Arc<MemoryBrowser>, storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            tabs: browser.clone(),
            bookmarks: browser.clone(),
            history: browser,
            storage,
        }
    }
}
