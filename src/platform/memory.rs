//! In-memory browser and storage backends.
//!
//! Used by tests and by the CLI, which loads a [`BrowserSnapshot`] from a
//! JSON file instead of talking to a live browser.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    BookmarkNode, BookmarkSource, HistoryEntry, HistoryQuery, HistorySource, KeyValueStorage,
    RawTab, TabControl, TabSource,
};
use crate::error::{ChocoError, ChocoResult};

/// Everything the browser would report at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrowserSnapshot {
    pub tabs: Vec<RawTab>,
    pub bookmarks: BookmarkNode,
    pub history: Vec<HistoryEntry>,
}

impl BrowserSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> ChocoResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// A browser whose tabs, bookmarks and history live in memory.
#[derive(Debug, Default)]
pub struct MemoryBrowser {
    state: RwLock<BrowserSnapshot>,
}

impl MemoryBrowser {
    pub fn new(snapshot: BrowserSnapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }

    pub fn set_tabs(&self, tabs: Vec<RawTab>) {
        self.state.write().tabs = tabs;
    }

    pub fn set_bookmarks(&self, root: BookmarkNode) {
        self.state.write().bookmarks = root;
    }

    pub fn set_history(&self, history: Vec<HistoryEntry>) {
        self.state.write().history = history;
    }

    fn next_tab_id(state: &BrowserSnapshot) -> i64 {
        state.tabs.iter().filter_map(|t| t.id).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl TabSource for MemoryBrowser {
    async fn query_tabs(&self) -> ChocoResult<Vec<RawTab>> {
        Ok(self.state.read().tabs.clone())
    }
}

#[async_trait]
impl BookmarkSource for MemoryBrowser {
    async fn tree(&self) -> ChocoResult<BookmarkNode> {
        Ok(self.state.read().bookmarks.clone())
    }
}

#[async_trait]
impl HistorySource for MemoryBrowser {
    async fn search(&self, query: &HistoryQuery) -> ChocoResult<Vec<HistoryEntry>> {
        let state = self.state.read();
        let text = query.text.to_lowercase();

        let mut entries: Vec<HistoryEntry> = state
            .history
            .iter()
            .filter(|entry| entry.last_visit_time.unwrap_or(0) >= query.start_time)
            .filter(|entry| {
                text.is_empty()
                    || entry
                        .title
                        .iter()
                        .chain(entry.url.iter())
                        .any(|field| field.to_lowercase().contains(&text))
            })
            .cloned()
            .collect();

        if let Some(max) = query.max_results {
            entries.truncate(max);
        }

        Ok(entries)
    }
}

#[async_trait]
impl TabControl for MemoryBrowser {
    async fn create(&self, url: &str, active: bool) -> ChocoResult<()> {
        let mut state = self.state.write();
        let id = Self::next_tab_id(&state);

        if active {
            for tab in &mut state.tabs {
                tab.active = false;
            }
        }

        state.tabs.push(RawTab {
            id: Some(id),
            title: Some(url.to_string()),
            url: Some(url.to_string()),
            active,
        });
        Ok(())
    }

    async fn update(&self, tab_id: i64, url: &str) -> ChocoResult<()> {
        let mut state = self.state.write();
        let tab = state
            .tabs
            .iter_mut()
            .find(|t| t.id == Some(tab_id))
            .ok_or_else(|| ChocoError::Platform(format!("No tab with id {}", tab_id)))?;

        tab.url = Some(url.to_string());
        Ok(())
    }

    async fn activate(&self, tab_id: i64) -> ChocoResult<()> {
        let mut state = self.state.write();
        if !state.tabs.iter().any(|t| t.id == Some(tab_id)) {
            return Err(ChocoError::Platform(format!("No tab with id {}", tab_id)));
        }

        for tab in &mut state.tabs {
            tab.active = tab.id == Some(tab_id);
        }
        Ok(())
    }

    async fn active_tab(&self) -> ChocoResult<Option<i64>> {
        Ok(self
            .state
            .read()
            .tabs
            .iter()
            .find(|t| t.active)
            .and_then(|t| t.id))
    }
}

/// Key-value storage kept in memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<HashMap<String, Value>>,
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> ChocoResult<Option<Value>> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> ChocoResult<()> {
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }
}
