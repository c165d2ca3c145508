//! User preferences, persisted as one JSON object in key-value storage.
//!
//! Every section carries `#[serde(default)]`, so a stored blob written by an
//! older version (or missing entirely) is filled in from [`Preferences::default`].
//! Sections are decoded independently: a malformed section falls back to its
//! defaults without taking the others with it.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ChocoError, ChocoResult};
use crate::platform::KeyValueStorage;
use crate::services::SearchEngine;
use crate::text::normalize;

/// Storage key of the preferences object.
pub const PREFERENCES_KEY: &str = "preferences";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Preferences {
    pub search_exclusion: SearchExclusion,
    pub display_and_behavior: DisplayAndBehavior,
    pub search_engines: Vec<SearchEngine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchExclusion {
    pub enable: bool,
    pub by_domains: Vec<String>,
    pub by_keywords: Vec<String>,
    pub by_bookmark_folders: Vec<String>,
    /// How many days of history are searched
    pub target_period_of_search_history: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayAndBehavior {
    pub show_category_name: bool,
    pub hide_notification_count_in_title: bool,
    pub open_in_new_tab: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            search_exclusion: SearchExclusion::default(),
            display_and_behavior: DisplayAndBehavior::default(),
            search_engines: default_search_engines(),
        }
    }
}

impl Default for SearchExclusion {
    fn default() -> Self {
        Self {
            enable: true,
            by_domains: Vec::new(),
            by_keywords: Vec::new(),
            by_bookmark_folders: Vec::new(),
            target_period_of_search_history: 30,
        }
    }
}

impl Default for DisplayAndBehavior {
    fn default() -> Self {
        Self {
            show_category_name: true,
            hide_notification_count_in_title: false,
            open_in_new_tab: true,
        }
    }
}

fn default_search_engines() -> Vec<SearchEngine> {
    let engine = |id: &str, name: &str, command: &str, url: &str| SearchEngine {
        id: id.to_string(),
        name: name.to_string(),
        command: command.to_string(),
        url: url.to_string(),
    };

    vec![
        engine("google", "Google", "google", "https://www.google.com/search?q={keyword}"),
        engine("youtube", "YouTube", "youtube", "https://www.youtube.com/results?search_query={keyword}"),
        engine("wikipedia", "Wikipedia", "wikipedia", "https://en.wikipedia.org/w/index.php?search={keyword}"),
    ]
}

impl Preferences {
    /// Clamp values to acceptable ranges and tidy up lists
    fn validate(&mut self) {
        // Clamp history period to 1 day - 10 years
        self.search_exclusion.target_period_of_search_history = self
            .search_exclusion
            .target_period_of_search_history
            .clamp(1, 3650);

        for list in [
            &mut self.search_exclusion.by_domains,
            &mut self.search_exclusion.by_keywords,
            &mut self.search_exclusion.by_bookmark_folders,
        ] {
            let mut seen = Vec::with_capacity(list.len());
            list.retain(|value| {
                let value = value.trim().to_string();
                if value.is_empty() || seen.contains(&value) {
                    return false;
                }
                seen.push(value);
                true
            });
        }
    }
}

/// Handle to the persisted preferences.
#[derive(Clone)]
pub struct PreferencesStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl PreferencesStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Stored preferences merged over defaults.
    ///
    /// A missing blob yields the defaults, and a malformed section yields
    /// that section's defaults; only storage failures are errors.
    pub async fn get(&self) -> ChocoResult<Preferences> {
        let (preferences, _) = self.load().await?;
        Ok(preferences)
    }

    /// Like [`get`](Self::get), but refuses a blob that did not fully decode.
    ///
    /// Used before writing back, so defaults never replace a section the
    /// user still has on disk.
    async fn get_for_update(&self) -> ChocoResult<Preferences> {
        match self.load().await? {
            (preferences, None) => Ok(preferences),
            (_, Some(e)) => Err(ChocoError::Serialization(e)),
        }
    }

    /// Decode the stored blob section by section, keeping the first error.
    async fn load(&self) -> ChocoResult<(Preferences, Option<serde_json::Error>)> {
        let mut preferences = Preferences::default();
        let mut error = None;

        match self.storage.get(PREFERENCES_KEY).await? {
            None => {}
            Some(Value::Object(map)) => {
                decode_section(&map, "searchExclusion", &mut preferences.search_exclusion, &mut error);
                decode_section(&map, "displayAndBehavior", &mut preferences.display_and_behavior, &mut error);
                decode_section(&map, "searchEngines", &mut preferences.search_engines, &mut error);
            }
            Some(_) => {
                let e = <serde_json::Error as serde::de::Error>::custom("preferences must be an object");
                tracing::warn!(error = %e, "stored preferences are malformed, using defaults");
                error = Some(e);
            }
        }

        preferences.validate();
        Ok((preferences, error))
    }

    pub async fn set(&self, preferences: &Preferences) -> ChocoResult<()> {
        self.storage
            .set(PREFERENCES_KEY, serde_json::to_value(preferences)?)
            .await
    }

    /// Add a search engine with a fresh id.
    ///
    /// Commands must be unique after normalization.
    pub async fn add_search_engine(
        &self,
        name: &str,
        command: &str,
        url: &str,
    ) -> ChocoResult<SearchEngine> {
        let engine = SearchEngine::new(name.trim(), command.trim(), url.trim());
        engine.validate()?;

        let mut preferences = self.get_for_update().await?;
        ensure_unique_command(&preferences.search_engines, &engine)?;
        preferences.search_engines.push(engine.clone());
        self.set(&preferences).await?;

        tracing::debug!(id = %engine.id, command = %engine.command, "added search engine");
        Ok(engine)
    }

    /// Replace the engine with the same id.
    pub async fn update_search_engine(&self, engine: SearchEngine) -> ChocoResult<()> {
        engine.validate()?;

        let mut preferences = self.get_for_update().await?;
        ensure_unique_command(&preferences.search_engines, &engine)?;
        let slot = preferences
            .search_engines
            .iter_mut()
            .find(|e| e.id == engine.id)
            .ok_or_else(|| ChocoError::EngineNotFound(engine.id.clone()))?;
        *slot = engine;

        self.set(&preferences).await
    }

    pub async fn remove_search_engine(&self, id: &str) -> ChocoResult<()> {
        let mut preferences = self.get_for_update().await?;
        let before = preferences.search_engines.len();
        preferences.search_engines.retain(|e| e.id != id);

        if preferences.search_engines.len() == before {
            return Err(ChocoError::EngineNotFound(id.to_string()));
        }
        self.set(&preferences).await
    }
}

fn decode_section<T: DeserializeOwned>(
    map: &Map<String, Value>,
    key: &str,
    slot: &mut T,
    error: &mut Option<serde_json::Error>,
) {
    let Some(value) = map.get(key) else { return };

    match serde_json::from_value(value.clone()) {
        Ok(section) => *slot = section,
        Err(e) => {
            tracing::warn!(section = key, error = %e, "stored preferences section is malformed, using defaults");
            error.get_or_insert(e);
        }
    }
}

fn ensure_unique_command(engines: &[SearchEngine], candidate: &SearchEngine) -> ChocoResult<()> {
    let command = normalize(&candidate.command);
    match engines
        .iter()
        .find(|e| e.id != candidate.id && normalize(&e.command) == command)
    {
        Some(existing) => Err(ChocoError::InvalidEngine(format!(
            "command '{}' is already used by '{}'",
            candidate.command, existing.name
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use serde_json::json;

    fn store() -> (Arc<MemoryStorage>, PreferencesStore) {
        let storage = Arc::new(MemoryStorage::default());
        (storage.clone(), PreferencesStore::new(storage))
    }

    #[tokio::test]
    async fn test_missing_key_yields_defaults() {
        let (_, prefs) = store();
        assert_eq!(prefs.get().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_partial_blob_merges_over_defaults() {
        let (storage, prefs) = store();
        storage
            .set(
                PREFERENCES_KEY,
                json!({ "displayAndBehavior": { "openInNewTab": false } }),
            )
            .await
            .unwrap();

        let loaded = prefs.get().await.unwrap();
        assert!(!loaded.display_and_behavior.open_in_new_tab);
        assert!(loaded.display_and_behavior.show_category_name);
        assert!(loaded.search_exclusion.enable);
        assert_eq!(loaded.search_engines, default_search_engines());
    }

    #[tokio::test]
    async fn test_malformed_blob_falls_back_to_defaults() {
        let (storage, prefs) = store();
        storage
            .set(PREFERENCES_KEY, json!({ "searchEngines": "nope" }))
            .await
            .unwrap();
        assert_eq!(prefs.get().await.unwrap(), Preferences::default());

        storage.set(PREFERENCES_KEY, json!([1, 2, 3])).await.unwrap();
        assert_eq!(prefs.get().await.unwrap(), Preferences::default());
    }

    #[tokio::test]
    async fn test_malformed_section_keeps_its_siblings() {
        let (storage, prefs) = store();
        let stored = json!({
            "searchEngines": [{
                "id": "mine",
                "name": "Mine",
                "command": "mine",
                "url": "https://mine.example/?q={keyword}"
            }],
            "displayAndBehavior": { "showCategoryName": false },
            "searchExclusion": { "targetPeriodOfSearchHistory": 7.5 }
        });
        storage.set(PREFERENCES_KEY, stored.clone()).await.unwrap();

        let loaded = prefs.get().await.unwrap();
        let commands: Vec<_> = loaded.search_engines.iter().map(|e| e.command.as_str()).collect();
        assert_eq!(commands, vec!["mine"]);
        assert!(!loaded.display_and_behavior.show_category_name);
        assert_eq!(loaded.search_exclusion, SearchExclusion::default());

        let result = prefs
            .add_search_engine("Other", "other", "https://other.example/?q={keyword}")
            .await;
        assert!(matches!(result, Err(ChocoError::Serialization(_))));
        assert!(matches!(
            prefs.remove_search_engine("mine").await,
            Err(ChocoError::Serialization(_))
        ));
        assert_eq!(storage.get(PREFERENCES_KEY).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_validate_clamps_and_tidies() {
        let (storage, prefs) = store();
        storage
            .set(
                PREFERENCES_KEY,
                json!({
                    "searchExclusion": {
                        "targetPeriodOfSearchHistory": 0,
                        "byDomains": ["a.com", " ", "a.com", "b.com"]
                    }
                }),
            )
            .await
            .unwrap();

        let loaded = prefs.get().await.unwrap();
        assert_eq!(loaded.search_exclusion.target_period_of_search_history, 1);
        assert_eq!(loaded.search_exclusion.by_domains, vec!["a.com", "b.com"]);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (_, prefs) = store();
        let mut custom = Preferences::default();
        custom.search_exclusion.by_keywords = vec!["secret".into()];
        custom.display_and_behavior.hide_notification_count_in_title = true;

        prefs.set(&custom).await.unwrap();
        assert_eq!(prefs.get().await.unwrap(), custom);
    }

    #[tokio::test]
    async fn test_search_engine_crud() {
        let (_, prefs) = store();

        let ddg = prefs
            .add_search_engine("DuckDuckGo", "ddg", "https://duckduckgo.com/?q={keyword}")
            .await
            .unwrap();
        assert!(prefs.get().await.unwrap().search_engines.contains(&ddg));

        let mut renamed = ddg.clone();
        renamed.name = "Duck".into();
        prefs.update_search_engine(renamed.clone()).await.unwrap();
        let engines = prefs.get().await.unwrap().search_engines;
        assert_eq!(engines.iter().find(|e| e.id == ddg.id), Some(&renamed));

        prefs.remove_search_engine(&ddg.id).await.unwrap();
        assert!(!prefs
            .get()
            .await
            .unwrap()
            .search_engines
            .iter()
            .any(|e| e.id == ddg.id));

        assert!(matches!(
            prefs.remove_search_engine(&ddg.id).await,
            Err(ChocoError::EngineNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_command_rejected() {
        let (_, prefs) = store();
        let result = prefs
            .add_search_engine("Other Google", "ＧＯＯＧＬＥ", "https://g.example/?q={keyword}")
            .await;
        assert!(matches!(result, Err(ChocoError::InvalidEngine(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_engine() {
        let (_, prefs) = store();
        let ghost = SearchEngine::new("Ghost", "ghost", "https://ghost/?q={keyword}");
        assert!(matches!(
            prefs.update_search_engine(ghost).await,
            Err(ChocoError::EngineNotFound(_))
        ));
    }
}
