//! Favorites: websites the user pinned, persisted in key-value storage.
//!
//! Favorites are unique by URL. Mutations are read-modify-write against a
//! single stored list with no concurrency guard, so two popups mutating at
//! the same time resolve as last-write-wins.

use std::sync::Arc;

use crate::core::item::SearchItem;
use crate::error::ChocoResult;
use crate::platform::KeyValueStorage;
use crate::website::Website;

/// Storage key of the favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// Handle to the persisted favorites list.
#[derive(Clone)]
pub struct Favorites {
    storage: Arc<dyn KeyValueStorage>,
}

impl Favorites {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// All favorites in insertion order. A missing key means none.
    pub async fn get(&self) -> ChocoResult<Vec<Website>> {
        match self.storage.get(FAVORITES_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Add a website, replacing any favorite with the same URL.
    ///
    /// The website moves to the end of the list.
    pub async fn add(&self, website: Website) -> ChocoResult<()> {
        let mut favorites = self.get().await?;
        favorites.retain(|f| f.url != website.url);
        favorites.push(website);
        self.save(&favorites).await
    }

    /// Remove the favorite with `url`. Absent URLs are a no-op.
    pub async fn remove(&self, url: &str) -> ChocoResult<()> {
        let mut favorites = self.get().await?;
        let before = favorites.len();
        favorites.retain(|f| f.url != url);

        if favorites.len() == before {
            return Ok(());
        }
        self.save(&favorites).await
    }

    pub async fn contains(&self, url: &str) -> ChocoResult<bool> {
        Ok(self.get().await?.iter().any(|f| f.url == url))
    }

    /// Favorites matching every keyword, at most `max`.
    pub async fn search(&self, keywords: &[String], max: usize) -> ChocoResult<Vec<SearchItem>> {
        let mut matched: Vec<Website> = self
            .get()
            .await?
            .into_iter()
            .filter(|website| website.matches(keywords))
            .collect();
        matched.truncate(max);

        Ok(matched.into_iter().map(SearchItem::Favorite).collect())
    }

    async fn save(&self, favorites: &[Website]) -> ChocoResult<()> {
        tracing::debug!(count = favorites.len(), "saving favorites");
        self.storage
            .set(FAVORITES_KEY, serde_json::to_value(favorites)?)
            .await
    }
}
