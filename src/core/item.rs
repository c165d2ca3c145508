//! Search result model.

use std::borrow::Cow;

use serde::Serialize;

use crate::services::{ChromePage, SearchEngine, SearchHistory, Tab};
use crate::website::Website;

/// Kind of a search result, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SearchItemType {
    SearchEngine,
    SearchEngineKeyword,
    Favorite,
    ChromePage,
    OpenTab,
    Bookmark,
    SearchHistory,
}

/// A single result shown in the popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SearchItem {
    /// Selecting it binds the query box to the engine
    SearchEngine(SearchEngine),
    /// The query typed while bound to an engine
    SearchEngineKeyword {
        engine: SearchEngine,
        keyword: String,
    },
    Favorite(Website),
    ChromePage(ChromePage),
    OpenTab(Tab),
    Bookmark(Website),
    SearchHistory(SearchHistory),
}

impl SearchItem {
    pub fn item_type(&self) -> SearchItemType {
        match self {
            SearchItem::SearchEngine(_) => SearchItemType::SearchEngine,
            SearchItem::SearchEngineKeyword { .. } => SearchItemType::SearchEngineKeyword,
            SearchItem::Favorite(_) => SearchItemType::Favorite,
            SearchItem::ChromePage(_) => SearchItemType::ChromePage,
            SearchItem::OpenTab(_) => SearchItemType::OpenTab,
            SearchItem::Bookmark(_) => SearchItemType::Bookmark,
            SearchItem::SearchHistory(_) => SearchItemType::SearchHistory,
        }
    }

    /// The website behind this result.
    ///
    /// Navigation-only results (search engines, built-in pages) have none.
    pub fn website(&self) -> Option<&Website> {
        match self {
            SearchItem::SearchEngine(_) => None,
            SearchItem::SearchEngineKeyword { .. } => None,
            SearchItem::ChromePage(_) => None,
            SearchItem::Favorite(website) => Some(website),
            SearchItem::OpenTab(tab) => Some(&tab.website),
            SearchItem::Bookmark(website) => Some(website),
            SearchItem::SearchHistory(history) => Some(&history.website),
        }
    }

    /// The URL this result opens. Also the deduplication key.
    pub fn url(&self) -> Cow<'_, str> {
        match self {
            SearchItem::SearchEngine(engine) => Cow::Borrowed(&engine.url),
            SearchItem::SearchEngineKeyword { engine, keyword } => {
                Cow::Owned(engine.build_url(keyword))
            }
            SearchItem::ChromePage(page) => Cow::Borrowed(page.url),
            SearchItem::Favorite(website) | SearchItem::Bookmark(website) => {
                Cow::Borrowed(&website.url)
            }
            SearchItem::OpenTab(tab) => Cow::Borrowed(&tab.website.url),
            SearchItem::SearchHistory(history) => Cow::Borrowed(&history.website.url),
        }
    }

    /// Primary line of the result.
    pub fn title(&self) -> Cow<'_, str> {
        match self {
            SearchItem::SearchEngine(engine) => Cow::Owned(format!("Search with {}", engine.name)),
            SearchItem::SearchEngineKeyword { engine, keyword } => {
                Cow::Owned(format!("Search \"{}\" with {}", keyword, engine.name))
            }
            SearchItem::ChromePage(page) => Cow::Borrowed(page.title),
            SearchItem::Favorite(website) | SearchItem::Bookmark(website) => {
                Cow::Borrowed(&website.title)
            }
            SearchItem::OpenTab(tab) => Cow::Borrowed(&tab.website.title),
            SearchItem::SearchHistory(history) => Cow::Borrowed(&history.website.title),
        }
    }

    /// Secondary line: the domain for website results, the URL for pages.
    pub fn caption(&self) -> Option<String> {
        match self {
            SearchItem::SearchEngine(engine) => Some(engine.command.clone()),
            SearchItem::SearchEngineKeyword { .. } => None,
            SearchItem::ChromePage(page) => Some(page.url.to_string()),
            SearchItem::Favorite(_)
            | SearchItem::OpenTab(_)
            | SearchItem::Bookmark(_)
            | SearchItem::SearchHistory(_) => self.website().map(Website::domain),
        }
    }
}
