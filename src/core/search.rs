//! The aggregating search.
//!
//! [`Search::search`] normalizes the query, asks every source for matches,
//! concatenates them in a fixed priority order and drops duplicate URLs:
//!
//! ```text
//! SearchEngine > Favorite > ChromePage > OpenTab > Bookmark > SearchHistory
//! ```
//!
//! A blank query short-circuits to the full favorites list.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use super::item::SearchItem;
use crate::error::ChocoResult;
use crate::platform::{BookmarkSource, HistorySource, Platform, TabSource};
use crate::preferences::{PreferencesStore, SearchExclusion};
use crate::services::{bookmark, chrome_page, history, search_engine, tab};
use crate::services::{ExclusionFilter, Favorites};
use crate::text::{keywords, normalize};

/// Per-source result caps.
pub const MAX_FAVORITES: usize = 3;
pub const MAX_CHROME_PAGES: usize = 1;
pub const MAX_OPEN_TABS: usize = 5;
pub const MAX_BOOKMARKS: usize = 5;
pub const MAX_HISTORY: usize = 5;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// A query as issued by the popup on each (debounced) keystroke.
///
/// The stored `hideNotificationCountInTitle` preference applies on its own;
/// the flag here forces it on for a single query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub text: String,
    pub hide_notification_count_in_title: bool,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hide_notification_count_in_title: false,
        }
    }

    pub fn hide_notification_count(mut self, hide: bool) -> Self {
        self.hide_notification_count_in_title = hide;
        self
    }
}

/// Search across every source.
///
/// Holds handles to the stores and platform services it reads; nothing is
/// cached between queries.
#[derive(Clone)]
pub struct Search {
    favorites: Favorites,
    preferences: PreferencesStore,
    tabs: Arc<dyn TabSource>,
    bookmarks: Arc<dyn BookmarkSource>,
    history: Arc<dyn HistorySource>,
}

impl Search {
    pub fn new(platform: &Platform) -> Self {
        Self {
            favorites: Favorites::new(platform.storage.clone()),
            preferences: PreferencesStore::new(platform.storage.clone()),
            tabs: platform.tabs.clone(),
            bookmarks: platform.bookmarks.clone(),
            history: platform.history.clone(),
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn preferences(&self) -> &PreferencesStore {
        &self.preferences
    }

    /// Run a query against all sources.
    ///
    /// Fails if any platform call fails; there are no partial results.
    pub async fn search(&self, query: &SearchQuery) -> ChocoResult<Vec<SearchItem>> {
        let normalized = normalize(&query.text);
        let keywords = keywords(&normalized);

        if keywords.is_empty() {
            let favorites = self.favorites.get().await?;
            return Ok(favorites.into_iter().map(SearchItem::Favorite).collect());
        }

        let preferences = self.preferences.get().await?;
        let exclusion = ExclusionFilter::from_preferences(&preferences.search_exclusion);
        let start_time = history_start_time(&preferences.search_exclusion, now_millis());
        let hide = query.hide_notification_count_in_title
            || preferences.display_and_behavior.hide_notification_count_in_title;

        let engines = search_engine::search(&preferences.search_engines, &normalized);
        let chrome_pages = chrome_page::search(&keywords, MAX_CHROME_PAGES);

        let (favorites, tabs, bookmarks, history) = tokio::try_join!(
            self.favorites.search(&keywords, MAX_FAVORITES),
            tab::search(self.tabs.as_ref(), &keywords, MAX_OPEN_TABS, hide, &exclusion),
            bookmark::search(self.bookmarks.as_ref(), &keywords, MAX_BOOKMARKS, hide, &exclusion),
            history::search(
                self.history.as_ref(),
                &keywords,
                MAX_HISTORY,
                start_time,
                hide,
                &exclusion,
            ),
        )?;

        tracing::debug!(
            query = %normalized,
            engines = engines.len(),
            favorites = favorites.len(),
            chrome_pages = chrome_pages.len(),
            tabs = tabs.len(),
            bookmarks = bookmarks.len(),
            history = history.len(),
            "search finished"
        );

        Ok(dedupe_by_url(
            engines
                .into_iter()
                .chain(favorites)
                .chain(chrome_pages)
                .chain(tabs)
                .chain(bookmarks)
                .chain(history),
        ))
    }
}

/// Drop items whose URL was already seen, keeping the first occurrence.
pub fn dedupe_by_url(items: impl IntoIterator<Item = SearchItem>) -> Vec<SearchItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url().into_owned()))
        .collect()
}

/// Oldest history visit (ms since epoch) worth pulling.
fn history_start_time(exclusion: &SearchExclusion, now: i64) -> i64 {
    if !exclusion.enable {
        return 0;
    }
    let period = i64::from(exclusion.target_period_of_search_history) * MS_PER_DAY;
    now.saturating_sub(period).max(0)
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::core::item::SearchItemType;
    use crate::error::ChocoError;
    use crate::platform::{
        BookmarkNode, HistoryEntry, HistoryQuery, MemoryBrowser, MemoryStorage, RawTab,
    };
    use crate::preferences::Preferences;
    use crate::services::SearchEngine;
    use crate::website::Website;

    struct Fixture {
        browser: Arc<MemoryBrowser>,
        search: Search,
    }

    fn fixture() -> Fixture {
        let browser = Arc::new(MemoryBrowser::default());
        let platform = Platform::from_browser(browser.clone(), Arc::new(MemoryStorage::default()));
        Fixture {
            browser,
            search: Search::new(&platform),
        }
    }

    fn tab(id: i64, title: &str, url: &str) -> RawTab {
        RawTab {
            id: Some(id),
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            active: false,
        }
    }

    fn visit(title: &str, url: &str, days_ago: i64) -> HistoryEntry {
        HistoryEntry {
            url: Some(url.to_string()),
            title: Some(title.to_string()),
            last_visit_time: Some(now_millis() - days_ago * MS_PER_DAY),
            visit_count: Some(3),
        }
    }

    async fn set_engines(search: &Search, engines: Vec<SearchEngine>) {
        let mut prefs = search.preferences().get().await.unwrap();
        prefs.search_engines = engines;
        search.preferences().set(&prefs).await.unwrap();
    }

    fn types(items: &[SearchItem]) -> Vec<SearchItemType> {
        items.iter().map(SearchItem::item_type).collect()
    }

    #[tokio::test]
    async fn test_empty_query_returns_all_favorites_in_order() {
        let f = fixture();
        let favorites = f.search.favorites();
        favorites.add(Website::new("B", "https://b.example")).await.unwrap();
        favorites.add(Website::new("A", "https://a.example")).await.unwrap();
        favorites.add(Website::new("Settings", "chrome://settings")).await.unwrap();
        f.browser.set_tabs(vec![tab(1, "B", "https://b.example")]);

        for text in ["", "   ", "\u{3000}"] {
            let items = f.search.search(&SearchQuery::new(text)).await.unwrap();
            assert_eq!(
                items,
                vec![
                    SearchItem::Favorite(Website::new("B", "https://b.example")),
                    SearchItem::Favorite(Website::new("A", "https://a.example")),
                    SearchItem::Favorite(Website::new("Settings", "chrome://settings")),
                ]
            );
        }
    }

    #[tokio::test]
    async fn test_priority_order() {
        let f = fixture();
        set_engines(
            &f.search,
            vec![SearchEngine::new("Docs Search", "docs", "https://docs.search/?q={keyword}")],
        )
        .await;
        f.search
            .favorites()
            .add(Website::new("Docs fav", "https://fav.example/docs"))
            .await
            .unwrap();
        f.browser.set_tabs(vec![tab(1, "Docs tab", "https://tab.example/docs")]);
        f.browser.set_bookmarks(BookmarkNode::folder(
            "",
            vec![BookmarkNode::bookmark("Docs bm", "https://bm.example/docs")],
        ));
        f.browser
            .set_history(vec![visit("Docs visit", "https://hist.example/docs", 1)]);

        let items = f.search.search(&SearchQuery::new("docs")).await.unwrap();
        assert_eq!(
            types(&items),
            vec![
                SearchItemType::SearchEngine,
                SearchItemType::Favorite,
                SearchItemType::OpenTab,
                SearchItemType::Bookmark,
                SearchItemType::SearchHistory,
            ]
        );
    }

    #[tokio::test]
    async fn test_chrome_page_sits_between_favorites_and_tabs() {
        let f = fixture();
        f.browser
            .set_tabs(vec![tab(1, "Download manager", "https://dl.example")]);

        let items = f.search.search(&SearchQuery::new("download")).await.unwrap();
        assert_eq!(
            types(&items),
            vec![SearchItemType::ChromePage, SearchItemType::OpenTab]
        );
    }

    #[tokio::test]
    async fn test_dedup_keeps_highest_priority_source() {
        let f = fixture();
        let url = "https://shared.example";
        f.search
            .favorites()
            .add(Website::new("Shared", url))
            .await
            .unwrap();
        f.browser.set_tabs(vec![tab(1, "Shared", url)]);
        f.browser.set_bookmarks(BookmarkNode::folder(
            "",
            vec![BookmarkNode::bookmark("Shared", url)],
        ));
        f.browser.set_history(vec![
            visit("Shared", url, 0),
            visit("Shared other", "https://other.example/shared", 0),
        ]);

        let items = f.search.search(&SearchQuery::new("shared")).await.unwrap();
        assert_eq!(
            types(&items),
            vec![SearchItemType::Favorite, SearchItemType::SearchHistory]
        );
        assert_eq!(items[1].url(), "https://other.example/shared");

        let urls: HashSet<_> = items.iter().map(|i| i.url().into_owned()).collect();
        assert_eq!(urls.len(), items.len());
    }

    #[tokio::test]
    async fn test_dedup_falls_through_to_tab_when_not_favorite() {
        let f = fixture();
        let url = "https://only-open.example";
        f.browser.set_tabs(vec![tab(9, "Open", url)]);
        f.browser.set_history(vec![visit("Open", url, 0)]);

        let items = f.search.search(&SearchQuery::new("open")).await.unwrap();
        assert_eq!(types(&items), vec![SearchItemType::OpenTab]);
    }

    #[tokio::test]
    async fn test_per_source_caps() {
        let f = fixture();
        for i in 0..10 {
            f.search
                .favorites()
                .add(Website::new("Wiki", format!("https://fav.example/{}", i)))
                .await
                .unwrap();
        }
        f.browser.set_tabs(
            (0..10)
                .map(|i| tab(i, "Wiki", &format!("https://tab.example/{}", i)))
                .collect(),
        );
        f.browser.set_bookmarks(BookmarkNode::folder(
            "",
            (0..10)
                .map(|i| BookmarkNode::bookmark("Wiki", format!("https://bm.example/{}", i)))
                .collect(),
        ));
        f.browser.set_history(
            (0..10)
                .map(|i| visit("Wiki", &format!("https://hist.example/{}", i), 0))
                .collect(),
        );

        let items = f.search.search(&SearchQuery::new("wiki")).await.unwrap();
        let count = |t: SearchItemType| items.iter().filter(|i| i.item_type() == t).count();

        assert_eq!(count(SearchItemType::Favorite), MAX_FAVORITES);
        assert_eq!(count(SearchItemType::OpenTab), MAX_OPEN_TABS);
        assert_eq!(count(SearchItemType::Bookmark), MAX_BOOKMARKS);
        assert_eq!(count(SearchItemType::SearchHistory), MAX_HISTORY);
    }

    #[tokio::test]
    async fn test_goog_scenario() {
        let f = fixture();
        set_engines(
            &f.search,
            vec![SearchEngine::new("Google", "google", "https://google.com/?q={keyword}")],
        )
        .await;
        f.browser
            .set_tabs(vec![tab(1, "Google News", "https://news.google.com")]);

        let items = f.search.search(&SearchQuery::new("goog")).await.unwrap();
        assert_eq!(types(&items), vec![SearchItemType::OpenTab]);

        let items = f.search.search(&SearchQuery::new("google")).await.unwrap();
        assert_eq!(items[0].item_type(), SearchItemType::SearchEngine);
    }

    #[tokio::test]
    async fn test_scheme_filter_across_sources() {
        let f = fixture();
        f.search
            .favorites()
            .add(Website::new("Internal", "chrome://internal-fav"))
            .await
            .unwrap();
        f.browser
            .set_tabs(vec![tab(1, "Internal", "chrome-extension://abc/internal")]);
        f.browser.set_bookmarks(BookmarkNode::folder(
            "",
            vec![BookmarkNode::bookmark("Internal", "javascript:void(0)")],
        ));
        f.browser
            .set_history(vec![visit("Internal", "about:internal", 0)]);

        let items = f.search.search(&SearchQuery::new("internal")).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_exclusion_and_history_period() {
        let f = fixture();
        let mut prefs = Preferences::default();
        prefs.search_exclusion.enable = true;
        prefs.search_exclusion.by_domains = vec!["blocked.example".into()];
        prefs.search_exclusion.target_period_of_search_history = 7;
        f.search.preferences().set(&prefs).await.unwrap();

        f.browser.set_tabs(vec![
            tab(1, "Report", "https://blocked.example/report"),
            tab(2, "Report", "https://ok.example/report"),
        ]);
        f.browser.set_history(vec![
            visit("Report", "https://ok.example/recent", 2),
            visit("Report", "https://ok.example/ancient", 30),
        ]);

        let items = f.search.search(&SearchQuery::new("report")).await.unwrap();
        let urls: Vec<_> = items.iter().map(|i| i.url().into_owned()).collect();
        assert_eq!(
            urls,
            vec!["https://ok.example/report", "https://ok.example/recent"]
        );

        prefs.search_exclusion.enable = false;
        f.search.preferences().set(&prefs).await.unwrap();
        let items = f.search.search(&SearchQuery::new("report")).await.unwrap();
        assert_eq!(items.len(), 4);
    }

    #[tokio::test]
    async fn test_hide_notification_count() {
        let f = fixture();
        f.browser.set_tabs(vec![tab(1, "(12) Chat", "https://chat.example")]);

        let query = SearchQuery::new("chat").hide_notification_count(true);
        let items = f.search.search(&query).await.unwrap();
        assert_eq!(items[0].title(), "Chat");
    }

    #[tokio::test]
    async fn test_hide_notification_count_from_preferences() {
        let f = fixture();
        f.browser.set_tabs(vec![tab(1, "(12) Chat", "https://chat.example")]);

        let items = f.search.search(&SearchQuery::new("chat")).await.unwrap();
        assert_eq!(items[0].title(), "(12) Chat");

        let mut prefs = f.search.preferences().get().await.unwrap();
        prefs.display_and_behavior.hide_notification_count_in_title = true;
        f.search.preferences().set(&prefs).await.unwrap();

        let items = f.search.search(&SearchQuery::new("chat")).await.unwrap();
        assert_eq!(items[0].title(), "Chat");
    }

    struct BrokenHistory;

    #[async_trait]
    impl HistorySource for BrokenHistory {
        async fn search(&self, _query: &HistoryQuery) -> ChocoResult<Vec<HistoryEntry>> {
            Err(ChocoError::Platform("history unavailable".into()))
        }
    }

    #[tokio::test]
    async fn test_platform_failure_rejects_whole_search() {
        let browser = Arc::new(MemoryBrowser::default());
        browser.set_tabs(vec![tab(1, "Mail", "https://mail.example")]);
        let mut platform = Platform::from_browser(browser, Arc::new(MemoryStorage::default()));
        platform.history = Arc::new(BrokenHistory);
        let search = Search::new(&platform);

        let result = search.search(&SearchQuery::new("mail")).await;
        assert!(matches!(result, Err(ChocoError::Platform(_))));

        // The idle state never touches history
        assert!(search.search(&SearchQuery::new("")).await.unwrap().is_empty());
    }

    #[test]
    fn test_history_start_time() {
        let mut exclusion = SearchExclusion {
            enable: true,
            target_period_of_search_history: 2,
            ..Default::default()
        };
        assert_eq!(history_start_time(&exclusion, 10 * MS_PER_DAY), 8 * MS_PER_DAY);
        assert_eq!(history_start_time(&exclusion, MS_PER_DAY), 0);

        exclusion.enable = false;
        assert_eq!(history_start_time(&exclusion, 10 * MS_PER_DAY), 0);
    }

    #[test]
    fn test_dedupe_by_url_keeps_first() {
        let items = dedupe_by_url(vec![
            SearchItem::Bookmark(Website::new("first", "https://x.example")),
            SearchItem::Bookmark(Website::new("y", "https://y.example")),
            SearchItem::SearchHistory(crate::services::SearchHistory {
                last_visited: 0,
                visit_count: 1,
                website: Website::new("second", "https://x.example"),
            }),
        ]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "first");
    }
}
