//! Built-in browser pages (`chrome://...`) bundled as a static catalog.

use serde::Serialize;

use crate::core::item::SearchItem;
use crate::website::Website;

/// A built-in browser page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChromePage {
    pub title: &'static str,
    pub url: &'static str,
}

/// Built-in pages, in the order they are offered.
pub const CHROME_PAGES: &[ChromePage] = &[
    ChromePage { title: "Settings", url: "chrome://settings" },
    ChromePage { title: "History", url: "chrome://history" },
    ChromePage { title: "Downloads", url: "chrome://downloads" },
    ChromePage { title: "Bookmarks", url: "chrome://bookmarks" },
    ChromePage { title: "Extensions", url: "chrome://extensions" },
    ChromePage { title: "Extension Shortcuts", url: "chrome://extensions/shortcuts" },
    ChromePage { title: "Password Manager", url: "chrome://password-manager" },
    ChromePage { title: "Clear Browsing Data", url: "chrome://settings/clearBrowserData" },
    ChromePage { title: "Search Engines", url: "chrome://settings/searchEngines" },
    ChromePage { title: "Privacy and Security", url: "chrome://settings/privacy" },
    ChromePage { title: "Appearance", url: "chrome://settings/appearance" },
    ChromePage { title: "Apps", url: "chrome://apps" },
    ChromePage { title: "Flags", url: "chrome://flags" },
    ChromePage { title: "About Chrome", url: "chrome://settings/help" },
    ChromePage { title: "Version", url: "chrome://version" },
];

impl ChromePage {
    fn matches(&self, keywords: &[String]) -> bool {
        // Catalog URLs are chrome://, which the website scheme filter rejects
        Website::new(self.title, self.url).matches_keywords(keywords)
    }
}

/// Catalog pages matching every keyword, at most `max`.
pub fn search(keywords: &[String], max: usize) -> Vec<SearchItem> {
    CHROME_PAGES
        .iter()
        .filter(|page| page.matches(keywords))
        .take(max)
        .cloned()
        .map(SearchItem::ChromePage)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{keywords, normalize};

    fn kw(query: &str) -> Vec<String> {
        keywords(&normalize(query))
    }

    #[test]
    fn test_matches_title_and_url() {
        let items = search(&kw("downloads"), 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url(), "chrome://downloads");

        let items = search(&kw("ＦＬＡＧＳ"), 1);
        assert_eq!(items[0].url(), "chrome://flags");
    }

    #[test]
    fn test_cap_applies_after_matching() {
        // "settings" matches several catalog entries
        assert_eq!(search(&kw("settings"), 1).len(), 1);
        assert!(search(&kw("settings"), 10).len() > 1);
        assert!(search(&kw("settings"), 0).is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(search(&kw("definitely not a page"), 1).is_empty());
    }

    #[test]
    fn test_catalog_urls_are_unique() {
        let mut urls: Vec<_> = CHROME_PAGES.iter().map(|p| p.url).collect();
        urls.sort_unstable();
        urls.dedup();
        assert_eq!(urls.len(), CHROME_PAGES.len());
    }
}
