//! Browsing history, most recent first.
//!
//! History is pulled without a platform-side text filter and matched
//! locally, so it gets the same script-insensitive matching as every other
//! source. The browser's own history search does not fold width or kana.

use serde::Serialize;

use crate::core::item::SearchItem;
use crate::error::ChocoResult;
use crate::platform::{HistoryEntry, HistoryQuery, HistorySource};
use crate::services::exclusion::ExclusionFilter;
use crate::website::Website;

/// Visit count assumed when the platform omits it.
const DEFAULT_VISIT_COUNT: u32 = 1;

/// A visited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    /// Milliseconds since the Unix epoch
    pub last_visited: i64,
    pub visit_count: u32,
    pub website: Website,
}

impl SearchHistory {
    /// Build from a platform record. Entries without a URL are dropped and
    /// a missing title falls back to the URL.
    pub fn from_entry(entry: HistoryEntry, hide_notification_count_in_title: bool) -> Option<Self> {
        let url = entry.url?;
        let title = entry
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.clone());

        let website = Website::new(title, url);
        Some(Self {
            last_visited: entry.last_visit_time.unwrap_or(0),
            visit_count: entry.visit_count.unwrap_or(DEFAULT_VISIT_COUNT),
            website: if hide_notification_count_in_title {
                website.without_notification_count()
            } else {
                website
            },
        })
    }
}

/// History entries matching every keyword, at most `max`, newest first.
///
/// `start_time` (ms since epoch) bounds how far back history is pulled.
pub async fn search(
    source: &dyn HistorySource,
    keywords: &[String],
    max: usize,
    start_time: i64,
    hide_notification_count_in_title: bool,
    exclusion: &ExclusionFilter,
) -> ChocoResult<Vec<SearchItem>> {
    let query = HistoryQuery {
        text: String::new(),
        start_time,
        max_results: None,
    };

    let mut history: Vec<SearchHistory> = source
        .search(&query)
        .await?
        .into_iter()
        .filter_map(|entry| SearchHistory::from_entry(entry, hide_notification_count_in_title))
        .collect();

    // Stable: ties keep platform order
    history.sort_by(|a, b| b.last_visited.cmp(&a.last_visited));

    Ok(history
        .into_iter()
        .filter(|h| h.website.matches(keywords) && !exclusion.excludes(&h.website))
        .take(max)
        .map(SearchItem::SearchHistory)
        .collect())
}
