//! Open browser tabs.

use serde::Serialize;

use crate::core::item::SearchItem;
use crate::error::ChocoResult;
use crate::platform::{RawTab, TabSource};
use crate::services::exclusion::ExclusionFilter;
use crate::website::Website;

/// An open tab. `id` is the browser's handle, valid only while it is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub id: i64,
    pub website: Website,
}

impl Tab {
    /// Build a tab from a platform record, dropping incomplete ones.
    pub fn from_raw(raw: RawTab, hide_notification_count_in_title: bool) -> Option<Self> {
        let (Some(id), Some(title), Some(url)) = (raw.id, raw.title, raw.url) else {
            return None;
        };

        let website = Website::new(title, url);
        Some(Self {
            id,
            website: if hide_notification_count_in_title {
                website.without_notification_count()
            } else {
                website
            },
        })
    }
}

/// Open tabs matching every keyword, at most `max`, in browser order.
pub async fn search(
    source: &dyn TabSource,
    keywords: &[String],
    max: usize,
    hide_notification_count_in_title: bool,
    exclusion: &ExclusionFilter,
) -> ChocoResult<Vec<SearchItem>> {
    let raw = source.query_tabs().await?;
    let total = raw.len();

    let tabs: Vec<Tab> = raw
        .into_iter()
        .filter_map(|tab| Tab::from_raw(tab, hide_notification_count_in_title))
        .collect();
    if tabs.len() < total {
        tracing::debug!(dropped = total - tabs.len(), "skipping incomplete tabs");
    }

    Ok(tabs
        .into_iter()
        .filter(|tab| tab.website.matches(keywords) && !exclusion.excludes(&tab.website))
        .take(max)
        .map(SearchItem::OpenTab)
        .collect())
}
