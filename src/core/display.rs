//! Presentation helpers shared by frontends.

use super::item::{SearchItem, SearchItemType};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

impl SearchItemType {
    /// Heading shown above a group when categories are displayed.
    pub fn category_name(&self) -> &'static str {
        match self {
            SearchItemType::SearchEngine => "Search Engines",
            SearchItemType::SearchEngineKeyword => "Search",
            SearchItemType::Favorite => "Favorites",
            SearchItemType::ChromePage => "Browser Pages",
            SearchItemType::OpenTab => "Open Tabs",
            SearchItemType::Bookmark => "Bookmarks",
            SearchItemType::SearchHistory => "History",
        }
    }
}

/// Group results by kind.
///
/// Groups appear in order of their first item and keep the incoming order
/// inside each group.
pub fn group_by_type(items: &[SearchItem]) -> Vec<(SearchItemType, Vec<&SearchItem>)> {
    let mut groups: Vec<(SearchItemType, Vec<&SearchItem>)> = Vec::new();
    for item in items {
        let item_type = item.item_type();
        match groups.iter_mut().find(|(t, _)| *t == item_type) {
            Some((_, group)) => group.push(item),
            None => groups.push((item_type, vec![item])),
        }
    }
    groups
}

/// Relative day label for a history entry, at day granularity.
pub fn history_age_label(last_visited: i64, now: i64) -> String {
    let diff = now.div_euclid(MS_PER_DAY) - last_visited.div_euclid(MS_PER_DAY);

    match diff {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=29 => format!("{} days ago", diff),
        30..=364 => {
            let months = diff / 30;
            if months == 1 {
                "1 month ago".to_string()
            } else {
                format!("{} months ago", months)
            }
        }
        _ => "Over a year ago".to_string(),
    }
}

/// Why the result list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Nothing typed yet and no favorites to show
    NoQuery,
    /// The query matched nothing
    NoResults,
    /// Bound to a search engine, waiting for the query
    AwaitingKeyword,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoQuery => "Type to search tabs, bookmarks and history",
            EmptyState::NoResults => "No results found",
            EmptyState::AwaitingKeyword => "Type a keyword to search",
        }
    }
}
