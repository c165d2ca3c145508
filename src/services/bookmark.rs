//! Bookmarks, flattened from the browser's bookmark tree.

use crate::core::item::SearchItem;
use crate::error::ChocoResult;
use crate::platform::{BookmarkNode, BookmarkSource};
use crate::services::exclusion::ExclusionFilter;
use crate::website::Website;

/// Flatten a bookmark tree into its URL entries, in pre-order.
///
/// Folders excluded by `exclusion` are skipped together with everything
/// below them.
pub fn flatten(
    node: &BookmarkNode,
    hide_notification_count_in_title: bool,
    exclusion: &ExclusionFilter,
) -> Vec<Website> {
    let mut websites = Vec::new();
    walk(node, hide_notification_count_in_title, exclusion, &mut websites);
    websites
}

fn walk(
    node: &BookmarkNode,
    hide_notification_count_in_title: bool,
    exclusion: &ExclusionFilter,
    out: &mut Vec<Website>,
) {
    match &node.url {
        Some(url) => {
            let website = Website::new(node.title.clone(), url.clone());
            out.push(if hide_notification_count_in_title {
                website.without_notification_count()
            } else {
                website
            });
        }
        None if exclusion.excludes_folder(&node.title) => return,
        None => {}
    }

    for child in &node.children {
        walk(child, hide_notification_count_in_title, exclusion, out);
    }
}

/// Bookmarks matching every keyword, at most `max`.
pub async fn search(
    source: &dyn BookmarkSource,
    keywords: &[String],
    max: usize,
    hide_notification_count_in_title: bool,
    exclusion: &ExclusionFilter,
) -> ChocoResult<Vec<SearchItem>> {
    let root = source.tree().await?;

    Ok(flatten(&root, hide_notification_count_in_title, exclusion)
        .into_iter()
        .filter(|website| website.matches(keywords) && !exclusion.excludes(website))
        .take(max)
        .map(SearchItem::Bookmark)
        .collect())
}
