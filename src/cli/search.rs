//! `choco search`: one-shot search.

use std::fmt::Write as _;

use crate::core::display::{group_by_type, history_age_label, EmptyState};
use crate::core::search::{now_millis, Search, SearchQuery};
use crate::core::SearchItem;
use crate::preferences::PreferencesStore;

use super::Context;

pub async fn run(ctx: &Context, text: &str, json: bool) -> anyhow::Result<()> {
    let search = Search::new(&ctx.platform);
    let preferences = PreferencesStore::new(ctx.platform.storage.clone()).get().await?;
    let behavior = &preferences.display_and_behavior;

    let items = search.search(&SearchQuery::new(text)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if items.is_empty() {
        let state = if text.trim().is_empty() {
            EmptyState::NoQuery
        } else {
            EmptyState::NoResults
        };
        println!("{}", state.message());
        return Ok(());
    }

    print!("{}", render(&items, behavior.show_category_name, now_millis()));
    Ok(())
}

/// Render a numbered result list, optionally under category headings.
///
/// Numbering is global so `:open N` in the REPL addresses the same row.
pub fn render(items: &[SearchItem], show_category_name: bool, now: i64) -> String {
    let mut out = String::new();

    if !show_category_name {
        for (index, item) in items.iter().enumerate() {
            render_row(&mut out, index, item, now);
        }
        return out;
    }

    let mut index = 0;
    for (item_type, group) in group_by_type(items) {
        let _ = writeln!(out, "{}", item_type.category_name());
        for item in group {
            render_row(&mut out, index, item, now);
            index += 1;
        }
    }
    out
}

fn render_row(out: &mut String, index: usize, item: &SearchItem, now: i64) {
    let _ = write!(out, "{:>3}. {}", index, item.title());

    if let Some(caption) = item.caption() {
        let _ = write!(out, "  ({})", caption);
    }
    if let SearchItem::SearchHistory(history) = item {
        let _ = write!(out, "  [{}]", history_age_label(history.last_visited, now));
    }

    let _ = writeln!(out, "\n     {}", item.url());
}
