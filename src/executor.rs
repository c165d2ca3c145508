//! Result execution module - determines what action to take for each SearchItem

use crate::core::item::SearchItem;
use crate::error::ChocoResult;
use crate::platform::TabControl;
use crate::preferences::DisplayAndBehavior;
use crate::services::SearchEngine;

/// The action to perform when a result is opened
#[derive(Debug, Clone, PartialEq)]
pub enum OpenAction {
    /// Switch to an already open tab
    ActivateTab { tab_id: i64 },

    /// Bind the query box to a search engine and wait for a keyword
    EnterEngineMode(SearchEngine),

    /// Load a URL, in a new tab or the current one
    OpenUrl {
        url: String,
        new_tab: bool,
        active: bool,
    },
}

/// Get the action to perform when a search item is opened.
///
/// `keep_popup_open` is set for a modified click: the page opens in a
/// background tab and the popup stays up.
pub fn action_for(
    item: &SearchItem,
    behavior: &DisplayAndBehavior,
    keep_popup_open: bool,
) -> OpenAction {
    match item {
        SearchItem::SearchEngine(engine) => OpenAction::EnterEngineMode(engine.clone()),
        SearchItem::OpenTab(tab) => OpenAction::ActivateTab { tab_id: tab.id },
        SearchItem::SearchEngineKeyword { .. }
        | SearchItem::Favorite(_)
        | SearchItem::ChromePage(_)
        | SearchItem::Bookmark(_)
        | SearchItem::SearchHistory(_) => OpenAction::OpenUrl {
            url: item.url().into_owned(),
            new_tab: behavior.open_in_new_tab || keep_popup_open,
            active: !keep_popup_open,
        },
    }
}

/// Carry out `action` against the browser.
///
/// Engine mode is session state, so `EnterEngineMode` does nothing here.
pub async fn execute(action: &OpenAction, control: &dyn TabControl) -> ChocoResult<()> {
    match action {
        OpenAction::ActivateTab { tab_id } => control.activate(*tab_id).await,
        OpenAction::EnterEngineMode(_) => Ok(()),
        OpenAction::OpenUrl { url, new_tab: true, active } => control.create(url, *active).await,
        OpenAction::OpenUrl { url, new_tab: false, .. } => match control.active_tab().await? {
            Some(tab_id) => control.update(tab_id, url).await,
            None => {
                tracing::warn!(url = %url, "no active tab to navigate");
                Ok(())
            }
        },
    }
}
