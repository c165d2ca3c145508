//! A popup search session.
//!
//! Each query is dispatched with a strictly increasing sequence number. A
//! response is applied only if its number is higher than the last applied
//! one, so a slow query that resolves after a newer one is discarded instead
//! of overwriting fresher results.

use super::display::EmptyState;
use super::item::SearchItem;
use super::mode::QueryMode;
use super::search::{Search, SearchQuery};
use crate::error::ChocoResult;
use crate::executor::{self, OpenAction};
use crate::platform::TabControl;
use crate::services::{search_engine, SearchEngine};

/// A dispatched query, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub seq: u64,
    pub text: String,
    mode: QueryMode,
}

impl Ticket {
    /// Compute the results for this ticket.
    ///
    /// In engine mode this yields the single keyword item (or nothing for
    /// blank text); otherwise it runs the full search.
    pub async fn run(&self, search: &Search) -> ChocoResult<Vec<SearchItem>> {
        match &self.mode {
            QueryMode::Normal => search.search(&SearchQuery::new(self.text.clone())).await,
            QueryMode::BoundToEngine(engine) => Ok(search_engine::keyword_items(engine, &self.text)),
        }
    }
}

/// Query text, mode and the currently displayed results of one popup.
pub struct SearchSession {
    search: Search,
    mode: QueryMode,
    text: String,
    last_dispatched: u64,
    last_applied: u64,
    results: Vec<SearchItem>,
}

impl SearchSession {
    pub fn new(search: Search) -> Self {
        Self {
            search,
            mode: QueryMode::Normal,
            text: String::new(),
            last_dispatched: 0,
            last_applied: 0,
            results: Vec::new(),
        }
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    pub fn mode(&self) -> &QueryMode {
        &self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> &[SearchItem] {
        &self.results
    }

    /// Record new query text and hand out a ticket for it.
    pub fn dispatch(&mut self, text: impl Into<String>) -> Ticket {
        self.text = text.into();
        self.last_dispatched += 1;

        Ticket {
            seq: self.last_dispatched,
            text: self.text.clone(),
            mode: self.mode.clone(),
        }
    }

    /// Apply results for `seq`. Returns false when they are stale.
    pub fn apply(&mut self, seq: u64, results: Vec<SearchItem>) -> bool {
        if seq <= self.last_applied {
            tracing::debug!(seq, last_applied = self.last_applied, "discarding stale results");
            return false;
        }

        self.last_applied = seq;
        self.results = results;
        true
    }

    /// Dispatch, run and apply in one step.
    pub async fn update(&mut self, text: impl Into<String>) -> ChocoResult<bool> {
        let ticket = self.dispatch(text);
        let results = ticket.run(&self.search).await?;
        Ok(self.apply(ticket.seq, results))
    }

    /// Bind the query box to `engine` and clear the text.
    pub async fn select_engine(&mut self, engine: SearchEngine) -> ChocoResult<bool> {
        if !self.mode.select_engine(engine) {
            return Ok(false);
        }
        self.update(String::new()).await?;
        Ok(true)
    }

    /// Leave engine mode, clear the text and show the idle results again.
    pub async fn cancel(&mut self) -> ChocoResult<bool> {
        if !self.mode.cancel() {
            return Ok(false);
        }
        self.update(String::new()).await?;
        Ok(true)
    }

    /// Open the result at `index`.
    ///
    /// Search engine results switch the session into engine mode; everything
    /// else is handed to `control`. Returns `None` for an index out of range.
    pub async fn open(
        &mut self,
        index: usize,
        keep_popup_open: bool,
        control: &dyn TabControl,
    ) -> ChocoResult<Option<OpenAction>> {
        let Some(item) = self.results.get(index) else {
            return Ok(None);
        };

        let preferences = self.search.preferences().get().await?;
        let action = executor::action_for(item, &preferences.display_and_behavior, keep_popup_open);

        match &action {
            OpenAction::EnterEngineMode(engine) => {
                self.select_engine(engine.clone()).await?;
            }
            OpenAction::ActivateTab { .. } | OpenAction::OpenUrl { .. } => {
                executor::execute(&action, control).await?;
            }
        }

        Ok(Some(action))
    }

    /// Why nothing is shown, if nothing is shown.
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.results.is_empty() {
            return None;
        }

        let blank = self.text.trim().is_empty();
        Some(match (&self.mode, blank) {
            (QueryMode::BoundToEngine(_), true) => EmptyState::AwaitingKeyword,
            (QueryMode::Normal, true) => EmptyState::NoQuery,
            (_, false) => EmptyState::NoResults,
        })
    }
}
