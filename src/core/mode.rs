//! Query mode: plain search, or bound to a search engine.
//!
//! ```text
//!            select_engine(engine)
//!   Normal ------------------------> BoundToEngine(engine)
//!          <------------------------
//!                  cancel()
//! ```
//!
//! No other transitions exist: selecting an engine while already bound, or
//! cancelling while in `Normal`, leaves the mode unchanged.

use crate::services::SearchEngine;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QueryMode {
    #[default]
    Normal,
    BoundToEngine(SearchEngine),
}

impl QueryMode {
    /// Enter engine mode. Returns whether the mode changed.
    pub fn select_engine(&mut self, engine: SearchEngine) -> bool {
        match self {
            QueryMode::Normal => {
                *self = QueryMode::BoundToEngine(engine);
                true
            }
            QueryMode::BoundToEngine(_) => false,
        }
    }

    /// Leave engine mode. Returns whether the mode changed.
    pub fn cancel(&mut self) -> bool {
        match self {
            QueryMode::Normal => false,
            QueryMode::BoundToEngine(_) => {
                *self = QueryMode::Normal;
                true
            }
        }
    }

    pub fn engine(&self) -> Option<&SearchEngine> {
        match self {
            QueryMode::Normal => None,
            QueryMode::BoundToEngine(engine) => Some(engine),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.engine().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(command: &str) -> SearchEngine {
        SearchEngine::new(command, command, "https://e.example/?q={keyword}")
    }

    #[test]
    fn test_transitions() {
        let mut mode = QueryMode::default();
        assert!(!mode.is_bound());

        assert!(mode.select_engine(engine("a")));
        assert_eq!(mode.engine().map(|e| e.command.as_str()), Some("a"));

        // Already bound: ignored
        assert!(!mode.select_engine(engine("b")));
        assert_eq!(mode.engine().map(|e| e.command.as_str()), Some("a"));

        assert!(mode.cancel());
        assert_eq!(mode, QueryMode::Normal);
        assert!(!mode.cancel());
    }
}
