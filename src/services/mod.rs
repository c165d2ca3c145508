//! Search sources.
//!
//! Each adapter filters its own candidates against the query keywords, caps
//! the matches at the caller's limit and wraps them in [`SearchItem`]s:
//!
//! | Source | Candidates | Order |
//! |---|---|---|
//! | [`search_engine`] | preferences | list order, exact command match |
//! | [`favorites`] | key-value storage | insertion order |
//! | [`chrome_page`] | bundled catalog | catalog order |
//! | [`tab`] | open tabs | browser order |
//! | [`bookmark`] | bookmark tree | pre-order walk |
//! | [`history`] | browsing history | most recent first |
//!
//! [`SearchItem`]: crate::core::item::SearchItem

pub mod bookmark;
pub mod chrome_page;
pub mod exclusion;
pub mod favorites;
pub mod history;
pub mod search_engine;
pub mod tab;

pub use chrome_page::ChromePage;
pub use exclusion::ExclusionFilter;
pub use favorites::Favorites;
pub use history::SearchHistory;
pub use search_engine::SearchEngine;
pub use tab::Tab;
