//! Choco - quick search across open tabs, bookmarks, history and favorites.
//!
//! Choco powers a browser "new tab / quick search" popup: a single search box
//! whose results come from open tabs, bookmarks, browsing history, favorites,
//! custom search engines and built-in browser pages.
//!
//! # Architecture
//!
//! The library is organized into these main modules:
//!
//! - [`text`] - Script-insensitive text normalization
//! - [`website`] - Website matching, title cleanup and favicon URLs
//! - [`services`] - Per-source search adapters (tabs, bookmarks, history, ...)
//! - [`core`] - Result model, the aggregating [`Search`], query modes and sessions
//! - [`preferences`] - User preferences and search engine management
//! - [`platform`] - Traits over the browser platform plus an in-memory backend
//! - [`storage`] - JSON-file key-value storage
//! - [`executor`] - Opening a selected result
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use choco::platform::{MemoryBrowser, MemoryStorage};
//! use choco::{Platform, Search, SearchQuery};
//!
//! let browser = Arc::new(MemoryBrowser::default());
//! let platform = Platform::from_browser(browser, Arc::new(MemoryStorage::default()));
//! let search = Search::new(&platform);
//! let items = search.search(&SearchQuery::new("github")).await?;
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod core;
pub mod executor;
pub mod platform;
pub mod preferences;
pub mod services;
pub mod storage;
pub mod text;
pub mod website;

// Internal modules
mod error;

// Re-export commonly used types for convenience
pub use crate::core::item::{SearchItem, SearchItemType};
pub use crate::core::mode::QueryMode;
pub use crate::core::search::{Search, SearchQuery};
pub use crate::core::session::SearchSession;
pub use error::{ChocoError, ChocoResult};
pub use platform::Platform;
pub use preferences::Preferences;
pub use website::Website;
