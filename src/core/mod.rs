//! Core engine module - platform-agnostic search logic.
//!
//! This module contains everything between the popup and the per-source
//! adapters in [`crate::services`]:
//! - The [`SearchItem`] result model
//! - The aggregating [`Search`] with its priority order and URL dedup
//! - Query modes and the popup [`SearchSession`]
//! - Display helpers and keystroke debouncing

pub mod debounce;
pub mod display;
pub mod item;
pub mod mode;
pub mod search;
pub mod session;

pub use debounce::Debouncer;
pub use display::EmptyState;
pub use item::{SearchItem, SearchItemType};
pub use mode::QueryMode;
pub use search::{Search, SearchQuery};
pub use session::{SearchSession, Ticket};
