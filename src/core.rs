//! Core listing engine of fxplore.
//!
//! This module contains the non-interactive pieces:
//! - [fm]: directory scanning and entry metadata (see [read_entries], [DirectoryEntry]).
//! - [filter]: the composable [FilterCriteria] predicate.
//! - [formatter]: column sizing, name truncation, size and time formatting.
//! - [listing]: the orchestrator rendering one filtered directory ([render_listing]).
//! - [errors]: the [ListingError] type.
//! - [terminal]: screen clearing and line input for the interactive session.

pub mod errors;
pub mod filter;
pub mod fm;
pub mod formatter;
pub mod listing;
pub mod terminal;

pub use errors::ListingError;
pub use filter::{FilterCriteria, KindFilter};
pub use fm::{DirectoryEntry, Entries, EntryKind, read_entries};
pub use formatter::{
    ColumnLayout, format_entry_size, format_file_time, format_kind, size_column_width,
    truncate_name,
};
pub use listing::{Listing, ListingSummary, render_listing};
