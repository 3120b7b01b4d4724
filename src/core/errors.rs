//! Error types of the listing core.
//!
//! Per-entry metadata failures never show up here, they are skipped by the reader.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListingError {
    /// The directory could not be opened: missing, not a directory or permission denied.
    /// Reported to the user, the listing is aborted for this call.
    #[error("cannot open directory {}: {source}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing the table to the output stream failed.
    #[error("failed to write listing: {0}")]
    Output(#[from] io::Error),
}
