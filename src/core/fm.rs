//! Directory scanning and entry metadata for fxplore.
//!
//! Provides the [DirectoryEntry] record which every listing is built from,
//! and [read_entries], the lazy reader producing those records for one directory.
//!
//! Entries are read fresh on every scan and never cached.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::{self, Metadata, ReadDir};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// The special names yielded ahead of the platform enumeration.
/// `std::fs::read_dir` never returns them, listings always show them.
const SPECIAL_ENTRIES: [&str; 2] = [".", ".."];

/// Kind of a directory entry.
///
/// Symbolic links are classified by the type of their target.
/// Anything that is neither a regular file nor a directory (fifo, socket, device) is [EntryKind::Other].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// A single entry of a directory listing.
///
/// Holds the bare name, the kind, the size in bytes and the modification time in seconds
/// since the unix epoch. Only regular files carry a size, every other kind reports 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    name: OsString,
    kind: EntryKind,
    size: u64,
    modified: i64,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<OsString>, kind: EntryKind, size: u64, modified: i64) -> Self {
        let size = if kind == EntryKind::File { size } else { 0 };
        DirectoryEntry {
            name: name.into(),
            kind,
            size,
            modified,
        }
    }

    /// Builds an entry from already resolved metadata.
    /// Modification times the platform cannot report are stored as 0.
    pub fn from_metadata(name: OsString, metadata: &Metadata) -> Self {
        let kind = if metadata.is_file() {
            EntryKind::File
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        };
        let modified = metadata.modified().map(unix_seconds).unwrap_or(0);
        DirectoryEntry::new(name, kind, metadata.len(), modified)
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    #[inline]
    pub fn name_str(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> i64 {
        self.modified
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Converts a [SystemTime] into whole seconds relative to the unix epoch.
/// Times before the epoch become negative.
fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|secs| -secs)
            .unwrap_or(i64::MIN),
    }
}

/// Lazy sequence of the entries of one directory.
///
/// Yields `.` and `..` first, then every name of the platform enumeration in the order
/// the platform returns them. Each name gets a metadata lookup which follows symbolic links.
///
/// Skip policy: a name whose enumeration or metadata lookup fails (broken symlink,
/// entry removed mid-scan, permission denied) is skipped. The failure is logged at trace
/// level and never surfaced to the caller, a live filesystem produces these routinely.
///
/// The sequence is finite and not restartable. Two scans of the same directory may differ
/// if the directory was modified in between.
#[derive(Debug)]
pub struct Entries {
    dir: PathBuf,
    special: std::array::IntoIter<&'static str, 2>,
    read_dir: ReadDir,
}

impl Iterator for Entries {
    type Item = DirectoryEntry;

    fn next(&mut self) -> Option<DirectoryEntry> {
        for name in self.special.by_ref() {
            let path = self.dir.join(name);
            if let Some(entry) = lookup(OsString::from(name), &path) {
                return Some(entry);
            }
        }

        for item in self.read_dir.by_ref() {
            let dir_entry = match item {
                Ok(e) => e,
                Err(e) => {
                    tracing::trace!(dir = %self.dir.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if let Some(entry) = lookup(dir_entry.file_name(), &dir_entry.path()) {
                return Some(entry);
            }
        }
        None
    }
}

/// Metadata lookup for one name, following symbolic links.
/// Returns None for unreadable entries.
fn lookup(name: OsString, path: &Path) -> Option<DirectoryEntry> {
    match fs::metadata(path) {
        Ok(metadata) => Some(DirectoryEntry::from_metadata(name, &metadata)),
        Err(e) => {
            tracing::trace!(path = %path.display(), error = %e, "skipping unreadable entry");
            None
        }
    }
}

/// Opens the provided directory for reading.
///
/// Opening is the only step which can fail, every later per-entry failure follows the
/// skip policy of [Entries].
///
/// # Returns
/// The lazy [Entries] sequence or the std::io::Error from opening the directory.
pub fn read_entries(path: &Path) -> io::Result<Entries> {
    let read_dir = fs::read_dir(path)?;
    Ok(Entries {
        dir: path.to_path_buf(),
        special: SPECIAL_ENTRIES.into_iter(),
        read_dir,
    })
}
