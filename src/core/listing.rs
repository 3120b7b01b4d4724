//! Listing orchestration for fxplore.
//!
//! Ties the metadata reader, the filter criteria and the layout engine together:
//! scan the directory once into memory, size the columns from everything that was read,
//! then emit the header, one row per matching entry and the footer.
//!
//! Buffering the scan replaces a second enumeration of the directory. Column widths depend
//! on the whole directory, the rows only on the entries that pass the filter.

use crate::core::errors::ListingError;
use crate::core::filter::FilterCriteria;
use crate::core::fm::{DirectoryEntry, read_entries};
use crate::core::formatter::ColumnLayout;
use crate::ui::render::{self, RenderOptions};

use std::io::Write;
use std::path::Path;

/// Counts reported after a listing was rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSummary {
    /// Entries that passed the filter and were rendered.
    pub shown: usize,
    /// Readable entries in the directory, before filtering.
    pub total: usize,
    /// Sum of the sizes of the rendered entries.
    pub shown_bytes: u64,
}

/// One scanned and filtered directory.
///
/// `rows` keeps the enumeration order of the directory.
#[derive(Debug, Clone)]
pub struct Listing {
    layout: ColumnLayout,
    rows: Vec<DirectoryEntry>,
    total: usize,
}

impl Listing {
    /// Scans `path` and applies `criteria`.
    ///
    /// The layout is computed from every readable entry, including the ones the
    /// criteria reject, so filtering never changes the column widths.
    pub fn scan(path: &Path, criteria: &FilterCriteria) -> Result<Self, ListingError> {
        let entries: Vec<DirectoryEntry> = read_entries(path)
            .map_err(|source| ListingError::DirectoryUnavailable {
                path: path.to_path_buf(),
                source,
            })?
            .collect();

        let layout = ColumnLayout::from_entries(&entries);
        let total = entries.len();
        let rows: Vec<DirectoryEntry> = entries
            .into_iter()
            .filter(|e| criteria.matches(e))
            .collect();

        tracing::debug!(
            path = %path.display(),
            total,
            shown = rows.len(),
            size_width = layout.size_width(),
            "scanned directory"
        );

        Ok(Listing {
            layout,
            rows,
            total,
        })
    }

    // Accessors

    #[inline]
    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    #[inline]
    pub fn rows(&self) -> &[DirectoryEntry] {
        &self.rows
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn summary(&self) -> ListingSummary {
        ListingSummary {
            shown: self.rows.len(),
            total: self.total,
            shown_bytes: self
                .rows
                .iter()
                .fold(0u64, |acc, e| acc.saturating_add(e.size())),
        }
    }
}

/// Renders the listing of `path` filtered by `criteria` into `out`.
///
/// Nothing is written when the directory cannot be opened, the caller gets
/// [ListingError::DirectoryUnavailable] and decides how to report it.
/// The criteria are only read.
///
/// # Returns
/// A [ListingSummary] of what was rendered.
pub fn render_listing<W: Write>(
    path: &Path,
    criteria: &FilterCriteria,
    options: &RenderOptions,
    out: &mut W,
) -> Result<ListingSummary, ListingError> {
    let listing = Listing::scan(path, criteria)?;
    let layout = listing.layout();
    let summary = listing.summary();

    render::render_header(out, layout, path)?;
    for entry in listing.rows() {
        render::render_row(out, layout, entry, options)?;
    }
    render::render_footer(out, layout, &summary, criteria)?;
    out.flush()?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::KindFilter;

    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn scan_keeps_layout_of_rejected_entries() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("big.bin"))?.set_len(123_456_789)?;
        File::create(dir.path().join("small.txt"))?.set_len(10)?;

        let mut criteria = FilterCriteria::new();
        criteria.set_search("small");
        let listing = Listing::scan(dir.path(), &criteria)?;

        assert_eq!(listing.rows().len(), 1);
        assert_eq!(listing.layout().size_width(), 15);
        assert_eq!(listing.total(), 4);
        Ok(())
    }

    #[test]
    fn summary_counts_shown_entries() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("a"))?.set_len(100)?;
        File::create(dir.path().join("b"))?.set_len(200)?;
        fs::create_dir(dir.path().join("c"))?;

        let mut criteria = FilterCriteria::new();
        criteria.set_kind(Some(KindFilter::File));
        let summary = Listing::scan(dir.path(), &criteria)?.summary();

        assert_eq!(
            summary,
            ListingSummary {
                shown: 2,
                total: 5,
                shown_bytes: 300
            }
        );
        Ok(())
    }

    #[test]
    fn missing_directory_writes_nothing() {
        let mut out = Vec::new();
        let result = render_listing(
            Path::new("/path/does/not/exist"),
            &FilterCriteria::new(),
            &RenderOptions::plain(),
            &mut out,
        );

        assert!(matches!(
            result,
            Err(ListingError::DirectoryUnavailable { .. })
        ));
        assert!(out.is_empty());
    }
}
