//! Column sizing and display formatting for fxplore listings.
//!
//! [ColumnLayout] holds the widths every row of a listing is aligned to.
//! The free functions format the individual cells: truncated names, kind labels,
//! sizes and modification times.
//!
//! All widths are terminal display columns, measured with unicode-width.

use crate::core::fm::{DirectoryEntry, EntryKind};

use chrono::{DateTime, Local};
use humansize::{DECIMAL, format_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use std::borrow::Cow;

/// Fixed width of the name column.
pub const NAME_COLUMN_WIDTH: usize = 40;
/// The size column never gets narrower than this.
pub const MIN_SIZE_COLUMN_WIDTH: usize = 10;
/// Columns added to the digit count of the largest file size.
const SIZE_COLUMN_PADDING: usize = 6;
/// Allowance for the type and date columns plus the borders.
pub const FIXED_COLUMNS_WIDTH: usize = 40;
/// Width of the kind label column.
pub const KIND_COLUMN_WIDTH: usize = 12;
/// Width of a formatted timestamp.
pub const TIME_COLUMN_WIDTH: usize = 19;

/// Appended to names which had to be cut.
pub const TRUNCATION_MARKER: &str = "...";

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column widths of one listing.
///
/// Derived per listing from the largest regular file in the directory, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    name_width: usize,
    size_width: usize,
    table_width: usize,
}

impl ColumnLayout {
    pub fn new(max_file_size: u64) -> Self {
        let size_width = size_column_width(max_file_size);
        ColumnLayout {
            name_width: NAME_COLUMN_WIDTH,
            size_width,
            table_width: NAME_COLUMN_WIDTH + size_width + FIXED_COLUMNS_WIDTH,
        }
    }

    /// Sizes the columns for the given entries.
    /// Only regular files take part, directories and other entries are ignored.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a DirectoryEntry>,
    {
        let max_file_size = entries
            .into_iter()
            .filter(|e| e.is_file())
            .map(DirectoryEntry::size)
            .max()
            .unwrap_or(0);
        Self::new(max_file_size)
    }

    // Accessors

    #[inline]
    pub fn name_width(&self) -> usize {
        self.name_width
    }

    #[inline]
    pub fn size_width(&self) -> usize {
        self.size_width
    }

    #[inline]
    pub fn table_width(&self) -> usize {
        self.table_width
    }
}

/// Number of decimal digits of `n`. Zero has one digit.
pub fn digit_count(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// Width of the size column for the given largest file size.
/// Never less than [MIN_SIZE_COLUMN_WIDTH].
pub fn size_column_width(max_file_size: u64) -> usize {
    (digit_count(max_file_size) + SIZE_COLUMN_PADDING).max(MIN_SIZE_COLUMN_WIDTH)
}

/// Replaces control characters (newlines, tabs, escapes) with `?`
/// so that a name can never break a row.
pub fn sanitize_control(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { '?' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Shortens a name to at most `max_width` display columns.
///
/// Names that fit are returned unchanged (control characters replaced).
/// Longer names keep the longest prefix fitting `max_width - 3` columns followed by
/// [TRUNCATION_MARKER]. For `max_width` of 3 or less the prefix is empty and the marker
/// itself is cut to fit.
pub fn truncate_name(name: &str, max_width: usize) -> String {
    let clean = sanitize_control(name);
    if clean.width() <= max_width {
        return clean.into_owned();
    }

    let keep = max_width.saturating_sub(TRUNCATION_MARKER.len());
    let mut out = String::with_capacity(max_width);
    let mut current_w = 0;

    for c in clean.chars() {
        let w = c.width().unwrap_or(0);
        if current_w + w > keep {
            break;
        }
        out.push(c);
        current_w += w;
    }

    out.push_str(&TRUNCATION_MARKER[..max_width.min(TRUNCATION_MARKER.len())]);
    out
}

/// Left-justifies `text` by padding it with spaces up to `width` display columns.
/// Text already wider than `width` is returned unchanged.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current_w = text.width();
    let mut out = String::with_capacity(text.len() + width.saturating_sub(current_w));
    out.push_str(text);
    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }
    out
}

/// Formats the entry kind into its one word label.
pub fn format_kind(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "File",
        EntryKind::Directory => "Directory",
        EntryKind::Other => "Other",
    }
}

/// Formats the size cell of an entry.
/// # Returns
/// The decimal byte count for regular files, "-" for directories and other entries.
pub fn format_entry_size(entry: &DirectoryEntry) -> String {
    if entry.is_file() {
        entry.size().to_string()
    } else {
        "-".to_string()
    }
}

/// Formats a byte total into a human readable string, e.g. "2.05 kB".
pub fn format_total_size(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Formats a modification time given in unix seconds as `YYYY-MM-DD HH:MM:SS` in local time.
/// # Returns
/// The formatted time or "-" if the timestamp is out of range.
pub fn format_file_time(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|utc| {
            let dt: DateTime<Local> = utc.with_timezone(&Local);
            dt.format(TIME_FORMAT).to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::distr::{Alphanumeric, SampleString};
    use rand::{Rng, rng};

    #[test]
    fn digit_counts() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(2048), 4);
        assert_eq!(digit_count(u64::MAX), 20);
    }

    #[test]
    fn size_column_width_floor_and_growth() {
        assert_eq!(size_column_width(0), 10);
        assert_eq!(size_column_width(9999), 10);
        assert_eq!(size_column_width(99_999), 11);
        assert_eq!(size_column_width(u64::MAX), 26);
    }

    #[test]
    fn size_column_width_is_monotonic() {
        let mut rng = rng();
        let mut sizes: Vec<u64> = (0..500)
            .map(|_| {
                let digits = rng.random_range(0..20u32);
                rng.random_range(0..=10u64.pow(digits))
            })
            .collect();
        sizes.sort_unstable();

        let mut last = 0;
        for size in sizes {
            let width = size_column_width(size);
            assert!(width >= MIN_SIZE_COLUMN_WIDTH);
            assert!(width >= last, "width shrank at size {size}");
            last = width;
        }
    }

    #[test]
    fn column_layout_ignores_directories() {
        let entries = [
            DirectoryEntry::new("small", EntryKind::File, 2048, 0),
            DirectoryEntry::new("huge_dir", EntryKind::Directory, 0, 0),
            DirectoryEntry::new("big", EntryKind::File, 123_456_789, 0),
        ];
        let layout = ColumnLayout::from_entries(&entries);
        assert_eq!(layout.name_width(), 40);
        assert_eq!(layout.size_width(), 15);
        assert_eq!(layout.table_width(), 40 + 15 + 40);

        let none: [DirectoryEntry; 0] = [];
        let empty = ColumnLayout::from_entries(&none);
        assert_eq!(empty.size_width(), 10);
        assert_eq!(empty.table_width(), 90);
    }

    #[test]
    fn truncate_short_names_pass_through() {
        assert_eq!(truncate_name("notes.txt", 40), "notes.txt");
        assert_eq!(truncate_name("", 40), "");
        let exact = "a".repeat(40);
        assert_eq!(truncate_name(&exact, 40), exact);
    }

    #[test]
    fn truncate_long_names_keep_prefix() {
        let mut rng = rng();
        for _ in 0..200 {
            let len = rng.random_range(41..200);
            let name = Alphanumeric.sample_string(&mut rng, len);
            let out = truncate_name(&name, 40);

            assert_eq!(out.chars().count(), 40);
            assert!(out.ends_with(TRUNCATION_MARKER));
            assert_eq!(&out[..37], &name[..37]);
        }
    }

    #[test]
    fn truncate_tiny_widths_do_not_underflow() {
        assert_eq!(truncate_name("abcdef", 3), "...");
        assert_eq!(truncate_name("abcdef", 2), "..");
        assert_eq!(truncate_name("abcdef", 0), "");
        assert_eq!(truncate_name("abcdef", 4), "a...");
        assert_eq!(truncate_name("ab", 2), "ab");
    }

    #[test]
    fn truncate_measures_display_width() {
        let name = "🦀".repeat(30);
        let out = truncate_name(&name, 40);
        assert!(out.width() <= 40);
        assert!(out.ends_with(TRUNCATION_MARKER));
    }

    #[test]
    fn control_characters_are_replaced() {
        assert_eq!(truncate_name("bad\nname\t", 40), "bad?name?");
        assert!(matches!(sanitize_control("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn pad_to_exact_width() {
        assert_eq!(pad_to_width("ab", 5), "ab   ");
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
        assert_eq!(pad_to_width("🦀", 4).width(), 4);
    }

    #[test]
    fn entry_cells() {
        let file = DirectoryEntry::new("a", EntryKind::File, 2048, 0);
        let dir = DirectoryEntry::new("b", EntryKind::Directory, 0, 0);
        assert_eq!(format_entry_size(&file), "2048");
        assert_eq!(format_entry_size(&dir), "-");
        assert_eq!(format_kind(EntryKind::File), "File");
        assert_eq!(format_kind(EntryKind::Directory), "Directory");
        assert_eq!(format_total_size(0), "0 B");
    }

    #[test]
    fn file_time_shape() {
        let formatted = format_file_time(1_700_000_000);
        assert_eq!(formatted.len(), TIME_COLUMN_WIDTH);
        assert_eq!(&formatted[4..5], "-");
        assert_eq!(&formatted[10..11], " ");
        assert_eq!(format_file_time(i64::MAX), "-");
    }
}
