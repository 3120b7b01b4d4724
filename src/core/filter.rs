//! Filter criteria for fxplore listings.
//!
//! [FilterCriteria] is a composable set of inclusion rules: size range, kind,
//! modification-time range and a case-insensitive name search.
//! Every present bound is inclusive and an entry has to satisfy all of them.
//!
//! The criteria value is owned by the session and only borrowed by a listing.

use crate::core::fm::{DirectoryEntry, EntryKind};
use crate::core::formatter::format_file_time;

use std::fmt;

/// Restricts a listing to one kind of entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    File,
    Directory,
}

impl KindFilter {
    /// Parses the one letter form used by the `filter type` command: `f` or `d`, in either case.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'f' => Some(KindFilter::File),
            'd' => Some(KindFilter::Directory),
            _ => None,
        }
    }

    #[inline]
    fn admits(self, kind: EntryKind) -> bool {
        matches!(
            (self, kind),
            (KindFilter::File, EntryKind::File) | (KindFilter::Directory, EntryKind::Directory)
        )
    }
}

/// The set of inclusion rules applied to every entry before it is rendered.
///
/// `None` means unbounded for every field. The default value is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    min_size: Option<u64>,
    max_size: Option<u64>,
    kind: Option<KindFilter>,
    min_modified: Option<i64>,
    max_modified: Option<i64>,
    search: Option<String>,
    // Lowercased copy of `search`, kept in sync by `set_search`.
    search_lower: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    // Accessors

    #[inline]
    pub fn min_size(&self) -> Option<u64> {
        self.min_size
    }

    #[inline]
    pub fn max_size(&self) -> Option<u64> {
        self.max_size
    }

    #[inline]
    pub fn kind(&self) -> Option<KindFilter> {
        self.kind
    }

    #[inline]
    pub fn min_modified(&self) -> Option<i64> {
        self.min_modified
    }

    #[inline]
    pub fn max_modified(&self) -> Option<i64> {
        self.max_modified
    }

    #[inline]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// True when no criterion is active.
    pub fn is_identity(&self) -> bool {
        self.min_size.is_none()
            && self.max_size.is_none()
            && self.kind.is_none()
            && self.min_modified.is_none()
            && self.max_modified.is_none()
            && self.search.is_none()
    }

    // Mutators

    pub fn set_size_range(&mut self, min: Option<u64>, max: Option<u64>) {
        self.min_size = min;
        self.max_size = max;
    }

    pub fn set_kind(&mut self, kind: Option<KindFilter>) {
        self.kind = kind;
    }

    pub fn set_modified_range(&mut self, min: Option<i64>, max: Option<i64>) {
        self.min_modified = min;
        self.max_modified = max;
    }

    /// Sets the name search. An empty term removes the search filter.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term.is_empty() {
            self.search = None;
            self.search_lower = None;
        } else {
            self.search_lower = Some(term.to_lowercase());
            self.search = Some(term);
        }
    }

    /// Resets every criterion. Idempotent.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Evaluates the criteria against one entry.
    ///
    /// Checks run in the order kind, min size, max size, min modified, max modified, search
    /// and stop at the first failing one.
    pub fn matches(&self, entry: &DirectoryEntry) -> bool {
        if let Some(kind) = self.kind
            && !kind.admits(entry.kind())
        {
            return false;
        }
        if let Some(min) = self.min_size
            && entry.size() < min
        {
            return false;
        }
        if let Some(max) = self.max_size
            && entry.size() > max
        {
            return false;
        }
        if let Some(min) = self.min_modified
            && entry.modified() < min
        {
            return false;
        }
        if let Some(max) = self.max_modified
            && entry.modified() > max
        {
            return false;
        }
        if let Some(needle) = &self.search_lower
            && !entry.name_str().to_lowercase().contains(needle.as_str())
        {
            return false;
        }
        true
    }
}

/// Short human readable summary of the active criteria, "none" for the identity filter.
impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            return f.write_str("none");
        }

        let mut parts: Vec<String> = Vec::with_capacity(4);
        if let Some(kind) = self.kind {
            let label = match kind {
                KindFilter::File => "files",
                KindFilter::Directory => "directories",
            };
            parts.push(format!("type={label}"));
        }
        match (self.min_size, self.max_size) {
            (Some(min), Some(max)) => parts.push(format!("size={min}-{max}")),
            (Some(min), None) => parts.push(format!("size>={min}")),
            (None, Some(max)) => parts.push(format!("size<={max}")),
            (None, None) => {}
        }
        match (self.min_modified, self.max_modified) {
            (Some(min), Some(max)) => parts.push(format!(
                "modified={}..{}",
                format_file_time(min),
                format_file_time(max)
            )),
            (Some(min), None) => parts.push(format!("modified>={}", format_file_time(min))),
            (None, Some(max)) => parts.push(format!("modified<={}", format_file_time(max))),
            (None, None) => {}
        }
        if let Some(term) = &self.search {
            parts.push(format!("search=\"{term}\""));
        }
        f.write_str(&parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64, modified: i64) -> DirectoryEntry {
        DirectoryEntry::new(name, EntryKind::File, size, modified)
    }

    fn dir(name: &str, modified: i64) -> DirectoryEntry {
        DirectoryEntry::new(name, EntryKind::Directory, 0, modified)
    }

    #[test]
    fn identity_filter_admits_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_identity());
        for entry in [
            file("a", 0, 0),
            file("b", u64::MAX, i64::MAX),
            dir("c", -50),
            DirectoryEntry::new("fifo", EntryKind::Other, 0, 7),
        ] {
            assert!(criteria.matches(&entry), "{:?} should match", entry);
        }
    }

    #[test]
    fn size_bounds_are_inclusive() {
        let mut criteria = FilterCriteria::new();
        criteria.set_size_range(Some(100), Some(200));

        assert!(!criteria.matches(&file("low", 99, 0)));
        assert!(criteria.matches(&file("min", 100, 0)));
        assert!(criteria.matches(&file("max", 200, 0)));
        assert!(!criteria.matches(&file("high", 201, 0)));
    }

    #[test]
    fn directories_count_as_size_zero() {
        let mut criteria = FilterCriteria::new();
        criteria.set_size_range(Some(1), None);
        assert!(!criteria.matches(&dir("sub", 0)));

        criteria.set_size_range(Some(0), Some(10));
        assert!(criteria.matches(&dir("sub", 0)));
    }

    #[test]
    fn kind_filter_excludes_other_entries() {
        let other = DirectoryEntry::new("socket", EntryKind::Other, 0, 0);
        let mut criteria = FilterCriteria::new();

        criteria.set_kind(Some(KindFilter::File));
        assert!(criteria.matches(&file("a.txt", 1, 0)));
        assert!(!criteria.matches(&dir("sub", 0)));
        assert!(!criteria.matches(&other));

        criteria.set_kind(Some(KindFilter::Directory));
        assert!(!criteria.matches(&file("a.txt", 1, 0)));
        assert!(criteria.matches(&dir("sub", 0)));
        assert!(!criteria.matches(&other));
    }

    #[test]
    fn modified_bounds_are_inclusive() {
        let mut criteria = FilterCriteria::new();
        criteria.set_modified_range(Some(1_000), Some(2_000));

        assert!(!criteria.matches(&file("old", 1, 999)));
        assert!(criteria.matches(&file("first", 1, 1_000)));
        assert!(criteria.matches(&file("last", 1, 2_000)));
        assert!(!criteria.matches(&file("new", 1, 2_001)));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut criteria = FilterCriteria::new();
        criteria.set_search("report");

        assert!(criteria.matches(&file("Report.TXT", 1, 0)));
        assert!(criteria.matches(&dir("REPORTS", 0)));
        assert!(!criteria.matches(&file("summary.txt", 1, 0)));
    }

    #[test]
    fn empty_search_means_no_search() {
        let mut criteria = FilterCriteria::new();
        criteria.set_search("abc");
        criteria.set_search("");
        assert_eq!(criteria.search(), None);
        assert!(criteria.is_identity());
        assert!(criteria.matches(&file("anything", 1, 0)));
    }

    #[test]
    fn all_criteria_are_combined() {
        let mut criteria = FilterCriteria::new();
        criteria.set_kind(Some(KindFilter::File));
        criteria.set_size_range(Some(1024), None);
        criteria.set_search("log");

        assert!(criteria.matches(&file("app.log", 4096, 0)));
        assert!(!criteria.matches(&file("app.log", 512, 0)));
        assert!(!criteria.matches(&file("app.txt", 4096, 0)));
        assert!(!criteria.matches(&dir("logs", 0)));
    }

    #[test]
    fn clear_is_idempotent() {
        let mut criteria = FilterCriteria::new();
        criteria.set_kind(Some(KindFilter::Directory));
        criteria.set_size_range(Some(5), Some(6));
        criteria.set_modified_range(Some(1), None);
        criteria.set_search("x");

        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn display_summary() {
        let mut criteria = FilterCriteria::new();
        assert_eq!(criteria.to_string(), "none");

        criteria.set_kind(Some(KindFilter::File));
        criteria.set_size_range(Some(0), Some(1024));
        criteria.set_search("notes");
        assert_eq!(
            criteria.to_string(),
            "type=files size=0-1024 search=\"notes\""
        );
    }
}
