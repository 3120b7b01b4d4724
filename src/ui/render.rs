//! Table rendering for fxplore.
//!
//! Writes the bordered frame (header, column heading, footer) and the entry rows of a
//! listing into any [Write] target. Every frame line is exactly `table_width` columns wide.
//!
//! Directories are drawn bold blue when colour is enabled, plain text otherwise.

use crate::core::filter::FilterCriteria;
use crate::core::fm::DirectoryEntry;
use crate::core::formatter::{
    ColumnLayout, KIND_COLUMN_WIDTH, TIME_COLUMN_WIDTH, format_entry_size, format_file_time,
    format_kind, format_total_size, pad_to_width, truncate_name,
};
use crate::core::listing::ListingSummary;
use crate::utils::shorten_home_path;

use crossterm::style::{Stylize, style};
use unicode_width::UnicodeWidthStr;

use std::io::{self, Write};
use std::path::Path;

const TITLE: &str = "fxplore - Terminal File Explorer";
const PATH_LABEL: &str = "Path: ";

/// Command keywords shown in the footer, one framed line each.
const KEY_HINTS: &[&str] = &[
    "[Q]uit | [U]p | [Enter] Open/Execute | [cd <path>] Change Dir",
    "[filter size|type|date <value>] | [search <term>] | [clear filter] | [?] Help",
];

/// Presentation switches of a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    color: bool,
}

impl RenderOptions {
    pub fn new(color: bool) -> Self {
        RenderOptions { color }
    }

    pub fn plain() -> Self {
        Self::new(false)
    }

    #[inline]
    pub fn color(&self) -> bool {
        self.color
    }
}

/// Draws a horizontal rule of `width` columns: `corner`, `fill` repeated, `corner`.
pub fn draw_rule<W: Write>(out: &mut W, width: usize, corner: char, fill: char) -> io::Result<()> {
    let inner: String = std::iter::repeat_n(fill, width.saturating_sub(2)).collect();
    writeln!(out, "{corner}{inner}{corner}")
}

/// Writes `| text |` padded or truncated to exactly `width` columns.
fn framed_line<W: Write>(out: &mut W, width: usize, text: &str) -> io::Result<()> {
    let inner = width.saturating_sub(4);
    let text = pad_to_width(&truncate_name(text, inner), inner);
    writeln!(out, "| {text} |")
}

/// Writes the title block and the column heading.
pub fn render_header<W: Write>(out: &mut W, layout: &ColumnLayout, path: &Path) -> io::Result<()> {
    let width = layout.table_width();
    draw_rule(out, width, '+', '-')?;
    framed_line(out, width, TITLE)?;
    framed_line(out, width, &format!("{PATH_LABEL}{}", shorten_home_path(path)))?;
    draw_rule(out, width, '+', '-')?;

    writeln!(
        out,
        "{} {} {:>size_w$} {}",
        pad_to_width("Name", layout.name_width()),
        pad_to_width("Type", KIND_COLUMN_WIDTH),
        "Size",
        pad_to_width("Last Modified", TIME_COLUMN_WIDTH),
        size_w = layout.size_width(),
    )?;
    draw_rule(out, width, '|', '-')
}

/// Writes one entry row: name, kind label, right-aligned size, modification time.
pub fn render_row<W: Write>(
    out: &mut W,
    layout: &ColumnLayout,
    entry: &DirectoryEntry,
    options: &RenderOptions,
) -> io::Result<()> {
    let name = truncate_name(&entry.name_str(), layout.name_width());
    let padding = " ".repeat(layout.name_width().saturating_sub(name.width()));

    if options.color() && entry.is_dir() {
        write!(out, "{}", style(&name).blue().bold())?;
    } else {
        out.write_all(name.as_bytes())?;
    }

    writeln!(
        out,
        "{padding} {:<kind_w$} {:>size_w$} {}",
        format_kind(entry.kind()),
        format_entry_size(entry),
        format_file_time(entry.modified()),
        kind_w = KIND_COLUMN_WIDTH,
        size_w = layout.size_width(),
    )
}

/// Writes the closing rule of the rows, the summary, the active filter and the key hints.
pub fn render_footer<W: Write>(
    out: &mut W,
    layout: &ColumnLayout,
    summary: &ListingSummary,
    criteria: &FilterCriteria,
) -> io::Result<()> {
    let width = layout.table_width();
    draw_rule(out, width, '|', '-')?;
    draw_rule(out, width, '+', '-')?;
    framed_line(
        out,
        width,
        &format!(
            "{} of {} entries shown, {} in files",
            summary.shown,
            summary.total,
            format_total_size(summary.shown_bytes)
        ),
    )?;
    framed_line(out, width, &format!("Filter: {criteria}"))?;
    for hint in KEY_HINTS {
        framed_line(out, width, hint)?;
    }
    draw_rule(out, width, '+', '-')
}
