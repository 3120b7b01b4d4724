//! Command-line argument parsing for fxplore.
//!
//! fxplore has no configuration file. Everything is set from the command line
//! (initial directory, initial filters, colour and screen handling) plus the
//! `NO_COLOR` and `FX_LOG` environment variables.
//!
//! When invoked with no args (fx), the interactive session starts in the current directory.

use crate::app::command::{self, CommandError};
use crate::core::filter::FilterCriteria;
use crate::ui::RenderOptions;

use clap::{Parser, ValueEnum};

use std::io::{self, IsTerminal};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fx", version)]
#[command(about = "Terminal file explorer with size, type, date and name filters", long_about = None)]
pub struct Args {
    /// Directory to open (default: current directory)
    pub path: Option<PathBuf>,

    /// Print the listing once and exit instead of starting the interactive session
    #[arg(long)]
    pub list: bool,

    /// When to color directory names
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Keep previous output instead of clearing the screen before each listing
    #[arg(long)]
    pub no_clear: bool,

    /// Initial size filter, e.g. 10K-1M or 1G
    #[arg(long, value_name = "RANGE")]
    pub size: Option<String>,

    /// Initial type filter: f (files) or d (directories)
    #[arg(long = "type", value_name = "f|d")]
    pub kind: Option<String>,

    /// Initial modification date filter, e.g. 2024-01-01..2024-06-30
    #[arg(long, value_name = "FROM..TO")]
    pub date: Option<String>,

    /// Initial case-insensitive name search
    #[arg(long, value_name = "TERM")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is not set
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
                    && io::stdout().is_terminal()
            }
        }
    }
}

impl Args {
    /// Builds the initial filter criteria from the filter flags.
    pub fn criteria(&self) -> Result<FilterCriteria, CommandError> {
        let mut criteria = FilterCriteria::new();
        if let Some(spec) = &self.size {
            let (min, max) = command::parse_size_range(spec)?;
            criteria.set_size_range(min, max);
        }
        if let Some(spec) = &self.kind {
            criteria.set_kind(Some(command::parse_kind(spec)?));
        }
        if let Some(spec) = &self.date {
            let (min, max) = command::parse_date_range(spec)?;
            criteria.set_modified_range(min, max);
        }
        if let Some(term) = &self.search {
            criteria.set_search(term.as_str());
        }
        Ok(criteria)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(self.color.enabled())
    }

    /// The canonical starting directory.
    ///
    /// # Returns
    /// An std::io::Error if the path does not exist or is not a directory.
    pub fn initial_dir(&self) -> io::Result<PathBuf> {
        let path = match &self.path {
            Some(path) => path.canonicalize()?,
            None => std::env::current_dir()?.canonicalize()?,
        };
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("'{}' is not a directory", path.display()),
            ));
        }
        Ok(path)
    }
}
