//! The interactive session of fxplore.
//!
//! [Session] owns the current directory and the [FilterCriteria] which accumulate across
//! commands until `clear filter`. Each round renders the listing, prompts for a command
//! and dispatches it: navigation changes the directory, filter commands mutate the criteria,
//! entry names enter a directory or open a file through an [Opener].
//!
//! The process working directory is never changed, paths are resolved against the session's
//! own current directory.

use crate::app::command::{Command, HELP_TEXT};
use crate::core::errors::ListingError;
use crate::core::filter::FilterCriteria;
use crate::core::listing::render_listing;
use crate::core::terminal;
use crate::ui::RenderOptions;
use crate::utils::{readable_path, resolve_path};

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const COMMAND_PROMPT: &str = "\nEnter command: ";
const CONTINUE_PROMPT: &str = "Press Enter to continue...";

/// Opens regular files with an external application.
pub trait Opener {
    fn open(&mut self, path: &Path) -> io::Result<()>;
}

/// Opens files with the platform default application (xdg-open, open, start).
/// Blocks until the launcher returns.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&mut self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// Whether the session keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct Session<O: Opener = SystemOpener> {
    current_dir: PathBuf,
    criteria: FilterCriteria,
    options: RenderOptions,
    clear_screen: bool,
    opener: O,
}

impl Session<SystemOpener> {
    pub fn new(current_dir: PathBuf) -> Self {
        Session::with_opener(current_dir, SystemOpener)
    }
}

impl<O: Opener> Session<O> {
    pub fn with_opener(current_dir: PathBuf, opener: O) -> Self {
        Session {
            current_dir,
            criteria: FilterCriteria::default(),
            options: RenderOptions::default(),
            clear_screen: true,
            opener,
        }
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    // Getters

    #[inline]
    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    #[inline]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[inline]
    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Renders the listing of the current directory.
    ///
    /// An unavailable directory is reported on `err` and is not an error of the session.
    /// # Returns
    /// An std::io::Error only if writing to `out` failed.
    pub fn render<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> io::Result<()> {
        match render_listing(&self.current_dir, &self.criteria, &self.options, out) {
            Ok(summary) => {
                tracing::debug!(shown = summary.shown, total = summary.total, "listing rendered");
                Ok(())
            }
            Err(e @ ListingError::DirectoryUnavailable { .. }) => {
                tracing::debug!(error = %e, "listing aborted");
                writeln!(err, "Error: {e}")
            }
            Err(ListingError::Output(e)) => Err(e),
        }
    }

    /// Runs the session loop until `q` or end of input.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        input: &mut R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        loop {
            if self.clear_screen {
                terminal::clear_screen(out)?;
            }
            self.render(out, err)?;

            terminal::prompt(out, COMMAND_PROMPT)?;
            let Some(line) = terminal::read_line(input)? else {
                writeln!(out)?;
                break;
            };
            if self.execute(&line, input, out, err)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Parses and executes one command line.
    ///
    /// Malformed commands are reported on `err` and leave the session unchanged.
    pub fn execute<R: BufRead, W: Write, E: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(err, "Error: {e}")?;
                self.pause(input, out)?;
                return Ok(Flow::Continue);
            }
        };
        tracing::debug!(?command, "executing command");

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Refresh => {}
            Command::Help if fs::symlink_metadata(self.current_dir.join(line)).is_ok() => {
                self.open_entry(line, input, out, err)?
            }
            Command::Help => {
                out.write_all(HELP_TEXT.as_bytes())?;
                self.pause(input, out)?;
            }
            Command::Up => {
                if let Some(parent) = self.current_dir.parent() {
                    self.current_dir = parent.to_path_buf();
                }
            }
            Command::ChangeDir(target) => {
                if let Err(e) = self.change_dir(&target) {
                    writeln!(err, "Cannot change directory: {e}")?;
                    self.pause(input, out)?;
                }
            }
            Command::FilterSize { min, max } => self.criteria.set_size_range(min, max),
            Command::FilterKind(kind) => self.criteria.set_kind(Some(kind)),
            Command::FilterDate { min, max } => self.criteria.set_modified_range(min, max),
            Command::Search(term) => self.criteria.set_search(term),
            Command::ClearFilter => self.criteria.clear(),
            Command::Open(name) => self.open_entry(&name, input, out, err)?,
        }
        Ok(Flow::Continue)
    }

    /// Makes `target` (relative to the current directory, "~" expanded) the current directory.
    fn change_dir(&mut self, target: &str) -> io::Result<()> {
        let resolved = resolve_path(&self.current_dir, target)?;
        if !resolved.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("'{}' is not a directory", readable_path(&resolved)),
            ));
        }
        tracing::debug!(path = %resolved.display(), "changed directory");
        self.current_dir = resolved;
        Ok(())
    }

    /// Enters the named directory or opens the named file.
    fn open_entry<R: BufRead, W: Write, E: Write>(
        &mut self,
        name: &str,
        input: &mut R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        let path = self.current_dir.join(name);
        match fs::metadata(&path) {
            Ok(md) if md.is_dir() => {
                match path.canonicalize() {
                    Ok(resolved) => {
                        tracing::debug!(path = %resolved.display(), "entered directory");
                        self.current_dir = resolved;
                    }
                    Err(e) => {
                        writeln!(err, "Cannot open directory: {e}")?;
                        self.pause(input, out)?;
                    }
                }
                return Ok(());
            }
            Ok(md) if md.is_file() => {
                writeln!(out, "Attempting to open: {}", readable_path(&path))?;
                if let Err(e) = self.opener.open(&path) {
                    tracing::debug!(path = %path.display(), error = %e, "opener failed");
                    writeln!(err, "Failed to open file: {e}")?;
                }
            }
            Ok(_) => {
                writeln!(
                    err,
                    "Cannot open '{}': not a regular file or directory",
                    readable_path(&path)
                )?;
            }
            Err(e) => {
                writeln!(err, "Invalid path or file: {e}")?;
            }
        }
        self.pause(input, out)
    }

    /// Waits for a line so messages stay visible before the screen is redrawn.
    fn pause<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> io::Result<()> {
        terminal::prompt(out, CONTINUE_PROMPT)?;
        terminal::read_line(input)?;
        Ok(())
    }
}
