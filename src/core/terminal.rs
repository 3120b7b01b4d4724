//! Terminal glue for the interactive session of fxplore.
//!
//! Clears the screen between listings, prints prompts and reads command lines.
//! The session runs in normal (cooked) mode, no raw mode or alternate screen is used.

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

use std::io::{self, BufRead, Write};

/// Clears the whole screen and moves the cursor to the top left corner.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Writes `text` without a newline and flushes so it shows up before input is read.
pub fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Reads one line of input with the line terminator removed.
///
/// # Returns
/// None at end of input.
pub fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_line_strips_terminators() -> io::Result<()> {
        let mut input = Cursor::new("first\nsecond\r\n\nlast");
        assert_eq!(read_line(&mut input)?.as_deref(), Some("first"));
        assert_eq!(read_line(&mut input)?.as_deref(), Some("second"));
        assert_eq!(read_line(&mut input)?.as_deref(), Some(""));
        assert_eq!(read_line(&mut input)?.as_deref(), Some("last"));
        assert_eq!(read_line(&mut input)?, None);
        Ok(())
    }

    #[test]
    fn prompt_has_no_newline() -> io::Result<()> {
        let mut out = Vec::new();
        prompt(&mut out, "Enter command: ")?;
        assert_eq!(out, b"Enter command: ");
        Ok(())
    }
}
