//! Path helpers for fxplore.
//!
//! - Expanding a leading "~" in user supplied paths
//! - Resolving user supplied paths against the current directory
//! - Shortening the home directory to "~" for display
//! - Stripping the verbatim prefix Windows adds to canonical paths

use std::io;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Expands a leading "~" (alone or followed by a separator) to the home directory.
/// Paths without it, or systems without a home directory, are returned as given.
pub fn expand_home_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~')
        && (rest.is_empty() || rest.starts_with('/') || rest.starts_with(MAIN_SEPARATOR))
        && let Some(home) = dirs::home_dir()
    {
        let rest = rest.trim_start_matches(['/', MAIN_SEPARATOR]);
        return if rest.is_empty() {
            home
        } else {
            home.join(rest)
        };
    }
    PathBuf::from(path)
}

/// Resolves `target` against `base` and canonicalizes the result.
///
/// "~" is expanded, relative paths are taken relative to `base`.
/// # Returns
/// The canonical path or the std::io::Error when it does not exist or is not accessible.
pub fn resolve_path(base: &Path, target: &str) -> io::Result<PathBuf> {
    let expanded = expand_home_path(target);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };
    joined.canonicalize()
}

/// Util function to shorten home directory to ~.
/// Used by the path line of the listing header.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    readable_path(path)
}

/// Displays a path without the `\\?\` prefix canonical paths carry on Windows.
pub fn readable_path(path: &Path) -> String {
    #[cfg(windows)]
    {
        let display = path.display().to_string();
        display
            .strip_prefix(r"\\?\")
            .unwrap_or(&display)
            .to_string()
    }
    #[cfg(not(windows))]
    {
        path.display().to_string()
    }
}

/// Path helper tests
#[cfg(test)]
mod tests {
    use super::*;

    use std::error;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_home_path() {
        assert_eq!(expand_home_path("/tmp/x"), PathBuf::from("/tmp/x"));
        assert_eq!(expand_home_path("~user"), PathBuf::from("~user"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home_path("~"), home);
            assert_eq!(expand_home_path("~/docs"), home.join("docs"));
        }
    }

    #[test]
    fn test_resolve_relative_and_parent() -> Result<(), Box<dyn error::Error>> {
        let dir = tempdir()?;
        let base = dir.path().canonicalize()?;
        fs::create_dir(base.join("sub"))?;

        assert_eq!(resolve_path(&base, "sub")?, base.join("sub"));
        assert_eq!(resolve_path(&base.join("sub"), "..")?, base);
        assert!(resolve_path(&base, "missing").is_err());
        Ok(())
    }

    #[test]
    fn test_shorten_home_path() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(shorten_home_path(&home), "~");
            let nested = home.join("projects");
            assert_eq!(
                shorten_home_path(&nested),
                format!("~{}projects", MAIN_SEPARATOR)
            );
        }
    }
}
