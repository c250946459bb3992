//! Utility functions for path handling

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::constants as C;

/// Resolve the root directory to process.
///
/// Priority: explicit argument, then `$EXPORT_TIDY_ROOT`, then the current
/// directory. The result is canonicalized (without a UNC prefix on Windows).
pub fn resolve_root(explicit: Option<&str>) -> io::Result<PathBuf> {
    let candidate = match explicit {
        Some(path) => PathBuf::from(path),
        None => match std::env::var(C::ENV_ROOT).ok().filter(|s| !s.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => std::env::current_dir()?,
        },
    };

    if !candidate.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Root is not a directory: {}", display_path(&candidate)),
        ));
    }

    dunce::canonicalize(&candidate)
}

/// Stream for per-item progress lines.
///
/// JSON reports own stdout, so progress moves to stderr for them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Progress {
    #[default]
    Stdout,
    Stderr,
}

impl Progress {
    pub fn for_json(json: bool) -> Self {
        if json {
            Progress::Stderr
        } else {
            Progress::Stdout
        }
    }

    pub fn line(self, line: impl fmt::Display) {
        match self {
            Progress::Stdout => println!("{}", line),
            Progress::Stderr => eprintln!("{}", line),
        }
    }
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Basename of a path as UTF-8, if it has one
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}
