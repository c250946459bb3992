//! Walk policy: which directories to skip, which files to leave alone and
//! which extensions count as text.

use std::collections::HashSet;
use std::path::Path;

use crate::constants as C;

/// Policy handed to the walker and relinker at construction
#[derive(Debug, Clone)]
pub struct TidyConfig {
    /// Directory names excluded from traversal and renaming
    pub ignore_dirs: HashSet<String>,
    /// File names never renamed or content-processed
    pub ignore_files: HashSet<String>,
    /// Lowercase extensions (no dot) that get content cleaning
    pub text_extensions: HashSet<String>,
}

impl Default for TidyConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: C::DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore_files: C::DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
            text_extensions: C::DEFAULT_TEXT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TidyConfig {
    /// Extend the ignore-set with extra directory names
    pub fn with_ignored_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs.extend(names.into_iter().map(Into::into));
        self
    }

    /// Hidden or ignore-listed directories are never entered
    pub fn skips_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_dirs.contains(name)
    }

    /// Dotfiles and OS housekeeping files are left untouched
    pub fn skips_file(&self, name: &str) -> bool {
        name.starts_with('.') || self.ignore_files.contains(name)
    }

    /// Extension allow-list check (the UTF-8 probe lives in `content`)
    pub fn has_text_extension(&self, path: &Path) -> bool {
        extension_lowercase(path)
            .map(|ext| self.text_extensions.contains(&ext))
            .unwrap_or(false)
    }
}

/// Whether the path names a Markdown file
pub fn is_markdown(path: &Path) -> bool {
    extension_lowercase(path).as_deref() == Some(C::MARKDOWN_EXTENSION)
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skips_vcs_and_hidden() {
        let config = TidyConfig::default();
        assert!(config.skips_dir(".git"));
        assert!(config.skips_dir("node_modules"));
        assert!(config.skips_dir(".anything"));
        assert!(!config.skips_dir("Projects"));
    }

    #[test]
    fn test_skips_files() {
        let config = TidyConfig::default();
        assert!(config.skips_file("Thumbs.db"));
        assert!(config.skips_file("desktop.ini"));
        assert!(config.skips_file(".hidden.md"));
        assert!(!config.skips_file("Notes.md"));
    }

    #[test]
    fn test_with_ignored_dirs() {
        let config = TidyConfig::default().with_ignored_dirs(["attachments"]);
        assert!(config.skips_dir("attachments"));
    }

    #[test]
    fn test_text_extension_is_case_insensitive() {
        let config = TidyConfig::default();
        assert!(config.has_text_extension(Path::new("a/Readme.MD")));
        assert!(config.has_text_extension(Path::new("data.csv")));
        assert!(!config.has_text_extension(Path::new("photo.png")));
        assert!(!config.has_text_extension(Path::new("Makefile")));
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown(Path::new("x/Note.md")));
        assert!(is_markdown(Path::new("Note.MD")));
        assert!(!is_markdown(Path::new("Note.markdown")));
    }
}
