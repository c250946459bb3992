//! Content cleaning for text files
//!
//! Strips UUID references from every text file and applies the Markdown lint
//! fixes to `.md` files. Files are only rewritten when something changed.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::config::{is_markdown, TidyConfig};
use crate::constants as C;
use crate::error::TidyError;
use crate::lint;
use crate::names;
use crate::util::{display_path, Progress};

/// Allow-listed extension and a UTF-8 head.
///
/// Unreadable files and files whose first bytes are not UTF-8 count as
/// binary. A multi-byte character cut off at the probe boundary is fine.
pub fn is_text_file(path: &Path, config: &TidyConfig) -> bool {
    if !config.has_text_extension(path) {
        return false;
    }

    let mut head = Vec::with_capacity(C::TEXT_PROBE_BYTES);
    let read = File::open(path).and_then(|f| f.take(C::TEXT_PROBE_BYTES as u64).read_to_end(&mut head));
    if read.is_err() {
        return false;
    }

    match std::str::from_utf8(&head) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

/// Compute the cleaned content of a text file.
pub fn clean_content(path: &Path, content: &str) -> String {
    let stripped = names::strip_uuids(content);
    if is_markdown(path) {
        lint::fix_markdown(&stripped)
    } else {
        stripped.into_owned()
    }
}

/// Clean a single file in place. Returns whether its content changed.
///
/// Non-text files are skipped silently. In dry-run mode nothing is written.
pub fn process_file(
    path: &Path,
    config: &TidyConfig,
    dry_run: bool,
    progress: Progress,
) -> Result<bool, TidyError> {
    if !is_text_file(path, config) {
        debug!("Not a text file, skipping content: {}", display_path(path));
        return Ok(false);
    }

    let content = fs::read_to_string(path).map_err(|e| TidyError::io(path, e))?;
    let cleaned = clean_content(path, &content);
    if cleaned == content {
        return Ok(false);
    }

    if dry_run {
        progress.line(format_args!("Would clean file: {}", display_path(path)));
    } else {
        fs::write(path, cleaned).map_err(|e| TidyError::io(path, e))?;
        progress.line(format_args!("Cleaned file: {}", display_path(path)));
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_binary_with_text_extension_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blob.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        assert!(!is_text_file(&path, &TidyConfig::default()));
    }

    #[test]
    fn test_truncated_multibyte_at_probe_boundary_is_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.md");
        let mut content = "a".repeat(C::TEXT_PROBE_BYTES - 1);
        content.push('中');
        fs::write(&path, content).unwrap();
        assert!(is_text_file(&path, &TidyConfig::default()));
    }

    #[test]
    fn test_process_markdown_strips_uuid_and_lints() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Page.md");
        fs::write(&path, "# Links:\n\n[x](Other abc12345-1111-2222-3333-444444444444.md) \n\n\n").unwrap();

        assert!(process_file(&path, &TidyConfig::default(), false, Progress::Stdout).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Links\n\n[x](Other.md)\n");
        assert!(!process_file(&path, &TidyConfig::default(), false, Progress::Stdout).unwrap());
    }

    #[test]
    fn test_process_plain_text_only_strips_uuid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        fs::write(&path, "name,page\nA,Doc 0123456789abcdef0123456789abcdef.md  \n").unwrap();

        assert!(process_file(&path, &TidyConfig::default(), false, Progress::Stdout).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,page\nA,Doc.md  \n");
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Page.md");
        fs::write(&path, "# Title:\n").unwrap();

        assert!(process_file(&path, &TidyConfig::default(), true, Progress::Stdout).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Title:\n");
    }

    #[test]
    fn test_png_never_processed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("image.png");
        fs::write(&path, "text that looks 0123456789abcdef0123456789abcdef").unwrap();

        assert!(!process_file(&path, &TidyConfig::default(), false, Progress::Stdout).unwrap());
    }
}
