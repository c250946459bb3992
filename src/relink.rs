//! Link relinker
//!
//! Second pass of the pipeline. Rewrites Markdown link and image targets that
//! still spell a renamed entry by its old name, literally or percent-encoded.
//!
//! This is plain substring replacement, not a Markdown parse: a matching
//! literal inside a code block is rewritten too, while links split across
//! lines, links with a directory prefix and reference definitions are not.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{is_markdown, TidyConfig};
use crate::error::TidyError;
use crate::mapping::RenameMapping;
use crate::names::percent_encode;
use crate::util::{display_path, Progress};

/// Outcome of a relink pass
#[derive(Debug, Default)]
pub struct RelinkReport {
    /// Markdown files visited
    pub scanned: usize,
    /// Files whose content was (or would be) rewritten
    pub rewritten: Vec<PathBuf>,
}

/// Second-pass relinker
pub struct Relinker<'a> {
    config: &'a TidyConfig,
    dry_run: bool,
    progress: Progress,
}

impl<'a> Relinker<'a> {
    pub fn new(config: &'a TidyConfig) -> Self {
        Self {
            config,
            dry_run: false,
            progress: Progress::default(),
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Rewrite links in every Markdown file under `root`
    pub fn relink_all(&self, root: &Path, mapping: &RenameMapping) -> RelinkReport {
        let mut report = RelinkReport::default();
        if mapping.is_empty() {
            return report;
        }

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !self.config.skips_dir(&e.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to walk: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_markdown(entry.path()) {
                continue;
            }
            if self.config.skips_file(&entry.file_name().to_string_lossy()) {
                debug!("Skipping file: {}", display_path(entry.path()));
                continue;
            }

            report.scanned += 1;
            match self.relink_file(entry.path(), mapping) {
                Ok(true) => report.rewritten.push(entry.into_path()),
                Ok(false) => {}
                Err(e) => warn!("Failed to relink: {}", e),
            }
        }

        report
    }

    /// Relink one file; returns whether it changed
    pub fn relink_file(&self, path: &Path, mapping: &RenameMapping) -> Result<bool, TidyError> {
        let content = fs::read_to_string(path).map_err(|e| TidyError::io(path, e))?;
        let relinked = relink_content(&content, mapping);
        if relinked == content {
            return Ok(false);
        }

        if self.dry_run {
            self.progress.line(format_args!("Would relink: {}", display_path(path)));
        } else {
            fs::write(path, relinked).map_err(|e| TidyError::io(path, e))?;
            self.progress.line(format_args!("Relinked: {}", display_path(path)));
        }
        Ok(true)
    }
}

/// Replace old link and image targets with their new names
pub fn relink_content(content: &str, mapping: &RenameMapping) -> String {
    let mut result = content.to_string();

    for (old_name, new_name) in mapping.iter() {
        let encoded = percent_encode(old_name);
        let replacements = [
            (format!("]({})", old_name), format!("]({})", new_name)),
            (format!("]({})", encoded), format!("]({})", new_name)),
            (format!("![]({})", old_name), format!("![]({})", new_name)),
            (format!("![]({})", encoded), format!("![]({})", new_name)),
        ];

        for (from, to) in &replacements {
            if result.contains(from.as_str()) {
                result = result.replace(from.as_str(), to);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const OLD: &str = "Old Doc abc12345-1111-2222-3333-444444444444.md";

    fn mapping() -> RenameMapping {
        [(OLD, "Old Doc.md")].into_iter().collect()
    }

    #[test]
    fn test_literal_link_rewritten() {
        let content = format!("Intro\n\n[see]({})\n\nOutro\n", OLD);
        assert_eq!(relink_content(&content, &mapping()), "Intro\n\n[see](Old Doc.md)\n\nOutro\n");
    }

    #[test]
    fn test_encoded_link_rewritten() {
        let content = "[see](Old%20Doc%20abc12345-1111-2222-3333-444444444444.md)";
        assert_eq!(relink_content(content, &mapping()), "[see](Old Doc.md)");
    }

    #[test]
    fn test_image_rewritten() {
        let mapping: RenameMapping = [("pic 0123456789abcdef0123456789abcdef.png", "pic.png")]
            .into_iter()
            .collect();
        let content = "![](pic%200123456789abcdef0123456789abcdef.png)\n![](pic 0123456789abcdef0123456789abcdef.png)";
        assert_eq!(relink_content(content, &mapping), "![](pic.png)\n![](pic.png)");
    }

    #[test]
    fn test_unrelated_text_untouched() {
        let content = format!("Mentions {} in prose.\n[x](other.md)\n", OLD);
        assert_eq!(relink_content(&content, &mapping()), content);
    }

    #[test]
    fn test_code_block_literal_is_also_rewritten() {
        let content = format!("```\n[see]({})\n```\n", OLD);
        assert_eq!(relink_content(&content, &mapping()), "```\n[see](Old Doc.md)\n```\n");
    }

    #[test]
    fn test_path_prefixed_link_not_rewritten() {
        let content = format!("[see](folder/{})", OLD);
        assert_eq!(relink_content(&content, &mapping()), content);
    }

    #[test]
    fn test_relink_all_writes_only_changed_files() {
        let temp_dir = TempDir::new().unwrap();
        let sub = temp_dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        let linking = sub.join("Index.md");
        let plain = temp_dir.path().join("Plain.md");
        let text = temp_dir.path().join("notes.txt");
        fs::write(&linking, format!("[see]({})\n", OLD)).unwrap();
        fs::write(&plain, "nothing here\n").unwrap();
        fs::write(&text, format!("[see]({})\n", OLD)).unwrap();

        let config = TidyConfig::default();
        let report = Relinker::new(&config).relink_all(temp_dir.path(), &mapping());

        assert_eq!(report.scanned, 2);
        assert_eq!(report.rewritten, vec![linking.clone()]);
        assert_eq!(fs::read_to_string(&linking).unwrap(), "[see](Old Doc.md)\n");
        assert_eq!(fs::read_to_string(&text).unwrap(), format!("[see]({})\n", OLD));
    }

    #[test]
    fn test_relink_all_skips_ignored_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let git = temp_dir.path().join(".git");
        fs::create_dir_all(&git).unwrap();
        let inside = git.join("notes.md");
        fs::write(&inside, format!("[see]({})\n", OLD)).unwrap();

        let config = TidyConfig::default();
        let report = Relinker::new(&config).relink_all(temp_dir.path(), &mapping());

        assert_eq!(report.scanned, 0);
        assert_eq!(fs::read_to_string(&inside).unwrap(), format!("[see]({})\n", OLD));
    }

    #[test]
    fn test_relink_all_skips_dotfiles_and_ignored_files() {
        let temp_dir = TempDir::new().unwrap();
        let encoded = "[see](Old%20Doc%20abc12345-1111-2222-3333-444444444444.md)\n";
        let draft = temp_dir.path().join(".draft.md");
        let visible = temp_dir.path().join("Index.md");
        fs::write(&draft, encoded).unwrap();
        fs::write(&visible, encoded).unwrap();

        let mut config = TidyConfig::default();
        config.ignore_files.insert("Index.md".to_string());
        let report = Relinker::new(&config).relink_all(temp_dir.path(), &mapping());

        assert_eq!(report.scanned, 0);
        assert!(report.rewritten.is_empty());
        assert_eq!(fs::read_to_string(&draft).unwrap(), encoded);
        assert_eq!(fs::read_to_string(&visible).unwrap(), encoded);
    }
}
