//! Markdown link inspection using pulldown-cmark
//!
//! Used after a run to find local links that no longer resolve.

use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use serde::Serialize;
use tracing::warn;
use walkdir::WalkDir;

use crate::config::{is_markdown, TidyConfig};

/// Represents a markdown link or image
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownLink {
    /// Link text (visible text or alt text)
    pub text: String,
    /// Link destination URL
    pub dest: String,
    /// Whether this is an image embed
    pub is_image: bool,
}

/// A local link whose target does not exist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokenLink {
    /// File containing the link
    pub source: PathBuf,
    /// Destination as written
    pub target: String,
}

/// Extract all inline links and images from markdown content
pub fn extract_links(content: &str) -> Vec<MarkdownLink> {
    let mut links = Vec::new();
    let mut current: Option<MarkdownLink> = None;

    for event in Parser::new(content) {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                current = Some(MarkdownLink {
                    text: String::new(),
                    dest: dest_url.to_string(),
                    is_image: false,
                });
            }
            Event::Start(Tag::Image { dest_url, .. }) => {
                current = Some(MarkdownLink {
                    text: String::new(),
                    dest: dest_url.to_string(),
                    is_image: true,
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(link) = current.as_mut() {
                    link.text.push_str(&text);
                }
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                if let Some(link) = current.take() {
                    if !link.dest.is_empty() {
                        links.push(link);
                    }
                }
            }
            _ => {}
        }
    }

    links
}

/// Check if a destination points at a local file
pub fn is_local_link(dest: &str) -> bool {
    if dest.starts_with('#') || dest.starts_with("mailto:") || dest.starts_with("tel:") {
        return false;
    }
    !has_scheme(dest)
}

fn has_scheme(dest: &str) -> bool {
    match dest.find(':') {
        Some(idx) => {
            let scheme = &dest[..idx];
            // A single letter is a Windows drive, not a scheme
            scheme.len() > 1
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
        }
        None => false,
    }
}

/// Resolve a local destination against the directory of its source file
pub fn resolve_link(source: &Path, dest: &str) -> PathBuf {
    let without_fragment = dest.split('#').next().unwrap_or(dest);
    let decoded = urlencoding::decode(without_fragment)
        .map(|d| d.into_owned())
        .unwrap_or_else(|_| without_fragment.to_string());
    let base = source.parent().unwrap_or_else(|| Path::new(""));
    base.join(decoded)
}

/// Find local links under `root` whose targets are missing
pub fn check_links(root: &Path, config: &TidyConfig) -> Vec<BrokenLink> {
    let mut broken = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !config.skips_dir(&e.file_name().to_string_lossy())
        });

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() || !is_markdown(entry.path()) {
            continue;
        }
        let content = match fs::read_to_string(entry.path()) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to read {}: {}", entry.path().display(), e);
                continue;
            }
        };

        for link in extract_links(&content) {
            if !is_local_link(&link.dest) {
                continue;
            }
            let target = resolve_link(entry.path(), &link.dest);
            if !target.exists() {
                let source = entry.path().strip_prefix(root).unwrap_or(entry.path());
                broken.push(BrokenLink {
                    source: source.to_path_buf(),
                    target: link.dest.clone(),
                });
            }
        }
    }

    broken
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_links() {
        let content = "See [my note](notes/my-note.md) and ![chart](img/chart.png).";
        let links = extract_links(content);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].text, "my note");
        assert_eq!(links[0].dest, "notes/my-note.md");
        assert!(!links[0].is_image);
        assert_eq!(links[1].text, "chart");
        assert!(links[1].is_image);
    }

    #[test]
    fn test_extract_links_skips_code() {
        let content = "```\n[x](in-code.md)\n```\n";
        assert!(extract_links(content).is_empty());
    }

    #[test]
    fn test_is_local_link() {
        assert!(is_local_link("Page.md"));
        assert!(is_local_link("sub/Page%20One.md#section"));
        assert!(!is_local_link("https://example.com"));
        assert!(!is_local_link("mailto:a@b.io"));
        assert!(!is_local_link("#anchor"));
    }

    #[test]
    fn test_resolve_link_decodes_and_drops_fragment() {
        let resolved = resolve_link(Path::new("root/dir/Index.md"), "Page%20One.md#top");
        assert_eq!(resolved, PathBuf::from("root/dir/Page One.md"));
    }

    #[test]
    fn test_check_links() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("Target.md"), "# Target\n").unwrap();
        fs::write(
            temp_dir.path().join("Index.md"),
            "[ok](Target.md)\n\n[gone](Missing%20Page.md)\n\n[web](https://example.com)\n",
        )
        .unwrap();

        let broken = check_links(temp_dir.path(), &TidyConfig::default());
        assert_eq!(
            broken,
            vec![BrokenLink {
                source: PathBuf::from("Index.md"),
                target: "Missing%20Page.md".to_string(),
            }]
        );
    }
}
