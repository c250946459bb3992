//! Rename-and-relink pipeline
//!
//! The walk builds the rename mapping; only once it has returned is the
//! finished mapping handed to the relinker.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::config::TidyConfig;
use crate::mapping::RenameMapping;
use crate::relink::Relinker;
use crate::util::{display_path, Progress};
use crate::walker::Walker;

/// Options for one pipeline run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report what would happen without touching the tree
    pub dry_run: bool,
    /// Where per-item progress lines go
    pub progress: Progress,
}

/// Result of a full run
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Basename renames performed
    pub renames: RenameMapping,
    /// Markdown files visited by the relinker
    pub scanned: usize,
    /// Markdown files whose links were rewritten
    pub relinked: Vec<PathBuf>,
    pub dry_run: bool,
}

/// Run both passes over `root`
pub fn run(root: &Path, config: &TidyConfig, options: RunOptions) -> RunSummary {
    info!("Processing directory: {}", display_path(root));

    let renames = Walker::new(config)
        .dry_run(options.dry_run)
        .progress(options.progress)
        .walk_and_rename(root);
    info!("Renamed {} entr{}", renames.len(), if renames.len() == 1 { "y" } else { "ies" });

    let report = Relinker::new(config)
        .dry_run(options.dry_run)
        .progress(options.progress)
        .relink_all(root, &renames);
    info!("Relinked {} of {} Markdown file(s)", report.rewritten.len(), report.scanned);

    RunSummary {
        renames,
        scanned: report.scanned,
        relinked: report.rewritten,
        dry_run: options.dry_run,
    }
}
