//! Tree walker and renamer
//!
//! First pass of the pipeline. Walks the tree depth-first using live
//! directory listings:
//! 1. Files of a directory are content-cleaned, then renamed
//! 2. Each subdirectory is fully processed, then renamed itself
//!
//! Renaming a directory only after its subtree is done means every child is
//! addressed through a path that still exists on disk. Failures are logged
//! per entry and never stop the walk.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::TidyConfig;
use crate::content;
use crate::error::TidyError;
use crate::mapping::RenameMapping;
use crate::names;
use crate::util::{display_path, file_name_str, Progress};

/// Kind of a filesystem entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    fn label(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
        }
    }
}

/// An entry seen during the walk, with its cleaned name
#[derive(Debug, Clone)]
pub struct FileSystemEntry {
    pub path: PathBuf,
    pub original_name: String,
    pub computed_name: String,
    pub kind: EntryKind,
}

impl FileSystemEntry {
    /// `None` when the path has no UTF-8 basename
    pub fn new(path: PathBuf, kind: EntryKind) -> Option<Self> {
        let original_name = file_name_str(&path)?.to_string();
        let computed_name = names::clean(&original_name);
        Some(Self {
            path,
            original_name,
            computed_name,
            kind,
        })
    }

    pub fn is_changed(&self) -> bool {
        self.original_name != self.computed_name
    }

    /// Path the entry will have after renaming
    pub fn target_path(&self) -> PathBuf {
        self.path.with_file_name(&self.computed_name)
    }
}

/// First-pass walker. Holds the policy; the mapping lives per call.
pub struct Walker<'a> {
    config: &'a TidyConfig,
    dry_run: bool,
    progress: Progress,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a TidyConfig) -> Self {
        Self {
            config,
            dry_run: false,
            progress: Progress::default(),
        }
    }

    /// Compute everything but write and rename nothing
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Walk the whole tree under `root` and return the renames performed.
    ///
    /// The root directory itself is never renamed.
    pub fn walk_and_rename(&self, root: &Path) -> RenameMapping {
        let mut mapping = RenameMapping::default();
        self.visit_dir(root, &mut mapping);
        mapping
    }

    fn visit_dir(&self, dir: &Path, mapping: &mut RenameMapping) {
        let read_dir = match fs::read_dir(dir) {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to read directory: {}", TidyError::io(dir, e));
                return;
            }
        };

        let mut files: Vec<(PathBuf, bool)> = Vec::new();
        let mut dirs: Vec<PathBuf> = Vec::new();

        for entry in read_dir {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read entry: {}", TidyError::io(dir, e));
                    continue;
                }
            };
            let path = entry.path();
            match entry.file_type() {
                Ok(ft) if ft.is_dir() => dirs.push(path),
                Ok(ft) => files.push((path, ft.is_symlink())),
                Err(e) => warn!("Failed to stat entry: {}", TidyError::io(&path, e)),
            }
        }

        files.sort();
        dirs.sort();

        for (path, is_symlink) in files {
            self.visit_file(path, is_symlink, mapping);
        }

        for path in dirs {
            let Some(entry) = FileSystemEntry::new(path, EntryKind::Directory) else {
                continue;
            };
            if self.config.skips_dir(&entry.original_name) {
                debug!("Skipping directory: {}", display_path(&entry.path));
                continue;
            }
            self.visit_dir(&entry.path, mapping);
            self.apply_rename(&entry, mapping);
        }
    }

    fn visit_file(&self, path: PathBuf, is_symlink: bool, mapping: &mut RenameMapping) {
        let Some(entry) = FileSystemEntry::new(path, EntryKind::File) else {
            debug!("Skipping non UTF-8 name");
            return;
        };
        if self.config.skips_file(&entry.original_name) {
            debug!("Skipping file: {}", display_path(&entry.path));
            return;
        }

        // Content is written under the original name, the rename comes last
        if !is_symlink {
            if let Err(e) = content::process_file(&entry.path, self.config, self.dry_run, self.progress) {
                warn!("Failed to process file: {}", e);
            }
        }

        self.apply_rename(&entry, mapping);
    }

    fn apply_rename(&self, entry: &FileSystemEntry, mapping: &mut RenameMapping) {
        if !entry.is_changed() {
            return;
        }
        match self.rename_entry(entry) {
            Ok(_) => mapping.record(&entry.original_name, &entry.computed_name),
            Err(e) => warn!(
                "Failed to rename {} {}: {}",
                entry.kind.label(),
                entry.original_name,
                e
            ),
        }
    }

    /// Rename one entry to its computed name.
    ///
    /// Refuses empty names, names with separators and existing targets.
    pub fn rename_entry(&self, entry: &FileSystemEntry) -> Result<PathBuf, TidyError> {
        if entry.computed_name.is_empty() {
            return Err(TidyError::EmptyName {
                path: entry.path.clone(),
            });
        }
        if entry.computed_name.contains(|c: char| c == '/' || c == '\\') {
            return Err(TidyError::InvalidName {
                path: entry.path.clone(),
                name: entry.computed_name.clone(),
            });
        }

        let target = entry.target_path();
        if target.symlink_metadata().is_ok() && !same_entry(&entry.path, &target) {
            return Err(TidyError::Collision {
                from: entry.path.clone(),
                to: target,
            });
        }

        if self.dry_run {
            self.progress.line(format_args!(
                "Would rename {}: {} -> {}",
                entry.kind.label(),
                entry.original_name,
                entry.computed_name
            ));
            return Ok(target);
        }

        fs::rename(&entry.path, &target).map_err(|e| TidyError::io(&entry.path, e))?;
        self.progress.line(format_args!(
            "Renamed {}: {} -> {}",
            entry.kind.label(),
            entry.original_name,
            entry.computed_name
        ));
        Ok(target)
    }
}

/// Case-only renames on case-insensitive filesystems resolve to the same entry
fn same_entry(a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
