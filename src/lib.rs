pub mod cli;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod lint;
pub mod mapping;
pub mod markdown;
pub mod names;
pub mod pipeline;
pub mod relink;
pub mod util;
pub mod walker;

pub use cli::{Cli, Command};
pub use config::TidyConfig;
pub use error::TidyError;
pub use mapping::RenameMapping;
pub use pipeline::{run, RunOptions, RunSummary};
pub use relink::{relink_content, Relinker};
pub use walker::{EntryKind, FileSystemEntry, Walker};
