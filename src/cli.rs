use clap::{Parser, Subcommand};

/// export-tidy - Clean up a note-taking tool export in place
///
/// ## Usage
///
/// ```bash
/// cd ~/Downloads/Export-1234
/// export-tidy                      # Same as `export-tidy run`, asks first
/// export-tidy run --yes            # No confirmation prompt
/// export-tidy run --dry-run        # Show what would change
/// export-tidy --root ./export run  # Process another directory
/// export-tidy name "Page%20One 0123456789abcdef0123456789abcdef.md"
/// export-tidy check                # Report broken local links
/// ```
///
/// ## What a run does
///
/// 1. Strips the UUID suffix from every file and folder name and
///    percent-decodes it
/// 2. Strips UUID references from text file content and fixes common
///    Markdown lint issues in `.md` files
/// 3. Rewrites `](old name)` links and `![](old name)` images to the new names
///
/// Hidden directories and build/VCS/cache folders are never touched.
///
/// ## Environment Variables
///
/// - `EXPORT_TIDY_ROOT`: Directory to process when `--root` is not given
/// - `RUST_LOG`: Log filter (default: info)
#[derive(Parser, Debug)]
#[command(name = "export-tidy")]
#[command(version = "0.1.0")]
#[command(about = "Strip UUID suffixes, decode names, fix Markdown lint and relink an exported notes tree")]
pub struct Cli {
    /// Directory to process (default: $EXPORT_TIDY_ROOT or current directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub root: Option<String>,

    /// Additional directory names to skip (repeatable)
    #[arg(long = "ignore", value_name = "NAME", global = true)]
    pub ignore: Vec<String>,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Show debug diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rename entries, clean content and relink Markdown files
    Run {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Report changes without modifying anything
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print the cleaned form of one or more names
    Name {
        /// Names as they appear in the export
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Check for broken local links
    Check,
}
