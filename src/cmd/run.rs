//! Full rename-and-relink run over the export root
//!
//! Asks for confirmation before touching anything unless `--yes` or
//! `--dry-run` is given. The prompt is written to stderr so that stdout
//! carries only the report.

use std::io::{self, Write};

use export_tidy::util::{self, display_path, Progress};
use export_tidy::{pipeline, RunOptions, TidyConfig};

pub fn run(
    root: Option<&str>,
    config: &TidyConfig,
    yes: bool,
    dry_run: bool,
    json: bool,
) -> io::Result<()> {
    let root = util::resolve_root(root)?;

    eprintln!("Directory to process: {}", display_path(&root));

    if !yes && !dry_run {
        eprint!("Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let options = RunOptions {
        dry_run,
        progress: Progress::for_json(json),
    };
    let summary = pipeline::run(&root, config, options);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Done.");
    if !summary.renames.is_empty() {
        println!();
        println!("Renames:");
        for (old_name, new_name) in summary.renames.iter() {
            println!("  {} -> {}", old_name, new_name);
        }
    }
    if !summary.relinked.is_empty() {
        println!();
        println!("Relinked {} file(s)", summary.relinked.len());
    }
    if dry_run {
        println!();
        println!("Dry-run mode. Run without --dry-run to apply these changes.");
    }

    Ok(())
}
