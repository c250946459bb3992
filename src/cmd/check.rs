//! Broken link report
//!
//! Lists local Markdown links whose target is missing. Exits with an error
//! when any are found so it can gate scripts.

use std::io;

use export_tidy::markdown;
use export_tidy::util::{self, display_path};
use export_tidy::TidyConfig;

pub fn run(root: Option<&str>, config: &TidyConfig, json: bool) -> io::Result<()> {
    let root = util::resolve_root(root)?;
    let broken = markdown::check_links(&root, config);

    if json {
        println!("{}", serde_json::to_string_pretty(&broken)?);
    } else if broken.is_empty() {
        println!("No broken links found. OK.");
    } else {
        eprintln!("Found {} broken link(s):", broken.len());
        for link in &broken {
            eprintln!("  {}: broken link -> {}", display_path(&link.source), link.target);
        }
    }

    if broken.is_empty() {
        Ok(())
    } else {
        Err(io::Error::other(format!("Found {} broken link(s)", broken.len())))
    }
}
