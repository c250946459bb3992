use clap::Parser;
use export_tidy::{Cli, Command, TidyConfig};
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json);

    let config = TidyConfig::default().with_ignored_dirs(cli.ignore.iter().cloned());

    match cli.command {
        None => cmd::run::run(cli.root.as_deref(), &config, false, false, cli.json),
        Some(Command::Run { yes, dry_run }) => {
            cmd::run::run(cli.root.as_deref(), &config, yes, dry_run, cli.json)
        }
        Some(Command::Name { names }) => cmd::name::run(&names, cli.json),
        Some(Command::Check) => cmd::check::run(cli.root.as_deref(), &config, cli.json),
    }
}

/// Logs go to stdout, or to stderr when stdout carries a JSON report
fn init_logging(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();
    if json {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.init();
    }
}

mod cmd {
    pub mod check;
    pub mod name;
    pub mod run;
}
