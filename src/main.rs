use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{Cli, Command},
    config::Profile,
    fetch::{FileSource, HttpSource, Source},
    store::Store,
};

mod cli;
mod config;
mod extract;
mod fetch;
mod identifier;
mod pipeline;
mod record;
mod store;

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Sync {
            profile,
            output,
            from_file,
            strict,
        } => {
            let profile = Profile::from(profile);
            let store = Store::new(output);
            let source: Box<dyn Source + '_> = match from_file {
                Some(path) => Box::new(FileSource::new(path)),
                None => Box::new(HttpSource::new(&profile)),
            };
            let outcome = pipeline::run(source.as_ref(), &store, &profile)
                .with_context(|| format!("could not update {}", store.path().display()))?;
            if strict && outcome.is_degraded() {
                return Ok(ExitCode::from(2));
            }
        }
        Command::Extract { file, host } => {
            let profile = Profile {
                host,
                ..Profile::default()
            };
            let markup = FileSource::new(file).fetch()?;
            let publications = extract::extract(&markup, &profile)?;
            println!("{}", serde_json::to_string_pretty(&publications)?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
