//! `gramgen N DIRECTORY`: builds one n-gram model per corpus file and
//! prints random sentences for the model names typed on standard input.

mod config;

use std::io;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use config::Cli;
use gramgen_core::{Registry, Repl};

fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

	let cli = Cli::parse();
	let registry = Registry::load(&cli.directory, &cli.registry_config())
		.with_context(|| format!("cannot load models from {}", cli.directory.display()))?;
	info!("{} models loaded from {}", registry.len(), cli.directory.display());

	let mut repl = Repl::new(&registry, cli.rng(), cli.walk_options(), cli.unknown_model_policy());
	repl.run(io::stdin().lock(), io::stdout().lock())?;

	Ok(())
}
