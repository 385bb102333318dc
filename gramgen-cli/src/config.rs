use std::path::PathBuf;

use clap::Parser;
use gramgen_core::model::DEFAULT_MAX_TOKENS;
use gramgen_core::{NameMode, RegistryConfig, UnknownModelPolicy, WalkOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Command-line arguments of `gramgen`.
#[derive(Parser, Debug)]
#[command(name = "gramgen", about = "Generate random sentences from n-gram models of a corpus directory")]
pub struct Cli {
	/// Gram size (number of tokens per n-gram)
	#[arg(value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
	pub gram_size: u32,

	/// Directory containing one corpus file per model
	#[arg(value_name = "DIRECTORY")]
	pub directory: PathBuf,

	/// Seed for the random generator (default: OS entropy)
	#[arg(long)]
	pub seed: Option<u64>,

	/// Maximum tokens per sentence, 0 for unbounded
	#[arg(long, default_value_t = DEFAULT_MAX_TOKENS)]
	pub max_tokens: usize,

	/// Also print the leading tokens of the starting n-gram
	#[arg(long)]
	pub full_start: bool,

	/// Derive model names by dropping the last four characters of the file name
	#[arg(long)]
	pub legacy_names: bool,

	/// Quit when the input is not a known model name
	#[arg(long)]
	pub exit_on_unknown: bool,

	/// Cache compiled models in this directory
	#[arg(long, value_name = "DIR")]
	pub cache_dir: Option<PathBuf>,
}

impl Cli {
	pub fn registry_config(&self) -> RegistryConfig {
		RegistryConfig {
			gram_size: self.gram_size as usize,
			name_mode: if self.legacy_names { NameMode::Legacy } else { NameMode::Extension },
			cache_dir: self.cache_dir.clone(),
		}
	}

	pub fn walk_options(&self) -> WalkOptions {
		WalkOptions {
			max_tokens: (self.max_tokens > 0).then_some(self.max_tokens),
			full_start: self.full_start,
			..WalkOptions::default()
		}
	}

	pub fn unknown_model_policy(&self) -> UnknownModelPolicy {
		if self.exit_on_unknown { UnknownModelPolicy::Exit } else { UnknownModelPolicy::Reprompt }
	}

	/// Seeded generator when `--seed` is given, entropy-seeded otherwise.
	pub fn rng(&self) -> StdRng {
		match self.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_os_rng(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn positional_arguments() {
		let cli = Cli::try_parse_from(["gramgen", "3", "corpora"]).unwrap();
		assert_eq!(cli.directory, PathBuf::from("corpora"));
		assert_eq!(cli.registry_config(), RegistryConfig::new(3));
		assert_eq!(cli.walk_options(), WalkOptions::default());
		assert_eq!(cli.unknown_model_policy(), UnknownModelPolicy::Reprompt);
	}

	#[test]
	fn options_map_to_core_settings() {
		let cli = Cli::try_parse_from([
			"gramgen", "2", "d", "--max-tokens", "0", "--full-start", "--legacy-names", "--exit-on-unknown",
			"--cache-dir", "cache",
		])
		.unwrap();
		let config = cli.registry_config();
		assert_eq!(config.name_mode, NameMode::Legacy);
		assert_eq!(config.cache_dir, Some(PathBuf::from("cache")));
		let options = cli.walk_options();
		assert_eq!(options.max_tokens, None);
		assert!(options.full_start);
		assert_eq!(cli.unknown_model_policy(), UnknownModelPolicy::Exit);
	}

	#[test]
	fn usage_errors() {
		assert!(Cli::try_parse_from(["gramgen", "3"]).is_err());
		assert!(Cli::try_parse_from(["gramgen", "0", "d"]).is_err());
		assert!(Cli::try_parse_from(["gramgen", "x", "d"]).is_err());
		assert!(Cli::try_parse_from(["gramgen", "2", "d", "extra"]).is_err());
	}

	#[test]
	fn seeded_rng_is_reproducible() {
		use rand::Rng;
		let cli = Cli::try_parse_from(["gramgen", "2", "d", "--seed", "17"]).unwrap();
		let a: u64 = cli.rng().random();
		let b: u64 = cli.rng().random();
		assert_eq!(a, b);
	}
}
