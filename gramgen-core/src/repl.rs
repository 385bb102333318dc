use std::io::{self, BufRead, Write};

use log::{debug, warn};
use rand::Rng;

use crate::model::WalkOptions;
use crate::registry::Registry;

/// Prompt printed before every command.
pub const PROMPT: &str = "Enter model name to generate sentence using that model,\nlist for a list of models, or exit to exit: ";

/// What to do when the input names no registered model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownModelPolicy {
	/// Report it and prompt again.
	#[default]
	Reprompt,
	/// Treat it like `exit`.
	Exit,
}

/// One line of REPL input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
	Exit,
	List,
	Empty,
	/// Generate from `model`, optionally starting with `prefix`.
	Generate { model: String, prefix: Vec<String> },
}

impl Command {
	/// Parses a line: `exit`, `list`, or `<model> [prefix tokens...]`.
	pub fn parse(line: &str) -> Self {
		let mut words = line.split_whitespace();
		match words.next() {
			None => Command::Empty,
			Some("exit") => Command::Exit,
			Some("list") => Command::List,
			Some(model) => Command::Generate {
				model: model.to_owned(),
				prefix: words.map(str::to_owned).collect(),
			},
		}
	}
}

/// Interactive loop: reads model names and prints generated sentences.
///
/// # Responsibilities
/// - Own the random source, so the sentence sequence only depends on the
///   seed and the order of commands
/// - Turn generation errors into messages instead of aborting
pub struct Repl<'a, R> {
	registry: &'a Registry,
	rng: R,
	options: WalkOptions,
	on_unknown: UnknownModelPolicy,
}

impl<'a, R: Rng> Repl<'a, R> {
	pub fn new(registry: &'a Registry, rng: R, options: WalkOptions, on_unknown: UnknownModelPolicy) -> Self {
		Self { registry, rng, options, on_unknown }
	}

	/// Runs until `exit`, end of input, or (under `UnknownModelPolicy::Exit`)
	/// an unknown model name.
	///
	/// # Errors
	/// Only I/O errors on `input` / `output` are returned.
	pub fn run<I: BufRead, O: Write>(&mut self, mut input: I, mut output: O) -> io::Result<()> {
		let mut line = String::new();
		loop {
			write!(output, "{PROMPT}")?;
			output.flush()?;

			line.clear();
			if input.read_line(&mut line)? == 0 {
				writeln!(output)?;
				break;
			}

			match Command::parse(&line) {
				Command::Exit => break,
				Command::Empty => continue,
				Command::List => {
					for name in self.registry.model_names() {
						writeln!(output, "\t{name}")?;
					}
				}
				Command::Generate { model, prefix } => {
					if !self.registry.contains(&model) && self.on_unknown == UnknownModelPolicy::Exit {
						debug!("Unknown model {model}, exiting");
						break;
					}
					self.generate(&model, prefix, &mut output)?;
				}
			}
		}
		Ok(())
	}

	fn generate<O: Write>(&mut self, model: &str, prefix: Vec<String>, output: &mut O) -> io::Result<()> {
		let options = self.options.with_prefix(prefix);
		let sentence = self
			.registry
			.require(model)
			.and_then(|m| m.build_sentence(&mut self.rng, &options));

		match sentence {
			Ok(sentence) => write!(output, "\n\t{sentence}\n\n"),
			Err(e) => {
				warn!("Generation failed for {model}: {e}");
				writeln!(output, "error: {e}")
			}
		}
	}
}
