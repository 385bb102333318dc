use log::warn;
use rand::Rng;

use super::gram::NodeId;
use super::sentence_model::SentenceModel;
use super::walk_options::{StartSeed, WalkOptions};
use crate::error::{GramError, Result};

/// Outcome of a random walk through a [`SentenceModel`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Walk {
	/// Full n-grams visited, starting gram first.
	pub nodes: Vec<NodeId>,
	/// Emitted tokens, in sentence order.
	pub tokens: Vec<String>,
	/// `true` if the walk hit `max_tokens` before reaching a sink.
	pub truncated: bool,
}

impl Walk {
	fn visit(&mut self, model: &SentenceModel, id: NodeId) {
		self.nodes.push(id);
		if let Some(token) = model.node(id).last_token() {
			self.tokens.push(token.to_owned());
		}
	}
}

impl SentenceModel {
	/// Generates a sentence by random walk.
	///
	/// Only the last token of each visited gram is emitted (the others
	/// overlap with the previous gram), so a random start omits the first
	/// `n - 1` tokens of its gram unless `options.full_start` is set.
	///
	/// # Errors
	/// - `EmptyModel` if no sentence start exists
	/// - `UnknownPrefix` if a custom prefix matches no sentence start
	pub fn build_sentence<R: Rng + ?Sized>(&self, rng: &mut R, options: &WalkOptions) -> Result<String> {
		Ok(self.walk(rng, options)?.tokens.join(" "))
	}

	/// Performs the random walk behind [`SentenceModel::build_sentence`].
	///
	/// # Behavior
	/// - Picks the starting gram (uniformly among root successors, or by
	///   following a custom prefix)
	/// - While the current gram has successors, moves to a uniformly
	///   chosen one and emits its last token
	/// - Stops at a sink, or once `max_tokens` tokens are out
	pub fn walk<R: Rng + ?Sized>(&self, rng: &mut R, options: &WalkOptions) -> Result<Walk> {
		let roots = self.root_successors();
		if roots.is_empty() {
			return Err(GramError::EmptyModel);
		}

		let mut walk = Walk::default();
		let mut curr = match &options.seed {
			StartSeed::Random => {
				let start = roots[rng.random_range(0..roots.len())];
				if options.full_start {
					let tokens = self.node(start).tokens();
					walk.tokens.extend(tokens[..tokens.len() - 1].iter().cloned());
				}
				walk.visit(self, start);
				start
			}
			StartSeed::Custom(prefix) => {
				let start = self.seek(prefix, rng, &mut walk.tokens)?;
				walk.nodes.push(start);
				start
			}
		};

		loop {
			let successors = self.node(curr).successors();
			if successors.is_empty() {
				break;
			}
			if options.max_tokens.is_some_and(|max| walk.tokens.len() >= max) {
				warn!("walk stopped after {} tokens without reaching a sentence end", walk.tokens.len());
				walk.truncated = true;
				break;
			}
			curr = successors[rng.random_range(0..successors.len())];
			walk.visit(self, curr);
		}

		Ok(walk)
	}

	/// Moves to the full gram matching a custom sentence prefix.
	///
	/// Pushes the prefix tokens to `tokens`, plus any tokens chosen at
	/// random to complete a prefix shorter than `n`.
	fn seek<R: Rng + ?Sized>(&self, prefix: &[String], rng: &mut R, tokens: &mut Vec<String>) -> Result<NodeId> {
		let unknown = || GramError::UnknownPrefix(prefix.join(" "));
		let n = self.gram_size();
		let head = prefix.len().min(n);

		let mut curr = self.find_prefix(&prefix[..head]).ok_or_else(unknown)?;
		tokens.extend(prefix[..head].iter().cloned());

		// Short prefix: complete it along the sentence-start chain
		while self.node(curr).tokens().len() < n {
			let successors = self.node(curr).successors();
			if successors.is_empty() {
				return Err(unknown());
			}
			curr = successors[rng.random_range(0..successors.len())];
			if let Some(token) = self.node(curr).last_token() {
				tokens.push(token.to_owned());
			}
		}

		// Long prefix: every extra token must be an observed transition
		for token in &prefix[head..] {
			curr = self
				.node(curr)
				.successors()
				.iter()
				.copied()
				.find(|&next| self.node(next).last_token() == Some(token.as_str()))
				.ok_or_else(unknown)?;
			tokens.push(token.clone());
		}

		Ok(curr)
	}
}
