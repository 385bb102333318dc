/// Strategy used to select where a sentence starts.
///
/// # Variants
/// - `Random`: pick one of the root successors uniformly (one entry per
///   sentence in the corpus, so common openings are favoured).
/// - `Custom(tokens)`: start from a sentence prefix. The first `n` tokens
///   follow the sentence-start chain; extra tokens must follow existing
///   transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartSeed {
	#[default]
	Random,
	Custom(Vec<String>),
}

/// Default upper bound on emitted tokens.
pub const DEFAULT_MAX_TOKENS: usize = 1000;

/// Parameters of a single random walk.
///
/// # Fields
/// - `max_tokens`: stop after this many tokens (`None` = unbounded; a
///   corpus with an inescapable cycle may then never terminate)
/// - `full_start`: on a random start, also emit the first `n - 1` tokens
///   of the starting gram
/// - `seed`: start strategy
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkOptions {
	pub max_tokens: Option<usize>,
	pub full_start: bool,
	pub seed: StartSeed,
}

impl Default for WalkOptions {
	fn default() -> Self {
		Self {
			max_tokens: Some(DEFAULT_MAX_TOKENS),
			full_start: false,
			seed: StartSeed::Random,
		}
	}
}

impl WalkOptions {
	/// Same options, starting from `prefix` instead.
	pub fn with_prefix<I, S>(&self, prefix: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let tokens: Vec<String> = prefix.into_iter().map(Into::into).collect();
		let seed = if tokens.is_empty() { StartSeed::Random } else { StartSeed::Custom(tokens) };
		Self { seed, ..self.clone() }
	}
}
