use serde::{Deserialize, Serialize};

/// Index of a node inside a model's arena.
pub type NodeId = usize;

/// Walk root: its successors are the first full n-gram of every sentence.
pub const ROOT: NodeId = 0;

/// Empty-prefix sentinel heading the chains of sentence-start prefixes
/// (`p1 → p1p2 → … → full n-gram`).
pub const LEAD_IN: NodeId = 1;

/// A vertex of the n-gram graph.
///
/// A `GramNode` carries the tokens of one gram and the list of grams that
/// were observed right after it in the corpus.
///
/// ## Responsibilities:
/// - Hold the gram's tokens (identifier is derived with [`gram_key`])
/// - Record outgoing edges, one entry per observed transition
///
/// ## Invariants
/// - Sentinels (`ROOT`, `LEAD_IN`) carry no tokens
/// - Successors form a multiset: a transition seen `k` times appears `k`
///   times, so uniform picks are frequency weighted
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct GramNode {
	/// Tokens of the gram, oldest first.
	tokens: Vec<String>,
	/// Outgoing edges in insertion order.
	successors: Vec<NodeId>,
}

impl GramNode {
	/// Creates a node with no successors.
	pub(crate) fn new(tokens: Vec<String>) -> Self {
		Self { tokens, successors: Vec::new() }
	}

	/// Records one more observation of the transition toward `next`.
	pub(crate) fn add_successor(&mut self, next: NodeId) {
		self.successors.push(next);
	}

	/// Tokens of this gram (empty for sentinels).
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Last token of the gram, the one emitted when a walk visits it.
	pub fn last_token(&self) -> Option<&str> {
		self.tokens.last().map(String::as_str)
	}

	/// Outgoing edges, duplicates included.
	pub fn successors(&self) -> &[NodeId] {
		&self.successors
	}

	/// A sink has no successors; every walk ends on one.
	pub fn is_sink(&self) -> bool {
		self.successors.is_empty()
	}

	/// Identifier of this gram.
	pub fn key(&self) -> String {
		gram_key(&self.tokens)
	}
}

/// Builds a gram identifier: every token followed by a single space.
///
/// Example: `["My", "many"]` → `"My many "`
pub fn gram_key<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut key = String::with_capacity(tokens.iter().map(|t| t.as_ref().len() + 1).sum());
	for token in tokens {
		key.push_str(token.as_ref());
		key.push(' ');
	}
	key
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_has_trailing_space() {
		assert_eq!(gram_key(&["My", "many"]), "My many ");
		assert_eq!(gram_key::<&str>(&[]), "");
	}

	#[test]
	fn successors_keep_duplicates() {
		let mut node = GramNode::new(vec!["a".to_owned()]);
		assert!(node.is_sink());
		node.add_successor(4);
		node.add_successor(4);
		node.add_successor(2);
		assert_eq!(node.successors(), &[4, 4, 2]);
		assert_eq!(node.last_token(), Some("a"));
	}
}
