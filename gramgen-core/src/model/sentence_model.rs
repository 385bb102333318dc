use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::builder::GraphBuilder;
use super::gram::{GramNode, NodeId, LEAD_IN, ROOT};
use crate::error::{GramError, Result};
use crate::io::open_corpus;
use crate::tokenizer::Tokens;

/// An n-gram graph built from a single corpus.
///
/// Nodes live in an arena and edges are indices into it, so cycles
/// (a gram following itself) need no special teardown.
///
/// # Responsibilities
/// - Build the graph from a token stream (see `GraphBuilder`)
/// - Expose read-only access to nodes, root and prefix chains
/// - Serialize with `serde` (see `cache::ModelCache`)
///
/// # Invariants
/// - `nodes[ROOT]` and `nodes[LEAD_IN]` are token-less sentinels
/// - Every node reachable from `ROOT` (root excepted) carries exactly `n` tokens
/// - For every edge `A → B` with `A != ROOT`, the last `n - 1` tokens of `A`
///   are the first `n - 1` tokens of `B`
/// - Read-only once built
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SentenceModel {
	/// Number of tokens per gram (`n >= 1`).
	n: usize,
	/// Arena; indices `ROOT` and `LEAD_IN` are reserved.
	nodes: Vec<GramNode>,
}

impl SentenceModel {
	/// Builds a model from any token stream.
	///
	/// # Errors
	/// - `InvalidGramSize` if `n == 0`
	/// - `Io` if the stream yields an error (construction stops there)
	pub fn from_tokens<I>(tokens: I, n: usize) -> Result<Self>
	where
		I: IntoIterator<Item = std::io::Result<String>>,
	{
		if n == 0 {
			return Err(GramError::InvalidGramSize(n));
		}
		let mut builder = GraphBuilder::new(n);
		for token in tokens {
			builder.push(token?);
		}
		Ok(builder.finish())
	}

	/// Builds a model from a buffered byte stream, tokenized on whitespace.
	pub fn from_reader<R: BufRead>(reader: R, n: usize) -> Result<Self> {
		Self::from_tokens(Tokens::new(reader), n)
	}

	/// Builds a model from a corpus file.
	///
	/// The file is closed before returning, on success and on error alike.
	///
	/// # Errors
	/// - `Open` if the file cannot be opened
	/// - `Io` if reading fails midway
	pub fn from_file<P: AsRef<Path>>(path: P, n: usize) -> Result<Self> {
		let path = path.as_ref();
		let reader = open_corpus(path).map_err(|source| GramError::Open { path: path.to_path_buf(), source })?;
		Self::from_reader(reader, n)
	}

	pub(crate) fn from_nodes(n: usize, nodes: Vec<GramNode>) -> Self {
		Self { n, nodes }
	}

	/// `false` if the arena is malformed: missing sentinels, zero gram
	/// size, edges pointing outside the arena, or sentence starts that are
	/// not full grams.
	pub(crate) fn is_consistent(&self) -> bool {
		if self.n == 0 || self.nodes.len() <= LEAD_IN {
			return false;
		}
		let in_bounds = self.nodes.iter().flat_map(GramNode::successors).all(|&id| id < self.nodes.len());
		in_bounds && self.root_successors().iter().all(|&id| self.nodes[id].tokens().len() == self.n)
	}

	/// Number of tokens per gram.
	pub fn gram_size(&self) -> usize {
		self.n
	}

	/// Returns a node by id.
	///
	/// # Panics
	/// Panics if `id` does not belong to this model.
	pub fn node(&self, id: NodeId) -> &GramNode {
		&self.nodes[id]
	}

	/// First full n-gram of every sentence, one entry per sentence.
	pub fn root_successors(&self) -> &[NodeId] {
		self.nodes[ROOT].successors()
	}

	/// One-token prefixes of every sentence, one entry per sentence.
	pub fn lead_in_successors(&self) -> &[NodeId] {
		self.nodes[LEAD_IN].successors()
	}

	/// Number of complete sentences seen during construction.
	pub fn sentence_starts(&self) -> usize {
		self.root_successors().len()
	}

	/// Number of grams (sentinels excluded), prefixes included.
	pub fn len(&self) -> usize {
		self.nodes.len() - 2
	}

	/// `true` when no sentence was long enough to produce a gram.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Finds the full n-gram with exactly these tokens.
	pub fn find_gram<S: AsRef<str>>(&self, tokens: &[S]) -> Option<NodeId> {
		if tokens.len() != self.n {
			return None;
		}
		(LEAD_IN + 1..self.nodes.len()).find(|&id| same_tokens(self.nodes[id].tokens(), tokens))
	}

	/// Follows the sentence-start chain along `tokens` (at most `n` of them).
	///
	/// Returns the node for that prefix, or `None` if no sentence starts
	/// with these tokens. An empty prefix yields `LEAD_IN`.
	pub fn find_prefix<S: AsRef<str>>(&self, tokens: &[S]) -> Option<NodeId> {
		if tokens.len() > self.n {
			return None;
		}
		let mut curr = LEAD_IN;
		for k in 1..=tokens.len() {
			curr = self.nodes[curr]
				.successors()
				.iter()
				.copied()
				.find(|&next| same_tokens(self.nodes[next].tokens(), &tokens[..k]))?;
		}
		Some(curr)
	}

	/// Every node reachable from `ROOT`, root excluded, each listed once in
	/// depth-first discovery order.
	pub fn reachable(&self) -> Vec<NodeId> {
		let mut seen = vec![false; self.nodes.len()];
		let mut order = Vec::new();
		let mut stack: Vec<NodeId> = self.root_successors().iter().rev().copied().collect();
		while let Some(id) = stack.pop() {
			if std::mem::replace(&mut seen[id], true) {
				continue;
			}
			order.push(id);
			stack.extend(self.nodes[id].successors().iter().rev().copied().filter(|&next| !seen[next]));
		}
		order
	}
}

fn same_tokens<S: AsRef<str>>(tokens: &[String], expected: &[S]) -> bool {
	tokens.len() == expected.len() && tokens.iter().zip(expected).all(|(a, b)| a == b.as_ref())
}
