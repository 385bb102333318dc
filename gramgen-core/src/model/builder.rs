use std::collections::{HashMap, VecDeque};

use log::debug;

use super::gram::{gram_key, GramNode, NodeId, LEAD_IN, ROOT};
use super::sentence_model::SentenceModel;
use crate::tokenizer::is_terminal;

/// Where the builder stands in the current sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	/// Gathering the first `n` tokens of a sentence.
	Start,
	/// Window is full; every token adds one n-gram to the chain.
	Inside,
}

/// Streaming n-gram graph construction.
///
/// Tokens are fed one at a time through a sliding window of size `n`.
///
/// # Behavior
/// - `Start`: tokens are buffered until the window holds `n` of them. A
///   terminal token before that discards the sentence without adding any
///   node. Once full, the prefix chain `LEAD_IN → p1 → … → pn` is interned
///   and `pn` becomes a root successor.
/// - `Inside`: the window shifts by one, the new n-gram is interned and
///   linked from the previous one. A terminal token closes the sentence
///   and returns to `Start`.
///
/// # Notes
/// - The intern table lives only as long as the builder; the finished
///   model is reachable through its sentinels alone.
pub(crate) struct GraphBuilder {
	n: usize,
	nodes: Vec<GramNode>,
	interned: HashMap<String, NodeId>,
	window: VecDeque<String>,
	prev: NodeId,
	phase: Phase,
	sentences: usize,
}

impl GraphBuilder {
	/// Creates a builder for grams of `n` tokens (`n >= 1`, checked by the caller).
	pub(crate) fn new(n: usize) -> Self {
		Self {
			n,
			nodes: vec![GramNode::default(), GramNode::default()],
			interned: HashMap::new(),
			window: VecDeque::with_capacity(n),
			prev: LEAD_IN,
			phase: Phase::Start,
			sentences: 0,
		}
	}

	/// Feeds the next corpus token.
	pub(crate) fn push(&mut self, token: String) {
		let terminal = is_terminal(&token);
		match self.phase {
			Phase::Start => {
				if terminal {
					// Sentence ended before reaching n tokens
					self.reset();
					return;
				}
				self.window.push_back(token);
				if self.window.len() == self.n {
					self.start_sentence();
				}
			}
			Phase::Inside => {
				self.window.pop_front();
				self.window.push_back(token);
				let next = self.intern_window(self.n);
				self.link(self.prev, next);

				if terminal {
					self.reset();
				} else {
					self.prev = next;
				}
			}
		}
	}

	/// Consumes the builder. A trailing sentence that never filled its
	/// window is dropped.
	pub(crate) fn finish(self) -> SentenceModel {
		debug!(
			"built {}-gram graph: {} nodes, {} sentences",
			self.n,
			self.nodes.len(),
			self.sentences
		);
		SentenceModel::from_nodes(self.n, self.nodes)
	}

	/// Interns every prefix of the full window and enters `Inside`.
	fn start_sentence(&mut self) {
		let mut prev = LEAD_IN;
		for k in 1..=self.n {
			let next = self.intern_window(k);
			self.link(prev, next);
			prev = next;
		}
		self.link(ROOT, prev);
		self.prev = prev;
		self.phase = Phase::Inside;
		self.sentences += 1;
	}

	fn reset(&mut self) {
		self.window.clear();
		self.prev = LEAD_IN;
		self.phase = Phase::Start;
	}

	/// Returns the node for the first `len` tokens of the window, creating
	/// it on first sight.
	fn intern_window(&mut self, len: usize) -> NodeId {
		let tokens: Vec<String> = self.window.iter().take(len).cloned().collect();
		let key = gram_key(&tokens);
		if let Some(&id) = self.interned.get(&key) {
			return id;
		}
		let id = self.nodes.len();
		self.nodes.push(GramNode::new(tokens));
		self.interned.insert(key, id);
		id
	}

	fn link(&mut self, from: NodeId, to: NodeId) {
		self.nodes[from].add_successor(to);
	}
}
