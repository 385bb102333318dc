//! N-gram sentence models.
//!
//! This module provides:
//! - The graph vertex type and its identifiers (`GramNode`, `NodeId`)
//! - Streaming graph construction over a token stream (`GraphBuilder`)
//! - The per-corpus graph itself (`SentenceModel`)
//! - Random-walk sentence generation (`Walk`, `WalkOptions`)

/// Graph vertices, sentinel ids and gram identifiers.
pub mod gram;

/// Sliding-window state machine turning tokens into a graph.
///
/// Not exposed; use `SentenceModel::from_*`.
mod builder;

/// Per-corpus n-gram graph: construction entry points, read access and
/// on-disk caching.
pub mod sentence_model;

/// Random walk over a `SentenceModel`.
pub mod walk;

/// Walk parameters (start strategy, length bound).
pub mod walk_options;

pub use gram::{GramNode, NodeId, LEAD_IN, ROOT};
pub use sentence_model::SentenceModel;
pub use walk::Walk;
pub use walk_options::{StartSeed, WalkOptions, DEFAULT_MAX_TOKENS};
