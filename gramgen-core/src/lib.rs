//! Markov-style n-gram sentence generation.
//!
//! This crate provides:
//! - A lazy whitespace tokenizer over byte streams
//! - Per-corpus n-gram graphs with interned grams (`SentenceModel`)
//! - Random-walk sentence generation with optional start prefixes
//! - A registry of models loaded from a corpus directory, with an optional
//!   on-disk cache
//! - The interactive prompt loop used by the `gramgen` binary
//!
//! All successors of a gram are equiprobable, but repeated transitions are
//! stored once per occurrence, so frequent continuations win more often.

/// Error type shared by the whole crate.
pub mod error;

/// Whitespace tokenizer and sentence-terminator test.
pub mod tokenizer;

/// N-gram graphs and random walks.
pub mod model;

/// On-disk cache of compiled models.
pub mod cache;

/// Models keyed by name, loaded from a directory.
pub mod registry;

/// Prompt loop over any reader / writer pair.
pub mod repl;

/// File and path helpers.
///
/// Not exposed
pub(crate) mod io;

pub use cache::{ModelCache, SourceStamp};
pub use error::{GramError, Result};
pub use model::{SentenceModel, StartSeed, Walk, WalkOptions};
pub use registry::{NameMode, Registry, RegistryConfig};
pub use repl::{Command, Repl, UnknownModelPolicy};
