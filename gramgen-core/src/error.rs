//! Error types for gramgen-core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for model construction, registry loading and
/// sentence generation.
#[derive(Debug, Error)]
pub enum GramError {
	/// Gram size must be at least one token.
	#[error("gram size must be >= 1, got {0}")]
	InvalidGramSize(usize),

	/// The corpus directory could not be read.
	#[error("cannot read corpus directory {}: {source}", .path.display())]
	Directory {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// A corpus file could not be opened.
	#[error("cannot open corpus {}: {source}", .path.display())]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// I/O error wrapper.
	#[error("io error: {0}")]
	Io(#[from] io::Error),

	/// The model has no sentence start to walk from.
	#[error("model has no sentence starts (corpus too short or no complete sentence)")]
	EmptyModel,

	/// No model is registered under this name.
	#[error("unknown model '{0}'")]
	UnknownModel(String),

	/// A custom start prefix does not begin any sentence in the corpus.
	#[error("no sentence in the corpus starts with '{0}'")]
	UnknownPrefix(String),

	/// Two corpus files map to the same model name.
	#[error("model '{0}' already loaded")]
	DuplicateModel(String),

	/// A model name could not be derived from a file name.
	#[error("cannot derive a model name from '{0}'")]
	InvalidName(String),

	/// Cached model encoding/decoding errors.
	#[error("model cache error: {0}")]
	Cache(#[from] postcard::Error),
}

/// Result type for gramgen operations.
pub type Result<T> = std::result::Result<T, GramError>;
