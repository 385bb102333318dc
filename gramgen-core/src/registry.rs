use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::cache::ModelCache;
use crate::error::{GramError, Result};
use crate::io;
use crate::model::SentenceModel;

/// How a model name is derived from a corpus file name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameMode {
	/// Strip the last extension (`hugo.txt` → `hugo`, `README` → `README`).
	#[default]
	Extension,
	/// Strip exactly the last four characters (`hugo.txt` → `hugo`).
	/// Files with four characters or fewer are skipped.
	Legacy,
}

impl NameMode {
	fn derive(self, path: &Path) -> Option<String> {
		match self {
			NameMode::Extension => io::stem_name(path),
			NameMode::Legacy => io::legacy_name(path),
		}
	}
}

/// Settings used when loading a corpus directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryConfig {
	/// Tokens per gram (`>= 1`).
	pub gram_size: usize,
	/// File name → model name rule.
	pub name_mode: NameMode,
	/// Where compiled models are cached; `None` disables caching.
	pub cache_dir: Option<PathBuf>,
}

impl RegistryConfig {
	/// Config for `gram_size` with default naming and no cache.
	pub fn new(gram_size: usize) -> Self {
		Self { gram_size, name_mode: NameMode::default(), cache_dir: None }
	}
}

/// Named collection of sentence models, one per corpus file.
///
/// # Responsibilities
/// - Enumerate a corpus directory and build one `SentenceModel` per file
/// - Reuse cached models when a cache directory is configured
/// - Look models up by name
///
/// # Notes
/// - Populated once, read-only afterwards.
#[derive(Debug, Default)]
pub struct Registry {
	models: HashMap<String, SentenceModel>,
}

impl Registry {
	/// Loads every regular file of `dir` as a corpus.
	///
	/// # Behavior
	/// - Files are processed in file-name order; subdirectories are ignored.
	/// - The model name comes from `config.name_mode`.
	/// - A file that cannot be opened or read is skipped with a warning.
	/// - A corpus without any complete sentence is still registered, but
	///   generating from it fails with `EmptyModel`.
	/// - If the cache directory cannot be created, the models are built
	///   without cache.
	///
	/// # Errors
	/// - `InvalidGramSize` if `config.gram_size == 0`
	/// - `Directory` if `dir` cannot be listed
	/// - `DuplicateModel` if two files map to the same name
	pub fn load<P: AsRef<Path>>(dir: P, config: &RegistryConfig) -> Result<Self> {
		if config.gram_size == 0 {
			return Err(GramError::InvalidGramSize(config.gram_size));
		}

		let folder = io::normalize_folder(dir.as_ref());
		let files = io::list_files(&folder).map_err(|source| GramError::Directory { path: folder.clone(), source })?;

		let cache = config.cache_dir.as_ref().and_then(|dir| match ModelCache::open(dir) {
			Ok(cache) => Some(cache),
			Err(e) => {
				warn!("Cache disabled, cannot use {}: {e}", dir.display());
				None
			}
		});

		let mut registry = Self::default();
		for file in files {
			let Some(name) = config.name_mode.derive(&file) else {
				warn!("Skipping {}: {}", file.display(), GramError::InvalidName(file.display().to_string()));
				continue;
			};
			if registry.contains(&name) {
				return Err(GramError::DuplicateModel(name));
			}

			info!("Constructing model {name}");
			let model = match Self::build_model(&file, &name, config.gram_size, cache.as_ref()) {
				Ok(model) => model,
				Err(e) => {
					warn!("Skipping {}: {e}", file.display());
					continue;
				}
			};

			if model.sentence_starts() == 0 {
				warn!("Model {name} has no complete sentence of {} tokens", config.gram_size);
			} else {
				info!("Model {name}: {} grams, {} sentences", model.len(), model.sentence_starts());
			}
			registry.insert(name, model)?;
		}

		Ok(registry)
	}

	/// Builds a model from `file`, going through the cache when enabled.
	fn build_model(file: &Path, name: &str, gram_size: usize, cache: Option<&ModelCache>) -> Result<SentenceModel> {
		let Some(cache) = cache else {
			return SentenceModel::from_file(file, gram_size);
		};

		if let Some(model) = cache.load(name, file, gram_size) {
			return Ok(model);
		}

		let model = SentenceModel::from_file(file, gram_size)?;
		if let Err(e) = cache.store(name, file, &model) {
			warn!("Cannot write cache entry {name} in {}: {e}", cache.dir().display());
		}
		Ok(model)
	}

	/// Registers a model under `name`.
	///
	/// # Errors
	/// Returns `DuplicateModel` if the name is taken.
	pub fn insert(&mut self, name: String, model: SentenceModel) -> Result<()> {
		if self.models.contains_key(&name) {
			return Err(GramError::DuplicateModel(name));
		}
		self.models.insert(name, model);
		Ok(())
	}

	/// Returns the model registered under `name`.
	pub fn get(&self, name: &str) -> Option<&SentenceModel> {
		self.models.get(name)
	}

	/// Returns the model registered under `name`, or `UnknownModel`.
	pub fn require(&self, name: &str) -> Result<&SentenceModel> {
		self.get(name).ok_or_else(|| GramError::UnknownModel(name.to_owned()))
	}

	pub fn contains(&self, name: &str) -> bool {
		self.models.contains_key(name)
	}

	/// Registered names, sorted.
	pub fn model_names(&self) -> Vec<String> {
		let mut names: Vec<String> = self.models.keys().cloned().collect();
		names.sort();
		names
	}

	pub fn len(&self) -> usize {
		self.models.len()
	}

	pub fn is_empty(&self) -> bool {
		self.models.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn model(text: &str) -> SentenceModel {
		SentenceModel::from_reader(Cursor::new(text.as_bytes()), 2).unwrap()
	}

	#[test]
	fn insert_rejects_duplicates() {
		let mut registry = Registry::default();
		registry.insert("hugo".to_owned(), model("a b c.")).unwrap();
		let err = registry.insert("hugo".to_owned(), model("d e f.")).unwrap_err();
		assert!(matches!(err, GramError::DuplicateModel(name) if name == "hugo"));
		assert_eq!(registry.len(), 1);
	}

	#[test]
	fn names_are_sorted() {
		let mut registry = Registry::default();
		registry.insert("kafka".to_owned(), model("a b c.")).unwrap();
		registry.insert("austen".to_owned(), model("a b c.")).unwrap();
		assert_eq!(registry.model_names(), vec!["austen", "kafka"]);
	}

	#[test]
	fn require_reports_unknown() {
		let registry = Registry::default();
		assert!(registry.is_empty());
		assert!(matches!(registry.require("nope"), Err(GramError::UnknownModel(_))));
	}

	#[test]
	fn zero_gram_size_is_rejected() {
		let err = Registry::load(".", &RegistryConfig::new(0)).unwrap_err();
		assert!(matches!(err, GramError::InvalidGramSize(0)));
	}

	#[test]
	fn name_modes() {
		assert_eq!(NameMode::Extension.derive(Path::new("d/hugo.txt")).as_deref(), Some("hugo"));
		assert_eq!(NameMode::Legacy.derive(Path::new("d/hugo.text")).as_deref(), Some("hugo."));
		assert_eq!(NameMode::Legacy.derive(Path::new("d/abc")), None);
	}
}
