use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{GramError, Result};
use crate::io::build_cache_path;
use crate::model::SentenceModel;

/// Identity of the corpus file a cached model was built from.
///
/// A cached model is only reused when the stamp of the current corpus
/// equals the stored one, so a cache directory shared between corpus
/// directories never serves a same-named model of another corpus.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SourceStamp {
	/// Canonical path of the corpus.
	path: PathBuf,
	/// Size in bytes.
	len: u64,
	/// Last modification time, when the platform reports one.
	modified: Option<SystemTime>,
}

impl SourceStamp {
	/// Reads the stamp of the file at `path`.
	pub fn of<P: AsRef<Path>>(path: P) -> io::Result<Self> {
		let path = fs::canonicalize(path)?;
		let metadata = fs::metadata(&path)?;
		Ok(Self {
			len: metadata.len(),
			modified: metadata.modified().ok(),
			path,
		})
	}
}

/// On-disk layout of a cache file.
#[derive(Deserialize)]
struct CacheEntry {
	source: SourceStamp,
	model: SentenceModel,
}

/// Borrowed twin of [`CacheEntry`], same field order, used when writing.
#[derive(Serialize)]
struct CacheEntryRef<'a> {
	source: &'a SourceStamp,
	model: &'a SentenceModel,
}

/// Directory of compiled models, one `<name>.bin` file per model.
///
/// # Responsibilities
/// - Serialize models together with the stamp of their corpus (`postcard`)
/// - Hand a cached model back only if corpus stamp and gram size match
///
/// # Notes
/// - Every failure on the read side is a cache miss, never an error.
#[derive(Clone, Debug)]
pub struct ModelCache {
	dir: PathBuf,
}

impl ModelCache {
	/// Opens (creating if needed) the cache directory.
	///
	/// # Errors
	/// `Io` if the directory cannot be created.
	pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
		let dir = dir.as_ref().to_path_buf();
		fs::create_dir_all(&dir)?;
		Ok(Self { dir })
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	/// Returns the cached model `name` if it was built from `source` as it
	/// is now, with grams of `gram_size` tokens.
	pub fn load<P: AsRef<Path>>(&self, name: &str, source: P, gram_size: usize) -> Option<SentenceModel> {
		let cache_path = build_cache_path(&self.dir, name);
		if !cache_path.is_file() {
			return None;
		}

		let entry = match Self::read_entry(&cache_path) {
			Ok(entry) => entry,
			Err(e) => {
				warn!("Ignoring cache {}: {e}", cache_path.display());
				return None;
			}
		};

		match SourceStamp::of(source) {
			Ok(stamp) if stamp == entry.source => (),
			Ok(_) => {
				info!("Cached model {name} was built from another corpus version, rebuilding");
				return None;
			}
			Err(e) => {
				warn!("Cannot stat corpus of {name}: {e}");
				return None;
			}
		}

		if entry.model.gram_size() != gram_size {
			info!("Cached model {name} has another gram size, rebuilding");
			return None;
		}

		debug!("Loaded {name} from {}", cache_path.display());
		Some(entry.model)
	}

	/// Writes `model`, built from `source`, as the cache entry of `name`.
	pub fn store<P: AsRef<Path>>(&self, name: &str, source: P, model: &SentenceModel) -> Result<()> {
		let source = SourceStamp::of(source)?;
		let bytes = postcard::to_stdvec(&CacheEntryRef { source: &source, model })?;
		fs::write(build_cache_path(&self.dir, name), bytes)?;
		Ok(())
	}

	fn read_entry(path: &Path) -> Result<CacheEntry> {
		let bytes = fs::read(path)?;
		let entry: CacheEntry = postcard::from_bytes(&bytes)?;
		if !entry.model.is_consistent() {
			return Err(GramError::Cache(postcard::Error::DeserializeBadEncoding));
		}
		Ok(entry)
	}
}
