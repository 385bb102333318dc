use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::env;

/// Opens a corpus file for buffered, token-by-token reading.
///
/// The returned reader owns the file handle; dropping it closes the file.
pub(crate) fn open_corpus<P: AsRef<Path>>(filename: P) -> io::Result<BufReader<File>> {
	Ok(BufReader::new(File::open(filename)?))
}

/// Builds the cache path of a model inside `cache_dir`.
///
/// Example:
/// `cache/` + `"hugo"` → `cache/hugo.bin`
pub(crate) fn build_cache_path<P: AsRef<Path>>(cache_dir: P, model_name: &str) -> PathBuf {
	cache_dir.as_ref().join(format!("{model_name}.bin"))
}

/// Extracts the base filename without its last extension.
///
/// Examples:
/// - `"./data/hugo.txt"` → `"hugo"`
/// - `"archive.tar.gz"` → `"archive.tar"`
/// - `"README"` → `"README"`
pub(crate) fn stem_name<P: AsRef<Path>>(input_path: P) -> Option<String> {
	let stem = input_path.as_ref().file_stem()?;
	Some(stem.to_string_lossy().to_string())
}

/// Drops exactly the last four characters of the filename.
///
/// Meant for `name.txt`-style corpora; names of four characters or fewer
/// have nothing left and yield `None`.
pub(crate) fn legacy_name<P: AsRef<Path>>(input_path: P) -> Option<String> {
	let name = input_path.as_ref().file_name()?.to_string_lossy().to_string();
	let count = name.chars().count();
	if count <= 4 {
		return None;
	}
	Some(name.chars().take(count - 4).collect())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder(input: &Path) -> PathBuf {
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

/// Lists all regular files directly inside a directory, sorted by name.
///
/// Subdirectories and other non-file entries are ignored.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(dir)? {
		let path = entry?.path();
		if path.is_file() {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}
