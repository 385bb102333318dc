use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;
use std::time::{Duration, SystemTime};

use gramgen_core::{GramError, ModelCache, NameMode, Registry, RegistryConfig, SentenceModel, WalkOptions};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::tempdir;

const DOGS: &str = "My many dogs have many fleas I think.\nMy many fleas have many dogs I think.\n";

fn write(dir: &Path, name: &str, text: &str) {
	fs::write(dir.join(name), text).expect("failed to write corpus");
}

fn first_sentence(registry: &Registry, name: &str) -> String {
	let options = WalkOptions { full_start: true, ..WalkOptions::default() };
	registry
		.require(name)
		.unwrap()
		.build_sentence(&mut StdRng::seed_from_u64(1), &options)
		.unwrap()
}

#[test]
fn loads_one_model_per_file() {
	let dir = tempdir().unwrap();
	write(dir.path(), "dogs.txt", DOGS);
	write(dir.path(), "cats.txt", "the cat sat on the mat.");
	fs::create_dir(dir.path().join("nested")).unwrap();

	let registry = Registry::load(dir.path(), &RegistryConfig::new(2)).unwrap();
	assert_eq!(registry.model_names(), vec!["cats", "dogs"]);

	let sentence = registry
		.require("cats")
		.unwrap()
		.build_sentence(&mut StdRng::seed_from_u64(1), &WalkOptions::default())
		.unwrap();
	assert_eq!(sentence, "cat sat on the mat.");
}

#[test]
fn legacy_names_strip_four_chars() {
	let dir = tempdir().unwrap();
	write(dir.path(), "hugo.text", DOGS);
	write(dir.path(), "abc", DOGS);

	let config = RegistryConfig { name_mode: NameMode::Legacy, ..RegistryConfig::new(2) };
	let registry = Registry::load(dir.path(), &config).unwrap();
	assert_eq!(registry.model_names(), vec!["hugo."]);
}

#[test]
fn duplicate_names_are_rejected() {
	let dir = tempdir().unwrap();
	write(dir.path(), "hugo.txt", DOGS);
	write(dir.path(), "hugo.md", DOGS);

	let err = Registry::load(dir.path(), &RegistryConfig::new(2)).unwrap_err();
	assert!(matches!(err, GramError::DuplicateModel(name) if name == "hugo"));
}

#[test]
fn missing_directory_is_a_usage_error() {
	let dir = tempdir().unwrap();
	let err = Registry::load(dir.path().join("absent"), &RegistryConfig::new(2)).unwrap_err();
	assert!(matches!(err, GramError::Directory { .. }));
}

#[test]
fn short_corpus_registers_empty_model() {
	let dir = tempdir().unwrap();
	write(dir.path(), "tiny.txt", "Hi. Bye.");

	let registry = Registry::load(dir.path(), &RegistryConfig::new(3)).unwrap();
	let model = registry.require("tiny").unwrap();
	assert!(model.is_empty());
	let err = model.build_sentence(&mut StdRng::seed_from_u64(1), &WalkOptions::default()).unwrap_err();
	assert!(matches!(err, GramError::EmptyModel));
}

#[test]
fn cache_is_written_and_reused() {
	let corpus = tempdir().unwrap();
	let cache = tempdir().unwrap();
	write(corpus.path(), "dogs.txt", DOGS);

	let config = RegistryConfig { cache_dir: Some(cache.path().join("models")), ..RegistryConfig::new(2) };
	Registry::load(corpus.path(), &config).unwrap();
	assert!(cache.path().join("models").join("dogs.bin").is_file());

	// Replace the entry with a model the corpus could never produce
	let planted = SentenceModel::from_reader(Cursor::new("cached cats purr.".as_bytes()), 2).unwrap();
	let models = ModelCache::open(cache.path().join("models")).unwrap();
	models.store("dogs", corpus.path().join("dogs.txt"), &planted).unwrap();

	let registry = Registry::load(corpus.path(), &config).unwrap();
	assert_eq!(first_sentence(&registry, "dogs"), "cached cats purr.");
	assert_eq!(registry.require("dogs").unwrap().sentence_starts(), 1);
}

#[test]
fn shared_cache_keeps_same_named_corpora_apart() {
	let first = tempdir().unwrap();
	let second = tempdir().unwrap();
	let cache = tempdir().unwrap();
	write(first.path(), "hugo.txt", "red yellow.");
	write(second.path(), "hugo.txt", "blue green.");

	// Older than the entry the first directory is about to write
	let older = SystemTime::now() - Duration::from_secs(3600);
	File::options().write(true).open(second.path().join("hugo.txt")).unwrap().set_modified(older).unwrap();

	let config = RegistryConfig { cache_dir: Some(cache.path().to_path_buf()), ..RegistryConfig::new(2) };
	let a = Registry::load(first.path(), &config).unwrap();
	let b = Registry::load(second.path(), &config).unwrap();
	assert_eq!(first_sentence(&a, "hugo"), "red yellow.");
	assert_eq!(first_sentence(&b, "hugo"), "blue green.");

	// And back: the entry now belongs to the second directory
	let a = Registry::load(first.path(), &config).unwrap();
	assert_eq!(first_sentence(&a, "hugo"), "red yellow.");
}

#[test]
fn edited_corpus_invalidates_cache() {
	let corpus = tempdir().unwrap();
	let cache = tempdir().unwrap();
	write(corpus.path(), "dogs.txt", "old text.");

	let config = RegistryConfig { cache_dir: Some(cache.path().to_path_buf()), ..RegistryConfig::new(2) };
	Registry::load(corpus.path(), &config).unwrap();
	write(corpus.path(), "dogs.txt", "brand new text.");

	let registry = Registry::load(corpus.path(), &config).unwrap();
	assert_eq!(first_sentence(&registry, "dogs"), "brand new text.");
}

#[test]
fn unusable_cache_dir_falls_back_to_building() {
	let corpus = tempdir().unwrap();
	let scratch = tempdir().unwrap();
	write(corpus.path(), "dogs.txt", DOGS);
	let blocker = scratch.path().join("cache");
	fs::write(&blocker, "not a directory").unwrap();

	let config = RegistryConfig { cache_dir: Some(blocker.clone()), ..RegistryConfig::new(2) };
	let registry = Registry::load(corpus.path(), &config).unwrap();
	assert_eq!(registry.model_names(), vec!["dogs"]);
	assert_eq!(registry.require("dogs").unwrap().sentence_starts(), 2);
	assert!(blocker.is_file());
}

#[test]
fn cache_with_other_gram_size_is_rebuilt() {
	let corpus = tempdir().unwrap();
	let cache = tempdir().unwrap();
	write(corpus.path(), "dogs.txt", DOGS);

	let bigrams = RegistryConfig { cache_dir: Some(cache.path().to_path_buf()), ..RegistryConfig::new(2) };
	Registry::load(corpus.path(), &bigrams).unwrap();

	let trigrams = RegistryConfig { gram_size: 3, ..bigrams };
	let registry = Registry::load(corpus.path(), &trigrams).unwrap();
	assert_eq!(registry.require("dogs").unwrap().gram_size(), 3);
}

#[test]
fn corrupt_cache_is_ignored() {
	let corpus = tempdir().unwrap();
	let cache = tempdir().unwrap();
	write(corpus.path(), "dogs.txt", DOGS);
	write(cache.path(), "dogs.bin", "\u{ff}garbage");

	let config = RegistryConfig { cache_dir: Some(cache.path().to_path_buf()), ..RegistryConfig::new(2) };
	let registry = Registry::load(corpus.path(), &config).unwrap();
	assert_eq!(registry.require("dogs").unwrap().sentence_starts(), 2);
}
