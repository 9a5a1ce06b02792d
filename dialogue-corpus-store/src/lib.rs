//! Corpus persistence: round-trip a corpus through an opaque serialized
//! form.
//!
//! The wire format is an implementation detail (currently JSON); the
//! contract is field-for-field fidelity: a loaded corpus is behaviorally
//! identical to the one written. Corpus maps are ordered, so equal corpora
//! serialize to equal bytes.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use dialogue_corpus::Corpus;
use thiserror::Error;

/// Errors from saving or loading a corpus.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corpus format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result wrapper for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Write a corpus to `path`.
pub fn save(corpus: &Corpus, path: impl AsRef<Path>) -> StoreResult<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer(file, corpus)?;
    Ok(())
}

/// Read a corpus back from `path`.
pub fn load(path: impl AsRef<Path>) -> StoreResult<Corpus> {
    let file = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(file)?)
}

/// Serialize a corpus to bytes. Useful for in-memory round-trips.
pub fn to_bytes(corpus: &Corpus) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(corpus)?)
}

/// Deserialize a corpus from bytes produced by [`to_bytes`] or [`save`].
pub fn from_bytes(bytes: &[u8]) -> StoreResult<Corpus> {
    Ok(serde_json::from_slice(bytes)?)
}
