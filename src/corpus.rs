//! Corpora: dialogues plus speaker and genre tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialogue::{Dialogue, DialogueId};
use crate::speaker::{Speaker, SpeakerId};

/// Error types for corpus lookups and construction.
///
/// Lookup failures are hard errors by design: downstream alignment
/// statistics depend on provenance correctness, so fabricating a missing
/// speaker or genre silently is never acceptable.
#[derive(Debug, Clone, PartialEq)]
pub enum CorpusError {
    /// A speaker id has no record in the corpus speaker table.
    UnknownSpeaker(SpeakerId),
    /// A dialogue id has no genre entry.
    UnknownDialogue(DialogueId),
    /// Two dialogues were registered under the same id.
    DuplicateDialogue(DialogueId),
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusError::UnknownSpeaker(id) => write!(f, "unknown speaker '{}'", id),
            CorpusError::UnknownDialogue(id) => write!(f, "unknown dialogue '{}'", id),
            CorpusError::DuplicateDialogue(id) => write!(f, "duplicate dialogue id '{}'", id),
        }
    }
}

impl std::error::Error for CorpusError {}

/// Result wrapper for corpus operations.
pub type CorpusResult<T> = Result<T, CorpusError>;

/// A collection of dialogues with speaker and genre tables.
///
/// The maps are `BTreeMap` so serialized corpora are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub id: String,
    /// Opaque root-directory or source descriptor, preserved verbatim.
    pub source: String,
    dialogues: Vec<Dialogue>,
    speakers: BTreeMap<SpeakerId, Speaker>,
    genres: BTreeMap<DialogueId, String>,
    genre_counts: BTreeMap<String, usize>,
}

impl Corpus {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            dialogues: Vec::new(),
            speakers: BTreeMap::new(),
            genres: BTreeMap::new(),
            genre_counts: BTreeMap::new(),
        }
    }

    /// Start an empty corpus derived from this one: fresh id, shared
    /// speaker table, no dialogues. The randomization engine accumulates
    /// synthetic dialogues into the result.
    pub fn derived(&self, suffix: &str) -> Self {
        Self {
            id: format!("{}-{}", self.id, suffix),
            source: self.source.clone(),
            dialogues: Vec::new(),
            speakers: self.speakers.clone(),
            genres: BTreeMap::new(),
            genre_counts: BTreeMap::new(),
        }
    }

    pub fn dialogues(&self) -> &[Dialogue] {
        &self.dialogues
    }

    pub fn dialogue(&self, id: &DialogueId) -> Option<&Dialogue> {
        self.dialogues.iter().find(|d| &d.id == id)
    }

    /// Position of a dialogue in corpus order.
    pub fn dialogue_position(&self, id: &DialogueId) -> Option<usize> {
        self.dialogues.iter().position(|d| &d.id == id)
    }

    pub fn speaker(&self, id: &SpeakerId) -> CorpusResult<&Speaker> {
        self.speakers
            .get(id)
            .ok_or_else(|| CorpusError::UnknownSpeaker(id.clone()))
    }

    pub fn speakers(&self) -> &BTreeMap<SpeakerId, Speaker> {
        &self.speakers
    }

    pub fn genre_of(&self, id: &DialogueId) -> CorpusResult<&str> {
        self.genres
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| CorpusError::UnknownDialogue(id.clone()))
    }

    pub fn genre_counts(&self) -> &BTreeMap<String, usize> {
        &self.genre_counts
    }

    /// Register a speaker record. Later registrations under the same id
    /// replace earlier ones (importers deduplicate upstream).
    pub fn add_speaker(&mut self, speaker: Speaker) {
        self.speakers.insert(speaker.id.clone(), speaker);
    }

    /// Append a dialogue, maintaining the genre tables.
    pub fn push_dialogue(&mut self, dialogue: Dialogue) -> CorpusResult<()> {
        if self.genres.contains_key(&dialogue.id) {
            return Err(CorpusError::DuplicateDialogue(dialogue.id));
        }
        self.genres.insert(dialogue.id.clone(), dialogue.genre.clone());
        *self.genre_counts.entry(dialogue.genre.clone()).or_insert(0) += 1;
        self.dialogues.push(dialogue);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_tables_track_push() {
        let mut corpus = Corpus::new("c", "memory:c");
        corpus.push_dialogue(Dialogue::new("d01", "interview")).unwrap();
        corpus.push_dialogue(Dialogue::new("d02", "interview")).unwrap();
        corpus.push_dialogue(Dialogue::new("d03", "broadcast")).unwrap();

        assert_eq!(corpus.genre_of(&DialogueId::new("d02")).unwrap(), "interview");
        assert_eq!(corpus.genre_counts().get("interview"), Some(&2));
        assert_eq!(corpus.genre_counts().get("broadcast"), Some(&1));
    }

    #[test]
    fn test_duplicate_dialogue_rejected() {
        let mut corpus = Corpus::new("c", "memory:c");
        corpus.push_dialogue(Dialogue::new("d01", "interview")).unwrap();
        let err = corpus.push_dialogue(Dialogue::new("d01", "broadcast")).unwrap_err();
        assert_eq!(err, CorpusError::DuplicateDialogue(DialogueId::new("d01")));
    }

    #[test]
    fn test_unknown_speaker_is_an_error() {
        let corpus = Corpus::new("c", "memory:c");
        let err = corpus.speaker(&SpeakerId::new("missing")).unwrap_err();
        assert_eq!(err, CorpusError::UnknownSpeaker(SpeakerId::new("missing")));
    }

    #[test]
    fn test_derived_shares_speakers_not_dialogues() {
        let mut corpus = Corpus::new("c", "memory:c");
        corpus.add_speaker(Speaker::new("A"));
        corpus.push_dialogue(Dialogue::new("d01", "interview")).unwrap();

        let derived = corpus.derived("r1");
        assert_eq!(derived.id, "c-r1");
        assert!(derived.dialogues().is_empty());
        assert!(derived.speaker(&SpeakerId::new("A")).is_ok());
    }
}
