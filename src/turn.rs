//! Turns: contiguous stretches of speech by one speaker.

use serde::{Deserialize, Serialize};

use crate::provenance::Provenance;
use crate::sentence::Sentence;
use crate::speaker::SpeakerId;

/// One speaker's turn within a dialogue: an ordered sequence of sentences.
///
/// Insertion order is dialogue order. A turn may be empty (some formats
/// record turn-taking events without transcribable content).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub speaker: SpeakerId,
    pub sentences: Vec<Sentence>,
    pub provenance: Provenance,
}

impl Turn {
    pub fn new(id: impl Into<String>, speaker: SpeakerId) -> Self {
        Self {
            id: id.into(),
            speaker,
            sentences: Vec::new(),
            provenance: Provenance::native(),
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn push_sentence(&mut self, sentence: Sentence) {
        self.sentences.push(sentence);
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Concatenated transcription of every sentence in the turn.
    pub fn transcription(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.transcription.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
