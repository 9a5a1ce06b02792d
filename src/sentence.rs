//! Sentences: transcribed units of speech within a turn.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::provenance::Provenance;

/// A transcribed sentence.
///
/// Belongs to exactly one turn. Tokens and syntactic annotation are
/// optional; importers that run a tokenizer or parser populate them, plain
/// transcript importers leave them unset. Timing is optional for the same
/// reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: String,
    /// Position of this sentence within its dialogue.
    pub seq: usize,
    pub transcription: String,
    pub tokens: Option<Vec<String>>,
    /// Serialized syntactic annotation, opaque to this crate.
    pub syntax: Option<String>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub provenance: Provenance,
}

impl Sentence {
    pub fn new(id: impl Into<String>, seq: usize, transcription: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seq,
            transcription: transcription.into(),
            tokens: None,
            syntax: None,
            start_time: None,
            end_time: None,
            provenance: Provenance::native(),
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<String>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Attach timing. Non-finite values are treated as unset, so importers
    /// can pass through whatever their source format recorded.
    pub fn with_timing(mut self, start: f64, end: f64) -> Self {
        self.start_time = finite(start);
        self.end_time = finite(end);
        self
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    /// Word-segment the transcription. Used as a fallback when no importer
    /// token list is present.
    pub fn tokenize_transcription(&self) -> Vec<String> {
        self.transcription
            .unicode_words()
            .map(|w| w.to_string())
            .collect()
    }

    /// Importer tokens when present, otherwise segmented transcription.
    pub fn tokens_or_segmented(&self) -> Vec<String> {
        match &self.tokens {
            Some(tokens) => tokens.clone(),
            None => self.tokenize_transcription(),
        }
    }
}

fn finite(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}
