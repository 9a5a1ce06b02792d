//! Dialogue corpus data model for linguistic-alignment research.
//!
//! This crate holds the in-memory graph that importers populate and the
//! randomization engine (`dialogue-randomize`) reads and writes: speakers,
//! sentences, turns, dialogues and corpora, together with the provenance
//! back-references that record where resampled content came from.
//!
//! ## Core Types
//!
//! - [`Corpus`] - A collection of dialogues with speaker and genre tables
//! - [`Dialogue`] / [`Turn`] / [`Sentence`] - The conversation structure
//! - [`Speaker`] - Speaker records with the "probably the same person" oracle
//! - [`Provenance`] - Back-references attached to resampled content
//! - [`CorpusBuilder`] - The read-only contract importers build corpora through
//!
//! ## Example
//!
//! ```
//! use dialogue_corpus::{CorpusBuilder, DialogueBuilder, Speaker};
//!
//! let mut builder = CorpusBuilder::new("demo", "memory:demo");
//! builder.speaker(Speaker::new("A"));
//! builder.speaker(Speaker::new("B"));
//!
//! let mut dialogue = DialogueBuilder::new("d01", "conversation");
//! dialogue.turn("A", &["Hello there."]);
//! dialogue.turn("B", &["Hi.", "How are you?"]);
//! builder.dialogue(dialogue).unwrap();
//!
//! let corpus = builder.finish();
//! assert_eq!(corpus.dialogues().len(), 1);
//! assert_eq!(corpus.dialogues()[0].sentence_count(), 3);
//! ```

mod builder;
mod corpus;
mod dialogue;
mod display;
mod provenance;
mod sentence;
mod speaker;
mod turn;

pub use builder::{CorpusBuilder, DialogueBuilder};
pub use corpus::{Corpus, CorpusError, CorpusResult};
pub use dialogue::{Dialogue, DialogueId};
pub use display::{render_corpus, render_dialogue};
pub use provenance::Provenance;
pub use sentence::Sentence;
pub use speaker::{Speaker, SpeakerId};
pub use turn::Turn;
