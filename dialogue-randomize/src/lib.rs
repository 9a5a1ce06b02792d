//! Null-model corpus randomization for linguistic-alignment research.
//!
//! Given a real annotated dialogue corpus, this crate synthesizes control
//! corpora by resampling turns, sentences or whole-dialogue speaker
//! assignments under one of nine strategies, while preserving the
//! structural invariants (turn and sentence counts, per-dialogue speaker
//! roles, genre) needed for valid statistical comparison against the
//! original. Every piece of resampled content carries provenance
//! back-references to its donor.
//!
//! ## Core Types
//!
//! - [`Randomizer`] - The engine: one seeded random source, one batch pass
//! - [`RandomizeConfig`] - Strategy, padding, constraints and seed
//! - [`RandomizationStrategy`] / [`StrategyTraits`] - The nine strategies
//!   and their declared capability flags
//! - [`PaddingPolicy`] - What happens when a donor runs out of material
//!
//! ## Example
//!
//! ```
//! use dialogue_corpus::{CorpusBuilder, DialogueBuilder, Speaker};
//! use dialogue_randomize::{RandomizationStrategy, RandomizeConfig, Randomizer};
//!
//! let mut builder = CorpusBuilder::new("demo", "memory:demo");
//! for id in &["A", "B", "C", "D"] {
//!     builder.speaker(Speaker::new(*id));
//! }
//! let mut d01 = DialogueBuilder::new("d01", "conversation");
//! d01.turn("A", &["One."]).turn("B", &["Two."]);
//! builder.dialogue(d01).unwrap();
//! let mut d02 = DialogueBuilder::new("d02", "conversation");
//! d02.turn("C", &["Three."]).turn("D", &["Four."]);
//! builder.dialogue(d02).unwrap();
//! let corpus = builder.finish();
//!
//! let config = RandomizeConfig::new(RandomizationStrategy::OtherSpeakersFromOtherDialogue)
//!     .with_seed(1);
//! let mut randomizer = Randomizer::new(config).unwrap();
//! let synthetic = randomizer.randomize(&corpus).unwrap();
//! assert_eq!(synthetic.dialogues().len(), 2);
//! ```

mod config;
mod cursor;
mod engine;
mod error;
mod sampling;
mod shuffle;
mod strategy;
mod transplant;

pub use config::RandomizeConfig;
pub use engine::Randomizer;
pub use error::{RandomizeError, RandomizeResult};
pub use strategy::{LengthUnit, PaddingPolicy, RandomizationStrategy, StrategyTraits};
