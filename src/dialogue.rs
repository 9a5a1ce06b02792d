//! Dialogues: ordered turns with a genre tag.

use serde::{Deserialize, Serialize};

use crate::sentence::Sentence;
use crate::speaker::SpeakerId;
use crate::turn::Turn;

/// Stable identifier for a dialogue within a corpus.
///
/// Source dialogue ids come from the importer. Ids of synthetic dialogues
/// are engine-generated as `{source id}-r{suffix}` so a synthetic dialogue
/// can be matched back to its source by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DialogueId(pub String);

impl DialogueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for DialogueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DialogueId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DialogueId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DialogueId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// An ordered sequence of turns with a genre tag.
///
/// Invariant: every turn's speaker is a member of the dialogue's speaker
/// set (enforced by `CorpusBuilder` on import and by the engine's
/// structural verification on synthesis).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    pub id: DialogueId,
    pub genre: String,
    pub turns: Vec<Turn>,
}

impl Dialogue {
    pub fn new(id: impl Into<DialogueId>, genre: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            genre: genre.into(),
            turns: Vec::new(),
        }
    }

    pub fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.turns.iter().map(Turn::sentence_count).sum()
    }

    /// Distinct speakers in order of first appearance.
    ///
    /// The fixed-speaker offset of the randomization engine indexes into
    /// this ordering.
    pub fn speakers_in_order(&self) -> Vec<&SpeakerId> {
        let mut seen = Vec::new();
        for turn in &self.turns {
            if !seen.contains(&&turn.speaker) {
                seen.push(&turn.speaker);
            }
        }
        seen
    }

    /// All sentences in dialogue order.
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.turns.iter().flat_map(|t| t.sentences.iter())
    }

    /// Positions of the turns owned by `speaker`, in dialogue order.
    pub fn turn_positions_of(&self, speaker: &SpeakerId) -> Vec<usize> {
        self.turns
            .iter()
            .enumerate()
            .filter(|(_, t)| &t.speaker == speaker)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Sentence;

    fn two_speaker_dialogue() -> Dialogue {
        let mut d = Dialogue::new("d01", "conversation");
        for (i, speaker) in ["A", "B", "A", "B"].iter().enumerate() {
            let mut turn = Turn::new(format!("d01:t{}", i), SpeakerId::new(*speaker));
            turn.push_sentence(Sentence::new(format!("d01:t{}:s0", i), i, "..."));
            d.push_turn(turn);
        }
        d
    }

    #[test]
    fn test_speakers_in_first_appearance_order() {
        let d = two_speaker_dialogue();
        let speakers = d.speakers_in_order();
        assert_eq!(speakers.len(), 2);
        assert_eq!(speakers[0].as_ref(), "A");
        assert_eq!(speakers[1].as_ref(), "B");
    }

    #[test]
    fn test_turn_positions_of() {
        let d = two_speaker_dialogue();
        assert_eq!(d.turn_positions_of(&SpeakerId::new("A")), vec![0, 2]);
        assert_eq!(d.turn_positions_of(&SpeakerId::new("B")), vec![1, 3]);
        assert_eq!(d.turn_positions_of(&SpeakerId::new("C")), Vec::<usize>::new());
    }

    #[test]
    fn test_counts() {
        let d = two_speaker_dialogue();
        assert_eq!(d.turn_count(), 4);
        assert_eq!(d.sentence_count(), 4);
    }
}
