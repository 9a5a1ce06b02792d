//! Randomization strategies, padding policies and length units.
//!
//! Each strategy's semantics are declared once, in its `StrategyTraits`
//! row, instead of being inferred from ordering comparisons scattered
//! through the engine.

use dialogue_corpus::Dialogue;
use serde::{Deserialize, Serialize};

/// The nine mutually exclusive resampling strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomizationStrategy {
    /// Keep the fixed speaker's turns in place; fill every other slot with
    /// a window-shuffled copy of the fixed speaker's own turns.
    SameSpeakerReorder,
    /// Keep the fixed speaker; fill each other speaker from one randomly
    /// drawn donor dialogue's second speaker, in original order.
    OtherSpeakersFromOtherDialogue,
    /// As above, but the donor is the closest unused dialogue by length.
    BestLengthMatchDonor,
    /// Donor choices are copied from a previously generated reference
    /// randomized corpus via its provenance back-references.
    CopyAssignmentFromReference,
    /// As `BestLengthMatchDonor`, but the donor speaker's turns are
    /// window-shuffled before use.
    BestLengthMatchShuffled,
    /// Keep the fixed speaker; every other turn is drawn independently at
    /// random from any dialogue and speaker.
    EachOtherTurnIndependentlyRandom,
    /// Every turn, fixed speaker included, is drawn independently.
    AllTurnsIndependentlyRandom,
    /// Independent draws at sentence granularity; each donor sentence
    /// becomes its own turn.
    AllSentencesIndependentlyRandom,
    /// Reshuffle each speaker's own turns within their own dialogue.
    SelfToMeReorder,
}

/// Capability flags declaring a strategy's semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyTraits {
    /// One speaker's original turns are preserved in place.
    pub keeps_fixed_speaker: bool,
    /// A donor dialogue/speaker pair is fixed once per role slot and
    /// consumed through a cursor.
    pub per_speaker_donor: bool,
    /// Donor material comes from the source dialogue itself.
    pub same_dialogue_only: bool,
    /// The donor's turn order is window-shuffled before consumption.
    pub reshuffle_donor: bool,
    /// Every unit is drawn independently instead of through a cursor.
    pub independent_draws: bool,
    /// Resampling operates on sentences rather than turns.
    pub sentence_unit: bool,
    /// Donor candidates are taken in ascending length-difference order.
    pub length_matched: bool,
    /// Donor choices come from a reference corpus, not the RNG.
    pub copies_assignment: bool,
}

const fn traits_row(
    keeps_fixed_speaker: bool,
    per_speaker_donor: bool,
    same_dialogue_only: bool,
    reshuffle_donor: bool,
    independent_draws: bool,
    sentence_unit: bool,
    length_matched: bool,
    copies_assignment: bool,
) -> StrategyTraits {
    StrategyTraits {
        keeps_fixed_speaker,
        per_speaker_donor,
        same_dialogue_only,
        reshuffle_donor,
        independent_draws,
        sentence_unit,
        length_matched,
        copies_assignment,
    }
}

impl RandomizationStrategy {
    /// The capability table.
    ///
    /// Columns: fixed, per-speaker donor, same dialogue, reshuffle,
    /// independent, sentence unit, length matched, copies assignment.
    pub const fn traits(self) -> StrategyTraits {
        use RandomizationStrategy::*;
        match self {
            SameSpeakerReorder /*              */ => traits_row(true, false, true, true, false, false, false, false),
            OtherSpeakersFromOtherDialogue /*  */ => traits_row(true, true, false, false, false, false, false, false),
            BestLengthMatchDonor /*            */ => traits_row(true, true, false, false, false, false, true, false),
            CopyAssignmentFromReference /*     */ => traits_row(true, true, false, false, false, false, false, true),
            BestLengthMatchShuffled /*         */ => traits_row(true, true, false, true, false, false, true, false),
            EachOtherTurnIndependentlyRandom /**/ => traits_row(true, false, false, false, true, false, false, false),
            AllTurnsIndependentlyRandom /*     */ => traits_row(false, false, false, false, true, false, false, false),
            AllSentencesIndependentlyRandom /* */ => traits_row(false, false, false, false, true, true, false, false),
            SelfToMeReorder /*                 */ => traits_row(false, false, true, false, false, false, false, false),
        }
    }
}

/// What happens when a donor's material runs out mid-dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaddingPolicy {
    /// Restart the donor's cursor at index 0.
    Wrap,
    /// Clamp the cursor at the donor's final index.
    RepeatLast,
    /// Jump to one fixed random index, chosen at the first exhaustion,
    /// and continue sequentially from there.
    RandomWrap,
    /// Draw a fresh random index on every take after exhaustion.
    RandomEachTime,
    /// Stop generating further turns for this synthetic dialogue.
    Cut,
}

/// Unit used when comparing dialogue lengths for donor selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Turns,
    Sentences,
}

impl LengthUnit {
    pub fn measure(self, dialogue: &Dialogue) -> usize {
        match self {
            LengthUnit::Turns => dialogue.turn_count(),
            LengthUnit::Sentences => dialogue.sentence_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_speaker_donor_strategies() {
        use RandomizationStrategy::*;
        for strategy in [
            OtherSpeakersFromOtherDialogue,
            BestLengthMatchDonor,
            CopyAssignmentFromReference,
            BestLengthMatchShuffled,
        ]
        .iter()
        {
            assert!(strategy.traits().per_speaker_donor, "{:?}", strategy);
            assert!(strategy.traits().keeps_fixed_speaker, "{:?}", strategy);
            assert!(!strategy.traits().same_dialogue_only, "{:?}", strategy);
        }
    }

    #[test]
    fn test_same_dialogue_strategies_take_no_donors() {
        use RandomizationStrategy::*;
        for strategy in [SameSpeakerReorder, SelfToMeReorder].iter() {
            let t = strategy.traits();
            assert!(t.same_dialogue_only);
            assert!(!t.per_speaker_donor);
            assert!(!t.independent_draws);
        }
    }

    #[test]
    fn test_independent_strategies() {
        use RandomizationStrategy::*;
        assert!(EachOtherTurnIndependentlyRandom.traits().keeps_fixed_speaker);
        assert!(!AllTurnsIndependentlyRandom.traits().keeps_fixed_speaker);
        assert!(AllSentencesIndependentlyRandom.traits().sentence_unit);
        for strategy in [
            EachOtherTurnIndependentlyRandom,
            AllTurnsIndependentlyRandom,
            AllSentencesIndependentlyRandom,
        ]
        .iter()
        {
            assert!(strategy.traits().independent_draws, "{:?}", strategy);
        }
    }
}
