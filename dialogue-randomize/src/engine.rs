//! The randomization driver: a single synchronous pass over the source
//! corpus, one synthetic dialogue per source dialogue.

use std::collections::HashMap;

use dialogue_corpus::{Corpus, Dialogue, SpeakerId};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::RandomizeConfig;
use crate::cursor::DonorCursor;
use crate::error::{RandomizeError, RandomizeResult};
use crate::sampling::{
    assignment_from_reference, select_donor_dialogue, select_random_sentence, select_random_turn,
    DonorAssignment, SamplingState,
};
use crate::shuffle::window_shuffle;
use crate::transplant::{copy_verbatim, transplant_sentence, transplant_turn};

/// One synthetic dialogue plus whether the engine gave up on it early.
struct SyntheticOutcome {
    dialogue: Dialogue,
    cut_short: bool,
}

/// The corpus randomization engine.
///
/// Holds the run configuration and the run's single random source. All
/// randomness comes from that one seeded generator, so equal seeds and
/// equal inputs reproduce the output exactly. Not safely reentrant from
/// multiple threads.
pub struct Randomizer {
    config: RandomizeConfig,
    rng: SmallRng,
}

impl Randomizer {
    /// Validate the configuration and set up the seeded random source.
    pub fn new(config: RandomizeConfig) -> RandomizeResult<Self> {
        config.validate()?;
        let rng = SmallRng::seed_from_u64(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &RandomizeConfig {
        &self.config
    }

    /// Synthesize a null-model corpus from `source`.
    pub fn randomize(&mut self, source: &Corpus) -> RandomizeResult<Corpus> {
        if self.config.strategy.traits().copies_assignment {
            return Err(RandomizeError::InvalidConfiguration {
                reason: "CopyAssignmentFromReference requires a reference corpus; \
                         use randomize_like"
                    .to_string(),
            });
        }
        self.run(source, None)
    }

    /// Synthesize a null-model corpus whose donor choices are copied from
    /// `reference`, a corpus previously produced by this engine.
    pub fn randomize_like(
        &mut self,
        source: &Corpus,
        reference: &Corpus,
    ) -> RandomizeResult<Corpus> {
        if !self.config.strategy.traits().copies_assignment {
            return Err(RandomizeError::InvalidConfiguration {
                reason: format!(
                    "{:?} does not copy donor assignments from a reference corpus",
                    self.config.strategy
                ),
            });
        }
        self.run(source, Some(reference))
    }

    fn run(&mut self, source: &Corpus, reference: Option<&Corpus>) -> RandomizeResult<Corpus> {
        let suffix = format!("r{:04x}", self.rng.gen::<u16>());
        let mut out = source.derived(&suffix);
        for pos in 0..source.dialogues().len() {
            let outcome = self.randomize_dialogue(source, pos, reference)?;
            self.verify(&source.dialogues()[pos], &outcome)?;
            out.push_dialogue(outcome.dialogue)?;
        }
        Ok(out)
    }

    fn randomize_dialogue(
        &mut self,
        corpus: &Corpus,
        pos: usize,
        reference: Option<&Corpus>,
    ) -> RandomizeResult<SyntheticOutcome> {
        let source = &corpus.dialogues()[pos];
        let id = format!("{}-r{:04x}", source.id, self.rng.gen::<u16>());
        let mut out = Dialogue::new(id, source.genre.clone());

        if source.turns.is_empty() {
            return Ok(SyntheticOutcome {
                dialogue: out,
                cut_short: false,
            });
        }

        let traits = self.config.strategy.traits();
        let cut_short = if traits.same_dialogue_only {
            self.reorder_within(source, &mut out)?
        } else if traits.independent_draws {
            self.independent_draws(corpus, pos, &mut out)?
        } else {
            self.per_speaker_donors(corpus, pos, reference, &mut out)?
        };

        Ok(SyntheticOutcome {
            dialogue: out,
            cut_short,
        })
    }

    /// Strategies that resample within the source dialogue itself:
    /// SameSpeakerReorder and SelfToMeReorder.
    fn reorder_within(&mut self, source: &Dialogue, out: &mut Dialogue) -> RandomizeResult<bool> {
        let traits = self.config.strategy.traits();
        let mut cursors: HashMap<SpeakerId, DonorCursor> = HashMap::new();

        let fixed = if traits.keeps_fixed_speaker {
            let fixed = self.fixed_speaker(source)?;
            // Every other speaker consumes its own window-shuffled copy of
            // the fixed speaker's turns.
            let donor_positions = source.turn_positions_of(&fixed);
            for speaker in source.speakers_in_order() {
                if *speaker == fixed {
                    continue;
                }
                let order = window_shuffle(&mut self.rng, &donor_positions, self.config.window);
                cursors.insert((*speaker).clone(), DonorCursor::new(order));
            }
            Some(fixed)
        } else {
            // Each speaker consumes a plain shuffle of their own turns.
            for speaker in source.speakers_in_order() {
                let mut order = source.turn_positions_of(speaker);
                order.shuffle(&mut self.rng);
                cursors.insert((*speaker).clone(), DonorCursor::new(order));
            }
            None
        };

        let mut next_seq = 0;
        for turn in &source.turns {
            if let Some(fixed) = &fixed {
                if &turn.speaker == fixed {
                    copy_verbatim(source, turn, out, &mut next_seq);
                    continue;
                }
            }
            let taken = cursors
                .get_mut(&turn.speaker)
                .and_then(|cursor| cursor.next(self.config.padding, &mut self.rng));
            match taken {
                Some(p) => {
                    transplant_turn(source, &source.turns[p], &turn.speaker, out, &mut next_seq)
                }
                None => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Strategies that fix one donor dialogue/speaker per role slot:
    /// OtherSpeakersFromOtherDialogue, BestLengthMatchDonor,
    /// CopyAssignmentFromReference and BestLengthMatchShuffled.
    fn per_speaker_donors(
        &mut self,
        corpus: &Corpus,
        pos: usize,
        reference: Option<&Corpus>,
        out: &mut Dialogue,
    ) -> RandomizeResult<bool> {
        let source = &corpus.dialogues()[pos];
        let traits = self.config.strategy.traits();
        let fixed = self.fixed_speaker(source)?;

        let mut state = SamplingState::new();
        state.seed_speaker(corpus.speaker(&fixed)?.clone());

        let mut next_seq = 0;
        for turn in &source.turns {
            if turn.speaker == fixed {
                copy_verbatim(source, turn, out, &mut next_seq);
                continue;
            }
            if !state.assignments.contains_key(&turn.speaker) {
                let choice = if traits.copies_assignment {
                    let reference =
                        reference.ok_or_else(|| RandomizeError::InvalidConfiguration {
                            reason: "reference corpus missing".to_string(),
                        })?;
                    assignment_from_reference(corpus, source, &turn.speaker, reference)?
                } else {
                    select_donor_dialogue(corpus, pos, &self.config, &mut state, &mut self.rng)?
                };
                let (donor_pos, donor_speaker) = match choice {
                    Some(choice) => choice,
                    None => return Ok(true),
                };
                let donor_dialogue = &corpus.dialogues()[donor_pos];
                let mut order = donor_dialogue.turn_positions_of(&donor_speaker);
                if traits.reshuffle_donor {
                    order = window_shuffle(&mut self.rng, &order, self.config.window);
                }
                state.assignments.insert(
                    turn.speaker.clone(),
                    DonorAssignment {
                        dialogue: donor_pos,
                        speaker: donor_speaker,
                        cursor: DonorCursor::new(order),
                    },
                );
            }

            let (donor_pos, taken) = match state.assignments.get_mut(&turn.speaker) {
                Some(assignment) => (
                    assignment.dialogue,
                    assignment.cursor.next(self.config.padding, &mut self.rng),
                ),
                None => (0, None),
            };
            match taken {
                Some(p) => {
                    let donor_dialogue = &corpus.dialogues()[donor_pos];
                    transplant_turn(
                        donor_dialogue,
                        &donor_dialogue.turns[p],
                        &turn.speaker,
                        out,
                        &mut next_seq,
                    );
                }
                None => return Ok(true),
            }
        }
        Ok(false)
    }

    /// Strategies that draw every unit independently:
    /// EachOtherTurnIndependentlyRandom, AllTurnsIndependentlyRandom and
    /// AllSentencesIndependentlyRandom.
    fn independent_draws(
        &mut self,
        corpus: &Corpus,
        pos: usize,
        out: &mut Dialogue,
    ) -> RandomizeResult<bool> {
        let source = &corpus.dialogues()[pos];
        let traits = self.config.strategy.traits();

        let mut state = SamplingState::new();
        let fixed = if traits.keeps_fixed_speaker {
            let fixed = self.fixed_speaker(source)?;
            state.seed_speaker(corpus.speaker(&fixed)?.clone());
            Some(fixed)
        } else {
            None
        };

        let mut next_seq = 0;
        if traits.sentence_unit {
            for turn in &source.turns {
                for _ in &turn.sentences {
                    let drawn = select_random_sentence(
                        corpus,
                        pos,
                        &self.config,
                        &mut state,
                        &mut self.rng,
                    )?;
                    match drawn {
                        Some((d, t, s)) => {
                            let donor = &corpus.dialogues()[d];
                            transplant_sentence(
                                donor,
                                &donor.turns[t],
                                &donor.turns[t].sentences[s],
                                &turn.speaker,
                                out,
                                &mut next_seq,
                            );
                        }
                        None => return Ok(true),
                    }
                }
            }
            return Ok(false);
        }

        for turn in &source.turns {
            if let Some(fixed) = &fixed {
                if &turn.speaker == fixed {
                    copy_verbatim(source, turn, out, &mut next_seq);
                    continue;
                }
            }
            let drawn = select_random_turn(corpus, pos, &self.config, &mut state, &mut self.rng)?;
            match drawn {
                Some((d, t)) => {
                    let donor = &corpus.dialogues()[d];
                    transplant_turn(donor, &donor.turns[t], &turn.speaker, out, &mut next_seq);
                }
                None => return Ok(true),
            }
        }
        Ok(false)
    }

    fn fixed_speaker(&self, dialogue: &Dialogue) -> RandomizeResult<SpeakerId> {
        let speakers = dialogue.speakers_in_order();
        speakers
            .get(self.config.fixed_speaker_offset)
            .map(|s| (*s).clone())
            .ok_or_else(|| RandomizeError::MissingMetadata {
                dialogue: dialogue.id.clone(),
                detail: format!(
                    "fixed speaker offset {} exceeds the {} speakers present",
                    self.config.fixed_speaker_offset,
                    speakers.len()
                ),
            })
    }

    /// Post-hoc sanity check: the synthetic dialogue must reconcile with
    /// its source. A violation is a transplantation defect.
    fn verify(&self, source: &Dialogue, outcome: &SyntheticOutcome) -> RandomizeResult<()> {
        let out = &outcome.dialogue;
        if out.genre != source.genre {
            return Err(self.inconsistency(out, "genre not preserved".to_string()));
        }

        let source_speakers = source.speakers_in_order();
        for turn in &out.turns {
            if !source_speakers.contains(&&turn.speaker) {
                return Err(self.inconsistency(
                    out,
                    format!("turn speaker '{}' is not in the source dialogue", turn.speaker),
                ));
            }
            if !turn.provenance.is_complete() {
                return Err(
                    self.inconsistency(out, format!("turn '{}' lacks provenance", turn.id))
                );
            }
            for sentence in &turn.sentences {
                if !sentence.provenance.is_complete() {
                    return Err(self.inconsistency(
                        out,
                        format!("sentence '{}' lacks provenance", sentence.id),
                    ));
                }
            }
        }

        let sentence_unit = self.config.strategy.traits().sentence_unit;
        for speaker in source_speakers {
            let expected = if sentence_unit {
                source
                    .turns
                    .iter()
                    .filter(|t| &t.speaker == speaker)
                    .map(|t| t.sentence_count())
                    .sum()
            } else {
                source.turn_positions_of(speaker).len()
            };
            let produced = out.turn_positions_of(speaker).len();
            let ok = if outcome.cut_short {
                produced <= expected
            } else {
                produced == expected
            };
            if !ok {
                return Err(self.inconsistency(
                    out,
                    format!(
                        "speaker '{}' produced {} turns, expected {}{}",
                        speaker,
                        produced,
                        if outcome.cut_short { "at most " } else { "" },
                        expected
                    ),
                ));
            }
        }
        Ok(())
    }

    fn inconsistency(&self, dialogue: &Dialogue, detail: String) -> RandomizeError {
        RandomizeError::StructuralInconsistency {
            dialogue: dialogue.id.clone(),
            detail,
        }
    }
}
