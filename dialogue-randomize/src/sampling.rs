//! Donor selection: constrained sampling of donor dialogues, turns and
//! sentences, with the bookkeeping that prevents reuse.
//!
//! Candidate pools are materialized and filtered up front, then drawn from
//! uniformly (or taken in length-difference order). An empty pool is the
//! `ExhaustedCandidates` condition: the caller abandons the current
//! synthetic dialogue with Cut semantics instead of retrying forever.

use std::collections::{HashMap, HashSet};

use dialogue_corpus::{Corpus, Dialogue, Speaker, SpeakerId};
use rand::Rng;

use crate::config::RandomizeConfig;
use crate::cursor::DonorCursor;
use crate::error::{RandomizeError, RandomizeResult};

/// A donor dialogue/speaker pair fixed for one role slot, with the cursor
/// tracking consumption of the donor's turns.
#[derive(Debug)]
pub(crate) struct DonorAssignment {
    /// Position of the donor dialogue in corpus order.
    pub dialogue: usize,
    pub speaker: SpeakerId,
    pub cursor: DonorCursor,
}

/// Bookkeeping for one synthetic dialogue.
///
/// One state value per synthetic dialogue, never shared across dialogues
/// or runs. Everything in here exists to stop the sampler from filling two
/// role slots from the same donor, reusing a turn, or pairing speakers who
/// are probably the same person.
#[derive(Debug, Default)]
pub(crate) struct SamplingState {
    used_dialogues: HashSet<usize>,
    used_turns: HashSet<(usize, usize)>,
    used_sentences: HashSet<(usize, usize, usize)>,
    donor_speakers: Vec<Speaker>,
    pub assignments: HashMap<SpeakerId, DonorAssignment>,
}

impl SamplingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the avoid-self set, typically with the fixed speaker, so
    /// donors probably identical to a preserved speaker are rejected too.
    pub fn seed_speaker(&mut self, speaker: Speaker) {
        self.donor_speakers.push(speaker);
    }

    fn clashes_with_used_speakers(&self, candidate: &Speaker) -> bool {
        self.donor_speakers
            .iter()
            .any(|used| used.probably_same_as(candidate) || candidate.probably_same_as(used))
    }
}

/// Select a donor dialogue (and its second speaker) for one role slot.
///
/// Candidates must not be the source dialogue, must not already serve
/// another role slot in this synthetic dialogue, must have a second
/// speaker, and must pass the genre and avoid-self constraints. The
/// length-matching strategies take the closest candidate by
/// `|len(candidate) - len(source)|` with ties broken by corpus order;
/// otherwise the pick is uniform.
pub(crate) fn select_donor_dialogue<R: Rng>(
    corpus: &Corpus,
    source_pos: usize,
    config: &RandomizeConfig,
    state: &mut SamplingState,
    rng: &mut R,
) -> RandomizeResult<Option<(usize, SpeakerId)>> {
    let source = &corpus.dialogues()[source_pos];
    let mut candidates: Vec<(usize, SpeakerId)> = Vec::new();

    for (pos, candidate) in corpus.dialogues().iter().enumerate() {
        if pos == source_pos || state.used_dialogues.contains(&pos) {
            continue;
        }
        if config.match_genre && candidate.genre != source.genre {
            continue;
        }
        let second = match candidate.speakers_in_order().get(1) {
            Some(id) => (*id).clone(),
            None => continue,
        };
        if config.avoid_self {
            let record = corpus.speaker(&second)?;
            if state.clashes_with_used_speakers(record) {
                continue;
            }
        }
        candidates.push((pos, second));
    }

    if candidates.is_empty() {
        return Ok(None);
    }

    let (pos, speaker) = if config.strategy.traits().length_matched {
        let source_len = config.length_unit.measure(source);
        let closest = candidates.into_iter().min_by_key(|(pos, _)| {
            let len = config.length_unit.measure(&corpus.dialogues()[*pos]);
            (diff(len, source_len), *pos)
        });
        match closest {
            Some(choice) => choice,
            None => return Ok(None),
        }
    } else {
        let index = rng.gen_range(0..candidates.len());
        candidates.swap_remove(index)
    };

    state.used_dialogues.insert(pos);
    state.donor_speakers.push(corpus.speaker(&speaker)?.clone());
    Ok(Some((pos, speaker)))
}

/// Copy a role slot's donor assignment from a reference randomized corpus.
///
/// The reference synthetic dialogue derived from `source` is located by id
/// prefix (engine ids are `{source id}-r{suffix}`), and the donor
/// dialogue/speaker are read off the provenance of the role's first
/// transplanted turn. A reference that does not cover the source dialogue
/// or carries incomplete provenance is a metadata error; a role slot the
/// reference cut short copies the cut.
pub(crate) fn assignment_from_reference(
    corpus: &Corpus,
    source: &Dialogue,
    role: &SpeakerId,
    reference: &Corpus,
) -> RandomizeResult<Option<(usize, SpeakerId)>> {
    let prefix = format!("{}-r", source.id);
    let ref_dialogue = reference
        .dialogues()
        .iter()
        .find(|d| d.id.as_ref().starts_with(&prefix))
        .ok_or_else(|| RandomizeError::MissingMetadata {
            dialogue: source.id.clone(),
            detail: format!("reference corpus has no dialogue derived from '{}'", source.id),
        })?;

    let mut saw_role = false;
    for turn in ref_dialogue.turns.iter().filter(|t| &t.speaker == role) {
        saw_role = true;
        match &turn.provenance.original_dialogue {
            Some(donor_id) if donor_id != &source.id => {
                let speaker = turn.provenance.original_speaker.clone().ok_or_else(|| {
                    RandomizeError::MissingMetadata {
                        dialogue: ref_dialogue.id.clone(),
                        detail: format!("turn '{}' has no original speaker", turn.id),
                    }
                })?;
                let pos = corpus.dialogue_position(donor_id).ok_or_else(|| {
                    RandomizeError::MissingMetadata {
                        dialogue: ref_dialogue.id.clone(),
                        detail: format!("reference donor dialogue '{}' is not in the corpus", donor_id),
                    }
                })?;
                return Ok(Some((pos, speaker)));
            }
            _ => continue,
        }
    }

    if saw_role {
        // The role exists in the reference but was never transplanted,
        // which means the reference was generated with a different fixed
        // speaker. The assignment cannot be copied.
        return Err(RandomizeError::MissingMetadata {
            dialogue: ref_dialogue.id.clone(),
            detail: format!("role '{}' carries no donor provenance in the reference", role),
        });
    }
    // The reference cut this slot before it produced any turn.
    Ok(None)
}

/// Draw one donor turn at random from anywhere in the corpus.
pub(crate) fn select_random_turn<R: Rng>(
    corpus: &Corpus,
    source_pos: usize,
    config: &RandomizeConfig,
    state: &mut SamplingState,
    rng: &mut R,
) -> RandomizeResult<Option<(usize, usize)>> {
    let source = &corpus.dialogues()[source_pos];
    let mut pool: Vec<(usize, usize)> = Vec::new();

    for (pos, candidate) in corpus.dialogues().iter().enumerate() {
        if pos == source_pos {
            continue;
        }
        if config.match_genre && candidate.genre != source.genre {
            continue;
        }
        for (t, turn) in candidate.turns.iter().enumerate() {
            if state.used_turns.contains(&(pos, t)) {
                continue;
            }
            if config.avoid_self {
                let record = corpus.speaker(&turn.speaker)?;
                if state.clashes_with_used_speakers(record) {
                    continue;
                }
            }
            pool.push((pos, t));
        }
    }

    if pool.is_empty() {
        return Ok(None);
    }
    let (pos, t) = pool[rng.gen_range(0..pool.len())];
    state.used_turns.insert((pos, t));
    if config.avoid_self {
        let speaker = &corpus.dialogues()[pos].turns[t].speaker;
        state.donor_speakers.push(corpus.speaker(speaker)?.clone());
    }
    Ok(Some((pos, t)))
}

/// Draw one donor sentence at random from anywhere in the corpus.
pub(crate) fn select_random_sentence<R: Rng>(
    corpus: &Corpus,
    source_pos: usize,
    config: &RandomizeConfig,
    state: &mut SamplingState,
    rng: &mut R,
) -> RandomizeResult<Option<(usize, usize, usize)>> {
    let source = &corpus.dialogues()[source_pos];
    let mut pool: Vec<(usize, usize, usize)> = Vec::new();

    for (pos, candidate) in corpus.dialogues().iter().enumerate() {
        if pos == source_pos {
            continue;
        }
        if config.match_genre && candidate.genre != source.genre {
            continue;
        }
        for (t, turn) in candidate.turns.iter().enumerate() {
            if config.avoid_self {
                let record = corpus.speaker(&turn.speaker)?;
                if state.clashes_with_used_speakers(record) {
                    continue;
                }
            }
            for s in 0..turn.sentences.len() {
                if !state.used_sentences.contains(&(pos, t, s)) {
                    pool.push((pos, t, s));
                }
            }
        }
    }

    if pool.is_empty() {
        return Ok(None);
    }
    let (pos, t, s) = pool[rng.gen_range(0..pool.len())];
    state.used_sentences.insert((pos, t, s));
    if config.avoid_self {
        let speaker = &corpus.dialogues()[pos].turns[t].speaker;
        state.donor_speakers.push(corpus.speaker(speaker)?.clone());
    }
    Ok(Some((pos, t, s)))
}

fn diff(a: usize, b: usize) -> usize {
    if a > b {
        a - b
    } else {
        b - a
    }
}
