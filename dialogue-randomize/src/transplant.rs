//! Turn and sentence transplantation.
//!
//! Transplanted turns are owned by the *source* role-slot speaker, never
//! the donor's biographical speaker, so the synthetic dialogue keeps the
//! source's speaker-role topology. Provenance on both the turn and each
//! sentence points at the donor. Sentence `seq` numbers are reassigned in
//! synthetic-dialogue order through the shared counter.

use dialogue_corpus::{Dialogue, Provenance, Sentence, SpeakerId, Turn};

/// Copy a preserved fixed-speaker turn into the synthetic dialogue.
///
/// Ids are kept, so the turn's provenance points at itself.
pub(crate) fn copy_verbatim(
    source_dialogue: &Dialogue,
    turn: &Turn,
    out: &mut Dialogue,
    next_seq: &mut usize,
) {
    let mut copy = Turn::new(turn.id.clone(), turn.speaker.clone()).with_provenance(
        Provenance::self_reference(
            turn.id.clone(),
            turn.speaker.clone(),
            source_dialogue.id.clone(),
        ),
    );
    for sentence in &turn.sentences {
        let mut s = sentence.clone();
        s.seq = *next_seq;
        *next_seq += 1;
        s.provenance = Provenance::self_reference(
            sentence.id.clone(),
            turn.speaker.clone(),
            source_dialogue.id.clone(),
        );
        copy.push_sentence(s);
    }
    out.push_turn(copy);
}

/// Transplant a donor turn into the synthetic dialogue under `owner`.
pub(crate) fn transplant_turn(
    donor_dialogue: &Dialogue,
    donor_turn: &Turn,
    owner: &SpeakerId,
    out: &mut Dialogue,
    next_seq: &mut usize,
) {
    let turn_id = format!("{}:t{}", out.id, out.turn_count());
    let mut turn = Turn::new(turn_id.clone(), owner.clone()).with_provenance(
        Provenance::transplant(
            donor_turn.id.clone(),
            donor_turn.speaker.clone(),
            donor_dialogue.id.clone(),
        ),
    );
    for (m, donor_sentence) in donor_turn.sentences.iter().enumerate() {
        let sentence_id = format!("{}:s{}", turn_id, m);
        turn.push_sentence(copied_sentence(
            donor_sentence,
            sentence_id,
            next_seq,
            Provenance::transplant(
                donor_sentence.id.clone(),
                donor_turn.speaker.clone(),
                donor_dialogue.id.clone(),
            ),
        ));
    }
    out.push_turn(turn);
}

/// Transplant a single donor sentence as a new one-sentence turn.
///
/// The turn-level provenance names the donor's parent turn; the
/// sentence-level provenance names the donor sentence.
pub(crate) fn transplant_sentence(
    donor_dialogue: &Dialogue,
    donor_turn: &Turn,
    donor_sentence: &Sentence,
    owner: &SpeakerId,
    out: &mut Dialogue,
    next_seq: &mut usize,
) {
    let turn_id = format!("{}:t{}", out.id, out.turn_count());
    let mut turn = Turn::new(turn_id.clone(), owner.clone()).with_provenance(
        Provenance::transplant(
            donor_turn.id.clone(),
            donor_turn.speaker.clone(),
            donor_dialogue.id.clone(),
        ),
    );
    turn.push_sentence(copied_sentence(
        donor_sentence,
        format!("{}:s0", turn_id),
        next_seq,
        Provenance::transplant(
            donor_sentence.id.clone(),
            donor_turn.speaker.clone(),
            donor_dialogue.id.clone(),
        ),
    ));
    out.push_turn(turn);
}

/// Copy a donor sentence's content under a fresh id. Timing fields are
/// options already; unset stays unset.
fn copied_sentence(
    donor: &Sentence,
    id: String,
    next_seq: &mut usize,
    provenance: Provenance,
) -> Sentence {
    let seq = *next_seq;
    *next_seq += 1;
    let mut sentence = Sentence::new(id, seq, donor.transcription.clone());
    sentence.tokens = donor.tokens.clone();
    sentence.syntax = donor.syntax.clone();
    sentence.start_time = donor.start_time;
    sentence.end_time = donor.end_time;
    sentence.provenance = provenance;
    sentence
}
