//! The import contract: a read-only builder importers feed corpora through.
//!
//! Format-specific importers (BNC/XML, transcript text, ...) are separate
//! concerns; whatever the format, they assemble a corpus exclusively through
//! this builder, which enforces the structural invariants the randomization
//! engine relies on: unique dialogue ids, every turn's speaker registered,
//! genre tables consistent with the dialogue list.

use crate::corpus::{Corpus, CorpusError, CorpusResult};
use crate::dialogue::Dialogue;
use crate::sentence::Sentence;
use crate::speaker::{Speaker, SpeakerId};
use crate::turn::Turn;

/// Accumulates one dialogue's turns with generated ids and sequence
/// numbers. Ids follow the pattern `{dialogue}:t{n}` for turns and
/// `{dialogue}:t{n}:s{m}` for sentences; `seq` numbers sentences across the
/// whole dialogue.
#[derive(Debug)]
pub struct DialogueBuilder {
    dialogue: Dialogue,
    next_seq: usize,
}

impl DialogueBuilder {
    pub fn new(id: impl Into<String>, genre: impl Into<String>) -> Self {
        let id: String = id.into();
        Self {
            dialogue: Dialogue::new(id, genre),
            next_seq: 0,
        }
    }

    /// Append a turn of plain transcriptions for `speaker`.
    pub fn turn(&mut self, speaker: impl Into<SpeakerId>, transcriptions: &[&str]) -> &mut Self {
        let turn_id = format!("{}:t{}", self.dialogue.id, self.dialogue.turn_count());
        let mut turn = Turn::new(turn_id.clone(), speaker.into());
        for (m, text) in transcriptions.iter().enumerate() {
            turn.push_sentence(Sentence::new(
                format!("{}:s{}", turn_id, m),
                self.next_seq,
                *text,
            ));
            self.next_seq += 1;
        }
        self.dialogue.push_turn(turn);
        self
    }

    /// Append a turn built sentence-by-sentence, for importers carrying
    /// tokens, syntax or timing. The closure receives each fresh sentence
    /// and returns the enriched one.
    pub fn turn_with(
        &mut self,
        speaker: impl Into<SpeakerId>,
        transcriptions: &[&str],
        enrich: impl Fn(Sentence) -> Sentence,
    ) -> &mut Self {
        let turn_id = format!("{}:t{}", self.dialogue.id, self.dialogue.turn_count());
        let mut turn = Turn::new(turn_id.clone(), speaker.into());
        for (m, text) in transcriptions.iter().enumerate() {
            let sentence = Sentence::new(format!("{}:s{}", turn_id, m), self.next_seq, *text);
            turn.push_sentence(enrich(sentence));
            self.next_seq += 1;
        }
        self.dialogue.push_turn(turn);
        self
    }

    pub fn id(&self) -> &str {
        self.dialogue.id.as_ref()
    }
}

/// Builder for a whole corpus.
///
/// `dialogue()` validates that every turn's speaker has been registered
/// before the dialogue is accepted; an unregistered speaker is a hard
/// error, never silently fabricated.
#[derive(Debug)]
pub struct CorpusBuilder {
    corpus: Corpus,
}

impl CorpusBuilder {
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            corpus: Corpus::new(id, source),
        }
    }

    pub fn speaker(&mut self, speaker: Speaker) -> &mut Self {
        self.corpus.add_speaker(speaker);
        self
    }

    pub fn dialogue(&mut self, builder: DialogueBuilder) -> CorpusResult<&mut Self> {
        let dialogue = builder.dialogue;
        for turn in &dialogue.turns {
            if self.corpus.speaker(&turn.speaker).is_err() {
                return Err(CorpusError::UnknownSpeaker(turn.speaker.clone()));
            }
        }
        self.corpus.push_dialogue(dialogue)?;
        Ok(self)
    }

    pub fn finish(self) -> Corpus {
        self.corpus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_and_seq() {
        let mut builder = CorpusBuilder::new("c", "memory:c");
        builder.speaker(Speaker::new("A")).speaker(Speaker::new("B"));

        let mut d = DialogueBuilder::new("d01", "conversation");
        d.turn("A", &["One.", "Two."]).turn("B", &["Three."]);
        builder.dialogue(d).unwrap();

        let corpus = builder.finish();
        let dialogue = &corpus.dialogues()[0];
        assert_eq!(dialogue.turns[0].id, "d01:t0");
        assert_eq!(dialogue.turns[0].sentences[1].id, "d01:t0:s1");
        assert_eq!(dialogue.turns[1].sentences[0].seq, 2);
    }

    #[test]
    fn test_unregistered_speaker_rejected() {
        let mut builder = CorpusBuilder::new("c", "memory:c");
        builder.speaker(Speaker::new("A"));

        let mut d = DialogueBuilder::new("d01", "conversation");
        d.turn("A", &["One."]).turn("B", &["Two."]);
        let err = builder.dialogue(d).unwrap_err();
        assert_eq!(err, CorpusError::UnknownSpeaker(SpeakerId::new("B")));
    }

    #[test]
    fn test_enriched_turns() {
        let mut builder = CorpusBuilder::new("c", "memory:c");
        builder.speaker(Speaker::new("A"));

        let mut d = DialogueBuilder::new("d01", "conversation");
        d.turn_with("A", &["Right then."], |s| s.with_timing(0.0, 1.2));
        builder.dialogue(d).unwrap();

        let corpus = builder.finish();
        let sentence = &corpus.dialogues()[0].turns[0].sentences[0];
        assert_eq!(sentence.start_time, Some(0.0));
        assert_eq!(sentence.end_time, Some(1.2));
    }
}
