//! Line-oriented text rendering of dialogues and corpora.
//!
//! Used for debugging and snapshot tests. The format is stable: one header
//! line per dialogue, one line per turn with a provenance marker when the
//! turn was resampled.

use crate::corpus::Corpus;
use crate::dialogue::Dialogue;
use crate::turn::Turn;

/// Render one dialogue.
///
/// ```text
/// dialogue d01 [conversation]
///   t0 A | Hello there.
///   t1 B <- d02#d02:t3 | Fine thanks.
/// ```
///
/// `<- self` marks preserved content pointing at itself; `<- dlg#id` marks
/// a transplant from a donor.
pub fn render_dialogue(dialogue: &Dialogue) -> String {
    let mut out = format!("dialogue {} [{}]", dialogue.id, dialogue.genre);
    for (i, turn) in dialogue.turns.iter().enumerate() {
        out.push('\n');
        out.push_str(&format!("  t{} {}{} | {}", i, turn.speaker, marker(turn), text(turn)));
    }
    out
}

/// Render every dialogue in a corpus, separated by blank lines.
pub fn render_corpus(corpus: &Corpus) -> String {
    let mut out = format!("corpus {} ({} dialogues)", corpus.id, corpus.dialogues().len());
    for dialogue in corpus.dialogues() {
        out.push_str("\n\n");
        out.push_str(&render_dialogue(dialogue));
    }
    out
}

fn marker(turn: &Turn) -> String {
    match (&turn.provenance.original_id, &turn.provenance.original_dialogue) {
        (Some(id), Some(dialogue)) => {
            if id == &turn.id {
                " <- self".to_string()
            } else {
                format!(" <- {}#{}", dialogue, id)
            }
        }
        _ => String::new(),
    }
}

fn text(turn: &Turn) -> String {
    if turn.sentences.is_empty() {
        "(empty)".to_string()
    } else {
        turn.sentences
            .iter()
            .map(|s| s.transcription.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{CorpusBuilder, DialogueBuilder};
    use crate::provenance::Provenance;
    use crate::sentence::Sentence;
    use crate::speaker::{Speaker, SpeakerId};
    use crate::turn::Turn;

    #[test]
    fn test_render_imported_dialogue() {
        let mut builder = CorpusBuilder::new("demo", "memory:demo");
        builder.speaker(Speaker::new("A")).speaker(Speaker::new("B"));

        let mut d = DialogueBuilder::new("d01", "conversation");
        d.turn("A", &["Hello there."]);
        d.turn("B", &["Hi.", "How are you?"]);
        builder.dialogue(d).unwrap();
        let corpus = builder.finish();

        insta::assert_snapshot!(render_corpus(&corpus), @r###"
corpus demo (1 dialogues)

dialogue d01 [conversation]
  t0 A | Hello there.
  t1 B | Hi. / How are you?
"###);
    }

    #[test]
    fn test_render_provenance_markers() {
        let mut dialogue = Dialogue::new("d01-r00aa", "conversation");

        let mut kept = Turn::new("d01:t0", SpeakerId::new("A")).with_provenance(
            Provenance::self_reference("d01:t0", SpeakerId::new("A"), "d01".into()),
        );
        kept.push_sentence(Sentence::new("d01:t0:s0", 0, "Hello there."));
        dialogue.push_turn(kept);

        let mut moved = Turn::new("d01-r00aa:t1", SpeakerId::new("B")).with_provenance(
            Provenance::transplant("d02:t3", SpeakerId::new("Z"), "d02".into()),
        );
        moved.push_sentence(Sentence::new("d01-r00aa:t1:s0", 1, "Fine thanks."));
        dialogue.push_turn(moved);

        insta::assert_snapshot!(render_dialogue(&dialogue), @r###"
dialogue d01-r00aa [conversation]
  t0 A <- self | Hello there.
  t1 B <- d02#d02:t3 | Fine thanks.
"###);
    }
}
