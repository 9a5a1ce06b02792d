//! Provenance back-references for resampled content.

use serde::{Deserialize, Serialize};

use crate::dialogue::DialogueId;
use crate::speaker::SpeakerId;

/// Records where a turn or sentence came from.
///
/// All fields are unset on content authored by an importer. The
/// randomization engine sets them on everything it produces: transplanted
/// content points at its donor, preserved fixed-speaker content points at
/// itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Id of the turn or sentence this content was copied from.
    pub original_id: Option<String>,
    /// Speaker who originally produced the content.
    pub original_speaker: Option<SpeakerId>,
    /// Dialogue the content was copied out of.
    pub original_dialogue: Option<DialogueId>,
}

impl Provenance {
    /// Provenance of directly authored content: no back-references.
    pub fn native() -> Self {
        Self::default()
    }

    /// Provenance of preserved fixed-speaker content: points at itself.
    pub fn self_reference(
        id: impl Into<String>,
        speaker: SpeakerId,
        dialogue: DialogueId,
    ) -> Self {
        Self {
            original_id: Some(id.into()),
            original_speaker: Some(speaker),
            original_dialogue: Some(dialogue),
        }
    }

    /// Provenance of transplanted content: points at the donor.
    pub fn transplant(id: impl Into<String>, speaker: SpeakerId, dialogue: DialogueId) -> Self {
        Self {
            original_id: Some(id.into()),
            original_speaker: Some(speaker),
            original_dialogue: Some(dialogue),
        }
    }

    /// True when all back-references are set.
    pub fn is_complete(&self) -> bool {
        self.original_id.is_some()
            && self.original_speaker.is_some()
            && self.original_dialogue.is_some()
    }

    /// True when no back-reference is set.
    pub fn is_native(&self) -> bool {
        self.original_id.is_none()
            && self.original_speaker.is_none()
            && self.original_dialogue.is_none()
    }
}
