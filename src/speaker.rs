//! Speaker records and the speaker-identity oracle.
//!
//! Corpora imported from different sources often carry the same real person
//! under distinct speaker records. [`Speaker::probably_same_as`] is the
//! heuristic the randomization engine uses to reject donor candidates that
//! are probably the same person as a speaker already present in a synthetic
//! dialogue. It never merges or mutates records.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Sentinel identifiers used by transcription formats for unattributed
/// speech. Speakers with one of these ids never match anyone, including
/// themselves.
static ANONYMOUS_IDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["unknown", "anon", "anonymous", "various", "none"]
        .iter()
        .copied()
        .collect()
});

/// Stable identifier for a speaker within a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpeakerId(pub String);

impl SpeakerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for SpeakerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SpeakerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SpeakerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SpeakerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A speaker record: an identity plus optional biographical fields.
///
/// Immutable after creation. Biographical fields come from corpus metadata
/// and may be absent; absence is meaningful to the identity oracle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: SpeakerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub occupation: Option<String>,
}

impl Speaker {
    /// Create a speaker with no biographical information.
    pub fn new(id: impl Into<SpeakerId>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            gender: None,
            age: None,
            occupation: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_first_name(mut self, first: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = Some(occupation.into());
        self
    }

    /// Whether this record is an unattributed-speech sentinel.
    pub fn is_anonymous(&self) -> bool {
        ANONYMOUS_IDS.contains(self.id.0.to_ascii_lowercase().as_str())
    }

    /// Heuristic: are these two records probably the same real person?
    ///
    /// Sentinel speakers never match. The receiver must carry at least one
    /// name part; then first name, last name, age and gender must each match
    /// (names and gender case-insensitively) or be absent on both records.
    /// Occupation is deliberately ignored: it varies too much across corpora
    /// to be an identity signal.
    pub fn probably_same_as(&self, other: &Speaker) -> bool {
        if self.is_anonymous() || other.is_anonymous() {
            return false;
        }
        if self.first_name.is_none() && self.last_name.is_none() {
            return false;
        }
        text_fields_match(&self.first_name, &other.first_name)
            && text_fields_match(&self.last_name, &other.last_name)
            && self.age == other.age
            && text_fields_match(&self.gender, &other.gender)
    }
}

fn text_fields_match(a: &Option<String>, b: &Option<String>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        (None, None) => true,
        _ => false,
    }
}
