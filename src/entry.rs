use serde::{Deserialize, Serialize};

/// One normalized dictionary entry, built fresh per extraction.
///
/// `pronunciation` and `meanings` are always serialized, empty when the
/// language section is absent. Everything optional inside a `Meaning` is
/// omitted from JSON when missing, except `translation`, which is emitted as
/// null so every example has the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub pronunciation: Vec<PronunciationGroup>,
    pub meanings: Vec<Meaning>,
}

/// One pronunciation notation, e.g. kind "IPA" with values ["/el/", "/əl/"].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PronunciationGroup {
    pub kind: String,
    pub values: Vec<String>,
}

/// One part-of-speech sense group: optional etymology, a label, ordered
/// definitions, and relation-term lists present only when non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    pub values: Vec<DefinitionValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub see_also: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_terms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antonyms: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionValue {
    pub text: String,
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub example: String,
    pub translation: Option<String>,
}
