use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const QUESTION_COUNT: u8 = 30;

/// Identifier of one of the 30 fixed questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct QuestionId(pub(crate) u8);

impl QuestionId {
    pub const fn get(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = QuestionId> {
        (1..=QUESTION_COUNT).map(QuestionId)
    }
}

impl TryFrom<u8> for QuestionId {
    type Error = AssessmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=QUESTION_COUNT).contains(&value) {
            Ok(Self(value))
        } else {
            Err(AssessmentError::UnknownQuestion { id: value })
        }
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five-point agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LikertValue {
    StronglyDisagree = 1,
    Disagree = 2,
    Neutral = 3,
    Agree = 4,
    StronglyAgree = 5,
}

impl LikertValue {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::StronglyDisagree,
            Self::Disagree,
            Self::Neutral,
            Self::Agree,
            Self::StronglyAgree,
        ]
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StronglyDisagree => "Strongly Disagree",
            Self::Disagree => "Disagree",
            Self::Neutral => "Neutral",
            Self::Agree => "Agree",
            Self::StronglyAgree => "Strongly Agree",
        }
    }
}

impl TryFrom<u8> for LikertValue {
    type Error = AssessmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ordered()
            .into_iter()
            .find(|candidate| candidate.value() == value)
            .ok_or(AssessmentError::InvalidAnswer { value })
    }
}

impl Serialize for LikertValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for LikertValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// Personality dimension measured by one section of the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    EmotionalStability,
}

impl TraitKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Openness,
            Self::Conscientiousness,
            Self::Extraversion,
            Self::Agreeableness,
            Self::EmotionalStability,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Openness => "Openness",
            Self::Conscientiousness => "Conscientiousness",
            Self::Extraversion => "Extraversion",
            Self::Agreeableness => "Agreeableness",
            Self::EmotionalStability => "Emotional Stability",
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Answers recorded so far. Re-recording a question replaces its answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseSet {
    answers: BTreeMap<QuestionId, LikertValue>,
}

impl ResponseSet {
    pub fn record(&mut self, question: QuestionId, value: LikertValue) {
        self.answers.insert(question, value);
    }

    pub fn get(&self, question: QuestionId) -> Option<LikertValue> {
        self.answers.get(&question).copied()
    }

    pub fn contains(&self, question: QuestionId) -> bool {
        self.answers.contains_key(&question)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, LikertValue)> + '_ {
        self.answers.iter().map(|(id, value)| (*id, *value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssessmentError {
    #[error("question {id} is not part of the assessment")]
    UnknownQuestion { id: u8 },
    #[error("answer {value} is outside the 1-5 scale")]
    InvalidAnswer { value: u8 },
    #[error("Please answer all questions in the {section} section to continue.")]
    Completion {
        section: TraitKind,
        missing: Vec<QuestionId>,
    },
    #[error("the assessment can only be submitted from the last section (currently on page {})", .current + 1)]
    NotOnFinalSection { current: usize },
    #[error("the assessment has already been submitted")]
    AlreadyFinalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_ids_are_bounded() {
        assert_eq!(QuestionId::try_from(1).map(QuestionId::get), Ok(1));
        assert_eq!(QuestionId::try_from(30).map(QuestionId::get), Ok(30));
        assert_eq!(
            QuestionId::try_from(0),
            Err(AssessmentError::UnknownQuestion { id: 0 })
        );
        assert_eq!(
            QuestionId::try_from(31),
            Err(AssessmentError::UnknownQuestion { id: 31 })
        );
        assert_eq!(QuestionId::all().count(), 30);
    }

    #[test]
    fn likert_scale_rejects_out_of_domain_values() {
        assert_eq!(LikertValue::try_from(3), Ok(LikertValue::Neutral));
        assert_eq!(LikertValue::try_from(5).map(LikertValue::label), Ok("Strongly Agree"));
        assert_eq!(
            LikertValue::try_from(0),
            Err(AssessmentError::InvalidAnswer { value: 0 })
        );
        assert_eq!(
            LikertValue::try_from(6),
            Err(AssessmentError::InvalidAnswer { value: 6 })
        );

        let parsed: Result<LikertValue, _> = serde_json::from_str("7");
        assert!(parsed.is_err());
    }

    #[test]
    fn recording_twice_keeps_one_entry() {
        let mut responses = ResponseSet::default();
        let id = QuestionId::try_from(5).expect("valid id");
        responses.record(id, LikertValue::Agree);
        responses.record(id, LikertValue::Agree);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses.get(id), Some(LikertValue::Agree));
    }
}
