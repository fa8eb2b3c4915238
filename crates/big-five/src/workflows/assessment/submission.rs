use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::scoring::TraitScores;
use crate::workflows::eligibility::RespondentProfile;

/// Scored output of one completed questionnaire.
///
/// Only [`AssessmentSession::finalize`](super::AssessmentSession::finalize) builds one, and
/// it does so only once every question has an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord {
    timestamp: DateTime<Local>,
    respondent_name: String,
    respondent_identifier: String,
    dealership: String,
    region: String,
    scores: TraitScores,
}

impl SubmissionRecord {
    pub(crate) fn new(
        timestamp: DateTime<Local>,
        respondent: &RespondentProfile,
        scores: TraitScores,
    ) -> Self {
        Self {
            timestamp,
            respondent_name: respondent.name.clone(),
            respondent_identifier: respondent.cnic.clone(),
            dealership: respondent.dealership.clone(),
            region: respondent.city.clone(),
            scores,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn respondent_name(&self) -> &str {
        &self.respondent_name
    }

    pub fn respondent_identifier(&self) -> &str {
        &self.respondent_identifier
    }

    pub fn dealership(&self) -> &str {
        &self.dealership
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn scores(&self) -> &TraitScores {
        &self.scores
    }

    pub fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            timestamp: self.timestamp,
            name: self.respondent_name.clone(),
            identifier: self.respondent_identifier.clone(),
            dealership: self.dealership.clone(),
            city: self.region.clone(),
            openness_score: self.scores.openness.value(),
            conscientiousness_score: self.scores.conscientiousness.value(),
            extraversion_score: self.scores.extraversion.value(),
            agreeableness_score: self.scores.agreeableness.value(),
            stability_score: self.scores.emotional_stability.value(),
        }
    }
}

/// Wire shape handed to delivery collaborators and returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub timestamp: DateTime<Local>,
    pub name: String,
    pub identifier: String,
    pub dealership: String,
    pub city: String,
    pub openness_score: f64,
    pub conscientiousness_score: f64,
    pub extraversion_score: f64,
    pub agreeableness_score: f64,
    pub stability_score: f64,
}
