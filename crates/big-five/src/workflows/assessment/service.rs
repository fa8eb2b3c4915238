use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info};

use super::blueprint::{AssessmentBlueprint, TraitSection, CITY_OPTIONS};
use super::domain::{AssessmentError, LikertValue, QuestionId};
use super::session::AssessmentSession;
use super::submission::SubmissionRecord;
use crate::workflows::delivery::{DeliveryError, SubmissionSink};
use crate::workflows::eligibility::{EligibilityError, EligibilityGate, RespondentProfile};
use crate::workflows::roster::Roster;

/// Body of a submission: the respondent plus raw answers keyed by question id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub user: RespondentProfile,
    #[serde(default)]
    pub responses: BTreeMap<u8, u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaleOption {
    pub value: u8,
    pub label: &'static str,
}

/// Everything a client needs to render the questionnaire.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireView {
    pub question_count: usize,
    pub sections: Vec<TraitSection>,
    pub scale: Vec<ScaleOption>,
    pub cities: Vec<&'static str>,
}

/// Service composing the eligibility gate, the questionnaire engine, and delivery.
pub struct AssessmentService<S> {
    gate: EligibilityGate,
    blueprint: Arc<AssessmentBlueprint>,
    sink: Arc<S>,
}

impl<S> AssessmentService<S>
where
    S: SubmissionSink + 'static,
{
    pub fn new(roster: Arc<Roster>, blueprint: Arc<AssessmentBlueprint>, sink: Arc<S>) -> Self {
        Self {
            gate: EligibilityGate::new(roster),
            blueprint,
            sink,
        }
    }

    pub fn gate(&self) -> &EligibilityGate {
        &self.gate
    }

    pub fn questionnaire(&self) -> QuestionnaireView {
        QuestionnaireView {
            question_count: self.blueprint.question_count(),
            sections: self.blueprint.sections().to_vec(),
            scale: LikertValue::ordered()
                .into_iter()
                .map(|value| ScaleOption {
                    value: value.value(),
                    label: value.label(),
                })
                .collect(),
            cities: CITY_OPTIONS.to_vec(),
        }
    }

    /// Confirms the respondent is on the roster and returns the roster-enriched profile.
    pub fn check_eligibility(
        &self,
        profile: &RespondentProfile,
    ) -> Result<RespondentProfile, AssessmentServiceError> {
        let enriched = self.gate.enrich(profile)?;
        info!(cnic = %enriched.cnic, "respondent admitted");
        Ok(enriched)
    }

    /// Scores a full set of answers and hands the record to the sink.
    ///
    /// Answers are replayed through a session exactly as a respondent would page through
    /// the questionnaire, so the first incomplete section is what gets reported.
    pub fn submit(
        &self,
        request: SubmissionRequest,
    ) -> Result<SubmissionRecord, AssessmentServiceError> {
        let SubmissionRequest { user, responses } = request;
        let respondent = self.gate.enrich(&user)?;

        let mut session = AssessmentSession::new(self.blueprint.clone());
        for (id, value) in responses {
            let question = QuestionId::try_from(id)?;
            let value = LikertValue::try_from(value)?;
            session.record_answer(question, value)?;
        }
        while !session.is_on_final_section() {
            session.advance_section()?;
        }
        let record = session.finalize(&respondent)?;

        if let Err(err) = self.sink.deliver(&record) {
            error!(cnic = %respondent.cnic, error = %err, "submission delivery failed");
            return Err(err.into());
        }

        info!(
            cnic = %respondent.cnic,
            dealership = %respondent.dealership,
            "submission delivered"
        );
        Ok(record)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Eligibility(#[from] EligibilityError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
