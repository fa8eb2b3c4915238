//! Questionnaire definition, section-by-section answering, trait scoring, and the
//! submission service tying the roster gate and the delivery sink together.

mod blueprint;
pub mod domain;
pub mod router;
mod scoring;
pub mod service;
mod session;
mod submission;

#[cfg(test)]
mod tests;

pub use blueprint::{AssessmentBlueprint, QuestionDefinition, TraitSection, CITY_OPTIONS};
pub use domain::{AssessmentError, LikertValue, QuestionId, ResponseSet, TraitKind};
pub use router::assessment_router;
pub use scoring::{score_section, TraitScore, TraitScores};
pub use service::{
    AssessmentService, AssessmentServiceError, QuestionnaireView, ScaleOption, SubmissionRequest,
};
pub use session::{AssessmentSession, Progress, SessionPhase};
pub use submission::{SubmissionPayload, SubmissionRecord};
