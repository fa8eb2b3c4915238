use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

use super::blueprint::{AssessmentBlueprint, TraitSection};
use super::domain::{AssessmentError, LikertValue, QuestionId, ResponseSet, TraitKind};
use super::scoring::{score_section, TraitScore, TraitScores};
use super::submission::SubmissionRecord;
use crate::workflows::eligibility::RespondentProfile;

/// Where a session sits in the section-by-section walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "section", rename_all = "snake_case")]
pub enum SessionPhase {
    Section(usize),
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.answered as f64 * 100.0 / self.total as f64
    }
}

/// One respondent's pass through the questionnaire.
///
/// Sections are visited in order: moving forward requires the current section to be
/// fully answered, moving back never does, and submission happens from the last
/// section only.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    blueprint: Arc<AssessmentBlueprint>,
    responses: ResponseSet,
    phase: SessionPhase,
}

impl AssessmentSession {
    pub fn new(blueprint: Arc<AssessmentBlueprint>) -> Self {
        Self {
            blueprint,
            responses: ResponseSet::default(),
            phase: SessionPhase::Section(0),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn current_section(&self) -> Option<&TraitSection> {
        match self.phase {
            SessionPhase::Section(index) => self.blueprint.section(index),
            SessionPhase::Finalized => None,
        }
    }

    pub fn is_on_final_section(&self) -> bool {
        self.phase == SessionPhase::Section(self.blueprint.last_section_index())
    }

    pub fn progress(&self) -> Progress {
        Progress {
            answered: self.responses.len(),
            total: self.blueprint.question_count(),
        }
    }

    pub fn record_answer(
        &mut self,
        question: QuestionId,
        value: LikertValue,
    ) -> Result<(), AssessmentError> {
        self.ensure_open()?;
        self.responses.record(question, value);
        Ok(())
    }

    /// True when every question of section `index` has an answer; false for unknown sections.
    pub fn is_section_complete(&self, index: usize) -> bool {
        self.blueprint
            .section(index)
            .is_some_and(|section| self.missing_in(section).is_empty())
    }

    /// Moves to the next section, staying put on the last one.
    pub fn advance_section(&mut self) -> Result<usize, AssessmentError> {
        let current = self.open_section_index()?;
        self.ensure_section_complete(current)?;

        let next = (current + 1).min(self.blueprint.last_section_index());
        self.phase = SessionPhase::Section(next);
        Ok(next)
    }

    /// Moves to the previous section, staying put on the first one.
    pub fn retreat_section(&mut self) -> Result<usize, AssessmentError> {
        let current = self.open_section_index()?;
        let previous = current.saturating_sub(1);
        self.phase = SessionPhase::Section(previous);
        Ok(previous)
    }

    /// Average for one trait, counting unanswered questions as zero.
    pub fn compute_trait_score(&self, kind: TraitKind) -> TraitScore {
        self.blueprint
            .section_for(kind)
            .map(|section| score_section(section, &self.responses))
            .unwrap_or_default()
    }

    pub fn trait_scores(&self) -> TraitScores {
        TraitScores::from_fn(|kind| self.compute_trait_score(kind))
    }

    /// Scores the session and closes it, stamping the record with the current local time.
    pub fn finalize(
        &mut self,
        respondent: &RespondentProfile,
    ) -> Result<SubmissionRecord, AssessmentError> {
        self.finalize_at(respondent, Local::now())
    }

    /// Closes the session once every section is complete.
    ///
    /// The completeness check covers all sections, not only the one on screen, so a
    /// respondent who stepped back and skipped ahead cannot submit a partially answered
    /// questionnaire. Scoring still treats missing answers as zero, which only matters
    /// for callers that score an open session directly.
    pub fn finalize_at(
        &mut self,
        respondent: &RespondentProfile,
        timestamp: DateTime<Local>,
    ) -> Result<SubmissionRecord, AssessmentError> {
        let current = self.open_section_index()?;
        let last = self.blueprint.last_section_index();
        if current != last {
            return Err(AssessmentError::NotOnFinalSection { current });
        }

        self.ensure_section_complete(last)?;
        for index in 0..last {
            self.ensure_section_complete(index)?;
        }

        let record = SubmissionRecord::new(timestamp, respondent, self.trait_scores());
        self.phase = SessionPhase::Finalized;
        Ok(record)
    }

    fn ensure_open(&self) -> Result<(), AssessmentError> {
        self.open_section_index().map(|_| ())
    }

    fn open_section_index(&self) -> Result<usize, AssessmentError> {
        match self.phase {
            SessionPhase::Section(index) => Ok(index),
            SessionPhase::Finalized => Err(AssessmentError::AlreadyFinalized),
        }
    }

    fn ensure_section_complete(&self, index: usize) -> Result<(), AssessmentError> {
        let Some(section) = self.blueprint.section(index) else {
            return Ok(());
        };

        let missing = self.missing_in(section);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssessmentError::Completion {
                section: section.kind,
                missing,
            })
        }
    }

    fn missing_in(&self, section: &TraitSection) -> Vec<QuestionId> {
        section
            .question_ids()
            .filter(|id| !self.responses.contains(*id))
            .collect()
    }
}
