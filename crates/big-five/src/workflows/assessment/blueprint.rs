use serde::Serialize;

use super::domain::{QuestionId, TraitKind};

/// Development-center cities offered to respondents.
pub const CITY_OPTIONS: [&str; 4] = ["Karachi", "Lahore", "Islamabad", "Multan"];

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDefinition {
    pub id: QuestionId,
    pub text: &'static str,
}

/// Six contiguous questions measuring one trait.
#[derive(Debug, Clone, Serialize)]
pub struct TraitSection {
    pub kind: TraitKind,
    pub title: &'static str,
    pub questions: Vec<QuestionDefinition>,
}

impl TraitSection {
    pub fn question_ids(&self) -> impl Iterator<Item = QuestionId> + '_ {
        self.questions.iter().map(|question| question.id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug)]
pub struct AssessmentBlueprint {
    sections: Vec<TraitSection>,
}

impl AssessmentBlueprint {
    pub fn standard() -> Self {
        Self {
            sections: standard_sections(),
        }
    }

    pub fn sections(&self) -> &[TraitSection] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&TraitSection> {
        self.sections.get(index)
    }

    pub fn section_for(&self, kind: TraitKind) -> Option<&TraitSection> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    pub fn last_section_index(&self) -> usize {
        self.sections.len().saturating_sub(1)
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(TraitSection::len).sum()
    }

    pub fn question(&self, id: QuestionId) -> Option<&QuestionDefinition> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
            .find(|question| question.id == id)
    }
}

fn section(kind: TraitKind, first_id: u8, texts: [&'static str; 6]) -> TraitSection {
    let questions = texts
        .into_iter()
        .zip(first_id..)
        .map(|(text, id)| QuestionDefinition {
            id: QuestionId(id),
            text,
        })
        .collect();

    TraitSection {
        kind,
        title: kind.label(),
        questions,
    }
}

fn standard_sections() -> Vec<TraitSection> {
    vec![
        section(
            TraitKind::Openness,
            1,
            [
                "I enjoy talking to customers about their lifestyle, not just the product.",
                "I am comfortable when a sales conversation does not go exactly as planned.",
                "I like learning about customers who think or live differently from me.",
                "I can change my approach easily when a customer changes their mind.",
                "I am interested in understanding what matters to customers beyond price and features.",
                "I see new selling challenges as exciting rather than stressful.",
            ],
        ),
        section(
            TraitKind::Conscientiousness,
            7,
            [
                "I follow up with customers even if the deal is not closing right away.",
                "I prepare well before meeting senior or important customers.",
                "I keep my promises to customers and usually meet my commitments.",
                "I pay attention to details, especially when the situation is important.",
                "I plan my work instead of leaving things to the last minute.",
                "Customers would see me as organized and dependable.",
            ],
        ),
        section(
            TraitKind::Extraversion,
            13,
            [
                "I am comfortable starting conversations with new or senior customers.",
                "I usually guide the direction of a sales conversation.",
                "I feel confident sharing my views, even with influential customers.",
                "I get energy from meeting and talking with people.",
                "I am comfortable staying quiet when a customer wants space.",
                "I can stay confident without taking over the conversation.",
            ],
        ),
        section(
            TraitKind::Agreeableness,
            19,
            [
                "I try to fully understand a customer\u{2019}s concerns before responding.",
                "I stay respectful even when a customer disagrees with me.",
                "I can disagree with a customer while keeping the relationship positive.",
                "I avoid pushing customers to decide before they are ready.",
                "I notice body language and tone and adjust how I respond.",
                "Customers feel at ease sharing their expectations with me.",
            ],
        ),
        section(
            TraitKind::EmotionalStability,
            25,
            [
                "I stay calm when customers strongly question price or value.",
                "I do not take it personally when customers are silent or hesitant.",
                "I bounce back quickly after losing a sale.",
                "I remain composed with very confident or status-focused customers.",
                "I do not feel stressed when customers delay their decision.",
                "I do not judge my personal worth based on whether I close a sale.",
            ],
        ),
    ]
}
