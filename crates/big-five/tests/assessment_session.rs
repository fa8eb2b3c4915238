use big_five::workflows::assessment::{
    AssessmentBlueprint, AssessmentError, AssessmentSession, LikertValue, QuestionId,
    SessionPhase, TraitKind,
};
use big_five::workflows::eligibility::RespondentProfile;
use std::sync::Arc;

fn session() -> AssessmentSession {
    AssessmentSession::new(Arc::new(AssessmentBlueprint::standard()))
}

fn qid(id: u8) -> QuestionId {
    QuestionId::try_from(id).expect("valid question id")
}

fn likert(value: u8) -> LikertValue {
    LikertValue::try_from(value).expect("valid likert value")
}

fn respondent() -> RespondentProfile {
    RespondentProfile {
        cnic: "12345-1234567-1".to_string(),
        name: "Ayesha Khan".to_string(),
        city: "Lahore".to_string(),
        dealership: "Gulberg Motors".to_string(),
    }
}

#[test]
fn uniform_answers_of_three_score_three_everywhere() {
    let mut session = session();
    for id in QuestionId::all() {
        session.record_answer(id, likert(3)).expect("open");
    }
    while !session.is_on_final_section() {
        session.advance_section().expect("every section complete");
    }

    let record = session.finalize(&respondent()).expect("finalizes");
    for kind in TraitKind::ordered() {
        assert_eq!(record.scores().get(kind).to_string(), "3.0", "{kind}");
    }
    assert_eq!(record.respondent_name(), "Ayesha Khan");
    assert_eq!(record.region(), "Lahore");

    let payload = record.payload();
    assert_eq!(payload.identifier, "12345-1234567-1");
    assert_eq!(payload.conscientiousness_score, 3.0);
    assert_eq!(session.phase(), SessionPhase::Finalized);
}

#[test]
fn section_scores_match_reference_values() {
    let mut session = session();
    for id in 1..=6 {
        session.record_answer(qid(id), likert(5)).expect("open");
    }
    for (id, value) in (7..=11).zip(1..=5) {
        session.record_answer(qid(id), likert(value)).expect("open");
    }

    assert_eq!(session.compute_trait_score(TraitKind::Openness).to_string(), "5.0");
    assert_eq!(
        session
            .compute_trait_score(TraitKind::Conscientiousness)
            .to_string(),
        "2.5"
    );
}

#[test]
fn recording_the_same_answer_twice_is_idempotent() {
    let mut session = session();
    session.record_answer(qid(5), likert(4)).expect("open");
    session.record_answer(qid(5), likert(4)).expect("open");

    let answers: Vec<(u8, u8)> = session
        .responses()
        .iter()
        .map(|(id, value)| (id.get(), value.value()))
        .collect();
    assert_eq!(answers, vec![(5, 4)]);
}

#[test]
fn later_answers_overwrite_earlier_ones() {
    let mut session = session();
    session.record_answer(qid(9), likert(1)).expect("open");
    session.record_answer(qid(9), likert(5)).expect("open");
    assert_eq!(session.responses().get(qid(9)), Some(LikertValue::StronglyAgree));
    assert_eq!(session.progress().answered, 1);
}

#[test]
fn completeness_is_unaffected_by_unrelated_answers() {
    let mut session = session();
    for id in 7..=12 {
        session.record_answer(qid(id), likert(2)).expect("open");
    }
    assert!(session.is_section_complete(1));
    session.record_answer(qid(20), likert(2)).expect("open");
    assert!(session.is_section_complete(1));
    assert!(!session.is_section_complete(0));
    assert!(!session.is_section_complete(3));
}

#[test]
fn advancing_from_an_incomplete_section_keeps_the_index() {
    let mut session = session();
    session.record_answer(qid(1), likert(4)).expect("open");

    let err = session.advance_section().expect_err("section incomplete");
    assert!(matches!(
        err,
        AssessmentError::Completion {
            section: TraitKind::Openness,
            ..
        }
    ));
    assert_eq!(session.phase(), SessionPhase::Section(0));
}

#[test]
fn retreat_is_never_blocked_and_clamps_at_zero() {
    let mut session = session();
    for id in 1..=12 {
        session.record_answer(qid(id), likert(3)).expect("open");
    }
    assert_eq!(session.advance_section(), Ok(1));
    assert_eq!(session.advance_section(), Ok(2));
    assert_eq!(session.retreat_section(), Ok(1));
    assert_eq!(session.retreat_section(), Ok(0));
    assert_eq!(session.retreat_section(), Ok(0));
}
