use super::common::*;
use crate::workflows::assessment::{AssessmentError, AssessmentServiceError, TraitKind};
use crate::workflows::delivery::DeliveryError;
use crate::workflows::eligibility::EligibilityError;

#[test]
fn submit_scores_enriches_and_delivers() {
    let (service, sink) = build_service();
    let mut responses = uniform_responses(3);
    for id in 1..=6 {
        responses.insert(id, 5);
    }

    let record = service
        .submit(request("12345 1234567 1", responses))
        .expect("submission succeeds");

    assert_eq!(record.respondent_identifier(), "12345-1234567-1");
    assert_eq!(record.respondent_name(), "Ayesha Khan");
    assert_eq!(record.region(), "Lahore");
    assert_eq!(record.dealership(), "Gulberg Motors");
    assert_eq!(record.scores().get(TraitKind::Openness).to_string(), "5.0");
    assert_eq!(record.scores().get(TraitKind::EmotionalStability).to_string(), "3.0");

    let delivered = sink.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].city, "Lahore");
    assert_eq!(delivered[0].openness_score, 5.0);
    assert_eq!(delivered[0].stability_score, 3.0);
}

#[test]
fn submit_rejects_malformed_and_unknown_identifiers_without_delivery() {
    let (service, sink) = build_service();

    match service.submit(request("12345-123", uniform_responses(3))) {
        Err(AssessmentServiceError::Eligibility(EligibilityError::Format { canonical })) => {
            assert_eq!(canonical, "12345-123")
        }
        other => panic!("expected format error, got {other:?}"),
    }

    match service.submit(request("99999-9999999-9", uniform_responses(3))) {
        Err(AssessmentServiceError::Eligibility(EligibilityError::NotFound { .. })) => {}
        other => panic!("expected not found error, got {other:?}"),
    }

    assert!(sink.delivered().is_empty());
}

#[test]
fn submit_reports_first_incomplete_section() {
    let (service, sink) = build_service();
    let mut responses = uniform_responses(4);
    responses.remove(&14);
    responses.remove(&29);

    match service.submit(request("12345-1234567-1", responses)) {
        Err(AssessmentServiceError::Assessment(AssessmentError::Completion { section, missing })) => {
            assert_eq!(section, TraitKind::Extraversion);
            assert_eq!(missing.iter().map(|id| id.get()).collect::<Vec<_>>(), vec![14]);
        }
        other => panic!("expected completion error, got {other:?}"),
    }
    assert!(sink.delivered().is_empty());
}

#[test]
fn submit_rejects_out_of_domain_answers() {
    let (service, _) = build_service();

    let mut responses = uniform_responses(3);
    responses.insert(12, 6);
    match service.submit(request("12345-1234567-1", responses)) {
        Err(AssessmentServiceError::Assessment(AssessmentError::InvalidAnswer { value: 6 })) => {}
        other => panic!("expected invalid answer, got {other:?}"),
    }

    let mut responses = uniform_responses(3);
    responses.insert(31, 3);
    match service.submit(request("12345-1234567-1", responses)) {
        Err(AssessmentServiceError::Assessment(AssessmentError::UnknownQuestion { id: 31 })) => {}
        other => panic!("expected unknown question, got {other:?}"),
    }
}

#[test]
fn submit_surfaces_delivery_failures() {
    let service = offline_service();
    match service.submit(request("42101-7654321-3", uniform_responses(2))) {
        Err(AssessmentServiceError::Delivery(DeliveryError::Backend(message))) => {
            assert!(message.contains("unreachable"))
        }
        other => panic!("expected delivery error, got {other:?}"),
    }
}

#[test]
fn check_eligibility_returns_enriched_profile() {
    let (service, _) = build_service();
    let enriched = service
        .check_eligibility(&typed_profile("4210176543213"))
        .expect("on roster");
    assert_eq!(enriched.cnic, "42101-7654321-3");
    assert_eq!(enriched.name, "Sana Malik");
    assert_eq!(enriched.city, "Karachi");
}

#[test]
fn questionnaire_lists_sections_scale_and_cities() {
    let (service, _) = build_service();
    let view = service.questionnaire();
    assert_eq!(view.question_count, 30);
    assert_eq!(view.sections.len(), 5);
    assert_eq!(view.scale.len(), 5);
    assert_eq!(view.scale[0].label, "Strongly Disagree");
    assert!(view.cities.contains(&"Islamabad"));
}
