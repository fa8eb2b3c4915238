use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::{
    AssessmentBlueprint, AssessmentService, SubmissionPayload, SubmissionRecord,
    SubmissionRequest,
};
use crate::workflows::delivery::{DeliveryError, SubmissionSink};
use crate::workflows::eligibility::RespondentProfile;
use crate::workflows::roster::{Roster, RosterEntry};

pub(super) fn roster() -> Roster {
    Roster::from_entries(vec![
        RosterEntry {
            identifier: "12345-1234567-1".to_string(),
            name: "Ayesha Khan".to_string(),
            region: "Lahore".to_string(),
            dealership: "Gulberg Motors".to_string(),
        },
        RosterEntry {
            identifier: "42101-7654321-3".to_string(),
            name: "Sana Malik".to_string(),
            region: "Karachi".to_string(),
            dealership: "Clifton Auto".to_string(),
        },
    ])
}

pub(super) fn typed_profile(cnic: &str) -> RespondentProfile {
    RespondentProfile {
        cnic: cnic.to_string(),
        name: "typed name".to_string(),
        city: "Multan".to_string(),
        dealership: "typed dealership".to_string(),
    }
}

pub(super) fn uniform_responses(value: u8) -> BTreeMap<u8, u8> {
    (1..=30).map(|id| (id, value)).collect()
}

pub(super) fn request(cnic: &str, responses: BTreeMap<u8, u8>) -> SubmissionRequest {
    SubmissionRequest {
        user: typed_profile(cnic),
        responses,
    }
}

#[derive(Default)]
pub(super) struct MemorySink {
    delivered: Mutex<Vec<SubmissionPayload>>,
}

impl MemorySink {
    pub(super) fn delivered(&self) -> Vec<SubmissionPayload> {
        self.delivered.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for MemorySink {
    fn deliver(&self, record: &SubmissionRecord) -> Result<(), DeliveryError> {
        self.delivered
            .lock()
            .expect("sink mutex poisoned")
            .push(record.payload());
        Ok(())
    }
}

pub(super) struct OfflineSink;

impl SubmissionSink for OfflineSink {
    fn deliver(&self, _record: &SubmissionRecord) -> Result<(), DeliveryError> {
        Err(DeliveryError::Backend("sheets api unreachable".to_string()))
    }
}

pub(super) fn build_service() -> (Arc<AssessmentService<MemorySink>>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::default());
    let service = AssessmentService::new(
        Arc::new(roster()),
        Arc::new(AssessmentBlueprint::standard()),
        sink.clone(),
    );
    (Arc::new(service), sink)
}

pub(super) fn offline_service() -> Arc<AssessmentService<OfflineSink>> {
    Arc::new(AssessmentService::new(
        Arc::new(roster()),
        Arc::new(AssessmentBlueprint::standard()),
        Arc::new(OfflineSink),
    ))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
