use big_five::workflows::assessment::{SubmissionPayload, SubmissionRecord};
use big_five::workflows::delivery::{DeliveryError, SubmissionSink};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Keeps delivered submissions in memory instead of writing them to the spreadsheet.
#[derive(Default, Clone)]
pub(crate) struct InMemorySink {
    delivered: Arc<Mutex<Vec<SubmissionPayload>>>,
}

impl SubmissionSink for InMemorySink {
    fn deliver(&self, record: &SubmissionRecord) -> Result<(), DeliveryError> {
        let mut guard = self.delivered.lock().expect("sink mutex poisoned");
        guard.push(record.payload());
        Ok(())
    }
}

impl InMemorySink {
    pub(crate) fn delivered(&self) -> Vec<SubmissionPayload> {
        self.delivered.lock().expect("sink mutex poisoned").clone()
    }
}
