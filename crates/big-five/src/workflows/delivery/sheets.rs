use google_sheets4::api::{Scope, ValueRange};
use google_sheets4::{hyper_rustls, hyper_util, yup_oauth2, Sheets};
use serde_json::Value;
use tokio::runtime::Handle;
use tracing::{debug, info};

use super::{DeliveryError, SubmissionSink};
use crate::config::{CredentialSource, SheetsConfig};
use crate::workflows::assessment::SubmissionRecord;

pub type SheetsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;

const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Appends one spreadsheet row per submission through the generated Sheets v4 client.
///
/// `deliver` blocks on the captured runtime handle, so it must run off the async
/// executor (for example inside `tokio::task::spawn_blocking`).
pub struct GoogleSheetsSink<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    hub: Sheets<C>,
    spreadsheet_id: String,
    range: String,
    runtime: Handle,
}

impl<C> GoogleSheetsSink<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    pub fn new(hub: Sheets<C>, spreadsheet_id: String, range: String, runtime: Handle) -> Self {
        Self {
            hub,
            spreadsheet_id,
            range,
            runtime,
        }
    }

    fn map_error<E: std::fmt::Display>(err: E) -> DeliveryError {
        DeliveryError::Backend(err.to_string())
    }
}

impl GoogleSheetsSink<SheetsConnector> {
    /// Authenticates with the configured service account and builds the hub.
    ///
    /// Must be called from within a Tokio runtime; its handle is kept for `deliver`.
    pub async fn connect(config: &SheetsConfig) -> Result<Self, DeliveryError> {
        let spreadsheet_id = config
            .require_spreadsheet_id()
            .map_err(|err| DeliveryError::Credentials(err.to_string()))?
            .to_string();

        let key = match &config.credentials {
            CredentialSource::Inline(json) => yup_oauth2::parse_service_account_key(json),
            CredentialSource::KeyFile(path) => yup_oauth2::read_service_account_key(path).await,
        }
        .map_err(|err| DeliveryError::Credentials(err.to_string()))?;

        let auth = yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|err| DeliveryError::Credentials(err.to_string()))?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|err| DeliveryError::Runtime(err.to_string()))?
            .https_only()
            .enable_http2()
            .build();
        let client = hyper_util::client::legacy::Client::builder(
            hyper_util::rt::TokioExecutor::new(),
        )
        .build(connector);

        let runtime = Handle::try_current().map_err(|err| DeliveryError::Runtime(err.to_string()))?;
        info!(range = %config.range, "google sheets delivery configured");
        Ok(Self::new(
            Sheets::new(client, auth),
            spreadsheet_id,
            config.range.clone(),
            runtime,
        ))
    }
}

impl<C> std::fmt::Debug for GoogleSheetsSink<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleSheetsSink")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

impl<C> SubmissionSink for GoogleSheetsSink<C>
where
    C: google_sheets4::common::Connector + Send + Sync + 'static,
{
    fn deliver(&self, record: &SubmissionRecord) -> Result<(), DeliveryError> {
        let request = ValueRange {
            values: Some(vec![sheet_row(record)]),
            ..ValueRange::default()
        };

        let result = self.runtime.block_on(async {
            self.hub
                .spreadsheets()
                .values_append(request, &self.spreadsheet_id, &self.range)
                .value_input_option("USER_ENTERED")
                .add_scope(Scope::Spreadsheet)
                .doit()
                .await
        });

        let (_, response) = result.map_err(GoogleSheetsSink::<C>::map_error)?;
        debug!(
            updated_range = response
                .updates
                .as_ref()
                .and_then(|updates| updates.updated_range.as_deref())
                .unwrap_or("unknown"),
            "submission row appended"
        );
        Ok(())
    }
}

/// Column order A..J of the results sheet.
pub fn sheet_row(record: &SubmissionRecord) -> Vec<Value> {
    let scores = record.scores();
    vec![
        Value::String(record.timestamp().format(TIMESTAMP_FORMAT).to_string()),
        Value::String(record.respondent_name().to_string()),
        Value::String(record.respondent_identifier().to_string()),
        Value::String(record.dealership().to_string()),
        Value::String(record.region().to_string()),
        Value::String(scores.openness.to_string()),
        Value::String(scores.conscientiousness.to_string()),
        Value::String(scores.extraversion.to_string()),
        Value::String(scores.agreeableness.to_string()),
        Value::String(scores.emotional_stability.to_string()),
    ]
}
