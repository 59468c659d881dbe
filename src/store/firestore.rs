//! Firestore REST client
//!
//! Writes appointments through the Firestore v1 REST API
//! (`projects/{project}/databases/{database}/documents/{collection}`).
//! Works against the hosted service or the local emulator.

use super::{AppointmentStore, StoreError};
use crate::config::FirestoreSettings;
use crate::state::AppointmentRecord;
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Client for adding documents to Firestore.
///
/// Appointment dates are stored as midnight in `zone`, the user's local
/// time zone unless overridden.
pub struct FirestoreClient<Tz = Local> {
    http: reqwest::Client,
    settings: FirestoreSettings,
    zone: Tz,
}

impl FirestoreClient {
    /// Create a new Firestore client
    pub fn new(settings: FirestoreSettings) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            settings,
            zone: Local,
        })
    }
}

impl<Tz: TimeZone> FirestoreClient<Tz> {
    /// Use `zone` instead of the local time zone for appointment dates
    #[cfg(test)]
    pub fn with_time_zone<Z: TimeZone>(self, zone: Z) -> FirestoreClient<Z> {
        FirestoreClient {
            http: self.http,
            settings: self.settings,
            zone,
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents/{}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.database_id,
            collection
        )
    }
}

#[async_trait]
impl<Tz> AppointmentStore for FirestoreClient<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    async fn add_document(
        &self,
        collection: &str,
        record: &AppointmentRecord,
    ) -> Result<String, StoreError> {
        let url = self.collection_url(collection);
        tracing::debug!(%url, "adding document");

        let document = Document::from_record(record, &self.zone);
        let mut request = self.http.post(&url).json(&document);
        if let Some(key) = &self.settings.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let created: CreatedDocument = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;
        tracing::info!(document = %created.name, "document created");
        Ok(created.name)
    }
}

/// A typed Firestore field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
enum Value {
    StringValue(String),
    TimestampValue(String),
}

impl Value {
    fn string(s: &str) -> Self {
        Value::StringValue(s.to_string())
    }

    fn timestamp(at: DateTime<Utc>) -> Self {
        Value::TimestampValue(at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

/// Request body for a document write
#[derive(Debug, Serialize)]
struct Document {
    fields: BTreeMap<&'static str, Value>,
}

impl Document {
    fn from_record<Tz: TimeZone>(record: &AppointmentRecord, zone: &Tz) -> Self {
        let date = start_of_day(record.date, zone);

        let fields = BTreeMap::from([
            ("name", Value::string(&record.name)),
            ("email", Value::string(&record.email)),
            ("date", Value::timestamp(date)),
            ("time", Value::StringValue(record.time.to_string())),
            ("notes", Value::string(&record.notes)),
            ("status", Value::string(&record.status)),
            ("createdAt", Value::timestamp(record.created_at)),
        ]);
        Self { fields }
    }
}

/// Midnight of `date` in `zone`, as a UTC instant.
///
/// When midnight does not exist (a DST gap at 00:00) midnight UTC is used.
fn start_of_day<Tz: TimeZone>(date: NaiveDate, zone: &Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    zone.from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}

/// Response body of a successful write
#[derive(Debug, Deserialize)]
struct CreatedDocument {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: String,
}

/// Extract a readable message from a Firestore error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) if error.status.is_empty() => error.message,
        Ok(ErrorEnvelope { error }) => format!("{}: {}", error.status, error.message),
        Err(_) if body.trim().is_empty() => "no response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AppointmentDraft, TimeSlot};
    use chrono::FixedOffset;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COLLECTION_PATH: &str = "/v1/projects/demo-project/databases/(default)/documents/appointments";

    fn sample_record() -> AppointmentRecord {
        AppointmentDraft {
            name: "Ana".to_string(),
            email: "a@x.com".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1),
            time: TimeSlot::new(9),
            notes: String::new(),
        }
        .to_record(Utc.with_ymd_and_hms(2024, 4, 20, 8, 30, 0).unwrap())
        .unwrap()
    }

    fn settings(endpoint: String, api_key: Option<&str>) -> FirestoreSettings {
        FirestoreSettings {
            endpoint,
            project_id: "demo-project".to_string(),
            database_id: "(default)".to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    /// Client that stores dates as midnight UTC regardless of the host zone
    fn utc_client(settings: FirestoreSettings) -> FirestoreClient<Utc> {
        FirestoreClient::new(settings).unwrap().with_time_zone(Utc)
    }

    fn expected_body() -> serde_json::Value {
        expected_body_with_date("2024-05-01T00:00:00.000Z")
    }

    fn expected_body_with_date(date: &str) -> serde_json::Value {
        json!({
            "fields": {
                "name": { "stringValue": "Ana" },
                "email": { "stringValue": "a@x.com" },
                "date": { "timestampValue": date },
                "time": { "stringValue": "9:00" },
                "notes": { "stringValue": "" },
                "status": { "stringValue": "pending" },
                "createdAt": { "timestampValue": "2024-04-20T08:30:00.000Z" }
            }
        })
    }

    #[test]
    fn test_document_encoding() {
        let body = serde_json::to_value(Document::from_record(&sample_record(), &Utc)).unwrap();
        assert_eq!(body, expected_body());
    }

    #[test]
    fn test_date_is_midnight_in_users_zone() {
        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        let body = serde_json::to_value(Document::from_record(&sample_record(), &new_york)).unwrap();
        assert_eq!(body, expected_body_with_date("2024-05-01T04:00:00.000Z"));

        // The stored instant still falls on the chosen day in that zone
        let stored = start_of_day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), &new_york);
        assert_eq!(
            stored.with_timezone(&new_york).date_naive(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_date_east_of_utc_starts_the_previous_utc_day() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let stored = start_of_day(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), &tokyo);
        assert_eq!(
            stored.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2024-04-30T15:00:00.000Z"
        );
    }

    #[tokio::test]
    async fn test_add_document_uses_client_zone() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .and(body_json(expected_body_with_date("2024-05-01T04:00:00.000Z")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/demo-project/databases/(default)/documents/appointments/ny"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = FirestoreClient::new(settings(mock_server.uri(), None))
            .unwrap()
            .with_time_zone(FixedOffset::west_opt(4 * 3600).unwrap());
        let result = client.add_document("appointments", &sample_record()).await;

        assert!(result.is_ok());
    }

    #[test]
    fn test_collection_url_trims_trailing_slash() {
        let client =
            FirestoreClient::new(settings("http://localhost:8080/".to_string(), None)).unwrap();
        assert_eq!(
            client.collection_url("appointments"),
            format!("http://localhost:8080{COLLECTION_PATH}")
        );
    }

    #[test]
    fn test_error_message_with_status() {
        let body = r#"{"error":{"code":403,"message":"Missing permissions","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "PERMISSION_DENIED: Missing permissions");
    }

    #[test]
    fn test_error_message_without_status() {
        let body = r#"{"error":{"code":400,"message":"Bad field"}}"#;
        assert_eq!(error_message(body), "Bad field");
    }

    #[test]
    fn test_error_message_plain_body() {
        assert_eq!(error_message("  upstream down \n"), "upstream down");
        assert_eq!(error_message(""), "no response body");
    }

    #[tokio::test]
    async fn test_add_document_posts_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .and(query_param("key", "test-key"))
            .and(body_json(expected_body()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/demo-project/databases/(default)/documents/appointments/abc123",
                "fields": {}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = utc_client(settings(mock_server.uri(), Some("test-key")));
        let name = client
            .add_document("appointments", &sample_record())
            .await
            .unwrap();

        assert_eq!(
            name,
            "projects/demo-project/databases/(default)/documents/appointments/abc123"
        );
    }

    #[tokio::test]
    async fn test_add_document_without_api_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/demo-project/databases/(default)/documents/appointments/x"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = utc_client(settings(mock_server.uri(), None));
        let result = client.add_document("appointments", &sample_record()).await;

        assert!(result.is_ok());
        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query().is_none());
    }

    #[tokio::test]
    async fn test_add_document_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {
                    "code": 403,
                    "message": "Missing or insufficient permissions.",
                    "status": "PERMISSION_DENIED"
                }
            })))
            .mount(&mock_server)
            .await;

        let client = utc_client(settings(mock_server.uri(), None));
        let err = client
            .add_document("appointments", &sample_record())
            .await
            .unwrap_err();

        match err {
            StoreError::Rejected { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(
                    message,
                    "PERMISSION_DENIED: Missing or insufficient permissions."
                );
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_document_server_error_without_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let client = utc_client(settings(mock_server.uri(), None));
        let err = client
            .add_document("appointments", &sample_record())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Rejected { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_add_document_invalid_success_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(COLLECTION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = utc_client(settings(mock_server.uri(), None));
        let err = client
            .add_document("appointments", &sample_record())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_add_document_unreachable_store() {
        // Nothing listens on port 9 (discard) in test environments
        let client =
            FirestoreClient::new(settings("http://127.0.0.1:9".to_string(), None)).unwrap();
        let err = client
            .add_document("appointments", &sample_record())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Transport(_)));
    }
}
