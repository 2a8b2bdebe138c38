//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let payload = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, payload)
}

#[rstest]
fn invalid_requests_map_to_bad_request() {
    let error = Error::invalid_request("bad");
    assert_eq!(ResponseError::status_code(&error), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_message_and_details(trace_id: String) {
    let error = Error::invalid_request("source developer handle must not be empty")
        .with_trace_id(trace_id)
        .with_details(json!({"field": "source"}));

    let (status, header, payload) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(header.as_deref(), Some(TRACE_ID));
    assert_eq!(payload, error);
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let (_, header, payload) = render(&Error::invalid_request("bad")).await;
    assert!(header.is_none());
    assert!(payload.trace_id().is_none());
}
