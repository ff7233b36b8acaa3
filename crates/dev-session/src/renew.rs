//! Session renewal request and response evaluation.
//!
//! The renewal endpoint answers with a small JSON document:
//!
//! ```json
//! {"result": "success", "errorCode": "200", "errorMsg": "GNL"}
//! ```
//!
//! Anything else on a 2xx status that isn't a JSON object is taken as
//! success, since the session was evidently reached.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::{RenewError, Result};

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Filler `errorMsg` values that carry no information.
const UNINFORMATIVE_MESSAGES: [&str; 3] = ["GNL", "OK", ""];

/// How a renewal that reached the server turned out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenewOutcome {
    /// The API confirmed the renewal. `message` is set when it said something useful.
    Renewed { message: Option<String> },
    /// The API answered but refused.
    Rejected {
        result: String,
        error_code: String,
        error_msg: String,
    },
    /// 2xx with a body that isn't a JSON object.
    AssumedSuccess { status: u16 },
}

impl RenewOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, RenewOutcome::Rejected { .. })
    }
}

/// Blocking client with [`REQUEST_TIMEOUT`] applied.
pub fn client() -> Result<Client> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Judge a 2xx response body.
pub fn evaluate_response(status: u16, body: &str) -> RenewOutcome {
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(body) else {
        return RenewOutcome::AssumedSuccess { status };
    };
    let result = string_field(&obj, "result").to_lowercase();
    let error_code = string_field(&obj, "errorCode");
    let error_msg = string_field(&obj, "errorMsg");

    if result == "success" && error_code == "200" {
        let message = (!UNINFORMATIVE_MESSAGES.contains(&error_msg.as_str())).then_some(error_msg);
        RenewOutcome::Renewed { message }
    } else {
        RenewOutcome::Rejected {
            result,
            error_code,
            error_msg,
        }
    }
}

/// Hit the renewal URL once and evaluate the answer.
pub fn renew(client: &Client, url: &str) -> Result<RenewOutcome> {
    log::info!("Attempting to renew LG Developer session: {url}");
    let response = client.get(url).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(RenewError::Status(status.as_u16()));
    }
    let body = response.text()?;
    log::debug!("API response: {body}");

    let outcome = evaluate_response(status.as_u16(), &body);
    match &outcome {
        RenewOutcome::Renewed { message: Some(msg) } => {
            log::info!("Session renewal successful: {msg}");
        }
        RenewOutcome::Renewed { message: None } => {
            log::info!("Session renewal successful, LG Developer session has been renewed");
        }
        RenewOutcome::Rejected {
            result,
            error_code,
            error_msg,
        } => {
            log::error!(
                "Session renewal failed according to API response (result: {result}, error code: {error_code}, error message: {error_msg})"
            );
        }
        RenewOutcome::AssumedSuccess { status } => {
            log::warn!("Could not parse JSON response, HTTP {status}: assuming success");
        }
    }
    Ok(outcome)
}


#[cfg(test)]
mod tests {
    use super::test_server::serve_once;
    use super::*;

    // ── evaluate_response ──

    #[test]
    fn success_with_filler_message() {
        let outcome = evaluate_response(
            200,
            r#"{"result": "success", "errorCode": "200", "errorMsg": "GNL"}"#,
        );
        assert_eq!(outcome, RenewOutcome::Renewed { message: None });
        assert!(outcome.is_success());
    }

    #[test]
    fn success_is_case_insensitive_and_keeps_real_message() {
        let outcome = evaluate_response(
            200,
            r#"{"result": "SUCCESS", "errorCode": "200", "errorMsg": "Session extended to 1000 hours"}"#,
        );
        assert_eq!(
            outcome,
            RenewOutcome::Renewed {
                message: Some("Session extended to 1000 hours".into())
            }
        );
    }

    #[test]
    fn numeric_error_code_accepted() {
        let outcome = evaluate_response(200, r#"{"result": "success", "errorCode": 200}"#);
        assert_eq!(outcome, RenewOutcome::Renewed { message: None });
    }

    #[test]
    fn rejection_carries_fields() {
        let outcome = evaluate_response(
            200,
            r#"{"result": "fail", "errorCode": "401", "errorMsg": "Invalid session token"}"#,
        );
        assert_eq!(
            outcome,
            RenewOutcome::Rejected {
                result: "fail".into(),
                error_code: "401".into(),
                error_msg: "Invalid session token".into(),
            }
        );
        assert!(!outcome.is_success());
    }

    #[test]
    fn success_result_with_wrong_code_is_rejected() {
        let outcome = evaluate_response(200, r#"{"result": "success", "errorCode": "500"}"#);
        assert!(!outcome.is_success());
    }

    #[test]
    fn empty_object_is_rejected() {
        assert!(!evaluate_response(200, "{}").is_success());
    }

    #[test]
    fn non_json_body_assumed_success() {
        assert_eq!(
            evaluate_response(200, "<html>ok</html>"),
            RenewOutcome::AssumedSuccess { status: 200 }
        );
        assert_eq!(
            evaluate_response(204, ""),
            RenewOutcome::AssumedSuccess { status: 204 }
        );
    }

    // ── renew ──

    #[test]
    fn renew_against_live_server() {
        let (url, handle) = serve_once(
            "200 OK",
            r#"{"result":"success","errorCode":"200","errorMsg":"OK"}"#,
        );
        let outcome = renew(&client().unwrap(), &url).unwrap();
        handle.join().unwrap();
        assert_eq!(outcome, RenewOutcome::Renewed { message: None });
    }

    #[test]
    fn renew_non_2xx_is_status_error() {
        let (url, handle) = serve_once("500 Internal Server Error", "oops");
        let err = renew(&client().unwrap(), &url).unwrap_err();
        handle.join().unwrap();
        assert!(matches!(err, RenewError::Status(500)));
    }

    #[test]
    fn renew_connection_refused_is_upstream_error() {
        let err = renew(&client().unwrap(), "http://127.0.0.1:1/renew").unwrap_err();
        assert!(matches!(err, RenewError::Upstream(_)));
    }
}
