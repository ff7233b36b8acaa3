//! Error type for the dev-session crate.

use std::fmt;

#[derive(Debug)]
pub enum RenewError {
    /// Options file missing, unparsable, or invalid. Fatal at startup.
    Config(String),
    /// The request never produced a response (DNS, connect, timeout, body read).
    Upstream(reqwest::Error),
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The API answered but refused the renewal.
    Rejected { error_code: String, error_msg: String },
}

impl RenewError {
    /// Network-side failure, worth retrying at the next tick.
    pub fn is_upstream(&self) -> bool {
        matches!(self, RenewError::Upstream(_) | RenewError::Status(_))
    }
}

impl fmt::Display for RenewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenewError::Config(e) => write!(f, "Config error: {e}"),
            RenewError::Upstream(e) => write!(f, "Renewal request failed: {e}"),
            RenewError::Status(code) => write!(f, "Renewal request failed: HTTP {code}"),
            RenewError::Rejected {
                error_code,
                error_msg,
            } => write!(
                f,
                "Renewal rejected by the API (error code {error_code}): {error_msg}"
            ),
        }
    }
}

impl std::error::Error for RenewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenewError::Upstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RenewError {
    fn from(e: reqwest::Error) -> Self {
        RenewError::Upstream(e)
    }
}

pub type Result<T> = std::result::Result<T, RenewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn config_display() {
        let e = RenewError::Config("url is required".into());
        assert_eq!(e.to_string(), "Config error: url is required");
        assert!(e.source().is_none());
        assert!(!e.is_upstream());
    }

    #[test]
    fn status_display() {
        let e = RenewError::Status(503);
        assert_eq!(e.to_string(), "Renewal request failed: HTTP 503");
        assert!(e.is_upstream());
    }

    #[test]
    fn rejected_display() {
        let e = RenewError::Rejected {
            error_code: "401".into(),
            error_msg: "Invalid session token".into(),
        };
        assert_eq!(
            e.to_string(),
            "Renewal rejected by the API (error code 401): Invalid session token"
        );
        assert!(!e.is_upstream());
    }

    #[test]
    fn upstream_has_source() {
        // Port 1 on loopback refuses immediately.
        let err = reqwest::blocking::get("http://127.0.0.1:1/").unwrap_err();
        let e = RenewError::from(err);
        assert!(e.is_upstream());
        assert!(e.source().is_some());
        assert!(e.to_string().starts_with("Renewal request failed:"));
    }
}
