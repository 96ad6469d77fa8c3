//! Error types for configuration and exchange interaction.

use crate::order::OrderError;

/// Problems found while building [`crate::config::Config`]. Always fatal and
/// always raised before any network call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    /// Environment variable is set but empty.
    #[error("environment variable has empty value: {0}")]
    EmptyValue(&'static str),
    /// Environment variable could not be parsed or is out of range.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Outcome of talking to the exchange when it did not end in a filled order.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Connection, TLS or body-read failure. The request may or may not have
    /// reached the exchange.
    #[error("transport error: {0}")]
    Transport(String),
    /// A reply arrived but could not be understood.
    #[error("malformed response (HTTP {status}): {reason}")]
    Malformed {
        status: u16,
        body: String,
        reason: String,
    },
    /// Well-formed reply reporting a non-success status or error code.
    #[error("order rejected (HTTP {status}, error code {code})")]
    Rejected { status: u16, code: i64, body: String },
}

pub const HINT_INVALID_SYMBOL: &str =
    "Error 11 means 'Invalid Symbol'. Try changing SYMBOL to 'THB_BTC' or 'BTC_THB' (uppercase).";
pub const HINT_SIGNATURE_MISMATCH: &str =
    "Error 7 means 'Signature Mismatch'. Check your API Secret.";

impl ExchangeError {
    /// Exchange error code, when the reply carried one.
    pub fn code(&self) -> Option<i64> {
        match self {
            ExchangeError::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Rejected { status, .. } | ExchangeError::Malformed { status, .. } => {
                Some(*status)
            }
            ExchangeError::Transport(_) => None,
        }
    }

    /// Raw reply body, when there was one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ExchangeError::Rejected { body, .. } | ExchangeError::Malformed { body, .. } => {
                Some(body)
            }
            ExchangeError::Transport(_) => None,
        }
    }

    /// Advisory text for error codes with a known usual cause.
    pub fn hint(&self) -> Option<&'static str> {
        match self.code()? {
            11 => Some(HINT_INVALID_SYMBOL),
            7 => Some(HINT_SIGNATURE_MISMATCH),
            _ => None,
        }
    }
}

/// Anything that ends a run without a placed order.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid order: {0}")]
    Order(#[from] OrderError),
    #[error("encoding order body failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(code: i64) -> ExchangeError {
        ExchangeError::Rejected {
            status: 200,
            code,
            body: format!("{{\"error\":{}}}", code),
        }
    }

    #[test]
    fn test_hints_for_known_codes() {
        assert_eq!(rejected(11).hint(), Some(HINT_INVALID_SYMBOL));
        assert_eq!(rejected(7).hint(), Some(HINT_SIGNATURE_MISMATCH));
        assert_eq!(rejected(18).hint(), None);
        assert_eq!(ExchangeError::Transport("refused".into()).hint(), None);
    }

    #[test]
    fn test_encode_error_propagates() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RunError = json_err.into();
        assert!(matches!(err, RunError::Encode(_)));
        assert!(err.to_string().starts_with("encoding order body failed"));
    }

    #[test]
    fn test_accessors() {
        let err = rejected(11);
        assert_eq!(err.status(), Some(200));
        assert_eq!(err.code(), Some(11));
        assert_eq!(err.body(), Some("{\"error\":11}"));

        let transport = ExchangeError::Transport("dns".into());
        assert_eq!(transport.status(), None);
        assert_eq!(transport.body(), None);
        assert_eq!(transport.to_string(), "transport error: dns");
    }
}
