use async_trait::async_trait;

use crate::error::ExchangeError;

mod bitkub;
pub mod clock;
pub mod signing;

pub use bitkub::BitkubClient;

pub const SERVER_TIME_PATH: &str = "/api/v3/servertime";
pub const PLACE_BID_PATH: &str = "/api/v3/market/place-bid";
pub const PLACE_BID_METHOD: &str = "POST";

pub const HEADER_API_KEY: &str = "X-BTK-APIKEY";
pub const HEADER_TIMESTAMP: &str = "X-BTK-TIMESTAMP";
pub const HEADER_SIGNATURE: &str = "X-BTK-SIGN";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Authentication headers for one signed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub api_key: String,
    pub timestamp: String,
    pub signature: String,
}

impl RequestHeaders {
    /// All headers the exchange expects, in send order.
    pub fn pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("Accept", CONTENT_TYPE_JSON),
            ("Content-Type", CONTENT_TYPE_JSON),
            (HEADER_API_KEY, &self.api_key),
            (HEADER_TIMESTAMP, &self.timestamp),
            (HEADER_SIGNATURE, &self.signature),
        ]
    }
}

/// A fully signed request, ready to send as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub path: &'static str,
    pub headers: RequestHeaders,
    /// Canonical body; the exact bytes the signature covers.
    pub body: String,
}

/// Raw HTTP reply, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Exchange {
    /// Exchange clock in epoch milliseconds.
    async fn server_time(&self) -> Result<u64, ExchangeError>;
    /// Send a signed bid. Non-2xx statuses are returned as replies, not errors.
    async fn place_bid(&self, req: &SignedRequest) -> Result<HttpReply, ExchangeError>;
}
