use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::error::ExchangeError;
use crate::exchange::clock::parse_server_time;
use crate::exchange::{Exchange, HttpReply, SignedRequest, SERVER_TIME_PATH};

/// Bitkub REST client. One `reqwest::Client`, default transport timeouts,
/// a single attempt per call.
pub struct BitkubClient {
    client: Client,
    base: String,
}

impl BitkubClient {
    pub fn new(cfg: &Config) -> Self {
        Self::with_base(&cfg.host)
    }

    pub fn with_base(base: &str) -> Self {
        Self {
            client: Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

#[async_trait]
impl Exchange for BitkubClient {
    async fn server_time(&self) -> Result<u64, ExchangeError> {
        let resp = self
            .client
            .get(self.url(SERVER_TIME_PATH))
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(format!("servertime request failed: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(format!("read body failed: {}", e)))?;

        if !(200..300).contains(&status) {
            return Err(ExchangeError::Malformed {
                status,
                body,
                reason: "servertime returned a non-success status".to_string(),
            });
        }

        parse_server_time(&body).map_err(|reason| ExchangeError::Malformed {
            status,
            body,
            reason,
        })
    }

    async fn place_bid(&self, req: &SignedRequest) -> Result<HttpReply, ExchangeError> {
        let mut builder = self.client.post(self.url(req.path));
        for (name, value) in req.headers.pairs() {
            builder = builder.header(name, value);
        }

        let resp = builder
            .body(req.body.clone())
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(format!("request failed: {}", e)))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(format!("read body failed: {}", e)))?;

        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = BitkubClient::with_base("https://api.bitkub.com/");
        assert_eq!(client.base(), "https://api.bitkub.com");
        assert_eq!(
            client.url(SERVER_TIME_PATH),
            "https://api.bitkub.com/api/v3/servertime"
        );
    }
}
