use crate::error::ExchangeError;
use crate::exchange::Exchange;
use crate::logging::{log, obj, v_num, v_str, Domain, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    Server,
    LocalClock,
}

impl TimeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSource::Server => "server",
            TimeSource::LocalClock => "local_clock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub millis: u64,
    pub source: TimeSource,
}

impl Timestamp {
    /// Decimal form used both in the signature payload and the timestamp header.
    pub fn header_value(&self) -> String {
        self.millis.to_string()
    }
}

pub fn local_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Parse the servertime body: a bare integer of epoch milliseconds.
pub fn parse_server_time(body: &str) -> Result<u64, String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err("empty servertime body".to_string());
    }
    trimmed
        .parse::<u64>()
        .map_err(|e| format!("servertime body {:?} is not an integer: {}", trimmed, e))
}

/// Ask the exchange for its clock, falling back to the local clock on any
/// failure. Never fails; one attempt only.
pub async fn resolve_timestamp<E: Exchange + ?Sized>(exchange: &E) -> Timestamp {
    match exchange.server_time().await {
        Ok(millis) => Timestamp {
            millis,
            source: TimeSource::Server,
        },
        Err(err) => fallback(&err),
    }
}

fn fallback(err: &ExchangeError) -> Timestamp {
    let millis = local_millis();
    log(
        Level::Warn,
        Domain::Clock,
        "clock.fallback",
        obj(&[
            ("msg", v_str("server time unavailable, using local clock")),
            ("error", v_str(&err.to_string())),
            ("local_ms", v_num(millis as f64)),
        ]),
    );
    Timestamp {
        millis,
        source: TimeSource::LocalClock,
    }
}
