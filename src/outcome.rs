//! Classification of the place-bid reply.
//!
//! A run ends in exactly one of two states: the order was accepted
//! (`Ok(OrderReceipt)`) or it was not (`Err(ExchangeError)`).

use serde_json::Value;

use crate::error::ExchangeError;
use crate::exchange::HttpReply;

/// Accepted order as echoed back by the exchange. Fields the reply omitted
/// stay `None`; the order has already been placed at that point, so a sparse
/// reply is not treated as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    pub order_id: Option<String>,
    /// Quote-currency credit used.
    pub spend: Option<String>,
    pub fee: Option<String>,
    /// Base-currency amount received.
    pub received: Option<String>,
}

impl OrderReceipt {
    fn from_result(result: Option<&Value>) -> Self {
        let field = |name: &str| result.and_then(|r| r.get(name)).and_then(display_value);
        Self {
            order_id: field("id"),
            spend: field("spend").or_else(|| field("amt")),
            fee: field("fee"),
            received: field("rec"),
        }
    }
}

fn display_value(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Success requires HTTP 200 and `"error": 0`; anything else is a failure.
pub fn interpret(reply: HttpReply) -> Result<OrderReceipt, ExchangeError> {
    let HttpReply { status, body } = reply;

    let json: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return Err(ExchangeError::Malformed {
                status,
                body,
                reason: format!("body is not JSON: {}", e),
            })
        }
    };

    let code = match json.get("error").and_then(Value::as_i64) {
        Some(code) => code,
        None => {
            return Err(ExchangeError::Malformed {
                status,
                body,
                reason: "missing integer 'error' field".to_string(),
            })
        }
    };

    if status != 200 || code != 0 {
        return Err(ExchangeError::Rejected { status, code, body });
    }

    Ok(OrderReceipt::from_result(json.get("result")))
}

fn or_unknown(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("unknown")
}

/// Human-readable lines for a successful run.
pub fn success_report(receipt: &OrderReceipt) -> Vec<String> {
    let mut lines = vec![
        "SUCCESS!".to_string(),
        format!("   Order ID: {}", or_unknown(&receipt.order_id)),
        format!("   Credit Used: {}", or_unknown(&receipt.spend)),
    ];
    if let Some(fee) = &receipt.fee {
        lines.push(format!("   Fee: {}", fee));
    }
    if let Some(received) = &receipt.received {
        lines.push(format!("   Received: {}", received));
    }
    lines
}

/// Human-readable lines for a failed run, including any known hint.
pub fn failure_report(err: &ExchangeError) -> Vec<String> {
    let mut lines = vec!["FAILED".to_string()];
    match err {
        ExchangeError::Transport(msg) => {
            lines.push(format!("   Transport Error: {}", msg));
        }
        ExchangeError::Malformed {
            status,
            body,
            reason,
        } => {
            lines.push(format!("   Status Code: {}", status));
            lines.push(format!("   Unreadable Response: {}", reason));
            lines.push(format!("   Full Response: {}", body));
        }
        ExchangeError::Rejected { status, code, body } => {
            lines.push(format!("   Status Code: {}", status));
            lines.push(format!("   Error Code: {}", code));
            lines.push(format!("   Full Response: {}", body));
        }
    }
    if let Some(hint) = err.hint() {
        lines.push(format!("   HINT: {}", hint));
    }
    lines
}
