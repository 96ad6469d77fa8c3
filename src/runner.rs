//! The one-shot buy: time sync, build, sign, send, interpret.

use crate::config::Config;
use crate::error::{ExchangeError, RunError};
use crate::exchange::clock::{resolve_timestamp, Timestamp};
use crate::exchange::signing::sign_request;
use crate::exchange::{Exchange, RequestHeaders, SignedRequest, PLACE_BID_METHOD, PLACE_BID_PATH};
use crate::logging::{log, obj, v_num, v_str, Domain, Level};
use crate::order::OrderRequest;
use crate::outcome::{failure_report, interpret, success_report, OrderReceipt};

/// Sign the place-bid request for `order` at `timestamp`. Pure.
pub fn prepare(
    cfg: &Config,
    order: &OrderRequest,
    timestamp: &Timestamp,
) -> Result<SignedRequest, RunError> {
    let body = order.canonical_body()?;
    let ts = timestamp.header_value();
    let signature = sign_request(&cfg.api_secret, &ts, PLACE_BID_METHOD, PLACE_BID_PATH, &body)
        .map_err(|e| RunError::Signing(e.to_string()))?;

    Ok(SignedRequest {
        path: PLACE_BID_PATH,
        headers: RequestHeaders {
            api_key: cfg.api_key.clone(),
            timestamp: ts,
            signature,
        },
        body,
    })
}

/// Place the configured order once. Prints human status lines to stdout.
pub async fn place_order<E: Exchange + ?Sized>(
    cfg: &Config,
    exchange: &E,
) -> Result<OrderReceipt, RunError> {
    let order = OrderRequest::from_config(cfg)?;
    let timestamp = resolve_timestamp(exchange).await;
    let req = prepare(cfg, &order, &timestamp)?;

    println!("Time: {} ({})", timestamp.millis, timestamp.source.as_str());
    println!("Buying {} THB of {}...", order.amount(), order.symbol());
    let mut fields = obj(&[
        ("msg", v_str("placing bid")),
        ("symbol", v_str(order.symbol())),
        ("amount", v_num(order.amount())),
        ("type", v_str(order.order_type().as_str())),
        ("timestamp", v_str(&req.headers.timestamp)),
        ("time_source", v_str(timestamp.source.as_str())),
        ("signature", v_str(&req.headers.signature)),
    ]);
    if let Some(rate) = order.rate() {
        fields.insert("rate".to_string(), v_num(rate));
    }
    log(Level::Info, Domain::Order, "order.submit", fields);

    let result = match exchange.place_bid(&req).await {
        Ok(reply) => {
            log(
                Level::Debug,
                Domain::Exec,
                "exec.reply",
                obj(&[("status", v_num(f64::from(reply.status))), ("body", v_str(&reply.body))]),
            );
            interpret(reply)
        }
        Err(err) => Err(err),
    };

    match result {
        Ok(receipt) => {
            for line in success_report(&receipt) {
                println!("{}", line);
            }
            log(
                Level::Info,
                Domain::Exec,
                "exec.filled",
                obj(&[
                    ("msg", v_str("order accepted")),
                    ("symbol", v_str(&cfg.symbol)),
                    ("order_id", v_str(receipt.order_id.as_deref().unwrap_or(""))),
                ]),
            );
            Ok(receipt)
        }
        Err(err) => {
            for line in failure_report(&err) {
                println!("{}", line);
            }
            log_failure(cfg, &err);
            Err(err.into())
        }
    }
}

fn log_failure(cfg: &Config, err: &ExchangeError) {
    let mut fields = obj(&[
        ("msg", v_str(&err.to_string())),
        ("symbol", v_str(&cfg.symbol)),
    ]);
    if let Some(status) = err.status() {
        fields.insert("status".to_string(), v_num(f64::from(status)));
    }
    if let Some(code) = err.code() {
        fields.insert("error_code".to_string(), v_num(code as f64));
    }
    if let Some(hint) = err.hint() {
        fields.insert("hint".to_string(), v_str(hint));
    }
    log(Level::Error, Domain::Exec, "exec.failed", fields);
}

/// Resolve configuration from `lookup`, then connect and place the order.
/// Configuration errors return before `connect` runs, so no network call is
/// made without credentials.
pub async fn run<F, C, E>(lookup: F, connect: C) -> Result<OrderReceipt, RunError>
where
    F: Fn(&str) -> Option<String>,
    C: FnOnce(&Config) -> E,
    E: Exchange,
{
    let cfg = match Config::from_lookup(lookup) {
        Ok(cfg) => cfg,
        Err(err) => {
            println!("CRITICAL: {}", err);
            log(
                Level::Error,
                Domain::System,
                "config.invalid",
                obj(&[("msg", v_str(&err.to_string()))]),
            );
            return Err(err.into());
        }
    };
    log(
        Level::Debug,
        Domain::System,
        "config.loaded",
        obj(&[("config", v_str(&format!("{:?}", cfg)))]),
    );

    let exchange = connect(&cfg);
    place_order(&cfg, &exchange).await
}
