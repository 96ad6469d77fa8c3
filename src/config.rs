use std::fmt;

use url::Url;

use crate::error::ConfigError;
use crate::order::OrderType;

pub const DEFAULT_HOST: &str = "https://api.bitkub.com";
pub const DEFAULT_SYMBOL: &str = "btc_thb";
pub const DEFAULT_BUY_AMOUNT: f64 = 500.0;

/// Run configuration, resolved once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    /// Quote-currency amount to spend.
    pub buy_amount: f64,
    pub symbol: String,
    pub order_type: OrderType,
    /// Limit price. Only set for limit orders.
    pub rate: Option<f64>,
    /// API base URL without a trailing slash.
    pub host: String,
}

impl Config {
    /// Build from an arbitrary key lookup. Credentials are checked first so a
    /// missing secret is reported even when other values are also bad.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, "API_KEY", "BITKUB_API_KEY")?;
        let api_secret = required(&lookup, "API_SECRET", "BITKUB_API_SECRET")?;

        let buy_amount = match lookup("BUY_AMOUNT") {
            Some(raw) => positive("BUY_AMOUNT", &raw)?,
            None => DEFAULT_BUY_AMOUNT,
        };

        let symbol = lookup("SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
        if symbol.trim().is_empty() {
            return Err(ConfigError::EmptyValue("SYMBOL"));
        }

        let order_type = match lookup("ORDER_TYPE") {
            Some(raw) => OrderType::parse(&raw).ok_or_else(|| ConfigError::InvalidValue {
                var: "ORDER_TYPE",
                value: raw.clone(),
                reason: "expected 'market' or 'limit'".to_string(),
            })?,
            None => OrderType::Market,
        };

        let rate = match order_type {
            OrderType::Market => None,
            OrderType::Limit => {
                let raw = lookup("RATE").ok_or(ConfigError::MissingEnvVar("RATE"))?;
                Some(positive("RATE", &raw)?)
            }
        };

        let host = match lookup("BITKUB_HOST") {
            Some(raw) => normalize_host(&raw)?,
            None => DEFAULT_HOST.to_string(),
        };

        Ok(Self {
            api_key,
            api_secret,
            buy_amount,
            symbol,
            order_type,
            rate,
            host,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"[REDACTED]")
            .field("api_secret", &"[REDACTED]")
            .field("buy_amount", &self.buy_amount)
            .field("symbol", &self.symbol)
            .field("order_type", &self.order_type)
            .field("rate", &self.rate)
            .field("host", &self.host)
            .finish()
    }
}

fn required<F>(lookup: &F, var: &'static str, legacy: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(var)
        .or_else(|| lookup(legacy))
        .ok_or(ConfigError::MissingEnvVar(var))?;
    if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue(var));
    }
    Ok(value)
}

fn positive(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: reason.to_string(),
    };
    let value: f64 = raw.trim().parse().map_err(|_| invalid("not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("must be a positive number"));
    }
    Ok(value)
}

fn normalize_host(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        var: "BITKUB_HOST",
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
