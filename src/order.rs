//! Order payload and its canonical byte form.
//!
//! The exchange verifies the signature against the exact body bytes it
//! receives, so the body is produced in one place only: [`OrderRequest::canonical_body`].
//! Field order is fixed as `sym`, `amt`, `rat`, `typ`, with no whitespace.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "market",
            OrderType::Limit => "limit",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "market" => Some(OrderType::Market),
            "limit" => Some(OrderType::Limit),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("symbol must not be empty")]
    EmptySymbol,
    #[error("amount must be a positive number, got {0}")]
    InvalidAmount(f64),
    #[error("rate must be a positive number, got {0}")]
    InvalidRate(f64),
}

/// A buy order denominated in quote currency.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    symbol: String,
    amount: f64,
    /// `None` for market orders, which the exchange expects as `rat: 0`.
    rate: Option<f64>,
    order_type: OrderType,
}

impl OrderRequest {
    pub fn market(symbol: &str, amount: f64) -> Result<Self, OrderError> {
        Self::build(symbol, amount, None, OrderType::Market)
    }

    pub fn limit(symbol: &str, amount: f64, rate: f64) -> Result<Self, OrderError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(OrderError::InvalidRate(rate));
        }
        Self::build(symbol, amount, Some(rate), OrderType::Limit)
    }

    pub fn from_config(cfg: &Config) -> Result<Self, OrderError> {
        match (cfg.order_type, cfg.rate) {
            (OrderType::Limit, Some(rate)) => Self::limit(&cfg.symbol, cfg.buy_amount, rate),
            (OrderType::Limit, None) => Err(OrderError::InvalidRate(0.0)),
            (OrderType::Market, _) => Self::market(&cfg.symbol, cfg.buy_amount),
        }
    }

    fn build(
        symbol: &str,
        amount: f64,
        rate: Option<f64>,
        order_type: OrderType,
    ) -> Result<Self, OrderError> {
        if symbol.trim().is_empty() {
            return Err(OrderError::EmptySymbol);
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(OrderError::InvalidAmount(amount));
        }
        Ok(Self {
            symbol: symbol.to_string(),
            amount,
            rate,
            order_type,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// Compact JSON body, e.g. `{"sym":"btc_thb","amt":500.0,"rat":0,"typ":"market"}`.
    pub fn canonical_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for OrderRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("OrderRequest", 4)?;
        s.serialize_field("sym", &self.symbol)?;
        s.serialize_field("amt", &self.amount)?;
        match self.rate {
            Some(rate) => s.serialize_field("rat", &rate)?,
            None => s.serialize_field("rat", &0u8)?,
        }
        s.serialize_field("typ", self.order_type.as_str())?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_body_layout() {
        let order = OrderRequest::market("btc_thb", 500.0).unwrap();
        assert_eq!(
            order.canonical_body().unwrap(),
            r#"{"sym":"btc_thb","amt":500.0,"rat":0,"typ":"market"}"#
        );
    }

    #[test]
    fn test_limit_body_layout() {
        let order = OrderRequest::limit("btc_thb", 1000.0, 1_500_000.0).unwrap();
        assert_eq!(
            order.canonical_body().unwrap(),
            r#"{"sym":"btc_thb","amt":1000.0,"rat":1500000.0,"typ":"limit"}"#
        );
    }

    #[test]
    fn test_fractional_amount() {
        let order = OrderRequest::market("eth_thb", 123.45).unwrap();
        assert_eq!(
            order.canonical_body().unwrap(),
            r#"{"sym":"eth_thb","amt":123.45,"rat":0,"typ":"market"}"#
        );
    }

    #[test]
    fn test_body_is_idempotent() {
        let order = OrderRequest::market("btc_thb", 500.0).unwrap();
        let first = order.canonical_body().unwrap();
        let second = order.canonical_body().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
        assert!(!first.contains(' '));
    }

    #[test]
    fn test_symbol_is_json_escaped() {
        let order = OrderRequest::market("btc\"thb", 1.0).unwrap();
        assert!(order.canonical_body().unwrap().starts_with(r#"{"sym":"btc\"thb","#));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert_eq!(OrderRequest::market("", 500.0), Err(OrderError::EmptySymbol));
        assert_eq!(OrderRequest::market("btc_thb", 0.0), Err(OrderError::InvalidAmount(0.0)));
        assert_eq!(OrderRequest::market("btc_thb", -1.0), Err(OrderError::InvalidAmount(-1.0)));
        assert!(OrderRequest::market("btc_thb", f64::NAN).is_err());
        assert_eq!(
            OrderRequest::limit("btc_thb", 10.0, 0.0),
            Err(OrderError::InvalidRate(0.0))
        );
    }

    #[test]
    fn test_accessors_reflect_constructor() {
        let order = OrderRequest::limit("eth_thb", 250.0, 90_000.0).unwrap();
        assert_eq!(order.symbol(), "eth_thb");
        assert_eq!(order.amount(), 250.0);
        assert_eq!(order.rate(), Some(90_000.0));
        assert_eq!(order.order_type(), OrderType::Limit);

        let market = OrderRequest::market("btc_thb", 500.0).unwrap();
        assert_eq!(market.rate(), None);
        assert_eq!(market.order_type(), OrderType::Market);
    }

    #[test]
    fn test_order_type_parse() {
        assert_eq!(OrderType::parse("Market"), Some(OrderType::Market));
        assert_eq!(OrderType::parse(" limit "), Some(OrderType::Limit));
        assert_eq!(OrderType::parse("stop"), None);
    }
}
