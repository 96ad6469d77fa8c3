//! One-shot market buy against the Bitkub v3 REST API.
//!
//! The run is strictly linear: server time, order body, HMAC signature, one
//! POST, reply classification. See [`runner::run`].

pub mod config;
pub mod error;
pub mod exchange;
pub mod logging;
pub mod order;
pub mod outcome;
pub mod runner;
