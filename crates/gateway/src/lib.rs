//! HTTP gateway to the remote market.
//!
//! [`MarketClient`] implements the [`trendbot_core::MarketGateway`] trait
//! over the market's REST API: basic-auth credentials supplied once at
//! construction, a mandatory per-request timeout, and rate limiting.

pub mod auth;
pub mod client;
pub mod error;

pub use auth::Credentials;
pub use client::{MarketClient, MarketClientConfig};
pub use error::{GatewayError, Result};
