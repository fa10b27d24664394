use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the pricewatch workspace.
///
/// Structural problems with vendor input, failures surfaced by the price-data
/// fetcher, watchlist store failures and argument validation all end up here.
/// Sparse or missing price data is never an error; see `MergedHistory` and
/// `DealSummary` for the degraded states.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PricewatchError {
    /// A raw vendor series did not have the expected shape (e.g. an odd-length
    /// interleaved `[time, price, ...]` array).
    #[error("invalid series shape for {channel} channel: length {len}")]
    InvalidSeriesShape {
        /// Channel label ("primary" or "marketplace").
        channel: String,
        /// Length of the offending flat array.
        len: usize,
    },

    /// The upstream price-data provider could not serve the request.
    #[error("{provider} unavailable: {msg}")]
    UpstreamUnavailable {
        /// Provider name.
        provider: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The upstream provider rejected the request because of rate limiting.
    #[error("{provider} rate limited (retry_after_ms={retry_after_ms:?})")]
    RateLimited {
        /// Provider name.
        provider: String,
        /// Provider hint for when tokens refill, if known.
        retry_after_ms: Option<u64>,
    },

    /// The upstream provider has no record of the product.
    #[error("product not found: {product_id}")]
    ProductNotFound {
        /// Identifier that was requested.
        product_id: String,
    },

    /// A provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {provider}")]
    ProviderTimeout {
        /// Provider name that timed out.
        provider: String,
        /// Capability label (e.g. "history").
        capability: String,
    },

    /// The requested capability is not configured (e.g. no watchlist store).
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label.
        capability: String,
    },

    /// The watchlist store failed.
    #[error("watchlist store failed: {msg}")]
    Store {
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the returned or expected data (undecodable payloads, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PricewatchError {
    /// Helper: build an `InvalidSeriesShape` error.
    pub fn invalid_shape(channel: impl Into<String>, len: usize) -> Self {
        Self::InvalidSeriesShape {
            channel: channel.into(),
            len,
        }
    }

    /// Helper: build an `UpstreamUnavailable` error with the provider name and message.
    pub fn upstream(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            provider: provider.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `RateLimited` error.
    pub fn rate_limited(provider: impl Into<String>, retry_after_ms: Option<u64>) -> Self {
        Self::RateLimited {
            provider: provider.into(),
            retry_after_ms,
        }
    }

    /// Helper: build a `ProductNotFound` error for the given identifier.
    pub fn not_found(product_id: impl Into<String>) -> Self {
        Self::ProductNotFound {
            product_id: product_id.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Store` error.
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store { msg: msg.into() }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// A missing product or an unconfigured capability is benign; everything
    /// else points at a failure someone can act on.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(
            self,
            Self::ProductNotFound { .. } | Self::Unsupported { .. }
        )
    }

    /// Returns true if repeating the same request later may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. } | Self::RateLimited { .. } | Self::ProviderTimeout { .. }
        )
    }
}
