use std::sync::Arc;
use std::time::Duration;

use pricewatch_core::PricewatchError;
use url::Url;

use crate::KeepaConnector;
use crate::adapter::HttpAdapter;

/// Default Keepa API root.
pub const DEFAULT_BASE_URL: &str = "https://api.keepa.com";

/// Keepa marketplace id for amazon.com.
pub const DOMAIN_US: u8 = 1;

/// Environment variable read by [`KeepaConnector::from_env`].
pub const API_KEY_ENV: &str = "KEEPA_API_KEY";

/// Builder for an HTTP-backed [`KeepaConnector`].
///
/// `timeout` only applies when the builder creates the HTTP client; a client
/// passed through [`client`](Self::client) keeps its own settings.
#[derive(Debug, Clone)]
pub struct KeepaConnectorBuilder {
    api_key: Option<String>,
    base_url: String,
    domain: u8,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
}

impl Default for KeepaConnectorBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            domain: DOMAIN_US,
            timeout: None,
            client: None,
        }
    }
}

impl KeepaConnectorBuilder {
    /// Keepa access key (required).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// API root; defaults to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Keepa marketplace id; defaults to [`DOMAIN_US`].
    #[must_use]
    pub const fn domain(mut self, domain: u8) -> Self {
        self.domain = domain;
        self
    }

    /// Per-request timeout for the internally built client.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured HTTP client.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns `PricewatchError::InvalidArg` if the API key is missing or blank,
    /// the base URL does not parse, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<KeepaConnector, PricewatchError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PricewatchError::InvalidArg("keepa api key is required".into()))?;
        let endpoint = product_endpoint(&self.base_url)?;
        let client = match self.client {
            Some(c) => c,
            None => {
                let mut b = reqwest::Client::builder();
                if let Some(t) = self.timeout {
                    b = b.timeout(t);
                }
                b.build().map_err(|e| {
                    PricewatchError::InvalidArg(format!("failed to build http client: {e}"))
                })?
            }
        };
        let adapter = HttpAdapter::new(client, endpoint, api_key, self.domain);
        Ok(KeepaConnector::from_adapter(Arc::new(adapter)))
    }
}

fn product_endpoint(base: &str) -> Result<Url, PricewatchError> {
    let mut url = Url::parse(base)
        .map_err(|e| PricewatchError::InvalidArg(format!("invalid keepa base url {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| {
            PricewatchError::InvalidArg(format!("keepa base url {base} cannot be a base"))
        })?
        .pop_if_empty()
        .push("product");
    Ok(url)
}

impl KeepaConnector {
    /// Returns an unconfigured builder.
    #[must_use]
    pub fn builder() -> KeepaConnectorBuilder {
        KeepaConnectorBuilder::default()
    }

    /// Build with default settings and the API key from `KEEPA_API_KEY`.
    ///
    /// # Errors
    /// Returns `PricewatchError::InvalidArg` if the variable is unset or blank.
    pub fn from_env() -> Result<Self, PricewatchError> {
        let key = std::env::var(API_KEY_ENV)
            .map_err(|_| PricewatchError::InvalidArg(format!("{API_KEY_ENV} is not set")))?;
        Self::builder().api_key(key).build()
    }
}
