use std::sync::Arc;

use async_trait::async_trait;
use pricewatch_core::PricewatchError;
use url::Url;

use crate::wire::KeepaResponse;

pub(crate) const PROVIDER: &str = "pricewatch-keepa";

/// Product lookup abstraction (so we can inject fakes in tests).
#[async_trait]
pub trait KeepaProductApi: Send + Sync {
    /// Fetch the `/product` response for one ASIN.
    async fn fetch_product(&self, asin: &str) -> Result<KeepaResponse, PricewatchError>;
}

/// Production adapter backed by `reqwest`.
pub struct HttpAdapter {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    domain: u8,
}

impl HttpAdapter {
    pub(crate) fn new(
        client: reqwest::Client,
        endpoint: Url,
        api_key: String,
        domain: u8,
    ) -> Self {
        Self {
            client,
            endpoint,
            api_key,
            domain,
        }
    }

    fn url_for(&self, asin: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("domain", &self.domain.to_string())
            .append_pair("asin", asin);
        url
    }
}

fn map_reqwest_err(e: &reqwest::Error, asin: &str) -> PricewatchError {
    if e.is_timeout() {
        PricewatchError::upstream(PROVIDER, format!("timed out fetching {asin}"))
    } else {
        PricewatchError::upstream(PROVIDER, format!("transport error for {asin}: {e}"))
    }
}

fn parse_body(body: &[u8]) -> Result<KeepaResponse, PricewatchError> {
    serde_json::from_slice(body)
        .map_err(|e| PricewatchError::Data(format!("malformed keepa response: {e}")))
}

#[async_trait]
impl KeepaProductApi for HttpAdapter {
    async fn fetch_product(&self, asin: &str) -> Result<KeepaResponse, PricewatchError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(asin, domain = self.domain, "requesting keepa product");

        let resp = self
            .client
            .get(self.url_for(asin))
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e, asin))?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| map_reqwest_err(&e, asin))?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            // Keepa reports the refill delay in the body of throttled responses too.
            let refill = parse_body(&body).ok().and_then(|r| r.refill_in);
            #[cfg(feature = "tracing")]
            tracing::warn!(asin, retry_after_ms = ?refill, "keepa token bucket exhausted");
            return Err(PricewatchError::rate_limited(PROVIDER, refill));
        }
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!(asin, %status, "keepa request failed");
            return Err(PricewatchError::upstream(
                PROVIDER,
                format!("status {status} for {asin}"),
            ));
        }
        parse_body(&body)
    }
}

/* -------- Lightweight adapter constructors for tests ------- */

impl dyn KeepaProductApi {
    /// Build a `KeepaProductApi` from a closure.
    pub fn from_fn<F>(f: F) -> Arc<dyn KeepaProductApi>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<KeepaResponse, PricewatchError>,
    {
        struct FnApi<F>(F);
        #[async_trait]
        impl<F> KeepaProductApi for FnApi<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<KeepaResponse, PricewatchError>,
        {
            async fn fetch_product(&self, asin: &str) -> Result<KeepaResponse, PricewatchError> {
                (self.0)(asin.to_string())
            }
        }
        Arc::new(FnApi(f))
    }
}
