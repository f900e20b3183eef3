//! Timed API polling

use crate::config::LandingConfig;
use crate::error::{Error, Result};
use crate::store::SharedBlobStore;
use crate::types::{JsonValue, ObjectLocation};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Request timeout for one API call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// What one polling run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LandingSummary {
    /// Objects written, in order
    pub landed: Vec<ObjectLocation>,
    /// Iterations that failed
    pub failures: usize,
}

impl LandingSummary {
    /// Total iterations attempted
    pub fn iterations(&self) -> usize {
        self.landed.len() + self.failures
    }
}

/// Calls the API and writes raw responses to the blob store
#[derive(Debug, Clone)]
pub struct LandingProducer {
    client: Client,
    store: SharedBlobStore,
    config: LandingConfig,
}

impl LandingProducer {
    /// Create a producer, validating the configuration
    pub fn new(store: SharedBlobStore, config: LandingConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("series-lake/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            store,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &LandingConfig {
        &self.config
    }

    /// Full query URL including the API key
    pub fn query_url(&self) -> Result<Url> {
        let mut params = vec![
            ("function", self.config.function.as_str()),
            ("symbol", self.config.symbol.as_str()),
        ];
        if let Some(interval) = &self.config.interval {
            params.push(("interval", interval.as_str()));
        }
        params.push(("apikey", self.config.api_key.as_str()));
        Ok(Url::parse_with_params(&self.config.base_url, &params)?)
    }

    /// Key a response fetched at `at` is landed under
    ///
    /// Format: `{layer}/{YYYYMMDD-HHMM}_{raw suffix}`
    pub fn landing_key(&self, at: DateTime<Utc>) -> String {
        let stamp = at.format("%Y%m%d-%H%M");
        let file_name = format!("{stamp}_{}", self.config.raw_suffix_token);
        let layer = self.config.layer_prefix.trim_end_matches('/');
        if layer.is_empty() {
            file_name
        } else {
            format!("{layer}/{file_name}")
        }
    }

    /// Fetch once and land the response
    pub async fn land_once(&self, at: DateTime<Utc>) -> Result<ObjectLocation> {
        let url = self.query_url()?;
        debug!(
            "Requesting {} for {}",
            self.config.function, self.config.symbol
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let location = ObjectLocation::new(self.config.bucket.clone(), self.landing_key(at));
        let body = response.bytes().await?;
        let document: JsonValue = serde_json::from_slice(&body)
            .map_err(|e| Error::malformed(location.clone(), e.to_string()))?;

        self.store
            .put(&location, Bytes::from(serde_json::to_vec(&document)?))
            .await?;
        info!("Landed response at {location}");
        Ok(location)
    }

    /// Poll until the configured run time has elapsed
    ///
    /// A failed iteration is logged and the loop moves on to the next tick.
    pub async fn run(&self) -> LandingSummary {
        let deadline = Instant::now() + self.config.run_for();
        let mut summary = LandingSummary::default();

        while Instant::now() < deadline {
            match self.land_once(Utc::now()).await {
                Ok(location) => summary.landed.push(location),
                Err(e) => {
                    warn!(kind = e.kind(), "Landing iteration failed: {e}");
                    summary.failures += 1;
                }
            }
            tokio::time::sleep(self.config.poll_interval()).await;
        }

        info!(
            "Landing finished: {} objects written to {}/{}, {} failures",
            summary.landed.len(),
            self.config.bucket,
            self.config.layer_prefix,
            summary.failures
        );
        summary
    }
}
