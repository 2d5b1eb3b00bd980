//! Visual Crossing REST client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client as HttpClient;
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use super::dto::TimelineResponse;
use super::settings::WeatherConfig;
use crate::error::ProviderError;
use crate::port::{ProviderHour, WeatherProvider};

/// HTTP client for the Visual Crossing timeline API.
///
/// Requests carry a request and connect timeout. Timeouts and connection
/// failures are retried with a fixed backoff; HTTP error statuses are not.
pub struct VisualCrossingClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    unit_group: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl VisualCrossingClient {
    #[must_use]
    pub fn from_config(config: &WeatherConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.http.timeout_ms))
            .connect_timeout(Duration::from_millis(config.http.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            unit_group: config.unit_group.clone(),
            retry_max_attempts: config.http.retry_max_attempts,
            retry_backoff_ms: config.http.retry_backoff_ms,
        }
    }

    /// Timeline URL for a single day at `location`.
    ///
    /// # Errors
    /// Returns [`ProviderError::Url`] if the base URL is not a valid base.
    pub fn timeline_url(
        &self,
        location: &str,
        date: NaiveDate,
        key: &str,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)?;
        let day = date.format("%Y-%m-%d").to_string();
        url.path_segments_mut()
            .map_err(|()| ProviderError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(location)
            .push(&day)
            .push(&day);
        url.query_pairs_mut()
            .append_pair("unitGroup", &self.unit_group)
            .append_pair("include", "hours")
            .append_pair("contentType", "json")
            .append_pair("key", key);
        Ok(url)
    }

    async fn get_with_retry<T>(&self, url: Url) -> Result<T, ProviderError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(url.clone()).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) if err.is_decode() => return Err(ProviderError::Decode(err.to_string())),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "Weather request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

#[async_trait]
impl WeatherProvider for VisualCrossingClient {
    async fn fetch_day(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Vec<ProviderHour>, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;
        let url = self.timeline_url(location, date, key)?;

        debug!(location, date = %date, "Fetching hourly forecast");
        let response: TimelineResponse = self.get_with_retry(url).await?;
        let hours = response.into_hours();
        debug!(location, date = %date, hours = hours.len(), "Fetched hourly forecast");

        Ok(hours)
    }

    fn provider_name(&self) -> &'static str {
        "Visual Crossing"
    }
}
