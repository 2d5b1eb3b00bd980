//! Weather provider configuration.

use serde::Deserialize;

/// Configuration for the Visual Crossing provider and the forecast cache.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// Timeline API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key. Overridden by `VISUAL_CROSSING_KEY` when set.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Unit system requested from the provider.
    #[serde(default = "default_unit_group")]
    pub unit_group: String,
    /// How long a cached forecast stays fresh. Overridden by
    /// `WEATHER_TTL_SECONDS` when set.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    /// HTTP client settings.
    #[serde(default)]
    pub http: WeatherHttpConfig,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            unit_group: default_unit_group(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
            http: WeatherHttpConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline".into()
}

fn default_unit_group() -> String {
    "us".into()
}

const fn default_cache_ttl_seconds() -> u64 {
    3600
}

/// HTTP client settings for the weather provider.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherHttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total attempts per request, including the first.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Fixed delay between attempts in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    8000
}

const fn default_connect_timeout_ms() -> u64 {
    3000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for WeatherHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}
