//! Recording weather provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::error::ProviderError;
use crate::port::{ProviderHour, WeatherProvider};

/// Returns canned hours (or fails) and records every request.
pub struct FakeWeatherProvider {
    hours: Option<Vec<ProviderHour>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<(String, NaiveDate)>>,
}

impl FakeWeatherProvider {
    pub fn returning(hours: Vec<ProviderHour>) -> Self {
        Self {
            hours: Some(hours),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            hours: None,
            ..Self::returning(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(location, date)` pairs in call order.
    pub fn requests(&self) -> Vec<(String, NaiveDate)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl WeatherProvider for FakeWeatherProvider {
    async fn fetch_day(
        &self,
        location: &str,
        date: NaiveDate,
    ) -> Result<Vec<ProviderHour>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push((location.to_string(), date));
        match &self.hours {
            Some(hours) => Ok(hours.clone()),
            None => Err(ProviderError::Status {
                status: 503,
                body: "service unavailable".to_string(),
            }),
        }
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
