//! Canned forecast lookup for status engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::weather::lookup::ForecastLookup;
use crate::domain::{AirportCode, WeatherSample};
use crate::error::{ProviderError, WeatherError};

enum Answer {
    Sample(Option<WeatherSample>),
    Fail,
}

/// Answers every lookup the same way and counts calls.
pub struct StaticForecast {
    answer: Answer,
    calls: AtomicUsize,
}

impl StaticForecast {
    fn answering(answer: Answer) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn sample(sample: WeatherSample) -> Self {
        Self::answering(Answer::Sample(Some(sample)))
    }

    /// Light wind, no precipitation.
    pub fn calm() -> Self {
        Self::sample(WeatherSample {
            temperature: Some(68.0),
            precip_probability: 5.0,
            precip_types: Default::default(),
            wind_speed: 6.0,
        })
    }

    /// Wind above the alert threshold.
    pub fn hazardous() -> Self {
        Self::sample(WeatherSample {
            temperature: Some(40.0),
            precip_probability: 0.0,
            precip_types: Default::default(),
            wind_speed: 35.0,
        })
    }

    /// The forecast has no entry for the hour.
    pub fn missing() -> Self {
        Self::answering(Answer::Sample(None))
    }

    /// Every lookup fails as if the provider were down.
    pub fn failing() -> Self {
        Self::answering(Answer::Fail)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastLookup for StaticForecast {
    async fn sample_at(
        &self,
        airport: &AirportCode,
        departure: DateTime<Utc>,
    ) -> Result<Option<WeatherSample>, WeatherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Answer::Sample(sample) => Ok(sample.clone()),
            Answer::Fail => Err(WeatherError::Provider {
                airport: airport.clone(),
                date: departure.date_naive(),
                source: ProviderError::Decode("scripted failure".to_string()),
            }),
        }
    }
}
