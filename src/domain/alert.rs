//! Weather hazard rule.

use super::weather::WeatherSample;

/// Precipitation probability (percent) at or above which rain/snow is hazardous.
pub const PRECIP_PROBABILITY_THRESHOLD: f64 = 70.0;

/// Wind speed (mph) above which conditions are hazardous.
pub const WIND_SPEED_THRESHOLD: f64 = 20.0;

/// Whether an hourly sample constitutes a weather hazard.
///
/// An absent sample is never hazardous.
#[must_use]
pub fn needs_alert(sample: Option<&WeatherSample>) -> bool {
    sample.is_some_and(WeatherSample::is_hazardous)
}

impl WeatherSample {
    /// Likely precipitation of a known kind, or strong wind.
    #[must_use]
    pub fn is_hazardous(&self) -> bool {
        let precipitation = self.precip_probability >= PRECIP_PROBABILITY_THRESHOLD
            && !self.precip_types.is_empty();
        let wind = self.wind_speed > WIND_SPEED_THRESHOLD;
        precipitation || wind
    }
}
