//! Time-window status state machine.
//!
//! Given a flight, the evaluation instant and a forecast lookup, decides the
//! flight's next status. Rules apply in order and the first match wins:
//!
//! ```text
//! terminal (Departed | Cancelled) ............ unchanged
//! m <= 0 ...................................... Departed
//! 0 < m <= 15   OnTime|Boarding -> Boarded, Delayed -> LateDeparture
//! 15 < m <= 45  OnTime -> Boarding,         Delayed -> LateDeparture
//! m > 45        OnTime -> Cancelled (p=0.10), else consult forecast:
//!               m <= 90 && OnTime:  alert -> Delayed, else p=0.30 -> Delayed
//!               m > 90 && Delayed:  no alert && p=0.50 -> OnTime
//! ```
//!
//! `m` is whole minutes to departure, floored. Windows and probabilities come
//! from [`StatusConfig`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use super::config::StatusConfig;
use crate::application::weather::lookup::ForecastLookup;
use crate::domain::{needs_alert, Flight, FlightStatus};
use crate::port::RandomSource;

/// A status change applied by [`StatusEngine::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: FlightStatus,
    pub to: FlightStatus,
    pub at: DateTime<Utc>,
}

/// Probabilistic, time-window-based flight status transitions.
pub struct StatusEngine {
    config: StatusConfig,
    random: Arc<dyn RandomSource>,
}

impl StatusEngine {
    pub fn new(config: StatusConfig, random: Arc<dyn RandomSource>) -> Self {
        Self { config, random }
    }

    /// Advance `flight` to its next status as of `now`.
    ///
    /// On change, `status` and `last_status_update` are updated in place and
    /// the transition is returned. A failed forecast lookup counts as "no
    /// weather alert"; it never aborts the evaluation.
    pub async fn evaluate(
        &self,
        flight: &mut Flight,
        now: DateTime<Utc>,
        forecasts: &dyn ForecastLookup,
    ) -> Option<Transition> {
        let from = flight.status;
        let to = self.next_status(flight, now, forecasts).await;
        if to == from {
            return None;
        }

        flight.status = to;
        flight.last_status_update = now;
        trace!(flight = %flight.flight_number, from = %from, to = %to, "Status transition");
        Some(Transition { from, to, at: now })
    }

    async fn next_status(
        &self,
        flight: &Flight,
        now: DateTime<Utc>,
        forecasts: &dyn ForecastLookup,
    ) -> FlightStatus {
        use FlightStatus::{Boarded, Boarding, Delayed, Departed, LateDeparture, OnTime};

        let status = flight.status;
        if status.is_terminal() {
            return status;
        }

        let minutes = flight.minutes_to_departure(now);
        if minutes <= 0 {
            return Departed;
        }

        if minutes <= self.config.boarded_window_minutes {
            return match status {
                OnTime | Boarding => Boarded,
                Delayed => LateDeparture,
                other => other,
            };
        }

        if minutes <= self.config.boarding_window_minutes {
            return match status {
                OnTime => Boarding,
                Delayed => LateDeparture,
                other => other,
            };
        }

        self.outlook(flight, minutes, forecasts).await
    }

    /// Rules for flights still outside the boarding window.
    async fn outlook(
        &self,
        flight: &Flight,
        minutes: i64,
        forecasts: &dyn ForecastLookup,
    ) -> FlightStatus {
        let status = flight.status;
        if status == FlightStatus::OnTime && self.random.chance(self.config.cancel_probability) {
            return FlightStatus::Cancelled;
        }

        let alert = self.weather_alert(flight, forecasts).await;

        if minutes <= self.config.delay_window_minutes && status == FlightStatus::OnTime {
            if alert || self.random.chance(self.config.delay_probability) {
                return FlightStatus::Delayed;
            }
            return status;
        }

        if status == FlightStatus::Delayed
            && minutes > self.config.delay_window_minutes
            && !alert
            && self.random.chance(self.config.recovery_probability)
        {
            return FlightStatus::OnTime;
        }

        status
    }

    async fn weather_alert(&self, flight: &Flight, forecasts: &dyn ForecastLookup) -> bool {
        match forecasts
            .sample_at(&flight.route.departure, flight.departure_time)
            .await
        {
            Ok(sample) => needs_alert(sample.as_ref()),
            Err(e) => {
                debug!(
                    flight = %flight.flight_number,
                    airport = %flight.route.departure,
                    error = %e,
                    "Forecast unavailable, assuming no weather alert"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::flight_departing_in;
    use crate::testkit::forecast::StaticForecast;
    use crate::testkit::random::{FixedRandom, ScriptedRandom};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 12, 12, 0, 0).unwrap()
    }

    fn engine(random: impl RandomSource + 'static) -> StatusEngine {
        StatusEngine::new(StatusConfig::default(), Arc::new(random))
    }

    async fn run(
        engine: &StatusEngine,
        status: FlightStatus,
        minutes: i64,
        forecast: &StaticForecast,
    ) -> (Flight, Option<Transition>) {
        let mut flight = flight_departing_in(now(), minutes, status);
        let transition = engine.evaluate(&mut flight, now(), forecast).await;
        (flight, transition)
    }

    #[tokio::test]
    async fn terminal_statuses_never_change() {
        let engine = engine(FixedRandom::min());
        let forecast = StaticForecast::hazardous();

        for status in FlightStatus::TERMINAL {
            for minutes in [-500, -1, 0, 1, 10, 30, 60, 120, 2000] {
                let (flight, transition) = run(&engine, status, minutes, &forecast).await;
                assert_eq!(flight.status, status, "{status} at {minutes}m");
                assert!(transition.is_none());
            }
        }
        assert_eq!(forecast.calls(), 0);
    }

    #[tokio::test]
    async fn non_terminal_flights_past_departure_are_departed() {
        let engine = engine(FixedRandom::min());
        let forecast = StaticForecast::calm();

        for status in FlightStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            for minutes in [0, -1, -90] {
                let (flight, _) = run(&engine, status, minutes, &forecast).await;
                assert_eq!(flight.status, FlightStatus::Departed, "{status} at {minutes}m");
            }
        }
    }

    #[tokio::test]
    async fn on_time_inside_fifteen_minutes_is_boarded() {
        let engine = engine(FixedRandom::max());
        let (flight, transition) =
            run(&engine, FlightStatus::OnTime, 10, &StaticForecast::calm()).await;

        assert_eq!(flight.status, FlightStatus::Boarded);
        assert_eq!(flight.last_status_update, now());
        assert_eq!(
            transition,
            Some(Transition {
                from: FlightStatus::OnTime,
                to: FlightStatus::Boarded,
                at: now(),
            })
        );
    }

    #[tokio::test]
    async fn delayed_inside_fifteen_minutes_is_late_departure() {
        let engine = engine(FixedRandom::max());
        let (flight, _) = run(&engine, FlightStatus::Delayed, 10, &StaticForecast::calm()).await;
        assert_eq!(flight.status, FlightStatus::LateDeparture);
    }

    #[tokio::test]
    async fn boarding_window_edges() {
        let engine = engine(FixedRandom::max());
        let calm = StaticForecast::calm();

        let cases = [
            (FlightStatus::Boarding, 15, FlightStatus::Boarded),
            (FlightStatus::OnTime, 16, FlightStatus::Boarding),
            (FlightStatus::OnTime, 45, FlightStatus::Boarding),
            (FlightStatus::Delayed, 45, FlightStatus::LateDeparture),
            (FlightStatus::Boarding, 30, FlightStatus::Boarding),
            (FlightStatus::Boarded, 30, FlightStatus::Boarded),
            (FlightStatus::LateDeparture, 5, FlightStatus::LateDeparture),
            (FlightStatus::OnTime, 46, FlightStatus::OnTime),
        ];
        for (status, minutes, expected) in cases {
            let (flight, _) = run(&engine, status, minutes, &calm).await;
            assert_eq!(flight.status, expected, "{status} at {minutes}m");
        }
        assert_eq!(calm.calls(), 1, "only the 46m case reaches the forecast");
    }

    #[tokio::test]
    async fn unchanged_status_keeps_last_update() {
        let engine = engine(FixedRandom::max());
        let mut flight = flight_departing_in(now(), 30, FlightStatus::Boarding);
        let before = flight.last_status_update;

        let transition = engine
            .evaluate(&mut flight, now(), &StaticForecast::calm())
            .await;

        assert!(transition.is_none());
        assert_eq!(flight.last_status_update, before);
    }

    #[tokio::test]
    async fn hazard_forces_delay_even_when_no_gate_fires() {
        let engine = engine(FixedRandom::max());
        let (flight, _) =
            run(&engine, FlightStatus::OnTime, 60, &StaticForecast::hazardous()).await;
        assert_eq!(flight.status, FlightStatus::Delayed);
    }

    #[tokio::test]
    async fn calm_weather_and_no_gate_keeps_on_time() {
        let engine = engine(FixedRandom::max());
        let (flight, transition) =
            run(&engine, FlightStatus::OnTime, 60, &StaticForecast::calm()).await;
        assert_eq!(flight.status, FlightStatus::OnTime);
        assert!(transition.is_none());
    }

    #[tokio::test]
    async fn missing_hour_counts_as_no_alert() {
        let engine = engine(FixedRandom::max());
        let forecast = StaticForecast::missing();

        let (flight, _) = run(&engine, FlightStatus::OnTime, 60, &forecast).await;

        assert_eq!(flight.status, FlightStatus::OnTime);
        assert_eq!(forecast.calls(), 1);
    }

    #[tokio::test]
    async fn cancellation_stops_before_forecast_lookup() {
        let engine = engine(FixedRandom::min());
        let forecast = StaticForecast::hazardous();

        let (flight, _) = run(&engine, FlightStatus::OnTime, 200, &forecast).await;

        assert_eq!(flight.status, FlightStatus::Cancelled);
        assert_eq!(forecast.calls(), 0);
    }

    #[tokio::test]
    async fn random_delay_inside_ninety_minutes() {
        // cancel gate misses, delay gate hits
        let random = ScriptedRandom::new([0.5, 0.2]);
        let engine = StatusEngine::new(StatusConfig::default(), Arc::new(random));

        let (flight, _) = run(&engine, FlightStatus::OnTime, 60, &StaticForecast::calm()).await;

        assert_eq!(flight.status, FlightStatus::Delayed);
    }

    #[tokio::test]
    async fn on_time_beyond_ninety_minutes_only_risks_cancellation() {
        let random = Arc::new(ScriptedRandom::new([0.5]));
        let engine = StatusEngine::new(StatusConfig::default(), random.clone());

        let (flight, _) = run(&engine, FlightStatus::OnTime, 120, &StaticForecast::hazardous()).await;

        assert_eq!(flight.status, FlightStatus::OnTime);
        assert_eq!(random.remaining(), 0);
    }

    #[tokio::test]
    async fn delayed_recovers_when_weather_clears() {
        let engine = engine(FixedRandom::min());
        let (flight, _) = run(&engine, FlightStatus::Delayed, 120, &StaticForecast::calm()).await;
        assert_eq!(flight.status, FlightStatus::OnTime);
    }

    #[tokio::test]
    async fn delayed_stays_delayed_under_hazard() {
        let engine = engine(FixedRandom::min());
        let (flight, _) =
            run(&engine, FlightStatus::Delayed, 120, &StaticForecast::hazardous()).await;
        assert_eq!(flight.status, FlightStatus::Delayed);
    }

    #[tokio::test]
    async fn delayed_inside_ninety_minutes_does_not_recover() {
        let engine = engine(FixedRandom::min());
        let (flight, _) = run(&engine, FlightStatus::Delayed, 60, &StaticForecast::calm()).await;
        assert_eq!(flight.status, FlightStatus::Delayed);
    }

    #[tokio::test]
    async fn lookup_failure_falls_back_to_random_branches() {
        let failing = StaticForecast::failing();

        let engine_no_gate = engine(FixedRandom::max());
        let (flight, _) = run(&engine_no_gate, FlightStatus::OnTime, 60, &failing).await;
        assert_eq!(flight.status, FlightStatus::OnTime);

        let engine_delay = StatusEngine::new(
            StatusConfig::default(),
            Arc::new(ScriptedRandom::new([0.5, 0.1])),
        );
        let (flight, _) = run(&engine_delay, FlightStatus::OnTime, 60, &failing).await;
        assert_eq!(flight.status, FlightStatus::Delayed);
    }

    #[tokio::test]
    async fn windows_follow_configuration() {
        let config = StatusConfig {
            boarded_window_minutes: 5,
            boarding_window_minutes: 20,
            ..StatusConfig::default()
        };
        let engine = StatusEngine::new(config, Arc::new(FixedRandom::max()));

        let (flight, _) = run(&engine, FlightStatus::OnTime, 10, &StaticForecast::calm()).await;
        assert_eq!(flight.status, FlightStatus::Boarding);
    }
}
