//! Environmental nudge for outdoor testing at extreme temperatures.
//!
//! The curve is policy, so it sits behind [`TemperatureAdjustment`] and the
//! engine takes any implementation, including a plain closure.

use crate::model::Environment;

/// Maps (temperature °C, environment) to a score delta in points.
pub trait TemperatureAdjustment {
    fn delta(&self, temperature_c: f64, environment: Environment) -> f64;
}

impl<F> TemperatureAdjustment for F
where
    F: Fn(f64, Environment) -> f64,
{
    fn delta(&self, temperature_c: f64, environment: Environment) -> f64 {
        self(temperature_c, environment)
    }
}

/// Default policy: indoor testing is never adjusted; outdoor testing gains
/// +2 beyond 27 °C or below 5 °C, and +5 beyond 32 °C or at/below 0 °C.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemperaturePolicy;

impl TemperatureAdjustment for DefaultTemperaturePolicy {
    fn delta(&self, temperature_c: f64, environment: Environment) -> f64 {
        if environment == Environment::Indoor || !temperature_c.is_finite() {
            return 0.0;
        }
        if temperature_c >= 32.0 || temperature_c <= 0.0 {
            5.0
        } else if temperature_c >= 27.0 || temperature_c < 5.0 {
            2.0
        } else {
            0.0
        }
    }
}

/// Apply the policy's delta to an overall score, keeping it within 0–100.
pub fn apply_temperature_adjustment(
    overall_score: f64,
    temperature_c: Option<f64>,
    environment: Environment,
    policy: &dyn TemperatureAdjustment,
) -> f64 {
    let delta = temperature_c
        .map(|t| policy.delta(t, environment))
        .filter(|d| d.is_finite())
        .unwrap_or(0.0);
    (overall_score + delta).clamp(0.0, 100.0)
}
