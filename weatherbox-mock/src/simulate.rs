use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Payload published by a simulated unit, using the canonical field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingPayload {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub rainfall: f64,
}

/// Temperature in °F, coldest around 3am and warmest around 3pm.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = (day_fraction - 0.375) * 2.0 * PI;

    round_to_tenth(62.0 + radians.sin() * 15.0)
}

/// Relative humidity in percent, higher overnight.
pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    if (0.3..=0.7).contains(&day_fraction) {
        ((radians.sin().max(0.0) * 25.0) + 45.0).round()
    } else {
        ((radians.cos().max(0.0) * 30.0) + 60.0).round()
    }
}

pub fn simulate_reading<R: Rng + ?Sized>(day_fraction: f64, rng: &mut R) -> ReadingPayload {
    let rainfall = if rng.random_bool(0.1) {
        round_to_hundredth(rng.random_range(0.01..0.2))
    } else {
        0.0
    };

    ReadingPayload {
        temperature: simulated_temperature(day_fraction),
        humidity: simulated_humidity(day_fraction),
        // Standard pressure in hPa with a small fluctuation
        pressure: round_to_tenth(1013.25 + rng.random_range(-3.0..3.0)),
        wind_speed: round_to_tenth(rng.random_range(0.0..15.0)),
        wind_direction: rng.random_range(0.0..360.0_f64).floor(),
        rainfall,
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round_to_hundredth(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
