//! Wind that pushes the player sideways

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Current weather
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeatherMode {
    #[default]
    Calm,
    WindLeft,
    WindRight,
}

impl WeatherMode {
    /// Pick a mode from a roll in [0, 1)
    pub fn from_roll(roll: f32, tuning: &Tuning) -> Self {
        if roll < tuning.wind_right_chance {
            WeatherMode::WindRight
        } else if roll < tuning.wind_right_chance + tuning.wind_left_chance {
            WeatherMode::WindLeft
        } else {
            WeatherMode::Calm
        }
    }

    /// Horizontal drift (px/ms)
    pub fn force(self, tuning: &Tuning) -> f32 {
        match self {
            WeatherMode::Calm => 0.0,
            WeatherMode::WindLeft => -tuning.wind_force,
            WeatherMode::WindRight => tuning.wind_force,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherMode::Calm => "Calm",
            WeatherMode::WindLeft => "Windy (Left)",
            WeatherMode::WindRight => "Windy (Right)",
        }
    }
}

/// Weather cycle, re-rolled on a fixed period
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Weather {
    pub mode: WeatherMode,
    /// Time since the last roll (ms)
    pub timer: f32,
    /// Drift applied to the player (px/ms)
    pub wind_force: f32,
}

impl Weather {
    /// Advance the timer. Returns the new mode when a re-roll happened.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, tuning: &Tuning, rng: &mut R) -> Option<WeatherMode> {
        if self.timer > tuning.weather_period_ms {
            self.timer = 0.0;
            self.mode = WeatherMode::from_roll(rng.random::<f32>(), tuning);
            self.wind_force = self.mode.force(tuning);
            log::info!("Weather: {}", self.mode.as_str());
            Some(self.mode)
        } else {
            self.timer += dt;
            None
        }
    }

    /// Horizontal displacement for this tick
    pub fn drift(&self, dt: f32) -> f32 {
        self.wind_force * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_buckets() {
        let tuning = Tuning::default();
        assert_eq!(WeatherMode::from_roll(0.0, &tuning), WeatherMode::WindRight);
        assert_eq!(WeatherMode::from_roll(0.29, &tuning), WeatherMode::WindRight);
        assert_eq!(WeatherMode::from_roll(0.31, &tuning), WeatherMode::WindLeft);
        assert_eq!(WeatherMode::from_roll(0.59, &tuning), WeatherMode::WindLeft);
        assert_eq!(WeatherMode::from_roll(0.61, &tuning), WeatherMode::Calm);
        assert_eq!(WeatherMode::from_roll(0.99, &tuning), WeatherMode::Calm);
    }

    #[test]
    fn test_force_direction() {
        let tuning = Tuning::default();
        assert_eq!(WeatherMode::Calm.force(&tuning), 0.0);
        assert!(WeatherMode::WindLeft.force(&tuning) < 0.0);
        assert!(WeatherMode::WindRight.force(&tuning) > 0.0);
    }

    #[test]
    fn test_rerolls_only_after_period() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut weather = Weather::default();

        // 10_000 ms of 100 ms ticks reaches exactly the period, not past it
        for _ in 0..100 {
            assert!(weather.update(100.0, &tuning, &mut rng).is_none());
        }
        assert!(weather.update(100.0, &tuning, &mut rng).is_none());
        let rolled = weather.update(100.0, &tuning, &mut rng);
        assert!(rolled.is_some());
        assert_eq!(weather.timer, 0.0);
        assert_eq!(weather.wind_force, weather.mode.force(&tuning));
    }

    #[test]
    fn test_drift_scales_with_dt() {
        let weather = Weather {
            mode: WeatherMode::WindLeft,
            timer: 0.0,
            wind_force: -0.1,
        };
        assert!((weather.drift(50.0) + 5.0).abs() < 1e-5);
    }
}
