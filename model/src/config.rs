use anyhow::Result;
use geom::Duration;
use serde::{Deserialize, Serialize};

/// Tunables for the simulation. Every field has a default, so a config file only needs to list
/// overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub tick_seconds: f64,
    /// Buses reporting a lower speed (or none at all) still move at this rate
    pub speed_floor_kmh: f64,
    /// Routes shorter than this are finished on the first tick
    pub zero_distance_km: f64,
    pub arrival_threshold_km: f64,
    pub low_battery_threshold: f64,
    /// Percent of battery used per kilometer driven
    pub battery_drain_per_km: f64,
    /// Speed swings this fraction above and below the cruising speed
    pub speed_drift_fraction: f64,
    pub speed_drift_period_seconds: f64,
    /// How far the projected arrival may slip past the schedule before the journey is delayed
    pub delay_grace_seconds: f64,
    pub notification_seconds: f64,
    pub alert_policy: AlertPolicy,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AlertPolicy {
    /// Only one banner at a time. Low battery and delay alerts are dropped while any banner is
    /// visible, including one raised earlier in the same tick. Arrivals always replace the banner.
    GlobalBanner,
    /// Each journey may raise each kind of alert once per cooldown window.
    PerJourney { cooldown_seconds: f64 },
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 2.0,
            speed_floor_kmh: 5.0,
            zero_distance_km: 0.001,
            arrival_threshold_km: 0.05,
            low_battery_threshold: 20.0,
            battery_drain_per_km: 0.2,
            speed_drift_fraction: 0.1,
            speed_drift_period_seconds: 120.0,
            delay_grace_seconds: 300.0,
            notification_seconds: 5.0,
            alert_policy: AlertPolicy::GlobalBanner,
        }
    }
}

impl SimConfig {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs_err::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|err| anyhow!("parsing config {path}: {err}"))?;
        config.validate()?;
        info!("Loaded simulation config from {path}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tick_seconds", self.tick_seconds),
            ("speed_floor_kmh", self.speed_floor_kmh),
            ("speed_drift_period_seconds", self.speed_drift_period_seconds),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{name} must be positive, not {value}");
            }
        }
        let mut non_negative = vec![
            ("zero_distance_km", self.zero_distance_km),
            ("arrival_threshold_km", self.arrival_threshold_km),
            ("low_battery_threshold", self.low_battery_threshold),
            ("battery_drain_per_km", self.battery_drain_per_km),
            ("delay_grace_seconds", self.delay_grace_seconds),
            ("notification_seconds", self.notification_seconds),
        ];
        if !(0.0..=1.0).contains(&self.speed_drift_fraction) {
            bail!(
                "speed_drift_fraction must be between 0 and 1, not {}",
                self.speed_drift_fraction
            );
        }
        if let AlertPolicy::PerJourney { cooldown_seconds } = self.alert_policy {
            non_negative.push(("cooldown_seconds", cooldown_seconds));
        }
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                bail!("{name} can't be negative or non-finite, not {value}");
            }
        }
        Ok(())
    }

    pub fn tick(&self) -> Duration {
        Duration::seconds(self.tick_seconds)
    }

    pub fn delay_grace(&self) -> Duration {
        Duration::seconds(self.delay_grace_seconds)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::seconds(self.notification_seconds)
    }
}
