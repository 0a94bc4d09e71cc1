//! Simulated electrical draw for the builder's power gauge.
//!
//! One continuous state, `current_amps`, is pulled toward a target load on
//! every tick with bounded symmetric noise layered on top. The value never
//! jumps straight to the target. Status is classified from the smoothed
//! reading, so noise alone can push a nominal load into "critical".

use std::collections::VecDeque;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::models::{PowerKit, ShedSpec, TelemetryConfig};

/// Idle draw of lights and electronics, in amps.
const IDLE_LOAD_AMPS: f64 = 2.0;
const AC_LOAD_AMPS: f64 = 8.5;
const WORKBENCH_LOAD_AMPS: f64 = 4.0;
/// Solar offsets part of the draw.
const SOLAR_OFFSET_AMPS: f64 = 3.0;
const MIN_POWERED_LOAD: f64 = 0.1;
const MAX_POWERED_LOAD: f64 = 0.95;

const HIGH_DEMAND_RATIO: f64 = 0.7;
const CRITICAL_RATIO: f64 = 0.9;

/// Load classification on `current_amps / max_amps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// Below 70% of rating
    Nominal,
    /// 70% to 90% of rating
    HighDemand,
    /// 90% of rating and above
    Critical,
}

impl LoadStatus {
    /// Status for a reading against the kit rating.
    pub fn classify(amps: f64, max_amps: f64) -> Self {
        if max_amps <= 0.0 {
            return Self::Nominal;
        }
        let ratio = amps / max_amps;
        if ratio >= CRITICAL_RATIO {
            Self::Critical
        } else if ratio >= HIGH_DEMAND_RATIO {
            Self::HighDemand
        } else {
            Self::Nominal
        }
    }

    /// Gauge banner text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Nominal => "All Systems Go",
            Self::HighDemand => "High Demand",
            Self::Critical => "Critical Load Warning",
        }
    }
}

/// The two external parameters the simulator is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadProfile {
    /// Kit rating in amps
    pub max_amps: f64,
    /// 0.0 to 1.0
    pub load_factor: f64,
}

impl LoadProfile {
    /// Non-finite inputs read as 0 so the reading can never turn NaN.
    pub fn new(max_amps: f64, load_factor: f64) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            max_amps: finite_or_zero(max_amps).max(0.0),
            load_factor: finite_or_zero(load_factor).clamp(0.0, 1.0),
        }
    }

    fn sanitized(self) -> Self {
        Self::new(self.max_amps, self.load_factor)
    }

    /// Derive the profile from the power kit and the add-ons that draw
    /// current. A shell with no kit carries no load.
    pub fn from_spec(spec: &ShedSpec) -> Self {
        let max_amps = spec.power_kit.rated_amps();
        if spec.power_kit == PowerKit::None {
            return Self::new(max_amps, 0.0);
        }

        let mut load = IDLE_LOAD_AMPS;
        if spec.addons.ac {
            load += AC_LOAD_AMPS;
        }
        if spec.addons.workbench {
            load += WORKBENCH_LOAD_AMPS;
        }
        if spec.addons.solar {
            load -= SOLAR_OFFSET_AMPS;
        }

        Self::new(
            max_amps,
            (load / max_amps).clamp(MIN_POWERED_LOAD, MAX_POWERED_LOAD),
        )
    }

    /// Amps the reading is pulled toward.
    pub fn target_amps(&self) -> f64 {
        self.max_amps * self.load_factor
    }
}

/// One reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerTelemetrySample {
    /// Monotonic tick counter, starting at 1
    pub sequence: u64,
    /// Reading in amps
    pub amps: f64,
    /// Status at this reading
    pub status: LoadStatus,
    /// Wall-clock time of the tick
    pub recorded_at: DateTime<Utc>,
}

/// What a gauge reads at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Latest reading
    pub current_amps: f64,
    /// Kit rating
    pub max_amps: f64,
    /// Status of the latest reading
    pub status: LoadStatus,
    /// Oldest first
    pub history: Vec<PowerTelemetrySample>,
}

impl TelemetrySnapshot {
    /// Latest reading as a percentage of the rating.
    pub fn percentage(&self) -> f64 {
        if self.max_amps <= 0.0 {
            0.0
        } else {
            self.current_amps / self.max_amps * 100.0
        }
    }
}

/// Stochastic power-draw simulator.
pub struct PowerTelemetry<R = ChaCha8Rng> {
    config: TelemetryConfig,
    profile: LoadProfile,
    current_amps: f64,
    status: LoadStatus,
    history: VecDeque<PowerTelemetrySample>,
    sequence: u64,
    rng: R,
}

impl PowerTelemetry<ChaCha8Rng> {
    /// Simulator seeded from OS entropy.
    pub fn new(config: TelemetryConfig, profile: LoadProfile) -> Self {
        Self::with_rng(config, profile, ChaCha8Rng::from_entropy())
    }

    /// Deterministic simulator for replays and tests.
    pub fn seeded(config: TelemetryConfig, profile: LoadProfile, seed: u64) -> Self {
        Self::with_rng(config, profile, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> PowerTelemetry<R> {
    /// The reading starts at the profile's target.
    pub fn with_rng(config: TelemetryConfig, profile: LoadProfile, rng: R) -> Self {
        let profile = profile.sanitized();
        let current_amps = profile.target_amps();
        let capacity = config.history_capacity;
        Self {
            status: LoadStatus::classify(current_amps, profile.max_amps),
            config,
            profile,
            current_amps,
            history: VecDeque::with_capacity(capacity),
            sequence: 0,
            rng,
        }
    }

    /// Profile currently driving the reading.
    pub const fn profile(&self) -> LoadProfile {
        self.profile
    }

    /// Latest reading.
    pub const fn current_amps(&self) -> f64 {
        self.current_amps
    }

    /// Status of the latest reading.
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Retarget the simulator. The current reading and history are kept;
    /// only the value the reading is pulled toward changes.
    pub fn set_profile(&mut self, profile: LoadProfile) {
        let profile = profile.sanitized();
        if profile != self.profile {
            debug!(
                max_amps = profile.max_amps,
                load_factor = profile.load_factor,
                "telemetry profile changed"
            );
            self.profile = profile;
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> PowerTelemetrySample {
        let max_amps = self.profile.max_amps;
        let target = self.profile.target_amps();

        let noise = (self.rng.gen::<f64>() - 0.5) * max_amps * self.config.noise_fraction;
        let pulled = (target - self.current_amps) * self.config.pull_to_target;
        let ceiling = max_amps + self.config.headroom_amps;
        self.current_amps = (self.current_amps + noise + pulled).clamp(0.0, ceiling);

        let status = LoadStatus::classify(self.current_amps, max_amps);
        if status != self.status {
            info!(
                from = ?self.status,
                to = ?status,
                amps = self.current_amps,
                "load status changed"
            );
            self.status = status;
        }

        self.sequence += 1;
        let sample = PowerTelemetrySample {
            sequence: self.sequence,
            amps: self.current_amps,
            status,
            recorded_at: Utc::now(),
        };
        self.record(sample);
        sample
    }

    /// Re-derive the profile from the latest spec, then tick.
    pub fn tick_with_spec(&mut self, spec: &ShedSpec) -> PowerTelemetrySample {
        self.set_profile(LoadProfile::from_spec(spec));
        self.tick()
    }

    fn record(&mut self, sample: PowerTelemetrySample) {
        if self.config.history_capacity == 0 {
            return;
        }
        while self.history.len() >= self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(sample);
    }

    /// Samples in chronological order, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &PowerTelemetrySample> {
        self.history.iter()
    }

    /// Copy of the gauge state.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            current_amps: self.current_amps,
            max_amps: self.profile.max_amps,
            status: self.status,
            history: self.history.iter().copied().collect(),
        }
    }
}

impl<R: Rng + Send> PowerTelemetry<R> {
    /// Periodic driver. Reads the latest spec on every tick and publishes a
    /// snapshot. Returns when the spec sender or every snapshot receiver
    /// is dropped.
    pub async fn run(
        mut self,
        mut spec_rx: watch::Receiver<ShedSpec>,
        snapshot_tx: watch::Sender<TelemetrySnapshot>,
    ) {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.config.tick_interval_ms.max(1)));

        loop {
            interval.tick().await;
            if spec_rx.has_changed().is_err() {
                debug!("spec channel closed, stopping telemetry");
                break;
            }
            let spec = spec_rx.borrow_and_update().clone();
            self.tick_with_spec(&spec);
            if snapshot_tx.send(self.snapshot()).is_err() {
                debug!("no telemetry readers left, stopping");
                break;
            }
        }
    }
}
