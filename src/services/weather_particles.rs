//! Rain and snow particle pool for the weather overlay.
//!
//! Particles live in a single `Vec` that is resized only when the weather
//! regime changes. A particle that falls past the bottom of the viewport
//! is re-randomized in place at the top, so the population is constant
//! for a given regime.

use std::ops::Range;
use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::models::{ShedSpec, Weather, WeatherConfig};
use crate::domain::models::shed_spec::TIME_MAX;

const NIGHT_OPACITY: f64 = 0.3;
const DAY_OPACITY: f64 = 0.6;
const BASE_OPACITY: Range<f64> = 0.1..0.5;

/// Kinematic profile for one weather mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Regime {
    /// Vertical speed per tick
    pub speed: Range<f64>,
    /// Particle size
    pub size: Range<f64>,
    /// Lateral drift per tick, symmetric around zero
    pub drift: f64,
    /// Streak length; zero draws round flakes
    pub length: Range<f64>,
}

impl Regime {
    /// Fast near-vertical streaks.
    pub const RAIN: Self = Self {
        speed: 20.0..35.0,
        size: 0.5..2.0,
        drift: 0.25,
        length: 20.0..40.0,
    };

    /// Slow, larger, wandering flakes.
    pub const SNOW: Self = Self {
        speed: 1.0..2.5,
        size: 1.0..4.0,
        drift: 1.0,
        length: 0.0..0.0,
    };

    /// Regime for a weather mode, none when clear.
    pub const fn for_weather(weather: Weather) -> Option<Self> {
        match weather {
            Weather::Clear => None,
            Weather::Rain => Some(Self::RAIN),
            Weather::Snow => Some(Self::SNOW),
        }
    }
}

/// A single drawable particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherParticle {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Vertical velocity per tick
    pub speed: f64,
    /// Horizontal velocity per tick
    pub drift: f64,
    /// Draw radius
    pub size: f64,
    /// Opacity before the time-of-day modifier
    pub base_opacity: f64,
    /// Opacity to draw with
    pub opacity: f64,
    /// Streak length, zero for flakes
    pub length: f64,
}

/// Dim particles at night so the overlay is not a harsh bright sheet.
pub fn opacity_modifier(time: u8, night_band: u8) -> f64 {
    if time < night_band || time > TIME_MAX.saturating_sub(night_band) {
        NIGHT_OPACITY
    } else {
        DAY_OPACITY
    }
}

fn sample(rng: &mut impl Rng, range: &Range<f64>) -> f64 {
    if range.is_empty() {
        range.start
    } else {
        rng.gen_range(range.clone())
    }
}

/// Weather overlay state machine.
pub struct WeatherSimulator<R = ChaCha8Rng> {
    config: WeatherConfig,
    weather: Weather,
    modifier: f64,
    particles: Vec<WeatherParticle>,
    rng: R,
}

impl WeatherSimulator<ChaCha8Rng> {
    /// Simulator seeded from OS entropy.
    pub fn new(config: WeatherConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Deterministic simulator for replays and tests.
    pub fn seeded(config: WeatherConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> WeatherSimulator<R> {
    /// Starts clear and idle.
    pub fn with_rng(config: WeatherConfig, rng: R) -> Self {
        Self {
            modifier: DAY_OPACITY,
            config,
            weather: Weather::Clear,
            particles: Vec::new(),
            rng,
        }
    }

    /// Weather currently simulated.
    pub const fn weather(&self) -> Weather {
        self.weather
    }

    /// Live particles.
    pub fn particles(&self) -> &[WeatherParticle] {
        &self.particles
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particles are alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Target population for a weather mode.
    pub const fn population_for(&self, weather: Weather) -> usize {
        match weather {
            Weather::Clear => 0,
            Weather::Rain => self.config.rain_population,
            Weather::Snow => self.config.snow_population,
        }
    }

    /// Change the viewport. Particles already below the new bottom edge
    /// respawn on the next tick.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.config.viewport_width = width.max(1.0);
        self.config.viewport_height = height.max(1.0);
    }

    /// Advance one frame for the given weather and time of day.
    pub fn tick(&mut self, weather: Weather, time: u8) {
        if weather != self.weather {
            self.switch_regime(weather);
        }
        self.apply_time(time);

        let Some(regime) = Regime::for_weather(self.weather) else {
            return;
        };

        let floor = self.config.viewport_height + self.config.exit_margin;
        for i in 0..self.particles.len() {
            let p = &mut self.particles[i];
            p.y += p.speed;
            p.x += p.drift;
            if p.y > floor {
                let fresh = self.spawn(&regime, false);
                self.particles[i] = fresh;
            }
        }
    }

    /// Tick against the latest spec snapshot.
    pub fn tick_with_spec(&mut self, spec: &ShedSpec) {
        self.tick(spec.weather, spec.time);
    }

    /// Drain or repopulate the pool for a new regime. Every surviving
    /// slot is re-randomized so nothing from the old regime lingers.
    fn switch_regime(&mut self, weather: Weather) {
        info!(from = %self.weather, to = %weather, "weather regime changed");
        self.weather = weather;
        let target = self.population_for(weather);

        let Some(regime) = Regime::for_weather(weather) else {
            self.particles.clear();
            return;
        };

        self.particles.truncate(target);
        for i in 0..self.particles.len() {
            let p = self.spawn(&regime, true);
            self.particles[i] = p;
        }
        while self.particles.len() < target {
            let p = self.spawn(&regime, true);
            self.particles.push(p);
        }
        debug!(population = self.particles.len(), "particle pool repopulated");
    }

    fn apply_time(&mut self, time: u8) {
        let modifier = opacity_modifier(time, self.config.night_band);
        if (modifier - self.modifier).abs() > f64::EPSILON {
            self.modifier = modifier;
            for p in &mut self.particles {
                p.opacity = p.base_opacity * modifier;
            }
        }
    }

    /// Fresh particle. Initial particles are scattered over the viewport;
    /// respawns enter just above the top edge.
    fn spawn(&mut self, regime: &Regime, scatter: bool) -> WeatherParticle {
        let rng = &mut self.rng;
        let base_opacity = sample(rng, &BASE_OPACITY);
        let y = if scatter {
            rng.gen_range(0.0..self.config.viewport_height.max(1.0))
        } else {
            -self.config.spawn_offset
        };
        WeatherParticle {
            x: rng.gen_range(0.0..self.config.viewport_width.max(1.0)),
            y,
            speed: sample(rng, &regime.speed),
            drift: sample(rng, &(-regime.drift..regime.drift)),
            size: sample(rng, &regime.size),
            base_opacity,
            opacity: base_opacity * self.modifier,
            length: sample(rng, &regime.length),
        }
    }
}

impl<R: Rng + Send> WeatherSimulator<R> {
    /// Frame driver. Reads the latest spec each frame and publishes the
    /// particle count; renderers that need positions own the simulator.
    pub async fn run(
        mut self,
        mut spec_rx: watch::Receiver<ShedSpec>,
        population_tx: watch::Sender<usize>,
    ) {
        let mut interval =
            tokio::time::interval(Duration::from_millis(self.config.frame_interval_ms.max(1)));

        loop {
            interval.tick().await;
            if spec_rx.has_changed().is_err() {
                debug!("spec channel closed, stopping weather");
                break;
            }
            let spec = spec_rx.borrow_and_update().clone();
            self.tick_with_spec(&spec);
            if population_tx.send(self.len()).is_err() {
                break;
            }
        }
    }
}
