//! `weather` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::shed_spec::TIME_MAX;
use crate::domain::models::{Config, Weather};
use crate::services::weather_particles::{opacity_modifier, WeatherParticle, WeatherSimulator};

/// Arguments for `weather`.
#[derive(Args, Debug)]
pub struct WeatherArgs {
    /// Weather mode: clear, rain or snow
    #[arg(short, long)]
    pub weather: Weather,

    /// Time of day, 0-100
    #[arg(short, long, default_value = "50")]
    pub time: u8,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "60")]
    pub frames: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include every particle in the output
    #[arg(long)]
    pub particles: bool,
}

/// Summary of a simulated weather run.
#[derive(Debug, Serialize)]
pub struct WeatherOutput {
    /// Weather mode simulated
    pub weather: Weather,
    /// Time of day, 0-100
    pub time: u8,
    /// Ticks run
    pub frames: usize,
    /// Particles alive at the end
    pub population: usize,
    /// Time-of-day opacity factor
    pub opacity_modifier: f64,
    /// Mean vertical speed
    pub mean_speed: f64,
    /// Mean drawn opacity
    pub mean_opacity: f64,
    /// Final pool, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particles: Option<Vec<WeatherParticle>>,
}

impl CommandOutput for WeatherOutput {
    fn to_human(&self) -> String {
        if self.population == 0 {
            return format!("{} skies after {} frames: no particles", self.weather, self.frames);
        }
        format!(
            "{} after {} frames: {} particles, mean speed {:.2}/frame, mean opacity {:.3} (x{:.1} at time {})",
            self.weather,
            self.frames,
            self.population,
            self.mean_speed,
            self.mean_opacity,
            self.opacity_modifier,
            self.time
        )
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        0.0
    } else {
        values.sum::<f64>() / n as f64
    }
}

/// Run the weather particle simulator.
pub async fn execute(args: WeatherArgs, config: Config, json_mode: bool) -> Result<()> {
    let night_band = config.weather.night_band;
    let time = args.time.min(TIME_MAX);

    let mut sim = match args.seed {
        Some(seed) => WeatherSimulator::seeded(config.weather, seed),
        None => WeatherSimulator::new(config.weather),
    };
    for _ in 0..args.frames {
        sim.tick(args.weather, time);
    }

    let particles = sim.particles();
    let result = WeatherOutput {
        weather: sim.weather(),
        time,
        frames: args.frames,
        population: particles.len(),
        opacity_modifier: opacity_modifier(time, night_band),
        mean_speed: mean(particles.iter().map(|p| p.speed)),
        mean_opacity: mean(particles.iter().map(|p| p.opacity)),
        particles: args.particles.then(|| particles.to_vec()),
    };
    output(&result, json_mode);
    Ok(())
}
