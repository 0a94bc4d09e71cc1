//! `telemetry` command.

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;
use crate::services::power_telemetry::{
    LoadProfile, PowerTelemetry, PowerTelemetrySample, TelemetrySnapshot,
};

use super::load_spec;

/// Arguments for `telemetry`.
#[derive(Args, Debug)]
pub struct TelemetryArgs {
    /// Spec file the load is derived from
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Number of ticks to simulate
    #[arg(short, long, default_value = "20")]
    pub ticks: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Ticked readings for one spec.
#[derive(Debug, Serialize)]
pub struct TelemetryOutput {
    /// Profile derived from the spec
    pub profile: LoadProfile,
    /// Every sample produced
    pub samples: Vec<PowerTelemetrySample>,
    /// Gauge state after the last tick
    pub snapshot: TelemetrySnapshot,
}

impl CommandOutput for TelemetryOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "Amps", "Load", "Status"]);

        for sample in &self.samples {
            let pct = if self.profile.max_amps > 0.0 {
                sample.amps / self.profile.max_amps * 100.0
            } else {
                0.0
            };
            table.add_row(vec![
                Cell::new(sample.sequence),
                Cell::new(format!("{:.2}", sample.amps)),
                Cell::new(format!("{pct:.0}%")),
                Cell::new(sample.status.label()),
            ]);
        }

        format!(
            "{table}\nRating {:.0}A, target {:.2}A, now {:.2}A ({:.0}%): {}",
            self.profile.max_amps,
            self.profile.target_amps(),
            self.snapshot.current_amps,
            self.snapshot.percentage(),
            self.snapshot.status.label()
        )
    }
}

/// Run the power telemetry simulator for a spec file.
pub async fn execute(args: TelemetryArgs, config: Config, json_mode: bool) -> Result<()> {
    let spec = load_spec(&args.spec)?;
    let profile = LoadProfile::from_spec(&spec);

    let mut telemetry = match args.seed {
        Some(seed) => PowerTelemetry::seeded(config.telemetry, profile, seed),
        None => PowerTelemetry::new(config.telemetry, profile),
    };
    let samples = (0..args.ticks).map(|_| telemetry.tick_with_spec(&spec)).collect();

    let result = TelemetryOutput {
        profile,
        samples,
        snapshot: telemetry.snapshot(),
    };
    output(&result, json_mode);
    Ok(())
}
