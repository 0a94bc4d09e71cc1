//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::{
    assist::AssistArgs, estimate::EstimateArgs, insure::InsureArgs, merge::MergeArgs,
    telemetry::TelemetryArgs, validate::ValidateArgs, weather::WeatherArgs,
};

/// Command-line entry point.
#[derive(Parser, Debug)]
#[command(name = "shedwright")]
#[command(about = "Shedwright - shed configuration engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .shedwright/
    #[arg(short, long, global = true, env = "SHEDWRIGHT_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a spec file and print the normalized spec
    Validate(ValidateArgs),

    /// Merge a proposal file into a spec file
    Merge(MergeArgs),

    /// Run an instruction through an assistant session with a scripted reply
    Assist(AssistArgs),

    /// Simulate the power gauge for a spec
    Telemetry(TelemetryArgs),

    /// Simulate the weather overlay
    Weather(WeatherArgs),

    /// Price a spec
    Estimate(EstimateArgs),

    /// Request a simulated insurance quote for a spec
    Insure(InsureArgs),
}
