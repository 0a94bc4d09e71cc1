//! `validate` command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{bullet_list, output, CommandOutput};
use crate::domain::models::{Proposal, ShedSpec};

use super::read_document;

/// Arguments for `validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Spec file (JSON or YAML)
    pub file: PathBuf,
}

/// Normalized spec and derived facts.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    /// Spec after clamping
    pub spec: ShedSpec,
    /// Square feet
    pub floor_area: u32,
    /// True for the 50A kit
    pub permit_required: bool,
    /// Fields in the file that were ignored
    pub rejected_fields: Vec<String>,
}

impl CommandOutput for ValidateOutput {
    fn to_human(&self) -> String {
        let spec = &self.spec;
        let addons: Vec<&str> = spec.active_addons().iter().map(|a| a.key()).collect();
        let mut lines = vec![
            format!("Style:      {}", spec.style),
            format!(
                "Footprint:  {}' x {}' ({} sq ft), pitch {}/12",
                spec.width, spec.depth, self.floor_area, spec.pitch
            ),
            format!(
                "Finish:     {} siding, walls {}, trim {}",
                spec.siding_type, spec.wall_color, spec.trim_color
            ),
            format!("Power kit:  {}", spec.power_kit),
            format!(
                "Add-ons:    {}",
                if addons.is_empty() { "none".to_string() } else { addons.join(", ") }
            ),
            format!("Scene:      {} at time {}", spec.weather, spec.time),
        ];
        if self.permit_required {
            lines.push("Permit:     required (50A feed)".to_string());
        }
        if !self.rejected_fields.is_empty() {
            lines.push("Ignored fields:".to_string());
            lines.push(bullet_list(&self.rejected_fields, "none"));
        }
        lines.join("\n")
    }
}

/// Validate a spec file.
pub async fn execute(args: ValidateArgs, json_mode: bool) -> Result<()> {
    let candidate = read_document(&args.file)?;
    let rejected_fields = Proposal::from_value(&candidate).rejected_fields;
    let spec = ShedSpec::from_candidate(&candidate);

    let result = ValidateOutput {
        floor_area: spec.floor_area(),
        permit_required: spec.permit_required(),
        spec,
        rejected_fields,
    };
    output(&result, json_mode);
    Ok(())
}
