//! `estimate` command.

use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Table};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{currency, output, CommandOutput};
use crate::domain::models::{CostEstimate, MaterialEstimate, ShedSpec};
use crate::services::cost_estimator::{estimate, materials_for};

use super::load_spec;

/// Arguments for `estimate`.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Spec file to price
    pub file: PathBuf,
}

/// Take-off and priced estimate for one spec.
#[derive(Debug, Serialize)]
pub struct EstimateOutput {
    /// Normalized spec that was priced
    pub spec: ShedSpec,
    /// Stock quantities
    pub materials: MaterialEstimate,
    /// Priced lines
    pub estimate: CostEstimate,
}

impl CommandOutput for EstimateOutput {
    fn to_human(&self) -> String {
        let m = &self.materials;
        let mut stock = Table::new();
        stock.load_preset(UTF8_FULL).set_header(vec!["Stock", "Qty"]);
        for (name, qty) in [
            ("Studs", m.studs),
            ("Sheathing (4x8)", m.sheathing),
            ("Shingle bundles", m.shingles),
            ("Trim (ft)", m.trim),
            ("Joists", m.joists),
            ("Drip edge (10ft)", m.drip_edge),
            ("Felt rolls", m.felt_squares),
        ] {
            stock.add_row(vec![Cell::new(name), Cell::new(qty).set_alignment(CellAlignment::Right)]);
        }

        let e = &self.estimate;
        let mut price = Table::new();
        price.load_preset(UTF8_FULL).set_header(vec!["Line", "Amount"]);
        for (name, amount) in [
            ("Base", e.base),
            ("Stock", e.stock),
            ("Add-ons", e.addons),
            ("Power kit", e.power_kit),
            ("Materials", e.materials),
            ("Labor", e.labor),
            ("Total", e.total),
        ] {
            price.add_row(vec![
                Cell::new(name),
                Cell::new(currency(amount)).set_alignment(CellAlignment::Right),
            ]);
        }

        format!(
            "{} {}' x {}'\n{stock}\n{price}",
            self.spec.style, self.spec.width, self.spec.depth
        )
    }
}

/// Price a spec file.
pub async fn execute(args: EstimateArgs, json_mode: bool) -> Result<()> {
    let spec = load_spec(&args.file)?;
    let result = EstimateOutput {
        materials: materials_for(&spec),
        estimate: estimate(&spec),
        spec,
    };
    output(&result, json_mode);
    Ok(())
}
