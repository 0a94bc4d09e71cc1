//! Prices a validated design.

use tracing::debug;

use crate::domain::models::estimate::{
    addon_price, catalog_model_price, power_kit_price, style_base_price, LABOR_RATE,
    WALL_HEIGHT_FEET,
};
use crate::domain::models::{CostEstimate, MaterialEstimate, ShedSpec};

/// Material take-off for a spec.
pub fn materials_for(spec: &ShedSpec) -> MaterialEstimate {
    MaterialEstimate::for_dimensions(spec.width, spec.depth, WALL_HEIGHT_FEET, spec.pitch)
}

/// Quote a spec. Showroom sizes use their fixed catalog price as the base.
pub fn estimate(spec: &ShedSpec) -> CostEstimate {
    let base = catalog_model_price(spec.style, spec.width, spec.depth)
        .unwrap_or_else(|| style_base_price(spec.style));
    let stock = materials_for(spec).stock_cost();
    let addons: f64 = spec.active_addons().into_iter().map(addon_price).sum();
    let power_kit = power_kit_price(spec.power_kit);

    let materials = base + stock + addons + power_kit;
    let labor = materials * LABOR_RATE;

    debug!(style = %spec.style, materials, labor, "priced spec");

    CostEstimate {
        base,
        stock,
        addons,
        power_kit,
        materials,
        labor,
        total: materials + labor,
    }
}
