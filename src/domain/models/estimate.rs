//! Material take-off and price tables for a shed design.

use serde::{Deserialize, Serialize};

use super::shed_spec::{Addon, PowerKit, ShedStyle};

/// Wall height used for take-offs, in feet.
pub const WALL_HEIGHT_FEET: u32 = 8;

/// Labor is charged as a share of the materials subtotal.
pub const LABOR_RATE: f64 = 0.40;

/// Quantities of framing and roofing stock for a footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEstimate {
    /// 16" on-centre studs plus corners and blocking
    pub studs: u32,
    /// 4x8 sheets
    pub sheathing: u32,
    /// Bundles
    pub shingles: u32,
    /// Linear feet
    pub trim: u32,
    /// Rim and floor joists
    pub joists: u32,
    /// 10 ft sections
    pub drip_edge: u32,
    /// 15 lb felt rolls
    pub felt_squares: u32,
}

fn ceil_u32(value: f64) -> u32 {
    value.ceil().max(0.0) as u32
}

impl MaterialEstimate {
    /// Stock needed for a rectangular footprint.
    pub fn for_dimensions(width: u32, depth: u32, wall_height: u32, pitch: u32) -> Self {
        let (w, d, h) = (f64::from(width), f64::from(depth), f64::from(wall_height));
        let perimeter = (w + d) * 2.0;
        let blocking = if perimeter > 40.0 { 35 } else { 20 };
        let wall_area = perimeter * h;
        let roof_area = w * d * (1.0 + f64::from(pitch) / 12.0);

        Self {
            studs: ceil_u32(perimeter / 1.33) + blocking,
            sheathing: ceil_u32((wall_area + w * d) / 32.0),
            shingles: ceil_u32(roof_area / 33.0),
            trim: ceil_u32(perimeter + h * 4.0),
            joists: ceil_u32(d / 1.33) * 2 + 4,
            drip_edge: ceil_u32(perimeter / 10.0),
            felt_squares: ceil_u32(roof_area / 100.0),
        }
    }
}

/// Unit prices for stock in [`MaterialEstimate`].
pub mod unit_price {
    /// Per stud
    pub const STUD: f64 = 5.25;
    /// Per 4x8 sheet
    pub const SHEATHING: f64 = 32.00;
    /// Per bundle
    pub const SHINGLES: f64 = 45.00;
    /// Per linear foot
    pub const TRIM: f64 = 2.50;
    /// Per joist
    pub const JOIST: f64 = 12.00;
    /// Per 10 ft length
    pub const DRIP_EDGE: f64 = 15.00;
    /// Per roll
    pub const FELT: f64 = 25.00;
}

impl MaterialEstimate {
    /// Cost of the stock at [`unit_price`] rates.
    pub fn stock_cost(&self) -> f64 {
        f64::from(self.studs) * unit_price::STUD
            + f64::from(self.sheathing) * unit_price::SHEATHING
            + f64::from(self.shingles) * unit_price::SHINGLES
            + f64::from(self.trim) * unit_price::TRIM
            + f64::from(self.joists) * unit_price::JOIST
            + f64::from(self.drip_edge) * unit_price::DRIP_EDGE
            + f64::from(self.felt_squares) * unit_price::FELT
    }
}

/// Catalog base price for a style at an arbitrary size.
pub const fn style_base_price(style: ShedStyle) -> f64 {
    match style {
        ShedStyle::AFrame => 6531.0,
        ShedStyle::ModernStudio => 6200.0,
        ShedStyle::Gable => 5100.0,
        ShedStyle::Quaker => 7975.0,
        ShedStyle::LoftedBarn => 8436.0,
        ShedStyle::Utility => 6415.0,
    }
}

/// Showroom models sold at a fixed price for their exact size.
pub const fn catalog_model_price(style: ShedStyle, width: u32, depth: u32) -> Option<f64> {
    match (style, width, depth) {
        (ShedStyle::LoftedBarn, 12, 28) => Some(14950.0),
        (ShedStyle::Utility, 10, 20) => Some(9185.0),
        (ShedStyle::Quaker, 10, 16) => Some(7975.0),
        (ShedStyle::AFrame, 10, 18) => Some(6531.0),
        _ => None,
    }
}

/// Catalog price of an add-on.
pub const fn addon_price(addon: Addon) -> f64 {
    match addon {
        Addon::Ramp => 450.0,
        Addon::Solar => 2200.0,
        Addon::Ac => 1450.0,
        Addon::Loft => 600.0,
        Addon::Workbench => 350.0,
        Addon::ShedLoo => 850.0,
    }
}

/// Catalog price of a power kit.
pub const fn power_kit_price(kit: PowerKit) -> f64 {
    match kit {
        PowerKit::None => 0.0,
        PowerKit::Weekender20A => 1200.0,
        PowerKit::Workshop30A => 1850.0,
        PowerKit::Guest50A => 3500.0,
    }
}

/// Priced quote for a design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Catalog price or style base
    pub base: f64,
    /// Framing and roofing stock
    pub stock: f64,
    /// Selected add-ons
    pub addons: f64,
    /// Electrical kit
    pub power_kit: f64,
    /// Sum of the four lines above
    pub materials: f64,
    /// 40% of materials
    pub labor: f64,
    /// Materials plus labor
    pub total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_take_off_for_default_footprint() {
        // 10x12, pitch 6: perimeter 44, roof area 180
        let mats = MaterialEstimate::for_dimensions(10, 12, WALL_HEIGHT_FEET, 6);
        assert_eq!(mats.studs, 34 + 35);
        assert_eq!(mats.sheathing, 15);
        assert_eq!(mats.shingles, 6);
        assert_eq!(mats.trim, 76);
        assert_eq!(mats.joists, 10 * 2 + 4);
        assert_eq!(mats.drip_edge, 5);
        assert_eq!(mats.felt_squares, 2);
    }

    #[test]
    fn test_small_footprint_uses_light_blocking() {
        // perimeter 32 <= 40
        let mats = MaterialEstimate::for_dimensions(8, 8, WALL_HEIGHT_FEET, 3);
        assert_eq!(mats.studs, 25 + 20);
    }

    #[test]
    fn test_catalog_models() {
        assert_eq!(catalog_model_price(ShedStyle::LoftedBarn, 12, 28), Some(14950.0));
        assert_eq!(catalog_model_price(ShedStyle::LoftedBarn, 12, 24), None);
        assert_eq!(catalog_model_price(ShedStyle::Gable, 10, 16), None);
    }
}
