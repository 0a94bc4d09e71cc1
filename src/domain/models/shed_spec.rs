//! Canonical shed configuration record and its invariants.
//!
//! `ShedSpec` is the single mutable record a configurator session owns.
//! Every mutation path funnels through [`validate`], which is total and
//! idempotent: out-of-range numbers are clamped, blank style tokens fall
//! back to defaults, and dependent add-ons are downgraded.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed shed width in feet.
pub const WIDTH_RANGE: RangeInclusive<u32> = 8..=16;
/// Allowed shed depth in feet.
pub const DEPTH_RANGE: RangeInclusive<u32> = 8..=28;
/// Allowed roof pitch (rise per 12).
pub const PITCH_RANGE: RangeInclusive<u32> = 3..=12;
/// Upper bound of the time-of-day proxy.
pub const TIME_MAX: u8 = 100;

const DEFAULT_WALL_COLOR: &str = "#f8fafc";
const DEFAULT_TRIM_COLOR: &str = "#334155";
const DEFAULT_SIDING: &str = "lap";

/// Error returned when a string does not name a known enum member.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lowercase and strip everything but ASCII alphanumerics so that
/// "Lofted Barn", "lofted-barn" and "LOFTED_BARN" compare equal.
fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Catalog shed styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShedStyle {
    /// Steep A-frame
    #[serde(rename = "A-Frame")]
    AFrame,
    /// Single-slope studio
    #[default]
    #[serde(rename = "Modern Studio")]
    ModernStudio,
    /// Classic gable
    Gable,
    /// Saltbox roof
    Quaker,
    /// Gambrel barn with loft
    #[serde(rename = "Lofted Barn")]
    LoftedBarn,
    /// Plain storage shed
    Utility,
}

impl ShedStyle {
    /// Every style, in catalog order.
    pub const ALL: [Self; 6] = [
        Self::AFrame,
        Self::ModernStudio,
        Self::Gable,
        Self::Quaker,
        Self::LoftedBarn,
        Self::Utility,
    ];

    /// Display name, also the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AFrame => "A-Frame",
            Self::ModernStudio => "Modern Studio",
            Self::Gable => "Gable",
            Self::Quaker => "Quaker",
            Self::LoftedBarn => "Lofted Barn",
            Self::Utility => "Utility",
        }
    }
}

impl fmt::Display for ShedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShedStyle {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        Self::ALL
            .into_iter()
            .find(|style| normalize_token(style.as_str()) == wanted)
            .ok_or_else(|| ParseEnumError::new("shed style", s))
    }
}

/// Electrical service tier bounding the simulated load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerKit {
    /// Unpowered shell
    #[default]
    None,
    /// 20 A weekender circuit
    #[serde(rename = "20A-Weekender")]
    Weekender20A,
    /// 30 A workshop circuit
    #[serde(rename = "30A-Workshop")]
    Workshop30A,
    /// 50 A guest-suite service
    #[serde(rename = "50A-Guest")]
    Guest50A,
}

impl PowerKit {
    /// Every tier, lowest first.
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::Weekender20A,
        Self::Workshop30A,
        Self::Guest50A,
    ];

    /// Display name, also the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Weekender20A => "20A-Weekender",
            Self::Workshop30A => "30A-Workshop",
            Self::Guest50A => "50A-Guest",
        }
    }

    /// Breaker rating of the kit. A shell with no kit is modelled on a
    /// standard 15 A household circuit.
    pub const fn rated_amps(&self) -> f64 {
        match self {
            Self::None => 15.0,
            Self::Weekender20A => 20.0,
            Self::Workshop30A => 30.0,
            Self::Guest50A => 50.0,
        }
    }

    /// Whether any circuit is installed.
    pub const fn is_powered(&self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for PowerKit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerKit {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_token(s);
        let kit = match wanted.as_str() {
            "none" | "shellonly" => Self::None,
            "20a" | "20aweekender" | "weekender" => Self::Weekender20A,
            "30a" | "30aworkshop" | "workshop" => Self::Workshop30A,
            "50a" | "50aguest" | "guest" => Self::Guest50A,
            _ => return Err(ParseEnumError::new("power kit", s)),
        };
        Ok(kit)
    }
}

/// Weather mode shown in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// No overlay
    #[default]
    Clear,
    /// Rain streaks
    Rain,
    /// Snow flakes
    Snow,
}

impl Weather {
    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rain => "rain",
            Self::Snow => "snow",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "clear" => Ok(Self::Clear),
            "rain" => Ok(Self::Rain),
            "snow" => Ok(Self::Snow),
            _ => Err(ParseEnumError::new("weather", s)),
        }
    }
}

/// Optional add-on identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Addon {
    /// Entry ramp
    Ramp,
    /// Roof solar
    Solar,
    /// Air conditioning
    Ac,
    /// Storage loft
    Loft,
    /// Workbench
    Workbench,
    /// Composting toilet
    ShedLoo,
}

impl Addon {
    /// Every add-on in display order.
    pub const ALL: [Self; 6] = [
        Self::Ramp,
        Self::Solar,
        Self::Ac,
        Self::Loft,
        Self::Workbench,
        Self::ShedLoo,
    ];

    /// Wire key used in serialized specs and proposals.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Ramp => "ramp",
            Self::Solar => "solar",
            Self::Ac => "ac",
            Self::Loft => "loft",
            Self::Workbench => "workbench",
            Self::ShedLoo => "shedLoo",
        }
    }

    /// Look up an add-on by its key, ignoring case and separators.
    pub fn from_key(key: &str) -> Option<Self> {
        let wanted = normalize_token(key);
        Self::ALL
            .into_iter()
            .find(|addon| normalize_token(addon.key()) == wanted)
    }
}

impl fmt::Display for Addon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Add-on selection flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Addons {
    /// Entry ramp
    pub ramp: bool,
    /// Roof solar
    pub solar: bool,
    /// Air conditioning
    pub ac: bool,
    /// Storage loft
    pub loft: bool,
    /// Workbench
    pub workbench: bool,
    /// Composting toilet
    pub shed_loo: bool,
}

impl Addons {
    /// Whether `addon` is selected.
    pub const fn get(&self, addon: Addon) -> bool {
        match addon {
            Addon::Ramp => self.ramp,
            Addon::Solar => self.solar,
            Addon::Ac => self.ac,
            Addon::Loft => self.loft,
            Addon::Workbench => self.workbench,
            Addon::ShedLoo => self.shed_loo,
        }
    }

    /// Select or clear `addon`.
    pub fn set(&mut self, addon: Addon, enabled: bool) {
        let slot = match addon {
            Addon::Ramp => &mut self.ramp,
            Addon::Solar => &mut self.solar,
            Addon::Ac => &mut self.ac,
            Addon::Loft => &mut self.loft,
            Addon::Workbench => &mut self.workbench,
            Addon::ShedLoo => &mut self.shed_loo,
        };
        *slot = enabled;
    }

    /// Selected add-ons in declaration order.
    pub fn enabled(&self) -> Vec<Addon> {
        Addon::ALL.into_iter().filter(|a| self.get(*a)).collect()
    }
}

/// A customer's in-progress shed design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShedSpec {
    /// Catalog style
    pub style: ShedStyle,
    /// Feet, 8 to 16.
    pub width: u32,
    /// Feet, 8 to 28.
    pub depth: u32,
    /// Roof rise per 12, 3 to 12.
    pub pitch: u32,
    /// Wall color
    pub wall_color: String,
    /// Trim color
    pub trim_color: String,
    /// Siding type
    pub siding_type: String,
    /// Electrical tier
    pub power_kit: PowerKit,
    /// Selected add-ons
    pub addons: Addons,
    /// Weather overlay
    pub weather: Weather,
    /// Time-of-day proxy, 0 to 100.
    pub time: u8,
}

impl Default for ShedSpec {
    fn default() -> Self {
        Self {
            style: ShedStyle::default(),
            width: 10,
            depth: 12,
            pitch: 6,
            wall_color: DEFAULT_WALL_COLOR.to_string(),
            trim_color: DEFAULT_TRIM_COLOR.to_string(),
            siding_type: DEFAULT_SIDING.to_string(),
            power_kit: PowerKit::default(),
            addons: Addons::default(),
            weather: Weather::default(),
            time: 50,
        }
    }
}

impl ShedSpec {
    /// Build a valid spec from arbitrary JSON. Missing or ill-typed fields
    /// take their defaults.
    pub fn from_candidate(candidate: &serde_json::Value) -> Self {
        let proposal = super::proposal::Proposal::from_value(candidate);
        validate(proposal.apply_to(&Self::default()))
    }

    /// Shorthand for [`validate`].
    #[must_use]
    pub fn validated(self) -> Self {
        validate(self)
    }

    /// A 50A guest-suite feed needs a trenching permit. The engine only
    /// surfaces this; it never grants or blocks.
    pub const fn permit_required(&self) -> bool {
        matches!(self.power_kit, PowerKit::Guest50A)
    }

    /// Selected add-ons in display order.
    pub fn active_addons(&self) -> Vec<Addon> {
        self.addons.enabled()
    }

    /// Floor area in square feet.
    pub const fn floor_area(&self) -> u32 {
        self.width * self.depth
    }

    /// Names of the fields that differ between `self` and `other`.
    /// Add-ons are reported individually as `addons.<key>`.
    pub fn diff(&self, other: &Self) -> Vec<String> {
        let mut changed = Vec::new();
        macro_rules! cmp {
            ($field:ident, $name:expr) => {
                if self.$field != other.$field {
                    changed.push($name.to_string());
                }
            };
        }
        cmp!(style, "style");
        cmp!(width, "width");
        cmp!(depth, "depth");
        cmp!(pitch, "pitch");
        cmp!(wall_color, "wallColor");
        cmp!(trim_color, "trimColor");
        cmp!(siding_type, "sidingType");
        cmp!(power_kit, "powerKit");
        for addon in Addon::ALL {
            if self.addons.get(addon) != other.addons.get(addon) {
                changed.push(format!("addons.{}", addon.key()));
            }
        }
        cmp!(weather, "weather");
        cmp!(time, "time");
        changed
    }
}

fn clamp_to(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

fn token_or_default(token: &str, default: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Return a spec that satisfies every invariant.
///
/// Total and idempotent: `validate(validate(x)) == validate(x)`.
pub fn validate(spec: ShedSpec) -> ShedSpec {
    let mut spec = spec;

    spec.width = clamp_to(spec.width, &WIDTH_RANGE);
    spec.depth = clamp_to(spec.depth, &DEPTH_RANGE);
    spec.pitch = clamp_to(spec.pitch, &PITCH_RANGE);
    spec.time = spec.time.min(TIME_MAX);

    spec.wall_color = token_or_default(&spec.wall_color, DEFAULT_WALL_COLOR);
    spec.trim_color = token_or_default(&spec.trim_color, DEFAULT_TRIM_COLOR);
    spec.siding_type = token_or_default(&spec.siding_type, DEFAULT_SIDING);

    // AC needs a circuit to run on
    if spec.addons.ac && !spec.power_kit.is_powered() {
        spec.addons.ac = false;
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_spec_is_valid() {
        let spec = ShedSpec::default();
        assert_eq!(validate(spec.clone()), spec);
        assert_eq!(spec.style, ShedStyle::ModernStudio);
        assert_eq!(spec.power_kit, PowerKit::None);
        assert_eq!(spec.time, 50);
    }

    #[test]
    fn test_validate_clamps_dimensions() {
        let spec = ShedSpec {
            width: 999,
            depth: 2,
            pitch: 40,
            time: 250,
            ..Default::default()
        };
        let valid = validate(spec);
        assert_eq!(valid.width, 16);
        assert_eq!(valid.depth, 8);
        assert_eq!(valid.pitch, 12);
        assert_eq!(valid.time, 100);
    }

    #[test]
    fn test_validate_downgrades_ac_without_power() {
        let mut spec = ShedSpec::default();
        spec.addons.ac = true;
        assert!(!validate(spec.clone()).addons.ac);

        spec.power_kit = PowerKit::Weekender20A;
        assert!(validate(spec).addons.ac);
    }

    #[test]
    fn test_validate_restores_blank_tokens() {
        let spec = ShedSpec {
            wall_color: "   ".to_string(),
            siding_type: String::new(),
            trim_color: " #111 ".to_string(),
            ..Default::default()
        };
        let valid = validate(spec);
        assert_eq!(valid.wall_color, DEFAULT_WALL_COLOR);
        assert_eq!(valid.siding_type, DEFAULT_SIDING);
        assert_eq!(valid.trim_color, "#111");
    }

    #[test]
    fn test_permit_flag_only_for_guest_kit() {
        let mut spec = ShedSpec::default();
        assert!(!spec.permit_required());
        spec.power_kit = PowerKit::Guest50A;
        assert!(spec.permit_required());
        // Flagged, not altered
        assert_eq!(validate(spec).power_kit, PowerKit::Guest50A);
    }

    #[test]
    fn test_enum_parsing_is_lenient() {
        assert_eq!("lofted barn".parse::<ShedStyle>(), Ok(ShedStyle::LoftedBarn));
        assert_eq!("A-FRAME".parse::<ShedStyle>(), Ok(ShedStyle::AFrame));
        assert!("Nomad Mobile".parse::<ShedStyle>().is_err());

        assert_eq!("30A".parse::<PowerKit>(), Ok(PowerKit::Workshop30A));
        assert_eq!("50A-Guest".parse::<PowerKit>(), Ok(PowerKit::Guest50A));
        assert!("offgrid".parse::<PowerKit>().is_err());

        assert_eq!("Snow".parse::<Weather>(), Ok(Weather::Snow));
        assert!("hail".parse::<Weather>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let mut spec = ShedSpec::default();
        spec.power_kit = PowerKit::Workshop30A;
        spec.addons.shed_loo = true;
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["powerKit"], "30A-Workshop");
        assert_eq!(value["style"], "Modern Studio");
        assert_eq!(value["addons"]["shedLoo"], true);
        assert_eq!(value["wallColor"], DEFAULT_WALL_COLOR);

        let back: ShedSpec = serde_json::from_value(value).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_from_candidate_fills_missing_fields() {
        let spec = ShedSpec::from_candidate(&json!({ "style": "Quaker", "width": 3 }));
        assert_eq!(spec.style, ShedStyle::Quaker);
        assert_eq!(spec.width, 8);
        assert_eq!(spec.depth, 12);

        let garbage = ShedSpec::from_candidate(&json!("not a spec"));
        assert_eq!(garbage, ShedSpec::default());
    }

    #[test]
    fn test_diff_reports_addons_individually() {
        let a = ShedSpec::default();
        let mut b = a.clone();
        b.width = 12;
        b.addons.loft = true;
        assert_eq!(a.diff(&b), vec!["width".to_string(), "addons.loft".to_string()]);
        assert!(a.diff(&a).is_empty());
    }
}
