//! Untrusted partial updates to a [`ShedSpec`].
//!
//! A proposal is parsed field by field out of arbitrary JSON. A field is
//! staged only when its JSON type and enum membership match the declared
//! domain; anything else is dropped and remembered in `rejected_fields`.
//! Ranges are not checked here, that is `validate`'s job.

use serde_json::{Map, Value};

use super::shed_spec::{Addon, PowerKit, ShedSpec, ShedStyle, Weather};

/// A sparse, type-checked candidate update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Proposal {
    /// Catalog style
    pub style: Option<ShedStyle>,
    /// Width in feet, unchecked
    pub width: Option<i64>,
    /// Depth in feet, unchecked
    pub depth: Option<i64>,
    /// Roof pitch, unchecked
    pub pitch: Option<i64>,
    /// Wall color
    pub wall_color: Option<String>,
    /// Trim color
    pub trim_color: Option<String>,
    /// Siding type
    pub siding_type: Option<String>,
    /// Electrical tier
    pub power_kit: Option<PowerKit>,
    /// Individual add-on overrides, in the order they were read.
    pub addons: Vec<(Addon, bool)>,
    /// Weather mode
    pub weather: Option<Weather>,
    /// Time of day, unchecked
    pub time: Option<i64>,
    /// Free-text rationale from the assistant.
    pub explanation: Option<String>,
    /// Keys that were present but dropped (wrong type, unknown enum
    /// member, or unknown key).
    pub rejected_fields: Vec<String>,
}

/// Reads a JSON number as a whole value. Floats are rounded; NaN and
/// infinities are rejected.
fn as_whole_number(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    if let Some(n) = value.as_u64() {
        return Some(i64::try_from(n).unwrap_or(i64::MAX));
    }
    value
        .as_f64()
        .filter(|f| f.is_finite())
        // `as` saturates out-of-range floats
        .map(|f| f.round() as i64)
}

fn as_token(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn as_enum<T: std::str::FromStr>(value: &Value) -> Option<T> {
    value.as_str().and_then(|s| s.parse().ok())
}

impl Proposal {
    /// Parse a proposal out of any JSON value. Non-object input (including
    /// `null`) yields an empty proposal.
    pub fn from_value(value: &Value) -> Self {
        let mut proposal = Self::default();
        let Some(fields) = value.as_object() else {
            return proposal;
        };

        for (key, raw) in fields {
            if !proposal.accept(key, raw) {
                proposal.rejected_fields.push(key.clone());
            }
        }

        proposal
    }

    /// Stage one key. Returns `false` when the key is unknown or its value
    /// is out of domain.
    fn accept(&mut self, key: &str, raw: &Value) -> bool {
        macro_rules! stage {
            ($slot:ident, $parsed:expr) => {{
                match $parsed {
                    Some(v) => {
                        self.$slot = Some(v);
                        true
                    }
                    None => false,
                }
            }};
        }

        match key {
            "style" => stage!(style, as_enum::<ShedStyle>(raw)),
            "width" => stage!(width, as_whole_number(raw)),
            "depth" => stage!(depth, as_whole_number(raw)),
            "pitch" => stage!(pitch, as_whole_number(raw)),
            "wallColor" | "wall_color" => stage!(wall_color, as_token(raw)),
            "trimColor" | "trim_color" => stage!(trim_color, as_token(raw)),
            "sidingType" | "siding_type" => stage!(siding_type, as_token(raw)),
            "powerKit" | "power_kit" | "electricalTier" => {
                // An explicit null tier means "no kit"
                if raw.is_null() {
                    self.power_kit = Some(PowerKit::None);
                    true
                } else {
                    stage!(power_kit, as_enum::<PowerKit>(raw))
                }
            }
            "weather" => stage!(weather, as_enum::<Weather>(raw)),
            "time" => stage!(time, as_whole_number(raw)),
            "explanation" => stage!(explanation, as_token(raw)),
            "addons" => match raw.as_object() {
                Some(flags) => {
                    self.accept_addons(flags);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    fn accept_addons(&mut self, flags: &Map<String, Value>) {
        for (key, raw) in flags {
            match (Addon::from_key(key), raw.as_bool()) {
                (Some(addon), Some(enabled)) => self.addons.push((addon, enabled)),
                _ => self.rejected_fields.push(format!("addons.{key}")),
            }
        }
    }

    /// True when no field was staged. An explanation alone does not count.
    pub fn is_empty(&self) -> bool {
        self.style.is_none()
            && self.width.is_none()
            && self.depth.is_none()
            && self.pitch.is_none()
            && self.wall_color.is_none()
            && self.trim_color.is_none()
            && self.siding_type.is_none()
            && self.power_kit.is_none()
            && self.addons.is_empty()
            && self.weather.is_none()
            && self.time.is_none()
    }

    /// Whether the proposal explicitly asks for `addon` to be on.
    pub fn requests(&self, addon: Addon) -> bool {
        self.addons
            .iter()
            .rev()
            .find(|(a, _)| *a == addon)
            .is_some_and(|(_, enabled)| *enabled)
    }

    /// Overlay the staged fields on `base`. The result is NOT validated;
    /// callers run it through `validate`.
    pub fn apply_to(&self, base: &ShedSpec) -> ShedSpec {
        let mut staged = base.clone();

        if let Some(style) = self.style {
            staged.style = style;
        }
        if let Some(width) = self.width {
            staged.width = saturate_u32(width);
        }
        if let Some(depth) = self.depth {
            staged.depth = saturate_u32(depth);
        }
        if let Some(pitch) = self.pitch {
            staged.pitch = saturate_u32(pitch);
        }
        if let Some(color) = &self.wall_color {
            staged.wall_color.clone_from(color);
        }
        if let Some(color) = &self.trim_color {
            staged.trim_color.clone_from(color);
        }
        if let Some(siding) = &self.siding_type {
            staged.siding_type.clone_from(siding);
        }
        if let Some(kit) = self.power_kit {
            staged.power_kit = kit;
        }
        for (addon, enabled) in &self.addons {
            staged.addons.set(*addon, *enabled);
        }
        if let Some(weather) = self.weather {
            staged.weather = weather;
        }
        if let Some(time) = self.time {
            staged.time = u8::try_from(time.clamp(0, i64::from(u8::MAX))).unwrap_or(u8::MAX);
        }

        staged
    }
}

fn saturate_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_scalars_are_empty() {
        assert!(Proposal::from_value(&Value::Null).is_empty());
        assert!(Proposal::from_value(&json!(42)).is_empty());
        assert!(Proposal::from_value(&json!(["width", 12])).is_empty());
    }

    #[test]
    fn test_type_mismatches_are_dropped() {
        let proposal = Proposal::from_value(&json!({
            "width": "twelve",
            "depth": 14,
            "style": "Pagoda",
            "weather": 3,
            "addons": { "ac": "yes", "loft": true, "hottub": true },
            "material": "Cedar",
        }));

        assert_eq!(proposal.width, None);
        assert_eq!(proposal.depth, Some(14));
        assert_eq!(proposal.style, None);
        assert_eq!(proposal.weather, None);
        assert_eq!(proposal.addons, vec![(Addon::Loft, true)]);

        for key in ["width", "style", "weather", "addons.ac", "addons.hottub", "material"] {
            assert!(
                proposal.rejected_fields.iter().any(|f| f == key),
                "expected {key} to be rejected"
            );
        }
    }

    #[test]
    fn test_floats_round_and_extremes_saturate() {
        let proposal = Proposal::from_value(&json!({ "width": 11.6, "depth": -4, "pitch": 1e300 }));
        assert_eq!(proposal.width, Some(12));
        assert_eq!(proposal.depth, Some(-4));

        let staged = proposal.apply_to(&ShedSpec::default());
        assert_eq!(staged.width, 12);
        assert_eq!(staged.depth, 0);
        assert_eq!(staged.pitch, u32::MAX);
    }

    #[test]
    fn test_electrical_tier_alias() {
        let proposal = Proposal::from_value(&json!({ "electricalTier": "30A" }));
        assert_eq!(proposal.power_kit, Some(PowerKit::Workshop30A));

        let cleared = Proposal::from_value(&json!({ "electricalTier": null }));
        assert_eq!(cleared.power_kit, Some(PowerKit::None));
    }

    #[test]
    fn test_explanation_alone_is_empty() {
        let proposal = Proposal::from_value(&json!({ "explanation": "Looks good as is." }));
        assert!(proposal.is_empty());
        assert_eq!(proposal.explanation.as_deref(), Some("Looks good as is."));
    }

    #[test]
    fn test_requests_uses_last_value() {
        let proposal = Proposal::from_value(&json!({ "addons": { "ac": true } }));
        assert!(proposal.requests(Addon::Ac));
        assert!(!proposal.requests(Addon::Solar));
    }
}
