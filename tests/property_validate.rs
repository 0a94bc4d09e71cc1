use proptest::prelude::*;
use serde_json::{json, Value};
use shedwright::services::proposal_merge::{merge, merge_value};
use shedwright::{validate, PowerKit, ShedSpec, ShedStyle, Weather};

fn arb_style() -> impl Strategy<Value = ShedStyle> {
    prop::sample::select(ShedStyle::ALL.to_vec())
}

fn arb_kit() -> impl Strategy<Value = PowerKit> {
    prop::sample::select(PowerKit::ALL.to_vec())
}

fn arb_weather() -> impl Strategy<Value = Weather> {
    prop::sample::select(vec![Weather::Clear, Weather::Rain, Weather::Snow])
}

prop_compose! {
    /// Any spec, including out-of-range numerics and blank tokens
    fn arb_spec()(
        style in arb_style(),
        width in any::<u32>(),
        depth in any::<u32>(),
        pitch in any::<u32>(),
        wall_color in prop_oneof![Just(String::new()), Just("   ".to_string()), "#[0-9a-f]{6}"],
        siding_type in prop_oneof![Just(String::new()), Just("board".to_string()), Just("lap".to_string())],
        power_kit in arb_kit(),
        flags in prop::array::uniform6(any::<bool>()),
        weather in arb_weather(),
        time in any::<u8>(),
    ) -> ShedSpec {
        let mut spec = ShedSpec {
            style,
            width,
            depth,
            pitch,
            wall_color,
            siding_type,
            power_kit,
            weather,
            time,
            ..Default::default()
        };
        spec.addons.ramp = flags[0];
        spec.addons.solar = flags[1];
        spec.addons.ac = flags[2];
        spec.addons.loft = flags[3];
        spec.addons.workbench = flags[4];
        spec.addons.shed_loo = flags[5];
        spec
    }
}

fn arb_json_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        (-1.0e12f64..1.0e12).prop_map(Value::from),
    ]
}

proptest! {
    /// Property: validated specs always satisfy the numeric ranges and
    /// the climate-control rule
    #[test]
    fn prop_validate_enforces_invariants(spec in arb_spec()) {
        let v = validate(spec);
        prop_assert!((8..=16).contains(&v.width));
        prop_assert!((8..=28).contains(&v.depth));
        prop_assert!((3..=12).contains(&v.pitch));
        prop_assert!(v.time <= 100);
        prop_assert!(!v.wall_color.trim().is_empty());
        prop_assert!(!v.siding_type.trim().is_empty());
        prop_assert!(!v.addons.ac || v.power_kit != PowerKit::None);
        prop_assert_eq!(v.permit_required(), v.power_kit == PowerKit::Guest50A);
    }

    /// Property: validate is idempotent
    #[test]
    fn prop_validate_idempotent(spec in arb_spec()) {
        let once = validate(spec);
        let twice = validate(once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Property: an absent proposal is a no-op beyond validation
    #[test]
    fn prop_absent_proposal_is_noop(spec in arb_spec()) {
        let expected = validate(spec.clone());
        prop_assert_eq!(&merge(&spec, None).spec, &expected);

        let outcome = merge_value(&spec, &Value::Null);
        prop_assert_eq!(&outcome.spec, &expected);
        prop_assert!(outcome.is_noop());
    }

    /// Property: any numeric proposal lands inside the allowed ranges
    #[test]
    fn prop_numbers_are_clamped(
        width in arb_json_number(),
        depth in arb_json_number(),
        pitch in arb_json_number(),
        time in arb_json_number(),
    ) {
        let outcome = merge_value(
            &ShedSpec::default(),
            &json!({ "width": width, "depth": depth, "pitch": pitch, "time": time }),
        );
        prop_assert!((8..=16).contains(&outcome.spec.width));
        prop_assert!((8..=28).contains(&outcome.spec.depth));
        prop_assert!((3..=12).contains(&outcome.spec.pitch));
        prop_assert!(outcome.spec.time <= 100);
        prop_assert!(outcome.rejected_fields.is_empty());
    }

    /// Property: an unknown style never changes the style but other
    /// fields still apply
    #[test]
    fn prop_bad_style_keeps_prior(
        spec in arb_spec(),
        style in "[a-z]{3,12}",
        depth in 8u32..=28,
    ) {
        prop_assume!(style.parse::<ShedStyle>().is_err());
        let current = validate(spec);
        let outcome = merge_value(&current, &json!({ "style": style, "depth": depth }));
        prop_assert_eq!(outcome.spec.style, current.style);
        prop_assert_eq!(outcome.spec.depth, depth);
        prop_assert!(outcome.rejected_fields.contains(&"style".to_string()));
    }

    /// Property: merging the spec's own serialized form changes nothing
    #[test]
    fn prop_self_merge_is_noop(spec in arb_spec()) {
        let current = validate(spec);
        let raw = serde_json::to_value(&current).unwrap();
        let outcome = merge_value(&current, &raw);
        prop_assert!(outcome.is_noop());
        prop_assert_eq!(outcome.spec, current);
    }

    /// Property: from_candidate never produces an invalid spec
    #[test]
    fn prop_from_candidate_is_valid(
        width in arb_json_number(),
        kit in prop_oneof![Just(json!("50A-Guest")), Just(json!(null)), Just(json!(7)), Just(json!("30a"))],
    ) {
        let spec = ShedSpec::from_candidate(&json!({ "width": width, "powerKit": kit, "addons": { "ac": true } }));
        prop_assert_eq!(validate(spec.clone()), spec);
    }
}
