use proptest::prelude::*;

use shedwright::adapters::insurance::SimulatedInsurer;
use shedwright::domain::models::insurance::{risk_score, MAX_RISK, MIN_RISK};
use shedwright::domain::models::InsuranceConfig;
use shedwright::domain::ports::InsuranceError;
use shedwright::services::cost_estimator::estimate;
use shedwright::{InsuranceProvider, PowerKit, QuoteRequest, QuoteStatus, ShedSpec};

fn instant_insurer() -> SimulatedInsurer {
    SimulatedInsurer::new(&InsuranceConfig {
        quote_latency_ms: 0,
        ..Default::default()
    })
}

fn well_built_spec() -> ShedSpec {
    let mut spec = ShedSpec {
        siding_type: "board".to_string(),
        pitch: 10,
        power_kit: PowerKit::Workshop30A,
        ..Default::default()
    };
    spec.addons.solar = true;
    spec
}

#[tokio::test]
async fn test_well_built_shed_is_approved() {
    let spec = well_built_spec();
    let cost = estimate(&spec).total;
    let request = QuoteRequest::new("Desjardins", spec, cost);
    assert!(request.risk_score <= 60.0);

    let quote = instant_insurer().request_quote(request).await.unwrap();
    assert_eq!(quote.status, QuoteStatus::Approved);
    assert_eq!(quote.partner, "DESJARDINS");
    assert!(quote.annual_savings > 0.0);
}

#[tokio::test]
async fn test_bare_shell_is_referred() {
    let spec = ShedSpec::default();
    let cost = estimate(&spec).total;
    let quote = instant_insurer()
        .request_quote(QuoteRequest::new("aviva", spec, cost))
        .await
        .unwrap();
    assert_eq!(quote.status, QuoteStatus::Referred);
}

#[tokio::test]
async fn test_partner_list_is_configurable() {
    let insurer = instant_insurer().with_partners(["co-op"]);
    assert_eq!(insurer.partners(), ["co-op".to_string()]);

    let result = insurer
        .request_quote(QuoteRequest::new("intact", ShedSpec::default(), 1.0))
        .await;
    assert!(matches!(result, Err(InsuranceError::UnknownPartner(p)) if p == "intact"));
}

#[tokio::test]
async fn test_quote_ids_are_unique() {
    let insurer = instant_insurer();
    let a = insurer
        .request_quote(QuoteRequest::new("td", ShedSpec::default(), 1.0))
        .await
        .unwrap();
    let b = insurer
        .request_quote(QuoteRequest::new("td", ShedSpec::default(), 1.0))
        .await
        .unwrap();
    assert_ne!(a.quote_id, b.quote_id);
    assert!(a.quote_id[3..].chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
}

proptest! {
    /// Property: risk stays within its bounds for any valid spec
    #[test]
    fn prop_risk_is_bounded(
        width in 8u32..=16,
        depth in 8u32..=28,
        pitch in 3u32..=12,
        kit in prop::sample::select(PowerKit::ALL.to_vec()),
        solar in any::<bool>(),
        board in any::<bool>(),
    ) {
        let mut spec = ShedSpec {
            width,
            depth,
            pitch,
            power_kit: kit,
            siding_type: if board { "board" } else { "lap" }.to_string(),
            ..Default::default()
        };
        spec.addons.solar = solar;
        let risk = risk_score(&spec);
        prop_assert!((MIN_RISK..=MAX_RISK).contains(&risk));
    }
}
