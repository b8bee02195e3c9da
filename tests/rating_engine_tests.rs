use chrono::{TimeZone, Utc};
use defi_sentinel_rating::{
    models::{Rating, RatingInput, RiskCategory},
    services::{RatingEngine, RatingPolicy},
};

fn blue_chip() -> RatingInput {
    RatingInput {
        project_id: "blue-chip-lender".to_string(),
        audit_count: 2,
        audit_score: 80.0,
        contract_age_days: 730,
        tvl: 2_000_000_000.0,
        mcap: 5_000_000_000.0,
        fdv: 5_000_000_000.0,
        multisig_threshold: 0.75,
        team_public: true,
        recent_incidents: 0,
        centralization_score: 70.0,
    }
}

fn fresh_fork() -> RatingInput {
    RatingInput {
        project_id: "fresh-fork".to_string(),
        audit_count: 0,
        audit_score: 35.0,
        contract_age_days: 30,
        tvl: 3_000_000.0,
        mcap: 2_000_000.0,
        fdv: 40_000_000.0,
        multisig_threshold: 0.0,
        team_public: false,
        recent_incidents: 1,
        centralization_score: 20.0,
    }
}

#[test]
fn test_blue_chip_end_to_end() {
    let result = RatingEngine::new().calculate_rating(&blue_chip());

    assert_eq!(result.total_score, 94);
    assert_eq!(result.rating, Rating::AaPlus);
    assert!((result.breakdown.weighted_total() - 94.25).abs() < 1e-9);
}

#[test]
fn test_fresh_fork_end_to_end() {
    let result = RatingEngine::new().calculate_rating(&fresh_fork());
    let b = &result.breakdown;

    // contract: 35 + 0 + (30/365*5) - 20, clamped
    let age_bonus = 30.0 / 365.0 * 5.0;
    assert!((b.contract_risk.score - (15.0 + age_bonus)).abs() < 1e-9);
    assert_eq!(b.contract_risk.details[1], "0 pts age bonus");
    assert_eq!(b.contract_risk.details[2], "-20 for incidents");

    // tokenomics: 70 + 0.05 * 20 - 10
    assert!((b.tokenomics_risk.score - 61.0).abs() < 1e-9);
    assert_eq!(b.tokenomics_risk.details, vec!["Float ratio: 5.0%"]);

    assert_eq!(b.liquidity_risk.score, 40.0);
    assert_eq!(b.governance_risk.score, 20.0);
    assert_eq!(b.operation_risk.score, 60.0);
    assert_eq!(b.operation_risk.details, vec!["Anon Team", "Multisig Threshold: 0"]);

    // 6.164 + 15.25 + 6 + 2 + 6 = 35.41...
    assert_eq!(result.total_score, 35);
    assert_eq!(result.rating, Rating::D);
}

#[test]
fn test_weights_are_fixed_per_category() {
    let result = RatingEngine::new().calculate_rating(&blue_chip());
    for category in RiskCategory::ALL {
        assert_eq!(result.breakdown.get(category).weight, category.weight());
    }
}

#[test]
fn test_generated_at_does_not_affect_score() {
    let engine = RatingEngine::new();
    let early = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let late = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();

    let a = engine.calculate_rating_at(&blue_chip(), early);
    let b = engine.calculate_rating_at(&blue_chip(), late);

    assert_eq!(a.total_score, b.total_score);
    assert_eq!(a.rating, b.rating);
    assert_eq!(a.breakdown, b.breakdown);
    assert_ne!(a.generated_at, b.generated_at);
}

#[test]
fn test_result_serializes_in_camel_case() {
    let at = Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
    let result = RatingEngine::new().calculate_rating_at(&blue_chip(), at);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["totalScore"], 94);
    assert_eq!(json["rating"], "AA+");
    assert_eq!(json["generatedAt"], "2025-06-01T08:30:00.000Z");
    assert_eq!(json["breakdown"]["liquidityRisk"]["weight"], 0.15);
    assert_eq!(json["breakdown"]["operationRisk"]["details"][0], "Public Team");
    for category in RiskCategory::ALL {
        assert!(json["breakdown"][category.key()]["weightedScore"].is_number());
    }
}

#[test]
fn test_strict_policy_matches_default_for_in_range_inputs() {
    let strict = RatingEngine::with_policy(RatingPolicy {
        clamp_all_categories: true,
    });
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    for input in [blue_chip(), fresh_fork()] {
        let lenient = RatingEngine::new().calculate_rating_at(&input, at);
        assert_eq!(strict.calculate_rating_at(&input, at), lenient);
    }
}
