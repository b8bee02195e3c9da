use chrono::{DateTime, Utc};
use tracing::debug;

use crate::config::RatingSettings;
use crate::models::{
    Rating, RatingBreakdown, RatingInput, RatingResult, RiskCategory, RiskCategoryResult,
};
use crate::utils::{display_number, now_utc, to_fixed};

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

const AUDIT_COUNT_BONUS: f64 = 5.0;
const AGE_BONUS_PER_YEAR: f64 = 5.0;
const MAX_AGE_BONUS: f64 = 10.0;
const INCIDENT_PENALTY: u64 = 20;

const TOKENOMICS_BASE: f64 = 70.0;
const FLOAT_RATIO_WEIGHT: f64 = 20.0;
const LARGE_CAP_USD: f64 = 1_000_000_000.0;
const SMALL_CAP_USD: f64 = 10_000_000.0;
const MARKET_CAP_ADJUSTMENT: f64 = 10.0;

const TVL_TIER_1_USD: f64 = 1_000_000_000.0;
const TVL_TIER_2_USD: f64 = 100_000_000.0;
const TVL_TIER_3_USD: f64 = 10_000_000.0;

const OPERATION_BASE: f64 = 60.0;
const PUBLIC_TEAM_BONUS: f64 = 20.0;
const MULTISIG_BONUS: f64 = 10.0;

/// Knobs that change how category scores are bounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingPolicy {
    /// By default only contract and tokenomics scores are clamped to [0,100];
    /// liquidity, governance and operation pass through as computed.
    pub clamp_all_categories: bool,
}

impl From<&RatingSettings> for RatingPolicy {
    fn from(settings: &RatingSettings) -> Self {
        Self {
            clamp_all_categories: settings.clamp_all_categories,
        }
    }
}

/// Turns a protocol's risk metrics into a weighted composite score and letter grade.
///
/// Total over its input: nothing here fails or panics for finite numbers, and the
/// only non-deterministic output is `generated_at`.
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    policy: RatingPolicy,
}

impl RatingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RatingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RatingPolicy {
        self.policy
    }

    pub fn calculate_rating(&self, input: &RatingInput) -> RatingResult {
        self.calculate_rating_at(input, now_utc())
    }

    /// Same as [`calculate_rating`](Self::calculate_rating) with an explicit timestamp.
    pub fn calculate_rating_at(
        &self,
        input: &RatingInput,
        generated_at: DateTime<Utc>,
    ) -> RatingResult {
        let breakdown = RatingBreakdown {
            contract_risk: self.calculate_contract_risk(input),
            tokenomics_risk: self.calculate_tokenomics_risk(input),
            liquidity_risk: self.calculate_liquidity_risk(input),
            governance_risk: self.calculate_governance_risk(input),
            operation_risk: self.calculate_operation_risk(input),
        };

        let total_score = round_half_up(breakdown.weighted_total());
        let rating = Rating::from_score(total_score);

        debug!(
            project_id = %input.project_id,
            total_score,
            rating = %rating,
            "Calculated protocol rating"
        );

        RatingResult {
            total_score,
            rating,
            breakdown,
            generated_at,
        }
    }

    /// Audit coverage and contract age raise the score, incidents lower it.
    fn calculate_contract_risk(&self, input: &RatingInput) -> RiskCategoryResult {
        let mut score = input.audit_score;

        if input.audit_count > 1 {
            score += AUDIT_COUNT_BONUS;
        }
        if input.audit_count > 3 {
            score += AUDIT_COUNT_BONUS;
        }

        // Caps at two years.
        let age_bonus =
            (f64::from(input.contract_age_days) / 365.0 * AGE_BONUS_PER_YEAR).min(MAX_AGE_BONUS);
        score += age_bonus;

        let incident_penalty = u64::from(input.recent_incidents) * INCIDENT_PENALTY;
        score -= incident_penalty as f64;

        RiskCategoryResult::new(
            RiskCategory::ContractRisk,
            clamp_score(score),
            vec![
                format!("{} Audits", input.audit_count),
                format!("{} pts age bonus", age_bonus.floor()),
                format!("-{} for incidents", incident_penalty),
            ],
        )
    }

    /// Circulating share of supply plus a market-cap tier.
    fn calculate_tokenomics_risk(&self, input: &RatingInput) -> RiskCategoryResult {
        let float_ratio = float_ratio(input.mcap, input.fdv);
        let mut score = TOKENOMICS_BASE + float_ratio * FLOAT_RATIO_WEIGHT;

        if input.mcap > LARGE_CAP_USD {
            score += MARKET_CAP_ADJUSTMENT;
        } else if input.mcap < SMALL_CAP_USD {
            score -= MARKET_CAP_ADJUSTMENT;
        }

        RiskCategoryResult::new(
            RiskCategory::TokenomicsRisk,
            clamp_score(score),
            vec![format!("Float ratio: {}%", to_fixed(float_ratio * 100.0, 1))],
        )
    }

    fn calculate_liquidity_risk(&self, input: &RatingInput) -> RiskCategoryResult {
        let score = if input.tvl > TVL_TIER_1_USD {
            95.0
        } else if input.tvl > TVL_TIER_2_USD {
            85.0
        } else if input.tvl > TVL_TIER_3_USD {
            70.0
        } else {
            40.0
        };

        // Label only separates tier 1 from the rest.
        let tier = if input.tvl > TVL_TIER_1_USD { "Tier 1" } else { "Tier 2/3" };

        RiskCategoryResult::new(
            RiskCategory::LiquidityRisk,
            self.bound(score),
            vec![format!("TVL Tier: {}", tier)],
        )
    }

    fn calculate_governance_risk(&self, input: &RatingInput) -> RiskCategoryResult {
        let score = self.bound(input.centralization_score);

        RiskCategoryResult::new(
            RiskCategory::GovernanceRisk,
            score,
            vec![format!("Centralization Score: {}", display_number(score))],
        )
    }

    fn calculate_operation_risk(&self, input: &RatingInput) -> RiskCategoryResult {
        let mut score = OPERATION_BASE;

        if input.team_public {
            score += PUBLIC_TEAM_BONUS;
        }
        if input.multisig_threshold > 0.5 {
            score += MULTISIG_BONUS;
        }
        if input.multisig_threshold > 0.7 {
            score += MULTISIG_BONUS;
        }

        let team = if input.team_public { "Public Team" } else { "Anon Team" };

        RiskCategoryResult::new(
            RiskCategory::OperationRisk,
            self.bound(score),
            vec![
                team.to_string(),
                format!("Multisig Threshold: {}", display_number(input.multisig_threshold)),
            ],
        )
    }

    /// Clamp for the categories that are only bounded under `clamp_all_categories`.
    fn bound(&self, score: f64) -> f64 {
        if self.policy.clamp_all_categories {
            clamp_score(score)
        } else {
            score
        }
    }
}

/// mcap / fdv, substituting mcap when fdv is zero or NaN. A zero denominator after
/// substitution means mcap/mcap, i.e. fully circulating.
pub fn float_ratio(mcap: f64, fdv: f64) -> f64 {
    let denominator = if fdv == 0.0 || fdv.is_nan() { mcap } else { fdv };
    if denominator == 0.0 {
        return 1.0;
    }
    mcap / denominator
}

fn clamp_score(score: f64) -> f64 {
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Nearest integer, halves toward positive infinity (so -2.5 -> -2).
fn round_half_up(value: f64) -> i64 {
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}
