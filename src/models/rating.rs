use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::grade::Rating;

/// Risk-relevant metrics for one protocol, supplied by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingInput {
    pub project_id: String,
    pub audit_count: u32,
    /// Expected 0-100.
    pub audit_score: f64,
    pub contract_age_days: u32,
    /// USD
    pub tvl: f64,
    /// USD
    pub mcap: f64,
    /// USD. Zero means unknown and falls back to `mcap`.
    pub fdv: f64,
    /// Fraction of signers required, e.g. 3-of-5 = 0.6.
    pub multisig_threshold: f64,
    pub team_public: bool,
    /// Count of exploits/hacks.
    pub recent_incidents: u32,
    /// Expected 0-100, 100 = fully decentralized.
    pub centralization_score: f64,
}

/// The five scored categories. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskCategory {
    ContractRisk,
    TokenomicsRisk,
    LiquidityRisk,
    GovernanceRisk,
    OperationRisk,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 5] = [
        RiskCategory::ContractRisk,
        RiskCategory::TokenomicsRisk,
        RiskCategory::LiquidityRisk,
        RiskCategory::GovernanceRisk,
        RiskCategory::OperationRisk,
    ];

    pub fn weight(&self) -> f64 {
        match self {
            RiskCategory::ContractRisk => 0.40,
            RiskCategory::TokenomicsRisk => 0.25,
            RiskCategory::LiquidityRisk => 0.15,
            RiskCategory::GovernanceRisk => 0.10,
            RiskCategory::OperationRisk => 0.10,
        }
    }

    /// Breakdown key as it appears in serialized results.
    pub fn key(&self) -> &'static str {
        match self {
            RiskCategory::ContractRisk => "contractRisk",
            RiskCategory::TokenomicsRisk => "tokenomicsRisk",
            RiskCategory::LiquidityRisk => "liquidityRisk",
            RiskCategory::GovernanceRisk => "governanceRisk",
            RiskCategory::OperationRisk => "operationRisk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCategoryResult {
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    /// Display-ready rationale, in the order it was computed.
    pub details: Vec<String>,
}

impl RiskCategoryResult {
    pub fn new(category: RiskCategory, score: f64, details: Vec<String>) -> Self {
        let weight = category.weight();
        Self {
            score,
            weight,
            weighted_score: score * weight,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingBreakdown {
    pub contract_risk: RiskCategoryResult,
    pub tokenomics_risk: RiskCategoryResult,
    pub liquidity_risk: RiskCategoryResult,
    pub governance_risk: RiskCategoryResult,
    pub operation_risk: RiskCategoryResult,
}

impl RatingBreakdown {
    pub fn get(&self, category: RiskCategory) -> &RiskCategoryResult {
        match category {
            RiskCategory::ContractRisk => &self.contract_risk,
            RiskCategory::TokenomicsRisk => &self.tokenomics_risk,
            RiskCategory::LiquidityRisk => &self.liquidity_risk,
            RiskCategory::GovernanceRisk => &self.governance_risk,
            RiskCategory::OperationRisk => &self.operation_risk,
        }
    }

    /// Sum of the weighted category scores, before rounding.
    pub fn weighted_total(&self) -> f64 {
        RiskCategory::ALL
            .iter()
            .map(|category| self.get(*category).weighted_score)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    pub total_score: i64,
    pub rating: Rating,
    pub breakdown: RatingBreakdown,
    /// Time of computation, not of the underlying data.
    #[serde(with = "crate::utils::time::iso_millis")]
    pub generated_at: DateTime<Utc>,
}
