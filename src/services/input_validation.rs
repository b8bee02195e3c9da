use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::error::AppError;
use crate::models::RatingInput;
use crate::utils::monitoring::record_domain_warning;

/// A value outside its expected semantic range. Scoring still proceeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainWarning {
    pub field: &'static str,
    pub value: f64,
    pub expected: &'static str,
}

impl fmt::Display for DomainWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} is outside expected range {}", self.field, self.value, self.expected)
    }
}

/// Boundary check run before the engine. Hard failures are `ValidationError`s;
/// out-of-range values come back as warnings.
pub fn validate_rating_input(input: &RatingInput) -> Result<Vec<DomainWarning>, AppError> {
    if input.project_id.trim().is_empty() {
        return Err(AppError::ValidationError("projectId must not be empty".to_string()));
    }

    let numeric_fields = [
        ("auditScore", input.audit_score),
        ("tvl", input.tvl),
        ("mcap", input.mcap),
        ("fdv", input.fdv),
        ("multisigThreshold", input.multisig_threshold),
        ("centralizationScore", input.centralization_score),
    ];
    if let Some((field, _)) = numeric_fields.iter().find(|(_, value)| !value.is_finite()) {
        return Err(AppError::ValidationError(format!("{} must be a finite number", field)));
    }

    let mut warnings = Vec::new();
    check_range(&mut warnings, "auditScore", input.audit_score, 0.0, 100.0, "[0, 100]");
    check_range(
        &mut warnings,
        "centralizationScore",
        input.centralization_score,
        0.0,
        100.0,
        "[0, 100]",
    );
    check_range(&mut warnings, "multisigThreshold", input.multisig_threshold, 0.0, 1.0, "[0, 1]");
    check_range(&mut warnings, "tvl", input.tvl, 0.0, f64::INFINITY, ">= 0");
    check_range(&mut warnings, "mcap", input.mcap, 0.0, f64::INFINITY, ">= 0");
    check_range(&mut warnings, "fdv", input.fdv, 0.0, f64::INFINITY, ">= 0");

    for warning in &warnings {
        warn!(project_id = %input.project_id, %warning, "Rating input out of range");
        record_domain_warning(warning.field);
    }

    Ok(warnings)
}

fn check_range(
    warnings: &mut Vec<DomainWarning>,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    expected: &'static str,
) {
    if value < min || value > max {
        warnings.push(DomainWarning { field, value, expected });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RatingInput {
        RatingInput {
            project_id: "uniswap".to_string(),
            audit_count: 6,
            audit_score: 92.0,
            contract_age_days: 2200,
            tvl: 4_000_000_000.0,
            mcap: 6_000_000_000.0,
            fdv: 7_000_000_000.0,
            multisig_threshold: 0.6,
            team_public: true,
            recent_incidents: 0,
            centralization_score: 80.0,
        }
    }

    #[test]
    fn test_valid_input_has_no_warnings() {
        assert_eq!(validate_rating_input(&valid_input()).unwrap(), vec![]);
    }

    #[test]
    fn test_blank_project_id_is_rejected() {
        let input = RatingInput {
            project_id: "   ".to_string(),
            ..valid_input()
        };
        match validate_rating_input(&input) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("projectId")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_is_rejected() {
        let input = RatingInput {
            tvl: f64::INFINITY,
            ..valid_input()
        };
        match validate_rating_input(&input) {
            Err(AppError::ValidationError(msg)) => assert!(msg.contains("tvl")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_values_are_warnings() {
        let input = RatingInput {
            audit_score: 120.0,
            centralization_score: -5.0,
            tvl: -1.0,
            ..valid_input()
        };

        let warnings = validate_rating_input(&input).unwrap();
        let fields: Vec<&str> = warnings.iter().map(|w| w.field).collect();
        assert_eq!(fields, vec!["auditScore", "centralizationScore", "tvl"]);
        assert_eq!(
            warnings[0].to_string(),
            "auditScore = 120 is outside expected range [0, 100]"
        );
    }
}
