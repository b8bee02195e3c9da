use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Letter grade assigned to a protocol's composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA+")]
    AaPlus,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "CCC")]
    Ccc,
    #[serde(rename = "D")]
    D,
}

/// Lower score bound of every grade above `D`, highest first. First match wins.
pub const GRADE_THRESHOLDS: [(i64, Rating); 9] = [
    (95, Rating::Aaa),
    (90, Rating::AaPlus),
    (85, Rating::Aa),
    (80, Rating::APlus),
    (75, Rating::A),
    (70, Rating::Bbb),
    (60, Rating::Bb),
    (50, Rating::B),
    (40, Rating::Ccc),
];

impl Rating {
    pub const ALL: [Rating; 10] = [
        Rating::Aaa,
        Rating::AaPlus,
        Rating::Aa,
        Rating::APlus,
        Rating::A,
        Rating::Bbb,
        Rating::Bb,
        Rating::B,
        Rating::Ccc,
        Rating::D,
    ];

    /// Map a rounded composite score onto the grade scale.
    pub fn from_score(score: i64) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, rating)| *rating)
            .unwrap_or(Rating::D)
    }

    /// Default grade for a strategy that only carries a qualitative risk level.
    pub fn from_risk_level(risk_level: Option<&str>) -> Self {
        match risk_level {
            Some("Low") => Rating::A,
            Some("Medium") => Rating::Bbb,
            Some("High") => Rating::Bb,
            _ => Rating::Bbb,
        }
    }

    /// Minimum composite score that earns this grade. `D` has no floor.
    pub fn min_score(&self) -> Option<i64> {
        GRADE_THRESHOLDS
            .iter()
            .find(|(_, rating)| rating == self)
            .map(|(min, _)| *min)
    }

    /// Position on the scale, `D` = 0 up to `AAA` = 9.
    pub fn rank(&self) -> u8 {
        match self {
            Rating::Aaa => 9,
            Rating::AaPlus => 8,
            Rating::Aa => 7,
            Rating::APlus => 6,
            Rating::A => 5,
            Rating::Bbb => 4,
            Rating::Bb => 3,
            Rating::B => 2,
            Rating::Ccc => 1,
            Rating::D => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Aaa => "AAA",
            Rating::AaPlus => "AA+",
            Rating::Aa => "AA",
            Rating::APlus => "A+",
            Rating::A => "A",
            Rating::Bbb => "BBB",
            Rating::Bb => "BB",
            Rating::B => "B",
            Rating::Ccc => "CCC",
            Rating::D => "D",
        }
    }
}

impl PartialOrd for Rating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rating {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .iter()
            .copied()
            .find(|rating| rating.as_str() == s)
            .ok_or_else(|| format!("Unknown rating: {}", s))
    }
}
