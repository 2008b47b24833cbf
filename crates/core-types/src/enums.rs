use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The lookback window for a return series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
}

impl Period {
    /// Returns the number of trading days the period spans.
    pub fn trading_days(&self) -> usize {
        match self {
            Period::SixMonths => 126,
            Period::OneYear => 252,
        }
    }

    /// Returns the wire encoding used by the data provider (e.g., "6M").
    pub fn as_query(&self) -> &'static str {
        match self {
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query())
    }
}

impl FromStr for Period {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "6M" => Ok(Period::SixMonths),
            "1Y" => Ok(Period::OneYear),
            other => Err(CoreError::InvalidInput(
                "period".to_string(),
                format!("expected \"6M\" or \"1Y\", got \"{}\"", other),
            )),
        }
    }
}

/// An editorial categorization of p-value strength.
///
/// This is a fixed scale (1% / 5% / 10%), deliberately independent of the
/// significance level chosen for the hypothesis test itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceLevel {
    Strong,
    Moderate,
    Weak,
    None,
}

impl EvidenceLevel {
    /// Classifies a two-sided p-value. Thresholds are checked in order,
    /// first match wins.
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.01 {
            EvidenceLevel::Strong
        } else if p_value < 0.05 {
            EvidenceLevel::Moderate
        } else if p_value < 0.10 {
            EvidenceLevel::Weak
        } else {
            EvidenceLevel::None
        }
    }

    /// A human-readable label suitable for display.
    pub fn description(&self) -> &'static str {
        match self {
            EvidenceLevel::Strong => "Strong evidence",
            EvidenceLevel::Moderate => "Moderate evidence",
            EvidenceLevel::Weak => "Weak evidence",
            EvidenceLevel::None => "No evidence",
        }
    }
}

impl fmt::Display for EvidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EvidenceLevel::Strong => "strong",
            EvidenceLevel::Moderate => "moderate",
            EvidenceLevel::Weak => "weak",
            EvidenceLevel::None => "none",
        };
        f.write_str(label)
    }
}
