//! Cycle-irregularity screening.
//!
//! Scores the start-to-start gaps of a user's history into a coarse risk
//! tier. This is a heuristic signal for display, never a diagnosis.

use serde::Serialize;

use super::cycle_lengths;
use crate::models::CycleRecord;

pub const MIN_CYCLES_FOR_RISK: usize = 3;
pub const LONG_CYCLE_DAYS: f64 = 35.0;
pub const SHORT_CYCLE_DAYS: f64 = 21.0;
pub const IRREGULAR_STD_DEV_DAYS: f64 = 5.0;
pub const HIGH_RISK_SCORE: u32 = 2;

pub const DISCLAIMER: &str =
    "Screening signal based on cycle regularity and length only. Not a medical diagnosis.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Fewer than [`MIN_CYCLES_FOR_RISK`] records.
    InsufficientCycles,
    /// Enough records but no usable cycle length.
    InsufficientData,
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::InsufficientCycles => "Insufficient Data (Need 3+ cycles)",
            RiskTier::InsufficientData => "Insufficient Data",
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    pub fn color(self) -> RiskColor {
        match self {
            RiskTier::InsufficientCycles | RiskTier::InsufficientData => RiskColor::Gray,
            RiskTier::Low => RiskColor::Green,
            RiskTier::Medium => RiskColor::Orange,
            RiskTier::High => RiskColor::Red,
        }
    }

    fn from_score(score: u32) -> Self {
        match score {
            0 => RiskTier::Low,
            s if s >= HIGH_RISK_SCORE => RiskTier::High,
            _ => RiskTier::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskColor {
    Gray,
    Green,
    Orange,
    Red,
}

impl RiskColor {
    pub fn hex(self) -> &'static str {
        match self {
            RiskColor::Gray => "#808080",
            RiskColor::Green => "#00ff00",
            RiskColor::Orange => "#ffa500",
            RiskColor::Red => "#ff4b4b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReason {
    LongCycles,
    ShortCycles,
    Irregular,
}

impl RiskReason {
    pub fn describe(self) -> &'static str {
        match self {
            RiskReason::LongCycles => "Average cycle length > 35 days",
            RiskReason::ShortCycles => "Average cycle length < 21 days",
            RiskReason::Irregular => "Irregular cycle lengths",
        }
    }

    fn weight(self) -> u32 {
        match self {
            RiskReason::LongCycles | RiskReason::ShortCycles => 2,
            RiskReason::Irregular => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub color: RiskColor,
    pub reasons: Vec<RiskReason>,
    pub average_length: Option<f64>,
    pub std_dev: Option<f64>,
}

impl RiskAssessment {
    fn insufficient(tier: RiskTier) -> Self {
        Self {
            tier,
            color: tier.color(),
            reasons: Vec::new(),
            average_length: None,
            std_dev: None,
        }
    }

    pub fn tier_and_color(&self) -> (RiskTier, RiskColor) {
        (self.tier, self.color)
    }
}

fn score(reasons: &[RiskReason]) -> u32 {
    reasons.iter().map(|r| r.weight()).sum()
}

fn mean(values: &[i64]) -> f64 {
    values.iter().sum::<i64>() as f64 / values.len() as f64
}

/// Sample standard deviation (n - 1). `None` below two samples.
fn sample_std_dev(values: &[i64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values.iter().map(|&v| (v as f64 - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

pub fn classify_risk(records: &[CycleRecord]) -> RiskAssessment {
    if records.len() < MIN_CYCLES_FOR_RISK {
        return RiskAssessment::insufficient(RiskTier::InsufficientCycles);
    }

    let lengths = cycle_lengths(records);
    if lengths.is_empty() {
        return RiskAssessment::insufficient(RiskTier::InsufficientData);
    }

    let average = mean(&lengths);
    let std_dev = sample_std_dev(&lengths, average);

    let mut reasons = Vec::new();
    if average > LONG_CYCLE_DAYS {
        reasons.push(RiskReason::LongCycles);
    } else if average < SHORT_CYCLE_DAYS {
        reasons.push(RiskReason::ShortCycles);
    }
    if std_dev.is_some_and(|sd| sd > IRREGULAR_STD_DEV_DAYS) {
        reasons.push(RiskReason::Irregular);
    }

    let total = score(&reasons);
    let tier = RiskTier::from_score(total);
    tracing::debug!(average, ?std_dev, score = total, ?tier, "classified cycle risk");

    RiskAssessment {
        tier,
        color: tier.color(),
        reasons,
        average_length: Some(average),
        std_dev,
    }
}
