//! Mastery status classification.
//!
//! The four severity tiers and their threshold boundaries live here and
//! nowhere else; the readiness engine, the planner reasons, and any
//! presentation layer all classify through [`SeverityBands`] so the
//! boundaries cannot drift between call sites.

use serde::{Deserialize, Serialize};

/// Severity tier for a topic's mastery score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryStatus {
    /// Mastery below the critical threshold; needs intensive practice
    Critical,
    /// Below passing threshold
    Weak,
    /// Passing but with room for improvement
    Moderate,
    /// Exam-ready
    Strong,
}

impl MasteryStatus {
    /// Classify a mastery score with the canonical threshold set.
    pub fn from_mastery(mastery: i32) -> Self {
        SeverityBands::default().classify(mastery)
    }

    /// Human-readable label, as rendered by badge components.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
        }
    }

    /// Presentation color hint for this status.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Critical | Self::Weak => "red",
            Self::Moderate => "orange",
            Self::Strong => "green",
        }
    }

    /// Whether this status belongs on the weak-topic list.
    pub const fn is_weak(self) -> bool {
        matches!(self, Self::Critical | Self::Weak)
    }
}

/// Mastery thresholds separating the four severity tiers.
///
/// Scores below `critical_below` are critical, below `weak_below` weak,
/// below `moderate_below` moderate, and everything else strong. The default
/// carries the canonical 40/60/75 boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBands {
    pub critical_below: i32,
    pub weak_below: i32,
    pub moderate_below: i32,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            critical_below: 40,
            weak_below: 60,
            moderate_below: 75,
        }
    }
}

impl SeverityBands {
    /// Classify a mastery score into its severity tier.
    pub const fn classify(&self, mastery: i32) -> MasteryStatus {
        if mastery < self.critical_below {
            MasteryStatus::Critical
        } else if mastery < self.weak_below {
            MasteryStatus::Weak
        } else if mastery < self.moderate_below {
            MasteryStatus::Moderate
        } else {
            MasteryStatus::Strong
        }
    }
}
