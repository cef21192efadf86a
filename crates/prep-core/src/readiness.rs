//! Readiness engine.
//!
//! Converts a subject's per-topic quiz history into a composite 0-100
//! readiness score plus the supporting breakdown a dashboard needs: topic
//! coverage, an attempt-weighted mastery average, a severity-classified
//! weak-topic list, and an exam-proximity urgency tag.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::{MasteryStatus, SeverityBands};
use crate::topic::Topic;

/// Exam-proximity classification combining days-until-exam and readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Normal,
}

/// One rule of the urgency table: matches when the exam is at most
/// `max_days` away and the readiness score is below `below_score`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyRule {
    pub max_days: i64,
    pub below_score: i32,
    pub urgency: Urgency,
}

/// Tunable weights and thresholds of the readiness formula.
///
/// The defaults are the canonical values; passing a config instead of
/// reading module-level constants keeps the formula testable and lets
/// variant threshold sets coexist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Severity tier boundaries shared with the rest of the system
    pub bands: SeverityBands,
    /// Score deduction per critical topic
    pub critical_penalty: i32,
    /// Score deduction per weak topic
    pub weak_penalty: i32,
    /// Score deduction per moderate topic
    pub moderate_penalty: i32,
    /// Minimum last-attempt accuracy that earns a recency bonus
    pub recency_accuracy_bar: i32,
    /// Bonus per recently well-practiced topic
    pub recency_bonus_per_topic: i32,
    /// Upper bound on the total recency bonus
    pub recency_bonus_cap: i32,
    /// Urgency rules, evaluated in order; the first match wins. The rules
    /// are ordered strictest-first, so a looser later rule can never
    /// override an earlier one even though their day ranges overlap.
    pub urgency_rules: [UrgencyRule; 3],
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            bands: SeverityBands::default(),
            critical_penalty: 8,
            weak_penalty: 4,
            moderate_penalty: 1,
            recency_accuracy_bar: 70,
            recency_bonus_per_topic: 3,
            recency_bonus_cap: 15,
            urgency_rules: [
                UrgencyRule { max_days: 3, below_score: 60, urgency: Urgency::Critical },
                UrgencyRule { max_days: 7, below_score: 50, urgency: Urgency::High },
                UrgencyRule { max_days: 14, below_score: 40, urgency: Urgency::Medium },
            ],
        }
    }
}

impl ReadinessConfig {
    /// Classify exam urgency from days remaining and the readiness score.
    pub fn classify_urgency(&self, days_until_exam: i64, readiness_score: i32) -> Urgency {
        for rule in &self.urgency_rules {
            if days_until_exam <= rule.max_days && readiness_score < rule.below_score {
                return rule.urgency;
            }
        }
        Urgency::Normal
    }
}

/// Per-topic line of the readiness breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicReadiness {
    pub id: Uuid,
    pub name: String,
    pub mastery: i32,
    pub status: MasteryStatus,
}

/// Output of the readiness engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    /// Composite readiness, 0-100
    pub readiness_score: i32,
    /// Percentage of topics attempted at least once, 0-100
    pub coverage: i32,
    /// Attempt-weighted mean of mastery scores, 0-100
    pub weighted_average_mastery: i32,
    /// Total deduction from weak/critical/moderate topics
    pub severity_penalty: i32,
    /// Reward for recently well-practiced topics
    pub recency_bonus: i32,
    /// One line per topic, in input order
    pub topic_breakdown: Vec<TopicReadiness>,
    /// Subset of the breakdown with weak or critical status
    pub weak_topics: Vec<TopicReadiness>,
    /// Present only when an exam date was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
}

/// Days until the exam for urgency purposes, floored at zero.
pub fn days_until_exam(exam_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (exam_date - now).num_seconds();
    (seconds as f64 / 86_400.0).ceil().max(0.0) as i64
}

/// Parse an exam date from its raw string representation.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS`, and bare
/// `YYYY-MM-DD` dates (midnight UTC). Returns `None` for anything else;
/// callers treat an unparseable date as "exam is effectively now" rather
/// than failing.
pub fn parse_exam_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Compute the readiness report for one subject's topics.
///
/// # Arguments
///
/// * `topics` - Topic snapshot for the subject (may be empty)
/// * `exam_date` - Exam date, if the subject has one
///
/// # Algorithm
///
/// 1. Coverage: share of topics with at least one attempt, as a 0-100
///    integer.
/// 2. Attempt-weighted mastery: each topic contributes weight
///    `ln(1 + attempts) + 1`, so well-exercised topics dominate the average
///    while zero-attempt topics still count at minimum confidence.
/// 3. Severity penalty: `8 x critical + 4 x weak + 1 x moderate`, additive
///    and unbounded, so many weak topics suppress the score even when a few
///    strong ones pull the plain average up.
/// 4. Recency bonus: +3 per attempted topic whose last accuracy is at least
///    70, capped at 15.
/// 5. Score: `weighted_average x coverage/100 - penalty + bonus`, rounded
///    and clamped to 0-100.
/// 6. Urgency (only with an exam date): the first matching rule of the
///    strictest-first table wins.
pub fn compute_readiness(topics: &[Topic], exam_date: Option<DateTime<Utc>>) -> ReadinessReport {
    compute_readiness_at(topics, exam_date, Utc::now(), &ReadinessConfig::default())
}

/// [`compute_readiness`] with an explicit clock and config.
pub fn compute_readiness_at(
    topics: &[Topic],
    exam_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: &ReadinessConfig,
) -> ReadinessReport {
    if topics.is_empty() {
        return ReadinessReport {
            readiness_score: 0,
            coverage: 0,
            weighted_average_mastery: 0,
            severity_penalty: 0,
            recency_bonus: 0,
            topic_breakdown: Vec::new(),
            weak_topics: Vec::new(),
            urgency: exam_date.map(|exam| config.classify_urgency(days_until_exam(exam, now), 0)),
        };
    }

    let attempted = topics.iter().filter(|t| t.is_attempted()).count();
    let coverage = (attempted as f64 / topics.len() as f64 * 100.0).round() as i32;

    let mut weight_sum = 0.0;
    let mut weighted_sum = 0.0;
    for topic in topics {
        let weight = (1.0 + f64::from(topic.total_attempts)).ln() + 1.0;
        weight_sum += weight;
        weighted_sum += f64::from(topic.mastery_score) * weight;
    }
    let weighted_average_mastery = (weighted_sum / weight_sum).round() as i32;

    let topic_breakdown: Vec<TopicReadiness> = topics
        .iter()
        .map(|t| TopicReadiness {
            id: t.id,
            name: t.name.clone(),
            mastery: t.mastery_score,
            status: config.bands.classify(t.mastery_score),
        })
        .collect();

    let mut severity_penalty = 0;
    for line in &topic_breakdown {
        severity_penalty += match line.status {
            MasteryStatus::Critical => config.critical_penalty,
            MasteryStatus::Weak => config.weak_penalty,
            MasteryStatus::Moderate => config.moderate_penalty,
            MasteryStatus::Strong => 0,
        };
    }

    let recent = topics
        .iter()
        .filter(|t| {
            t.is_attempted() && t.last_accuracy.is_some_and(|a| a >= config.recency_accuracy_bar)
        })
        .count() as i32;
    let recency_bonus = (recent * config.recency_bonus_per_topic).min(config.recency_bonus_cap);

    let raw = f64::from(weighted_average_mastery) * (f64::from(coverage) / 100.0)
        - f64::from(severity_penalty)
        + f64::from(recency_bonus);
    let readiness_score = (raw.round() as i32).clamp(0, 100);

    let weak_topics: Vec<TopicReadiness> = topic_breakdown
        .iter()
        .filter(|line| line.status.is_weak())
        .cloned()
        .collect();

    ReadinessReport {
        readiness_score,
        coverage,
        weighted_average_mastery,
        severity_penalty,
        recency_bonus,
        topic_breakdown,
        weak_topics,
        urgency: exam_date
            .map(|exam| config.classify_urgency(days_until_exam(exam, now), readiness_score)),
    }
}
