//! Local schedule planner.
//!
//! Deterministic fallback for the AI schedule generator: greedily spends
//! each day's minute budget on the weakest topics first. The output is
//! structurally identical to what the remote generator returns, so
//! downstream rendering code does not care which source produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::readiness::days_until_exam;
use crate::schedule::{Schedule, StudySession};
use crate::topic::Topic;

/// Tunable knobs of the local planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Longest plan ever produced, in days. Longer-range plans go stale as
    /// mastery changes, so the horizon stays short even for far-off exams.
    pub horizon_days: u32,
    /// Session length for topics below 40% mastery
    pub critical_minutes: u32,
    /// Session length for topics below 60% mastery
    pub weak_minutes: u32,
    /// Session length for topics below 80% mastery
    pub moderate_minutes: u32,
    /// Session length for everything stronger
    pub review_minutes: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            critical_minutes: 60,
            weak_minutes: 45,
            moderate_minutes: 30,
            review_minutes: 20,
        }
    }
}

/// Generate a study schedule without the AI generator.
///
/// # Arguments
///
/// * `topics` - Topic snapshot for the subject
/// * `exam_date` - Exam date; a past date still yields a one-day plan
/// * `daily_hours` - Study budget per day; zero or negative yields empty days
///
/// # Algorithm
///
/// Topics are ranked once, weakest first (stable, so equal mastery keeps
/// input order), and that ranking repeats for every day of the plan - the
/// plan is a snapshot, mastery is not re-read between days. Each day walks
/// the ranking, allocating a mastery-tiered session (60/45/30/20 minutes at
/// the 40/60/80 boundaries) clamped to the remaining budget, and stops when
/// the budget runs out. Low-priority topics may therefore get no time on a
/// day, and a very weak topic can dominate every day of the plan.
pub fn plan_schedule(topics: &[Topic], exam_date: DateTime<Utc>, daily_hours: f64) -> Schedule {
    plan_schedule_at(topics, exam_date, daily_hours, Utc::now(), &PlannerConfig::default())
}

/// [`plan_schedule`] with an explicit clock and config.
pub fn plan_schedule_at(
    topics: &[Topic],
    exam_date: DateTime<Utc>,
    daily_hours: f64,
    now: DateTime<Utc>,
    config: &PlannerConfig,
) -> Schedule {
    // Minimum one planning day, even when the exam is today or past.
    let days_until = days_until_exam(exam_date, now).max(1);
    let schedule_days = (days_until as u32).min(config.horizon_days);
    let minutes_per_day = if daily_hours > 0.0 {
        (daily_hours * 60.0).round() as i64
    } else {
        0
    };

    let mut ranked: Vec<&Topic> = topics.iter().collect();
    ranked.sort_by_key(|t| t.mastery_score);

    let mut schedule = Schedule::new();
    for day in 1..=schedule_days {
        let mut sessions = Vec::new();
        let mut remaining = minutes_per_day;

        for topic in &ranked {
            if remaining <= 0 {
                break;
            }
            let (tier_minutes, reason) = session_for(topic, days_until, config);
            let duration = i64::from(tier_minutes).min(remaining);
            sessions.push(StudySession {
                topic: topic.name.clone(),
                duration: duration as u32,
                reason,
            });
            remaining -= duration;
        }

        schedule.insert_day(day, sessions);
    }

    schedule
}

/// Tiered session length and explanation for one topic.
fn session_for(topic: &Topic, days_until: i64, config: &PlannerConfig) -> (u32, String) {
    let mastery = topic.mastery_score;
    if mastery < 40 {
        (
            config.critical_minutes,
            format!(
                "Critical: Very low mastery ({mastery}%). Needs intensive practice with \
                 {days_until} days until exam."
            ),
        )
    } else if mastery < 60 {
        (
            config.weak_minutes,
            format!("High priority: Below passing threshold ({mastery}%). Focus on fundamentals."),
        )
    } else if mastery < 80 {
        (
            config.moderate_minutes,
            format!(
                "Moderate: Good progress ({mastery}%) but room for improvement. \
                 Practice advanced problems."
            ),
        )
    } else {
        (
            config.review_minutes,
            format!("Review: Strong mastery ({mastery}%). Light revision to maintain knowledge."),
        )
    }
}
