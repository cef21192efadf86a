//! AI schedule generation with local fallback.
//!
//! Builds the planning prompt, calls the model, and validates the response
//! into the shared [`Schedule`] shape. Any failure along the remote path
//! falls back to the deterministic local planner, so generation as a whole
//! cannot fail.

use chrono::{DateTime, Utc};
use prep_core::readiness::days_until_exam;
use prep_core::{PlannerConfig, Schedule, StudySession, Topic, plan_schedule_at};
use serde::{Deserialize, Serialize};

use crate::client::GroqClient;
use crate::error::AiError;

/// Which path produced a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleSource {
    Ai,
    Local,
}

/// A generated schedule together with its provenance.
#[derive(Debug, Clone)]
pub struct GeneratedSchedule {
    pub schedule: Schedule,
    pub source: ScheduleSource,
    /// The user prompt sent to the model, for the audit log (AI path only)
    pub prompt: Option<String>,
}

/// Schedule generator: remote model when a client is configured, local
/// planner otherwise and on every remote failure.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    client: Option<GroqClient>,
    planner: PlannerConfig,
}

impl ScheduleGenerator {
    pub fn new(client: Option<GroqClient>) -> Self {
        Self { client, planner: PlannerConfig::default() }
    }

    /// Generate a schedule for the given topic snapshot.
    ///
    /// Never fails: the local planner is the unconditional fallback.
    pub async fn generate(
        &self,
        topics: &[Topic],
        exam_date: DateTime<Utc>,
        daily_hours: f64,
    ) -> GeneratedSchedule {
        let now = Utc::now();

        if let Some(client) = &self.client {
            let (system, user) =
                build_schedule_prompt(topics, exam_date, daily_hours, now, &self.planner);
            match self.generate_remote(client, &system, &user, daily_hours).await {
                Ok(schedule) => {
                    return GeneratedSchedule {
                        schedule,
                        source: ScheduleSource::Ai,
                        prompt: Some(user),
                    };
                }
                Err(err) => {
                    tracing::warn!(error = %err, "AI schedule generation failed, using local planner");
                }
            }
        }

        GeneratedSchedule {
            schedule: plan_schedule_at(topics, exam_date, daily_hours, now, &self.planner),
            source: ScheduleSource::Local,
            prompt: None,
        }
    }

    async fn generate_remote(
        &self,
        client: &GroqClient,
        system: &str,
        user: &str,
        daily_hours: f64,
    ) -> Result<Schedule, AiError> {
        let text = client.chat_json(system, user).await?;
        let json = extract_json(&text).ok_or(AiError::NoJson)?;
        let value: serde_json::Value = serde_json::from_str(json)?;
        let schedule = normalize_schedule(&value).ok_or(AiError::InvalidSchedule)?;

        // The prompt states the budget; a schedule that ignores it is as
        // invalid as malformed JSON.
        let budget = if daily_hours > 0.0 { (daily_hours * 60.0).round() as u32 } else { 0 };
        if !schedule.fits_budget(budget) {
            return Err(AiError::InvalidSchedule);
        }
        Ok(schedule)
    }
}

/// Build the system and user prompts for schedule generation.
pub fn build_schedule_prompt(
    topics: &[Topic],
    exam_date: DateTime<Utc>,
    daily_hours: f64,
    now: DateTime<Utc>,
    planner: &PlannerConfig,
) -> (String, String) {
    let days_until = days_until_exam(exam_date, now).max(1);
    let schedule_days = (days_until as u32).min(planner.horizon_days);
    let daily_minutes = (daily_hours * 60.0).round() as i64;

    let system = format!(
        "You are an expert study planner. Create a {schedule_days}-day study schedule for a \
         student. Return ONLY valid JSON in the exact format requested.\n\
         \n\
         Constraints:\n\
         - Exam is in {days_until} days\n\
         - Student can study {daily_hours} hours/day ({daily_minutes} minutes)\n\
         - Prioritize weak topics (< 60% mastery)\n\
         - Balance workload across days\n\
         - Give more time to topics with lowest mastery\n\
         - For the \"reason\" field, you MUST categorize and explain based on mastery:\n\
           * < 40%: \"Critical: Very low mastery. Needs intensive practice.\"\n\
           * < 60%: \"High priority: Below passing threshold. Focus on fundamentals.\"\n\
           * < 80%: \"Moderate: Good progress but room for improvement.\"\n\
           * >= 80%: \"Review: Strong mastery. Light revision to maintain knowledge.\"\n\
           Append a brief tip specific to the topic to these categories.\n\
         \n\
         Return EXACTLY this JSON structure:\n\
         {{\n\
           \"Day 1\": [\n\
             {{\"topic\": \"Topic Name\", \"duration\": 60, \"reason\": \"Explanation according \
         to mastery score\"}}\n\
           ]\n\
         }}\n\
         Each day's total duration must not exceed {daily_minutes} minutes."
    );

    let topic_lines: Vec<String> = topics
        .iter()
        .map(|t| format!("- {}: mastery {}%", t.name, t.mastery_score))
        .collect();
    let user = format!("Study Data:\n{}\n\nGenerate the JSON schedule.", topic_lines.join("\n"));

    (system, user)
}

/// Extract the outermost JSON object from free-form model output.
pub fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start { None } else { Some(&text[start..=end]) }
}

/// Validate a raw model response into a [`Schedule`].
///
/// Rules: the value must be an object of `"Day N"` keys to arrays; every
/// item needs a non-empty trimmed `topic` and `reason` and a finite
/// `duration > 0` (rounded to whole minutes). An empty object, or any
/// violation, rejects the whole response.
pub fn normalize_schedule(value: &serde_json::Value) -> Option<Schedule> {
    let days = value.as_object()?;
    if days.is_empty() {
        return None;
    }

    let mut schedule = Schedule::new();
    for (label, items) in days {
        let day = Schedule::parse_day_label(label)?;
        let items = items.as_array()?;

        let mut sessions = Vec::with_capacity(items.len());
        for item in items {
            let topic = item.get("topic")?.as_str()?.trim();
            let reason = item.get("reason")?.as_str()?.trim();
            let duration = item.get("duration")?.as_f64()?;
            if topic.is_empty() || reason.is_empty() || !duration.is_finite() || duration <= 0.0 {
                return None;
            }
            sessions.push(StudySession {
                topic: topic.to_string(),
                duration: duration.round() as u32,
                reason: reason.to_string(),
            });
        }
        schedule.insert_day(day, sessions);
    }

    Some(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn topic(name: &str, mastery: i32) -> Topic {
        Topic {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            mastery_score: mastery,
            total_attempts: 1,
            last_accuracy: Some(mastery),
        }
    }

    #[test]
    fn test_extract_json_from_fenced_output() {
        let text = "Here is your schedule:\n```json\n{\"Day 1\": []}\n```";
        assert_eq!(extract_json(text), Some("{\"Day 1\": []}"));
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("} backwards {"), None);
    }

    #[test]
    fn test_normalize_accepts_valid_schedule() {
        let value = json!({
            "Day 1": [
                {"topic": " Algebra ", "duration": 45.4, "reason": " weak area "}
            ],
            "Day 2": []
        });
        let schedule = normalize_schedule(&value).unwrap();
        assert_eq!(schedule.num_days(), 2);
        let session = &schedule.day(1).unwrap()[0];
        assert_eq!(session.topic, "Algebra");
        assert_eq!(session.duration, 45);
        assert_eq!(session.reason, "weak area");
    }

    #[test]
    fn test_normalize_rejects_bad_shapes() {
        assert!(normalize_schedule(&json!([])).is_none());
        assert!(normalize_schedule(&json!({})).is_none());
        assert!(normalize_schedule(&json!({"Day 1": "not a list"})).is_none());
        assert!(normalize_schedule(&json!({"Monday": []})).is_none());
        assert!(
            normalize_schedule(&json!({"Day 1": [{"topic": "", "duration": 30, "reason": "r"}]}))
                .is_none()
        );
        assert!(
            normalize_schedule(&json!({"Day 1": [{"topic": "A", "duration": 0, "reason": "r"}]}))
                .is_none()
        );
        assert!(
            normalize_schedule(&json!({"Day 1": [{"topic": "A", "duration": -5, "reason": "r"}]}))
                .is_none()
        );
        assert!(normalize_schedule(&json!({"Day 1": [{"topic": "A", "duration": 30}]})).is_none());
    }

    #[test]
    fn test_prompt_carries_budget_and_topics() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let (system, user) = build_schedule_prompt(
            &[topic("Algebra", 35), topic("Geometry", 75)],
            now + Duration::days(5),
            2.0,
            now,
            &PlannerConfig::default(),
        );
        assert!(system.contains("5-day study schedule"));
        assert!(system.contains("Exam is in 5 days"));
        assert!(system.contains("120 minutes"));
        assert!(user.contains("- Algebra: mastery 35%"));
        assert!(user.contains("- Geometry: mastery 75%"));
    }

    #[test]
    fn test_prompt_horizon_caps_like_planner() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let (system, _) = build_schedule_prompt(
            &[topic("Algebra", 35)],
            now + Duration::days(45),
            1.0,
            now,
            &PlannerConfig::default(),
        );
        assert!(system.contains("7-day study schedule"));
        assert!(system.contains("Exam is in 45 days"));
    }

    #[tokio::test]
    async fn test_no_client_falls_back_to_local() {
        let generator = ScheduleGenerator::new(None);
        let now = Utc::now();
        let topics = [topic("Algebra", 20)];

        let generated = generator.generate(&topics, now + Duration::days(3), 2.0).await;
        assert_eq!(generated.source, ScheduleSource::Local);
        assert_eq!(generated.prompt, None);
        assert_eq!(generated.schedule.num_days(), 3);
        assert!(generated.schedule.fits_budget(120));
    }
}
