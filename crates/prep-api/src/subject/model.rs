use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject model - a course being prepared for an exam, owning topics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier
    pub id: Uuid,
    /// Subject name (display string)
    pub name: String,
    /// Exam date exactly as supplied by the user; parsed leniently when
    /// needed, an unparseable value degrades to "exam is now"
    pub exam_date: String,
    /// Daily study budget in hours
    pub daily_study_hours: f64,
    /// When the subject was created
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// The exam date as a timestamp. Unparseable dates degrade to `now`,
    /// so downstream day counts floor at their minimums instead of failing.
    pub fn exam_date_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        prep_core::parse_exam_date(&self.exam_date).unwrap_or(now)
    }
}
