use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topic model - a trackable unit of study content with a mastery estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique topic identifier
    pub id: Uuid,
    /// Topic name (display string)
    pub name: String,
    /// Current estimated mastery, 0-100
    pub mastery_score: i32,
    /// Number of quiz attempts recorded for this topic
    pub total_attempts: i32,
    /// Accuracy of the most recent quiz attempt, 0-100 (absent if never attempted)
    pub last_accuracy: Option<i32>,
}

impl Topic {
    /// Create a fresh, unattempted topic.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mastery_score: 0,
            total_attempts: 0,
            last_accuracy: None,
        }
    }

    /// Whether this topic has ever been quizzed.
    ///
    /// A topic with zero attempts is uncovered regardless of any stored
    /// mastery default.
    pub const fn is_attempted(&self) -> bool {
        self.total_attempts > 0
    }

    /// Record a quiz attempt and fold its accuracy into the mastery estimate.
    ///
    /// Uses the running-average update rule:
    /// `new_mastery = round((old_mastery + accuracy) / 2)`. Accuracy is
    /// clamped to 0-100 before it is applied.
    pub fn record_attempt(&mut self, accuracy: i32) {
        let accuracy = accuracy.clamp(0, 100);
        self.mastery_score =
            (f64::from(self.mastery_score + accuracy) / 2.0).round() as i32;
        self.total_attempts += 1;
        self.last_accuracy = Some(accuracy);
    }
}
