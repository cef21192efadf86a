//! Subject/topic storage behind a repository interface.
//!
//! Persistence proper is an external collaborator; the service works
//! against this trait and ships an in-memory implementation. Keeping the
//! store injectable (instead of module-level mutable state) lets tests run
//! isolated and in parallel.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use prep_core::{Schedule, Topic};
use prep_ai::ScheduleSource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::subject::model::Subject;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("subject not found")]
    SubjectNotFound,
    #[error("topic not found")]
    TopicNotFound,
    #[error("no schedule generated for this subject yet")]
    ScheduleNotFound,
}

/// Payload for creating a subject.
#[derive(Debug, Clone)]
pub struct NewSubject {
    pub name: String,
    pub exam_date: String,
    pub daily_study_hours: f64,
}

/// Partial subject update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct SubjectUpdate {
    pub name: Option<String>,
    pub exam_date: Option<String>,
    pub daily_study_hours: Option<f64>,
}

/// Partial topic update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TopicUpdate {
    pub name: Option<String>,
    pub mastery_score: Option<i32>,
    pub total_attempts: Option<i32>,
    pub last_accuracy: Option<i32>,
}

/// One recorded quiz attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: Uuid,
    pub topic_id: Uuid,
    pub accuracy: i32,
    pub time_taken_seconds: Option<i64>,
    pub attempted_at: DateTime<Utc>,
}

/// A stored schedule with its provenance. One per subject; regeneration
/// replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSchedule {
    pub schedule: Schedule,
    pub source: ScheduleSource,
    pub generated_at: DateTime<Utc>,
}

/// Repository capability the API is written against.
pub trait SubjectRepository: Send + Sync {
    fn list_subjects(&self) -> Vec<Subject>;
    fn get_subject(&self, id: Uuid) -> Result<Subject, StoreError>;
    fn create_subject(&self, new: NewSubject) -> Subject;
    fn update_subject(&self, id: Uuid, update: SubjectUpdate) -> Result<Subject, StoreError>;
    /// Delete a subject and cascade to its topics, attempts, and schedule.
    fn delete_subject(&self, id: Uuid) -> Result<(), StoreError>;

    fn list_topics(&self, subject_id: Uuid) -> Result<Vec<Topic>, StoreError>;
    fn get_topic(&self, id: Uuid) -> Result<Topic, StoreError>;
    fn create_topic(&self, subject_id: Uuid, name: String) -> Result<Topic, StoreError>;
    fn update_topic(&self, id: Uuid, update: TopicUpdate) -> Result<Topic, StoreError>;
    fn delete_topic(&self, id: Uuid) -> Result<(), StoreError>;

    /// Record a quiz attempt and fold it into the topic's mastery.
    fn record_attempt(
        &self,
        topic_id: Uuid,
        accuracy: i32,
        time_taken_seconds: Option<i64>,
    ) -> Result<(QuizAttempt, Topic), StoreError>;
    fn attempts_for_topic(&self, topic_id: Uuid) -> Result<Vec<QuizAttempt>, StoreError>;

    /// Save a subject's schedule, replacing any previous one.
    fn save_schedule(&self, subject_id: Uuid, schedule: SavedSchedule) -> Result<(), StoreError>;
    fn schedule_for_subject(&self, subject_id: Uuid) -> Result<SavedSchedule, StoreError>;
}

#[derive(Debug, Clone)]
struct TopicRow {
    topic: Topic,
    subject_id: Uuid,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct StoreInner {
    subjects: HashMap<Uuid, Subject>,
    topics: HashMap<Uuid, TopicRow>,
    attempts: Vec<QuizAttempt>,
    schedules: HashMap<Uuid, SavedSchedule>,
}

/// In-memory [`SubjectRepository`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SubjectRepository for InMemoryStore {
    fn list_subjects(&self) -> Vec<Subject> {
        let inner = self.read();
        let mut subjects: Vec<Subject> = inner.subjects.values().cloned().collect();
        // Newest first, id as a deterministic tie-break.
        subjects.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        subjects
    }

    fn get_subject(&self, id: Uuid) -> Result<Subject, StoreError> {
        self.read().subjects.get(&id).cloned().ok_or(StoreError::SubjectNotFound)
    }

    fn create_subject(&self, new: NewSubject) -> Subject {
        let subject = Subject {
            id: Uuid::new_v4(),
            name: new.name,
            exam_date: new.exam_date,
            daily_study_hours: new.daily_study_hours,
            created_at: Utc::now(),
        };
        self.write().subjects.insert(subject.id, subject.clone());
        subject
    }

    fn update_subject(&self, id: Uuid, update: SubjectUpdate) -> Result<Subject, StoreError> {
        let mut inner = self.write();
        let subject = inner.subjects.get_mut(&id).ok_or(StoreError::SubjectNotFound)?;
        if let Some(name) = update.name {
            subject.name = name;
        }
        if let Some(exam_date) = update.exam_date {
            subject.exam_date = exam_date;
        }
        if let Some(hours) = update.daily_study_hours {
            subject.daily_study_hours = hours;
        }
        Ok(subject.clone())
    }

    fn delete_subject(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.write();
        inner.subjects.remove(&id).ok_or(StoreError::SubjectNotFound)?;

        let orphaned: Vec<Uuid> = inner
            .topics
            .iter()
            .filter(|(_, row)| row.subject_id == id)
            .map(|(topic_id, _)| *topic_id)
            .collect();
        for topic_id in &orphaned {
            inner.topics.remove(topic_id);
        }
        inner.attempts.retain(|attempt| !orphaned.contains(&attempt.topic_id));
        inner.schedules.remove(&id);
        Ok(())
    }

    fn list_topics(&self, subject_id: Uuid) -> Result<Vec<Topic>, StoreError> {
        let inner = self.read();
        if !inner.subjects.contains_key(&subject_id) {
            return Err(StoreError::SubjectNotFound);
        }
        let mut rows: Vec<&TopicRow> =
            inner.topics.values().filter(|row| row.subject_id == subject_id).collect();
        // Oldest first, matching insertion order.
        rows.sort_by_key(|row| (row.created_at, row.topic.id));
        Ok(rows.into_iter().map(|row| row.topic.clone()).collect())
    }

    fn get_topic(&self, id: Uuid) -> Result<Topic, StoreError> {
        self.read()
            .topics
            .get(&id)
            .map(|row| row.topic.clone())
            .ok_or(StoreError::TopicNotFound)
    }

    fn create_topic(&self, subject_id: Uuid, name: String) -> Result<Topic, StoreError> {
        let mut inner = self.write();
        if !inner.subjects.contains_key(&subject_id) {
            return Err(StoreError::SubjectNotFound);
        }
        let topic = Topic::new(name);
        inner.topics.insert(
            topic.id,
            TopicRow { topic: topic.clone(), subject_id, created_at: Utc::now() },
        );
        Ok(topic)
    }

    fn update_topic(&self, id: Uuid, update: TopicUpdate) -> Result<Topic, StoreError> {
        let mut inner = self.write();
        let row = inner.topics.get_mut(&id).ok_or(StoreError::TopicNotFound)?;
        if let Some(name) = update.name {
            row.topic.name = name;
        }
        if let Some(mastery) = update.mastery_score {
            row.topic.mastery_score = mastery.clamp(0, 100);
        }
        if let Some(attempts) = update.total_attempts {
            row.topic.total_attempts = attempts.max(0);
        }
        if let Some(accuracy) = update.last_accuracy {
            row.topic.last_accuracy = Some(accuracy.clamp(0, 100));
        }
        Ok(row.topic.clone())
    }

    fn delete_topic(&self, id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.write();
        inner.topics.remove(&id).ok_or(StoreError::TopicNotFound)?;
        inner.attempts.retain(|attempt| attempt.topic_id != id);
        Ok(())
    }

    fn record_attempt(
        &self,
        topic_id: Uuid,
        accuracy: i32,
        time_taken_seconds: Option<i64>,
    ) -> Result<(QuizAttempt, Topic), StoreError> {
        let mut inner = self.write();
        let row = inner.topics.get_mut(&topic_id).ok_or(StoreError::TopicNotFound)?;
        row.topic.record_attempt(accuracy);
        let topic = row.topic.clone();

        let attempt = QuizAttempt {
            id: Uuid::new_v4(),
            topic_id,
            accuracy: accuracy.clamp(0, 100),
            time_taken_seconds,
            attempted_at: Utc::now(),
        };
        inner.attempts.push(attempt.clone());
        Ok((attempt, topic))
    }

    fn attempts_for_topic(&self, topic_id: Uuid) -> Result<Vec<QuizAttempt>, StoreError> {
        let inner = self.read();
        if !inner.topics.contains_key(&topic_id) {
            return Err(StoreError::TopicNotFound);
        }
        Ok(inner
            .attempts
            .iter()
            .filter(|attempt| attempt.topic_id == topic_id)
            .cloned()
            .collect())
    }

    fn save_schedule(&self, subject_id: Uuid, schedule: SavedSchedule) -> Result<(), StoreError> {
        let mut inner = self.write();
        if !inner.subjects.contains_key(&subject_id) {
            return Err(StoreError::SubjectNotFound);
        }
        inner.schedules.insert(subject_id, schedule);
        Ok(())
    }

    fn schedule_for_subject(&self, subject_id: Uuid) -> Result<SavedSchedule, StoreError> {
        let inner = self.read();
        if !inner.subjects.contains_key(&subject_id) {
            return Err(StoreError::SubjectNotFound);
        }
        inner.schedules.get(&subject_id).cloned().ok_or(StoreError::ScheduleNotFound)
    }
}
