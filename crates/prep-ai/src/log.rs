//! Audit trail for AI generations.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One logged generation: the prompt that was sent and the output that was
/// accepted.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRecord {
    pub id: Uuid,
    pub subject_id: Option<Uuid>,
    pub prompt: String,
    pub output: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// In-memory generation log.
///
/// Logging must never fail the user-facing flow, so appends cannot error;
/// a poisoned lock just recovers the inner data.
#[derive(Debug, Default)]
pub struct GenerationLog {
    records: Mutex<Vec<GenerationRecord>>,
}

impl GenerationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record and return its id.
    pub fn record(
        &self,
        subject_id: Option<Uuid>,
        prompt: impl Into<String>,
        output: serde_json::Value,
    ) -> Uuid {
        let record = GenerationRecord {
            id: Uuid::new_v4(),
            subject_id,
            prompt: prompt.into(),
            output,
            created_at: Utc::now(),
        };
        let id = record.id;
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
        id
    }

    /// The most recent records, newest first.
    pub fn recent(&self, limit: usize) -> Vec<GenerationRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.iter().rev().take(limit).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
