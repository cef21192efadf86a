//! Mastery analytics core for the exam-prep service.
//!
//! This crate holds the pure computation layer: the readiness engine that
//! turns per-topic quiz history into a 0-100 exam readiness score, and the
//! local schedule planner that allocates daily study minutes across topics
//! ranked by weakness. Both are deterministic functions over an in-memory
//! topic snapshot; they perform no I/O and hold no state across calls.

pub mod planner;
pub mod readiness;
pub mod schedule;
pub mod status;
pub mod topic;

pub use planner::{PlannerConfig, plan_schedule, plan_schedule_at};
pub use readiness::{
    ReadinessConfig, ReadinessReport, TopicReadiness, Urgency, compute_readiness,
    compute_readiness_at, parse_exam_date,
};
pub use schedule::{Schedule, StudySession};
pub use status::{MasteryStatus, SeverityBands};
pub use topic::Topic;
