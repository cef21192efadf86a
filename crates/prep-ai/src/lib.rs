//! Remote AI generation adapter for the exam-prep service.
//!
//! Wraps the Groq chat-completions API for schedule and quiz generation.
//! Every remote path validates the model's JSON before trusting it and
//! falls back to the deterministic local implementation (the planner in
//! `prep-core`, or the static question bank) on any failure, so the caller
//! always gets a usable result.

pub mod client;
pub mod error;
pub mod log;
pub mod question_bank;
pub mod quiz;
pub mod schedule;

pub use client::GroqClient;
pub use error::AiError;
pub use log::{GenerationLog, GenerationRecord};
pub use quiz::{QuizGenerator, QuizQuestion};
pub use schedule::{GeneratedSchedule, ScheduleGenerator, ScheduleSource};
