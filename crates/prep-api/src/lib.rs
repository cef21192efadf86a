pub mod config;
pub mod error;
pub mod middleware;
pub mod quiz;
pub mod readiness;
pub mod router;
pub mod schedule;
pub mod state;
pub mod store;
pub mod subject;
pub mod topic;
pub mod tracing;
pub mod validation;

pub use config::{ApiConfig, Environment};
pub use state::ApiState;
