use std::sync::Arc;

use prep_ai::{GenerationLog, GroqClient, QuizGenerator, ScheduleGenerator};
use prep_core::ReadinessConfig;

use crate::ApiConfig;
use crate::store::{InMemoryStore, SubjectRepository};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<dyn SubjectRepository>,
    pub schedule_generator: Arc<ScheduleGenerator>,
    pub quiz_generator: Arc<QuizGenerator>,
    pub generation_log: Arc<GenerationLog>,
    pub readiness: ReadinessConfig,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Self {
        let client = config.groq_api_key.clone().map(GroqClient::new);
        if client.is_none() {
            tracing::warn!(
                "GROQ_API_KEY not configured; schedules and quizzes are generated locally"
            );
        }

        Self::with_store(Arc::new(InMemoryStore::new()), client)
    }

    /// Build a state over an explicit repository. Tests use this to get a
    /// fresh, isolated store per case.
    pub fn with_store(store: Arc<dyn SubjectRepository>, client: Option<GroqClient>) -> Self {
        Self {
            store,
            schedule_generator: Arc::new(ScheduleGenerator::new(client.clone())),
            quiz_generator: Arc::new(QuizGenerator::new(client)),
            generation_log: Arc::new(GenerationLog::new()),
            readiness: ReadinessConfig::default(),
        }
    }
}
