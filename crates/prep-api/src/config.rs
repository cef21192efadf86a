use std::env;

/// Deployment environment, selected by the `ENVIRONMENT` variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address the server binds to
    pub bind_addr: String,
    /// Groq API key; absent means schedules and quizzes are generated locally
    pub groq_api_key: Option<String>,
    pub env: Environment,
}

impl ApiConfig {
    /// Load configuration from environment variables. Everything has a
    /// default, so startup never fails on configuration alone.
    pub fn from_env() -> Self {
        let env = match env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            groq_api_key: env::var("GROQ_API_KEY").ok().filter(|key| !key.is_empty()),
            env,
        }
    }
}
