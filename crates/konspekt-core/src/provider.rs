use crate::error::{NotesError, Result};

/// Connection settings for the generative service, passed explicitly to
/// each client instead of living in process-wide state.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model: String,
    pub api_key: String,
}

impl GeminiConfig {
    pub const DEFAULT_API_BASE: &'static str =
        "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-pro-latest";
    pub const API_KEY_ENV: &'static str = "GOOGLE_API_KEY";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: Self::DEFAULT_API_BASE.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the API key from the environment.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var(Self::API_KEY_ENV).map_err(|_| NotesError::MissingApiKey {
                env_var: Self::API_KEY_ENV.to_string(),
            })?;
        Ok(Self::new(api_key))
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_endpoint_and_model() {
        let config = GeminiConfig::new("key");
        assert_eq!(config.api_base, GeminiConfig::DEFAULT_API_BASE);
        assert_eq!(config.model, "gemini-1.5-pro-latest");
        assert_eq!(config.api_key, "key");
    }

    #[test]
    fn missing_key_error_names_the_variable() {
        let err = NotesError::MissingApiKey {
            env_var: GeminiConfig::API_KEY_ENV.to_string(),
        };
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }
}
