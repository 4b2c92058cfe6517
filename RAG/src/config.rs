use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            temperature: 0.3,
            max_output_tokens: 1024,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(temperature) = lookup("GEMINI_TEMPERATURE") {
            config.temperature = temperature
                .parse()
                .with_context(|| format!("invalid GEMINI_TEMPERATURE: {}", temperature))?;
        }
        if let Some(max_tokens) = lookup("GEMINI_MAX_OUTPUT_TOKENS") {
            config.max_output_tokens = max_tokens
                .parse()
                .with_context(|| format!("invalid GEMINI_MAX_OUTPUT_TOKENS: {}", max_tokens))?;
        }

        Ok(config)
    }

    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}
