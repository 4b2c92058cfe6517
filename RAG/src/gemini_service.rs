use crate::config::GeminiConfig;
use crate::models::*;
use crate::prompt::{answer_schema, build_prompt};
use crate::query_service::AnswerModel;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;

// Keep the key out of the URL: reqwest errors include it.
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiService {
    client: Client,
    config: GeminiConfig,
}

impl GeminiService {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeminiConfig::from_env()?))
    }

    pub async fn generate_answer(&self, document_text: &str, question: &str) -> Result<Answer> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: build_prompt(document_text, question),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: "application/json".to_string(),
                response_schema: answer_schema(),
            }),
        };

        let response = self
            .client
            .post(self.config.generate_content_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("Gemini API error ({}): {}", status, error_text));
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| anyhow::anyhow!("Gemini returned no candidates"))?;

        parse_answer(text)
    }
}

#[async_trait]
impl AnswerModel for GeminiService {
    async fn answer(&self, document_text: &str, question: &str) -> Result<Answer> {
        self.generate_answer(document_text, question).await
    }
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^\s*```(?:json)?\s*(.*?)\s*```\s*$").expect("valid fence regex")
    })
}

/// Decodes the model's structured output, tolerating a markdown code fence.
pub fn parse_answer(text: &str) -> Result<Answer> {
    let body = code_fence()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text);

    let mut answer: Answer = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("malformed structured response: {}", e))?;

    if answer.answer.trim().is_empty() {
        return Err(anyhow::anyhow!("structured response has an empty answer"));
    }

    answer.snippet = answer.snippet.filter(|s| !s.trim().is_empty());
    Ok(answer)
}
