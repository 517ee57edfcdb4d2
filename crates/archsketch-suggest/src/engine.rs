use std::time::Duration;

use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use archsketch_core::AiSettings;

use crate::error::SuggestError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Anything that turns a system prompt and a user prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, system: &str, user: &str) -> Result<String, SuggestError>;
}

fn map_backend(provider: &str) -> Result<LLMBackend, SuggestError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(SuggestError::UnknownProvider(other.to_string())),
    }
}

/// [`TextGenerator`] over any provider the `llm` crate supports.
#[derive(Debug, Clone)]
pub struct LlmGenerator {
    settings: AiSettings,
    timeout: Duration,
}

impl LlmGenerator {
    /// Fails early on an unknown provider so the caller can skip the LLM path.
    pub fn new(settings: AiSettings) -> Result<Self, SuggestError> {
        map_backend(&settings.provider)?;
        Ok(Self {
            settings,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> &str {
        &self.settings.provider
    }

    async fn chat(&self, system: &str, user_msg: &str) -> Result<String, SuggestError> {
        let backend = map_backend(&self.settings.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&self.settings.model)
            .system(system);

        if !self.settings.api_key.is_empty() {
            builder = builder.api_key(&self.settings.api_key);
        }

        let llm = builder.build().map_err(|e| SuggestError::Build(e.to_string()))?;

        let messages = vec![ChatMessage::user().content(user_msg).build()];

        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| SuggestError::Chat(e.to_string()))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(SuggestError::Empty),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmGenerator {
    async fn generate_text(&self, system: &str, user: &str) -> Result<String, SuggestError> {
        tokio::time::timeout(self.timeout, self.chat(system, user))
            .await
            .map_err(|_| SuggestError::Timeout(self.timeout.as_secs()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_map() {
        for p in ["openai", "anthropic", "google", "ollama", "groq", "mistral", "deepseek"] {
            assert!(map_backend(p).is_ok(), "{p}");
        }
    }

    #[test]
    fn unknown_provider_is_rejected_up_front() {
        let settings = AiSettings {
            provider: "hal9000".into(),
            api_key: String::new(),
            model: "m".into(),
        };
        assert!(matches!(LlmGenerator::new(settings), Err(SuggestError::UnknownProvider(p)) if p == "hal9000"));
    }
}
