//! LLM provider abstraction used by the LLM-backed engine.
//!
//! One OpenAI-compatible HTTP provider covers OpenAI and OpenRouter (via
//! `base_url`); a deterministic stub keeps tests offline.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ArchitectError, ArchitectResult};

/// Provider-layer configuration, converted from
/// [`crate::generator::config::LlmConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmProviderConfig {
    pub provider_type: LlmProviderType,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub timeout_seconds: Option<u64>,
}

/// Supported LLM provider types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// Deterministic responses for tests, no network.
    Stub,
    /// OpenAI and OpenAI-compatible endpoints.
    OpenAI,
}

/// One completion exchange.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

/// The text of the first choice plus the model that produced it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub content: String,
    pub model: String,
}

/// Information about an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmProviderInfo {
    pub name: String,
    pub model: Option<String>,
}

/// Abstract interface for LLM providers.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one completion request.
    async fn complete(&self, request: &CompletionRequest) -> ArchitectResult<Completion>;

    /// Get provider information.
    fn get_info(&self) -> LlmProviderInfo;
}

/// OpenAI-compatible provider (works with OpenAI and OpenRouter).
pub struct OpenAiLlmProvider {
    config: LlmProviderConfig,
    client: reqwest::Client,
}

impl OpenAiLlmProvider {
    pub fn new(config: LlmProviderConfig) -> ArchitectResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(
                config.timeout_seconds.unwrap_or(30),
            ))
            .build()
            .map_err(|e| ArchitectError::Provider(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn make_request(&self, request: &CompletionRequest) -> ArchitectResult<Completion> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| {
            ArchitectError::Configuration("API key required for the OpenAI provider".to_string())
        })?;

        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("https://api.openai.com/v1");
        let url = format!("{}/chat/completions", base_url);

        let request_body = ChatRequest {
            model: request.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user_prompt.clone(),
                },
            ],
            max_tokens: Some(request.max_tokens),
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ArchitectError::Provider(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ArchitectError::Provider(format!(
                "API request failed: {}",
                error_text
            )));
        }

        let response_body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ArchitectError::Provider(format!("failed to parse response: {}", e)))?;

        let reported_model = response_body
            .model
            .unwrap_or_else(|| request.model.clone());
        let choice = response_body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ArchitectError::Provider("completion had no choices".to_string()))?;

        Ok(Completion {
            content: choice.message.content,
            model: reported_model,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiLlmProvider {
    async fn complete(&self, request: &CompletionRequest) -> ArchitectResult<Completion> {
        self.make_request(request).await
    }

    fn get_info(&self) -> LlmProviderInfo {
        LlmProviderInfo {
            name: "openai".to_string(),
            model: self.config.model.clone(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Stub provider for testing. Always answers with the same fenced blueprint
/// JSON so downstream parsing and fence stripping get exercised.
pub struct StubLlmProvider {
    config: LlmProviderConfig,
}

impl StubLlmProvider {
    pub fn new(config: LlmProviderConfig) -> Self {
        Self { config }
    }
}

/// Canned blueprint answer, fenced like real model output tends to be.
const STUB_BLUEPRINT: &str = r#"```json
{
  "title": "Stub automation scenario",
  "mission": "Exercise the blueprint pipeline without a network call.",
  "aiBrain": {
    "orchestration": "A stub agent supervises the scenario.",
    "models": ["stub-model"],
    "promptBlueprint": ["Analyse.", "Recommend.", "Review."],
    "safeguards": ["Human validation on critical actions."]
  },
  "trigger": {
    "description": "A canned inbound event.",
    "cadence": "Every 15 minutes.",
    "inputs": ["CRM"],
    "kickoff": "The stub kicks off immediately."
  },
  "modules": [
    {
      "order": 1,
      "app": "Webhook",
      "module": "Custom Trigger",
      "purpose": "Receive the event.",
      "aiAssist": "Classify the flow."
    }
  ],
  "automations": [
    {
      "title": "Stub automation",
      "description": "Single canned automation.",
      "aiTouchpoints": ["Scoring."]
    }
  ],
  "dataProducts": [
    {
      "name": "Stub journal",
      "purpose": "Canned data product.",
      "consumers": ["Ops team"]
    }
  ],
  "monitoring": {
    "leadKpis": ["Reaction time"],
    "lagKpis": ["Revenue impact"],
    "qa": ["Answer quality"]
  },
  "implementation": [
    {
      "sprint": "Week 1",
      "focus": "Foundations",
      "deliverables": ["Data model"]
    }
  ],
  "guardrails": ["Human validation on critical actions."],
  "quickWins": ["Ship the stub."]
}
```"#;

#[async_trait]
impl LlmProvider for StubLlmProvider {
    async fn complete(&self, request: &CompletionRequest) -> ArchitectResult<Completion> {
        Ok(Completion {
            content: STUB_BLUEPRINT.to_string(),
            model: request.model.clone(),
        })
    }

    fn get_info(&self) -> LlmProviderInfo {
        LlmProviderInfo {
            name: "stub".to_string(),
            model: self.config.model.clone(),
        }
    }
}

/// Factory for creating LLM providers from configuration.
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    pub async fn create_provider(
        config: LlmProviderConfig,
    ) -> ArchitectResult<Box<dyn LlmProvider>> {
        match config.provider_type {
            LlmProviderType::Stub => Ok(Box::new(StubLlmProvider::new(config))),
            LlmProviderType::OpenAI => {
                let provider = OpenAiLlmProvider::new(config)?;
                Ok(Box::new(provider))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_config() -> LlmProviderConfig {
        LlmProviderConfig {
            provider_type: LlmProviderType::Stub,
            model: Some("stub-model".to_string()),
            api_key: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        }
    }

    fn completion_request() -> CompletionRequest {
        CompletionRequest {
            model: "stub-model".to_string(),
            system_prompt: "system".to_string(),
            user_prompt: "user".to_string(),
            max_tokens: 1400,
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_stub_provider_returns_fenced_blueprint() {
        let provider = StubLlmProvider::new(stub_config());
        let completion = provider.complete(&completion_request()).await.unwrap();
        assert!(completion.content.starts_with("```json"));
        assert!(completion.content.contains("\"title\""));
        assert_eq!(completion.model, "stub-model");
    }

    #[tokio::test]
    async fn test_factory_builds_stub_provider() {
        let provider = LlmProviderFactory::create_provider(stub_config())
            .await
            .unwrap();
        assert_eq!(provider.get_info().name, "stub");
    }

    #[tokio::test]
    async fn test_openai_provider_requires_api_key() {
        let config = LlmProviderConfig {
            provider_type: LlmProviderType::OpenAI,
            model: None,
            api_key: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        };
        let provider = OpenAiLlmProvider::new(config).unwrap();
        let error = provider.complete(&completion_request()).await.unwrap_err();
        assert!(matches!(error, ArchitectError::Configuration(_)));
    }
}
