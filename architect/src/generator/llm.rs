//! LLM-backed blueprint engine.
//!
//! Prompts an OpenAI-compatible completion service for the blueprint as
//! strict JSON, extracts the JSON payload from whatever the model wrapped it
//! in, parses it, and stamps fresh provenance over the `meta` block.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use crate::error::{ArchitectError, ArchitectResult};
use crate::generator::config::LlmConfig;
use crate::generator::engine::BlueprintGenerator;
use crate::generator::llm_provider::{CompletionRequest, LlmProvider, LlmProviderFactory};
use crate::types::{AutomationMaturity, Blueprint, BlueprintMeta, GenerateRequest};

const DEFAULT_MAX_TOKENS: u32 = 1400;

const SYSTEM_PROMPT: &str = "You are a senior automation architect. You produce ready-to-implement automation blueprints, concise and exhaustive, with AI at the heart of the scenario. You answer ONLY with valid JSON that strictly follows the blueprint schema (title, mission, aiBrain, trigger, modules, automations, dataProducts, monitoring, implementation, guardrails, quickWins), with no additional text.";

/// Engine that delegates blueprint synthesis to a completion service.
pub struct LlmGenerator {
    provider: Box<dyn LlmProvider>,
    model_override: Option<String>,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl LlmGenerator {
    pub async fn new(config: LlmConfig) -> ArchitectResult<Self> {
        let model_override = config.model.clone();
        let max_tokens = config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
        let temperature = config.temperature;
        let provider = LlmProviderFactory::create_provider(config.to_provider_config()).await?;
        Ok(Self {
            provider,
            model_override,
            max_tokens,
            temperature,
        })
    }

    /// Wrap an existing provider. Tests use this with doubles.
    pub fn with_provider(provider: Box<dyn LlmProvider>) -> Self {
        Self {
            provider,
            model_override: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Pick the request model: explicit override first, then by maturity.
    fn model_for(&self, request: &GenerateRequest) -> String {
        if let Some(model) = &self.model_override {
            return model.clone();
        }
        match request.automation_maturity {
            AutomationMaturity::Expert => "gpt-4.1".to_string(),
            _ => "gpt-4.1-mini".to_string(),
        }
    }

    fn build_user_prompt(request: &GenerateRequest) -> ArchitectResult<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct PromptPayload<'a> {
            brief: &'a str,
            business_context: &'a str,
            data_sources: Vec<String>,
            outputs: Vec<String>,
            ai_personality: &'a str,
            tone: &'a str,
            automation_maturity: &'a str,
            pain_points: &'a str,
            ai_addons: &'a [String],
        }

        let payload = PromptPayload {
            brief: &request.idea,
            business_context: &request.context,
            data_sources: request.data_source_items(),
            outputs: request.output_items(),
            ai_personality: &request.ai_personality,
            tone: &request.tone,
            automation_maturity: request.automation_maturity.as_str(),
            pain_points: &request.pain_points,
            ai_addons: &request.ai_addons,
        };

        serde_json::to_string(&payload)
            .map_err(|e| ArchitectError::Provider(format!("failed to serialize prompt: {}", e)))
    }
}

#[async_trait]
impl BlueprintGenerator for LlmGenerator {
    async fn generate(&self, request: &GenerateRequest) -> ArchitectResult<Blueprint> {
        let completion_request = CompletionRequest {
            model: self.model_for(request),
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: Self::build_user_prompt(request)?,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        tracing::debug!(model = %completion_request.model, "requesting blueprint completion");
        let completion = self.provider.complete(&completion_request).await?;
        if completion.content.trim().is_empty() {
            return Err(ArchitectError::Provider("empty completion".to_string()));
        }

        let payload = extract_json_payload(&completion.content);
        let mut blueprint: Blueprint = serde_json::from_str(&payload)
            .map_err(|e| ArchitectError::MalformedResponse(e.to_string()))?;

        // The service never gets to claim its own provenance.
        blueprint.meta = BlueprintMeta {
            provider: self.provider.get_info().name,
            model: Some(completion.model),
            created_at: Utc::now().to_rfc3339(),
        };

        Ok(blueprint)
    }

    fn name(&self) -> &'static str {
        "llm"
    }
}

/// Pull the JSON document out of a completion. Fenced responses lose every
/// fence line; otherwise the outermost brace-delimited slice wins; failing
/// both, the trimmed text is returned as-is and the parser reports the rest.
fn extract_json_payload(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with("```") {
        return trimmed
            .lines()
            .filter(|line| !line.starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n");
    }
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(first), Some(last)) if last > first => trimmed[first..=last].to_string(),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::llm_provider::{
        Completion, LlmProviderConfig, LlmProviderInfo, LlmProviderType, StubLlmProvider,
    };

    fn request(maturity: AutomationMaturity) -> GenerateRequest {
        GenerateRequest {
            idea: "Qualify inbound leads".to_string(),
            context: "small sales team".to_string(),
            pain_points: "slow follow-up".to_string(),
            data_sources: "HubSpot, Slack".to_string(),
            outputs: "alerts".to_string(),
            ai_personality: "Reliable AI architect".to_string(),
            tone: "Professional and concrete".to_string(),
            automation_maturity: maturity,
            ai_addons: vec!["Priority scoring".to_string()],
        }
    }

    fn stub_generator() -> LlmGenerator {
        let config = LlmProviderConfig {
            provider_type: LlmProviderType::Stub,
            model: None,
            api_key: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        };
        LlmGenerator::with_provider(Box::new(StubLlmProvider::new(config)))
    }

    struct GarbageProvider;

    #[async_trait]
    impl LlmProvider for GarbageProvider {
        async fn complete(&self, request: &CompletionRequest) -> ArchitectResult<Completion> {
            Ok(Completion {
                content: "I'd love to help, but here is prose instead of JSON.".to_string(),
                model: request.model.clone(),
            })
        }

        fn get_info(&self) -> LlmProviderInfo {
            LlmProviderInfo {
                name: "garbage".to_string(),
                model: None,
            }
        }
    }

    #[test]
    fn test_extract_strips_code_fences() {
        let raw = "```json\n{\"title\": \"x\"}\n```";
        assert_eq!(extract_json_payload(raw), "{\"title\": \"x\"}");
    }

    #[test]
    fn test_extract_takes_outermost_braces() {
        let raw = "Here you go: {\"a\": {\"b\": 1}} hope it helps";
        assert_eq!(extract_json_payload(raw), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_extract_passes_through_plain_text() {
        assert_eq!(extract_json_payload("  no json here  "), "no json here");
    }

    #[test]
    fn test_model_follows_maturity_without_override() {
        let generator = stub_generator();
        assert_eq!(generator.model_for(&request(AutomationMaturity::Expert)), "gpt-4.1");
        assert_eq!(
            generator.model_for(&request(AutomationMaturity::Intermediate)),
            "gpt-4.1-mini"
        );
        assert_eq!(
            generator.model_for(&request(AutomationMaturity::Beginner)),
            "gpt-4.1-mini"
        );
    }

    #[test]
    fn test_user_prompt_carries_parsed_lists() {
        let prompt = LlmGenerator::build_user_prompt(&request(AutomationMaturity::Expert)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&prompt).unwrap();
        assert_eq!(value["brief"], "Qualify inbound leads");
        assert_eq!(value["dataSources"][0], "HubSpot");
        assert_eq!(value["dataSources"][1], "Slack");
        assert_eq!(value["automationMaturity"], "expert");
        assert_eq!(value["aiAddons"][0], "Priority scoring");
    }

    #[tokio::test]
    async fn test_generate_parses_stub_and_overwrites_meta() {
        let generator = stub_generator();
        let blueprint = generator
            .generate(&request(AutomationMaturity::Intermediate))
            .await
            .unwrap();
        assert_eq!(blueprint.title, "Stub automation scenario");
        assert_eq!(blueprint.meta.provider, "stub");
        // The stub echoes the requested model back.
        assert_eq!(blueprint.meta.model.as_deref(), Some("gpt-4.1-mini"));
        assert!(!blueprint.meta.created_at.is_empty());
    }

    #[tokio::test]
    async fn test_prose_response_is_malformed_not_provider_error() {
        let generator = LlmGenerator::with_provider(Box::new(GarbageProvider));
        let error = generator
            .generate(&request(AutomationMaturity::Intermediate))
            .await
            .unwrap_err();
        assert!(matches!(error, ArchitectError::MalformedResponse(_)));
    }
}
