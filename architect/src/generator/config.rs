//! Generator configuration, loadable from a TOML file or the environment.

use serde::{Deserialize, Serialize};

use crate::error::{ArchitectError, ArchitectResult};
use crate::generator::llm_provider::{LlmProviderConfig, LlmProviderType};

/// Configuration for the blueprint generation stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// The engine used to produce blueprints.
    pub engine_type: EngineType,
    /// LLM settings, required by the `llm` and `delegating` engines.
    pub llm_config: Option<LlmConfig>,
}

/// Available engine types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineType {
    /// Deterministic rule engine, no network access.
    Rules,
    /// LLM-backed generation only.
    Llm,
    /// LLM first, rule engine when the service is missing or unreachable.
    Delegating,
}

/// LLM settings as they appear in configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider type (openai, stub).
    pub provider_type: LlmProviderType,
    /// Model override. When absent the engine picks a model per request
    /// from the automation maturity.
    pub model: Option<String>,
    /// API key (usually provided through the environment).
    pub api_key: Option<String>,
    /// Base URL for OpenAI-compatible endpoints (OpenRouter and friends).
    pub base_url: Option<String>,
    /// Maximum output tokens per completion.
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: Option<f64>,
    /// HTTP timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

impl LlmConfig {
    /// Convert to the provider-layer configuration.
    pub fn to_provider_config(&self) -> LlmProviderConfig {
        LlmProviderConfig {
            provider_type: self.provider_type.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout_seconds: self.timeout_seconds,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            engine_type: EngineType::Rules,
            llm_config: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration from a TOML file.
    pub fn from_file(path: &str) -> ArchitectResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ArchitectError::Configuration(format!("failed to read {}: {}", path, e)))?;
        let config: GeneratorConfig = toml::from_str(&content)
            .map_err(|e| ArchitectError::Configuration(format!("failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Create a configuration from environment variables.
    ///
    /// With no variables set this is the default rules engine. An API key
    /// (`ARCHITECT_LLM_API_KEY` or plain `OPENAI_API_KEY`) switches the
    /// engine to `delegating` unless `ARCHITECT_ENGINE_TYPE` says otherwise.
    pub fn from_env() -> ArchitectResult<Self> {
        let mut config = GeneratorConfig::default();

        let api_key = std::env::var("ARCHITECT_LLM_API_KEY")
            .ok()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok());

        let explicit_engine = match std::env::var("ARCHITECT_ENGINE_TYPE") {
            Ok(engine_type) => {
                config.engine_type = match engine_type.as_str() {
                    "rules" => EngineType::Rules,
                    "llm" => EngineType::Llm,
                    "delegating" => EngineType::Delegating,
                    other => {
                        return Err(ArchitectError::Configuration(format!(
                            "invalid engine type '{}', use rules, llm or delegating",
                            other
                        )))
                    }
                };
                true
            }
            Err(_) => false,
        };

        let provider = std::env::var("ARCHITECT_LLM_PROVIDER").ok();
        if provider.is_some() || api_key.is_some() {
            let mut base_url = std::env::var("ARCHITECT_LLM_BASE_URL").ok();
            let provider_type = match provider.as_deref() {
                None | Some("openai") => LlmProviderType::OpenAI,
                Some("openrouter") => {
                    // OpenRouter speaks the OpenAI API under a different base URL.
                    if base_url.is_none() {
                        base_url = Some("https://openrouter.ai/api/v1".to_string());
                    }
                    LlmProviderType::OpenAI
                }
                Some("stub") => LlmProviderType::Stub,
                Some(other) => {
                    return Err(ArchitectError::Configuration(format!(
                        "invalid LLM provider '{}', use openai, openrouter or stub",
                        other
                    )))
                }
            };

            config.llm_config = Some(LlmConfig {
                provider_type,
                model: std::env::var("ARCHITECT_LLM_MODEL").ok(),
                api_key,
                base_url,
                max_tokens: std::env::var("ARCHITECT_LLM_MAX_TOKENS")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                temperature: std::env::var("ARCHITECT_LLM_TEMPERATURE")
                    .ok()
                    .and_then(|s| s.parse().ok()),
                timeout_seconds: std::env::var("ARCHITECT_LLM_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok()),
            });

            if !explicit_engine {
                config.engine_type = EngineType::Delegating;
            }
        }

        Ok(config)
    }

    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.engine_type {
            EngineType::Llm => {
                if self.llm_config.is_none() {
                    errors.push("llm engine requires llm_config".to_string());
                }
            }
            EngineType::Delegating => {
                if self.llm_config.is_none() {
                    errors.push("delegating engine requires llm_config".to_string());
                }
            }
            EngineType::Rules => {}
        }

        if let Some(llm_config) = &self.llm_config {
            if let Some(temperature) = llm_config.temperature {
                if !(0.0..=1.0).contains(&temperature) {
                    errors.push("LLM temperature must be between 0.0 and 1.0".to_string());
                }
            }
            if let Some(max_tokens) = llm_config.max_tokens {
                if max_tokens == 0 {
                    errors.push("LLM max_tokens must be greater than 0".to_string());
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
