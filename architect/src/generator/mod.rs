//! Blueprint generation engines.
//!
//! This module turns a canonical [`crate::types::GenerateRequest`] into a
//! [`crate::types::Blueprint`] through one of three engines:
//!
//! - **Rules**: deterministic synthesis from the request alone, no network.
//! - **Llm**: prompt an OpenAI-compatible completion service for the
//!   blueprint as strict JSON.
//! - **Delegating**: try the LLM engine first, fall back to the rule engine
//!   when the service is missing or unreachable.
//!
//! Engines are selected through [`GeneratorConfig`] (TOML file or
//! environment) and built by [`GeneratorFactory`].
//!
//! ```rust,no_run
//! use architect::generator::{GeneratorConfig, GeneratorFactory};
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let config = GeneratorConfig::default();
//!     let generator = GeneratorFactory::create_generator(config)
//!         .await
//!         .expect("failed to create generator");
//!
//!     let body = serde_json::json!({ "idea": "qualify inbound leads automatically" });
//!     let blueprint = generator
//!         .generate_from_value(&body)
//!         .await
//!         .expect("generation failed");
//!     println!("{}", blueprint.title);
//! });
//! ```

pub mod catalog;
pub mod config;
pub mod delegating;
pub mod engine;
pub mod factory;
pub mod llm;
pub mod llm_provider;
pub mod rules;

pub use catalog::{match_connectors, ConnectorRule};
pub use config::{EngineType, GeneratorConfig, LlmConfig};
pub use delegating::DelegatingGenerator;
pub use engine::BlueprintGenerator;
pub use factory::GeneratorFactory;
pub use llm::LlmGenerator;
pub use llm_provider::{
    Completion, CompletionRequest, LlmProvider, LlmProviderFactory, LlmProviderInfo,
    LlmProviderType, OpenAiLlmProvider, StubLlmProvider,
};
pub use rules::RuleBasedGenerator;
