//! Factory for creating blueprint engines from configuration.

use crate::error::{ArchitectError, ArchitectResult};
use crate::generator::config::{EngineType, GeneratorConfig, LlmConfig};
use crate::generator::delegating::DelegatingGenerator;
use crate::generator::engine::BlueprintGenerator;
use crate::generator::llm::LlmGenerator;
use crate::generator::rules::RuleBasedGenerator;

pub struct GeneratorFactory;

impl GeneratorFactory {
    /// Build the engine the configuration asks for.
    pub async fn create_generator(
        config: GeneratorConfig,
    ) -> ArchitectResult<Box<dyn BlueprintGenerator>> {
        config
            .validate()
            .map_err(|errors| ArchitectError::Configuration(errors.join("; ")))?;

        let generator: Box<dyn BlueprintGenerator> = match config.engine_type {
            EngineType::Rules => Box::new(RuleBasedGenerator::new()),
            EngineType::Llm => {
                let llm_config = require_llm_config(config.llm_config)?;
                Box::new(LlmGenerator::new(llm_config).await?)
            }
            EngineType::Delegating => {
                let llm_config = require_llm_config(config.llm_config)?;
                Box::new(DelegatingGenerator::new(llm_config).await?)
            }
        };

        tracing::info!(engine = generator.name(), "blueprint engine ready");
        Ok(generator)
    }

    /// Read the environment and build the engine it describes.
    pub async fn create_from_env() -> ArchitectResult<Box<dyn BlueprintGenerator>> {
        let config = GeneratorConfig::from_env()?;
        Self::create_generator(config).await
    }
}

fn require_llm_config(llm_config: Option<LlmConfig>) -> ArchitectResult<LlmConfig> {
    llm_config.ok_or_else(|| {
        ArchitectError::Configuration("selected engine requires an [llm] section".to_string())
    })
}
