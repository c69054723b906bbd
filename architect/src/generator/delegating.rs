//! Engine that prefers the LLM and falls back to the rule engine.
//!
//! Only transport-level failures trigger the fallback. A provider that
//! answered but produced an unparseable blueprint is reported upstream, so
//! callers can distinguish "service down" from "service confused".

use async_trait::async_trait;

use crate::error::{ArchitectError, ArchitectResult};
use crate::generator::config::LlmConfig;
use crate::generator::engine::BlueprintGenerator;
use crate::generator::llm::LlmGenerator;
use crate::generator::rules::RuleBasedGenerator;
use crate::types::{Blueprint, GenerateRequest};

pub struct DelegatingGenerator {
    llm: LlmGenerator,
    rules: RuleBasedGenerator,
}

impl DelegatingGenerator {
    pub async fn new(config: LlmConfig) -> ArchitectResult<Self> {
        Ok(Self {
            llm: LlmGenerator::new(config).await?,
            rules: RuleBasedGenerator::new(),
        })
    }

    pub fn from_parts(llm: LlmGenerator, rules: RuleBasedGenerator) -> Self {
        Self { llm, rules }
    }
}

#[async_trait]
impl BlueprintGenerator for DelegatingGenerator {
    async fn generate(&self, request: &GenerateRequest) -> ArchitectResult<Blueprint> {
        match self.llm.generate(request).await {
            Ok(blueprint) => Ok(blueprint),
            Err(ArchitectError::Provider(reason)) => {
                tracing::warn!(%reason, "llm engine unavailable, falling back to rules");
                self.rules.generate(request).await
            }
            Err(ArchitectError::Configuration(reason)) => {
                tracing::warn!(%reason, "llm engine misconfigured, falling back to rules");
                self.rules.generate(request).await
            }
            Err(other) => Err(other),
        }
    }

    fn name(&self) -> &'static str {
        "delegating"
    }
}
