//! Engine trait shared by every blueprint generator.

use async_trait::async_trait;

use crate::error::ArchitectResult;
use crate::normalize::normalize;
use crate::types::{Blueprint, GenerateRequest};

/// Common interface for blueprint generation engines.
///
/// `Send + Sync` so an engine can sit behind an `Arc` in the HTTP surface.
#[async_trait]
pub trait BlueprintGenerator: Send + Sync {
    /// Produce a blueprint for an already-normalized request.
    async fn generate(&self, request: &GenerateRequest) -> ArchitectResult<Blueprint>;

    /// Short engine label for health reporting and logs.
    fn name(&self) -> &'static str;

    /// Convenience: normalize an untyped body, then generate.
    async fn generate_from_value(&self, raw: &serde_json::Value) -> ArchitectResult<Blueprint> {
        let request = normalize(raw)?;
        self.generate(&request).await
    }
}
