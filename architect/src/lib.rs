// Architect Library
// Automation blueprint engines - rule-based synthesis with optional LLM delegation

pub mod error;
pub mod normalize;
pub mod types;

// Blueprint engines
pub mod generator;

// HTTP surface
#[cfg(feature = "server")]
pub mod server;

// Re-export the common entry points
pub use error::{ArchitectError, ArchitectResult};
pub use generator::{BlueprintGenerator, GeneratorConfig, GeneratorFactory};
pub use types::{Blueprint, GenerateRequest};
