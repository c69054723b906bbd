use thiserror::Error;

/// Errors produced by the blueprint engines and their collaborators.
#[derive(Debug, Error)]
pub enum ArchitectError {
    /// The caller's request was rejected before generation started.
    #[error("invalid request: {0}")]
    Validation(String),

    /// The engine or provider configuration is unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The completion service could not be reached or refused the request.
    #[error("llm provider error: {0}")]
    Provider(String),

    /// The completion service answered, but not with a blueprint.
    #[error("malformed llm response: {0}")]
    MalformedResponse(String),
}

pub type ArchitectResult<T> = Result<T, ArchitectError>;
