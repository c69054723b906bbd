//! HTTP gateway in front of the blueprint engines.
//!
//! Two routes: a health probe that names the active engine, and the generate
//! endpoint that accepts arbitrary JSON, normalizes it and answers with the
//! blueprint or a JSON error body.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tokio::net::TcpListener;

use crate::error::{ArchitectError, ArchitectResult};
use crate::generator::BlueprintGenerator;
use crate::types::Blueprint;

const UNREADABLE_BLUEPRINT: &str = "The AI returned an unreadable blueprint. Try again.";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8090".to_string(),
        }
    }
}

pub struct GatewayState {
    generator: Box<dyn BlueprintGenerator>,
}

impl GatewayState {
    pub fn new(generator: Box<dyn BlueprintGenerator>) -> Self {
        Self { generator }
    }
}

pub struct BlueprintGateway;

impl BlueprintGateway {
    pub async fn start(
        config: GatewayConfig,
        generator: Box<dyn BlueprintGenerator>,
    ) -> ArchitectResult<()> {
        let state = Arc::new(GatewayState::new(generator));
        let app = router(state);

        let listener = TcpListener::bind(config.bind_addr.as_str())
            .await
            .map_err(|e| ArchitectError::Configuration(format!("gateway bind error: {}", e)))?;
        tracing::info!(addr = %config.bind_addr, "blueprint gateway listening");
        axum::serve(listener, app.into_make_service())
            .await
            .map_err(|e| ArchitectError::Configuration(format!("gateway server error: {}", e)))?;

        Ok(())
    }
}

/// Split out of `start` so handler tests can exercise routes without a socket.
pub fn router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    ok: bool,
    engine: &'static str,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health_handler(State(state): State<Arc<GatewayState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        engine: state.generator.name(),
    })
}

async fn generate_handler(
    State(state): State<Arc<GatewayState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<Blueprint>, (StatusCode, Json<ErrorResponse>)> {
    match state.generator.generate_from_value(&payload).await {
        Ok(blueprint) => Ok(Json(blueprint)),
        Err(error) => Err(error_reply(error)),
    }
}

fn error_reply(error: ArchitectError) -> (StatusCode, Json<ErrorResponse>) {
    match error {
        ArchitectError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
        }
        ArchitectError::MalformedResponse(reason) => {
            tracing::error!(%reason, "engine produced an unreadable blueprint");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: UNREADABLE_BLUEPRINT.to_string(),
                }),
            )
        }
        other => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: other.to_string(),
            }),
        ),
    }
}
