//! Turns an untyped request body into a canonical [`GenerateRequest`].
//!
//! Validation is deliberately thin: only a missing or blank idea is an
//! error. Every other field degrades to a documented default, including
//! unknown maturity values, so the generators stay total over whatever a
//! client sends.

use serde_json::Value;

use crate::error::{ArchitectError, ArchitectResult};
use crate::types::{AutomationMaturity, GenerateRequest};

/// Baseline persona used when the caller does not pick one.
pub const DEFAULT_PERSONALITY: &str = "Reliable AI architect";
/// Baseline tone used when the caller does not pick one.
pub const DEFAULT_TONE: &str = "Professional and concrete";

/// Validate and default a raw JSON body into a canonical request.
pub fn normalize(raw: &Value) -> ArchitectResult<GenerateRequest> {
    let body = raw
        .as_object()
        .ok_or_else(|| ArchitectError::Validation("request body must be a JSON object".to_string()))?;

    let idea = body
        .get("idea")
        .and_then(Value::as_str)
        .filter(|idea| !idea.trim().is_empty())
        .ok_or_else(|| {
            ArchitectError::Validation("describe the idea or problem to automate".to_string())
        })?;

    let automation_maturity = match body.get("automationMaturity").and_then(Value::as_str) {
        Some(value) => {
            let maturity = AutomationMaturity::parse(value);
            if maturity.as_str() != value {
                tracing::debug!(value, "unknown automation maturity, using intermediate");
            }
            maturity
        }
        None => AutomationMaturity::default(),
    };

    let ai_addons = match body.get("aiAddons") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(GenerateRequest {
        idea: idea.to_string(),
        context: text_field(body, "context", ""),
        pain_points: text_field(body, "painPoints", ""),
        data_sources: text_field(body, "dataSources", ""),
        outputs: text_field(body, "outputs", ""),
        ai_personality: text_field(body, "aiPersonality", DEFAULT_PERSONALITY),
        tone: text_field(body, "tone", DEFAULT_TONE),
        automation_maturity,
        ai_addons,
    })
}

fn text_field(body: &serde_json::Map<String, Value>, key: &str, fallback: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
