//! Request and blueprint data model.
//!
//! Everything that crosses the wire uses camelCase field names so the JSON
//! matches what the web clients and the completion service exchange.

use serde::{Deserialize, Serialize};

/// Add-on display labels offered by the product. Only
/// [`ANOMALY_DETECTION_ADDON`] changes generator behavior; the rest travel
/// through to the prompt untouched.
pub const ADDON_LABELS: &[&str] = &[
    "Sentiment analysis",
    "Priority scoring",
    "Smart upsell",
    "Anomaly detection",
    "Automatic summary",
    "Message generation",
    "Lead qualification",
    "Live translation",
];

/// The add-on that appends the anomaly-alert guardrail.
pub const ANOMALY_DETECTION_ADDON: &str = "Anomaly detection";

/// How far along the caller's team is with automation. Drives the model
/// shortlist and the trigger cadence, and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationMaturity {
    Beginner,
    Intermediate,
    Expert,
}

impl Default for AutomationMaturity {
    fn default() -> Self {
        AutomationMaturity::Intermediate
    }
}

impl AutomationMaturity {
    /// Parse the wire literal. Anything that is not an exact lowercase match
    /// falls back to `Intermediate`; a bad value is never an error.
    pub fn parse(value: &str) -> Self {
        match value {
            "beginner" => AutomationMaturity::Beginner,
            "expert" => AutomationMaturity::Expert,
            "intermediate" => AutomationMaturity::Intermediate,
            _ => AutomationMaturity::Intermediate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationMaturity::Beginner => "beginner",
            AutomationMaturity::Intermediate => "intermediate",
            AutomationMaturity::Expert => "expert",
        }
    }
}

/// Normalized caller input. Construct through [`crate::normalize::normalize`]
/// so the defaults and the maturity fallback are applied consistently.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// The business problem to automate, as typed. Consumers trim at use.
    pub idea: String,
    pub context: String,
    pub pain_points: String,
    /// Raw multi-item text; split with [`parse_list`] via [`Self::data_source_items`].
    pub data_sources: String,
    /// Raw multi-item text; split with [`parse_list`] via [`Self::output_items`].
    pub outputs: String,
    pub ai_personality: String,
    pub tone: String,
    pub automation_maturity: AutomationMaturity,
    pub ai_addons: Vec<String>,
}

impl GenerateRequest {
    pub fn data_source_items(&self) -> Vec<String> {
        parse_list(&self.data_sources)
    }

    pub fn output_items(&self) -> Vec<String> {
        parse_list(&self.outputs)
    }
}

/// Split free text on newlines, commas and semicolons, trimming each piece
/// and dropping empties. Order and duplicates are preserved.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// The generated automation blueprint. Both generation paths produce this
/// exact shape; only `meta` tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub title: String,
    pub mission: String,
    pub ai_brain: AiBrain,
    pub trigger: Trigger,
    pub modules: Vec<PipelineModule>,
    pub automations: Vec<Automation>,
    pub data_products: Vec<DataProduct>,
    pub monitoring: Monitoring,
    pub implementation: Vec<SprintPlan>,
    pub guardrails: Vec<String>,
    pub quick_wins: Vec<String>,
    /// Tolerated missing on parse: the caller stamps provenance right after.
    #[serde(default)]
    pub meta: BlueprintMeta,
}

/// How the AI layer is orchestrated across the scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiBrain {
    pub orchestration: String,
    pub models: Vec<String>,
    pub prompt_blueprint: Vec<String>,
    /// Same content as the top-level guardrails.
    pub safeguards: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub description: String,
    pub cadence: String,
    pub inputs: Vec<String>,
    pub kickoff: String,
}

/// One step of the scenario pipeline. Orders are 1-based and contiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineModule {
    pub order: u32,
    pub app: String,
    pub module: String,
    pub purpose: String,
    pub ai_assist: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    pub title: String,
    pub description: String,
    pub ai_touchpoints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataProduct {
    pub name: String,
    pub purpose: String,
    pub consumers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monitoring {
    pub lead_kpis: Vec<String>,
    pub lag_kpis: Vec<String>,
    pub qa: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintPlan {
    pub sprint: String,
    pub focus: String,
    pub deliverables: Vec<String>,
}

/// Provenance of a blueprint: which path produced it, with which model, when.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlueprintMeta {
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_splits_on_all_separators() {
        let items = parse_list("HubSpot, Slack;Notion\nAirtable");
        assert_eq!(items, vec!["HubSpot", "Slack", "Notion", "Airtable"]);
    }

    #[test]
    fn test_parse_list_trims_and_drops_empties() {
        let items = parse_list("  CRM ,, ;\n  ,Support  ");
        assert_eq!(items, vec!["CRM", "Support"]);
    }

    #[test]
    fn test_parse_list_empty_input() {
        assert!(parse_list("").is_empty());
        assert!(parse_list("   \n ; , ").is_empty());
    }

    #[test]
    fn test_parse_list_keeps_order_and_duplicates() {
        let items = parse_list("Slack, CRM, Slack");
        assert_eq!(items, vec!["Slack", "CRM", "Slack"]);
    }

    #[test]
    fn test_maturity_parse_exact_literals() {
        assert_eq!(AutomationMaturity::parse("beginner"), AutomationMaturity::Beginner);
        assert_eq!(
            AutomationMaturity::parse("intermediate"),
            AutomationMaturity::Intermediate
        );
        assert_eq!(AutomationMaturity::parse("expert"), AutomationMaturity::Expert);
    }

    #[test]
    fn test_maturity_parse_falls_back_silently() {
        // Wrong case and unknown values both land on the default.
        assert_eq!(AutomationMaturity::parse("Expert"), AutomationMaturity::Intermediate);
        assert_eq!(AutomationMaturity::parse("wizard"), AutomationMaturity::Intermediate);
        assert_eq!(AutomationMaturity::parse(""), AutomationMaturity::Intermediate);
    }

    #[test]
    fn test_blueprint_meta_serializes_camel_case() {
        let meta = BlueprintMeta {
            provider: "architect-rules".to_string(),
            model: None,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["provider"], "architect-rules");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00+00:00");
        // None model is omitted entirely.
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_blueprint_meta_defaults_when_missing() {
        let json = r#"{"provider":"openai","createdAt":"now"}"#;
        let meta: BlueprintMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.provider, "openai");
        assert_eq!(meta.model, None);
    }

    #[test]
    fn test_request_item_helpers() {
        let request = GenerateRequest {
            idea: "triage inbound leads".to_string(),
            context: String::new(),
            pain_points: String::new(),
            data_sources: "HubSpot\nSlack".to_string(),
            outputs: "summary; alerts".to_string(),
            ai_personality: "analytical".to_string(),
            tone: "professional".to_string(),
            automation_maturity: AutomationMaturity::default(),
            ai_addons: vec![],
        };
        assert_eq!(request.data_source_items(), vec!["HubSpot", "Slack"]);
        assert_eq!(request.output_items(), vec!["summary", "alerts"]);
    }
}
