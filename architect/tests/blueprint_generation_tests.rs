use pretty_assertions::assert_eq;
use serde_json::json;

use architect::generator::{
    BlueprintGenerator, EngineType, GeneratorConfig, GeneratorFactory, LlmConfig, LlmProviderType,
    RuleBasedGenerator,
};
use architect::normalize::normalize;
use architect::types::AutomationMaturity;
use architect::ArchitectError;

fn rules() -> RuleBasedGenerator {
    RuleBasedGenerator::new()
}

#[tokio::test]
async fn test_expert_request_builds_six_module_pipeline() {
    let body = json!({
        "idea": "Unqualified inbound leads",
        "dataSources": "HubSpot, Slack",
        "outputs": "Slack alerts",
        "automationMaturity": "expert",
        "aiAddons": [],
    });

    let blueprint = rules().generate_from_value(&body).await.expect("blueprint");

    let apps: Vec<&str> = blueprint.modules.iter().map(|m| m.app.as_str()).collect();
    assert_eq!(
        apps,
        vec!["Webhook", "OpenAI", "HubSpot", "Slack", "Scenario Router", "OpenAI"]
    );
    let orders: Vec<u32> = blueprint.modules.iter().map(|m| m.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);

    assert_eq!(
        blueprint.trigger.cadence,
        "Real time, with a retry every 5 minutes on failure."
    );
    assert_eq!(blueprint.ai_brain.models, vec!["gpt-4.1", "o1-mini"]);
    assert_eq!(blueprint.guardrails.len(), 3);
    assert_eq!(blueprint.quick_wins.len(), 3);
    assert_eq!(blueprint.title, "Unqualified inbound leads");
    assert_eq!(blueprint.meta.provider, "architect-rules");
}

#[tokio::test]
async fn test_empty_sources_fall_back_to_defaults() {
    let body = json!({
        "idea": "x".repeat(21),
        "dataSources": "",
        "outputs": "",
    });

    let blueprint = rules().generate_from_value(&body).await.expect("blueprint");

    assert_eq!(blueprint.modules.len(), 4);
    assert_eq!(
        blueprint.trigger.inputs,
        vec!["CRM", "Support", "Knowledge base", "Product"]
    );
    assert!(blueprint.mission.contains("the existing tools"));
    assert!(blueprint.mission.contains("operational deliverables"));
}

#[tokio::test]
async fn test_blank_idea_is_rejected() {
    let body = json!({ "idea": "   ", "context": "sales" });
    let error = rules().generate_from_value(&body).await.unwrap_err();
    assert!(matches!(error, ArchitectError::Validation(_)));
}

#[tokio::test]
async fn test_addons_and_outputs_grow_the_lists() {
    let body = json!({
        "idea": "Consolidate churn signals into one dashboard",
        "outputs": "weekly dashboard",
        "aiAddons": ["Anomaly detection", 42],
    });

    let blueprint = rules().generate_from_value(&body).await.expect("blueprint");

    // Non-string add-on entries are skipped, the anomaly label still counts.
    assert_eq!(blueprint.guardrails.len(), 4);
    assert_eq!(blueprint.quick_wins.len(), 4);
    assert_eq!(blueprint.ai_brain.safeguards, blueprint.guardrails);
}

#[test]
fn test_unknown_maturity_normalizes_to_intermediate() {
    let body = json!({ "idea": "Automate invoice chasing", "automationMaturity": "wizard" });
    let request = normalize(&body).expect("request");
    assert_eq!(request.automation_maturity, AutomationMaturity::Intermediate);
}

#[tokio::test]
async fn test_blueprint_serializes_with_camel_case_keys() {
    let body = json!({ "idea": "Automate invoice chasing" });
    let blueprint = rules().generate_from_value(&body).await.expect("blueprint");

    let value = serde_json::to_value(&blueprint).expect("serialize");
    let top = value.as_object().expect("object");
    for key in [
        "title",
        "mission",
        "aiBrain",
        "trigger",
        "modules",
        "automations",
        "dataProducts",
        "monitoring",
        "implementation",
        "guardrails",
        "quickWins",
        "meta",
    ] {
        assert!(top.contains_key(key), "missing key {}", key);
    }
    assert!(value["aiBrain"]["promptBlueprint"].is_array());
    assert!(value["monitoring"]["leadKpis"].is_array());
    assert!(value["meta"]["createdAt"].is_string());

    let created_at = value["meta"]["createdAt"].as_str().expect("createdAt");
    assert!(chrono::DateTime::parse_from_rfc3339(created_at).is_ok());
}

#[tokio::test]
async fn test_factory_builds_stub_llm_engine() {
    let config = GeneratorConfig {
        engine_type: EngineType::Llm,
        llm_config: Some(LlmConfig {
            provider_type: LlmProviderType::Stub,
            model: None,
            api_key: None,
            base_url: None,
            max_tokens: None,
            temperature: None,
            timeout_seconds: None,
        }),
    };
    let generator = GeneratorFactory::create_generator(config)
        .await
        .expect("generator");

    let body = json!({ "idea": "Automate invoice chasing" });
    let blueprint = generator.generate_from_value(&body).await.expect("blueprint");
    assert_eq!(blueprint.meta.provider, "stub");
    assert_eq!(blueprint.title, "Stub automation scenario");
}

#[tokio::test]
async fn test_delegating_engine_survives_unreachable_provider() {
    let config = GeneratorConfig {
        engine_type: EngineType::Delegating,
        llm_config: Some(LlmConfig {
            provider_type: LlmProviderType::OpenAI,
            model: None,
            api_key: Some("test-key".to_string()),
            // Discard port, nothing listens there.
            base_url: Some("http://127.0.0.1:9".to_string()),
            max_tokens: None,
            temperature: None,
            timeout_seconds: Some(1),
        }),
    };
    let generator = GeneratorFactory::create_generator(config)
        .await
        .expect("generator");

    let body = json!({ "idea": "Automate invoice chasing", "dataSources": "Zendesk" });
    let blueprint = generator.generate_from_value(&body).await.expect("blueprint");
    assert_eq!(blueprint.meta.provider, "architect-rules");
    assert!(blueprint.modules.iter().any(|m| m.app == "Zendesk"));
}
