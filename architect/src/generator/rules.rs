//! Deterministic rule-based blueprint engine.
//!
//! This is the fallback path: no network, no persistence, no randomness.
//! Everything except the creation timestamp is a pure function of the
//! request, and the timestamp is injectable so tests can freeze it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ArchitectResult;
use crate::generator::catalog::match_connectors;
use crate::generator::engine::BlueprintGenerator;
use crate::types::{
    AiBrain, Automation, AutomationMaturity, Blueprint, BlueprintMeta, DataProduct,
    GenerateRequest, Monitoring, PipelineModule, SprintPlan, Trigger, ANOMALY_DETECTION_ADDON,
};

/// Provider tag stamped on blueprints produced by this engine.
pub const RULES_PROVIDER: &str = "architect-rules";

const FALLBACK_TITLE: &str = "AI-augmented automation scenario for the revenue team";
const FALLBACK_TRIGGER: &str = "An inbound business event (lead, ticket, process).";

static PATTERN_DASHBOARD_OUTPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)dashboard|data").unwrap());

/// Deterministic blueprint engine. Stateless; safe to share across callers.
pub struct RuleBasedGenerator;

impl RuleBasedGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Synthesize a blueprint with an explicit creation instant. With `now`
    /// fixed, the result is identical across calls for the same request.
    pub fn synthesize_at(&self, request: &GenerateRequest, now: DateTime<Utc>) -> Blueprint {
        let sources = request.data_source_items();
        let outputs = request.output_items();
        let guardrails = build_guardrails(request);

        Blueprint {
            title: build_title(&request.idea),
            mission: build_mission(&request.idea, &sources, &outputs),
            ai_brain: AiBrain {
                orchestration: format!(
                    "Uses an AI agent with the {} persona to supervise every step and adjust the scenario.",
                    request.ai_personality.to_lowercase()
                ),
                models: default_models(request.automation_maturity),
                prompt_blueprint: vec![
                    "Analyse the incoming context (intent, tone, key data points).".to_string(),
                    "Generate structured recommendations aligned with the business goals."
                        .to_string(),
                    "Run a quick self-critique to validate coherence and the guardrails."
                        .to_string(),
                ],
                safeguards: guardrails.clone(),
            },
            trigger: build_trigger(request, &sources),
            modules: build_modules(request),
            automations: build_automations(),
            data_products: build_data_products(),
            monitoring: build_monitoring(),
            implementation: build_implementation(),
            guardrails,
            quick_wins: build_quick_wins(&outputs),
            meta: BlueprintMeta {
                provider: RULES_PROVIDER.to_string(),
                model: None,
                created_at: now.to_rfc3339(),
            },
        }
    }
}

impl Default for RuleBasedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlueprintGenerator for RuleBasedGenerator {
    async fn generate(&self, request: &GenerateRequest) -> ArchitectResult<Blueprint> {
        Ok(self.synthesize_at(request, Utc::now()))
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// Model shortlist per maturity level. Maturity is the only input.
fn default_models(maturity: AutomationMaturity) -> Vec<String> {
    let pair: [&str; 2] = match maturity {
        AutomationMaturity::Beginner => ["gpt-4o-mini", "gpt-4o-mini-transcribe"],
        AutomationMaturity::Intermediate => ["gpt-4.1-mini", "gpt-4o-mini-perform"],
        AutomationMaturity::Expert => ["gpt-4.1", "o1-mini"],
    };
    pair.iter().map(|model| model.to_string()).collect()
}

fn build_title(idea: &str) -> String {
    // The length check runs on the idea as received; trimming only applies
    // to the short branch.
    if idea.chars().count() > 80 {
        let head: String = idea.chars().take(77).collect();
        return format!("{}...", head);
    }
    let trimmed = idea.trim();
    if trimmed.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

fn build_mission(idea: &str, sources: &[String], outputs: &[String]) -> String {
    let subject = {
        let trimmed = idea.trim();
        if trimmed.is_empty() {
            "the target flow".to_string()
        } else {
            trimmed.to_lowercase()
        }
    };
    let leaning_on = if sources.is_empty() {
        "the existing tools".to_string()
    } else {
        sources.join(", ")
    };
    let producing = if outputs.is_empty() {
        "operational deliverables".to_string()
    } else {
        outputs.join(", ")
    };
    format!(
        "Build an intelligent automation scenario able to orchestrate {}, leaning on {} to produce {} with a dependable AI co-pilot.",
        subject, leaning_on, producing
    )
}

fn build_trigger(request: &GenerateRequest, sources: &[String]) -> Trigger {
    let trimmed = request.idea.trim();
    Trigger {
        description: if trimmed.is_empty() {
            FALLBACK_TRIGGER.to_string()
        } else {
            trimmed.to_string()
        },
        cadence: match request.automation_maturity {
            AutomationMaturity::Expert => {
                "Real time, with a retry every 5 minutes on failure.".to_string()
            }
            _ => "Every 15 minutes, plus manual runs when needed.".to_string(),
        },
        inputs: if sources.is_empty() {
            ["CRM", "Support", "Knowledge base", "Product"]
                .iter()
                .map(|input| input.to_string())
                .collect()
        } else {
            sources.to_vec()
        },
        kickoff: "An AI agent checks volume and SLA, then activates the right path.".to_string(),
    }
}

/// Assemble the pipeline: two fixed intake steps, the matched connectors in
/// catalog order, then the router and generation steps. Orders come out
/// contiguous, 1-based.
fn build_modules(request: &GenerateRequest) -> Vec<PipelineModule> {
    let connectors = match_connectors(request);
    let k = connectors.len() as u32;

    let mut modules = vec![
        PipelineModule {
            order: 1,
            app: "Webhook".to_string(),
            module: "Custom Trigger".to_string(),
            purpose: "Receives the incoming event (form, ticket, lead) and tags its metadata."
                .to_string(),
            ai_assist: "A micro AI agent classifies the flow and scores its urgency.".to_string(),
        },
        PipelineModule {
            order: 2,
            app: "OpenAI".to_string(),
            module: "Responses API".to_string(),
            purpose: "Extracts key fields, detects intents and enriches the incoming context."
                .to_string(),
            ai_assist:
                "Moderates inbound data and applies the prompt blueprint for the configured AI persona."
                    .to_string(),
        },
    ];

    modules.extend(
        connectors
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.to_module(index as u32 + 3)),
    );

    modules.push(PipelineModule {
        order: k + 3,
        app: "Scenario Router".to_string(),
        module: "Flow Control".to_string(),
        purpose: "Router branch that steers each flow (quick win versus expert handling)."
            .to_string(),
        ai_assist: "Automatic scoring picks the ideal path from risk and value.".to_string(),
    });
    modules.push(PipelineModule {
        order: k + 4,
        app: "OpenAI".to_string(),
        module: "Text Generation".to_string(),
        purpose: "Writes personalised messages, recommendations or summaries.".to_string(),
        ai_assist: "Respects the configured tone and weaves in evidence from the connected sources."
            .to_string(),
    });

    modules
}

fn build_guardrails(request: &GenerateRequest) -> Vec<String> {
    let mut guardrails = vec![
        "Human validation on critical or sensitive actions.".to_string(),
        "Strict logging of AI decisions in Airtable/Notion for audit.".to_string(),
        "Automated non-regression tests on every prompt update.".to_string(),
    ];
    if request
        .ai_addons
        .iter()
        .any(|addon| addon == ANOMALY_DETECTION_ADDON)
    {
        guardrails
            .push("Immediate Slack alert whenever an anomaly is detected on the flows.".to_string());
    }
    guardrails
}

fn build_quick_wins(outputs: &[String]) -> Vec<String> {
    let mut quick_wins = vec![
        "Set up a scenario router with AI scoring to classify incoming events.".to_string(),
        "Automate a rich Slack notification with AI recommendations.".to_string(),
        "Build an Airtable board to trace decisions and feedback.".to_string(),
    ];
    if outputs
        .iter()
        .any(|item| PATTERN_DASHBOARD_OUTPUT.is_match(item))
    {
        quick_wins
            .push("Publish a mini Looker Studio dashboard built on the generated AI KPIs.".to_string());
    }
    quick_wins
}

fn build_automations() -> Vec<Automation> {
    vec![
        Automation {
            title: "AI steering flow".to_string(),
            description:
                "Central decision pipeline that evaluates every event, assigns a priority and proposes the best next action."
                    .to_string(),
            ai_touchpoints: vec![
                "Multi-criteria evaluation (volume, value, SLA) by an AI agent.".to_string(),
                "Generation of a contextualised action plan for the humans in the loop.".to_string(),
                "Self-monitoring that retrains prompts from feedback.".to_string(),
            ],
        },
        Automation {
            title: "Continuous learning loop".to_string(),
            description:
                "Collects feedback (clicks, replies, issues) to recalibrate the AI strategy and the scenario filters."
                    .to_string(),
            ai_touchpoints: vec![
                "Light reinforcement rules applied to the scores.".to_string(),
                "Sentiment analysis and anomaly detection on the outputs.".to_string(),
            ],
        },
    ]
}

fn build_data_products() -> Vec<DataProduct> {
    vec![
        DataProduct {
            name: "AI decision hub".to_string(),
            purpose: "Central dashboard of AI decisions, human feedback and business results."
                .to_string(),
            consumers: vec![
                "Ops team".to_string(),
                "Leadership".to_string(),
                "Product manager".to_string(),
            ],
        },
        DataProduct {
            name: "Prompt and outcome journal".to_string(),
            purpose: "History of deployed prompts, their versions and effectiveness metrics."
                .to_string(),
            consumers: vec![
                "Automation architect".to_string(),
                "Data team".to_string(),
                "Compliance".to_string(),
            ],
        },
    ]
}

fn build_monitoring() -> Monitoring {
    Monitoring {
        lead_kpis: vec![
            "Average reaction time after the trigger".to_string(),
            "Average AI score versus actual score".to_string(),
            "Acceptance rate of AI recommendations".to_string(),
        ],
        lag_kpis: vec![
            "Revenue or retention impact over 30 days".to_string(),
            "Net Promoter Score after automation".to_string(),
            "Volume of manual rework still needed".to_string(),
        ],
        qa: vec![
            "AI answers compared against human answers".to_string(),
            "Share of escalations to a human versus benchmark".to_string(),
            "Quality of inbound data (completeness)".to_string(),
        ],
    }
}

fn build_implementation() -> Vec<SprintPlan> {
    vec![
        SprintPlan {
            sprint: "Week 1".to_string(),
            focus: "Foundations and data schema".to_string(),
            deliverables: vec![
                "Shared data model and mapping of the critical fields".to_string(),
                "Core tools connected and trigger tests run".to_string(),
                "AI persona and initial prompts defined".to_string(),
            ],
        },
        SprintPlan {
            sprint: "Week 2".to_string(),
            focus: "Core automations and generative AI".to_string(),
            deliverables: vec![
                "Router and conditional paths built".to_string(),
                "OpenAI integration for enrichment and content generation".to_string(),
                "Usage reports and lead KPIs in place".to_string(),
            ],
        },
        SprintPlan {
            sprint: "Week 3".to_string(),
            focus: "Guardrails and industrialisation".to_string(),
            deliverables: vec![
                "QA test sets plus human validation".to_string(),
                "Recovery playbooks and monitoring guide".to_string(),
                "Production deployment and feedback retrospective".to_string(),
            ],
        },
    ]
}
