//! Connector catalog for the rule-based engine.
//!
//! Each entry pairs a case-insensitive keyword pattern with the pipeline
//! module it contributes. Entries are evaluated in declaration order, which
//! fixes the relative order of matched connectors in the assembled pipeline.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{GenerateRequest, PipelineModule};

// Static regexes, compiled once at first use.

static PATTERN_CRM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)hubspot|crm|salesforce|pipedrive").unwrap());

static PATTERN_KNOWLEDGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)notion|knowledge|wiki").unwrap());

static PATTERN_CHAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)slack|teams|discord").unwrap());

static PATTERN_SPREADSHEET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)airtable|spreadsheet|sheet|excel").unwrap());

static PATTERN_SUPPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)zendesk|freshdesk|support|ticket").unwrap());

/// One catalog entry: keyword pattern plus the module descriptor it yields.
pub struct ConnectorRule {
    pattern: &'static Lazy<Regex>,
    pub app: &'static str,
    pub module: &'static str,
    pub purpose: &'static str,
    pub ai_assist: &'static str,
}

impl ConnectorRule {
    fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Materialize the pipeline module at the given position.
    pub fn to_module(&self, order: u32) -> PipelineModule {
        PipelineModule {
            order,
            app: self.app.to_string(),
            module: self.module.to_string(),
            purpose: self.purpose.to_string(),
            ai_assist: self.ai_assist.to_string(),
        }
    }
}

static CATALOG: &[ConnectorRule] = &[
    ConnectorRule {
        pattern: &PATTERN_CRM,
        app: "HubSpot",
        module: "Create/Update Contact",
        purpose: "Sync the enriched lead and refresh its lifecycle stage.",
        ai_assist: "Applies AI prioritisation and drafts contextual notes for the sales team.",
    },
    ConnectorRule {
        pattern: &PATTERN_KNOWLEDGE,
        app: "Notion",
        module: "Append Page Content",
        purpose: "Document the AI learnings and the automated playbooks.",
        ai_assist: "Structures AI decisions into sections and generates summaries for the team.",
    },
    ConnectorRule {
        pattern: &PATTERN_CHAT,
        app: "Slack",
        module: "Send Message",
        purpose: "Notify the squads with a dynamic recap and AI recommendations.",
        ai_assist: "Manages tone and priority, and adds personalised suggested actions.",
    },
    ConnectorRule {
        pattern: &PATTERN_SPREADSHEET,
        app: "Airtable",
        module: "Create Record",
        purpose: "Centralise the scenario audit trail and the operations follow-up.",
        ai_assist: "Fills derived fields (AI score, category, risk).",
    },
    ConnectorRule {
        pattern: &PATTERN_SUPPORT,
        app: "Zendesk",
        module: "Create Ticket",
        purpose: "Open an enriched ticket for high-complexity cases.",
        ai_assist: "Drafts an initial reply and automatic tags for the agent.",
    },
];

/// Select connectors for a request.
///
/// A rule is included (at most once, in catalog order) when its pattern
/// matches any parsed data-source item, the raw idea, or the raw context.
/// Matching is additive: the idea text alone can pull in a connector even
/// when no data source names it.
pub fn match_connectors(request: &GenerateRequest) -> Vec<&'static ConnectorRule> {
    let mut candidates = request.data_source_items();
    candidates.push(request.idea.clone());
    candidates.push(request.context.clone());

    CATALOG
        .iter()
        .filter(|rule| candidates.iter().any(|text| rule.matches(text)))
        .collect()
}
