//! Field default rules
//!
//! A rule set has three tiers, applied in order by [`apply_defaults`]:
//!
//! ```yaml
//! Fields:                 # added to every component
//!   Manufacturer: ~
//! Reference:
//!   R:                    # matched against the designator class ("R" for "R12")
//!     Fields:
//!       Tolerance: 1%
//!     Component_Name:
//!       /_Small$/:        # matched against the library symbol name
//!         Fields:
//!           Package: "0402"
//! ```
//!
//! Rule sets are read once and never modified while defaults are applied.

mod defaults;
mod pattern;

pub use defaults::apply_defaults;
pub use pattern::Pattern;

use anyhow::Context;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::parser::{field_key, SENTINEL};

/// Rule set compiled into the crate
const BUNDLED_RULES: &str = include_str!("../../default_fields.yml");

/// Field name → content to add when the field is missing
pub type FieldDefaults = IndexMap<String, String>;

/// A compiled, read-only rule set
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    /// Defaults for every component
    pub fields: FieldDefaults,
    /// Designator-class rules, in declaration order
    pub references: Vec<ReferenceRule>,
}

/// Defaults for components whose designator class matches `pattern`
#[derive(Debug, Clone)]
pub struct ReferenceRule {
    pub pattern: Pattern,
    pub fields: FieldDefaults,
    pub component_names: Vec<ComponentNameRule>,
}

/// Defaults for components whose library symbol name matches `pattern`
#[derive(Debug, Clone)]
pub struct ComponentNameRule {
    pub pattern: Pattern,
    pub fields: FieldDefaults,
}

impl RuleSet {
    /// Load a rule set file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rule set: {}", path.display()))?;

        let rules = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        };

        rules.with_context(|| format!("Failed to parse rule set: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: RuleSetFile = serde_yaml::from_str(content)?;
        Ok(file.into())
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: RuleSetFile = serde_json::from_str(content)?;
        Ok(file.into())
    }

    /// The default rule set shipped with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_RULES)
    }
}

// Internal structures for deserialization

type FieldsFile = Option<IndexMap<String, Option<DefaultValue>>>;

#[derive(Debug, Deserialize)]
struct RuleSetFile {
    #[serde(rename = "Fields")]
    fields: FieldsFile,
    #[serde(rename = "Reference")]
    reference: Option<IndexMap<String, Option<ReferenceRuleFile>>>,
}

#[derive(Debug, Default, Deserialize)]
struct ReferenceRuleFile {
    #[serde(rename = "Fields")]
    fields: FieldsFile,
    #[serde(rename = "Component_Name")]
    component_name: Option<IndexMap<String, Option<ComponentNameRuleFile>>>,
}

#[derive(Debug, Default, Deserialize)]
struct ComponentNameRuleFile {
    #[serde(rename = "Fields")]
    fields: FieldsFile,
}

/// A default as written in the rule file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum DefaultValue {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<Option<DefaultValue>>),
}

impl DefaultValue {
    fn to_content(&self) -> String {
        match self {
            DefaultValue::Flag(true) => "Y".to_string(),
            DefaultValue::Flag(false) => "N".to_string(),
            DefaultValue::Integer(n) => n.to_string(),
            DefaultValue::Float(n) => n.to_string(),
            DefaultValue::Text(s) if s.is_empty() => SENTINEL.to_string(),
            DefaultValue::Text(s) => s.clone(),
            DefaultValue::List(items) => items
                .iter()
                .map(|item| content_of(item.as_ref()))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

fn content_of(value: Option<&DefaultValue>) -> String {
    value
        .map(DefaultValue::to_content)
        .unwrap_or_else(|| SENTINEL.to_string())
}

/// Rule keys are normalized the same way field names read from a file are
fn compile_fields(fields: FieldsFile) -> FieldDefaults {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| {
            let mut content = content_of(value.as_ref());
            // Contents are written between double quotes with no escaping
            if content.contains('"') {
                log::warn!("Default for `{name}` contains a double quote, writing `'` instead");
                content = content.replace('"', "'");
            }
            (field_key(&name), content)
        })
        .collect()
}

impl From<RuleSetFile> for RuleSet {
    fn from(file: RuleSetFile) -> Self {
        let references = file
            .reference
            .unwrap_or_default()
            .into_iter()
            .map(|(key, rule)| {
                let rule = rule.unwrap_or_default();
                let component_names = rule
                    .component_name
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(key, sub)| ComponentNameRule {
                        pattern: Pattern::parse(&key),
                        fields: compile_fields(sub.unwrap_or_default().fields),
                    })
                    .collect();

                ReferenceRule {
                    pattern: Pattern::parse(&key),
                    fields: compile_fields(rule.fields),
                    component_names,
                }
            })
            .collect();

        RuleSet {
            fields: compile_fields(file.fields),
            references,
        }
    }
}
