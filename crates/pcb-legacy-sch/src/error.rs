use thiserror::Error;

/// Errors raised while reading, defaulting or writing a legacy schematic.
///
/// Line numbers are 1-based and refer to the input text, blank lines
/// included.
#[derive(Error, Debug)]
pub enum SchematicError {
    #[error("line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
    #[error("line {line}: `{marker}` section is never closed")]
    UnterminatedSection { line: usize, marker: &'static str },
    #[error("component {reference} has no `{field}` field")]
    MissingCanonicalField {
        reference: String,
        field: &'static str,
    },
    #[error("Invalid YAML rule set: {0}")]
    RuleSetYaml(#[from] serde_yaml::Error),
    #[error("Invalid JSON rule set: {0}")]
    RuleSetJson(#[from] serde_json::Error),
}

impl SchematicError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        SchematicError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = SchematicError> = std::result::Result<T, E>;
