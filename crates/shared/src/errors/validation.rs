use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Every field-level violation found in one candidate, ordered by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, ToSchema, Error)]
#[error("{}", joined(.violations))]
pub struct FieldViolations {
    pub violations: Vec<FieldViolation>,
}

impl FieldViolations {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.field == field)
            .map(|v| v.message.as_str())
            .collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for violation in &self.violations {
            let entry = map
                .entry(violation.field.clone())
                .or_insert_with(|| serde_json::Value::Array(Vec::new()));
            if let serde_json::Value::Array(messages) = entry {
                messages.push(serde_json::Value::String(violation.message.clone()));
            }
        }
        serde_json::Value::Object(map)
    }
}

fn joined(violations: &[FieldViolation]) -> String {
    if violations.is_empty() {
        return "Validation failed".to_string();
    }

    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn default_message(field: &str, error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match &*error.code {
            "length" => format!("{field} must not be empty"),
            "range" => format!("{field} is out of range"),
            _ => format!("Invalid {field}"),
        })
}

impl From<ValidationErrors> for FieldViolations {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                field_errors
                    .iter()
                    .map(|e| FieldViolation {
                        message: default_message(&field, e),
                        field: field.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));

        Self { violations }
    }
}
