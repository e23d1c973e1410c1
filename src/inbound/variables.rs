//! Declarative descriptions of the fields each adapter reads and writes.
//!
//! These are documentation for callers (config generators, UIs). Nothing
//! in the adapters enforces them.

use serde::Serialize;

/// The declared type of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Number,
}

/// One externally visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: VariableType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "no_examples")]
    pub examples: &'static [&'static str],
}

fn no_examples(examples: &&'static [&'static str]) -> bool {
    examples.is_empty()
}

impl Variable {
    const fn new(name: &'static str, kind: VariableType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            label: None,
            description: Some(description),
            examples: &[],
        }
    }

    const fn labelled(self, label: &'static str, examples: &'static [&'static str]) -> Self {
        Self {
            label: Some(label),
            examples,
            ..self
        }
    }
}

pub static FEEDBACK_REQUEST: [Variable; 2] = [
    Variable::new("type", VariableType::String, "The type of feedback being given")
        .labelled("Feedback type", &["return", "conversion"]),
    Variable::new("reason", VariableType::String, "The reason the feedback is being given").labelled(
        "Feedback reason",
        &["Disconnected phone", "Wrong number", "Uncontactable", "New customer"],
    ),
];

pub static FEEDBACK_RESPONSE: [Variable; 8] = [
    Variable::new(
        "outcome",
        VariableType::String,
        "The outcome of the feedback request (default is success, meaning that the feedback was accepted)",
    ),
    Variable::new("reason", VariableType::String, "If the outcome was a failure, this is the reason"),
    Variable::new("price", VariableType::Number, "The price of the lead"),
    Variable::new("lead.id", VariableType::String, "The lead identifier"),
    Variable::new("lead.first_name", VariableType::String, "The consumer's first name"),
    Variable::new("lead.last_name", VariableType::String, "The consumer's last name"),
    Variable::new("lead.email", VariableType::String, "The consumer's email address"),
    Variable::new("lead.phone_1", VariableType::String, "The consumer's phone number"),
];

pub static VERBOSE_RESPONSE: [Variable; 3] = [
    Variable::new("lead.id", VariableType::String, "The lead identifier that the source should reference"),
    Variable::new("outcome", VariableType::String, "The outcome of the transaction (default is success)"),
    Variable::new("reason", VariableType::String, "If the outcome was a failure, this is the reason"),
];
