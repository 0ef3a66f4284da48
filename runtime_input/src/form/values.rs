//! Form-side view of a runtime input

use crate::expression::{AllowedValues, ParsedInput};
use serde::{Deserialize, Serialize};

/// Which validation a runtime input carries. Always derived, never stored
/// independently of the fields it summarizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationKind {
    #[default]
    None,
    AllowedValues,
    Regex,
}

impl ValidationKind {
    /// Allowed values win over a regex when both are present.
    pub fn derive(allowed_values: &[String], advanced_value: &str, regex: &str) -> Self {
        if !allowed_values.is_empty() || !advanced_value.is_empty() {
            Self::AllowedValues
        } else if !regex.is_empty() {
            Self::Regex
        } else {
            Self::None
        }
    }
}

/// User-chosen options for one runtime input field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub is_execution_input: bool,
    pub validation: ValidationKind,
    pub allowed_values: Vec<String>,
    /// `advanced_value` holds a jexl expression instead of a literal list
    pub is_advanced: bool,
    pub advanced_value: String,
    #[serde(rename = "regExValues")]
    pub regex_values: String,
    pub default_value: Option<String>,
}

impl FormValues {
    /// Initial form state for a decoded expression
    pub fn from_parsed(parsed: &ParsedInput) -> Self {
        let (allowed_values, is_advanced, advanced_value) = match &parsed.allowed_values {
            Some(AllowedValues::Values(values)) => (values.clone(), false, String::new()),
            Some(AllowedValues::Jexl(expression)) => (Vec::new(), true, expression.clone()),
            None => (Vec::new(), false, String::new()),
        };
        let regex_values = parsed.regex.clone().unwrap_or_default();
        let validation = ValidationKind::derive(&allowed_values, &advanced_value, &regex_values);

        Self {
            is_execution_input: parsed.execution_input,
            validation,
            allowed_values,
            is_advanced,
            advanced_value,
            regex_values,
            default_value: parsed.default.clone(),
        }
    }

    pub fn validation_kind(&self) -> ValidationKind {
        ValidationKind::derive(&self.allowed_values, &self.advanced_value, &self.regex_values)
    }

    /// Whether the stored `validation` still agrees with the other fields
    pub fn is_consistent(&self) -> bool {
        self.validation == self.validation_kind()
    }
}
