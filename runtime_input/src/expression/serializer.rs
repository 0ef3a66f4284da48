//! Expression encoder
//!
//! Inverse of the parser for canonical strings. Output order is fixed:
//! sentinel, then `.default(..)`, then at most one validation call.

use super::grammar::{FunctionName, EXECUTION_TIME_INPUT_VALUE, RUNTIME_INPUT_VALUE};
use crate::form::{FormValues, ValidationKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// Emit the default as a `.default(..)` call. When false the caller
    /// carries the default out-of-band.
    pub use_new_default_format: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            use_new_default_format: true,
        }
    }
}

/// Encode form values into the canonical expression string. Never fails.
pub fn get_input_str(values: &FormValues, options: &SerializeOptions) -> String {
    let mut expression = String::from(if values.is_execution_input {
        EXECUTION_TIME_INPUT_VALUE
    } else {
        RUNTIME_INPUT_VALUE
    });

    if options.use_new_default_format {
        if let Some(default) = values.default_value.as_deref().filter(|d| !d.is_empty()) {
            push_call(&mut expression, FunctionName::Default, default);
        }
    }

    match values.validation {
        ValidationKind::AllowedValues
            if !values.allowed_values.is_empty() || !values.advanced_value.is_empty() =>
        {
            if values.is_advanced {
                let jexl = format!("jexl({})", values.advanced_value);
                push_call(&mut expression, FunctionName::AllowedValues, &jexl);
            } else {
                let list = values.allowed_values.join(",");
                push_call(&mut expression, FunctionName::AllowedValues, &list);
            }
        }
        ValidationKind::Regex if !values.regex_values.is_empty() => {
            push_call(&mut expression, FunctionName::Regex, &values.regex_values);
        }
        _ => {}
    }

    expression
}

fn push_call(expression: &mut String, function: FunctionName, arguments: &str) {
    expression.push('.');
    expression.push_str(function.as_str());
    expression.push('(');
    expression.push_str(arguments);
    expression.push(')');
}
