//! Consolidated error codes and classification system
//!
//! Single source of truth for all codes the codec emits, their metadata, and
//! classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Expression decoding error codes
pub mod expression {
    use super::Code;

    pub const NOT_AN_EXPRESSION: Code = Code::new("E100");
    pub const MISSING_SENTINEL: Code = Code::new("E101");
    pub const UNSUPPORTED_FUNCTION: Code = Code::new("E102");
    pub const GRAMMAR_MISMATCH: Code = Code::new("E103");
    pub const UNBALANCED_ARGUMENTS: Code = Code::new("E104");
    pub const EXPRESSION_TOO_LONG: Code = Code::new("E105");
    pub const TOO_MANY_FUNCTION_CALLS: Code = Code::new("E106");
}

/// Form value validation error codes
pub mod form {
    use super::Code;

    pub const MALFORMED_REGEX: Code = Code::new("E200");
    pub const MISSING_ALLOWED_VALUES: Code = Code::new("E201");
    pub const INVALID_NUMBER: Code = Code::new("E202");
    pub const INVALID_URL: Code = Code::new("E203");
    pub const TOO_MANY_ALLOWED_VALUES: Code = Code::new("E204");
    pub const DEFAULT_NOT_ALLOWED: Code = Code::new("E205");
    pub const REGEX_TOO_LONG: Code = Code::new("E206");
    pub const INVALID_TIME: Code = Code::new("E207");
    pub const MISSING_REGEX: Code = Code::new("E208");
    pub const ADVANCED_MODE_DISABLED: Code = Code::new("E209");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const CONFIG_FILE_UNREADABLE: Code = Code::new("E300");
    pub const CONFIG_PARSE_FAILURE: Code = Code::new("E301");
    pub const CONFIG_INVALID_VALUE: Code = Code::new("E302");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const EXPRESSION_PARSED: Code = Code::new("I010");
    pub const EXPRESSION_SERIALIZED: Code = Code::new("I011");
    pub const FORM_VALIDATION_PASSED: Code = Code::new("I020");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System errors
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        "Critical internal codec error",
        "File a bug report with the offending expression",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        "Logging or configuration initialization failure",
        "Check RTI_* environment variables and the config file",
    ),
    // Expression errors
    ErrorMetadata::new(
        "E100",
        "Expression",
        Severity::Low,
        true,
        "Value is not a runtime input expression",
        "Treat the value as a fixed value or expression",
    ),
    ErrorMetadata::new(
        "E101",
        "Expression",
        Severity::Low,
        true,
        "Value does not start with the <+input> sentinel",
        "Prefix the value with <+input>",
    ),
    ErrorMetadata::new(
        "E102",
        "Expression",
        Severity::Medium,
        true,
        "Function is not part of the accepted function set",
        "Use executionInput, allowedValues, regex or default",
    ),
    ErrorMetadata::new(
        "E103",
        "Expression",
        Severity::Medium,
        true,
        "Text after the sentinel is not a sequence of function calls",
        "Write each modifier as .name(arguments)",
    ),
    ErrorMetadata::new(
        "E104",
        "Expression",
        Severity::Medium,
        true,
        "Function arguments have unbalanced parentheses",
        "Balance parentheses inside the argument body",
    ),
    ErrorMetadata::new(
        "E105",
        "Expression",
        Severity::High,
        false,
        "Expression exceeds the maximum accepted length",
        "Shorten the expression or its allowed values",
    ),
    ErrorMetadata::new(
        "E106",
        "Expression",
        Severity::High,
        false,
        "Expression contains too many function calls",
        "Remove repeated modifiers",
    ),
    // Form errors
    ErrorMetadata::new(
        "E200",
        "Form",
        Severity::Medium,
        true,
        "Regex pattern does not compile",
        "Fix the regular expression syntax",
    ),
    ErrorMetadata::new(
        "E201",
        "Form",
        Severity::Medium,
        true,
        "Allowed values validation selected without any values",
        "Add at least one value or a jexl expression",
    ),
    ErrorMetadata::new(
        "E202",
        "Form",
        Severity::Medium,
        true,
        "Allowed value is not a number",
        "Use numeric entries for number inputs",
    ),
    ErrorMetadata::new(
        "E203",
        "Form",
        Severity::Medium,
        true,
        "Allowed value is not a URL",
        "Use entries of the form scheme://host",
    ),
    ErrorMetadata::new(
        "E204",
        "Form",
        Severity::High,
        true,
        "Too many allowed values",
        "Reduce the allowed values list",
    ),
    ErrorMetadata::new(
        "E205",
        "Form",
        Severity::Medium,
        true,
        "Default value is not one of the allowed values",
        "Pick a default from the allowed values",
    ),
    ErrorMetadata::new(
        "E206",
        "Form",
        Severity::High,
        true,
        "Regex pattern exceeds the maximum length",
        "Shorten the regular expression",
    ),
    ErrorMetadata::new(
        "E207",
        "Form",
        Severity::Medium,
        true,
        "Allowed value is not a time duration",
        "Use durations such as 10m, 1h30m or 2d",
    ),
    ErrorMetadata::new(
        "E208",
        "Form",
        Severity::Medium,
        true,
        "Regex validation selected without a pattern",
        "Enter a regular expression",
    ),
    ErrorMetadata::new(
        "E209",
        "Form",
        Severity::Medium,
        true,
        "Jexl allowed values used while advanced mode is hidden",
        "Enable advanced mode or use a literal list",
    ),
    // Configuration errors
    ErrorMetadata::new(
        "E300",
        "Config",
        Severity::High,
        false,
        "Configuration file could not be read",
        "Check the --config path and permissions",
    ),
    ErrorMetadata::new(
        "E301",
        "Config",
        Severity::High,
        false,
        "Configuration file is not valid TOML",
        "Fix the TOML syntax",
    ),
    ErrorMetadata::new(
        "E302",
        "Config",
        Severity::High,
        false,
        "Configuration value is not supported",
        "Review the [codec] and [logging] tables",
    ),
    // Success codes
    ErrorMetadata::new(
        "I001",
        "System",
        Severity::Low,
        true,
        "Logging system initialized",
        "Continue",
    ),
    ErrorMetadata::new(
        "I010",
        "Expression",
        Severity::Low,
        true,
        "Expression decoded",
        "Continue",
    ),
    ErrorMetadata::new(
        "I011",
        "Expression",
        Severity::Low,
        true,
        "Expression encoded",
        "Continue",
    ),
    ErrorMetadata::new(
        "I020",
        "Form",
        Severity::Low,
        true,
        "Form values passed validation",
        "Continue",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata.clone()))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_constant_is_registered() {
        let codes = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            expression::NOT_AN_EXPRESSION,
            expression::MISSING_SENTINEL,
            expression::UNSUPPORTED_FUNCTION,
            expression::GRAMMAR_MISMATCH,
            expression::UNBALANCED_ARGUMENTS,
            expression::EXPRESSION_TOO_LONG,
            expression::TOO_MANY_FUNCTION_CALLS,
            form::MALFORMED_REGEX,
            form::MISSING_ALLOWED_VALUES,
            form::INVALID_NUMBER,
            form::INVALID_URL,
            form::TOO_MANY_ALLOWED_VALUES,
            form::DEFAULT_NOT_ALLOWED,
            form::REGEX_TOO_LONG,
            form::INVALID_TIME,
            form::MISSING_REGEX,
            form::ADVANCED_MODE_DISABLED,
            config::CONFIG_FILE_UNREADABLE,
            config::CONFIG_PARSE_FAILURE,
            config::CONFIG_INVALID_VALUE,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::EXPRESSION_PARSED,
            success::EXPRESSION_SERIALIZED,
            success::FORM_VALIDATION_PASSED,
        ];

        for code in codes {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
        assert_eq!(get_error_registry().len(), codes.len());
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
    }

    #[test]
    fn test_classification() {
        assert_eq!(get_category("E104"), "Expression");
        assert_eq!(get_severity("ERR001"), Severity::Critical);
        assert!(!is_recoverable("E105"));
        assert_eq!(get_action("E200"), "Fix the regular expression syntax");
    }
}
