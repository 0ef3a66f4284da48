//! Expression decoder
//!
//! Accepts exactly the strings matched by the configured grammar and folds
//! their function calls into a [`ParsedInput`]. Anything else is rejected as a
//! whole; there is no partial result.

use super::error::{ExpressionError, ExpressionResult};
use super::grammar::{jexl_argument, ArgumentScan, FunctionName, FunctionSet, RUNTIME_INPUT_VALUE};
use super::scanner::{scan_function_calls, FunctionCall};
use super::types::{AllowedValues, ParsedInput};
use crate::config::compile_time::expression::MAX_EXPRESSION_LENGTH;
use crate::config::compile_time::logging::MAX_LOGGED_EXPRESSION_LENGTH;
use crate::log_debug;
use serde::{Deserialize, Serialize};

/// Decoder capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    pub functions: FunctionSet,
    pub argument_scan: ArgumentScan,
}

impl ParseOptions {
    pub fn legacy() -> Self {
        Self {
            functions: FunctionSet::Legacy,
            ..Self::default()
        }
    }

    pub fn balanced() -> Self {
        Self {
            argument_scan: ArgumentScan::Balanced,
            ..Self::default()
        }
    }
}

/// Decode with the default (extended, lenient) grammar
pub fn parse_input(input: &str) -> Option<ParsedInput> {
    parse_input_with(input, &ParseOptions::default())
}

pub fn parse_input_with(input: &str, options: &ParseOptions) -> Option<ParsedInput> {
    parse_expression(input, options).ok()
}

/// Absent values are never runtime inputs
pub fn parse_optional_input(input: Option<&str>) -> Option<ParsedInput> {
    input.and_then(parse_input)
}

/// Decode, keeping the rejection reason
pub fn parse_expression(input: &str, options: &ParseOptions) -> ExpressionResult<ParsedInput> {
    let result = decode(input, options);

    match &result {
        Ok(parsed) => {
            log_debug!("Runtime input decoded",
                "expression" => loggable(input),
                "execution_input" => parsed.execution_input
            );
        }
        Err(error) if !error.is_foreign_value() => {
            log_debug!("Runtime input rejected",
                "expression" => loggable(input),
                "code" => error.error_code(),
                "reason" => error
            );
        }
        Err(_) => {}
    }

    result
}

fn decode(input: &str, options: &ParseOptions) -> ExpressionResult<ParsedInput> {
    // Stored expressions of any length stay decodable in lenient mode
    if options.argument_scan == ArgumentScan::Balanced && input.len() > MAX_EXPRESSION_LENGTH {
        return Err(ExpressionError::ExpressionTooLong {
            length: input.len(),
            limit: MAX_EXPRESSION_LENGTH,
        });
    }

    if input.is_empty() {
        return Err(ExpressionError::NotAnExpression);
    }

    if !input.starts_with(RUNTIME_INPUT_VALUE) {
        return Err(ExpressionError::MissingSentinel {
            found: input.chars().take(RUNTIME_INPUT_VALUE.len()).collect(),
        });
    }

    let calls = scan_function_calls(input, options)?;
    Ok(fold_calls(&calls))
}

/// Later calls overwrite earlier ones; `executionInput` only ever sets the flag.
fn fold_calls(calls: &[FunctionCall<'_>]) -> ParsedInput {
    calls
        .iter()
        .fold(ParsedInput::default(), |mut parsed, call| {
            match call.name {
                FunctionName::ExecutionInput => parsed.execution_input = true,
                FunctionName::AllowedValues => {
                    parsed.allowed_values = Some(decode_allowed_values(call.arguments))
                }
                FunctionName::Regex => parsed.regex = Some(call.arguments.to_string()),
                FunctionName::Default => parsed.default = Some(call.arguments.to_string()),
            }
            parsed
        })
}

fn decode_allowed_values(arguments: &str) -> AllowedValues {
    match jexl_argument().captures(arguments) {
        Some(captures) => AllowedValues::Jexl(captures[1].to_string()),
        None => AllowedValues::Values(arguments.split(',').map(str::to_string).collect()),
    }
}

fn loggable(input: &str) -> String {
    if input.len() <= MAX_LOGGED_EXPRESSION_LENGTH {
        return input.to_string();
    }
    let mut cut = MAX_LOGGED_EXPRESSION_LENGTH;
    while !input.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &input[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn values(items: &[&str]) -> Option<AllowedValues> {
        Some(AllowedValues::Values(
            items.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_non_runtime_value_is_none() {
        assert_eq!(parse_input("<+pipeline.foo>"), None);
        assert_eq!(parse_input(""), None);
        assert_eq!(parse_input("fixed value"), None);
        assert_eq!(parse_optional_input(None), None);
    }

    #[test]
    fn test_bare_sentinel() {
        let parsed = parse_input("<+input>").unwrap();
        assert!(parsed.is_bare());
        assert_eq!(parse_optional_input(Some("<+input>")), Some(parsed));
    }

    #[test]
    fn test_execution_input() {
        assert_eq!(
            parse_input("<+input>.executionInput()"),
            Some(ParsedInput {
                allowed_values: None,
                execution_input: true,
                regex: None,
                default: None,
            })
        );
    }

    #[test]
    fn test_regex_preserved_verbatim() {
        let parsed = parse_input("<+input>.regex(^(123)*$)").unwrap();
        assert_eq!(parsed.regex.as_deref(), Some("^(123)*$"));
        assert_eq!(parsed.allowed_values, None);
    }

    #[test]
    fn test_allowed_values_list() {
        let parsed = parse_input("<+input>.allowedValues(1,2,3)").unwrap();
        assert_eq!(parsed.allowed_values, values(&["1", "2", "3"]));
    }

    #[test]
    fn test_allowed_values_not_trimmed() {
        let parsed = parse_input("<+input>.allowedValues( a,b ,c )").unwrap();
        assert_eq!(parsed.allowed_values, values(&[" a", "b ", "c "]));
    }

    #[test]
    fn test_empty_allowed_values_is_single_empty_entry() {
        let parsed = parse_input("<+input>.allowedValues()").unwrap();
        assert_eq!(parsed.allowed_values, values(&[""]));
    }

    #[test]
    fn test_allowed_values_jexl_not_split() {
        let parsed = parse_input(
            "<+input>.allowedValues(jexl(${env.type} == \"prod\" ? aws1, aws2 : aws3, aws4))",
        )
        .unwrap();
        let allowed = parsed.allowed_values.unwrap();
        assert_eq!(allowed.values(), None);
        assert_eq!(
            allowed.jexl_expression(),
            Some("${env.type} == \"prod\" ? aws1, aws2 : aws3, aws4")
        );
    }

    #[test]
    fn test_jexl_must_be_whole_argument() {
        let parsed = parse_input("<+input>.allowedValues(a,jexl(b))").unwrap();
        assert_eq!(parsed.allowed_values, values(&["a", "jexl(b)"]));
    }

    #[test]
    fn test_function_order_is_irrelevant() {
        let expected = ParsedInput {
            allowed_values: values(&["1", "2", "3"]),
            execution_input: true,
            regex: None,
            default: None,
        };
        assert_eq!(
            parse_input("<+input>.executionInput().allowedValues(1,2,3)"),
            Some(expected.clone())
        );
        assert_eq!(
            parse_input("<+input>.allowedValues(1,2,3).executionInput()"),
            Some(expected)
        );
    }

    #[test]
    fn test_allowed_values_and_regex_both_kept() {
        let parsed = parse_input("<+input>.allowedValues(a,b).regex(^a$)").unwrap();
        assert_eq!(parsed.allowed_values, values(&["a", "b"]));
        assert_eq!(parsed.regex.as_deref(), Some("^a$"));
    }

    #[test]
    fn test_last_write_wins() {
        let parsed =
            parse_input("<+input>.regex(a).regex(b).executionInput().executionInput()").unwrap();
        assert_eq!(parsed.regex.as_deref(), Some("b"));
        assert!(parsed.execution_input);
    }

    #[test]
    fn test_default_function() {
        let parsed = parse_input("<+input>.default(abc).allowedValues(abc,xyz)").unwrap();
        assert_eq!(parsed.default.as_deref(), Some("abc"));
        assert_eq!(parsed.allowed_values, values(&["abc", "xyz"]));
    }

    #[test]
    fn test_unknown_function_is_full_mismatch() {
        assert_eq!(parse_input("<+input>.foo(1)"), None);
        assert_eq!(parse_input("<+input>.allowedValues(1).foo"), None);
    }

    #[test]
    fn test_legacy_function_set() {
        let legacy = ParseOptions::legacy();
        assert_eq!(parse_input_with("<+input>.executionInput()", &legacy), None);
        assert_eq!(parse_input_with("<+input>.default(a)", &legacy), None);

        let parsed = parse_input_with("<+input>.allowedValues(x,y)", &legacy).unwrap();
        assert_eq!(parsed.allowed_values, values(&["x", "y"]));
    }

    #[test]
    fn test_balanced_option_nested_jexl() {
        let input = "<+input>.allowedValues(jexl(f(x) ? a : b)).regex(y)";
        let parsed = parse_input_with(input, &ParseOptions::balanced()).unwrap();
        assert_eq!(
            parsed.allowed_values.unwrap().jexl_expression(),
            Some("f(x) ? a : b")
        );
        assert_eq!(parsed.regex.as_deref(), Some("y"));
    }

    #[test]
    fn test_parse_expression_reasons() {
        let options = ParseOptions::default();
        assert_matches!(
            parse_expression("", &options),
            Err(ExpressionError::NotAnExpression)
        );
        assert_matches!(
            parse_expression("<+pipeline.foo>", &options),
            Err(ExpressionError::MissingSentinel { ref found }) if found == "<+pipeli"
        );
        assert_matches!(
            parse_expression("<+input>.foo(1)", &options),
            Err(ExpressionError::UnsupportedFunction { .. })
        );
    }

    #[test]
    fn test_long_stored_list_decodes() {
        let entries: Vec<String> = (0..12_000).map(|i| format!("v{}", i)).collect();
        let input = format!("<+input>.allowedValues({})", entries.join(","));
        assert!(input.len() > MAX_EXPRESSION_LENGTH);

        let parsed = parse_input(&input).unwrap();
        assert_eq!(
            parsed.allowed_values.unwrap().values().map(|v| v.len()),
            Some(12_000)
        );
        assert!(crate::expression::is_runtime_input(&input));
    }

    #[test]
    fn test_many_calls_decode() {
        let input = format!("<+input>{}.regex(last)", ".regex(a)".repeat(64));
        let parsed = parse_input(&input).unwrap();
        assert_eq!(parsed.regex.as_deref(), Some("last"));
    }

    #[test]
    fn test_balanced_length_limit() {
        let input = format!("<+input>.regex({})", "a".repeat(MAX_EXPRESSION_LENGTH));
        assert_matches!(
            parse_expression(&input, &ParseOptions::balanced()),
            Err(ExpressionError::ExpressionTooLong { .. })
        );
        assert!(parse_input(&input).is_some());
    }

    #[test]
    fn test_loggable_truncates() {
        let long = "é".repeat(MAX_LOGGED_EXPRESSION_LENGTH);
        let logged = loggable(&long);
        assert!(logged.ends_with("..."));
        assert!(logged.len() <= MAX_LOGGED_EXPRESSION_LENGTH + 3);
    }
}
