//! Runtime input expression codec
//!
//! Decodes `<+input>.name(args)...` strings into [`ParsedInput`] and encodes
//! form values back into the canonical string. Both directions are pure.
//!
//! ```
//! use runtime_input::expression::parse_input;
//!
//! let parsed = parse_input("<+input>.allowedValues(a,b)").unwrap();
//! assert_eq!(parsed.allowed_values.unwrap().values().map(|v| v.len()), Some(2));
//! assert!(parse_input("<+pipeline.name>").is_none());
//! ```

pub mod error;
pub mod grammar;
pub mod parser;
pub mod scanner;
pub mod serializer;
pub mod types;

pub use error::{ExpressionError, ExpressionResult};
pub use grammar::{
    ArgumentScan, FunctionName, FunctionSet, EXECUTION_TIME_INPUT_VALUE, RUNTIME_INPUT_VALUE,
};
pub use parser::{parse_expression, parse_input, parse_input_with, parse_optional_input, ParseOptions};
pub use scanner::{scan_function_calls, FunctionCall};
pub use serializer::{get_input_str, SerializeOptions};
pub use types::{AllowedValues, ParsedInput};

/// Whether a field value is a runtime input at all (either sentinel, or any
/// string the extended grammar accepts)
pub fn is_runtime_input(value: &str) -> bool {
    value == RUNTIME_INPUT_VALUE
        || value == EXECUTION_TIME_INPUT_VALUE
        || FunctionSet::Extended.grammar().is_match(value)
}

pub fn is_execution_time_input(value: &str) -> bool {
    parse_input(value).is_some_and(|parsed| parsed.execution_input)
}
