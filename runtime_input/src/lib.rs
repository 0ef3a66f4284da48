//! Codec for `<+input>` runtime input expressions
//!
//! A runtime input marks a pipeline field whose value is supplied when the
//! pipeline runs. The [`expression`] module decodes and encodes the
//! expression string, [`form`] maps it to editable field options.

pub mod config;
pub mod expression;
pub mod form;
#[macro_use]
pub mod logging;
pub mod utils;

// Re-export key types for library consumers
pub use expression::{
    get_input_str, is_execution_time_input, is_runtime_input, parse_expression, parse_input,
    parse_input_with, parse_optional_input, AllowedValues, ExpressionError, ExpressionResult,
    ParseOptions, ParsedInput, SerializeOptions, EXECUTION_TIME_INPUT_VALUE, RUNTIME_INPUT_VALUE,
};
pub use form::{ConfigureOptions, FormError, FormValues, ValidationKind};
