//! Rejection reasons for expression decoding
//!
//! `parse_input` collapses all of these to `None`; the detailed form is kept
//! for diagnostics and logging.

use crate::logging::{codes, Code};
use crate::utils::Span;

pub type ExpressionResult<T> = Result<T, ExpressionError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("Empty value is not a runtime input expression")]
    NotAnExpression,

    #[error("Value does not start with <+input>: '{found}'")]
    MissingSentinel { found: String },

    #[error("Unsupported function '{name}' at {span}")]
    UnsupportedFunction { name: String, span: Span },

    #[error("Grammar violation: {message} at {span}")]
    GrammarMismatch { message: String, span: Span },

    #[error("Unbalanced parentheses in {function}(..) at {span}")]
    UnbalancedArguments { function: String, span: Span },

    #[error("Expression is {length} bytes, limit is {limit}")]
    ExpressionTooLong { length: usize, limit: usize },

    #[error("Expression has {count} function calls, limit is {limit}")]
    TooManyFunctionCalls { count: usize, limit: usize },
}

impl ExpressionError {
    pub fn grammar_mismatch(message: &str, span: Span) -> Self {
        Self::GrammarMismatch {
            message: message.to_string(),
            span,
        }
    }

    pub fn unsupported_function(name: &str, span: Span) -> Self {
        Self::UnsupportedFunction {
            name: name.to_string(),
            span,
        }
    }

    pub fn unbalanced_arguments(function: &str, span: Span) -> Self {
        Self::UnbalancedArguments {
            function: function.to_string(),
            span,
        }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::NotAnExpression => codes::expression::NOT_AN_EXPRESSION,
            Self::MissingSentinel { .. } => codes::expression::MISSING_SENTINEL,
            Self::UnsupportedFunction { .. } => codes::expression::UNSUPPORTED_FUNCTION,
            Self::GrammarMismatch { .. } => codes::expression::GRAMMAR_MISMATCH,
            Self::UnbalancedArguments { .. } => codes::expression::UNBALANCED_ARGUMENTS,
            Self::ExpressionTooLong { .. } => codes::expression::EXPRESSION_TOO_LONG,
            Self::TooManyFunctionCalls { .. } => codes::expression::TOO_MANY_FUNCTION_CALLS,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnsupportedFunction { span, .. }
            | Self::GrammarMismatch { span, .. }
            | Self::UnbalancedArguments { span, .. } => Some(*span),
            Self::NotAnExpression
            | Self::MissingSentinel { .. }
            | Self::ExpressionTooLong { .. }
            | Self::TooManyFunctionCalls { .. } => None,
        }
    }

    /// The value simply is not an `<+input>` value, as opposed to a broken one
    pub fn is_foreign_value(&self) -> bool {
        matches!(self, Self::NotAnExpression | Self::MissingSentinel { .. })
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    /// Cargo-style rendering against the rejected input
    pub fn render(&self, input: &str) -> String {
        let span = self.span().unwrap_or_else(|| Span::whole(input));
        let mut rendered = span.underline(input, &self.to_string());
        rendered.push_str(&format!(
            "   = help: {} [{}]\n",
            self.recommended_action(),
            self.error_code()
        ));
        rendered
    }
}
