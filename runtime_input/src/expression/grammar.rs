//! Closed function vocabulary and the full-match grammar patterns
//!
//! The grammar is intentionally checked with a regular expression so that
//! acceptance is byte-compatible with expressions already stored in pipeline
//! documents. The argument body of each call is matched non-greedily up to a
//! `)`, which with the trailing `$` anchor means any text without line breaks
//! is accepted between `name(` and the final `)`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Runtime input sentinel that starts every expression
pub const RUNTIME_INPUT_VALUE: &str = "<+input>";

/// Execution-time sentinel; the value must be supplied when a run starts
pub const EXECUTION_TIME_INPUT_VALUE: &str = "<+input>.executionInput()";

/// Characters a JavaScript `.` refuses to match; they never appear in a
/// stored expression.
pub(crate) const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Modifier functions that may follow the sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionName {
    ExecutionInput,
    AllowedValues,
    Regex,
    Default,
}

impl FunctionName {
    /// Exact spelling inside an expression
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExecutionInput => "executionInput",
            Self::AllowedValues => "allowedValues",
            Self::Regex => "regex",
            Self::Default => "default",
        }
    }

    /// Case-sensitive lookup; `allowedvalues` is not a function name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|function| function.as_str() == name)
    }

    pub const fn all() -> &'static [FunctionName] {
        &[
            Self::ExecutionInput,
            Self::AllowedValues,
            Self::Regex,
            Self::Default,
        ]
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which functions the decoder accepts.
///
/// `Legacy` is the vocabulary of older call sites that only knew validation
/// modifiers; `Extended` adds `executionInput` and `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionSet {
    Legacy,
    #[default]
    Extended,
}

impl FunctionSet {
    pub fn functions(self) -> &'static [FunctionName] {
        match self {
            Self::Legacy => &[FunctionName::AllowedValues, FunctionName::Regex],
            Self::Extended => FunctionName::all(),
        }
    }

    pub fn supports(self, function: FunctionName) -> bool {
        self.functions().contains(&function)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "legacy" => Some(Self::Legacy),
            "extended" => Some(Self::Extended),
            _ => None,
        }
    }

    /// Anchored full-match grammar for this function set
    pub fn grammar(self) -> &'static Regex {
        static LEGACY: OnceLock<Regex> = OnceLock::new();
        static EXTENDED: OnceLock<Regex> = OnceLock::new();

        let cell = match self {
            Self::Legacy => &LEGACY,
            Self::Extended => &EXTENDED,
        };
        cell.get_or_init(|| build_grammar(self.functions()))
    }
}

/// How argument bodies are delimited.
///
/// `Lenient` reproduces the stored-format grammar exactly, including its
/// inability to tell a `)` inside a jexl body from the closing one. `Balanced`
/// tracks parenthesis depth and rejects unbalanced bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentScan {
    #[default]
    Lenient,
    Balanced,
}

impl ArgumentScan {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "lenient" => Some(Self::Lenient),
            "balanced" => Some(Self::Balanced),
            _ => None,
        }
    }
}

fn build_grammar(functions: &[FunctionName]) -> Regex {
    let names: Vec<&str> = functions.iter().map(|f| f.as_str()).collect();
    let pattern = format!(
        r"^{}(\.({})\([^\n\r\x{{2028}}\x{{2029}}]*?\))*$",
        regex::escape(RUNTIME_INPUT_VALUE),
        names.join("|")
    );
    // Built only from the escaped sentinel and fixed identifiers
    Regex::new(&pattern).expect("runtime input grammar must compile")
}

/// Matches an `allowedValues` argument written as `jexl(<expr>)`
pub(crate) fn jexl_argument() -> &'static Regex {
    static JEXL: OnceLock<Regex> = OnceLock::new();
    JEXL.get_or_init(|| {
        Regex::new(r"^jexl\(([^\n\r\x{2028}\x{2029}]*)\)$").expect("jexl pattern must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_lookup() {
        assert_eq!(
            FunctionName::from_name("allowedValues"),
            Some(FunctionName::AllowedValues)
        );
        assert_eq!(FunctionName::from_name("allowedvalues"), None);
        assert_eq!(FunctionName::from_name("jexl"), None);
        for function in FunctionName::all() {
            assert_eq!(FunctionName::from_name(function.as_str()), Some(*function));
        }
    }

    #[test]
    fn test_function_sets() {
        assert!(FunctionSet::Legacy.supports(FunctionName::Regex));
        assert!(!FunctionSet::Legacy.supports(FunctionName::Default));
        assert!(FunctionSet::Extended.supports(FunctionName::ExecutionInput));
        assert_eq!(FunctionSet::default(), FunctionSet::Extended);
        assert_eq!(FunctionSet::from_name("LEGACY"), Some(FunctionSet::Legacy));
    }

    #[test]
    fn test_extended_grammar() {
        let grammar = FunctionSet::Extended.grammar();
        assert!(grammar.is_match("<+input>"));
        assert!(grammar.is_match("<+input>.executionInput()"));
        assert!(grammar.is_match("<+input>.default(a).allowedValues(a,b)"));
        assert!(grammar.is_match("<+input>.regex(^(123)*$)"));
        assert!(!grammar.is_match("<+input>.foo(1)"));
        assert!(!grammar.is_match("<+pipeline.foo>"));
        assert!(!grammar.is_match(" <+input>"));
        assert!(!grammar.is_match("<+input>.regex(a\nb)"));
        assert!(!grammar.is_match(""));
    }

    #[test]
    fn test_legacy_grammar() {
        let grammar = FunctionSet::Legacy.grammar();
        assert!(grammar.is_match("<+input>.allowedValues(1,2)"));
        assert!(!grammar.is_match("<+input>.executionInput()"));
        assert!(!grammar.is_match("<+input>.default(x)"));
    }

    #[test]
    fn test_jexl_argument() {
        let captures = jexl_argument().captures("jexl(a, b)").unwrap();
        assert_eq!(&captures[1], "a, b");
        assert!(jexl_argument().captures("a,jexl(b)").is_none());
    }

    #[test]
    fn test_execution_sentinel_extends_runtime_sentinel() {
        assert!(EXECUTION_TIME_INPUT_VALUE.starts_with(RUNTIME_INPUT_VALUE));
    }
}
