//! Decoded form of a runtime input expression

use serde::{Deserialize, Serialize};

/// Argument of an `allowedValues(..)` call.
///
/// Serialized as `{ "values": [..] | null, "jexlExpression": ".." | null }`
/// with exactly one side populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AllowedValuesRepr", try_from = "AllowedValuesRepr")]
pub enum AllowedValues {
    /// Comma-split literal list, entries untrimmed
    Values(Vec<String>),
    /// Raw body of `jexl(..)`, not split
    Jexl(String),
}

impl AllowedValues {
    pub fn values(&self) -> Option<&[String]> {
        match self {
            Self::Values(values) => Some(values),
            Self::Jexl(_) => None,
        }
    }

    pub fn jexl_expression(&self) -> Option<&str> {
        match self {
            Self::Values(_) => None,
            Self::Jexl(expression) => Some(expression),
        }
    }

    pub fn is_jexl(&self) -> bool {
        matches!(self, Self::Jexl(_))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AllowedValuesRepr {
    values: Option<Vec<String>>,
    jexl_expression: Option<String>,
}

impl From<AllowedValues> for AllowedValuesRepr {
    fn from(allowed: AllowedValues) -> Self {
        match allowed {
            AllowedValues::Values(values) => Self {
                values: Some(values),
                jexl_expression: None,
            },
            AllowedValues::Jexl(expression) => Self {
                values: None,
                jexl_expression: Some(expression),
            },
        }
    }
}

impl TryFrom<AllowedValuesRepr> for AllowedValues {
    type Error = String;

    fn try_from(repr: AllowedValuesRepr) -> Result<Self, Self::Error> {
        match (repr.values, repr.jexl_expression) {
            (Some(values), None) => Ok(Self::Values(values)),
            (None, Some(expression)) => Ok(Self::Jexl(expression)),
            _ => Err("exactly one of values or jexlExpression must be set".to_string()),
        }
    }
}

/// Result of decoding an expression.
///
/// Fields for functions that did not appear are `None` / `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInput {
    pub allowed_values: Option<AllowedValues>,
    pub execution_input: bool,
    pub regex: Option<String>,
    pub default: Option<String>,
}

impl ParsedInput {
    /// True when no function beyond the bare sentinel was present
    pub fn is_bare(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_allowed_values_accessors() {
        let list = AllowedValues::Values(vec!["a".into(), "b".into()]);
        assert_eq!(list.values().map(|v| v.len()), Some(2));
        assert_eq!(list.jexl_expression(), None);

        let jexl = AllowedValues::Jexl("x ? a : b".into());
        assert!(jexl.is_jexl());
        assert_eq!(jexl.values(), None);
        assert_eq!(jexl.jexl_expression(), Some("x ? a : b"));
    }

    #[test]
    fn test_parsed_input_json_shape() {
        let parsed = ParsedInput {
            allowed_values: Some(AllowedValues::Values(vec!["1".into(), "2".into()])),
            execution_input: true,
            regex: None,
            default: None,
        };

        let value = serde_json::to_value(&parsed).unwrap();
        assert_eq!(
            value,
            json!({
                "allowedValues": { "values": ["1", "2"], "jexlExpression": null },
                "executionInput": true,
                "regex": null,
                "default": null,
            })
        );

        let back: ParsedInput = serde_json::from_value(value).unwrap();
        assert_eq!(back, parsed);
    }

    #[test]
    fn test_rejects_ambiguous_allowed_values() {
        let both = json!({ "values": ["a"], "jexlExpression": "b" });
        assert!(serde_json::from_value::<AllowedValues>(both).is_err());

        let neither = json!({ "values": null, "jexlExpression": null });
        assert!(serde_json::from_value::<AllowedValues>(neither).is_err());
    }

    #[test]
    fn test_is_bare() {
        assert!(ParsedInput::default().is_bare());
        let flagged = ParsedInput {
            execution_input: true,
            ..Default::default()
        };
        assert!(!flagged.is_bare());
    }
}
