//! Checks a form applies before encoding
//!
//! The serializer accepts anything; these checks reject states a user should
//! not be able to save. All failures are collected, not just the first.

use super::error::FormError;
use super::options::{AllowedValuesType, ConfigureOptions};
use super::values::{FormValues, ValidationKind};
use crate::config::compile_time::form::{MAX_ALLOWED_VALUES, MAX_REGEX_LENGTH, REGEX_SIZE_LIMIT};
use crate::logging::codes;
use crate::{log_error, log_success};
use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

pub fn validate_form_values(
    values: &FormValues,
    options: &ConfigureOptions,
) -> Result<(), Vec<FormError>> {
    if options.is_readonly {
        return Ok(());
    }

    let mut errors = Vec::new();

    match values.validation {
        ValidationKind::AllowedValues => check_allowed_values(values, options, &mut errors),
        ValidationKind::Regex => {
            if let Err(error) = check_regex(&values.regex_values) {
                errors.push(error);
            }
        }
        ValidationKind::None => {}
    }

    if options.show_default_field {
        check_default(values, &mut errors);
    }

    if errors.is_empty() {
        log_success!(
            codes::success::FORM_VALIDATION_PASSED,
            "Form values passed validation",
            "validation" => format!("{:?}", values.validation)
        );
        Ok(())
    } else {
        for error in &errors {
            log_error!(error.error_code(), &error.to_string());
        }
        Err(errors)
    }
}

fn check_allowed_values(
    values: &FormValues,
    options: &ConfigureOptions,
    errors: &mut Vec<FormError>,
) {
    if values.is_advanced {
        if !options.show_advanced {
            errors.push(FormError::AdvancedModeDisabled);
        } else if values.advanced_value.is_empty() {
            errors.push(FormError::MissingAllowedValues);
        }
        return;
    }

    if values.allowed_values.is_empty() {
        errors.push(FormError::MissingAllowedValues);
        return;
    }

    if values.allowed_values.len() > MAX_ALLOWED_VALUES {
        errors.push(FormError::TooManyAllowedValues {
            count: values.allowed_values.len(),
            limit: MAX_ALLOWED_VALUES,
        });
        return;
    }

    errors.extend(
        values
            .allowed_values
            .iter()
            .filter_map(|value| check_value_type(value, options.allowed_values_type)),
    );
}

fn check_value_type(value: &str, value_type: AllowedValuesType) -> Option<FormError> {
    let trimmed = value.trim();
    match value_type {
        AllowedValuesType::Text => None,
        AllowedValuesType::Number => match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => None,
            _ => Some(FormError::InvalidNumber {
                value: value.to_string(),
            }),
        },
        AllowedValuesType::Time => (!time_pattern().is_match(trimmed)).then(|| {
            FormError::InvalidTime {
                value: value.to_string(),
            }
        }),
        AllowedValuesType::Url => (!url_pattern().is_match(trimmed)).then(|| {
            FormError::InvalidUrl {
                value: value.to_string(),
            }
        }),
    }
}

/// Compile a user pattern under the length and size limits
pub fn check_regex(pattern: &str) -> Result<Regex, FormError> {
    if pattern.is_empty() {
        return Err(FormError::MissingRegex);
    }
    if pattern.len() > MAX_REGEX_LENGTH {
        return Err(FormError::RegexTooLong {
            length: pattern.len(),
            limit: MAX_REGEX_LENGTH,
        });
    }
    RegexBuilder::new(pattern)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|e| FormError::MalformedRegex {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

fn check_default(values: &FormValues, errors: &mut Vec<FormError>) {
    let Some(default) = values.default_value.as_deref().filter(|d| !d.is_empty()) else {
        return;
    };

    // Jexl sets are only known at run time
    if values.validation == ValidationKind::AllowedValues
        && !values.is_advanced
        && !values.allowed_values.is_empty()
        && !values.allowed_values.iter().any(|value| value == default)
    {
        errors.push(FormError::DefaultNotAllowed {
            value: default.to_string(),
        });
    }
}

/// Durations such as `10m`, `1h30m`, `2d`, `500ms`
fn time_pattern() -> &'static Regex {
    static TIME: OnceLock<Regex> = OnceLock::new();
    TIME.get_or_init(|| {
        Regex::new(r"^(\d+(\.\d+)?(ms|s|m|h|d|w))+$").expect("time pattern must compile")
    })
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://[^\s/?#]+\S*$").expect("url pattern must compile")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn allowed(values: &[&str]) -> FormValues {
        FormValues {
            validation: ValidationKind::AllowedValues,
            allowed_values: values.iter().map(|v| v.to_string()).collect(),
            ..FormValues::default()
        }
    }

    fn typed(value_type: AllowedValuesType) -> ConfigureOptions {
        ConfigureOptions {
            allowed_values_type: value_type,
            ..ConfigureOptions::default()
        }
    }

    #[test]
    fn test_valid_list_passes() {
        assert!(validate_form_values(&allowed(&["a", "b"]), &ConfigureOptions::default()).is_ok());
        assert!(validate_form_values(&FormValues::default(), &ConfigureOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_allowed_values() {
        let errors = validate_form_values(&allowed(&[]), &ConfigureOptions::default()).unwrap_err();
        assert_eq!(errors, vec![FormError::MissingAllowedValues]);
    }

    #[test]
    fn test_number_type() {
        let options = typed(AllowedValuesType::Number);
        assert!(validate_form_values(&allowed(&["1", " 2.5", "-3"]), &options).is_ok());

        let errors = validate_form_values(&allowed(&["1", "two", "inf"]), &options).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_matches!(&errors[0], FormError::InvalidNumber { value } if value == "two");
    }

    #[test]
    fn test_time_type() {
        let options = typed(AllowedValuesType::Time);
        assert!(validate_form_values(&allowed(&["10m", "1h30m", "2d", "500ms"]), &options).is_ok());
        let errors = validate_form_values(&allowed(&["10 minutes"]), &options).unwrap_err();
        assert_matches!(errors[0], FormError::InvalidTime { .. });
    }

    #[test]
    fn test_url_type() {
        let options = typed(AllowedValuesType::Url);
        assert!(validate_form_values(&allowed(&["https://example.com/a?b=c"]), &options).is_ok());
        let errors = validate_form_values(&allowed(&["example.com"]), &options).unwrap_err();
        assert_eq!(errors[0].error_code(), codes::form::INVALID_URL);
    }

    #[test]
    fn test_too_many_values() {
        let many: Vec<String> = (0..=MAX_ALLOWED_VALUES).map(|i| i.to_string()).collect();
        let values = FormValues {
            allowed_values: many,
            ..allowed(&[])
        };
        let errors = validate_form_values(&values, &ConfigureOptions::default()).unwrap_err();
        assert_matches!(errors[0], FormError::TooManyAllowedValues { .. });
    }

    #[test]
    fn test_regex_checks() {
        let with_regex = |pattern: &str| FormValues {
            validation: ValidationKind::Regex,
            regex_values: pattern.to_string(),
            ..FormValues::default()
        };
        let options = ConfigureOptions::default();

        assert!(validate_form_values(&with_regex("^a$"), &options).is_ok());
        assert_matches!(
            validate_form_values(&with_regex("(unclosed"), &options).unwrap_err()[0],
            FormError::MalformedRegex { .. }
        );
        assert_matches!(
            validate_form_values(&with_regex(""), &options).unwrap_err()[0],
            FormError::MissingRegex
        );
        assert_matches!(
            check_regex(&"a".repeat(MAX_REGEX_LENGTH + 1)),
            Err(FormError::RegexTooLong { .. })
        );
    }

    #[test]
    fn test_advanced_mode() {
        let values = FormValues {
            validation: ValidationKind::AllowedValues,
            is_advanced: true,
            advanced_value: "x ? a : b".into(),
            ..FormValues::default()
        };
        assert!(validate_form_values(&values, &ConfigureOptions::default()).is_ok());

        let hidden = ConfigureOptions {
            show_advanced: false,
            ..ConfigureOptions::default()
        };
        assert_eq!(
            validate_form_values(&values, &hidden).unwrap_err(),
            vec![FormError::AdvancedModeDisabled]
        );
    }

    #[test]
    fn test_default_membership() {
        let mut values = allowed(&["a", "b"]);
        values.default_value = Some("c".into());
        let errors = validate_form_values(&values, &ConfigureOptions::default()).unwrap_err();
        assert_matches!(&errors[0], FormError::DefaultNotAllowed { value } if value == "c");

        values.default_value = Some("b".into());
        assert!(validate_form_values(&values, &ConfigureOptions::default()).is_ok());

        let no_default_field = ConfigureOptions {
            show_default_field: false,
            ..ConfigureOptions::default()
        };
        values.default_value = Some("c".into());
        assert!(validate_form_values(&values, &no_default_field).is_ok());
    }

    #[test]
    fn test_readonly_skips_checks() {
        let readonly = ConfigureOptions {
            is_readonly: true,
            ..ConfigureOptions::default()
        };
        assert!(validate_form_values(&allowed(&[]), &readonly).is_ok());
    }
}
