//! Options that shape how a runtime input is configured

use crate::expression::SerializeOptions;
use serde::{Deserialize, Serialize};

/// Type the allowed values are checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedValuesType {
    #[default]
    Text,
    Number,
    Time,
    Url,
}

impl AllowedValuesType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "time" => Some(Self::Time),
            "url" => Some(Self::Url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigureOptions {
    /// Offer the jexl (advanced) form of allowed values
    pub show_advanced: bool,
    pub show_default_field: bool,
    pub show_required_field: bool,
    /// Nothing can be edited; validation is skipped
    pub is_readonly: bool,
    pub allowed_values_type: AllowedValuesType,
    pub use_new_default_format: bool,
}

impl Default for ConfigureOptions {
    fn default() -> Self {
        Self {
            show_advanced: true,
            show_default_field: true,
            show_required_field: false,
            is_readonly: false,
            allowed_values_type: AllowedValuesType::Text,
            use_new_default_format: true,
        }
    }
}

impl ConfigureOptions {
    /// The default only goes into the expression when the field is shown
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            use_new_default_format: self.use_new_default_format && self.show_default_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_options() {
        let options = ConfigureOptions::default();
        assert!(options.serialize_options().use_new_default_format);

        let hidden = ConfigureOptions {
            show_default_field: false,
            ..options
        };
        assert!(!hidden.serialize_options().use_new_default_format);

        let old_format = ConfigureOptions {
            use_new_default_format: false,
            ..options
        };
        assert!(!old_format.serialize_options().use_new_default_format);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ConfigureOptions =
            serde_json::from_str(r#"{ "allowedValuesType": "url", "isReadonly": true }"#).unwrap();
        assert_eq!(options.allowed_values_type, AllowedValuesType::Url);
        assert!(options.is_readonly);
        assert!(options.show_advanced);
        assert_eq!(AllowedValuesType::from_name("NUMBER"), Some(AllowedValuesType::Number));
    }
}
