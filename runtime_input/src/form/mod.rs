//! Form values for a runtime input field
//!
//! The bridge between a decoded [`crate::expression::ParsedInput`] and the
//! values a configuration form edits before they are encoded again.

pub mod error;
pub mod options;
pub mod validation;
pub mod values;

pub use error::FormError;
pub use options::{AllowedValuesType, ConfigureOptions};
pub use validation::{check_regex, validate_form_values};
pub use values::{FormValues, ValidationKind};
