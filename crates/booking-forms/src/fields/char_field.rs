//! Character field for text input

use crate::field::{FieldError, FieldResult, FormField};
use crate::validators::trim_form_value;

const DEFAULT_REQUIRED_MESSAGE: &str = "This field is required.";

/// Free-text field. Surrounding whitespace is ignored when checking presence.
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub required: bool,
	pub required_message: String,
}

impl CharField {
	/// Create a new CharField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::fields::CharField;
	///
	/// let field = CharField::new("name");
	/// assert_eq!(field.name, "name");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
		}
	}

	/// Mark the field as required, reporting `message` when it is blank
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::fields::CharField;
	///
	/// let field = CharField::new("name").required_with("Please enter your full name.");
	/// assert!(field.required);
	/// ```
	pub fn required_with(mut self, message: impl Into<String>) -> Self {
		self.required = true;
		self.required_message = message.into();
		self
	}
}

impl FormField for CharField {
	fn name(&self) -> &str {
		&self.name
	}

	fn clean(&self, value: &str) -> FieldResult<String> {
		let trimmed = trim_form_value(value);
		if trimmed.is_empty() && self.required {
			return Err(FieldError::Required(self.required_message.clone()));
		}
		Ok(trimmed.to_string())
	}
}
