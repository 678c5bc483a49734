//! Selection field backed by a `<select>` control

use crate::field::{FieldError, FieldResult, FormField};

const DEFAULT_REQUIRED_MESSAGE: &str = "Please select an option.";

/// Single-choice field, used for the service and the time slot.
///
/// Only presence is checked: the placeholder option carries an empty value,
/// so an unselected control reads as `""`. Membership is left to the
/// `<select>` itself.
#[derive(Debug, Clone)]
pub struct ChoiceField {
	pub name: String,
	pub required: bool,
	pub required_message: String,
}

impl ChoiceField {
	/// Create a new ChoiceField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::fields::ChoiceField;
	/// use booking_forms::FormField;
	///
	/// let field = ChoiceField::new("service").required_with("Please select a service.");
	/// assert!(field.clean("").is_err());
	/// assert!(field.clean("Haircut").is_ok());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
		}
	}

	pub fn required_with(mut self, message: impl Into<String>) -> Self {
		self.required = true;
		self.required_message = message.into();
		self
	}
}

impl FormField for ChoiceField {
	fn name(&self) -> &str {
		&self.name
	}

	fn clean(&self, value: &str) -> FieldResult<String> {
		if value.is_empty() && self.required {
			return Err(FieldError::Required(self.required_message.clone()));
		}
		Ok(value.to_string())
	}
}
