//! Phone number field

use crate::field::{FieldError, FieldResult, FormField};
use crate::validators::{PhoneValidator, trim_form_value};

const DEFAULT_REQUIRED_MESSAGE: &str = "Please enter your phone number.";
const DEFAULT_INVALID_MESSAGE: &str = "Please enter a valid phone number (10-13 digits).";

/// Required telephone field.
///
/// A blank value reports the required message; anything else must pass
/// [`PhoneValidator`]. The raw value is kept as typed, separators included.
#[derive(Debug, Clone)]
pub struct PhoneField {
	pub name: String,
	pub required_message: String,
	validator: PhoneValidator,
}

impl PhoneField {
	/// Create a new PhoneField with the default messages
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::fields::PhoneField;
	/// use booking_forms::FormField;
	///
	/// let field = PhoneField::new("phone");
	/// assert!(field.clean("+91 98765 43210").is_ok());
	/// assert!(field.clean("12345").is_err());
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
			validator: PhoneValidator::new(DEFAULT_INVALID_MESSAGE),
		}
	}

	pub fn required_with(mut self, message: impl Into<String>) -> Self {
		self.required_message = message.into();
		self
	}

	pub fn invalid_with(mut self, message: impl Into<String>) -> Self {
		self.validator = PhoneValidator::new(message);
		self
	}
}

impl FormField for PhoneField {
	fn name(&self) -> &str {
		&self.name
	}

	fn clean(&self, value: &str) -> FieldResult<String> {
		if trim_form_value(value).is_empty() {
			return Err(FieldError::Required(self.required_message.clone()));
		}
		self.validator
			.validate(value)
			.map_err(FieldError::Invalid)?;
		Ok(value.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("  ")]
	#[case("\u{FEFF}")]
	#[case("\u{A0}\u{2029}")]
	fn test_blank_phone_reports_required_message(#[case] value: &str) {
		let field = PhoneField::new("phone");

		assert_eq!(
			field.clean(value),
			Err(FieldError::Required(
				"Please enter your phone number.".to_string()
			))
		);
	}

	#[rstest]
	#[case("12345")]
	#[case("123456789012345")]
	#[case("abcdefghij")]
	#[case("\u{85}")]
	#[case("98765\u{85}43210")]
	fn test_malformed_phone_reports_shape_message(#[case] phone: &str) {
		let field = PhoneField::new("phone");

		assert_eq!(
			field.clean(phone),
			Err(FieldError::Invalid(
				"Please enter a valid phone number (10-13 digits).".to_string()
			))
		);
	}

	#[rstest]
	#[case("+91 98765 43210")]
	#[case("\u{FEFF}9876543210")]
	fn test_valid_phone_keeps_raw_value(#[case] phone: &str) {
		let field = PhoneField::new("phone");

		assert_eq!(field.clean(phone), Ok(phone.to_string()));
	}
}
