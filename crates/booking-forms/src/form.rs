//! Booking form schema and validation results

use crate::field::FormField;
use crate::fields::{CharField, ChoiceField, DateField, PhoneField};

pub const NAME_FIELD: &str = "name";
pub const PHONE_FIELD: &str = "phone";
pub const SERVICE_FIELD: &str = "service";
pub const DATE_FIELD: &str = "date";
pub const TIME_FIELD: &str = "time";

/// A field that failed validation, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct FieldValidationError {
	pub field: String,
	pub reason: String,
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
	pub field: String,
	pub valid: bool,
	pub reason: Option<String>,
}

impl ValidationResult {
	pub fn valid(field: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			valid: true,
			reason: None,
		}
	}

	pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			valid: false,
			reason: Some(reason.into()),
		}
	}

	pub fn is_valid(&self) -> bool {
		self.valid
	}

	/// The failure as an error value, or `None` for a valid field.
	pub fn error(&self) -> Option<FieldValidationError> {
		if self.valid {
			return None;
		}
		Some(FieldValidationError {
			field: self.field.clone(),
			reason: self.reason.clone().unwrap_or_default(),
		})
	}
}

/// Collects the failures out of a batch of results, preserving field order.
pub fn invalid_results(results: &[ValidationResult]) -> Vec<FieldValidationError> {
	results.iter().filter_map(ValidationResult::error).collect()
}

/// Ordered set of validated fields.
pub struct BookingForm {
	fields: Vec<Box<dyn FormField>>,
}

impl BookingForm {
	/// Create a form with no fields
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::BookingForm;
	///
	/// let form = BookingForm::new();
	/// assert!(form.fields().is_empty());
	/// ```
	pub fn new() -> Self {
		Self { fields: Vec::new() }
	}

	/// The appointment form: full name, phone, service, date and time, in
	/// that order, all required.
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::BookingForm;
	///
	/// let form = BookingForm::appointment();
	/// let names: Vec<&str> = form.fields().iter().map(|f| f.name()).collect();
	/// assert_eq!(names, ["name", "phone", "service", "date", "time"]);
	/// ```
	pub fn appointment() -> Self {
		let mut form = Self::new();
		form.add_field(Box::new(
			CharField::new(NAME_FIELD)
				.required_with("Please enter your full name."),
		));
		form.add_field(Box::new(
			PhoneField::new(PHONE_FIELD)
				.required_with("Please enter your phone number.")
				.invalid_with("Please enter a valid phone number (10-13 digits)."),
		));
		form.add_field(Box::new(
			ChoiceField::new(SERVICE_FIELD)
				.required_with("Please select a service."),
		));
		form.add_field(Box::new(
			DateField::new(DATE_FIELD)
				.required_with("Please select a preferred date."),
		));
		form.add_field(Box::new(
			ChoiceField::new(TIME_FIELD)
				.required_with("Please select a preferred time."),
		));
		form
	}

	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	/// Validate every field against the values returned by `value_of`
	///
	/// Every field is checked, even after a failure, so all problems can be
	/// shown at once. A field for which `value_of` returns `None` is treated
	/// as empty.
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::BookingForm;
	///
	/// let form = BookingForm::appointment();
	/// let results = form.validate(|name| match name {
	///     "name" => Some("Asha Rao".to_string()),
	///     "phone" => Some("12345".to_string()),
	///     _ => None,
	/// });
	///
	/// assert_eq!(results.len(), 5);
	/// assert!(results[0].is_valid());
	/// assert!(!results[1].is_valid());
	/// ```
	pub fn validate<F>(&self, value_of: F) -> Vec<ValidationResult>
	where
		F: Fn(&str) -> Option<String>,
	{
		self.fields
			.iter()
			.map(|field| {
				let value = value_of(field.name()).unwrap_or_default();
				match field.clean(&value) {
					Ok(_) => ValidationResult::valid(field.name()),
					Err(e) => ValidationResult::invalid(field.name(), e.message()),
				}
			})
			.collect()
	}
}

impl Default for BookingForm {
	fn default() -> Self {
		Self::appointment()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	fn filled() -> HashMap<&'static str, &'static str> {
		HashMap::from([
			(NAME_FIELD, "Asha Rao"),
			(PHONE_FIELD, "9876543210"),
			(SERVICE_FIELD, "Haircut"),
			(DATE_FIELD, "2025-01-01"),
			(TIME_FIELD, "10:00"),
		])
	}

	#[rstest]
	fn test_complete_form_is_valid() {
		let form = BookingForm::appointment();
		let values = filled();

		let results = form.validate(|name| values.get(name).map(|v| v.to_string()));

		assert!(results.iter().all(ValidationResult::is_valid));
		assert!(invalid_results(&results).is_empty());
	}

	#[rstest]
	fn test_empty_form_reports_every_field_in_order() {
		let form = BookingForm::appointment();

		let errors = invalid_results(&form.validate(|_| None));

		assert_eq!(
			errors,
			vec![
				FieldValidationError {
					field: "name".to_string(),
					reason: "Please enter your full name.".to_string(),
				},
				FieldValidationError {
					field: "phone".to_string(),
					reason: "Please enter your phone number.".to_string(),
				},
				FieldValidationError {
					field: "service".to_string(),
					reason: "Please select a service.".to_string(),
				},
				FieldValidationError {
					field: "date".to_string(),
					reason: "Please select a preferred date.".to_string(),
				},
				FieldValidationError {
					field: "time".to_string(),
					reason: "Please select a preferred time.".to_string(),
				},
			]
		);
	}

	#[rstest]
	fn test_validation_result_error_conversion() {
		assert_eq!(ValidationResult::valid("name").error(), None);

		let err = ValidationResult::invalid("phone", "bad").error().unwrap();
		assert_eq!(err.to_string(), "phone: bad");
	}
}
