//! Appointment form validation tests
//!
//! Covers the required-field rules of the booking form and the accepted phone
//! number shapes.

use booking_forms::{BookingForm, FieldValidationError, invalid_results};
use rstest::{fixture, rstest};
use std::collections::HashMap;

// ============================================================================
// Fixtures
// ============================================================================

#[fixture]
fn valid_values() -> HashMap<String, String> {
	[
		("name", "Asha Rao"),
		("phone", "9876543210"),
		("service", "Haircut"),
		("date", "2025-01-01"),
		("time", "10:00"),
	]
	.into_iter()
	.map(|(k, v)| (k.to_string(), v.to_string()))
	.collect()
}

fn errors_for(values: &HashMap<String, String>) -> Vec<FieldValidationError> {
	let form = BookingForm::appointment();
	invalid_results(&form.validate(|name| values.get(name).cloned()))
}

// ============================================================================
// Required fields
// ============================================================================

/// Blanking one field yields exactly one error, for that field
#[rstest]
#[case("name", "Please enter your full name.")]
#[case("phone", "Please enter your phone number.")]
#[case("service", "Please select a service.")]
#[case("date", "Please select a preferred date.")]
#[case("time", "Please select a preferred time.")]
fn test_single_missing_field(
	mut valid_values: HashMap<String, String>,
	#[case] field: &str,
	#[case] reason: &str,
) {
	valid_values.insert(field.to_string(), String::new());

	let errors = errors_for(&valid_values);

	assert_eq!(
		errors,
		vec![FieldValidationError {
			field: field.to_string(),
			reason: reason.to_string(),
		}]
	);
}

/// Whitespace-only names count as empty, including a lone byte order mark
#[rstest]
#[case("   ")]
#[case("\u{FEFF}")]
#[case("\u{A0}\t\u{3000}")]
fn test_whitespace_name_is_missing(mut valid_values: HashMap<String, String>, #[case] name: &str) {
	valid_values.insert("name".to_string(), name.to_string());

	let errors = errors_for(&valid_values);

	assert_eq!(
		errors,
		vec![FieldValidationError {
			field: "name".to_string(),
			reason: "Please enter your full name.".to_string(),
		}]
	);
}

/// A missing key behaves like an empty control
#[rstest]
fn test_absent_value_is_missing(mut valid_values: HashMap<String, String>) {
	valid_values.remove("time");

	let errors = errors_for(&valid_values);

	assert_eq!(errors.len(), 1);
	assert_eq!(errors[0].field, "time");
}

/// Every failing field is reported in one pass
#[rstest]
fn test_no_short_circuit(mut valid_values: HashMap<String, String>) {
	valid_values.insert("name".to_string(), String::new());
	valid_values.insert("phone".to_string(), "12345".to_string());
	valid_values.insert("time".to_string(), String::new());

	let fields: Vec<String> = errors_for(&valid_values)
		.into_iter()
		.map(|e| e.field)
		.collect();

	assert_eq!(fields, vec!["name", "phone", "time"]);
}

// ============================================================================
// Phone shapes
// ============================================================================

#[rstest]
#[case("+91 98765 43210")]
#[case("9876543210")]
#[case("+919876543210")]
#[case("\u{FEFF}9876543210")]
fn test_accepted_phone(mut valid_values: HashMap<String, String>, #[case] phone: &str) {
	valid_values.insert("phone".to_string(), phone.to_string());

	assert!(errors_for(&valid_values).is_empty());
}

#[rstest]
#[case("12345")]
#[case("123456789012345")]
#[case("abcdefghij")]
#[case("98765\u{85}43210")]
fn test_rejected_phone(mut valid_values: HashMap<String, String>, #[case] phone: &str) {
	valid_values.insert("phone".to_string(), phone.to_string());

	let errors = errors_for(&valid_values);

	assert_eq!(
		errors,
		vec![FieldValidationError {
			field: "phone".to_string(),
			reason: "Please enter a valid phone number (10-13 digits).".to_string(),
		}]
	);
}
