//! Date field for `<input type="date">`

use crate::field::{FieldError, FieldResult, FormField};
use chrono::NaiveDate;

const DEFAULT_REQUIRED_MESSAGE: &str = "Please select a date.";

/// Formats a calendar date the way `<input type="date">` expects (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use booking_forms::fields::iso_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(iso_date(date), "2025-01-01");
/// ```
pub fn iso_date(date: NaiveDate) -> String {
	date.format("%Y-%m-%d").to_string()
}

/// Date field.
///
/// Validation is a presence check. `min` is rendered as the control's `min`
/// attribute so the browser's date picker refuses earlier dates; it is not
/// re-checked here.
#[derive(Debug, Clone)]
pub struct DateField {
	pub name: String,
	pub required: bool,
	pub min: Option<NaiveDate>,
	pub required_message: String,
}

impl DateField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			required: false,
			min: None,
			required_message: DEFAULT_REQUIRED_MESSAGE.to_string(),
		}
	}

	pub fn required_with(mut self, message: impl Into<String>) -> Self {
		self.required = true;
		self.required_message = message.into();
		self
	}

	/// Set the earliest selectable date
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::fields::DateField;
	/// use chrono::NaiveDate;
	///
	/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
	/// let field = DateField::new("date").with_min(today);
	/// assert_eq!(field.min_attribute().as_deref(), Some("2026-10-19"));
	/// ```
	pub fn with_min(mut self, min: NaiveDate) -> Self {
		self.min = Some(min);
		self
	}

	/// Value for the control's `min` attribute, if a lower bound is set.
	pub fn min_attribute(&self) -> Option<String> {
		self.min.map(iso_date)
	}
}

impl FormField for DateField {
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

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_empty_date_is_rejected() {
		let field = DateField::new("date").required_with("Please select a preferred date.");

		assert_eq!(
			field.clean(""),
			Err(FieldError::Required(
				"Please select a preferred date.".to_string()
			))
		);
	}

	#[rstest]
	fn test_past_date_passes_presence_check() {
		// The lower bound is enforced by the date picker
		let min = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
		let field = DateField::new("date")
			.required_with("Please select a preferred date.")
			.with_min(min);

		assert_eq!(field.clean("2025-01-01"), Ok("2025-01-01".to_string()));
	}

	#[rstest]
	#[case(2025, 1, 1, "2025-01-01")]
	#[case(2026, 12, 31, "2026-12-31")]
	#[case(999, 3, 7, "0999-03-07")]
	fn test_iso_date_is_zero_padded(
		#[case] y: i32,
		#[case] m: u32,
		#[case] d: u32,
		#[case] expected: &str,
	) {
		let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
		assert_eq!(iso_date(date), expected);
	}

	#[rstest]
	fn test_min_attribute_absent_without_bound() {
		assert_eq!(DateField::new("date").min_attribute(), None);
	}
}
