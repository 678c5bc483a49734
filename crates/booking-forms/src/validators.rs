//! Value validators shared by the booking fields
//!
//! ## Phone numbers
//!
//! A phone number is accepted when, after removing whitespace, hyphens and
//! parentheses, it is an optional leading `+` followed by 10 to 13 ASCII
//! digits. Accepted examples: `+91 98765 43210`, `9876543210`,
//! `+919876543210`, `(987) 654-3210`.
//!
//! Only those separators are removed. Dots, slashes and any other punctuation
//! make the number invalid.

use regex::Regex;
use std::sync::OnceLock;

/// Accepted phone shape once separators are removed.
const PHONE_PATTERN: &str = r"^\+?[0-9]{10,13}$";

static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
	PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"))
}

/// Whitespace as browsers define it for form values: the characters matched
/// by a script `\s` class and removed by `String.prototype.trim`.
///
/// This differs from [`char::is_whitespace`]: U+FEFF counts, U+0085 does not.
///
/// # Examples
///
/// ```
/// use booking_forms::is_form_whitespace;
///
/// assert!(is_form_whitespace('\u{FEFF}'));
/// assert!(is_form_whitespace('\u{3000}'));
/// assert!(!is_form_whitespace('\u{85}'));
/// ```
pub fn is_form_whitespace(c: char) -> bool {
	matches!(
		c,
		'\t' | '\n'
			| '\u{0B}'
			| '\u{0C}'
			| '\r'
			| ' '
			| '\u{A0}'
			| '\u{1680}'
			| '\u{2000}'..='\u{200A}'
			| '\u{2028}'
			| '\u{2029}'
			| '\u{202F}'
			| '\u{205F}'
			| '\u{3000}'
			| '\u{FEFF}'
	)
}

/// Removes leading and trailing [form whitespace](is_form_whitespace).
pub fn trim_form_value(value: &str) -> &str {
	value.trim_matches(is_form_whitespace)
}

/// Removes the separators users commonly type inside phone numbers.
///
/// # Examples
///
/// ```
/// use booking_forms::strip_phone_separators;
///
/// assert_eq!(strip_phone_separators("+91 (987) 654-3210"), "+919876543210");
/// assert_eq!(strip_phone_separators("987.654.3210"), "987.654.3210");
/// ```
pub fn strip_phone_separators(phone: &str) -> String {
	phone
		.chars()
		.filter(|&c| !is_form_whitespace(c) && !matches!(c, '-' | '(' | ')'))
		.collect()
}

/// Returns true when `phone` has the accepted shape.
///
/// # Examples
///
/// ```
/// use booking_forms::is_valid_phone;
///
/// assert!(is_valid_phone("+91 98765 43210"));
/// assert!(is_valid_phone("9876543210"));
/// assert!(!is_valid_phone("12345"));
/// ```
pub fn is_valid_phone(phone: &str) -> bool {
	phone_regex().is_match(&strip_phone_separators(phone))
}

/// Phone validator carrying the message shown on failure.
#[derive(Debug, Clone)]
pub struct PhoneValidator {
	message: String,
}

impl PhoneValidator {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	/// Validate a phone value
	///
	/// # Returns
	///
	/// `Ok(())` if the value has the accepted shape, `Err(message)` otherwise
	pub fn validate(&self, value: &str) -> Result<(), String> {
		if is_valid_phone(value) {
			Ok(())
		} else {
			Err(self.message.clone())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("+91 98765 43210")]
	#[case("9876543210")]
	#[case("+919876543210")]
	#[case("(987) 654-3210")]
	#[case("+1234567890123")]
	#[case("\t98765\n43210")]
	#[case("\u{FEFF}9876543210")]
	#[case("98765\u{A0}43210")]
	#[case("98765\u{3000}43210")]
	fn test_accepts_valid_phones(#[case] phone: &str) {
		assert!(is_valid_phone(phone), "expected {phone:?} to be valid");
	}

	#[rstest]
	#[case("12345")]
	#[case("123456789012345")]
	#[case("abcdefghij")]
	#[case("987.654.3210")]
	#[case("+")]
	#[case("++9876543210")]
	#[case("98765+43210")]
	#[case("")]
	#[case("98765\u{85}43210")]
	#[case("98765\u{180E}43210")]
	fn test_rejects_invalid_phones(#[case] phone: &str) {
		assert!(!is_valid_phone(phone), "expected {phone:?} to be invalid");
	}

	#[rstest]
	fn test_non_ascii_digits_are_rejected() {
		// Arabic-Indic digits are Unicode decimal digits but not accepted
		assert!(!is_valid_phone("٩٨٧٦٥٤٣٢١٠"));
	}

	#[rstest]
	fn test_strip_keeps_dots_and_slashes() {
		assert_eq!(strip_phone_separators("98/76 54-32.10"), "98/765432.10");
	}

	#[rstest]
	#[case('\u{FEFF}', true)]
	#[case('\u{0B}', true)]
	#[case('\u{2029}', true)]
	#[case('\u{205F}', true)]
	#[case('\u{85}', false)]
	#[case('\u{180E}', false)]
	#[case('\u{200B}', false)]
	fn test_form_whitespace_set(#[case] c: char, #[case] expected: bool) {
		assert_eq!(is_form_whitespace(c), expected);
	}

	#[rstest]
	fn test_trim_form_value() {
		assert_eq!(trim_form_value("\u{FEFF} Asha Rao\u{3000}"), "Asha Rao");
		assert_eq!(trim_form_value("\u{85}x\u{85}"), "\u{85}x\u{85}");
		assert_eq!(trim_form_value("\u{FEFF}"), "");
	}

	#[rstest]
	fn test_phone_validator_returns_message() {
		let validator = PhoneValidator::new("bad phone");
		assert!(validator.validate("9876543210").is_ok());
		assert_eq!(validator.validate("123"), Err("bad phone".to_string()));
	}
}
