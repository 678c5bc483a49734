//! Field trait and shared field types

/// Error produced when a single field fails to clean.
///
/// The message carried by each variant is the text shown to the user next to
/// the control, so it is rendered verbatim by `Display`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
	/// The field has no value.
	#[error("{0}")]
	Required(String),
	/// The field has a value in the wrong shape.
	#[error("{0}")]
	Invalid(String),
}

impl FieldError {
	/// Returns the user-facing message.
	pub fn message(&self) -> &str {
		match self {
			FieldError::Required(msg) | FieldError::Invalid(msg) => msg,
		}
	}
}

pub type FieldResult<T> = Result<T, FieldError>;

/// A named field of the booking form.
pub trait FormField {
	fn name(&self) -> &str;

	/// Checks the raw control value and returns the cleaned value.
	fn clean(&self, value: &str) -> FieldResult<String>;
}
