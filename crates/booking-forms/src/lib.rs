//! Booking form processing and validation
//!
//! This crate provides the platform-independent half of the booking site:
//! - Field definitions for the appointment form (name, phone, service, date, time)
//! - The accepted phone number shape
//! - `BookingForm`, which validates every field in a fixed order without short-circuiting
//! - `FormData`, the flat `name -> value` record captured on a successful submit
//!
//! Nothing here touches the DOM. The browser layer lives in `booking-pages`.

pub mod field;
pub mod fields;
pub mod form;
pub mod form_data;
pub mod validators;

pub use field::{FieldError, FieldResult, FormField};
pub use fields::{CharField, ChoiceField, DateField, PhoneField, iso_date};
pub use form::{
	BookingForm, DATE_FIELD, FieldValidationError, NAME_FIELD, PHONE_FIELD, SERVICE_FIELD, TIME_FIELD,
	ValidationResult, invalid_results,
};
pub use form_data::FormData;
pub use validators::{
	PhoneValidator, is_form_whitespace, is_valid_phone, strip_phone_separators, trim_form_value,
};
