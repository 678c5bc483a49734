pub mod char_field;
pub mod choice_field;
pub mod date_field;
pub mod phone_field;

pub use char_field::CharField;
pub use choice_field::ChoiceField;
pub use date_field::{DateField, iso_date};
pub use phone_field::PhoneField;
