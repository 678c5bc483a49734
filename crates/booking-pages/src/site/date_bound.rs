//! Earliest bookable date

use booking_forms::{DATE_FIELD, DateField};

use crate::clock::Clock;
use crate::dom::Element;

/// Sets the date control's `min` attribute to today, so the date picker
/// refuses past days.
pub fn apply_min_date(control: &dyn Element, clock: &dyn Clock) {
	let field = DateField::new(DATE_FIELD).with_min(clock.today());
	if let Some(min) = field.min_attribute() {
		control.set_attribute("min", &min);
	}
}
