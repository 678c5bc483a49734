//! Per-field error presentation

use crate::dom::{Element, ElementRef};
use crate::settings::BookingSettings;

/// Shows and clears a control's validation error.
pub trait FieldErrorPresenter {
	/// Marks `control` invalid and shows `message` in its error slot.
	fn show_error(&self, control: &dyn Element, message: &str);

	/// Removes the invalid mark and empties the error slot. Clearing a
	/// control that shows no error changes nothing.
	fn clear_error(&self, control: &dyn Element);
}

/// Presents errors through classes and an error slot in the control's
/// parent, as laid out by the booking form markup:
///
/// ```html
/// <div class="form-group">
///   <input id="phone" name="phone">
///   <span class="form-error"></span>
/// </div>
/// ```
///
/// A control without a slot still gets the invalid class.
#[derive(Debug, Clone)]
pub struct DomErrorPresenter {
	error_selector: String,
	invalid_class: String,
	visible_class: String,
}

impl DomErrorPresenter {
	pub fn new(settings: &BookingSettings) -> Self {
		Self {
			error_selector: settings.error_selector.clone(),
			invalid_class: settings.invalid_class.clone(),
			visible_class: settings.error_visible_class.clone(),
		}
	}

	fn slot(&self, control: &dyn Element) -> Option<ElementRef> {
		control.parent()?.query_selector(&self.error_selector)
	}
}

impl Default for DomErrorPresenter {
	fn default() -> Self {
		Self::new(&BookingSettings::default())
	}
}

impl FieldErrorPresenter for DomErrorPresenter {
	fn show_error(&self, control: &dyn Element, message: &str) {
		control.add_class(&self.invalid_class);
		if let Some(slot) = self.slot(control) {
			slot.set_text_content(message);
			slot.add_class(&self.visible_class);
		}
	}

	fn clear_error(&self, control: &dyn Element) {
		control.remove_class(&self.invalid_class);
		if let Some(slot) = self.slot(control) {
			slot.set_text_content("");
			slot.remove_class(&self.visible_class);
		}
	}
}
