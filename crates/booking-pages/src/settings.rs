//! Site settings
//!
//! Element ids, selectors, class names and timings used by the behaviors.
//! Every value has a default matching the stock page markup, so a page only
//! needs to override what it changed.
//!
//! ## Example
//!
//! ```
//! use booking_pages::SiteSettings;
//!
//! let settings = SiteSettings::from_json(r#"{
//!     "navigation": { "scroll_threshold": 80.0 },
//!     "booking": { "submit_delay_ms": 250 }
//! }"#).unwrap();
//!
//! assert_eq!(settings.navigation.scroll_threshold, 80.0);
//! assert_eq!(settings.navigation.navbar_id, "navbar");
//! assert_eq!(settings.booking.submit_delay().as_millis(), 250);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// All site settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
	pub navigation: NavigationSettings,
	pub reveal: RevealSettings,
	pub booking: BookingSettings,
	pub modal: ModalSettings,
}

impl SiteSettings {
	/// Parses settings from JSON. Missing keys keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, PageError> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Mobile menu, navbar and in-page anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
	/// Id of the menu toggle button
	pub menu_button_id: String,
	/// Id of the navigation link list
	pub nav_links_id: String,
	/// Id of the navbar
	pub navbar_id: String,
	/// Clicks inside an element matching this selector keep the menu open
	pub nav_selector: String,
	/// Class marking the open menu and its toggle
	pub active_class: String,
	/// Class added to the navbar once the page is scrolled
	pub scrolled_class: String,
	/// Scroll offset in pixels above which the navbar is styled as scrolled
	pub scroll_threshold: f64,
	/// Anchors that scroll within the page
	pub anchor_selector: String,
}

impl Default for NavigationSettings {
	fn default() -> Self {
		Self {
			menu_button_id: "mobileMenuBtn".to_string(),
			nav_links_id: "navLinks".to_string(),
			navbar_id: "navbar".to_string(),
			nav_selector: "nav".to_string(),
			active_class: "active".to_string(),
			scrolled_class: "scrolled".to_string(),
			scroll_threshold: 50.0,
			anchor_selector: r##"a[href^="#"]"##.to_string(),
		}
	}
}

/// Reveal-on-scroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
	pub selector: String,
	pub visible_class: String,
	/// Fraction of the element that must be visible before it is revealed
	pub threshold: f64,
}

impl Default for RevealSettings {
	fn default() -> Self {
		Self {
			selector: ".reveal".to_string(),
			visible_class: "visible".to_string(),
			threshold: 0.15,
		}
	}
}

/// Booking form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
	pub form_id: String,
	/// Submit control, looked up inside the form
	pub submit_selector: String,
	/// Error slot, looked up among the descendants of a control's parent
	pub error_selector: String,
	pub invalid_class: String,
	/// Class that shows a filled error slot
	pub error_visible_class: String,
	/// Submit control label while a submission is in flight
	pub working_label: String,
	/// Simulated submission time
	pub submit_delay_ms: u64,
	/// Controls whose edits clear their error
	pub control_selector: String,
	/// Element id per field name, for pages whose ids differ from the field names
	pub field_ids: HashMap<String, String>,
}

impl BookingSettings {
	pub fn submit_delay(&self) -> Duration {
		Duration::from_millis(self.submit_delay_ms)
	}

	/// Element id of the control for `field`.
	///
	/// # Examples
	///
	/// ```
	/// use booking_pages::settings::BookingSettings;
	///
	/// let mut settings = BookingSettings::default();
	/// assert_eq!(settings.field_id("phone"), "phone");
	///
	/// settings.field_ids.insert("phone".to_string(), "mobile".to_string());
	/// assert_eq!(settings.field_id("phone"), "mobile");
	/// ```
	pub fn field_id<'a>(&'a self, field: &'a str) -> &'a str {
		self.field_ids.get(field).map(String::as_str).unwrap_or(field)
	}
}

impl Default for BookingSettings {
	fn default() -> Self {
		Self {
			form_id: "bookingForm".to_string(),
			submit_selector: ".form-submit".to_string(),
			error_selector: ".form-error".to_string(),
			invalid_class: "invalid".to_string(),
			error_visible_class: "visible".to_string(),
			working_label: "Submitting...".to_string(),
			submit_delay_ms: 500,
			control_selector: "input, select, textarea".to_string(),
			field_ids: HashMap::new(),
		}
	}
}

/// Confirmation modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalSettings {
	pub modal_id: String,
	pub close_selector: String,
	pub active_class: String,
	/// Key that closes the open modal
	pub close_key: String,
}

impl Default for ModalSettings {
	fn default() -> Self {
		Self {
			modal_id: "successModal".to_string(),
			close_selector: ".modal-close".to_string(),
			active_class: "active".to_string(),
			close_key: "Escape".to_string(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_match_stock_markup() {
		let settings = SiteSettings::default();

		assert_eq!(settings.booking.form_id, "bookingForm");
		assert_eq!(settings.booking.submit_delay(), Duration::from_millis(500));
		assert_eq!(settings.booking.working_label, "Submitting...");
		assert_eq!(settings.modal.modal_id, "successModal");
		assert_eq!(settings.navigation.scroll_threshold, 50.0);
		assert_eq!(settings.navigation.anchor_selector, r##"a[href^="#"]"##);
		assert_eq!(settings.reveal.threshold, 0.15);
	}

	#[rstest]
	fn test_empty_json_gives_defaults() {
		assert_eq!(SiteSettings::from_json("{}").unwrap(), SiteSettings::default());
	}

	#[rstest]
	fn test_partial_override_keeps_other_defaults() {
		let settings = SiteSettings::from_json(
			r#"{"modal": {"close_key": "Esc"}, "booking": {"field_ids": {"name": "fullName"}}}"#,
		)
		.unwrap();

		assert_eq!(settings.modal.close_key, "Esc");
		assert_eq!(settings.modal.modal_id, "successModal");
		assert_eq!(settings.booking.field_id("name"), "fullName");
		assert_eq!(settings.booking.field_id("time"), "time");
	}

	#[rstest]
	#[case("not json")]
	#[case(r#"{"booking": {"submit_delay_ms": "soon"}}"#)]
	fn test_invalid_json_is_settings_error(#[case] json: &str) {
		assert!(matches!(SiteSettings::from_json(json), Err(PageError::Settings(_))));
	}

	#[rstest]
	fn test_settings_round_trip_through_json() {
		let settings = SiteSettings::default();
		let json = serde_json::to_string(&settings).unwrap();
		assert_eq!(SiteSettings::from_json(&json).unwrap(), settings);
	}
}
