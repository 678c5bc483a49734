//! Mobile navigation menu

use std::rc::Rc;

use crate::callback::Callback;
use crate::dom::{Document, ElementRef, Event, EventHandle, EventType};
use crate::settings::NavigationSettings;

/// The collapsible link list and its toggle button.
///
/// Open state is the active class on the link list. The toggle mirrors it
/// in its own class and in `aria-expanded`.
pub struct MobileMenu {
	button: ElementRef,
	links: ElementRef,
	active_class: String,
}

impl MobileMenu {
	pub fn new(button: ElementRef, links: ElementRef, active_class: impl Into<String>) -> Self {
		Self {
			button,
			links,
			active_class: active_class.into(),
		}
	}

	pub fn is_open(&self) -> bool {
		self.links.has_class(&self.active_class)
	}

	/// Flips the menu and returns whether it is now open.
	pub fn toggle(&self) -> bool {
		self.links.toggle_class(&self.active_class);
		self.button.toggle_class(&self.active_class);
		let open = self.is_open();
		self.button
			.set_attribute("aria-expanded", if open { "true" } else { "false" });
		open
	}

	pub fn close(&self) {
		self.links.remove_class(&self.active_class);
		self.button.remove_class(&self.active_class);
		self.button.set_attribute("aria-expanded", "false");
	}

	/// Toggles on button clicks, and closes on any document click whose
	/// target is outside every element matching the nav selector.
	pub fn bind(self: &Rc<Self>, document: &dyn Document, settings: &NavigationSettings) -> Vec<EventHandle> {
		let on_toggle = {
			let menu = Rc::downgrade(self);
			Callback::new(move |_event: Event| {
				if let Some(menu) = menu.upgrade() {
					menu.toggle();
				}
			})
		};

		let on_outside_click = {
			let menu = Rc::downgrade(self);
			let nav_selector = settings.nav_selector.clone();
			Callback::new(move |event: Event| {
				let Some(menu) = menu.upgrade() else {
					return;
				};
				let inside_nav = event
					.target()
					.is_none_or(|target| target.closest(&nav_selector).is_some());
				if !inside_nav && menu.is_open() {
					menu.close();
				}
			})
		};

		vec![
			self.button.on(EventType::Click, on_toggle),
			document.on(EventType::Click, on_outside_click),
		]
	}
}
