//! Navbar scroll style

use std::rc::Rc;

use crate::callback::Callback;
use crate::dom::{Document, ElementRef, Event, EventHandle, EventType};
use crate::settings::NavigationSettings;

/// Adds the scrolled class to the navbar once the window is scrolled past a
/// threshold, and removes it when scrolled back.
pub struct NavbarScroll {
	navbar: ElementRef,
	scrolled_class: String,
	threshold: f64,
}

impl NavbarScroll {
	pub fn new(navbar: ElementRef, settings: &NavigationSettings) -> Self {
		Self {
			navbar,
			scrolled_class: settings.scrolled_class.clone(),
			threshold: settings.scroll_threshold,
		}
	}

	/// Applies the style for the scroll offset `scroll_y`.
	pub fn update(&self, scroll_y: f64) {
		if scroll_y > self.threshold {
			self.navbar.add_class(&self.scrolled_class);
		} else {
			self.navbar.remove_class(&self.scrolled_class);
		}
	}

	pub fn bind(self: &Rc<Self>, document: &Rc<dyn Document>) -> EventHandle {
		let navbar = Rc::downgrade(self);
		let source = Rc::downgrade(document);
		document.on_window(
			EventType::Scroll,
			Callback::new(move |_event: Event| {
				if let (Some(navbar), Some(document)) = (navbar.upgrade(), source.upgrade()) {
					navbar.update(document.scroll_y());
				}
			}),
		)
	}
}
