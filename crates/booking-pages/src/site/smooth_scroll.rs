//! Smooth scrolling to in-page anchors

use std::rc::{Rc, Weak};

use crate::callback::Callback;
use crate::dom::{Document, ElementRef, Event, EventHandle, EventType};
use crate::site::menu::MobileMenu;

/// Smooth scrolling for links to sections of the same page.
pub struct SmoothScroll {
	document: Weak<dyn Document>,
	menu: Weak<MobileMenu>,
}

impl SmoothScroll {
	pub fn new(document: &Rc<dyn Document>, menu: &Rc<MobileMenu>) -> Self {
		Self {
			document: Rc::downgrade(document),
			menu: Rc::downgrade(menu),
		}
	}

	/// Follows a click on an anchor pointing at `href`.
	///
	/// A bare `#` is left to the browser. Any other fragment has its default
	/// navigation prevented; if an element with that id exists it is
	/// scrolled into view and the mobile menu is closed.
	///
	/// Returns whether a target was scrolled to.
	pub fn follow(&self, href: &str, event: &Event) -> bool {
		let Some(id) = href.strip_prefix('#') else {
			return false;
		};
		if id.is_empty() {
			return false;
		}
		event.prevent_default();

		let Some(document) = self.document.upgrade() else {
			return false;
		};
		let Some(target) = document.element_by_id(id) else {
			debug_log!("No element for anchor {}", href);
			return false;
		};
		target.scroll_into_view();
		if let Some(menu) = self.menu.upgrade() {
			menu.close();
		}
		true
	}

	/// Attaches a click handler to each of `anchors`. The `href` is read at
	/// click time.
	pub fn bind(self: &Rc<Self>, anchors: &[ElementRef]) -> Vec<EventHandle> {
		anchors
			.iter()
			.map(|anchor| {
				let behavior = Rc::downgrade(self);
				let source = Rc::clone(anchor);
				anchor.on(
					EventType::Click,
					Callback::new(move |event: Event| {
						let Some(behavior) = behavior.upgrade() else {
							return;
						};
						if let Some(href) = source.attribute("href") {
							behavior.follow(&href, &event);
						}
					}),
				)
			})
			.collect()
	}
}
