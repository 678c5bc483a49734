//! DOM abstraction layer
//!
//! Behaviors never talk to `web_sys` directly. They see the page through the
//! [`Document`] and [`Element`] traits, which have two implementations:
//!
//! - [`memory::MemoryDocument`]: an in-memory page used by native builds and tests
//! - `web::WebDocument` (wasm32 only): the browser document
//!
//! ## Architecture
//!
//! Listener registration returns an [`EventHandle`]. Dropping the handle
//! removes the listener, so whoever keeps the handle decides how long the
//! binding lives (see [`crate::events::EventRegistry`]).
//!
//! ## Example
//!
//! ```ignore
//! use booking_pages::dom::{Document, EventType};
//! use booking_pages::Callback;
//!
//! let button = document.element_by_id("mobileMenuBtn").unwrap();
//! let handle = button.on(EventType::Click, Callback::new(|_event| {
//!     info_log!("menu toggled");
//! }));
//! ```

pub mod memory;
pub mod selector;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::callback::Callback;

/// Shared handle to a page element.
pub type ElementRef = Rc<dyn Element>;

/// Handler invoked for a dispatched [`Event`].
pub type EventHandler = Callback<Event>;

/// The event kinds the site listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	Click,
	Input,
	Change,
	Submit,
	KeyDown,
	Scroll,
}

impl EventType {
	/// DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			EventType::Click => "click",
			EventType::Input => "input",
			EventType::Change => "change",
			EventType::Submit => "submit",
			EventType::KeyDown => "keydown",
			EventType::Scroll => "scroll",
		}
	}

	/// Parses a DOM event name.
	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"click" => Some(EventType::Click),
			"input" => Some(EventType::Input),
			"change" => Some(EventType::Change),
			"submit" => Some(EventType::Submit),
			"keydown" => Some(EventType::KeyDown),
			"scroll" => Some(EventType::Scroll),
			_ => None,
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A dispatched event as seen by a handler.
///
/// Clones share the default-prevented flag, so a handler further along the
/// propagation path sees what an earlier one did.
#[derive(Clone)]
pub struct Event {
	event_type: EventType,
	target: Option<ElementRef>,
	key: Option<String>,
	default_prevented: Rc<Cell<bool>>,
	prevent_hook: Option<Rc<dyn Fn()>>,
}

impl Event {
	pub fn new(event_type: EventType) -> Self {
		Self {
			event_type,
			target: None,
			key: None,
			default_prevented: Rc::new(Cell::new(false)),
			prevent_hook: None,
		}
	}

	pub fn with_target(mut self, target: ElementRef) -> Self {
		self.target = Some(target);
		self
	}

	/// Sets the key name of a keyboard event (`"Escape"`, `"Enter"`, ...).
	pub fn with_key(mut self, key: impl Into<String>) -> Self {
		self.key = Some(key.into());
		self
	}

	/// Runs `hook` whenever a handler prevents the default action, in
	/// addition to setting the flag. The browser backend uses this to
	/// forward to the native event.
	pub fn with_prevent_hook<F>(mut self, hook: F) -> Self
	where
		F: Fn() + 'static,
	{
		self.prevent_hook = Some(Rc::new(hook));
		self
	}

	pub fn event_type(&self) -> EventType {
		self.event_type
	}

	/// The element the event was dispatched at, if any.
	pub fn target(&self) -> Option<&ElementRef> {
		self.target.as_ref()
	}

	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	pub fn prevent_default(&self) {
		self.default_prevented.set(true);
		if let Some(hook) = &self.prevent_hook {
			hook();
		}
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented.get()
	}
}

impl fmt::Debug for Event {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Event")
			.field("event_type", &self.event_type)
			.field("target", &self.target.as_ref().map(|t| t.id()))
			.field("key", &self.key)
			.field("default_prevented", &self.default_prevented.get())
			.finish()
	}
}

/// RAII guard for a registered listener.
///
/// The listener is removed when the handle is dropped or [`detach`]ed.
///
/// [`detach`]: EventHandle::detach
pub struct EventHandle {
	detach: Option<Box<dyn FnOnce()>>,
}

impl EventHandle {
	pub fn new<F>(detach: F) -> Self
	where
		F: FnOnce() + 'static,
	{
		Self {
			detach: Some(Box::new(detach)),
		}
	}

	/// Removes the listener now.
	pub fn detach(mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl fmt::Debug for EventHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventHandle")
			.field("attached", &self.detach.is_some())
			.finish()
	}
}

/// A page element.
///
/// Mutating methods take `&self`: elements are shared handles onto page
/// state, the same way a DOM node is.
pub trait Element {
	/// The `id` attribute, or an empty string.
	fn id(&self) -> String;

	/// Lowercase tag name.
	fn tag_name(&self) -> String;

	/// Current value of an input, select or textarea. Empty for other elements.
	fn value(&self) -> String;

	fn set_value(&self, value: &str);

	fn has_class(&self, class: &str) -> bool;

	fn add_class(&self, class: &str);

	fn remove_class(&self, class: &str);

	/// Flips `class` and returns whether it is now present.
	fn toggle_class(&self, class: &str) -> bool;

	fn attribute(&self, name: &str) -> Option<String>;

	fn set_attribute(&self, name: &str, value: &str);

	fn text_content(&self) -> String;

	fn set_text_content(&self, text: &str);

	fn is_disabled(&self) -> bool;

	fn set_disabled(&self, disabled: bool);

	/// Checkedness of a checkbox or radio input. Always false for other
	/// elements.
	fn is_checked(&self) -> bool;

	fn set_checked(&self, checked: bool);

	/// Inline style property, or an empty string when unset.
	fn style_property(&self, name: &str) -> String;

	/// Sets an inline style property. An empty value removes it.
	fn set_style_property(&self, name: &str, value: &str);

	fn parent(&self) -> Option<ElementRef>;

	/// This element or its nearest ancestor matching `selector`.
	fn closest(&self, selector: &str) -> Option<ElementRef>;

	/// First descendant matching `selector`.
	fn query_selector(&self, selector: &str) -> Option<ElementRef>;

	/// Every descendant matching `selector`, in document order.
	fn query_selector_all(&self, selector: &str) -> Vec<ElementRef>;

	/// Smoothly scrolls the element to the top of the viewport.
	fn scroll_into_view(&self);

	/// Restores every control inside a form to its default value. No-op on
	/// other elements.
	fn reset(&self);

	/// Adds a listener for `event_type` on this element.
	fn on(&self, event_type: EventType, handler: EventHandler) -> EventHandle;

	fn is_same_node(&self, other: &dyn Element) -> bool;

	fn as_any(&self) -> &dyn Any;
}

/// One element's visibility change.
#[derive(Clone)]
pub struct IntersectionEntry {
	pub target: ElementRef,
	pub is_intersecting: bool,
}

/// Entries delivered to a visibility callback, with the observer that
/// produced them.
#[derive(Clone)]
pub struct IntersectionBatch {
	pub entries: Vec<IntersectionEntry>,
	pub observer: Rc<dyn VisibilityObserver>,
}

/// Watches elements entering and leaving the viewport.
pub trait VisibilityObserver {
	fn observe(&self, element: &dyn Element);

	fn unobserve(&self, element: &dyn Element);

	fn disconnect(&self);
}

/// The page document plus the window-level pieces behaviors need.
pub trait Document {
	fn element_by_id(&self, id: &str) -> Option<ElementRef>;

	fn query_selector(&self, selector: &str) -> Option<ElementRef>;

	fn query_selector_all(&self, selector: &str) -> Vec<ElementRef>;

	fn body(&self) -> Option<ElementRef>;

	/// Vertical scroll offset of the window.
	fn scroll_y(&self) -> f64;

	/// Adds a listener on the document itself. Bubbling events from every
	/// element reach it.
	fn on(&self, event_type: EventType, handler: EventHandler) -> EventHandle;

	/// Adds a listener on the window.
	fn on_window(&self, event_type: EventType, handler: EventHandler) -> EventHandle;

	/// Creates a visibility observer firing at `threshold`, or `None` when
	/// the host has no such facility.
	fn visibility_observer(
		&self,
		threshold: f64,
		callback: Callback<IntersectionBatch>,
	) -> Option<Rc<dyn VisibilityObserver>>;
}
