//! Confirmation modal
//!
//! The modal opens when a booking completes. It closes on its close button,
//! on a click on the backdrop (the modal container itself, not its content)
//! and on the close key while it is open. While it is open the page body
//! does not scroll.

use std::rc::{Rc, Weak};

use crate::callback::Callback;
use crate::dom::{Document, ElementRef, Event, EventHandle, EventType};
use crate::settings::ModalSettings;

/// Open/close lifecycle of a modal dialog.
pub trait ModalLifecycle {
	fn open(&self);

	/// Closes the modal. Closing a closed modal does nothing.
	fn close(&self);

	fn is_open(&self) -> bool;
}

/// Modal shown by toggling a class on its container.
pub struct DomModal {
	modal: ElementRef,
	body: Option<ElementRef>,
	active_class: String,
}

impl DomModal {
	pub fn new(modal: ElementRef, body: Option<ElementRef>, active_class: impl Into<String>) -> Self {
		Self {
			modal,
			body,
			active_class: active_class.into(),
		}
	}

	pub fn element(&self) -> &ElementRef {
		&self.modal
	}
}

impl ModalLifecycle for DomModal {
	fn open(&self) {
		self.modal.add_class(&self.active_class);
		if let Some(body) = &self.body {
			body.set_style_property("overflow", "hidden");
		}
	}

	fn close(&self) {
		if !self.is_open() {
			return;
		}
		self.modal.remove_class(&self.active_class);
		if let Some(body) = &self.body {
			body.set_style_property("overflow", "");
		}
	}

	fn is_open(&self) -> bool {
		self.modal.has_class(&self.active_class)
	}
}

fn close_handler(modal: &Rc<DomModal>, should_close: impl Fn(&DomModal, &Event) -> bool + 'static) -> Callback<Event> {
	let modal: Weak<DomModal> = Rc::downgrade(modal);
	Callback::new(move |event: Event| {
		if let Some(modal) = modal.upgrade()
			&& should_close(&modal, &event)
		{
			modal.close();
		}
	})
}

/// Attaches the three close triggers.
///
/// # Arguments
///
/// - `modal`: The modal to close
/// - `close_button`: Element whose click closes the modal
/// - `document`: Receives the key presses
/// - `settings`: Supplies the close key
pub fn bind_close_triggers(
	modal: &Rc<DomModal>,
	close_button: &ElementRef,
	document: &dyn Document,
	settings: &ModalSettings,
) -> Vec<EventHandle> {
	let close_key = settings.close_key.clone();
	vec![
		close_button.on(EventType::Click, close_handler(modal, |_, _| true)),
		modal.element().on(
			EventType::Click,
			close_handler(modal, |modal, event| {
				event
					.target()
					.is_some_and(|target| target.is_same_node(modal.element().as_ref()))
			}),
		),
		document.on(
			EventType::KeyDown,
			close_handler(modal, move |modal, event| {
				event.key() == Some(close_key.as_str()) && modal.is_open()
			}),
		),
	]
}
