//! Listener bookkeeping
//!
//! Every listener the site attaches is kept here under a key naming the
//! element (or `"document"`/`"window"`). Dropping the registry, or
//! unregistering a key, detaches the listeners.

use std::collections::HashMap;

use crate::dom::EventHandle;

/// Registry of live event handles.
#[derive(Debug, Default)]
pub struct EventRegistry {
	/// Event handles indexed by owner key.
	handles: HashMap<String, Vec<EventHandle>>,
}

impl EventRegistry {
	/// Creates a new event registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers an event handle under `key`.
	pub fn register(&mut self, key: impl Into<String>, handle: EventHandle) {
		self.handles.entry(key.into()).or_default().push(handle);
	}

	/// Registers several handles under `key`.
	pub fn register_all(&mut self, key: impl Into<String>, handles: impl IntoIterator<Item = EventHandle>) {
		self.handles.entry(key.into()).or_default().extend(handles);
	}

	/// Detaches every handle registered under `key`.
	pub fn unregister(&mut self, key: &str) {
		self.handles.remove(key);
	}

	/// Detaches every registered handle.
	pub fn clear(&mut self) {
		self.handles.clear();
	}

	/// Returns the number of registered keys.
	pub fn len(&self) -> usize {
		self.handles.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.handles.is_empty()
	}

	/// Number of handles registered under `key`.
	pub fn handle_count(&self, key: &str) -> usize {
		self.handles.get(key).map_or(0, Vec::len)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;
	use std::rc::Rc;

	fn counting_handle(detached: &Rc<Cell<u32>>) -> EventHandle {
		let detached = Rc::clone(detached);
		EventHandle::new(move || detached.set(detached.get() + 1))
	}

	#[rstest]
	fn test_event_registry_new() {
		let registry = EventRegistry::new();
		assert!(registry.is_empty());
		assert_eq!(registry.len(), 0);
	}

	#[rstest]
	fn test_unregister_detaches_only_that_key() {
		// Arrange
		let detached = Rc::new(Cell::new(0));
		let mut registry = EventRegistry::new();
		registry.register("navbar", counting_handle(&detached));
		registry.register_all("bookingForm", [counting_handle(&detached), counting_handle(&detached)]);

		// Act
		registry.unregister("bookingForm");

		// Assert
		assert_eq!(detached.get(), 2);
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.handle_count("navbar"), 1);
		assert_eq!(registry.handle_count("bookingForm"), 0);
	}

	#[rstest]
	fn test_clear_detaches_everything() {
		let detached = Rc::new(Cell::new(0));
		let mut registry = EventRegistry::new();
		registry.register("document", counting_handle(&detached));
		registry.register("window", counting_handle(&detached));

		registry.clear();

		assert_eq!(detached.get(), 2);
		assert!(registry.is_empty());
	}
}
