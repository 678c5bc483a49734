//! In-memory document
//!
//! A small DOM that behaves enough like the browser's for the site behaviors
//! to run natively: element tree, attributes and classes, control values
//! with defaults, inline style, bubbling event dispatch, window scrolling and
//! a scriptable visibility observer.
//!
//! The `click`/`type_text`/`select_option`/`press_key`/`scroll_to` helpers
//! stand in for a user. They follow the browser's default actions where the
//! site depends on them: clicking a submit button submits its form, a
//! disabled control swallows clicks, clicking a checkbox or radio checks it
//! and fires `change`, and an anchor click that nobody
//! prevented is recorded as a navigation.
//!
//! ## Example
//!
//! ```
//! use booking_pages::dom::memory::MemoryDocument;
//! use booking_pages::dom::Document;
//!
//! let doc = MemoryDocument::new();
//! let body = doc.body().unwrap();
//! let nav = doc.append(&body, "nav", &[("id", "navbar")]);
//! let link = doc.append(&nav, "a", &[("href", "#about")]);
//!
//! assert!(link.closest("nav").is_some());
//! assert_eq!(doc.element_by_id("navbar").unwrap().tag_name(), "nav");
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::callback::Callback;
use crate::dom::selector::Selector;
use crate::dom::{
	Document, Element, ElementRef, Event, EventHandle, EventHandler, EventType, IntersectionBatch,
	IntersectionEntry, VisibilityObserver,
};

const BODY: usize = 0;

#[derive(Debug, Default)]
struct NodeData {
	tag: String,
	attributes: Vec<(String, String)>,
	value: String,
	default_value: String,
	text: String,
	disabled: bool,
	checked: bool,
	default_checked: bool,
	style: Vec<(String, String)>,
	parent: Option<usize>,
	children: Vec<usize>,
}

impl NodeData {
	fn attribute(&self, name: &str) -> Option<String> {
		self.attributes
			.iter()
			.find(|(k, _)| k == name)
			.map(|(_, v)| v.clone())
	}

	fn set_attribute(&mut self, name: &str, value: &str) {
		match self.attributes.iter_mut().find(|(k, _)| k == name) {
			Some(entry) => entry.1 = value.to_string(),
			None => self.attributes.push((name.to_string(), value.to_string())),
		}
	}

	fn classes(&self) -> Vec<String> {
		self.attribute("class")
			.map(|c| c.split_whitespace().map(str::to_string).collect())
			.unwrap_or_default()
	}

	fn set_classes(&mut self, classes: &[String]) {
		self.set_attribute("class", &classes.join(" "));
	}

	fn is_control(&self) -> bool {
		matches!(self.tag.as_str(), "input" | "select" | "textarea")
	}

	fn is_checkable(&self) -> bool {
		self.tag == "input"
			&& self
				.attribute("type")
				.is_some_and(|t| t.eq_ignore_ascii_case("checkbox") || t.eq_ignore_ascii_case("radio"))
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerTarget {
	Node(usize),
	Document,
	Window,
}

struct Listener {
	id: u64,
	target: ListenerTarget,
	event_type: EventType,
	handler: EventHandler,
}

struct DocState {
	nodes: RefCell<Vec<NodeData>>,
	listeners: RefCell<Vec<Listener>>,
	next_listener: Cell<u64>,
	scroll_y: Cell<f64>,
	observers_supported: Cell<bool>,
	observers: RefCell<Vec<Weak<MemoryObserver>>>,
	scrolled_into_view: RefCell<Vec<usize>>,
	navigations: RefCell<Vec<String>>,
}

/// An in-memory [`Document`]. Clones share the same page.
#[derive(Clone)]
pub struct MemoryDocument {
	state: Rc<DocState>,
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDocument {
	/// Creates a page holding an empty `<body>`.
	pub fn new() -> Self {
		let body = NodeData {
			tag: "body".to_string(),
			..NodeData::default()
		};
		Self {
			state: Rc::new(DocState {
				nodes: RefCell::new(vec![body]),
				listeners: RefCell::new(Vec::new()),
				next_listener: Cell::new(0),
				scroll_y: Cell::new(0.0),
				observers_supported: Cell::new(true),
				observers: RefCell::new(Vec::new()),
				scrolled_into_view: RefCell::new(Vec::new()),
				navigations: RefCell::new(Vec::new()),
			}),
		}
	}

	fn element(&self, index: usize) -> ElementRef {
		Rc::new(MemoryElement {
			state: Rc::clone(&self.state),
			index,
		})
	}

	/// Index of `element` if it belongs to this document.
	fn index_of(&self, element: &dyn Element) -> Option<usize> {
		element
			.as_any()
			.downcast_ref::<MemoryElement>()
			.filter(|e| Rc::ptr_eq(&e.state, &self.state))
			.map(|e| e.index)
	}

	/// Creates a detached element.
	pub fn create_element(&self, tag: &str) -> ElementRef {
		let mut nodes = self.state.nodes.borrow_mut();
		nodes.push(NodeData {
			tag: tag.to_ascii_lowercase(),
			..NodeData::default()
		});
		let index = nodes.len() - 1;
		drop(nodes);
		self.element(index)
	}

	/// Moves `child` to the end of `parent`'s children.
	pub fn append_child(&self, parent: &ElementRef, child: &ElementRef) {
		let (Some(parent), Some(child)) = (self.index_of(parent.as_ref()), self.index_of(child.as_ref()))
		else {
			return;
		};
		let mut nodes = self.state.nodes.borrow_mut();
		if let Some(old) = nodes[child].parent {
			nodes[old].children.retain(|&c| c != child);
		}
		nodes[child].parent = Some(parent);
		nodes[parent].children.push(child);
	}

	/// Creates an element with `attributes` and appends it to `parent`.
	///
	/// A `value` attribute also becomes the control's default value, as it
	/// does in HTML.
	pub fn append(&self, parent: &ElementRef, tag: &str, attributes: &[(&str, &str)]) -> ElementRef {
		let element = self.create_element(tag);
		for (name, value) in attributes {
			element.set_attribute(name, value);
		}
		self.append_child(parent, &element);
		element
	}

	fn descendants(&self, root: usize) -> Vec<usize> {
		let nodes = self.state.nodes.borrow();
		let mut out = Vec::new();
		let mut stack: Vec<usize> = nodes[root].children.iter().rev().copied().collect();
		while let Some(index) = stack.pop() {
			out.push(index);
			stack.extend(nodes[index].children.iter().rev().copied());
		}
		out
	}

	fn matches(&self, index: usize, selector: &Selector) -> bool {
		let nodes = self.state.nodes.borrow();
		let node = &nodes[index];
		selector.matches(&node.tag, |name| node.attribute(name))
	}

	fn select_all(&self, root: usize, selector: &str) -> Vec<ElementRef> {
		let Some(selector) = Selector::parse(selector) else {
			return Vec::new();
		};
		self.descendants(root)
			.into_iter()
			.filter(|&index| self.matches(index, &selector))
			.map(|index| self.element(index))
			.collect()
	}

	fn ancestors_or_self(&self, index: usize) -> Vec<usize> {
		let nodes = self.state.nodes.borrow();
		let mut chain = vec![index];
		let mut current = nodes[index].parent;
		while let Some(parent) = current {
			chain.push(parent);
			current = nodes[parent].parent;
		}
		chain
	}

	fn add_listener(&self, target: ListenerTarget, event_type: EventType, handler: EventHandler) -> EventHandle {
		add_listener(&self.state, target, event_type, handler)
	}

	/// Delivers `event` to its target, each ancestor, the document and
	/// finally the window. Scroll events go to the window only.
	fn dispatch(&self, target: Option<usize>, event: &Event) {
		let mut path: Vec<ListenerTarget> = Vec::new();
		if event.event_type() != EventType::Scroll {
			if let Some(index) = target {
				path.extend(
					self.ancestors_or_self(index)
						.into_iter()
						.map(ListenerTarget::Node),
				);
			}
			path.push(ListenerTarget::Document);
		}
		path.push(ListenerTarget::Window);

		for stage in path {
			let handlers: Vec<EventHandler> = self
				.state
				.listeners
				.borrow()
				.iter()
				.filter(|l| l.target == stage && l.event_type == event.event_type())
				.map(|l| l.handler.clone())
				.collect();
			for handler in handlers {
				handler.call(event.clone());
			}
		}
	}

	fn fire(&self, index: usize, event_type: EventType) -> Event {
		let event = Event::new(event_type).with_target(self.element(index));
		self.dispatch(Some(index), &event);
		event
	}

	/// Clicks `element` the way a user would.
	///
	/// Returns the dispatched click event, or `None` when the element is a
	/// disabled control and the click was swallowed.
	pub fn click(&self, element: &ElementRef) -> Option<Event> {
		let index = self.index_of(element.as_ref())?;
		if element.is_disabled() {
			return None;
		}

		let checkable = self.state.nodes.borrow()[index].is_checkable();
		if checkable {
			return Some(self.click_checkable(index, element));
		}

		let event = self.fire(index, EventType::Click);
		if event.default_prevented() {
			return Some(event);
		}

		let tag = element.tag_name();
		if tag == "button" && element.attribute("type").as_deref().unwrap_or("submit") == "submit" {
			if let Some(form) = element.closest("form") {
				self.submit(&form);
			}
		} else if tag == "a"
			&& let Some(href) = element.attribute("href")
		{
			self.state.navigations.borrow_mut().push(href);
		}
		Some(event)
	}

	/// Checks a checkbox (toggling it) or a radio (unchecking the other
	/// radios of its group) before the click is dispatched, as browsers do.
	/// A prevented click restores the previous state; otherwise `change`
	/// follows.
	fn click_checkable(&self, index: usize, element: &ElementRef) -> Event {
		let is_radio = element
			.attribute("type")
			.is_some_and(|t| t.eq_ignore_ascii_case("radio"));
		let group = self.radio_group(index, element);
		let was_checked: Vec<(usize, bool)> = {
			let nodes = self.state.nodes.borrow();
			group.iter().map(|&i| (i, nodes[i].checked)).collect()
		};

		{
			let mut nodes = self.state.nodes.borrow_mut();
			if is_radio {
				for &i in &group {
					nodes[i].checked = false;
				}
				nodes[index].checked = true;
			} else {
				nodes[index].checked = !nodes[index].checked;
			}
		}

		let event = self.fire(index, EventType::Click);
		if event.default_prevented() {
			let mut nodes = self.state.nodes.borrow_mut();
			for (i, checked) in was_checked {
				nodes[i].checked = checked;
			}
			return event;
		}
		self.fire(index, EventType::Change);
		event
	}

	/// `index` plus, for a named radio inside a form, every radio of the same
	/// name in that form.
	fn radio_group(&self, index: usize, element: &ElementRef) -> Vec<usize> {
		let name = element.attribute("name").filter(|n| !n.is_empty());
		let is_radio = element
			.attribute("type")
			.is_some_and(|t| t.eq_ignore_ascii_case("radio"));
		let (Some(name), true, Some(form)) = (name, is_radio, element.closest("form")) else {
			return vec![index];
		};
		let Some(form) = self.index_of(form.as_ref()) else {
			return vec![index];
		};
		let mut group: Vec<usize> = self
			.descendants(form)
			.into_iter()
			.filter(|&i| {
				let nodes = self.state.nodes.borrow();
				nodes[i].is_checkable()
					&& nodes[i].attribute("type").is_some_and(|t| t.eq_ignore_ascii_case("radio"))
					&& nodes[i].attribute("name").as_deref() == Some(name.as_str())
			})
			.collect();
		if !group.contains(&index) {
			group.push(index);
		}
		group
	}

	/// Submits `form`. If no handler prevents it, the submission is recorded
	/// as a navigation to the form's `action` (or `"submit"`).
	pub fn submit(&self, form: &ElementRef) -> Option<Event> {
		let index = self.index_of(form.as_ref())?;
		let event = self.fire(index, EventType::Submit);
		if !event.default_prevented() {
			let action = form.attribute("action").unwrap_or_else(|| "submit".to_string());
			self.state.navigations.borrow_mut().push(action);
		}
		Some(event)
	}

	/// Replaces a control's value and fires `input`.
	pub fn type_text(&self, element: &ElementRef, text: &str) {
		let Some(index) = self.index_of(element.as_ref()) else {
			return;
		};
		element.set_value(text);
		self.fire(index, EventType::Input);
	}

	/// Picks an option of a select and fires `change`.
	pub fn select_option(&self, element: &ElementRef, value: &str) {
		let Some(index) = self.index_of(element.as_ref()) else {
			return;
		};
		element.set_value(value);
		self.fire(index, EventType::Change);
	}

	/// Presses `key` with focus on the body.
	pub fn press_key(&self, key: &str) -> Event {
		let event = Event::new(EventType::KeyDown)
			.with_target(self.element(BODY))
			.with_key(key);
		self.dispatch(Some(BODY), &event);
		event
	}

	/// Scrolls the window to `y` and fires `scroll`.
	pub fn scroll_to(&self, y: f64) {
		self.state.scroll_y.set(y);
		self.dispatch(None, &Event::new(EventType::Scroll));
	}

	/// Ids of the elements scrolled into view so far, oldest first.
	pub fn scrolled_into_view(&self) -> Vec<String> {
		let nodes = self.state.nodes.borrow();
		self.state
			.scrolled_into_view
			.borrow()
			.iter()
			.map(|&i| nodes[i].attribute("id").unwrap_or_default())
			.collect()
	}

	/// Navigations that were not prevented, oldest first.
	pub fn navigations(&self) -> Vec<String> {
		self.state.navigations.borrow().clone()
	}

	/// Number of live listeners, across elements, document and window.
	pub fn listener_count(&self) -> usize {
		self.state.listeners.borrow().len()
	}

	/// Makes [`Document::visibility_observer`] return `None`, like a
	/// browser without `IntersectionObserver`.
	pub fn set_visibility_observers_supported(&self, supported: bool) {
		self.state.observers_supported.set(supported);
	}

	/// Reports a visibility change of `element` to every observer watching it.
	pub fn intersect(&self, element: &ElementRef, is_intersecting: bool) {
		let Some(index) = self.index_of(element.as_ref()) else {
			return;
		};
		let observers: Vec<Rc<MemoryObserver>> = self
			.state
			.observers
			.borrow()
			.iter()
			.filter_map(Weak::upgrade)
			.filter(|o| o.observed.borrow().contains(&index))
			.collect();
		for observer in observers {
			let batch = IntersectionBatch {
				entries: vec![IntersectionEntry {
					target: self.element(index),
					is_intersecting,
				}],
				observer: Rc::clone(&observer) as Rc<dyn VisibilityObserver>,
			};
			observer.callback.call(batch);
		}
	}

	/// Whether any live observer is watching `element`.
	pub fn is_observed(&self, element: &ElementRef) -> bool {
		let Some(index) = self.index_of(element.as_ref()) else {
			return false;
		};
		self.state
			.observers
			.borrow()
			.iter()
			.filter_map(Weak::upgrade)
			.any(|o| o.observed.borrow().contains(&index))
	}
}

fn add_listener(
	state: &Rc<DocState>,
	target: ListenerTarget,
	event_type: EventType,
	handler: EventHandler,
) -> EventHandle {
	let id = state.next_listener.get();
	state.next_listener.set(id + 1);
	state.listeners.borrow_mut().push(Listener {
		id,
		target,
		event_type,
		handler,
	});

	let weak = Rc::downgrade(state);
	EventHandle::new(move || {
		if let Some(state) = weak.upgrade() {
			state.listeners.borrow_mut().retain(|l| l.id != id);
		}
	})
}

impl Document for MemoryDocument {
	fn element_by_id(&self, id: &str) -> Option<ElementRef> {
		let found = std::iter::once(BODY)
			.chain(self.descendants(BODY))
			.find(|&i| self.state.nodes.borrow()[i].attribute("id").as_deref() == Some(id));
		found.map(|i| self.element(i))
	}

	fn query_selector(&self, selector: &str) -> Option<ElementRef> {
		self.query_selector_all(selector).into_iter().next()
	}

	fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
		let Some(parsed) = Selector::parse(selector) else {
			return Vec::new();
		};
		let mut found = Vec::new();
		if self.matches(BODY, &parsed) {
			found.push(self.element(BODY));
		}
		found.extend(self.select_all(BODY, selector));
		found
	}

	fn body(&self) -> Option<ElementRef> {
		Some(self.element(BODY))
	}

	fn scroll_y(&self) -> f64 {
		self.state.scroll_y.get()
	}

	fn on(&self, event_type: EventType, handler: EventHandler) -> EventHandle {
		self.add_listener(ListenerTarget::Document, event_type, handler)
	}

	fn on_window(&self, event_type: EventType, handler: EventHandler) -> EventHandle {
		self.add_listener(ListenerTarget::Window, event_type, handler)
	}

	fn visibility_observer(
		&self,
		_threshold: f64,
		callback: Callback<IntersectionBatch>,
	) -> Option<Rc<dyn VisibilityObserver>> {
		if !self.state.observers_supported.get() {
			return None;
		}
		let observer = Rc::new(MemoryObserver {
			observed: RefCell::new(Vec::new()),
			callback,
		});
		self.state.observers.borrow_mut().push(Rc::downgrade(&observer));
		Some(observer)
	}
}

/// Element of a [`MemoryDocument`].
pub struct MemoryElement {
	state: Rc<DocState>,
	index: usize,
}

impl MemoryElement {
	fn doc(&self) -> MemoryDocument {
		MemoryDocument {
			state: Rc::clone(&self.state),
		}
	}

	fn with_node<R>(&self, f: impl FnOnce(&NodeData) -> R) -> R {
		f(&self.state.nodes.borrow()[self.index])
	}

	fn with_node_mut<R>(&self, f: impl FnOnce(&mut NodeData) -> R) -> R {
		f(&mut self.state.nodes.borrow_mut()[self.index])
	}
}

impl Element for MemoryElement {
	fn id(&self) -> String {
		self.attribute("id").unwrap_or_default()
	}

	fn tag_name(&self) -> String {
		self.with_node(|n| n.tag.clone())
	}

	fn value(&self) -> String {
		self.with_node(|n| {
			if n.is_checkable() && n.attribute("value").is_none() {
				"on".to_string()
			} else if n.is_control() {
				n.value.clone()
			} else {
				String::new()
			}
		})
	}

	fn set_value(&self, value: &str) {
		self.with_node_mut(|n| {
			if n.is_control() {
				n.value = value.to_string();
			}
		});
	}

	fn has_class(&self, class: &str) -> bool {
		self.with_node(|n| n.classes().iter().any(|c| c == class))
	}

	fn add_class(&self, class: &str) {
		self.with_node_mut(|n| {
			let mut classes = n.classes();
			if !classes.iter().any(|c| c == class) {
				classes.push(class.to_string());
				n.set_classes(&classes);
			}
		});
	}

	fn remove_class(&self, class: &str) {
		self.with_node_mut(|n| {
			let mut classes = n.classes();
			let before = classes.len();
			classes.retain(|c| c != class);
			if classes.len() != before {
				n.set_classes(&classes);
			}
		});
	}

	fn toggle_class(&self, class: &str) -> bool {
		if self.has_class(class) {
			self.remove_class(class);
			false
		} else {
			self.add_class(class);
			true
		}
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.with_node(|n| n.attribute(name))
	}

	fn set_attribute(&self, name: &str, value: &str) {
		self.with_node_mut(|n| {
			match name {
				"value" if n.is_control() => {
					n.value = value.to_string();
					n.default_value = value.to_string();
				}
				"disabled" => n.disabled = true,
				"checked" => {
					n.checked = true;
					n.default_checked = true;
				}
				_ => {}
			}
			n.set_attribute(name, value);
		});
	}

	fn text_content(&self) -> String {
		let doc = self.doc();
		let nodes = self.state.nodes.borrow();
		let mut text = nodes[self.index].text.clone();
		for index in doc.descendants(self.index) {
			text.push_str(&nodes[index].text);
		}
		text
	}

	fn set_text_content(&self, text: &str) {
		let mut nodes = self.state.nodes.borrow_mut();
		let children = std::mem::take(&mut nodes[self.index].children);
		for child in children {
			nodes[child].parent = None;
		}
		nodes[self.index].text = text.to_string();
	}

	fn is_disabled(&self) -> bool {
		self.with_node(|n| n.disabled)
	}

	fn set_disabled(&self, disabled: bool) {
		self.with_node_mut(|n| {
			n.disabled = disabled;
			if disabled {
				n.set_attribute("disabled", "");
			} else {
				n.attributes.retain(|(k, _)| k != "disabled");
			}
		});
	}

	fn is_checked(&self) -> bool {
		self.with_node(|n| n.is_checkable() && n.checked)
	}

	fn set_checked(&self, checked: bool) {
		self.with_node_mut(|n| {
			if n.is_checkable() {
				n.checked = checked;
			}
		});
	}

	fn style_property(&self, name: &str) -> String {
		self.with_node(|n| {
			n.style
				.iter()
				.find(|(k, _)| k == name)
				.map(|(_, v)| v.clone())
				.unwrap_or_default()
		})
	}

	fn set_style_property(&self, name: &str, value: &str) {
		self.with_node_mut(|n| {
			n.style.retain(|(k, _)| k != name);
			if !value.is_empty() {
				n.style.push((name.to_string(), value.to_string()));
			}
		});
	}

	fn parent(&self) -> Option<ElementRef> {
		let parent = self.with_node(|n| n.parent)?;
		Some(self.doc().element(parent))
	}

	fn closest(&self, selector: &str) -> Option<ElementRef> {
		let parsed = Selector::parse(selector)?;
		let doc = self.doc();
		doc.ancestors_or_self(self.index)
			.into_iter()
			.find(|&i| doc.matches(i, &parsed))
			.map(|i| doc.element(i))
	}

	fn query_selector(&self, selector: &str) -> Option<ElementRef> {
		self.query_selector_all(selector).into_iter().next()
	}

	fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
		self.doc().select_all(self.index, selector)
	}

	fn scroll_into_view(&self) {
		self.state.scrolled_into_view.borrow_mut().push(self.index);
	}

	fn reset(&self) {
		if self.tag_name() != "form" {
			return;
		}
		let descendants = self.doc().descendants(self.index);
		let mut nodes = self.state.nodes.borrow_mut();
		for index in descendants {
			let node = &mut nodes[index];
			if node.is_control() {
				node.value = node.default_value.clone();
				node.checked = node.default_checked;
			}
		}
	}

	fn on(&self, event_type: EventType, handler: EventHandler) -> EventHandle {
		add_listener(&self.state, ListenerTarget::Node(self.index), event_type, handler)
	}

	fn is_same_node(&self, other: &dyn Element) -> bool {
		other
			.as_any()
			.downcast_ref::<MemoryElement>()
			.is_some_and(|o| Rc::ptr_eq(&o.state, &self.state) && o.index == self.index)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

struct MemoryObserver {
	observed: RefCell<Vec<usize>>,
	callback: Callback<IntersectionBatch>,
}

fn memory_index(element: &dyn Element) -> Option<usize> {
	element
		.as_any()
		.downcast_ref::<MemoryElement>()
		.map(|e| e.index)
}

impl VisibilityObserver for MemoryObserver {
	fn observe(&self, element: &dyn Element) {
		if let Some(index) = memory_index(element) {
			let mut observed = self.observed.borrow_mut();
			if !observed.contains(&index) {
				observed.push(index);
			}
		}
	}

	fn unobserve(&self, element: &dyn Element) {
		if let Some(index) = memory_index(element) {
			self.observed.borrow_mut().retain(|&i| i != index);
		}
	}

	fn disconnect(&self) {
		self.observed.borrow_mut().clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};

	struct Page {
		doc: MemoryDocument,
		nav: ElementRef,
		link: ElementRef,
		form: ElementRef,
		name: ElementRef,
		submit: ElementRef,
	}

	#[fixture]
	fn page() -> Page {
		let doc = MemoryDocument::new();
		let body = doc.body().unwrap();
		let nav = doc.append(&body, "nav", &[("id", "navbar")]);
		let link = doc.append(&nav, "a", &[("href", "#about"), ("class", "nav-link")]);
		let form = doc.append(&body, "form", &[("id", "bookingForm")]);
		let group = doc.append(&form, "div", &[("class", "form-group")]);
		let name = doc.append(&group, "input", &[("id", "name"), ("name", "name"), ("value", "guest")]);
		doc.append(&group, "span", &[("class", "form-error")]);
		let submit = doc.append(&form, "button", &[("type", "submit"), ("class", "form-submit")]);
		submit.set_text_content("Book Appointment");
		Page {
			doc,
			nav,
			link,
			form,
			name,
			submit,
		}
	}

	fn counter() -> (Rc<Cell<u32>>, EventHandler) {
		let count = Rc::new(Cell::new(0));
		let handler = Callback::new({
			let count = Rc::clone(&count);
			move |_: Event| count.set(count.get() + 1)
		});
		(count, handler)
	}

	#[rstest]
	fn test_lookup_by_id_and_selector(page: Page) {
		assert!(page.doc.element_by_id("name").unwrap().is_same_node(page.name.as_ref()));
		assert!(page.doc.element_by_id("missing").is_none());
		assert_eq!(page.doc.query_selector_all("input, button").len(), 2);
		assert!(page.form.query_selector(".form-submit").unwrap().is_same_node(page.submit.as_ref()));
	}

	#[rstest]
	fn test_closest_includes_self(page: Page) {
		assert!(page.link.closest("a").unwrap().is_same_node(page.link.as_ref()));
		assert!(page.link.closest("nav").unwrap().is_same_node(page.nav.as_ref()));
		assert!(page.name.closest("nav").is_none());
	}

	#[rstest]
	fn test_class_operations(page: Page) {
		page.link.add_class("active");
		page.link.add_class("active");
		assert_eq!(page.link.attribute("class").as_deref(), Some("nav-link active"));

		assert!(!page.link.toggle_class("active"));
		assert!(!page.link.has_class("active"));
		assert!(page.link.has_class("nav-link"));
	}

	#[rstest]
	fn test_reset_restores_default_values(page: Page) {
		page.name.set_value("Asha");

		page.form.reset();

		assert_eq!(page.name.value(), "guest");
	}

	#[rstest]
	fn test_events_bubble_to_document(page: Page) {
		let (on_input, input_handler) = counter();
		let (on_document, document_handler) = counter();
		let _a = page.form.on(EventType::Input, input_handler);
		let _b = page.doc.on(EventType::Input, document_handler);

		page.doc.type_text(&page.name, "Asha");

		assert_eq!(on_input.get(), 1);
		assert_eq!(on_document.get(), 1);
		assert_eq!(page.name.value(), "Asha");
	}

	#[rstest]
	fn test_dropping_handle_removes_listener(page: Page) {
		let (count, handler) = counter();
		let handle = page.link.on(EventType::Click, handler);
		page.doc.click(&page.link);

		drop(handle);
		page.doc.click(&page.link);

		assert_eq!(count.get(), 1);
		assert_eq!(page.doc.listener_count(), 0);
	}

	#[rstest]
	fn test_submit_button_submits_form(page: Page) {
		let (count, handler) = counter();
		let _h = page.form.on(EventType::Submit, handler);

		page.doc.click(&page.submit);

		assert_eq!(count.get(), 1);
		assert_eq!(page.doc.navigations(), vec!["submit".to_string()]);
	}

	#[rstest]
	fn test_disabled_button_swallows_click(page: Page) {
		let (count, handler) = counter();
		let _h = page.form.on(EventType::Submit, handler);
		page.submit.set_disabled(true);

		assert!(page.doc.click(&page.submit).is_none());
		assert_eq!(count.get(), 0);
	}

	#[rstest]
	fn test_prevented_anchor_does_not_navigate(page: Page) {
		let _h = page.link.on(EventType::Click, Callback::new(|e: Event| e.prevent_default()));

		let event = page.doc.click(&page.link).unwrap();

		assert!(event.default_prevented());
		assert!(page.doc.navigations().is_empty());
	}

	#[rstest]
	fn test_scroll_reaches_window_only(page: Page) {
		let (on_window, window_handler) = counter();
		let (on_document, document_handler) = counter();
		let _a = page.doc.on_window(EventType::Scroll, window_handler);
		let _b = page.doc.on(EventType::Scroll, document_handler);

		page.doc.scroll_to(120.0);

		assert_eq!(page.doc.scroll_y(), 120.0);
		assert_eq!(on_window.get(), 1);
		assert_eq!(on_document.get(), 0);
	}

	#[rstest]
	fn test_set_text_content_replaces_children(page: Page) {
		page.nav.set_text_content("Menu");

		assert_eq!(page.nav.text_content(), "Menu");
		assert!(page.nav.query_selector("a").is_none());
	}

	#[rstest]
	fn test_style_property_cleared_by_empty_value(page: Page) {
		let body = page.doc.body().unwrap();
		body.set_style_property("overflow", "hidden");
		assert_eq!(body.style_property("overflow"), "hidden");

		body.set_style_property("overflow", "");
		assert_eq!(body.style_property("overflow"), "");
	}

	#[rstest]
	fn test_visibility_observer_delivers_entries(page: Page) {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let observer = page
			.doc
			.visibility_observer(
				0.15,
				Callback::new({
					let seen = Rc::clone(&seen);
					move |batch: IntersectionBatch| {
						for entry in batch.entries {
							seen.borrow_mut().push((entry.target.id(), entry.is_intersecting));
						}
					}
				}),
			)
			.unwrap();
		observer.observe(page.name.as_ref());

		page.doc.intersect(&page.name, true);
		page.doc.intersect(&page.link, true);

		assert_eq!(*seen.borrow(), vec![("name".to_string(), true)]);
		assert!(page.doc.is_observed(&page.name));
	}

	#[rstest]
	fn test_visibility_observer_unsupported(page: Page) {
		page.doc.set_visibility_observers_supported(false);

		assert!(page.doc.visibility_observer(0.15, Callback::new(|_| {})).is_none());
	}

	#[rstest]
	fn test_checkbox_click_toggles_and_fires_change(page: Page) {
		// Arrange
		let checkbox = page.doc.append(&page.form, "input", &[("type", "checkbox"), ("name", "newsletter")]);
		let changes = Rc::new(Cell::new(0));
		let _handle = checkbox.on(
			EventType::Change,
			Callback::new({
				let changes = Rc::clone(&changes);
				move |_event: Event| changes.set(changes.get() + 1)
			}),
		);

		// Act & Assert
		assert!(!checkbox.is_checked());
		page.doc.click(&checkbox);
		assert!(checkbox.is_checked());
		assert_eq!(checkbox.value(), "on");
		page.doc.click(&checkbox);
		assert!(!checkbox.is_checked());
		assert_eq!(changes.get(), 2);
	}

	#[rstest]
	fn test_radio_click_unchecks_group(page: Page) {
		let morning = page.doc.append(
			&page.form,
			"input",
			&[("type", "radio"), ("name", "slot"), ("value", "am"), ("checked", "")],
		);
		let evening = page.doc.append(&page.form, "input", &[("type", "radio"), ("name", "slot"), ("value", "pm")]);

		page.doc.click(&evening);

		assert!(evening.is_checked());
		assert!(!morning.is_checked());
	}

	#[rstest]
	fn test_prevented_click_restores_checkedness(page: Page) {
		let checkbox = page.doc.append(&page.form, "input", &[("type", "checkbox"), ("name", "terms")]);
		let _handle = checkbox.on(EventType::Click, Callback::new(|event: Event| event.prevent_default()));

		page.doc.click(&checkbox);

		assert!(!checkbox.is_checked());
	}

	#[rstest]
	fn test_reset_restores_default_checkedness(page: Page) {
		let reminder = page.doc.append(&page.form, "input", &[("type", "checkbox"), ("name", "reminder"), ("checked", "")]);
		let terms = page.doc.append(&page.form, "input", &[("type", "checkbox"), ("name", "terms")]);
		reminder.set_checked(false);
		terms.set_checked(true);

		page.form.reset();

		assert!(reminder.is_checked());
		assert!(!terms.is_checked());
	}

	#[rstest]
	fn test_checkedness_only_on_checkable_inputs(page: Page) {
		page.name.set_checked(true);

		assert!(!page.name.is_checked());
	}
}
