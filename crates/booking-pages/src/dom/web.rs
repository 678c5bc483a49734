//! Browser document backed by `web_sys`.

use std::any::Any;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use crate::callback::Callback;
use crate::dom::{
	Document, Element, ElementRef, Event, EventHandle, EventHandler, EventType, IntersectionBatch,
	IntersectionEntry, VisibilityObserver,
};
use crate::error::PageError;

/// The live browser document and its window.
#[derive(Clone)]
pub struct WebDocument {
	window: web_sys::Window,
	document: web_sys::Document,
}

impl WebDocument {
	/// Wraps the global `window.document`.
	pub fn global() -> Result<Self, PageError> {
		let window =
			web_sys::window().ok_or_else(|| PageError::Unavailable("window".to_string()))?;
		let document = window
			.document()
			.ok_or_else(|| PageError::Unavailable("document".to_string()))?;
		Ok(Self { window, document })
	}

	pub fn window(&self) -> &web_sys::Window {
		&self.window
	}
}

/// A `web_sys::Element` behind the [`Element`] trait.
#[derive(Clone)]
pub struct WebElement {
	element: web_sys::Element,
}

impl WebElement {
	pub fn new(element: web_sys::Element) -> Self {
		Self { element }
	}

	fn wrap(element: web_sys::Element) -> ElementRef {
		Rc::new(Self::new(element))
	}

	pub fn as_web_sys(&self) -> &web_sys::Element {
		&self.element
	}
}

fn node_list(list: web_sys::NodeList) -> Vec<ElementRef> {
	(0..list.length())
		.filter_map(|i| list.get(i))
		.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
		.map(WebElement::wrap)
		.collect()
}

/// Registers `handler` on `target`. The closure lives until the returned
/// handle removes it.
fn listen(target: web_sys::EventTarget, event_type: EventType, handler: EventHandler) -> EventHandle {
	let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
		handler.call(translate(raw));
	});

	if let Err(e) =
		target.add_event_listener_with_callback(event_type.as_str(), closure.as_ref().unchecked_ref())
	{
		error_log!("Failed to attach '{}' listener: {:?}", event_type, e);
	}

	EventHandle::new(move || {
		let _ = target
			.remove_event_listener_with_callback(event_type.as_str(), closure.as_ref().unchecked_ref());
		drop(closure);
	})
}

fn translate(raw: web_sys::Event) -> Event {
	let event_type = EventType::from_name(&raw.type_()).unwrap_or(EventType::Click);
	let mut event = Event::new(event_type);
	if let Some(target) = raw
		.target()
		.and_then(|t| t.dyn_into::<web_sys::Element>().ok())
	{
		event = event.with_target(WebElement::wrap(target));
	}
	if let Some(keyboard) = raw.dyn_ref::<web_sys::KeyboardEvent>() {
		event = event.with_key(keyboard.key());
	}
	event.with_prevent_hook(move || raw.prevent_default())
}

impl Document for WebDocument {
	fn element_by_id(&self, id: &str) -> Option<ElementRef> {
		self.document.get_element_by_id(id).map(WebElement::wrap)
	}

	fn query_selector(&self, selector: &str) -> Option<ElementRef> {
		self.document
			.query_selector(selector)
			.ok()
			.flatten()
			.map(WebElement::wrap)
	}

	fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
		self.document
			.query_selector_all(selector)
			.map(node_list)
			.unwrap_or_default()
	}

	fn body(&self) -> Option<ElementRef> {
		self.document
			.body()
			.map(|body| WebElement::wrap(body.into()))
	}

	fn scroll_y(&self) -> f64 {
		self.window.scroll_y().unwrap_or(0.0)
	}

	fn on(&self, event_type: EventType, handler: EventHandler) -> EventHandle {
		listen(self.document.clone().into(), event_type, handler)
	}

	fn on_window(&self, event_type: EventType, handler: EventHandler) -> EventHandle {
		listen(self.window.clone().into(), event_type, handler)
	}

	fn visibility_observer(
		&self,
		threshold: f64,
		callback: Callback<IntersectionBatch>,
	) -> Option<Rc<dyn VisibilityObserver>> {
		let supported =
			js_sys::Reflect::has(&self.window, &JsValue::from_str("IntersectionObserver"))
				.unwrap_or(false);
		if !supported {
			return None;
		}

		let closure = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
			move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
				let entries = entries
					.iter()
					.map(|value| value.unchecked_into::<web_sys::IntersectionObserverEntry>())
					.map(|entry| IntersectionEntry {
						target: WebElement::wrap(entry.target()),
						is_intersecting: entry.is_intersecting(),
					})
					.collect();
				callback.call(IntersectionBatch {
					entries,
					observer: Rc::new(WebVisibilityObserver {
						observer,
						_callback: None,
					}),
				});
			},
		);

		let init = web_sys::IntersectionObserverInit::new();
		init.set_threshold(&JsValue::from_f64(threshold));
		match web_sys::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
		{
			Ok(observer) => Some(Rc::new(WebVisibilityObserver {
				observer,
				_callback: Some(closure),
			})),
			Err(e) => {
				warn_log!("IntersectionObserver construction failed: {:?}", e);
				None
			}
		}
	}
}

struct WebVisibilityObserver {
	observer: web_sys::IntersectionObserver,
	_callback: Option<Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>>,
}

impl VisibilityObserver for WebVisibilityObserver {
	fn observe(&self, element: &dyn Element) {
		if let Some(element) = element.as_any().downcast_ref::<WebElement>() {
			self.observer.observe(&element.element);
		}
	}

	fn unobserve(&self, element: &dyn Element) {
		if let Some(element) = element.as_any().downcast_ref::<WebElement>() {
			self.observer.unobserve(&element.element);
		}
	}

	fn disconnect(&self) {
		self.observer.disconnect();
	}
}

impl Element for WebElement {
	fn id(&self) -> String {
		self.element.id()
	}

	fn tag_name(&self) -> String {
		self.element.tag_name().to_ascii_lowercase()
	}

	fn value(&self) -> String {
		if let Some(input) = self.element.dyn_ref::<web_sys::HtmlInputElement>() {
			input.value()
		} else if let Some(select) = self.element.dyn_ref::<web_sys::HtmlSelectElement>() {
			select.value()
		} else if let Some(textarea) = self.element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
			textarea.value()
		} else {
			String::new()
		}
	}

	fn set_value(&self, value: &str) {
		if let Some(input) = self.element.dyn_ref::<web_sys::HtmlInputElement>() {
			input.set_value(value);
		} else if let Some(select) = self.element.dyn_ref::<web_sys::HtmlSelectElement>() {
			select.set_value(value);
		} else if let Some(textarea) = self.element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
			textarea.set_value(value);
		}
	}

	fn has_class(&self, class: &str) -> bool {
		self.element.class_list().contains(class)
	}

	fn add_class(&self, class: &str) {
		let _ = self.element.class_list().add_1(class);
	}

	fn remove_class(&self, class: &str) {
		let _ = self.element.class_list().remove_1(class);
	}

	fn toggle_class(&self, class: &str) -> bool {
		self.element.class_list().toggle(class).unwrap_or(false)
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.element.get_attribute(name)
	}

	fn set_attribute(&self, name: &str, value: &str) {
		let _ = self.element.set_attribute(name, value);
	}

	fn text_content(&self) -> String {
		self.element.text_content().unwrap_or_default()
	}

	fn set_text_content(&self, text: &str) {
		self.element.set_text_content(Some(text));
	}

	fn is_disabled(&self) -> bool {
		if let Some(button) = self.element.dyn_ref::<web_sys::HtmlButtonElement>() {
			button.disabled()
		} else {
			self.element.has_attribute("disabled")
		}
	}

	fn set_disabled(&self, disabled: bool) {
		if let Some(button) = self.element.dyn_ref::<web_sys::HtmlButtonElement>() {
			button.set_disabled(disabled);
		} else if disabled {
			let _ = self.element.set_attribute("disabled", "");
		} else {
			let _ = self.element.remove_attribute("disabled");
		}
	}

	fn is_checked(&self) -> bool {
		self.element
			.dyn_ref::<web_sys::HtmlInputElement>()
			.is_some_and(|input| input.checked())
	}

	fn set_checked(&self, checked: bool) {
		if let Some(input) = self.element.dyn_ref::<web_sys::HtmlInputElement>() {
			input.set_checked(checked);
		}
	}

	fn style_property(&self, name: &str) -> String {
		self.element
			.dyn_ref::<web_sys::HtmlElement>()
			.and_then(|e| e.style().get_property_value(name).ok())
			.unwrap_or_default()
	}

	fn set_style_property(&self, name: &str, value: &str) {
		if let Some(element) = self.element.dyn_ref::<web_sys::HtmlElement>() {
			let style = element.style();
			if value.is_empty() {
				let _ = style.remove_property(name);
			} else {
				let _ = style.set_property(name, value);
			}
		}
	}

	fn parent(&self) -> Option<ElementRef> {
		self.element.parent_element().map(WebElement::wrap)
	}

	fn closest(&self, selector: &str) -> Option<ElementRef> {
		self.element
			.closest(selector)
			.ok()
			.flatten()
			.map(WebElement::wrap)
	}

	fn query_selector(&self, selector: &str) -> Option<ElementRef> {
		self.element
			.query_selector(selector)
			.ok()
			.flatten()
			.map(WebElement::wrap)
	}

	fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
		self.element
			.query_selector_all(selector)
			.map(node_list)
			.unwrap_or_default()
	}

	fn scroll_into_view(&self) {
		let options = web_sys::ScrollIntoViewOptions::new();
		options.set_behavior(web_sys::ScrollBehavior::Smooth);
		options.set_block(web_sys::ScrollLogicalPosition::Start);
		self.element
			.scroll_into_view_with_scroll_into_view_options(&options);
	}

	fn reset(&self) {
		if let Some(form) = self.element.dyn_ref::<web_sys::HtmlFormElement>() {
			form.reset();
		}
	}

	fn on(&self, event_type: EventType, handler: EventHandler) -> EventHandle {
		listen(self.element.clone().into(), event_type, handler)
	}

	fn is_same_node(&self, other: &dyn Element) -> bool {
		other
			.as_any()
			.downcast_ref::<WebElement>()
			.is_some_and(|o| {
				let other: &web_sys::Node = &o.element;
				self.element.is_same_node(Some(other))
			})
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}
