//! Booking form controller
//!
//! Validates the appointment form on submit, locks the submit control while a
//! simulated submission is in flight, and hands over to the confirmation
//! modal once it completes.
//!
//! ## Example
//!
//! ```ignore
//! let elements = FormElements::locate(document.as_ref(), &schema, &settings.booking)?;
//! let controller = BookingFormController::new(schema, elements, context, &settings.booking);
//! registry.register_all("bookingForm", controller.bind(&settings.booking.control_selector));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use booking_forms::{BookingForm, FormData, ValidationResult, invalid_results};

use crate::callback::Callback;
use crate::dom::{Document, Element, ElementRef, Event, EventHandle, EventType};
use crate::error::PageError;
use crate::form::errors::FieldErrorPresenter;
use crate::form::sink::SubmissionSink;
use crate::modal::ModalLifecycle;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::settings::BookingSettings;

/// Controls that contribute to the submitted data.
const DATA_CONTROLS: &str = "input, select, textarea";

/// Input types that never carry form data.
const NON_DATA_INPUT_TYPES: [&str; 4] = ["submit", "button", "reset", "image"];

/// Inputs whose value is submitted only while checked.
const CHECKABLE_INPUT_TYPES: [&str; 2] = ["checkbox", "radio"];

/// Where the form is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
	#[default]
	Idle,
	Submitting,
	Completed,
}

/// The form element, its submit control and one control per schema field.
#[derive(Clone)]
pub struct FormElements {
	pub form: ElementRef,
	pub submit: ElementRef,
	fields: Vec<(String, ElementRef)>,
}

impl FormElements {
	/// Looks up every element the controller needs.
	///
	/// # Errors
	///
	/// Returns [`PageError::MissingElement`] for the first element that is
	/// not on the page.
	pub fn locate(
		document: &dyn Document,
		schema: &BookingForm,
		settings: &BookingSettings,
	) -> Result<Self, PageError> {
		let form = document
			.element_by_id(&settings.form_id)
			.ok_or_else(|| PageError::MissingElement(format!("#{}", settings.form_id)))?;
		let submit = form.query_selector(&settings.submit_selector).ok_or_else(|| {
			PageError::MissingElement(format!("#{} {}", settings.form_id, settings.submit_selector))
		})?;

		let fields = schema
			.fields()
			.iter()
			.map(|field| {
				let id = settings.field_id(field.name());
				document
					.element_by_id(id)
					.map(|control| (field.name().to_string(), control))
					.ok_or_else(|| PageError::MissingElement(format!("#{id}")))
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			form,
			submit,
			fields,
		})
	}

	/// The control bound to the schema field `name`.
	pub fn field(&self, name: &str) -> Option<&ElementRef> {
		self.fields
			.iter()
			.find(|(field, _)| field == name)
			.map(|(_, control)| control)
	}
}

/// Collaborators the controller delegates to.
#[derive(Clone)]
pub struct FormContext {
	pub presenter: Rc<dyn FieldErrorPresenter>,
	pub modal: Rc<dyn ModalLifecycle>,
	pub scheduler: Rc<dyn Scheduler>,
	pub sink: Rc<dyn SubmissionSink>,
}

/// The booking form's validation and submission state machine.
///
/// Mutual exclusion between submissions is the submit control's disabled
/// state: while it is disabled, [`submit`](Self::submit) does nothing.
pub struct BookingFormController {
	schema: BookingForm,
	elements: FormElements,
	context: FormContext,
	delay: Duration,
	working_label: String,
	original_label: String,
	state: Cell<SubmissionState>,
	last_submission: RefCell<Option<FormData>>,
	pending: RefCell<Option<TaskHandle>>,
	this: Weak<BookingFormController>,
}

impl BookingFormController {
	/// Creates the controller. The submit control's current label is kept
	/// and restored after each submission.
	pub fn new(
		schema: BookingForm,
		elements: FormElements,
		context: FormContext,
		settings: &BookingSettings,
	) -> Rc<Self> {
		let original_label = elements.submit.text_content();
		Rc::new_cyclic(|this| Self {
			schema,
			elements,
			context,
			delay: settings.submit_delay(),
			working_label: settings.working_label.clone(),
			original_label,
			state: Cell::new(SubmissionState::Idle),
			last_submission: RefCell::new(None),
			pending: RefCell::new(None),
			this: this.clone(),
		})
	}

	/// Attaches the submit handler and the clear-error hooks.
	///
	/// The submit event's default action is always prevented. Every control
	/// matching `control_selector` inside the form clears its error on
	/// `input` and `change`.
	pub fn bind(&self, control_selector: &str) -> Vec<EventHandle> {
		let mut handles = Vec::new();

		let this = self.this.clone();
		handles.push(self.elements.form.on(
			EventType::Submit,
			Callback::new(move |event: Event| {
				event.prevent_default();
				if let Some(controller) = this.upgrade() {
					controller.submit();
				}
			}),
		));

		for control in self.elements.form.query_selector_all(control_selector) {
			for event_type in [EventType::Input, EventType::Change] {
				let this = self.this.clone();
				let target = Rc::clone(&control);
				handles.push(control.on(
					event_type,
					Callback::new(move |_event: Event| {
						if let Some(controller) = this.upgrade() {
							controller.clear_error(target.as_ref());
						}
					}),
				));
			}
		}

		handles
	}

	/// Validates every schema field against the current control values.
	///
	/// All fields are checked, in schema order, even after a failure.
	pub fn validate(&self) -> Vec<ValidationResult> {
		self.schema
			.validate(|name| self.elements.field(name).map(|control| control.value()))
	}

	/// Handles a submit attempt.
	///
	/// Invalid fields get their errors presented and nothing else happens.
	/// Otherwise the form is locked, its data captured and passed to the
	/// sink, and completion is scheduled after the configured delay.
	pub fn submit(&self) {
		if self.elements.submit.is_disabled() {
			debug_log!("Submission already in progress; ignoring submit");
			return;
		}

		let results = self.validate();
		let errors = invalid_results(&results);
		if !errors.is_empty() {
			for error in &errors {
				if let Some(control) = self.elements.field(&error.field) {
					self.context.presenter.show_error(control.as_ref(), &error.reason);
				}
			}
			debug_log!("Booking form rejected: {} invalid field(s)", errors.len());
			return;
		}

		self.state.set(SubmissionState::Submitting);
		self.elements.submit.set_disabled(true);
		self.elements.submit.set_text_content(&self.working_label);

		let data = self.capture();
		self.context.sink.submit(&data);

		let this = self.this.clone();
		let handle = self.context.scheduler.schedule(
			self.delay,
			Box::new(move || {
				if let Some(controller) = this.upgrade() {
					controller.complete(data);
				}
			}),
		);
		*self.pending.borrow_mut() = Some(handle);
	}

	/// Finishes a submission: opens the modal, resets the form and unlocks
	/// the submit control. `data` is the snapshot captured at submit time.
	fn complete(&self, data: FormData) {
		self.pending.borrow_mut().take();
		self.state.set(SubmissionState::Completed);
		self.context.modal.open();
		self.elements.form.reset();
		self.elements.submit.set_disabled(false);
		self.elements.submit.set_text_content(&self.original_label);
		*self.last_submission.borrow_mut() = Some(data);
		debug_log!("Booking submission completed");
	}

	/// Snapshot of every named, enabled control in the form, in document
	/// order. Unchecked checkboxes and radios contribute nothing.
	pub fn capture(&self) -> FormData {
		self.elements
			.form
			.query_selector_all(DATA_CONTROLS)
			.into_iter()
			.filter(|control| !control.is_disabled())
			.filter(|control| {
				if control.tag_name() != "input" {
					return true;
				}
				let input_type = control.attribute("type").unwrap_or_default().to_ascii_lowercase();
				if NON_DATA_INPUT_TYPES.contains(&input_type.as_str()) {
					return false;
				}
				!CHECKABLE_INPUT_TYPES.contains(&input_type.as_str()) || control.is_checked()
			})
			.filter_map(|control| {
				let name = control.attribute("name").filter(|n| !n.is_empty())?;
				Some((name, control.value()))
			})
			.collect()
	}

	/// Clears the presented error of `control`.
	pub fn clear_error(&self, control: &dyn Element) {
		self.context.presenter.clear_error(control);
	}

	pub fn state(&self) -> SubmissionState {
		self.state.get()
	}

	/// Data of the most recent completed submission.
	pub fn last_submission(&self) -> Option<FormData> {
		self.last_submission.borrow().clone()
	}

	/// Handle to the scheduled completion while a submission is in flight.
	pub fn pending_completion(&self) -> Option<TaskHandle> {
		self.pending.borrow().clone()
	}

	pub fn elements(&self) -> &FormElements {
		&self.elements
	}

	pub fn original_label(&self) -> &str {
		&self.original_label
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::memory::MemoryDocument;
	use crate::form::errors::DomErrorPresenter;
	use crate::form::sink::MemorySink;
	use crate::scheduler::ManualScheduler;
	use rstest::{fixture, rstest};

	#[derive(Default)]
	struct ModalSpy {
		opened: Cell<u32>,
	}

	impl ModalLifecycle for ModalSpy {
		fn open(&self) {
			self.opened.set(self.opened.get() + 1);
		}

		fn close(&self) {}

		fn is_open(&self) -> bool {
			self.opened.get() > 0
		}
	}

	struct Harness {
		doc: MemoryDocument,
		controller: Rc<BookingFormController>,
		scheduler: Rc<ManualScheduler>,
		sink: Rc<MemorySink>,
		modal: Rc<ModalSpy>,
		_handles: Vec<EventHandle>,
	}

	impl Harness {
		fn control(&self, id: &str) -> ElementRef {
			self.doc.element_by_id(id).unwrap()
		}

		fn fill(&self, values: &[(&str, &str)]) {
			for (id, value) in values {
				self.control(id).set_value(value);
			}
		}
	}

	#[fixture]
	fn harness() -> Harness {
		let doc = MemoryDocument::new();
		let body = doc.body().unwrap();
		let form = doc.append(&body, "form", &[("id", "bookingForm")]);
		for (tag, id) in [
			("input", "name"),
			("input", "phone"),
			("select", "service"),
			("input", "date"),
			("select", "time"),
		] {
			let group = doc.append(&form, "div", &[("class", "form-group")]);
			doc.append(&group, tag, &[("id", id), ("name", id)]);
			doc.append(&group, "span", &[("class", "form-error")]);
		}
		doc.append(&form, "input", &[("type", "email"), ("name", "email"), ("disabled", "")]);
		let submit = doc.append(&form, "button", &[("type", "submit"), ("class", "form-submit")]);
		submit.set_text_content("Book Appointment");

		let settings = BookingSettings::default();
		let schema = BookingForm::appointment();
		let elements = FormElements::locate(&doc, &schema, &settings).unwrap();
		let scheduler = Rc::new(ManualScheduler::new());
		let sink = Rc::new(MemorySink::new());
		let modal = Rc::new(ModalSpy::default());
		let controller = BookingFormController::new(
			schema,
			elements,
			FormContext {
				presenter: Rc::new(DomErrorPresenter::new(&settings)),
				modal: modal.clone(),
				scheduler: scheduler.clone(),
				sink: sink.clone(),
			},
			&settings,
		);
		let handles = controller.bind(&settings.control_selector);

		Harness {
			doc,
			controller,
			scheduler,
			sink,
			modal,
			_handles: handles,
		}
	}

	const VALID: [(&str, &str); 5] = [
		("name", "Asha Rao"),
		("phone", "+91 98765 43210"),
		("service", "Haircut"),
		("date", "2025-01-01"),
		("time", "10:00"),
	];

	#[rstest]
	fn test_locate_reports_missing_control() {
		let doc = MemoryDocument::new();
		let body = doc.body().unwrap();
		let form = doc.append(&body, "form", &[("id", "bookingForm")]);
		doc.append(&form, "button", &[("class", "form-submit")]);

		let result = FormElements::locate(&doc, &BookingForm::appointment(), &BookingSettings::default());

		assert!(matches!(result, Err(PageError::MissingElement(id)) if id == "#name"));
	}

	#[rstest]
	fn test_invalid_submit_changes_no_state(harness: Harness) {
		// Arrange
		harness.fill(&[("name", "Asha Rao")]);

		// Act
		harness.controller.submit();

		// Assert
		assert_eq!(harness.controller.state(), SubmissionState::Idle);
		assert!(!harness.controller.elements().submit.is_disabled());
		assert!(harness.sink.is_empty());
		assert_eq!(harness.scheduler.pending(), 0);
		assert!(!harness.control("name").has_class("invalid"));
		assert!(harness.control("phone").has_class("invalid"));
		assert!(harness.control("time").has_class("invalid"));
	}

	#[rstest]
	fn test_valid_submit_locks_until_completion(harness: Harness) {
		// Arrange
		harness.fill(&VALID);

		// Act
		harness.controller.submit();

		// Assert
		let submit = &harness.controller.elements().submit;
		assert_eq!(harness.controller.state(), SubmissionState::Submitting);
		assert!(submit.is_disabled());
		assert_eq!(submit.text_content(), "Submitting...");
		assert!(harness.controller.pending_completion().unwrap().is_pending());
		assert_eq!(harness.sink.len(), 1);
		assert_eq!(harness.modal.opened.get(), 0);
	}

	#[rstest]
	fn test_completion_opens_modal_and_resets(harness: Harness) {
		harness.fill(&VALID);
		harness.controller.submit();

		harness.scheduler.advance(Duration::from_millis(500));

		let submit = &harness.controller.elements().submit;
		assert_eq!(harness.controller.state(), SubmissionState::Completed);
		assert_eq!(harness.modal.opened.get(), 1);
		assert!(!submit.is_disabled());
		assert_eq!(submit.text_content(), "Book Appointment");
		assert_eq!(harness.control("name").value(), "");
		assert!(harness.controller.pending_completion().is_none());
		assert_eq!(
			harness.controller.last_submission().unwrap().get("phone"),
			Some("+91 98765 43210")
		);
	}

	#[rstest]
	fn test_second_submit_while_submitting_is_ignored(harness: Harness) {
		harness.fill(&VALID);
		harness.controller.submit();

		harness.controller.submit();
		harness.scheduler.advance(Duration::from_secs(1));

		assert_eq!(harness.sink.len(), 1);
		assert_eq!(harness.modal.opened.get(), 1);
	}

	#[rstest]
	fn test_capture_skips_unnamed_and_disabled_controls(harness: Harness) {
		harness.fill(&VALID);

		let data = harness.controller.capture();

		let names: Vec<&str> = data.iter().map(|(k, _)| k).collect();
		assert_eq!(names, ["name", "phone", "service", "date", "time"]);
	}

	#[rstest]
	fn test_capture_skips_unchecked_choices(harness: Harness) {
		// Arrange
		let form = harness.controller.elements().form.clone();
		harness.doc.append(&form, "input", &[("type", "checkbox"), ("name", "newsletter"), ("value", "yes")]);
		harness.doc.append(&form, "input", &[("type", "radio"), ("name", "stylist"), ("value", "any")]);
		let senior = harness.doc.append(&form, "input", &[("type", "radio"), ("name", "stylist"), ("value", "senior")]);
		harness.fill(&VALID);

		// Act
		harness.doc.click(&senior);
		let data = harness.controller.capture();

		// Assert
		assert_eq!(data.get("newsletter"), None);
		assert_eq!(data.get("stylist"), Some("senior"));
		assert_eq!(data.len(), 6);
	}

	#[rstest]
	fn test_input_event_clears_error(harness: Harness) {
		harness.controller.submit();
		let phone = harness.control("phone");
		assert!(phone.has_class("invalid"));

		harness.doc.type_text(&phone, "98");

		assert!(!phone.has_class("invalid"));
		assert!(harness.control("name").has_class("invalid"));
	}

	#[rstest]
	fn test_submit_event_is_default_prevented(harness: Harness) {
		let form = harness.controller.elements().form.clone();

		let event = harness.doc.submit(&form).unwrap();

		assert!(event.default_prevented());
		assert!(harness.doc.navigations().is_empty());
	}
}
