//! Site bootstrap
//!
//! [`BookingSite::mount`] looks up every element the behaviors need, then
//! attaches them in page order: mobile menu, navbar, smooth scrolling,
//! reveal-on-scroll, booking form, modal, date lower bound.
//!
//! The returned [`BookingSite`] owns every listener. Dropping it detaches
//! them all.
//!
//! ## Example
//!
//! ```
//! use booking_pages::testing::standard_page;
//! use booking_pages::{BookingSite, SiteServices, SiteSettings};
//!
//! let document = standard_page();
//! let site = BookingSite::mount(document, SiteServices::default(), &SiteSettings::default()).unwrap();
//! assert!(!site.modal().is_open());
//! ```

use std::rc::Rc;

use booking_forms::{BookingForm, DATE_FIELD};

use crate::clock::{Clock, SystemClock};
use crate::dom::Document;
use crate::error::{PageError, PageResult};
use crate::events::EventRegistry;
use crate::form::{
	BookingFormController, DomErrorPresenter, FormContext, FormElements, LogSink, SubmissionSink,
};
use crate::modal::{DomModal, ModalLifecycle, bind_close_triggers};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::settings::SiteSettings;
use crate::site::{MobileMenu, NavbarScroll, RevealOnScroll, SmoothScroll, apply_min_date};

/// Host services the behaviors depend on.
#[derive(Clone)]
pub struct SiteServices {
	pub scheduler: Rc<dyn Scheduler>,
	pub clock: Rc<dyn Clock>,
	pub sink: Rc<dyn SubmissionSink>,
}

impl Default for SiteServices {
	/// Manual scheduler on native targets, `setTimeout` in the browser; the
	/// system clock; submissions logged.
	fn default() -> Self {
		#[cfg(target_arch = "wasm32")]
		let scheduler: Rc<dyn Scheduler> = match web_sys::window() {
			Some(window) => Rc::new(crate::scheduler::TimeoutScheduler::new(window)),
			None => Rc::new(ManualScheduler::new()),
		};
		#[cfg(not(target_arch = "wasm32"))]
		let scheduler: Rc<dyn Scheduler> = Rc::new(ManualScheduler::new());

		Self {
			scheduler,
			clock: Rc::new(SystemClock),
			sink: Rc::new(LogSink),
		}
	}
}

fn require(document: &dyn Document, id: &str) -> PageResult<crate::dom::ElementRef> {
	document
		.element_by_id(id)
		.ok_or_else(|| PageError::MissingElement(format!("#{id}")))
}

/// The mounted site.
pub struct BookingSite {
	document: Rc<dyn Document>,
	menu: Rc<MobileMenu>,
	navbar: Rc<NavbarScroll>,
	smooth_scroll: Rc<SmoothScroll>,
	reveal: RevealOnScroll,
	modal: Rc<DomModal>,
	controller: Rc<BookingFormController>,
	registry: EventRegistry,
}

impl BookingSite {
	/// Attaches every behavior to `document`.
	///
	/// # Errors
	///
	/// Returns [`PageError::MissingElement`] if the menu toggle, the link
	/// list, the navbar, the booking form, its submit control, any of its
	/// five field controls, the modal or the modal's close control is
	/// missing. Nothing is attached in that case.
	pub fn mount(
		document: Rc<dyn Document>,
		services: SiteServices,
		settings: &SiteSettings,
	) -> PageResult<Self> {
		let nav = &settings.navigation;
		let button = require(document.as_ref(), &nav.menu_button_id)?;
		let links = require(document.as_ref(), &nav.nav_links_id)?;
		let navbar_element = require(document.as_ref(), &nav.navbar_id)?;

		let schema = BookingForm::appointment();
		let elements = FormElements::locate(document.as_ref(), &schema, &settings.booking)?;

		let modal_element = require(document.as_ref(), &settings.modal.modal_id)?;
		let close_button = document
			.query_selector(&settings.modal.close_selector)
			.ok_or_else(|| PageError::MissingElement(settings.modal.close_selector.clone()))?;

		let mut registry = EventRegistry::new();

		let menu = Rc::new(MobileMenu::new(button, links, nav.active_class.clone()));
		registry.register_all(nav.menu_button_id.clone(), menu.bind(document.as_ref(), nav));

		let navbar = Rc::new(NavbarScroll::new(navbar_element, nav));
		registry.register("window", navbar.bind(&document));

		let smooth_scroll = Rc::new(SmoothScroll::new(&document, &menu));
		let anchors = document.query_selector_all(&nav.anchor_selector);
		registry.register_all("anchors", smooth_scroll.bind(&anchors));

		let reveal = RevealOnScroll::mount(document.as_ref(), &settings.reveal);

		let modal = Rc::new(DomModal::new(
			modal_element,
			document.body(),
			settings.modal.active_class.clone(),
		));

		let date_control = elements.field(DATE_FIELD).cloned();
		let controller = BookingFormController::new(
			schema,
			elements,
			FormContext {
				presenter: Rc::new(DomErrorPresenter::new(&settings.booking)),
				modal: modal.clone(),
				scheduler: services.scheduler,
				sink: services.sink,
			},
			&settings.booking,
		);
		registry.register_all(
			settings.booking.form_id.clone(),
			controller.bind(&settings.booking.control_selector),
		);

		registry.register_all(
			settings.modal.modal_id.clone(),
			bind_close_triggers(&modal, &close_button, document.as_ref(), &settings.modal),
		);

		if let Some(control) = date_control {
			apply_min_date(control.as_ref(), services.clock.as_ref());
		}

		info_log!(
			"Booking site mounted: {} anchor(s), {} reveal element(s)",
			anchors.len(),
			reveal.len()
		);

		Ok(Self {
			document,
			menu,
			navbar,
			smooth_scroll,
			reveal,
			modal,
			controller,
			registry,
		})
	}

	pub fn document(&self) -> &Rc<dyn Document> {
		&self.document
	}

	pub fn menu(&self) -> &MobileMenu {
		&self.menu
	}

	pub fn navbar(&self) -> &NavbarScroll {
		&self.navbar
	}

	pub fn smooth_scroll(&self) -> &SmoothScroll {
		&self.smooth_scroll
	}

	pub fn reveal(&self) -> &RevealOnScroll {
		&self.reveal
	}

	pub fn modal(&self) -> &dyn ModalLifecycle {
		self.modal.as_ref()
	}

	pub fn controller(&self) -> &BookingFormController {
		&self.controller
	}

	pub fn registry(&self) -> &EventRegistry {
		&self.registry
	}
}

#[cfg(target_arch = "wasm32")]
mod wasm {
	use std::cell::RefCell;
	use std::rc::Rc;

	use wasm_bindgen::prelude::*;

	use super::{BookingSite, SiteServices};
	use crate::dom::web::WebDocument;
	use crate::settings::SiteSettings;

	thread_local! {
		static SITE: RefCell<Option<BookingSite>> = const { RefCell::new(None) };
	}

	/// Mounts the booking site on the current page.
	///
	/// `settings_json` overrides the default settings; pass `undefined` for
	/// the stock markup. Mounting again replaces the previous site.
	#[wasm_bindgen(js_name = startBookingSite)]
	pub fn start_booking_site(settings_json: Option<String>) -> Result<(), JsValue> {
		#[cfg(feature = "console_error_panic_hook")]
		console_error_panic_hook::set_once();

		let settings = match settings_json {
			Some(json) => SiteSettings::from_json(&json),
			None => Ok(SiteSettings::default()),
		}
		.map_err(|e| JsValue::from_str(&e.to_string()))?;

		let document = WebDocument::global().map_err(|e| JsValue::from_str(&e.to_string()))?;
		let site = BookingSite::mount(Rc::new(document), SiteServices::default(), &settings)
			.map_err(|e| {
				error_log!("Booking site failed to mount: {}", e);
				JsValue::from_str(&e.to_string())
			})?;

		SITE.with(|slot| *slot.borrow_mut() = Some(site));
		Ok(())
	}
}

#[cfg(target_arch = "wasm32")]
pub use wasm::start_booking_site;
