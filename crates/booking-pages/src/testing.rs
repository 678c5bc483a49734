//! Testing utilities
//!
//! Builds the stock booking page in a [`MemoryDocument`] and mounts the site
//! on it with a manual scheduler, a fixed clock and an in-memory sink, so
//! tests can play a user session step by step.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use booking_pages::testing::BookingPage;
//!
//! let page = BookingPage::mount();
//! page.fill_valid();
//! page.click_submit();
//! page.advance(Duration::from_millis(500));
//!
//! assert!(page.site.modal().is_open());
//! ```

use std::rc::Rc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::app::{BookingSite, SiteServices};
use crate::clock::FixedClock;
use crate::dom::memory::MemoryDocument;
use crate::dom::{Document, ElementRef};
use crate::error::PageError;
use crate::form::MemorySink;
use crate::scheduler::ManualScheduler;
use crate::settings::SiteSettings;

/// Date reported by the fixed clock of a [`BookingPage`].
pub fn page_today() -> NaiveDate {
	NaiveDate::from_ymd_opt(2026, 10, 19).unwrap_or_default()
}

/// Values that pass every booking check.
pub const VALID_BOOKING: [(&str, &str); 5] = [
	("name", "Asha Rao"),
	("phone", "+91 98765 43210"),
	("service", "Haircut"),
	("date", "2025-01-01"),
	("time", "10:00"),
];

/// Writes the stock page markup into `doc`'s body.
///
/// ```text
/// nav#navbar
///   a.logo[href="#"]
///   button#mobileMenuBtn
///   ul#navLinks > li > a[href="#about"], a[href="#booking"], a[href="#missing"]
/// section#about.reveal, section#services.reveal
/// section#booking > form#bookingForm.booking-form
///   div.form-group > (input#name | input#phone | select#service | input#date | select#time | textarea#notes) + span.form-error
///   button.form-submit "Book Appointment"
/// div#successModal.modal > div.modal-content > h3, p, button.modal-close
/// ```
pub fn standard_page_in(doc: &MemoryDocument) {
	let Some(body) = doc.body() else {
		return;
	};

	let nav = doc.append(&body, "nav", &[("id", "navbar"), ("class", "navbar")]);
	doc.append(&nav, "a", &[("href", "#"), ("class", "logo")])
		.set_text_content("Glow Studio");
	doc.append(
		&nav,
		"button",
		&[
			("id", "mobileMenuBtn"),
			("type", "button"),
			("class", "mobile-menu-btn"),
			("aria-expanded", "false"),
		],
	);
	let links = doc.append(&nav, "ul", &[("id", "navLinks"), ("class", "nav-links")]);
	for (href, label) in [("#about", "About"), ("#booking", "Book"), ("#missing", "Offers")] {
		let item = doc.append(&links, "li", &[]);
		doc.append(&item, "a", &[("href", href)]).set_text_content(label);
	}

	doc.append(&body, "section", &[("id", "about"), ("class", "reveal")]);
	doc.append(&body, "section", &[("id", "services"), ("class", "reveal")]);

	let booking = doc.append(&body, "section", &[("id", "booking")]);
	let form = doc.append(&booking, "form", &[("id", "bookingForm"), ("class", "booking-form")]);
	let controls: [(&str, &[(&str, &str)]); 6] = [
		("input", &[("id", "name"), ("name", "name"), ("type", "text")]),
		("input", &[("id", "phone"), ("name", "phone"), ("type", "tel")]),
		("select", &[("id", "service"), ("name", "service")]),
		("input", &[("id", "date"), ("name", "date"), ("type", "date")]),
		("select", &[("id", "time"), ("name", "time")]),
		("textarea", &[("id", "notes"), ("name", "notes")]),
	];
	for (tag, attributes) in controls {
		let group = doc.append(&form, "div", &[("class", "form-group")]);
		let control = doc.append(&group, tag, attributes);
		if tag == "select" {
			doc.append(&control, "option", &[("value", "")]);
		}
		doc.append(&group, "span", &[("class", "form-error")]);
	}
	doc.append(&form, "button", &[("type", "submit"), ("class", "form-submit")])
		.set_text_content("Book Appointment");

	let modal = doc.append(&body, "div", &[("id", "successModal"), ("class", "modal")]);
	let content = doc.append(&modal, "div", &[("class", "modal-content")]);
	doc.append(&content, "h3", &[]).set_text_content("Appointment Booked!");
	doc.append(&content, "p", &[])
		.set_text_content("We will call you shortly to confirm.");
	doc.append(&content, "button", &[("type", "button"), ("class", "modal-close")])
		.set_text_content("Close");
}

/// A fresh document holding the stock page.
pub fn standard_page() -> Rc<dyn Document> {
	let doc = MemoryDocument::new();
	standard_page_in(&doc);
	Rc::new(doc)
}

/// The stock page with the site mounted.
pub struct BookingPage {
	pub doc: MemoryDocument,
	pub scheduler: Rc<ManualScheduler>,
	pub sink: Rc<MemorySink>,
	pub site: BookingSite,
}

impl BookingPage {
	/// Mounts the site with default settings.
	///
	/// # Panics
	///
	/// Panics if the stock page fails to mount.
	pub fn mount() -> Self {
		match Self::try_mount(&SiteSettings::default()) {
			Ok(page) => page,
			Err(e) => panic!("stock page failed to mount: {e}"),
		}
	}

	pub fn try_mount(settings: &SiteSettings) -> Result<Self, PageError> {
		let doc = MemoryDocument::new();
		standard_page_in(&doc);
		Self::mount_on(doc, settings)
	}

	/// Mounts the site on an already built document.
	pub fn mount_on(doc: MemoryDocument, settings: &SiteSettings) -> Result<Self, PageError> {
		let scheduler = Rc::new(ManualScheduler::new());
		let sink = Rc::new(MemorySink::new());
		let services = SiteServices {
			scheduler: scheduler.clone(),
			clock: Rc::new(FixedClock(page_today())),
			sink: sink.clone(),
		};
		let site = BookingSite::mount(Rc::new(doc.clone()), services, settings)?;
		Ok(Self {
			doc,
			scheduler,
			sink,
			site,
		})
	}

	/// The element with `id`.
	///
	/// # Panics
	///
	/// Panics if there is none.
	pub fn element(&self, id: &str) -> ElementRef {
		match self.doc.element_by_id(id) {
			Some(element) => element,
			None => panic!("no element with id {id}"),
		}
	}

	/// The first element matching `selector`.
	///
	/// # Panics
	///
	/// Panics if there is none.
	pub fn select(&self, selector: &str) -> ElementRef {
		match self.doc.query_selector(selector) {
			Some(element) => element,
			None => panic!("no element matches {selector}"),
		}
	}

	/// The error slot next to the control `id`.
	pub fn error_slot(&self, id: &str) -> Option<ElementRef> {
		self.element(id).parent()?.query_selector(".form-error")
	}

	/// Text of the error slot next to the control `id`.
	pub fn error_text(&self, id: &str) -> String {
		self.error_slot(id)
			.map(|slot| slot.text_content())
			.unwrap_or_default()
	}

	pub fn submit_button(&self) -> ElementRef {
		self.select(".form-submit")
	}

	/// Sets `value` on control `id` the way a user would: typing for inputs
	/// and textareas, picking an option for selects.
	pub fn enter(&self, id: &str, value: &str) {
		let control = self.element(id);
		if control.tag_name() == "select" {
			self.doc.select_option(&control, value);
		} else {
			self.doc.type_text(&control, value);
		}
	}

	/// Fills every booking field with [`VALID_BOOKING`].
	pub fn fill_valid(&self) {
		for (id, value) in VALID_BOOKING {
			self.enter(id, value);
		}
	}

	pub fn click_submit(&self) {
		self.doc.click(&self.submit_button());
	}

	pub fn advance(&self, by: Duration) {
		self.scheduler.advance(by);
	}
}
