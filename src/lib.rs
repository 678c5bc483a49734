//! # Booking Site
//!
//! Client-side behavior for a salon booking site.
//!
//! The site is a single static page. This crate adds the interactive layer
//! on top of its markup: the mobile menu, the navbar scroll style, smooth
//! in-page scrolling, reveal-on-scroll sections, the appointment form with
//! its validation and submission lifecycle, and the confirmation modal.
//!
//! ## Feature Flags
//!
//! - `forms` - Field definitions and validation (no DOM)
//! - `pages` - Browser behaviors, including the form controller
//! - `full` (default) - Everything
//! - `console-panic-hook` - Readable panics in the browser console
//!
//! ## Crates
//!
//! - [`forms`] (`booking-forms`): the appointment form schema, validators
//!   and the captured [`FormData`] snapshot
//! - [`pages`] (`booking-pages`): the DOM abstraction, the in-memory document
//!   used by tests, and every page behavior
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "pages")]
//! # {
//! use std::time::Duration;
//! use booking::pages::testing::BookingPage;
//!
//! let page = BookingPage::mount();
//! page.fill_valid();
//! page.click_submit();
//! page.advance(Duration::from_millis(500));
//!
//! assert!(page.site.modal().is_open());
//! assert_eq!(page.sink.len(), 1);
//! # }
//! ```

#[cfg(feature = "forms")]
pub use booking_forms as forms;
#[cfg(feature = "pages")]
pub use booking_pages as pages;

// Form schema and validation
#[cfg(feature = "forms")]
pub use booking_forms::{
	BookingForm, FieldValidationError, FormData, PhoneValidator, ValidationResult, is_valid_phone,
};

// Page behaviors
#[cfg(feature = "pages")]
pub use booking_pages::{
	BookingFormController, BookingSite, Document, Element, PageError, SiteServices, SiteSettings,
	SubmissionState,
};

#[cfg(all(feature = "pages", target_arch = "wasm32"))]
pub use booking_pages::start_booking_site;
