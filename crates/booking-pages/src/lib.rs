//! Booking Pages - browser behavior layer for the booking site
//!
//! Compiled to WebAssembly, this crate attaches the interactive behavior of a
//! small booking website to its server-rendered markup. Compiled natively, it
//! runs the same behaviors against an in-memory document for tests.
//!
//! ## Features
//!
//! - **Booking form**: client-side validation, a submit lock while a simulated
//!   submission is in flight, and a confirmation modal on completion
//! - **Navigation**: mobile menu toggle, navbar scroll style, smooth in-page scrolling
//! - **Reveal on scroll**: with an immediate fallback for hosts without visibility observation
//! - **Low-level only**: built on wasm-bindgen, web-sys and js-sys
//!
//! ## Architecture
//!
//! - [`dom`]: `Document`/`Element` traits, in-memory and browser implementations
//! - [`callback`], [`events`]: handlers and listener bookkeeping
//! - [`scheduler`], [`clock`]: time, injectable for tests
//! - [`form`](mod@form): error presentation, submission sinks and the [`BookingFormController`]
//! - [`modal`]: confirmation modal lifecycle
//! - [`site`]: menu, navbar, smooth scroll, reveal, date lower bound
//! - [`settings`]: ids, selectors, classes and timings
//! - [`app`]: [`BookingSite::mount`], the entry point
//!
//! ## Example
//!
//! ```ignore
//! // In the browser
//! await init();
//! startBookingSite();
//! ```

// Logging macros must come first so every later module can use them
#[macro_use]
pub mod logging;

pub mod app;
pub mod callback;
pub mod clock;
pub mod dom;
pub mod error;
pub mod events;
pub mod form;
pub mod modal;
pub mod scheduler;
pub mod settings;
pub mod site;
// Testing utilities (available on both WASM and native)
pub mod testing;

pub use app::{BookingSite, SiteServices};
#[cfg(target_arch = "wasm32")]
pub use app::start_booking_site;
pub use callback::Callback;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dom::{Document, Element, ElementRef, Event, EventHandle, EventType};
pub use error::{PageError, PageResult};
pub use events::EventRegistry;
pub use form::{
	BookingFormController, DomErrorPresenter, FieldErrorPresenter, FormContext, FormElements,
	LogSink, MemorySink, SubmissionSink, SubmissionState,
};
pub use modal::{DomModal, ModalLifecycle};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle};
#[cfg(target_arch = "wasm32")]
pub use scheduler::TimeoutScheduler;
pub use settings::SiteSettings;
pub use site::{MobileMenu, NavbarScroll, RevealOnScroll, SmoothScroll, apply_min_date};

// Re-export the platform-independent half
pub use booking_forms;
