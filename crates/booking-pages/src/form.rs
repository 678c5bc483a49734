//! Booking form behavior
//!
//! This module connects the `booking-forms` schema to the page:
//!
//! - [`errors`]: presenting and clearing per-field errors next to each control
//! - [`sink`]: where a successful submission's data goes
//! - [`controller`]: the validation and submission state machine
//!
//! ## Submission lifecycle
//!
//! ```text
//! Idle ──submit (all valid)──▶ Submitting ──delay──▶ Completed
//!   ▲  ◀─submit (invalid): errors shown, no change      │
//!   │                                                   │
//!   └───────────── Completed ──submit (all valid)───────┘ (to Submitting)
//! ```
//!
//! While Submitting the submit control is disabled, and further submits are
//! ignored until the completion runs.

pub mod controller;
pub mod errors;
pub mod sink;

pub use controller::{BookingFormController, FormContext, FormElements, SubmissionState};
pub use errors::{DomErrorPresenter, FieldErrorPresenter};
pub use sink::{LogSink, MemorySink, SubmissionSink};
