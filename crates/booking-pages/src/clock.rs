//! Source of "today" for the booking date lower bound.

use chrono::{Local, NaiveDate};

/// Provides the current calendar date.
pub trait Clock {
	fn today(&self) -> NaiveDate;
}

/// The host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn today(&self) -> NaiveDate {
		Local::now().date_naive()
	}
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
	fn today(&self) -> NaiveDate {
		self.0
	}
}
