//! Destinations for submitted appointment data.

use std::cell::RefCell;

use booking_forms::FormData;

/// Receives the data of every submission that passed validation.
pub trait SubmissionSink {
	fn submit(&self, data: &FormData);
}

/// Logs the submission as JSON. No data leaves the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
	fn submit(&self, data: &FormData) {
		info_log!("Appointment data: {}", data.to_json_string());
	}
}

/// Keeps every submission in memory, oldest first.
#[derive(Debug, Default)]
pub struct MemorySink {
	received: RefCell<Vec<FormData>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn submissions(&self) -> Vec<FormData> {
		self.received.borrow().clone()
	}

	pub fn last(&self) -> Option<FormData> {
		self.received.borrow().last().cloned()
	}

	pub fn len(&self) -> usize {
		self.received.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.received.borrow().is_empty()
	}
}

impl SubmissionSink for MemorySink {
	fn submit(&self, data: &FormData) {
		self.received.borrow_mut().push(data.clone());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_memory_sink_records_in_order() {
		let sink = MemorySink::new();
		let first: FormData = [("name", "Asha")].into_iter().collect();
		let second: FormData = [("name", "Ravi")].into_iter().collect();

		sink.submit(&first);
		sink.submit(&second);

		assert_eq!(sink.len(), 2);
		assert_eq!(sink.submissions(), vec![first, second.clone()]);
		assert_eq!(sink.last(), Some(second));
	}

	#[test]
	fn test_log_sink_accepts_data() {
		let data: FormData = [("service", "Facial")].into_iter().collect();
		LogSink.submit(&data);
	}
}
