//! Deferred task scheduling
//!
//! The booking form completes its simulated submission after a fixed delay.
//! The delay goes through the [`Scheduler`] trait so that native builds and
//! tests drive time explicitly with [`ManualScheduler`], while the browser
//! uses `window.setTimeout` through `TimeoutScheduler`.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use booking_pages::scheduler::{ManualScheduler, Scheduler};
//!
//! let scheduler = ManualScheduler::new();
//! let fired = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&fired);
//! let handle = scheduler.schedule(Duration::from_millis(500), Box::new(move || flag.set(true)));
//!
//! scheduler.advance(Duration::from_millis(499));
//! assert!(!fired.get());
//! assert!(handle.is_pending());
//!
//! scheduler.advance(Duration::from_millis(1));
//! assert!(fired.get());
//! assert!(!handle.is_pending());
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks after a delay on the current thread.
pub trait Scheduler {
	/// Runs `task` once `delay` has elapsed. The returned handle can cancel
	/// it while it is still pending.
	fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;
}

#[derive(Default)]
struct TaskState {
	cancelled: Cell<bool>,
	finished: Cell<bool>,
	on_cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

/// Handle to a scheduled task. Clones refer to the same task.
#[derive(Clone, Default)]
pub struct TaskHandle {
	state: Rc<TaskState>,
}

impl TaskHandle {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers backend cleanup to run if the task is cancelled.
	pub fn on_cancel<F>(&self, cleanup: F)
	where
		F: FnOnce() + 'static,
	{
		*self.state.on_cancel.borrow_mut() = Some(Box::new(cleanup));
	}

	/// Prevents a pending task from running. No effect once it has run.
	pub fn cancel(&self) {
		if !self.is_pending() {
			return;
		}
		self.state.cancelled.set(true);
		let cleanup = self.state.on_cancel.borrow_mut().take();
		if let Some(cleanup) = cleanup {
			cleanup();
		}
	}

	/// True until the task runs or is cancelled.
	pub fn is_pending(&self) -> bool {
		!self.state.cancelled.get() && !self.state.finished.get()
	}

	pub fn is_cancelled(&self) -> bool {
		self.state.cancelled.get()
	}

	/// Marks the task as run. Returns false if it was cancelled first, in
	/// which case the caller must not run it.
	pub(crate) fn start(&self) -> bool {
		if self.state.cancelled.get() || self.state.finished.get() {
			return false;
		}
		self.state.finished.set(true);
		self.state.on_cancel.borrow_mut().take();
		true
	}
}

impl fmt::Debug for TaskHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TaskHandle")
			.field("cancelled", &self.state.cancelled.get())
			.field("finished", &self.state.finished.get())
			.finish()
	}
}

struct Scheduled {
	due: Duration,
	seq: u64,
	task: Task,
	handle: TaskHandle,
}

/// Virtual-clock scheduler. Time only moves when [`advance`] is called.
///
/// Due tasks run in deadline order; tasks with the same deadline run in the
/// order they were scheduled.
///
/// [`advance`]: ManualScheduler::advance
#[derive(Default)]
pub struct ManualScheduler {
	now: Cell<Duration>,
	next_seq: Cell<u64>,
	queue: RefCell<Vec<Scheduled>>,
}

impl ManualScheduler {
	pub fn new() -> Self {
		Self::default()
	}

	/// Time elapsed on the virtual clock.
	pub fn now(&self) -> Duration {
		self.now.get()
	}

	/// Number of tasks still waiting to run.
	pub fn pending(&self) -> usize {
		self.queue
			.borrow()
			.iter()
			.filter(|s| s.handle.is_pending())
			.count()
	}

	/// Moves the clock forward by `by`, running every task that falls due on
	/// the way, including tasks scheduled by those tasks.
	pub fn advance(&self, by: Duration) {
		let target = self.now.get() + by;
		while let Some(next) = self.pop_due(target) {
			self.now.set(next.due);
			if next.handle.start() {
				(next.task)();
			}
		}
		self.now.set(target);
	}

	/// Runs tasks until none are left, moving the clock to each deadline.
	pub fn run_until_idle(&self) {
		loop {
			let next_due = self
				.queue
				.borrow()
				.iter()
				.map(|s| s.due)
				.min();
			match next_due {
				Some(due) => self.advance(due.saturating_sub(self.now.get())),
				None => break,
			}
		}
	}

	fn pop_due(&self, target: Duration) -> Option<Scheduled> {
		let mut queue = self.queue.borrow_mut();
		let position = queue
			.iter()
			.enumerate()
			.filter(|(_, s)| s.due <= target)
			.min_by_key(|(_, s)| (s.due, s.seq))
			.map(|(i, _)| i)?;
		Some(queue.remove(position))
	}
}

impl Scheduler for ManualScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
		let handle = TaskHandle::new();
		let seq = self.next_seq.get();
		self.next_seq.set(seq + 1);
		self.queue.borrow_mut().push(Scheduled {
			due: self.now.get() + delay,
			seq,
			task,
			handle: handle.clone(),
		});
		handle
	}
}

impl fmt::Debug for ManualScheduler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ManualScheduler")
			.field("now", &self.now.get())
			.field("pending", &self.pending())
			.finish()
	}
}

/// Scheduler backed by `window.setTimeout`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct TimeoutScheduler {
	window: web_sys::Window,
}

#[cfg(target_arch = "wasm32")]
impl TimeoutScheduler {
	pub fn new(window: web_sys::Window) -> Self {
		Self { window }
	}
}

#[cfg(target_arch = "wasm32")]
impl Scheduler for TimeoutScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let handle = TaskHandle::new();
		let callback = Closure::once_into_js({
			let handle = handle.clone();
			move || {
				if handle.start() {
					task();
				}
			}
		});
		let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

		match self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
		{
			Ok(timer_id) => {
				let window = self.window.clone();
				handle.on_cancel(move || window.clear_timeout_with_handle(timer_id));
			}
			Err(e) => {
				error_log!("setTimeout failed: {:?}", e);
				handle.cancel();
			}
		}
		handle
	}
}
