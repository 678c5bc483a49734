//! Callback types for event handlers.
//!
//! The page runs on a single thread, so callbacks are `Rc`-backed and carry no
//! `Send`/`Sync` bounds on any target.
//!
//! ## Example
//!
//! ```ignore
//! use booking_pages::{Callback, EventType};
//!
//! let on_click = Callback::new(|_event| {
//!     info_log!("Clicked!");
//! });
//! element.on(EventType::Click, on_click);
//! ```

use std::rc::Rc;

use crate::dom::Event;

/// A cloneable callback wrapper for event handlers.
///
/// ## Type Parameters
///
/// - `Args`: The argument type the callback receives (defaults to [`Event`])
/// - `Ret`: The return type of the callback (defaults to `()`)
pub struct Callback<Args = Event, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

impl<F, Args, Ret> From<F> for Callback<Args, Ret>
where
	F: Fn(Args) -> Ret + 'static,
{
	fn from(f: F) -> Self {
		Self::new(f)
	}
}
