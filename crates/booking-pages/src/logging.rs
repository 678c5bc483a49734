//! Logging abstraction layer for booking-pages
//!
//! These macros route to `tracing` on native targets and to the browser
//! console on WASM, so the same call sites work in tests and in the page.
//!
//! ## Macro Overview
//!
//! | Macro | WASM | Non-WASM |
//! |-------|------|----------|
//! | `debug_log!` | `console.debug` (debug builds only) | `tracing::debug!` |
//! | `info_log!` | `console.info` (debug builds only) | `tracing::info!` |
//! | `warn_log!` | `console.warn` | `tracing::warn!` |
//! | `error_log!` | `console.error` | `tracing::error!` |
//!
//! On native targets filtering is left to whichever `tracing` subscriber the
//! host installs.
//!
//! ## Example
//!
//! ```ignore
//! use booking_pages::{debug_log, info_log};
//!
//! debug_log!("Submission state: {:?}", state);
//! info_log!("Appointment data: {}", data.to_json_string());
//! ```

#[doc(hidden)]
#[cfg(not(target_arch = "wasm32"))]
pub use tracing as __tracing;

#[doc(hidden)]
#[cfg(target_arch = "wasm32")]
pub use web_sys as __web_sys;

/// Logs a debug message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::logging::__tracing::debug!("{}", format!($($arg)*));
	}};
}

/// Logs a debug message to the browser console (debug builds only).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{
		$crate::logging::__web_sys::console::debug_1(&format!($($arg)*).into());
	}};
}

/// No-op debug_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! debug_log {
	($($arg:tt)*) => {{}};
}

/// Logs an info message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::logging::__tracing::info!("{}", format!($($arg)*));
	}};
}

/// Logs an info message to the browser console (debug builds only).
#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{
		$crate::logging::__web_sys::console::info_1(&format!($($arg)*).into());
	}};
}

/// No-op info_log in WASM release builds
#[macro_export]
#[cfg(all(not(debug_assertions), target_arch = "wasm32"))]
macro_rules! info_log {
	($($arg:tt)*) => {{}};
}

/// Logs a warning message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::logging::__tracing::warn!("{}", format!($($arg)*));
	}};
}

/// Logs a warning message to the browser console.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! warn_log {
	($($arg:tt)*) => {{
		$crate::logging::__web_sys::console::warn_1(&format!($($arg)*).into());
	}};
}

/// Logs an error message.
#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::logging::__tracing::error!("{}", format!($($arg)*));
	}};
}

/// Logs an error message to the browser console.
#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
	($($arg:tt)*) => {{
		$crate::logging::__web_sys::console::error_1(&format!($($arg)*).into());
	}};
}
