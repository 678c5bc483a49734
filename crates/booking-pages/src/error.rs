//! Errors raised while mounting the site behaviors.
//!
//! Only mounting can fail. Once the behaviors are attached, every event is
//! handled in place and nothing is reported back to the host.

use thiserror::Error;

/// Mount-time failures.
#[derive(Debug, Error)]
pub enum PageError {
	/// An element the behaviors need is not on the page.
	#[error("Required element not found: {0}")]
	MissingElement(String),

	/// Site settings could not be parsed.
	#[error("Invalid site settings: {0}")]
	Settings(#[from] serde_json::Error),

	/// A browser facility the site needs is missing.
	#[error("Browser API unavailable: {0}")]
	Unavailable(String),
}

pub type PageResult<T> = Result<T, PageError>;
