//! Page-wide behaviors outside the booking form
//!
//! - [`menu`]: mobile navigation toggle, closed by outside clicks
//! - [`navbar`]: navbar style once the page is scrolled
//! - [`smooth_scroll`]: smooth scrolling to in-page anchors
//! - [`reveal`]: reveal-on-scroll
//! - [`date_bound`]: earliest bookable date

pub mod date_bound;
pub mod menu;
pub mod navbar;
pub mod reveal;
pub mod smooth_scroll;

pub use date_bound::apply_min_date;
pub use menu::MobileMenu;
pub use navbar::NavbarScroll;
pub use reveal::RevealOnScroll;
pub use smooth_scroll::SmoothScroll;
