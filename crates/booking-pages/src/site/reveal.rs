//! Reveal-on-scroll

use std::rc::Rc;

use crate::callback::Callback;
use crate::dom::{Document, IntersectionBatch, VisibilityObserver};
use crate::settings::RevealSettings;

/// Shows each reveal element the first time it scrolls into view.
///
/// When the host cannot observe visibility, every element is shown at once.
pub struct RevealOnScroll {
	observer: Option<Rc<dyn VisibilityObserver>>,
	count: usize,
}

impl RevealOnScroll {
	/// Finds the reveal elements and starts observing them.
	pub fn mount(document: &dyn Document, settings: &RevealSettings) -> Self {
		let elements = document.query_selector_all(&settings.selector);
		let visible_class = settings.visible_class.clone();

		let on_batch = Callback::new(move |batch: IntersectionBatch| {
			for entry in batch.entries.iter().filter(|e| e.is_intersecting) {
				entry.target.add_class(&visible_class);
				batch.observer.unobserve(entry.target.as_ref());
			}
		});

		let observer = document.visibility_observer(settings.threshold, on_batch);
		match &observer {
			Some(observer) => {
				for element in &elements {
					observer.observe(element.as_ref());
				}
			}
			None => {
				debug_log!("Visibility observation unavailable; revealing {} element(s)", elements.len());
				for element in &elements {
					element.add_class(&settings.visible_class);
				}
			}
		}

		Self {
			observer,
			count: elements.len(),
		}
	}

	/// Whether elements are revealed as they scroll in, rather than all at
	/// mount.
	pub fn is_observing(&self) -> bool {
		self.observer.is_some()
	}

	/// Number of reveal elements found at mount.
	pub fn len(&self) -> usize {
		self.count
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	/// Stops observing every element.
	pub fn disconnect(&self) {
		if let Some(observer) = &self.observer {
			observer.disconnect();
		}
	}
}

impl Drop for RevealOnScroll {
	fn drop(&mut self) {
		self.disconnect();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dom::ElementRef;
	use crate::dom::memory::MemoryDocument;
	use rstest::{fixture, rstest};

	struct RevealPage {
		doc: MemoryDocument,
		sections: Vec<ElementRef>,
		plain: ElementRef,
	}

	#[fixture]
	fn page() -> RevealPage {
		let doc = MemoryDocument::new();
		let body = doc.body().unwrap();
		let sections = (0..3)
			.map(|i| {
				let id = format!("s{i}");
				doc.append(&body, "section", &[("id", id.as_str()), ("class", "reveal")])
			})
			.collect();
		let plain = doc.append(&body, "section", &[("id", "plain")]);
		RevealPage {
			doc,
			sections,
			plain,
		}
	}

	#[rstest]
	fn test_intersecting_element_is_revealed_and_unobserved(page: RevealPage) {
		// Arrange
		let reveal = RevealOnScroll::mount(&page.doc, &RevealSettings::default());
		let first = &page.sections[0];

		// Act
		page.doc.intersect(first, true);

		// Assert
		assert!(reveal.is_observing());
		assert_eq!(reveal.len(), 3);
		assert!(first.has_class("visible"));
		assert!(!page.doc.is_observed(first));
		assert!(!page.sections[1].has_class("visible"));
		assert!(page.doc.is_observed(&page.sections[1]));
	}

	#[rstest]
	fn test_non_intersecting_entry_is_ignored(page: RevealPage) {
		let _reveal = RevealOnScroll::mount(&page.doc, &RevealSettings::default());

		page.doc.intersect(&page.sections[2], false);

		assert!(!page.sections[2].has_class("visible"));
		assert!(page.doc.is_observed(&page.sections[2]));
	}

	#[rstest]
	fn test_fallback_reveals_everything(page: RevealPage) {
		page.doc.set_visibility_observers_supported(false);

		let reveal = RevealOnScroll::mount(&page.doc, &RevealSettings::default());

		assert!(!reveal.is_observing());
		assert!(page.sections.iter().all(|s| s.has_class("visible")));
		assert!(!page.plain.has_class("visible"));
	}
}
