//! Property-based tests for phone number acceptance

use booking_forms::{is_valid_phone, strip_phone_separators};
use proptest::prelude::*;

proptest! {
	/// Property: 10 to 13 digits, with or without a leading plus, are accepted
	#[test]
	fn prop_digit_runs_in_range_are_accepted(
		digits in "[0-9]{10,13}",
		plus in any::<bool>(),
	) {
		let phone = if plus { format!("+{}", digits) } else { digits };
		prop_assert!(is_valid_phone(&phone));
	}

	/// Property: too short or too long digit runs are rejected
	#[test]
	fn prop_digit_runs_out_of_range_are_rejected(
		digits in prop_oneof!["[0-9]{0,9}", "[0-9]{14,20}"],
	) {
		prop_assert!(!is_valid_phone(&digits));
	}

	/// Property: separators never change the verdict
	#[test]
	fn prop_separators_are_ignored(
		digits in "[0-9]{8,15}",
		separators in proptest::collection::vec(prop_oneof![Just(' '), Just('-'), Just('('), Just(')')], 0..6),
	) {
		let mut decorated = String::new();
		let mut seps = separators.iter();
		for (i, c) in digits.chars().enumerate() {
			if i % 3 == 0 {
				if let Some(sep) = seps.next() {
					decorated.push(*sep);
				}
			}
			decorated.push(c);
		}

		prop_assert_eq!(strip_phone_separators(&decorated), digits.clone());
		prop_assert_eq!(is_valid_phone(&decorated), is_valid_phone(&digits));
	}

	/// Property: a dot anywhere makes the number invalid
	#[test]
	fn prop_dots_are_not_separators(
		head in "[0-9]{5,6}",
		tail in "[0-9]{5,6}",
	) {
		let dotted = format!("{}.{}", head, tail);
		prop_assert!(!is_valid_phone(&dotted));
	}
}
