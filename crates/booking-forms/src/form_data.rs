//! Flat snapshot of submitted form values

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered `name -> value` record of a form's named controls.
///
/// Keys keep the order in which the controls appear in the form. Inserting an
/// existing key replaces its value in place, the way `Object.fromEntries`
/// keeps the last value for a repeated name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
	entries: Vec<(String, String)>,
}

impl FormData {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace a value
	///
	/// # Examples
	///
	/// ```
	/// use booking_forms::FormData;
	///
	/// let mut data = FormData::new();
	/// data.insert("name", "Asha");
	/// data.insert("phone", "9876543210");
	/// data.insert("name", "Asha Rao");
	///
	/// assert_eq!(data.get("name"), Some("Asha Rao"));
	/// assert_eq!(data.len(), 2);
	/// ```
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		let name = name.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(k, _)| *k == name) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((name, value)),
		}
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(k, _)| k == name)
			.map(|(_, v)| v.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// JSON object with one string member per entry, in form order.
	pub fn to_json_string(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
	}
}

impl<K, V> FromIterator<(K, V)> for FormData
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let mut data = FormData::new();
		for (k, v) in iter {
			data.insert(k, v);
		}
		data
	}
}

impl Serialize for FormData {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (k, v) in &self.entries {
			map.serialize_entry(k, v)?;
		}
		map.end()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_json_keeps_form_order() {
		let data: FormData = [
			("name", "Asha Rao"),
			("phone", "9876543210"),
			("service", "Haircut"),
		]
		.into_iter()
		.collect();

		assert_eq!(
			data.to_json_string(),
			r#"{"name":"Asha Rao","phone":"9876543210","service":"Haircut"}"#
		);
	}

	#[rstest]
	fn test_repeated_name_keeps_last_value_in_first_position() {
		let data: FormData = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();

		let pairs: Vec<_> = data.iter().collect();
		assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
	}

	#[rstest]
	fn test_empty_form_data() {
		let data = FormData::new();
		assert!(data.is_empty());
		assert_eq!(data.to_json_string(), "{}");
	}
}
