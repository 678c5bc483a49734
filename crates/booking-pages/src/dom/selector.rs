//! Minimal CSS selector matching for the in-memory document.
//!
//! Supports selector lists of compound selectors built from a tag name,
//! `#id`, `.class`, `[attr]`, `[attr="value"]` and `[attr^="prefix"]`.
//! Combinators are not supported; a selector that fails to parse matches
//! nothing.

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
	Exists,
	Equals(String),
	Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
	Id(String),
	Class(String),
	Attr(String, AttrOp),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Compound {
	tag: Option<String>,
	parts: Vec<Part>,
}

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
	alternatives: Vec<Compound>,
}

impl Selector {
	/// Parses a comma-separated selector list.
	///
	/// # Examples
	///
	/// ```
	/// use booking_pages::dom::selector::Selector;
	///
	/// assert!(Selector::parse("input, select, textarea").is_some());
	/// assert!(Selector::parse(r##"a[href^="#"]"##).is_some());
	/// assert!(Selector::parse("nav a").is_none());
	/// ```
	pub fn parse(input: &str) -> Option<Self> {
		let alternatives = input
			.split(',')
			.map(|s| parse_compound(s.trim()))
			.collect::<Option<Vec<_>>>()?;
		if alternatives.is_empty() {
			return None;
		}
		Some(Self { alternatives })
	}

	/// Tests an element described by its lowercase `tag` and an attribute
	/// lookup.
	pub fn matches<F>(&self, tag: &str, attribute: F) -> bool
	where
		F: Fn(&str) -> Option<String>,
	{
		self.alternatives
			.iter()
			.any(|compound| compound_matches(compound, tag, &attribute))
	}
}

fn compound_matches<F>(compound: &Compound, tag: &str, attribute: &F) -> bool
where
	F: Fn(&str) -> Option<String>,
{
	if let Some(expected) = &compound.tag
		&& expected != tag
	{
		return false;
	}
	compound.parts.iter().all(|part| match part {
		Part::Id(id) => attribute("id").as_deref() == Some(id.as_str()),
		Part::Class(class) => attribute("class")
			.map(|classes| classes.split_whitespace().any(|c| c == class))
			.unwrap_or(false),
		Part::Attr(name, op) => match (attribute(name), op) {
			(None, _) => false,
			(Some(_), AttrOp::Exists) => true,
			(Some(value), AttrOp::Equals(expected)) => value == *expected,
			(Some(value), AttrOp::Prefix(prefix)) => value.starts_with(prefix.as_str()),
		},
	})
}

fn is_ident_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(input: &str) -> (&str, &str) {
	let end = input
		.char_indices()
		.find(|(_, c)| !is_ident_char(*c))
		.map(|(i, _)| i)
		.unwrap_or(input.len());
	input.split_at(end)
}

fn parse_compound(input: &str) -> Option<Compound> {
	if input.is_empty() {
		return None;
	}

	let (tag, mut rest) = take_ident(input);
	let tag = (!tag.is_empty()).then(|| tag.to_ascii_lowercase());
	let mut parts = Vec::new();

	while let Some(first) = rest.chars().next() {
		match first {
			'#' | '.' => {
				let (name, tail) = take_ident(&rest[1..]);
				if name.is_empty() {
					return None;
				}
				parts.push(if first == '#' {
					Part::Id(name.to_string())
				} else {
					Part::Class(name.to_string())
				});
				rest = tail;
			}
			'[' => {
				let close = rest.find(']')?;
				parts.push(parse_attribute(&rest[1..close])?);
				rest = &rest[close + 1..];
			}
			_ => return None,
		}
	}

	Some(Compound { tag, parts })
}

fn parse_attribute(inner: &str) -> Option<Part> {
	let (name, op) = if let Some((name, value)) = inner.split_once("^=") {
		(name, AttrOp::Prefix(unquote(value)?))
	} else if let Some((name, value)) = inner.split_once('=') {
		(name, AttrOp::Equals(unquote(value)?))
	} else {
		(inner, AttrOp::Exists)
	};
	let name = name.trim();
	if name.is_empty() || !name.chars().all(is_ident_char) {
		return None;
	}
	Some(Part::Attr(name.to_string(), op))
}

fn unquote(value: &str) -> Option<String> {
	let value = value.trim();
	for quote in ['"', '\''] {
		if let Some(inner) = value
			.strip_prefix(quote)
			.and_then(|v| v.strip_suffix(quote))
		{
			return Some(inner.to_string());
		}
	}
	value.chars().all(is_ident_char).then(|| value.to_string())
}
