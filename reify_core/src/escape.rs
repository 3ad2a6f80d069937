use std::borrow::Cow;
use std::sync::LazyLock;

use regex::NoExpand;
use regex::Regex;

/// Characters in literal input-template text that are escaped before the text
/// is embedded in the compiled pattern.
pub const ESCAPED_CHARACTERS: &[char] = &['\\', '[', '(', '=', '/', '!', '|', '?', '"', '\'', '.'];

/// The pattern substituted for collapsed whitespace.
pub const FLEXIBLE_WHITESPACE: &str = r"\s*";

static WHITESPACE_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s{2,}|\n").expect("whitespace run pattern is valid"));

/// Prefix every character of [`ESCAPED_CHARACTERS`] with a backslash.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
	if !text.contains(ESCAPED_CHARACTERS) {
		return Cow::Borrowed(text);
	}

	let mut escaped = String::with_capacity(text.len() + 8);
	for c in text.chars() {
		if ESCAPED_CHARACTERS.contains(&c) {
			escaped.push('\\');
		}
		escaped.push(c);
	}

	Cow::Owned(escaped)
}

/// Replace every newline, and every run of two or more whitespace characters,
/// with [`FLEXIBLE_WHITESPACE`]. Single spaces and tabs are kept as-is.
pub fn compress_whitespace(text: &str) -> Cow<'_, str> {
	WHITESPACE_RUN.replace_all(text, NoExpand(FLEXIBLE_WHITESPACE))
}

/// Make literal input-template text safe to embed in a pattern.
pub fn normalize_literal(text: &str, conserve_whitespace: bool) -> String {
	let escaped = escape_literal(text);
	if conserve_whitespace {
		return escaped.into_owned();
	}

	compress_whitespace(&escaped).into_owned()
}
