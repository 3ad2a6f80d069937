//! Rendering of compiled templates into the syntax of the [`regex`] crate.
//!
//! Everything that depends on the target engine's pattern and replacement
//! syntax lives here: capture-group naming rules, fragment shapes, and the
//! escaping of replacement literals.

use crate::Backreference;
use crate::InputNode;
use crate::InputSlot;
use crate::InputSlotKind;
use crate::InputTemplate;
use crate::OutputNode;
use crate::OutputTemplate;
use crate::escape::normalize_literal;

/// Matches any run of characters on a single line.
const WILDCARD: &str = ".*";

/// The capture-group name used in the pattern for a stored slot name.
///
/// Group names may only contain `[A-Za-z0-9_]`, so `-` is mapped to `_`.
pub fn group_name(stored: &str) -> String {
	stored.replace('-', "_")
}

/// Render one input slot as a pattern fragment.
pub fn render_input_slot(slot: &InputSlot) -> String {
	match &slot.kind {
		InputSlotKind::Null => format!("(?:{WILDCARD})"),
		InputSlotKind::Quantified { repeated } => format!("(?:{})*", regex::escape(repeated)),
		InputSlotKind::Named { name } => format!("(?P<{}>{WILDCARD})", group_name(name)),
		InputSlotKind::Positional | InputSlotKind::Other => format!("({WILDCARD})"),
	}
}

/// Render a parsed input template as pattern source.
pub fn render_pattern(template: &InputTemplate, conserve_whitespace: bool) -> String {
	let mut pattern = String::new();

	for node in template.iter() {
		match node {
			InputNode::Literal(text) => pattern.push_str(&normalize_literal(text, conserve_whitespace)),
			InputNode::Slot(slot) => pattern.push_str(&render_input_slot(slot)),
		}
	}

	pattern
}

/// Render a single backreference. Always braced so trailing literal text can't
/// extend the reference.
pub fn render_backreference(reference: &Backreference) -> String {
	match reference {
		Backreference::Index(index) => format!("${{{index}}}"),
		Backreference::Name(name) => format!("${{{}}}", group_name(name)),
	}
}

/// Escape literal output-template text for use in a replacement.
pub fn escape_replacement_literal(text: &str) -> String {
	text.replace('$', "$$")
}

/// Render a bound output template as replacement source.
pub fn render_replacement(template: &OutputTemplate) -> String {
	let mut replacement = String::new();

	for node in template.iter() {
		match node {
			OutputNode::Literal(text) => replacement.push_str(&escape_replacement_literal(text)),
			OutputNode::Slot(slot) => {
				for reference in &slot.references {
					replacement.push_str(&render_backreference(reference));
				}
			}
		}
	}

	replacement
}
