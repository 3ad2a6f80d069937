use std::ops::Range;

use regex::Captures;
use serde::Serialize;

/// The text captured by one slot of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptureSpan {
	/// 1-indexed capture group number.
	pub index: usize,
	/// Stored name of the slot, if it was labelled.
	pub name: Option<String>,
	/// Byte offsets into the searched document.
	pub span: Range<usize>,
	pub text: String,
}

/// One occurrence of a compiled input template in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotMatch {
	/// Byte offsets of the whole match in the searched document.
	pub span: Range<usize>,
	pub text: String,
	/// Capturing slots in group order. Groups that did not participate in the
	/// match are left out.
	pub groups: Vec<CaptureSpan>,
}

impl SlotMatch {
	pub(crate) fn from_captures(captures: &Captures<'_>, names: &[Option<String>]) -> Self {
		let whole = captures.get(0).map_or(0..0, |m| m.range());
		let groups = names
			.iter()
			.enumerate()
			.filter_map(|(offset, name)| {
				let index = offset + 1;
				captures.get(index).map(|m| {
					CaptureSpan {
						index,
						name: name.clone(),
						span: m.range(),
						text: m.as_str().to_string(),
					}
				})
			})
			.collect();

		Self {
			text: captures.get(0).map_or_else(String::new, |m| m.as_str().to_string()),
			span: whole,
			groups,
		}
	}

	/// The capture for the slot stored under `name`.
	pub fn group(&self, name: &str) -> Option<&CaptureSpan> {
		self.groups
			.iter()
			.find(|group| group.name.as_deref() == Some(name))
	}

	/// The capture for group number `index` (1-indexed).
	pub fn group_at(&self, index: usize) -> Option<&CaptureSpan> {
		self.groups.iter().find(|group| group.index == index)
	}

	/// Split the match into literal and captured spans. See [`highlight`].
	pub fn highlight(&self) -> Vec<HighlightSpan> {
		highlight(self)
	}
}

/// A piece of a match, for rendering captured text distinctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
	/// Byte offsets relative to the start of the match.
	pub span: Range<usize>,
	pub text: String,
	pub captured: bool,
}

/// Decompose a match into alternating literal and captured spans, in group
/// order. Gaps between groups are literal text. Zero-width captures produce no
/// span.
pub fn highlight(slot_match: &SlotMatch) -> Vec<HighlightSpan> {
	let base = slot_match.span.start;
	let len = slot_match.text.len();
	let mut spans: Vec<HighlightSpan> = Vec::new();
	let mut cursor = 0;

	let mut push = |range: Range<usize>, captured: bool| {
		if range.is_empty() {
			return;
		}

		// An empty capture between two literal runs leaves them adjacent.
		if let Some(last) = spans.last_mut() {
			if !last.captured && !captured && last.span.end == range.start {
				last.span.end = range.end;
				last.text.push_str(&slot_match.text[range]);
				return;
			}
		}

		spans.push(HighlightSpan {
			text: slot_match.text[range.clone()].to_string(),
			span: range,
			captured,
		});
	};

	for group in &slot_match.groups {
		let start = group.span.start.saturating_sub(base).clamp(cursor, len);
		let end = group.span.end.saturating_sub(base).clamp(start, len);

		push(cursor..start, false);
		push(start..end, true);
		cursor = end;
	}

	push(cursor..len, false);

	spans
}
