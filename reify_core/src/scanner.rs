use std::fmt;
use std::ops::Range;

use logos::Lexer;
use logos::Logos;
use serde::Deserialize;
use serde::Serialize;

use crate::ReifyError;
use crate::ReifyResult;

/// Which side of a find-and-replace a template describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
	/// The shape being searched for. Compiles to a pattern.
	Input,
	/// The shape it is rewritten into. Compiles to a replacement.
	Output,
}

impl fmt::Display for TemplateKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Input => f.write_str("input"),
			Self::Output => f.write_str("output"),
		}
	}
}

/// Raw tokens produced by logos. Every byte of the template belongs to exactly
/// one of these, so the lexer never errors.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
	#[token("{{")]
	SlotOpen,
	#[token("}}")]
	SlotClose,
	#[token("{")]
	BraceOpen,
	#[token("}")]
	BraceClose,
	#[regex(r"[^{}]+")]
	Text,
}

/// A piece of template text: either literal text or the body of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
	/// Text outside of any `{{...}}` marker, borrowed from the template.
	Literal { text: &'a str, span: Range<usize> },
	/// The token between `{{` and `}}`. `span` covers the markers as well.
	Slot { token: &'a str, span: Range<usize> },
}

impl<'a> Segment<'a> {
	pub fn span(&self) -> Range<usize> {
		match self {
			Self::Literal { span, .. } | Self::Slot { span, .. } => span.clone(),
		}
	}

	pub fn token(&self) -> Option<&'a str> {
		match self {
			Self::Slot { token, .. } => Some(token),
			Self::Literal { .. } => None,
		}
	}
}

/// Lazily splits a template into literal and slot segments, left to right.
///
/// Scanning the same text twice always yields the same sequence. Once an
/// unterminated `{{` has been reported the scanner is exhausted.
pub struct SlotScanner<'a> {
	kind: TemplateKind,
	source: &'a str,
	lexer: Lexer<'a, RawToken>,
	/// Start of the literal run that has not been emitted yet.
	literal_start: usize,
	/// A slot found while a literal run was pending. Emitted on the next call.
	pending: Option<Segment<'a>>,
	finished: bool,
}

impl<'a> SlotScanner<'a> {
	pub fn new(kind: TemplateKind, source: &'a str) -> Self {
		Self {
			kind,
			source,
			lexer: RawToken::lexer(source),
			literal_start: 0,
			pending: None,
			finished: false,
		}
	}

	/// Consume raw tokens until the `}}` matching an already consumed `{{`.
	/// Returns the byte offset of the closing marker.
	fn find_slot_close(&mut self) -> Option<usize> {
		while let Some(raw) = self.lexer.next() {
			if raw == Ok(RawToken::SlotClose) {
				return Some(self.lexer.span().start);
			}
		}

		None
	}

	fn take_literal(&mut self, end: usize) -> Option<Segment<'a>> {
		let start = self.literal_start;
		if start == end {
			return None;
		}

		Some(Segment::Literal {
			text: &self.source[start..end],
			span: start..end,
		})
	}
}

impl<'a> Iterator for SlotScanner<'a> {
	type Item = ReifyResult<Segment<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if let Some(segment) = self.pending.take() {
			return Some(Ok(segment));
		}

		if self.finished {
			return None;
		}

		while let Some(raw) = self.lexer.next() {
			if raw != Ok(RawToken::SlotOpen) {
				continue;
			}

			let open = self.lexer.span();
			let Some(close) = self.find_slot_close() else {
				self.finished = true;
				return Some(Err(ReifyError::MalformedTemplate {
					kind: self.kind,
					offset: open.start,
				}));
			};

			let slot = Segment::Slot {
				token: &self.source[open.end..close],
				span: open.start..close + 2,
			};
			let literal = self.take_literal(open.start);
			self.literal_start = close + 2;

			return match literal {
				Some(literal) => {
					self.pending = Some(slot);
					Some(Ok(literal))
				}
				None => Some(Ok(slot)),
			};
		}

		self.finished = true;
		self.take_literal(self.source.len()).map(Ok)
	}
}

/// Scan `source` into segments.
pub fn scan(kind: TemplateKind, source: &str) -> SlotScanner<'_> {
	SlotScanner::new(kind, source)
}

/// Collect only the slot tokens of `source`, in order of appearance.
pub fn slot_tokens(kind: TemplateKind, source: &str) -> ReifyResult<Vec<&str>> {
	scan(kind, source)
		.filter_map(|segment| {
			match segment {
				Ok(segment) => segment.token().map(Ok),
				Err(error) => Some(Err(error)),
			}
		})
		.collect()
}

/// Whether a slot token only uses the characters allowed inside `{{...}}`.
pub(crate) fn is_slot_grammar(token: &str) -> bool {
	token
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | ':' | ' ' | '-' | '_'))
}
