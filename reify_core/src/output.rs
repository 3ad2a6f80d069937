use derive_more::Deref;

use crate::InputTemplate;
use crate::ReifyError;
use crate::ReifyResult;
use crate::Segment;
use crate::TemplateKind;
use crate::input::is_label;
use crate::scanner::is_slot_grammar;
use crate::scanner::scan;

/// Classification of an output slot token, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputSlotKind {
	/// `{{1 2 3}}`
	SpaceSeparatedNumbers(Vec<usize>),
	/// `{{1..3}}`, inclusive on both ends.
	Range { start: usize, end: usize },
	/// `{{2}}`
	SingleNumber(usize),
	/// `{{author title}}`. Elements that are plain numbers are resolved by
	/// position.
	SpaceSeparatedNames(Vec<String>),
	/// `{{title}}`
	SingleName(String),
}

impl OutputSlotKind {
	/// Classify a raw slot token. Returns `None` when the token has none of the
	/// recognised shapes.
	pub fn classify(token: &str) -> Option<Self> {
		let parts: Vec<&str> = token.split_whitespace().collect();

		match parts.as_slice() {
			[] => None,
			[single] => {
				if let Some((start, end)) = single.split_once("..") {
					return Some(Self::Range {
						start: parse_number(start)?,
						end: parse_number(end)?,
					});
				}

				if let Some(number) = parse_number(single) {
					return Some(Self::SingleNumber(number));
				}

				is_label(single).then(|| Self::SingleName((*single).to_string()))
			}
			_ => {
				let numbers: Option<Vec<usize>> = parts.iter().map(|part| parse_number(part)).collect();
				if let Some(numbers) = numbers {
					return Some(Self::SpaceSeparatedNumbers(numbers));
				}

				parts
					.iter()
					.all(|part| is_label(part))
					.then(|| Self::SpaceSeparatedNames(parts.iter().map(ToString::to_string).collect()))
			}
		}
	}
}

fn parse_number(text: &str) -> Option<usize> {
	if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
		return None;
	}

	text.parse().ok()
}

/// A resolved reference from an output slot to an input capture group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Backreference {
	/// 1-indexed capture group number.
	Index(usize),
	/// Stored name of a named input slot.
	Name(String),
}

/// One `{{...}}` occurrence in an output template, bound to the input template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSlot {
	pub token: String,
	pub kind: OutputSlotKind,
	/// The capture groups spliced in, concatenated without separators.
	pub references: Vec<Backreference>,
	pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode {
	Literal(String),
	Slot(OutputSlot),
}

/// An output template whose slots have all been bound to capture groups of an
/// [`InputTemplate`].
#[derive(Debug, Clone, Deref)]
pub struct OutputTemplate {
	#[deref]
	nodes: Vec<OutputNode>,
}

impl OutputTemplate {
	/// Scan, classify and bind an output template. Any slot that refers to a
	/// group `input` does not define fails here rather than at substitution.
	pub fn parse(source: &str, input: &InputTemplate) -> ReifyResult<Self> {
		let mut nodes = Vec::new();

		for segment in scan(TemplateKind::Output, source) {
			match segment? {
				Segment::Literal { text, .. } => nodes.push(OutputNode::Literal(text.to_string())),
				Segment::Slot { token, span } => {
					let invalid = || {
						ReifyError::InvalidSlotToken {
							kind: TemplateKind::Output,
							token: token.to_string(),
							offset: span.start,
						}
					};

					if !is_slot_grammar(token) {
						return Err(invalid());
					}

					let kind = OutputSlotKind::classify(token).ok_or_else(invalid)?;
					let references = bind(&kind, input)?;
					tracing::trace!(token, ?references, "bound output slot");

					nodes.push(OutputNode::Slot(OutputSlot {
						token: token.to_string(),
						kind,
						references,
						offset: span.start,
					}));
				}
			}
		}

		Ok(Self { nodes })
	}

	/// All slots in order of appearance.
	pub fn slots(&self) -> impl Iterator<Item = &OutputSlot> {
		self.nodes.iter().filter_map(|node| {
			match node {
				OutputNode::Slot(slot) => Some(slot),
				OutputNode::Literal(_) => None,
			}
		})
	}
}

fn bind(kind: &OutputSlotKind, input: &InputTemplate) -> ReifyResult<Vec<Backreference>> {
	match kind {
		OutputSlotKind::SpaceSeparatedNumbers(numbers) => {
			numbers
				.iter()
				.map(|&number| bind_number(number, input))
				.collect()
		}
		OutputSlotKind::Range { start, end } => {
			if start > end {
				return Err(ReifyError::InvalidRange {
					start: *start,
					end: *end,
				});
			}

			(*start..=*end)
				.map(|number| bind_number(number, input))
				.collect()
		}
		OutputSlotKind::SingleNumber(number) => Ok(vec![bind_number(*number, input)?]),
		OutputSlotKind::SpaceSeparatedNames(names) => {
			names
				.iter()
				.map(|name| {
					match parse_number(name) {
						Some(number) => bind_number(number, input),
						None => bind_name(name, input),
					}
				})
				.collect()
		}
		OutputSlotKind::SingleName(name) => Ok(vec![bind_name(name, input)?]),
	}
}

fn bind_number(number: usize, input: &InputTemplate) -> ReifyResult<Backreference> {
	input.resolve_number(number).map(Backreference::Index)
}

fn bind_name(name: &str, input: &InputTemplate) -> ReifyResult<Backreference> {
	input.resolve_name(name)?;
	Ok(Backreference::Name(name.to_string()))
}
