use std::collections::HashSet;

use derive_more::Deref;

use crate::ReifyError;
use crate::ReifyResult;
use crate::Segment;
use crate::TemplateKind;
use crate::dialect;
use crate::scanner::is_slot_grammar;
use crate::scanner::scan;

/// Classification of an input slot token. Rules are tested in declaration
/// order and the first one that applies wins.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputSlotKind {
	/// `{{:}}`: discardable content. Captures nothing and is not numbered.
	Null,
	/// `{{:x}}`: zero or more repetitions of the literal text after the colon.
	/// Captures nothing and is not numbered.
	Quantified { repeated: String },
	/// `{{label}}`: a capture group bound to `name`. Labels that start with a
	/// digit or `-` are stored with a leading `_`.
	Named { name: String },
	/// `{{}}`: a capture group reachable only by its position.
	Positional,
	/// Any other in-grammar token, e.g. `{{a b}}`. Captures anonymously.
	Other,
}

impl InputSlotKind {
	/// Classify a raw slot token.
	pub fn classify(token: &str) -> Self {
		if token == ":" {
			return Self::Null;
		}

		if let Some(repeated) = token.strip_prefix(':') {
			return Self::Quantified {
				repeated: repeated.to_string(),
			};
		}

		if token.is_empty() {
			return Self::Positional;
		}

		if is_label(token) {
			return Self::Named {
				name: stored_name(token),
			};
		}

		Self::Other
	}

	/// Whether the slot introduces a capture group and consumes a slot number.
	pub fn captures(&self) -> bool {
		matches!(self, Self::Named { .. } | Self::Positional | Self::Other)
	}
}

/// Whether `token` is a bare label made of `[A-Za-z0-9_-]`.
pub(crate) fn is_label(token: &str) -> bool {
	!token.is_empty()
		&& token
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The name a labelled slot is stored under. Capture-group names cannot start
/// with a digit or `-`, so those labels gain a `_` prefix.
pub fn stored_name(label: &str) -> String {
	match label.chars().next() {
		Some(c) if c.is_ascii_digit() || c == '-' => format!("_{label}"),
		_ => label.to_string(),
	}
}

/// One `{{...}}` occurrence in an input template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSlot {
	/// The token exactly as written between the markers.
	pub token: String,
	pub kind: InputSlotKind,
	/// 1-indexed capture group number, or `None` for non-capturing slots.
	pub index: Option<usize>,
	/// Byte offset of the opening `{{` in the template.
	pub offset: usize,
}

impl InputSlot {
	/// The stored name for named slots.
	pub fn name(&self) -> Option<&str> {
		match &self.kind {
			InputSlotKind::Named { name } => Some(name),
			_ => None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputNode {
	/// Raw template text, not yet escaped.
	Literal(String),
	Slot(InputSlot),
}

/// An input template split into literal text and classified slots.
#[derive(Debug, Clone, Deref)]
pub struct InputTemplate {
	#[deref]
	nodes: Vec<InputNode>,
	capture_count: usize,
}

impl InputTemplate {
	/// Scan and classify an input template.
	pub fn parse(source: &str) -> ReifyResult<Self> {
		let mut nodes = Vec::new();
		let mut capture_count = 0;
		let mut group_names = HashSet::new();

		for segment in scan(TemplateKind::Input, source) {
			match segment? {
				Segment::Literal { text, .. } => nodes.push(InputNode::Literal(text.to_string())),
				Segment::Slot { token, span } => {
					if !is_slot_grammar(token) {
						return Err(ReifyError::InvalidSlotToken {
							kind: TemplateKind::Input,
							token: token.to_string(),
							offset: span.start,
						});
					}

					let kind = InputSlotKind::classify(token);
					if let InputSlotKind::Named { name } = &kind {
						if !group_names.insert(dialect::group_name(name)) {
							return Err(ReifyError::DuplicateSlotName { name: name.clone() });
						}
					}

					let index = if kind.captures() {
						capture_count += 1;
						Some(capture_count)
					} else {
						None
					};

					if kind == InputSlotKind::Other {
						tracing::warn!(
							token,
							offset = span.start,
							"input slot has no recognised shape, capturing anonymously"
						);
					}
					tracing::trace!(token, ?kind, ?index, "classified input slot");

					nodes.push(InputNode::Slot(InputSlot {
						token: token.to_string(),
						kind,
						index,
						offset: span.start,
					}));
				}
			}
		}

		Ok(Self {
			nodes,
			capture_count,
		})
	}

	/// Number of capturing slots.
	pub fn capture_count(&self) -> usize {
		self.capture_count
	}

	/// All slots in order of appearance.
	pub fn slots(&self) -> impl Iterator<Item = &InputSlot> {
		self.nodes.iter().filter_map(|node| {
			match node {
				InputNode::Slot(slot) => Some(slot),
				InputNode::Literal(_) => None,
			}
		})
	}

	/// Capturing slots in group order. The slot at position `i` owns capture
	/// group `i + 1`.
	pub fn capturing_slots(&self) -> impl Iterator<Item = &InputSlot> {
		self.slots().filter(|slot| slot.index.is_some())
	}

	/// Check that `number` names an existing capture group.
	pub fn resolve_number(&self, number: usize) -> ReifyResult<usize> {
		if number == 0 || number > self.capture_count {
			return Err(ReifyError::UnresolvedSlotNumber {
				number,
				capture_count: self.capture_count,
			});
		}

		Ok(number)
	}

	/// Find the named slot whose stored name is exactly `name`.
	pub fn resolve_name(&self, name: &str) -> ReifyResult<&InputSlot> {
		self.slots()
			.find(|slot| slot.name() == Some(name))
			.ok_or_else(|| {
				ReifyError::UnresolvedSlotName {
					name: name.to_string(),
				}
			})
	}
}
