use miette::Diagnostic;
use thiserror::Error;

use crate::TemplateKind;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ReifyError {
	#[error(transparent)]
	#[diagnostic(code(reify::io_error))]
	Io(#[from] std::io::Error),

	#[error("unterminated slot in {kind} template starting at byte {offset}")]
	#[diagnostic(
		code(reify::malformed_template),
		help("close the slot with `}}}}` or remove the stray `{{{{`")
	)]
	MalformedTemplate { kind: TemplateKind, offset: usize },

	#[error("invalid slot `{{{{{token}}}}}` in {kind} template at byte {offset}")]
	#[diagnostic(
		code(reify::invalid_slot_token),
		help(
			"slots may only contain letters, digits, `-`, `_`, `:`, `,`, `.` and spaces; output \
			 slots must be a number, a label, a range like `1..3` or a space-separated list"
		)
	)]
	InvalidSlotToken {
		kind: TemplateKind,
		token: String,
		offset: usize,
	},

	#[error("output slot references slot number {number} but the input template only has {capture_count} capturing slot(s)")]
	#[diagnostic(
		code(reify::unresolved_slot_number),
		help("slots are numbered from 1 in order of appearance; `{{{{:}}}}` slots are not counted")
	)]
	UnresolvedSlotNumber { number: usize, capture_count: usize },

	#[error("output slot references `{name}` but no input slot has that label")]
	#[diagnostic(
		code(reify::unresolved_slot_name),
		help("labels starting with a digit or `-` are stored with a leading `_`, e.g. `{{{{_1}}}}`")
	)]
	UnresolvedSlotName { name: String },

	#[error("invalid slot range `{start}..{end}`")]
	#[diagnostic(
		code(reify::invalid_range),
		help("ranges are inclusive and must count upwards, e.g. `{{{{1..3}}}}`")
	)]
	InvalidRange { start: usize, end: usize },

	#[error("more than one input slot is named `{name}`")]
	#[diagnostic(
		code(reify::duplicate_slot_name),
		help("each labelled input slot needs a distinct name; `-` and `_` are treated as the same character")
	)]
	DuplicateSlotName { name: String },

	#[error("compiled pattern is not a valid regular expression")]
	#[diagnostic(code(reify::pattern))]
	Pattern(#[from] regex::Error),

	#[error("no output template was supplied to this compiler")]
	#[diagnostic(
		code(reify::missing_output_template),
		help("compile with an output template to perform substitutions")
	)]
	MissingOutputTemplate,

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(reify::config_parse),
		help("check that reify.toml is valid TOML with `conserve_whitespace` and `regex_extension` keys")
	)]
	ConfigParse(String),
}

impl ReifyError {
	/// Returns true for errors raised while binding output slots to the input
	/// template's capture groups.
	pub fn is_binding_error(&self) -> bool {
		matches!(
			self,
			Self::UnresolvedSlotNumber { .. }
				| Self::UnresolvedSlotName { .. }
				| Self::InvalidRange { .. }
		)
	}
}

pub type ReifyResult<T> = Result<T, ReifyError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
