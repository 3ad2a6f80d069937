use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::InputTemplate;
use crate::OutputTemplate;
use crate::ReifyError;
use crate::ReifyResult;
use crate::SlotMatch;
use crate::dialect;

/// Options that control how templates are compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
	/// When `true` the template's whitespace must match the document exactly.
	/// When `false` newline runs and runs of two or more whitespace characters
	/// match any amount of whitespace.
	pub conserve_whitespace: bool,
}

impl Default for CompileOptions {
	fn default() -> Self {
		Self {
			conserve_whitespace: true,
		}
	}
}

impl CompileOptions {
	pub fn compress_whitespace() -> Self {
		Self {
			conserve_whitespace: false,
		}
	}
}

/// A compiled input template, and optionally a compiled output template bound
/// to it.
///
/// Both artefacts are produced eagerly by [`TemplateCompiler::new`] and never
/// change afterwards. A compiler without an output template can only find.
#[derive(Debug, Clone)]
pub struct TemplateCompiler {
	options: CompileOptions,
	input: InputTemplate,
	output: Option<OutputTemplate>,
	pattern: String,
	replacement: Option<String>,
	regex: Regex,
	/// Stored slot names indexed by capture group number minus one.
	group_names: Vec<Option<String>>,
}

impl TemplateCompiler {
	#[tracing::instrument(level = "debug", skip_all, fields(has_output = output.is_some()))]
	pub fn new(input: &str, output: Option<&str>, options: CompileOptions) -> ReifyResult<Self> {
		let input = InputTemplate::parse(input)?;
		let output = output
			.map(|source| OutputTemplate::parse(source, &input))
			.transpose()?;

		let pattern = dialect::render_pattern(&input, options.conserve_whitespace);
		let replacement = output.as_ref().map(dialect::render_replacement);
		let regex = Regex::new(&pattern)?;
		let group_names = input
			.capturing_slots()
			.map(|slot| slot.name().map(ToString::to_string))
			.collect();

		tracing::debug!(
			%pattern,
			replacement = replacement.as_deref(),
			capture_count = input.capture_count(),
			"compiled templates"
		);

		Ok(Self {
			options,
			input,
			output,
			pattern,
			replacement,
			regex,
			group_names,
		})
	}

	/// The regular-expression source compiled from the input template.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// The replacement source compiled from the output template.
	pub fn replacement(&self) -> Option<&str> {
		self.replacement.as_deref()
	}

	pub fn regex(&self) -> &Regex {
		&self.regex
	}

	pub fn options(&self) -> CompileOptions {
		self.options
	}

	pub fn input_template(&self) -> &InputTemplate {
		&self.input
	}

	pub fn output_template(&self) -> Option<&OutputTemplate> {
		self.output.as_ref()
	}

	/// Number of capturing slots in the input template.
	pub fn capture_count(&self) -> usize {
		self.input.capture_count()
	}

	/// Every non-overlapping match in `document`, left to right.
	pub fn find(&self, document: &str) -> Vec<SlotMatch> {
		self.regex
			.captures_iter(document)
			.map(|captures| SlotMatch::from_captures(&captures, &self.group_names))
			.collect()
	}

	/// Number of non-overlapping matches in `document`.
	pub fn count(&self, document: &str) -> usize {
		self.regex.find_iter(document).count()
	}

	pub fn is_match(&self, document: &str) -> bool {
		self.regex.is_match(document)
	}

	/// Rewrite every match in `document` using the compiled replacement.
	pub fn substitute(&self, document: &str) -> ReifyResult<String> {
		let replacement = self
			.replacement
			.as_deref()
			.ok_or(ReifyError::MissingOutputTemplate)?;

		Ok(self.regex.replace_all(document, replacement).into_owned())
	}
}

/// Compile an input template and an optional output template.
pub fn compile(
	input: &str,
	output: Option<&str>,
	conserve_whitespace: bool,
) -> ReifyResult<TemplateCompiler> {
	TemplateCompiler::new(input, output, CompileOptions {
		conserve_whitespace,
	})
}
