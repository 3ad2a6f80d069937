use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "The Reify Template Compiler",
	long_about = "Reify is a simple templating language that compiles to regular expression syntax \
	              to make finding and replacing complex patterns with other complex patterns less \
	              of a pain.\n\nTemplates mark variable content with slots written between double \
	              braces. In an input template `{{title}}` captures whatever the document has \
	              there; in an output template `{{title}}` puts it back.\n\nInput slots:\n  \
	              {{}} captures, referenced by position\n  {{label}} captures, referenced by \
	              label\n  {{:}} matches anything and discards it\n  {{:x}} matches any number \
	              of `x`\n\nOutput slots:\n  {{2}} or {{label}} inserts one slot\n  {{1 2}}, \
	              {{1..3}} or {{a b}} inserts several slots joined together"
)]
pub struct ReifyCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Directory to look for `reify.toml` in. Defaults to the current
	/// directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Find a pattern in a file.
	///
	/// Compiles the template and prints every occurrence found in the file,
	/// with the content captured by each slot highlighted.
	Find {
		/// Path to the template you want to search against.
		#[arg(long, short)]
		template: PathBuf,

		/// Path to the file you want to search in.
		#[arg(long, short)]
		file: PathBuf,

		/// Ignore newlines and other runs of whitespace in the template.
		#[arg(long, short = 'W', default_value_t = false)]
		compress_whitespace: bool,

		/// Output format. Use `text` for highlighted matches or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Find a pattern in a document and replace it with different formatting.
	///
	/// Every occurrence of the input template is rewritten into the shape of
	/// the output template. The result is printed unless `--in-place` is set.
	Subs {
		/// Path to the template pattern you want to replace.
		#[arg(long, short)]
		input_template: PathBuf,

		/// Path to the template pattern to replace the old pattern with.
		#[arg(long, short)]
		output_template: PathBuf,

		/// Path to the file to perform find-and-replace on.
		#[arg(long, short)]
		file: PathBuf,

		/// Write the substitution back to the file instead of printing it.
		#[arg(long, short = 'I', default_value_t = false)]
		in_place: bool,

		/// Ignore newlines and other runs of whitespace in the input template.
		#[arg(long, short = 'W', default_value_t = false)]
		compress_whitespace: bool,

		/// Print a unified diff of the changes instead of the whole document.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Generate regular expressions to use in your own find-and-replace tool.
	///
	/// Writes the compiled pattern next to the input template and the
	/// compiled replacement next to the output template, each with a `.regex`
	/// suffix (configurable with `regex_extension` in `reify.toml`).
	Generate {
		/// Path to an input template.
		#[arg(long, short)]
		input_template: PathBuf,

		/// Path to the template you're replacing it with.
		#[arg(long, short)]
		output_template: PathBuf,

		/// Ignore newlines and other runs of whitespace in the input template.
		#[arg(long, short = 'W', default_value_t = false)]
		compress_whitespace: bool,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text with captured slot content highlighted.
	Text,
	/// JSON array of matches with their spans and captured groups.
	Json,
}
