use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use reify_cli::Commands;
use reify_cli::OutputFormat;
use reify_cli::ReifyCli;
use reify_core::CompileOptions;
use reify_core::ReifyConfig;
use reify_core::SlotMatch;
use reify_core::TemplateCompiler;
use similar::ChangeTag;
use similar::TextDiff;
use supports_color::Stream;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,slot) => {
		if color_enabled() {
			format!("{}", $text.bold().on_green())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = ReifyCli::parse();

	// Respect NO_COLOR env var, --no-color flag, and non-terminal output.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Find {
			template,
			file,
			compress_whitespace,
			format,
		}) => run_find(&args, template, file, *compress_whitespace, *format),
		Some(Commands::Subs {
			input_template,
			output_template,
			file,
			in_place,
			compress_whitespace,
			diff,
		}) => {
			run_subs(
				&args,
				input_template,
				output_template,
				file,
				*in_place,
				*compress_whitespace,
				*diff,
			)
		}
		Some(Commands::Generate {
			input_template,
			output_template,
			compress_whitespace,
		}) => run_generate(&args, input_template, output_template, *compress_whitespace),
		None => {
			eprintln!("No subcommand specified. Run `reify --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<reify_core::ReifyError>() {
			Ok(reify_err) => {
				let report: miette::Report = (*reify_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so they never mix with documents written to stdout.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.try_init();
}

fn resolve_root(args: &ReifyCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &ReifyCli) -> Result<ReifyConfig, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = ReifyConfig::load(&root)?.unwrap_or_default();

	if args.verbose {
		match ReifyConfig::resolve_path(&root) {
			Some(path) => eprintln!("Using config: {}", path.display()),
			None => eprintln!("No config file found in {}", root.display()),
		}
	}

	Ok(config)
}

fn read_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
	std::fs::read_to_string(path)
		.map_err(|e| format!("failed to read `{}`: {e}", path.display()).into())
}

fn compile_files(
	input: &Path,
	output: Option<&Path>,
	options: CompileOptions,
) -> Result<TemplateCompiler, Box<dyn std::error::Error>> {
	let input = read_file(input)?;
	let output = output.map(read_file).transpose()?;

	Ok(TemplateCompiler::new(&input, output.as_deref(), options)?)
}

fn run_find(
	args: &ReifyCli,
	template: &Path,
	file: &Path,
	compress_whitespace: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let compiler = compile_files(template, None, config.compile_options(compress_whitespace))?;
	let document = read_file(file)?;
	let matches = compiler.find(&document);

	if args.verbose {
		eprintln!("Compiled pattern: {}", compiler.pattern());
	}

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&matches)?);
		}
		OutputFormat::Text => {
			println!(
				"Found {} occurrence(s) matching template {} in {}",
				matches.len(),
				template.display(),
				file.display()
			);
			println!("(Slot data is highlighted in green)");

			for (i, slot_match) in matches.iter().enumerate() {
				println!();
				println!("{}", colored!(format!("Match {}", i + 1), red));
				println!("{}", render_match(slot_match));
			}
		}
	}

	Ok(())
}

/// Render a match with the text captured by each slot highlighted.
fn render_match(slot_match: &SlotMatch) -> String {
	slot_match
		.highlight()
		.iter()
		.map(|span| {
			if span.captured {
				colored!(span.text, slot)
			} else {
				span.text.clone()
			}
		})
		.collect()
}

fn run_subs(
	args: &ReifyCli,
	input_template: &Path,
	output_template: &Path,
	file: &Path,
	in_place: bool,
	compress_whitespace: bool,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let compiler = compile_files(
		input_template,
		Some(output_template),
		config.compile_options(compress_whitespace),
	)?;
	let document = read_file(file)?;
	let count = compiler.count(&document);
	let substituted = compiler.substitute(&document)?;

	if args.verbose {
		eprintln!("Compiled pattern: {}", compiler.pattern());
		eprintln!(
			"Compiled replacement: {}",
			compiler.replacement().unwrap_or_default()
		);
	}

	if show_diff {
		print_diff(&document, &substituted);
	}

	if in_place {
		if substituted != document {
			std::fs::write(file, &substituted)?;
		}
		println!("Replaced {count} occurrence(s) in {}", file.display());
	} else if !show_diff {
		print!("{substituted}");
		if !substituted.ends_with('\n') {
			println!();
		}
	}

	Ok(())
}

fn run_generate(
	args: &ReifyCli,
	input_template: &Path,
	output_template: &Path,
	compress_whitespace: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(args)?;
	let compiler = compile_files(
		input_template,
		Some(output_template),
		config.compile_options(compress_whitespace),
	)?;

	let pattern_path = config.regex_path(input_template);
	let replacement_path = config.regex_path(output_template);
	std::fs::write(&pattern_path, compiler.pattern())?;
	std::fs::write(
		&replacement_path,
		compiler.replacement().unwrap_or_default(),
	)?;

	println!(
		"Compiled regular expressions written to {} and {}",
		pattern_path.display(),
		replacement_path.display()
	);

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("{}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("{}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!(" {change}");
			}
		}
		if change.missing_newline() {
			println!();
		}
	}
}
