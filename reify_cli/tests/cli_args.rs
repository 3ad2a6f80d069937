use std::path::PathBuf;

use clap::Parser;
use reify_cli::Commands;
use reify_cli::OutputFormat;
use reify_cli::ReifyCli;

#[test]
fn find_args_default_to_text_and_conserved_whitespace() {
	let cli = ReifyCli::parse_from(["reify", "find", "-t", "a.tmpl", "-f", "doc.html"]);
	match cli.command {
		Some(Commands::Find {
			template,
			file,
			compress_whitespace,
			format,
		}) => {
			assert_eq!(template, PathBuf::from("a.tmpl"));
			assert_eq!(file, PathBuf::from("doc.html"));
			assert!(!compress_whitespace);
			assert_eq!(format, OutputFormat::Text);
		}
		_ => panic!("expected Find command"),
	}
}

#[test]
fn find_accepts_json_format_and_compression() {
	let cli = ReifyCli::parse_from([
		"reify",
		"find",
		"--template",
		"a.tmpl",
		"--file",
		"doc.html",
		"--compress-whitespace",
		"--format",
		"json",
	]);
	match cli.command {
		Some(Commands::Find {
			compress_whitespace,
			format,
			..
		}) => {
			assert!(compress_whitespace);
			assert_eq!(format, OutputFormat::Json);
		}
		_ => panic!("expected Find command"),
	}
}

#[test]
fn subs_short_flags() {
	let cli = ReifyCli::parse_from([
		"reify", "subs", "-i", "in.tmpl", "-o", "out.tmpl", "-f", "doc.html", "-I", "-W",
	]);
	match cli.command {
		Some(Commands::Subs {
			input_template,
			output_template,
			in_place,
			compress_whitespace,
			diff,
			..
		}) => {
			assert_eq!(input_template, PathBuf::from("in.tmpl"));
			assert_eq!(output_template, PathBuf::from("out.tmpl"));
			assert!(in_place);
			assert!(compress_whitespace);
			assert!(!diff);
		}
		_ => panic!("expected Subs command"),
	}
}

#[test]
fn global_flags_follow_subcommand() {
	let cli = ReifyCli::parse_from([
		"reify",
		"generate",
		"-i",
		"in.tmpl",
		"-o",
		"out.tmpl",
		"--path",
		"project",
		"--verbose",
		"--no-color",
	]);
	assert_eq!(cli.path, Some(PathBuf::from("project")));
	assert!(cli.verbose);
	assert!(cli.no_color);
	assert!(matches!(cli.command, Some(Commands::Generate { .. })));
}

#[test]
fn subs_requires_output_template() {
	let result = ReifyCli::try_parse_from(["reify", "subs", "-i", "in.tmpl", "-f", "doc.html"]);
	assert!(result.is_err());
}

#[test]
fn no_subcommand_parses() {
	let cli = ReifyCli::parse_from(["reify"]);
	assert!(cli.command.is_none());
}
