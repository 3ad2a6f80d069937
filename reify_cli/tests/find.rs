mod common;

use predicates::prelude::PredicateBooleanExt;
use reify_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn find_reports_each_occurrence() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_author_title(tmp.path())?;

	let mut cmd = common::reify_cmd();
	let _ = cmd
		.current_dir(tmp.path())
		.arg("find")
		.arg("-t")
		.arg("input.tmpl")
		.arg("-f")
		.arg("document.html")
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Found 1 occurrence(s) matching template input.tmpl in document.html",
		))
		.stdout(predicates::str::contains("Match 1"))
		.stdout(predicates::str::contains(
			r#"<span class="author">Jane</span>"#,
		));

	Ok(())
}

#[test]
fn find_reports_zero_occurrences() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_author_title(tmp.path())?;
	std::fs::write(tmp.path().join("document.html"), "<p>nothing here</p>\n")?;

	let mut cmd = common::reify_cmd();
	let _ = cmd
		.current_dir(tmp.path())
		.args(["find", "-t", "input.tmpl", "-f", "document.html"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Found 0 occurrence(s)"))
		.stdout(predicates::str::contains("Match 1").not());

	Ok(())
}

#[test]
fn find_json_lists_captured_groups() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_author_title(tmp.path())?;

	let mut cmd = common::reify_cmd();
	let output = cmd
		.current_dir(tmp.path())
		.args([
			"find",
			"-t",
			"input.tmpl",
			"-f",
			"document.html",
			"--format",
			"json",
		])
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	let matches = json.as_array().ok_or("expected a json array")?;
	assert_eq!(matches.len(), 1);

	let groups = matches[0]["groups"]
		.as_array()
		.ok_or("expected a groups array")?;
	assert_eq!(groups.len(), 2);
	assert_eq!(groups[0]["name"], "author");
	assert_eq!(groups[0]["text"], "Jane");
	assert_eq!(groups[1]["index"], 2);
	assert_eq!(groups[1]["text"], "Notes");

	Ok(())
}

#[test]
fn find_respects_compress_whitespace_flag() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("input.tmpl"), "<p>\n{{body}}\n</p>")?;
	std::fs::write(tmp.path().join("document.html"), "<p>hi</p>\n")?;

	let mut conserved = common::reify_cmd();
	let _ = conserved
		.current_dir(tmp.path())
		.args(["find", "-t", "input.tmpl", "-f", "document.html"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Found 0 occurrence(s)"));

	let mut compressed = common::reify_cmd();
	let _ = compressed
		.current_dir(tmp.path())
		.args(["find", "-W", "-t", "input.tmpl", "-f", "document.html"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Found 1 occurrence(s)"));

	Ok(())
}

#[test]
fn find_reads_whitespace_setting_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("input.tmpl"), "<p>\n{{body}}\n</p>")?;
	std::fs::write(tmp.path().join("document.html"), "<p>hi</p>\n")?;
	std::fs::write(
		tmp.path().join("reify.toml"),
		"conserve_whitespace = false\n",
	)?;

	let mut cmd = common::reify_cmd();
	let _ = cmd
		.current_dir(tmp.path())
		.args(["find", "-t", "input.tmpl", "-f", "document.html"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Found 1 occurrence(s)"));

	Ok(())
}

#[test]
fn find_fails_on_malformed_template() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("input.tmpl"), "<p>{{body</p>")?;
	std::fs::write(tmp.path().join("document.html"), "<p>hi</p>\n")?;

	let mut cmd = common::reify_cmd();
	let _ = cmd
		.current_dir(tmp.path())
		.args(["find", "-t", "input.tmpl", "-f", "document.html"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("reify::malformed_template"));

	Ok(())
}

#[test]
fn find_fails_on_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_author_title(tmp.path())?;

	let mut cmd = common::reify_cmd();
	let _ = cmd
		.current_dir(tmp.path())
		.args(["find", "-t", "input.tmpl", "-f", "missing.html"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to read `missing.html`"));

	Ok(())
}

#[test]
fn find_rejects_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_author_title(tmp.path())?;
	std::fs::write(tmp.path().join("reify.toml"), "unknown_key = 1\n")?;

	let mut cmd = common::reify_cmd();
	let _ = cmd
		.current_dir(tmp.path())
		.args(["find", "-t", "input.tmpl", "-f", "document.html"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("reify::config_parse"));

	Ok(())
}
