use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn reify_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("reify"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}

pub const AUTHOR_TITLE_INPUT: &str =
	r#"<div><span class="author">{{author}}</span> <span class="title">{{title}}</span></div>"#;
pub const AUTHOR_TITLE_OUTPUT: &str = "<div>{{author title}}</div>";
pub const AUTHOR_TITLE_DOCUMENT: &str = "<div><span class=\"author\">Jane</span> <span \
                                         class=\"title\">Notes</span></div>\n";

/// Writes `input.tmpl`, `output.tmpl` and `document.html` into `dir`.
pub fn write_author_title(dir: &Path) -> std::io::Result<()> {
	std::fs::write(dir.join("input.tmpl"), AUTHOR_TITLE_INPUT)?;
	std::fs::write(dir.join("output.tmpl"), AUTHOR_TITLE_OUTPUT)?;
	std::fs::write(dir.join("document.html"), AUTHOR_TITLE_DOCUMENT)?;
	Ok(())
}
