use crate::CompileOptions;
use crate::ReifyResult;
use crate::TemplateCompiler;

pub const AUTHOR_TITLE_INPUT: &str =
	r#"<div><span class="author">{{author}}</span> <span class="title">{{title}}</span></div>"#;
pub const AUTHOR_TITLE_OUTPUT: &str = "<div>{{author title}}</div>";
pub const AUTHOR_TITLE_DOCUMENT: &str =
	r#"<div><span class="author">Jane</span> <span class="title">Notes</span></div>"#;

pub const RSS_INPUT: &str = "<title>{{}}</title>\n<link>{{}}</link>";
pub const RSS_OUTPUT: &str = r#"<a href="{{2}}">{{1}}</a>"#;
pub const RSS_DOCUMENT: &str = "<item>\n<title>Feed</title>\n<link>https://example.com</link>\n</item>";

/// An input template with three labelled slots: `a`, `b` and `c`.
pub const THREE_SLOT_INPUT: &str = "<p>{{a}}</p><p>{{b}}</p><p>{{c}}</p>";

pub fn find_only(input: &str) -> ReifyResult<TemplateCompiler> {
	TemplateCompiler::new(input, None, CompileOptions::default())
}

pub fn find_and_replace(input: &str, output: &str) -> ReifyResult<TemplateCompiler> {
	TemplateCompiler::new(input, Some(output), CompileOptions::default())
}

pub fn compressed(input: &str) -> ReifyResult<TemplateCompiler> {
	TemplateCompiler::new(input, None, CompileOptions::compress_whitespace())
}
