use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::CompileOptions;
use crate::ReifyError;
use crate::ReifyResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["reify.toml", ".reify.toml", ".config/reify.toml"];

/// File extension used by `reify generate` when none is configured.
pub const DEFAULT_REGEX_EXTENSION: &str = "regex";

/// Configuration loaded from a `reify.toml` file.
///
/// ```toml
/// conserve_whitespace = false
/// regex_extension = "re"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReifyConfig {
	/// Default for whether template whitespace must match exactly. Command line
	/// flags take precedence.
	#[serde(default)]
	pub conserve_whitespace: Option<bool>,
	/// Extension appended to template paths when writing compiled patterns.
	#[serde(default = "default_regex_extension")]
	pub regex_extension: String,
}

fn default_regex_extension() -> String {
	DEFAULT_REGEX_EXTENSION.to_string()
}

impl Default for ReifyConfig {
	fn default() -> Self {
		Self {
			conserve_whitespace: None,
			regex_extension: default_regex_extension(),
		}
	}
}

impl ReifyConfig {
	/// Returns the first existing config file path in `root`, using
	/// [`CONFIG_FILE_CANDIDATES`] order.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> ReifyResult<Option<ReifyConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %config_path.display(), ?config, "loaded config");

		Ok(Some(config))
	}

	pub fn from_toml(content: &str) -> ReifyResult<ReifyConfig> {
		toml::from_str(content).map_err(|e| ReifyError::ConfigParse(e.to_string()))
	}

	/// Compile options after applying an explicit command line override.
	/// `compress_whitespace` from the command line always wins over the file.
	pub fn compile_options(&self, compress_whitespace: bool) -> CompileOptions {
		if compress_whitespace {
			return CompileOptions::compress_whitespace();
		}

		self.conserve_whitespace
			.map_or_else(CompileOptions::default, |conserve_whitespace| {
				CompileOptions {
					conserve_whitespace,
				}
			})
	}

	/// Path that a compiled artefact for `template` is written to.
	pub fn regex_path(&self, template: &Path) -> PathBuf {
		let mut file_name = template.as_os_str().to_owned();
		file_name.push(".");
		file_name.push(&self.regex_extension);
		PathBuf::from(file_name)
	}
}
