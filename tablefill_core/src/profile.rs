use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::TablefillError;
use crate::TablefillResult;

static TEX_LABEL: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)\\label\{tab:([^}]+)\}").expect("tex label pattern is valid"));

static LYX_LABEL: Lazy<Regex> =
	Lazy::new(|| Regex::new(r#"(?i)name "tab:([^"]+)""#).expect("lyx label pattern is valid"));

/// The template file-type selector as supplied by a caller. `Auto` defers to
/// the template's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
	#[default]
	Auto,
	Tex,
	Lyx,
}

impl FromStr for FileType {
	type Err = TablefillError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.to_lowercase().as_str() {
			"auto" => Ok(Self::Auto),
			"tex" => Ok(Self::Tex),
			"lyx" => Ok(Self::Lyx),
			other => Err(TablefillError::UnknownFileType(other.to_string())),
		}
	}
}

impl FileType {
	/// Resolve the selector against a template path, auto-detecting from the
	/// extension when required.
	pub fn resolve(self, template: &Path) -> TablefillResult<DocumentProfile> {
		match self {
			Self::Tex => Ok(DocumentProfile::Tex),
			Self::Lyx => Ok(DocumentProfile::Lyx),
			Self::Auto => DocumentProfile::from_extension(template),
		}
	}
}

/// The host-document profile: which markers delimit a table environment,
/// where its label lives, how comments are written, and where the
/// notification banner goes. Both profiles share the placeholder grammar and
/// the numeric formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentProfile {
	/// LaTeX: `\begin{table}` / `\end{table}` environments with
	/// `\label{tab:...}` labels, `%` line comments, banner prepended.
	Tex,
	/// LyX: `name "tab:` opens a table (the label is on the same line),
	/// `</lyxtabular>` closes it, no line comments, banner injected as a
	/// note inset after `\begin_body`.
	Lyx,
}

impl DocumentProfile {
	/// Detect the profile from a template's file extension.
	pub fn from_extension(template: &Path) -> TablefillResult<Self> {
		let extension = template
			.extension()
			.map(|ext| ext.to_string_lossy().to_lowercase())
			.unwrap_or_default();
		match extension.as_str() {
			"tex" => Ok(Self::Tex),
			"lyx" => Ok(Self::Lyx),
			other => Err(TablefillError::UnknownExtension(other.to_string())),
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Tex => "tex",
			Self::Lyx => "lyx",
		}
	}

	/// The extension this profile conventionally carries, used to note
	/// selector/extension disagreements.
	pub fn matches_extension(self, template: &Path) -> bool {
		Self::from_extension(template).is_ok_and(|detected| detected == self)
	}

	pub fn is_begin(self, line: &str) -> bool {
		match self {
			Self::Tex => line.contains("\\begin{table}"),
			Self::Lyx => line.contains("name \"tab:"),
		}
	}

	pub fn is_end(self, line: &str) -> bool {
		match self {
			Self::Tex => line.contains("\\end{table}"),
			Self::Lyx => line.contains("</lyxtabular>"),
		}
	}

	/// Extract and normalize a table label from a line: lowercased, with
	/// surrounding brace and quote characters stripped, ready to be used as
	/// a store lookup key.
	pub fn label_of(self, line: &str) -> Option<String> {
		let pattern = match self {
			Self::Tex => &TEX_LABEL,
			Self::Lyx => &LYX_LABEL,
		};
		pattern.captures(line).map(|capture| {
			capture[1]
				.trim_matches(|ch| ch == '{' || ch == '}' || ch == '"')
				.to_lowercase()
		})
	}

	/// The line-comment marker, when the host format has one.
	pub fn comment_marker(self) -> Option<&'static str> {
		match self {
			Self::Tex => Some("%"),
			Self::Lyx => None,
		}
	}

	/// Insert the notification banner into the template lines. LaTeX gets a
	/// comment block prepended; LyX gets a note inset after `\begin_body`.
	pub fn insert_banner(self, lines: &mut Vec<String>, message: &[String]) {
		let commented: Vec<String> = message
			.iter()
			.map(|line| format!("% {line}").trim_end().to_string())
			.collect();

		match self {
			Self::Tex => {
				let rule = "%".repeat(72);
				let mut banner = vec![rule.clone(), rule.clone(), rule.clone()];
				banner.extend(commented);
				banner.push(rule.clone());
				banner.push(rule.clone());
				banner.push(rule);
				lines.splice(0..0, banner);
			}
			Self::Lyx => {
				let anchor = lines
					.iter()
					.position(|line| line.starts_with("\\begin_body"))
					.map_or(0, |index| index + 1);
				let mut banner = vec![
					"\\begin_layout Standard".to_string(),
					"\\begin_inset Note Note".to_string(),
					"status open".to_string(),
					String::new(),
					"\\begin_layout Plain Layout".to_string(),
				];
				banner.extend(commented);
				banner.push("\\end_layout".to_string());
				banner.push("\\end_inset".to_string());
				banner.push("\\end_layout".to_string());
				lines.splice(anchor..anchor, banner);
			}
		}
	}
}
