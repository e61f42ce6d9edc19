use std::fmt;

use serde::Serialize;

use crate::scanner::ScanWarnings;

/// The overall outcome status of one fill run. `Error` is produced at the
/// caller's top-level boundary when the run aborts; a completed scan yields
/// `Success` or `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FillStatus {
	Success,
	Warning,
	Error,
}

impl fmt::Display for FillStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text = match self {
			Self::Success => "SUCCESS",
			Self::Warning => "WARNING",
			Self::Error => "ERROR",
		};
		f.write_str(text)
	}
}

impl FillStatus {
	/// The process exit code a CLI should map this status to.
	pub fn exit_code(self) -> i32 {
		match self {
			Self::Success => 0,
			Self::Warning => 1,
			Self::Error => 2,
		}
	}
}

/// The result of a completed fill run: the final status, a human-readable
/// message, and the itemized warnings behind it.
#[derive(Debug, Clone, Serialize)]
pub struct FillOutcome {
	pub status: FillStatus,
	pub message: String,
	pub warnings: ScanWarnings,
}

/// The file names a report talks about, pre-rendered for display.
pub(crate) struct ReportContext<'a> {
	pub template: &'a str,
	/// Space-joined input file list.
	pub inputs: &'a str,
	pub output: &'a str,
}

/// One descriptive paragraph per non-empty warning category, each naming the
/// offending lines or tags and cautioning that the output may not compile.
pub(crate) fn warning_paragraphs(warnings: &ScanWarnings, ctx: &ReportContext<'_>) -> Vec<String> {
	let mut paragraphs = Vec::new();
	let caution = format!("Output '{}' may not compile!", ctx.output);

	if !warnings.nomatch.is_empty() {
		paragraphs.push(format!(
			"WARNING: These labels were in '{}' but not in '{}': {}. {caution}",
			ctx.template,
			ctx.inputs,
			warnings.nomatch.join(","),
		));
	}
	if !warnings.notable.is_empty() {
		paragraphs.push(format!(
			"WARNING: Lines in '{}' match a placeholder but are not in a table environment: {}. {caution}",
			ctx.template,
			join_lines(&warnings.notable),
		));
	}
	if !warnings.nolabel.is_empty() {
		paragraphs.push(format!(
			"WARNING: Lines in '{}' match a placeholder but their table environment has no label: {}. {caution}",
			ctx.template,
			join_lines(&warnings.nolabel),
		));
	}
	if !warnings.toolong.is_empty() {
		let regions: Vec<String> = warnings
			.toolong
			.iter()
			.map(|region| {
				format!(
					"'{}' (line {}, {} unfilled)",
					region.tag, region.start_line, region.excess
				)
			})
			.collect();
		paragraphs.push(format!(
			"WARNING: These table regions had more placeholders than input values: {}. {caution}",
			regions.join(", "),
		));
	}

	paragraphs
}

fn join_lines(lines: &[usize]) -> String {
	lines
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(",")
}

/// Fold the accumulated warnings into the final status and message of a
/// completed scan.
pub(crate) fn build_outcome(warnings: ScanWarnings, ctx: &ReportContext<'_>) -> FillOutcome {
	if warnings.is_empty() {
		let message = format!(
			"All tags in '{}' successfully filled by tablefill.\nOutput can be found in '{}'.",
			ctx.template, ctx.output,
		);
		FillOutcome {
			status: FillStatus::Success,
			message,
			warnings,
		}
	} else {
		let mut message = String::from("The following issues were found:\n");
		message.push_str(&warning_paragraphs(&warnings, ctx).join("\n"));
		FillOutcome {
			status: FillStatus::Warning,
			message,
			warnings,
		}
	}
}

/// The notification banner identifying the tool and its inputs, prepended or
/// injected into every output document regardless of status. On a warning
/// the full warning text rides along; otherwise the banner carries the
/// do-not-edit notice.
pub(crate) fn banner_lines(warnings: &ScanWarnings, ctx: &ReportContext<'_>) -> Vec<String> {
	let mut lines = vec![
		"This file was produced by 'tablefill'".to_string(),
		format!("    Template file: {}", ctx.template),
		format!("    Input file(s): {}", ctx.inputs),
		"To make changes, edit the input and template files.".to_string(),
		String::new(),
	];

	if warnings.is_empty() {
		lines.push("DO NOT EDIT THIS FILE DIRECTLY.".to_string());
	} else {
		lines.push("THERE WAS AN ISSUE CREATING THIS FILE!".to_string());
		lines.extend(warning_paragraphs(warnings, ctx));
	}

	lines
}
