use serde::Serialize;

use crate::TablefillError;
use crate::TablefillResult;
use crate::numfmt;
use crate::numfmt::StarRule;
use crate::profile::DocumentProfile;
use crate::store::TableStore;
use crate::token;
use crate::token::TokenKind;

/// Structural warnings accumulated by one scan pass. Each category is
/// collected locally and consumed exactly once by the report builder; none
/// of them aborts the scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanWarnings {
	/// Labels found in the template with no corresponding input table.
	pub nomatch: Vec<String>,
	/// 1-indexed lines with placeholders outside any table environment.
	pub notable: Vec<usize>,
	/// 1-indexed lines with placeholders inside a table environment that has
	/// no label.
	pub nolabel: Vec<usize>,
	/// Table regions that ran out of input values mid-scan.
	pub toolong: Vec<ExhaustedRegion>,
}

impl ScanWarnings {
	pub fn is_empty(&self) -> bool {
		self.nomatch.is_empty()
			&& self.notable.is_empty()
			&& self.nolabel.is_empty()
			&& self.toolong.is_empty()
	}
}

/// A table region whose placeholders outnumbered its table's values. The
/// excess placeholders are left untouched in the output as a visible defect
/// signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhaustedRegion {
	pub tag: String,
	/// 1-indexed line of the region's begin marker.
	pub start_line: usize,
	/// How many placeholders were seen after the table ran out.
	pub excess: usize,
}

/// Scan-time knobs threaded in from [`crate::FillOptions`].
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
	/// Treat commented-out placeholder lines as normal in-region lines
	/// instead of skipping them.
	pub fill_comments: bool,
	/// Significance rules for `#*#` placeholders, sorted by threshold
	/// descending.
	pub star_rules: &'a [StarRule],
}

/// The currently open table region. Created on a begin marker, destroyed on
/// the end marker. The consumption cursor lives here because one table's
/// values are shared across every placeholder line inside the region.
struct Region {
	/// Resolved label, empty when the lookahead found none.
	tag: String,
	has_label: bool,
	cursor: usize,
	excess: usize,
	replacements: usize,
	start_line: usize,
}

/// Walk the template line by line, resolving table regions against the
/// store and substituting placeholders in place. Returns the accumulated
/// structural warnings; numeric parse failures abort with an error.
pub fn scan(
	lines: &mut [String],
	store: &TableStore,
	profile: DocumentProfile,
	options: &ScanOptions<'_>,
) -> TablefillResult<ScanWarnings> {
	let mut warnings = ScanWarnings::default();
	let mut region: Option<Region> = None;

	for index in 0..lines.len() {
		let line_no = index + 1;

		if region.is_none() && profile.is_begin(&lines[index]) {
			region = Some(open_region(
				lines, index, profile, store, &mut warnings,
			));
		}

		if token::contains_placeholder(&lines[index]) {
			let commented = profile
				.comment_marker()
				.is_some_and(|marker| lines[index].trim_start().starts_with(marker));

			if commented && !options.fill_comments {
				tracing::info!(line = line_no, "placeholder on a commented-out line, skipping");
			} else {
				match region.as_mut() {
					Some(open) if open.has_label => {
						// An unresolved label was already recorded as a
						// `nomatch` when the region opened; its lines pass
						// through untouched.
						if let Some(table) = store.get(&open.tag) {
							lines[index] =
								fill_line(&lines[index], table, open, options.star_rules, line_no)?;
						}
					}
					Some(_) => warnings.nolabel.push(line_no),
					None => warnings.notable.push(line_no),
				}
			}
		}

		if profile.is_end(&lines[index]) {
			if let Some(closed) = region.take() {
				tracing::info!(
					tag = %closed.tag,
					start = closed.start_line,
					end = line_no,
					replacements = closed.replacements,
					"table region closed"
				);
				record_exhaustion(&mut warnings, closed);
			}
		}
	}

	if let Some(open) = region.take() {
		// The reference behavior is lenient about a missing end marker; we
		// surface it in the log without changing the exit status.
		tracing::warn!(
			tag = %open.tag,
			start = open.start_line,
			"template ended with an unterminated table region"
		);
		record_exhaustion(&mut warnings, open);
	}

	Ok(warnings)
}

/// Open a region at a begin-marker line: run the bounded label lookahead,
/// resolve the label against the store, and log the outcome. A label with no
/// matching table records a `nomatch` once, here.
fn open_region(
	lines: &[String],
	index: usize,
	profile: DocumentProfile,
	store: &TableStore,
	warnings: &mut ScanWarnings,
) -> Region {
	let line_no = index + 1;
	let label = search_label(lines, index, profile);

	match &label {
		None => {
			tracing::info!(line = line_no, "found table with no label, skipping region");
		}
		Some(tag) if store.contains(tag) => {
			tracing::info!(line = line_no, tag = %tag, "found table, label matches an input table");
		}
		Some(tag) => {
			tracing::warn!(line = line_no, tag = %tag, "no input table matches this label");
			warnings.nomatch.push(tag.clone());
		}
	}

	Region {
		tag: label.clone().unwrap_or_default(),
		has_label: label.is_some(),
		cursor: 0,
		excess: 0,
		replacements: 0,
		start_line: line_no,
	}
}

/// Bounded forward lookahead for a region's label: scan from the begin
/// marker until the first label marker or the end marker, whichever comes
/// first. A region with two labels before its end binds to the first one
/// only.
fn search_label(lines: &[String], start: usize, profile: DocumentProfile) -> Option<String> {
	for (offset, line) in lines[start..].iter().enumerate() {
		if let Some(label) = profile.label_of(line) {
			return Some(label);
		}
		if offset > 0 && profile.is_end(line) {
			return None;
		}
	}
	None
}

fn record_exhaustion(warnings: &mut ScanWarnings, region: Region) {
	if region.excess > 0 {
		warnings.toolong.push(ExhaustedRegion {
			tag: region.tag,
			start_line: region.start_line,
			excess: region.excess,
		});
	}
}

/// Substitute every placeholder in one line, consuming values through the
/// region's cursor. Once the table is exhausted the remaining placeholders
/// are counted and left in place rather than substituted.
fn fill_line(
	line: &str,
	table: &[String],
	region: &mut Region,
	star_rules: &[StarRule],
	line_no: usize,
) -> TablefillResult<String> {
	let mut out = String::with_capacity(line.len());
	let mut copied = 0;

	for placeholder in token::find_placeholders(line) {
		if region.cursor >= table.len() {
			region.excess += 1;
			continue;
		}
		let value = &table[region.cursor];

		let replacement = match &placeholder.kind {
			TokenKind::Literal => value.clone(),
			TokenKind::Stars => {
				let pvalue: f64 = value.parse().map_err(|_| {
					TablefillError::NumericParse {
						value: value.clone(),
						line: line_no,
					}
				})?;
				numfmt::stars_for(pvalue, star_rules).to_string()
			}
			TokenKind::Numeric(directives) => {
				numfmt::format_value(value, directives).ok_or_else(|| {
					TablefillError::NumericParse {
						value: value.clone(),
						line: line_no,
					}
				})?
			}
		};

		out.push_str(&line[copied..placeholder.start]);
		out.push_str(&replacement);
		copied = placeholder.end;
		region.cursor += 1;
		region.replacements += 1;
	}

	out.push_str(&line[copied..]);
	Ok(out)
}
