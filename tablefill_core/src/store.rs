use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::TablefillError;
use crate::TablefillResult;

/// A `<Tab:NAME>` header line opens a new table block. Matching is
/// case-insensitive and anchored to the start of the line.
static TAG_HEADER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"(?i)^<tab:(.+)>").expect("tag header pattern is valid"));

/// The parsed input tables: a mapping from lowercased tag to the ordered,
/// sentinel-filtered sequence of cell values under that tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableStore {
	tables: HashMap<String, Vec<String>>,
}

impl TableStore {
	/// Parse an ordered list of `(source name, content)` pairs into a store.
	///
	/// A header line resets the named tag's value list even when the tag was
	/// declared earlier, in this source or another one: the most recent
	/// declaration wins. Every other line is split on tabs; each field is
	/// trimmed and appended to the current tag unless it matches a missing
	/// sentinel, in which case it is dropped entirely and later values shift
	/// left. A data row before any header in its source is a hard error.
	pub fn parse(
		sources: &[(String, String)],
		extra_sentinels: &[String],
	) -> TablefillResult<Self> {
		let mut store = Self::default();

		for (name, content) in sources {
			let mut current: Option<String> = None;

			for (index, line) in content.lines().enumerate() {
				if let Some(capture) = TAG_HEADER.captures(line) {
					let tag = capture[1].to_lowercase();
					tracing::debug!(source = %name, tag = %tag, "opened table block");
					store.tables.insert(tag.clone(), Vec::new());
					current = Some(tag);
					continue;
				}

				let Some(tag) = &current else {
					return Err(TablefillError::OrphanRow {
						path: name.clone(),
						line: index + 1,
					});
				};

				let values = store.tables.entry(tag.clone()).or_default();
				for field in line.split('\t') {
					let field = field.trim();
					if !is_missing(field, extra_sentinels) {
						values.push(field.to_string());
					}
				}
			}
		}

		Ok(store)
	}

	/// Insert an externally built table, e.g. from a custom-table
	/// collaborator. The tag is lowercased and the values pass through the
	/// same sentinel filter as file-sourced rows, so a store never contains
	/// missing markers regardless of where a table came from.
	pub fn insert(&mut self, tag: &str, values: Vec<String>) {
		let filtered = values
			.into_iter()
			.filter(|value| !is_missing(value, &[]))
			.collect();
		self.tables.insert(tag.to_lowercase(), filtered);
	}

	/// Look up a table by its already-normalized tag.
	pub fn get(&self, tag: &str) -> Option<&[String]> {
		self.tables.get(tag).map(Vec::as_slice)
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.tables.contains_key(tag)
	}

	pub fn len(&self) -> usize {
		self.tables.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}
}

/// Whether a trimmed cell value is a missing-value sentinel. A lone period
/// and the empty string are always missing; callers may configure more
/// (e.g. `NA`, `nan`, `None`).
fn is_missing(value: &str, extra_sentinels: &[String]) -> bool {
	value.is_empty() || value == "." || extra_sentinels.iter().any(|sentinel| sentinel == value)
}
