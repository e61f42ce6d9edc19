use crate::numfmt;
use crate::profile::DocumentProfile;
use crate::scanner;
use crate::scanner::ScanOptions;
use crate::scanner::ScanWarnings;
use crate::store::TableStore;

/// Build a store from a single in-memory input source.
pub fn store_from(input: &str) -> TableStore {
	TableStore::parse(&[("input.txt".to_string(), input.to_string())], &[]).unwrap()
}

/// Scan a template against an input source using the given profile,
/// returning the mutated lines and the accumulated warnings.
pub fn scan_with(
	template: &str,
	input: &str,
	profile: DocumentProfile,
	fill_comments: bool,
) -> (Vec<String>, ScanWarnings) {
	let store = store_from(input);
	let star_rules = numfmt::default_star_rules();
	let options = ScanOptions {
		fill_comments,
		star_rules: &star_rules,
	};
	let mut lines: Vec<String> = template.split('\n').map(str::to_string).collect();
	let warnings = scanner::scan(&mut lines, &store, profile, &options).unwrap();
	(lines, warnings)
}

/// Scan a LaTeX template with default options.
pub fn scan_tex(template: &str, input: &str) -> (Vec<String>, ScanWarnings) {
	scan_with(template, input, DocumentProfile::Tex, false)
}

/// A minimal LaTeX table region wrapping the given body lines.
pub fn tex_table(label: &str, body: &[&str]) -> String {
	let mut lines = vec!["\\begin{table}".to_string(), format!("\\label{{tab:{label}}}")];
	lines.extend(body.iter().map(ToString::to_string));
	lines.push("\\end{table}".to_string());
	lines.join("\n")
}
