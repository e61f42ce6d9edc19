use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::TablefillResult;
use crate::numfmt;
use crate::numfmt::StarRule;
use crate::profile::FileType;
use crate::report;
use crate::report::FillOutcome;
use crate::report::ReportContext;
use crate::scanner;
use crate::scanner::ScanOptions;
use crate::store::TableStore;

/// Everything one fill run needs. Each invocation owns its own options,
/// store, and scan state; nothing is shared across runs.
#[derive(Debug, Clone)]
pub struct FillOptions {
	/// The template document to fill.
	pub template: PathBuf,
	/// Input files with tagged tables, processed in order.
	pub inputs: Vec<PathBuf>,
	/// Where the filled document is written.
	pub output: PathBuf,
	/// Template profile selector; `Auto` detects from the extension.
	pub filetype: FileType,
	/// Fill placeholders on commented-out lines instead of skipping them.
	pub fill_comments: bool,
	/// Missing-value sentinels filtered in addition to `.` and the empty
	/// string.
	pub extra_sentinels: Vec<String>,
	/// Significance rules for `#*#` placeholders.
	pub star_rules: Vec<StarRule>,
	/// Tables injected by a collaborator (e.g. a custom-table layer),
	/// merged over the file-sourced ones before scanning begins.
	pub extra_tables: HashMap<String, Vec<String>>,
	/// Scan and report without writing the output file.
	pub dry_run: bool,
}

impl FillOptions {
	pub fn new(
		template: impl Into<PathBuf>,
		inputs: Vec<PathBuf>,
		output: impl Into<PathBuf>,
	) -> Self {
		Self {
			template: template.into(),
			inputs,
			output: output.into(),
			filetype: FileType::Auto,
			fill_comments: false,
			extra_sentinels: Vec::new(),
			star_rules: numfmt::default_star_rules(),
			extra_tables: HashMap::new(),
			dry_run: false,
		}
	}
}

/// Run one fill: parse the input tables, scan the template, compose the
/// notification banner, and write the output document.
///
/// Structural problems surface as warnings in the returned outcome; any
/// error returned from here means the run aborted and no output file was
/// written. Callers map an `Err` to the `ERROR` status at their top-level
/// boundary.
pub fn fill(options: &FillOptions) -> TablefillResult<FillOutcome> {
	let profile = options.filetype.resolve(&options.template)?;
	tracing::debug!(profile = profile.name(), "resolved template profile");

	let mut sources = Vec::with_capacity(options.inputs.len());
	for path in &options.inputs {
		let content = fs::read_to_string(path)?;
		sources.push((path.display().to_string(), content));
	}
	let mut store = TableStore::parse(&sources, &options.extra_sentinels)?;
	for (tag, values) in &options.extra_tables {
		store.insert(tag, values.clone());
	}
	tracing::debug!(tables = store.len(), "parsed input tables");

	let template_text = fs::read_to_string(&options.template)?;
	let mut lines: Vec<String> = template_text.split('\n').map(str::to_string).collect();

	let scan_options = ScanOptions {
		fill_comments: options.fill_comments,
		star_rules: &options.star_rules,
	};
	let warnings = scanner::scan(&mut lines, &store, profile, &scan_options)?;

	let template_name = options.template.display().to_string();
	let input_names = options
		.inputs
		.iter()
		.map(|path| path.display().to_string())
		.collect::<Vec<_>>()
		.join(" ");
	let output_name = options.output.display().to_string();
	let ctx = ReportContext {
		template: &template_name,
		inputs: &input_names,
		output: &output_name,
	};

	let banner = report::banner_lines(&warnings, &ctx);
	profile.insert_banner(&mut lines, &banner);

	if options.dry_run {
		tracing::info!(output = %output_name, "dry run, not writing output");
	} else {
		fs::write(&options.output, lines.join("\n"))?;
		tracing::info!(output = %output_name, "wrote filled template");
	}

	Ok(report::build_outcome(warnings, &ctx))
}
