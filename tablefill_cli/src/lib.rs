use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use tablefill_core::FileType;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Fill LaTeX and LyX table templates with values from tab-delimited input files.",
	long_about = "tablefill substitutes placeholder tokens inside the table environments of a \
	              LaTeX or LyX document with values from tab-delimited text files (typically \
	              exported from statistical software).\n\nEach input table starts with a \
	              `<Tab:NAME>` header line; each template table binds to an input table through \
	              its `tab:NAME` label. Placeholders consume values left to right, top to \
	              bottom:\n  ###     copy the value verbatim\n  #*#     map a p-value to \
	              significance markers\n  #2,%#   round to 2 digits, comma-grouped, as a \
	              percentage\n\nThe filled document is written with a notification banner and \
	              never edited in place."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct TablefillCli {
	/// The LaTeX or LyX template document to fill.
	pub template: PathBuf,

	/// A tab-delimited input file containing `<Tab:NAME>` table blocks. May
	/// be given multiple times; when two files declare the same tag, the
	/// later file wins.
	#[arg(long, short, required = true)]
	pub input: Vec<PathBuf>,

	/// Where to write the filled document. The template itself is never
	/// modified.
	#[arg(long, short)]
	pub output: PathBuf,

	/// The template type. Use `auto` to detect it from the file extension,
	/// or `tex`/`lyx` to force a profile regardless of extension.
	#[arg(long = "type", short = 't', value_enum, default_value_t = FileTypeArg::Auto)]
	pub filetype: FileTypeArg,

	/// Fill placeholders on commented-out lines instead of skipping them.
	#[arg(long, default_value_t = false)]
	pub fill_comments: bool,

	/// An extra missing-value sentinel dropped from input tables, in
	/// addition to `.` and the empty string. May be given multiple times.
	#[arg(long = "missing-sentinel", value_name = "SENTINEL")]
	pub missing_sentinels: Vec<String>,

	/// A custom p-value threshold for `#*#` placeholders, strictly between
	/// 0 and 1. May be given multiple times; any custom threshold replaces
	/// the conventional 0.10/0.05/0.01 levels.
	#[arg(long = "pvalue-threshold", value_name = "THRESHOLD")]
	pub pvalue_thresholds: Vec<f64>,

	/// The significance marker paired with the threshold at the same
	/// position. When fewer markers than thresholds are given, the missing
	/// ones are synthesized from asterisks.
	#[arg(long = "pvalue-marker", value_name = "MARKER")]
	pub pvalue_markers: Vec<String>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,

	/// Output format for the fill report.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Scan and report without writing the output file.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,
}

/// The `--type` selector. Mirrors [`FileType`] so the core crate stays free
/// of clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileTypeArg {
	/// Detect the template type from the file extension.
	Auto,
	/// Treat the template as a LaTeX document.
	Tex,
	/// Treat the template as a LyX document.
	Lyx,
}

impl From<FileTypeArg> for FileType {
	fn from(value: FileTypeArg) -> Self {
		match value {
			FileTypeArg::Auto => Self::Auto,
			FileTypeArg::Tex => Self::Tex,
			FileTypeArg::Lyx => Self::Lyx,
		}
	}
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. The report includes the
	/// final status, message, and itemized warnings.
	Json,
}
