use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum TablefillError {
	#[error(transparent)]
	#[diagnostic(code(tablefill::io_error))]
	Io(#[from] std::io::Error),

	#[error("file type `{0}` not known")]
	#[diagnostic(
		code(tablefill::unknown_file_type),
		help("expected one of `auto`, `tex`, or `lyx`")
	)]
	UnknownFileType(String),

	#[error("cannot detect template type from extension `{0}`")]
	#[diagnostic(
		code(tablefill::unknown_extension),
		help("expecting a .tex or .lyx file; pass `--type` to select one explicitly")
	)]
	UnknownExtension(String),

	#[error("file not found: `{0}`")]
	#[diagnostic(
		code(tablefill::missing_file),
		help("please check the template and input paths are available")
	)]
	MissingFile(String),

	#[error("output directory does not exist: `{0}`")]
	#[diagnostic(code(tablefill::missing_output_dir))]
	MissingOutputDir(String),

	#[error("data row before any `<Tab:...>` declaration in `{path}` (line {line})")]
	#[diagnostic(
		code(tablefill::orphan_row),
		help("every tab-delimited row must follow a `<Tab:NAME>` header line")
	)]
	OrphanRow { path: String, line: usize },

	#[error("cannot parse `{value}` as a number for the placeholder on line {line}")]
	#[diagnostic(
		code(tablefill::numeric_parse),
		help("numeric placeholders may only be used against numeric data; use `###` for text")
	)]
	NumericParse { value: String, line: usize },

	#[error("p-value threshold `{0}` is out of range")]
	#[diagnostic(
		code(tablefill::invalid_threshold),
		help("thresholds must be strictly between 0 and 1")
	)]
	InvalidThreshold(String),

	#[error("{markers} significance markers supplied for {thresholds} threshold(s)")]
	#[diagnostic(
		code(tablefill::too_many_markers),
		help("supply at most one marker per threshold; missing markers are synthesized")
	)]
	TooManyMarkers { markers: usize, thresholds: usize },
}

pub type TablefillResult<T> = Result<T, TablefillError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
