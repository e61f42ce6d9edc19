use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tablefill_cli::FileTypeArg;
use tablefill_cli::OutputFormat;
use tablefill_cli::TablefillCli;
use tablefill_core::FileType;
use tablefill_core::FillOptions;
use tablefill_core::FillOutcome;
use tablefill_core::FillStatus;
use tablefill_core::TablefillError;
use tablefill_core::TablefillResult;
use tablefill_core::build_star_rules;
use tablefill_core::fill;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = TablefillCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if args.verbose {
		let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			tracing_subscriber::EnvFilter::new("tablefill_core=debug,tablefill_cli=debug")
		});
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.with_ansi(use_color)
			.init();
	}

	match run(&args) {
		Ok(outcome) => {
			print_outcome(&outcome, args.format);
			process::exit(outcome.status.exit_code());
		}
		Err(error) => {
			match args.format {
				OutputFormat::Json => {
					let payload = serde_json::json!({
						"status": FillStatus::Error,
						"message": error.to_string(),
					});
					println!("{payload}");
				}
				OutputFormat::Text => {
					let report: miette::Report = error.into();
					eprintln!("{report:?}");
				}
			}
			process::exit(FillStatus::Error.exit_code());
		}
	}
}

fn run(args: &TablefillCli) -> TablefillResult<FillOutcome> {
	validate_paths(args)?;
	note_profile_mismatch(args);

	let mut options = FillOptions::new(
		args.template.clone(),
		args.input.clone(),
		args.output.clone(),
	);
	options.filetype = args.filetype.into();
	options.fill_comments = args.fill_comments;
	options.extra_sentinels = args.missing_sentinels.clone();
	options.star_rules = build_star_rules(&args.pvalue_thresholds, &args.pvalue_markers)?;
	options.dry_run = args.dry_run;

	fill(&options)
}

/// Check every path up front so a bad invocation fails before any input is
/// parsed: the template and all inputs must exist, and the output's parent
/// directory must exist (the output file itself is created).
fn validate_paths(args: &TablefillCli) -> TablefillResult<()> {
	if !args.template.is_file() {
		return Err(TablefillError::MissingFile(
			args.template.display().to_string(),
		));
	}
	for input in &args.input {
		if !input.is_file() {
			return Err(TablefillError::MissingFile(input.display().to_string()));
		}
	}
	if let Some(parent) = args.output.parent() {
		if !parent.as_os_str().is_empty() && !parent.is_dir() {
			return Err(TablefillError::MissingOutputDir(
				parent.display().to_string(),
			));
		}
	}
	Ok(())
}

/// Warn when a forced `--type` disagrees with the template's extension. The
/// forced profile still wins; the note exists to catch swapped arguments.
fn note_profile_mismatch(args: &TablefillCli) {
	if args.filetype == FileTypeArg::Auto {
		return;
	}
	if let Ok(profile) = FileType::from(args.filetype).resolve(&args.template) {
		if !profile.matches_extension(&args.template) {
			eprintln!(
				"{} template `{}` does not carry a .{} extension; filling it as {} anyway",
				colored!("warning:", yellow),
				args.template.display(),
				profile.name(),
				profile.name(),
			);
		}
	}
}

fn print_outcome(outcome: &FillOutcome, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			let payload = serde_json::json!({
				"status": outcome.status,
				"message": outcome.message,
				"warnings": outcome.warnings,
			});
			println!("{payload}");
		}
		OutputFormat::Text => match outcome.status {
			FillStatus::Success => println!("{}", outcome.message),
			_ => eprintln!("{}", outcome.message),
		},
	}
}
