//! `tablefill_core` is the engine behind the [tablefill](https://github.com/tablefill/tablefill)
//! command line tool. It fills placeholder tokens in LaTeX and LyX table
//! environments with values from tab-delimited text files (typically output
//! from statistical software), producing ready-to-compile documents.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Tab-delimited input file(s)
//!   → Table store (parses `<Tab:NAME>` blocks into tag → values maps)
//! Template document
//!   → Template scanner (line-by-line state machine over table environments)
//!   → Token matcher (classifies `###`, `#*#`, and `#n,%#` placeholders)
//!   → Numeric formatter (round-half-up, grouping, percent, absolute value)
//!   → Report builder (warning aggregation, exit status, notification banner)
//! ```
//!
//! ## Key Types
//!
//! - [`FillOptions`] — Everything one fill run needs; built by the CLI or a
//!   host program.
//! - [`FillOutcome`] — Final status, human-readable message, and itemized
//!   warnings.
//! - [`TableStore`] — The parsed tag → values mapping, including tables
//!   injected by a collaborator.
//! - [`DocumentProfile`] — The LaTeX or LyX marker set a template is scanned
//!   with.
//! - [`ScanWarnings`] — The four structural warning categories (`nomatch`,
//!   `notable`, `nolabel`, `toolong`).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use tablefill_core::FillOptions;
//! use tablefill_core::FillStatus;
//! use tablefill_core::fill;
//!
//! let options = FillOptions::new(
//! 	"paper.tex",
//! 	vec![PathBuf::from("estimates.txt")],
//! 	"paper_filled.tex",
//! );
//! match fill(&options) {
//! 	Ok(outcome) => {
//! 		println!("{}: {}", outcome.status, outcome.message);
//! 	}
//! 	Err(error) => {
//! 		eprintln!("{}: {error}", FillStatus::Error);
//! 	}
//! }
//! ```

pub use engine::*;
pub use error::*;
pub use numfmt::*;
pub use profile::*;
pub use report::*;
pub use scanner::*;
pub use store::*;
pub use token::*;

mod engine;
mod error;
pub mod numfmt;
mod profile;
mod report;
mod scanner;
pub mod store;
mod token;

#[cfg(test)]
mod __fixtures;
