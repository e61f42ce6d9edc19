use once_cell::sync::Lazy;
use regex::Regex;

use crate::numfmt::NumFormat;

/// The placeholder grammar. Three escapable hashes (`###`, `\#\#\#`) copy a
/// value verbatim, a starred pair (`#*#`) maps a p-value to significance
/// markers, and a digit run with optional comma/percent directives
/// (`#2#`, `#0,#`, `#3%#`) requests numeric formatting. A surrounding `|…|`
/// pair is detected separately as the absolute-value modifier.
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"\\?#(?:(?P<lit>\\?#\\?#)|(?P<star>\*)\\?#|(?P<prec>\d+)(?P<comma>,?)(?P<pct>%?)\\?#)")
		.expect("placeholder grammar is valid")
});

/// What a matched placeholder asks the engine to do with the next value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
	/// Copy the value verbatim.
	Literal,
	/// Map a numeric p-value to a significance marker.
	Stars,
	/// Round and render the value per the extracted directives.
	Numeric(NumFormat),
}

/// One placeholder occurrence within a template line. `start..end` is the
/// byte span to replace, including any `|…|` wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMatch {
	pub start: usize,
	pub end: usize,
	pub kind: TokenKind,
}

/// Whether a line contains at least one placeholder.
pub fn contains_placeholder(line: &str) -> bool {
	PLACEHOLDER.is_match(line)
}

/// Find every placeholder in a line, leftmost first. The spans never
/// overlap, so callers can rebuild the line in a single forward pass.
pub fn find_placeholders(line: &str) -> Vec<PlaceholderMatch> {
	let mut matches = Vec::new();

	for capture in PLACEHOLDER.captures_iter(line) {
		let whole = capture.get(0).expect("capture 0 always present");
		let mut start = whole.start();
		let mut end = whole.end();

		// A pipe on both sides marks the absolute-value modifier and is
		// consumed together with the token.
		let piped = line[..start].ends_with('|') && line[end..].starts_with('|');
		if piped {
			start -= 1;
			end += 1;
		}

		let kind = if capture.name("lit").is_some() {
			TokenKind::Literal
		} else if capture.name("star").is_some() {
			TokenKind::Stars
		} else {
			let Ok(precision) = capture["prec"].parse::<usize>() else {
				// A digit run too long for usize is not a sane precision
				// request; leave the text alone.
				continue;
			};
			TokenKind::Numeric(NumFormat {
				precision,
				commas: !capture["comma"].is_empty(),
				percent: !capture["pct"].is_empty(),
				absolute: piped,
			})
		};

		matches.push(PlaceholderMatch { start, end, kind });
	}

	matches
}
