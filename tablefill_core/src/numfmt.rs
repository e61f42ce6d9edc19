use crate::TablefillError;
use crate::TablefillResult;

/// Formatting directives extracted from a numeric placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NumFormat {
	/// Number of fractional digits to keep after rounding.
	pub precision: usize,
	/// Insert thousands separators into the integer part.
	pub commas: bool,
	/// Multiply the value by 100 before rounding.
	pub percent: bool,
	/// Render the absolute value instead of the signed value.
	pub absolute: bool,
}

/// An exact decimal value represented as a sign, a digit coefficient, and a
/// scale: `value = ±coefficient × 10^-scale`. Rounding and rendering operate
/// on the digit string directly, so no precision is lost to binary floats and
/// round-half-up behaves the same on every platform.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
	negative: bool,
	/// Coefficient digits, most significant first. Never empty.
	digits: Vec<u8>,
	/// Number of fractional digits. May be negative after exponent folding
	/// until normalized.
	scale: i64,
}

impl Decimal {
	/// Parse a decimal from text. Accepts a leading sign, pure integers, pure
	/// decimals, and scientific notation (`-2.23e+10`). Returns `None` when
	/// the text is not a number.
	fn parse(raw: &str) -> Option<Self> {
		let text = raw.trim();
		let mut chars = text.chars().peekable();

		let negative = match chars.peek() {
			Some('-') => {
				chars.next();
				true
			}
			Some('+') => {
				chars.next();
				false
			}
			_ => false,
		};

		let mut digits: Vec<u8> = Vec::new();
		let mut frac_len: i64 = 0;
		let mut seen_digit = false;
		let mut in_fraction = false;
		let mut exponent: i64 = 0;

		while let Some(&ch) = chars.peek() {
			match ch {
				'0'..='9' => {
					chars.next();
					digits.push(ch as u8 - b'0');
					seen_digit = true;
					if in_fraction {
						frac_len += 1;
					}
				}
				'.' if !in_fraction => {
					chars.next();
					in_fraction = true;
				}
				'e' | 'E' => {
					chars.next();
					let mut exp_negative = false;
					match chars.peek() {
						Some('-') => {
							chars.next();
							exp_negative = true;
						}
						Some('+') => {
							chars.next();
						}
						_ => {}
					}
					let mut exp_digits = 0u32;
					let mut exp_value: i64 = 0;
					while let Some(&d @ '0'..='9') = chars.peek() {
						chars.next();
						exp_value = exp_value.saturating_mul(10) + i64::from(d as u8 - b'0');
						exp_digits += 1;
					}
					if exp_digits == 0 || chars.peek().is_some() {
						return None;
					}
					exponent = if exp_negative { -exp_value } else { exp_value };
					break;
				}
				_ => return None,
			}
		}

		if !seen_digit || chars.peek().is_some() {
			return None;
		}

		let mut decimal = Self {
			negative,
			digits,
			scale: frac_len - exponent,
		};
		decimal.normalize();
		Some(decimal)
	}

	/// Strip redundant leading zeros and fold a negative scale (a positive
	/// exponent) into the coefficient so that `scale >= 0` afterwards.
	fn normalize(&mut self) {
		while self.digits.len() > 1 && self.digits[0] == 0 {
			self.digits.remove(0);
		}
		if self.digits.is_empty() {
			self.digits.push(0);
		}
		while self.scale < 0 {
			self.digits.push(0);
			self.scale += 1;
		}
	}

	/// Multiply by 100 (percent scaling).
	fn scale_percent(&mut self) {
		self.scale -= 2;
		self.normalize();
	}

	/// Round to exactly `precision` fractional digits, half away from zero.
	/// The sign never participates: ties round toward the larger magnitude.
	fn round_half_up(&mut self, precision: usize) {
		let target = precision as i64;
		if self.scale <= target {
			for _ in self.scale..target {
				self.digits.push(0);
			}
			self.scale = target;
			return;
		}

		let dropped = (self.scale - target) as usize;
		while self.digits.len() <= dropped {
			self.digits.insert(0, 0);
		}
		let kept = self.digits.len() - dropped;
		let round_up = self.digits[kept] >= 5;
		self.digits.truncate(kept);
		if round_up {
			self.increment();
		}
		self.scale = target;
	}

	/// Add one to the coefficient, carrying as needed.
	fn increment(&mut self) {
		for digit in self.digits.iter_mut().rev() {
			if *digit < 9 {
				*digit += 1;
				return;
			}
			*digit = 0;
		}
		self.digits.insert(0, 1);
	}

	/// Render as a fixed-point string with exactly `scale` fractional digits.
	/// `scale == 0` yields no decimal point. Thousands separators are applied
	/// to the integer part only and never depend on a system locale.
	fn render(&self, commas: bool) -> String {
		let precision = self.scale as usize;
		let mut digits = self.digits.clone();
		while digits.len() <= precision {
			digits.insert(0, 0);
		}
		let split = digits.len() - precision;

		let mut integer: String = digits[..split].iter().map(|d| char::from(b'0' + d)).collect();
		if commas {
			integer = group_thousands(&integer);
		}

		let mut out = String::with_capacity(integer.len() + precision + 2);
		if self.negative {
			out.push('-');
		}
		out.push_str(&integer);
		if precision > 0 {
			out.push('.');
			for digit in &digits[split..] {
				out.push(char::from(b'0' + digit));
			}
		}
		out
	}
}

/// Insert a comma before every group of three digits, counting from the
/// right. The input is a bare digit string (no sign, no decimal point).
fn group_thousands(integer: &str) -> String {
	let len = integer.len();
	let mut out = String::with_capacity(len + len / 3);
	for (i, ch) in integer.chars().enumerate() {
		if i > 0 && (len - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}

/// Format a raw table value according to a numeric placeholder's directives.
/// Percent scaling happens before the absolute value, which happens before
/// rounding. Returns `None` when the value is not numeric; the caller turns
/// that into the fatal [`TablefillError::NumericParse`] condition.
pub fn format_value(raw: &str, directives: &NumFormat) -> Option<String> {
	let mut decimal = Decimal::parse(raw)?;
	if directives.percent {
		decimal.scale_percent();
	}
	if directives.absolute {
		decimal.negative = false;
	}
	decimal.round_half_up(directives.precision);
	Some(decimal.render(directives.commas))
}

/// One p-value significance level: values strictly below `threshold` may
/// earn `marker` (the smallest qualifying threshold wins).
#[derive(Debug, Clone, PartialEq)]
pub struct StarRule {
	pub threshold: f64,
	pub marker: String,
}

/// The conventional significance levels: `*` below 0.10, `**` below 0.05,
/// `***` below 0.01.
pub fn default_star_rules() -> Vec<StarRule> {
	vec![
		StarRule {
			threshold: 0.10,
			marker: "*".into(),
		},
		StarRule {
			threshold: 0.05,
			marker: "**".into(),
		},
		StarRule {
			threshold: 0.01,
			marker: "***".into(),
		},
	]
}

/// Build significance rules from caller-supplied thresholds and markers.
///
/// Thresholds must lie strictly between 0 and 1. Markers pair with
/// thresholds in the order supplied; when fewer markers than thresholds are
/// given, the remainder are synthesized by appending one more `*` than the
/// longest marker already in use. The result is sorted by threshold
/// descending. Empty thresholds yield [`default_star_rules`].
pub fn build_star_rules(thresholds: &[f64], markers: &[String]) -> TablefillResult<Vec<StarRule>> {
	if thresholds.is_empty() {
		if markers.is_empty() {
			return Ok(default_star_rules());
		}
		return Err(TablefillError::TooManyMarkers {
			markers: markers.len(),
			thresholds: 0,
		});
	}
	for &threshold in thresholds {
		if threshold <= 0.0 || threshold >= 1.0 {
			return Err(TablefillError::InvalidThreshold(threshold.to_string()));
		}
	}
	if markers.len() > thresholds.len() {
		return Err(TablefillError::TooManyMarkers {
			markers: markers.len(),
			thresholds: thresholds.len(),
		});
	}

	let mut rules: Vec<StarRule> = thresholds
		.iter()
		.zip(markers)
		.map(|(&threshold, marker)| {
			StarRule {
				threshold,
				marker: marker.clone(),
			}
		})
		.collect();

	for &threshold in &thresholds[markers.len()..] {
		let longest = rules.iter().map(|rule| rule.marker.chars().count()).max();
		let marker = "*".repeat(longest.unwrap_or(0) + 1);
		rules.push(StarRule { threshold, marker });
	}

	rules.sort_by(|a, b| {
		b.threshold
			.partial_cmp(&a.threshold)
			.unwrap_or(std::cmp::Ordering::Equal)
	});
	Ok(rules)
}

/// Map a numeric p-value to its significance marker: the marker of the
/// smallest threshold strictly greater than the value, or the empty string
/// when no threshold exceeds it.
pub fn stars_for(value: f64, rules: &[StarRule]) -> &str {
	rules
		.iter()
		.rev()
		.find(|rule| rule.threshold > value)
		.map_or("", |rule| rule.marker.as_str())
}
