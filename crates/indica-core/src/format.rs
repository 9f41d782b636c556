//! Display formatting for money and percentages (pt-BR conventions).
//!
//! These helpers only produce strings; they never feed back into the numbers
//! computed by [`crate::earnings`] or [`crate::summary`].

use crate::profile::Money;

/// Separator between the currency symbol and the amount (U+00A0).
const NBSP: char = '\u{a0}';

/// Format `value` as Brazilian Real, e.g. `R$ 1.234,57`.
///
/// Cents are rounded half away from zero. Non-finite values render as zero.
pub fn format_brl(value: Money) -> String {
  let value = if value.is_finite() { value } else { 0.0 };
  let cents = (value.abs() * 100.0).round() as u64;
  let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

  format!(
    "{sign}R${NBSP}{},{:02}",
    group_thousands(cents / 100),
    cents % 100
  )
}

/// Format a percentage with exactly one decimal place, e.g. `33.3%`.
pub fn format_percentage(value: f64) -> String { format!("{value:.1}%") }

fn group_thousands(mut n: u64) -> String {
  let mut groups = Vec::new();
  loop {
    if n < 1000 {
      groups.push(n.to_string());
      break;
    }
    groups.push(format!("{:03}", n % 1000));
    n /= 1000;
  }
  groups.reverse();
  groups.join(".")
}
