use rust_decimal::{Decimal, RoundingStrategy};

use crate::settings::Currency;

/// Format an amount the en-US way with the currency symbol in front.
/// e.g. `1234567.891` with 2 digits → `"$1,234,567.89"`, `-42` → `"-$42.00"`
pub(crate) fn format_currency(val: Decimal, currency: Currency, fraction_digits: u32) -> String {
    let rounded = val.round_dp_with_strategy(fraction_digits, RoundingStrategy::MidpointAwayFromZero);
    let abs = rounded.abs();
    let formatted = format!("{abs:.prec$}", prec = fraction_digits as usize);
    let (int_part, dec_part) = match formatted.split_once('.') {
        Some((int_part, dec_part)) => (int_part, Some(dec_part)),
        None => (formatted.as_str(), None),
    };

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    let symbol = currency.symbol();
    match dec_part {
        Some(dec_part) => format!("{sign}{symbol}{with_commas}.{dec_part}"),
        None => format!("{sign}{symbol}{with_commas}"),
    }
}

/// Two-digit amounts, the default everywhere except budget goals.
pub(crate) fn money(val: Decimal, currency: Currency) -> String {
    format_currency(val, currency, 2)
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// The result is guaranteed to be at most `max` characters (counting "…" as one).
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page - 1);
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}
