//! Shared numeric display helpers.
//!
//! Every amount shown in a metrics block goes through [`format_currency`], so
//! all four renderers group digits and round identically.

/// Rupee sign prefixed to every amount.
pub const RUPEE: &str = "₹";

/// Group an amount the Indian way (last three digits, then pairs) with exactly
/// two decimals: `1234567.5` → `12,34,567.50`.
///
/// Negative amounts keep a leading `-`, unless they round to zero. Non-finite
/// values render as `NaN`, `∞` or `-∞`.
pub fn format_number(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return text.to_string();
    }

    let fixed = fixed_two(value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');

    let mut out = String::with_capacity(fixed.len() + whole.len() / 2 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_indian(whole));
    out.push('.');
    out.push_str(fraction);
    out
}

/// `₹` followed by [`format_number`].
pub fn format_currency(value: f64) -> String {
    format!("{RUPEE}{}", format_number(value))
}

/// Two-decimal fixed percent: `12.3456` → `12.35%`. Rounds like
/// [`format_number`]; a negative value keeps its sign.
pub fn format_percent(value: f64) -> String {
    if let Some(text) = non_finite(value) {
        return format!("{text}%");
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}%", fixed_two(value.abs()))
}

/// Round up to a whole count for display. `11.2` → `12`, `12.0` → `12`.
/// Never shows a negative zero.
pub fn format_ceil(value: f64) -> String {
    let rounded = value.ceil();
    if rounded == 0.0 {
        // also folds -0.0
        return "0".to_string();
    }
    format!("{rounded:.0}")
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value > 0.0 { "∞" } else { "-∞" })
    } else {
        None
    }
}

/// Two-decimal rendering of a non-negative magnitude, ties rounded up.
///
/// `{:.2}` rounds the exact binary value half-to-even. A value sits exactly
/// halfway between two cents only when eight times it is an odd integer, so
/// those are bumped by hand. They always end in .125, .375, .625 or .875, so
/// the bump never carries.
fn fixed_two(magnitude: f64) -> String {
    let eighths = magnitude * 8.0;
    if eighths.fract() != 0.0 || eighths % 2.0 != 1.0 {
        return format!("{magnitude:.2}");
    }

    let mut digits = format!("{magnitude:.3}");
    digits.pop();
    if let Some(last) = digits.pop() {
        digits.push(char::from(last as u8 + 1));
    }
    digits
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
