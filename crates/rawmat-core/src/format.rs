//! Display formatting for numbers, currency, and axis labels.

/// Format a number with thousands grouping and at most `decimals`
/// fractional digits.
///
/// Trailing fractional zeros are stripped, so "12.50" renders as
/// "12.5" and "3.0" as "3". Exact zero renders as "0". Values below
/// 0.01 switch to scientific notation when two decimals were
/// requested, which keeps tiny usage figures readable instead of
/// collapsing them to "0.00".
pub fn format_number(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.01 && decimals == 2 {
        return format!("{:.2e}", value);
    }

    let fixed = format!("{:.*}", decimals, value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    group_thousands(trimmed)
}

/// Format a value as won currency with no fractional digits.
pub fn format_currency(value: f64) -> String {
    let rounded = value.round();
    if rounded == 0.0 {
        return "₩0".to_string();
    }
    if rounded < 0.0 {
        format!("-₩{}", group_thousands(&format!("{:.0}", -rounded)))
    } else {
        format!("₩{}", group_thousands(&format!("{:.0}", rounded)))
    }
}

/// Compact won rendering for chart axis ticks (1.2B원, 3.5M원, ...).
pub fn format_compact_won(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("{:.1}B원", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("{:.1}M원", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K원", value / 1_000.0)
    } else {
        format!("{}원", value)
    }
}

/// Insert comma separators into the integer digits of an
/// already-formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, digits) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
