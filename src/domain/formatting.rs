//! Display formatting for prices, market caps and percentage changes.
//!
//! Output mirrors what the browser's `en-US` number formatting produces for
//! the same values, so cards, overlay rows and the detail panel agree.

/// Sign classification of a percentage change. Zero counts as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Positive,
    Negative,
}

impl Trend {
    pub fn of(change: f64) -> Self {
        if change >= 0.0 { Trend::Positive } else { Trend::Negative }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Trend::Positive)
    }
}

/// USD price. Sub-dollar values keep up to 6 fraction digits.
pub fn format_price(value: f64) -> String {
    let max_decimals = if value < 1.0 { 6 } else { 2 };
    let fixed = format!("{:.*}", max_decimals, value.abs());
    let digits = group_thousands(&trim_fraction(&fixed, 2));
    if value < 0.0 && has_nonzero_digit(&fixed) {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Market cap with t/b/m suffixes, thresholds checked largest first.
pub fn format_market_cap(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.2}t", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}b", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}m", value / 1e6)
    } else {
        format!("${}", group_thousands(&trim_fraction(&format!("{:.3}", value), 0)))
    }
}

/// `+1.23%` / `-4.56%`
pub fn format_percent(value: f64) -> String {
    // -0.0 would otherwise print as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}

/// Y-axis tick label
pub fn format_axis_price(value: f64) -> String {
    format!("${:.2}", value)
}

/// Drops trailing fraction zeros, keeping at least `min_decimals` digits.
fn trim_fraction(formatted: &str, min_decimals: usize) -> String {
    let Some((integer, fraction)) = formatted.split_once('.') else {
        return formatted.to_string();
    };
    let mut fraction = fraction.trim_end_matches('0').to_string();
    while fraction.len() < min_decimals {
        fraction.push('0');
    }
    if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    }
}

/// Inserts `,` between groups of three integer digits.
fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}

fn has_nonzero_digit(formatted: &str) -> bool {
    formatted.chars().any(|c| c.is_ascii_digit() && c != '0')
}
