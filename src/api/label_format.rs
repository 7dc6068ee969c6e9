use chrono::{DateTime, Utc};

/// Formats a value for legends, axis ticks and floating labels.
///
/// Whole numbers print without decimals and with `,` thousands separators;
/// anything else keeps two decimals.
#[must_use]
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_owned();
    }
    // Past 1e15 an f64 carries no cents, and scaling by 100 could overflow.
    let rounded = if value.abs() < 1e15 {
        (value * 100.0).round() / 100.0
    } else {
        value.round()
    };
    let negative = rounded < 0.0;
    let magnitude = rounded.abs();
    let whole = magnitude.trunc();
    let cents = ((magnitude - whole) * 100.0).round() as u64;

    let mut text = group_thousands(&format!("{whole:.0}"));
    if cents > 0 {
        text.push_str(&format!(".{cents:02}"));
    }
    if negative && text != "0" {
        text.insert(0, '-');
    }
    text
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Time-axis label formatting supplied by the host (timezone, locale).
pub trait TimeLabelFormatter {
    fn format(&self, time: DateTime<Utc>) -> String;
}

/// `chrono` strftime formatting in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternTimeFormatter {
    pattern: String,
}

impl PatternTimeFormatter {
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

impl Default for PatternTimeFormatter {
    fn default() -> Self {
        Self::new("%b %d")
    }
}

impl TimeLabelFormatter for PatternTimeFormatter {
    fn format(&self, time: DateTime<Utc>) -> String {
        time.format(&self.pattern).to_string()
    }
}
