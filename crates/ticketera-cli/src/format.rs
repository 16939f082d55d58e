//! Locale formatting for Chilean pesos, dates and durations.

use chrono::{Datelike, Timelike};

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Format an amount as Chilean pesos: `15000.0` → `$15.000`.
///
/// Pesos have no minor unit, so the amount is rounded to a whole number.
pub fn money(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Long date: `16 de enero, 2025`.
pub fn date(value: &impl Datelike) -> String {
    format!(
        "{:02} de {}, {}",
        value.day(),
        MONTHS[value.month0() as usize],
        value.year()
    )
}

/// Short date and time: `16/01/2025 20:00`.
pub fn date_time<T: Datelike + Timelike>(value: &T) -> String {
    format!(
        "{:02}/{:02}/{} {:02}:{:02}",
        value.day(),
        value.month(),
        value.year(),
        value.hour(),
        value.minute()
    )
}

/// Compact duration: `3665` → `1h 1m 5s`, `0` → `0s`.
pub fn duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 || parts.is_empty() {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}
