use chrono::{Datelike, NaiveDate};

use crate::models::MonthKey;

pub const CURRENCY_SYMBOL: &str = "₪";
pub const UNKNOWN_MONTH_LABEL: &str = "ללא חודש";

fn format_with_commas(value: u64) -> String {
    let s = value.to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Formats an ILS amount the way the he-IL locale shows it, e.g. `1,234.50 ₪`.
/// Missing or non-finite amounts render as an empty string.
pub fn format_currency(amount: Option<f64>) -> String {
    let amount = match amount {
        Some(v) if v.is_finite() => v,
        _ => return String::new(),
    };

    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}.{:02} {}",
        sign,
        format_with_commas(cents / 100),
        cents % 100,
        CURRENCY_SYMBOL
    )
}

/// `2024-01-05` (or a timestamp starting with it) becomes `5.1.2024`.
/// Unparsable input is returned unchanged.
pub fn format_date(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    let prefix: String = date.chars().take(10).collect();
    match NaiveDate::parse_from_str(&prefix, "%Y-%m-%d") {
        Ok(d) => format!("{}.{}.{}", d.day(), d.month(), d.year()),
        Err(_) => date.to_string(),
    }
}

/// `2024-03` becomes `03/24`.
pub fn format_month_label(month: &str) -> String {
    if month.chars().count() == 7 && month.contains('-') {
        if let Some((year, mm)) = month.split_once('-') {
            let short_year: String = year
                .chars()
                .skip(year.chars().count().saturating_sub(2))
                .collect();
            return format!("{}/{}", mm, short_year);
        }
    }
    month.to_string()
}

pub fn month_key_label(key: &MonthKey) -> String {
    match key {
        MonthKey::Known(month) => format_month_label(month),
        MonthKey::Unknown => UNKNOWN_MONTH_LABEL.to_string(),
    }
}
