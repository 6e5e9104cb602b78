// src/app/utils.rs
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

use super::data::{Field, Record};

pub const CRORE: f64 = 10_000_000.0;

/// Full amount with Indian digit grouping: 12345678.5 -> "₹1,23,45,678.50".
/// Whole amounts are shown without decimals.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "₹0".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    let grouped = whole.to_formatted_string(&Locale::en_IN);
    if frac == 0 {
        format!("{sign}₹{grouped}")
    } else {
        format!("{sign}₹{grouped}.{frac:02}")
    }
}

/// Abbreviated amount in crore: 123456789 -> "₹12.35 Cr".
pub fn format_crore(value: f64) -> String {
    let cr = if value.is_finite() { value / CRORE } else { 0.0 };
    format!("₹{cr:.2} Cr")
}

/// ISO timestamps as local "YYYY-MM-DD HH:MM"; anything unparseable is shown verbatim.
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return dt.format("%Y-%m-%d %H:%M").to_string();
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

/// Table-cell text for one field.
pub fn display_cell(record: &Record, field: Field) -> String {
    match field {
        Field::LastUpdated => format_timestamp(&record.last_updated),
        f => match record.number(f) {
            Some(n) => format_amount(n),
            None => record.text(f).into_owned(),
        },
    }
}

/// "Delhi, Mumbai +3" style summary of a selection for button captions.
pub fn selection_caption<'a, I>(values: I, max_shown: usize) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let all: Vec<&String> = values.into_iter().collect();
    if all.is_empty() {
        return "All".to_string();
    }
    let shown = all
        .iter()
        .take(max_shown)
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if all.len() > max_shown {
        format!("{shown} +{}", all.len() - max_shown)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_indian_grouping() {
        assert_eq!(format_amount(0.0), "₹0");
        assert_eq!(format_amount(999.0), "₹999");
        assert_eq!(format_amount(1000.0), "₹1,000");
        assert_eq!(format_amount(123456.0), "₹1,23,456");
        assert_eq!(format_amount(1234567.0), "₹12,34,567");
        assert_eq!(format_amount(12345678.5), "₹1,23,45,678.50");
        assert_eq!(format_amount(-2500.0), "-₹2,500");
        assert_eq!(format_amount(1234567890.0), "₹1,23,45,67,890");
        assert_eq!(format_amount(100000.25), "₹1,00,000.25");
    }

    #[test]
    fn crore_has_two_decimals() {
        assert_eq!(format_crore(123_456_789.0), "₹12.35 Cr");
        assert_eq!(format_crore(0.0), "₹0.00 Cr");
        assert_eq!(format_crore(5_000_000.0), "₹0.50 Cr");
    }

    #[test]
    fn timestamps_fall_back_to_raw_text() {
        assert_eq!(format_timestamp("2024-05-01T10:30:00"), "2024-05-01 10:30");
        assert_eq!(format_timestamp("2024-05-01 10:30:00.123"), "2024-05-01 10:30");
        assert_eq!(format_timestamp("2024-05-01"), "2024-05-01");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn cells_format_by_field_kind() {
        let r = Record {
            movie: "X (Hindi)".into(),
            final_gross: 1500000.0,
            ..Record::default()
        };
        assert_eq!(display_cell(&r, Field::Movie), "X (Hindi)");
        assert_eq!(display_cell(&r, Field::FinalGross), "₹15,00,000");
    }

    #[test]
    fn captions_summarise_long_selections() {
        let v: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
        assert_eq!(selection_caption(&v, 2), "A, B +2");
        assert_eq!(selection_caption(&v[..1], 2), "A");
        assert_eq!(selection_caption(&Vec::<String>::new(), 2), "All");
    }
}
