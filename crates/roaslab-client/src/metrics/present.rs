use serde::Serialize;

use crate::metrics::calc::CalcValue;

pub const INFINITE_MARKER: &str = "∞";
pub const UNDEFINED_MARKER: &str = "—";

/// Display pair handed to renderers: the value text plus an optional note.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DisplayPair {
    pub text: String,
    pub note: Option<String>,
}

pub fn present(value: &CalcValue, formatter: impl Fn(f64) -> String) -> DisplayPair {
    match value {
        CalcValue::Value { value } => DisplayPair {
            text: formatter(*value),
            note: None,
        },
        CalcValue::Infinite { reason } => DisplayPair {
            text: INFINITE_MARKER.to_string(),
            note: Some(reason.clone()),
        },
        CalcValue::Undefined { reason } => DisplayPair {
            text: UNDEFINED_MARKER.to_string(),
            note: Some(reason.clone()),
        },
    }
}

/// Presents a plain optional number; absence renders like an undefined result.
pub fn present_optional(
    value: Option<f64>,
    missing_reason: &str,
    formatter: impl Fn(f64) -> String,
) -> DisplayPair {
    match value {
        Some(number) => present(&CalcValue::Value { value: number }, formatter),
        None => present(&CalcValue::undefined(missing_reason), formatter),
    }
}

pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}x")
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

pub fn format_points(value: f64) -> String {
    format!("{value:+.2} pp")
}

pub fn format_money(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;

    use super::{
        DisplayPair, INFINITE_MARKER, UNDEFINED_MARKER, format_money, format_percent,
        format_points, format_ratio, present, present_optional,
    };
    use crate::metrics::calc::CalcValue;

    fn render_line(label: impl Display, pair: &DisplayPair) -> String {
        match &pair.note {
            Some(note) => format!("{label}: {} ({note})", pair.text),
            None => format!("{label}: {}", pair.text),
        }
    }

    #[test]
    fn value_has_no_note() {
        let display = present(&CalcValue::Value { value: 0.256 }, format_percent);
        assert_eq!(display.text, "25.60%");
        assert_eq!(display.note, None);
    }

    #[test]
    fn infinite_and_undefined_carry_reason_notes() {
        let infinite = present(
            &CalcValue::Infinite {
                reason: "no spend".to_string(),
            },
            format_ratio,
        );
        assert_eq!(infinite.text, INFINITE_MARKER);
        assert_eq!(infinite.note.as_deref(), Some("no spend"));

        let undefined = present(&CalcValue::undefined("blank"), format_ratio);
        assert_eq!(undefined.text, UNDEFINED_MARKER);
        assert_eq!(undefined.note.as_deref(), Some("blank"));
    }

    #[test]
    fn pairs_render_alongside_fmt_display_values() {
        let pair = present(&CalcValue::undefined("blank fee"), format_percent);
        assert_eq!(render_line("Fee rate", &pair), "Fee rate: — (blank fee)");
        assert_eq!(
            render_line(7, &present(&CalcValue::Value { value: 2.0 }, format_ratio)),
            "7: 2.00x"
        );
    }

    #[test]
    fn absent_optional_uses_placeholder() {
        let display = present_optional(None, "needs gmv", format_money);
        assert_eq!(display.text, UNDEFINED_MARKER);
        assert_eq!(display.note.as_deref(), Some("needs gmv"));
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(125_000.0), "125,000.00");
        assert_eq!(format_money(999.999), "1,000.00");
        assert_eq!(format_money(12.5), "12.50");
        assert_eq!(format_money(-1_234_567.891), "-1,234,567.89");
    }

    #[test]
    fn ratio_and_points_formats() {
        assert_eq!(format_ratio(3.90625), "3.91x");
        assert_eq!(format_points(2.5), "+2.50 pp");
        assert_eq!(format_points(-0.25), "-0.25 pp");
    }
}
