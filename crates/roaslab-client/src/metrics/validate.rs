use thiserror::Error;

use crate::inputs::{FieldKind, INPUT_FIELD_COUNT, INPUT_FIELDS, InputField, Inputs};
use crate::metrics::parse::{is_blank, parse_money, parse_rate};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum FieldError {
    #[error("Not a valid amount.")]
    InvalidAmount,
    #[error("Amount must not be negative.")]
    NegativeAmount,
    #[error("Not a valid percentage.")]
    InvalidPercentage,
    #[error("Must not be below 0%.")]
    BelowZeroPercent,
    #[error("Must not exceed 100%.")]
    AboveHundredPercent,
}

impl FieldError {
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidAmount => "invalid_amount",
            Self::NegativeAmount => "negative_amount",
            Self::InvalidPercentage => "invalid_percentage",
            Self::BelowZeroPercent => "below_zero_percent",
            Self::AboveHundredPercent => "above_hundred_percent",
        }
    }
}

pub fn validate_money(text: &str, parsed: Option<f64>) -> Option<FieldError> {
    if is_blank(text) {
        return None;
    }
    let Some(value) = parsed else {
        return Some(FieldError::InvalidAmount);
    };
    if value < 0.0 {
        return Some(FieldError::NegativeAmount);
    }
    None
}

pub fn validate_refund_rate(text: &str, parsed: Option<f64>) -> Option<FieldError> {
    if is_blank(text) {
        return None;
    }
    let Some(value) = parsed else {
        return Some(FieldError::InvalidPercentage);
    };
    if value < 0.0 {
        return Some(FieldError::BelowZeroPercent);
    }
    if value > 1.0 {
        return Some(FieldError::AboveHundredPercent);
    }
    None
}

/// Fee rates have no upper bound: spend may exceed the net amount.
pub fn validate_fee_rate(text: &str, parsed: Option<f64>) -> Option<FieldError> {
    if is_blank(text) {
        return None;
    }
    let Some(value) = parsed else {
        return Some(FieldError::InvalidPercentage);
    };
    if value < 0.0 {
        return Some(FieldError::BelowZeroPercent);
    }
    None
}

/// A raw field after parsing and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReading {
    pub blank: bool,
    pub parsed: Option<f64>,
    pub error: Option<FieldError>,
}

impl FieldReading {
    pub fn read(kind: FieldKind, text: &str) -> Self {
        let (parsed, error) = match kind {
            FieldKind::Money => {
                let parsed = parse_money(text);
                (parsed, validate_money(text, parsed))
            }
            FieldKind::RefundRate => {
                let parsed = parse_rate(text);
                (parsed, validate_refund_rate(text, parsed))
            }
            FieldKind::FeeRate => {
                let parsed = parse_rate(text);
                (parsed, validate_fee_rate(text, parsed))
            }
        };
        Self {
            blank: is_blank(text),
            parsed,
            error,
        }
    }

    /// The value allowed into computation: an invalid field counts as absent.
    pub fn usable(&self) -> Option<f64> {
        if self.error.is_some() {
            return None;
        }
        self.parsed
    }
}

/// Readings for every field of one `Inputs` record, indexed by field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldReadings {
    readings: [FieldReading; INPUT_FIELD_COUNT],
}

impl FieldReadings {
    pub fn read(inputs: &Inputs) -> Self {
        Self {
            readings: INPUT_FIELDS.map(|field| FieldReading::read(field.kind(), inputs.get(field))),
        }
    }

    pub fn get(&self, field: InputField) -> &FieldReading {
        &self.readings[field as usize]
    }

    pub fn errors(&self) -> impl Iterator<Item = (InputField, FieldError)> + '_ {
        INPUT_FIELDS
            .iter()
            .zip(self.readings.iter())
            .filter_map(|(field, reading)| reading.error.map(|error| (*field, error)))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        FieldError, FieldReading, FieldReadings, validate_fee_rate, validate_money,
        validate_refund_rate,
    };
    use crate::inputs::{FieldKind, INPUT_FIELDS, InputField, Inputs};
    use crate::metrics::parse::{parse_money, parse_rate};

    #[test]
    fn blank_fields_carry_no_error_and_no_value() {
        for kind in [FieldKind::Money, FieldKind::RefundRate, FieldKind::FeeRate] {
            let reading = FieldReading::read(kind, "  ");
            assert!(reading.blank);
            assert_eq!(reading.error, None);
            assert_eq!(reading.usable(), None);
        }
    }

    #[test]
    fn money_errors_cover_garbage_and_negatives() {
        assert_eq!(
            validate_money("abc", parse_money("abc")),
            Some(FieldError::InvalidAmount)
        );
        assert_eq!(
            validate_money("-1", parse_money("-1")),
            Some(FieldError::NegativeAmount)
        );
        assert_eq!(validate_money("0", parse_money("0")), None);
    }

    #[test]
    fn invalid_money_is_excluded_from_computation() {
        let garbage = FieldReading::read(FieldKind::Money, "12x");
        assert_eq!(garbage.usable(), None);

        let negative = FieldReading::read(FieldKind::Money, "-300");
        assert_eq!(negative.parsed, Some(-300.0));
        assert_eq!(negative.usable(), None);
    }

    #[test]
    fn refund_rate_is_bounded_to_one_hundred_percent() {
        assert_eq!(
            validate_refund_rate("101%", parse_rate("101%")),
            Some(FieldError::AboveHundredPercent)
        );
        assert_eq!(validate_refund_rate("100%", parse_rate("100%")), None);
        assert_eq!(validate_refund_rate("1", parse_rate("1")), None);
        assert_eq!(
            validate_refund_rate("-1%", parse_rate("-1%")),
            Some(FieldError::BelowZeroPercent)
        );
        assert_eq!(
            validate_refund_rate("x", parse_rate("x")),
            Some(FieldError::InvalidPercentage)
        );
    }

    #[test]
    fn fee_rate_may_exceed_one_hundred_percent() {
        assert_eq!(validate_fee_rate("250%", parse_rate("250%")), None);
        assert_eq!(
            validate_fee_rate("-5%", parse_rate("-5%")),
            Some(FieldError::BelowZeroPercent)
        );
        assert_eq!(
            validate_fee_rate("?", parse_rate("?")),
            Some(FieldError::InvalidPercentage)
        );
    }

    #[test]
    fn error_messages_read_as_field_hints() {
        assert_eq!(FieldError::AboveHundredPercent.to_string(), "Must not exceed 100%.");
        assert_eq!(FieldError::InvalidAmount.code(), "invalid_amount");
    }

    #[test]
    fn readings_are_indexed_in_schema_order() {
        for (index, field) in INPUT_FIELDS.iter().enumerate() {
            assert_eq!(*field as usize, index);
        }

        let inputs = Inputs::default()
            .with(InputField::TodaySpend, "oops")
            .with(InputField::TargetRefundRate, "120%");
        let readings = FieldReadings::read(&inputs);
        let errors = readings.errors().collect::<Vec<_>>();
        assert_eq!(
            errors,
            vec![
                (InputField::TodaySpend, FieldError::InvalidAmount),
                (InputField::TargetRefundRate, FieldError::AboveHundredPercent),
            ]
        );
        assert!(readings.get(InputField::TodayGmv).blank);
    }
}
