use serde::Serialize;

use crate::inputs::InputField;
use crate::metrics::validate::{FieldReading, FieldReadings};

/// Metric-composition policy identifier, emitted with every metric sheet.
pub const METRIC_POLICY_VERSION: &str = "metrics/v1";

/// Blank-rate defaulting policy.
///
/// A blank refund rate with no validation error counts as `0`. A field that
/// failed validation stays absent; its raw text never reaches computation.
/// Money fields are never defaulted.
pub fn default_blank_rate(reading: &FieldReading) -> Option<f64> {
    if reading.error.is_some() {
        return None;
    }
    if reading.blank {
        return Some(0.0);
    }
    reading.parsed
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseMode {
    /// Trailing-hour platform gross and spend are both present and valid.
    Exact,
    /// Falls back to daily cumulative gross and spend.
    Estimated,
}

impl BaseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Estimated => "estimated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "Exact (trailing-hour platform figures)",
            Self::Estimated => "Estimated (daily cumulative figures)",
        }
    }
}

/// Operands chosen for the base window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseWindowSource {
    pub mode: BaseMode,
    pub gross: Option<f64>,
    pub spend: Option<f64>,
    pub refund_rate: Option<f64>,
}

/// Base-window selection policy.
///
/// The trailing-hour refund rate is used in both modes; only gross and spend
/// fall back to the daily cumulative figures.
pub fn select_base_window(readings: &FieldReadings) -> BaseWindowSource {
    let refund_rate = default_blank_rate(readings.get(InputField::HourRefundRate));
    let hour_gross = readings.get(InputField::HourGmv).usable();
    let hour_spend = readings.get(InputField::HourSpend).usable();

    if hour_gross.is_some() && hour_spend.is_some() {
        return BaseWindowSource {
            mode: BaseMode::Exact,
            gross: hour_gross,
            spend: hour_spend,
            refund_rate,
        };
    }

    BaseWindowSource {
        mode: BaseMode::Estimated,
        gross: readings.get(InputField::TodayGmv).usable(),
        spend: readings.get(InputField::TodaySpend).usable(),
        refund_rate,
    }
}
