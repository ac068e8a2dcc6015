use crate::inputs::{InputField, Inputs};
use crate::metrics::calc::{CalcValue, DivideReasons, divide, net_amount};
use crate::metrics::policy::{BaseMode, default_blank_rate, select_base_window};
use crate::metrics::validate::{FieldReading, FieldReadings};

pub const FORECAST_MISSING_REASON: &str =
    "Enter an expected final refund rate to project the month.";
pub const FORECAST_INVALID_REASON: &str =
    "Fix the expected final refund rate to project the month.";
pub const NET_AMOUNT_MISSING_REASON: &str = "Needs GMV and a usable refund rate.";

const GROSS_RETURN_REASONS: DivideReasons<'static> = DivideReasons {
    missing: "Enter both GMV and ad spend.",
    denominator_zero: "Ad spend is 0 while GMV is not.",
    both_zero: Some("No GMV and no ad spend yet."),
};

const FEE_RATE_REASONS: DivideReasons<'static> = DivideReasons {
    missing: "Needs ad spend and a net amount (GMV after refunds).",
    denominator_zero: "Net amount is 0 after refunds while ad spend is not.",
    both_zero: Some("No ad spend and no net amount yet."),
};

const NET_RETURN_REASONS: DivideReasons<'static> = DivideReasons {
    missing: "Needs ad spend and a net amount (GMV after refunds).",
    denominator_zero: "Ad spend is 0 while the net amount is not.",
    both_zero: Some("No net amount and no ad spend yet."),
};

const TARGET_NET_RETURN_REASONS: DivideReasons<'static> = DivideReasons {
    missing: "Enter a target fee rate.",
    denominator_zero: "A 0% target fee rate has no break-even return.",
    both_zero: None,
};

const TARGET_GROSS_RETURN_REASONS: DivideReasons<'static> = DivideReasons {
    missing: "Enter a target fee rate and a usable target refund rate.",
    denominator_zero: "Target fee rate is 0% or the target refund rate is 100%.",
    both_zero: None,
};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Window {
    Today,
    Base,
    Month,
    MonthForecast,
}

impl Window {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Base => "base",
            Self::Month => "month",
            Self::MonthForecast => "month_forecast",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today (cumulative)",
            Self::Base => "Platform base window",
            Self::Month => "Month to date",
            Self::MonthForecast => "Month forecast",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowMetrics {
    pub gross_return: CalcValue,
    pub net_amount: Option<f64>,
    pub fee_rate: CalcValue,
    pub net_return: CalcValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetMetrics {
    pub net_return: CalcValue,
    pub gross_return: CalcValue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reconciliation {
    pub mode: BaseMode,
    /// Today's refund rate minus the trailing-hour refund rate, in percentage points.
    pub refund_rate_delta_points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricSheet {
    pub readings: FieldReadings,
    pub today: WindowMetrics,
    pub base: WindowMetrics,
    pub month: WindowMetrics,
    pub month_forecast: WindowMetrics,
    pub target: TargetMetrics,
    pub reconciliation: Reconciliation,
}

impl MetricSheet {
    pub fn window(&self, window: Window) -> &WindowMetrics {
        match window {
            Window::Today => &self.today,
            Window::Base => &self.base,
            Window::Month => &self.month,
            Window::MonthForecast => &self.month_forecast,
        }
    }
}

/// Composes every metric for one set of raw inputs. Never fails: abnormal
/// operands surface as classified `CalcValue`s.
pub fn compose(inputs: &Inputs) -> MetricSheet {
    let readings = FieldReadings::read(inputs);

    let today = window_metrics(
        readings.get(InputField::TodayGmv).usable(),
        readings.get(InputField::TodaySpend).usable(),
        default_blank_rate(readings.get(InputField::TodayRefundRate)),
    );

    let base_source = select_base_window(&readings);
    let base = window_metrics(
        base_source.gross,
        base_source.spend,
        base_source.refund_rate,
    );

    let month_gross = readings.get(InputField::MonthGmv).usable();
    let month_spend = readings.get(InputField::MonthSpend).usable();
    let month = window_metrics(
        month_gross,
        month_spend,
        default_blank_rate(readings.get(InputField::MonthRefundRate)),
    );
    let month_forecast = forecast_metrics(
        month_gross,
        month_spend,
        readings.get(InputField::MonthExpectedRefundRate),
    );

    let target = target_metrics(
        readings.get(InputField::TargetFeeRate).usable(),
        default_blank_rate(readings.get(InputField::TargetRefundRate)),
    );

    let reconciliation = Reconciliation {
        mode: base_source.mode,
        refund_rate_delta_points: refund_rate_delta_points(&readings),
    };

    MetricSheet {
        readings,
        today,
        base,
        month,
        month_forecast,
        target,
        reconciliation,
    }
}

pub fn window_metrics(
    gross: Option<f64>,
    spend: Option<f64>,
    refund_rate: Option<f64>,
) -> WindowMetrics {
    let net = net_amount(gross, refund_rate);
    WindowMetrics {
        gross_return: divide(gross, spend, GROSS_RETURN_REASONS),
        net_amount: net,
        fee_rate: divide(spend, net, FEE_RATE_REASONS),
        net_return: divide(net, spend, NET_RETURN_REASONS),
    }
}

/// Projection with the expected final refund rate. A blank or invalid
/// expectation leaves the whole forecast undefined rather than reusing the
/// realized rate.
pub fn forecast_metrics(
    gross: Option<f64>,
    spend: Option<f64>,
    expected_refund_rate: &FieldReading,
) -> WindowMetrics {
    match expected_refund_rate.usable() {
        Some(rate) => window_metrics(gross, spend, Some(rate)),
        None => {
            let reason = if expected_refund_rate.error.is_some() {
                FORECAST_INVALID_REASON
            } else {
                FORECAST_MISSING_REASON
            };
            WindowMetrics {
                gross_return: CalcValue::undefined(reason),
                net_amount: None,
                fee_rate: CalcValue::undefined(reason),
                net_return: CalcValue::undefined(reason),
            }
        }
    }
}

pub fn target_metrics(fee_rate: Option<f64>, refund_rate: Option<f64>) -> TargetMetrics {
    let gross_denominator = fee_rate
        .zip(refund_rate)
        .map(|(fee, refund)| fee * (1.0 - refund));
    TargetMetrics {
        net_return: divide(Some(1.0), fee_rate, TARGET_NET_RETURN_REASONS),
        gross_return: divide(Some(1.0), gross_denominator, TARGET_GROSS_RETURN_REASONS),
    }
}

fn refund_rate_delta_points(readings: &FieldReadings) -> Option<f64> {
    let today = readings.get(InputField::TodayRefundRate).usable()?;
    let hour = readings.get(InputField::HourRefundRate).usable()?;
    Some((today - hour) * 100.0)
}
