use std::path::Path;

use crate::contracts::types::{
    FieldIssue, MetricData, MetricSheetData, ReconciliationData, ScenarioSummaryRow, WindowData,
};
use crate::inputs::{INPUTS_SCHEMA_VERSION, Inputs};
use crate::metrics::calc::CalcValue;
use crate::metrics::compose::{
    MetricSheet, NET_AMOUNT_MISSING_REASON, TargetMetrics, Window, WindowMetrics, compose,
};
use crate::metrics::policy::METRIC_POLICY_VERSION;
use crate::metrics::present::{
    format_money, format_percent, format_points, format_ratio, present, present_optional,
};
use crate::scenario::export::format_created_at;
use crate::scenario::{Scenario, ScenarioBook, ScenarioStore, SqliteBlobStorage, quick_metrics};

const RENDERED_WINDOWS: [Window; 4] = [
    Window::Today,
    Window::Base,
    Window::Month,
    Window::MonthForecast,
];

const DELTA_MISSING_REASON: &str = "Needs valid refund rates for both today and the base window.";

pub(crate) fn open_book(home_override: Option<&Path>) -> ScenarioBook<SqliteBlobStorage> {
    let storage = match home_override {
        Some(home) => SqliteBlobStorage::at(home),
        None => SqliteBlobStorage::new(),
    };
    ScenarioBook::open(ScenarioStore::new(storage))
}

pub(crate) fn metric_sheet_data(inputs: &Inputs) -> MetricSheetData {
    let sheet = compose(inputs);
    MetricSheetData {
        policy_version: METRIC_POLICY_VERSION.to_string(),
        inputs_schema_version: INPUTS_SCHEMA_VERSION.to_string(),
        inputs: inputs.clone(),
        field_issues: field_issues(inputs, &sheet),
        windows: RENDERED_WINDOWS
            .iter()
            .map(|window| window_data(*window, sheet.window(*window)))
            .collect(),
        target: target_data(&sheet.target),
        reconciliation: reconciliation_data(&sheet),
    }
}

pub(crate) fn scenario_summary_row(scenario: &Scenario) -> ScenarioSummaryRow {
    let quick = quick_metrics(&scenario.inputs);
    ScenarioSummaryRow {
        id: scenario.id.clone(),
        name: scenario.name.clone(),
        created_at: scenario.created_at,
        created_at_display: format_created_at(scenario.created_at),
        base_mode: quick.mode.as_str().to_string(),
        fee_rate: quick.fee_rate,
        net_return: quick.net_return,
    }
}

fn field_issues(inputs: &Inputs, sheet: &MetricSheet) -> Vec<FieldIssue> {
    sheet
        .readings
        .errors()
        .map(|(field, error)| FieldIssue {
            field: field.key().to_string(),
            label: field.label().to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
            received: inputs.get(field).to_string(),
        })
        .collect()
}

fn window_data(window: Window, metrics: &WindowMetrics) -> WindowData {
    let net_amount = match metrics.net_amount {
        Some(value) => CalcValue::Value { value },
        None => CalcValue::undefined(NET_AMOUNT_MISSING_REASON),
    };
    WindowData {
        window: window.as_str().to_string(),
        label: window.label().to_string(),
        metrics: vec![
            metric("gross_return", "Gross return", &metrics.gross_return, format_ratio),
            metric("net_amount", "Net amount", &net_amount, format_money),
            metric("fee_rate", "Fee rate", &metrics.fee_rate, format_percent),
            metric("net_return", "Net return", &metrics.net_return, format_ratio),
        ],
    }
}

fn target_data(target: &TargetMetrics) -> WindowData {
    WindowData {
        window: "target".to_string(),
        label: "Break-even target".to_string(),
        metrics: vec![
            metric("net_return", "Net return", &target.net_return, format_ratio),
            metric("gross_return", "Gross return", &target.gross_return, format_ratio),
        ],
    }
}

fn reconciliation_data(sheet: &MetricSheet) -> ReconciliationData {
    let mode = sheet.reconciliation.mode;
    let delta = sheet.reconciliation.refund_rate_delta_points;
    ReconciliationData {
        mode: mode.as_str().to_string(),
        mode_label: mode.label().to_string(),
        refund_rate_delta_points: delta,
        refund_rate_delta: present_optional(delta, DELTA_MISSING_REASON, format_points),
    }
}

fn metric(
    key: &str,
    label: &str,
    value: &CalcValue,
    formatter: impl Fn(f64) -> String,
) -> MetricData {
    MetricData {
        key: key.to_string(),
        label: label.to_string(),
        result: value.clone(),
        display: present(value, formatter),
    }
}

#[cfg(test)]
mod tests {
    use super::metric_sheet_data;
    use crate::inputs::{InputField, Inputs};
    use crate::metrics::calc::CalcValue;

    #[test]
    fn sheet_lists_windows_in_reading_order() {
        let data = metric_sheet_data(&Inputs::default());
        let windows = data
            .windows
            .iter()
            .map(|window| window.window.as_str())
            .collect::<Vec<_>>();
        assert_eq!(windows, vec!["today", "base", "month", "month_forecast"]);
        assert_eq!(data.target.metrics.len(), 2);
    }

    #[test]
    fn field_issues_echo_the_raw_text() {
        let inputs = Inputs::default()
            .with(InputField::TodayGmv, "12x")
            .with(InputField::TargetRefundRate, "140%");
        let data = metric_sheet_data(&inputs);

        assert_eq!(data.field_issues.len(), 2);
        assert_eq!(data.field_issues[0].field, "todayGmv");
        assert_eq!(data.field_issues[0].received, "12x");
        assert_eq!(data.field_issues[1].field, "targetRefundRate");
    }

    #[test]
    fn net_amount_renders_with_grouping() {
        let inputs = Inputs::default()
            .with(InputField::TodayGmv, "125000")
            .with(InputField::TodaySpend, "32000")
            .with(InputField::TodayRefundRate, "20%");
        let data = metric_sheet_data(&inputs);
        let today = &data.windows[0];

        assert_eq!(today.metrics[1].key, "net_amount");
        assert_eq!(today.metrics[1].display.text, "100,000.00");
        assert!(matches!(
            today.metrics[1].result,
            CalcValue::Value { value } if (value - 100_000.0).abs() < 1e-6
        ));
    }
}
