use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_metric_sheet(data: &Value) -> io::Result<String> {
    Ok(render_sheet_lines(data)?.join("\n"))
}

pub(super) fn render_sheet_lines(sheet: &Value) -> io::Result<Vec<String>> {
    let windows = sheet
        .get("windows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("metric sheet requires windows"))?;
    let target = sheet
        .get("target")
        .ok_or_else(|| io::Error::other("metric sheet requires target"))?;
    let reconciliation = sheet
        .get("reconciliation")
        .ok_or_else(|| io::Error::other("metric sheet requires reconciliation"))?;

    let mut lines = vec![format!(
        "Metric sheet ({})",
        text_at(sheet, "policy_version")
    )];
    for window in windows.iter().chain(std::iter::once(target)) {
        lines.push(String::new());
        lines.push(format!("{}:", text_at(window, "label")));
        lines.extend(metric_rows(window));
    }

    lines.push(String::new());
    lines.push("Base window:".to_string());
    let delta = reconciliation
        .get("refund_rate_delta")
        .map(display_text)
        .unwrap_or_default();
    lines.extend(key_value_rows(
        &[
            ("Mode", text_at(reconciliation, "mode_label")),
            ("Refund-rate delta (today - base)", delta),
        ],
        2,
    ));

    let issues = sheet
        .get("field_issues")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Field issues:".to_string());
        for issue in &issues {
            lines.push(format!(
                "  {}: {} (entered `{}`)",
                text_at(issue, "label"),
                text_at(issue, "message"),
                text_at(issue, "received")
            ));
        }
    }

    Ok(lines)
}

fn metric_rows(window: &Value) -> Vec<String> {
    let metrics = window
        .get("metrics")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let labels = metrics
        .iter()
        .map(|metric| text_at(metric, "label"))
        .collect::<Vec<_>>();
    let entries = metrics
        .iter()
        .zip(labels.iter())
        .map(|(metric, label)| {
            let display = metric.get("display").map(display_text).unwrap_or_default();
            (label.as_str(), display)
        })
        .collect::<Vec<_>>();
    key_value_rows(&entries, 2)
}

/// Value text, followed by the note in parentheses when there is one.
pub(super) fn display_text(display: &Value) -> String {
    let text = text_at(display, "text");
    match display.get("note").and_then(Value::as_str) {
        Some(note) => format!("{text}  ({note})"),
        None => text,
    }
}

pub(super) fn text_at(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
