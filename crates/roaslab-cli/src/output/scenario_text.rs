use std::io;

use roaslab_client::inputs::INPUT_FIELDS;
use serde_json::Value;

use super::calc_text::{render_sheet_lines, text_at};
use super::format::{Align, Column, key_value_rows, render_table_or_blocks, terminal_width};

const UNSAVED_NOTICE: &str = "Warning: the scenario store could not be written, so this change lasts only for this run. Set ROASLAB_LOG=warn for details.";

const LIST_COLUMNS: [Column<'static>; 6] = [
    Column {
        name: "Id",
        align: Align::Left,
    },
    Column {
        name: "Name",
        align: Align::Left,
    },
    Column {
        name: "Saved",
        align: Align::Left,
    },
    Column {
        name: "Base",
        align: Align::Left,
    },
    Column {
        name: "Fee rate",
        align: Align::Right,
    },
    Column {
        name: "Net return",
        align: Align::Right,
    },
];

pub fn render_saved(data: &Value) -> io::Result<String> {
    let scenario = data
        .get("scenario")
        .ok_or_else(|| io::Error::other("scenario save output requires scenario"))?;
    let mut lines = vec![format!("Saved scenario `{}`.", text_at(scenario, "name")), String::new()];
    lines.extend(key_value_rows(
        &[
            ("Id", text_at(scenario, "id")),
            ("Base window", text_at(scenario, "base_mode")),
            ("Fee rate", display_only(scenario, "fee_rate")),
            ("Net return", display_only(scenario, "net_return")),
            ("Stored", stored_count(data)),
        ],
        2,
    ));
    Ok(with_unsaved_notice(lines.join("\n"), data))
}

pub fn render_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("scenario list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No saved scenarios yet.",
            "",
            "Save one with:",
            "  roaslab scenario save <name> --today-gmv <amount> --today-spend <amount>",
        ]
        .join("\n"));
    }

    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                text_at(row, "id"),
                text_at(row, "name"),
                text_at(row, "created_at_display"),
                text_at(row, "base_mode"),
                display_only(row, "fee_rate"),
                display_only(row, "net_return"),
            ]
        })
        .collect::<Vec<_>>();

    let mut lines = vec![format!("Saved scenarios ({}):", stored_count(data)), String::new()];
    lines.extend(render_table_or_blocks(
        &LIST_COLUMNS,
        &table_rows,
        terminal_width(),
        "Scenario",
    ));
    Ok(lines.join("\n"))
}

pub fn render_show(data: &Value) -> io::Result<String> {
    let sheet = data
        .get("sheet")
        .ok_or_else(|| io::Error::other("scenario show output requires sheet"))?;
    let inputs = sheet.get("inputs").cloned().unwrap_or(Value::Null);

    let mut lines = vec![
        format!("Scenario `{}`", text_at(data, "name")),
        String::new(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Id", text_at(data, "id")),
            ("Saved", text_at(data, "created_at_display")),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("Fields as entered:".to_string());
    let entries = INPUT_FIELDS
        .iter()
        .map(|field| {
            let raw = text_at(&inputs, field.key());
            let shown = if raw.trim().is_empty() {
                "(blank)".to_string()
            } else {
                raw
            };
            (field.label(), shown)
        })
        .collect::<Vec<_>>();
    lines.extend(key_value_rows(&entries, 2));

    lines.push(String::new());
    lines.extend(render_sheet_lines(sheet)?);
    Ok(lines.join("\n"))
}

pub fn render_deleted(data: &Value) -> io::Result<String> {
    let summary = format!(
        "Deleted scenario `{}` ({}). {} remaining.",
        text_at(data, "name"),
        text_at(data, "id"),
        data.get("remaining").and_then(Value::as_u64).unwrap_or(0)
    );
    Ok(with_unsaved_notice(summary, data))
}

pub fn render_cleared(data: &Value) -> io::Result<String> {
    let removed = data.get("removed").and_then(Value::as_u64).unwrap_or(0);
    Ok(with_unsaved_notice(
        format!("Cleared {removed} saved scenarios."),
        data,
    ))
}

pub fn render_export(data: &Value) -> io::Result<String> {
    data.get("csv")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| io::Error::other("scenario export output requires csv"))
}

fn display_only(row: &Value, key: &str) -> String {
    row.get(key)
        .map(|display| text_at(display, "text"))
        .unwrap_or_default()
}

fn with_unsaved_notice(text: String, data: &Value) -> String {
    let persisted = data.get("persisted").and_then(Value::as_bool).unwrap_or(true);
    if persisted {
        text
    } else {
        format!("{text}\n\n{UNSAVED_NOTICE}")
    }
}

fn stored_count(data: &Value) -> String {
    let count = data.get("count").and_then(Value::as_u64).unwrap_or(0);
    let capacity = data.get("capacity").and_then(Value::as_u64).unwrap_or(0);
    format!("{count} of {capacity}")
}
