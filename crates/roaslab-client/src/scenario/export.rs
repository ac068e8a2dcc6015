use chrono::{DateTime, SecondsFormat};

use crate::inputs::INPUT_FIELDS;
use crate::scenario::Scenario;
use crate::scenario::summary::quick_metrics;
use crate::{ClientError, ClientResult};

const LEADING_COLUMNS: [&str; 3] = ["id", "name", "created_at"];
const TRAILING_COLUMNS: [&str; 3] = ["base_mode", "fee_rate", "net_return"];

/// Renders scenarios as CSV: identity, raw fields as typed, then the quick metrics.
pub fn export_csv(scenarios: &[Scenario]) -> ClientResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header = LEADING_COLUMNS
        .iter()
        .copied()
        .chain(INPUT_FIELDS.iter().map(|field| field.key()))
        .chain(TRAILING_COLUMNS.iter().copied());
    writer
        .write_record(header)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;

    for scenario in scenarios {
        let summary = quick_metrics(&scenario.inputs);
        let mut record = vec![
            scenario.id.clone(),
            scenario.name.clone(),
            format_created_at(scenario.created_at),
        ];
        record.extend(
            INPUT_FIELDS
                .iter()
                .map(|field| scenario.inputs.get(*field).to_string()),
        );
        record.push(summary.mode.as_str().to_string());
        record.push(summary.fee_rate.text);
        record.push(summary.net_return.text);
        writer
            .write_record(&record)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| ClientError::internal_serialization(&error.to_string()))
}

/// RFC 3339 in UTC; out-of-range timestamps fall back to the raw millisecond value.
pub fn format_created_at(created_at: i64) -> String {
    DateTime::from_timestamp_millis(created_at)
        .map(|moment| moment.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| created_at.to_string())
}
