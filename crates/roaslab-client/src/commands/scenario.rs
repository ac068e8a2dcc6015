use std::path::Path;

use crate::commands::common::{metric_sheet_data, open_book, scenario_summary_row};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    ScenarioClearData, ScenarioDeleteData, ScenarioExportData, ScenarioListData,
    ScenarioSaveData, ScenarioShowData,
};
use crate::inputs::Inputs;
use crate::scenario::export::{export_csv, format_created_at};
use crate::scenario::{SCENARIO_CAPACITY, UlidIdSource, now_millis};
use crate::{ClientError, ClientResult};

pub fn save(name: &str, inputs: Inputs) -> ClientResult<SuccessEnvelope> {
    save_with_home_override(name, inputs, None)
}

#[doc(hidden)]
pub fn save_with_home_override(
    name: &str,
    inputs: Inputs,
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let mut book = open_book(home_override);
    let (scenario, outcome) = book.save(name, inputs, &mut UlidIdSource, now_millis())?;
    let data = ScenarioSaveData {
        scenario: scenario_summary_row(&scenario),
        count: book.scenarios().len(),
        capacity: SCENARIO_CAPACITY,
        persisted: outcome.is_written(),
    };
    success("scenario save", data)
}

pub fn list() -> ClientResult<SuccessEnvelope> {
    list_with_home_override(None)
}

#[doc(hidden)]
pub fn list_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let book = open_book(home_override);
    let rows = book
        .scenarios()
        .iter()
        .map(scenario_summary_row)
        .collect::<Vec<_>>();
    let data = ScenarioListData {
        count: rows.len(),
        capacity: SCENARIO_CAPACITY,
        rows,
    };
    success("scenario list", data)
}

pub fn show(scenario_id: &str) -> ClientResult<SuccessEnvelope> {
    show_with_home_override(scenario_id, None)
}

#[doc(hidden)]
pub fn show_with_home_override(
    scenario_id: &str,
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let book = open_book(home_override);
    let scenario = book
        .find(scenario_id)
        .ok_or_else(|| ClientError::scenario_not_found(scenario_id))?;
    let data = ScenarioShowData {
        id: scenario.id.clone(),
        name: scenario.name.clone(),
        created_at: scenario.created_at,
        created_at_display: format_created_at(scenario.created_at),
        sheet: metric_sheet_data(&scenario.inputs),
    };
    success("scenario show", data)
}

pub fn delete(scenario_id: &str) -> ClientResult<SuccessEnvelope> {
    delete_with_home_override(scenario_id, None)
}

#[doc(hidden)]
pub fn delete_with_home_override(
    scenario_id: &str,
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let mut book = open_book(home_override);
    let (removed, outcome) = book
        .delete(scenario_id)
        .ok_or_else(|| ClientError::scenario_not_found(scenario_id))?;
    let data = ScenarioDeleteData {
        id: removed.id,
        name: removed.name,
        remaining: book.scenarios().len(),
        persisted: outcome.is_written(),
    };
    success("scenario delete", data)
}

pub fn clear(confirmed: bool) -> ClientResult<SuccessEnvelope> {
    clear_with_home_override(confirmed, None)
}

#[doc(hidden)]
pub fn clear_with_home_override(
    confirmed: bool,
    home_override: Option<&Path>,
) -> ClientResult<SuccessEnvelope> {
    let mut book = open_book(home_override);
    let (removed, outcome) = book.clear(confirmed)?;
    let data = ScenarioClearData {
        removed,
        persisted: outcome.is_written(),
    };
    success("scenario clear", data)
}

pub fn export() -> ClientResult<SuccessEnvelope> {
    export_with_home_override(None)
}

#[doc(hidden)]
pub fn export_with_home_override(home_override: Option<&Path>) -> ClientResult<SuccessEnvelope> {
    let book = open_book(home_override);
    let data = ScenarioExportData {
        rows: book.scenarios().len(),
        csv: export_csv(book.scenarios())?,
    };
    success("scenario export", data)
}
