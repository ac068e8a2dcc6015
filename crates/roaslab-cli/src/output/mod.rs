mod calc_text;
mod error_text;
mod format;
mod json;
mod mode;
mod scenario_text;

use std::io;

use roaslab_client::{ClientError, SuccessEnvelope};

pub use mode::{OutputMode, mode_for_command};

use crate::stdout_io::{write_stdout_line, write_stdout_text};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    if mode == OutputMode::Text && success.command == "scenario export" {
        return write_stdout_text(&body);
    }
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "calc" => calc_text::render_metric_sheet(&success.data),
        "scenario save" => scenario_text::render_saved(&success.data),
        "scenario list" => scenario_text::render_list(&success.data),
        "scenario show" => scenario_text::render_show(&success.data),
        "scenario delete" => scenario_text::render_deleted(&success.data),
        "scenario clear" => scenario_text::render_cleared(&success.data),
        "scenario export" => scenario_text::render_export(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
