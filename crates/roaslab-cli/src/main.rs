mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use roaslab_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "roaslab - ad return and refund-rate calculator

Usage:
  roaslab <command>

Start here:
  roaslab calc --today-gmv 125000 --today-spend 32000
  roaslab scenario list
  roaslab --help
";

const TOP_LEVEL_HELP: &str = "roaslab - ad return and refund-rate calculator

USAGE: roaslab <command> [--json]

Evaluate figures:
  roaslab calc [field flags]                      Gross/net return, fee rate, break-even targets
  roaslab calc --help                             Field flags and how values are read

Keep scenarios (newest first, 100 kept):
  roaslab scenario save <name> [field flags]      Save the fields exactly as typed
  roaslab scenario list                           Saved scenarios with quick metrics
  roaslab scenario show <id>                      Raw fields plus the full metric sheet
  roaslab scenario delete <id>                    Remove one scenario
  roaslab scenario clear --yes                    Remove every scenario
  roaslab scenario export                         CSV of every scenario to stdout

Environment:
  ROASLAB_HOME    Data directory (default ~/.roaslab)
  ROASLAB_LOG     Log filter written to stderr (default `error`)
";

fn main() -> ExitCode {
    logging::init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let cli = match cli::Cli::try_parse() {
        Ok(value) => value,
        Err(err) => return handle_parse_error(&err, &raw_args),
    };
    let mode = output::mode_for_command(&cli.command);

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> Result<ExitCode, ExitCode> {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let body = if is_top_level_help_request(raw_args) {
                TOP_LEVEL_HELP.to_string()
            } else {
                err.to_string()
            };
            if write_stdout_text(&body).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        ErrorKind::DisplayVersion => {
            if write_stdout_text(&err.to_string()).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        _ => {
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let command_hint = command_path_from_args(raw_args);
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(ExitCode::from(1))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage and "For more information" lines; the
/// recovery steps carry that guidance instead.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Command path for help hints, e.g. "scenario show".
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect::<Vec<_>>();

    let hint = match non_flags.as_slice() {
        ["calc", ..] => "calc",
        ["scenario", "save", ..] => "scenario save",
        ["scenario", "list", ..] => "scenario list",
        ["scenario", "show", ..] => "scenario show",
        ["scenario", "delete", ..] => "scenario delete",
        ["scenario", "clear", ..] => "scenario clear",
        ["scenario", "export", ..] => "scenario export",
        ["scenario", ..] => "scenario",
        _ => return None,
    };
    Some(hint.to_string())
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "store_unavailable"
                | "store_locked"
                | "store_corrupt"
                | "migration_failed"
                | "storage_write_rejected"
        )
}

#[cfg(test)]
mod tests {
    use roaslab_client::ClientError;

    use super::{command_path_from_args, is_internal_error, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn command_hint_skips_flags_and_values_after_the_path() {
        let hint = command_path_from_args(&args(&["roaslab", "scenario", "show", "--json"]));
        assert_eq!(hint.as_deref(), Some("scenario show"));

        let calc = command_path_from_args(&args(&["roaslab", "calc", "--today-gmv", "1"]));
        assert_eq!(calc.as_deref(), Some("calc"));

        assert_eq!(command_path_from_args(&args(&["roaslab", "budget"])), None);
    }

    #[test]
    fn clap_usage_tail_is_stripped() {
        let message = "error: unexpected argument '--week-gmv' found\n\nUsage: roaslab calc [OPTIONS]\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: unexpected argument '--week-gmv' found"
        );
    }

    #[test]
    fn store_faults_are_internal_but_operator_errors_are_not() {
        assert!(is_internal_error(&ClientError::internal_serialization("x")));
        assert!(is_internal_error(&ClientError::store_unavailable(
            std::path::Path::new("/nowhere/scenarios.db"),
            "not a directory"
        )));
        assert!(!is_internal_error(&ClientError::scenario_not_found("scn_1")));
        assert!(!is_internal_error(&ClientError::blank_scenario_name()));
    }
}
