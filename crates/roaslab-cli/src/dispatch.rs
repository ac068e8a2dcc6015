use roaslab_client::commands;
use roaslab_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, ScenarioCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Calc { fields, .. } => commands::calc::run(&fields.to_inputs()),
        Commands::Scenario { command } => match command {
            ScenarioCommand::Save { name, fields, .. } => {
                commands::scenario::save(name, fields.to_inputs())
            }
            ScenarioCommand::List { .. } => commands::scenario::list(),
            ScenarioCommand::Show { scenario_id, .. } => commands::scenario::show(scenario_id),
            ScenarioCommand::Delete { scenario_id, .. } => {
                commands::scenario::delete(scenario_id)
            }
            ScenarioCommand::Clear { yes, .. } => commands::scenario::clear(*yes),
            ScenarioCommand::Export { .. } => commands::scenario::export(),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn calc_dispatches_without_touching_storage() {
        let parsed = parse_from(["roaslab", "calc", "--today-gmv", "100", "--today-spend", "25"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_ok());
            if let Ok(success) = response {
                assert_eq!(success.command, "calc");
                assert_eq!(success.data["windows"][0]["metrics"][0]["display"]["text"], "4.00x");
            }
        }
    }
}
