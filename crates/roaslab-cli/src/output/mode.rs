use crate::cli::{Commands, ScenarioCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Calc { json, .. } => *json,
        Commands::Scenario { command } => match command {
            ScenarioCommand::Save { json, .. }
            | ScenarioCommand::List { json }
            | ScenarioCommand::Show { json, .. }
            | ScenarioCommand::Delete { json, .. }
            | ScenarioCommand::Clear { json, .. }
            | ScenarioCommand::Export { json } => *json,
        },
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn mode_uses_json_for_calc_with_json_flag() {
        let parsed = parse_from(["roaslab", "calc", "--today-gmv", "1", "--json"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
        }
    }

    #[test]
    fn mode_uses_json_for_scenario_commands_with_json_flag() {
        let cases: [&[&str]; 4] = [
            &["roaslab", "scenario", "list", "--json"],
            &["roaslab", "scenario", "show", "scn_1", "--json"],
            &["roaslab", "scenario", "clear", "--yes", "--json"],
            &["roaslab", "scenario", "export", "--json"],
        ];
        for args in cases {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn mode_uses_text_without_json_flag() {
        let parsed = parse_from(["roaslab", "scenario", "save", "promo"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
