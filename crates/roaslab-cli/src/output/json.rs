use std::io;

use roaslab_client::contracts::envelope::failure_from_error;
use roaslab_client::{ClientError, SuccessEnvelope};
use serde::Serialize;

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T: Serialize>(value: &T) -> io::Result<String> {
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use roaslab_client::ClientError;
    use roaslab_client::contracts::envelope::success;
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    #[test]
    fn success_json_keeps_the_envelope() {
        let envelope = success("scenario clear", json!({ "removed": 2 }));
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            let rendered = render_success_json(&envelope);
            assert!(rendered.is_ok());
            if let Ok(text) = rendered {
                let parsed = serde_json::from_str::<Value>(&text);
                assert!(parsed.is_ok());
                if let Ok(value) = parsed {
                    assert_eq!(value["ok"], true);
                    assert_eq!(value["command"], "scenario clear");
                    assert_eq!(value["data"]["removed"], 2);
                }
            }
        }
    }

    #[test]
    fn error_json_carries_code_and_recovery() {
        let rendered = render_error_json(&ClientError::scenario_not_found("scn_x"));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed = serde_json::from_str::<Value>(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], false);
                assert_eq!(value["error"]["code"], "scenario_not_found");
                assert_eq!(value["data"]["scenario_id"], "scn_x");
            }
        }
    }
}
