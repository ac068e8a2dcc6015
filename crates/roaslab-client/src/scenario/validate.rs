use serde_json::{Map, Value};
use thiserror::Error;

use crate::inputs::{INPUT_FIELDS, Inputs};
use crate::scenario::Scenario;

/// Why a persisted entry was refused.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ScenarioRejection {
    #[error("scenario entry is not an object")]
    NotAnObject,
    #[error("scenario field `{field}` is missing")]
    MissingField { field: &'static str },
    #[error("scenario field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("scenario inputs are not an object")]
    InputsNotAnObject,
}

/// Builds a complete `Inputs` record from untrusted data.
///
/// Individual missing or non-string fields degrade to `""` so a partially
/// corrupted record keeps every field that survived. Unknown keys are ignored.
pub fn validate_and_normalize(raw: &Value) -> Result<Inputs, ScenarioRejection> {
    let Some(object) = raw.as_object() else {
        return Err(ScenarioRejection::InputsNotAnObject);
    };

    let mut inputs = Inputs::default();
    for field in INPUT_FIELDS {
        if let Some(text) = object.get(field.key()).and_then(Value::as_str) {
            inputs.set(field, text);
        }
    }
    Ok(inputs)
}

/// Identity and timestamp have no safe default, so they are required and typed;
/// `inputs` is delegated to `validate_and_normalize`.
pub fn validate_scenario(raw: &Value) -> Result<Scenario, ScenarioRejection> {
    let Some(object) = raw.as_object() else {
        return Err(ScenarioRejection::NotAnObject);
    };

    let id = required_string(object, "id")?;
    let name = required_string(object, "name")?;
    let created_at = required_timestamp(object, "createdAt")?;
    let inputs = validate_and_normalize(object.get("inputs").unwrap_or(&Value::Null))?;

    Ok(Scenario {
        id,
        name,
        created_at,
        inputs,
    })
}

fn required_field<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, ScenarioRejection> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ScenarioRejection::MissingField { field }),
        Some(value) => Ok(value),
    }
}

fn required_string(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ScenarioRejection> {
    required_field(object, field)?
        .as_str()
        .map(str::to_string)
        .ok_or(ScenarioRejection::WrongType {
            field,
            expected: "a string",
        })
}

fn required_timestamp(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<i64, ScenarioRejection> {
    let value = required_field(object, field)?;
    if let Some(millis) = value.as_i64() {
        return Ok(millis);
    }

    let wrong_type = ScenarioRejection::WrongType {
        field,
        expected: "a finite number",
    };
    let millis = value.as_f64().ok_or(wrong_type.clone())?;
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return Err(wrong_type);
    }
    Ok(millis.round() as i64)
}
