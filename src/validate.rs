use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Checks that each of `fields` is present in the JSON object and non-empty.
///
/// Missing keys, `null`, `""`, `[]` and `{}` count as absent. Numbers and
/// booleans are always present, so `0` and `false` pass.
pub fn require_fields(body: &Value, fields: &[&str]) -> Result<(), ApiError> {
    let obj = body
        .as_object()
        .ok_or_else(|| ApiError::Decode("expected a JSON object".into()))?;

    for &field in fields {
        let present = match obj.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(Value::Object(o)) => !o.is_empty(),
            Some(Value::Number(_)) | Some(Value::Bool(_)) => true,
        };
        if !present {
            return Err(ApiError::Validation(field.to_string()));
        }
    }
    Ok(())
}

/// Required-field check followed by typed decoding of an edit payload.
pub fn decode_edit<T: DeserializeOwned>(body: Value, fields: &[&str]) -> Result<T, ApiError> {
    require_fields(&body, fields)?;
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Trimmed, upper-cased display name for categories and exercises.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}
