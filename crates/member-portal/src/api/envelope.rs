use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Unwrap the `{success, data|message|error}` convention shared by every upstream endpoint.
///
/// A 2xx body with `success: false` is a rejection; a non-2xx body surfaces its `message` or
/// `error` field. Successful bodies yield `data` when present, otherwise the whole body so that
/// endpoints returning top-level collections (`activities`, `pagination`) still decode.
pub(crate) fn unwrap_envelope(status: u16, body: Value) -> Result<Value, ApiError> {
    let message = envelope_message(&body);

    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, message });
    }

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ApiError::Rejected {
            message: message.unwrap_or_else(|| super::error::GENERIC_ERROR_MESSAGE.to_string()),
        });
    }

    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => Ok(data),
            None => Ok(Value::Object(map)),
        },
        other => Ok(other),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(status: u16, body: Value) -> Result<T, ApiError> {
    let data = unwrap_envelope(status, body)?;
    Ok(serde_json::from_value(data)?)
}

fn envelope_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
