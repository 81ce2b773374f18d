use serde_json::Value;

use crate::error::{ConvertError, DateParseError};
use crate::scheduling::date_parser::{ConversationalDateParser, to_iso};

/// Converts a request's `conversationalDate` to a UTC ISO-8601 string,
/// relative to the current time.
///
/// Absent, null, `false`, `0` and `""` count as missing. Any other
/// non-string value is present but unparsable.
pub fn convert(parser: &ConversationalDateParser, value: Option<&Value>) -> Result<String, ConvertError> {
    let phrase = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return Err(ConvertError::Missing),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return Err(ConvertError::Missing),
        Some(Value::String(s)) if s.is_empty() => return Err(ConvertError::Missing),
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            tracing::warn!("Conversational date is not text: {}", other);
            return Err(DateParseError::NotText.into());
        }
    };

    parser.parse(phrase).map(to_iso).map_err(|e| {
        tracing::warn!("Error parsing conversational date {:?}: {}", phrase, e);
        e.into()
    })
}
