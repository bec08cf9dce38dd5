use crate::ast::{Error, Result, Value, REGEX_FUNCTION};
use regex::RegexBuilder;

/// Case-insensitive search for `pattern` anywhere in `subject`.
///
/// Both arguments must be text. The pattern is compiled per call; the engine
/// keeps no state between evaluations.
pub fn regex_search(subject: &Value, pattern: &Value) -> Result<bool> {
    let (Value::Text(subject), Value::Text(pattern)) = (subject, pattern) else {
        return Err(Error::UnsupportedOperandType {
            operator: REGEX_FUNCTION.to_string(),
            left: subject.type_name(),
            right: pattern.type_name(),
        });
    };

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|err| Error::InvalidPattern {
            pattern: pattern.clone(),
            message: err.to_string(),
        })?;

    Ok(regex.is_match(subject))
}
