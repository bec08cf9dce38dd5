pub mod pattern;

use crate::ast::{Error, Result, Value, REGEX_FUNCTION};

/// Functions callable from an expression. The set is closed; names that do
/// not map to a variant are reported as unknown by the evaluator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Builtin {
    Regex,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            REGEX_FUNCTION => Some(Builtin::Regex),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Regex => REGEX_FUNCTION,
        }
    }

    /// Exact number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Builtin::Regex => 2,
        }
    }

    /// Calls the function with already evaluated arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match (self, args) {
            (Builtin::Regex, [subject, needle]) => {
                pattern::regex_search(subject, needle).map(Value::Boolean)
            }
            _ => Err(Error::ArityError {
                function: self.name().to_string(),
                expected: self.arity(),
                found: args.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Builtin::from_name("Regex"), Some(Builtin::Regex));
        assert_eq!(Builtin::from_name("regex"), None);
        assert_eq!(Builtin::from_name("Upper"), None);
    }

    #[test]
    fn test_call_regex() {
        let args = [
            Value::Text("I have a dog and a cat".to_string()),
            Value::Text(".*cat.*|.*dog.*".to_string()),
        ];
        assert_eq!(Builtin::Regex.call(&args), Ok(Value::Boolean(true)));
        assert_eq!(Builtin::Regex.name(), "Regex");
        assert_eq!(Builtin::Regex.arity(), 2);
    }

    #[test]
    fn test_call_with_wrong_arity() {
        assert_eq!(
            Builtin::Regex.call(&[Value::Text("dog".to_string())]),
            Err(Error::ArityError {
                function: "Regex".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }
}
