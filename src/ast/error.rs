use crate::ast::TokenKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a single evaluation can fail. Errors are terminal: there is no
/// partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid character: '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Unterminated string literal starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),

    #[error("Invalid syntax: unexpected {found}{}", expected_suffix(.expected))]
    SyntaxError {
        found: TokenKind,
        expected: Option<TokenKind>,
    },

    #[error("Variable '{0}' not found in context")]
    UndefinedVariable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Unsupported operand type(s) for {operator}: '{left}' and '{right}'")]
    UnsupportedOperandType {
        operator: String,
        left: &'static str,
        right: &'static str,
    },

    #[error("{function} function expects exactly {expected} arguments, got {found}")]
    ArityError {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

fn expected_suffix(expected: &Option<TokenKind>) -> String {
    match expected {
        Some(kind) => format!(", expected {}", kind),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        let err = Error::SyntaxError {
            found: TokenKind::Star,
            expected: None,
        };
        assert_eq!(err.to_string(), "Invalid syntax: unexpected '*'");

        let err = Error::SyntaxError {
            found: TokenKind::Eof,
            expected: Some(TokenKind::RParen),
        };
        assert_eq!(
            err.to_string(),
            "Invalid syntax: unexpected end of input, expected ')'"
        );
    }

    #[test]
    fn test_operand_error_message() {
        let err = Error::UnsupportedOperandType {
            operator: "+".to_string(),
            left: "str",
            right: "int",
        };
        assert_eq!(
            err.to_string(),
            "Unsupported operand type(s) for +: 'str' and 'int'"
        );
    }
}
