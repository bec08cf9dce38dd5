use std::collections::HashMap;
use std::fmt;

mod error;
mod evaluator;
mod lexer;
mod parser;
mod value;

pub use error::*;
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenKind, REGEX_FUNCTION};
pub use parser::Parser;
pub use value::*;

/// Variable bindings for one evaluation. Never mutated by the engine.
pub type Context = HashMap<String, RawValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    /// A literal written in the source, or a context value substituted at
    /// parse time. The payload may be text even though the node is numeric.
    NumberLiteral(RawValue),
    StringLiteral(String),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Power => "**",
        }
    }

    /// Applies the operator to two already-coerced operands.
    ///
    /// Integer arithmetic stays integral except for `/`, which always yields
    /// a float. Integer overflow falls back to float arithmetic.
    pub fn apply(&self, left: Value, right: Value) -> Result<Value> {
        if *self == Operator::Divide && right.is_zero() {
            return Err(Error::DivisionByZero);
        }

        // A negative base with a fractional exponent has no real result.
        if let (Operator::Power, Some(base), Some(exp)) = (self, left.as_f64(), right.as_f64()) {
            if base < 0.0 && exp.is_finite() && exp.fract() != 0.0 {
                return Err(Error::UnsupportedOperandType {
                    operator: self.symbol().to_string(),
                    left: left.type_name(),
                    right: right.type_name(),
                });
            }
        }

        match (left, right) {
            (Value::Integer(a), Value::Integer(b)) => self.apply_integers(a, b),
            (left, right) => match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => self.apply_floats(a, b),
                _ => Err(Error::UnsupportedOperandType {
                    operator: self.symbol().to_string(),
                    left: left.type_name(),
                    right: right.type_name(),
                }),
            },
        }
    }

    fn apply_integers(&self, a: i64, b: i64) -> Result<Value> {
        let checked = match self {
            Operator::Add => a.checked_add(b),
            Operator::Subtract => a.checked_sub(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Divide => return self.apply_floats(a as f64, b as f64),
            Operator::Power => {
                if b < 0 {
                    return self.apply_floats(a as f64, b as f64);
                }
                u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp))
            }
        };

        match checked {
            Some(value) => Ok(Value::Integer(value)),
            None => self.apply_floats(a as f64, b as f64),
        }
    }

    fn apply_floats(&self, a: f64, b: f64) -> Result<Value> {
        let value = match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => {
                if b == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                a / b
            }
            Operator::Power => {
                if a == 0.0 && b < 0.0 {
                    return Err(Error::DivisionByZero);
                }
                a.powf(b)
            }
        };
        Ok(Value::Float(value))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<TokenKind> for Operator {
    type Error = Error;

    fn try_from(kind: TokenKind) -> Result<Self> {
        match kind {
            TokenKind::Plus => Ok(Operator::Add),
            TokenKind::Minus => Ok(Operator::Subtract),
            TokenKind::Star => Ok(Operator::Multiply),
            TokenKind::Slash => Ok(Operator::Divide),
            TokenKind::Power => Ok(Operator::Power),
            found => Err(Error::SyntaxError {
                found,
                expected: None,
            }),
        }
    }
}
