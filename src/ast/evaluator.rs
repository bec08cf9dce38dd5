use crate::ast::{ASTNode, Error, Result, Value};
use crate::functions::Builtin;
use log::{debug, trace};

/// Walks a parsed tree bottom-up and produces its value.
pub struct Evaluator<'a> {
    root: &'a ASTNode,
}

impl<'a> Evaluator<'a> {
    pub fn new(root: &'a ASTNode) -> Self {
        Self { root }
    }

    pub fn evaluate(&self) -> Result<Value> {
        let result = self.visit(self.root);
        debug!("Evaluation result: {:?}", result);
        result
    }

    fn visit(&self, node: &ASTNode) -> Result<Value> {
        trace!("visit: {:?}", node);
        match node {
            ASTNode::NumberLiteral(value) => Ok(Value::from(value.clone())),
            ASTNode::StringLiteral(value) => Ok(Value::Text(value.clone())),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = coerce(self.visit(left)?);
                let right_value = coerce(self.visit(right)?);
                operator.apply(left_value, right_value)
            }
            ASTNode::FunctionCall { name, args } => {
                let builtin =
                    Builtin::from_name(name).ok_or_else(|| Error::UnknownFunction(name.clone()))?;

                if args.len() != builtin.arity() {
                    return Err(Error::ArityError {
                        function: name.clone(),
                        expected: builtin.arity(),
                        found: args.len(),
                    });
                }

                let values = args
                    .iter()
                    .map(|arg| self.visit(arg))
                    .collect::<Result<Vec<_>>>()?;
                builtin.call(&values)
            }
        }
    }
}

/// Turns numeric-looking text into a number: digits with at most one `.`
/// become a float, plain digits an integer. Anything else is returned as is.
pub(crate) fn coerce(value: Value) -> Value {
    let Value::Text(text) = &value else {
        return value;
    };

    let without_dot = text.replacen('.', "", 1);
    if without_dot.is_empty() || !without_dot.bytes().all(|b| b.is_ascii_digit()) {
        return value;
    }

    if text.contains('.') {
        text.parse::<f64>().map(Value::Float).unwrap_or(value)
    } else {
        match text.parse::<i64>() {
            Ok(number) => Value::Integer(number),
            Err(_) => text.parse::<f64>().map(Value::Float).unwrap_or(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Context, Operator, Parser, RawValue};

    fn evaluate(input: &str, context: &Context) -> Result<Value> {
        let ast = Parser::parse_expression(input, context)?;
        Evaluator::new(&ast).evaluate()
    }

    fn text(value: &str) -> Value {
        Value::Text(value.to_string())
    }

    #[test]
    fn test_coerce_numeric_text() {
        assert_eq!(coerce(text("10")), Value::Integer(10));
        assert_eq!(coerce(text("2.5")), Value::Float(2.5));
        assert_eq!(coerce(text("1.")), Value::Float(1.0));
        assert_eq!(coerce(text(".5")), Value::Float(0.5));
        assert_eq!(
            coerce(text("99999999999999999999")),
            Value::Float(99999999999999999999.0)
        );
    }

    #[test]
    fn test_coerce_leaves_other_text() {
        for input in ["", ".", "1.2.3", "-5", " 5", "1e3", "dog", "12a"] {
            assert_eq!(coerce(text(input)), text(input), "input {:?}", input);
        }
        assert_eq!(coerce(Value::Boolean(true)), Value::Boolean(true));
        assert_eq!(coerce(Value::Integer(3)), Value::Integer(3));
    }

    #[test]
    fn test_literals_are_not_coerced() {
        let context = Context::from([("ATTR".to_string(), RawValue::from("10"))]);
        assert_eq!(evaluate("ATTR", &context), Ok(text("10")));
        assert_eq!(evaluate(r#""42""#, &context), Ok(text("42")));
    }

    #[test]
    fn test_arithmetic() {
        let context = Context::new();
        assert_eq!(evaluate("3 + 5 * 2 - 4 / 2", &context), Ok(Value::Float(11.0)));
        assert_eq!(
            evaluate("(3 + 5) * (2 - 4 / 2) + 10", &context),
            Ok(Value::Float(10.0))
        );
        assert_eq!(evaluate("2 ** 3 + 1", &context), Ok(Value::Integer(9)));
        assert_eq!(evaluate("2 ** 3 ** 2", &context), Ok(Value::Integer(64)));
        assert_eq!(evaluate("7 - 2 - 1", &context), Ok(Value::Integer(4)));
    }

    #[test]
    fn test_string_literals_are_coerced_by_operators() {
        let context = Context::new();
        assert_eq!(evaluate(r#""4" * "2.5""#, &context), Ok(Value::Float(10.0)));
    }

    #[test]
    fn test_context_text_is_coerced() {
        let context = Context::from([("ATTR".to_string(), RawValue::from("10"))]);
        assert_eq!(evaluate("ATTR + 5", &context), Ok(Value::Integer(15)));
    }

    #[test]
    fn test_context_number_is_used_directly() {
        let context = Context::from([("ATTR".to_string(), RawValue::Integer(2))]);
        assert_eq!(evaluate("ATTR * (5 + 3)", &context), Ok(Value::Integer(16)));
    }

    #[test]
    fn test_non_numeric_text_operand() {
        let context = Context::from([("ATTR".to_string(), RawValue::from("I have a Dog"))]);
        assert_eq!(
            evaluate("ATTR - 1", &context),
            Err(Error::UnsupportedOperandType {
                operator: "-".to_string(),
                left: "str",
                right: "int",
            })
        );
    }

    #[test]
    fn test_division_by_zero_after_coercion() {
        let context = Context::from([("ATTR".to_string(), RawValue::from("0.0"))]);
        assert_eq!(evaluate("10 / ATTR", &context), Err(Error::DivisionByZero));
        assert_eq!(evaluate("1 / (2 - 2)", &Context::new()), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_regex_call() {
        let pattern = r#"Regex(ATTR, ".*dog.*")"#;
        let dog = Context::from([("ATTR".to_string(), RawValue::from("I have a Dog"))]);
        let cat = Context::from([("ATTR".to_string(), RawValue::from("I have a cat"))]);
        assert_eq!(evaluate(pattern, &dog), Ok(Value::Boolean(true)));
        assert_eq!(evaluate(pattern, &cat), Ok(Value::Boolean(false)));
    }

    #[test]
    fn test_regex_arity() {
        assert_eq!(
            evaluate(r#"Regex("dog")"#, &Context::new()),
            Err(Error::ArityError {
                function: "Regex".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_arity_checked_before_arguments_are_evaluated() {
        assert_eq!(
            evaluate(r#"Regex(1 / 0, "a", "b")"#, &Context::new()),
            Err(Error::ArityError {
                function: "Regex".to_string(),
                expected: 2,
                found: 3,
            })
        );
    }

    #[test]
    fn test_boolean_result_is_not_an_operand() {
        assert_eq!(
            evaluate(r#"Regex("a", "a") + 1"#, &Context::new()),
            Err(Error::UnsupportedOperandType {
                operator: "+".to_string(),
                left: "bool",
                right: "int",
            })
        );
    }

    #[test]
    fn test_direct_ast_unknown_function() {
        let ast = ASTNode::FunctionCall {
            name: "Upper".to_string(),
            args: vec![ASTNode::StringLiteral("dog".to_string())],
        };
        assert_eq!(
            Evaluator::new(&ast).evaluate(),
            Err(Error::UnknownFunction("Upper".to_string()))
        );
    }

    #[test]
    fn test_direct_ast_binary_operation() {
        let ast = ASTNode::BinaryOperation {
            left: Box::new(ASTNode::NumberLiteral(RawValue::from("3"))),
            operator: Operator::Power,
            right: Box::new(ASTNode::StringLiteral("2".to_string())),
        };
        assert_eq!(Evaluator::new(&ast).evaluate(), Ok(Value::Integer(9)));
    }

    #[test]
    fn test_reevaluation_is_stable() {
        let context = Context::from([("ATTR".to_string(), RawValue::from("7"))]);
        let ast = Parser::parse_expression("ATTR * 2 + 1", &context).unwrap();
        let evaluator = Evaluator::new(&ast);
        for _ in 0..5 {
            assert_eq!(evaluator.evaluate(), Ok(Value::Integer(15)));
        }
    }
}
