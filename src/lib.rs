pub mod ast;
pub mod functions;
pub mod kpi;

use ast::{Evaluator, Parser, Result};
use rayon::prelude::*;

pub use ast::{Context, Error, RawValue, Value};

/// Evaluates a formula against a context of variable bindings.
///
/// Each call builds its own tokenizer, parser and tree, so calls share no
/// state and the same inputs always give the same result.
pub fn evaluate_expression(expression: &str, context: &Context) -> Result<Value> {
    let ast = Parser::parse_expression(expression, context)?;
    Evaluator::new(&ast).evaluate()
}

/// Evaluates one formula against many contexts in parallel. Results are in
/// the same order as `contexts`.
pub fn evaluate_batch(expression: &str, contexts: &[Context]) -> Vec<Result<Value>> {
    contexts
        .par_iter()
        .map(|context| evaluate_expression(expression, context))
        .collect()
}
