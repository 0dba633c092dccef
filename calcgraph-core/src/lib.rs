//! A small expression engine for a calculator with a graphing mode.
//!
//! Expressions are split into tokens, reordered into postfix order with the
//! shunting-yard algorithm, and evaluated with an operand stack. The only
//! names an expression can use are `x` and the functions of
//! [`context::Function`], so evaluating untrusted input is safe.

pub mod context;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod postfix;
pub mod sample;

pub use context::{EvaluationContext, Function};
pub use error::{EvalError, ParseError};
pub use postfix::PostfixSequence;
pub use sample::{
    sample_function, sample_function_default, Domain, Sample, SampleSeries, DEFAULT_SAMPLE_COUNT,
};

/// Parses an expression into postfix order, ready to be evaluated any number
/// of times.
pub fn compile(expr: &str) -> Result<PostfixSequence, ParseError> {
    let tokens = lexer::tokenize(expr)?;
    postfix::to_postfix(&tokens)
}

/// Returns the postfix form of an infix expression, without separators:
/// `(3+4)*5` gives `34+5*`.
pub fn to_postfix_text(expr: &str) -> Result<String, ParseError> {
    compile(expr).map(|sequence| sequence.to_string())
}

/// Computes the value of an expression that does not use `x`.
pub fn evaluate_text(expr: &str) -> Result<f64, EvalError> {
    evaluate_with(expr, &EvaluationContext::new())
}

/// Computes the value of an expression for the given value of `x`.
pub fn evaluate_text_at(expr: &str, x: f64) -> Result<f64, EvalError> {
    evaluate_with(expr, &EvaluationContext::with_x(x))
}

fn evaluate_with(expr: &str, ctx: &EvaluationContext) -> Result<f64, EvalError> {
    let sequence = compile(expr)?;
    let val = eval::evaluate(&sequence, ctx)?;
    tracing::debug!(expression = expr, postfix = %sequence, result = val, "evaluated");
    Ok(val)
}

/// Parses an expression into a tree instead of postfix order.
pub fn parse_tree(expr: &str) -> Result<node::Node, EvalError> {
    let tokens = lexer::tokenize(expr)?;
    parser::Parser::new(&tokens).parse()
}
