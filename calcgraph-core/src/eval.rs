use crate::context::{normalize, EvaluationContext};
use crate::error::EvalError;
use crate::postfix::{PostfixItem, PostfixSequence};

fn pop(stack: &mut Vec<f64>) -> Result<f64, EvalError> {
    stack.pop().ok_or(EvalError::InvalidExpression)
}

/// Evaluates an expression in postfix order with an operand stack.
///
/// Domain errors like `1/0` or `sqrt(-1)` give NaN. Unknown identifiers and
/// sequences that do not reduce to exactly one value are errors.
pub fn evaluate(sequence: &PostfixSequence, ctx: &EvaluationContext) -> Result<f64, EvalError> {
    let mut stack: Vec<f64> = Vec::new();

    for item in sequence {
        let val = match item {
            PostfixItem::Num(val) => *val,
            PostfixItem::Ident(name) => ctx.operand(name)?,
            PostfixItem::Op(op) => {
                // the right operand is on top
                let right = pop(&mut stack)?;
                let left = pop(&mut stack)?;
                op.apply(left, right)
            }
            PostfixItem::Call(name) => {
                let function = ctx.function(name)?;
                function.apply(pop(&mut stack)?)
            }
        };
        stack.push(normalize(val));
    }

    match stack.as_slice() {
        [val] => Ok(*val),
        _ => Err(EvalError::InvalidExpression),
    }
}
