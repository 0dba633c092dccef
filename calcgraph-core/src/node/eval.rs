use super::Node;
use crate::context::{normalize, EvaluationContext};
use crate::error::EvalError;

/// Evaluates the tree depth first, left operand before right operand.
pub fn eval(node: &Node, ctx: &EvaluationContext) -> Result<f64, EvalError> {
    let val = match node {
        Node::Num(val) => *val,
        Node::Ident(name) => ctx.operand(name)?,
        Node::Call(name, inner) => {
            // the argument comes first, like in postfix order
            let arg = eval(inner, ctx)?;
            ctx.function(name)?.apply(arg)
        }
        Node::Binary(op, left, right) => {
            let left = eval(left, ctx)?;
            let right = eval(right, ctx)?;
            op.apply(left, right)
        }
    };
    Ok(normalize(val))
}
