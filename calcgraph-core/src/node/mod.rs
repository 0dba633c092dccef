mod display;
mod eval;

use std::ops::*;

use crate::context::{Function, EvaluationContext, VARIABLE};
use crate::error::EvalError;
use crate::lexer::Operator;

/// A node is an operation in the AST (abstract syntax tree).
#[derive(Debug, PartialEq, Clone)]
pub enum Node {
    Num(f64),
    /// `x`, a function name without argument, or an unknown name
    Ident(String),
    Call(String, Box<Node>),
    Binary(Operator, Box<Node>, Box<Node>),
}

impl Node {
    /// Computes the value of the node, recursively.
    pub fn eval(&self, ctx: &EvaluationContext) -> Result<f64, EvalError> {
        eval::eval(self, ctx)
    }

    pub fn x() -> Node {
        Node::Ident(VARIABLE.to_string())
    }

    pub fn call(f: Function, inner: Node) -> Node {
        Node::Call(f.name().to_string(), Box::new(inner))
    }

    pub fn pow(self, exponent: Node) -> Node {
        Node::Binary(Operator::Hat, Box::new(self), Box::new(exponent))
    }

    fn binary(op: Operator, left: Node, right: Node) -> Node {
        Node::Binary(op, Box::new(left), Box::new(right))
    }
}

impl From<f64> for Node {
    fn from(val: f64) -> Node {
        Node::Num(val)
    }
}

impl Add for Node {
    type Output = Node;

    fn add(self, rhs: Self) -> Self::Output {
        Node::binary(Operator::Plus, self, rhs)
    }
}

impl Sub for Node {
    type Output = Node;

    fn sub(self, rhs: Self) -> Self::Output {
        Node::binary(Operator::Minus, self, rhs)
    }
}

impl Mul for Node {
    type Output = Node;

    fn mul(self, rhs: Self) -> Self::Output {
        Node::binary(Operator::Times, self, rhs)
    }
}

impl Div for Node {
    type Output = Node;

    fn div(self, rhs: Self) -> Self::Output {
        Node::binary(Operator::Slash, self, rhs)
    }
}
