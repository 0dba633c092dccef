use std::fmt;
use std::fmt::{Display, Write};

use super::Node;
use crate::lexer::Operator;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum NodePriority {
    AddOrSub,
    MulOrDiv,
    Exp,
    Value,
}

fn get_op_priority(op: Operator) -> NodePriority {
    match op {
        Operator::Plus | Operator::Minus => NodePriority::AddOrSub,
        Operator::Times | Operator::Slash => NodePriority::MulOrDiv,
        Operator::Hat => NodePriority::Exp,
    }
}

fn get_num_priority(val: f64) -> NodePriority {
    if !val.is_finite() {
        NodePriority::MulOrDiv
    } else if val < 0.0 {
        // negative numbers are written as a subtraction
        NodePriority::AddOrSub
    } else {
        NodePriority::Value
    }
}

fn get_node_priority(node: &Node) -> NodePriority {
    match node {
        Node::Binary(op, ..) => get_op_priority(*op),
        Node::Num(val) => get_num_priority(*val),
        Node::Ident(_) | Node::Call(..) => NodePriority::Value,
    }
}

fn write_with_paren(
    f: &mut fmt::Formatter<'_>,
    node: &Node,
    curr_prio: &NodePriority,
    is_right: bool,
) -> fmt::Result {
    // every operator is left associative:
    // sub(sub(1,2),3) => 1-2-3 but sub(1,sub(2,3)) => 1-(2-3)
    let needs_paren = if is_right {
        get_node_priority(node) <= *curr_prio
    } else {
        get_node_priority(node) < *curr_prio
    };
    if needs_paren {
        f.write_char('(')?;
    }
    node.fmt(f)?;
    if needs_paren {
        f.write_char(')')?;
    }
    Ok(())
}

fn write_num(f: &mut fmt::Formatter<'_>, val: f64) -> fmt::Result {
    if !val.is_finite() {
        // evaluates to NaN, like every other non-finite value
        f.write_str("0/0")
    } else if val < 0.0 {
        // there is no unary minus in the grammar
        write!(f, "0-{}", -val)
    } else {
        write!(f, "{}", val.abs())
    }
}

/// Writes the node as infix text which evaluates to the same value.
impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Num(val) => write_num(f, *val),
            Node::Ident(name) => f.write_str(name),
            Node::Call(name, inner) => {
                f.write_str(name)?;
                f.write_char('(')?;
                inner.fmt(f)?;
                f.write_char(')')
            }
            Node::Binary(op, left, right) => {
                let prio = get_op_priority(*op);
                write_with_paren(f, left, &prio, false)?;
                write!(f, "{}", op)?;
                write_with_paren(f, right, &prio, true)
            }
        }
    }
}
