use super::error::{EvalError, ParseError};
use super::lexer::{Operator, Token, TokenKind};
use super::node::Node;

/// How deep parentheses and calls may be nested. Trees are walked
/// recursively, so deeper input is rejected instead of overflowing the
/// stack.
pub const MAX_NESTING: usize = 256;

/// When to stop parsing a range of tokens.
#[derive(PartialEq, Eq, Clone, Copy)]
enum StopPolicy {
    /// Stop at any operator that binds as strongly as this one, or less.
    /// Stopping on equal power makes every operator left associative.
    IfWeakerOrEqual(i8),
    Never,
}

/// A parser converts a list of tokens into an AST (abstract syntax tree).
///
/// It follows the same rules as the postfix conversion: the usual
/// precedence, left associativity for every operator, and `name(...)` for
/// function calls.
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &[Token]) -> Parser {
        Parser {
            tokens,
            index: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&TokenKind> {
        self.tokens.get(self.index).map(|t| &t.kind)
    }

    fn expect_close_paren(&mut self) -> Result<(), EvalError> {
        match self.peek() {
            Some(TokenKind::CloseParen) => {
                // consume the parenthesis
                self.index += 1;
                Ok(())
            }
            _ => Err(EvalError::InvalidExpression),
        }
    }

    /// Parses what is inside a pair of parentheses, the opening one being
    /// already consumed.
    fn parse_group(&mut self) -> Result<Node, EvalError> {
        if self.depth >= MAX_NESTING {
            return Err(EvalError::InvalidExpression);
        }
        self.depth += 1;
        let inner = self.parse_range(StopPolicy::Never)?;
        self.expect_close_paren()?;
        self.depth -= 1;
        Ok(inner)
    }

    fn parse_nud(&mut self) -> Result<Node, EvalError> {
        let tokens = self.tokens;
        let token = tokens
            .get(self.index)
            .ok_or(EvalError::InvalidExpression)?;
        self.index += 1;

        Ok(match &token.kind {
            TokenKind::Num(val) => Node::Num(*val),
            TokenKind::Ident(name) => {
                if self.peek() == Some(&TokenKind::OpenParen) {
                    self.index += 1;
                    Node::Call(name.clone(), Box::new(self.parse_group()?))
                } else {
                    Node::Ident(name.clone())
                }
            }
            TokenKind::OpenParen => self.parse_group()?,
            // there is no unary operator
            TokenKind::Op(_) | TokenKind::CloseParen => return Err(EvalError::InvalidExpression),
        })
    }

    fn parse_led(&mut self, left: Node, op: Operator) -> Result<Node, EvalError> {
        let right = self.parse_range(StopPolicy::IfWeakerOrEqual(op.precedence()))?;
        Ok(Node::Binary(op, Box::new(left), Box::new(right)))
    }

    fn parse_range(&mut self, policy: StopPolicy) -> Result<Node, EvalError> {
        let mut node = self.parse_nud()?;

        while let Some(TokenKind::Op(op)) = self.peek() {
            let op = *op;
            if let StopPolicy::IfWeakerOrEqual(min_power) = policy {
                if op.precedence() <= min_power {
                    break;
                }
            }

            // consume the operator
            self.index += 1;
            node = self.parse_led(node, op)?;
        }

        Ok(node)
    }

    pub fn parse(mut self) -> Result<Node, EvalError> {
        // report parentheses the same way as the postfix conversion does
        check_parens(self.tokens)?;

        let node = self.parse_range(StopPolicy::Never)?;
        if self.index < self.tokens.len() {
            // something like `2(x+1)`
            return Err(EvalError::InvalidExpression);
        }
        Ok(node)
    }
}

fn check_parens(tokens: &[Token]) -> Result<(), ParseError> {
    let mut depth: usize = 0;
    for token in tokens {
        match token.kind {
            TokenKind::OpenParen => depth += 1,
            TokenKind::CloseParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ParseError::UnbalancedParentheses)?
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(ParseError::UnbalancedParentheses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::context::{EvaluationContext, Function};
    use crate::eval::evaluate;
    use crate::lexer::tokenize;
    use crate::postfix::to_postfix;

    fn parse(expr: &str) -> Result<Node, EvalError> {
        let tokens = tokenize(expr)?;
        Parser::new(&tokens).parse()
    }

    fn n(val: f64) -> Node {
        Node::from(val)
    }

    #[test]
    fn it_handles_precedence() {
        assert_eq!(parse("3+4*5").unwrap(), n(3.0) + n(4.0) * n(5.0));
        assert_eq!(parse("(3+4)*5").unwrap(), (n(3.0) + n(4.0)) * n(5.0));
        assert_eq!(
            parse("2*3^2").unwrap(),
            n(2.0) * n(3.0).pow(n(2.0))
        );
    }

    #[test]
    fn it_makes_every_operator_left_associative() {
        assert_eq!(parse("1-2-3").unwrap(), (n(1.0) - n(2.0)) - n(3.0));
        assert_eq!(parse("8/4*2").unwrap(), (n(8.0) / n(4.0)) * n(2.0));
        assert_eq!(
            parse("2^3^2").unwrap(),
            n(2.0).pow(n(3.0)).pow(n(2.0))
        );
    }

    #[test]
    fn it_handles_calls() {
        assert_eq!(
            parse("sin(cos(x))+1").unwrap(),
            Node::call(Function::Sin, Node::call(Function::Cos, Node::x())) + n(1.0)
        );
        assert_eq!(parse("sin").unwrap(), Node::Ident("sin".to_string()));
    }

    #[test]
    fn it_rejects_malformed_expressions() {
        assert_eq!(parse("1++2"), Err(EvalError::InvalidExpression));
        assert_eq!(parse("-3"), Err(EvalError::InvalidExpression));
        assert_eq!(parse("1 2"), Err(EvalError::InvalidExpression));
        assert_eq!(parse("2(x+1)"), Err(EvalError::InvalidExpression));
        assert_eq!(parse(""), Err(EvalError::InvalidExpression));
        assert_eq!(parse("()"), Err(EvalError::InvalidExpression));
        assert_eq!(
            parse("(1+2"),
            Err(EvalError::Parse(ParseError::UnbalancedParentheses))
        );
        assert_eq!(
            parse("1+2)"),
            Err(EvalError::Parse(ParseError::UnbalancedParentheses))
        );
    }

    #[test]
    fn it_limits_nesting() {
        let nested = |depth: usize| format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&nested(MAX_NESTING)).unwrap(), n(1.0));
        assert_eq!(
            parse(&nested(MAX_NESTING + 1)),
            Err(EvalError::InvalidExpression)
        );
        assert_eq!(parse(&nested(200_000)), Err(EvalError::InvalidExpression));

        let calls = format!("{}x{}", "abs(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert_eq!(parse(&calls), Err(EvalError::InvalidExpression));
    }

    #[test]
    fn it_agrees_with_the_postfix_evaluation() {
        const EXPRS: [&str; 14] = [
            "(3+4)*5",
            "3+4*5",
            "1-2-3",
            "2^3^2",
            "2*3^2/4",
            "100/10/5*2",
            "(1+2)*(3-4)/5^2",
            "1.5*4-2.25",
            "((2))^((3))",
            "x^2+3*x",
            "sin(x)*cos(x)",
            "sqrt(abs(x-10))",
            "log(x)/log(10)",
            "exp(x/2)-tan(x)",
        ];

        for expr in EXPRS.iter() {
            for x in [-2.5, 0.0, 1.0, 7.25].iter() {
                let ctx = EvaluationContext::with_x(*x);
                let tokens = tokenize(expr).unwrap();
                let from_tree = Parser::new(&tokens).parse().unwrap().eval(&ctx).unwrap();
                let from_postfix = evaluate(&to_postfix(&tokens).unwrap(), &ctx).unwrap();
                if from_tree.is_nan() {
                    assert!(from_postfix.is_nan(), "{} at x = {}", expr, x);
                } else {
                    assert_eq!(from_tree, from_postfix, "{} at x = {}", expr, x);
                }
            }
        }
    }

    #[test]
    fn it_parses_what_nodes_display() {
        let node = (n(1.0) - (n(2.0) - Node::x())) * Node::call(Function::Exp, n(0.5)).pow(n(2.0));
        let reparsed = parse(&node.to_string()).unwrap();
        assert_eq!(reparsed, node);
    }
}
