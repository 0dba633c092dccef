//! Conversion from infix to postfix order with the shunting-yard algorithm.

use std::fmt;
use std::iter::Peekable;
use std::slice;

use crate::error::ParseError;
use crate::lexer::{precedence, Operator, Token, TokenKind};

/// An element of an expression in postfix order.
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixItem {
    Num(f64),
    Ident(String),
    Op(Operator),
    /// Calls the function on the value before it.
    Call(String),
}

impl fmt::Display for PostfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixItem::Num(val) => val.fmt(f),
            PostfixItem::Ident(name) | PostfixItem::Call(name) => f.write_str(name),
            PostfixItem::Op(op) => op.fmt(f),
        }
    }
}

/// An expression in postfix (reverse Polish) order.
///
/// It is displayed without any separator between items, so `(3+4)*5` shows
/// as `34+5*`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostfixSequence(Vec<PostfixItem>);

impl PostfixSequence {
    pub fn items(&self) -> &[PostfixItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PostfixItem>> for PostfixSequence {
    fn from(items: Vec<PostfixItem>) -> Self {
        PostfixSequence(items)
    }
}

impl<'a> IntoIterator for &'a PostfixSequence {
    type Item = &'a PostfixItem;
    type IntoIter = slice::Iter<'a, PostfixItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PostfixSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.0 {
            item.fmt(f)?;
        }
        Ok(())
    }
}

/// What can wait on the operator stack.
enum Pending {
    Op(Operator),
    OpenParen,
    Call(String),
}

impl Pending {
    // Parentheses and calls are never popped by an operator.
    fn precedence(&self) -> i8 {
        match self {
            Pending::Op(op) => op.precedence(),
            // a call waits for its `(` to close
            Pending::OpenParen | Pending::Call(_) => precedence('('),
        }
    }
}

fn is_followed_by_paren(tokens: &mut Peekable<slice::Iter<'_, Token>>) -> bool {
    tokens
        .peek()
        .map_or(false, |t| t.kind == TokenKind::OpenParen)
}

/// Reorders the tokens of an infix expression into postfix order.
///
/// All operators are left associative, so `2^3^2` becomes `23^2^`. Only the
/// parentheses are checked here; a wrong number of operands is found when
/// the sequence is evaluated.
pub fn to_postfix(tokens: &[Token]) -> Result<PostfixSequence, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();
    let mut tokens = tokens.iter().peekable();

    while let Some(token) = tokens.next() {
        match &token.kind {
            TokenKind::Num(val) => output.push(PostfixItem::Num(*val)),
            TokenKind::Ident(name) => {
                if is_followed_by_paren(&mut tokens) {
                    stack.push(Pending::Call(name.clone()));
                } else {
                    output.push(PostfixItem::Ident(name.clone()));
                }
            }
            TokenKind::OpenParen => stack.push(Pending::OpenParen),
            TokenKind::CloseParen => {
                loop {
                    match stack.pop() {
                        Some(Pending::OpenParen) => break,
                        Some(Pending::Op(op)) => output.push(PostfixItem::Op(op)),
                        // a call always sits right below its parenthesis
                        Some(Pending::Call(_)) | None => {
                            return Err(ParseError::UnbalancedParentheses)
                        }
                    }
                }

                if let Some(Pending::Call(_)) = stack.last() {
                    if let Some(Pending::Call(name)) = stack.pop() {
                        output.push(PostfixItem::Call(name));
                    }
                }
            }
            TokenKind::Op(op) => {
                // equal precedence pops too: left associativity
                while let Some(top) = stack.last() {
                    if op.precedence() > top.precedence() {
                        break;
                    }
                    if let Some(Pending::Op(top)) = stack.pop() {
                        output.push(PostfixItem::Op(top));
                    }
                }
                stack.push(Pending::Op(*op));
            }
        }
    }

    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Op(op) => output.push(PostfixItem::Op(op)),
            Pending::OpenParen | Pending::Call(_) => {
                return Err(ParseError::UnbalancedParentheses)
            }
        }
    }

    let sequence = PostfixSequence(output);
    tracing::trace!(postfix = %sequence, "converted to postfix");
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::lexer::tokenize;

    fn postfix(expr: &str) -> Result<String, ParseError> {
        to_postfix(&tokenize(expr)?).map(|s| s.to_string())
    }

    #[test]
    fn it_handles_precedence() {
        assert_eq!(postfix("3+4*5").unwrap(), "345*+");
        assert_eq!(postfix("3*4+5").unwrap(), "34*5+");
        assert_eq!(postfix("2*3^2").unwrap(), "232^*");
    }

    #[test]
    fn it_handles_parentheses() {
        assert_eq!(postfix("(3+4)*5").unwrap(), "34+5*");
        assert_eq!(postfix("( 3 + 4 ) * 5").unwrap(), "34+5*");
        assert_eq!(postfix("((1))").unwrap(), "1");
        assert_eq!(postfix("a*(b+c)/d").unwrap(), "abc+*d/");
    }

    #[test]
    fn it_makes_every_operator_left_associative() {
        assert_eq!(postfix("1-2-3").unwrap(), "12-3-");
        assert_eq!(postfix("8/4/2").unwrap(), "84/2/");
        assert_eq!(postfix("2^3^2").unwrap(), "23^2^");
    }

    #[test]
    fn it_emits_calls_after_their_argument() {
        assert_eq!(postfix("sin(x)").unwrap(), "xsin");
        assert_eq!(postfix("sin(x)+1").unwrap(), "xsin1+");
        assert_eq!(postfix("2*sqrt(x+1)").unwrap(), "2x1+sqrt*");
        assert_eq!(postfix("sin(cos(x))").unwrap(), "xcossin");

        let seq = to_postfix(&tokenize("abs(x)").unwrap()).unwrap();
        assert_eq!(
            seq.items(),
            &[
                PostfixItem::Ident("x".to_string()),
                PostfixItem::Call("abs".to_string())
            ]
        );
    }

    #[test]
    fn it_keeps_identifiers_without_parentheses_as_operands() {
        let seq = to_postfix(&tokenize("sin x").unwrap()).unwrap();
        assert_eq!(
            seq.items(),
            &[
                PostfixItem::Ident("sin".to_string()),
                PostfixItem::Ident("x".to_string())
            ]
        );
    }

    #[test]
    fn it_renders_numbers_in_their_shortest_form() {
        assert_eq!(postfix("12+3").unwrap(), "123+");
        assert_eq!(postfix("0.50*2.").unwrap(), "0.52*");
    }

    #[test]
    fn it_detects_unbalanced_parentheses() {
        assert_eq!(postfix("(1+2"), Err(ParseError::UnbalancedParentheses));
        assert_eq!(postfix("1+2)"), Err(ParseError::UnbalancedParentheses));
        assert_eq!(postfix(")("), Err(ParseError::UnbalancedParentheses));
        assert_eq!(postfix("sin(x"), Err(ParseError::UnbalancedParentheses));
    }

    #[test]
    fn it_does_not_check_operands() {
        // these fail later, when evaluated
        assert_eq!(postfix("1++2").unwrap(), "1+2+");
        assert_eq!(postfix("*").unwrap(), "*");
        assert_eq!(postfix("").unwrap(), "");
    }
}
