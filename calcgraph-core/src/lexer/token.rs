use std::fmt;

/// One of the binary operators of the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Slash,
    Hat,
}

impl Operator {
    pub fn from_symbol(c: char) -> Option<Operator> {
        Some(match c {
            '+' => Operator::Plus,
            '-' => Operator::Minus,
            '*' => Operator::Times,
            '/' => Operator::Slash,
            '^' => Operator::Hat,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Plus => '+',
            Operator::Minus => '-',
            Operator::Times => '*',
            Operator::Slash => '/',
            Operator::Hat => '^',
        }
    }

    /// The binding strength of the operator, higher binds tighter.
    pub fn precedence(self) -> i8 {
        match self {
            Operator::Hat => 3,
            Operator::Times | Operator::Slash => 2,
            Operator::Plus | Operator::Minus => 1,
        }
    }

    /// Applies the operator to its two operands.
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Plus => left + right,
            Operator::Minus => left - right,
            Operator::Times => left * right,
            Operator::Slash => left / right,
            Operator::Hat => left.powf(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Returns the precedence of a raw symbol.
///
/// Anything that is not an operator gets -1, which is lower than every
/// operator so it is never popped by one.
pub fn precedence(c: char) -> i8 {
    Operator::from_symbol(c).map_or(-1, Operator::precedence)
}

/// Tokens are simple things like numbers, operators, parentheses, and so on.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Num(f64),
    Ident(String),
    Op(Operator),
    OpenParen,
    CloseParen,
}

impl TokenKind {
    pub fn from_single_char(c: char) -> Option<TokenKind> {
        Some(match c {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            _ => TokenKind::Op(Operator::from_symbol(c)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,

    /// The index of the first character of the token
    pub index: usize,
}
