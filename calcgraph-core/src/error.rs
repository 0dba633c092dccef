use thiserror::Error;

/// When the expression text is malformed, the lexer or the postfix converter
/// will return this error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The character is not part of the grammar.
    ///
    /// The position is the zero-based index of the character in the input,
    /// counted in characters.
    #[error("unexpected character '{0}' at position {1}")]
    UnexpectedCharacter(char, usize),

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
}

/// A description of why an expression could not be evaluated.
///
/// Numeric domain problems like a division by zero are not errors, they
/// evaluate to NaN instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The identifier is neither `x` nor an allowed function.
    #[error("unknown identifier '{0}'")]
    UnknownIdentifier(String),

    /// The variable was used but no value was bound to it.
    #[error("no value given for variable '{0}'")]
    UnboundVariable(String),

    /// Operators and operands do not add up to a single value.
    #[error("invalid expression")]
    InvalidExpression,

    #[error("invalid sampling domain [{start}, {end}]")]
    InvalidDomain { start: f64, end: f64 },
}
