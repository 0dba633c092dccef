mod token;

use std::iter::FusedIterator;

pub use self::token::*;
use crate::error::ParseError;

/// A lexer reads a mathematical expression and returns a list of tokens in the
/// expression.
/// This allows us to read the expression in a simpler way later when we want
/// to parse it.
pub struct Lexer {
    expr: Vec<char>,
    index: usize,
    has_failed: bool,
}

impl Lexer {
    /// Create a new lexer from an expression.
    pub fn new(expr: &str) -> Lexer {
        Lexer {
            expr: expr.chars().collect(),
            index: 0,
            has_failed: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.expr.get(self.index).copied()
    }

    fn consume_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }

            self.index += 1;
        }
    }

    fn try_consume_single_char_token(&mut self) -> Option<Token> {
        let original_index = self.index;
        let c = self.peek()?;
        let kind = TokenKind::from_single_char(c)?;

        // consume the character
        self.index += 1;

        // `**` is another way to write `^`
        if c == '*' && self.peek() == Some('*') {
            self.index += 1;
            return Some(Token {
                kind: TokenKind::Op(Operator::Hat),
                index: original_index,
            });
        }

        Some(Token {
            kind,
            index: original_index,
        })
    }

    fn try_consume_ident(&mut self) -> Option<Token> {
        let original_index = self.index;

        // identifiers start with a letter, digits may follow
        if !self.peek()?.is_ascii_alphabetic() {
            return None;
        }

        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphanumeric() {
                break;
            }

            ident.push(c);
            self.index += 1;
        }

        Some(Token {
            kind: TokenKind::Ident(ident),
            index: original_index,
        })
    }

    fn try_consume_num(&mut self) -> Option<Token> {
        let original_index = self.index;
        let mut text = String::new();
        let mut has_dot = false;
        let mut has_digit = false;

        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                has_digit = true;
            } else if c == '.' {
                // a second dot starts another number
                if has_dot {
                    break;
                }

                has_dot = true;
            } else {
                break;
            }

            text.push(c);
            self.index += 1;
        }

        let val = if has_digit { text.parse().ok() } else { None };
        match val {
            Some(val) => Some(Token {
                kind: TokenKind::Num(val),
                index: original_index,
            }),
            None => {
                self.index = original_index;
                None
            }
        }
    }
}

// This means that when it returns a none option, then it will keep returning
// none options.
impl FusedIterator for Lexer {}

impl Iterator for Lexer {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_failed {
            return None;
        }

        self.consume_whitespace();

        // is there anything left?
        let c = self.peek()?;

        let original_index = self.index;
        let maybe_token = self
            .try_consume_single_char_token()
            .or_else(|| self.try_consume_num())
            .or_else(|| self.try_consume_ident());

        Some(maybe_token.ok_or_else(|| {
            self.has_failed = true;

            // if we didn't get any token, then it is unknown
            ParseError::UnexpectedCharacter(c, original_index)
        }))
    }
}

/// Splits the whole expression into tokens, stopping at the first character
/// that is not part of the grammar.
pub fn tokenize(expr: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(expr).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<TokenKind> {
        tokenize(expr)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Ident(name.to_string())
    }

    #[test]
    fn it_handles_empty_string() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_ignores_whitespace() {
        let mut lexer = Lexer::new("\t+ \r\n");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Op(Operator::Plus),
                index: 1
            }))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_handles_single_char_tokens() {
        const EXPECTED: [TokenKind; 7] = [
            TokenKind::Op(Operator::Plus),
            TokenKind::Op(Operator::Minus),
            TokenKind::Op(Operator::Times),
            TokenKind::Op(Operator::Slash),
            TokenKind::Op(Operator::Hat),
            TokenKind::OpenParen,
            TokenKind::CloseParen,
        ];

        let expected_tokens: Vec<Token> = EXPECTED
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, kind)| Token { kind, index: i })
            .collect();

        assert_eq!(tokenize("+-*/^()").unwrap(), expected_tokens);
    }

    #[test]
    fn it_handles_double_star_as_power() {
        assert_eq!(
            tokenize("x**2").unwrap(),
            vec![
                Token {
                    kind: ident("x"),
                    index: 0
                },
                Token {
                    kind: TokenKind::Op(Operator::Hat),
                    index: 1
                },
                Token {
                    kind: TokenKind::Num(2.0),
                    index: 3
                },
            ]
        );

        // a third star is a multiplication
        assert_eq!(
            kinds("2***3"),
            vec![
                TokenKind::Num(2.0),
                TokenKind::Op(Operator::Hat),
                TokenKind::Op(Operator::Times),
                TokenKind::Num(3.0),
            ]
        );
    }

    #[test]
    fn it_handles_numbers() {
        assert_eq!(kinds("123"), vec![TokenKind::Num(123.0)]);
        assert_eq!(kinds("12.5"), vec![TokenKind::Num(12.5)]);
        assert_eq!(kinds("123."), vec![TokenKind::Num(123.0)]);
        assert_eq!(kinds(".123"), vec![TokenKind::Num(0.123)]);
        assert_eq!(
            kinds("-4"),
            vec![TokenKind::Op(Operator::Minus), TokenKind::Num(4.0)]
        );
    }

    #[test]
    fn it_splits_numbers_on_the_second_dot() {
        assert_eq!(
            kinds("1.2.3"),
            vec![TokenKind::Num(1.2), TokenKind::Num(0.3)]
        );
    }

    #[test]
    fn it_rejects_a_lone_dot() {
        let mut lexer = Lexer::new("+.");
        assert_eq!(
            lexer.next(),
            Some(Ok(Token {
                kind: TokenKind::Op(Operator::Plus),
                index: 0
            }))
        );
        assert_eq!(
            lexer.next(),
            Some(Err(ParseError::UnexpectedCharacter('.', 1)))
        );
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn it_handles_identifiers() {
        assert_eq!(
            kinds("sin(cos x2)"),
            vec![
                ident("sin"),
                TokenKind::OpenParen,
                ident("cos"),
                ident("x2"),
                TokenKind::CloseParen,
            ]
        );

        // digits before letters are a number then an identifier
        assert_eq!(kinds("2x"), vec![TokenKind::Num(2.0), ident("x")]);
    }

    #[test]
    fn it_reports_the_offending_character_and_position() {
        assert_eq!(
            tokenize("1 + 2 % 3"),
            Err(ParseError::UnexpectedCharacter('%', 6))
        );
        assert_eq!(
            tokenize("x_1"),
            Err(ParseError::UnexpectedCharacter('_', 1))
        );
        assert_eq!(
            tokenize("sin(x), 2"),
            Err(ParseError::UnexpectedCharacter(',', 6))
        );
    }

    #[test]
    fn it_counts_positions_in_characters() {
        // the accented letter takes two bytes but is a single character
        assert_eq!(
            tokenize("é+1"),
            Err(ParseError::UnexpectedCharacter('é', 0))
        );
        assert_eq!(
            tokenize("  ü"),
            Err(ParseError::UnexpectedCharacter('ü', 2))
        );
        assert_eq!(
            tokenize("1 ü 2 @"),
            Err(ParseError::UnexpectedCharacter('ü', 2))
        );
    }

    #[test]
    fn it_stops_after_the_first_error() {
        let mut lexer = Lexer::new("1 $ 2");
        assert!(matches!(lexer.next(), Some(Ok(_))));
        assert_eq!(
            lexer.next(),
            Some(Err(ParseError::UnexpectedCharacter('$', 2)))
        );
        assert_eq!(lexer.next(), None);
    }
}
