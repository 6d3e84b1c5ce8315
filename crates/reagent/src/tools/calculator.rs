//! Arithmetic evaluation for the `calculate` action.
//!
//! The argument is tokenized and evaluated by a small recursive-descent parser
//! over `+ - * /`, unary signs and parentheses. Nothing in the input is ever
//! executed.

use anyhow::Result;
use std::iter::Peekable;
use std::str::CharIndices;
use thiserror::Error;

use super::Tool;

/// Nesting deeper than this is rejected instead of recursing further
const MAX_DEPTH: usize = 64;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected '{token}' at position {pos}")]
    UnexpectedToken { token: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("result is not a finite number")]
    Overflow,

    #[error("expression nested too deeply")]
    TooDeep,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn symbol(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<CharIndices> = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        let token = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        literal.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(literal.clone()))?;
                tokens.push((Token::Number(finite(value)?), pos));
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => return Err(EvalError::UnexpectedChar { ch: other, pos }),
        };
        tokens.push((token, pos));
        chars.next();
    }

    Ok(tokens)
}

/// Every literal and intermediate result must be finite
fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::Overflow)
    }
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    position: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.position).map(|(token, _)| *token)
    }

    fn advance(&mut self) -> Option<(Token, usize)> {
        let next = self.tokens.get(self.position).copied();
        self.position += 1;
        next
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.advance();
            let rhs = self.term()?;
            value = finite(if op == Token::Plus { value + rhs } else { value - rhs })?;
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.factor()?;
        while let Some(op @ (Token::Star | Token::Slash)) = self.peek() {
            self.advance();
            let rhs = self.factor()?;
            value = finite(if op == Token::Star {
                value * rhs
            } else {
                if rhs == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value / rhs
            })?;
        }
        Ok(value)
    }

    // factor := ('+' | '-') factor | number | '(' expr ')'
    fn factor(&mut self) -> Result<f64, EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }

        let value = match self.advance() {
            Some((Token::Number(n), _)) => n,
            Some((Token::Plus, _)) => self.factor()?,
            Some((Token::Minus, _)) => -self.factor()?,
            Some((Token::LParen, _)) => {
                let inner = self.expr()?;
                match self.advance() {
                    Some((Token::RParen, _)) => inner,
                    Some((token, pos)) => {
                        return Err(EvalError::UnexpectedToken {
                            token: token.symbol(),
                            pos,
                        })
                    }
                    None => return Err(EvalError::UnexpectedEnd),
                }
            }
            Some((token, pos)) => {
                return Err(EvalError::UnexpectedToken {
                    token: token.symbol(),
                    pos,
                })
            }
            None => return Err(EvalError::UnexpectedEnd),
        };

        self.depth -= 1;
        Ok(value)
    }
}

/// Evaluate an arithmetic expression such as `4 * 7 / 3`
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        position: 0,
        depth: 0,
    };
    let value = parser.expr()?;

    if let Some((token, pos)) = parser.advance() {
        return Err(EvalError::UnexpectedToken {
            token: token.symbol(),
            pos,
        });
    }
    Ok(value)
}

/// Whole numbers print without a fractional part; everything else uses the
/// shortest representation that round-trips.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// The `calculate` action
#[derive(Debug, Clone, Copy, Default)]
pub struct Calculator;

impl Tool for Calculator {
    fn name(&self) -> &str {
        "calculate"
    }

    fn description(&self) -> &str {
        "Runs a calculation and returns the number. Supports + - * / and parentheses."
    }

    fn example(&self) -> &str {
        "4 * 7 / 3"
    }

    fn invoke(&self, argument: &str) -> Result<String> {
        let value = evaluate(argument)?;
        Ok(format_number(value))
    }
}
