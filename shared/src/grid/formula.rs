//! Formula evaluation
//!
//! A deliberately small expression language: `+ - * /`, parentheses, unary
//! minus, decimal literals and cell references (uppercase letters followed
//! by digits, e.g. `B12`). References resolve to the referenced cell's value
//! parsed as a number; absent cells and non-numeric values substitute 0.
//! Input that does not start with `=` is returned verbatim as text.
//!
//! This replaces the runtime code execution the feature historically relied
//! on: nothing here ever evaluates host-language code.

use serde::Serialize;
use thiserror::Error;

use super::cell::{Grid, GridCell};

/// Literal shown in a cell whose formula failed to evaluate
pub const ERROR_VALUE: &str = "ERROR";

/// Recoverable formula failure; the grid is never modified when one occurs
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,
    #[error("unexpected character '{0}' in formula")]
    UnexpectedChar(char),
    #[error("unexpected '{0}' in formula")]
    UnexpectedToken(String),
    #[error("formula ends unexpectedly")]
    UnexpectedEnd,
    #[error("division by zero")]
    DivisionByZero,
}

/// Outcome of evaluating operator input for a cell
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Display form, as stored into the grid
    pub fn display(&self) -> String {
        match self {
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
        }
    }
}

/// Integers render without a trailing fraction; everything else uses the
/// shortest f64 form.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Evaluate operator input against the grid.
///
/// Non-`=` input passes through verbatim as [`CellValue::Text`]; anything
/// starting with `=` is parsed and evaluated, with every failure surfaced as
/// a [`FormulaError`] rather than a panic.
pub fn evaluate_formula(input: &str, grid: &Grid) -> Result<CellValue, FormulaError> {
    let Some(expression) = input.strip_prefix('=') else {
        return Ok(CellValue::Text(input.to_string()));
    };

    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        grid,
    };
    let value = parser.expression()?;
    if parser.pos != tokens.len() {
        return Err(FormulaError::UnexpectedToken(parser.describe_current()));
    }
    Ok(CellValue::Number(value))
}

/// Like [`evaluate_formula`], but renders any failure as the literal
/// `"ERROR"` the way the grid UI displays it.
pub fn evaluate_or_error(input: &str, grid: &Grid) -> String {
    match evaluate_formula(input, grid) {
        Ok(value) => value.display(),
        Err(_) => ERROR_VALUE.to_string(),
    }
}

impl Grid {
    /// Apply operator input to a cell: evaluate, then store the display
    /// value (keeping the formula text when the input was one). On error the
    /// cell is left untouched and the caller decides how to surface it.
    pub fn enter(&mut self, id: &str, input: &str) -> Result<CellValue, FormulaError> {
        let value = evaluate_formula(input, self)?;
        let formula = input.starts_with('=').then(|| input.to_string());
        let style = self.get(id).style;
        self.store(
            id,
            GridCell {
                value: value.display(),
                style,
                formula,
            },
        );
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Reference(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

fn tokenize(expression: &str) -> Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = expression.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal
                    .parse()
                    .map_err(|_| FormulaError::UnexpectedToken(literal.clone()))?;
                tokens.push(Token::Number(value));
            }
            'A'..='Z' => {
                let mut reference = String::new();
                while let Some(&l) = chars.peek() {
                    if l.is_ascii_uppercase() {
                        reference.push(l);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let mut has_digits = false;
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        reference.push(d);
                        chars.next();
                        has_digits = true;
                    } else {
                        break;
                    }
                }
                if !has_digits {
                    // Bare names (SUM, sleep, ...) are not part of this
                    // language; range functions belong to the export writer.
                    return Err(FormulaError::UnexpectedToken(reference));
                }
                tokens.push(Token::Reference(reference));
            }
            other => return Err(FormulaError::UnexpectedChar(other)),
        }
    }

    if tokens.is_empty() {
        return Err(FormulaError::Empty);
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    grid: &'a Grid,
}

impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.term()?;
        loop {
            match self.tokens.get(self.pos) {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, FormulaError> {
        let mut value = self.factor()?;
        loop {
            match self.tokens.get(self.pos) {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(FormulaError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, FormulaError> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Ok(*n)
            }
            Some(Token::Reference(id)) => {
                self.pos += 1;
                Ok(self.resolve(id))
            }
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.factor()
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let value = self.expression()?;
                match self.tokens.get(self.pos) {
                    Some(Token::RParen) => {
                        self.pos += 1;
                        Ok(value)
                    }
                    _ => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some(_) => Err(FormulaError::UnexpectedToken(self.describe_current())),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    /// Referenced cell's value as a number; 0 for absent or non-numeric
    fn resolve(&self, id: &str) -> f64 {
        self.grid.value(id).trim().parse().unwrap_or(0.0)
    }

    fn describe_current(&self) -> String {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => format_number(*n),
            Some(Token::Reference(id)) => id.clone(),
            Some(Token::Plus) => "+".to_string(),
            Some(Token::Minus) => "-".to_string(),
            Some(Token::Star) => "*".to_string(),
            Some(Token::Slash) => "/".to_string(),
            Some(Token::LParen) => "(".to_string(),
            Some(Token::RParen) => ")".to_string(),
            None => "end of formula".to_string(),
        }
    }
}
