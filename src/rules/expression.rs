//! Rule expression language.
//!
//! A rule expression is a single comparison between a context path and a
//! literal:
//!
//! ```text
//! expression := path op literal
//! path       := ident ( "." ident )*
//! op         := ">=" | "<=" | ">" | "<" | "==" | "!="
//! literal    := number | "'" text "'" | '"' text '"' | "true" | "false"
//! ```
//!
//! Evaluation is deliberately asymmetric: an expression that does not parse
//! passes, while an expression whose path is absent from the context fails.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_until, take_while};
use nom::character::complete::{char, digit0, digit1, multispace0, satisfy};
use nom::combinator::{all_consuming, map, map_res, not, opt, recognize, value};
use nom::multi::separated_list1;
use nom::sequence::{delimited, pair, preceded, terminated};
use nom::{IResult, Parser};
use thiserror::Error;

use crate::core::types::{Context, Value};

/// Comparison operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Gte,
    Lte,
    Gt,
    Lt,
    Eq,
    Neq,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Gte => ">=",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Lt => "<",
            CompareOp::Eq => "==",
            CompareOp::Neq => "!=",
        }
    }
}

/// Error type for expression parsing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("Expression is empty")]
    Empty,
    #[error("Expected a context path")]
    ExpectedPath,
    #[error("Expected a comparison operator")]
    ExpectedOperator,
    #[error("Expected a literal value")]
    ExpectedLiteral,
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: usize },
    #[error("Unexpected trailing input at {position}")]
    TrailingInput { position: usize },
}

// =============================================================================
// GRAMMAR
// =============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_char))).parse(input)
}

/// `display.size`; a trailing dot is not a path
fn context_path(input: &str) -> IResult<&str, &str> {
    terminated(recognize(separated_list1(char('.'), ident)), not(char('.'))).parse(input)
}

/// Two-character operators must be tried before their prefixes
fn compare_op(input: &str) -> IResult<&str, CompareOp> {
    alt((
        value(CompareOp::Gte, tag(">=")),
        value(CompareOp::Lte, tag("<=")),
        value(CompareOp::Eq, tag("==")),
        value(CompareOp::Neq, tag("!=")),
        value(CompareOp::Gt, tag(">")),
        value(CompareOp::Lt, tag("<")),
    ))
    .parse(input)
}

/// `75`, `-2.5`, `.5`
fn number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(pair(
            opt(char('-')),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |text: &str| text.parse::<f64>(),
    )
    .parse(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_until("\""), char('"')),
        delimited(char('\''), take_until("'"), char('\'')),
    ))
    .parse(input)
}

fn boolean(input: &str) -> IResult<&str, bool> {
    terminated(
        alt((value(true, tag("true")), value(false, tag("false")))),
        not(satisfy(is_ident_char)),
    )
    .parse(input)
}

fn literal(input: &str) -> IResult<&str, Value> {
    alt((
        map(number, Value::Number),
        map(quoted, |text: &str| Value::Text(text.to_string())),
        map(boolean, Value::Bool),
    ))
    .parse(input)
}

fn end_of_input(input: &str) -> IResult<&str, &str> {
    all_consuming(multispace0).parse(input)
}

/// A parsed `path op literal` comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub path: String,
    pub op: CompareOp,
    pub literal: Value,
}

impl Comparison {
    /// Parse an expression string
    pub fn parse(input: &str) -> Result<Self, ExpressionError> {
        if input.trim().is_empty() {
            return Err(ExpressionError::Empty);
        }
        let offset = |rest: &str| input.len() - rest.len();

        let (rest, path) = preceded(multispace0, context_path)
            .parse(input)
            .map_err(|_| ExpressionError::ExpectedPath)?;

        let (rest, op) = preceded(multispace0, compare_op)
            .parse(rest)
            .map_err(|_| ExpressionError::ExpectedOperator)?;

        let rest = rest.trim_start();
        let (rest, literal) = match literal(rest) {
            Ok(parsed) => parsed,
            Err(_) if rest.starts_with(['"', '\'']) => {
                return Err(ExpressionError::UnterminatedString {
                    position: offset(rest),
                })
            }
            Err(_) => return Err(ExpressionError::ExpectedLiteral),
        };

        end_of_input(rest).map_err(|_| ExpressionError::TrailingInput {
            position: offset(rest.trim_start()),
        })?;

        Ok(Self {
            path: path.to_string(),
            op,
            literal,
        })
    }

    /// Evaluate against a context; an absent path never satisfies the comparison
    pub fn evaluate(&self, context: &Context) -> bool {
        let Some(actual) = context.get_path(&self.path) else {
            return false;
        };

        match self.op {
            CompareOp::Eq => *actual == self.literal,
            CompareOp::Neq => *actual != self.literal,
            CompareOp::Gte => self.compare(actual, |a, b| a >= b),
            CompareOp::Lte => self.compare(actual, |a, b| a <= b),
            CompareOp::Gt => self.compare(actual, |a, b| a > b),
            CompareOp::Lt => self.compare(actual, |a, b| a < b),
        }
    }

    fn compare(&self, actual: &Value, cmp: fn(f64, f64) -> bool) -> bool {
        match (actual.as_number(), self.literal.as_number()) {
            (Some(a), Some(b)) => cmp(a, b),
            _ => false,
        }
    }
}

/// Evaluate a rule expression against a context
///
/// Empty expressions pass. Malformed expressions also pass so a badly
/// authored rule cannot block every design; missing data fails.
pub fn evaluate_expression(expression: &str, context: &Context) -> bool {
    if expression.trim().is_empty() {
        return true;
    }

    match Comparison::parse(expression) {
        Ok(comparison) => comparison.evaluate(context),
        Err(err) => {
            tracing::debug!("Treating malformed expression {:?} as passing: {}", expression, err);
            true
        }
    }
}
