use std::fmt;

/// Error conditions for the interpreter.
///
/// User-facing conditions travel as `Value::Error` through evaluation and
/// short-circuit the enclosing expression; the `Result` form only appears at
/// the parser boundary (text to syntax tree).
#[derive(Debug, Clone, PartialEq)]
pub enum LispError {
    Parse(String),
    Eval(String),
    Type(String),
    UnboundSymbol(String),
    Arity { expected: usize, got: usize },
}

impl LispError {
    pub fn arity_error(expected: usize, got: usize) -> Self {
        LispError::Arity { expected, got }
    }
}

impl std::error::Error for LispError {}

impl fmt::Display for LispError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LispError::Parse(msg) => write!(f, "{}", msg),
            LispError::Eval(msg) => write!(f, "{}", msg),
            LispError::Type(msg) => write!(f, "{}", msg),
            LispError::UnboundSymbol(name) => write!(f, "unbound symbol '{}'", name),
            LispError::Arity { expected, got } => {
                write!(f, "expected {} arguments, got {}", expected, got)
            }
        }
    }
}

pub mod ast;
pub mod builtins;
pub mod evaluator;
pub mod parser;
pub mod reader;

pub use ast::Value;
pub use evaluator::Environment;
