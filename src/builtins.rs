//! Built-in operation registry.
//!
//! Every primitive the language ships with is declared once in `BUILTIN_OPS`
//! and bound into the global environment as a `Value::Builtin` at startup.
//! Dispatch happens through the function pointer in the registry entry, never
//! by comparing operator names at call time.
//!
//! Builtins own their argument vector outright: on success they consume it
//! into a fresh value, on a contract violation they drop it and return an
//! error value. Arity is declared in the registry and checked by the
//! evaluator before the call; type and emptiness contracts are checked here.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::LispError;
use crate::ast::Value;
use crate::evaluator::{self, Environment};

/// Signature shared by all builtins. The environment is needed by `eval`,
/// which re-enters the evaluator.
pub type BuiltinFn = fn(&mut Environment, Vec<Value>) -> Value;

/// Expected number of arguments for an operation
#[derive(Debug, Clone, PartialEq)]
pub enum Arity {
    /// Exactly n arguments required
    Exact(usize),
    /// At least n arguments required
    AtLeast(usize),
    /// Any number of arguments (0 or more)
    Any,
}

impl Arity {
    pub fn validate(&self, got: usize) -> Result<(), LispError> {
        let valid = match self {
            Arity::Exact(n) => got == *n,
            Arity::AtLeast(n) => got >= *n,
            Arity::Any => true,
        };

        if valid {
            Ok(())
        } else {
            Err(LispError::Arity {
                expected: match self {
                    Arity::Exact(n) | Arity::AtLeast(n) => *n,
                    Arity::Any => 0,
                },
                got,
            })
        }
    }
}

/// Definition of a built-in operation
#[derive(Debug)]
pub struct BuiltinOp {
    /// Name the operation is bound to in the environment
    pub name: &'static str,
    /// Expected number of arguments
    pub arity: Arity,
    /// The implementation
    pub func: BuiltinFn,
}

//
// Arithmetic
//

#[derive(Debug, Clone, Copy, PartialEq)]
enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Left-fold over numeric arguments, starting at the first one.
///
/// All arguments must be numbers before any work happens. A lone argument to
/// `-` negates; division checks the divisor mid-fold.
fn numeric_fold(args: Vec<Value>, op: ArithOp) -> Value {
    let mut nums = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Value::Number(n) => nums.push(n),
            other => {
                return Value::Error(LispError::Type(format!(
                    "cannot operate on non-number, got {}",
                    other.type_name()
                )));
            }
        }
    }

    let mut rest = nums.into_iter();
    let first = match rest.next() {
        Some(n) => n,
        None => return Value::Error(LispError::arity_error(1, 0)),
    };

    if op == ArithOp::Sub && rest.len() == 0 {
        return Value::Number(-first);
    }

    let mut acc = first;
    for y in rest {
        acc = match op {
            ArithOp::Add => acc + y,
            ArithOp::Sub => acc - y,
            ArithOp::Mul => acc * y,
            ArithOp::Div => {
                if y == 0.0 {
                    return Value::Error(LispError::Eval("cannot divide by zero".to_string()));
                }
                acc / y
            }
            ArithOp::Pow => acc.powf(y),
        };
    }
    Value::Number(acc)
}

pub fn builtin_add(_env: &mut Environment, args: Vec<Value>) -> Value {
    numeric_fold(args, ArithOp::Add)
}

pub fn builtin_sub(_env: &mut Environment, args: Vec<Value>) -> Value {
    numeric_fold(args, ArithOp::Sub)
}

pub fn builtin_mul(_env: &mut Environment, args: Vec<Value>) -> Value {
    numeric_fold(args, ArithOp::Mul)
}

pub fn builtin_div(_env: &mut Environment, args: Vec<Value>) -> Value {
    numeric_fold(args, ArithOp::Div)
}

pub fn builtin_pow(_env: &mut Environment, args: Vec<Value>) -> Value {
    numeric_fold(args, ArithOp::Pow)
}

//
// List operations
//

/// Take the only argument, or report the arity violation
fn take_single(args: &mut Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_error(1, args.len()));
    }
    Ok(args.remove(0))
}

/// Retag the argument list as a q-expression, zero copy
pub fn builtin_list(_env: &mut Environment, args: Vec<Value>) -> Value {
    Value::QExpr(args)
}

pub fn builtin_head(_env: &mut Environment, mut args: Vec<Value>) -> Value {
    let arg = match take_single(&mut args) {
        Ok(arg) => arg,
        Err(e) => return Value::Error(e),
    };
    match arg {
        Value::QExpr(mut items) => {
            if items.is_empty() {
                return Value::Error(LispError::Eval("head of empty q-expression".to_string()));
            }
            items.truncate(1);
            Value::QExpr(items)
        }
        other => Value::Error(LispError::Type(format!(
            "head requires a q-expression, got {}",
            other.type_name()
        ))),
    }
}

pub fn builtin_tail(_env: &mut Environment, mut args: Vec<Value>) -> Value {
    let arg = match take_single(&mut args) {
        Ok(arg) => arg,
        Err(e) => return Value::Error(e),
    };
    match arg {
        Value::QExpr(mut items) => {
            if items.is_empty() {
                return Value::Error(LispError::Eval("tail of empty q-expression".to_string()));
            }
            items.remove(0);
            Value::QExpr(items)
        }
        other => Value::Error(LispError::Type(format!(
            "tail requires a q-expression, got {}",
            other.type_name()
        ))),
    }
}

pub fn builtin_join(_env: &mut Environment, args: Vec<Value>) -> Value {
    let mut joined = Vec::new();
    for arg in args {
        match arg {
            Value::QExpr(items) => joined.extend(items),
            other => {
                return Value::Error(LispError::Type(format!(
                    "join requires q-expressions, got {}",
                    other.type_name()
                )));
            }
        }
    }
    Value::QExpr(joined)
}

/// Retag a q-expression as an s-expression and evaluate it
pub fn builtin_eval(env: &mut Environment, mut args: Vec<Value>) -> Value {
    let arg = match take_single(&mut args) {
        Ok(arg) => arg,
        Err(e) => return Value::Error(e),
    };
    match arg {
        Value::QExpr(items) => evaluator::eval(env, Value::SExpr(items)),
        other => Value::Error(LispError::Type(format!(
            "eval requires a q-expression, got {}",
            other.type_name()
        ))),
    }
}

pub fn builtin_len(_env: &mut Environment, mut args: Vec<Value>) -> Value {
    let arg = match take_single(&mut args) {
        Ok(arg) => arg,
        Err(e) => return Value::Error(e),
    };
    match arg {
        Value::QExpr(items) => Value::Number(items.len() as f64),
        other => Value::Error(LispError::Type(format!(
            "len requires a q-expression, got {}",
            other.type_name()
        ))),
    }
}

pub fn builtin_init(_env: &mut Environment, mut args: Vec<Value>) -> Value {
    let arg = match take_single(&mut args) {
        Ok(arg) => arg,
        Err(e) => return Value::Error(e),
    };
    match arg {
        Value::QExpr(mut items) => {
            if items.is_empty() {
                return Value::Error(LispError::Eval("init of empty q-expression".to_string()));
            }
            items.pop();
            Value::QExpr(items)
        }
        other => Value::Error(LispError::Type(format!(
            "init requires a q-expression, got {}",
            other.type_name()
        ))),
    }
}

/// Global registry of all built-in operations
pub static BUILTIN_OPS: &[BuiltinOp] = &[
    // List operations
    BuiltinOp {
        name: "list",
        arity: Arity::Any,
        func: builtin_list,
    },
    BuiltinOp {
        name: "head",
        arity: Arity::Exact(1),
        func: builtin_head,
    },
    BuiltinOp {
        name: "tail",
        arity: Arity::Exact(1),
        func: builtin_tail,
    },
    BuiltinOp {
        name: "join",
        arity: Arity::AtLeast(1),
        func: builtin_join,
    },
    BuiltinOp {
        name: "eval",
        arity: Arity::Exact(1),
        func: builtin_eval,
    },
    BuiltinOp {
        name: "len",
        arity: Arity::Exact(1),
        func: builtin_len,
    },
    BuiltinOp {
        name: "init",
        arity: Arity::Exact(1),
        func: builtin_init,
    },
    // Arithmetic
    BuiltinOp {
        name: "+",
        arity: Arity::AtLeast(1),
        func: builtin_add,
    },
    BuiltinOp {
        name: "-",
        arity: Arity::AtLeast(1),
        func: builtin_sub,
    },
    BuiltinOp {
        name: "*",
        arity: Arity::AtLeast(1),
        func: builtin_mul,
    },
    BuiltinOp {
        name: "/",
        arity: Arity::AtLeast(1),
        func: builtin_div,
    },
    BuiltinOp {
        name: "^",
        arity: Arity::AtLeast(1),
        func: builtin_pow,
    },
];

/// Lazy static map from name to BuiltinOp (private - use find_builtin)
static BUILTIN_INDEX: LazyLock<HashMap<&'static str, &'static BuiltinOp>> =
    LazyLock::new(|| BUILTIN_OPS.iter().map(|op| (op.name, op)).collect());

/// Find a builtin operation by its bound name
pub fn find_builtin(name: &str) -> Option<&'static BuiltinOp> {
    BUILTIN_INDEX.get(name).copied()
}
