use std::collections::HashMap;

use crate::LispError;
use crate::ast::Value;
use crate::builtins::BUILTIN_OPS;

/// Flat name-to-value binding table consulted during symbol resolution.
///
/// Lookups hand back a clone, never a reference into the table, so a stored
/// binding always survives whatever the caller does with the result.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Bind `name` to `value`, replacing and dropping any previous binding
    pub fn define(&mut self, name: String, value: Value) {
        self.bindings.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Resolve a symbol to an owned value. Unknown names produce an error
    /// value, not a failure.
    pub fn lookup(&self, name: &str) -> Value {
        match self.bindings.get(name) {
            Some(value) => value.clone(),
            None => Value::Error(LispError::UnboundSymbol(name.to_string())),
        }
    }

    /// Iterate over all bindings (used by the REPL's `:env` command)
    pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(name, value)| (name.as_str(), value))
    }
}

/// Evaluate a value tree to a single result.
///
/// Numbers, errors, q-expressions and builtins are terminal; symbols resolve
/// through the environment; s-expressions go through `eval_sexpression`.
pub fn eval(env: &mut Environment, value: Value) -> Value {
    match value {
        Value::Symbol(name) => env.lookup(&name),
        Value::SExpr(children) => eval_sexpression(env, children),
        other => other,
    }
}

fn eval_sexpression(env: &mut Environment, children: Vec<Value>) -> Value {
    // Evaluate every child first, strictly left to right
    let mut evaluated = Vec::with_capacity(children.len());
    for child in children {
        evaluated.push(eval(env, child));
    }

    // First error wins; the container and the remaining siblings are dropped
    if let Some(pos) = evaluated.iter().position(Value::is_error) {
        return evaluated.swap_remove(pos);
    }

    // Empty expression evaluates to itself
    if evaluated.is_empty() {
        return Value::SExpr(evaluated);
    }

    // A single expression reduces to that expression
    if evaluated.len() == 1 {
        return evaluated.remove(0);
    }

    // The head must have evaluated to a callable; apply it to the rest
    let func = evaluated.remove(0);
    apply(env, func, evaluated)
}

fn apply(env: &mut Environment, func: Value, args: Vec<Value>) -> Value {
    match func {
        Value::Builtin(op) => {
            if let Err(e) = op.arity.validate(args.len()) {
                return Value::Error(e);
            }
            (op.func)(env, args)
        }
        _ => Value::Error(LispError::Type(
            "first element is not a function".to_string(),
        )),
    }
}

/// Create a global environment with the full builtin catalog bound
pub fn create_global_env() -> Environment {
    let mut env = Environment::new();
    for op in BUILTIN_OPS {
        env.define(op.name.to_string(), Value::Builtin(op));
    }
    env
}
