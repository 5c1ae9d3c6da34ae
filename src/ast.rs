use crate::LispError;
use crate::builtins::BuiltinOp;

/// Core value type of the language.
///
/// Every runtime datum is one of these six variants. Containers own their
/// children outright (`Vec<Value>`), so values always form a tree; moving a
/// value transfers it, cloning produces a fully independent copy. The one
/// deliberate exception is `Builtin`, which shares a `&'static` registry
/// entry: builtins are immutable data, so aliasing them is safe.
#[derive(Debug, Clone)]
pub enum Value {
    /// Numbers (a single floating-point kind)
    Number(f64),
    /// Errors are ordinary values; the first error found among evaluated
    /// siblings replaces the whole enclosing expression's result
    Error(LispError),
    /// Symbols (identifiers), resolved by environment lookup
    Symbol(String),
    /// S-expressions: evaluated eagerly, left to right
    SExpr(Vec<Value>),
    /// Q-expressions: literal lists, never auto-evaluated
    QExpr(Vec<Value>),
    /// Built-in functions bound in the environment
    Builtin(&'static BuiltinOp),
}

impl Value {
    pub fn error(err: LispError) -> Value {
        Value::Error(err)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Short name used in type-mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Error(_) => "error",
            Value::Symbol(_) => "symbol",
            Value::SExpr(_) => "s-expression",
            Value::QExpr(_) => "q-expression",
            Value::Builtin(_) => "builtin",
        }
    }
}

fn write_seq(
    f: &mut std::fmt::Formatter<'_>,
    open: char,
    items: &[Value],
    close: char,
) -> std::fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Error(e) => write!(f, "Error: {}", e),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::SExpr(items) => write_seq(f, '(', items, ')'),
            Value::QExpr(items) => write_seq(f, '{', items, '}'),
            Value::Builtin(op) => write!(f, "#<builtin:{}>", op.name),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) => a == b,
            (Value::QExpr(a), Value::QExpr(b)) => a == b,
            // Compare builtins by name, not function pointer
            (Value::Builtin(a), Value::Builtin(b)) => a.name == b.name,
            _ => false, // Different variants are never equal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_leaves() {
        assert_eq!(Value::Number(5.0).to_string(), "5");
        assert_eq!(Value::Number(-2.5).to_string(), "-2.5");
        assert_eq!(Value::Symbol("head".to_string()).to_string(), "head");
        assert_eq!(
            Value::Error(LispError::Eval("cannot divide by zero".to_string())).to_string(),
            "Error: cannot divide by zero"
        );
    }

    #[test]
    fn test_render_containers() {
        assert_eq!(Value::SExpr(vec![]).to_string(), "()");
        assert_eq!(Value::QExpr(vec![]).to_string(), "{}");

        let sexpr = Value::SExpr(vec![
            Value::Symbol("+".to_string()),
            Value::Number(1.0),
            Value::Number(2.0),
        ]);
        assert_eq!(sexpr.to_string(), "(+ 1 2)");

        let nested = Value::QExpr(vec![
            Value::Number(1.0),
            Value::QExpr(vec![Value::Number(2.0), Value::Number(3.0)]),
        ]);
        assert_eq!(nested.to_string(), "{1 {2 3}}");
    }

    #[test]
    fn test_clone_independence() {
        let original = Value::QExpr(vec![
            Value::Number(1.0),
            Value::SExpr(vec![Value::Symbol("x".to_string())]),
        ]);
        let copy = original.clone();
        drop(copy);

        // The original is fully usable after the copy is gone
        assert_eq!(original.to_string(), "{1 (x)}");
        assert_eq!(original, original.clone());
    }

    #[test]
    fn test_different_variants_never_equal() {
        assert_ne!(Value::Number(0.0), Value::SExpr(vec![]));
        assert_ne!(Value::SExpr(vec![]), Value::QExpr(vec![]));
        assert_ne!(
            Value::Symbol("x".to_string()),
            Value::Error(LispError::UnboundSymbol("x".to_string()))
        );
    }
}
