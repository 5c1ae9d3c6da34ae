use crate::LispError;
use crate::ast::Value;
use crate::parser::Node;

/// Convert a syntax tree into a value tree, walking it exactly once.
///
/// Delimiter tokens and the root anchors are skipped; number leaves are
/// converted here (a failed conversion becomes an `invalid number` error
/// value, not a parse failure). The root marker and s-expressions both build
/// `SExpr`, so top-level input behaves as one implicit s-expression.
pub fn read(node: &Node) -> Value {
    if node.tag.contains("number") {
        return read_number(node);
    }
    if node.tag.contains("symbol") {
        return Value::Symbol(node.contents.clone());
    }

    let mut children = Vec::new();
    for child in &node.children {
        if matches!(child.contents.as_str(), "(" | ")" | "{" | "}") {
            continue;
        }
        if child.tag == "regex" {
            continue;
        }
        children.push(read(child));
    }

    if node.tag.contains("qexpression") {
        Value::QExpr(children)
    } else {
        Value::SExpr(children)
    }
}

fn read_number(node: &Node) -> Value {
    // str::parse is locale-independent, unlike C's strtof
    match node.contents.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Error(LispError::Parse("invalid number".to_string())),
    }
}
