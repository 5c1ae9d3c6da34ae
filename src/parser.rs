use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, multispace0},
    combinator::{opt, recognize},
    multi::many0,
    sequence::{pair, preceded, terminated, tuple},
};

use crate::LispError;

/// A node of the surface syntax tree.
///
/// The evaluator core never parses text; it consumes this tree through
/// `reader::read`. Tags identify the production that matched: `number`,
/// `symbol`, `sexpression`, `qexpression`, the root marker `>`, plus the
/// delimiter tokens (`char`) and anchors (`regex`) that `read` skips over.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub tag: &'static str,
    pub contents: String,
    pub children: Vec<Node>,
}

impl Node {
    fn leaf(tag: &'static str, contents: &str) -> Node {
        Node {
            tag,
            contents: contents.to_string(),
            children: Vec::new(),
        }
    }

    fn branch(tag: &'static str, children: Vec<Node>) -> Node {
        Node {
            tag,
            contents: String::new(),
            children,
        }
    }

    fn delimiter(token: char) -> Node {
        Node::leaf("char", &token.to_string())
    }

    fn anchor() -> Node {
        Node::leaf("regex", "")
    }
}

/// Characters allowed in symbols beyond alphanumerics
const SYMBOL_CHARS: &str = "_+-*/\\^=<>!&?%";

/// Parse a number token: `-?digits(.digits)?`
///
/// Only the span is recognized here; the reader does the float conversion.
fn node_number(input: &str) -> IResult<&str, Node> {
    let (input, text) = recognize(tuple((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    )))(input)?;
    Ok((input, Node::leaf("number", text)))
}

/// Parse a symbol (identifier or operator name)
fn node_symbol(input: &str) -> IResult<&str, Node> {
    let (input, text) =
        take_while1(|c: char| c.is_alphanumeric() || SYMBOL_CHARS.contains(c))(input)?;
    Ok((input, Node::leaf("symbol", text)))
}

/// Parse an s-expression: `( expr* )`
fn node_sexpression(input: &str) -> IResult<&str, Node> {
    let (input, _) = char('(')(input)?;
    let (input, exprs) = many0(node_expr)(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;

    let mut children = Vec::with_capacity(exprs.len() + 2);
    children.push(Node::delimiter('('));
    children.extend(exprs);
    children.push(Node::delimiter(')'));
    Ok((input, Node::branch("sexpression", children)))
}

/// Parse a q-expression: `{ expr* }`
fn node_qexpression(input: &str) -> IResult<&str, Node> {
    let (input, _) = char('{')(input)?;
    let (input, exprs) = many0(node_expr)(input)?;
    let (input, _) = preceded(multispace0, char('}'))(input)?;

    let mut children = Vec::with_capacity(exprs.len() + 2);
    children.push(Node::delimiter('{'));
    children.extend(exprs);
    children.push(Node::delimiter('}'));
    Ok((input, Node::branch("qexpression", children)))
}

fn node_expr(input: &str) -> IResult<&str, Node> {
    preceded(
        multispace0,
        alt((node_number, node_symbol, node_sexpression, node_qexpression)),
    )(input)
}

/// Describe leftover input with a user-friendly message
fn describe_leftover(remaining: &str) -> String {
    let rest = remaining.trim_start();
    if rest.starts_with(')') {
        "unexpected closing parenthesis".to_string()
    } else if rest.starts_with('}') {
        "unexpected closing brace".to_string()
    } else if rest.starts_with('(') {
        "missing closing parenthesis".to_string()
    } else if rest.starts_with('{') {
        "missing closing brace".to_string()
    } else {
        let near: String = rest.chars().take(10).collect();
        format!("invalid syntax near '{}'", near)
    }
}

/// Parse a complete line of input into a syntax tree.
///
/// The root is tagged `>` and holds zero or more expressions between two
/// anchor nodes, so `+ 1 2` at the top level reads as an implicit
/// s-expression.
pub fn parse(input: &str) -> Result<Node, LispError> {
    match terminated(many0(node_expr), multispace0)(input) {
        Ok(("", exprs)) => {
            let mut children = Vec::with_capacity(exprs.len() + 2);
            children.push(Node::anchor());
            children.extend(exprs);
            children.push(Node::anchor());
            Ok(Node::branch(">", children))
        }
        Ok((remaining, _)) => Err(LispError::Parse(describe_leftover(remaining))),
        Err(_) => Err(LispError::Parse(format!(
            "invalid syntax near '{}'",
            input.chars().take(10).collect::<String>()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exprs(root: &Node) -> Vec<&Node> {
        root.children
            .iter()
            .filter(|c| c.tag != "regex" && c.tag != "char")
            .collect()
    }

    #[test]
    fn test_parse_number_tokens() {
        let root = parse("42").unwrap();
        assert_eq!(root.tag, ">");
        let found = exprs(&root);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].tag, "number");
        assert_eq!(found[0].contents, "42");

        let root = parse("-2.5").unwrap();
        assert_eq!(exprs(&root)[0].contents, "-2.5");
    }

    #[test]
    fn test_parse_symbol_tokens() {
        for sym in ["head", "+", "-", "^", ">=", "my-var!", "var123"] {
            let root = parse(sym).unwrap();
            let found = exprs(&root);
            assert_eq!(found.len(), 1, "parsing {:?}", sym);
            assert_eq!(found[0].tag, "symbol");
            assert_eq!(found[0].contents, sym);
        }
    }

    #[test]
    fn test_root_holds_anchors() {
        let root = parse("1").unwrap();
        assert_eq!(root.children.first().unwrap().tag, "regex");
        assert_eq!(root.children.last().unwrap().tag, "regex");
    }

    #[test]
    fn test_parse_sexpression_keeps_delimiters() {
        let root = parse("(+ 1 2)").unwrap();
        let found = exprs(&root);
        assert_eq!(found.len(), 1);
        let sexpr = found[0];
        assert_eq!(sexpr.tag, "sexpression");
        assert_eq!(sexpr.children.first().unwrap().contents, "(");
        assert_eq!(sexpr.children.last().unwrap().contents, ")");
        assert_eq!(exprs(sexpr).len(), 3);
    }

    #[test]
    fn test_parse_qexpression() {
        let root = parse("{1 2 3}").unwrap();
        let found = exprs(&root);
        assert_eq!(found[0].tag, "qexpression");
        assert_eq!(exprs(found[0]).len(), 3);
    }

    #[test]
    fn test_parse_nested() {
        let root = parse("(join {1 2} {3})").unwrap();
        let sexpr = exprs(&root)[0];
        let inner = exprs(sexpr);
        assert_eq!(inner.len(), 3);
        assert_eq!(inner[0].tag, "symbol");
        assert_eq!(inner[1].tag, "qexpression");
        assert_eq!(inner[2].tag, "qexpression");
    }

    #[test]
    fn test_toplevel_multiple_expressions() {
        // Top level is an implicit s-expression, so bare `+ 1 2` is valid
        let root = parse("+ 1 2").unwrap();
        assert_eq!(exprs(&root).len(), 3);
    }

    #[test]
    fn test_whitespace_handling() {
        let root = parse("  ( +   1\t2 \n)  ").unwrap();
        assert_eq!(exprs(exprs(&root)[0]).len(), 3);

        let root = parse("(   )").unwrap();
        assert_eq!(exprs(exprs(&root)[0]).len(), 0);
    }

    #[test]
    fn test_error_cases() {
        assert!(parse("(1 2 3").is_err()); // missing closing
        assert!(parse("1 2 3)").is_err()); // extra closing
        assert!(parse("{1 2").is_err());
        assert!(parse("((1 2)").is_err());

        // Error messages stay user-facing
        match parse("(1 2") {
            Err(LispError::Parse(msg)) => assert!(msg.contains("missing closing parenthesis")),
            other => panic!("expected parse error, got {:?}", other),
        }
        match parse("1)") {
            Err(LispError::Parse(msg)) => assert!(msg.contains("unexpected closing parenthesis")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
