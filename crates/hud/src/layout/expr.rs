//! Expressions and text templates embedded in layouts.
//!
//! Expressions are parsed once when the layout compiles and evaluated
//! against the snapshot every frame. Names resolve to snapshot fields
//! first, then to the numeric constants; anything else is a runtime error.

use std::fmt;

use serde::Deserialize;

use crate::api::HudApi;
use crate::constants::constant;
use crate::error::ScriptError;
use crate::snapshot::Value;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Name(String),
    Text(String),
    Op(&'static str),
    LParen,
    RParen,
    Comma,
}

const OPERATORS: &[&str] = &[
    "&&", "||", "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "%", "!",
];

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if !(d.is_ascii_digit() || d == '.') {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            let text = &source[start..end];
            let number = text
                .parse()
                .map_err(|_| format!("bad number '{text}'"))?;
            tokens.push(Token::Number(number));
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let mut end = start;
            while let Some(&(i, d)) = chars.peek() {
                if !(d.is_alphanumeric() || d == '_') {
                    break;
                }
                end = i + d.len_utf8();
                chars.next();
            }
            tokens.push(Token::Name(source[start..end].to_string()));
            continue;
        }

        if c == '"' || c == '\'' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for (_, d) in chars.by_ref() {
                if d == c {
                    closed = true;
                    break;
                }
                text.push(d);
            }
            if !closed {
                return Err("unterminated string".to_string());
            }
            tokens.push(Token::Text(text));
            continue;
        }

        match c {
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            _ => {
                let rest = &source[start..];
                let Some(op) = OPERATORS.iter().find(|op| rest.starts_with(**op)) else {
                    return Err(format!("unexpected '{c}'"));
                };
                tokens.push(Token::Op(op));
                // operators are ASCII, so one char per byte
                for _ in 1..op.len() {
                    chars.next();
                }
            }
        }
        chars.next();
    }

    Ok(tokens)
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Literal(Value),
    Name(String),
    Not(Box<Node>),
    Neg(Box<Node>),
    Binary(&'static str, Box<Node>, Box<Node>),
    Call(String, Vec<Node>),
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat_op(&mut self, ops: &[&str]) -> Option<&'static str> {
        match self.peek() {
            Some(Token::Op(op)) if ops.contains(op) => {
                let op = *op;
                self.pos += 1;
                Some(op)
            }
            _ => None,
        }
    }

    fn binary(&mut self, ops: &[&str], operand: fn(&mut Self) -> Result<Node, String>) -> Result<Node, String> {
        let mut lhs = operand(self)?;
        while let Some(op) = self.eat_op(ops) {
            let rhs = operand(self)?;
            lhs = Node::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn or(&mut self) -> Result<Node, String> {
        self.binary(&["||"], Self::and)
    }

    fn and(&mut self) -> Result<Node, String> {
        self.binary(&["&&"], Self::equality)
    }

    fn equality(&mut self) -> Result<Node, String> {
        self.binary(&["==", "!="], Self::comparison)
    }

    fn comparison(&mut self) -> Result<Node, String> {
        self.binary(&["<", "<=", ">", ">="], Self::additive)
    }

    fn additive(&mut self) -> Result<Node, String> {
        self.binary(&["+", "-"], Self::multiplicative)
    }

    fn multiplicative(&mut self) -> Result<Node, String> {
        self.binary(&["*", "/", "%"], Self::unary)
    }

    fn unary(&mut self) -> Result<Node, String> {
        if self.eat_op(&["!"]).is_some() {
            return Ok(Node::Not(Box::new(self.unary()?)));
        }
        if self.eat_op(&["-"]).is_some() {
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Node, String> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Node::Literal(Value::Number(n))),
            Some(Token::Text(text)) => Ok(Node::Literal(Value::Text(text))),
            Some(Token::Name(name)) if name == "true" => Ok(Node::Literal(Value::Bool(true))),
            Some(Token::Name(name)) if name == "false" => Ok(Node::Literal(Value::Bool(false))),
            Some(Token::Name(name)) if self.peek() == Some(&Token::LParen) => {
                self.pos += 1;
                let mut args = Vec::new();
                if self.peek() != Some(&Token::RParen) {
                    loop {
                        args.push(self.or()?);
                        if self.peek() != Some(&Token::Comma) {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                self.expect_rparen()?;
                Ok(Node::Call(name, args))
            }
            Some(Token::Name(name)) => Ok(Node::Name(name)),
            Some(Token::LParen) => {
                let node = self.or()?;
                self.expect_rparen()?;
                Ok(node)
            }
            Some(token) => Err(format!("unexpected {token:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), String> {
        match self.next() {
            Some(Token::RParen) => Ok(()),
            _ => Err("expected ')'".to_string()),
        }
    }
}

fn parse(source: &str) -> Result<Node, String> {
    let mut parser = Parser {
        tokens: tokenize(source)?,
        pos: 0,
    };
    let node = parser.or()?;
    if let Some(token) = parser.peek() {
        return Err(format!("trailing {token:?}"));
    }
    Ok(node)
}

fn number(value: Value) -> Result<f64, ScriptError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(ScriptError::runtime(format!(
            "attempt to do arithmetic on {}",
            type_name(&other)
        ))),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) | Value::Text(_) => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::Text(_) => "a string",
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

fn eval(node: &Node, api: &HudApi) -> Result<Value, ScriptError> {
    Ok(match node {
        Node::Literal(value) => value.clone(),
        Node::Name(name) => api
            .frame
            .snapshot
            .field(name)
            .or_else(|| constant(name).map(Value::Number))
            .ok_or_else(|| ScriptError::runtime(format!("unknown name '{name}'")))?,
        Node::Not(inner) => Value::Bool(!truthy(&eval(inner, api)?)),
        Node::Neg(inner) => Value::Number(-number(eval(inner, api)?)?),
        Node::Binary("&&", lhs, rhs) => {
            let lhs = eval(lhs, api)?;
            if truthy(&lhs) { eval(rhs, api)? } else { lhs }
        }
        Node::Binary("||", lhs, rhs) => {
            let lhs = eval(lhs, api)?;
            if truthy(&lhs) { lhs } else { eval(rhs, api)? }
        }
        Node::Binary(op, lhs, rhs) => binary(op, eval(lhs, api)?, eval(rhs, api)?)?,
        Node::Call(name, args) => {
            let args = args
                .iter()
                .map(|arg| eval(arg, api))
                .collect::<Result<Vec<_>, _>>()?;
            call(name, args, api)?
        }
    })
}

fn binary(op: &str, lhs: Value, rhs: Value) -> Result<Value, ScriptError> {
    match op {
        "==" => return Ok(Value::Bool(lhs == rhs)),
        "!=" => return Ok(Value::Bool(lhs != rhs)),
        "+" if matches!(lhs, Value::Text(_)) || matches!(rhs, Value::Text(_)) => {
            return Ok(Value::Text(format!("{lhs}{rhs}")));
        }
        _ => {}
    }

    let (a, b) = (number(lhs)?, number(rhs)?);
    Ok(match op {
        "<" => Value::Bool(a < b),
        "<=" => Value::Bool(a <= b),
        ">" => Value::Bool(a > b),
        ">=" => Value::Bool(a >= b),
        "+" => Value::Number(a + b),
        "-" => Value::Number(a - b),
        "*" => Value::Number(a * b),
        "/" => Value::Number(a / b),
        "%" => Value::Number(a - b * (a / b).floor()),
        _ => return Err(ScriptError::runtime(format!("unknown operator {op}"))),
    })
}

fn call(name: &str, args: Vec<Value>, api: &HudApi) -> Result<Value, ScriptError> {
    let arity = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(ScriptError::runtime(format!(
                "{name} takes {n} arguments, got {}",
                args.len()
            )))
        }
    };

    Ok(match name {
        "bind" => {
            arity(1)?;
            Value::Text(api.get_bind(&args[0].to_string()))
        }
        "player_name" => {
            arity(1)?;
            let index = number(args[0].clone())? as i64;
            Value::Text(api.player_name(index).unwrap_or_default().to_string())
        }
        "min" | "max" => {
            arity(2)?;
            let (a, b) = (number(args[0].clone())?, number(args[1].clone())?);
            Value::Number(if name == "min" { a.min(b) } else { a.max(b) })
        }
        "floor" => {
            arity(1)?;
            Value::Number(number(args[0].clone())?.floor())
        }
        "abs" => {
            arity(1)?;
            Value::Number(number(args[0].clone())?.abs())
        }
        _ => return Err(ScriptError::runtime(format!("unknown function '{name}'"))),
    })
}

/// A parsed expression. Deserializes from a JSON number, boolean or
/// expression string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ExprSource")]
pub struct Expression {
    source: String,
    node: Node,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExprSource {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl TryFrom<ExprSource> for Expression {
    type Error = String;

    fn try_from(source: ExprSource) -> Result<Self, Self::Error> {
        match source {
            ExprSource::Number(n) => Ok(Self::number(n)),
            ExprSource::Bool(b) => Ok(Self {
                source: b.to_string(),
                node: Node::Literal(Value::Bool(b)),
            }),
            ExprSource::Text(text) => Self::parse(&text),
        }
    }
}

impl Default for Expression {
    fn default() -> Self {
        Self::number(0.0)
    }
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, String> {
        let node = parse(source).map_err(|err| format!("in '{source}': {err}"))?;
        Ok(Self {
            source: source.to_string(),
            node,
        })
    }

    pub fn number(n: f64) -> Self {
        Self {
            source: n.to_string(),
            node: Node::Literal(Value::Number(n)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn eval(&self, api: &HudApi) -> Result<Value, ScriptError> {
        eval(&self.node, api)
    }

    pub fn eval_f32(&self, api: &HudApi) -> Result<f32, ScriptError> {
        number(self.eval(api)?).map(|n| n as f32)
    }

    pub fn eval_bool(&self, api: &HudApi) -> Result<bool, ScriptError> {
        Ok(truthy(&self.eval(api)?))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Expr(Expression),
}

/// Text with `{expression}` holes. `{{` and `}}` are literal braces.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl TryFrom<String> for Template {
    type Error = String;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut expr = String::new();
                    let mut closed = false;
                    for d in chars.by_ref() {
                        if d == '}' {
                            closed = true;
                            break;
                        }
                        expr.push(d);
                    }
                    if !closed {
                        return Err(format!("unclosed '{{' in '{source}'"));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Expr(Expression::parse(&expr)?));
                }
                '}' => return Err(format!("stray '}}' in '{source}'")),
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source, segments })
    }
}

impl Template {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn render(&self, api: &HudApi) -> Result<String, ScriptError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expr(expr) => out.push_str(&expr.eval(api)?.to_string()),
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence() {
        let node = parse("1 + 2 * 3 > 6 && !false").unwrap();
        let Node::Binary("&&", lhs, rhs) = node else {
            panic!("expected &&, got {node:?}");
        };
        assert!(matches!(*lhs, Node::Binary(">", _, _)));
        assert!(matches!(*rhs, Node::Not(_)));
    }

    #[test]
    fn calls_and_strings() {
        let node = parse("bind('+gadget')").unwrap();
        assert_eq!(
            node,
            Node::Call(
                "bind".to_string(),
                vec![Node::Literal(Value::Text("+gadget".to_string()))]
            )
        );
        assert!(parse("max(1, 2)").is_ok());
        assert!(parse("min()").is_ok());
    }

    #[test]
    fn syntax_errors() {
        for source in ["", "1 +", "(1", "1 2", "'open", "a ? b", "max(1,"] {
            assert!(parse(source).is_err(), "{source}");
        }
    }

    #[test]
    fn numbers_print_like_integers_when_whole() {
        assert_eq!(Value::Number(63.0).to_string(), "63");
        assert_eq!(Value::Number(-2.0).to_string(), "-2");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn arithmetic() {
        assert_eq!(binary("%", Value::Number(-1.0), Value::Number(3.0)).unwrap(), Value::Number(2.0));
        assert_eq!(
            binary("+", Value::Text("hp ".into()), Value::Number(5.0)).unwrap(),
            Value::Text("hp 5".into())
        );
        assert!(binary("*", Value::Bool(true), Value::Number(2.0)).is_err());
        assert_eq!(binary("==", Value::Bool(true), Value::Number(1.0)).unwrap(), Value::Bool(false));
    }

    #[test]
    fn template_segments() {
        let template = Template::try_from("{health}/{max_health} {{hp}}".to_string()).unwrap();
        assert_eq!(template.segments.len(), 4);
        assert_eq!(template.segments[3], Segment::Literal(" {hp}".to_string()));

        assert!(Template::try_from("{health".to_string()).is_err());
        assert!(Template::try_from("oops}".to_string()).is_err());
        assert!(Template::try_from("{1 +}".to_string()).is_err());
    }
}
