//! literal to [Value] conversion
//!
//! [parse_value] never fails. Rules are tried in the order of [RULES], the first one that accepts the literal
//! decides the variant. Order matters: `"true"` must stay a string, `1.5` must not end up as a bareword.
use crate::value::Value;

/// A single literal form: returns `Some` when it recognises the (trimmed) literal
pub type Rule = fn(&str) -> Option<Value>;

/// Rules in precedence order
pub const RULES: &[(&str, Rule)] = &[
    ("boolean", boolean),
    ("null", null),
    ("quoted string", quoted_string),
    ("number", number),
    ("list", list),
    ("map", map),
];

/// Parse one literal
///
/// Surrounding whitespace and a single trailing comma are removed first. Anything no rule accepts becomes
/// [Value::String] holding the literal as written.
pub fn parse_value(literal: &str) -> Value {
    let literal = literal.trim();
    let literal = literal
        .strip_suffix(',')
        .map(str::trim_end)
        .unwrap_or(literal);

    RULES
        .iter()
        .find_map(|(name, rule)| {
            let value = rule(literal)?;
            tracing::trace!(rule = name, literal, "literal matched");
            Some(value)
        })
        .unwrap_or_else(|| Value::String(literal.to_string()))
}

fn boolean(literal: &str) -> Option<Value> {
    if literal.eq_ignore_ascii_case("true") {
        Some(Value::Boolean(true))
    } else if literal.eq_ignore_ascii_case("false") {
        Some(Value::Boolean(false))
    } else {
        None
    }
}

fn null(literal: &str) -> Option<Value> {
    literal
        .eq_ignore_ascii_case("null")
        .then_some(Value::Null)
}

/// Only the outer quotes are removed, escape sequences are kept as written
fn quoted_string(literal: &str) -> Option<Value> {
    let inner = unwrap(literal, '"', '"')?;
    Some(Value::String(inner.to_string()))
}

/// A `.` sends the literal straight to the float parser
fn number(literal: &str) -> Option<Value> {
    // rules out `inf`, `nan` and friends
    if !literal.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }

    if !literal.contains('.') {
        if let Ok(integer) = literal.parse::<i64>() {
            return Some(Value::Integer(integer));
        }
    }

    literal
        .parse::<f64>()
        .ok()
        .filter(|float| float.is_finite())
        .map(Value::Float)
}

/// Items are split on every comma, nested brackets are not taken into account
fn list(literal: &str) -> Option<Value> {
    let inner = unwrap(literal, '[', ']')?;

    let items = inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(parse_value)
        .collect();

    Some(Value::List(items))
}

fn map(literal: &str) -> Option<Value> {
    unwrap(literal, '{', '}')?;
    Some(Value::RawMap(literal.to_string()))
}

/// Content between `open` and `close` when the literal starts and ends with them
fn unwrap(literal: &str, open: char, close: char) -> Option<&str> {
    if literal.len() < 2 {
        return None;
    }

    literal.strip_prefix(open)?.strip_suffix(close)
}
