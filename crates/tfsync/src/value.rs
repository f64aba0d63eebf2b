//! value representation
//!
//! Literals of a tfvars file map onto the following data types
//! - string (utf-8, surrounding quotes removed, escapes are kept as written)
//! - integer (signed, i64)
//! - float (f64)
//! - boolean (true/false)
//! - null
//! - list (each element is a fully parsed value)
//! - map (kept as written, braces included)
//!
//! Map bodies are never decomposed into values. They are only converted to JSON when rendered.

/// All possible value types
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    List(Vec<Value>),
    RawMap(String),
}

impl Value {
    /// Plain textual form of the value as it appears in a `.env` file, before any quoting
    ///
    /// - `null` becomes the empty string
    /// - list elements are rendered individually and joined with `,`
    /// - maps become compact JSON, or the literal itself when it cannot be read
    pub fn render(&self) -> String {
        match self {
            Value::String(value) => value.clone(),
            Value::Integer(value) => value.to_string(),
            Value::Float(value) => render_float(*value),
            Value::Boolean(value) => value.to_string(),
            Value::Null => String::new(),
            Value::List(values) => values
                .iter()
                .map(Value::render)
                .collect::<Vec<_>>()
                .join(","),
            Value::RawMap(literal) => render_map(literal),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Value::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Whole numbers keep one decimal place (`1.0`), very large or small magnitudes use an exponent (`1e+20`)
fn render_float(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return render_scientific(value);
    }

    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// `1.5e20` as `1.5e+20`, `1e-5` as `1e-05`
fn render_scientific(value: f64) -> String {
    let formatted = format!("{value:e}");
    let Some((mantissa, exponent)) = formatted.split_once('e') else {
        return formatted;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return formatted;
    };

    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.abs())
}

fn render_map(literal: &str) -> String {
    if let Some(json) = map_to_json(literal) {
        return json;
    }

    // multi-line maps arrive with their line breaks joined into spaces
    let separated = separate_items(literal);
    if separated != literal {
        if let Some(json) = map_to_json(&separated) {
            return json;
        }
    }

    literal.to_string()
}

fn map_to_json(literal: &str) -> Option<String> {
    let document = format!("value = {literal}\n");
    let parsed: Result<serde_json::Value, _> = hcl::from_str(&document);
    match parsed {
        Ok(serde_json::Value::Object(mut body)) => body.remove("value").map(|map| map.to_string()),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(%err, literal, "map literal is not valid hcl");
            None
        }
    }
}

/// Put a line break in front of every `key =` that is outside of a quoted string
fn separate_items(literal: &str) -> String {
    let mut separated = String::with_capacity(literal.len());
    let mut in_quotes = false;
    let mut escaped = false;

    for (index, c) in literal.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            _ if !in_quotes && c.is_whitespace() && starts_with_item(&literal[index..]) => {
                separated.push('\n');
                continue;
            }
            _ => {}
        }

        separated.push(c);
    }

    separated
}

/// `rest` (after leading whitespace) is an identifier or quoted key followed by a single `=`
fn starts_with_item(rest: &str) -> bool {
    let rest = rest.trim_start();

    let key_len = match rest.strip_prefix('"') {
        Some(quoted) => match quoted.find('"') {
            Some(end) => end + 2,
            None => return false,
        },
        None => rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len()),
    };

    if key_len == 0 {
        return false;
    }

    let after = rest[key_len..].trim_start();
    after.starts_with('=') && !after.starts_with("==")
}
