//! flat `KEY=VALUE` destination files
//!
//! Values are stored decoded (quotes removed, escapes resolved). [encode_value] and [decode_value] translate
//! between the stored form and the text on disk, so reading a file that was written by [write_env_file] gives
//! back exactly what was written.
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

/// Key to (decoded) value, iterates in sorted key order
pub type EnvMap = BTreeMap<String, String>;

/// Characters that force a value into double quotes
const QUOTE_TRIGGERS: &[char] = &[' ', '$', '"', '\'', '`', '\\'];

/// Read a destination file, a missing file is an empty map
pub fn read_env_file(path: &Path) -> Result<EnvMap, std::io::Error> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            tracing::info!(path = %path.display(), "reading destination file");
            Ok(parse_env(&contents))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "destination file does not exist yet");
            Ok(EnvMap::new())
        }
        Err(err) => Err(err),
    }
}

/// Parse `KEY=VALUE` lines, blank lines and `#` comments are skipped
///
/// There is no type inference on this side, every value is a string.
pub fn parse_env(contents: &str) -> EnvMap {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), decode_value(value.trim())))
        .collect()
}

/// Write all entries sorted by key, the header (if any) goes first followed by a blank line
pub fn write_env_file(path: &Path, env: &EnvMap, header: Option<&str>) -> Result<(), std::io::Error> {
    tracing::info!(path = %path.display(), entries = env.len(), "writing destination file");
    std::fs::write(path, render_env(env, header))
}

/// File contents as written by [write_env_file]
pub fn render_env(env: &EnvMap, header: Option<&str>) -> String {
    let mut contents = String::new();

    if let Some(header) = header {
        contents.push_str(header);
        contents.push_str("\n\n");
    }

    for (key, value) in env {
        contents.push_str(key);
        contents.push('=');
        contents.push_str(&encode_value(value));
        contents.push('\n');
    }

    contents
}

/// Double quote values containing a space or any of `` $ " ' ` \ ``, escaping `\` and `"`
pub fn encode_value(value: &str) -> Cow<'_, str> {
    if !value.contains(QUOTE_TRIGGERS) {
        return Cow::Borrowed(value);
    }

    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    Cow::Owned(format!("\"{escaped}\""))
}

/// Remove one layer of matching quotes
///
/// Inside double quotes `\\` and `\"` are unescaped, single quoted values are taken literally.
pub fn decode_value(value: &str) -> String {
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return unescape(inner);
        }

        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return inner.to_string();
        }
    }

    value.to_string()
}

fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }

        match chars.next() {
            Some(next @ ('\\' | '"')) => unescaped.push(next),
            Some(next) => {
                unescaped.push('\\');
                unescaped.push(next);
            }
            None => unescaped.push('\\'),
        }
    }

    unescaped
}
