//! splits tfvars text into `key = value` records
//!
//! Lines are fed through a small state machine ([ScanState]). A record whose value ends in `[` or `{` switches
//! to [ScanState::InBracket] and swallows the following lines until the brackets balance again.
//!
//! Comments
//! - lines starting with `#` or `//` are skipped, also inside brackets
//! - a trailing `# ...` is removed from the first line of a record (not inside a quoted string)
//! - continuation lines are taken as they are

/// One logical assignment, multi-line values are already joined with single spaces
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct RawAssignment {
    /// may be empty for malformed input such as `= 1`
    pub key: String,
    pub raw_value: String,
    /// 1-based line number of the `=`
    pub line: usize,
    /// input ended before the brackets were balanced
    #[new(default)]
    pub unterminated: bool,
}

#[derive(Debug)]
pub enum ScanState {
    Idle,
    InBracket { depth: i64, record: RawAssignment },
}

impl ScanState {
    /// Consume one physical line (1-based `number`)
    pub fn feed(self, number: usize, line: &str, records: &mut Vec<RawAssignment>) -> Self {
        let line = line.trim();

        match self {
            ScanState::Idle => {
                if is_skipped(line) {
                    return ScanState::Idle;
                }

                // lines without `=` are not an error
                let Some((key, value)) = line.split_once('=') else {
                    return ScanState::Idle;
                };

                let value = strip_trailing_comment(value).trim();
                let record = RawAssignment::new(key.trim().to_string(), value.to_string(), number);

                let depth = bracket_depth(value);
                if (value.ends_with('[') || value.ends_with('{')) && depth > 0 {
                    return ScanState::InBracket { depth, record };
                }

                tracing::trace!(?record, "record");
                records.push(record);
                ScanState::Idle
            }
            ScanState::InBracket { depth, mut record } => {
                if is_skipped(line) {
                    return ScanState::InBracket { depth, record };
                }

                record.raw_value.push(' ');
                record.raw_value.push_str(line);

                let depth = depth + bracket_depth(line);
                if depth > 0 {
                    return ScanState::InBracket { depth, record };
                }

                tracing::trace!(?record, "multi-line record");
                records.push(record);
                ScanState::Idle
            }
        }
    }

    /// End of input: a record still waiting for closing brackets is kept as it is
    pub fn finish(self, records: &mut Vec<RawAssignment>) {
        if let ScanState::InBracket { depth, mut record } = self {
            tracing::warn!(
                key = %record.key,
                line = record.line,
                depth,
                "input ended inside a bracketed value"
            );
            record.unterminated = true;
            records.push(record);
        }
    }
}

/// Split source text into raw assignments, in source order
pub fn scan(source: &str) -> Vec<RawAssignment> {
    let mut records = vec![];
    let mut state = ScanState::Idle;

    for (index, line) in source.lines().enumerate() {
        state = state.feed(index + 1, line, &mut records);
    }

    state.finish(&mut records);
    records
}

fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with('#') || line.starts_with("//")
}

/// Opening minus closing brackets, `{` and `[` are counted alike
fn bracket_depth(text: &str) -> i64 {
    text.chars().fold(0, |depth, c| match c {
        '{' | '[' => depth + 1,
        '}' | ']' => depth - 1,
        _ => depth,
    })
}

fn strip_trailing_comment(value: &str) -> &str {
    let mut in_quotes = false;
    let mut escaped = false;

    for (index, c) in value.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &value[..index],
            _ => {}
        }
    }

    value
}
