//! one full run: read source, merge, write destination
use crate::env_file::{read_env_file, write_env_file, EnvMap};
use crate::merge::{merge, SyncSummary, Variables};
use crate::parser::parse_value;
use crate::scanner::scan;
use std::path::{Path, PathBuf};

/// Prefix used by terraform for input variables taken from the environment
pub const TF_VAR_PREFIX: &str = "TF_VAR_";

#[derive(Debug, Clone, derive_new::new)]
pub struct SyncOptions {
    /// prepended to every uppercased key
    #[new(default)]
    pub prefix: String,
    /// ignore whatever the destination file contains
    #[new(default)]
    pub overwrite: bool,
    /// fail on a bracketed value that is never closed instead of keeping the fragment
    #[new(default)]
    pub strict: bool,
    /// write the generated comment block at the top of the destination
    #[new(value = "true")]
    pub header: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncOptions {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("Source file {} not found", .0.display())]
    SourceNotFound(PathBuf),
    #[error("Unterminated bracket in value of '{key}' starting at line {line}")]
    UnterminatedBracket { key: String, line: usize },
    #[error("Unable to read source file {}", .path.display())]
    ReadSource {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to read destination file {}", .path.display())]
    ReadDestination {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Unable to write destination file {}", .path.display())]
    WriteDestination {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Sync the variables of `source` into the destination file `destination`
///
/// The destination is only written once the source was read and parsed completely. A missing destination is
/// treated like an empty one.
pub fn sync(
    source: &Path,
    destination: &Path,
    options: &SyncOptions,
) -> Result<SyncSummary, SyncError> {
    let variables = load_variables(source, options.strict)?;
    tracing::info!(count = variables.len(), "variables found");

    let existing = if options.overwrite {
        EnvMap::new()
    } else {
        read_env_file(destination).map_err(|source| SyncError::ReadDestination {
            path: destination.to_owned(),
            source,
        })?
    };

    let (env, summary) = merge(existing, &variables, &options.prefix);

    let header = options.header.then(|| header_for(source, destination));
    write_env_file(destination, &env, header.as_deref()).map_err(|source| {
        SyncError::WriteDestination {
            path: destination.to_owned(),
            source,
        }
    })?;

    tracing::info!(?summary, "sync complete");
    Ok(summary)
}

/// Read and parse a tfvars file
///
/// A later assignment to the same key replaces the earlier value but keeps its position.
pub fn load_variables(path: &Path, strict: bool) -> Result<Variables, SyncError> {
    let contents = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => SyncError::SourceNotFound(path.to_owned()),
        _ => SyncError::ReadSource {
            path: path.to_owned(),
            source: err,
        },
    })?;
    tracing::info!(path = %path.display(), "reading source file");

    parse_variables(&contents, strict)
}

/// Parse tfvars text, see [load_variables]
pub fn parse_variables(contents: &str, strict: bool) -> Result<Variables, SyncError> {
    let mut variables = Variables::new();

    for record in scan(contents) {
        if record.unterminated && strict {
            return Err(SyncError::UnterminatedBracket {
                key: record.key,
                line: record.line,
            });
        }

        let value = parse_value(&record.raw_value);
        variables.insert(record.key, value);
    }

    Ok(variables)
}

/// Comment block written above the entries
pub fn header_for(source: &Path, destination: &Path) -> String {
    let source_name = source
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_else(|| source.to_string_lossy());

    format!(
        "# Environment variables synced from {source_name}\n\
         # Generated by tfsync\n\
         # DO NOT EDIT THIS FILE MANUALLY - Changes will be overwritten\n\
         #\n\
         # To update: run tfsync --tfvars {} --env {}",
        source.display(),
        destination.display()
    )
}
