//! # tfsync - terraform variables to `.env`
//!
//! Reads the variable assignments of a `terraform.tfvars` file and merges them into a flat `KEY=VALUE` file
//! that shell scripts and applications can source.
//!
//! ## Introduction for developers
//!
//! Read this to understand how `tfsync` works internally.
//!
//! ### Supported input
//!
//! Only a narrow subset of HCL is understood: top level `key = value` attributes whose value is a literal.
//!
//! ```hcl
//! # single line comments work like this
//! // ...or like this
//!
//! region  = "us-east-1"   # trailing comments are dropped
//! enabled = true
//! retries = 3
//! ratio   = 0.5
//! owner   = null
//!
//! tags = [
//!   "a",
//!   "b",
//! ]
//!
//! labels = { env = "prod", team = "core" }
//! ```
//!
//! Blocks, interpolation, function calls and references are not evaluated. They never fail either: whatever is
//! not recognised ends up as a plain string.
//!
//! ### Scanning
//!
//! see [scanner::scan]
//!
//! The source text is split into [scanner::RawAssignment]s. A value ending in `[` or `{` keeps consuming lines
//! until its brackets are balanced, the lines are joined with a single space.
//!
//! ### Parsing
//!
//! see [parser::parse_value]
//!
//! Each raw value is turned into a [value::Value] by an ordered list of rules, first match wins.
//!
//! | **literal**            | **value**                 | **rendered**   |
//! |------------------------|---------------------------|----------------|
//! | `true`                 | `Boolean(true)`           | `true`         |
//! | `null`                 | `Null`                    | (empty)        |
//! | `"us-east-1"`          | `String("us-east-1")`     | `us-east-1`    |
//! | `42`                   | `Integer(42)`             | `42`           |
//! | `["a", "b"]`           | `List([String, String])`  | `a,b`          |
//! | `{ a = 1 }`            | `RawMap("{ a = 1 }")`     | `{"a":1}`      |
//! | `anything else`        | `String("anything else")` | `anything else` |
//!
//! ### Merging
//!
//! see [merge::merge]
//!
//! Keys are uppercased and prefixed, then merged into the entries already present in the destination file.
//! Entries that are missing from the source are kept.
//!
//! ### Output
//!
//! see [env_file::write_env_file]
//!
//! Keys are written in sorted order below a generated header so that running the sync twice produces the same
//! bytes.
//!
pub mod env_file;
pub mod merge;
pub mod parser;
pub mod scanner;
pub mod sync;
pub mod value;

pub use merge::SyncSummary;
pub use sync::{sync, SyncError, SyncOptions};
pub use value::Value;
