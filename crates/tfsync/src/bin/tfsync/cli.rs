//! tfsync cli interface

use clap::{Args, Parser, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if started in this directory
    ///
    /// Repeat to descend further, each path is resolved against the previous one.
    #[clap(short = 'C', long = "directory")]
    pub directory: Vec<PathBuf>,

    #[clap(flatten)]
    pub sync: SyncArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Terraform variables file to read
    #[clap(long = "tfvars", default_value = "bootstrap/terraform.tfvars")]
    pub tfvars: PathBuf,

    /// Environment file to merge into
    #[clap(long = "env", default_value = ".env")]
    pub env: PathBuf,

    /// Prefix for environment variable names
    #[clap(long = "prefix", default_value = "")]
    pub prefix: String,

    /// Use the TF_VAR_ prefix (for terraform input variables)
    #[clap(long = "tf-var-prefix", conflicts_with("prefix"))]
    pub tf_var_prefix: bool,

    /// Replace the environment file instead of merging with it
    #[clap(long = "overwrite")]
    pub overwrite: bool,

    /// Fail when a list or map is never closed
    #[clap(long = "strict")]
    pub strict: bool,

    /// Do not write the generated comment header
    #[clap(long = "no-header")]
    pub no_header: bool,
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// How to print the summary
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
