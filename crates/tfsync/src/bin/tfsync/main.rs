mod cli;

use anyhow::Context;
use std::path::PathBuf;
use tfsync::{SyncOptions, SyncSummary};

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("TFSYNC_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let result = enter_directories(&cli.directory).and_then(|()| run(&cli.sync, &cli.output));
    if let Err(e) = result {
        for error in e.chain() {
            eprintln!("{error}")
        }
        std::process::exit(1);
    }
}

/// Apply each `-C` in turn, relative ones resolve against the previous directory
fn enter_directories(directories: &[PathBuf]) -> anyhow::Result<()> {
    for directory in directories {
        let resolved = directory
            .canonicalize()
            .with_context(|| format!("Cannot resolve -C/--directory {}", directory.display()))?;
        std::env::set_current_dir(&resolved)
            .with_context(|| format!("Cannot enter directory {}", resolved.display()))?;

        tracing::info!(directory = %resolved.display(), "working directory changed");
    }

    Ok(())
}

fn run(args: &cli::SyncArgs, output: &cli::OutputArgs) -> anyhow::Result<()> {
    let prefix = if args.tf_var_prefix {
        tfsync::sync::TF_VAR_PREFIX
    } else {
        args.prefix.as_str()
    };

    let options = SyncOptions::new()
        .with_prefix(prefix)
        .with_overwrite(args.overwrite)
        .with_strict(args.strict)
        .with_header(!args.no_header);

    let summary = tfsync::sync(&args.tfvars, &args.env, &options)?;

    print_summary(args, output, &summary)
}

fn print_summary(
    args: &cli::SyncArgs,
    output: &cli::OutputArgs,
    summary: &SyncSummary,
) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Text => {
            println!("Synced {} into {}", args.tfvars.display(), args.env.display());
            println!("   - New variables: {}", summary.new_count);
            println!("   - Updated variables: {}", summary.updated_count);
            println!("   - Total variables: {}", summary.total_count);
        }
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), summary)?;
            println!();
        }
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), summary)?,
    };

    Ok(())
}
