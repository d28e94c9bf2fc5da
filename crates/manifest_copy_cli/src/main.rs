//! `manifest-copy` binary: copy files based on the contents of a CSV file.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use manifest_copy::{SpecManifestCopyOptions, copy_manifest};

#[derive(Debug, Parser)]
#[command(
    name = "manifest-copy",
    version,
    about = "Copy files based on the contents of a CSV file"
)]
struct Cli {
    /// CSV file specifying files to copy.
    csv_file: PathBuf,
    /// Source directory.
    source_dir: PathBuf,
    /// Target directory.
    target_dir: PathBuf,
    /// Column to read from the CSV file.
    #[arg(short = 'c', long, default_value = "filename")]
    column_name: String,
    /// Suppress program output.
    #[arg(short, long)]
    quiet: bool,
    /// Overwrite file if it already exists in destination (default: skip file).
    #[arg(short, long)]
    overwrite: bool,
    /// Don't copy files, just print what would've been copied.
    #[arg(long)]
    dry_run: bool,
}

fn print_config_echo(cli: &Cli) {
    println!("CSV file: \"{}\"", cli.csv_file.display());
    println!("Column to read: \"{}\"", cli.column_name);
    println!("Source directory: \"{}\"", cli.source_dir.display());
    println!("Destination directory: \"{}\"", cli.target_dir.display());
    println!("Overwrite existing: {}", cli.overwrite);
    println!("Dry Run: {}", cli.dry_run);
    println!();
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.quiet {
        print_config_echo(&cli);
    }

    let spec_mc_options = SpecManifestCopyOptions {
        c_column: cli.column_name.clone(),
        if_overwrite: cli.overwrite,
        if_quiet: cli.quiet,
        if_dry_run: cli.dry_run,
    };
    let report = copy_manifest(&cli.csv_file, &cli.source_dir, &cli.target_dir, spec_mc_options)?;

    tracing::debug!("{report}");
    if !cli.quiet {
        println!();
        print!("{}", report.format_summary());
    }
    Ok(())
}
