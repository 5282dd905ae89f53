use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use itertools::Itertools;
use tracing::info;

use crate::config::{RawConfig, Reference};
use crate::counts::merge_count_files;
use crate::discovery::discover_samples;
use crate::error::{CustomError, Result};
use crate::inputs::trimmed_reads;
use crate::model::Mode;
use crate::output::{open_output, write_config, write_count_table, write_samples};

/// List the samples and read files found under a FASTQ directory.
#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Directory searched recursively for *_R1_*.fastq.gz files.
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    fastq_dir: PathBuf,
}

/// Resolve a configuration file and print the result as JSON.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON configuration file.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: PathBuf,

    /// FASTQ directory. Overrides `fastqdir` in the configuration.
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    fastq_dir: Option<PathBuf>,

    /// Write the resolved configuration here instead of stdout.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,
}

/// Print the trimmed read files expected for one sample.
#[derive(Args, Debug)]
pub struct InputsArgs {
    #[arg(short, long)]
    sample: String,

    /// "single" or "paired".
    #[arg(short, long)]
    mode: String,
}

/// Inner-join per-sample count files into one table.
#[derive(Args, Debug)]
pub struct MergeCountsArgs {
    /// Merged table path.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    output: PathBuf,

    /// Headerless gene<TAB>count files, one per sample.
    #[arg(required = true)]
    count_files: Vec<PathBuf>,
}

pub fn run_samples(args: &SamplesArgs) -> Result<()> {
    let samples = discover_samples(&args.fastq_dir)?;
    write_samples(&samples, open_output(None)?)
}

fn fastq_dir(args: &ConfigArgs, raw: &RawConfig) -> Result<PathBuf> {
    args.fastq_dir
        .clone()
        .or_else(|| raw.fastqdir.clone())
        .ok_or_else(|| CustomError::ConfigMissingKey {
            key: "fastqdir".to_string(),
        })
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    let mut raw = RawConfig::from_path(&args.config)?;
    let dir = fastq_dir(args, &raw)?;
    let samples = discover_samples(&dir)?;
    raw.fastqdir = Some(dir);

    let config = raw.resolve(&samples)?;
    info!(
        "Resolved metadir={} fasta={} gtf={} mode={}",
        config.metadir().display(),
        config.reference(Reference::Fasta),
        config.reference(Reference::Gtf),
        config.mode()
    );
    write_config(&config, open_output(args.output.as_deref())?)?;
    if let Some(path) = &args.output {
        info!("Wrote resolved configuration to {}", path.display());
    }
    Ok(())
}

pub fn run_inputs(args: &InputsArgs) -> Result<()> {
    let mode: Mode = args.mode.parse()?;
    let reads = trimmed_reads(&args.sample, mode);
    let mut out = open_output(None)?;
    writeln!(out, "{}", reads.iter().map(|p| p.display()).join("\n"))
        .and_then(|_| out.flush())
        .map_err(|e| CustomError::Write {
            source: e,
            path: PathBuf::from("<stdout>"),
        })?;
    Ok(())
}

pub fn run_merge_counts(args: &MergeCountsArgs, show_progress: bool) -> Result<()> {
    info!("Merging {} count file(s)...", args.count_files.len());
    let table = merge_count_files(&args.count_files, show_progress)?;
    write_count_table(&table, &args.output)?;
    info!("Wrote merged counts to {}", args.output.display());
    Ok(())
}
