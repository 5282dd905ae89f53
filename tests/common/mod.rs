#![allow(dead_code)]

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub const SAMPLES: [&str; 2] = ["S1", "S2"];

#[derive(Clone, Copy)]
pub enum Layout {
    Paired,
    SingleEnd,
}

pub struct Dataset {
    pub base_dir: PathBuf,
    pub fastq_dir: PathBuf,
    pub meta_dir: PathBuf,
    pub config: PathBuf,
}

fn base_dir(label: &str) -> io::Result<PathBuf> {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let base_dir = std::env::temp_dir().join("rnaprep-tests").join(format!(
        "{}-{}-{}",
        std::process::id(),
        id,
        label
    ));
    if base_dir.exists() {
        fs::remove_dir_all(&base_dir)?;
    }
    fs::create_dir_all(&base_dir)?;
    Ok(base_dir)
}

/// Two samples, S1 sequenced on two lanes in separate run folders.
/// Mate-2 files are only written for the paired layout.
pub fn create_dataset(layout: Layout, label: &str) -> io::Result<Dataset> {
    let base_dir = base_dir(label)?;
    let fastq_dir = base_dir.join("fastq");
    let meta_dir = base_dir.join("meta");

    let reads = [
        ("run1", "S1_S1_L001"),
        ("run2", "S1_S1_L002"),
        ("run1", "S2_S2_L001"),
    ];
    for (run, stem) in reads {
        let dir = fastq_dir.join(run);
        fs::create_dir_all(&dir)?;
        File::create(dir.join(format!("{stem}_R1_001.fastq.gz")))?;
        if let Layout::Paired = layout {
            File::create(dir.join(format!("{stem}_R2_001.fastq.gz")))?;
        }
    }

    fs::create_dir_all(&meta_dir)?;
    File::create(meta_dir.join("GRCh38.fasta"))?;
    File::create(meta_dir.join("gencode.gtf"))?;

    let config = base_dir.join("config.json");
    write_config(&config, &meta_dir, None)?;

    Ok(Dataset {
        base_dir,
        fastq_dir,
        meta_dir,
        config,
    })
}

pub fn write_config(path: &Path, meta_dir: &Path, mode: Option<&str>) -> io::Result<()> {
    let mut value = serde_json::json!({
        "metadir": meta_dir,
        "threads": 4,
    });
    if let Some(mode) = mode {
        value["mode"] = serde_json::Value::from(mode);
    }
    let mut file = File::create(path)?;
    writeln!(file, "{value}")?;
    Ok(())
}

/// Per-sample count files sharing genes g1 and g2, each with one private gene.
pub fn create_count_files(label: &str) -> io::Result<(Vec<PathBuf>, PathBuf)> {
    let base_dir = base_dir(label)?;
    let mut paths = Vec::new();
    for (i, sample) in ["A", "B", "C"].iter().enumerate() {
        let path = base_dir.join(format!("{sample}.counts"));
        let mut file = File::create(&path)?;
        writeln!(file, "g1\t{}", i + 1)?;
        writeln!(file, "private_{sample}\t100")?;
        writeln!(file, "g2\t{}", (i + 1) * 10)?;
        paths.push(path);
    }
    Ok((paths, base_dir.join("merged.tsv")))
}
