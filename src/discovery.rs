use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{CustomError, Result};
use crate::model::Samples;

pub const MATE1_MARKER: &str = "_R1_";
pub const MATE2_MARKER: &str = "_R2_";
const MATE1_PATTERN: &str = "**/*_R1_*.fastq.gz";

/// Scan `fastq_dir` at any depth for mate-1 FASTQ files and group them by sample.
///
/// The sample name is the part of the file name before its first underscore.
/// Every mate-1 file contributes a mate-2 path whether or not it exists, so
/// that mode inference can check for it later. Lanes of the same sample are
/// kept in glob order, which is sorted.
pub fn discover_samples(fastq_dir: impl AsRef<Path>) -> Result<Samples> {
    let root = fastq_dir.as_ref();
    if !root.is_dir() {
        return Err(CustomError::FastqDirNotFound {
            path: root.to_path_buf(),
        });
    }

    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        MATE1_PATTERN
    );
    let entries = glob::glob(&pattern).map_err(|source| CustomError::GlobPattern {
        source,
        pattern: pattern.clone(),
    })?;

    let mut samples = Samples::new();
    for entry in entries {
        let r1 = entry.map_err(|source| CustomError::Glob {
            source,
            path: root.to_path_buf(),
        })?;
        if !r1.is_file() {
            continue;
        }
        let Some(name) = sample_name(&r1) else {
            continue;
        };
        let r2 = mate2_path(&r1);
        debug!("{name}: {} -> {}", r1.display(), r2.display());

        let sample = samples.entry(name).or_default();
        sample.r1.push(r1);
        sample.r2.push(r2);
    }

    if samples.is_empty() {
        return Err(CustomError::NoReadFiles {
            path: root.to_path_buf(),
        });
    }
    info!(
        "Found {} sample(s) under {}",
        samples.len(),
        root.display()
    );
    Ok(samples)
}

fn sample_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    file_name.split('_').next().map(str::to_string)
}

pub(crate) fn mate2_path(r1: &Path) -> PathBuf {
    PathBuf::from(r1.to_string_lossy().replace(MATE1_MARKER, MATE2_MARKER))
}
