use std::path::PathBuf;

use crate::model::Mode;

const TRIMMED_DIR: &str = "trimmed";

/// Trimmed read files a work unit expects for `sample`.
///
/// The sample identifier is used verbatim.
pub fn trimmed_reads(sample: &str, mode: Mode) -> Vec<PathBuf> {
    let dir = PathBuf::from(TRIMMED_DIR).join(mode.as_str());
    let mut reads = vec![dir.join(format!("{sample}_R1.fastq"))];
    if mode == Mode::Paired {
        reads.push(dir.join(format!("{sample}_R2.fastq")));
    }
    reads
}
