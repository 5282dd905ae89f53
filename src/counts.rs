use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::error::{CustomError, Result};

pub const GENE_ID_HEADER: &str = "EnsembleID";
const COUNT_FIELDS: usize = 2;

/// Gene-by-sample count matrix. Row order follows the first table merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    samples: Vec<String>,
    rows: Vec<(String, Vec<i64>)>,
}

impl CountTable {
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn rows(&self) -> &[(String, Vec<i64>)] {
        &self.rows
    }

    pub fn n_genes(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a headerless `gene<TAB>count` file as a one-sample table named
    /// after the file stem.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let sample = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|source| CustomError::CsvRead {
                source,
                path: path.to_path_buf(),
            })?;

        let mut seen = HashSet::new();
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|source| CustomError::CsvRead {
                source,
                path: path.to_path_buf(),
            })?;
            let line_num = record
                .position()
                .map_or(idx + 1, |pos| pos.line() as usize);
            if record.len() != COUNT_FIELDS {
                return Err(CustomError::CountFields {
                    path: path.to_path_buf(),
                    line_num,
                    n_fields: record.len(),
                    expected: COUNT_FIELDS,
                });
            }

            let gene = record[0].trim().to_string();
            let value = record[1].trim();
            let count: i64 = value.parse().map_err(|e| CustomError::CountValue {
                source: e,
                path: path.to_path_buf(),
                line_num,
                value: value.to_string(),
            })?;
            if !seen.insert(gene.clone()) {
                return Err(CustomError::DuplicateGene {
                    gene,
                    path: path.to_path_buf(),
                });
            }
            rows.push((gene, vec![count]));
        }
        if rows.is_empty() {
            return Err(CustomError::EmptyCountFile {
                path: path.to_path_buf(),
            });
        }
        debug!("{}: {} genes", path.display(), rows.len());

        Ok(Self {
            samples: vec![sample],
            rows,
        })
    }

    /// Keep only genes present in both tables, appending `other`'s columns.
    pub fn inner_join(mut self, other: CountTable) -> Self {
        let lookup: HashMap<String, Vec<i64>> = other.rows.into_iter().collect();
        self.rows.retain_mut(|(gene, counts)| match lookup.get(gene) {
            Some(values) => {
                counts.extend_from_slice(values);
                true
            }
            None => false,
        });
        self.samples.extend(other.samples);
        self
    }
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} count files")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Read every count file and inner-join them in the order given.
///
/// Sample names come from file stems and must be unique across `paths`.
pub fn merge_count_files(paths: &[PathBuf], show_progress: bool) -> Result<CountTable> {
    let pb = progress_bar(paths.len(), show_progress);

    let mut names = HashSet::new();
    let mut merged: Option<CountTable> = None;
    for path in paths {
        let table = CountTable::from_path(path)?;
        for sample in table.samples() {
            if !names.insert(sample.clone()) {
                return Err(CustomError::DuplicateSample {
                    sample: sample.clone(),
                    path: path.clone(),
                });
            }
        }
        merged = Some(match merged {
            None => table,
            Some(acc) => {
                let was_empty = acc.is_empty();
                let joined = acc.inner_join(table);
                if joined.is_empty() && !was_empty {
                    warn!(
                        "No genes left after joining {}; the merged table will be empty",
                        path.display()
                    );
                }
                joined
            }
        });
        pb.inc(1);
    }
    pb.abandon();

    let merged = merged.ok_or(CustomError::NoCountFiles)?;
    info!(
        "Merged {} sample(s) over {} shared gene(s)",
        merged.samples().len(),
        merged.n_genes()
    );
    Ok(merged)
}
