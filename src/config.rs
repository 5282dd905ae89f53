use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{CustomError, Result};
use crate::model::{Mode, ModeSetting, Samples};

/// Reference files looked up inside the metadata directory.
///
/// The configuration key doubles as the file extension searched for when the
/// key is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Fasta,
    Gtf,
}

impl Reference {
    pub fn key(self) -> &'static str {
        match self {
            Reference::Fasta => "fasta",
            Reference::Gtf => "gtf",
        }
    }
}

/// Configuration as written by the user, before anything is resolved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    pub metadir: Option<PathBuf>,
    pub fasta: Option<String>,
    pub gtf: Option<String>,
    pub mode: Option<String>,
    pub fastqdir: Option<PathBuf>,
    /// Keys meant for the workflow engine; passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully resolved configuration. Produced once by [`RawConfig::resolve`].
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    metadir: PathBuf,
    fasta: String,
    gtf: String,
    mode: Mode,
    #[serde(skip_serializing_if = "Option::is_none")]
    fastqdir: Option<PathBuf>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Config {
    pub fn metadir(&self) -> &Path {
        &self.metadir
    }

    /// File name of the reference, relative to [`Config::metadir`].
    pub fn reference(&self, reference: Reference) -> &str {
        match reference {
            Reference::Fasta => &self.fasta,
            Reference::Gtf => &self.gtf,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}

impl RawConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| CustomError::ReadWithPath {
            source: e,
            path: path.to_path_buf(),
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| CustomError::ConfigParse {
            source: e,
            path: path.to_path_buf(),
        })
    }

    pub fn metadir(&self) -> Result<PathBuf> {
        let metadir = self
            .metadir
            .as_ref()
            .ok_or_else(|| CustomError::ConfigMissingKey {
                key: "metadir".to_string(),
            })?;
        if !metadir.is_dir() {
            return Err(CustomError::MetadirNotDirectory {
                path: metadir.clone(),
            });
        }
        Ok(metadir.clone())
    }

    fn explicit_reference(&self, reference: Reference) -> Option<&str> {
        match reference {
            Reference::Fasta => self.fasta.as_deref(),
            Reference::Gtf => self.gtf.as_deref(),
        }
    }

    /// Path of a reference file inside the metadata directory.
    ///
    /// An explicit value is joined onto `metadir` without checking that the
    /// file exists. Otherwise the lexicographically smallest `*.<key>` file in
    /// `metadir` is used.
    pub fn reference_file(&self, reference: Reference) -> Result<PathBuf> {
        let metadir = self.metadir()?;
        if let Some(name) = self.explicit_reference(reference) {
            return Ok(metadir.join(name));
        }

        let pattern = format!(
            "{}/*.{}",
            glob::Pattern::escape(&metadir.to_string_lossy()),
            reference.key()
        );
        let entries = glob::glob(&pattern).map_err(|source| CustomError::GlobPattern {
            source,
            pattern: pattern.clone(),
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| CustomError::Glob {
                source,
                path: metadir.clone(),
            })?;
            if path.is_file() {
                candidates.push(path);
            }
        }
        if candidates.len() > 1 {
            debug!(
                "{} candidate {} files in {}",
                candidates.len(),
                reference.key(),
                metadir.display()
            );
        }

        candidates
            .into_iter()
            .min()
            .ok_or_else(|| CustomError::ReferenceNotFound {
                key: reference.key().to_string(),
                metadir,
            })
    }

    pub fn mode_setting(&self) -> Result<ModeSetting> {
        match &self.mode {
            Some(value) => value.parse(),
            None => Ok(ModeSetting::default()),
        }
    }

    /// Decide the run's sequencing mode.
    ///
    /// With `auto`, a single missing mate-2 file anywhere makes the whole run
    /// single-end.
    pub fn infer_mode(&self, samples: &Samples) -> Result<Mode> {
        match self.mode_setting()? {
            ModeSetting::Fixed(mode) => Ok(mode),
            ModeSetting::Auto => {
                if samples.is_empty() {
                    return Err(CustomError::EmptySampleSet);
                }
                let missing = samples
                    .iter()
                    .flat_map(|(name, sample)| sample.r2.iter().map(move |r2| (name, r2)))
                    .find(|(_, r2)| !r2.exists());
                match missing {
                    Some((name, r2)) => {
                        info!(
                            "Mate file {} of sample {name} not found; running single-end",
                            r2.display()
                        );
                        Ok(Mode::Single)
                    }
                    None => Ok(Mode::Paired),
                }
            }
        }
    }

    /// Resolve every derived value, stopping at the first failure.
    pub fn resolve(self, samples: &Samples) -> Result<Config> {
        let metadir = self.metadir()?;
        let fasta = self.reference_name(Reference::Fasta)?;
        let gtf = self.reference_name(Reference::Gtf)?;
        let mode = self.infer_mode(samples)?;

        Ok(Config {
            metadir,
            fasta,
            gtf,
            mode,
            fastqdir: self.fastqdir,
            extra: self.extra,
        })
    }

    fn reference_name(&self, reference: Reference) -> Result<String> {
        let path = self.reference_file(reference)?;
        if !path.exists() {
            warn!("{} file {} does not exist", reference.key(), path.display());
        }
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| CustomError::InvalidReferenceName {
                key: reference.key().to_string(),
                value: self
                    .explicit_reference(reference)
                    .unwrap_or_default()
                    .to_string(),
            })
    }
}
