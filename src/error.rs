use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required path is missing or a search found nothing.
    NotFound,
    /// A configuration value is missing, malformed or out of range.
    Config,
    Io,
}

impl ErrorKind {
    /// Process exit status reported for a failed command.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Io => 1,
            ErrorKind::NotFound => 3,
            ErrorKind::Config => 4,
        }
    }
}

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("could not read {path}")]
    ReadWithPath {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("could not read {path}")]
    CsvRead {
        #[source]
        source: csv::Error,
        path: PathBuf,
    },

    #[error("could not write TSV output")]
    CsvWrite(#[from] csv::Error),

    #[error("could not write JSON output")]
    JsonWrite {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid glob pattern {pattern:?}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
        pattern: String,
    },

    #[error("could not list {path}")]
    Glob {
        #[source]
        source: glob::GlobError,
        path: PathBuf,
    },

    #[error("FASTQ directory {path} does not exist")]
    FastqDirNotFound { path: PathBuf },

    #[error("no *_R1_*.fastq.gz files found under {path}")]
    NoReadFiles { path: PathBuf },

    #[error("cannot infer sequencing mode from an empty sample set")]
    EmptySampleSet,

    #[error("could not parse configuration file {path}")]
    ConfigParse {
        #[source]
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("`{key}` not defined in the configuration")]
    ConfigMissingKey { key: String },

    #[error("`metadir` does not point to a directory: {path}")]
    MetadirNotDirectory { path: PathBuf },

    #[error("could not find any {key} files in the {metadir} directory")]
    ReferenceNotFound { key: String, metadir: PathBuf },

    #[error("`{key}` value {value:?} does not name a file")]
    InvalidReferenceName { key: String, value: String },

    #[error("invalid mode {value:?} (expected one of: {expected})")]
    InvalidMode { value: String, expected: String },

    #[error("expected {expected} fields (got {n_fields}) in line {line_num} of {path}")]
    CountFields {
        path: PathBuf,
        line_num: usize,
        n_fields: usize,
        expected: usize,
    },

    #[error("could not parse count {value:?} in line {line_num} of {path}")]
    CountValue {
        #[source]
        source: std::num::ParseIntError,
        path: PathBuf,
        line_num: usize,
        value: String,
    },

    #[error("gene {gene} appears more than once in {path}")]
    DuplicateGene { gene: String, path: PathBuf },

    #[error("{path} contains no counts")]
    EmptyCountFile { path: PathBuf },

    #[error("sample {sample} from {path} is already in the merged table")]
    DuplicateSample { sample: String, path: PathBuf },

    #[error("no count files to merge")]
    NoCountFiles,
}

impl CustomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustomError::FastqDirNotFound { .. }
            | CustomError::NoReadFiles { .. }
            | CustomError::EmptySampleSet => ErrorKind::NotFound,
            CustomError::ConfigParse { .. }
            | CustomError::ConfigMissingKey { .. }
            | CustomError::MetadirNotDirectory { .. }
            | CustomError::ReferenceNotFound { .. }
            | CustomError::InvalidReferenceName { .. }
            | CustomError::InvalidMode { .. } => ErrorKind::Config,
            _ => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, CustomError>;
