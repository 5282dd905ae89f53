use crate::error::{CustomError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Sequencing layout of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Single,
    Paired,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Single => "single",
            Mode::Paired => "paired",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = CustomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "single" => Ok(Mode::Single),
            "paired" => Ok(Mode::Paired),
            other => Err(CustomError::InvalidMode {
                value: other.to_string(),
                expected: "single, paired".to_string(),
            }),
        }
    }
}

/// The `mode` configuration value before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeSetting {
    #[default]
    Auto,
    Fixed(Mode),
}

impl FromStr for ModeSetting {
    type Err = CustomError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "auto" => Ok(ModeSetting::Auto),
            "single" => Ok(ModeSetting::Fixed(Mode::Single)),
            "paired" => Ok(ModeSetting::Fixed(Mode::Paired)),
            other => Err(CustomError::InvalidMode {
                value: other.to_string(),
                expected: "single, paired, auto".to_string(),
            }),
        }
    }
}

/// Read files belonging to one sample, one list per mate.
///
/// Mate-2 paths are derived from their mate-1 counterpart and may not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sample {
    pub r1: Vec<PathBuf>,
    pub r2: Vec<PathBuf>,
}

pub type Samples = BTreeMap<String, Sample>;
