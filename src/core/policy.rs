use serde::{Deserialize, Serialize};
use std::fmt;

/// What a failed service call does to the slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Record the error message in the slice.
    #[default]
    Production,
    /// Log the error and apply local data as if the call had succeeded.
    Development,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Production => write!(f, "production"),
            Mode::Development => write!(f, "development"),
        }
    }
}

/// How an added entity gets its id when the server did not assign one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Last entity's id + 1, or 1 for an empty list.
    #[default]
    LastPlusOne,
    /// Highest id the slice has ever held + 1; never reuses deleted ids.
    Monotonic,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPolicy {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub id_policy: IdPolicy,
}

impl SyncPolicy {
    pub fn development() -> Self {
        Self {
            mode: Mode::Development,
            ..Self::default()
        }
    }

    pub fn production() -> Self {
        Self::default()
    }

    pub fn with_id_policy(mut self, id_policy: IdPolicy) -> Self {
        self.id_policy = id_policy;
        self
    }
}
