use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ClusterError, Result};

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;
pub const DEFAULT_KEYWORD_COL: &str = "Keyword";
pub const DEFAULT_URL_COL: &str = "URL";

/// Jaccard threshold, guaranteed finite and within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SimilarityThreshold(f64);

impl SimilarityThreshold {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(ClusterError::InvalidThreshold {
                value: value.to_string(),
                reason: "not a number",
            });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(ClusterError::InvalidThreshold {
                value: value.to_string(),
                reason: "must lie in [0, 1]",
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        Self(DEFAULT_SIMILARITY_THRESHOLD)
    }
}

impl TryFrom<f64> for SimilarityThreshold {
    type Error = ClusterError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SimilarityThreshold> for f64 {
    fn from(threshold: SimilarityThreshold) -> Self {
        threshold.0
    }
}

impl FromStr for SimilarityThreshold {
    type Err = ClusterError;

    fn from_str(s: &str) -> Result<Self> {
        let Ok(value) = s.trim().parse::<f64>() else {
            return Err(ClusterError::InvalidThreshold {
                value: s.to_owned(),
                reason: "not a number",
            });
        };
        Self::new(value)
    }
}

impl fmt::Display for SimilarityThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything a clustering run needs to know about its input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    pub similarity_threshold: SimilarityThreshold,
    pub keyword_col: String,
    pub url_col: String,
    pub separator: u8,
    pub show_progress: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: SimilarityThreshold::default(),
            keyword_col: DEFAULT_KEYWORD_COL.to_owned(),
            url_col: DEFAULT_URL_COL.to_owned(),
            separator: b',',
            show_progress: true,
        }
    }
}

impl ClusterConfig {
    pub fn with_threshold(mut self, threshold: SimilarityThreshold) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_columns(
        mut self,
        keyword_col: impl Into<String>,
        url_col: impl Into<String>,
    ) -> Self {
        self.keyword_col = keyword_col.into();
        self.url_col = url_col.into();
        self
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

/// Parses a delimiter argument. Accepts any single-byte character plus the `\t` escape.
pub fn parse_separator(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 => Ok(s.as_bytes()[0]),
        s => Err(ClusterError::InvalidSeparator(s.to_owned())),
    }
}
