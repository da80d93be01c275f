use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use log::{debug, info};

use crate::config::ClusterConfig;
use crate::error::{ClusterError, Result};
use crate::structs::KeywordRecord;
use crate::utils::is_missing_value;

/// Reads keyword/url rows out of a delimited file with a header line.
pub struct DatasetLoader {
    dataset_path: PathBuf,
    separator: u8,
    keyword_col: String,
    url_col: String,
}

impl DatasetLoader {
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        let config = ClusterConfig::default();
        Self {
            dataset_path: dataset_path.into(),
            separator: config.separator,
            keyword_col: config.keyword_col,
            url_col: config.url_col,
        }
    }

    pub fn from_config(dataset_path: impl Into<PathBuf>, config: &ClusterConfig) -> Self {
        Self {
            dataset_path: dataset_path.into(),
            separator: config.separator,
            keyword_col: config.keyword_col.clone(),
            url_col: config.url_col.clone(),
        }
    }

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Loads every row. Column names are resolved before any row is read.
    pub fn load_records(&self) -> Result<Vec<KeywordRecord>> {
        let file = File::open(&self.dataset_path)?;
        let records = self.read_records(file)?;
        info!(
            "loaded {} rows from {}",
            records.len(),
            self.dataset_path.display()
        );
        Ok(records)
    }

    pub(crate) fn read_records<R: Read>(&self, reader: R) -> Result<Vec<KeywordRecord>> {
        // short rows are padded with missing values, long rows are rejected below
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.separator)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let idx_keyword = column_index(&headers, &self.keyword_col)?;
        let idx_url = column_index(&headers, &self.url_col)?;

        let mut records = Vec::new();
        let mut row = StringRecord::new();
        while rdr.read_record(&mut row)? {
            let line = row.position().map_or(0, |p| p.line());
            if row.len() > headers.len() {
                return Err(ClusterError::RaggedRow {
                    line,
                    found: row.len(),
                    expected: headers.len(),
                });
            }
            let Some(keyword) = row.get(idx_keyword) else {
                return Err(ClusterError::MissingKeyword { line });
            };
            let url = row.get(idx_url).filter(|url| !is_missing_value(url));
            if url.is_none() {
                debug!("line {line}: keyword {keyword:?} has no url");
            }
            records.push(KeywordRecord::new(keyword, url));
        }
        Ok(records)
    }
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ClusterError::UnknownColumn {
            name: name.to_owned(),
            available: headers.iter().map(str::to_owned).collect(),
        })
}
