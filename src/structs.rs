use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Group id reserved for keywords that never appeared with a URL.
pub const UNCLUSTERED_GROUP: i64 = -1;

/// One input row. `url` is `None` when the field was empty or a missing-value token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordRecord {
    pub keyword: String,
    pub url: Option<String>,
}

impl KeywordRecord {
    pub fn new(keyword: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            keyword: keyword.into(),
            url: url.map(str::to_owned),
        }
    }
}

pub type UrlSet = AHashSet<String>;

/// Keyword -> distinct URL set, iterated in the order keywords were first seen.
#[derive(Debug, Clone, Default)]
pub struct KeywordUrlSets {
    keywords: Vec<String>,
    urls: Vec<UrlSet>,
    index: AHashMap<String, usize>,
}

impl KeywordUrlSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of `keyword`, registering it with an empty set if unseen.
    pub(crate) fn slot(&mut self, keyword: &str) -> usize {
        if let Some(&idx) = self.index.get(keyword) {
            return idx;
        }
        let idx = self.keywords.len();
        self.keywords.push(keyword.to_owned());
        self.urls.push(UrlSet::default());
        self.index.insert(keyword.to_owned(), idx);
        idx
    }

    pub(crate) fn insert_url(&mut self, idx: usize, url: String) {
        self.urls[idx].insert(url);
    }

    pub(crate) fn push(&mut self, keyword: String, urls: UrlSet) {
        self.index.insert(keyword.clone(), self.keywords.len());
        self.keywords.push(keyword);
        self.urls.push(urls);
    }

    pub fn get(&self, keyword: &str) -> Option<&UrlSet> {
        self.index.get(keyword).map(|&idx| &self.urls[idx])
    }

    pub fn keyword(&self, idx: usize) -> &str {
        &self.keywords[idx]
    }

    pub fn urls(&self, idx: usize) -> &UrlSet {
        &self.urls[idx]
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UrlSet)> {
        self.keywords
            .iter()
            .map(String::as_str)
            .zip(self.urls.iter())
    }

    pub(crate) fn into_parts(self) -> impl Iterator<Item = (String, UrlSet)> {
        self.keywords.into_iter().zip(self.urls)
    }
}

/// Final output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    #[serde(rename = "Group")]
    pub group: i64,
    #[serde(rename = "Keyword")]
    pub keyword: String,
}

impl ClusterAssignment {
    pub fn new(group: i64, keyword: impl Into<String>) -> Self {
        Self {
            group,
            keyword: keyword.into(),
        }
    }

    pub fn is_unclustered(&self) -> bool {
        self.group == UNCLUSTERED_GROUP
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub total_rows: usize,
    pub distinct_keywords: usize,
    pub clustered_keywords: usize,
    pub unclustered_keywords: usize,
    pub clusters: usize,
    pub singleton_clusters: usize,
    pub largest_cluster: usize,
}
