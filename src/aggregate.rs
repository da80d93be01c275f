use log::debug;

use crate::structs::{KeywordRecord, KeywordUrlSets};

/// Result of grouping URLs by keyword.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Keywords with at least one real URL, in first-seen order.
    pub keyword_urls: KeywordUrlSets,
    /// Keywords whose every occurrence lacked a URL, in first-seen order.
    pub unclustered: Vec<String>,
    pub total_rows: usize,
}

impl Aggregation {
    pub fn distinct_keywords(&self) -> usize {
        self.keyword_urls.len() + self.unclustered.len()
    }
}

/// Builds per-keyword URL sets in a single pass over `records`.
///
/// Missing URLs never enter a set; a keyword that only ever appeared without a
/// URL ends up in [`Aggregation::unclustered`].
pub fn aggregate<I>(records: I) -> Aggregation
where
    I: IntoIterator<Item = KeywordRecord>,
{
    let mut seen = KeywordUrlSets::new();
    let mut total_rows = 0;

    for KeywordRecord { keyword, url } in records {
        total_rows += 1;
        let idx = seen.slot(&keyword);
        if let Some(url) = url.filter(|u| !u.is_empty()) {
            seen.insert_url(idx, url);
        }
    }

    let mut keyword_urls = KeywordUrlSets::new();
    let mut unclustered = Vec::new();
    for (keyword, urls) in seen.into_parts() {
        if urls.is_empty() {
            unclustered.push(keyword);
        } else {
            keyword_urls.push(keyword, urls);
        }
    }

    debug!(
        "aggregated {total_rows} rows into {} url-bearing and {} url-less keywords",
        keyword_urls.len(),
        unclustered.len()
    );

    Aggregation {
        keyword_urls,
        unclustered,
        total_rows,
    }
}
