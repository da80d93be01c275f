use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use ahash::AHashSet;
use indicatif::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SimilarityThreshold;
use crate::error::Result;
use crate::structs::{KeywordUrlSets, UrlSet};

/// `|a ∩ b| / |a ∪ b|`.
///
/// # Panics
///
/// Panics if both sets are empty. Url-less keywords are filtered out before
/// clustering, so reaching that case is a bug in the caller.
pub fn jaccard_similarity(a: &UrlSet, b: &UrlSet) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|url| large.contains(*url)).count();
    let union = a.len() + b.len() - intersection;
    assert!(union > 0, "jaccard similarity of two empty url sets");
    intersection as f64 / union as f64
}

/// Keywords sharing one group id, in the order they joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    pub keywords: Vec<String>,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Greedy first-fit single-link clusterer.
///
/// Each keyword, in processing order, joins the first existing cluster that
/// holds *any* member with a Jaccard score of at least the threshold, or opens
/// a new cluster at the end of the list. Clusters are never merged, so two
/// members of a cluster may be less similar than the threshold when they were
/// linked through a third keyword.
#[derive(Clone)]
pub struct Clusterer {
    threshold: SimilarityThreshold,
    progress: ProgressBar,
}

impl Clusterer {
    pub fn new(threshold: SimilarityThreshold) -> Self {
        Self {
            threshold,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn threshold(&self) -> SimilarityThreshold {
        self.threshold
    }

    pub fn cluster(&self, keyword_urls: &KeywordUrlSets) -> Vec<Cluster> {
        let threshold = self.threshold.value();
        // members are indices into `keyword_urls`
        let mut clusters: Vec<Vec<usize>> = Vec::new();

        self.progress.set_length(keyword_urls.len() as u64);
        for idx in 0..keyword_urls.len() {
            let urls = keyword_urls.urls(idx);
            debug_assert!(!urls.is_empty(), "url-less keyword reached the clusterer");

            let home = clusters.iter_mut().find(|members| {
                members
                    .iter()
                    .any(|&other| jaccard_similarity(urls, keyword_urls.urls(other)) >= threshold)
            });
            match home {
                Some(members) => members.push(idx),
                None => clusters.push(vec![idx]),
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        info!(
            "formed {} clusters from {} keywords at threshold {}",
            clusters.len(),
            keyword_urls.len(),
            self.threshold
        );

        clusters
            .into_iter()
            .enumerate()
            .map(|(id, members)| Cluster {
                id,
                keywords: members
                    .into_iter()
                    .map(|idx| keyword_urls.keyword(idx).to_owned())
                    .collect(),
            })
            .collect()
    }
}

/// Per-cluster summary written next to the assignment file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub(crate) id: usize,
    pub(crate) keywords: Vec<String>,
    pub(crate) size: usize,
    pub(crate) distinct_urls: usize,
    pub(crate) min_urls: usize,
    pub(crate) max_urls: usize,
    pub(crate) avg_urls: f64,
}

impl ClusterInfo {
    pub fn from_cluster(cluster: &Cluster, keyword_urls: &KeywordUrlSets) -> Self {
        let sets: Vec<&UrlSet> = cluster
            .keywords
            .iter()
            .filter_map(|kw| keyword_urls.get(kw))
            .collect();
        let sizes: Vec<usize> = sets.iter().map(|s| s.len()).collect();
        let distinct_urls = sets
            .iter()
            .flat_map(|s| s.iter())
            .collect::<AHashSet<_>>()
            .len();
        let avg_urls = if sizes.is_empty() {
            0.0
        } else {
            sizes.iter().sum::<usize>() as f64 / sizes.len() as f64
        };

        Self {
            id: cluster.id,
            keywords: cluster.keywords.clone(),
            size: cluster.len(),
            distinct_urls,
            min_urls: sizes.iter().copied().min().unwrap_or(0),
            max_urls: sizes.iter().copied().max().unwrap_or(0),
            avg_urls,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn distinct_urls(&self) -> usize {
        self.distinct_urls
    }

    pub fn summarize(clusters: &[Cluster], keyword_urls: &KeywordUrlSets) -> Vec<ClusterInfo> {
        clusters
            .par_iter()
            .map(|cluster| ClusterInfo::from_cluster(cluster, keyword_urls))
            .collect()
    }

    pub(crate) fn save_cluster_info(
        cluster_data: &[ClusterInfo],
        output_path: &Path,
    ) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = BufWriter::new(File::create(output_path)?);
        serde_json::to_writer_pretty(file, cluster_data)?;
        debug!(
            "wrote {} cluster summaries to {}",
            cluster_data.len(),
            output_path.display()
        );
        Ok(())
    }
}
