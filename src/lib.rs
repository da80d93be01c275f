mod aggregate;
mod assignment;
mod cluster;
mod config;
mod dataloader;
mod error;
mod process_dataset;
mod structs;
mod utils;
pub use aggregate::{Aggregation, aggregate};
pub use assignment::{assemble, statistics, to_csv_bytes, write_assignments};
pub use cluster::{Cluster, ClusterInfo, Clusterer, jaccard_similarity};
pub use config::{
    ClusterConfig, DEFAULT_KEYWORD_COL, DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_URL_COL,
    SimilarityThreshold, parse_separator,
};
pub use dataloader::DatasetLoader;
pub use error::{ClusterError, Result};
pub use process_dataset::{ClusterOutcome, KeywordClusterProcessor, print_statistics_report};
pub use structs::{
    ClusterAssignment, DatasetStatistics, KeywordRecord, KeywordUrlSets, UNCLUSTERED_GROUP, UrlSet,
};
