use std::path::Path;
use std::time::Instant;

use indicatif::ProgressIterator;
use log::info;
use num_format::{Locale, ToFormattedString};

use crate::aggregate::aggregate;
use crate::assignment::{assemble, statistics, write_assignments};
use crate::cluster::{ClusterInfo, Clusterer};
use crate::config::ClusterConfig;
use crate::dataloader::DatasetLoader;
use crate::error::Result;
use crate::structs::{ClusterAssignment, DatasetStatistics, KeywordRecord};
use crate::utils::progress_bar;

/// Everything produced by one clustering run.
#[derive(Debug, Clone)]
pub struct ClusterOutcome {
    pub assignments: Vec<ClusterAssignment>,
    pub clusters: Vec<ClusterInfo>,
    pub statistics: DatasetStatistics,
}

#[derive(Debug, Clone, Default)]
pub struct KeywordClusterProcessor {
    config: ClusterConfig,
}

impl KeywordClusterProcessor {
    pub fn new(config: ClusterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Reads `input_file`, clusters it and writes the `Group,Keyword` table to
    /// `output_file`. Nothing is written unless every step succeeds.
    pub fn process_dataset(
        &self,
        input_file: &Path,
        output_file: &Path,
        summary_file: Option<&Path>,
    ) -> Result<ClusterOutcome> {
        let start = Instant::now();
        info!("input_file: {}", input_file.display());
        info!("similarity threshold: {}", self.config.similarity_threshold);

        let loader = DatasetLoader::from_config(input_file, &self.config);
        let records = loader.load_records()?;
        let outcome = self.cluster_records(records);

        write_assignments(&outcome.assignments, output_file)?;
        info!("output_file: {}", output_file.display());
        if let Some(summary_file) = summary_file {
            ClusterInfo::save_cluster_info(&outcome.clusters, summary_file)?;
            info!("summary_file: {}", summary_file.display());
        }

        let duration = start.elapsed().as_secs_f32();
        info!("Processing completed in {duration:.2} seconds");
        Ok(outcome)
    }

    /// In-memory part of the pipeline: group, cluster, assemble.
    pub fn cluster_records(&self, records: Vec<KeywordRecord>) -> ClusterOutcome {
        let show = self.config.show_progress;
        let bar = progress_bar(records.len() as u64, "Group urls by keyword", show);
        let aggregation = aggregate(records.into_iter().progress_with(bar.clone()));
        bar.finish_and_clear();

        let bar = progress_bar(
            aggregation.keyword_urls.len() as u64,
            "Creating clusters",
            show,
        );
        let threshold = self.config.similarity_threshold;
        let clusterer = Clusterer::new(threshold).with_progress(bar);
        let clusters = clusterer.cluster(&aggregation.keyword_urls);

        let assignments = assemble(&clusters, &aggregation.unclustered);
        let statistics = statistics(aggregation.total_rows, &clusters, &aggregation.unclustered);
        let clusters = ClusterInfo::summarize(&clusters, &aggregation.keyword_urls);

        ClusterOutcome {
            assignments,
            clusters,
            statistics,
        }
    }
}

/// Prints the run totals, mirroring what gets logged.
pub fn print_statistics_report(stats: &DatasetStatistics) {
    println!("\nDataset Statistics:");
    println!(
        "Total rows: {}",
        stats.total_rows.to_formatted_string(&Locale::en)
    );
    println!(
        "Distinct keywords: {}",
        stats.distinct_keywords.to_formatted_string(&Locale::en)
    );
    println!(
        "Clustered keywords: {} in {} clusters ({} singletons, largest {})",
        stats.clustered_keywords.to_formatted_string(&Locale::en),
        stats.clusters.to_formatted_string(&Locale::en),
        stats.singleton_clusters.to_formatted_string(&Locale::en),
        stats.largest_cluster.to_formatted_string(&Locale::en)
    );
    println!(
        "Unclustered keywords (group -1): {}",
        stats.unclustered_keywords.to_formatted_string(&Locale::en)
    );
}
