use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serp_cluster::{
    ClusterConfig, KeywordClusterProcessor, SimilarityThreshold, parse_separator,
    print_statistics_report,
};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Cluster keywords by SERP similarity.
#[derive(Parser)]
#[command(name = "serp-cluster")]
#[command(version, about, long_about = None)]
#[command(
    after_help = "Example: serp-cluster -s ';' -k keyword -u url -t 0.6 input.csv clustered.csv"
)]
struct Cli {
    /// Path to the input file
    input_file: PathBuf,

    /// Path to save the output clustered keywords
    output_file: PathBuf,

    /// Separator of the input file
    #[arg(short, long, env = "SERP_CLUSTER_SEPARATOR", default_value = ",")]
    separator: String,

    /// Name of the keyword column in input file
    #[arg(
        short,
        long,
        env = "SERP_CLUSTER_KEYWORD_COL",
        default_value = "Keyword"
    )]
    keyword_col: String,

    /// Name of the URL column in input file
    #[arg(short, long, env = "SERP_CLUSTER_URL_COL", default_value = "URL")]
    url_col: String,

    /// Threshold of similarity, between 0 and 1
    #[arg(
        short = 't',
        long,
        env = "SERP_CLUSTER_THRESHOLD",
        default_value = "0.6"
    )]
    similarity_threshold: String,

    /// Also write a JSON summary of every cluster
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long)]
    no_progress: bool,
}

impl Cli {
    fn config(&self) -> Result<ClusterConfig> {
        let threshold: SimilarityThreshold = self.similarity_threshold.parse()?;
        let separator = parse_separator(&self.separator)?;
        Ok(ClusterConfig::default()
            .with_threshold(threshold)
            .with_separator(separator)
            .with_columns(&self.keyword_col, &self.url_col)
            .with_progress(!self.no_progress))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.config()?;

    let processor = KeywordClusterProcessor::new(config);
    let outcome = processor
        .process_dataset(&cli.input_file, &cli.output_file, cli.summary.as_deref())
        .with_context(|| format!("failed to cluster {}", cli.input_file.display()))?;

    print_statistics_report(&outcome.statistics);
    info!(
        "{} assignments written to {}",
        outcome.assignments.len(),
        cli.output_file.display()
    );
    Ok(())
}
