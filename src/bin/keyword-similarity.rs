use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serp_cluster::{ClusterConfig, DatasetLoader, aggregate, jaccard_similarity, parse_separator};

/// Print the Jaccard similarity between the URL sets of two keywords.
#[derive(Parser)]
#[command(name = "keyword-similarity")]
#[command(version, about, long_about = None)]
struct Cli {
    input_file: PathBuf,
    first: String,
    second: String,

    #[arg(short, long, env = "SERP_CLUSTER_SEPARATOR", default_value = ",")]
    separator: String,

    #[arg(
        short,
        long,
        env = "SERP_CLUSTER_KEYWORD_COL",
        default_value = "Keyword"
    )]
    keyword_col: String,

    #[arg(short, long, env = "SERP_CLUSTER_URL_COL", default_value = "URL")]
    url_col: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = ClusterConfig::default()
        .with_separator(parse_separator(&cli.separator)?)
        .with_columns(&cli.keyword_col, &cli.url_col);

    let records = DatasetLoader::from_config(&cli.input_file, &config)
        .load_records()
        .with_context(|| format!("failed to read {}", cli.input_file.display()))?;
    let aggregation = aggregate(records);

    let lookup = |keyword: &str| {
        aggregation.keyword_urls.get(keyword).ok_or_else(|| {
            if aggregation.unclustered.iter().any(|k| k == keyword) {
                anyhow!("keyword {keyword:?} has no URLs")
            } else {
                anyhow!("keyword {keyword:?} not found")
            }
        })
    };
    let first = lookup(&cli.first)?;
    let second = lookup(&cli.second)?;

    println!("{}: {} urls", cli.first, first.len());
    println!("{}: {} urls", cli.second, second.len());
    println!("jaccard: {:.4}", jaccard_similarity(first, second));
    Ok(())
}
