use std::fs;
use std::path::Path;

use crate::cluster::Cluster;
use crate::error::Result;
use crate::structs::{ClusterAssignment, DatasetStatistics, UNCLUSTERED_GROUP};

/// Flattens clusters (in creation order) followed by the url-less keywords.
pub fn assemble(clusters: &[Cluster], unclustered: &[String]) -> Vec<ClusterAssignment> {
    let clustered = clusters.iter().flat_map(|cluster| {
        cluster
            .keywords
            .iter()
            .map(move |kw| ClusterAssignment::new(cluster.id as i64, kw.as_str()))
    });
    let rest = unclustered
        .iter()
        .map(|kw| ClusterAssignment::new(UNCLUSTERED_GROUP, kw.as_str()));
    clustered.chain(rest).collect()
}

pub fn statistics(
    total_rows: usize,
    clusters: &[Cluster],
    unclustered: &[String],
) -> DatasetStatistics {
    let clustered_keywords = clusters.iter().map(Cluster::len).sum::<usize>();
    DatasetStatistics {
        total_rows,
        distinct_keywords: clustered_keywords + unclustered.len(),
        clustered_keywords,
        unclustered_keywords: unclustered.len(),
        clusters: clusters.len(),
        singleton_clusters: clusters.iter().filter(|c| c.len() == 1).count(),
        largest_cluster: clusters.iter().map(Cluster::len).max().unwrap_or(0),
    }
}

/// Renders the `Group,Keyword` table in memory.
pub fn to_csv_bytes(assignments: &[ClusterAssignment]) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    // header comes from the serde renames
    for row in assignments {
        wtr.serialize(row)?;
    }
    if assignments.is_empty() {
        wtr.write_record(["Group", "Keyword"])?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Writes the assignment table in one shot so a failed run leaves no partial file behind.
pub fn write_assignments(assignments: &[ClusterAssignment], output_path: &Path) -> Result<()> {
    let bytes = to_csv_bytes(assignments)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output_path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(id: usize, keywords: &[&str]) -> Cluster {
        Cluster {
            id,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn clustered_rows_come_before_unclustered() {
        let clusters = [cluster(0, &["kw1", "kw2"]), cluster(1, &["kw4"])];
        let unclustered = vec!["kw3".to_string()];
        let rows = assemble(&clusters, &unclustered);
        assert_eq!(
            rows,
            vec![
                ClusterAssignment::new(0, "kw1"),
                ClusterAssignment::new(0, "kw2"),
                ClusterAssignment::new(1, "kw4"),
                ClusterAssignment::new(-1, "kw3"),
            ]
        );
        assert!(rows[3].is_unclustered());
    }

    #[test]
    fn csv_output_has_header_and_rows() {
        let rows = vec![
            ClusterAssignment::new(0, "running shoes"),
            ClusterAssignment::new(-1, "shoes, cheap"),
        ];
        let text = String::from_utf8(to_csv_bytes(&rows).unwrap()).unwrap();
        assert_eq!(text, "Group,Keyword\n0,running shoes\n-1,\"shoes, cheap\"\n");
    }

    #[test]
    fn empty_output_still_has_header() {
        let text = String::from_utf8(to_csv_bytes(&[]).unwrap()).unwrap();
        assert_eq!(text, "Group,Keyword\n");
    }

    #[test]
    fn statistics_counts() {
        let clusters = [cluster(0, &["a", "b", "c"]), cluster(1, &["d"])];
        let stats = statistics(10, &clusters, &["e".to_string()]);
        assert_eq!(
            stats,
            DatasetStatistics {
                total_rows: 10,
                distinct_keywords: 5,
                clustered_keywords: 4,
                unclustered_keywords: 1,
                clusters: 2,
                singleton_clusters: 1,
                largest_cluster: 3,
            }
        );
    }

    #[test]
    fn write_assignments_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("clustered.csv");
        let rows = [ClusterAssignment::new(0, "kw")];
        write_assignments(&rows, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Group,Keyword\n0,kw\n");
    }
}
