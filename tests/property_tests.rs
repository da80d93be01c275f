use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use serp_cluster::{
    Cluster, ClusterConfig, Clusterer, KeywordClusterProcessor, KeywordRecord, KeywordUrlSets,
    SimilarityThreshold, UNCLUSTERED_GROUP, UrlSet, aggregate, jaccard_similarity,
};

fn records_strategy() -> impl Strategy<Value = Vec<KeywordRecord>> {
    let rows = prop::collection::vec((0usize..8, prop::option::of(0usize..6)), 0..40);
    rows.prop_map(|rows| {
        rows.into_iter()
            .map(|(kw, url)| KeywordRecord {
                keyword: format!("kw{kw}"),
                url: url.map(|u| format!("https://example.com/{u}")),
            })
            .collect()
    })
}

fn url_set_strategy() -> impl Strategy<Value = UrlSet> {
    prop::collection::hash_set(0usize..10, 1..6)
        .prop_map(|set| set.into_iter().map(|u| format!("u{u}")).collect())
}

fn lookup<'a>(keyword_urls: &'a KeywordUrlSets, keyword: &str) -> &'a UrlSet {
    keyword_urls.get(keyword).unwrap()
}

fn cluster_at(keyword_urls: &KeywordUrlSets, threshold: f64) -> Vec<Cluster> {
    Clusterer::new(SimilarityThreshold::new(threshold).unwrap()).cluster(keyword_urls)
}

fn processor(threshold: f64) -> KeywordClusterProcessor {
    let config = ClusterConfig::default()
        .with_threshold(SimilarityThreshold::new(threshold).unwrap())
        .with_progress(false);
    KeywordClusterProcessor::new(config)
}

proptest! {
    #[test]
    fn prop_jaccard_bounds(a in url_set_strategy(), b in url_set_strategy()) {
        let score = jaccard_similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&score));
        prop_assert_eq!(score, jaccard_similarity(&b, &a));
        prop_assert_eq!(jaccard_similarity(&a, &a), 1.0);
    }

    #[test]
    fn prop_every_keyword_assigned_exactly_once(
        records in records_strategy(),
        threshold in 0.0f64..=1.0
    ) {
        let distinct: HashSet<String> = records.iter().map(|r| r.keyword.clone()).collect();
        let outcome = processor(threshold).cluster_records(records);

        let assigned: Vec<&str> = outcome.assignments.iter().map(|a| a.keyword.as_str()).collect();
        let unique: HashSet<&str> = assigned.iter().copied().collect();
        prop_assert_eq!(assigned.len(), unique.len());
        prop_assert_eq!(unique.len(), distinct.len());
        for keyword in &distinct {
            prop_assert!(unique.contains(keyword.as_str()));
        }
    }

    #[test]
    fn prop_unclustered_iff_no_url(records in records_strategy(), threshold in 0.0f64..=1.0) {
        let mut has_url: HashMap<String, bool> = HashMap::new();
        for r in &records {
            *has_url.entry(r.keyword.clone()).or_default() |= r.url.is_some();
        }
        let outcome = processor(threshold).cluster_records(records);
        for row in &outcome.assignments {
            prop_assert_eq!(row.group == UNCLUSTERED_GROUP, !has_url[&row.keyword]);
        }
    }

    #[test]
    fn prop_group_ids_dense_and_ordered(records in records_strategy(), threshold in 0.0f64..=1.0) {
        let outcome = processor(threshold).cluster_records(records);
        let mut expected_next = 0i64;
        let mut seen_unclustered = false;
        for row in &outcome.assignments {
            if row.group == UNCLUSTERED_GROUP {
                seen_unclustered = true;
                continue;
            }
            // clustered rows never follow the sentinel group
            prop_assert!(!seen_unclustered);
            prop_assert!(row.group == expected_next - 1 || row.group == expected_next);
            if row.group == expected_next {
                expected_next += 1;
            }
        }
        prop_assert_eq!(expected_next as usize, outcome.statistics.clusters);
    }

    #[test]
    fn prop_higher_threshold_never_fewer_clusters(
        records in records_strategy(),
        low in 0.0f64..=1.0,
        high in 0.0f64..=1.0
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let keyword_urls = aggregate(records).keyword_urls;
        let coarse = cluster_at(&keyword_urls, low);
        let fine = cluster_at(&keyword_urls, high);
        prop_assert!(fine.len() >= coarse.len());
    }

    #[test]
    fn prop_single_link_first_fit(records in records_strategy(), threshold in 0.0f64..=1.0) {
        let keyword_urls = aggregate(records).keyword_urls;
        let clusters = cluster_at(&keyword_urls, threshold);

        let position: HashMap<&str, usize> = keyword_urls
            .iter()
            .enumerate()
            .map(|(i, (kw, _))| (kw, i))
            .collect();

        for cluster in &clusters {
            let (founder, rest) = cluster.keywords.split_first().unwrap();
            // a founder matched nothing processed before it
            for (earlier, earlier_urls) in keyword_urls.iter().take(position[founder.as_str()]) {
                prop_assert!(
                    jaccard_similarity(lookup(&keyword_urls, founder), earlier_urls) < threshold,
                    "{} should have joined the cluster of {}", founder, earlier
                );
            }
            // every later member links to at least one member that joined before it
            for (i, member) in rest.iter().enumerate() {
                let member_urls = lookup(&keyword_urls, member);
                let linked = cluster.keywords[..=i]
                    .iter()
                    .map(|prev| jaccard_similarity(member_urls, lookup(&keyword_urls, prev)))
                    .any(|score| score >= threshold);
                prop_assert!(linked);
            }
        }
    }

    #[test]
    fn prop_deterministic(records in records_strategy(), threshold in 0.0f64..=1.0) {
        let first = processor(threshold).cluster_records(records.clone());
        let second = processor(threshold).cluster_records(records);
        prop_assert_eq!(first.assignments, second.assignments);
    }

    #[test]
    fn prop_identical_sets_form_one_cluster(
        urls in url_set_strategy(),
        keywords in 1usize..10,
        threshold in 0.0f64..=1.0
    ) {
        let records = (0..keywords).flat_map(|k| {
            urls.iter().map(move |u| KeywordRecord::new(format!("kw{k}"), Some(u.as_str())))
        });
        let keyword_urls = aggregate(records).keyword_urls;
        let clusters = cluster_at(&keyword_urls, threshold);
        prop_assert_eq!(clusters.len(), 1);
        prop_assert_eq!(clusters[0].keywords.len(), keywords);
    }
}
