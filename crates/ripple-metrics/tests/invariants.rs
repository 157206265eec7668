use proptest::prelude::*;

use ripple_metrics::NetworkGraph;
use ripple_metrics::graph::parse_edge_list;
use ripple_metrics::metrics::degree::{DegreeMode, raw_degrees};
use ripple_metrics::metrics::pagerank::{PageRankConfig, pagerank};
use std::collections::BTreeSet;
use std::path::Path;

fn arb_edges() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..40, 0u64..40), 1..120)
}

fn render(edges: &[(u64, u64)]) -> String {
    edges.iter().map(|(u, v)| format!("{u} {v}\n")).collect()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn node_count_is_distinct_ids(edges in arb_edges(), directed in any::<bool>()) {
        let text = render(&edges);
        let g = parse_edge_list(text.as_bytes(), directed, Path::new("p.txt")).expect("parse");

        let ids: BTreeSet<u64> = edges.iter().flat_map(|&(u, v)| [u, v]).collect();
        prop_assert_eq!(g.node_count(), ids.len());
        prop_assert_eq!(g.node_ids(), ids.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn edge_count_is_distinct_normalized_pairs(edges in arb_edges(), directed in any::<bool>()) {
        let g = NetworkGraph::from_edges(directed, &edges);
        let pairs: BTreeSet<(u64, u64)> = edges
            .iter()
            .map(|&(u, v)| if directed || u <= v { (u, v) } else { (v, u) })
            .collect();
        prop_assert_eq!(g.edge_count(), pairs.len());
    }

    #[test]
    fn undirected_degree_sum_is_twice_edges(edges in arb_edges()) {
        let g = NetworkGraph::from_edges(false, &edges);
        let total: usize = raw_degrees(&g, DegreeMode::Total).iter().sum();
        prop_assert_eq!(total, 2 * g.edge_count());
    }

    #[test]
    fn directed_in_and_out_degree_sums_match(edges in arb_edges()) {
        let g = NetworkGraph::from_edges(true, &edges);
        let ins: usize = raw_degrees(&g, DegreeMode::In).iter().sum();
        let outs: usize = raw_degrees(&g, DegreeMode::Out).iter().sum();
        prop_assert_eq!(ins, g.edge_count());
        prop_assert_eq!(outs, g.edge_count());
    }

    #[test]
    fn pagerank_sums_to_one(edges in arb_edges(), directed in any::<bool>()) {
        let g = NetworkGraph::from_edges(directed, &edges);
        let result = pagerank(&g, &PageRankConfig::default()).expect("non-empty");
        let total: f64 = result.scores.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-6, "sum = {}", total);
    }

    #[test]
    fn parse_is_idempotent_under_duplication(edges in arb_edges(), directed in any::<bool>()) {
        let once = render(&edges);
        let twice = format!("{once}{once}");
        let a = parse_edge_list(once.as_bytes(), directed, Path::new("a")).expect("parse");
        let b = parse_edge_list(twice.as_bytes(), directed, Path::new("b")).expect("parse");
        prop_assert_eq!(a.node_count(), b.node_count());
        prop_assert_eq!(a.edge_count(), b.edge_count());
    }
}
