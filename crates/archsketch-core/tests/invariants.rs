//! Property tests: every generated graph upholds the graph contract for
//! arbitrary mixes of vocabulary, whatever pattern it lands in.

use archsketch_core::layout::Rect;
use archsketch_core::{ArchitectureGraph, Sketcher};
use proptest::prelude::*;

const WORDS: &[&str] = &[
    "azure", "hub", "spoke", "3 spokes", "9 subscriptions", "aws", "gcp", "google cloud",
    "kubernetes", "docker", "helm", "firewall", "waf", "nsg", "sentinel", "vnet", "subnet",
    "gateway", "load balancer", "traffic manager", "peering", "vpn", "expressroute", "bastion",
    "app service", "function", "logic app", "api management", "microservices", "serverless",
    "event", "queue", "kafka", "redis", "sql", "cosmos", "postgres", "storage", "s3",
    "synapse", "databricks", "power bi", "data factory", "hybrid", "multi-cloud", "on-premise",
    "datacenter", "ec2", "lambda", "rds", "cloudfront", "gke", "cloud run", "bigquery",
    "react", "mobile", "monitoring", "identity", "ci/cd", "registry", "xyzzy", "plugh",
];

const REQUESTS: &[&str] = &[
    "auto", "azure", "aws", "gcp", "kubernetes", "security", "network", "application",
    "microservices", "serverless", "data", "hybrid", "generic", "nonsense",
];

fn description() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..14).prop_map(|ws| ws.join(" "))
}

fn assert_boxes_disjoint_or_nested(g: &ArchitectureGraph) {
    let rects: Vec<(&str, Rect)> = g.components.iter().map(|c| (c.id.as_str(), Rect::of(c))).collect();
    for (i, (a_id, a)) in rects.iter().enumerate() {
        for (b_id, b) in &rects[i + 1..] {
            if a.intersects(b) {
                assert!(
                    a.contains(b) || b.contains(a),
                    "{} overlaps {a_id} and {b_id} without nesting",
                    g.diagram_type
                );
            }
        }
    }
}

proptest! {
    #[test]
    fn generated_graphs_are_valid(text in description(), requested in prop::sample::select(REQUESTS)) {
        let g = Sketcher::default().generate(&text, requested);
        prop_assert!(g.validate().is_ok(), "{:?}", g.validate());
        prop_assert!(g.components.len() >= 3);
        prop_assert!(g.components.iter().all(|c| !c.icon_category.trim().is_empty()));
        assert_boxes_disjoint_or_nested(&g);
    }

    #[test]
    fn generation_is_deterministic(text in description(), requested in prop::sample::select(REQUESTS)) {
        let sketcher = Sketcher::default();
        let a = serde_json::to_string(&sketcher.generate(&text, requested)).unwrap();
        let b = serde_json::to_string(&sketcher.generate(&text, requested)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn summary_sets_have_no_duplicates(text in description()) {
        let g = Sketcher::default().generate(&text, "auto");
        for set in [&g.layers, &g.technologies, &g.patterns] {
            let mut seen = std::collections::HashSet::new();
            prop_assert!(set.iter().all(|v| seen.insert(v)));
        }
    }

    #[test]
    fn contains_edges_point_at_enclosed_children(text in description(), requested in prop::sample::select(REQUESTS)) {
        let g = Sketcher::default().generate(&text, requested);
        for c in g.connections.iter().filter(|c| c.kind == "contains") {
            let parent = Rect::of(g.component(&c.from).unwrap());
            let child = Rect::of(g.component(&c.to).unwrap());
            prop_assert!(parent.contains(&child), "{} does not enclose {}", c.from, c.to);
        }
    }
}
