//! End-to-end scenarios through the public entry points.

use archsketch_core::layout::Rect;
use archsketch_core::{classify_and_generate, extract_flags_for_pattern, ArchitectureGraph, PatternId, Sketcher};
use pretty_assertions::assert_eq;

fn count_prefixed(g: &ArchitectureGraph, prefix: &str) -> usize {
    g.component_ids().filter(|id| id.starts_with(prefix)).count()
}

#[test]
fn spanish_hub_and_spoke_request() {
    let g = classify_and_generate(
        "Crear diagrama de arquitectura de azure hub and spoke para 4 subcripciones",
        "auto",
    );
    assert_eq!(g.diagram_type, "azure_hub_spoke_enterprise");
    for id in ["hub_vnet", "vpn_gateway", "firewall", "log_analytics", "key_vault"] {
        assert!(g.component(id).is_some(), "missing {id}");
    }
    assert_eq!(count_prefixed(&g, "subscription_"), 4);
    assert_eq!(count_prefixed(&g, "spoke_vnet_"), 4);
    assert_eq!(g.components.len(), 5 + 4 * 2);
    g.validate().unwrap();
}

#[test]
fn seven_subscriptions_each_peered_once() {
    let g = classify_and_generate("azure hub and spoke para 7 suscripciones", "auto");
    assert_eq!(count_prefixed(&g, "subscription_"), 7);
    assert_eq!(count_prefixed(&g, "spoke_vnet_"), 7);
    for n in 1..=7 {
        let vnet = format!("spoke_vnet_{n}");
        let peered = g.connections.iter().filter(|c| c.kind == "peering" && c.to == vnet).count();
        let contained = g
            .connections
            .iter()
            .filter(|c| c.kind == "contains" && c.to == vnet && c.from == format!("subscription_{n}"))
            .count();
        assert_eq!((peered, contained), (1, 1), "spoke {n}");
    }
}

#[test]
fn twenty_spokes_are_not_truncated() {
    let g = classify_and_generate("azure hub with 20 spokes", "auto");
    assert_eq!(count_prefixed(&g, "spoke_vnet_"), 20);
    g.validate().unwrap();
}

#[test]
fn hub_wins_over_kubernetes() {
    let sketcher = Sketcher::default();
    assert_eq!(
        sketcher.classify("azure hub running kubernetes workloads"),
        PatternId::AzureHubSpoke
    );
}

#[test]
fn no_keywords_still_draws_three_tiers() {
    let g = classify_and_generate("xyzzy plugh", "auto");
    assert!(g.components.len() >= 3);
    assert!(g.connections.len() >= 2);
    assert!(g.components.iter().all(|c| !c.icon_category.is_empty()));
}

#[test]
fn malformed_counts_use_the_default() {
    let g = classify_and_generate("azure hub with abc spokes", "auto");
    assert_eq!(count_prefixed(&g, "spoke_vnet_"), 4);
}

#[test]
fn kubernetes_cluster_variant_and_nesting() {
    let g = classify_and_generate("docker images on eks with a postgres database and a frontend", "auto");
    assert_eq!(g.diagram_type, "kubernetes_architecture");
    let cluster = g.component("cluster").unwrap();
    assert_eq!(cluster.technology, "Amazon EKS");
    let outer = Rect::of(cluster);
    for pod in ["frontend_pod", "backend_pod"] {
        assert!(outer.contains(&Rect::of(g.component(pod).unwrap())), "{pod} escapes the cluster");
    }
}

#[test]
fn network_subnets_replace_the_default() {
    let g = classify_and_generate("a vnet with web, app and data subnets behind a load balancer", "auto");
    assert_eq!(g.diagram_type, "network_architecture");
    assert!(g.component("subnet_default").is_none());
    let nested: Vec<_> = g
        .outgoing("vnet")
        .filter(|c| c.kind == "contains")
        .map(|c| c.to.as_str())
        .collect();
    assert_eq!(nested, vec!["subnet_web", "subnet_app", "subnet_data"]);
}

#[test]
fn flags_match_what_the_generator_uses() {
    let text = "internet facing app behind a waf and firewall with sentinel";
    let flags = extract_flags_for_pattern("security_architecture", text);
    let g = classify_and_generate(text, "security");
    for (flag, id) in [("has_waf", "waf"), ("has_firewall", "firewall"), ("has_nsg", "nsg"), ("has_siem", "siem")] {
        assert_eq!(flags[flag], g.component(id).is_some(), "{flag}");
    }
}

#[test]
fn generation_is_byte_identical() {
    let text = "AWS CloudFront, ALB, ECS Fargate, Aurora and S3 with CloudWatch";
    let a = serde_json::to_string(&classify_and_generate(text, "auto")).unwrap();
    let b = serde_json::to_string(&classify_and_generate(text, "auto")).unwrap();
    assert_eq!(a, b);
}
