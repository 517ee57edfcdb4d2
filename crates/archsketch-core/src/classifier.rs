//! Ordered keyword detectors that pick one architecture pattern.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::flags::{contains_any, FlagRule};
use crate::{hub_spoke, patterns};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternId {
    #[serde(rename = "azure_hub_spoke_enterprise")]
    AzureHubSpoke,
    #[serde(rename = "security_architecture")]
    Security,
    #[serde(rename = "network_architecture")]
    Network,
    #[serde(rename = "application_architecture")]
    Application,
    #[serde(rename = "microservices_architecture")]
    Microservices,
    #[serde(rename = "serverless_architecture")]
    Serverless,
    #[serde(rename = "data_architecture")]
    Data,
    #[serde(rename = "aws_architecture")]
    Aws,
    #[serde(rename = "gcp_architecture")]
    Gcp,
    #[serde(rename = "hybrid_multicloud")]
    Hybrid,
    #[serde(rename = "kubernetes_architecture")]
    Kubernetes,
    #[serde(rename = "intelligent_generic")]
    Generic,
}

impl PatternId {
    pub const ALL: [PatternId; 12] = [
        PatternId::AzureHubSpoke,
        PatternId::Security,
        PatternId::Network,
        PatternId::Application,
        PatternId::Microservices,
        PatternId::Serverless,
        PatternId::Data,
        PatternId::Aws,
        PatternId::Gcp,
        PatternId::Hybrid,
        PatternId::Kubernetes,
        PatternId::Generic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternId::AzureHubSpoke => "azure_hub_spoke_enterprise",
            PatternId::Security => "security_architecture",
            PatternId::Network => "network_architecture",
            PatternId::Application => "application_architecture",
            PatternId::Microservices => "microservices_architecture",
            PatternId::Serverless => "serverless_architecture",
            PatternId::Data => "data_architecture",
            PatternId::Aws => "aws_architecture",
            PatternId::Gcp => "gcp_architecture",
            PatternId::Hybrid => "hybrid_multicloud",
            PatternId::Kubernetes => "kubernetes_architecture",
            PatternId::Generic => "intelligent_generic",
        }
    }

    /// Exact pattern id lookup.
    pub fn parse(id: &str) -> Option<PatternId> {
        Self::ALL.into_iter().find(|p| p.as_str() == id)
    }

    /// Map a caller's requested-type hint to a pattern. `"auto"`, empty and
    /// unrecognised hints return `None` so the caller classifies instead.
    pub fn from_requested(hint: &str) -> Option<PatternId> {
        let hint = hint.trim().to_lowercase();
        let pattern = match hint.as_str() {
            "" | "auto" => return None,
            "azure" | "hub_spoke" | "hub-spoke" | "hub_and_spoke" | "hubspoke" => PatternId::AzureHubSpoke,
            "security" => PatternId::Security,
            "network" | "networking" => PatternId::Network,
            "application" | "app" | "webapp" => PatternId::Application,
            "microservices" | "microservice" => PatternId::Microservices,
            "serverless" => PatternId::Serverless,
            "data" | "analytics" => PatternId::Data,
            "aws" | "amazon" => PatternId::Aws,
            "gcp" | "google" | "google_cloud" => PatternId::Gcp,
            "hybrid" | "multicloud" | "multi-cloud" | "multi_cloud" => PatternId::Hybrid,
            "kubernetes" | "k8s" | "container" | "containers" => PatternId::Kubernetes,
            "generic" | "intelligent" => PatternId::Generic,
            other => return Self::parse(other),
        };
        Some(pattern)
    }

    /// Keyword families the pattern's generator tests.
    pub fn flag_rules(self) -> &'static [FlagRule] {
        match self {
            PatternId::AzureHubSpoke => hub_spoke::FLAGS,
            PatternId::Generic => &[],
            other => patterns::spec_for(other).map(|s| s.flags).unwrap_or(&[]),
        }
    }

    /// The application generator hands off to a more specific pattern when
    /// the text also names one. Other patterns resolve to themselves.
    pub fn refine(self, text: &str) -> PatternId {
        if self != PatternId::Application {
            return self;
        }
        APPLICATION_SUBPATTERNS
            .iter()
            .find(|(_, keywords)| contains_any(text, keywords))
            .map(|(pattern, _)| *pattern)
            .unwrap_or(self)
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const APPLICATION_SUBPATTERNS: &[(PatternId, &[&str])] = &[
    (PatternId::Microservices, &["microservice", "microservicio"]),
    (PatternId::Serverless, &["serverless", "sin servidor", "event-driven", "event driven"]),
    (PatternId::Kubernetes, &["kubernetes", "k8s", "aks"]),
    (PatternId::AzureHubSpoke, &["hub and spoke", "hub-spoke", "hub & spoke", "spoke"]),
];

pub type DetectorFn = fn(text: &str) -> bool;

#[derive(Debug, Clone)]
pub struct Detector {
    pub id: PatternId,
    pub detector: DetectorFn,
}

/// First-match-wins list of detectors. Order is part of the contract: text
/// that satisfies several detectors gets the earliest one.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    detectors: Vec<Detector>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, detector: Detector) {
        self.detectors.push(detector);
    }

    pub fn add_fn(&mut self, id: PatternId, detector: DetectorFn) {
        self.add(Detector { id, detector });
    }

    pub fn default_order() -> Self {
        let mut reg = Self::new();
        reg.add_fn(PatternId::AzureHubSpoke, detect_azure_hub_spoke);
        reg.add_fn(PatternId::Security, detect_security);
        reg.add_fn(PatternId::Network, detect_network);
        reg.add_fn(PatternId::Application, detect_application);
        reg.add_fn(PatternId::Data, detect_data);
        reg.add_fn(PatternId::Aws, detect_aws);
        reg.add_fn(PatternId::Gcp, detect_gcp);
        reg.add_fn(PatternId::Hybrid, detect_hybrid);
        reg.add_fn(PatternId::Kubernetes, detect_kubernetes);
        reg
    }

    /// `text` must already be lowercased. Falls back to the generic pattern.
    pub fn classify(&self, text: &str) -> PatternId {
        self.detectors
            .iter()
            .find(|d| (d.detector)(text))
            .map(|d| d.id)
            .unwrap_or(PatternId::Generic)
    }
}

fn detect_azure_hub_spoke(text: &str) -> bool {
    text.contains("azure") && (text.contains("hub") || text.contains("spoke"))
}

fn detect_security(text: &str) -> bool {
    contains_any(text, &["firewall", "waf", "application gateway", "security", "nsg"])
}

fn detect_network(text: &str) -> bool {
    contains_any(text, &["vnet", "subnet", "gateway", "load balancer", "traffic manager"])
}

fn detect_application(text: &str) -> bool {
    contains_any(text, &["app service", "function", "logic app", "api management"])
}

fn detect_data(text: &str) -> bool {
    contains_any(text, &["sql", "cosmos", "synapse", "data factory", "storage"])
}

fn detect_aws(text: &str) -> bool {
    text.contains("aws")
}

fn detect_gcp(text: &str) -> bool {
    contains_any(text, &["gcp", "google cloud", "compute engine", "cloud sql"])
}

fn detect_hybrid(text: &str) -> bool {
    contains_any(text, &["multi-cloud", "hybrid", "on-premise", "cross-cloud"])
}

fn detect_kubernetes(text: &str) -> bool {
    contains_any(text, &["kubernetes", "k8s", "docker", "container", "pod", "helm"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("azure hub with kubernetes workloads", PatternId::AzureHubSpoke)]
    #[test_case("azure front door with waf", PatternId::Security)]
    #[test_case("a vnet with two subnets", PatternId::Network)]
    #[test_case("app service calling an azure function", PatternId::Application)]
    #[test_case("cosmos db and synapse", PatternId::Data)]
    #[test_case("aws lambda function behind an api", PatternId::Application)]
    #[test_case("aws ec2 and rds", PatternId::Aws)]
    #[test_case("gke on google cloud", PatternId::Gcp)]
    #[test_case("hybrid setup between datacenter and cloud", PatternId::Hybrid)]
    #[test_case("docker containers with helm charts", PatternId::Kubernetes)]
    #[test_case("xyzzy plugh", PatternId::Generic)]
    fn default_order_classifies(text: &str, expected: PatternId) {
        assert_eq!(Classifier::default_order().classify(text), expected);
    }

    #[test]
    fn security_precedes_network() {
        let c = Classifier::default_order();
        assert_eq!(c.classify("vnet protected by a firewall"), PatternId::Security);
    }

    #[test]
    fn custom_registry_respects_insertion_order() {
        let mut c = Classifier::new();
        c.add_fn(PatternId::Kubernetes, detect_kubernetes);
        c.add_fn(PatternId::AzureHubSpoke, detect_azure_hub_spoke);
        assert_eq!(c.classify("azure hub running kubernetes"), PatternId::Kubernetes);
    }

    #[test_case("microservices on app service", PatternId::Microservices)]
    #[test_case("serverless function app", PatternId::Serverless)]
    #[test_case("api management in front of aks", PatternId::Kubernetes)]
    #[test_case("app service in a spoke", PatternId::AzureHubSpoke)]
    #[test_case("app service with logic app", PatternId::Application)]
    fn application_refines(text: &str, expected: PatternId) {
        assert_eq!(PatternId::Application.refine(text), expected);
    }

    #[test]
    fn refine_leaves_other_patterns() {
        assert_eq!(PatternId::Data.refine("microservices"), PatternId::Data);
    }

    #[test_case("auto", None)]
    #[test_case("", None)]
    #[test_case("quantum", None)]
    #[test_case("Azure", Some(PatternId::AzureHubSpoke))]
    #[test_case(" k8s ", Some(PatternId::Kubernetes))]
    #[test_case("gcp_architecture", Some(PatternId::Gcp))]
    fn requested_hints(hint: &str, expected: Option<PatternId>) {
        assert_eq!(PatternId::from_requested(hint), expected);
    }

    #[test]
    fn ids_round_trip_through_parse_and_serde() {
        for p in PatternId::ALL {
            assert_eq!(PatternId::parse(p.as_str()), Some(p));
            assert_eq!(serde_json::to_value(p).unwrap(), p.as_str());
        }
    }
}
