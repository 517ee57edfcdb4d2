//! On-premises estate linked to one or more public clouds.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{always, hub_to_many, link, unless_any, when, ComponentTemplate as C, EdgeStyle, PatternSpec};

const MANAGED: EdgeStyle = EdgeStyle::new("management", "policy & inventory", "");

pub static HYBRID: PatternSpec = PatternSpec {
    id: PatternId::Hybrid,
    title: "Hybrid / Multi-Cloud Architecture",
    description: "On-premises estate connected to one or more public clouds under a single control plane",
    flags: &[
        FlagRule::new("has_azure", &["azure"]),
        FlagRule::new("has_aws", &["aws", "amazon"]),
        FlagRule::new("has_gcp", &["gcp", "google"]),
        FlagRule::new("has_vpn", &["vpn", "site-to-site", "ipsec"]),
        FlagRule::new("has_dedicated", &["expressroute", "direct connect", "interconnect", "dedicated"]),
        FlagRule::new("has_identity", &["identity", "active directory", "entra", "sso", "federat"]),
        FlagRule::new("has_arc", &["azure arc", "anthos", "control plane", "unified management"]),
        FlagRule::new("has_monitoring", &["monitoring", "observability", "logging", "siem"]),
        FlagRule::new("has_backup", &["backup", "disaster recovery", "dr ", "site recovery"]),
    ],
    tiers: &[Layer::External, Layer::Network, Layer::Infrastructure, Layer::Management],
    rules: &[
        always(C::new("onprem", "On-Premises\nDatacenter", "onprem", Layer::External).tech("Private Datacenter")),
        when("has_identity", C::new("identity", "Hybrid Identity", "identity", Layer::External)
            .tech("Active Directory + Entra Connect")
            .variants(&[("okta", "Okta")])),
        when("has_vpn", C::new("vpn", "Site-to-Site VPN", "gateway", Layer::Network).tech("IPsec VPN")),
        when("has_dedicated", C::new("dedicated", "Dedicated Link", "gateway", Layer::Network)
            .tech("Azure ExpressRoute")
            .variants(&[("direct connect", "AWS Direct Connect"), ("interconnect", "Google Cloud Interconnect")])),
        unless_any(&["has_vpn", "has_dedicated"], C::new("connectivity", "Cloud Connectivity", "gateway", Layer::Network).tech("Encrypted WAN")),
        when("has_azure", C::new("azure", "Microsoft Azure", "cloud", Layer::Infrastructure).tech("Azure")),
        when("has_aws", C::new("aws", "Amazon Web Services", "cloud", Layer::Infrastructure).tech("AWS")),
        when("has_gcp", C::new("gcp", "Google Cloud", "cloud", Layer::Infrastructure).tech("Google Cloud")),
        unless_any(&["has_azure", "has_aws", "has_gcp"], C::new("public_cloud", "Public Cloud", "cloud", Layer::Infrastructure).tech("Public Cloud Provider")),
        when("has_arc", C::new("control_plane", "Hybrid Control\nPlane", "management", Layer::Management)
            .tech("Azure Arc")
            .variants(&[("anthos", "Google Anthos")])),
        when("has_monitoring", C::new("monitoring", "Unified Monitoring", "monitoring", Layer::Management)
            .tech("Azure Monitor")
            .variants(&[("datadog", "Datadog"), ("splunk", "Splunk")])),
        when("has_backup", C::new("backup", "Backup & DR", "storage", Layer::Management)
            .tech("Azure Site Recovery")
            .variants(&[("veeam", "Veeam")])),
    ],
    connections: &[
        link("onprem", "vpn", EdgeStyle::new("vpn", "", "IPsec/IKEv2")),
        link("onprem", "dedicated", EdgeStyle::new("private_link", "", "BGP")),
        link("onprem", "connectivity", EdgeStyle::new("network_flow", "", "")),
        hub_to_many("vpn", "cloud", EdgeStyle::new("vpn", "", "IPsec/IKEv2")),
        hub_to_many("dedicated", "cloud", EdgeStyle::new("private_link", "", "BGP")),
        hub_to_many("connectivity", "cloud", EdgeStyle::new("network_flow", "", "")),
        link("identity", "onprem", EdgeStyle::new("auth", "directory sync", "LDAP")),
        hub_to_many("identity", "cloud", EdgeStyle::new("auth", "federation", "SAML/OIDC")),
        link("control_plane", "onprem", MANAGED),
        hub_to_many("control_plane", "cloud", MANAGED),
        link("onprem", "monitoring", EdgeStyle::new("monitoring", "logs", "")),
        link("onprem", "backup", EdgeStyle::new("data_flow", "replication", "")),
    ],
    patterns: &["Hybrid Cloud", "Multi-Cloud"],
};
