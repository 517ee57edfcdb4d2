//! Defence-in-depth layout: edge protection, identity, segmentation and SIEM.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{always, link, path, when, ComponentTemplate as C, EdgeStyle, PatternSpec};

const INSPECTED: EdgeStyle = EdgeStyle::new("security_flow", "inspected traffic", "HTTPS/443");
const LOGS: EdgeStyle = EdgeStyle::new("monitoring", "security logs", "Diagnostic Settings");

pub static SECURITY: PatternSpec = PatternSpec {
    id: PatternId::Security,
    title: "Security Architecture",
    description: "Layered perimeter controls in front of a protected workload and its data",
    flags: &[
        FlagRule::new("has_waf", &["waf", "application gateway", "front door", "web application firewall"]),
        FlagRule::new("has_firewall", &["firewall", "cortafuegos"]),
        FlagRule::new("has_nsg", &["nsg", "network security group", "security group"]),
        FlagRule::new("has_identity", &["identity", "entra", "azure ad", "active directory", "sso", "oauth", "iam", "mfa", "zero trust"]),
        FlagRule::new("has_siem", &["sentinel", "siem", "defender", "security center", "monitoring"]),
    ],
    tiers: &[Layer::External, Layer::Security, Layer::Network, Layer::Application, Layer::Data, Layer::Management],
    rules: &[
        always(C::new("internet", "Internet", "external", Layer::External).tech("Public Internet").icon("networking")),
        when("has_waf", C::new("waf", "Web Application\nFirewall", "security", Layer::Security)
            .tech("Azure Application Gateway WAF v2")
            .variants(&[("front door", "Azure Front Door Premium WAF"), ("cloudflare", "Cloudflare WAF"), ("aws", "AWS WAF"), ("cloud armor", "Google Cloud Armor")])
            .describe("OWASP 3.2 managed rule set in prevention mode")),
        when("has_firewall", C::new("firewall", "Firewall", "security", Layer::Security)
            .tech("Azure Firewall Premium")
            .variants(&[("palo alto", "Palo Alto NGFW"), ("fortinet", "FortiGate NGFW"), ("fortigate", "FortiGate NGFW"), ("aws", "AWS Network Firewall")])
            .describe("IDPS and TLS inspection on all north-south traffic")),
        when("has_nsg", C::new("nsg", "Network Security\nGroups", "security", Layer::Network)
            .tech("Azure NSG")
            .variants(&[("aws", "AWS Security Groups"), ("gcp", "VPC Firewall Rules")])
            .describe("Deny-by-default subnet rules")),
        when("has_identity", C::new("identity", "Identity Provider", "identity", Layer::Security)
            .tech("Microsoft Entra ID")
            .variants(&[("okta", "Okta"), ("keycloak", "Keycloak"), ("aws", "AWS IAM Identity Center")])
            .describe("Conditional access with MFA")),
        always(C::new("workload", "Protected\nWorkload", "webapp", Layer::Application)
            .tech("Web Application")
            .variants(&[("app service", "Azure App Service"), ("aks", "Azure Kubernetes Service"), ("vm", "Virtual Machines")])),
        always(C::new("data", "Protected\nData Store", "database", Layer::Data)
            .tech("Azure SQL Database")
            .variants(&[("cosmos", "Azure Cosmos DB"), ("postgres", "Azure Database for PostgreSQL"), ("mysql", "Azure Database for MySQL")])
            .describe("Encryption at rest with customer-managed keys")),
        when("has_siem", C::new("siem", "SIEM", "monitoring", Layer::Management)
            .tech("Microsoft Sentinel")
            .variants(&[("splunk", "Splunk"), ("defender", "Microsoft Defender for Cloud")])),
    ],
    connections: &[
        path(&["internet", "waf", "firewall", "nsg", "workload"], INSPECTED),
        link("workload", "data", EdgeStyle::new("data_flow", "queries", "TLS 1.2")),
        link("identity", "workload", EdgeStyle::new("auth", "token validation", "OIDC")),
        link("waf", "siem", LOGS),
        link("firewall", "siem", LOGS),
        link("nsg", "siem", LOGS),
    ],
    patterns: &["Defense in Depth", "Zero Trust"],
};
