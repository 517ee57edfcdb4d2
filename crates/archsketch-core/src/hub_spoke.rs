//! Azure hub-and-spoke landing zone.
//!
//! The hub and its shared services are fixed; the spokes repeat once per
//! requested subscription. Each spoke is a subscription box holding one
//! VNet, which in turn holds up to four workload services.

use tracing::debug;

use crate::classifier::PatternId;
use crate::flags::{extract_flags, requested_count, FlagRule, Flags};
use crate::layout::{
    place_contained, place_hub, place_hub_edge, place_radial_spoke, place_shared_service,
    CONTAINER_SLOTS, SUBSCRIPTION_INSET,
};
use crate::lexicon::Lexicon;
use crate::model::{ArchitectureGraph, Connection, Layer};
use crate::synthesis::{ComponentTemplate as C, EdgeStyle, GraphBuilder};

pub const DEFAULT_SPOKES: usize = 4;
pub const HUB_CIDR: &str = "10.0.0.0/16";

pub const FLAGS: &[FlagRule] = &[
    FlagRule::new("has_expressroute", &["expressroute", "express route"]),
    FlagRule::new("has_bastion", &["bastion"]),
    FlagRule::new("has_app_gateway", &["application gateway", "app gateway", "waf"]),
    FlagRule::new("has_ddos", &["ddos"]),
    FlagRule::new("has_private_dns", &["private dns", "dns privado", "private endpoint"]),
    FlagRule::new("has_front_door", &["front door"]),
    FlagRule::new("has_sentinel", &["sentinel", "siem"]),
    FlagRule::new("has_onprem", &["on-prem", "onprem", "on prem", "datacenter", "data center", "hybrid", "híbrid"]),
    FlagRule::new("has_web", &["web", "app service", "frontend"]),
    FlagRule::new("has_database", &["database", "sql", "base de datos", "cosmos"]),
    FlagRule::new("has_storage", &["storage", "blob", "almacenamiento"]),
    FlagRule::new("has_aks", &["aks", "kubernetes", "k8s"]),
    FlagRule::new("has_vm", &["virtual machine", "máquina virtual", "maquina virtual", " vm"]),
];

const HUB: C = C::new("hub_vnet", "Hub VNet\n10.0.0.0/16", "network", Layer::Network)
    .tech("Azure Virtual Network")
    .describe("Hub address space 10.0.0.0/16");

/// Always inside the hub, in slot order.
const HUB_CORE: [C; 2] = [
    C::new("vpn_gateway", "VPN Gateway", "gateway", Layer::Network)
        .tech("Azure VPN Gateway")
        .describe("GatewaySubnet 10.0.0.0/27"),
    C::new("firewall", "Azure Firewall", "security", Layer::Security)
        .tech("Azure Firewall Premium")
        .describe("AzureFirewallSubnet 10.0.1.0/26"),
];

/// Optional hub residents, filling the slots after [`HUB_CORE`].
const HUB_OPTIONAL: [(&str, C); 2] = [
    (
        "has_bastion",
        C::new("bastion", "Azure Bastion", "security", Layer::Security)
            .tech("Azure Bastion")
            .describe("AzureBastionSubnet 10.0.2.0/26"),
    ),
    (
        "has_expressroute",
        C::new("expressroute", "ExpressRoute\nGateway", "gateway", Layer::Network)
            .tech("Azure ExpressRoute")
            .describe("Private circuit to on-premises"),
    ),
];

/// Shared services beside the hub. `None` means always present.
const SHARED: [(Option<&str>, C); 7] = [
    (
        None,
        C::new("log_analytics", "Log Analytics", "monitoring", Layer::Management)
            .tech("Azure Log Analytics Workspace"),
    ),
    (
        None,
        C::new("key_vault", "Key Vault", "security", Layer::Security).tech("Azure Key Vault"),
    ),
    (
        Some("has_app_gateway"),
        C::new("app_gateway", "Application\nGateway", "loadbalancer", Layer::Network)
            .tech("Azure Application Gateway WAF v2"),
    ),
    (
        Some("has_front_door"),
        C::new("front_door", "Front Door", "cdn", Layer::Network).tech("Azure Front Door Premium"),
    ),
    (
        Some("has_ddos"),
        C::new("ddos", "DDoS Protection", "security", Layer::Security)
            .tech("Azure DDoS Network Protection"),
    ),
    (
        Some("has_private_dns"),
        C::new("private_dns", "Private DNS Zones", "dns", Layer::Network).tech("Azure Private DNS"),
    ),
    (
        Some("has_sentinel"),
        C::new("sentinel", "Microsoft Sentinel", "monitoring", Layer::Security)
            .tech("Microsoft Sentinel"),
    ),
];

const ON_PREMISES: C = C::new("on_premises", "On-Premises\nDatacenter", "onprem", Layer::External)
    .tech("Corporate Network")
    .describe("192.168.0.0/16");

const SUBSCRIPTION: C = C::new("subscription", "Subscription", "subscription", Layer::Management)
    .tech("Azure Subscription");

const SPOKE_VNET: C = C::new("spoke_vnet", "Spoke VNet", "network", Layer::Network)
    .tech("Azure Virtual Network");

/// Workload services a spoke may host, in slot order. At most
/// [`CONTAINER_SLOTS`] are placed per spoke.
const SPOKE_SERVICES: [(&str, &str, C); 5] = [
    (
        "has_web",
        "web",
        C::new("web", "App Service", "webapp", Layer::Application)
            .tech("Azure App Service")
            .describe("Private endpoint"),
    ),
    (
        "has_aks",
        "aks",
        C::new("aks", "AKS Cluster", "container", Layer::Application)
            .tech("Azure Kubernetes Service"),
    ),
    (
        "has_vm",
        "vm",
        C::new("vm", "Virtual Machines", "compute", Layer::Application)
            .tech("Azure Virtual Machines"),
    ),
    (
        "has_database",
        "sql",
        C::new("sql", "SQL Database", "database", Layer::Data)
            .tech("Azure SQL Database")
            .variants(&[("cosmos", "Azure Cosmos DB"), ("postgres", "Azure Database for PostgreSQL")])
            .describe("Private endpoint"),
    ),
    (
        "has_storage",
        "storage",
        C::new("storage", "Storage Account", "storage", Layer::Data)
            .tech("Azure Storage Account")
            .describe("Private endpoint"),
    ),
];

const CONTAINS: EdgeStyle = EdgeStyle::new("contains", "", "");
const PEERING_PROTOCOL: &str = "VNet Peering";
const LOGS: EdgeStyle = EdgeStyle::new("monitoring", "diagnostics", "");

/// Address space of spoke `index` (zero-based), when it fits the 10/8 plan.
pub fn spoke_cidr(index: usize) -> Option<String> {
    let octet = index + 1;
    (octet < 256).then(|| format!("10.{octet}.0.0/16"))
}

fn peering(hub: &str, spoke: &str, index: usize) -> Connection {
    let connection = Connection::new(hub, spoke, "peering").with_protocol(PEERING_PROTOCOL);
    match spoke_cidr(index) {
        Some(cidr) => connection.with_label(format!("{HUB_CIDR} ↔ {cidr}")),
        None => connection,
    }
}

/// Build the landing zone for lowercased `text`.
pub fn generate(text: &str, lexicon: &Lexicon) -> ArchitectureGraph {
    let flags = extract_flags(FLAGS, text);
    let spokes = requested_count(text, DEFAULT_SPOKES);
    debug!(spokes, flags_set = flags.count_set(), "building hub-and-spoke");

    let mut b = GraphBuilder::new(lexicon);
    let hub_at = place_hub(spokes);
    let mut hub = HUB.instantiate(text);
    hub.position = hub_at;
    b.add(hub);

    let optional = HUB_OPTIONAL
        .iter()
        .filter(|(flag, _)| flags.get(flag))
        .map(|(_, template)| template);
    for (slot, template) in HUB_CORE.iter().chain(optional).enumerate() {
        let mut component = template.instantiate(text);
        component.position = place_contained(hub_at, slot);
        b.add(component);
        b.connect(CONTAINS.connect(HUB.id, template.id));
    }

    let shared = SHARED
        .iter()
        .filter(|(flag, _)| flag.map_or(true, |f| flags.get(f)))
        .map(|(_, template)| template);
    for (index, template) in shared.enumerate() {
        let mut component = template.instantiate(text);
        component.position = place_shared_service(index, hub_at);
        b.add(component);
    }

    if flags.get("has_onprem") {
        let mut component = ON_PREMISES.instantiate(text);
        component.position = place_hub_edge(hub_at);
        b.add(component);
    }

    connect_hub_services(&mut b);

    for index in 0..spokes {
        add_spoke(&mut b, &flags, text, index, spokes);
    }

    let title = "Azure Hub-and-Spoke Enterprise Architecture";
    let description = format!(
        "Hub VNet with shared connectivity and security services peered to {spokes} spoke subscription{}",
        if spokes == 1 { "" } else { "s" }
    );
    b.finish(
        PatternId::AzureHubSpoke.as_str(),
        title,
        &description,
        &["Hub and Spoke", "Azure Landing Zone", "Defense in Depth"],
    )
}

fn connect_hub_services(b: &mut GraphBuilder<'_>) {
    let links = [
        ("on_premises", "vpn_gateway", EdgeStyle::new("vpn", "site-to-site", "IPsec/IKEv2")),
        ("on_premises", "expressroute", EdgeStyle::new("private_link", "private peering", "BGP")),
        ("front_door", "app_gateway", EdgeStyle::new("api_call", "", "HTTPS/443")),
        ("app_gateway", "firewall", EdgeStyle::new("security_flow", "inspected traffic", "HTTPS/443")),
        ("ddos", "hub_vnet", EdgeStyle::new("security_flow", "protects", "")),
        ("private_dns", "hub_vnet", EdgeStyle::new("network_flow", "name resolution", "DNS/53")),
        ("firewall", "log_analytics", LOGS),
        ("log_analytics", "sentinel", EdgeStyle::new("monitoring", "security events", "")),
    ];
    for (from, to, style) in links {
        if b.has(from) && b.has(to) {
            b.connect(style.connect(from, to));
        }
    }
}

fn add_spoke(b: &mut GraphBuilder<'_>, flags: &Flags, text: &str, index: usize, count: usize) {
    let n = index + 1;
    let subscription_id = format!("subscription_{n}");
    let vnet_id = format!("spoke_vnet_{n}");

    let sub_at = place_radial_spoke(index, count);
    let mut subscription = SUBSCRIPTION.instantiate_as(&subscription_id, &format!("Subscription {n}"), text);
    subscription.position = sub_at;
    subscription.description = format!("Workload landing zone {n}");
    b.add(subscription);

    let vnet_at = sub_at.offset(SUBSCRIPTION_INSET.0, SUBSCRIPTION_INSET.1);
    let vnet_name = match spoke_cidr(index) {
        Some(cidr) => format!("Spoke VNet {n}\n{cidr}"),
        None => format!("Spoke VNet {n}"),
    };
    let mut vnet = SPOKE_VNET.instantiate_as(&vnet_id, &vnet_name, text);
    vnet.position = vnet_at;
    if let Some(cidr) = spoke_cidr(index) {
        vnet.description = format!("Address space {cidr}");
    }
    b.add(vnet);

    b.connect(peering(HUB.id, &vnet_id, index));
    b.connect(CONTAINS.connect(&subscription_id, &vnet_id));

    let services = SPOKE_SERVICES
        .iter()
        .filter(|(flag, _, _)| flags.get(flag))
        .take(CONTAINER_SLOTS);
    for (slot, (_, suffix, template)) in services.enumerate() {
        let id = format!("spoke{n}_{suffix}");
        let mut service = template.instantiate_as(&id, template.name, text);
        service.position = place_contained(vnet_at, slot);
        b.add(service);
        b.connect(CONTAINS.connect(&vnet_id, &id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;
    use pretty_assertions::assert_eq;

    fn build(text: &str) -> ArchitectureGraph {
        generate(&text.to_lowercase(), &Lexicon::builtin())
    }

    #[test]
    fn default_has_four_spokes_and_mandatory_hub() {
        let g = build("azure hub");
        for id in ["hub_vnet", "vpn_gateway", "firewall", "log_analytics", "key_vault"] {
            assert!(g.component(id).is_some(), "missing {id}");
        }
        assert_eq!(g.components_of_kind("subscription").count(), DEFAULT_SPOKES);
        assert_eq!(g.components.len(), 5 + 2 * DEFAULT_SPOKES);
        assert_eq!(g.component("firewall").unwrap().technology, "Azure Firewall Premium");
        g.validate().unwrap();
    }

    #[test]
    fn each_spoke_is_peered_and_contained_once() {
        let g = build("azure hub and spoke para 7 suscripciones");
        assert_eq!(g.components_of_kind("subscription").count(), 7);
        for n in 1..=7 {
            let vnet = format!("spoke_vnet_{n}");
            let sub = format!("subscription_{n}");
            let peerings: Vec<_> = g
                .connections
                .iter()
                .filter(|c| c.kind == "peering" && c.to == vnet)
                .collect();
            assert_eq!(peerings.len(), 1);
            assert_eq!(peerings[0].from, "hub_vnet");
            let contains = g
                .connections
                .iter()
                .filter(|c| c.kind == "contains" && c.from == sub && c.to == vnet)
                .count();
            assert_eq!(contains, 1);
        }
    }

    #[test]
    fn peering_label_carries_both_ranges() {
        let g = build("azure hub with 2 spokes");
        let label = g.outgoing("hub_vnet").find(|c| c.to == "spoke_vnet_2").and_then(|c| c.label.clone());
        assert_eq!(label.as_deref(), Some("10.0.0.0/16 ↔ 10.2.0.0/16"));
        assert_eq!(spoke_cidr(254).as_deref(), Some("10.255.0.0/16"));
        assert_eq!(spoke_cidr(255), None);
    }

    #[test]
    fn spoke_services_are_capped_and_nested() {
        let g = build("azure hub, 1 spoke: web app, aks, virtual machine, sql database and blob storage");
        let nested: Vec<_> = g.outgoing("spoke_vnet_1").filter(|c| c.kind == "contains").map(|c| c.to.as_str()).collect();
        assert_eq!(nested, vec!["spoke1_web", "spoke1_aks", "spoke1_vm", "spoke1_sql"]);
        let vnet = Rect::of(g.component("spoke_vnet_1").unwrap());
        let sub = Rect::of(g.component("subscription_1").unwrap());
        assert!(sub.contains(&vnet));
        for id in &nested {
            assert!(vnet.contains(&Rect::of(g.component(id).unwrap())));
        }
    }

    #[test]
    fn optional_services_follow_flags() {
        let g = build("azure hub with bastion, expressroute from the datacenter and sentinel");
        for id in ["bastion", "expressroute", "on_premises", "sentinel"] {
            assert!(g.component(id).is_some(), "missing {id}");
        }
        assert!(g.component("front_door").is_none());
        let hub = Rect::of(g.component("hub_vnet").unwrap());
        assert!(hub.contains(&Rect::of(g.component("expressroute").unwrap())));
        assert!(g.outgoing("on_premises").any(|c| c.to == "expressroute"));
        g.validate().unwrap();
    }
}
