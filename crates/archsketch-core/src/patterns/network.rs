//! VNet with tiered subnets behind edge routing and optional hybrid links.

use crate::classifier::PatternId;
use crate::flags::FlagRule;
use crate::model::Layer;
use crate::synthesis::{always, link, path, unless_any, when, ComponentTemplate as C, EdgeStyle, PatternSpec};

const TRAFFIC: EdgeStyle = EdgeStyle::new("network_flow", "", "HTTPS/443");
const EAST_WEST: EdgeStyle = EdgeStyle::new("network_flow", "", "");

pub static NETWORK: PatternSpec = PatternSpec {
    id: PatternId::Network,
    title: "Network Architecture",
    description: "Virtual network segmentation with edge routing and hybrid connectivity",
    flags: &[
        FlagRule::new("has_subnet", &["subnet", "subred"]),
        FlagRule::new("has_vpn", &["vpn", "gateway", "expressroute", "site-to-site"]),
        FlagRule::new("has_lb", &["load balancer", "balanceador"]),
        FlagRule::new("has_tm", &["traffic manager"]),
        FlagRule::new("has_dns", &["dns"]),
        FlagRule::new("has_peering", &["peering", "peered"]),
        FlagRule::new("has_onprem", &["on-prem", "onprem", "datacenter", "data center", "branch office"]),
    ],
    tiers: &[Layer::External, Layer::Network, Layer::Infrastructure],
    rules: &[
        always(C::new("internet", "Internet", "external", Layer::External).tech("Public Internet").icon("networking")),
        when("has_tm", C::new("traffic_manager", "Traffic Manager", "dns", Layer::External)
            .tech("Azure Traffic Manager")
            .variants(&[("route 53", "Amazon Route 53")])
            .describe("Priority routing across regions")),
        when("has_dns", C::new("dns", "DNS Zone", "dns", Layer::External).tech("Azure DNS")),
        when("has_onprem", C::new("on_premises", "On-Premises\nNetwork", "onprem", Layer::External)
            .tech("Corporate Datacenter")
            .describe("192.168.0.0/16")),
        when("has_lb", C::new("load_balancer", "Load Balancer", "loadbalancer", Layer::Network)
            .tech("Azure Load Balancer")
            .variants(&[("application gateway", "Azure Application Gateway"), ("aws", "Elastic Load Balancing")])),
        when("has_vpn", C::new("vpn_gateway", "VPN Gateway", "gateway", Layer::Network)
            .tech("Azure VPN Gateway")
            .variants(&[("expressroute", "ExpressRoute Gateway")])
            .describe("GatewaySubnet 10.0.255.0/27")),
        always(C::new("vnet", "Virtual Network\n10.0.0.0/16", "network", Layer::Network)
            .tech("Azure Virtual Network")
            .variants(&[("vpc", "VPC")])
            .describe("Address space 10.0.0.0/16")),
        when("has_subnet", C::new("subnet_web", "Web Subnet\n10.0.1.0/24", "subnet", Layer::Network).tech("Subnet").describe("10.0.1.0/24")).inside("vnet", 0),
        when("has_subnet", C::new("subnet_app", "App Subnet\n10.0.2.0/24", "subnet", Layer::Network).tech("Subnet").describe("10.0.2.0/24")).inside("vnet", 1),
        when("has_subnet", C::new("subnet_data", "Data Subnet\n10.0.3.0/24", "subnet", Layer::Network).tech("Subnet").describe("10.0.3.0/24")).inside("vnet", 2),
        unless_any(&["has_subnet"], C::new("subnet_default", "Default Subnet\n10.0.0.0/24", "subnet", Layer::Network).tech("Subnet").describe("10.0.0.0/24")).inside("vnet", 0),
        when("has_peering", C::new("peered_vnet", "Peered VNet\n10.1.0.0/16", "network", Layer::Infrastructure)
            .tech("Azure Virtual Network")
            .describe("Address space 10.1.0.0/16")),
    ],
    connections: &[
        path(&["internet", "traffic_manager", "load_balancer", "vnet"], TRAFFIC),
        link("dns", "vnet", EdgeStyle::new("network_flow", "name resolution", "DNS/53")),
        link("on_premises", "vpn_gateway", EdgeStyle::new("vpn", "site-to-site", "IPsec/IKEv2")),
        link("vpn_gateway", "vnet", EAST_WEST),
        path(&["subnet_web", "subnet_app", "subnet_data"], EAST_WEST),
        link("vnet", "peered_vnet", EdgeStyle::new("peering", "10.0.0.0/16 ↔ 10.1.0.0/16", "VNet Peering")),
    ],
    patterns: &["Network Segmentation", "Defense in Depth"],
};
