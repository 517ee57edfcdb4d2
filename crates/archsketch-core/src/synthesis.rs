//! Declarative pattern specs and the one engine that turns them into graphs.
//!
//! A [`PatternSpec`] is an ordered checklist: flags to extract, component
//! rules gated on those flags, and connection rules applied to whatever
//! components ended up present. The engine walks it front to back, so the
//! emitted order of components and connections is exactly the rule order.

use std::collections::HashSet;

use crate::classifier::PatternId;
use crate::flags::{extract_flags, FlagRule, Flags};
use crate::layout::{footprint, place_contained, LayerRows};
use crate::lexicon::Lexicon;
use crate::model::{push_unique, ArchitectureGraph, Component, Connection, Layer, Position};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComponentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    pub technology: &'static str,
    /// `(keyword, technology)` pairs; the first keyword found in the text
    /// replaces `technology`.
    pub variants: &'static [(&'static str, &'static str)],
    pub description: &'static str,
    pub layer: Layer,
    /// Empty means "derive from kind via the lexicon".
    pub icon: &'static str,
}

impl ComponentTemplate {
    pub const fn new(id: &'static str, name: &'static str, kind: &'static str, layer: Layer) -> Self {
        Self {
            id,
            name,
            kind,
            technology: "",
            variants: &[],
            description: "",
            layer,
            icon: "",
        }
    }

    pub const fn tech(self, technology: &'static str) -> Self {
        Self { technology, ..self }
    }

    pub const fn variants(self, variants: &'static [(&'static str, &'static str)]) -> Self {
        Self { variants, ..self }
    }

    pub const fn describe(self, description: &'static str) -> Self {
        Self { description, ..self }
    }

    pub const fn icon(self, icon: &'static str) -> Self {
        Self { icon, ..self }
    }

    pub fn technology_for(&self, text: &str) -> &'static str {
        self.variants
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, tech)| *tech)
            .unwrap_or(self.technology)
    }

    /// Build the component under its own id, unplaced.
    pub fn instantiate(&self, text: &str) -> Component {
        self.instantiate_as(self.id, self.name, text)
    }

    /// Build the component under a caller-chosen id and name, for templates
    /// stamped out several times.
    pub fn instantiate_as(&self, id: &str, name: &str, text: &str) -> Component {
        Component {
            id: id.to_string(),
            name: name.to_string(),
            kind: self.kind.to_string(),
            technology: self.technology_for(text).to_string(),
            description: self.description.to_string(),
            layer: self.layer.as_str().to_string(),
            icon_category: self.icon.to_string(),
            position: Position::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    Always,
    Flag(&'static str),
    /// Fills a gap: holds when none of the named flags are set.
    NoneOf(&'static [&'static str]),
}

impl Condition {
    pub fn holds(&self, flags: &Flags) -> bool {
        match self {
            Condition::Always => true,
            Condition::Flag(name) => flags.get(name),
            Condition::NoneOf(names) => names.iter().all(|n| !flags.get(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Next free spot in the component's layer row.
    Tier,
    /// Inside a container component. Emits a `contains` edge from the
    /// parent. Falls back to [`Placement::Tier`] when the parent is absent.
    Nested { parent: &'static str, slot: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub when: Condition,
    pub place: Placement,
    pub component: ComponentTemplate,
}

impl Rule {
    pub const fn inside(self, parent: &'static str, slot: usize) -> Self {
        Self {
            place: Placement::Nested { parent, slot },
            ..self
        }
    }
}

pub const fn always(component: ComponentTemplate) -> Rule {
    Rule {
        when: Condition::Always,
        place: Placement::Tier,
        component,
    }
}

pub const fn when(flag: &'static str, component: ComponentTemplate) -> Rule {
    Rule {
        when: Condition::Flag(flag),
        place: Placement::Tier,
        component,
    }
}

pub const fn unless_any(flags: &'static [&'static str], component: ComponentTemplate) -> Rule {
    Rule {
        when: Condition::NoneOf(flags),
        place: Placement::Tier,
        component,
    }
}

/// Semantic tag and annotations shared by every edge a rule emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStyle {
    pub kind: &'static str,
    pub label: &'static str,
    pub protocol: &'static str,
}

impl EdgeStyle {
    pub const fn new(kind: &'static str, label: &'static str, protocol: &'static str) -> Self {
        Self { kind, label, protocol }
    }

    pub fn connect(&self, from: &str, to: &str) -> Connection {
        let mut c = Connection::new(from, to, self.kind);
        if !self.label.is_empty() {
            c = c.with_label(self.label);
        }
        if !self.protocol.is_empty() {
            c = c.with_protocol(self.protocol);
        }
        c
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionRule {
    /// One edge if both endpoints exist.
    Link { from: &'static str, to: &'static str, style: EdgeStyle },
    /// Consecutive edges through the listed ids that exist, skipping absent ones.
    Path { ids: &'static [&'static str], style: EdgeStyle },
    /// Cartesian product of two component kinds.
    AllToAll { from_kind: &'static str, to_kind: &'static str, style: EdgeStyle },
    /// One edge from a fixed hub to every component of a kind.
    HubToMany { hub: &'static str, to_kind: &'static str, style: EdgeStyle },
    /// Every component to the next one, in creation order.
    Chain { style: EdgeStyle },
}

pub const fn link(from: &'static str, to: &'static str, style: EdgeStyle) -> ConnectionRule {
    ConnectionRule::Link { from, to, style }
}

pub const fn path(ids: &'static [&'static str], style: EdgeStyle) -> ConnectionRule {
    ConnectionRule::Path { ids, style }
}

pub const fn all_to_all(from_kind: &'static str, to_kind: &'static str, style: EdgeStyle) -> ConnectionRule {
    ConnectionRule::AllToAll { from_kind, to_kind, style }
}

pub const fn hub_to_many(hub: &'static str, to_kind: &'static str, style: EdgeStyle) -> ConnectionRule {
    ConnectionRule::HubToMany { hub, to_kind, style }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternSpec {
    pub id: PatternId,
    pub title: &'static str,
    pub description: &'static str,
    pub flags: &'static [FlagRule],
    /// Row order for layered placement, top to bottom.
    pub tiers: &'static [Layer],
    pub rules: &'static [Rule],
    pub connections: &'static [ConnectionRule],
    pub patterns: &'static [&'static str],
}

/// Accumulates one graph while upholding its invariants: unique ids,
/// non-empty icons, no dangling edges. Violations are programming errors in
/// a generator, so they assert in debug builds and are dropped in release.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    lexicon: &'a Lexicon,
    components: Vec<Component>,
    connections: Vec<Connection>,
    ids: HashSet<String>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            components: Vec::new(),
            connections: Vec::new(),
            ids: HashSet::new(),
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn position_of(&self, id: &str) -> Option<Position> {
        self.components.iter().find(|c| c.id == id).map(|c| c.position)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn add(&mut self, mut component: Component) {
        if component.icon_category.trim().is_empty() {
            component.icon_category = self.lexicon.icon_for(&component.kind).to_string();
        }
        let fresh = self.ids.insert(component.id.clone());
        debug_assert!(fresh, "duplicate component id '{}'", component.id);
        if fresh {
            self.components.push(component);
        }
    }

    pub fn connect(&mut self, connection: Connection) {
        let known = self.has(&connection.from) && self.has(&connection.to);
        debug_assert!(
            known,
            "connection {} -> {} references an unknown component",
            connection.from, connection.to
        );
        if known {
            self.connections.push(connection);
        }
    }

    /// Ids of components of `kind`, in creation order.
    pub fn ids_of_kind(&self, kind: &str) -> Vec<String> {
        self.components
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.id.clone())
            .collect()
    }

    pub fn apply(&mut self, rule: &ConnectionRule) {
        match *rule {
            ConnectionRule::Link { from, to, style } => {
                if self.has(from) && self.has(to) {
                    self.connect(style.connect(from, to));
                }
            }
            ConnectionRule::Path { ids, style } => {
                let present: Vec<&str> = ids.iter().copied().filter(|id| self.has(id)).collect();
                for pair in present.windows(2) {
                    self.connect(style.connect(pair[0], pair[1]));
                }
            }
            ConnectionRule::AllToAll { from_kind, to_kind, style } => {
                let sources = self.ids_of_kind(from_kind);
                let targets = self.ids_of_kind(to_kind);
                for from in &sources {
                    for to in targets.iter().filter(|t| *t != from) {
                        self.connect(style.connect(from, to));
                    }
                }
            }
            ConnectionRule::HubToMany { hub, to_kind, style } => {
                if !self.has(hub) {
                    return;
                }
                for to in self.ids_of_kind(to_kind).iter().filter(|t| *t != hub) {
                    self.connect(style.connect(hub, to));
                }
            }
            ConnectionRule::Chain { style } => {
                let ids: Vec<String> = self.components.iter().map(|c| c.id.clone()).collect();
                for pair in ids.windows(2) {
                    self.connect(style.connect(&pair[0], &pair[1]));
                }
            }
        }
    }

    /// Seal the graph. Summary sets are deduplicated in first-seen order.
    pub fn finish(
        self,
        diagram_type: &str,
        title: &str,
        description: &str,
        patterns: &[&str],
    ) -> ArchitectureGraph {
        let mut layers = Vec::new();
        let mut technologies = Vec::new();
        for c in &self.components {
            push_unique(&mut layers, &c.layer);
            push_unique(&mut technologies, &c.technology);
        }
        let mut pattern_names = Vec::new();
        for p in patterns {
            push_unique(&mut pattern_names, p);
        }
        ArchitectureGraph {
            diagram_type: diagram_type.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            components: self.components,
            connections: self.connections,
            layers,
            technologies,
            patterns: pattern_names,
        }
    }
}

fn nests(rule: &Rule, present: &HashSet<&str>) -> bool {
    match rule.place {
        Placement::Nested { parent, .. } => present.contains(parent),
        Placement::Tier => false,
    }
}

/// Run one spec against lowercased `text`.
pub fn synthesize(spec: &PatternSpec, text: &str, lexicon: &Lexicon) -> ArchitectureGraph {
    let flags = extract_flags(spec.flags, text);
    let selected: Vec<&Rule> = spec.rules.iter().filter(|r| r.when.holds(&flags)).collect();
    let present: HashSet<&str> = selected.iter().map(|r| r.component.id).collect();

    let mut tiers: Vec<Layer> = spec.tiers.to_vec();
    for rule in selected.iter().filter(|r| !nests(r, &present)) {
        if !tiers.contains(&rule.component.layer) {
            tiers.push(rule.component.layer);
        }
    }
    let mut rows = LayerRows::new(&tiers, |tier| {
        selected
            .iter()
            .filter(|r| !nests(r, &present) && r.component.layer == tier)
            .map(|r| footprint(r.component.kind).height)
            .reduce(f64::max)
    });

    let mut builder = GraphBuilder::new(lexicon);
    for rule in &selected {
        let mut component = rule.component.instantiate(text);
        let parent = match rule.place {
            Placement::Nested { parent, slot } => builder
                .position_of(parent)
                .map(|at| (parent, place_contained(at, slot))),
            Placement::Tier => None,
        };
        component.position = match parent {
            Some((_, at)) => at,
            None => rows.place(rule.component.layer, footprint(rule.component.kind)),
        };
        let id = component.id.clone();
        builder.add(component);
        if let Some((parent, _)) = parent {
            builder.connect(Connection::new(parent, id, "contains"));
        }
    }

    for rule in spec.connections {
        builder.apply(rule);
    }

    builder.finish(spec.id.as_str(), spec.title, spec.description, spec.patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::FlagRule;
    use crate::layout::{Rect, CONTAINER};
    use pretty_assertions::assert_eq;

    const FLAGS: &[FlagRule] = &[
        FlagRule::new("has_cache", &["redis"]),
        FlagRule::new("has_queue", &["queue"]),
    ];

    const RULES: &[Rule] = &[
        always(ComponentTemplate::new("web", "Web", "webapp", Layer::Presentation)),
        always(ComponentTemplate::new("api_a", "API A", "api", Layer::Application)),
        always(ComponentTemplate::new("api_b", "API B", "api", Layer::Application)),
        always(ComponentTemplate::new("vnet", "VNet", "network", Layer::Network)),
        when("has_cache", ComponentTemplate::new("cache", "Cache", "cache", Layer::Data)).inside("vnet", 0),
        when("has_queue", ComponentTemplate::new("queue", "Queue", "queue", Layer::Integration)),
        unless_any(&["has_cache"], ComponentTemplate::new("db", "DB", "database", Layer::Data).tech("PostgreSQL").variants(&[("mysql", "MySQL")])),
    ];

    const SPEC: PatternSpec = PatternSpec {
        id: PatternId::Application,
        title: "T",
        description: "D",
        flags: FLAGS,
        tiers: &[Layer::Presentation, Layer::Application, Layer::Network, Layer::Data],
        rules: RULES,
        connections: &[
            all_to_all("webapp", "api", EdgeStyle::new("api_call", "", "HTTPS/443")),
            path(&["api_a", "queue", "cache"], EdgeStyle::new("data_flow", "", "")),
            link("api_b", "db", EdgeStyle::new("data_flow", "SQL", "TCP/5432")),
        ],
        patterns: &["Layered", "Layered"],
    };

    #[test]
    fn flags_gate_components_in_rule_order() {
        let g = synthesize(&SPEC, "uses mysql", &Lexicon::builtin());
        let ids: Vec<_> = g.component_ids().collect();
        assert_eq!(ids, vec!["web", "api_a", "api_b", "vnet", "db"]);
        assert_eq!(g.component("db").unwrap().technology, "MySQL");
        assert!(g.components.iter().all(|c| !c.icon_category.is_empty()));
        assert_eq!(g.patterns, vec!["Layered".to_string()]);
    }

    #[test]
    fn connection_rules_skip_missing_endpoints() {
        let g = synthesize(&SPEC, "plain", &Lexicon::builtin());
        let edges: Vec<_> = g.connections.iter().map(|c| (c.from.as_str(), c.to.as_str())).collect();
        assert_eq!(edges, vec![("web", "api_a"), ("web", "api_b"), ("api_b", "db")]);
        g.validate().unwrap();
    }

    #[test]
    fn nested_component_is_contained_and_linked() {
        let g = synthesize(&SPEC, "redis and a queue", &Lexicon::builtin());
        let vnet = Rect::of(g.component("vnet").unwrap());
        let cache = Rect::of(g.component("cache").unwrap());
        assert_eq!(vnet.width, CONTAINER.width);
        assert!(vnet.contains(&cache));
        assert_eq!(g.connections[0], Connection::new("vnet", "cache", "contains"));
        assert!(g.component("db").is_none());
        let path: Vec<_> = g
            .connections
            .iter()
            .filter(|c| c.kind == "data_flow")
            .map(|c| (c.from.as_str(), c.to.as_str()))
            .collect();
        assert_eq!(path, vec![("api_a", "queue"), ("queue", "cache")]);
    }

    #[test]
    fn tier_rows_follow_declared_order() {
        let g = synthesize(&SPEC, "", &Lexicon::builtin());
        assert_eq!(g.component("web").unwrap().position.y, 50.0);
        assert_eq!(g.component("api_b").unwrap().position, Position::new(350.0, 200.0));
        assert_eq!(g.component("vnet").unwrap().position.y, 350.0);
        assert_eq!(g.component("db").unwrap().position.y, 900.0);
    }

    #[test]
    fn hub_to_many_and_chain() {
        let lexicon = Lexicon::builtin();
        let mut b = GraphBuilder::new(&lexicon);
        for id in ["hub", "s1", "s2"] {
            b.add(ComponentTemplate::new("x", "X", "network", Layer::Network).instantiate_as(id, id, ""));
        }
        b.apply(&hub_to_many("hub", "network", EdgeStyle::new("peering", "", "")));
        b.apply(&ConnectionRule::Chain { style: EdgeStyle::new("data_flow", "", "") });
        let g = b.finish("t", "t", "", &[]);
        let edges: Vec<_> = g.connections.iter().map(|c| (c.from.as_str(), c.to.as_str(), c.kind.as_str())).collect();
        assert_eq!(
            edges,
            vec![
                ("hub", "s1", "peering"),
                ("hub", "s2", "peering"),
                ("hub", "s1", "data_flow"),
                ("s1", "s2", "data_flow"),
            ]
        );
        assert_eq!(g.components[0].icon_category, "networking");
    }
}
