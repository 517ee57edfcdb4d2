use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::GraphError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, schemars::JsonSchema)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Coarse architectural tier. Serialized into `Component::layer` as its
/// lowercase name; the field itself stays a free string so external layers
/// and LLM output can carry tiers outside this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    External,
    Presentation,
    Security,
    Network,
    Application,
    Integration,
    Data,
    Analytics,
    Infrastructure,
    Management,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::External => "external",
            Layer::Presentation => "presentation",
            Layer::Security => "security",
            Layer::Network => "network",
            Layer::Application => "application",
            Layer::Integration => "integration",
            Layer::Data => "data",
            Layer::Analytics => "analytics",
            Layer::Infrastructure => "infrastructure",
            Layer::Management => "management",
        }
    }
}

/// One architectural element of a generated diagram.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct Component {
    pub id: String,
    /// Display label. May contain `\n` for multi-line rendering.
    pub name: String,
    /// Semantic tag (`network`, `database`, `api`, ...). Open-ended.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub layer: String,
    /// Key into the icon library. Never empty on generated output.
    pub icon_category: String,
    #[serde(default)]
    pub position: Position,
}

/// A directed edge between two components of the same graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct Connection {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl Connection {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind: kind.into(),
            label: None,
            protocol: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }
}

/// The complete output of one synthesis call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchitectureGraph {
    pub diagram_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub components: Vec<Component>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl ArchitectureGraph {
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.id.as_str())
    }

    pub fn components_of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Component> {
        self.components.iter().filter(move |c| c.kind == kind)
    }

    /// Connections leaving `id`, in emission order.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.from == id)
    }

    /// Check the structural invariants: non-empty icons, unique ids and no
    /// dangling edges. Reports the first violation found.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for component in &self.components {
            if component.icon_category.trim().is_empty() {
                return Err(GraphError::MissingIcon(component.id.clone()));
            }
            if !seen.insert(component.id.as_str()) {
                return Err(GraphError::DuplicateId(component.id.clone()));
            }
        }
        for connection in &self.connections {
            for endpoint in [&connection.from, &connection.to] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(GraphError::DanglingEdge {
                        from: connection.from.clone(),
                        to: connection.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Add a component to a stored copy. Rejects duplicates and empty icons.
    pub fn add_component(&mut self, component: Component) -> Result<(), GraphError> {
        if component.icon_category.trim().is_empty() {
            return Err(GraphError::MissingIcon(component.id));
        }
        if self.component(&component.id).is_some() {
            return Err(GraphError::DuplicateId(component.id));
        }
        push_unique(&mut self.layers, &component.layer);
        push_unique(&mut self.technologies, &component.technology);
        self.components.push(component);
        Ok(())
    }

    /// Add an edge to a stored copy. Both endpoints must already exist.
    pub fn add_connection(&mut self, connection: Connection) -> Result<(), GraphError> {
        for endpoint in [&connection.from, &connection.to] {
            if self.component(endpoint).is_none() {
                return Err(GraphError::DanglingEdge {
                    from: connection.from.clone(),
                    to: connection.to.clone(),
                    missing: endpoint.clone(),
                });
            }
        }
        self.connections.push(connection);
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn to_json_pretty(&self) -> Result<String, GraphError> {
        serde_json::to_string_pretty(self).map_err(GraphError::from)
    }
}

/// Append `value` unless it is empty or already present. Keeps first-seen order.
pub(crate) fn push_unique(set: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !set.iter().any(|v| v == value) {
        set.push(value.to_string());
    }
}
