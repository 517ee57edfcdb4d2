use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use archsketch_core::layout::{place_grid, GRID_CELL_HEIGHT, GRID_CELL_WIDTH, GRID_ORIGIN};
use archsketch_core::synthesis::GraphBuilder;
use archsketch_core::{ArchitectureGraph, Component, Connection, Lexicon, Position};

pub const AI_DIAGRAM_TYPE: &str = "ai_generated";
const COLUMNS: usize = 4;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LlmGraph {
    diagram_type: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(alias = "nodes")]
    components: Vec<LlmComponent>,
    #[serde(alias = "edges")]
    connections: Vec<LlmConnection>,
    patterns: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LlmComponent {
    id: Option<String>,
    name: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    kind: Option<String>,
    technology: Option<String>,
    description: Option<String>,
    layer: Option<String>,
    icon_category: Option<String>,
    position: Option<Position>,
}

#[derive(Debug, Deserialize)]
struct LlmConnection {
    #[serde(alias = "source")]
    from: String,
    #[serde(alias = "target")]
    to: String,
    #[serde(default, rename = "type", alias = "kind")]
    kind: Option<String>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    protocol: Option<String>,
}

/// Parse raw LLM output into a graph. Returns `None` when there is no JSON
/// object or it names no components, so the caller can fall back.
pub fn parse_llm_output(raw: &str, lexicon: &Lexicon) -> Option<ArchitectureGraph> {
    let json_str = extract_json_object(raw)?;
    let parsed: LlmGraph = match serde_json::from_str(json_str) {
        Ok(g) => g,
        Err(e) => {
            debug!(error = %e, "LLM output is not a graph object");
            return None;
        }
    };
    if parsed.components.is_empty() {
        return None;
    }
    Some(normalize(parsed, lexicon))
}

/// The outermost `{...}` span, which also strips code fences and chatter.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

fn unique_id(base: String, index: usize, taken: &mut HashSet<String>) -> String {
    let base = if base.is_empty() {
        format!("component_{}", index + 1)
    } else {
        base
    };
    let mut id = base.clone();
    let mut n = 2;
    while !taken.insert(id.clone()) {
        id = format!("{base}_{n}");
        n += 1;
    }
    id
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn normalize(parsed: LlmGraph, lexicon: &Lexicon) -> ArchitectureGraph {
    let mut taken = HashSet::new();
    let mut components = Vec::with_capacity(parsed.components.len());
    // (id, lowercased name) for endpoint resolution
    let mut names: Vec<(String, String)> = Vec::new();

    for (index, c) in parsed.components.into_iter().enumerate() {
        let name = non_empty(c.name);
        let raw_id = non_empty(c.id).or_else(|| name.clone()).unwrap_or_default();
        let id = unique_id(slug(&raw_id), index, &mut taken);
        let name = name.unwrap_or_else(|| id.clone());
        let lowered = name.to_lowercase();
        let hint = lexicon.matches(&lowered).next();
        let kind = non_empty(c.kind)
            .map(|k| k.to_lowercase())
            .or_else(|| hint.map(|e| e.kind.to_string()))
            .unwrap_or_else(|| "service".to_string());
        let technology = non_empty(c.technology)
            .or_else(|| hint.map(|e| e.technology.to_string()))
            .unwrap_or_default();
        let layer = non_empty(c.layer)
            .map(|l| l.to_lowercase())
            .or_else(|| hint.map(|e| e.layer.as_str().to_string()))
            .unwrap_or_default();
        let position = c
            .position
            .unwrap_or_else(|| place_grid(index, COLUMNS, GRID_CELL_WIDTH, GRID_CELL_HEIGHT, GRID_ORIGIN));

        if let Some(original) = raw_id_alias(&raw_id, &id) {
            names.push((id.clone(), original));
        }
        names.push((id.clone(), lowered));
        components.push(Component {
            id,
            name,
            kind,
            technology,
            description: non_empty(c.description).unwrap_or_default(),
            layer,
            icon_category: non_empty(c.icon_category).unwrap_or_default(),
            position,
        });
    }

    let mut builder = GraphBuilder::new(lexicon);
    for component in components {
        builder.add(component);
    }

    let resolve = |endpoint: &str| -> Option<String> {
        let lowered = endpoint.trim().to_lowercase();
        names
            .iter()
            .find(|(id, alias)| *id == lowered || *alias == lowered || *id == slug(&lowered))
            .map(|(id, _)| id.clone())
    };
    for edge in parsed.connections {
        match (resolve(&edge.from), resolve(&edge.to)) {
            (Some(from), Some(to)) if from != to => {
                let mut connection = Connection::new(from, to, non_empty(edge.kind).unwrap_or_else(|| "data_flow".to_string()));
                connection.label = non_empty(edge.label);
                connection.protocol = non_empty(edge.protocol);
                builder.connect(connection);
            }
            _ => warn!(from = %edge.from, to = %edge.to, "dropping LLM edge with unknown or identical endpoints"),
        }
    }

    let diagram_type = non_empty(parsed.diagram_type).unwrap_or_else(|| AI_DIAGRAM_TYPE.to_string());
    let title = non_empty(parsed.title).unwrap_or_else(|| "System Architecture".to_string());
    let description = non_empty(parsed.description).unwrap_or_default();
    let patterns: Vec<&str> = parsed.patterns.iter().map(String::as_str).collect();
    builder.finish(&diagram_type, &title, &description, &patterns)
}

/// The id the model used, lowercased, when slugging changed it.
fn raw_id_alias(raw: &str, id: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    (!lowered.is_empty() && lowered != id).then_some(lowered)
}
