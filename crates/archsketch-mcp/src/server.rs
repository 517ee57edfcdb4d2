use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Deserialize;
use tracing::info;

use archsketch_core::layout::{footprint, GRID_ORIGIN};
use archsketch_core::{
    to_drawio, ArchitectureGraph, Component, Connection, DiagramStore, MemoryStore, PatternId,
    Position, Sketcher,
};
use archsketch_suggest::{LlmGenerator, TextGenerator};

/// Vertical gap left between the lowest box and an appended component.
const APPEND_GAP: f64 = 50.0;

const INSTRUCTIONS: &str = "archsketch turns a free-text architecture description into a \
positioned component graph.\n\n\
Typical flow: call generate_diagram with the user's description (optionally a diagram_type \
from list_patterns), then refine the stored diagram with add_component, add_connection and \
update_title, and finish with export_drawio. Diagrams live in memory for the lifetime of \
this server and are addressed by the id generate_diagram returns.\n\n\
classify and extract_flags explain which pattern a text selects and which optional \
components it switches on, without storing anything.";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ClassifyRequest {
    /// Free-text architecture description
    text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct ExtractFlagsRequest {
    /// Pattern id as returned by list_patterns, e.g. "aws_architecture"
    pattern_id: String,
    /// Free-text architecture description
    text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct GenerateDiagramRequest {
    /// Free-text architecture description, any language
    description: String,
    /// Pattern id or short alias ("aws", "kubernetes", ...). Omit or pass "auto" to classify the text.
    diagram_type: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DiagramIdRequest {
    /// Id returned by generate_diagram, e.g. "diagram-1"
    diagram_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AddComponentRequest {
    /// Diagram to modify
    diagram_id: String,
    /// New component id, unique within the diagram
    id: String,
    /// Display name
    name: String,
    /// Semantic type, e.g. "database", "api", "queue"
    kind: String,
    /// Product or technology, e.g. "PostgreSQL"
    technology: Option<String>,
    description: Option<String>,
    /// Architectural tier. Defaults to "application".
    layer: Option<String>,
    /// Icon library key. Defaults to the icon usually drawn for `kind`.
    icon_category: Option<String>,
    /// Canvas position. Defaults to a free row below the existing boxes.
    position: Option<Position>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct AddConnectionRequest {
    /// Diagram to modify
    diagram_id: String,
    /// Source component id
    from: String,
    /// Target component id
    to: String,
    /// Edge type, e.g. "api_call", "data_flow". Defaults to "data_flow".
    kind: Option<String>,
    /// Short label drawn on the edge
    label: Option<String>,
    /// Protocol, e.g. "HTTPS", "gRPC"
    protocol: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct UpdateTitleRequest {
    /// Diagram to modify
    diagram_id: String,
    /// New title
    title: String,
}

/// Below every existing box, aligned to the grid origin.
pub fn append_position(graph: &ArchitectureGraph) -> Position {
    let bottom = graph
        .components
        .iter()
        .map(|c| c.position.y + footprint(&c.kind).height)
        .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |a| a.max(y))));
    match bottom {
        Some(y) => Position::new(GRID_ORIGIN.x, y + APPEND_GAP),
        None => GRID_ORIGIN,
    }
}

fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => Ok(CallToolResult::error(vec![Content::text(format!("Serialization failed: {e}"))])),
    }
}

fn error_result(message: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(message.into())]))
}

#[derive(Clone)]
pub struct ArchsketchServer {
    tool_router: ToolRouter<Self>,
    store: MemoryStore,
    sketcher: Arc<Sketcher>,
    generator: Option<Arc<LlmGenerator>>,
}

#[tool_router]
impl ArchsketchServer {
    pub fn new(sketcher: Sketcher, generator: Option<LlmGenerator>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            store: MemoryStore::new(),
            sketcher: Arc::new(sketcher),
            generator: generator.map(Arc::new),
        }
    }

    #[tool(description = "List the architecture pattern ids generate_diagram accepts as diagram_type")]
    fn list_patterns(&self) -> Result<CallToolResult, McpError> {
        let ids: Vec<&str> = PatternId::ALL.iter().map(|p| p.as_str()).collect();
        Ok(CallToolResult::success(vec![Content::text(ids.join("\n"))]))
    }

    #[tool(description = "Return the pattern id a description would be generated with")]
    fn classify(&self, Parameters(req): Parameters<ClassifyRequest>) -> Result<CallToolResult, McpError> {
        let pattern = self.sketcher.classify(&req.text);
        Ok(CallToolResult::success(vec![Content::text(pattern.as_str())]))
    }

    #[tool(
        description = "Return the boolean feature flags a pattern derives from a description, as a JSON object of flag name to value. Unknown pattern ids give an empty object."
    )]
    fn extract_flags(&self, Parameters(req): Parameters<ExtractFlagsRequest>) -> Result<CallToolResult, McpError> {
        let flags = archsketch_core::extract_flags_for_pattern(&req.pattern_id, &req.text);
        json_result(&flags)
    }

    #[tool(
        description = "Generate a positioned architecture diagram from free text and store it. Returns {diagram_id, diagram} where diagram is {diagram_type, title, description, components: [{id, name, type, technology, description, layer, icon_category, position: {x, y}}], connections: [{from, to, type, label?, protocol?}], layers, technologies, patterns}. Uses the configured LLM when available and falls back to the rule engine."
    )]
    async fn generate_diagram(
        &self,
        Parameters(req): Parameters<GenerateDiagramRequest>,
    ) -> Result<CallToolResult, McpError> {
        let requested = req.diagram_type.as_deref().unwrap_or("auto");
        let generator = self.generator.as_deref().map(|g| g as &dyn TextGenerator);
        let graph = archsketch_suggest::generate_diagram(&self.sketcher, generator, &req.description, requested).await;
        let id = match self.store.insert(graph.clone()) {
            Ok(id) => id,
            Err(e) => return error_result(format!("Failed to store diagram: {e}")),
        };
        info!(diagram_id = %id, diagram_type = %graph.diagram_type, "stored diagram");
        json_result(&serde_json::json!({ "diagram_id": id, "diagram": graph }))
    }

    #[tool(description = "List stored diagram ids with their type and title, one per line")]
    fn list_diagrams(&self) -> Result<CallToolResult, McpError> {
        let ids = match self.store.list() {
            Ok(ids) => ids,
            Err(e) => return error_result(e.to_string()),
        };
        if ids.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "No diagrams yet. Use generate_diagram to create one.",
            )]));
        }
        let mut lines = Vec::with_capacity(ids.len());
        for id in ids {
            if let Ok(graph) = self.store.load(&id) {
                lines.push(format!("{id}\t{}\t{}", graph.diagram_type, graph.title));
            }
        }
        Ok(CallToolResult::success(vec![Content::text(lines.join("\n"))]))
    }

    #[tool(description = "Get the full JSON of a stored diagram")]
    fn get_diagram(&self, Parameters(req): Parameters<DiagramIdRequest>) -> Result<CallToolResult, McpError> {
        match self.store.load(&req.diagram_id) {
            Ok(graph) => json_result(&graph),
            Err(e) => error_result(e.to_string()),
        }
    }

    #[tool(
        description = "Add a component to a stored diagram. icon_category defaults to the usual icon for the kind and position defaults to a new row below the existing components. Fails on a duplicate id."
    )]
    fn add_component(&self, Parameters(req): Parameters<AddComponentRequest>) -> Result<CallToolResult, McpError> {
        let icon = req
            .icon_category
            .filter(|i| !i.trim().is_empty())
            .unwrap_or_else(|| self.sketcher.lexicon().icon_for(&req.kind).to_string());
        let result = self.store.update(&req.diagram_id, |graph| {
            let position = req.position.unwrap_or_else(|| append_position(graph));
            graph.add_component(Component {
                id: req.id.clone(),
                name: req.name,
                kind: req.kind,
                technology: req.technology.unwrap_or_default(),
                description: req.description.unwrap_or_default(),
                layer: req.layer.unwrap_or_else(|| "application".to_string()),
                icon_category: icon,
                position,
            })?;
            Ok(())
        });
        match result {
            Ok(graph) => match graph.component(&req.id) {
                Some(component) => json_result(component),
                None => error_result(format!("Component '{}' was not stored", req.id)),
            },
            Err(e) => error_result(e.to_string()),
        }
    }

    #[tool(description = "Add a directed connection between two existing components of a stored diagram")]
    fn add_connection(&self, Parameters(req): Parameters<AddConnectionRequest>) -> Result<CallToolResult, McpError> {
        let mut connection = Connection::new(
            req.from,
            req.to,
            req.kind.unwrap_or_else(|| "data_flow".to_string()),
        );
        connection.label = req.label;
        connection.protocol = req.protocol;
        let summary = format!("Connected {} -> {}", connection.from, connection.to);
        match self.store.update(&req.diagram_id, |graph| Ok(graph.add_connection(connection)?)) {
            Ok(_) => Ok(CallToolResult::success(vec![Content::text(summary)])),
            Err(e) => error_result(e.to_string()),
        }
    }

    #[tool(description = "Rename a stored diagram")]
    fn update_title(&self, Parameters(req): Parameters<UpdateTitleRequest>) -> Result<CallToolResult, McpError> {
        let result = self.store.update(&req.diagram_id, |graph| {
            graph.set_title(req.title.clone());
            Ok(())
        });
        match result {
            Ok(_) => Ok(CallToolResult::success(vec![Content::text(format!(
                "Title of {} is now '{}'",
                req.diagram_id, req.title
            ))])),
            Err(e) => error_result(e.to_string()),
        }
    }

    #[tool(description = "Delete a stored diagram")]
    fn delete_diagram(&self, Parameters(req): Parameters<DiagramIdRequest>) -> Result<CallToolResult, McpError> {
        match self.store.remove(&req.diagram_id) {
            Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!("Deleted {}", req.diagram_id))])),
            Err(e) => error_result(e.to_string()),
        }
    }

    #[tool(description = "Export a stored diagram as an uncompressed draw.io (diagrams.net) XML document")]
    fn export_drawio(&self, Parameters(req): Parameters<DiagramIdRequest>) -> Result<CallToolResult, McpError> {
        match self.store.load(&req.diagram_id) {
            Ok(graph) => Ok(CallToolResult::success(vec![Content::text(to_drawio(&graph))])),
            Err(e) => error_result(e.to_string()),
        }
    }
}

#[tool_handler]
impl ServerHandler for ArchsketchServer {
    fn get_info(&self) -> ServerInfo {
        let instructions = format!(
            "{INSTRUCTIONS}\n\nPatterns: {}",
            PatternId::ALL.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
        );
        ServerInfo {
            instructions: Some(instructions.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archsketch_core::classify_and_generate;
    use archsketch_core::layout::LEAF;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_graph_appends_at_origin() {
        let mut g = classify_and_generate("xyzzy", "auto");
        g.components.clear();
        g.connections.clear();
        assert_eq!(append_position(&g), GRID_ORIGIN);
    }

    #[test]
    fn appended_position_clears_every_box() {
        let g = classify_and_generate("azure hub and spoke with 3 spokes", "auto");
        let p = append_position(&g);
        for c in &g.components {
            assert!(p.y >= c.position.y + footprint(&c.kind).height, "{} overlaps", c.id);
        }
        assert_eq!(p.x, GRID_ORIGIN.x);
    }

    #[test]
    fn appended_leaf_follows_generic_chain() {
        let g = classify_and_generate("xyzzy", "auto");
        let lowest = g.components.iter().map(|c| c.position.y).fold(f64::MIN, f64::max);
        assert_eq!(append_position(&g).y, lowest + LEAF.height + APPEND_GAP);
    }
}
