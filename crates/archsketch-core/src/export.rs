//! draw.io export.
//!
//! Emits an uncompressed `mxfile` document that diagrams.net opens for
//! editing. Vertices use the layout footprint of their kind, so containers
//! come out as large open boxes with their children drawn on top.

use std::fmt;

use crate::layout::footprint;
use crate::model::{ArchitectureGraph, Component, Connection};

const ROOT_CELL: &str = "0";
const LAYER_CELL: &str = "1";

fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            b'\n' => "&#10;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

fn fill_for(icon_category: &str) -> (&'static str, &'static str) {
    match icon_category {
        "networking" => ("#dae8fc", "#6c8ebf"),
        "security" | "identity" => ("#f8cecc", "#b85450"),
        "databases" | "storage" => ("#d5e8d4", "#82b366"),
        "web" | "compute" | "containers" => ("#fff2cc", "#d6b656"),
        "integration" | "analytics" => ("#e1d5e7", "#9673a6"),
        "monitoring" | "management" | "devops" => ("#f5f5f5", "#666666"),
        _ => ("#ffffff", "#000000"),
    }
}

fn vertex_style(component: &Component) -> String {
    let (fill, stroke) = fill_for(&component.icon_category);
    let shape = match component.kind.as_str() {
        "subscription" => "rounded=1;dashed=1;verticalAlign=top;align=left;spacingLeft=10;",
        "network" | "kubernetes" => "rounded=1;verticalAlign=top;fontStyle=1;",
        "database" | "cache" => "shape=cylinder3;boundedLbl=1;size=12;",
        "user" => "shape=umlActor;verticalLabelPosition=bottom;verticalAlign=top;",
        _ => "rounded=1;",
    };
    format!("{shape}whiteSpace=wrap;html=0;fillColor={fill};strokeColor={stroke};")
}

fn edge_style(connection: &Connection) -> &'static str {
    match connection.kind.as_str() {
        "contains" => "endArrow=none;dashed=1;strokeColor=#999999;",
        "peering" => "endArrow=classic;startArrow=classic;strokeWidth=2;",
        "monitoring" => "endArrow=open;dashed=1;",
        _ => "endArrow=classic;edgeStyle=orthogonalEdgeStyle;rounded=1;",
    }
}

fn edge_value(connection: &Connection) -> String {
    match (&connection.label, &connection.protocol) {
        (Some(label), Some(protocol)) => format!("{label}\n{protocol}"),
        (Some(text), None) | (None, Some(text)) => text.clone(),
        (None, None) => String::new(),
    }
}

/// A graph viewed as a draw.io document. Components keep their ids as cell
/// ids; edges are numbered `e1`, `e2`, ... in connection order.
pub struct Drawio<'a>(pub &'a ArchitectureGraph);

impl fmt::Display for Drawio<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        writeln!(f, "<mxfile host=\"archsketch\">")?;
        writeln!(
            f,
            "  <diagram id=\"{}\" name=\"{}\">",
            escape_xml(&graph.diagram_type),
            escape_xml(&graph.title)
        )?;
        writeln!(f, "    <mxGraphModel grid=\"1\" gridSize=\"10\" arrows=\"1\" connect=\"1\">\n      <root>")?;
        writeln!(f, "        <mxCell id=\"{ROOT_CELL}\"/>")?;
        writeln!(f, "        <mxCell id=\"{LAYER_CELL}\" parent=\"{ROOT_CELL}\"/>")?;

        for component in &graph.components {
            let size = footprint(&component.kind);
            writeln!(
                f,
                "        <mxCell id=\"{}\" value=\"{}\" style=\"{}\" vertex=\"1\" parent=\"{LAYER_CELL}\">",
                escape_xml(&component.id),
                escape_xml(&component.name),
                escape_xml(&vertex_style(component)),
            )?;
            writeln!(
                f,
                "          <mxGeometry x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" as=\"geometry\"/>",
                component.position.x, component.position.y, size.width, size.height
            )?;
            writeln!(f, "        </mxCell>")?;
        }

        for (i, connection) in graph.connections.iter().enumerate() {
            writeln!(
                f,
                "        <mxCell id=\"e{}\" value=\"{}\" style=\"{}\" edge=\"1\" parent=\"{LAYER_CELL}\" source=\"{}\" target=\"{}\">",
                i + 1,
                escape_xml(&edge_value(connection)),
                edge_style(connection),
                escape_xml(&connection.from),
                escape_xml(&connection.to),
            )?;
            writeln!(f, "          <mxGeometry relative=\"1\" as=\"geometry\"/>\n        </mxCell>")?;
        }

        writeln!(f, "      </root>\n    </mxGraphModel>\n  </diagram>\n</mxfile>")
    }
}

/// Render `graph` as a draw.io document.
pub fn to_drawio(graph: &ArchitectureGraph) -> String {
    Drawio(graph).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classify_and_generate;

    #[test]
    fn escapes_markup_and_newlines() {
        assert_eq!(escape_xml("a<b> & \"c\"\nd"), "a&lt;b&gt; &amp; &quot;c&quot;&#10;d");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn one_cell_per_component_and_connection() {
        let g = classify_and_generate("azure hub and spoke with 2 spokes", "auto");
        let xml = to_drawio(&g);
        assert!(xml.starts_with("<mxfile"));
        assert!(xml.ends_with("</diagram>\n</mxfile>\n"));
        assert_eq!(xml, format!("{}", Drawio(&g)));
        assert_eq!(xml.matches("vertex=\"1\"").count(), g.components.len());
        assert_eq!(xml.matches("edge=\"1\"").count(), g.connections.len());
        assert!(xml.contains("id=\"hub_vnet\" value=\"Hub VNet&#10;10.0.0.0/16\""));
        assert!(xml.contains("width=\"700\" height=\"500\""));
        assert!(xml.contains("10.0.0.0/16 ↔ 10.1.0.0/16&#10;VNet Peering"));
    }
}
