//! Last-resort generator: scan the lexicon and chain whatever it finds.

use crate::classifier::PatternId;
use crate::layout::{place_grid, GENERIC_COLUMNS, GRID_CELL_HEIGHT, GRID_CELL_WIDTH, GRID_ORIGIN};
use crate::lexicon::{Lexicon, LexiconEntry};
use crate::model::{Component, Layer};
use crate::synthesis::{ConnectionRule, EdgeStyle, GraphBuilder};
use crate::ArchitectureGraph;

pub const MAX_GENERIC_COMPONENTS: usize = 6;

const CHAIN: ConnectionRule = ConnectionRule::Chain {
    style: EdgeStyle::new("data_flow", "", ""),
};

/// Used when nothing in the lexicon matches, so the output is never empty.
static MINIMAL: [LexiconEntry; 3] = [
    LexiconEntry {
        key: "frontend",
        keywords: &[],
        name: "Frontend",
        kind: "webapp",
        icon_category: "web",
        technology: "Web Application",
        layer: Layer::Presentation,
    },
    LexiconEntry {
        key: "backend",
        keywords: &[],
        name: "Backend",
        kind: "api",
        icon_category: "web",
        technology: "REST API",
        layer: Layer::Application,
    },
    LexiconEntry {
        key: "database",
        keywords: &[],
        name: "Database",
        kind: "database",
        icon_category: "databases",
        technology: "Relational Database",
        layer: Layer::Data,
    },
];

fn component(entry: &LexiconEntry, index: usize) -> Component {
    Component {
        id: entry.key.to_string(),
        name: entry.name.to_string(),
        kind: entry.kind.to_string(),
        technology: entry.technology.to_string(),
        description: String::new(),
        layer: entry.layer.as_str().to_string(),
        icon_category: entry.icon_category.to_string(),
        position: place_grid(index, GENERIC_COLUMNS, GRID_CELL_WIDTH, GRID_CELL_HEIGHT, GRID_ORIGIN),
    }
}

/// Fewest components a generic sketch carries.
pub const MIN_GENERIC_COMPONENTS: usize = 3;

/// Up to [`MAX_GENERIC_COMPONENTS`] lexicon matches in a 3-column grid,
/// linked in table order. Short match lists are padded from the minimal
/// three-tier set, skipping tiers whose key or kind is already present.
pub fn generate(text: &str, lexicon: &Lexicon) -> ArchitectureGraph {
    let mut entries: Vec<&LexiconEntry> = lexicon.matches(text).take(MAX_GENERIC_COMPONENTS).collect();
    let matched = entries.len();
    for filler in &MINIMAL {
        if entries.len() >= MIN_GENERIC_COMPONENTS {
            break;
        }
        if !entries.iter().any(|e| e.key == filler.key || e.kind == filler.kind) {
            entries.push(filler);
        }
    }

    let mut b = GraphBuilder::new(lexicon);
    for (index, entry) in entries.iter().enumerate() {
        b.add(component(entry, index));
    }
    b.apply(&CHAIN);

    let description = match matched {
        0 => "Minimal three-tier sketch; no known components were named",
        n if n < MIN_GENERIC_COMPONENTS => "Named components completed with a minimal three-tier sketch",
        _ => "Components inferred from keywords in the description",
    };
    b.finish(
        PatternId::Generic.as_str(),
        "System Architecture",
        description,
        &["Layered Architecture"],
    )
}
