//! Rule-based architecture sketching: free text in, positioned component
//! graph out.
//!
//! [`Sketcher`] is the entry point. It classifies the text into one of a
//! fixed set of architecture patterns, runs that pattern's generator and
//! returns an [`ArchitectureGraph`]. Everything is pure and deterministic;
//! the only I/O in this crate is the settings file and the in-memory store.

pub mod classifier;
pub mod engine;
pub mod error;
pub mod export;
pub mod flags;
pub mod generic;
pub mod hub_spoke;
pub mod layout;
pub mod lexicon;
pub mod model;
pub mod patterns;
pub mod settings;
pub mod store;
pub mod synthesis;

pub use classifier::{Classifier, PatternId};
pub use engine::{classify_and_generate, extract_flags_for_pattern, Sketcher};
pub use error::{GraphError, SettingsError, StoreError};
pub use export::{to_drawio, Drawio};
pub use lexicon::{Lexicon, LexiconEntry, LEXICON_VERSION};
pub use model::{ArchitectureGraph, Component, Connection, Layer, Position};
pub use settings::{ai_configured, read_settings, write_settings, AiSettings};
pub use store::{next_diagram_id, DiagramStore, MemoryStore};
