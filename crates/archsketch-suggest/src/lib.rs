//! Optional LLM front end for the sketcher.
//!
//! The model gets the first attempt; anything short of a usable graph
//! (provider error, timeout, prose, malformed JSON, no components) falls back to
//! the rule-based [`Sketcher`]. Callers never see an AI failure, only a
//! graph whose `diagram_type` may differ from what they asked for.

pub mod engine;
pub mod error;
pub mod parse;
pub mod probe;
pub mod prompt;

use tracing::{info, warn};

use archsketch_core::{ai_configured, AiSettings, ArchitectureGraph, Sketcher};

pub use engine::{LlmGenerator, TextGenerator};
pub use error::SuggestError;

/// Pick a generator for `settings` at startup, or `None` for rule-based only.
/// Ollama is probed first since it is commonly configured but not running.
pub async fn resolve_generator(settings: &AiSettings) -> Option<LlmGenerator> {
    if !ai_configured(settings) {
        return None;
    }
    let generator = match LlmGenerator::new(settings.clone()) {
        Ok(g) => g,
        Err(e) => {
            warn!(error = %e, "AI settings unusable, using rules only");
            return None;
        }
    };
    if settings.provider == "ollama" {
        match probe::ollama_models(probe::OLLAMA_URL).await {
            Ok(models) if probe::has_model(&models, &settings.model) => {}
            Ok(_) => {
                warn!(model = %settings.model, "ollama model not pulled, using rules only");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "ollama unreachable, using rules only");
                return None;
            }
        }
    }
    info!(provider = %settings.provider, model = %settings.model, "LLM generation enabled");
    Some(generator)
}

/// Generate a diagram, trying `generator` first when there is one.
pub async fn generate_diagram(
    sketcher: &Sketcher,
    generator: Option<&dyn TextGenerator>,
    text: &str,
    requested: &str,
) -> ArchitectureGraph {
    if let Some(generator) = generator {
        let system = prompt::system_prompt();
        let user_msg = prompt::user_message(text, requested);
        match generator.generate_text(&system, &user_msg).await {
            Ok(raw) => match parse::parse_llm_output(&raw, sketcher.lexicon()) {
                Some(graph) => {
                    info!(
                        components = graph.components.len(),
                        connections = graph.connections.len(),
                        "using LLM diagram"
                    );
                    return graph;
                }
                None => warn!(chars = raw.len(), "LLM output unusable, falling back to rules"),
            },
            Err(e) => warn!(error = %e, "LLM generation failed, falling back to rules"),
        }
    }
    sketcher.generate(text, requested)
}
