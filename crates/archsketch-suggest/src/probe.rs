//! Startup capability check for local providers.

use std::time::Duration;

use serde::Deserialize;

use crate::error::SuggestError;

pub const OLLAMA_URL: &str = "http://localhost:11434";

#[derive(Debug, Deserialize)]
struct Tags {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
struct TagModel {
    name: String,
}

/// Models a local Ollama server has pulled.
pub async fn ollama_models(base_url: &str) -> Result<Vec<String>, SuggestError> {
    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));
    let probe_err = |source: reqwest::Error| SuggestError::Probe { url: url.clone(), source };
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(probe_err)?;
    let tags: Tags = client
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(probe_err)?
        .json()
        .await
        .map_err(probe_err)?;
    Ok(tags.models.into_iter().map(|m| m.name).collect())
}

/// Whether `model` is served locally. Tags carry a `:latest` style suffix
/// the settings usually omit.
pub fn has_model(available: &[String], model: &str) -> bool {
    available
        .iter()
        .any(|name| name == model || name.split(':').next() == Some(model))
}
