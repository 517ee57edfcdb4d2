//! `archsketch-mcp configure`: choose the LLM that drafts diagrams before
//! the rule engine, or switch it off.

use std::error::Error;

use tracing::info;

use archsketch_core::settings::settings_dir;
use archsketch_core::{ai_configured, read_settings, write_settings, AiSettings};
use archsketch_suggest::LlmGenerator;

pub const USAGE: &str = "usage: archsketch-mcp configure [<provider> <model> [api-key] | off]";

/// Settings for `configure <provider> <model> [api-key]`. `off` clears them.
pub fn parse_settings(args: &[String]) -> Result<AiSettings, Box<dyn Error>> {
    let (provider, model, api_key) = match args {
        [off] if off.eq_ignore_ascii_case("off") => return Ok(AiSettings::default()),
        [provider, model] => (provider, model, String::new()),
        [provider, model, key] => (provider, model, key.clone()),
        _ => return Err(USAGE.into()),
    };
    let settings = AiSettings {
        provider: provider.trim().to_lowercase(),
        api_key: api_key.trim().to_string(),
        model: model.trim().to_string(),
    };
    LlmGenerator::new(settings.clone())?;
    if !ai_configured(&settings) {
        return Err(format!("provider '{}' needs an API key", settings.provider).into());
    }
    Ok(settings)
}

/// One line on what `generate_diagram` will use.
pub fn describe(settings: &AiSettings) -> String {
    if ai_configured(settings) {
        format!(
            "LLM drafting on: {} / {} (rule engine as fallback)",
            settings.provider, settings.model
        )
    } else {
        "LLM drafting off: diagrams come from the rule engine".to_string()
    }
}

pub fn configure(args: &[String]) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        println!("{}", describe(&read_settings()));
        return Ok(());
    }
    let settings = parse_settings(args)?;
    write_settings(&settings)?;
    info!(dir = %settings_dir().display(), "wrote AI settings");
    println!("{}", describe(&settings));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ollama_needs_no_key() {
        let settings = parse_settings(&args(&["Ollama", "llama3"])).unwrap();
        assert_eq!(settings.provider, "ollama");
        assert_eq!(settings.model, "llama3");
        assert!(settings.api_key.is_empty());
    }

    #[test]
    fn hosted_providers_need_a_key() {
        assert!(parse_settings(&args(&["openai", "gpt-4o"])).is_err());
        let settings = parse_settings(&args(&["openai", "gpt-4o", "sk-test"])).unwrap();
        assert_eq!(settings.api_key, "sk-test");
    }

    #[test]
    fn unknown_provider_and_bad_arity_are_rejected() {
        assert!(parse_settings(&args(&["hal9000", "m", "k"])).is_err());
        assert!(parse_settings(&args(&["openai"])).is_err());
        assert!(parse_settings(&args(&["a", "b", "c", "d"])).is_err());
    }

    #[test]
    fn off_clears_settings() {
        let settings = parse_settings(&args(&["off"])).unwrap();
        assert_eq!(settings, AiSettings::default());
        assert_eq!(describe(&settings), "LLM drafting off: diagrams come from the rule engine");
    }
}
