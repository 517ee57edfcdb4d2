use std::collections::BTreeMap;

use tracing::debug;

use crate::classifier::{Classifier, PatternId};
use crate::lexicon::Lexicon;
use crate::model::ArchitectureGraph;
use crate::synthesis::synthesize;
use crate::{flags, generic, hub_spoke, patterns};

/// Text in, diagram out. Holds the read-only tables every generation uses,
/// so one value can serve any number of callers.
#[derive(Debug, Clone)]
pub struct Sketcher {
    lexicon: Lexicon,
    classifier: Classifier,
}

impl Default for Sketcher {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

impl Sketcher {
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_classifier(lexicon, Classifier::default_order())
    }

    pub fn with_classifier(lexicon: Lexicon, classifier: Classifier) -> Self {
        Self { lexicon, classifier }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Pattern for `text`, including the application sub-dispatch.
    pub fn classify(&self, text: &str) -> PatternId {
        let text = text.to_lowercase();
        self.classifier.classify(&text).refine(&text)
    }

    /// `requested` is a type hint. A recognised hint wins over the text;
    /// `"auto"` and unknown hints classify instead.
    pub fn generate(&self, text: &str, requested: &str) -> ArchitectureGraph {
        let lowered = text.to_lowercase();
        let pattern = match PatternId::from_requested(requested) {
            Some(pattern) => pattern,
            None => self.classifier.classify(&lowered).refine(&lowered),
        };
        self.generate_lowered(pattern, &lowered, requested)
    }

    /// Run one pattern's generator, skipping classification.
    pub fn generate_pattern(&self, pattern: PatternId, text: &str) -> ArchitectureGraph {
        self.generate_lowered(pattern, &text.to_lowercase(), pattern.as_str())
    }

    fn generate_lowered(&self, pattern: PatternId, text: &str, requested: &str) -> ArchitectureGraph {
        let graph = match pattern {
            PatternId::AzureHubSpoke => hub_spoke::generate(text, &self.lexicon),
            PatternId::Generic => generic::generate(text, &self.lexicon),
            other => match patterns::spec_for(other) {
                Some(spec) => synthesize(spec, text, &self.lexicon),
                None => generic::generate(text, &self.lexicon),
            },
        };
        debug!(
            pattern = %pattern,
            requested,
            components = graph.components.len(),
            connections = graph.connections.len(),
            "generated diagram"
        );
        graph
    }
}

/// Classify and generate with the built-in lexicon.
pub fn classify_and_generate(text: &str, requested: &str) -> ArchitectureGraph {
    Sketcher::default().generate(text, requested)
}

/// Flags `pattern_id` would extract from `text`. Unknown ids give an empty map.
pub fn extract_flags_for_pattern(pattern_id: &str, text: &str) -> BTreeMap<String, bool> {
    flags::extract_flags_for_pattern(pattern_id, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Azure hub with Kubernetes spokes", "auto", "azure_hub_spoke_enterprise")]
    #[test_case("Azure hub with Kubernetes spokes", "kubernetes", "kubernetes_architecture")]
    #[test_case("aws ec2 with rds", "gcp", "gcp_architecture")]
    #[test_case("aws ec2 with rds", "nonsense", "aws_architecture")]
    #[test_case("Microservices on App Service", "auto", "microservices_architecture")]
    #[test_case("xyzzy plugh", "auto", "intelligent_generic")]
    fn requested_type_wins_when_recognised(text: &str, requested: &str, expected: &str) {
        assert_eq!(classify_and_generate(text, requested).diagram_type, expected);
    }

    #[test]
    fn every_pattern_generates_a_valid_graph() {
        let sketcher = Sketcher::default();
        for pattern in PatternId::ALL {
            let g = sketcher.generate_pattern(pattern, "");
            assert_eq!(g.diagram_type, pattern.as_str());
            assert!(g.components.len() >= 3, "{pattern} is too small");
            g.validate().unwrap_or_else(|e| panic!("{pattern}: {e}"));
        }
    }

    #[test]
    fn classify_lowercases_input() {
        assert_eq!(Sketcher::default().classify("AWS EC2"), PatternId::Aws);
    }

    #[test]
    fn flag_extraction_is_exposed() {
        let flags = extract_flags_for_pattern("azure_hub_spoke_enterprise", "Bastion and ExpressRoute");
        assert_eq!(flags.len(), hub_spoke::FLAGS.len());
        assert_eq!(flags.get("has_bastion"), Some(&true));
        assert_eq!(flags.get("has_expressroute"), Some(&true));
        assert_eq!(flags.get("has_sentinel"), Some(&false));
    }
}
