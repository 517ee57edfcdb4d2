use async_trait::async_trait;
use pretty_assertions::assert_eq;

use archsketch_core::Sketcher;
use archsketch_suggest::{generate_diagram, resolve_generator, SuggestError, TextGenerator};

struct Canned(Result<&'static str, ()>);

#[async_trait]
impl TextGenerator for Canned {
    async fn generate_text(&self, system: &str, user: &str) -> Result<String, SuggestError> {
        assert!(system.contains("diagram_type"));
        assert!(user.contains("Description:"));
        self.0.map(str::to_string).map_err(|_| SuggestError::Empty)
    }
}

const GOOD: &str = r#"Here you go:
{"diagram_type":"aws_architecture","title":"Shop","components":[
  {"id":"alb","name":"ALB","type":"loadbalancer"},
  {"id":"app","name":"App","type":"compute"}
],"connections":[{"from":"alb","to":"app","type":"api_call"}]}"#;

#[tokio::test]
async fn usable_llm_output_wins() {
    let sketcher = Sketcher::default();
    let g = generate_diagram(&sketcher, Some(&Canned(Ok(GOOD))), "aws shop", "auto").await;
    assert_eq!(g.title, "Shop");
    assert_eq!(g.components.len(), 2);
    assert_eq!(g.connections.len(), 1);
    g.validate().unwrap();
}

#[tokio::test]
async fn prose_falls_back_to_rules() {
    let sketcher = Sketcher::default();
    let text = "azure hub and spoke para 3 suscripciones";
    let g = generate_diagram(&sketcher, Some(&Canned(Ok("I cannot draw that."))), text, "auto").await;
    assert_eq!(g, sketcher.generate(text, "auto"));
}

#[tokio::test]
async fn provider_error_falls_back_to_rules() {
    let sketcher = Sketcher::default();
    let g = generate_diagram(&sketcher, Some(&Canned(Err(()))), "xyzzy", "auto").await;
    assert_eq!(g.diagram_type, "intelligent_generic");
    assert!(g.components.len() >= 3);
}

#[tokio::test]
async fn no_generator_means_rules_only() {
    let sketcher = Sketcher::default();
    let g = generate_diagram(&sketcher, None, "aws ec2 and rds", "auto").await;
    assert_eq!(g.diagram_type, "aws_architecture");
}

#[tokio::test]
async fn unconfigured_settings_resolve_to_none() {
    assert!(resolve_generator(&Default::default()).await.is_none());
}
