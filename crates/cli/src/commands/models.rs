//! Models command handler.
//!
//! Lists the model registry grouped by provider.

use clap::Args;
use docgen_core::{AppError, AppResult};
use docgen_llm::registry;

/// List available AI models
#[derive(Args, Debug)]
pub struct ModelsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ModelsCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing models command");
        println!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> AppResult<String> {
        if !self.json {
            return Ok(registry::display_lines().join("\n"));
        }

        let models: Vec<_> = registry::all()
            .iter()
            .map(|m| {
                serde_json::json!({
                    "key": m.key,
                    "provider": m.provider.as_str(),
                    "modelId": m.model_id,
                    "displayName": m.display_name,
                })
            })
            .collect();
        serde_json::to_string_pretty(&models)
            .map_err(|e| AppError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_listing_grouped() {
        let text = ModelsCommand { json: false }.render().unwrap();
        let anthropic = text.find("Anthropic Claude:").unwrap();
        let openai = text.find("OpenAI GPT:").unwrap();
        let gemini = text.find("Google Gemini:").unwrap();
        assert!(anthropic < openai && openai < gemini);
        assert!(text.contains("gpt-4o: GPT-4o (Multimodal)"));
    }

    #[test]
    fn test_json_listing() {
        let json = ModelsCommand { json: true }.render().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let models = value.as_array().unwrap();
        assert_eq!(models.len(), registry::all().len());
        assert_eq!(models[0]["key"], "claude-3-5-sonnet");
        assert_eq!(models[0]["modelId"], "claude-sonnet-4-20250514");
        assert_eq!(models[0]["provider"], "anthropic");
    }
}
