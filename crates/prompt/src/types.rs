//! Prompt types for docgen.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the user supplied for one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Writing style sample or description
    pub style_text: String,

    /// Topic, insights and quotes
    pub topic_text: String,

    /// Target audience
    pub audience: String,

    /// Kind of document (e.g., "blog post", "whitepaper")
    pub output_type: String,

    /// Desired length (e.g., "3 pages", "1000 words")
    pub size: String,
}

impl GenerationRequest {
    /// Template variables, keyed by the names used in prompt templates.
    pub fn variables(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("style".to_string(), self.style_text.clone()),
            ("topic".to_string(), self.topic_text.clone()),
            ("audience".to_string(), self.audience.clone()),
            ("outputType".to_string(), self.output_type.clone()),
            ("size".to_string(), self.size.clone()),
        ])
    }
}

/// A prompt definition, built in or loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A fully built prompt ready for the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// The single user message
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: document.generate
title: Short drafts
apiVersion: "1.0"
template: "Write a {{outputType}} about {{topic}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "document.generate");
        assert_eq!(def.api_version, "1.0");
        assert!(def.template.contains("{{topic}}"));
    }

    #[test]
    fn test_variables() {
        let request = GenerationRequest {
            style_text: "terse".into(),
            topic_text: "caching".into(),
            audience: "engineers".into(),
            output_type: "article".into(),
            size: "500 words".into(),
        };
        let vars = request.variables();
        assert_eq!(vars.len(), 5);
        assert_eq!(vars["outputType"], "article");
        assert_eq!(vars["topic"], "caching");
    }
}
