//! Prompt loader.
//!
//! The built-in definition is used unless the workspace provides
//! `.docgen/prompts/<id>.yml`.

use crate::template::DEFAULT_TEMPLATE;
use crate::types::PromptDefinition;
use docgen_core::{AppError, AppResult};
use std::path::Path;

/// Identifier of the document-generation prompt.
pub const DEFAULT_PROMPT_ID: &str = "document.generate";

/// The built-in document-generation definition.
pub fn default_prompt() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_PROMPT_ID.to_string(),
        title: "Generate a draft document".to_string(),
        api_version: "1.0".to_string(),
        template: DEFAULT_TEMPLATE.to_string(),
    }
}

/// Load a prompt definition by ID from the workspace.
///
/// # Arguments
/// * `workspace_path` - Root workspace directory containing `.docgen/`
/// * `prompt_id` - Prompt identifier (e.g., "document.generate")
///
/// # Returns
/// The workspace override if present, the built-in definition for
/// [`DEFAULT_PROMPT_ID`], or an error.
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = workspace_path
        .join(".docgen/prompts")
        .join(format!("{}.yml", prompt_id));

    if !prompt_file.exists() {
        if prompt_id == DEFAULT_PROMPT_ID {
            tracing::debug!("Using built-in prompt: {}", prompt_id);
            return Ok(default_prompt());
        }
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_prompt(dir: &Path, id: &str, content: &str) {
        let prompts_dir = dir.join(".docgen/prompts");
        fs::create_dir_all(&prompts_dir).unwrap();
        fs::write(prompts_dir.join(format!("{}.yml", id)), content).unwrap();
    }

    #[test]
    fn test_builtin_when_no_override() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = load_prompt(temp_dir.path(), DEFAULT_PROMPT_ID).unwrap();
        assert_eq!(prompt.id, DEFAULT_PROMPT_ID);
        assert_eq!(prompt.template, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_workspace_override() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            DEFAULT_PROMPT_ID,
            r#"
id: document.generate
title: "House style"
apiVersion: "1.1"
template: "Write a {{outputType}} on {{topic}}"
"#,
        );

        let prompt = load_prompt(temp_dir.path(), DEFAULT_PROMPT_ID).unwrap();
        assert_eq!(prompt.title, "House style");
        assert_eq!(prompt.template, "Write a {{outputType}} on {{topic}}");
    }

    #[test]
    fn test_unknown_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), DEFAULT_PROMPT_ID, "invalid: yaml: content:");
        assert!(load_prompt(temp_dir.path(), DEFAULT_PROMPT_ID).is_err());
    }

    #[test]
    fn test_invalid_api_version() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            DEFAULT_PROMPT_ID,
            "id: x\ntitle: y\napiVersion: \"1\"\ntemplate: z\n",
        );
        match load_prompt(temp_dir.path(), DEFAULT_PROMPT_ID) {
            Err(AppError::Prompt(msg)) => assert!(msg.contains("apiVersion")),
            other => panic!("Expected prompt error, got {:?}", other),
        }
    }
}
