//! Prompt builder for rendering templates.

use crate::template::{ANTI_PATTERN_INSTRUCTIONS, FORMAT_INSTRUCTIONS};
use crate::types::{BuiltPrompt, BuiltPromptMetadata, GenerationRequest, PromptDefinition};
use docgen_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::BTreeMap;

/// Build the provider prompt for `request`.
///
/// Rendering is deterministic: the same definition and request always
/// produce the same string. Inputs are not validated here; the orchestrator
/// rejects an empty topic before calling this.
///
/// # Example
/// ```
/// use docgen_prompt::{build_prompt, default_prompt, GenerationRequest};
///
/// let request = GenerationRequest {
///     style_text: "Plain and direct.".into(),
///     topic_text: "Why we moved to Rust".into(),
///     audience: "engineers".into(),
///     output_type: "blog post".into(),
///     size: "1 page".into(),
/// };
/// let built = build_prompt(&default_prompt(), &request).unwrap();
/// assert!(built.user.contains("Why we moved to Rust"));
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    request: &GenerationRequest,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let mut variables = request.variables();
    variables.insert(
        "formatInstructions".to_string(),
        FORMAT_INSTRUCTIONS.to_string(),
    );
    variables.insert(
        "antiPatternInstructions".to_string(),
        ANTI_PATTERN_INSTRUCTIONS.to_string(),
    );

    let user = render_template(&definition.template, &variables)?;

    tracing::debug!("Built prompt of {} characters", user.len());

    Ok(BuiltPrompt {
        user,
        metadata: BuiltPromptMetadata {
            source_prompt_id: definition.id.clone(),
            resolved_variables: request.variables(),
        },
    })
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &BTreeMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, user text must pass through untouched
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
