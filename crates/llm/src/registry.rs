//! Static model registry.
//!
//! Maps the short keys accepted on the command line to a provider and the
//! provider's model identifier.

use crate::types::ProviderType;
use docgen_core::{AppError, AppResult};

/// Key used when the user does not choose a model.
pub const DEFAULT_MODEL_KEY: &str = "claude-3-5-sonnet";

/// A selectable model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub key: &'static str,
    pub provider: ProviderType,
    pub model_id: &'static str,
    pub display_name: &'static str,
}

const fn model(
    key: &'static str,
    provider: ProviderType,
    model_id: &'static str,
    display_name: &'static str,
) -> ModelDescriptor {
    ModelDescriptor {
        key,
        provider,
        model_id,
        display_name,
    }
}

static MODELS: [ModelDescriptor; 9] = [
    model(
        "claude-3-5-sonnet",
        ProviderType::Anthropic,
        "claude-sonnet-4-20250514",
        "Claude 3.5 Sonnet (Latest)",
    ),
    model(
        "claude-3-5-haiku",
        ProviderType::Anthropic,
        "claude-3-5-haiku-20241022",
        "Claude 3.5 Haiku (Fast)",
    ),
    model(
        "claude-3-opus",
        ProviderType::Anthropic,
        "claude-3-opus-20240229",
        "Claude 3 Opus (Most Capable)",
    ),
    model(
        "gpt-4",
        ProviderType::OpenAI,
        "gpt-4-turbo-preview",
        "GPT-4 Turbo (Most Capable)",
    ),
    model("gpt-4o", ProviderType::OpenAI, "gpt-4o", "GPT-4o (Multimodal)"),
    model(
        "gpt-3.5-turbo",
        ProviderType::OpenAI,
        "gpt-3.5-turbo",
        "GPT-3.5 Turbo (Fast & Efficient)",
    ),
    model("gemini-pro", ProviderType::Gemini, "gemini-pro", "Gemini Pro"),
    model(
        "gemini-1.5-pro",
        ProviderType::Gemini,
        "gemini-1.5-pro-latest",
        "Gemini 1.5 Pro (Latest)",
    ),
    model(
        "gemini-1.5-flash",
        ProviderType::Gemini,
        "gemini-1.5-flash-latest",
        "Gemini 1.5 Flash (Fast)",
    ),
];

/// All models in declaration order.
pub fn all() -> &'static [ModelDescriptor] {
    &MODELS
}

/// Look up a model by key.
pub fn lookup(key: &str) -> AppResult<&'static ModelDescriptor> {
    MODELS.iter().find(|m| m.key == key).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown model: {}. Options: {}",
            key,
            MODELS.iter().map(|m| m.key).collect::<Vec<_>>().join(", ")
        ))
    })
}

/// Models grouped by provider, in display order (anthropic, openai, gemini).
pub fn list_by_provider() -> Vec<(ProviderType, Vec<&'static ModelDescriptor>)> {
    ProviderType::ALL
        .iter()
        .map(|provider| {
            let models: Vec<_> = MODELS.iter().filter(|m| m.provider == *provider).collect();
            (*provider, models)
        })
        .filter(|(_, models)| !models.is_empty())
        .collect()
}

/// Models numbered from 1 in display order, as shown by the interactive picker.
pub fn numbered_choices() -> Vec<(usize, &'static ModelDescriptor)> {
    list_by_provider()
        .into_iter()
        .flat_map(|(_, models)| models)
        .enumerate()
        .map(|(i, m)| (i + 1, m))
        .collect()
}

/// Resolve a picker answer: either a number from [`numbered_choices`] or a key.
pub fn resolve_choice(choice: &str) -> Option<&'static ModelDescriptor> {
    let choice = choice.trim();
    if let Ok(number) = choice.parse::<usize>() {
        return numbered_choices()
            .into_iter()
            .find(|(n, _)| *n == number)
            .map(|(_, m)| m);
    }
    lookup(choice).ok()
}

/// Render the registry grouped by provider.
pub fn display_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for (provider, models) in list_by_provider() {
        lines.push(format!("{}:", provider.display_name()));
        for m in models {
            lines.push(format!("  • {}: {}", m.key, m.display_name));
        }
    }
    lines
}
