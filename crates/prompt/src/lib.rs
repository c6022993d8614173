//! Prompt system for docgen.
//!
//! This crate turns a [`GenerationRequest`] into the single instruction
//! string sent to the provider:
//! - Built-in document-generation template
//! - Optional YAML override per workspace
//! - Handlebars rendering

pub mod builder;
pub mod loader;
pub mod template;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{default_prompt, load_prompt, DEFAULT_PROMPT_ID};
pub use types::{BuiltPrompt, BuiltPromptMetadata, GenerationRequest, PromptDefinition};
