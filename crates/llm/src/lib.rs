//! LLM integration crate for docgen.
//!
//! This crate provides the model registry and a provider-agnostic client
//! abstraction for generating text with hosted Large Language Models.
//!
//! # Providers
//! - **Anthropic**: Messages API
//! - **OpenAI**: Chat Completions API
//! - **Gemini**: `generateContent` API
//!
//! # Example
//! ```no_run
//! use docgen_llm::{create_client, registry, LlmClient};
//! use docgen_core::config::EndpointConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let descriptor = registry::lookup("gpt-4o")?;
//! let client = create_client(descriptor, &EndpointConfig::default())?;
//! let text = client.generate("Hello, world!", 256).await?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod registry;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{create_client, ProviderClient};
pub use providers::{AnthropicClient, GeminiClient, OpenAiClient};
pub use registry::ModelDescriptor;
pub use types::ProviderType;
