//! LLM provider factory.
//!
//! Resolves the API key for a model's provider from the environment and
//! builds the matching adapter. The result is a closed enum with one
//! variant per provider; callers that want to swap in a fake use the
//! [`LlmClient`] trait instead.

use crate::client::{LlmClient, LlmRequest, LlmResponse};
use crate::providers::{AnthropicClient, GeminiClient, OpenAiClient};
use crate::registry::ModelDescriptor;
use crate::types::ProviderType;
use docgen_core::config::EndpointConfig;
use docgen_core::{AppError, AppResult};

/// A provider adapter selected from the model registry.
pub enum ProviderClient {
    Anthropic(AnthropicClient),
    OpenAi(OpenAiClient),
    Gemini(GeminiClient),
}

impl ProviderClient {
    fn inner(&self) -> &dyn LlmClient {
        match self {
            Self::Anthropic(c) => c,
            Self::OpenAi(c) => c,
            Self::Gemini(c) => c,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ProviderClient {
    fn provider_name(&self) -> &str {
        self.inner().provider_name()
    }

    fn model(&self) -> &str {
        self.inner().model()
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.inner().complete(request).await
    }
}

/// Create a client for `descriptor`, reading its API key from the environment.
///
/// # Errors
/// Returns `AppError::Config` when the provider's key variable is unset or empty.
pub fn create_client(
    descriptor: &ModelDescriptor,
    endpoints: &EndpointConfig,
) -> AppResult<ProviderClient> {
    let provider = descriptor.provider;
    let api_key = std::env::var(provider.api_key_env()).ok();
    create_client_with_key(descriptor, endpoints, api_key.as_deref())
}

/// Create a client with an explicitly supplied key.
pub fn create_client_with_key(
    descriptor: &ModelDescriptor,
    endpoints: &EndpointConfig,
    api_key: Option<&str>,
) -> AppResult<ProviderClient> {
    let provider = descriptor.provider;
    let api_key = api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            AppError::Config(format!(
                "{} not found. Set it in your environment or .env file.\nGet your API key from {}",
                provider.api_key_env(),
                provider.api_key_url()
            ))
        })?;

    let model = descriptor.model_id;
    tracing::debug!("Creating {} client for model {}", provider, model);

    let client = match provider {
        ProviderType::Anthropic => {
            let base = endpoints
                .anthropic
                .as_deref()
                .unwrap_or(provider.default_base_url());
            ProviderClient::Anthropic(AnthropicClient::with_base_url(api_key, model, base))
        }
        ProviderType::OpenAI => {
            let base = endpoints
                .openai
                .as_deref()
                .unwrap_or(provider.default_base_url());
            ProviderClient::OpenAi(OpenAiClient::with_base_url(api_key, model, base))
        }
        ProviderType::Gemini => {
            let base = endpoints
                .gemini
                .as_deref()
                .unwrap_or(provider.default_base_url());
            ProviderClient::Gemini(GeminiClient::with_base_url(api_key, model, base))
        }
    };

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_create_each_provider() {
        let endpoints = EndpointConfig::default();
        for key in ["claude-3-5-haiku", "gpt-4o", "gemini-pro"] {
            let descriptor = registry::lookup(key).unwrap();
            let client = create_client_with_key(descriptor, &endpoints, Some("k")).unwrap();
            assert_eq!(client.provider_name(), descriptor.provider.as_str());
            assert_eq!(client.model(), descriptor.model_id);
        }
    }

    #[test]
    fn test_missing_key_names_variable() {
        let descriptor = registry::lookup("gpt-4").unwrap();
        match create_client_with_key(descriptor, &EndpointConfig::default(), None) {
            Err(AppError::Config(msg)) => assert!(msg.contains("OPENAI_API_KEY")),
            Err(e) => panic!("Expected config error, got {}", e),
            Ok(_) => panic!("Expected error for OpenAI without API key"),
        }
    }

    #[test]
    fn test_blank_key_is_missing() {
        let descriptor = registry::lookup("claude-3-opus").unwrap();
        let result = create_client_with_key(descriptor, &EndpointConfig::default(), Some("  "));
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
