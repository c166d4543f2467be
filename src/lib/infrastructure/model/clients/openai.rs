//! OpenAI-compatible client implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::{Environment, ProviderConfig};
use crate::infrastructure::model::traits::ModelProvider;
use crate::infrastructure::model::types::{ModelError, ModelRequest, ModelResponse};
use crate::types::ChatMessage;

/// OpenAI-compatible client (OpenAI, Azure-style proxies, vLLM, LM Studio, ...)
#[derive(Clone)]
pub struct OpenAIClient {
    base: HttpClientBase,
    api_path: String,
}

impl OpenAIClient {
    /// Fails when the API key variable is unset so a misconfigured run stops
    /// before the tool server is launched.
    pub fn from_config(config: &ProviderConfig, vars: &Environment) -> Result<Self, ModelError> {
        let api_key = config
            .resolve_api_key(vars)
            .ok_or_else(|| ModelError::missing_api_key(&config.api_key_env))?;
        Ok(Self {
            base: HttpClientBase::new(config.endpoint.clone(), api_key),
            api_path: config.api_path.clone(),
        })
    }
}

#[async_trait]
impl ModelProvider for OpenAIClient {
    async fn chat(&self, request: ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = self.base.build_url(&self.api_path);

        let payload = OpenAIRequest {
            model: &request.model,
            messages: request.messages.iter().map(OpenAIMessageRef::from).collect(),
            stream: false,
        };

        info!(
            endpoint = self.base.endpoint.as_str(),
            model = request.model.as_str(),
            messages = request.messages.len(),
            "Sending request to OpenAI-compatible provider"
        );

        let response: OpenAIResponse = self.base.post_with_bearer(&url, &payload).await?;
        debug!("Received response from OpenAI-compatible provider");

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or_else(|| ModelError::invalid_response("missing content"))?;

        Ok(ModelResponse::new(content))
    }
}

#[derive(Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessageRef<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct OpenAIMessageRef<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for OpenAIMessageRef<'a> {
    fn from(message: &'a ChatMessage) -> Self {
        Self {
            role: message.role.as_str(),
            content: &message.content,
        }
    }
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize)]
struct OpenAIChoice {
    message: Option<OpenAIMessage>,
}

#[derive(Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}
