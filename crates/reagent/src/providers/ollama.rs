use async_trait::async_trait;
use reqwest::Client;

use super::base::{Provider, Usage};
use super::configs::OllamaProviderConfig;
use super::utils::complete_chat;
use crate::errors::GatewayError;
use crate::models::message::Message;

/// Talks to a local Ollama server through its OpenAI compatible endpoint.
pub struct OllamaProvider {
    client: Client,
    config: OllamaProviderConfig,
}

impl OllamaProvider {
    pub fn new(config: OllamaProviderConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn complete(&self, messages: &[Message]) -> Result<(Message, Usage), GatewayError> {
        complete_chat(
            &self.client,
            &self.config.host,
            None,
            &self.config.model,
            messages,
            self.config.temperature,
            self.config.max_tokens,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_basic() -> anyhow::Result<()> {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(json!({"model": "qwen2.5"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Answer: Hello!"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 12, "completion_tokens": 15, "total_tokens": 27}
            })))
            .mount(&mock_server)
            .await;

        let config = OllamaProviderConfig {
            host: mock_server.uri(),
            ..OllamaProviderConfig::default()
        };
        let provider = OllamaProvider::new(config)?;

        let (message, usage) = provider.complete(&[Message::user("Hello?")]).await?;

        assert_eq!(message, Message::assistant("Answer: Hello!"));
        assert_eq!(usage.total_tokens, Some(27));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_host_is_gateway_error() {
        let config = OllamaProviderConfig {
            host: "http://127.0.0.1:1".to_string(),
            ..OllamaProviderConfig::default()
        };
        let provider = OllamaProvider::new(config).unwrap();

        let err = provider
            .complete(&[Message::user("Hello?")])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
