use async_trait::async_trait;
use reqwest::Client;

use super::base::{Provider, Usage};
use super::configs::OpenAiProviderConfig;
use super::utils::complete_chat;
use crate::errors::GatewayError;
use crate::models::message::Message;

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<(Message, Usage), GatewayError> {
        complete_chat(
            &self.client,
            &self.config.host,
            Some(self.config.api_key.as_str()),
            &self.config.model,
            messages,
            self.config.temperature,
            self.config.max_tokens,
        )
        .await
    }
}
