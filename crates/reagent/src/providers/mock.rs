use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::errors::GatewayError;
use crate::models::message::Message;
use crate::providers::base::{Provider, Usage};

/// A mock provider that returns pre-configured responses for testing.
///
/// Clones share state, so a test can hand one clone to the agent and inspect
/// the recorded requests through another.
#[derive(Clone, Default)]
pub struct MockProvider {
    responses: Arc<Mutex<Vec<Result<String, GatewayError>>>>,
    requests: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockProvider {
    /// Create a new mock provider with a sequence of text responses
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// Create a mock whose responses may include gateway failures
    pub fn with_results(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses)),
            requests: Arc::default(),
        }
    }

    /// Every conversation the provider was asked to complete, in call order
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn complete(&self, messages: &[Message]) -> Result<(Message, Usage), GatewayError> {
        self.requests.lock().unwrap().push(messages.to_vec());

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Return empty response if no more pre-configured responses
            Ok((Message::assistant(""), Usage::default()))
        } else {
            let text = responses.remove(0)?;
            Ok((Message::assistant(text), Usage::default()))
        }
    }
}
