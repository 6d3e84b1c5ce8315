use std::sync::Arc;

use crate::conversation::Conversation;
use crate::errors::AgentResult;
use crate::models::message::Message;
use crate::providers::base::Provider;

/// Agent pairs one conversation with the model gateway that continues it.
///
/// An agent is mutable state for a single logical conversation and is not
/// meant to be shared between concurrent callers.
pub struct Agent {
    provider: Arc<dyn Provider>,
    conversation: Conversation,
}

impl Agent {
    /// Create a new Agent, optionally seeding the conversation with a system prompt
    pub fn new(provider: Arc<dyn Provider>, system_prompt: Option<&str>) -> Self {
        Self {
            provider,
            conversation: Conversation::new(system_prompt),
        }
    }

    /// Append `user_text`, ask the model for the next turn with the whole
    /// conversation, append the reply and return its text.
    ///
    /// If the gateway fails the error is returned and the user turn stays in
    /// the conversation unanswered.
    pub async fn send(&mut self, user_text: &str) -> AgentResult<String> {
        self.conversation.push(Message::user(user_text));

        let (response, usage) = self.provider.complete(self.conversation.messages()).await?;
        tracing::debug!(?usage, text = %response.content, "assistant replied");

        // Whatever role the provider tagged, this turn belongs to the assistant
        let reply = Message::assistant(response.content);
        let text = reply.content.clone();
        self.conversation.push(reply);
        Ok(text)
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }
}
