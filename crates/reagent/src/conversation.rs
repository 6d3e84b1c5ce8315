use crate::models::message::Message;
use crate::models::role::Role;

/// The ordered, append-only history of one agent.
///
/// If a system prompt is given it is the first message and stays there for the
/// life of the conversation. Nothing is ever removed or reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: Option<&str>) -> Self {
        let messages = system_prompt
            .map(|prompt| vec![Message::system(prompt)])
            .unwrap_or_default();
        Self { messages }
    }

    /// Appends a user or assistant turn. System messages are only accepted
    /// through [`Conversation::new`].
    pub(crate) fn push(&mut self, message: Message) {
        debug_assert_ne!(message.role, Role::System);
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|message| message.role == Role::System)
            .map(Message::text)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
