use crate::{
    backend::InsightsBackend,
    error::{MeetlensError, Result},
    session::SessionContext,
    types::{ChatMessage, ChatRole},
};

pub const GREETING: &str =
    "Hello! I can help you understand this meeting content. Ask me anything about the discussion!";

/// Append-only chat history with at most one reply outstanding.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    next_id: u64,
    sending: bool,
}

/// Proof that a user message was accepted and a reply is awaited.
#[derive(Debug)]
#[must_use = "a pending reply must be completed or abandoned"]
pub struct PendingReply {
    message: String,
}

impl PendingReply {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A session opened with the assistant's greeting.
    pub fn new() -> Self {
        let mut session = Self::empty();
        session.push(ChatRole::Bot, GREETING.to_string());
        session
    }

    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
            sending: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    /// Record the user's message and mark a reply as outstanding.
    pub fn begin(&mut self, text: &str) -> Result<PendingReply> {
        if self.sending {
            return Err(MeetlensError::ChatInFlight);
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(MeetlensError::EmptyMessage);
        }

        self.push(ChatRole::User, text.to_string());
        self.sending = true;
        Ok(PendingReply {
            message: text.to_string(),
        })
    }

    pub fn complete(&mut self, pending: PendingReply, reply: String) -> &ChatMessage {
        drop(pending);
        self.sending = false;
        self.push(ChatRole::Bot, reply)
    }

    /// Clear the in-flight flag after a failed request. No bot message is added.
    pub fn abandon(&mut self, pending: PendingReply) {
        drop(pending);
        self.sending = false;
    }

    /// Send `text` through `backend` and append the reply.
    pub async fn send(
        &mut self,
        backend: &dyn InsightsBackend,
        session: &SessionContext,
        media_id: &str,
        text: &str,
    ) -> Result<&ChatMessage> {
        let pending = self.begin(text)?;

        let result = backend.send_chat(session, media_id, pending.message()).await;
        match result {
            Ok(reply) => Ok(self.complete(pending, reply)),
            Err(e) => {
                tracing::error!(media_id, error = %e, "chat request failed");
                self.abandon(pending);
                Err(e)
            }
        }
    }

    fn push(&mut self, role: ChatRole, message: String) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage { id, role, message });
        &self.messages[self.messages.len() - 1]
    }
}
