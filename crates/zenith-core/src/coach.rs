//! Scripted coach chat.
//!
//! The transcript is seeded from content and every reply is the same canned
//! line. Nothing leaves the process.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Coach,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub lines: Vec<String>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            role: ChatRole::User,
            lines: vec![text.to_string()],
        }
    }

    pub fn coach(text: &str) -> Self {
        Self {
            role: ChatRole::Coach,
            lines: vec![text.to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachChat {
    messages: Vec<ChatMessage>,
    #[serde(skip)]
    canned_reply: String,
}

impl CoachChat {
    pub fn new(transcript: Vec<ChatMessage>, canned_reply: impl Into<String>) -> Self {
        Self {
            messages: transcript,
            canned_reply: canned_reply.into(),
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append the user's line followed by the scripted answer.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank input; the transcript is unchanged.
    pub fn send(&mut self, text: &str) -> Result<&ChatMessage, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::invalid("message", "reply cannot be empty"));
        }
        self.messages.push(ChatMessage::user(text));
        self.messages.push(ChatMessage::coach(&self.canned_reply));
        Ok(&self.messages[self.messages.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat() -> CoachChat {
        CoachChat::new(vec![ChatMessage::coach("Hi there")], "Keep going!")
    }

    #[test]
    fn send_appends_user_line_and_reply() {
        let mut chat = chat();
        let reply = chat.send("  I'm stressed  ").unwrap().clone();
        assert_eq!(reply, ChatMessage::coach("Keep going!"));
        assert_eq!(chat.messages().len(), 3);
        assert_eq!(chat.messages()[1], ChatMessage::user("I'm stressed"));
    }

    #[test]
    fn blank_message_is_rejected() {
        let mut chat = chat();
        assert!(chat.send("   ").is_err());
        assert_eq!(chat.messages().len(), 1);
    }
}
