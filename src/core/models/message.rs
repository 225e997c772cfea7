//! Conversation and message models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of message payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text
    Text,
    /// File attachment (metadata in `Message::file`)
    File,
}

impl MessageKind {
    /// String representation used in storage and wire formats
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::File => "file",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a file attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    /// Original file name
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// MIME type as reported by the uploader
    pub mime: String,
}

/// A single message inside a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique record id
    pub id: String,

    /// Sender user id
    pub sender_id: String,

    /// Message body (file caption for `MessageKind::File`)
    pub content: String,

    /// Payload kind
    pub kind: MessageKind,

    /// Attachment metadata, present when `kind` is `File`
    pub file: Option<FileMeta>,

    /// When the message was sent
    pub sent_at: DateTime<Utc>,

    /// Whether the recipient has read the message
    pub is_read: bool,

    /// Whether the message body has been edited
    pub edited: bool,
}

impl Message {
    /// Create a text message
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `sender_id` - Sender user id
    /// * `content` - Message body
    /// * `sent_at` - Send timestamp
    #[must_use]
    pub const fn text(
        id: String,
        sender_id: String,
        content: String,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender_id,
            content,
            kind: MessageKind::Text,
            file: None,
            sent_at,
            is_read: false,
            edited: false,
        }
    }

    /// Create a file message
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `sender_id` - Sender user id
    /// * `caption` - Caption shown with the attachment
    /// * `file` - Attachment metadata
    /// * `sent_at` - Send timestamp
    #[must_use]
    pub const fn with_file(
        id: String,
        sender_id: String,
        caption: String,
        file: FileMeta,
        sent_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            sender_id,
            content: caption,
            kind: MessageKind::File,
            file: Some(file),
            sent_at,
            is_read: false,
            edited: false,
        }
    }
}

/// Summary of a conversation
///
/// `unread_count` and `last_message` are recomputed from the message list
/// whenever it changes; they are never incrementally maintained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique record id
    pub id: String,

    /// Participant user ids (including the current user)
    pub participants: Vec<String>,

    /// Messages from other participants not yet read
    pub unread_count: u32,

    /// Body of the most recent message, if any
    pub last_message: Option<String>,

    /// Timestamp of the most recent message, if any
    pub last_activity: Option<DateTime<Utc>>,
}

impl Conversation {
    /// Create an empty conversation
    ///
    /// # Arguments
    /// * `id` - Unique record id
    /// * `participants` - Participant user ids
    #[must_use]
    pub const fn new(id: String, participants: Vec<String>) -> Self {
        Self {
            id,
            participants,
            unread_count: 0,
            last_message: None,
            last_activity: None,
        }
    }

    /// Participants other than `user_id`
    #[must_use]
    pub fn others(&self, user_id: &str) -> Vec<&str> {
        self.participants
            .iter()
            .filter(|p| p.as_str() != user_id)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message() {
        let msg = Message::text(
            "m-1".to_string(),
            "u-2".to_string(),
            "Bonjour".to_string(),
            Utc::now(),
        );

        assert_eq!(msg.kind, MessageKind::Text);
        assert!(msg.file.is_none());
        assert!(!msg.is_read);
        assert!(!msg.edited);
    }

    #[test]
    fn test_file_message() {
        let msg = Message::with_file(
            "m-2".to_string(),
            "u-2".to_string(),
            "Sujet du TP".to_string(),
            FileMeta {
                name: "tp3.pdf".to_string(),
                size: 52_000,
                mime: "application/pdf".to_string(),
            },
            Utc::now(),
        );

        assert_eq!(msg.kind, MessageKind::File);
        assert_eq!(msg.file.as_ref().unwrap().name, "tp3.pdf");
    }

    #[test]
    fn test_conversation_others() {
        let conv = Conversation::new(
            "c-1".to_string(),
            vec!["u-1".to_string(), "u-2".to_string(), "u-3".to_string()],
        );

        assert_eq!(conv.others("u-1"), vec!["u-2", "u-3"]);
        assert_eq!(conv.unread_count, 0);
    }
}
