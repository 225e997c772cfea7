//! Messaging service
//!
//! Conversations and per-conversation message lists for the student/teacher
//! area, plus ephemeral typing indicators. Unread counts and last-message
//! summaries are recomputed from the message lists on every read rather than
//! incrementally maintained; both collections are small and session-local,
//! so the linear recompute is the simple and correct choice.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::Utc;

use crate::core::ids;
use crate::core::models::{Conversation, FileMeta, Message, Session};

/// Default lifetime of a typing indicator
pub const DEFAULT_TYPING_TIMEOUT: Duration = Duration::from_secs(3);

/// Produces automatic replies to just-sent messages
///
/// The responder is consulted inline by `send_message`; injecting one keeps
/// the canned-reply demo behavior out of the service itself and lets tests
/// substitute a silent or scripted implementation.
pub trait AutoResponder: Send + Sync {
    /// Inspect a just-sent message and optionally return a reply body
    fn reply_to(&self, message: &Message) -> Option<String>;
}

/// Stock responder that answers any message containing "bonjour"
#[derive(Debug, Clone, Copy, Default)]
pub struct GreetingResponder;

impl AutoResponder for GreetingResponder {
    fn reply_to(&self, message: &Message) -> Option<String> {
        if message.content.to_lowercase().contains("bonjour") {
            Some("Bonjour ! Comment puis-je vous aider ?".to_string())
        } else {
            None
        }
    }
}

struct MessagingState {
    conversations: Vec<Conversation>,
    /// Conversation id -> ordered message list
    messages: HashMap<String, Vec<Message>>,
    /// Conversation id -> (user id -> typing deadline)
    typing: HashMap<String, HashMap<String, Instant>>,
}

/// Conversations, messages, and typing indicators for one signed-in user
pub struct MessagingService {
    session: Session,
    responder: Option<Box<dyn AutoResponder>>,
    typing_timeout: Duration,
    state: Mutex<MessagingState>,
}

impl MessagingService {
    /// Create a service for the given session with the stock greeting
    /// responder and the default typing timeout
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self::with_responder(session, Some(Box::new(GreetingResponder)))
    }

    /// Create a service with an explicit (or no) auto-responder
    #[must_use]
    pub fn with_responder(session: Session, responder: Option<Box<dyn AutoResponder>>) -> Self {
        Self {
            session,
            responder,
            typing_timeout: DEFAULT_TYPING_TIMEOUT,
            state: Mutex::new(MessagingState {
                conversations: Vec::new(),
                messages: HashMap::new(),
                typing: HashMap::new(),
            }),
        }
    }

    /// Override the typing-indicator lifetime
    #[must_use]
    pub const fn with_typing_timeout(mut self, timeout: Duration) -> Self {
        self.typing_timeout = timeout;
        self
    }

    /// Id of the current user
    #[must_use]
    pub fn current_user(&self) -> &str {
        &self.session.user_id
    }

    /// Start a conversation with the given participants
    ///
    /// The current user is added to the participant list if absent.
    pub fn start_conversation(&self, mut participants: Vec<String>) -> Conversation {
        if !participants.contains(&self.session.user_id) {
            participants.push(self.session.user_id.clone());
        }

        let conversation = Conversation::new(ids::new_id(), participants);

        let mut state = self.lock();
        state.messages.insert(conversation.id.clone(), Vec::new());
        state.conversations.push(conversation.clone());
        conversation
    }

    /// Conversation summaries with unread counts and last messages
    /// recomputed from the message lists
    #[must_use]
    pub fn conversations(&self) -> Vec<Conversation> {
        let state = self.lock();
        state
            .conversations
            .iter()
            .map(|conv| {
                let mut conv = conv.clone();
                if let Some(messages) = state.messages.get(&conv.id) {
                    conv.unread_count = Self::count_unread(&self.session.user_id, messages);
                    conv.last_message = messages.last().map(|m| m.content.clone());
                    conv.last_activity = messages.last().map(|m| m.sent_at);
                }
                conv
            })
            .collect()
    }

    /// Messages of one conversation, oldest first (empty if unknown)
    #[must_use]
    pub fn messages(&self, conversation_id: &str) -> Vec<Message> {
        self.lock()
            .messages
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Send a text message as the current user
    ///
    /// The auto-responder, if any, is consulted inline; its reply is
    /// appended on behalf of the first other participant.
    ///
    /// # Returns
    /// The stored message, or `None` if the conversation is unknown
    pub fn send_message(&self, conversation_id: &str, content: &str) -> Option<Message> {
        let message = Message::text(
            ids::new_id(),
            self.session.user_id.clone(),
            content.to_string(),
            Utc::now(),
        );
        self.append(conversation_id, message)
    }

    /// Send a file message as the current user
    ///
    /// # Returns
    /// The stored message, or `None` if the conversation is unknown
    pub fn send_file(
        &self,
        conversation_id: &str,
        caption: &str,
        file: FileMeta,
    ) -> Option<Message> {
        let message = Message::with_file(
            ids::new_id(),
            self.session.user_id.clone(),
            caption.to_string(),
            file,
            Utc::now(),
        );
        self.append(conversation_id, message)
    }

    /// Mark every incoming message of a conversation as read
    ///
    /// # Returns
    /// The number of messages newly marked
    pub fn mark_as_read(&self, conversation_id: &str) -> usize {
        let mut state = self.lock();
        let me = self.session.user_id.clone();
        state.messages.get_mut(conversation_id).map_or(0, |msgs| {
            let mut marked = 0;
            for msg in msgs.iter_mut().filter(|m| m.sender_id != me && !m.is_read) {
                msg.is_read = true;
                marked += 1;
            }
            marked
        })
    }

    /// Replace a message body and flag it edited
    ///
    /// # Returns
    /// `true` if the message was found
    pub fn edit_message(&self, conversation_id: &str, message_id: &str, content: &str) -> bool {
        let mut state = self.lock();
        state
            .messages
            .get_mut(conversation_id)
            .and_then(|msgs| msgs.iter_mut().find(|m| m.id == message_id))
            .map_or(false, |msg| {
                msg.content = content.to_string();
                msg.edited = true;
                true
            })
    }

    /// Remove a message by id
    ///
    /// # Returns
    /// `true` if the message was removed
    pub fn delete_message(&self, conversation_id: &str, message_id: &str) -> bool {
        let mut state = self.lock();
        state.messages.get_mut(conversation_id).map_or(false, |msgs| {
            if let Some(pos) = msgs.iter().position(|m| m.id == message_id) {
                msgs.remove(pos);
                true
            } else {
                false
            }
        })
    }

    /// Flag the current user as typing in a conversation
    ///
    /// The flag expires `typing_timeout` after the most recent call; expiry
    /// is evaluated when `typing_users` is read, so there is no timer to
    /// cancel on teardown.
    pub fn set_typing(&self, conversation_id: &str) {
        let deadline = Instant::now() + self.typing_timeout;
        let mut state = self.lock();
        state
            .typing
            .entry(conversation_id.to_string())
            .or_default()
            .insert(self.session.user_id.clone(), deadline);
    }

    /// Clear the current user's typing flag immediately
    pub fn clear_typing(&self, conversation_id: &str) {
        let mut state = self.lock();
        if let Some(users) = state.typing.get_mut(conversation_id) {
            users.remove(&self.session.user_id);
        }
    }

    /// Users currently typing in a conversation (expired flags pruned)
    #[must_use]
    pub fn typing_users(&self, conversation_id: &str) -> Vec<String> {
        let now = Instant::now();
        let mut state = self.lock();
        state.typing.get_mut(conversation_id).map_or_else(Vec::new, |users| {
            users.retain(|_, deadline| *deadline > now);
            let mut names: Vec<String> = users.keys().cloned().collect();
            names.sort_unstable();
            names
        })
    }

    fn append(&self, conversation_id: &str, message: Message) -> Option<Message> {
        let reply = self
            .responder
            .as_ref()
            .and_then(|r| r.reply_to(&message));

        let mut state = self.lock();
        let peer = state
            .conversations
            .iter()
            .find(|c| c.id == conversation_id)?
            .others(&self.session.user_id)
            .first()
            .map_or_else(|| "system".to_string(), ToString::to_string);

        let msgs = state.messages.get_mut(conversation_id)?;
        msgs.push(message.clone());

        if let Some(body) = reply {
            msgs.push(Message::text(ids::new_id(), peer, body, Utc::now()));
        }

        Some(message)
    }

    fn count_unread(me: &str, messages: &[Message]) -> u32 {
        let count = messages
            .iter()
            .filter(|m| m.sender_id != me && !m.is_read)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MessagingState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;

    fn service() -> MessagingService {
        let session = Session::new("u-me".to_string(), "Moi".to_string(), Role::Student);
        MessagingService::new(session)
    }

    #[test]
    fn test_start_conversation_includes_current_user() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);

        assert!(conv.participants.contains(&"u-me".to_string()));
        assert!(conv.participants.contains(&"u-prof".to_string()));
    }

    #[test]
    fn test_send_message_to_unknown_conversation_is_none() {
        let svc = service();

        assert!(svc.send_message("nope", "salut").is_none());
    }

    #[test]
    fn test_bonjour_triggers_auto_reply() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);

        svc.send_message(&conv.id, "Bonjour monsieur").unwrap();

        let msgs = svc.messages(&conv.id);
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[1].sender_id, "u-prof");
    }

    #[test]
    fn test_plain_message_gets_no_reply() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);

        svc.send_message(&conv.id, "Voici mon rendu").unwrap();

        assert_eq!(svc.messages(&conv.id).len(), 1);
    }

    #[test]
    fn test_unread_count_counts_incoming_unread_only() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);

        // Own message plus the auto reply from the peer
        svc.send_message(&conv.id, "Bonjour !").unwrap();

        let summary = &svc.conversations()[0];
        assert_eq!(summary.unread_count, 1);

        svc.mark_as_read(&conv.id);
        let summary = &svc.conversations()[0];
        assert_eq!(summary.unread_count, 0);
    }

    #[test]
    fn test_edit_and_delete() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);
        let msg = svc.send_message(&conv.id, "brouillon").unwrap();

        assert!(svc.edit_message(&conv.id, &msg.id, "version finale"));
        let stored = &svc.messages(&conv.id)[0];
        assert_eq!(stored.content, "version finale");
        assert!(stored.edited);

        assert!(svc.delete_message(&conv.id, &msg.id));
        assert!(!svc.delete_message(&conv.id, &msg.id));
    }

    #[test]
    fn test_typing_expires() {
        let session = Session::new("u-me".to_string(), "Moi".to_string(), Role::Student);
        let svc = MessagingService::new(session).with_typing_timeout(Duration::ZERO);
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);

        svc.set_typing(&conv.id);

        assert!(svc.typing_users(&conv.id).is_empty());
    }

    #[test]
    fn test_typing_active_then_cleared() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);

        svc.set_typing(&conv.id);
        assert_eq!(svc.typing_users(&conv.id), vec!["u-me".to_string()]);

        svc.clear_typing(&conv.id);
        assert!(svc.typing_users(&conv.id).is_empty());
    }

    #[test]
    fn test_last_message_summary() {
        let svc = service();
        let conv = svc.start_conversation(vec!["u-prof".to_string()]);
        svc.send_message(&conv.id, "premier").unwrap();
        svc.send_message(&conv.id, "second").unwrap();

        let summary = &svc.conversations()[0];
        assert_eq!(summary.last_message.as_deref(), Some("second"));
        assert!(summary.last_activity.is_some());
    }
}
