//! Integration tests for the messaging service

use std::time::Duration;

use esst_core::messaging::{AutoResponder, MessagingService};
use esst_core::models::{FileMeta, Message, Role, Session};

fn session() -> Session {
    Session::new("u-me".to_string(), "Moi".to_string(), Role::Student)
}

#[test]
fn test_unread_count_matches_incoming_unread_messages() {
    let svc = MessagingService::new(session());
    let conv = svc.start_conversation(vec!["u-prof".to_string()]);

    // "bonjour" draws one auto reply from the peer; our own messages never
    // count as unread.
    svc.send_message(&conv.id, "Bonjour, une question sur le TP").unwrap();
    svc.send_message(&conv.id, "C'est au sujet de la partie 2").unwrap();

    let messages = svc.messages(&conv.id);
    let expected = messages
        .iter()
        .filter(|m| m.sender_id != "u-me" && !m.is_read)
        .count();

    let summary = svc
        .conversations()
        .into_iter()
        .find(|c| c.id == conv.id)
        .unwrap();
    assert_eq!(summary.unread_count as usize, expected);
    assert_eq!(summary.unread_count, 1);
}

#[test]
fn test_mark_as_read_resets_unread() {
    let svc = MessagingService::new(session());
    let conv = svc.start_conversation(vec!["u-prof".to_string()]);
    svc.send_message(&conv.id, "bonjour").unwrap();

    assert_eq!(svc.mark_as_read(&conv.id), 1);

    let summary = &svc.conversations()[0];
    assert_eq!(summary.unread_count, 0);
}

#[test]
fn test_file_message_keeps_metadata() {
    let svc = MessagingService::new(session());
    let conv = svc.start_conversation(vec!["u-prof".to_string()]);

    let sent = svc
        .send_file(
            &conv.id,
            "Mon rapport",
            FileMeta {
                name: "rapport.pdf".to_string(),
                size: 128_000,
                mime: "application/pdf".to_string(),
            },
        )
        .unwrap();

    let stored = &svc.messages(&conv.id)[0];
    assert_eq!(stored.id, sent.id);
    assert_eq!(stored.file.as_ref().unwrap().name, "rapport.pdf");
}

#[test]
fn test_custom_responder_is_consulted() {
    struct EchoResponder;

    impl AutoResponder for EchoResponder {
        fn reply_to(&self, message: &Message) -> Option<String> {
            Some(format!("reçu: {}", message.content))
        }
    }

    let svc = MessagingService::with_responder(session(), Some(Box::new(EchoResponder)));
    let conv = svc.start_conversation(vec!["u-prof".to_string()]);

    svc.send_message(&conv.id, "test").unwrap();

    let msgs = svc.messages(&conv.id);
    assert_eq!(msgs.len(), 2);
    assert_eq!(msgs[1].content, "reçu: test");
}

#[test]
fn test_no_responder_means_no_replies() {
    let svc = MessagingService::with_responder(session(), None);
    let conv = svc.start_conversation(vec!["u-prof".to_string()]);

    svc.send_message(&conv.id, "bonjour").unwrap();

    assert_eq!(svc.messages(&conv.id).len(), 1);
}

#[test]
fn test_typing_indicator_expiry_and_refresh() {
    let svc = MessagingService::with_responder(session(), None)
        .with_typing_timeout(Duration::from_secs(60));
    let conv = svc.start_conversation(vec!["u-prof".to_string()]);

    svc.set_typing(&conv.id);
    assert_eq!(svc.typing_users(&conv.id), vec!["u-me".to_string()]);

    // Re-typing keeps the flag alive; clearing removes it at once
    svc.set_typing(&conv.id);
    svc.clear_typing(&conv.id);
    assert!(svc.typing_users(&conv.id).is_empty());
}

#[test]
fn test_messages_of_unknown_conversation_are_empty() {
    let svc = MessagingService::new(session());

    assert!(svc.messages("nope").is_empty());
    assert!(svc.send_message("nope", "hello").is_none());
}
