//! Projections from session records to the JSON the API returns.

use courier_session::{Chat, Message};
use courier_types::api::{ChatSummary, MessageView};

pub fn message_view(message: &Message) -> MessageView {
    MessageView {
        from: message.from.clone(),
        body: message.body.clone(),
        timestamp: message.timestamp,
        has_media: message.has_media,
        id: message.id.id.clone(),
        is_group_msg: message.is_group_msg,
    }
}

/// Empty names and empty last-message bodies are reported as `null`.
pub fn chat_summary(chat: &Chat) -> ChatSummary {
    ChatSummary {
        id: chat.id.serialized.clone(),
        name: chat.name.clone().filter(|name| !name.is_empty()),
        is_group: chat.is_group,
        last_message: chat
            .last_message
            .as_ref()
            .and_then(|m| m.body.clone())
            .filter(|body| !body.is_empty()),
        timestamp: chat.timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_session::LastMessage;

    use crate::testing::{chat, last_message, message};

    #[test]
    fn message_view_takes_short_id() {
        let view = message_view(&message("M1", "1555@c.us", "hello"));
        assert_eq!(view.id, "M1");
        assert_eq!(view.from, "1555@c.us");
        assert_eq!(view.body, "hello");
    }

    #[test]
    fn chat_summary_nulls_missing_fields() {
        let mut c = chat("1555@c.us");
        c.name = Some(String::new());
        c.last_message = Some(last_message(""));

        let summary = chat_summary(&c);
        assert_eq!(summary.id, "1555@c.us");
        assert_eq!(summary.name, None);
        assert_eq!(summary.last_message, None);
    }

    #[test]
    fn chat_summary_nulls_bodiless_last_message() {
        let mut c = chat("1555@c.us");
        c.last_message = Some(LastMessage::default());
        assert_eq!(chat_summary(&c).last_message, None);
    }

    #[test]
    fn chat_summary_keeps_present_fields() {
        let mut c = chat("1203@g.us");
        c.name = Some("Family".into());
        c.is_group = true;
        c.last_message = Some(last_message("dinner?"));

        let summary = chat_summary(&c);
        assert_eq!(summary.name.as_deref(), Some("Family"));
        assert!(summary.is_group);
        assert_eq!(summary.last_message.as_deref(), Some("dinner?"));
    }
}
