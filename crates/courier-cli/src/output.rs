use std::cmp::Reverse;
use std::path::Path;

use chrono::{DateTime, Local};

use courier_types::api::{ChatSummary, MessageView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOrder {
    Chronological,
    ReverseChronological,
    Alphabetical,
}

/// Chats without a timestamp sort as oldest; unnamed chats sort by id.
pub fn order_chats(chats: &mut [ChatSummary], order: ChatOrder) {
    match order {
        ChatOrder::Chronological => chats.sort_by_key(|c| c.timestamp.unwrap_or(i64::MIN)),
        ChatOrder::ReverseChronological => {
            chats.sort_by_key(|c| Reverse(c.timestamp.unwrap_or(i64::MIN)))
        }
        ChatOrder::Alphabetical => chats.sort_by_cached_key(|c| display_name(c).to_lowercase()),
    }
}

pub fn display_name(chat: &ChatSummary) -> &str {
    chat.name.as_deref().unwrap_or(&chat.id)
}

pub fn chat_line(chat: &ChatSummary) -> String {
    let marker = if chat.is_group { "#" } else { "@" };
    let when = chat.timestamp.map(format_timestamp).unwrap_or_default();
    let last = chat.last_message.as_deref().map(first_line).unwrap_or("");
    format!("{} {:<24} {:<28} {:>16}  {}", marker, display_name(chat), chat.id, when, last)
}

pub fn message_line(message: &MessageView) -> String {
    let media = if message.has_media { " [media]" } else { "" };
    format!(
        "[{}] {}:{} {}",
        format_timestamp(message.timestamp),
        message.from,
        media,
        message.body
    )
}

pub fn format_timestamp(ts: i64) -> String {
    DateTime::from_timestamp(ts, 0)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// Content type from the file extension; unknown extensions are sent as JPEG.
pub fn guess_image_mimetype(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}
