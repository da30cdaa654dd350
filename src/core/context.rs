//! Tag-scoped context reconstruction for multi-turn requests.

use crate::api::ChatMessage;
use crate::core::history::ConversationRecord;

/// Turns stored history plus a new prompt into the message list for one
/// request. Behind a trait so a bounded or summarizing strategy can replace
/// [`FullReplay`] without touching the inference client.
pub trait ContextStrategy {
    fn build(&self, history: &[ConversationRecord], tag: &str, prompt: &str) -> Vec<ChatMessage>;
}

/// Replays the complete prior history for the tag, in stored order, with no
/// truncation. Growth is unbounded; that matches the recorded conversation
/// contract and is a known scaling limit.
///
/// An empty tag sends the new prompt alone (single-turn).
pub struct FullReplay;

impl ContextStrategy for FullReplay {
    fn build(&self, history: &[ConversationRecord], tag: &str, prompt: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::new();
        if !tag.is_empty() {
            for record in history.iter().filter(|r| r.tag == tag) {
                messages.push(ChatMessage::user(record.prompt.clone()));
                messages.push(ChatMessage::assistant(record.response.clone()));
            }
        }
        messages.push(ChatMessage::user(prompt));
        messages
    }
}
