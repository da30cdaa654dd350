//! `history [tag]`: print stored conversations.

use std::error::Error;

use crate::core::config::Config;
use crate::core::history::{ConversationRecord, FileBackend, HistoryStore};

pub fn run(config: &Config, tag: &str) -> Result<(), Box<dyn Error>> {
    let store = HistoryStore::new(FileBackend::new(config.history_file()));
    let records = store.load()?;

    if records.is_empty() {
        println!("⚠️ No history found.");
        return Ok(());
    }

    let mut found = false;
    for record in records.iter().filter(|r| tag.is_empty() || r.tag == tag) {
        print_record(record);
        found = true;
    }
    if !found && !tag.is_empty() {
        println!("⚠️ No conversations found with tag '{tag}'.");
    }
    Ok(())
}

fn print_record(record: &ConversationRecord) {
    println!(
        "📜 Conversation {} ({}) [Tag: {}]:",
        record.id, record.timestamp, record.tag
    );
    println!("  Prompt: {}", record.prompt);
    println!("  Response: {}\n", record.response);
}
