//! `navigate [tag]`: interactive cursor navigation over history.

use std::error::Error;
use std::io::{self, Write};

use crate::core::config::Config;
use crate::core::history::{filter_by_tag, ConversationRecord, FileBackend, HistoryStore};
use crate::core::navigator::{Navigator, Transition};
use crate::utils::input::{LineSource, StdinLineSource};

pub fn run(config: &Config, tag: &str) -> Result<(), Box<dyn Error>> {
    let store = HistoryStore::new(FileBackend::new(config.history_file()));
    let records = store.load()?;
    let view = filter_by_tag(records, tag);

    let Some(mut navigator) = Navigator::new(view) else {
        if tag.is_empty() {
            println!("⚠️ No history found.");
        } else {
            println!("⚠️ No conversations found with tag '{tag}'.");
        }
        return Ok(());
    };

    run_loop(&mut navigator, &mut StdinLineSource)?;
    Ok(())
}

/// Blocking loop: redisplay the current record, read one line, apply it.
/// Terminates on `back` or end of input.
pub fn run_loop(navigator: &mut Navigator, input: &mut dyn LineSource) -> io::Result<()> {
    println!("🔍 Use 'next', 'previous', 'select <ID>', or 'back' to exit navigation.");
    loop {
        display_current(navigator.current());
        print!("Navigate (next/previous/select <ID>/back): ");
        io::stdout().flush()?;

        let Some(line) = input.next_line()? else {
            return Ok(());
        };
        match navigator.apply(&line) {
            Transition::Exit => return Ok(()),
            Transition::Moved => {}
            Transition::AtNewest => {
                println!("⚠️ You are at the most recent conversation.");
            }
            Transition::AtOldest => {
                println!("⚠️ You are at the first conversation.");
            }
            Transition::UnknownId(id) => {
                println!("❌ No conversation with ID {id} for the selected tag.");
            }
            Transition::MalformedId => {
                println!("❌ Invalid ID. Use a valid number.");
            }
            Transition::UnknownCommand => {
                println!("❌ Invalid command. Use 'next', 'previous', 'select <ID>', or 'back'.");
            }
        }
    }
}

fn display_current(record: &ConversationRecord) {
    println!(
        "\n📜 Current Conversation {} ({}) [Tag: {}]:",
        record.id, record.timestamp, record.tag
    );
    println!("  Prompt: {}", record.prompt);
    println!("  Response: {}", record.response);
}
