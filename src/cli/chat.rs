//! One chat turn: build context, stream the response, persist the exchange.

use std::error::Error;
use std::path::Path;

use crate::core::client::InferenceClient;
use crate::core::config::Config;
use crate::core::history::{FileBackend, HistoryBackend, HistoryStore};

pub async fn run(config: &Config, tag: &str, prompt: &str) -> Result<(), Box<dyn Error>> {
    // Credential check happens here, before any disk or network access.
    let client = InferenceClient::new(config)?;

    let store = HistoryStore::new(FileBackend::new(config.history_file()));
    let history = store.load()?;

    let outcome = client.send(&history, tag, prompt).await;
    finish_turn(&store, tag, prompt, outcome, &config.history_file())
}

/// Report the turn's outcome and persist it only on success.
///
/// An inference failure propagates before anything is appended — no partial
/// or empty record is ever written. The user has already seen a successful
/// response by the time the append runs, so a persistence failure is
/// reported on its own; they must know the turn was not recorded.
fn finish_turn<B: HistoryBackend>(
    store: &HistoryStore<B>,
    tag: &str,
    prompt: &str,
    outcome: crate::core::error::Result<String>,
    history_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let response = outcome?;
    println!("✅ Response: {response}");

    if let Err(e) = store.append_and_save(prompt, &response, tag) {
        return Err(format!("saving conversation: {e}").into());
    }
    println!(
        "✅ Conversation saved in {} with tag '{tag}'",
        history_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error as CoreError;
    use crate::core::history::MemoryBackend;

    #[test]
    fn failed_inference_appends_nothing() {
        let store = HistoryStore::new(MemoryBackend::new());
        let result = finish_turn(
            &store,
            "work",
            "p1",
            Err(CoreError::EmptyResponse),
            Path::new("conversations.json"),
        );

        assert!(result.is_err());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn successful_inference_appends_one_record() {
        let store = HistoryStore::new(MemoryBackend::new());
        finish_turn(
            &store,
            "work",
            "p1",
            Ok("r1".to_string()),
            Path::new("conversations.json"),
        )
        .unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].prompt, "p1");
        assert_eq!(records[0].response, "r1");
        assert_eq!(records[0].tag, "work");
    }
}
