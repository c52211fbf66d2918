use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One prompt/reply exchange with the language model
#[derive(Debug, Serialize)]
pub struct ExchangeRecord<'a> {
    pub run_id: &'a str,
    pub caller: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
    pub reply: Option<&'a str>,
    pub error: Option<String>,
    pub timestamp: String,
}

/// Writes model exchanges to disk for later inspection.
///
/// Layout: `<root>/<run_id>/<NNN>_<caller>_message.json`. A store without a
/// root directory records nothing.
#[derive(Debug)]
pub struct TranscriptStore {
    root: Option<PathBuf>,
    counter: AtomicUsize,
}

impl TranscriptStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            counter: AtomicUsize::new(1),
        }
    }

    pub fn disabled() -> Self {
        Self::new(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    fn next_sequence_number(&self) -> usize {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Persist a record. Failures are logged and otherwise ignored.
    pub fn record(&self, record: &ExchangeRecord<'_>) {
        if let Err(e) = self.try_record(record) {
            log::warn!("Failed to store transcript for {}: {}", record.caller, e);
        }
    }

    fn try_record(&self, record: &ExchangeRecord<'_>) -> Result<()> {
        let Some(root) = &self.root else {
            return Ok(());
        };

        let dir = root.join(record.run_id);
        fs::create_dir_all(&dir)?;

        let filename = message_filename(record.caller, self.next_sequence_number());
        fs::write(dir.join(&filename), serde_json::to_string_pretty(record)?)?;
        log::debug!("Stored {} exchange: {}", record.caller, filename);
        Ok(())
    }
}

/// Sequential filename for a stored exchange
pub fn message_filename(caller: &str, sequence_number: usize) -> String {
    format!("{:03}_{}_message.json", sequence_number, caller)
}
