use dashmap::DashMap;

/// Per-document progress and error messages, kept for diagnostics only.
///
/// Keyed by discovery URL (or path). Entries are only ever appended, and each
/// key is written by the one job generating that document. Nothing reads the
/// log to make a decision.
#[derive(Debug, Default)]
pub struct StateLog {
    entries: DashMap<String, Vec<String>>,
}

impl StateLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: &str, message: impl Into<String>) {
        self.entries
            .entry(id.to_string())
            .or_default()
            .push(message.into());
    }

    /// Copy of the messages recorded for `id`.
    pub fn messages(&self, id: &str) -> Vec<String> {
        self.entries
            .get(id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    /// Human-readable dump of one document's messages.
    pub fn dump(&self, id: &str) -> String {
        format!("{id}\n-----------\n{:#?}\n", self.messages(id))
    }

    /// Human-readable dump of everything, sorted by id.
    pub fn dump_all(&self) -> String {
        let mut ids: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids.iter().map(|id| self.dump(id)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
