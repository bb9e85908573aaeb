//! Session history.

use serde::Serialize;

/// One executed command line and its result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Router the command ran on
    pub hostname: String,

    /// Command as displayed (`show bgp AS64500`)
    pub command: String,

    /// Result text, or the error message
    pub result: String,

    /// Whether the command failed
    pub is_error: bool,
}

impl HistoryEntry {
    /// A successful entry
    pub fn success(hostname: impl Into<String>, command: impl Into<String>, result: String) -> Self {
        Self {
            hostname: hostname.into(),
            command: command.into(),
            result,
            is_error: false,
        }
    }

    /// A failed entry
    pub fn error(hostname: impl Into<String>, command: impl Into<String>, message: String) -> Self {
        Self {
            hostname: hostname.into(),
            command: command.into(),
            result: message,
            is_error: true,
        }
    }

    /// `<router> > <command>`
    pub fn prompt(&self) -> String {
        format!("{} > {}", self.hostname, self.command)
    }
}

/// Entries of the current session, oldest first. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
