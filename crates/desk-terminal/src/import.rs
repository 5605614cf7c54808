//! # CSV User Import
//!
//! Bulk-creates user accounts from CSV records of the form
//! `name, active, tags, identifier` (tags space-separated, active `0` for
//! inactive). Rows are parsed into unsaved users first; a confirm pass
//! persists them one by one, tracking per-row outcome and progress.

use csv::ReaderBuilder;
use desk_core::{BoxedBackend, DeskError, DeskResult, User};
use std::sync::Arc;
use tracing::warn;

/// Outcome of one import row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportState {
    /// Parsed, not yet saved
    Pending,
    /// Persisted by the backend
    Saved,
    /// The backend rejected the row
    Failed,
}

/// One parsed row and its outcome
#[derive(Debug)]
pub struct ImportEntry {
    pub user: User,
    pub state: ImportState,
}

/// A user import in progress
pub struct UserImport {
    backend: BoxedBackend,
    pub entries: Vec<ImportEntry>,
    completed: usize,
}

impl UserImport {
    pub fn new(backend: BoxedBackend) -> Self {
        Self {
            backend,
            entries: Vec::new(),
            completed: 0,
        }
    }

    /// Parse CSV data into importable users.
    ///
    /// Returns the number of rows read. Parsing is all-or-nothing; a
    /// malformed row rejects the file.
    pub fn read_records(&mut self, csv_data: &str) -> DeskResult<usize> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(csv_data.as_bytes());

        for record in reader.records() {
            let record = record
                .map_err(|e| DeskError::InvalidRequest(format!("Invalid CSV record: {}", e)))?;

            let name = field(&record, 0, "name")?;
            let active = field(&record, 1, "active")? != "0";
            let tags: Vec<String> = field(&record, 2, "tags")?
                .split_whitespace()
                .map(String::from)
                .collect();
            let identifier = field(&record, 3, "identifier")?;

            let mut user = User::new(name)
                .with_active(active)
                .with_identifier(identifier);
            user.tags = tags;

            self.entries.push(ImportEntry {
                user,
                state: ImportState::Pending,
            });
        }

        Ok(self.entries.len())
    }

    /// Persist all pending users, one by one.
    ///
    /// A failed row does not stop the import; it is marked and skipped over.
    pub async fn confirm(&mut self) {
        let backend = Arc::clone(&self.backend);
        for entry in &mut self.entries {
            if entry.state != ImportState::Pending {
                continue;
            }
            match backend.save_user(&entry.user).await {
                Ok(saved) => {
                    entry.user = saved;
                    entry.state = ImportState::Saved;
                }
                Err(e) => {
                    warn!("Failed to import user {}: {}", entry.user.name, e);
                    entry.state = ImportState::Failed;
                }
            }
            self.completed += 1;
        }
    }

    /// Import progress in percent
    pub fn progress_percent(&self) -> f32 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.completed as f32 / self.entries.len() as f32 * 100.0
    }

    /// Number of rows that failed to save
    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state == ImportState::Failed)
            .count()
    }

    /// Drop all parsed rows and start over
    pub fn abort(&mut self) {
        self.entries.clear();
        self.completed = 0;
    }
}

fn field<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> DeskResult<&'r str> {
    record.get(index).ok_or_else(|| {
        DeskError::InvalidRequest(format!("CSV record is missing the {} column", name))
    })
}
