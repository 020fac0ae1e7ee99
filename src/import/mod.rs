//! Note import: content hashing, dedup reconciliation, batch driver
//!
//! Batch imports treat every file independently. One file failing to
//! commit is reported and logged, never aborting the rest; there is no
//! cross-file transaction.

pub mod hash;
pub mod reconcile;

pub use hash::content_hash;
pub use reconcile::{
    commit_import, evaluate_candidate, CandidateStatus, ImportAction, ImportCandidate,
    ImportError, ImportOutcome,
};

use crate::markdown::parse_note;
use crate::store::Store;

/// One file handed to the batch importer.
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub name: String,
    pub contents: String,
}

/// A per-file failure inside a batch.
#[derive(Debug, Clone)]
pub struct ImportFileError {
    pub file_name: String,
    pub message: String,
}

/// Summary of a batch import.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub created: usize,
    pub overwritten: usize,
    pub skipped: usize,
    pub outcomes: Vec<ImportOutcome>,
    pub errors: Vec<ImportFileError>,
}

impl ImportReport {
    pub fn total_processed(&self) -> usize {
        self.created + self.overwritten + self.skipped
    }
}

/// Import a batch of markdown files.
///
/// `on_duplicate` overrides the default skip for duplicate candidates; new
/// candidates always commit as fresh cards. Candidates are processed in
/// order and independently.
pub fn import_files(
    store: &mut dyn Store,
    files: &[ImportFile],
    on_duplicate: ImportAction,
    now: i64,
) -> ImportReport {
    let mut report = ImportReport::default();

    for file in files {
        let note = parse_note(&file.contents, &file.name);

        let outcome = match evaluate_candidate(store, note, &file.name) {
            Ok(candidate) => {
                let action = if candidate.is_duplicate() {
                    on_duplicate
                } else {
                    candidate.default_action()
                };
                commit_import(store, &candidate, action, now)
            }
            Err(err) => Err(err),
        };

        match outcome {
            Ok(outcome) => {
                match outcome {
                    ImportOutcome::Created(_) => report.created += 1,
                    ImportOutcome::Overwritten(_) => report.overwritten += 1,
                    ImportOutcome::Skipped(_) => report.skipped += 1,
                }
                report.outcomes.push(outcome);
            }
            Err(err) => {
                log::warn!("failed to import {}: {}", file.name, err);
                report.errors.push(ImportFileError {
                    file_name: file.name.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn file(name: &str, contents: &str) -> ImportFile {
        ImportFile {
            name: name.to_string(),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_batch_imports_each_file() {
        let mut store = MemoryStore::new();
        let files = vec![
            file("a.md", "# Alpha\nFirst."),
            file("b.md", "# Beta\nSecond."),
        ];

        let report = import_files(&mut store, &files, ImportAction::Skip, 1_000);
        assert_eq!(report.created, 2);
        assert_eq!(report.total_processed(), 2);
        assert!(report.errors.is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_duplicate_within_batch_uses_policy() {
        let mut store = MemoryStore::new();
        let files = vec![
            file("a.md", "# Alpha\nSame."),
            file("copy-of-a.md", "# Alpha\nSame."),
        ];

        let report = import_files(&mut store, &files, ImportAction::Skip, 1_000);
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.len(), 1);

        let report = import_files(&mut store, &files, ImportAction::Duplicate, 2_000);
        assert_eq!(report.created, 2);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reimport_defaults_to_skip() {
        let mut store = MemoryStore::new();
        let files = vec![file("a.md", "# Alpha\nBody.")];

        import_files(&mut store, &files, ImportAction::Skip, 1_000);
        let report = import_files(&mut store, &files, ImportAction::Skip, 2_000);

        assert_eq!(report.skipped, 1);
        assert_eq!(report.created, 0);
        assert_eq!(store.len(), 1);
    }
}
