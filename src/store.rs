use std::path::{Path, PathBuf};

use crate::error::PipelineError;
use crate::models::DocumentRow;

/// A CSV-backed append log mapping document ids to document text.
///
/// Rows are ordered; writes rewrite the whole file, so a crash mid-run
/// loses at most the in-flight append and never leaves a torn record.
/// There is no locking: concurrent writers to the same store race.
#[derive(Debug, Clone)]
pub struct AggregationStore {
    path: PathBuf,
}

impl AggregationStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every row in file order. An absent store reads as empty.
    pub fn read_rows(&self) -> Result<Vec<DocumentRow>, PipelineError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path).map_err(|source| self.err(source))?;
        let mut rows = Vec::new();
        for record in reader.deserialize::<DocumentRow>() {
            rows.push(record.map_err(|source| self.err(source))?);
        }
        Ok(rows)
    }

    /// Rewrite the store in full with the given rows.
    pub fn write_rows(&self, rows: &[DocumentRow]) -> Result<(), PipelineError> {
        let mut writer = csv::Writer::from_path(&self.path).map_err(|source| self.err(source))?;
        for row in rows {
            writer.serialize(row).map_err(|source| self.err(source))?;
        }
        writer
            .flush()
            .map_err(|source| self.err(csv::Error::from(source)))?;
        Ok(())
    }

    /// Append one row: read the existing rows, push, rewrite the file.
    ///
    /// No dedup is performed — appending the same `doc_id` twice yields
    /// two rows. Idempotency across reruns is the producer's
    /// responsibility (check [`Self::contains_doc`] first, or truncate the
    /// store before reprocessing).
    pub fn append_row(&self, row: DocumentRow) -> Result<(), PipelineError> {
        let mut rows = self.read_rows()?;
        rows.push(row);
        self.write_rows(&rows)
    }

    /// Whether any existing row carries the given document id.
    pub fn contains_doc(&self, doc_id: &str) -> Result<bool, PipelineError> {
        Ok(self.read_rows()?.iter().any(|row| row.doc_id == doc_id))
    }

    fn err(&self, source: csv::Error) -> PipelineError {
        PipelineError::Store {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(doc_id: &str, text: &str) -> DocumentRow {
        DocumentRow {
            doc_id: doc_id.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = AggregationStore::new(dir.path().join("daily_text.csv"));

        let rows = vec![row("3", "hello there "), row("7", "it, was fine ")];
        store.write_rows(&rows).unwrap();

        assert_eq!(store.read_rows().unwrap(), rows);
    }

    #[test]
    fn test_append_creates_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = AggregationStore::new(dir.path().join("daily_text.csv"));
        assert!(!store.exists());

        store.append_row(row("1", "first ")).unwrap();

        assert!(store.exists());
        assert_eq!(store.read_rows().unwrap(), vec![row("1", "first ")]);
    }

    #[test]
    fn test_append_does_not_dedup() {
        // Duplicate suppression is a producer responsibility; the store
        // must keep both rows.
        let dir = tempfile::tempdir().unwrap();
        let store = AggregationStore::new(dir.path().join("daily_text.csv"));

        store.append_row(row("5", "first pass ")).unwrap();
        store.append_row(row("5", "second pass ")).unwrap();

        let rows = store.read_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].doc_id, "5");
        assert_eq!(rows[1].doc_id, "5");
    }

    #[test]
    fn test_contains_doc() {
        let dir = tempfile::tempdir().unwrap();
        let store = AggregationStore::new(dir.path().join("daily_text.csv"));
        assert!(!store.contains_doc("5").unwrap());

        store.append_row(row("5", "text ")).unwrap();
        assert!(store.contains_doc("5").unwrap());
        assert!(!store.contains_doc("6").unwrap());
    }

    #[test]
    fn test_missing_store_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AggregationStore::new(dir.path().join("absent.csv"));
        assert!(store.read_rows().unwrap().is_empty());
    }
}
