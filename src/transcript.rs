use std::path::Path;

use tracing::warn;

use crate::error::PipelineError;
use crate::models::UtteranceRow;

/// Read a raw transcript CSV into utterance rows.
///
/// A file that cannot be opened or parsed at all yields a `Parse` error so
/// the caller can skip it. Individual malformed rows (missing cells,
/// non-text values) are reported and skipped without failing the file.
pub fn read_transcript(path: &Path) -> Result<Vec<UtteranceRow>, PipelineError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<UtteranceRow>() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => warn!("Skipping malformed row in {:?}: {}", path, err),
        }
    }

    Ok(rows)
}
