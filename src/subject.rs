use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::models::SubjectDocument;
use crate::store::AggregationStore;

/// Subject identifier encoded in a daily store filename
/// (`{study}_{subject}_daily_text.csv`).
///
/// Falls back to the whole file stem when the name has no second segment.
pub fn subject_id_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(
        stem.split('_')
            .nth(1)
            .unwrap_or(stem)
            .to_string(),
    )
}

/// Collapse one subject's daily store into a single document.
///
/// Text fields are concatenated in row order with no inserted separator;
/// each daily text already ends in its own trailing separator.
pub fn build_subject_document(store_path: &Path) -> Result<SubjectDocument, PipelineError> {
    let rows = AggregationStore::new(store_path.to_path_buf()).read_rows()?;
    let text: String = rows.into_iter().map(|row| row.text).collect();
    let doc_id = subject_id_from_filename(store_path).unwrap_or_default();
    Ok(SubjectDocument { doc_id, text })
}

/// Outcome of one subject-level aggregation run
#[derive(Debug, Default, Clone)]
pub struct SubjectSummary {
    /// Subject rows written to the study-level store
    pub subjects_written: usize,
    /// Daily stores skipped because they failed to read
    pub files_skipped: usize,
}

/// Aggregate every subject's daily store for a study into the study-level
/// store, one row per subject.
///
/// Daily stores are enumerated in sorted filename order so runs are
/// reproducible. The study-level store is rewritten in full each run.
pub fn run_subject(config: &Config, study: &str) -> Result<SubjectSummary, PipelineError> {
    let daily_dir = config.daily_text_dir();
    if !daily_dir.is_dir() {
        return Err(PipelineError::MissingResource { path: daily_dir });
    }

    info!("Generating subject-level transcript text for {}", study);

    let prefix = format!("{study}_");
    let mut store_paths: Vec<_> = std::fs::read_dir(&daily_dir)
        .map_err(|source| PipelineError::Store {
            path: daily_dir.clone(),
            source: source.into(),
        })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension().is_some_and(|ext| ext == "csv")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
        })
        .collect();
    store_paths.sort();

    let mut summary = SubjectSummary::default();
    let mut rows = Vec::new();
    for path in &store_paths {
        match build_subject_document(path) {
            Ok(document) => {
                rows.push(document.into_row());
                summary.subjects_written += 1;
            }
            Err(err) => {
                warn!("Skipping {:?}: {}", path, err);
                summary.files_skipped += 1;
            }
        }
    }

    let output = AggregationStore::new(config.subject_store_path(study));
    if let Some(parent) = output.path().parent() {
        std::fs::create_dir_all(parent).map_err(|source| PipelineError::Store {
            path: output.path().to_path_buf(),
            source: source.into(),
        })?;
    }
    output.write_rows(&rows)?;

    info!(
        "Subject run for {}: {} subjects written, {} files skipped",
        study, summary.subjects_written, summary.files_skipped
    );
    Ok(summary)
}
