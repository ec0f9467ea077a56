use tracing::{info, warn};

use crate::clean::{clean_token, CleanConfig};
use crate::config::Config;
use crate::error::PipelineError;
use crate::filter::select_subject_utterances;
use crate::metadata::load_metadata;
use crate::models::{DailyDocument, UtteranceRow};
use crate::store::AggregationStore;
use crate::transcript::read_transcript;

/// Configuration for building daily documents
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Token cleaning policy
    pub clean: CleanConfig,
    /// Separator appended after every retained token
    pub separator: char,
    /// Restrict utterances to the dominant speaker
    pub subject_only: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            clean: CleanConfig::default(),
            separator: ' ',
            subject_only: true,
        }
    }
}

/// Build one normalized document from a transcript's utterance rows.
///
/// Utterances are split on single-space boundaries, each token is cleaned,
/// and every surviving token is written followed by the separator.
/// Utterance boundaries are not marked; adjacent token streams simply run
/// together. Tokens that fail to clean are reported and dropped.
pub fn build_document(
    rows: Vec<UtteranceRow>,
    time_point: i64,
    config: &BuildConfig,
) -> DailyDocument {
    let rows = if config.subject_only {
        select_subject_utterances(rows)
    } else {
        rows
    };

    let mut text = String::new();
    for row in &rows {
        for raw in row.text.split(' ') {
            match clean_token(raw, &config.clean) {
                Ok(token) if !token.is_empty() => {
                    text.push_str(&token);
                    text.push(config.separator);
                }
                Ok(_) => {}
                Err(err) => warn!("Problem with token: {}", err),
            }
        }
    }

    DailyDocument { time_point, text }
}

/// Outcome of one daily batch run
#[derive(Debug, Default, Clone)]
pub struct DailySummary {
    /// Documents built and appended to the store
    pub documents_appended: usize,
    /// Transcripts skipped because they failed to load or store
    pub transcripts_skipped: usize,
    /// Transcripts skipped because their day was already in the store
    pub duplicates_skipped: usize,
}

/// Process every transcript listed in a subject's metadata, appending one
/// document per day to the subject's daily store.
///
/// A transcript that fails to load or append is reported and skipped; a
/// failure on one day never aborts the batch. Days already present in the
/// store are skipped, so rerunning is safe without clearing the store
/// first.
pub fn run_daily(
    config: &Config,
    study: &str,
    subject: &str,
    build: &BuildConfig,
) -> Result<DailySummary, PipelineError> {
    let transcripts_dir = config.transcripts_dir(study, subject);
    if !transcripts_dir.is_dir() {
        return Err(PipelineError::MissingResource {
            path: transcripts_dir,
        });
    }

    info!("Summarizing daily transcript text for {}", subject);
    let metadata = load_metadata(config, study, subject)?;

    let store = AggregationStore::new(config.daily_store_path(study, subject));
    if let Some(parent) = store.path().parent() {
        std::fs::create_dir_all(parent).map_err(|source| PipelineError::Store {
            path: store.path().to_path_buf(),
            source: source.into(),
        })?;
    }

    let mut summary = DailySummary::default();
    for row in &metadata {
        let path = config.resolve_transcript(study, subject, &row.transcript_name);
        let rows = match read_transcript(&path) {
            Ok(rows) => rows,
            Err(err) => {
                warn!("Problem loading {:?}: {}", path, err);
                summary.transcripts_skipped += 1;
                continue;
            }
        };

        let document = build_document(rows, row.acad_cal_day, build);
        let doc_id = document.time_point.to_string();
        match store.contains_doc(&doc_id) {
            Ok(true) => {
                warn!("Day {} already in {:?}, skipping append", doc_id, store.path());
                summary.duplicates_skipped += 1;
                continue;
            }
            Ok(false) => {}
            Err(err) => {
                warn!("Skipping day {}: {}", doc_id, err);
                summary.transcripts_skipped += 1;
                continue;
            }
        }

        if let Err(err) = store.append_row(document.into_row()) {
            warn!("Failed to append day {}: {}", doc_id, err);
            summary.transcripts_skipped += 1;
            continue;
        }
        summary.documents_appended += 1;
    }

    info!(
        "Daily run for {}: {} appended, {} skipped, {} duplicates",
        subject,
        summary.documents_appended,
        summary.transcripts_skipped,
        summary.duplicates_skipped
    );
    Ok(summary)
}
