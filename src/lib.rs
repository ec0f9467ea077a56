pub mod clean;
pub mod config;
pub mod daily;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod models;
pub mod store;
pub mod subject;
pub mod transcript;

pub use clean::{clean_token, CleanConfig};
pub use config::Config;
pub use daily::{build_document, run_daily, BuildConfig, DailySummary};
pub use error::{CleanError, PipelineError};
pub use filter::{dominant_speaker, select_subject_utterances};
pub use metadata::{load_metadata, week_for_day, MetadataRow};
pub use models::{DailyDocument, DocumentRow, SubjectDocument, UtteranceRow};
pub use store::AggregationStore;
pub use subject::{build_subject_document, run_subject, SubjectSummary};
pub use transcript::read_transcript;
