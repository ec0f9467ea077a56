use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Filesystem layout for a study, resolved once at startup.
///
/// Every path the pipeline touches is computed from this struct and passed
/// down explicitly; components never read environment variables or mutate
/// the process working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory containing one folder per study
    pub study_root: PathBuf,
    /// Path from a subject folder to its transcript tables
    pub transcripts_subdir: PathBuf,
    /// Path from a subject folder to its audio QC outputs (metadata lives here)
    pub audio_qc_subdir: PathBuf,
    /// Root directory for topic-modeling corpus outputs
    pub corpus_root: PathBuf,
    /// Subdirectory of the corpus root holding per-subject daily stores
    pub daily_text_subdir: PathBuf,
    /// Subdirectory of the corpus root holding study-level subject stores
    pub subject_text_subdir: PathBuf,
}

impl Config {
    /// Resolve the configuration from named environment values.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            study_root: require_env("STUDY_ROOT")?,
            transcripts_subdir: require_env("TRANSCRIPTS_SUBDIR")?,
            audio_qc_subdir: require_env("AUDIO_QC_SUBDIR")?,
            corpus_root: require_env("CORPUS_ROOT")?,
            daily_text_subdir: require_env("DAILY_TEXT_DIR")?,
            subject_text_subdir: require_env("SUBJECT_TEXT_DIR")?,
        })
    }

    /// Directory holding one CSV transcript per day for a subject.
    pub fn transcripts_dir(&self, study: &str, subject: &str) -> PathBuf {
        self.study_root
            .join(study)
            .join(subject)
            .join(&self.transcripts_subdir)
            .join("csv")
    }

    /// Per-subject metadata table with week numbers, if it exists.
    pub fn metadata_path(&self, study: &str, subject: &str) -> PathBuf {
        self.audio_qc_dir(study, subject)
            .join(format!("{study}_{subject}_metadataWithWeek.csv"))
    }

    /// Raw per-subject feature table used to synthesize metadata.
    pub fn features_path(&self, study: &str, subject: &str) -> PathBuf {
        self.audio_qc_dir(study, subject)
            .join(format!("{study}_{subject}_phoneAudioDiary_allFeatures.csv"))
    }

    /// Directory of per-subject daily aggregation stores for a study.
    pub fn daily_text_dir(&self) -> PathBuf {
        self.corpus_root.join(&self.daily_text_subdir)
    }

    /// Daily aggregation store for one subject.
    pub fn daily_store_path(&self, study: &str, subject: &str) -> PathBuf {
        self.daily_text_dir()
            .join(format!("{study}_{subject}_daily_text.csv"))
    }

    /// Study-level subject aggregation store.
    pub fn subject_store_path(&self, study: &str) -> PathBuf {
        self.corpus_root
            .join(&self.subject_text_subdir)
            .join(format!("{study}_subject_level_text.csv"))
    }

    /// Resolve a transcript path from a metadata row. Relative names are
    /// taken as relative to the subject's transcripts directory.
    pub fn resolve_transcript(&self, study: &str, subject: &str, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.transcripts_dir(study, subject).join(path)
        }
    }

    fn audio_qc_dir(&self, study: &str, subject: &str) -> PathBuf {
        self.study_root
            .join(study)
            .join(subject)
            .join(&self.audio_qc_subdir)
    }
}

fn require_env(name: &str) -> Result<PathBuf> {
    let value =
        std::env::var(name).with_context(|| format!("{name} environment variable not set"))?;
    Ok(PathBuf::from(value))
}
