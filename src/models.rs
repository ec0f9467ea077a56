use serde::{Deserialize, Serialize};

/// One row of a raw transcript table: a single speaker-attributed utterance.
///
/// Ephemeral — read from input, never persisted. Extra columns in the
/// source CSV are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UtteranceRow {
    /// Speaker label for this utterance
    pub subject: String,
    /// Utterance text, as transcribed
    pub text: String,
}

/// One normalized document for one (subject, day).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDocument {
    /// Academic calendar day index used as the document key
    pub time_point: i64,
    /// Cleaned token stream, each token followed by the separator
    pub text: String,
}

impl DailyDocument {
    /// Convert into the persisted store row, formatting the day index.
    pub fn into_row(self) -> DocumentRow {
        DocumentRow {
            doc_id: self.time_point.to_string(),
            text: self.text,
        }
    }
}

/// One normalized document covering a subject's whole study.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectDocument {
    /// Subject identifier
    pub doc_id: String,
    /// Concatenation of every daily document text, in row order
    pub text: String,
}

impl SubjectDocument {
    pub fn into_row(self) -> DocumentRow {
        DocumentRow {
            doc_id: self.doc_id,
            text: self.text,
        }
    }
}

/// Persisted aggregation store row: `doc_id` is a day index for daily
/// stores and a subject identifier for the study-level store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRow {
    pub doc_id: String,
    pub text: String,
}
