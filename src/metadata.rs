use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::PipelineError;

/// Number of day indices in the academic calendar (days 1..=279).
pub const CALENDAR_DAYS: i64 = 279;

/// One enriched metadata row: which transcript belongs to which day.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRow {
    pub subject: String,
    /// Path (or file name) of the transcript table for this day
    pub transcript_name: String,
    /// Academic calendar day index
    pub acad_cal_day: i64,
    /// Week number derived from the academic calendar
    pub week: i64,
}

/// Week number for an academic calendar day: week 1 spans the first five
/// days, every later week spans seven, through week 41.
pub fn week_for_day(day: i64) -> Option<i64> {
    match day {
        1..=5 => Some(1),
        6..=CALENDAR_DAYS => Some(2 + (day - 6) / 7),
        _ => None,
    }
}

/// Load the enriched metadata for one subject.
///
/// Prefers the pre-supplied `metadataWithWeek` table; when it is absent or
/// unreadable, synthesizes it from the raw feature table by joining the
/// academic calendar onto the feature rows, dropping rows with missing
/// data and rows flagged as unavailable diaries.
pub fn load_metadata(
    config: &Config,
    study: &str,
    subject: &str,
) -> Result<Vec<MetadataRow>, PipelineError> {
    let metadata_path = config.metadata_path(study, subject);
    if metadata_path.exists() {
        match read_metadata_file(&metadata_path) {
            Ok(rows) => return Ok(rows),
            Err(err) => warn!(
                "Falling back to feature table, metadata unreadable: {}",
                err
            ),
        }
    }
    synthesize_metadata(&config.features_path(study, subject))
}

/// Raw row of a `metadataWithWeek` table. Day and week values are stored
/// as floats by the upstream tooling and cast on read.
#[derive(Debug, Deserialize)]
struct MetadataRecord {
    subject: Option<String>,
    transcript_name: Option<String>,
    acad_cal_day: Option<f64>,
    week: Option<f64>,
}

fn read_metadata_file(path: &Path) -> Result<Vec<MetadataRow>, PipelineError> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<MetadataRecord>() {
        let record = record.map_err(|source| PipelineError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let (Some(subject), Some(transcript_name), Some(day), Some(week)) = (
            record.subject,
            record.transcript_name,
            record.acad_cal_day,
            record.week,
        ) else {
            debug!("Dropping metadata row with missing fields");
            continue;
        };
        rows.push(MetadataRow {
            subject,
            transcript_name,
            acad_cal_day: day as i64,
            week: week as i64,
        });
    }
    Ok(rows)
}

/// Raw row of a `phoneAudioDiary_allFeatures` table. Only the columns the
/// pipeline needs are deserialized; the rest are ignored.
#[derive(Debug, Deserialize)]
struct FeatureRecord {
    subject: Option<String>,
    transcript_name: Option<String>,
    acad_cal_day: Option<f64>,
    unavailable_diary: Option<f64>,
}

fn synthesize_metadata(features_path: &Path) -> Result<Vec<MetadataRow>, PipelineError> {
    if !features_path.exists() {
        return Err(PipelineError::MissingResource {
            path: features_path.to_path_buf(),
        });
    }
    let mut reader =
        csv::Reader::from_path(features_path).map_err(|source| PipelineError::Parse {
            path: features_path.to_path_buf(),
            source,
        })?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<FeatureRecord>() {
        let record = record.map_err(|source| PipelineError::Parse {
            path: features_path.to_path_buf(),
            source,
        })?;
        let (Some(subject), Some(transcript_name), Some(day), Some(unavailable)) = (
            record.subject,
            record.transcript_name,
            record.acad_cal_day,
            record.unavailable_diary,
        ) else {
            debug!("Dropping feature row with missing fields");
            continue;
        };
        if unavailable != 0.0 {
            continue;
        }
        let day = day as i64;
        let Some(week) = week_for_day(day) else {
            debug!("Dropping feature row outside the academic calendar: day {day}");
            continue;
        };
        rows.push(MetadataRow {
            subject,
            transcript_name,
            acad_cal_day: day,
            week,
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_week_boundaries() {
        assert_eq!(week_for_day(1), Some(1));
        assert_eq!(week_for_day(5), Some(1));
        assert_eq!(week_for_day(6), Some(2));
        assert_eq!(week_for_day(12), Some(2));
        assert_eq!(week_for_day(13), Some(3));
        assert_eq!(week_for_day(279), Some(41));
        assert_eq!(week_for_day(0), None);
        assert_eq!(week_for_day(280), None);
    }

    #[test]
    fn test_synthesize_drops_unavailable_and_incomplete_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "subject,acad_cal_day,unavailable_diary,transcript_name,num_words").unwrap();
        writeln!(file, "S01,3.0,0.0,day_003.csv,120").unwrap();
        writeln!(file, "S01,4.0,1.0,day_004.csv,0").unwrap();
        writeln!(file, "S01,,0.0,day_005.csv,80").unwrap();
        writeln!(file, "S01,300.0,0.0,day_300.csv,50").unwrap();
        writeln!(file, "S01,6.0,0.0,day_006.csv,95").unwrap();
        drop(file);

        let rows = synthesize_metadata(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].acad_cal_day, 3);
        assert_eq!(rows[0].week, 1);
        assert_eq!(rows[1].acad_cal_day, 6);
        assert_eq!(rows[1].week, 2);
    }

    #[test]
    fn test_missing_features_table() {
        let dir = tempfile::tempdir().unwrap();
        let result = synthesize_metadata(&dir.path().join("absent.csv"));
        assert!(matches!(
            result,
            Err(PipelineError::MissingResource { .. })
        ));
    }

    #[test]
    fn test_reads_metadata_with_week() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "subject,acad_cal_day,week,transcript_name").unwrap();
        writeln!(file, "S01,12.0,2.0,day_012.csv").unwrap();
        drop(file);

        let rows = read_metadata_file(&path).unwrap();
        assert_eq!(
            rows,
            vec![MetadataRow {
                subject: "S01".to_string(),
                transcript_name: "day_012.csv".to_string(),
                acad_cal_day: 12,
                week: 2,
            }]
        );
    }
}
