use std::collections::HashMap;

use crate::models::UtteranceRow;

/// Find the most frequently occurring speaker label.
///
/// Ties are broken by first-encountered order, so the result is
/// deterministic for a given row sequence.
pub fn dominant_speaker(rows: &[UtteranceRow]) -> Option<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();

    for (index, row) in rows.iter().enumerate() {
        *counts.entry(row.subject.as_str()).or_insert(0) += 1;
        first_seen.entry(row.subject.as_str()).or_insert(index);
    }

    counts
        .into_iter()
        .max_by(|(a, count_a), (b, count_b)| {
            count_a
                .cmp(count_b)
                .then_with(|| first_seen[b].cmp(&first_seen[a]))
        })
        .map(|(speaker, _)| speaker)
}

/// Keep only the rows spoken by the dominant speaker.
///
/// The dominant speaker is assumed to be the diary subject; incidental
/// other speakers (interviewer, background) are minority rows.
pub fn select_subject_utterances(rows: Vec<UtteranceRow>) -> Vec<UtteranceRow> {
    let Some(speaker) = dominant_speaker(&rows).map(str::to_string) else {
        return rows;
    };
    rows.into_iter()
        .filter(|row| row.subject == speaker)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(subject: &str, text: &str) -> UtteranceRow {
        UtteranceRow {
            subject: subject.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_keeps_majority_speaker_rows() {
        let rows = vec![
            row("A", "one"),
            row("A", "two"),
            row("A", "three"),
            row("B", "aside"),
        ];
        let kept = select_subject_utterances(rows);
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|r| r.subject == "A"));
    }

    #[test]
    fn test_tie_broken_by_first_encounter() {
        let rows = vec![row("B", "x"), row("A", "y"), row("A", "z"), row("B", "w")];
        assert_eq!(dominant_speaker(&rows), Some("B"));
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(dominant_speaker(&[]), None);
        assert!(select_subject_utterances(vec![]).is_empty());
    }
}
