use super::layout;
use super::types::SubmissionRecord;
use crate::models::feedback::{Section, Topic};

fn cell(row: &[String], idx: usize) -> String {
    row.get(idx).cloned().unwrap_or_default()
}

/// Mean of the strictly positive, finite values, rounded to one decimal.
/// `None` when nothing qualifies.
pub fn average<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    Some(round_one_decimal(sum / count as f64))
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Average over a slice of textual cells; blanks and non-numbers are skipped.
pub fn section_average(cells: &[String]) -> Option<f64> {
    average(cells.iter().filter_map(|c| c.trim().parse::<f64>().ok()))
}

/// Display form used by the table and the export: one decimal, `-` if absent.
pub fn format_average(avg: Option<f64>) -> String {
    match avg {
        Some(v) => format!("{v:.1}"),
        None => "-".to_string(),
    }
}

fn slice<'a>(row: &'a [String], section: Section) -> &'a [String] {
    let cols = layout::section_columns(section);
    let start = cols.start.min(row.len());
    let end = cols.end.min(row.len());
    &row[start..end]
}

/// Decode one positional row (layout v1) into a typed record.
///
/// Topics are the trailing cells that exactly match a known topic label. The
/// comment is the last trailing cell that is non-empty and not a topic label,
/// so a comment whose text equals a topic label is read as a topic.
pub fn decode_row(row: &[String]) -> SubmissionRecord {
    let trailing = row.get(layout::TRAILING_START..).unwrap_or(&[]);

    let topics = trailing
        .iter()
        .filter_map(|c| Topic::from_label(c))
        .map(|t| t.label().to_string())
        .collect();
    let comment = trailing
        .iter()
        .rev()
        .find(|c| !c.is_empty() && Topic::from_label(c).is_none())
        .cloned()
        .unwrap_or_default();

    SubmissionRecord {
        submitted_at: cell(row, layout::SUBMITTED_AT),
        submission_id: cell(row, layout::SUBMISSION_ID),
        name: cell(row, layout::FULL_NAME),
        email: cell(row, layout::EMAIL),
        role: cell(row, layout::JOB_ROLE),
        title: cell(row, layout::TRAINING_TITLE),
        instructor: cell(row, layout::INSTRUCTOR),
        content_avg: section_average(slice(row, Section::Content)),
        trainer_avg: section_average(slice(row, Section::Trainer)),
        org_avg: section_average(slice(row, Section::Organization)),
        overall_avg: section_average(slice(row, Section::Overall)),
        topics,
        comment,
        raw: row.to_vec(),
    }
}
