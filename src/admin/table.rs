use std::cmp::Ordering;

use serde::Serialize;

use crate::models::feedback::Section;
use crate::models::submission::{SubmissionRecord, average, format_average};

pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir { #[default] Asc, Desc }

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self { SortDir::Asc => "asc", SortDir::Desc => "desc" }
    }
    pub fn toggled(self) -> SortDir {
        match self { SortDir::Asc => SortDir::Desc, SortDir::Desc => SortDir::Asc }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Submitted,
    Name,
    Content,
    Trainer,
    Organization,
    Overall,
}

impl SortColumn {
    pub fn parse(s: &str) -> Option<SortColumn> {
        match s {
            "submitted" => Some(SortColumn::Submitted),
            "name" => Some(SortColumn::Name),
            "content" => Some(SortColumn::Content),
            "trainer" => Some(SortColumn::Trainer),
            "org" | "organization" => Some(SortColumn::Organization),
            "overall" => Some(SortColumn::Overall),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::Submitted => "submitted",
            SortColumn::Name => "name",
            SortColumn::Content => "content",
            SortColumn::Trainer => "trainer",
            SortColumn::Organization => "org",
            SortColumn::Overall => "overall",
        }
    }

    fn section(self) -> Option<Section> {
        match self {
            SortColumn::Content => Some(Section::Content),
            SortColumn::Trainer => Some(Section::Trainer),
            SortColumn::Organization => Some(Section::Organization),
            SortColumn::Overall => Some(Section::Overall),
            SortColumn::Submitted | SortColumn::Name => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub dir: SortDir,
}

impl Default for SortSpec {
    /// Newest first.
    fn default() -> Self {
        SortSpec { column: SortColumn::Submitted, dir: SortDir::Desc }
    }
}

impl SortSpec {
    /// Query-string style construction; unknown columns fall back to the default.
    pub fn from_params(sort: Option<&str>, dir: Option<&str>) -> Self {
        let Some(column) = sort.and_then(SortColumn::parse) else {
            return SortSpec::default();
        };
        SortSpec {
            column,
            dir: if dir == Some("desc") { SortDir::Desc } else { SortDir::Asc },
        }
    }

    /// Header click: same column flips direction, a new column starts ascending.
    pub fn toggle(self, column: SortColumn) -> SortSpec {
        if self.column == column {
            SortSpec { column, dir: self.dir.toggled() }
        } else {
            SortSpec { column, dir: SortDir::Asc }
        }
    }
}

/// Case-insensitive substring match over name, email and training title.
pub fn matches_query(record: &SubmissionRecord, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    format!("{} {} {}", record.name, record.email, record.title)
        .to_lowercase()
        .contains(&needle)
}

pub fn filter_records<'a>(records: &'a [SubmissionRecord], query: &str) -> Vec<&'a SubmissionRecord> {
    records.iter().filter(|r| matches_query(r, query)).collect()
}

/// Missing averages go last regardless of direction.
fn compare_averages(a: Option<f64>, b: Option<f64>, dir: SortDir) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => {
            let ord = x.total_cmp(&y);
            if dir == SortDir::Desc { ord.reverse() } else { ord }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort; equal keys keep their load order.
pub fn sort_records(records: &mut [&SubmissionRecord], spec: SortSpec) {
    records.sort_by(|a, b| match spec.column.section() {
        Some(section) => compare_averages(a.average(section), b.average(section), spec.dir),
        None => {
            let ord = match spec.column {
                SortColumn::Name => a.name.cmp(&b.name),
                _ => a.submitted_at.cmp(&b.submitted_at),
            };
            if spec.dir == SortDir::Desc { ord.reverse() } else { ord }
        }
    });
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub page_count: usize,
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 { 0 } else { total.div_ceil(page_size) }
}

/// Slice out page `page`; past the end yields no items.
pub fn paginate<T: Clone>(rows: &[T], page: usize, page_size: usize) -> Page<T> {
    let start = page.saturating_mul(page_size);
    let items = if page_size == 0 || start >= rows.len() {
        Vec::new()
    } else {
        rows[start..(start + page_size).min(rows.len())].to_vec()
    };
    Page {
        items,
        page,
        page_size,
        total: rows.len(),
        page_count: page_count(rows.len(), page_size),
    }
}

/// Summary cards above the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub content: Option<f64>,
    pub trainer: Option<f64>,
    pub organization: Option<f64>,
    pub overall: Option<f64>,
}

impl Stats {
    pub fn compute(records: &[&SubmissionRecord]) -> Stats {
        let mean = |section: Section| average(records.iter().filter_map(|r| r.average(section)));
        Stats {
            total: records.len(),
            content: mean(Section::Content),
            trainer: mean(Section::Trainer),
            organization: mean(Section::Organization),
            overall: mean(Section::Overall),
        }
    }

    pub fn display(&self, section: Section) -> String {
        format_average(match section {
            Section::Content => self.content,
            Section::Trainer => self.trainer,
            Section::Organization => self.organization,
            Section::Overall => self.overall,
        })
    }
}
