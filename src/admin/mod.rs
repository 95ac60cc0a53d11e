//! Admin view: sign-in, loading the stored rows, and the filter/sort/page
//! pipeline over the decoded records.

pub mod table;

use crate::client::{ClientError, FeedbackApi, SheetData};
use crate::models::submission::{SubmissionRecord, layout};
pub use crate::models::submission::decode_row;
use table::{DEFAULT_PAGE_SIZE, PAGE_SIZES, Page, SortColumn, SortSpec, Stats};

pub const LOAD_FALLBACK_MESSAGE: &str = "Failed to load submissions";
pub const LOGIN_FAILED_MESSAGE: &str = "Incorrect password";
pub const DELETE_FALLBACK_MESSAGE: &str = "Failed to delete submission";

/// Handle for one issued load; only the newest one is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct AdminView {
    authenticated: bool,
    login_error: Option<String>,
    records: Vec<SubmissionRecord>,
    layout_version: Option<u32>,
    error: Option<String>,
    loading: bool,
    generation: u64,
    query: String,
    sort: SortSpec,
    page: usize,
    page_size: usize,
}

impl Default for AdminView {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminView {
    pub fn new() -> Self {
        AdminView {
            authenticated: false,
            login_error: None,
            records: Vec::new(),
            layout_version: None,
            error: None,
            loading: false,
            generation: 0,
            query: String::new(),
            sort: SortSpec::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn layout_version(&self) -> Option<u32> {
        self.layout_version
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub async fn authenticate<A: FeedbackApi>(&mut self, password: &str, api: &A) -> bool {
        match api.login(password).await {
            Ok(()) => {
                self.authenticated = true;
                self.login_error = None;
                true
            }
            Err(e) => {
                log::warn!("Admin sign-in failed: {e}");
                self.authenticated = false;
                self.login_error = Some(match e {
                    ClientError::Rejected { status: 401, .. } => LOGIN_FAILED_MESSAGE.to_string(),
                    other => other.user_message(LOGIN_FAILED_MESSAGE),
                });
                false
            }
        }
    }

    /// Drop the session and everything loaded under it.
    pub async fn sign_out<A: FeedbackApi>(&mut self, api: &A) {
        if let Err(e) = api.logout().await {
            log::warn!("Admin sign-out request failed: {e}");
        }
        *self = AdminView { generation: self.generation + 1, ..AdminView::new() };
    }

    /// Start a load. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.generation)
    }

    /// Apply a load result. Returns `false` when `ticket` is stale and the
    /// result was discarded. Failures keep the rows already shown.
    pub fn complete_load(&mut self, ticket: LoadTicket, outcome: Result<SheetData, ClientError>) -> bool {
        if ticket.0 != self.generation {
            log::debug!("Dropping stale load {} (current {})", ticket.0, self.generation);
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(sheet) => {
                if let Some(v) = sheet.layout_version.filter(|v| *v != layout::ROW_LAYOUT_VERSION) {
                    log::warn!("Rows use layout version {v}; decoding as the current layout");
                }
                self.layout_version = sheet.layout_version;
                self.records = sheet.rows.iter().map(|row| decode_row(row)).collect();
                log::info!("Loaded {} submissions", self.records.len());
                self.clamp_page();
            }
            Err(e) => {
                log::warn!("Loading submissions failed: {e}");
                if e.status() == Some(401) {
                    self.authenticated = false;
                }
                self.error = Some(e.user_message(LOAD_FALLBACK_MESSAGE));
            }
        }
        true
    }

    pub async fn load<A: FeedbackApi>(&mut self, api: &A) -> bool {
        let ticket = self.begin_load();
        let outcome = api.view_data().await;
        self.complete_load(ticket, outcome)
    }

    pub fn set_filter(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 0;
    }

    pub fn sort(&mut self, column: SortColumn, dir: table::SortDir) {
        self.sort = SortSpec { column, dir };
    }

    /// Header click.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = self.sort.toggle(column);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Only the sizes in [`PAGE_SIZES`] are accepted; returns whether the
    /// size changed. The view goes back to the first page.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZES.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page = 0;
        true
    }

    fn visible(&self) -> Vec<&SubmissionRecord> {
        let mut rows = table::filter_records(&self.records, &self.query);
        table::sort_records(&mut rows, self.sort);
        rows
    }

    /// Filtered, sorted, and paged rows for the table.
    pub fn view(&self) -> Page<SubmissionRecord> {
        let rows: Vec<SubmissionRecord> = self.visible().into_iter().cloned().collect();
        table::paginate(&rows, self.page, self.page_size)
    }

    /// Summary over the filtered rows.
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.visible())
    }

    fn clamp_page(&mut self) {
        let count = table::page_count(self.visible().len(), self.page_size);
        if self.page >= count {
            self.page = count.saturating_sub(1);
        }
    }

    /// Delete on the service, then locally. On failure the row stays and the
    /// error is shown.
    pub async fn delete_submission<A: FeedbackApi>(&mut self, submission_id: &str, api: &A) -> bool {
        match api.delete_submission(submission_id).await {
            Ok(()) => {
                self.records.retain(|r| r.submission_id != submission_id);
                self.clamp_page();
                log::info!("Deleted submission {submission_id}");
                true
            }
            Err(e) => {
                log::warn!("Deleting {submission_id} failed: {e}");
                self.error = Some(e.user_message(DELETE_FALLBACK_MESSAGE));
                false
            }
        }
    }

    /// Download link. A non-default sort travels along so the file lists
    /// rows in the order on screen.
    pub fn export_url<A: FeedbackApi>(&self, api: &A) -> String {
        let base = api.export_url();
        if self.sort == SortSpec::default() {
            return base;
        }
        format!("{base}?sort={}&dir={}", self.sort.column.as_str(), self.sort.dir.as_str())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
