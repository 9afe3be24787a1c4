use crate::auth::{Role, TokenCache};
use crate::catalog::{build_catalog, filter_catalog, flatten_catalog};
use crate::editor::BodyEditor;
use crate::types::{
    ApiEndpoint, ColumnDescriptor, DetailTab, InputMode, Job, LoadingState, PageResult,
    PanelFocus, RenderItem, Screen, TableDescriptor, TestRecord,
};
use crate::utils::try_format_json;
use std::collections::HashSet;

/// Execution history keeps this many records, most recent first.
pub const MAX_HISTORY: usize = 10;

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub input_mode: InputMode,

    /// Bearer tokens by role. Owned here and handed to whoever sends a
    /// request; nothing else stores tokens.
    pub tokens: TokenCache,

    pub tester: TesterState,
    pub explorer: ExplorerState,
    pub jobs: JobsState,

    // Modal input buffers
    pub token_input: String,
    pub token_input_role: Role,
    pub url_input: String,
    pub body_error: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        let mut tester = TesterState::new(build_catalog());
        tester.update_filtered();

        Self {
            screen: Screen::Tester,
            input_mode: InputMode::Normal,
            tokens: TokenCache::default(),
            tester,
            explorer: ExplorerState::new(),
            jobs: JobsState::new(),
            token_input: String::new(),
            token_input_role: Role::Admin,
            url_input: String::new(),
            body_error: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Endpoint catalog and test harness screen.
#[derive(Debug, Clone)]
pub struct TesterState {
    pub catalog: Vec<ApiEndpoint>,

    /// Catalog narrowed by the search query; what the tree renders from.
    pub filtered: Vec<ApiEndpoint>,

    /// Collapse keys: "<role>" or "<role>.<category>", presence = collapsed.
    pub collapsed: HashSet<String>,

    pub render_items: Vec<RenderItem>,

    /// Cursor position in the rendered tree.
    pub selected_item: usize,
    pub search_query: String,

    pub selected_endpoint: Option<ApiEndpoint>,
    pub body_editor: BodyEditor,

    /// Path of the endpoint currently executing, for the row spinner.
    pub executing: Option<String>,
    pub error: Option<String>,

    /// Most recent first, never more than MAX_HISTORY entries.
    pub history: Vec<TestRecord>,

    pub panel_focus: PanelFocus,
    pub detail_tab: DetailTab,

    /// Selected line in the response body, for yanking.
    pub response_selected_line: usize,
    pub response_scroll: usize,

    /// Which history record the Response tab shows; 0 is the latest. None
    /// until something runs for the current selection.
    pub response_view: Option<usize>,
    pub history_selected: usize,
    pub yank_flash: bool,
}

impl TesterState {
    pub fn new(catalog: Vec<ApiEndpoint>) -> Self {
        Self {
            catalog,
            filtered: Vec::new(),
            collapsed: HashSet::new(),
            render_items: Vec::new(),
            selected_item: 0,
            search_query: String::new(),
            selected_endpoint: None,
            body_editor: BodyEditor::new(),
            executing: None,
            error: None,
            history: Vec::new(),
            panel_focus: PanelFocus::List,
            detail_tab: DetailTab::Endpoint,
            response_selected_line: 0,
            response_scroll: 0,
            response_view: None,
            history_selected: 0,
            yank_flash: false,
        }
    }

    /// Recompute the filtered list and the rendered tree from the query
    /// and collapse set.
    pub fn update_filtered(&mut self) {
        self.filtered = filter_catalog(&self.catalog, &self.search_query);
        self.rebuild_render_items();
    }

    pub fn rebuild_render_items(&mut self) {
        self.render_items = flatten_catalog(&self.filtered, &self.collapsed);
    }

    /// Prepend a record and drop anything beyond the cap.
    pub fn push_record(&mut self, record: TestRecord) {
        self.history.insert(0, record);
        self.history.truncate(MAX_HISTORY);
        self.response_view = Some(0);
        self.response_selected_line = 0;
        self.response_scroll = 0;
        self.history_selected = 0;
    }

    /// The record the Response tab is currently showing.
    pub fn viewed_record(&self) -> Option<&TestRecord> {
        self.history.get(self.response_view?)
    }

    /// Line count of the rendered response view: status line, blank line,
    /// then the formatted body. Zero when nothing came back over HTTP.
    pub fn response_line_count(&self) -> usize {
        match self.viewed_record() {
            Some(record) if record.status.is_some() => {
                2 + try_format_json(&record.body).lines().count()
            }
            _ => 0,
        }
    }
}

/// Table browser screen.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    pub tables: Vec<TableDescriptor>,
    pub tables_loading: LoadingState,

    /// Kept across page-fetch failures so the fetch can be retried.
    pub selected_table: Option<String>,

    /// Cursor position in the table list.
    pub selected_table_index: usize,

    pub rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub columns: Vec<ColumnDescriptor>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_rows: i64,

    /// Error text for a failed page fetch rides in the Error variant.
    pub page_loading: LoadingState,

    /// Issue counter for page fetches; responses that no longer match are
    /// stale and get dropped.
    pub fetch_seq: u64,

    /// First entry into the screen triggers the table-list fetch.
    pub visited: bool,

    pub panel_focus: PanelFocus,
    pub selected_row: usize,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            tables_loading: LoadingState::Idle,
            selected_table: None,
            selected_table_index: 0,
            rows: Vec::new(),
            columns: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_rows: 0,
            page_loading: LoadingState::Idle,
            fetch_seq: 0,
            visited: false,
            panel_focus: PanelFocus::List,
            selected_row: 0,
        }
    }

    /// Apply one fetched page. The whole quadruple swaps in a single
    /// mutation so rows can never carry another page's counters.
    pub fn apply_page(&mut self, page: PageResult) {
        self.rows = page.rows;
        self.columns = page.columns;
        self.current_page = page.page;
        self.total_pages = page.total_pages;
        self.total_rows = page.total;
        self.selected_row = 0;
    }

    /// Failure path: rows and columns go away, the table selection stays.
    pub fn clear_page(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.selected_row = 0;
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Job manager screen.
#[derive(Debug, Clone)]
pub struct JobsState {
    pub jobs: Vec<Job>,

    /// Error text for a failed fetch or delete rides in the Error variant;
    /// the screen renders loading, error, empty and list branches mutually
    /// exclusively in that order.
    pub loading: LoadingState,
    pub selected: usize,

    /// First entry into the screen triggers the initial fetch.
    pub visited: bool,

    /// Id awaiting confirmation in the delete modal.
    pub pending_delete: Option<i64>,

    /// Id with a delete call in flight.
    pub deleting: Option<i64>,
}

impl JobsState {
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            loading: LoadingState::Idle,
            selected: 0,
            visited: false,
            pending_delete: None,
            deleting: None,
        }
    }

    /// Remove one job by id, keeping the rest in order. Returns false when
    /// the id was not present.
    pub fn remove_job(&mut self, id: i64) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|j| j.id != id);
        let removed = self.jobs.len() < before;
        if removed && self.selected >= self.jobs.len() && self.selected > 0 {
            self.selected = self.jobs.len().saturating_sub(1);
        }
        removed
    }

    pub fn selected_job(&self) -> Option<&Job> {
        self.jobs.get(self.selected)
    }
}

impl Default for JobsState {
    fn default() -> Self {
        Self::new()
    }
}
