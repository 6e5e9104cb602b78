// src/app/mod.rs: dashboard state, fetch polling and the eframe entry point

use std::sync::Arc;

use eframe::egui as eg;
use tracing::{info, warn};

// ---- Local modules ----
pub mod data;
pub mod fetch;
pub mod filters;
pub mod remote;
pub mod types;
pub mod ui;
pub mod utils;
pub mod view;

pub use data::{base_title, Field, Record};
pub use fetch::{FetchUpdate, Fetcher};
pub use filters::{Dimension, FilterOptions, Selection};
pub use remote::{RecordQuery, RecordSource, SupabaseSource, MAX_ROWS};
pub use types::{Pager, SortDir, SortSpec, UiAction, ViewState};
pub use view::{DashboardView, Summary, TitleTotals};

use crate::config::AppConfig;

/// Which inputs the cached view was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ViewKey {
    records_version: u64,
    search: String,
    sort: SortSpec,
}

/// Multi-select popup: which dimension is open and its narrowing text.
#[derive(Default)]
pub(crate) struct FilterPopup {
    pub(crate) open: Option<Dimension>,
    pub(crate) query: String,
}

pub struct BoxOfficeApp {
    // data
    records: Vec<Record>,
    records_version: u64,
    options: FilterOptions,
    selection: Selection,

    // derived
    view_state: ViewState,
    view: DashboardView,
    view_key: Option<ViewKey>,

    // plumbing
    fetcher: Fetcher,
    did_init: bool,

    // widget internals
    popup: FilterPopup,
}

impl BoxOfficeApp {
    pub fn new(ctx: &eg::Context, cfg: &AppConfig) -> Self {
        let source: Option<Arc<dyn RecordSource>> = match cfg.endpoint() {
            Some((url, key)) => match SupabaseSource::new(url, key, cfg.page_rows) {
                Ok(src) => {
                    info!("Using data source {url}");
                    Some(Arc::new(src))
                }
                Err(err) => {
                    warn!("Data source unavailable: {err}");
                    None
                }
            },
            None => {
                warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set; running without data");
                None
            }
        };

        let repaint = ctx.clone();
        Self::with_fetcher(Fetcher::new(source, move || repaint.request_repaint()))
    }

    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            records: Vec::new(),
            records_version: 0,
            options: FilterOptions::default(),
            selection: Selection::default(),
            view_state: ViewState::default(),
            view: DashboardView::default(),
            view_key: None,
            fetcher,
            did_init: false,
            popup: FilterPopup::default(),
        }
    }

    /// Startup: option lists plus an unfiltered record fetch.
    fn init_once(&mut self) {
        if self.did_init {
            return;
        }
        self.did_init = true;
        self.fetcher.load_options();
        self.fetcher.request_records(&self.selection);
    }

    fn poll_fetches(&mut self) {
        for update in self.fetcher.poll() {
            match update {
                FetchUpdate::Options(options) => self.options = options,
                FetchUpdate::Records(rows) => {
                    self.records = rows;
                    self.records_version += 1;
                }
            }
        }
    }

    /// Rebuild the derived view when records, search or sort changed.
    fn refresh_view(&mut self) {
        let key = ViewKey {
            records_version: self.records_version,
            search: self.view_state.search.clone(),
            sort: self.view_state.sort,
        };
        if self.view_key.as_ref() == Some(&key) {
            return;
        }
        self.view = DashboardView::build(&self.records, &key.search, key.sort);
        self.view_key = Some(key);
    }

    fn set_selection(&mut self, next: Selection) {
        if next == self.selection {
            return;
        }
        self.selection = next;
        self.fetcher.request_records(&self.selection);
    }

    fn apply_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match &action {
                UiAction::Toggle(dim, value) => {
                    let next = self.selection.toggled(*dim, value);
                    self.set_selection(next);
                }
                UiAction::Clear(dim) => {
                    let next = self.selection.cleared(*dim);
                    self.set_selection(next);
                }
                UiAction::ClearAll => self.set_selection(Selection::default()),
                UiAction::Refresh => {
                    info!("Manual refresh");
                    self.fetcher.load_options();
                    self.fetcher.request_records(&self.selection);
                }
                _ => {
                    self.view_state = self.view_state.apply(
                        &action,
                        self.view.rows.len(),
                        self.view.by_base_title.len(),
                    );
                }
            }
            self.refresh_view();
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// One non-rendering step: start work, take results, rebuild, apply intents.
    pub fn step(&mut self, actions: Vec<UiAction>) {
        self.init_once();
        self.poll_fetches();
        self.refresh_view();
        self.apply_actions(actions);
    }
}

impl eframe::App for BoxOfficeApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        self.step(Vec::new());

        let actions = self.render(ctx);
        if !actions.is_empty() {
            self.apply_actions(actions);
            ctx.request_repaint();
        }

        if self.fetcher.is_busy() {
            // keep the spinner moving; workers also request a repaint on completion
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct TableSource(Vec<Record>);

    impl RecordSource for TableSource {
        fn fetch_column(&self, field: Field) -> Result<Vec<String>, String> {
            Ok(self.0.iter().map(|r| r.text(field).into_owned()).collect())
        }

        fn fetch_records(&self, query: &RecordQuery) -> Result<Vec<Record>, String> {
            Ok(self
                .0
                .iter()
                .filter(|r| {
                    query.title_prefixes.is_empty()
                        || query
                            .title_prefixes
                            .iter()
                            .any(|p| r.movie.to_lowercase().starts_with(&p.to_lowercase()))
                })
                .cloned()
                .collect())
        }
    }

    fn rows() -> Vec<Record> {
        (0..60)
            .map(|i| Record {
                id: i.to_string(),
                movie: format!("Film {} (Hindi)", i % 30),
                region: if i % 2 == 0 { "Delhi" } else { "Mumbai" }.into(),
                area: "North".into(),
                day1: 10.0,
                week1: 50.0,
                final_gross: i as f64,
                last_updated: format!("2024-01-{:02}", i % 28 + 1),
            })
            .collect()
    }

    fn settle(app: &mut BoxOfficeApp) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            app.step(Vec::new());
            if !app.fetcher.is_busy() || Instant::now() > deadline {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn app() -> BoxOfficeApp {
        let fetcher = Fetcher::new(Some(Arc::new(TableSource(rows()))), || {});
        let mut app = BoxOfficeApp::with_fetcher(fetcher);
        settle(&mut app);
        app
    }

    #[test]
    fn startup_loads_options_and_every_record() {
        let app = app();
        assert_eq!(app.records().len(), 60);
        assert_eq!(app.options.regions, vec!["Delhi", "Mumbai"]);
        assert_eq!(app.view().rows.len(), 60);
        assert_eq!(app.view().by_base_title.len(), 30);
    }

    #[test]
    fn selecting_a_movie_refetches_by_base_title() {
        let mut app = app();
        app.step(vec![UiAction::Toggle(Dimension::Movie, "Film 1 (Hindi)".into())]);
        settle(&mut app);
        // "Film 1" also prefixes "Film 10".."Film 19"
        assert!(app.records().iter().all(|r| r.movie.starts_with("Film 1")));
        assert_eq!(app.records().len(), 22);
    }

    #[test]
    fn search_and_paging_flow_through_view_state() {
        let mut app = app();
        app.step(vec![UiAction::RecordsPage(3)]);
        assert_eq!(app.view_state().records_pager.range(app.view().rows.len()), 50..60);

        app.step(vec![UiAction::Search("delhi".into())]);
        assert_eq!(app.view().rows.len(), 30);
        assert_eq!(app.view().summary.count, 60);
        // cursor is kept and clamped against the shorter list
        assert_eq!(app.view_state().records_pager.page, 3);
        assert_eq!(app.view_state().records_pager.range(30), 25..30);
    }

    #[test]
    fn unchanged_selection_does_not_refetch() {
        let mut app = app();
        let before = app.fetcher.generation();
        app.step(vec![UiAction::Clear(Dimension::Region)]);
        assert_eq!(app.fetcher.generation(), before);
        app.step(vec![UiAction::Refresh]);
        assert_eq!(app.fetcher.generation(), before + 1);
        settle(&mut app);
        assert_eq!(app.records().len(), 60);
    }
}
