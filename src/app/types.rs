// src/app/types.rs
use super::data::{Field, Record};
use super::filters::{Dimension, FilterOptions};

pub const RECORDS_PAGE_SIZE: usize = 25;
pub const GROUPS_PAGE_SIZE: usize = 20;
pub const TOP_N: usize = 20;

// ---- cross-thread messages ----
pub enum FetchMsg {
    Options(FilterOptions),
    Records {
        generation: u64,
        result: Result<Vec<Record>, String>,
    },
}

// ---- sort ----
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "⏶",
            Self::Desc => "⏷",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortSpec {
    pub key: Field,
    pub dir: SortDir,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: Field::FinalGross,
            dir: SortDir::Desc,
        }
    }
}

impl SortSpec {
    /// Header click: same column flips direction, a new column starts ascending.
    pub fn clicked(self, field: Field) -> Self {
        if self.key == field {
            Self {
                key: field,
                dir: self.dir.flipped(),
            }
        } else {
            Self {
                key: field,
                dir: SortDir::Asc,
            }
        }
    }
}

// ---- page cursor ----
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    /// 1-based; may exceed the last page until clamped against a total.
    pub page: usize,
    pub page_size: usize,
}

impl Pager {
    pub const fn new(page_size: usize) -> Self {
        Self { page: 1, page_size }
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    pub fn clamped_page(&self, total: usize) -> usize {
        self.page.clamp(1, self.page_count(total))
    }

    /// Index range of the current page after clamping.
    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let size = self.page_size.max(1);
        let start = ((self.clamped_page(total) - 1) * size).min(total);
        start..(start + size).min(total)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }

    pub fn at(self, page: usize, total: usize) -> Self {
        Self {
            page: Self { page, ..self }.clamped_page(total),
            ..self
        }
    }
}

// ---- view state ----
/// Everything the render pass needs besides the data. Replaced, never edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    pub sort: SortSpec,
    pub records_pager: Pager,
    pub groups_pager: Pager,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortSpec::default(),
            records_pager: Pager::new(RECORDS_PAGE_SIZE),
            groups_pager: Pager::new(GROUPS_PAGE_SIZE),
        }
    }
}

/// User intent collected during one frame, applied after rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    Search(String),
    SortBy(Field),
    RecordsPage(usize),
    GroupsPage(usize),
    Toggle(Dimension, String),
    Clear(Dimension),
    ClearAll,
    Refresh,
}

impl ViewState {
    /// Apply a view-only action. Page numbers are clamped by the caller-provided totals.
    pub fn apply(&self, action: &UiAction, record_total: usize, group_total: usize) -> Self {
        let mut next = self.clone();
        match action {
            UiAction::Search(s) => next.search = s.clone(),
            UiAction::SortBy(f) => next.sort = self.sort.clicked(*f),
            UiAction::RecordsPage(p) => next.records_pager = self.records_pager.at(*p, record_total),
            UiAction::GroupsPage(p) => next.groups_pager = self.groups_pager.at(*p, group_total),
            UiAction::Toggle(..) | UiAction::Clear(_) | UiAction::ClearAll | UiAction::Refresh => {}
        }
        next
    }
}
