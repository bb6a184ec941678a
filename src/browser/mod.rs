//! Course browser controller. Holds the catalog and all derived view state
//! for one session and exposes one method per user action. Nothing here
//! touches the terminal, so every command is testable on its own.

mod random;
mod view;

pub use random::CoursePicker;
pub use view::{compare_titles, sort_by_title, SortDirection, SortOrder};

use tracing::{debug, error, info};

use crate::catalog::{Catalog, CatalogError};
use crate::models::{Course, MaterialCategory};

/// Placeholder spanning the grid when nothing matches.
pub const NO_RESULTS_MESSAGE: &str = "Nahi Mil raha course? Just wait we may update soon ! 😊";
/// Shown in place of the grid when the catalog could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error: Could not load course materials.";

/// Which screen is visible. Exactly one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveScreen {
    #[default]
    Landing,
    Dashboard,
    CourseMaterials(i64),
}

/// Progress of the one-off catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Sort currently ordering the filtered list, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedSort {
    Alphabetical,
    Toggle(SortDirection),
}

/// What the course grid should show.
#[derive(Debug, PartialEq, Eq)]
pub enum GridContent<'a> {
    Loading,
    Error(&'static str),
    Empty(&'static str),
    Cards(&'a [Course]),
}

/// One node of the materials chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialLink<'a> {
    pub category: MaterialCategory,
    /// `None` when the catalog has no usable link for this category.
    pub url: Option<&'a str>,
}

pub struct CourseBrowser {
    catalog: Catalog,
    filtered: Vec<Course>,
    search_term: String,
    sort_direction: SortDirection,
    applied_sort: Option<AppliedSort>,
    active_filter: SortOrder,
    screen: ActiveScreen,
    popup_open: bool,
    load_state: LoadState,
    picker: CoursePicker,
}

impl CourseBrowser {
    /// A browser on the landing screen, waiting for its catalog.
    pub fn new(picker: CoursePicker) -> Self {
        Self {
            catalog: Catalog::default(),
            filtered: Vec::new(),
            search_term: String::new(),
            sort_direction: SortDirection::default(),
            applied_sort: None,
            active_filter: SortOrder::default(),
            screen: ActiveScreen::default(),
            popup_open: false,
            load_state: LoadState::Loading,
            picker,
        }
    }

    /// Shortcut for tests and embedders that already hold a catalog.
    pub fn with_catalog(catalog: Catalog, picker: CoursePicker) -> Self {
        let mut browser = Self::new(picker);
        browser.catalog_loaded(Ok(catalog));
        browser
    }

    /// Accept the loader's outcome. Only the first result counts; the catalog
    /// never changes afterwards.
    pub fn catalog_loaded(&mut self, result: Result<Catalog, CatalogError>) {
        if self.load_state != LoadState::Loading {
            debug!("ignoring repeated catalog result");
            return;
        }
        match result {
            Ok(catalog) => {
                info!(courses = catalog.len(), "catalog ready");
                self.catalog = catalog;
                self.filtered = self.catalog.filter(&self.search_term);
                self.load_state = LoadState::Ready;
            }
            Err(err) => {
                error!(error = %err, "catalog unavailable for this session");
                self.catalog = Catalog::default();
                self.filtered.clear();
                self.load_state = LoadState::Failed(err.to_string());
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filtered(&self) -> &[Course] {
        &self.filtered
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    pub fn applied_sort(&self) -> Option<AppliedSort> {
        self.applied_sort
    }

    pub fn active_filter(&self) -> SortOrder {
        self.active_filter
    }

    pub fn screen(&self) -> ActiveScreen {
        self.screen
    }

    pub fn popup_open(&self) -> bool {
        self.popup_open
    }

    /// Re-filter the catalog by `term`. The result is in catalog order; any
    /// previously applied sort is dropped.
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.filtered = self.catalog.filter(term);
        self.applied_sort = None;
        debug!(term, matches = self.filtered.len(), "search applied");
    }

    /// Filter-button command. `Alphabetical` sorts the current results A-Z
    /// without touching the toggle; `Catalog` restores catalog order.
    pub fn sort_courses(&mut self, order: SortOrder) {
        self.active_filter = order;
        match order {
            SortOrder::Alphabetical => {
                sort_by_title(&mut self.filtered, SortDirection::Ascending);
                self.applied_sort = Some(AppliedSort::Alphabetical);
            }
            SortOrder::Catalog => {
                self.filtered = self.catalog.filter(&self.search_term);
                self.applied_sort = None;
            }
        }
    }

    /// Flip the sort direction and reorder the results accordingly. Returns
    /// the new direction for the indicator.
    pub fn toggle_sort(&mut self) -> SortDirection {
        self.sort_direction = self.sort_direction.flipped();
        sort_by_title(&mut self.filtered, self.sort_direction);
        self.applied_sort = Some(AppliedSort::Toggle(self.sort_direction));
        self.sort_direction
    }

    /// Index of a uniformly random card in the current results.
    pub fn random_course(&mut self) -> Option<usize> {
        self.picker.pick(self.filtered.len())
    }

    pub fn grid(&self) -> GridContent<'_> {
        match self.load_state {
            LoadState::Loading => GridContent::Loading,
            LoadState::Failed(_) => GridContent::Error(LOAD_ERROR_MESSAGE),
            LoadState::Ready if self.filtered.is_empty() => GridContent::Empty(NO_RESULTS_MESSAGE),
            LoadState::Ready => GridContent::Cards(&self.filtered),
        }
    }

    pub fn show_dashboard(&mut self) {
        self.screen = ActiveScreen::Dashboard;
    }

    /// Switch to the materials chain of `id`. Unknown ids leave the screen
    /// as it was and return `false`.
    pub fn show_course_materials(&mut self, id: i64) -> bool {
        if self.catalog.find(id).is_none() {
            debug!(id, "ignoring navigation to unknown course");
            return false;
        }
        self.screen = ActiveScreen::CourseMaterials(id);
        true
    }

    /// Course shown by the materials screen, if that screen is active.
    pub fn current_course(&self) -> Option<&Course> {
        match self.screen {
            ActiveScreen::CourseMaterials(id) => self.catalog.find(id),
            _ => None,
        }
    }

    /// The nine material nodes of a course, in display order.
    pub fn materials(&self, id: i64) -> Option<Vec<MaterialLink<'_>>> {
        let course = self.catalog.find(id)?;
        Some(
            MaterialCategory::ALL
                .iter()
                .map(|&category| MaterialLink {
                    category,
                    url: course.material_link(category),
                })
                .collect(),
        )
    }

    pub fn open_popup(&mut self) {
        self.popup_open = true;
    }

    pub fn close_popup(&mut self) {
        self.popup_open = false;
    }
}
