use std::cmp::min;
use std::io;
use std::mem;
use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Context;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::browser::{
    ActiveScreen, CourseBrowser, GridContent, LoadState, MaterialLink, SortDirection, SortOrder,
};
use crate::catalog::{CatalogError, LoadResult};
use crate::models::Course;

use super::grid::{first_visible_row, row_count, step, ScrollMode};
use super::helpers::{centered_rect, contains, course_card_lines, surface_error};
use super::search::SearchInput;

/// Number of course cards shown in each row of the dashboard grid.
const GRID_COLUMNS: usize = 3;
/// Height of a single course card, borders included.
const CARD_HEIGHT: u16 = 6;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Search bar plus sort/filter controls above the grid.
const TOOLBAR_HEIGHT: u16 = 4;
/// Popup size as a percentage of the screen.
const POPUP_WIDTH: u16 = 60;
const POPUP_HEIGHT: u16 = 60;

/// Opens a URL in a new browsing context.
pub type LinkOpener = fn(&str) -> io::Result<()>;

fn open_in_browser(url: &str) -> io::Result<()> {
    open::that(url)
}

/// Input modes layered over the active screen.
enum Mode {
    Normal,
    Searching(SearchInput),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Terminal front-end state: the browser controller plus everything that only
/// matters for drawing (selection, scrolling, footer status).
pub struct App {
    browser: CourseBrowser,
    loader: Option<Receiver<LoadResult>>,
    selected: usize,
    scroll: ScrollMode,
    /// First grid row drawn in the last frame.
    grid_top: usize,
    material_selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
    opener: LinkOpener,
}

impl App {
    pub fn new(browser: CourseBrowser, loader: Option<Receiver<LoadResult>>) -> Self {
        Self {
            browser,
            loader,
            selected: 0,
            scroll: ScrollMode::default(),
            grid_top: 0,
            material_selected: 0,
            mode: Mode::Normal,
            status: None,
            opener: open_in_browser,
        }
    }

    /// Replace the function used to open material links.
    pub fn with_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    pub fn browser(&self) -> &CourseBrowser {
        &self.browser
    }

    /// Index of the highlighted card in the filtered list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Pick up the catalog once the loader thread has finished.
    pub fn poll_loader(&mut self) {
        let Some(rx) = &self.loader else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(CatalogError::LoaderGone),
        };
        self.loader = None;
        if result.is_err() {
            self.set_status("Could not load course data.", StatusKind::Error);
        }
        self.browser.catalog_loaded(result);
        self.reset_selection();
    }

    /// Handle a key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.browser.popup_open() {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
                self.browser.close_popup();
            }
            return false;
        }

        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);
        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Searching(input) => self.handle_search(code, input),
        };
        exit
    }

    /// Ctrl-U: wipe the search term from anywhere on the dashboard.
    pub fn handle_ctrl_u(&mut self) {
        if self.browser.screen() != ActiveScreen::Dashboard {
            return;
        }
        if let Mode::Searching(input) = &mut self.mode {
            input.clear();
        }
        self.apply_search("");
    }

    /// Left click at (`column`, `row`) on a screen of size `area`. Clicking the
    /// overlay outside the popup content closes it.
    pub fn handle_click(&mut self, column: u16, row: u16, area: Rect) {
        if !self.browser.popup_open() {
            return;
        }
        if !contains(popup_rect(area), column, row) {
            self.browser.close_popup();
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        if let KeyCode::Char('?') = code {
            self.browser.open_popup();
            return Mode::Normal;
        }

        match self.browser.screen() {
            ActiveScreen::Landing => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.clear_status();
                    self.browser.show_dashboard();
                }
                _ => {}
            },
            ActiveScreen::Dashboard => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => {
                    if !self.browser.search_term().is_empty() {
                        self.apply_search("");
                        self.set_status("Search cleared.", StatusKind::Info);
                    }
                }
                KeyCode::Left => self.move_selection(-1),
                KeyCode::Right => self.move_selection(1),
                KeyCode::Up => self.move_selection(-(GRID_COLUMNS as isize)),
                KeyCode::Down => self.move_selection(GRID_COLUMNS as isize),
                KeyCode::Home => self.move_to(0),
                KeyCode::End => self.move_to(self.browser.filtered().len().saturating_sub(1)),
                KeyCode::Enter => {
                    if let Some(course) = self.current_card() {
                        let id = course.id;
                        if self.browser.show_course_materials(id) {
                            self.clear_status();
                            self.material_selected = 0;
                        }
                    }
                }
                KeyCode::Char('/') => {
                    return Mode::Searching(SearchInput::with_query(self.browser.search_term()));
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    self.browser.sort_courses(SortOrder::Alphabetical);
                    self.reset_selection();
                    self.set_status("Sorted alphabetically.", StatusKind::Info);
                }
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.browser.sort_courses(SortOrder::Catalog);
                    self.reset_selection();
                    self.set_status("Showing catalog order.", StatusKind::Info);
                }
                KeyCode::Char('t') | KeyCode::Char('T') => {
                    let direction = self.browser.toggle_sort();
                    self.reset_selection();
                    self.set_status(format!("Sorted {}.", direction.label()), StatusKind::Info);
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    if let Some(index) = self.browser.random_course() {
                        self.selected = index;
                        self.scroll = ScrollMode::Center;
                        let title = self.browser.filtered()[index].title.clone();
                        self.set_status(format!("How about {title}?"), StatusKind::Info);
                    }
                }
                _ => {}
            },
            ActiveScreen::CourseMaterials(id) => match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => {
                    self.clear_status();
                    self.browser.show_dashboard();
                }
                KeyCode::Up => {
                    self.material_selected = self.material_selected.saturating_sub(1);
                }
                KeyCode::Down => {
                    let last = self.material_count(id).saturating_sub(1);
                    self.material_selected = min(self.material_selected + 1, last);
                }
                KeyCode::Home => self.material_selected = 0,
                KeyCode::End => {
                    self.material_selected = self.material_count(id).saturating_sub(1);
                }
                KeyCode::Enter => self.open_selected_material(id),
                _ => {}
            },
        }
        Mode::Normal
    }

    fn handle_search(&mut self, code: KeyCode, mut input: SearchInput) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Enter => return Mode::Normal,
            KeyCode::Up => {
                self.move_selection(-(GRID_COLUMNS as isize));
                return Mode::Normal;
            }
            KeyCode::Down => {
                self.move_selection(GRID_COLUMNS as isize);
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                if input.backspace() {
                    self.apply_search(&input.query);
                }
            }
            KeyCode::Char(ch) => {
                if input.push_char(ch) {
                    self.apply_search(&input.query);
                }
            }
            _ => {}
        }
        Mode::Searching(input)
    }

    fn apply_search(&mut self, term: &str) {
        self.browser.search(term);
        self.reset_selection();
    }

    fn open_selected_material(&mut self, id: i64) {
        let Some((category, url)) = self.browser.materials(id).and_then(|links| {
            links
                .get(self.material_selected)
                .map(|link| (link.category, link.url.map(str::to_string)))
        }) else {
            return;
        };
        let title = category.title();
        let Some(url) = url else {
            self.set_status(format!("No link for {title} yet."), StatusKind::Error);
            return;
        };
        match (self.opener)(&url).with_context(|| format!("failed to open {url}")) {
            Ok(()) => {
                info!(course = id, category = category.key(), "opened material");
                self.set_status(format!("Opened {title}."), StatusKind::Info);
            }
            Err(err) => {
                warn!(course = id, error = %err, "could not open material link");
                let message = format!("Failed to open link: {}", surface_error(&err));
                self.set_status(message, StatusKind::Error);
            }
        }
    }

    fn material_count(&self, id: i64) -> usize {
        self.browser.materials(id).map_or(0, |links| links.len())
    }

    fn current_card(&self) -> Option<&Course> {
        self.browser.filtered().get(self.selected)
    }

    fn move_selection(&mut self, offset: isize) {
        self.selected = step(self.selected, offset, self.browser.filtered().len());
        self.scroll = ScrollMode::Follow;
    }

    fn move_to(&mut self, index: usize) {
        self.selected = index;
        self.scroll = ScrollMode::Follow;
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.grid_top = 0;
        self.scroll = ScrollMode::Follow;
    }

    /// Work out which grid row the next frame starts at. A pending centre
    /// request is consumed here; later frames follow from the new position.
    fn sync_grid_top(&mut self, area: Rect) {
        let len = self.browser.filtered().len();
        if len == 0 {
            self.grid_top = 0;
            return;
        }
        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        let total_rows = row_count(len, GRID_COLUMNS);
        let selected_row = min(self.selected, len - 1) / GRID_COLUMNS;
        self.grid_top = first_visible_row(
            self.grid_top,
            selected_row,
            visible_rows,
            total_rows,
            self.scroll,
        );
        self.scroll = ScrollMode::Follow;
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match self.browser.screen() {
            ActiveScreen::Landing => self.draw_landing(frame, content_area),
            ActiveScreen::Dashboard => self.draw_dashboard(frame, content_area),
            ActiveScreen::CourseMaterials(id) => self.draw_materials(frame, content_area, id),
        }

        if area.height > footer_height {
            self.draw_footer(frame, footer_area);
        }

        if self.browser.popup_open() {
            self.draw_popup(frame, area);
        }
    }

    fn draw_landing(&self, frame: &mut Frame, area: Rect) {
        let catalog_line = match self.browser.load_state() {
            LoadState::Loading => Line::from(Span::styled(
                "Loading courses...",
                Style::default().fg(Color::Gray),
            )),
            LoadState::Ready => Line::from(Span::styled(
                format!("{} courses ready", self.browser.catalog().len()),
                Style::default().fg(Color::Green),
            )),
            LoadState::Failed(_) => Line::from(Span::styled(
                "Course data unavailable",
                Style::default().fg(Color::Red),
            )),
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Course Browser",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Labs, assignments, quizzes, past papers and slides in one place."),
            Line::from(""),
            catalog_line,
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to browse courses",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_dashboard(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(TOOLBAR_HEIGHT), Constraint::Min(0)])
            .split(area);
        self.draw_toolbar(frame, chunks[0]);

        let grid_area = chunks[1];
        self.sync_grid_top(grid_area);
        let placeholder = |text: &'static str, style: Style| {
            Paragraph::new(Span::styled(text, style))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Courses"))
        };
        match self.browser.grid() {
            GridContent::Loading => frame.render_widget(
                placeholder("Loading courses...", Style::default().fg(Color::Gray)),
                grid_area,
            ),
            GridContent::Error(message) => frame.render_widget(
                placeholder(message, Style::default().fg(Color::Magenta)),
                grid_area,
            ),
            GridContent::Empty(message) => frame.render_widget(
                placeholder(message, Style::default().fg(Color::Gray)),
                grid_area,
            ),
            GridContent::Cards(courses) => self.draw_cards(frame, grid_area, courses),
        }
    }

    fn draw_toolbar(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let editing = matches!(self.mode, Mode::Searching(_));
        let query = match &self.mode {
            Mode::Searching(input) => input.query.as_str(),
            Mode::Normal => self.browser.search_term(),
        };

        let direction: SortDirection = self.browser.sort_direction();
        let mut controls = vec![Span::styled(
            format!("{} {}", direction.glyph(), direction.label()),
            Style::default().fg(Color::Yellow),
        )];
        controls.push(Span::raw("   "));
        for (key, order) in [("c", SortOrder::Catalog), ("a", SortOrder::Alphabetical)] {
            let style = if self.browser.active_filter() == order {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            controls.push(Span::styled(format!("[{key}]"), key_style));
            controls.push(Span::styled(format!(" {} ", order.label()), style));
            controls.push(Span::raw("  "));
        }
        controls.push(Span::raw(format!(
            "{} of {} courses",
            self.browser.filtered().len(),
            self.browser.catalog().len()
        )));

        let block = Block::default().borders(Borders::ALL).title("Dashboard");
        let inner = block.inner(area);
        let paragraph = Paragraph::new(vec![
            SearchInput::build_line(query, editing),
            Line::from(controls),
        ])
        .block(block);
        frame.render_widget(paragraph, area);

        if let Mode::Searching(input) = &self.mode {
            let cursor_x = inner.x + input.cursor_offset();
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_cards(&self, frame: &mut Frame, area: Rect, courses: &[Course]) {
        if area.height == 0 || courses.is_empty() {
            return;
        }

        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        let total_rows = row_count(courses.len(), GRID_COLUMNS);
        let selected = min(self.selected, courses.len() - 1);
        let first_row = min(self.grid_top, total_rows - 1);
        let shown_rows = min(visible_rows, total_rows - first_row);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); shown_rows])
            .split(area);
        for (offset, row_area) in rows.iter().enumerate() {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![
                    Constraint::Ratio(1, GRID_COLUMNS as u32);
                    GRID_COLUMNS
                ])
                .split(*row_area);
            for (col, card_area) in columns.iter().enumerate() {
                let index = (first_row + offset) * GRID_COLUMNS + col;
                let Some(course) = courses.get(index) else {
                    break;
                };
                let is_selected = index == selected;
                let mut block = Block::default().borders(Borders::ALL);
                if is_selected {
                    block = block.border_style(Style::default().fg(Color::Yellow));
                }
                let card = Paragraph::new(course_card_lines(course, is_selected))
                    .wrap(Wrap { trim: true })
                    .block(block);
                frame.render_widget(card, *card_area);
            }
        }
    }

    fn draw_materials(&self, frame: &mut Frame, area: Rect, id: i64) {
        let (Some(course), Some(links)) = (self.browser.current_course(), self.browser.materials(id))
        else {
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                course.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", course.description),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title("Course Materials"));
        frame.render_widget(header, chunks[0]);

        let last = links.len().saturating_sub(1);
        let items: Vec<ListItem> = links
            .iter()
            .enumerate()
            .map(|(index, link)| material_node(link, index == last))
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(min(self.material_selected, last)));
        frame.render_stateful_widget(list, chunks[1], &mut list_state);
    }

    fn draw_popup(&self, frame: &mut Frame, area: Rect) {
        let popup_area = popup_rect(area);
        frame.render_widget(Clear, popup_area);

        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let binding = |key: &'static str, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("{key:>8}"), key_style),
                Span::raw(format!("  {text}")),
            ])
        };
        let lines = vec![
            Line::from(Span::styled(
                "Course Browser",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Find your course, then grab its labs, papers and slides."),
            Line::from(""),
            binding("/", "search titles and descriptions"),
            binding("a / c", "alphabetical / catalog order"),
            binding("t", "toggle A-Z / Z-A"),
            binding("r", "jump to a random course"),
            binding("Enter", "open course or material"),
            binding("Esc", "back / close this panel"),
            binding("q", "quit"),
        ];
        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("About"));
        frame.render_widget(paragraph, popup_area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = if self.browser.popup_open() {
            &[("[Esc]", " Close")]
        } else {
            match (self.browser.screen(), &self.mode) {
                (_, Mode::Searching(_)) => &[
                    ("[type]", " Filter   "),
                    ("[Ctrl-U]", " Clear   "),
                    ("[Enter/Esc]", " Done"),
                ],
                (ActiveScreen::Landing, _) => &[
                    ("[Enter]", " Browse Courses   "),
                    ("[?]", " About   "),
                    ("[q]", " Quit"),
                ],
                (ActiveScreen::Dashboard, _) => &[
                    ("[←↑↓→]", " Move   "),
                    ("[Enter]", " Get Stuff   "),
                    ("[/]", " Search   "),
                    ("[a]", " A-Z   "),
                    ("[c]", " All   "),
                    ("[t]", " Toggle Sort   "),
                    ("[r]", " Random   "),
                    ("[?]", " About   "),
                    ("[q]", " Quit"),
                ],
                (ActiveScreen::CourseMaterials(_), _) => &[
                    ("[↑↓]", " Select   "),
                    ("[Enter]", " Open Link   "),
                    ("[Esc]", " Back   "),
                    ("[?]", " About   "),
                    ("[q]", " Quit"),
                ],
            }
        };
        Line::from(
            hints
                .iter()
                .flat_map(|(key, text)| {
                    [Span::styled(*key, key_style), Span::raw(*text)]
                })
                .collect::<Vec<_>>(),
        )
    }
}

/// Area covered by the popup content on a screen of size `area`.
fn popup_rect(area: Rect) -> Rect {
    centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area)
}

/// One node of the materials chain, with a connector below every node but
/// the last.
fn material_node(link: &MaterialLink<'_>, last: bool) -> ListItem<'static> {
    let category = link.category;
    let target = match link.url {
        Some(url) => Span::styled(url.to_string(), Style::default().fg(Color::Cyan)),
        None => Span::styled("no link yet", Style::default().fg(Color::DarkGray)),
    };
    let mut lines = vec![
        Line::from(Span::styled(
            category.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{}  ", category.description()),
                Style::default().fg(Color::Gray),
            ),
            target,
        ]),
    ];
    if !last {
        lines.push(Line::from(Span::styled("│", Style::default().fg(Color::DarkGray))));
    }
    ListItem::new(lines)
}
