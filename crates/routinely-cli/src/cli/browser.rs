//! Interactive TUI product browser.
//!
//! Provides a ratatui-based 3-pane browser over the catalog.
//!
//! Layout:
//! - Left (20%): Category list
//! - Center (45%): Product list with selection markers
//! - Right (35%): Details of the highlighted product above the selected list
//!
//! Keybindings: `/` search, Space/Enter toggle, `i` expand description,
//! `d` remove from selection, `c` clear selection, `r` flip direction,
//! `g` generate routine, Tab cycle panes, j/k navigate, Esc/q quit

use std::collections::HashSet;
use std::io;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::Alignment;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use routinely_core::catalog::view::{CatalogFilter, Placeholder};
use routinely_types::preferences::TextDirection;
use routinely_types::product::{Product, ProductId};

use crate::state::{AppState, ConcreteApp};

use super::truncate;

/// Label of the catch-all category entry.
const ALL_CATEGORIES: &str = "All";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Which pane currently has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Categories,
    Products,
    Selected,
}

/// How the browser was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserExit {
    Quit,
    /// The user asked for a routine; the caller runs it outside the TUI.
    Generate,
}

/// A state change that needs the application (and storage).
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    None,
    Toggle(ProductId),
    Remove(ProductId),
    Clear,
    ToggleDirection,
}

struct BrowserState {
    /// "All" followed by the catalog categories.
    categories: Vec<String>,
    category_state: ListState,
    filter: CatalogFilter,
    /// Indices into the catalog of products passing the filter.
    visible: Vec<usize>,
    product_state: ListState,
    selected_state: ListState,
    active_pane: Pane,
    search_mode: bool,
    /// Products whose description is shown in full.
    expanded: HashSet<ProductId>,
    /// Result of the last action, shown in the footer.
    status: Option<String>,
    exit: Option<BrowserExit>,
}

impl BrowserState {
    fn new(products: &[Product], categories: Vec<String>) -> Self {
        let mut all = vec![ALL_CATEGORIES.to_string()];
        all.extend(categories);

        let mut category_state = ListState::default();
        category_state.select(Some(0));

        let mut state = Self {
            categories: all,
            category_state,
            filter: CatalogFilter::default(),
            visible: Vec::new(),
            product_state: ListState::default(),
            selected_state: ListState::default(),
            active_pane: Pane::Products,
            search_mode: false,
            expanded: HashSet::new(),
            status: None,
            exit: None,
        };
        state.refilter(products);
        state
    }

    /// Recompute visible products from the category cursor and search text.
    fn refilter(&mut self, products: &[Product]) {
        self.filter.category = self
            .category_state
            .selected()
            .and_then(|i| self.categories.get(i))
            .filter(|c| c.as_str() != ALL_CATEGORIES)
            .cloned();

        self.visible = products
            .iter()
            .enumerate()
            .filter(|(_, p)| self.filter.matches(p))
            .map(|(i, _)| i)
            .collect();

        if self.visible.is_empty() {
            self.product_state.select(None);
        } else {
            self.product_state.select(Some(0));
        }
    }

    fn current_product<'a>(&self, products: &'a [Product]) -> Option<&'a Product> {
        self.product_state
            .selected()
            .and_then(|i| self.visible.get(i))
            .and_then(|&idx| products.get(idx))
    }

    /// Keep the selected-list cursor inside the list after removals.
    fn clamp_selected_cursor(&mut self, len: usize) {
        match (self.selected_state.selected(), len) {
            (_, 0) => self.selected_state.select(None),
            (None, _) => self.selected_state.select(Some(0)),
            (Some(i), len) if i >= len => self.selected_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Launch the interactive browser. Selection and direction changes are
/// persisted as they happen.
pub async fn run_browser(state: &mut AppState) -> Result<BrowserExit> {
    if !state.ensure_catalog().await {
        anyhow::bail!("Failed to load products from {}", state.catalog_location());
    }

    let mut browser = BrowserState::new(
        state.app.catalog().products(),
        state.app.catalog().categories(),
    );

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut terminal, &mut browser, &mut state.app).await;

    // Restore terminal
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;

    result
}

// ---------------------------------------------------------------------------
// TUI loop
// ---------------------------------------------------------------------------

async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    browser: &mut BrowserState,
    app: &mut ConcreteApp,
) -> Result<BrowserExit> {
    loop {
        let selected = selected_ids(app);
        browser.clamp_selected_cursor(selected.len());
        terminal.draw(|frame| draw(frame, browser, app, &selected))?;

        if let Some(exit) = browser.exit {
            return Ok(exit);
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let action = handle_key(key.code, browser, app.catalog().products(), &selected);
                apply(action, browser, app).await?;
            }
        }
    }
}

/// Selected ids in catalog order.
fn selected_ids(app: &ConcreteApp) -> Vec<ProductId> {
    app.render_selected()
        .cards()
        .iter()
        .map(|card| card.product.id.clone())
        .collect()
}

async fn apply(action: Action, browser: &mut BrowserState, app: &mut ConcreteApp) -> Result<()> {
    match action {
        Action::None => {}
        Action::Toggle(id) => {
            let selected = app.toggle(id.clone()).await?;
            browser.status = Some(format!(
                "{} {id}",
                if selected { "Selected" } else { "Unselected" }
            ));
        }
        Action::Remove(id) => {
            app.remove(&id).await?;
            browser.status = Some(format!("Removed {id}"));
        }
        Action::Clear => {
            app.clear_selection().await?;
            browser.status = Some("Selection cleared".to_string());
        }
        Action::ToggleDirection => {
            let direction = app.toggle_direction().await?;
            browser.status = Some(format!("Text direction: {direction}"));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

fn handle_key(
    code: KeyCode,
    state: &mut BrowserState,
    products: &[Product],
    selected: &[ProductId],
) -> Action {
    if state.search_mode {
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                state.search_mode = false;
            }
            KeyCode::Backspace => {
                state.filter.search.pop();
                state.refilter(products);
            }
            KeyCode::Char(c) => {
                state.filter.search.push(c);
                state.refilter(products);
            }
            _ => {}
        }
        return Action::None;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.exit = Some(BrowserExit::Quit);
        }
        KeyCode::Char('/') => {
            state.search_mode = true;
        }
        KeyCode::Tab => {
            state.active_pane = match state.active_pane {
                Pane::Categories => Pane::Products,
                Pane::Products => Pane::Selected,
                Pane::Selected => Pane::Categories,
            };
        }
        KeyCode::BackTab => {
            state.active_pane = match state.active_pane {
                Pane::Categories => Pane::Selected,
                Pane::Products => Pane::Categories,
                Pane::Selected => Pane::Products,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => navigate(state, products, selected.len(), 1),
        KeyCode::Char('k') | KeyCode::Up => navigate(state, products, selected.len(), -1),
        KeyCode::Char(' ') | KeyCode::Enter => match state.active_pane {
            Pane::Products => {
                if let Some(product) = state.current_product(products) {
                    return Action::Toggle(product.id.clone());
                }
            }
            Pane::Selected => {
                if let Some(id) = state.selected_state.selected().and_then(|i| selected.get(i)) {
                    return Action::Remove(id.clone());
                }
            }
            Pane::Categories => {
                state.active_pane = Pane::Products;
            }
        },
        KeyCode::Char('i') => {
            if let Some(product) = state.current_product(products) {
                let id = product.id.clone();
                if !state.expanded.remove(&id) {
                    state.expanded.insert(id);
                }
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            let target = match state.active_pane {
                Pane::Selected => state.selected_state.selected().and_then(|i| selected.get(i)).cloned(),
                _ => state
                    .current_product(products)
                    .map(|p| p.id.clone())
                    .filter(|id| selected.contains(id)),
            };
            if let Some(id) = target {
                return Action::Remove(id);
            }
        }
        KeyCode::Char('c') => {
            if !selected.is_empty() {
                return Action::Clear;
            }
        }
        KeyCode::Char('r') => return Action::ToggleDirection,
        KeyCode::Char('g') => {
            state.exit = Some(BrowserExit::Generate);
        }
        _ => {}
    }

    Action::None
}

fn navigate(state: &mut BrowserState, products: &[Product], selected_len: usize, step: isize) {
    fn moved(current: Option<usize>, len: usize, step: isize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let i = current.unwrap_or(0);
        Some(i.saturating_add_signed(step).min(len - 1))
    }

    match state.active_pane {
        Pane::Categories => {
            let next = moved(state.category_state.selected(), state.categories.len(), step);
            state.category_state.select(next);
            state.refilter(products);
        }
        Pane::Products => {
            let next = moved(state.product_state.selected(), state.visible.len(), step);
            state.product_state.select(next);
        }
        Pane::Selected => {
            let next = moved(state.selected_state.selected(), selected_len, step);
            state.selected_state.select(next);
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

fn text_alignment(direction: TextDirection) -> Alignment {
    if direction.is_rtl() {
        Alignment::Right
    } else {
        Alignment::Left
    }
}

fn pane_block(title: &str, active: bool) -> Block<'_> {
    let border_color = if active { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

fn draw(frame: &mut Frame, state: &mut BrowserState, app: &ConcreteApp, selected: &[ProductId]) {
    let area = frame.area();

    // Main layout: header + body + footer
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(5),    // body
            Constraint::Length(3), // footer
        ])
        .split(area);

    draw_header(frame, main_layout[0], state, app, selected.len());
    draw_body(frame, main_layout[1], state, app, selected);
    draw_footer(frame, main_layout[2], state);
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    state: &BrowserState,
    app: &ConcreteApp,
    selected_count: usize,
) {
    let title = if state.search_mode {
        format!(" Routinely  |  Search: {}_ ", state.filter.search)
    } else if !state.filter.search.is_empty() {
        format!(
            " Routinely  |  Filter: \"{}\"  ({} products, {} selected)  |  {} ",
            state.filter.search,
            state.visible.len(),
            selected_count,
            app.direction()
        )
    } else {
        format!(
            " Routinely  |  {} products, {} selected  |  {} ",
            state.visible.len(),
            selected_count,
            app.direction()
        )
    };

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(header, area);
}

fn draw_body(
    frame: &mut Frame,
    area: Rect,
    state: &mut BrowserState,
    app: &ConcreteApp,
    selected: &[ProductId],
) {
    let body_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(45),
            Constraint::Percentage(35),
        ])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(body_layout[2]);

    draw_categories(frame, body_layout[0], state);
    draw_products(frame, body_layout[1], state, app);
    draw_details(frame, right[0], state, app);
    draw_selected(frame, right[1], state, app, selected);
}

fn draw_categories(frame: &mut Frame, area: Rect, state: &mut BrowserState) {
    let items: Vec<ListItem> = state
        .categories
        .iter()
        .map(|cat| {
            let style = if cat == ALL_CATEGORIES {
                Style::default().fg(Color::White).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(Span::styled(cat.as_str(), style)))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" Categories ", state.active_pane == Pane::Categories))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.category_state);
}

fn draw_products(frame: &mut Frame, area: Rect, state: &mut BrowserState, app: &ConcreteApp) {
    let block = pane_block(" Products ", state.active_pane == Pane::Products);

    if state.visible.is_empty() {
        let empty = Paragraph::new(Placeholder::NoMatch.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let alignment = text_alignment(app.direction());
    let products = app.catalog().products();
    let items: Vec<ListItem> = state
        .visible
        .iter()
        .filter_map(|&idx| products.get(idx))
        .map(|product| {
            let (marker, marker_color) = if app.selection().contains(&product.id) {
                ("●", Color::Green)
            } else {
                ("○", Color::DarkGray)
            };

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(marker_color)),
                Span::raw(" "),
                Span::styled(product.name.as_str(), Style::default().fg(Color::White).bold()),
                Span::raw("  "),
                Span::styled(product.brand.as_str(), Style::default().fg(Color::Gray)),
            ])
            .alignment(alignment);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.product_state);
}

fn draw_details(frame: &mut Frame, area: Rect, state: &BrowserState, app: &ConcreteApp) {
    let content = if let Some(product) = state.current_product(app.catalog().products()) {
        let expanded = state.expanded.contains(&product.id);
        let description = if expanded || product.description.chars().count() <= 120 {
            product.description.clone()
        } else {
            format!("{}  (i to expand)", truncate(&product.description, 120))
        };
        let selected = app.selection().contains(&product.id);

        vec![
            Line::from(Span::styled(
                product.name.as_str(),
                Style::default().fg(Color::Cyan).bold(),
            )),
            Line::from(Span::styled(
                product.brand.as_str(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
                Span::styled(product.category.as_str(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("ID:       ", Style::default().fg(Color::DarkGray)),
                Span::styled(product.id.as_str(), Style::default().fg(Color::White)),
            ]),
            Line::from(vec![
                Span::styled("Selected: ", Style::default().fg(Color::DarkGray)),
                if selected {
                    Span::styled("yes", Style::default().fg(Color::Green))
                } else {
                    Span::styled("no", Style::default().fg(Color::White))
                },
            ]),
            Line::from(""),
            Line::from(Span::styled(description, Style::default().fg(Color::White))),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                "No product highlighted",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };

    let detail = Paragraph::new(content)
        .alignment(text_alignment(app.direction()))
        .block(pane_block(" Details ", false))
        .wrap(Wrap { trim: true });

    frame.render_widget(detail, area);
}

fn draw_selected(
    frame: &mut Frame,
    area: Rect,
    state: &mut BrowserState,
    app: &ConcreteApp,
    selected: &[ProductId],
) {
    let block = pane_block(" Selected ", state.active_pane == Pane::Selected);

    if selected.is_empty() {
        let empty = Paragraph::new(Placeholder::NothingSelected.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let alignment = text_alignment(app.direction());
    let items: Vec<ListItem> = selected
        .iter()
        .filter_map(|id| app.catalog().get(id))
        .map(|product| {
            ListItem::new(
                Line::from(vec![
                    Span::styled(product.name.as_str(), Style::default().fg(Color::White)),
                    Span::raw(" "),
                    Span::styled("[x]", Style::default().fg(Color::Red)),
                ])
                .alignment(alignment),
            )
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White).bold())
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut state.selected_state);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &BrowserState) {
    let help = if state.search_mode {
        " Type to search | Enter/Esc to finish ".to_string()
    } else {
        let keys = " q quit | / search | Tab panes | Space toggle | i expand | d remove | c clear | r dir | g routine ";
        match &state.status {
            Some(status) => format!(" {status} |{keys}"),
            None => keys.to_string(),
        }
    };

    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(footer, area);
}
