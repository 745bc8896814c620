// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use invmap_app::{
    AmountFormat, AppCommand, AppEvent, AppMode, AppState, EditField, Horizon, Initiative,
    InitiativeId, Portfolio, PortfolioCommand, PortfolioEvent, Tab, Theme, ThemeId,
    horizon_total, theme_total,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

const NAME_WIDTH: usize = 34;
const VALUE_WIDTH: usize = 40;
const COST_WIDTH: usize = 10;
const BAU_WIDTH: usize = 5;
const ROW_INDENT: &str = "    ";
const EXPANDED_MARK: &str = "▾";
const COLLAPSED_MARK: &str = "▸";
const DELETE_MARK: &str = "×";
const ADD_LABEL: &str = "+ Add initiative";
const EDIT_CARET: &str = "▏";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub format: AmountFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SummaryCard {
    horizon: Horizon,
    total: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HorizonFooter {
    horizon: Horizon,
    total: String,
}

/// One editable table row. Text cells hold what the user typed, which for cost may
/// differ from the coerced value stored in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemRow {
    initiative: InitiativeId,
    name: String,
    value: String,
    cost: String,
    bau: bool,
}

impl ItemRow {
    fn from_initiative(item: &Initiative) -> Self {
        Self {
            initiative: item.id.clone(),
            name: item.name.clone(),
            value: item.value.clone(),
            cost: item.cost.to_string(),
            bau: item.bau,
        }
    }

    fn text_mut(&mut self, field: EditField) -> &mut String {
        match field {
            EditField::Name => &mut self.name,
            EditField::Value => &mut self.value,
            EditField::Cost => &mut self.cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ThemeCard {
    theme: ThemeId,
    name: String,
    description: String,
    total: String,
    expanded: bool,
    rows: Vec<ItemRow>,
}

/// Everything drawn in the content area, rebuilt on tab switches and patched in place
/// after edits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ContentView {
    tab: Tab,
    summary: Vec<SummaryCard>,
    cards: Vec<ThemeCard>,
    footer: Option<HorizonFooter>,
}

impl Default for ContentView {
    fn default() -> Self {
        Self {
            tab: Tab::Overview,
            summary: Vec::new(),
            cards: Vec::new(),
            footer: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Header(usize),
    Row(usize, usize),
    AddRow(usize),
}

impl Focus {
    const fn card(self) -> usize {
        match self {
            Self::Header(card) | Self::Row(card, _) | Self::AddRow(card) => card,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum ItemColumn {
    #[default]
    Name,
    Value,
    Cost,
    Bau,
    Delete,
}

impl ItemColumn {
    const ALL: [Self; 5] = [Self::Name, Self::Value, Self::Cost, Self::Bau, Self::Delete];

    const fn edit_field(self) -> Option<EditField> {
        match self {
            Self::Name => Some(EditField::Name),
            Self::Value => Some(EditField::Value),
            Self::Cost => Some(EditField::Cost),
            Self::Bau | Self::Delete => None,
        }
    }

    fn shifted(self, delta: isize) -> Self {
        let current = Self::ALL
            .iter()
            .position(|column| *column == self)
            .unwrap_or(0) as isize;
        let last = Self::ALL.len() as isize - 1;
        Self::ALL[(current + delta).clamp(0, last) as usize]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CursorState {
    index: usize,
    column: ItemColumn,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct ViewData {
    format: AmountFormat,
    content: ContentView,
    cursor: CursorState,
    help_visible: bool,
    status_token: u64,
    // No key has been typed since the current cell edit began.
    edit_pristine: bool,
}

impl ViewData {
    fn new(options: &ViewOptions) -> Self {
        Self {
            format: options.format.clone(),
            ..Self::default()
        }
    }
}

pub fn run_app(
    state: &mut AppState,
    portfolio: &mut Portfolio,
    options: ViewOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(&options);
    let (internal_tx, internal_rx) = mpsc::channel();
    rebuild_content(state, portfolio, &mut view_data);
    info!(tab = state.active_tab.label(), "investment map opened");

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    if handle_key_event(state, portfolio, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    info!("investment map closed");
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event(
    state: &mut AppState,
    portfolio: &mut Portfolio,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if let AppMode::Edit(field) = state.mode {
        handle_edit_key(state, portfolio, view_data, field, key);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) => {
            dispatch_and_refresh(state, portfolio, view_data, AppCommand::NextTab, internal_tx);
        }
        (KeyCode::Char('b'), KeyModifiers::NONE) => {
            dispatch_and_refresh(state, portfolio, view_data, AppCommand::PrevTab, internal_tx);
        }
        (KeyCode::Char(digit @ '1'..='4'), KeyModifiers::NONE) => {
            let index = digit as usize - '1' as usize;
            dispatch_and_refresh(
                state,
                portfolio,
                view_data,
                AppCommand::SetActiveTab(Tab::ALL[index]),
                internal_tx,
            );
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => move_focus(view_data, 1),
        (KeyCode::Char('k') | KeyCode::Up, _) => move_focus(view_data, -1),
        (KeyCode::Char('g') | KeyCode::Home, _) => view_data.cursor.index = 0,
        (KeyCode::Char('G') | KeyCode::End, _) => {
            view_data.cursor.index = focus_targets(&view_data.content).len().saturating_sub(1);
        }
        (KeyCode::Char('h') | KeyCode::Left, _) => {
            view_data.cursor.column = view_data.cursor.column.shifted(-1);
        }
        (KeyCode::Char('l') | KeyCode::Right, _) => {
            view_data.cursor.column = view_data.cursor.column.shifted(1);
        }
        (KeyCode::Enter, _) => activate_focus(state, portfolio, view_data, internal_tx, false),
        (KeyCode::Char(' '), _) => activate_focus(state, portfolio, view_data, internal_tx, true),
        (KeyCode::Char('i'), KeyModifiers::NONE) => {
            if !begin_cell_edit(state, view_data) {
                emit_status(state, view_data, internal_tx, "nothing to edit here");
            }
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            let Some(card) = current_focus(view_data).map(Focus::card) else {
                return false;
            };
            if view_data.content.cards[card].expanded {
                add_initiative(state, portfolio, view_data, internal_tx, card);
            } else {
                emit_status(state, view_data, internal_tx, "expand the theme to add");
            }
        }
        (KeyCode::Char('d') | KeyCode::Delete, _) => {
            delete_selected_row(state, portfolio, view_data, internal_tx);
        }
        _ => {}
    }
    false
}

fn handle_edit_key(
    state: &mut AppState,
    portfolio: &mut Portfolio,
    view_data: &mut ViewData,
    field: EditField,
    key: KeyEvent,
) {
    let pristine = std::mem::take(&mut view_data.edit_pristine);
    match (key.code, key.modifiers) {
        (KeyCode::Esc | KeyCode::Enter, _) => {
            state.dispatch(AppCommand::ExitToNav);
        }
        (KeyCode::Backspace, _) => {
            edit_selected_cell(portfolio, view_data, field, |text| {
                text.pop();
            });
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
            edit_selected_cell(portfolio, view_data, field, String::clear);
        }
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let replace_zero = pristine && field == EditField::Cost;
            edit_selected_cell(portfolio, view_data, field, |text| {
                if replace_zero && text == "0" {
                    text.clear();
                }
                text.push(ch);
            });
        }
        _ => {}
    }
}

fn dispatch_and_refresh(
    state: &mut AppState,
    portfolio: &Portfolio,
    view_data: &mut ViewData,
    command: AppCommand,
    internal_tx: &Sender<InternalEvent>,
) {
    let events = state.dispatch(command);
    if should_rebuild_content(&events) {
        rebuild_content(state, portfolio, view_data);
        debug!(tab = state.active_tab.label(), "tab switched");
    }
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn should_rebuild_content(events: &[AppEvent]) -> bool {
    events
        .iter()
        .any(|event| matches!(event, AppEvent::TabChanged(_)))
}

fn rebuild_content(state: &AppState, portfolio: &Portfolio, view_data: &mut ViewData) {
    view_data.content = build_content(state.active_tab, portfolio, &view_data.format);
    view_data.cursor = CursorState::default();
}

fn build_content(tab: Tab, portfolio: &Portfolio, format: &AmountFormat) -> ContentView {
    match tab {
        Tab::Overview => ContentView {
            tab,
            summary: Horizon::ALL
                .into_iter()
                .map(|horizon| SummaryCard {
                    horizon,
                    total: format.format(horizon_total(portfolio, horizon)),
                })
                .collect(),
            cards: portfolio
                .iter_themes()
                .map(|(_, theme)| theme_card(theme, format))
                .collect(),
            footer: None,
        },
        Tab::Horizon(horizon) => ContentView {
            tab,
            summary: Vec::new(),
            cards: portfolio
                .themes(horizon)
                .iter()
                .map(|theme| theme_card(theme, format))
                .collect(),
            footer: Some(HorizonFooter {
                horizon,
                total: format.format(horizon_total(portfolio, horizon)),
            }),
        },
    }
}

fn theme_card(theme: &Theme, format: &AmountFormat) -> ThemeCard {
    ThemeCard {
        theme: theme.id.clone(),
        name: theme.name.clone(),
        description: theme.value.clone(),
        total: format.format(theme_total(theme)),
        expanded: false,
        rows: theme.items.iter().map(ItemRow::from_initiative).collect(),
    }
}

/// Patches the content view after portfolio mutations instead of rebuilding it, so
/// expansion state and in-progress cell text survive edits.
fn apply_portfolio_events(
    portfolio: &Portfolio,
    view_data: &mut ViewData,
    events: &[PortfolioEvent],
) {
    for event in events {
        match event {
            PortfolioEvent::InitiativeAdded { theme, initiative } => {
                let Some(item) = portfolio.initiative(theme, initiative) else {
                    continue;
                };
                for card in cards_for_theme(&mut view_data.content, theme) {
                    card.rows.push(ItemRow::from_initiative(item));
                }
            }
            PortfolioEvent::InitiativeRemoved { theme, initiative } => {
                for card in cards_for_theme(&mut view_data.content, theme) {
                    card.rows.retain(|row| &row.initiative != initiative);
                }
            }
            PortfolioEvent::InitiativeEdited { .. } => {}
            PortfolioEvent::TotalsChanged { horizon, theme } => {
                refresh_totals(portfolio, view_data, *horizon, theme);
            }
        }
    }
    clamp_cursor(view_data);
}

fn cards_for_theme<'a>(
    content: &'a mut ContentView,
    theme: &'a ThemeId,
) -> impl Iterator<Item = &'a mut ThemeCard> {
    content
        .cards
        .iter_mut()
        .filter(move |card| &card.theme == theme)
}

fn refresh_totals(
    portfolio: &Portfolio,
    view_data: &mut ViewData,
    horizon: Horizon,
    theme: &ThemeId,
) {
    let format = view_data.format.clone();
    if let Some(data) = portfolio.theme(theme) {
        let total = format.format(theme_total(data));
        for card in cards_for_theme(&mut view_data.content, theme) {
            card.total = total.clone();
        }
    }
    for card in &mut view_data.content.summary {
        card.total = format.format(horizon_total(portfolio, card.horizon));
    }
    if let Some(footer) = &mut view_data.content.footer
        && footer.horizon == horizon
    {
        footer.total = format.format(horizon_total(portfolio, horizon));
    }
}

fn focus_targets(content: &ContentView) -> Vec<Focus> {
    let mut targets = Vec::new();
    for (card_index, card) in content.cards.iter().enumerate() {
        targets.push(Focus::Header(card_index));
        if card.expanded {
            targets.extend((0..card.rows.len()).map(|row| Focus::Row(card_index, row)));
            targets.push(Focus::AddRow(card_index));
        }
    }
    targets
}

fn current_focus(view_data: &ViewData) -> Option<Focus> {
    focus_targets(&view_data.content)
        .get(view_data.cursor.index)
        .copied()
}

fn focus_on(view_data: &mut ViewData, focus: Focus) {
    if let Some(index) = focus_targets(&view_data.content)
        .iter()
        .position(|target| *target == focus)
    {
        view_data.cursor.index = index;
    }
}

fn move_focus(view_data: &mut ViewData, delta: isize) {
    let count = focus_targets(&view_data.content).len();
    if count == 0 {
        view_data.cursor.index = 0;
        return;
    }
    let next = (view_data.cursor.index as isize + delta).clamp(0, count as isize - 1);
    view_data.cursor.index = next as usize;
}

fn clamp_cursor(view_data: &mut ViewData) {
    let count = focus_targets(&view_data.content).len();
    view_data.cursor.index = view_data.cursor.index.min(count.saturating_sub(1));
}

fn toggle_card(view_data: &mut ViewData, card_index: usize) {
    if let Some(card) = view_data.content.cards.get_mut(card_index) {
        card.expanded = !card.expanded;
    }
}

fn activate_focus(
    state: &mut AppState,
    portfolio: &mut Portfolio,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    space: bool,
) {
    let Some(focus) = current_focus(view_data) else {
        return;
    };
    match focus {
        Focus::Header(card) => toggle_card(view_data, card),
        Focus::AddRow(card) => add_initiative(state, portfolio, view_data, internal_tx, card),
        Focus::Row(_, _) => match view_data.cursor.column {
            ItemColumn::Bau => toggle_selected_bau(portfolio, view_data),
            ItemColumn::Delete if !space => {
                delete_selected_row(state, portfolio, view_data, internal_tx);
            }
            ItemColumn::Delete => {}
            _ if space => {}
            _ => {
                begin_cell_edit(state, view_data);
            }
        },
    }
}

fn begin_cell_edit(state: &mut AppState, view_data: &mut ViewData) -> bool {
    let Some(Focus::Row(_, _)) = current_focus(view_data) else {
        return false;
    };
    let Some(field) = view_data.cursor.column.edit_field() else {
        return false;
    };
    state.dispatch(AppCommand::EnterEdit(field));
    view_data.edit_pristine = true;
    true
}

fn selected_row(view_data: &ViewData) -> Option<(usize, usize)> {
    match current_focus(view_data)? {
        Focus::Row(card, row) => Some((card, row)),
        _ => None,
    }
}

fn row_target(
    view_data: &ViewData,
    card: usize,
    row: usize,
) -> Option<(ThemeId, InitiativeId)> {
    let card = view_data.content.cards.get(card)?;
    let row = card.rows.get(row)?;
    Some((card.theme.clone(), row.initiative.clone()))
}

fn edit_selected_cell(
    portfolio: &mut Portfolio,
    view_data: &mut ViewData,
    field: EditField,
    edit: impl FnOnce(&mut String),
) {
    let Some((card, row)) = selected_row(view_data) else {
        return;
    };
    let Some((theme, initiative)) = row_target(view_data, card, row) else {
        return;
    };
    let text = view_data.content.cards[card].rows[row].text_mut(field);
    edit(text);
    let text = text.clone();

    let command = match field {
        EditField::Name => PortfolioCommand::SetName {
            theme,
            initiative,
            name: text,
        },
        EditField::Value => PortfolioCommand::SetValue {
            theme,
            initiative,
            value: text,
        },
        EditField::Cost => PortfolioCommand::SetCost {
            theme,
            initiative,
            raw: text,
        },
    };
    let events = portfolio.apply(command);
    apply_portfolio_events(portfolio, view_data, &events);
}

fn toggle_selected_bau(portfolio: &mut Portfolio, view_data: &mut ViewData) {
    let Some((card, row)) = selected_row(view_data) else {
        return;
    };
    let Some((theme, initiative)) = row_target(view_data, card, row) else {
        return;
    };
    let cell = &mut view_data.content.cards[card].rows[row];
    cell.bau = !cell.bau;
    let bau = cell.bau;

    debug!(%theme, %initiative, bau, "bau toggled");
    let events = portfolio.apply(PortfolioCommand::SetBau {
        theme,
        initiative,
        bau,
    });
    apply_portfolio_events(portfolio, view_data, &events);
}

fn add_initiative(
    state: &mut AppState,
    portfolio: &mut Portfolio,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    card: usize,
) {
    let Some(theme) = view_data.content.cards.get(card).map(|card| card.theme.clone()) else {
        return;
    };
    let events = portfolio.apply(PortfolioCommand::AddInitiative {
        theme: theme.clone(),
    });
    apply_portfolio_events(portfolio, view_data, &events);

    let added = events.iter().find_map(|event| match event {
        PortfolioEvent::InitiativeAdded { initiative, .. } => Some(initiative),
        _ => None,
    });
    let Some(initiative) = added else {
        return;
    };
    debug!(%theme, %initiative, "initiative added");
    if let Some(row) = view_data.content.cards[card]
        .rows
        .iter()
        .position(|row| &row.initiative == initiative)
    {
        focus_on(view_data, Focus::Row(card, row));
        view_data.cursor.column = ItemColumn::Name;
    }
    emit_status(state, view_data, internal_tx, "initiative added");
}

fn delete_selected_row(
    state: &mut AppState,
    portfolio: &mut Portfolio,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some((card, row)) = selected_row(view_data) else {
        return;
    };
    let Some((theme, initiative)) = row_target(view_data, card, row) else {
        return;
    };
    debug!(%theme, %initiative, "initiative deleted");
    let events = portfolio.apply(PortfolioCommand::DeleteInitiative { theme, initiative });
    apply_portfolio_events(portfolio, view_data, &events);
    if !events.is_empty() {
        emit_status(state, view_data, internal_tx, "initiative deleted");
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = Tab::ALL
        .iter()
        .position(|tab| *tab == state.active_tab)
        .unwrap_or(0);
    let tab_titles = Tab::ALL
        .iter()
        .enumerate()
        .map(|(index, tab)| format!("{} {}", index + 1, tab.label()))
        .collect::<Vec<String>>();
    let tabs = Tabs::new(tab_titles)
        .block(
            Block::default()
                .title("investment map")
                .borders(Borders::ALL),
        )
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    render_content(frame, layout[1], state, view_data);

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_content(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    view_data: &ViewData,
) {
    let content = &view_data.content;
    let mut constraints = Vec::new();
    if !content.summary.is_empty() {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1));
    if content.footer.is_some() {
        constraints.push(Constraint::Length(3));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next_chunk = 0;
    if !content.summary.is_empty() {
        let count = content.summary.len() as u32;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count); content.summary.len()])
            .split(chunks[next_chunk]);
        for (card, column) in content.summary.iter().zip(columns.iter()) {
            let widget = Paragraph::new(card.total.clone())
                .style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::default()
                        .title(card.horizon.label())
                        .borders(Borders::ALL),
                );
            frame.render_widget(widget, *column);
        }
        next_chunk += 1;
    }

    let cards_area = chunks[next_chunk];
    let inner_width = usize::from(cards_area.width.saturating_sub(2));
    let (lines, focus_line) = card_lines(state, view_data, inner_width);
    let inner_height = usize::from(cards_area.height.saturating_sub(2));
    let scroll = scroll_offset(focus_line, inner_height);
    let cards = Paragraph::new(lines)
        .block(
            Block::default()
                .title(content.tab.label())
                .borders(Borders::ALL),
        )
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(cards, cards_area);

    if let Some(footer) = &content.footer {
        let widget = Paragraph::new(render_footer_text(footer))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, chunks[next_chunk + 1]);
    }
}

fn render_footer_text(footer: &HorizonFooter) -> String {
    format!("{} total: {}", footer.horizon.label(), footer.total)
}

fn scroll_offset(focus_line: Option<usize>, height: usize) -> usize {
    match focus_line {
        Some(line) if height > 0 && line >= height => line + 1 - height,
        _ => 0,
    }
}

/// Lines for every theme card plus the index of the line holding the cursor.
fn card_lines(
    state: &AppState,
    view_data: &ViewData,
    width: usize,
) -> (Vec<Line<'static>>, Option<usize>) {
    let focus = current_focus(view_data);
    let mut lines = Vec::new();
    let mut focus_line = None;

    for (card_index, card) in view_data.content.cards.iter().enumerate() {
        if card_index > 0 {
            lines.push(Line::default());
        }

        if focus == Some(Focus::Header(card_index)) {
            focus_line = Some(lines.len());
        }
        lines.push(header_line(
            card,
            width,
            focus == Some(Focus::Header(card_index)),
        ));
        lines.push(Line::from(Span::styled(
            format!("  {}", card.description),
            Style::default().fg(Color::Gray),
        )));

        if !card.expanded {
            continue;
        }

        lines.push(table_header_line(&view_data.format));
        for (row_index, row) in card.rows.iter().enumerate() {
            let selected = focus == Some(Focus::Row(card_index, row_index));
            if selected {
                focus_line = Some(lines.len());
            }
            let selected_column = selected.then_some(view_data.cursor.column);
            lines.push(item_line(row, selected_column, state.mode));
        }

        let add_selected = focus == Some(Focus::AddRow(card_index));
        if add_selected {
            focus_line = Some(lines.len());
        }
        let add_style = if add_selected {
            selected_style()
        } else {
            Style::default().fg(Color::Green)
        };
        lines.push(Line::from(vec![
            Span::raw(ROW_INDENT),
            Span::styled(ADD_LABEL, add_style),
        ]));
    }

    (lines, focus_line)
}

fn header_line(card: &ThemeCard, width: usize, selected: bool) -> Line<'static> {
    let mark = if card.expanded {
        EXPANDED_MARK
    } else {
        COLLAPSED_MARK
    };
    let left = format!("{mark} {}", card.name);
    let used = left.chars().count() + card.total.chars().count();
    let padding = width.saturating_sub(used).max(1);

    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if selected {
        style = selected_style();
    }
    Line::from(vec![
        Span::styled(left, style),
        Span::raw(" ".repeat(padding)),
        Span::styled(card.total.clone(), Style::default().fg(Color::Cyan)),
    ])
}

fn table_header_line(format: &AmountFormat) -> Line<'static> {
    let cost_label = format!("Cost ({})", format.unit());
    let text = [
        fit_cell("Initiative", NAME_WIDTH),
        fit_cell("Value", VALUE_WIDTH),
        fit_cell(&cost_label, COST_WIDTH),
        fit_cell("BAU", BAU_WIDTH),
    ]
    .join(" ");
    Line::from(vec![
        Span::raw(ROW_INDENT),
        Span::styled(
            text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),
        ),
    ])
}

fn item_line(
    row: &ItemRow,
    selected_column: Option<ItemColumn>,
    mode: AppMode,
) -> Line<'static> {
    let editing = match mode {
        AppMode::Edit(field) => Some(field),
        AppMode::Nav => None,
    };
    let mut spans = vec![Span::raw(ROW_INDENT)];
    for column in ItemColumn::ALL {
        let selected = selected_column == Some(column);
        let (raw, width) = match column {
            ItemColumn::Name => (row.name.clone(), NAME_WIDTH),
            ItemColumn::Value => (row.value.clone(), VALUE_WIDTH),
            ItemColumn::Cost => (row.cost.clone(), COST_WIDTH),
            ItemColumn::Bau => (
                if row.bau { "[x]" } else { "[ ]" }.to_owned(),
                BAU_WIDTH,
            ),
            ItemColumn::Delete => (DELETE_MARK.to_owned(), 1),
        };
        let being_edited = selected && editing.is_some() && editing == column.edit_field();
        let text = if being_edited {
            format!("{raw}{EDIT_CARET}")
        } else {
            raw
        };

        let style = if being_edited {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if selected {
            selected_style()
        } else if column == ItemColumn::Delete {
            Style::default().fg(Color::Red)
        } else if row.bau {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let cell = if being_edited {
            fit_cell_tail(&text, width)
        } else {
            fit_cell(&text, width)
        };
        spans.push(Span::styled(cell, style));
        if column != ItemColumn::Delete {
            spans.push(Span::raw(" "));
        }
    }
    Line::from(spans)
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn fit_cell(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        return format!("{value}{}", " ".repeat(width - count));
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated: String = value.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

// Cells under edit keep their tail visible so the caret stays on screen.
fn fit_cell_tail(value: &str, width: usize) -> String {
    let count = value.chars().count();
    if count <= width {
        return fit_cell(value, width);
    }
    if width == 0 {
        return String::new();
    }
    let mut truncated = String::from('…');
    truncated.extend(value.chars().skip(count - (width - 1)));
    truncated
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let (mode, default) = match state.mode {
        AppMode::Nav => (
            "NAV".to_owned(),
            "j/k h/l | enter toggle/edit | space bau | a add | d delete | f/b 1-4 tabs | ? help | q quit"
                .to_owned(),
        ),
        AppMode::Edit(field) => (
            format!("EDIT {}", field.label()),
            "type to edit | backspace | ctrl+u clear | enter/esc done".to_owned(),
        ),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {default}"),
        None => format!("{mode} | {default}"),
    }
}

fn help_overlay_text() -> &'static str {
    "j/k, up/down   move between themes and rows\n\
h/l, left/right move between columns\n\
g/G             first/last\n\
enter/space     expand or collapse a theme\n\
enter, i        edit initiative, value or cost\n\
space/enter     toggle BAU on the BAU column\n\
a               add initiative to the current theme\n\
d, delete       delete the selected initiative\n\
f/b, 1-4        switch tab\n\
?               close help\n\
q, ctrl+q       quit"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
