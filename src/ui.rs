use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use money_tracker::{
    now_millis, Config, Confirmation, Formatter, HistoryController, HistoryRow, KeyAction,
    KeypadController, Ledger, LedgerError,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use rust_decimal::Decimal;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Categories,
    Keypad,
    History,
}

impl Page {
    pub fn title(&self) -> &str {
        match self {
            Page::Categories => "Categories",
            Page::Keypad => "Keypad",
            Page::History => "History",
        }
    }
}

/// Where a key press wants the app to go next.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Nav {
    Stay,
    Quit,
    Categories,
    NewCategory(String),
    Keypad(String),
    History(String),
}

// ============================================================================
// SCREENS
// ============================================================================

pub struct CategoryRow {
    pub name: String,
    pub balance: Decimal,
    pub entries: usize,
}

pub struct Overview<L: Ledger> {
    ledger: L,
    pub rows: Vec<CategoryRow>,
    pub state: TableState,
    /// Name being typed for a new category
    pub naming: Option<String>,
}

impl<L: Ledger> Overview<L> {
    fn new(ledger: L) -> Self {
        Self {
            ledger,
            rows: Vec::new(),
            state: TableState::default(),
            naming: None,
        }
    }

    fn reload(&mut self, names: Vec<String>, selected: usize) -> Result<(), LedgerError> {
        let mut rows = Vec::with_capacity(names.len());
        for name in names {
            let entries = self.ledger.find_all(&name)?.len();
            let balance = self.ledger.balance(&name)?;
            rows.push(CategoryRow {
                name,
                balance,
                entries,
            });
        }
        self.rows = rows;
        self.state
            .select(if self.rows.is_empty() { None } else { Some(selected.min(self.rows.len() - 1)) });
        Ok(())
    }

    fn selected_name(&self) -> Option<String> {
        self.state
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|row| row.name.clone())
    }
}

/// Fields of the add-entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Date,
}

pub struct AddEntryForm {
    pub amount: String,
    pub date: String,
    pub field: FormField,
}

impl AddEntryForm {
    fn new(formatter: &Formatter) -> Self {
        Self {
            amount: String::new(),
            date: formatter.format_timestamp(now_millis()),
            field: FormField::Amount,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Amount => &mut self.amount,
            FormField::Date => &mut self.date,
        }
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            FormField::Amount => FormField::Date,
            FormField::Date => FormField::Amount,
        };
    }
}

pub struct HistoryScreen<L: Ledger> {
    pub controller: HistoryController<L>,
    pub state: TableState,
    pub form: Option<AddEntryForm>,
}

impl<L: Ledger> HistoryScreen<L> {
    fn new(controller: HistoryController<L>) -> Self {
        let mut state = TableState::default();
        state.select(Some(0));
        Self {
            controller,
            state,
            form: None,
        }
    }

    fn next(&mut self) {
        let len = self.controller.rows().len();
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.controller.rows().len();
        let i = match self.state.selected() {
            Some(0) | None => len.saturating_sub(1),
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn clamp_selection(&mut self) {
        let last = self.controller.rows().len().saturating_sub(1);
        let i = self.state.selected().unwrap_or(0).min(last);
        self.state.select(Some(i));
    }
}

pub enum Screen<L: Ledger> {
    Categories(Overview<L>),
    Keypad(KeypadController<L>),
    History(HistoryScreen<L>),
}

impl<L: Ledger> Screen<L> {
    fn page(&self) -> Page {
        match self {
            Screen::Categories(_) => Page::Categories,
            Screen::Keypad(_) => Page::Keypad,
            Screen::History(_) => Page::History,
        }
    }

    fn into_ledger(self) -> L {
        match self {
            Screen::Categories(overview) => overview.ledger,
            Screen::Keypad(keypad) => keypad.into_ledger(),
            Screen::History(history) => history.controller.into_ledger(),
        }
    }
}

// ============================================================================
// APP
// ============================================================================

pub struct App<L: Ledger> {
    screen: Option<Screen<L>>,
    config: Config,
    formatter: Formatter,
    /// Categories created this session that have no entries yet
    extra_categories: Vec<String>,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl<L: Ledger> App<L> {
    pub fn new(ledger: L, config: Config) -> Self {
        let formatter = Formatter::from_config(&config);
        let mut app = Self {
            screen: None,
            config,
            formatter,
            extra_categories: Vec::new(),
            status: None,
            should_quit: false,
        };
        app.show_categories(ledger, 0);
        app
    }

    pub fn page(&self) -> Option<Page> {
        self.screen.as_ref().map(Screen::page)
    }

    pub fn screen(&self) -> Option<&Screen<L>> {
        self.screen.as_ref()
    }

    fn category_names(&self, ledger: &L) -> Result<Vec<String>, LedgerError> {
        let mut names = self.config.categories.clone();
        let stored = ledger.categories()?;
        for name in self.extra_categories.iter().cloned().chain(stored) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn show_categories(&mut self, ledger: L, selected: usize) {
        let names = self.category_names(&ledger);
        let mut overview = Overview::new(ledger);
        if let Err(err) = names.and_then(|names| overview.reload(names, selected)) {
            self.report(err);
        }
        self.screen = Some(Screen::Categories(overview));
    }

    fn report(&mut self, err: LedgerError) {
        tracing::error!(%err, "ledger operation failed");
        self.status = Some(format!("Error: {}", err));
    }

    fn navigate(&mut self, nav: Nav) {
        if nav == Nav::Stay {
            return;
        }
        if nav == Nav::Quit {
            self.should_quit = true;
            return;
        }

        let Some(screen) = self.screen.take() else {
            return;
        };
        let previous = match &screen {
            Screen::Keypad(keypad) => Some(keypad.category().to_string()),
            Screen::History(history) => Some(history.controller.category().to_string()),
            Screen::Categories(_) => None,
        };
        let ledger = screen.into_ledger();

        match nav {
            Nav::Stay | Nav::Quit | Nav::Categories => {
                let names = self.category_names(&ledger).unwrap_or_default();
                let selected = previous
                    .and_then(|name| names.iter().position(|n| *n == name))
                    .unwrap_or(0);
                self.show_categories(ledger, selected);
            }
            Nav::NewCategory(name) => {
                if !self.extra_categories.contains(&name) {
                    self.extra_categories.push(name.clone());
                }
                self.screen = Some(Screen::Keypad(KeypadController::new(ledger, name)));
            }
            Nav::Keypad(category) => {
                self.screen = Some(Screen::Keypad(KeypadController::new(ledger, category)));
            }
            Nav::History(category) => {
                let mut controller = HistoryController::new(ledger, category);
                let resumed = controller.on_resume();
                self.screen = Some(Screen::History(HistoryScreen::new(controller)));
                if let Err(err) = resumed {
                    self.report(err);
                }
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        self.status = None;
        let formatter = &self.formatter;
        let status = &mut self.status;

        let result = match self.screen.as_mut() {
            Some(Screen::Categories(overview)) => Ok(handle_categories_key(overview, key)),
            Some(Screen::Keypad(keypad)) => handle_keypad_key(keypad, key),
            Some(Screen::History(history)) => handle_history_key(history, formatter, status, key),
            None => Ok(Nav::Stay),
        };

        self.collect_notices();
        match result {
            Ok(nav) => self.navigate(nav),
            Err(err) => self.report(err),
        }
    }

    fn collect_notices(&mut self) {
        let notices = match self.screen.as_mut() {
            Some(Screen::Keypad(keypad)) => keypad.take_notices(),
            Some(Screen::History(history)) => history.controller.take_notices(),
            _ => Vec::new(),
        };
        if let Some(notice) = notices.last() {
            self.status = Some(notice.to_string());
        }
    }
}

// ============================================================================
// KEY HANDLING
// ============================================================================

fn handle_categories_key<L: Ledger>(overview: &mut Overview<L>, key: KeyEvent) -> Nav {
    if let Some(name) = overview.naming.as_mut() {
        match key.code {
            KeyCode::Enter => {
                let name = name.trim().to_string();
                overview.naming = None;
                if !name.is_empty() {
                    return Nav::NewCategory(name);
                }
            }
            KeyCode::Esc => overview.naming = None,
            KeyCode::Backspace => {
                name.pop();
            }
            KeyCode::Char(c) => name.push(c),
            _ => {}
        }
        return Nav::Stay;
    }

    let len = overview.rows.len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Nav::Quit,
        KeyCode::Down | KeyCode::Char('j') if len > 0 => {
            let i = overview.state.selected().map_or(0, |i| (i + 1) % len);
            overview.state.select(Some(i));
        }
        KeyCode::Up | KeyCode::Char('k') if len > 0 => {
            let i = overview.state.selected().map_or(0, |i| (i + len - 1) % len);
            overview.state.select(Some(i));
        }
        KeyCode::Enter => {
            if let Some(name) = overview.selected_name() {
                return Nav::Keypad(name);
            }
        }
        KeyCode::Char('h') => {
            if let Some(name) = overview.selected_name() {
                return Nav::History(name);
            }
        }
        KeyCode::Char('n') => overview.naming = Some(String::new()),
        _ => {}
    }
    Nav::Stay
}

fn handle_keypad_key<L: Ledger>(
    keypad: &mut KeypadController<L>,
    key: KeyEvent,
) -> Result<Nav, LedgerError> {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => keypad.press_digit(c),
        KeyCode::Char('+') => {
            keypad.press_action(KeyAction::Plus)?;
        }
        KeyCode::Char('-') => {
            keypad.press_action(KeyAction::Minus)?;
        }
        KeyCode::Backspace | KeyCode::Char('c') | KeyCode::Char('C') => {
            keypad.press_action(KeyAction::Backspace)?;
        }
        KeyCode::Char('h') => return Ok(Nav::History(keypad.category().to_string())),
        KeyCode::Esc | KeyCode::Char('q') => return Ok(Nav::Categories),
        _ => {}
    }
    Ok(Nav::Stay)
}

fn handle_history_key<L: Ledger>(
    history: &mut HistoryScreen<L>,
    formatter: &Formatter,
    status: &mut Option<String>,
    key: KeyEvent,
) -> Result<Nav, LedgerError> {
    if history.form.is_some() {
        handle_form_key(history, formatter, status, key)?;
        return Ok(Nav::Stay);
    }

    if history.controller.pending().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => history.controller.confirm()?,
            KeyCode::Char('n') | KeyCode::Esc => history.controller.cancel(),
            _ => {}
        }
        history.clamp_selection();
        return Ok(Nav::Stay);
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => history.next(),
        KeyCode::Up | KeyCode::Char('k') => history.previous(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(i) = history.state.selected() {
                history.controller.request_delete(i);
            }
        }
        KeyCode::Char('D') => {
            history.controller.request_delete_all();
        }
        KeyCode::Char('a') => history.form = Some(AddEntryForm::new(formatter)),
        KeyCode::Enter => {
            let on_add_row = history
                .state
                .selected()
                .and_then(|i| history.controller.rows().get(i))
                .is_some_and(|row| *row == HistoryRow::AddEntry);
            if on_add_row {
                history.form = Some(AddEntryForm::new(formatter));
            }
        }
        KeyCode::Esc | KeyCode::Char('q') => return Ok(Nav::Categories),
        _ => {}
    }
    Ok(Nav::Stay)
}

fn handle_form_key<L: Ledger>(
    history: &mut HistoryScreen<L>,
    formatter: &Formatter,
    status: &mut Option<String>,
    key: KeyEvent,
) -> Result<(), LedgerError> {
    let Some(form) = history.form.as_mut() else {
        return Ok(());
    };

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
        KeyCode::Backspace => {
            form.active_mut().pop();
        }
        KeyCode::Char(c) => form.active_mut().push(c),
        KeyCode::Esc => {
            history.form = None;
            history.controller.on_return_from_add_entry(None, now_millis())?;
        }
        KeyCode::Enter => match formatter.parse_timestamp(&form.date) {
            Some(timestamp) => {
                let amount = std::mem::take(&mut form.amount);
                history.form = None;
                history
                    .controller
                    .on_return_from_add_entry(Some(&amount), timestamp)?;
                history.clamp_selection();
            }
            None => *status = Some(format!("Date is invalid: {}", form.date)),
        },
        _ => {}
    }
    Ok(())
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui<L: Ledger>(app: &mut App<L>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend, L: Ledger>(
    terminal: &mut Terminal<B>,
    app: &mut App<L>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn ui<L: Ledger>(f: &mut Frame, app: &mut App<L>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let formatter = app.formatter.clone();
    match app.screen.as_mut() {
        Some(Screen::Categories(overview)) => render_categories(f, chunks[1], overview, &formatter),
        Some(Screen::Keypad(keypad)) => render_keypad(f, chunks[1], keypad, &formatter),
        Some(Screen::History(history)) => render_history(f, chunks[1], history, &formatter),
        None => {}
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header<L: Ledger>(f: &mut Frame, area: Rect, app: &App<L>) {
    let current = app.page();

    let mut tab_spans = vec![];
    for (i, page) in [Page::Categories, Page::Keypad, Page::History].iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if Some(*page) == current {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    let category = match app.screen() {
        Some(Screen::Keypad(keypad)) => Some(keypad.category()),
        Some(Screen::History(history)) => Some(history.controller.category()),
        _ => None,
    };
    if let Some(category) = category {
        tab_spans.push(Span::raw("  |  "));
        tab_spans.push(Span::styled(
            category.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn amount_color(amount: &Decimal) -> Color {
    if amount.is_sign_negative() && !amount.is_zero() {
        Color::Red
    } else {
        Color::Green
    }
}

fn header_row(titles: &[&'static str]) -> Row<'static> {
    let cells = titles.iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    Row::new(cells).style(Style::default().bg(Color::DarkGray)).height(1)
}

fn render_categories<L: Ledger>(f: &mut Frame, area: Rect, overview: &mut Overview<L>, formatter: &Formatter) {
    let rows = overview.rows.iter().map(|row| {
        Row::new(vec![
            Cell::from(row.name.clone()),
            Cell::from(format!("{}", row.entries)),
            Cell::from(formatter.format_amount(&row.balance))
                .style(Style::default().fg(amount_color(&row.balance))),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [Constraint::Length(28), Constraint::Length(10), Constraint::Length(18)],
    )
    .header(header_row(&["Category", "Entries", "Balance"]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Categories "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut overview.state);

    if let Some(name) = &overview.naming {
        let popup = centered_rect(50, 5, area);
        let input = Paragraph::new(vec![Line::from(""), Line::from(format!("  {}_", name))]).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" New category "),
        );
        f.render_widget(Clear, popup);
        f.render_widget(input, popup);
    }
}

const KEYPAD_ROWS: [[&str; 3]; 5] = [
    ["7", "8", "9"],
    ["4", "5", "6"],
    ["1", "2", "3"],
    [".", "0", "C"],
    ["+", "-", ""],
];

fn render_keypad<L: Ledger>(f: &mut Frame, area: Rect, keypad: &KeypadController<L>, formatter: &Formatter) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let amount = keypad.amount();
    let balance = match keypad.balance() {
        Ok(balance) => Span::styled(formatter.format_amount(&balance), Style::default().fg(amount_color(&balance))),
        Err(_) => Span::styled("unavailable", Style::default().fg(Color::DarkGray)),
    };

    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Amount: ", label),
            Span::styled(amount.to_string(), Style::default().fg(amount_color(&amount))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Input:  ", label),
            Span::styled(keypad.input().to_string(), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from("  ─────────────────────────────────────"),
        Line::from(""),
        Line::from(vec![Span::styled("  Ledger balance: ", label), balance]),
    ];

    let summary = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", keypad.category())),
    );
    f.render_widget(summary, columns[0]);

    let mut pad = vec![Line::from("")];
    for keys in KEYPAD_ROWS {
        let mut spans = vec![Span::raw("   ")];
        for key in keys.iter().filter(|k| !k.is_empty()) {
            let style = if KeyAction::from_label(key).is_some() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!("[ {} ]", key), style));
            spans.push(Span::raw(" "));
        }
        pad.push(Line::from(spans));
        pad.push(Line::from(""));
    }

    let pad = Paragraph::new(pad).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Keypad "),
    );
    f.render_widget(pad, columns[1]);
}

fn render_history<L: Ledger>(f: &mut Frame, area: Rect, history: &mut HistoryScreen<L>, formatter: &Formatter) {
    let rows: Vec<Row> = history
        .controller
        .rows()
        .iter()
        .map(|row| match row {
            HistoryRow::Entry(entry) => Row::new(vec![
                Cell::from(formatter.format_timestamp(entry.timestamp)),
                Cell::from(formatter.format_amount(&entry.amount))
                    .style(Style::default().fg(amount_color(&entry.amount))),
            ]),
            HistoryRow::AddEntry => Row::new(vec![
                Cell::from("+ Add entry").style(Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
                Cell::from(""),
            ]),
        })
        .collect();

    let title = match history.controller.balance() {
        Ok(balance) => format!(" History - balance {} ", formatter.format_amount(&balance)),
        Err(_) => " History ".to_string(),
    };

    let table = Table::new(rows, [Constraint::Length(22), Constraint::Length(18)])
        .header(header_row(&["Date", "Amount"]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut history.state);

    if let Some(confirmation) = history.controller.pending() {
        render_confirmation(f, area, confirmation);
    }

    if let Some(form) = &history.form {
        render_add_entry_form(f, area, form);
    }
}

fn render_confirmation(f: &mut Frame, area: Rect, confirmation: Confirmation) {
    let popup = centered_rect(60, 7, area);
    let content = vec![
        Line::from(""),
        Line::from(format!("  {}", confirmation.message())),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y", Style::default().fg(Color::Yellow)),
            Span::raw(" OK   "),
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(format!(" {} ", confirmation.title())),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn render_add_entry_form(f: &mut Frame, area: Rect, form: &AddEntryForm) {
    let popup = centered_rect(50, 8, area);
    let field_style = |field: FormField| {
        if form.field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        }
    };
    let cursor = |field: FormField| if form.field == field { "_" } else { "" };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Amount: ", field_style(FormField::Amount)),
            Span::raw(format!("{}{}", form.amount, cursor(FormField::Amount))),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Date:   ", field_style(FormField::Date)),
            Span::raw(format!("{}{}", form.date, cursor(FormField::Date))),
        ]),
    ];

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Add entry "),
    );
    f.render_widget(Clear, popup);
    f.render_widget(dialog, popup);
}

fn render_status_bar<L: Ledger>(f: &mut Frame, area: Rect, app: &App<L>) {
    let mut status_spans = vec![];

    if let Some(message) = &app.status {
        status_spans.push(Span::styled(
            format!(" {} ", message),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw(" | "));
    }

    let hints: &[(&str, &str)] = match app.page() {
        Some(Page::Categories) => &[("Enter", " Keypad | "), ("h", " History | "), ("n", " New | "), ("q", " Quit")],
        Some(Page::Keypad) => &[("0-9 .", " Digits | "), ("+/-", " Commit | "), ("C", " Clear digit | "), ("h", " History | "), ("Esc", " Back")],
        Some(Page::History) => &[("a", " Add | "), ("d", " Delete | "), ("D", " Delete all | "), ("Esc", " Back")],
        None => &[],
    };
    for (key, text) in hints {
        status_spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(text.to_string()));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x.min(100)) / 100) as u16;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
