//! Ratatui-based terminal UI.
//!
//! The TUI provides a controls panel (date, revenue and net-income bounds,
//! sort column and order), then renders the displayed records as a table and
//! a line chart. Edits only touch the draft constraints; `f` and `s` apply them.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
    Terminal,
};

use crate::app::state::{Action, ViewState};
use crate::data::FmpClient;
use crate::domain::{Constraints, FinancialRecord};
use crate::engine::FilterSet;
use crate::error::{AppError, FetchError};
use crate::report::{chart_series, table_rows, TABLE_HEADERS};

mod plotters_chart;

use plotters_chart::LinePlottersChart;

type FetchResult = Result<Vec<FinancialRecord>, FetchError>;

/// Start the TUI for `symbol`.
pub fn run(symbol: &str) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(symbol);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Editable controls, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    DateStart,
    DateEnd,
    RevenueMin,
    RevenueMax,
    NetIncomeMin,
    NetIncomeMax,
    SortColumn,
    SortOrder,
}

impl Field {
    const ALL: [Field; 8] = [
        Field::DateStart,
        Field::DateEnd,
        Field::RevenueMin,
        Field::RevenueMax,
        Field::NetIncomeMin,
        Field::NetIncomeMax,
        Field::SortColumn,
        Field::SortOrder,
    ];

    fn label(self) -> &'static str {
        match self {
            Field::DateStart => "Date from",
            Field::DateEnd => "Date to",
            Field::RevenueMin => "Revenue min (B)",
            Field::RevenueMax => "Revenue max (B)",
            Field::NetIncomeMin => "Net inc. min (B)",
            Field::NetIncomeMax => "Net inc. max (B)",
            Field::SortColumn => "Sort by",
            Field::SortOrder => "Order",
        }
    }

    fn is_text(self) -> bool {
        !matches!(self, Field::SortColumn | Field::SortOrder)
    }

    fn is_date(self) -> bool {
        matches!(self, Field::DateStart | Field::DateEnd)
    }

    /// Whether `c` may be typed into this field.
    fn accepts(self, c: char) -> bool {
        if self.is_date() {
            c.is_ascii_digit() || c == '-'
        } else {
            c.is_ascii_digit() || c == '-' || c == '.'
        }
    }

    fn text(self, draft: &Constraints) -> &str {
        match self {
            Field::DateStart => draft.date_range.start.as_str(),
            Field::DateEnd => draft.date_range.end.as_str(),
            Field::RevenueMin => draft.revenue_range.min.as_str(),
            Field::RevenueMax => draft.revenue_range.max.as_str(),
            Field::NetIncomeMin => draft.net_income_range.min.as_str(),
            Field::NetIncomeMax => draft.net_income_range.max.as_str(),
            Field::SortColumn => draft.sort_column.display_name(),
            Field::SortOrder => draft.sort_order.display_name(),
        }
    }

    fn text_mut(self, draft: &mut Constraints) -> Option<&mut String> {
        match self {
            Field::DateStart => Some(&mut draft.date_range.start),
            Field::DateEnd => Some(&mut draft.date_range.end),
            Field::RevenueMin => Some(&mut draft.revenue_range.min),
            Field::RevenueMax => Some(&mut draft.revenue_range.max),
            Field::NetIncomeMin => Some(&mut draft.net_income_range.min),
            Field::NetIncomeMax => Some(&mut draft.net_income_range.max),
            Field::SortColumn | Field::SortOrder => None,
        }
    }
}

struct App {
    symbol: String,
    state: ViewState,
    selected_field: usize,
    /// Text being typed into the selected field; `None` when not editing.
    edit_buffer: Option<String>,
    table_scroll: usize,
    fetch_rx: Option<Receiver<FetchResult>>,
}

impl App {
    fn new(symbol: &str) -> Self {
        let mut state = ViewState::new();
        state.set_status(format!("Fetching {symbol} income statements..."));
        Self {
            symbol: symbol.to_string(),
            state,
            selected_field: 0,
            edit_buffer: None,
            table_scroll: 0,
            fetch_rx: Some(spawn_fetch(symbol.to_string())),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.poll_fetch() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Deliver a finished fetch to the state. Returns true when something arrived.
    fn poll_fetch(&mut self) -> bool {
        let Some(rx) = &self.fetch_rx else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(FetchError::Request("fetch worker exited without a result".to_string()))
            }
        };
        self.fetch_rx = None;
        self.state.dispatch(Action::FetchCompleted(result));
        true
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.edit_buffer.is_some() {
            self.handle_edit(code);
            return false;
        }

        let field = Field::ALL[self.selected_field];
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < Field::ALL.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.cycle_selector(field, false),
            KeyCode::Right => self.cycle_selector(field, true),
            KeyCode::Enter => {
                if field.is_text() {
                    self.edit_buffer = Some(field.text(&self.state.draft).to_string());
                    let hint = if field.is_date() { "YYYY-MM-DD" } else { "billions" };
                    self.state.set_status(format!(
                        "Editing {} ({hint}). Enter to keep, Esc to cancel.",
                        field.label()
                    ));
                } else {
                    self.cycle_selector(field, true);
                }
            }
            KeyCode::Delete => {
                if let Some(text) = field.text_mut(&mut self.state.draft) {
                    text.clear();
                    self.state.set_status(format!("{} cleared (not applied yet).", field.label()));
                }
            }
            KeyCode::Char('f') => {
                self.state.dispatch(Action::ApplyFilters);
                self.table_scroll = 0;
            }
            KeyCode::Char('s') => {
                self.state.dispatch(Action::ApplySort);
                self.table_scroll = 0;
            }
            KeyCode::Char('e') => self.export(),
            KeyCode::PageDown | KeyCode::Char('j') => {
                let max = self.state.displayed().len().saturating_sub(1);
                self.table_scroll = (self.table_scroll + 1).min(max);
            }
            KeyCode::PageUp | KeyCode::Char('k') => {
                self.table_scroll = self.table_scroll.saturating_sub(1);
            }
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let field = Field::ALL[self.selected_field];
        let Some(buffer) = self.edit_buffer.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.edit_buffer = None;
                self.state.set_status("Edit canceled.");
            }
            KeyCode::Enter => {
                let value = buffer.trim().to_string();
                self.edit_buffer = None;
                if let Some(text) = field.text_mut(&mut self.state.draft) {
                    *text = value;
                }
                let hint = self.draft_hint(field);
                self.state.set_status(hint);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if field.accepts(c) && buffer.len() < 16 {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    /// Status after committing a text field to the draft.
    fn draft_hint(&self, field: Field) -> String {
        let filters = FilterSet::parse(&self.state.draft);
        let group_active = match field {
            Field::DateStart | Field::DateEnd => filters.date.is_some(),
            Field::RevenueMin | Field::RevenueMax => filters.revenue.is_some(),
            Field::NetIncomeMin | Field::NetIncomeMax => filters.net_income.is_some(),
            Field::SortColumn | Field::SortOrder => true,
        };
        if group_active {
            format!("{} set. Press f to apply filters.", field.label())
        } else {
            format!("{} set; range inactive until both bounds are valid.", field.label())
        }
    }

    fn cycle_selector(&mut self, field: Field, forward: bool) {
        let draft = &mut self.state.draft;
        match field {
            Field::SortColumn => {
                draft.sort_column = if forward {
                    draft.sort_column.next()
                } else {
                    draft.sort_column.prev()
                };
            }
            Field::SortOrder => draft.sort_order = draft.sort_order.toggle(),
            _ => return,
        }
        let (column, order) = (draft.sort_column, draft.sort_order);
        self.state.set_status(format!(
            "Sort: {} ({}). Press s to apply.",
            column.display_name(),
            order.display_name()
        ));
    }

    fn export(&mut self) {
        let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = PathBuf::from(format!("fins_{}_{ts}.csv", self.symbol));
        match crate::io::write_records_csv(&path, self.state.displayed()) {
            Ok(()) => {
                self.state.set_status(format!(
                    "Exported {} records to {}",
                    self.state.displayed().len(),
                    path.display()
                ));
            }
            Err(err) => self.state.set_status(format!("Export failed: {err}")),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("fins", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" - {} annual income statements", self.symbol)),
        ]));

        let applied = self.state.applied();
        let active = FilterSet::parse(&applied.filters).active_count();
        let sort = applied
            .sort
            .map(|(c, o)| format!("{} ({})", c.display_name(), o.display_name()))
            .unwrap_or_else(|| "source order".to_string());
        let loaded = if self.state.is_loaded() {
            format!("{} of {}", self.state.displayed().len(), self.state.records().len())
        } else if self.fetch_rx.is_some() {
            "loading".to_string()
        } else {
            "-".to_string()
        };
        lines.push(Line::from(Span::styled(
            format!("records: {loaded} | filters: {active} active | sort: {sort}"),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(0)])
            .split(area);

        self.draw_controls(frame, columns[0]);

        let rows = u16::try_from(self.state.displayed().len()).unwrap_or(u16::MAX);
        let table_height = rows.saturating_add(3).max(5).min(columns[1].height / 2);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(table_height), Constraint::Min(0)])
            .split(columns[1]);

        self.draw_table(frame, right[0]);
        self.draw_chart(frame, right[1]);
    }

    fn draw_controls(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let draft = &self.state.draft;
        let items: Vec<ListItem> = Field::ALL
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let value = match (&self.edit_buffer, idx == self.selected_field) {
                    (Some(buffer), true) => format!("{buffer}_"),
                    _ => {
                        let text = field.text(draft);
                        if text.is_empty() { "-".to_string() } else { text.to_string() }
                    }
                };
                ListItem::new(format!("{:<17}{value}", field.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Controls").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.edit_buffer.is_some() {
            let hint = Paragraph::new("Editing…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(TABLE_HEADERS.map(|h| Cell::from(h)))
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = table_rows(self.state.displayed())
            .into_iter()
            .skip(self.table_scroll)
            .map(|row| Row::new(row.cells().map(|c| Cell::from(c.to_string()))))
            .collect();

        let widths = [
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(13),
            Constraint::Length(7),
            Constraint::Min(10),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Income statements").borders(Borders::ALL));
        frame.render_widget(table, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chart = chart_series(self.state.displayed());

        let mut title = vec![Span::raw("Chart ")];
        for s in &chart.series {
            let (r, g, b) = s.color;
            title.push(Span::styled(format!("■ {} ", s.label), Style::default().fg(Color::Rgb(r, g, b))));
        }
        let block = Block::default().title(Line::from(title)).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        if chart.is_empty() {
            let msg = if self.state.is_loaded() { "No records match." } else { "Waiting for data..." };
            let msg = Paragraph::new(msg)
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        }

        let widget = LinePlottersChart {
            labels: &chart.labels,
            series: &chart.series,
            y_bounds: chart.y_bounds(),
            y_label: "billions",
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  Enter edit  ←/→ cycle  Del clear  f filter  s sort  j/k scroll  e export  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(self.state.status(), Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Run the single fetch on a worker thread so the UI stays interactive.
fn spawn_fetch(symbol: String) -> Receiver<FetchResult> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let result = FmpClient::from_env(&symbol).and_then(|client| client.fetch());
        // The receiver is gone only if the UI already quit.
        let _ = tx.send(result);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(result: FetchResult) -> App {
        let (tx, rx) = mpsc::channel();
        tx.send(result).unwrap();
        App {
            symbol: "AAPL".to_string(),
            state: ViewState::new(),
            selected_field: 0,
            edit_buffer: None,
            table_scroll: 0,
            fetch_rx: Some(rx),
        }
    }

    fn rec(date: &str, revenue_bn: i64) -> FinancialRecord {
        FinancialRecord {
            date: date.to_string(),
            revenue: revenue_bn * 1_000_000_000,
            net_income: 0,
            gross_profit: 0,
            eps: 0.0,
            operating_income: 0,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        app.handle_key(KeyCode::Enter);
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
    }

    #[test]
    fn fetch_failure_keeps_ui_running_with_empty_view() {
        let mut app = app_with(Err(FetchError::Status(401)));
        assert!(app.poll_fetch());
        assert!(app.fetch_rx.is_none());
        assert!(app.state.displayed().is_empty());
        assert!(app.state.status().contains("401"));
        assert!(!app.handle_key(KeyCode::Char('f')));
    }

    #[test]
    fn typed_bounds_apply_only_on_f() {
        let mut app = app_with(Ok(vec![rec("2020-01-01", 1), rec("2021-01-01", 5), rec("2022-01-01", 10)]));
        app.poll_fetch();

        app.selected_field = 2;
        type_text(&mut app, "2");
        app.handle_key(KeyCode::Down);
        type_text(&mut app, "8");
        assert_eq!(app.state.draft.revenue_range.max, "8");
        assert_eq!(app.state.displayed().len(), 3);

        app.handle_key(KeyCode::Char('f'));
        assert_eq!(app.state.displayed().len(), 1);
        assert_eq!(app.state.displayed()[0].date, "2021-01-01");
    }

    #[test]
    fn edit_mode_swallows_hotkeys_and_rejects_letters() {
        let mut app = app_with(Ok(vec![rec("2020-01-01", 1)]));
        app.poll_fetch();

        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Char('q')));
        app.handle_key(KeyCode::Char('2'));
        app.handle_key(KeyCode::Esc);
        assert_eq!(app.state.draft.date_range.start, "");
        assert!(app.edit_buffer.is_none());
    }

    #[test]
    fn selectors_cycle_and_sort_applies_on_s() {
        let mut app = app_with(Ok(vec![rec("2020-01-01", 1), rec("2022-01-01", 10), rec("2021-01-01", 5)]));
        app.poll_fetch();

        app.selected_field = 6;
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Down);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.state.draft.sort_column, crate::domain::SortColumn::Revenue);
        assert_eq!(app.state.draft.sort_order, crate::domain::SortOrder::Desc);
        assert_eq!(app.state.displayed()[0].date, "2020-01-01");

        app.handle_key(KeyCode::Char('s'));
        let dates: Vec<&str> = app.state.displayed().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["2022-01-01", "2021-01-01", "2020-01-01"]);
    }
}
