//! Interactive grid screen.
//!
//! The event loop owns UI state (mode, cursor column, scroll offset) and
//! drives a `GridApp` for everything else. Remote calls triggered by a
//! keystroke are blocked on right there, so the screen never renders a
//! state the server hasn't confirmed.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use odgrid_engine::worksheet;
use odgrid_types::{FieldMap, Gateway};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row as TableRow, Table},
};
use tokio::runtime::Runtime;

use crate::app::GridApp;
use crate::handlers::export::write_csv;

enum Mode {
    Normal,
    Edit { buffer: String },
    Filter { buffer: String },
}

#[derive(Clone, Copy)]
enum ModeTag {
    Normal,
    Edit,
    Filter,
}

pub fn run<G: Gateway>(runtime: &Runtime, mut app: GridApp<'_, G>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = GridScreen::new().event_loop(&mut terminal, runtime, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

struct GridScreen {
    mode: Mode,
    column: usize,
    row_offset: usize,
    should_quit: bool,
}

impl GridScreen {
    fn new() -> Self {
        GridScreen {
            mode: Mode::Normal,
            column: 0,
            row_offset: 0,
            should_quit: false,
        }
    }

    fn event_loop<G: Gateway>(
        mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        runtime: &Runtime,
        app: &mut GridApp<'_, G>,
    ) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f, app))?;

            // Poll with a timeout so status updates repaint promptly
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key, runtime, app);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key<G: Gateway>(&mut self, key: KeyEvent, runtime: &Runtime, app: &mut GridApp<'_, G>) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let tag = match &self.mode {
            Mode::Normal => ModeTag::Normal,
            Mode::Edit { .. } => ModeTag::Edit,
            Mode::Filter { .. } => ModeTag::Filter,
        };
        match tag {
            ModeTag::Normal => self.handle_normal_key(key.code, runtime, app),
            ModeTag::Edit => self.handle_edit_key(key.code, runtime, app),
            ModeTag::Filter => self.handle_filter_key(key.code, runtime, app),
        }
    }

    fn handle_normal_key<G: Gateway>(
        &mut self,
        code: KeyCode,
        runtime: &Runtime,
        app: &mut GridApp<'_, G>,
    ) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Right | KeyCode::Char('l') => {
                if self.column + 1 < app.dataset.columns.len() {
                    self.column += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.column = self.column.saturating_sub(1);
            }
            KeyCode::Tab => self.next_editable_column(app),
            KeyCode::Enter | KeyCode::Char('e') => self.enter_edit(app),
            KeyCode::Char('w') => runtime.block_on(app.save()),
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Char('s') => {
                if let Some(field) = self.field(app) {
                    runtime.block_on(app.toggle_sort(&field));
                }
            }
            KeyCode::Char('/') => {
                if let Some(field) = self.field(app) {
                    let buffer = app.filter.get(&field).unwrap_or_default().to_string();
                    self.mode = Mode::Filter { buffer };
                }
            }
            KeyCode::Char('d') => runtime.block_on(app.delete_selected()),
            KeyCode::Char('a') => runtime.block_on(app.create(FieldMap::new())),
            KeyCode::Char('x') => self.export(app),
            KeyCode::Char('r') => runtime.block_on(app.refresh()),
            _ => {}
        }
    }

    fn handle_edit_key<G: Gateway>(
        &mut self,
        code: KeyCode,
        runtime: &Runtime,
        app: &mut GridApp<'_, G>,
    ) {
        let Some(field) = self.field(app) else {
            self.mode = Mode::Normal;
            return;
        };
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                // Commit this cell, then persist the whole row
                if let Mode::Edit { buffer } = std::mem::replace(&mut self.mode, Mode::Normal) {
                    app.commit_cell(&field, &buffer);
                }
                runtime.block_on(app.save());
            }
            KeyCode::Tab => {
                // Commit this cell and hop to the next editable one
                if let Mode::Edit { buffer } = std::mem::replace(&mut self.mode, Mode::Normal) {
                    app.commit_cell(&field, &buffer);
                }
                self.next_editable_column(app);
                self.enter_edit(app);
            }
            KeyCode::BackTab => {
                if let Mode::Edit { buffer } = std::mem::replace(&mut self.mode, Mode::Normal) {
                    app.commit_cell(&field, &buffer);
                }
                self.prev_editable_column(app);
                self.enter_edit(app);
            }
            KeyCode::Up => self.cycle_choice(app, &field, -1),
            KeyCode::Down => self.cycle_choice(app, &field, 1),
            KeyCode::Backspace => {
                if let Mode::Edit { buffer } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Edit { buffer } = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_filter_key<G: Gateway>(
        &mut self,
        code: KeyCode,
        runtime: &Runtime,
        app: &mut GridApp<'_, G>,
    ) {
        match code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let Some(field) = self.field(app) else {
                    self.mode = Mode::Normal;
                    return;
                };
                if let Mode::Filter { buffer } = std::mem::replace(&mut self.mode, Mode::Normal) {
                    runtime.block_on(app.apply_filter(&field, &buffer));
                }
            }
            KeyCode::Backspace => {
                if let Mode::Filter { buffer } = &mut self.mode {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Mode::Filter { buffer } = &mut self.mode {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn field<G: Gateway>(&self, app: &GridApp<'_, G>) -> Option<String> {
        app.dataset
            .columns
            .get(self.column)
            .map(|c| c.field.clone())
    }

    fn next_editable_column<G: Gateway>(&mut self, app: &GridApp<'_, G>) {
        let count = app.dataset.columns.len();
        if count == 0 {
            return;
        }
        for step in 1..=count {
            let index = (self.column + step) % count;
            if app.dataset.columns[index].editable {
                self.column = index;
                return;
            }
        }
    }

    fn prev_editable_column<G: Gateway>(&mut self, app: &GridApp<'_, G>) {
        let count = app.dataset.columns.len();
        if count == 0 {
            return;
        }
        for step in 1..=count {
            let index = (self.column + count - step) % count;
            if app.dataset.columns[index].editable {
                self.column = index;
                return;
            }
        }
    }

    fn enter_edit<G: Gateway>(&mut self, app: &mut GridApp<'_, G>) {
        let Some(column) = app.dataset.columns.get(self.column).cloned() else {
            return;
        };
        if !column.editable {
            app.log(format!("{} is read-only", column.header));
            return;
        }
        let Some(id) = app.rows.id_at(app.selected) else {
            return;
        };
        if !app.session.is_editing(&id) {
            app.begin_edit_selected();
        }
        let buffer = app.pending_text(&column.field);
        self.mode = Mode::Edit { buffer };
    }

    /// Step the buffer through an enumerated column's closed option set.
    fn cycle_choice<G: Gateway>(&mut self, app: &GridApp<'_, G>, field: &str, step: i64) {
        let Some(column) = app.dataset.column(field) else {
            return;
        };
        let options = match self.mode {
            Mode::Edit { .. } => app.effective_kind(column).options().to_vec(),
            _ => return,
        };
        if options.is_empty() {
            return;
        }
        if let Mode::Edit { buffer } = &mut self.mode {
            let current = options.iter().position(|c| c.value == *buffer);
            let next = match current {
                Some(i) => (i as i64 + step).rem_euclid(options.len() as i64) as usize,
                None => 0,
            };
            *buffer = options[next].value.clone();
        }
    }

    fn export<G: Gateway>(&mut self, app: &mut GridApp<'_, G>) {
        let sheet = worksheet(&app.dataset.name, app.rows.rows());
        let path = PathBuf::from(format!("{}.csv", app.dataset.name));
        match write_csv(&sheet, &path) {
            Ok(()) => app.log(format!(
                "Exported {} row(s) to {}",
                sheet.records.len(),
                path.display()
            )),
            Err(e) => app.log(format!("Export failed: {}", e)),
        }
    }

    fn render<G: Gateway>(&mut self, f: &mut Frame, app: &GridApp<'_, G>) {
        let chunks = Layout::vertical([
            Constraint::Min(5),    // grid
            Constraint::Length(4), // status / input prompt
            Constraint::Length(1), // key help
        ])
        .split(f.area());

        self.render_table(f, chunks[0], app);
        self.render_status(f, chunks[1], app);
        self.render_help(f, chunks[2]);
    }

    fn render_table<G: Gateway>(&mut self, f: &mut Frame, area: Rect, app: &GridApp<'_, G>) {
        let visible = area.height.saturating_sub(3) as usize;
        if visible > 0 {
            if app.selected < self.row_offset {
                self.row_offset = app.selected;
            } else if app.selected >= self.row_offset + visible {
                self.row_offset = app.selected + 1 - visible;
            }
        }

        let header_cells: Vec<Cell> = app
            .dataset
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let marker = match app.sort.direction(&column.field) {
                    Some(false) => " ^",
                    Some(true) => " v",
                    None => "",
                };
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                if i == self.column {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::UNDERLINED);
                }
                Cell::from(format!("{}{}", column.header, marker)).style(style)
            })
            .collect();

        let rows: Vec<TableRow> = app
            .rows
            .rows()
            .iter()
            .enumerate()
            .skip(self.row_offset)
            .take(visible.max(1))
            .map(|(i, row)| {
                let id = app.rows.id_at(i);
                let editing = id
                    .as_ref()
                    .map(|id| app.session.is_editing(id))
                    .unwrap_or(false);

                let cells: Vec<Cell> = app
                    .dataset
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(ci, column)| {
                        let active = i == app.selected && ci == self.column;
                        let text = if editing && column.editable {
                            if active && let Mode::Edit { buffer } = &self.mode {
                                format!("{}|", buffer)
                            } else {
                                app.pending_text(&column.field)
                            }
                        } else {
                            app.display_value(row, column)
                        };

                        let mut style = Style::default();
                        if editing && column.editable {
                            style = style.fg(Color::Yellow);
                        }
                        if active && matches!(self.mode, Mode::Edit { .. }) {
                            style = style.add_modifier(Modifier::BOLD);
                        }
                        Cell::from(text).style(style)
                    })
                    .collect();

                let mut row_style = Style::default();
                if i == app.selected {
                    row_style = row_style.add_modifier(Modifier::REVERSED);
                }
                TableRow::new(cells).style(row_style)
            })
            .collect();

        let widths: Vec<Constraint> = app
            .dataset
            .columns
            .iter()
            .map(|c| Constraint::Length(c.width.unwrap_or(16)))
            .collect();

        let mut title = format!(" {} ({} rows) ", app.dataset.name, app.rows.len());
        if let Some(clause) = app.filter.to_filter() {
            title = format!(" {} ({} rows, filter: {}) ", app.dataset.name, app.rows.len(), clause);
        }

        let table = Table::new(rows, widths)
            .header(TableRow::new(header_cells).height(1))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(table, area);
    }

    fn render_status<G: Gateway>(&self, f: &mut Frame, area: Rect, app: &GridApp<'_, G>) {
        let mut lines: Vec<String> = Vec::new();

        match &self.mode {
            Mode::Edit { buffer } => {
                let field = self.field(app).unwrap_or_default();
                lines.push(format!("Edit {}: {}|", field, buffer));
            }
            Mode::Filter { buffer } => {
                let field = self.field(app).unwrap_or_default();
                lines.push(format!("Filter {}: {}|", field, buffer));
            }
            Mode::Normal => {}
        }

        let tail = app.status().iter().rev().take(2 - lines.len().min(1));
        let mut recent: Vec<String> = tail.cloned().collect();
        recent.reverse();
        lines.extend(recent);

        let paragraph = Paragraph::new(lines.join("\n"))
            .block(Block::default().borders(Borders::ALL).title(" Status "));
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help = match self.mode {
            Mode::Normal => {
                "q quit | arrows move | e edit | Tab next cell | w save | Esc cancel | s sort | / filter | a add | d delete | x export | r refresh"
            }
            Mode::Edit { .. } => {
                "Enter save row | Tab/Shift-Tab next/prev cell | Up/Down choice | Esc back"
            }
            Mode::Filter { .. } => "Enter apply (empty clears) | Esc back",
        };
        let paragraph =
            Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
        f.render_widget(paragraph, area);
    }
}
