use std::mem;
use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, TableState, Wrap};
use ratatui::Frame;

use crate::models::Record;
use crate::store::{Outcome, RecordStore, StoreError};
use crate::viewer::{launch_viewer, ViewerError};

use super::forms::{describe_validation, Prompt, RecordField, RecordForm};
use super::helpers::{centered_rect, centered_strip, records_table, surface_error};
use super::screens::{MonthResults, Selection};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PgUp/PgDn.
const PAGE_STEP: isize = 10;

/// Which table fills the main area.
enum Screen {
    Records,
    MonthResults(MonthResults),
}

/// Modal state layered over the current screen.
enum Mode {
    Normal,
    AddingRecord(RecordForm),
    AskingMonth(Prompt),
    AskingLastName(Prompt),
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Application state for the terminal front-end. The record store is the
/// single owner of the data; everything drawn here is read from it on demand.
pub struct App {
    store: RecordStore,
    viewer: Option<PathBuf>,
    selection: Selection,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the app around an opened store. `load_error` is whatever the
    /// initial load reported; it is shown in the footer rather than aborting.
    pub fn new(store: RecordStore, viewer: Option<PathBuf>, load_error: Option<StoreError>) -> Self {
        let mut app = Self {
            store,
            viewer,
            selection: Selection::default(),
            screen: Screen::Records,
            mode: Mode::Normal,
            status: None,
        };
        if let Some(err) = load_error {
            app.set_status(
                format!("Could not load data: {}", surface_error(&err)),
                StatusKind::Error,
            );
        }
        app
    }

    /// Feed one key press into the state machine. Returns `true` when the user
    /// asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::AddingRecord(form) => self.handle_add_record(code, form),
            Mode::AskingMonth(prompt) => self.handle_month_prompt(code, prompt),
            Mode::AskingLastName(prompt) => self.handle_last_name_prompt(code, prompt),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        if let Screen::MonthResults(results) = &mut self.screen {
            match code {
                KeyCode::Char('q') => *exit = true,
                KeyCode::Esc => {
                    self.screen = Screen::Records;
                    self.clear_status();
                }
                KeyCode::Char('r') | KeyCode::Char('R') => self.show_all(),
                KeyCode::Up => results.move_selection(-1),
                KeyCode::Down => results.move_selection(1),
                KeyCode::PageUp => results.move_selection(-PAGE_STEP),
                KeyCode::PageDown => results.move_selection(PAGE_STEP),
                KeyCode::Home => results.selection.select_first(),
                KeyCode::End => results.selection.select_last(results.records.len()),
                _ => {}
            }
            return Mode::Normal;
        }

        let len = self.store.table().len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => *exit = true,
            KeyCode::Up => self.selection.move_by(-1, len),
            KeyCode::Down => self.selection.move_by(1, len),
            KeyCode::PageUp => self.selection.move_by(-PAGE_STEP, len),
            KeyCode::PageDown => self.selection.move_by(PAGE_STEP, len),
            KeyCode::Home => self.selection.select_first(),
            KeyCode::End => self.selection.select_last(len),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Mode::AddingRecord(RecordForm::default());
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.clear_status();
                return Mode::AskingMonth(Prompt::month());
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.clear_status();
                return Mode::AskingLastName(Prompt::last_name());
            }
            KeyCode::Char('v') | KeyCode::Char('V') => self.launch_viewer(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.show_all(),
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_record(&mut self, code: KeyCode, mut form: RecordForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add record cancelled.", StatusKind::Info);
                return Mode::Normal;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                if self.submit_record(&mut form) {
                    return Mode::Normal;
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::AddingRecord(form)
    }

    /// Try to store the form contents. Returns `true` when the form can close.
    fn submit_record(&mut self, form: &mut RecordForm) -> bool {
        let outcome = self.store.add(
            &form.last_name,
            &form.first_name,
            &form.phone,
            &form.birth_date,
        );

        match outcome {
            Ok(outcome) => {
                self.focus_last_named(form.last_name.trim());
                self.report_saved(&outcome, "Record added.".to_string());
                true
            }
            Err(err) => {
                let message = describe_validation(&err);
                form.error = Some(message.clone());
                self.set_status(message, StatusKind::Error);
                false
            }
        }
    }

    fn handle_month_prompt(&mut self, code: KeyCode, mut prompt: Prompt) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Enter => {
                let month = prompt.value.parse::<u32>().unwrap_or(0);
                match self.store.filter_by_month(month) {
                    Ok(records) if records.is_empty() => {
                        self.set_status(format!("No records for month {month}."), StatusKind::Info);
                        return Mode::Normal;
                    }
                    Ok(records) => {
                        self.set_status(
                            format!("{} record(s) born in month {month}.", records.len()),
                            StatusKind::Info,
                        );
                        self.screen = Screen::MonthResults(MonthResults::new(month, records));
                        return Mode::Normal;
                    }
                    Err(err) => prompt.error = Some(describe_validation(&err)),
                }
            }
            KeyCode::Char(ch) => {
                if prompt.push_char(ch) {
                    prompt.error = None;
                }
            }
            _ => {}
        }
        Mode::AskingMonth(prompt)
    }

    fn handle_last_name_prompt(&mut self, code: KeyCode, mut prompt: Prompt) -> Mode {
        match code {
            KeyCode::Esc => return Mode::Normal,
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Enter => {
                if !prompt.value.is_empty() {
                    self.delete_by_last_name(&prompt.value);
                }
                return Mode::Normal;
            }
            KeyCode::Char(ch) => {
                prompt.push_char(ch);
            }
            _ => {}
        }
        Mode::AskingLastName(prompt)
    }

    fn delete_by_last_name(&mut self, last_name: &str) {
        let outcome = self.store.delete_by_last_name(last_name);
        if outcome.affected == 0 {
            self.set_status(
                format!("No records with last name '{last_name}'."),
                StatusKind::Info,
            );
            return;
        }

        self.selection.ensure_in_bounds(self.store.table().len());
        let message = format!(
            "Deleted {} record(s) with last name '{last_name}'.",
            outcome.affected
        );
        self.report_saved(&outcome, message);
    }

    fn launch_viewer(&mut self) {
        match launch_viewer(self.store.path(), self.viewer.as_deref()) {
            Ok(_) => self.set_status("Viewer launched. Check the file!", StatusKind::Info),
            Err(err @ ViewerError::DataFileMissing(_)) => {
                self.set_status(surface_error(&err), StatusKind::Warning)
            }
            Err(err) => self.set_status(surface_error(&err), StatusKind::Error),
        }
    }

    /// Leave any search results and show the store's current table.
    fn show_all(&mut self) {
        self.screen = Screen::Records;
        self.selection.ensure_in_bounds(self.store.table().len());
        self.set_status(
            format!("Showing all {} record(s).", self.store.table().len()),
            StatusKind::Info,
        );
    }

    /// Put the cursor on the newest row with this last name. Equal names keep
    /// insertion order, so that is the last match.
    fn focus_last_named(&mut self, last_name: &str) {
        if let Some(idx) = self
            .store
            .table()
            .records()
            .iter()
            .rposition(|record| record.last_name == last_name)
        {
            self.selection.selected = idx;
        }
    }

    /// Status line for a mutation, downgraded to an error when the file could
    /// not be written.
    fn report_saved(&mut self, outcome: &Outcome, success: String) {
        match outcome.save_error() {
            Some(err) => self.set_status(
                format!("{success} Saving failed: {}", surface_error(err)),
                StatusKind::Error,
            ),
            None => self.set_status(success, StatusKind::Info),
        }
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

    pub(crate) fn draw(&self, frame: &mut Frame) {
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

        match &self.screen {
            Screen::Records => {
                let title = format!(" People ({}) ", self.store.table().len());
                self.draw_records(
                    frame,
                    content_area,
                    &title,
                    self.store.table().records(),
                    self.selection,
                );
            }
            Screen::MonthResults(results) => {
                let title = format!(
                    " Born in month {} ({}) ",
                    results.month,
                    results.records.len()
                );
                self.draw_records(
                    frame,
                    content_area,
                    &title,
                    &results.records,
                    results.selection,
                );
            }
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.mode {
            Mode::AddingRecord(form) => self.draw_record_form(frame, area, form),
            Mode::AskingMonth(prompt) => self.draw_prompt(frame, area, "Search by month", prompt),
            Mode::AskingLastName(prompt) => {
                self.draw_prompt(frame, area, "Delete by last name", prompt)
            }
            Mode::Normal => {}
        }
    }

    fn draw_records(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        records: &[Record],
        selection: Selection,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string());

        if records.is_empty() {
            let message = Paragraph::new("No records yet. Press '+' to add one.")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let table = records_table(records).block(block).row_highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let mut state = TableState::default().with_selected(Some(selection.selected));
        frame.render_stateful_widget(table, area, &mut state);
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

        let instructions = self.footer_instructions();

        let paragraph = Paragraph::new(vec![status_line, instructions]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let hints: &[(&str, &str)] = match (&self.screen, &self.mode) {
            (_, Mode::AddingRecord(_)) => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Save   "),
                ("[Esc]", " Cancel"),
            ],
            (_, Mode::AskingMonth(_)) | (_, Mode::AskingLastName(_)) => {
                &[("[Enter]", " Confirm   "), ("[Esc]", " Cancel")]
            }
            (Screen::MonthResults(_), _) => &[
                ("[↑↓]", " Select   "),
                ("[r]", " Show all   "),
                ("[Esc]", " Back   "),
                ("[q]", " Quit"),
            ],
            (Screen::Records, _) => &[
                ("[↑↓]", " Select   "),
                ("[+]", " Add   "),
                ("[m]", " Search by month   "),
                ("[-]", " Delete by last name   "),
                ("[v]", " Validate in viewer   "),
                ("[r]", " Show all   "),
                ("[q]", " Quit"),
            ],
        };

        let spans: Vec<Span<'static>> = hints
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(key.to_string(), key_style),
                    Span::raw(label.to_string()),
                ]
            })
            .collect();
        Line::from(spans)
    }

    fn draw_record_form(&self, frame: &mut Frame, area: Rect, form: &RecordForm) {
        let popup_area = centered_rect(70, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add Record").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = RecordField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        frame.set_cursor_position((
            inner.x + form.cursor_offset() as u16,
            inner.y + form.cursor_row() as u16,
        ));
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect, title: &str, prompt: &Prompt) {
        let popup_area = centered_strip(50, 4, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(title.to_string())
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![prompt.build_line()];
        if let Some(error) = &prompt.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        frame.set_cursor_position((inner.x + prompt.cursor_offset() as u16, inner.y));
    }
}
