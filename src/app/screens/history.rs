//! Saved explorations, newest first
//!
//! A table of records with a detail line for the highlighted one.

use crate::models::{CompletionReason, ExerciseRecord};
use crate::util::units::format_clock;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const COLUMNS: [&str; 6] = ["When", "Character", "Keys", "Time", "Keys/min", "Ended by"];

#[derive(Debug, Default)]
pub struct HistoryScreen {
    records: Vec<ExerciseRecord>,
    table: TableState,
    error_message: Option<String>,
}

/// Text for each column of one record's row
fn row_cells(record: &ExerciseRecord) -> [String; 6] {
    [
        record.timestamp.format("%d.%m %H:%M").to_string(),
        record.character.clone(),
        record.keystrokes.to_string(),
        format_clock(record.elapsed_seconds),
        format!("{:.0}", record.keys_per_minute()),
        record.reason.to_string(),
    ]
}

fn reason_color(reason: CompletionReason) -> Color {
    match reason {
        CompletionReason::TimeLimit => Color::Yellow,
        CompletionReason::KeystrokeLimit => Color::Green,
    }
}

impl HistoryScreen {
    pub fn new(records: Vec<ExerciseRecord>) -> Self {
        let mut screen = Self::default();
        screen.set_records(records);
        screen
    }

    /// Replace the listed records and highlight the newest
    pub fn set_records(&mut self, records: Vec<ExerciseRecord>) {
        self.table
            .select(if records.is_empty() { None } else { Some(0) });
        self.records = records;
        self.error_message = None;
    }

    /// Show why the records could not be loaded
    pub fn set_error(&mut self, message: String) {
        self.records.clear();
        self.table.select(None);
        self.error_message = Some(message);
    }

    pub fn records(&self) -> &[ExerciseRecord] {
        &self.records
    }

    pub fn selected_record(&self) -> Option<&ExerciseRecord> {
        self.table.selected().and_then(|i| self.records.get(i))
    }

    pub fn select_previous(&mut self) {
        self.step(self.records.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        self.step(1);
    }

    // Wraps around both ends
    fn step(&mut self, by: usize) {
        let len = self.records.len();
        if len == 0 {
            return;
        }
        let current = self.table.selected().unwrap_or(0);
        self.table.select(Some((current + by) % len));
    }

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(f.size());

        self.render_table(f, chunks[0]);
        self.render_detail(f, chunks[1]);
        f.render_widget(
            Paragraph::new(" ↑↓ move   Esc back").style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }

    fn render_table(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Past explorations ({}) ", self.records.len()))
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        if let Some(error) = &self.error_message {
            let text = Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .block(block);
            f.render_widget(text, area);
            return;
        }
        if self.records.is_empty() {
            let text = Paragraph::new("Nothing saved yet. Finish an exploration and choose Save.")
                .block(block);
            f.render_widget(text, area);
            return;
        }

        let rows = self.records.iter().map(|record| {
            let [when, character, keys, time, pace, reason] = row_cells(record);
            Row::new(vec![
                Cell::from(when),
                Cell::from(character),
                Cell::from(keys),
                Cell::from(time),
                Cell::from(pace),
                Cell::from(reason).style(Style::default().fg(reason_color(record.reason))),
            ])
        });
        let widths = [
            Constraint::Length(11),
            Constraint::Min(10),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(16),
        ];

        let table = Table::new(rows, widths)
            .header(
                Row::new(COLUMNS)
                    .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
            )
            .block(block)
            .highlight_style(Style::default().bg(Color::Cyan).fg(Color::Black))
            .highlight_symbol("> ");

        f.render_stateful_widget(table, area, &mut self.table);
    }

    fn render_detail(&self, f: &mut Frame, area: Rect) {
        let line = match self.selected_record() {
            Some(record) => Line::from(vec![
                Span::styled(
                    record.character.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    " pressed {} keys in {} ({:.1} per minute), stopped by the ",
                    record.keystrokes,
                    format_clock(record.elapsed_seconds),
                    record.keys_per_minute()
                )),
                Span::styled(
                    record.reason.to_string(),
                    Style::default().fg(reason_color(record.reason)),
                ),
            ]),
            None => Line::from(""),
        };
        f.render_widget(
            Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}
