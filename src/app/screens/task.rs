//! Task screen implementation
//!
//! Reached through the exercise's Next button. Summarizes the finished
//! exploration and offers to save it before returning to the menu.

use crate::models::ExerciseRecord;
use crate::util::units::{format_clock, format_duration};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use std::time::Duration;

/// Available actions on the task screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Save,
    Back,
}

impl TaskAction {
    pub const ALL: [TaskAction; 2] = [TaskAction::Save, TaskAction::Back];

    /// Get display text for the action
    pub fn display_text(self) -> &'static str {
        match self {
            Self::Save => "Save Record",
            Self::Back => "Back to Menu",
        }
    }
}

/// Outcome of the last save attempt
#[derive(Debug, Clone, PartialEq, Eq)]
enum SaveStatus {
    Saved(String),
    Failed(String),
}

/// Task screen component
#[derive(Debug)]
pub struct TaskScreen {
    record: Option<ExerciseRecord>,
    save_status: Option<SaveStatus>,
    selected_action: TaskAction,
}

impl TaskScreen {
    pub fn new() -> Self {
        Self {
            record: None,
            save_status: None,
            selected_action: TaskAction::Save,
        }
    }

    /// Show a newly finished exercise
    pub fn set_record(&mut self, record: ExerciseRecord) {
        self.record = Some(record);
        self.save_status = None;
        self.selected_action = TaskAction::Save;
    }

    pub fn record(&self) -> Option<&ExerciseRecord> {
        self.record.as_ref()
    }

    /// Whether the current record has been saved
    pub fn is_saved(&self) -> bool {
        matches!(self.save_status, Some(SaveStatus::Saved(_)))
    }

    pub fn complete_save(&mut self, outcome: crate::Result<()>) {
        self.save_status = Some(match outcome {
            Ok(()) => SaveStatus::Saved("Record saved!".to_string()),
            Err(e) => {
                tracing::error!("Saving record failed: {}", e);
                SaveStatus::Failed(format!("Error: {}", crate::error::user_friendly_message(&e)))
            }
        });
    }

    pub fn save_message(&self) -> Option<&str> {
        match &self.save_status {
            Some(SaveStatus::Saved(message)) | Some(SaveStatus::Failed(message)) => {
                Some(message.as_str())
            }
            None => None,
        }
    }

    pub fn selected_action(&self) -> TaskAction {
        self.selected_action
    }

    /// Select next action
    pub fn select_next_action(&mut self) {
        let index = TaskAction::ALL
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        self.selected_action = TaskAction::ALL[(index + 1) % TaskAction::ALL.len()];
    }

    /// Select previous action
    pub fn select_previous_action(&mut self) {
        let index = TaskAction::ALL
            .iter()
            .position(|a| *a == self.selected_action)
            .unwrap_or(0);
        let previous = if index == 0 {
            TaskAction::ALL.len() - 1
        } else {
            index - 1
        };
        self.selected_action = TaskAction::ALL[previous];
    }

    /// Render the task screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let Some(record) = &self.record else {
            self.render_no_record(f, size);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(8),    // Summary table
                Constraint::Length(4), // Actions/Status
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_title(f, chunks[0]);
        self.render_summary(record, f, chunks[1]);
        self.render_actions(f, chunks[2]);
        self.render_help(f, chunks[3]);
    }

    fn render_no_record(&self, f: &mut Frame, area: Rect) {
        let text = vec![
            Line::from(""),
            Line::from("No finished exploration"),
            Line::from(""),
            Line::from(Span::styled(
                "Press Esc to go back",
                Style::default().fg(Color::Yellow),
            )),
        ];

        let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .title("Task")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(paragraph, area);
    }

    fn render_title(&self, f: &mut Frame, area: Rect) {
        let title = Paragraph::new("Next Task")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );

        f.render_widget(title, area);
    }

    fn render_summary(&self, record: &ExerciseRecord, f: &mut Frame, area: Rect) {
        // Pre-format all strings so the rows can borrow them
        let elapsed_str = format!(
            "{} ({})",
            format_clock(record.elapsed_seconds),
            format_duration(Duration::from_secs(u64::from(record.elapsed_seconds)))
        );
        let keystrokes_str = record.keystrokes.to_string();
        let pace_str = format!("{:.1} keys/min", record.keys_per_minute());
        let reason_str = record.reason.to_string();
        let timestamp_str = record.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string();

        let rows = vec![
            Row::new(vec!["Exploration", ""]).style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Row::new(vec!["  Character:", record.character.as_str()]),
            Row::new(vec!["  Elapsed Time:", elapsed_str.as_str()]),
            Row::new(vec!["  Keystrokes:", keystrokes_str.as_str()]),
            Row::new(vec!["  Pace:", pace_str.as_str()]),
            Row::new(vec!["  Ended By:", reason_str.as_str()]),
            Row::new(vec!["", ""]),
            Row::new(vec!["  Finished:", timestamp_str.as_str()]),
        ];

        let table = Table::new(rows, [Constraint::Length(20), Constraint::Min(30)])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .column_spacing(2);

        f.render_widget(table, area);
    }

    fn render_actions(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        let actions_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(40),
                Constraint::Min(0),
            ])
            .split(rows[0])[1];

        let action_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(actions_area);

        for (action, chunk) in TaskAction::ALL.iter().zip(action_chunks.iter()) {
            let selected = *action == self.selected_action;
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let border = if selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };

            let button = Paragraph::new(action.display_text())
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            f.render_widget(button, *chunk);
        }

        if let Some(status) = &self.save_status {
            let (message, style) = match status {
                SaveStatus::Saved(message) => (message, Style::default().fg(Color::Green)),
                SaveStatus::Failed(message) => (message, Style::default().fg(Color::Red)),
            };
            let message_widget = Paragraph::new(message.as_str())
                .style(style)
                .alignment(Alignment::Center);
            f.render_widget(message_widget, rows[1]);
        }
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("←→", key),
            Span::raw(" Navigate  "),
            Span::styled("Enter", key),
            Span::raw(" Select  "),
            Span::styled("Esc", key),
            Span::raw(" Back"),
        ])];

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );

        f.render_widget(help, area);
    }
}

impl Default for TaskScreen {
    fn default() -> Self {
        Self::new()
    }
}
