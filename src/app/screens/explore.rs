//! Explore screen implementation
//!
//! Shows the exercise while it runs: header and intro texts, the time and
//! keystroke limits as gauges, and which keyboard row was played last. Once
//! the exercise completes, the character card and the Next button appear.

use crate::exercise::{KeyRow, Phase, SessionSnapshot};
use crate::models::GameCharacter;
use crate::util::units::{format_clock, format_progress, limit_ratio};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

/// Explore screen component
#[derive(Debug, Default)]
pub struct ExploreScreen {
    /// Latest state published by the exercise
    snapshot: Option<SessionSnapshot>,
    /// Whether the Next button has focus
    cta_focused: bool,
    next_label: String,
    character: GameCharacter,
}

impl ExploreScreen {
    pub fn new(next_label: impl Into<String>, character: GameCharacter) -> Self {
        Self {
            snapshot: None,
            cta_focused: false,
            next_label: next_label.into(),
            character,
        }
    }

    /// Start over with the first snapshot of a new mount
    pub fn reset(&mut self, snapshot: SessionSnapshot) {
        self.snapshot = Some(snapshot);
        self.cta_focused = false;
    }

    /// Update the screen with a newer snapshot
    pub fn update_snapshot(&mut self, snapshot: SessionSnapshot) {
        self.snapshot = Some(snapshot);
    }

    pub fn snapshot(&self) -> Option<&SessionSnapshot> {
        self.snapshot.as_ref()
    }

    /// Give the Next button focus
    pub fn focus_call_to_action(&mut self) {
        self.cta_focused = true;
    }

    pub fn is_cta_focused(&self) -> bool {
        self.cta_focused
    }

    /// Check if the exercise is completed
    pub fn is_completed(&self) -> bool {
        self.snapshot
            .as_ref()
            .map_or(false, |snapshot| snapshot.phase == Phase::Completed)
    }

    /// Render the explore screen
    pub fn render(&mut self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(4), // Intro text
                Constraint::Length(3), // Time gauge
                Constraint::Length(3), // Keystroke gauge
                Constraint::Min(5),    // Keyboard rows
                Constraint::Length(5), // Character card and Next
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        self.render_intro(f, chunks[1]);
        self.render_time_gauge(f, chunks[2]);
        self.render_keystroke_gauge(f, chunks[3]);
        self.render_rows(f, chunks[4]);
        if self.is_completed() {
            self.render_completion(f, chunks[5]);
        }
        self.render_help(f, chunks[6]);
    }

    fn accent(&self) -> Color {
        if self.is_completed() {
            Color::Green
        } else {
            Color::Cyan
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = self
            .snapshot
            .as_ref()
            .map_or("", |snapshot| snapshot.header_text.as_str());
        let color = self.accent();

        let title = Paragraph::new(header)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );

        f.render_widget(title, area);
    }

    fn render_intro(&self, f: &mut Frame, area: Rect) {
        let intro = self
            .snapshot
            .as_ref()
            .map_or("", |snapshot| snapshot.intro_text.as_str());

        let paragraph = Paragraph::new(intro)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::LEFT | Borders::RIGHT));

        f.render_widget(paragraph, area);
    }

    fn render_time_gauge(&self, f: &mut Frame, area: Rect) {
        let (ratio, label) = match &self.snapshot {
            Some(snapshot) => (
                limit_ratio(snapshot.elapsed_seconds, snapshot.limits.time_limit_secs),
                format!(
                    "{} / {}",
                    format_clock(snapshot.elapsed_seconds),
                    format_clock(snapshot.limits.time_limit_secs)
                ),
            ),
            None => (0.0, "Starting...".to_string()),
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Time")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(label);

        f.render_widget(gauge, area);
    }

    fn render_keystroke_gauge(&self, f: &mut Frame, area: Rect) {
        let (ratio, label) = match &self.snapshot {
            Some(snapshot) => (
                limit_ratio(snapshot.keystrokes, snapshot.limits.keystroke_limit),
                format_progress(snapshot.keystrokes, snapshot.limits.keystroke_limit),
            ),
            None => (0.0, "0".to_string()),
        };

        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title("Keystrokes")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(ratio)
            .label(label);

        f.render_widget(gauge, area);
    }

    fn render_rows(&self, f: &mut Frame, area: Rect) {
        let last_row = self.snapshot.as_ref().and_then(|snapshot| snapshot.last_row);

        let lines: Vec<Line> = KeyRow::ALL
            .iter()
            .map(|&row| {
                let style = if last_row == Some(row) {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![
                    Span::styled(format!("{:<12}", row.label()), Style::default().fg(Color::Cyan)),
                    Span::styled(key_caps(row), style),
                ])
            })
            .collect();

        let rows = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title("Keyboard")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        f.render_widget(rows, area);
    }

    fn render_completion(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut card = vec![Line::from(Span::styled(
            self.character.name.as_str(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))];
        if !self.character.image.is_empty() {
            card.push(Line::from(Span::styled(
                self.character.image.as_str(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        let character = Paragraph::new(card).alignment(Alignment::Center).block(
            Block::default()
                .title("Character")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        );
        f.render_widget(character, chunks[0]);

        let (button_style, border_style) = if self.cta_focused {
            (
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Cyan),
            )
        } else {
            (Style::default().fg(Color::White), Style::default().fg(Color::White))
        };

        let next = Paragraph::new(self.next_label.as_str())
            .style(button_style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        f.render_widget(next, chunks[1]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let help_text = if self.is_completed() {
            vec![Line::from(vec![
                Span::styled("Enter", key),
                Span::raw(format!(" {}  ", self.next_label)),
                Span::styled("Esc", key),
                Span::raw(" Back to Menu"),
            ])]
        } else {
            vec![Line::from(vec![
                Span::raw("Any key plays  "),
                Span::styled("Esc", key),
                Span::raw(" Back  "),
                Span::styled("Ctrl+C", key),
                Span::raw(" Quit"),
            ])]
        };

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

/// Printed caps of a row's keys, e.g. `Q W E R T Y U I O P [`
fn key_caps(row: KeyRow) -> String {
    row.key_codes()
        .iter()
        .map(|&code| match code {
            65..=90 => char::from(code as u8),
            186 => ';',
            188 => ',',
            190 => '.',
            219 => '[',
            222 => '\'',
            _ => '?',
        })
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Limits;

    fn snapshot(phase: Phase) -> SessionSnapshot {
        SessionSnapshot {
            phase,
            elapsed_seconds: 12,
            keystrokes: 7,
            limits: Limits::default(),
            header_text: "Explore the keyboard".to_string(),
            intro_text: "Press any keys".to_string(),
            last_row: Some(KeyRow::Middle),
        }
    }

    #[test]
    fn test_completion_detection() {
        let mut screen = ExploreScreen::new("Next", GameCharacter::default());
        assert!(!screen.is_completed());

        screen.reset(snapshot(Phase::InProgress));
        assert!(!screen.is_completed());

        screen.update_snapshot(snapshot(Phase::Completed));
        assert!(screen.is_completed());
    }

    #[test]
    fn test_focus_cleared_on_reset() {
        let mut screen = ExploreScreen::new("Next", GameCharacter::default());
        screen.focus_call_to_action();
        assert!(screen.is_cta_focused());

        screen.reset(snapshot(Phase::InProgress));
        assert!(!screen.is_cta_focused());
    }

    #[test]
    fn test_key_caps() {
        assert_eq!(key_caps(KeyRow::Top), "Q W E R T Y U I O P [");
        assert_eq!(key_caps(KeyRow::Middle), "A S D F G H J K L ; '");
        assert_eq!(key_caps(KeyRow::Bottom), "Z X C V B N M , .");
    }
}
