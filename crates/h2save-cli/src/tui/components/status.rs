use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use super::Component;
use crate::tui::app::{AppState, Focus};

pub(crate) struct StatusComponent;

impl Component for StatusComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let status = if let Some(error) = state.pipeline.session().error_message() {
            Span::styled(error.to_string(), Style::default().fg(Color::Red))
        } else if let Some((_, busy)) = &state.busy {
            Span::styled(busy.clone(), Style::default().fg(Color::Yellow))
        } else if let Some(note) = &state.note {
            Span::styled(note.clone(), Style::default().fg(Color::Green))
        } else if state.pipeline.session().selection().is_none() {
            Span::styled(
                "Select a savefile to enable the actions",
                Style::default().fg(Color::DarkGray),
            )
        } else {
            Span::raw("")
        };

        let keys = match state.focus {
            Focus::Input => "Enter select  Ctrl+U clear  F1-F3 actions  Tab focus  Esc quit",
            Focus::Saves => "Up/Down move  Enter select  1-3 actions  Tab focus  q quit",
            Focus::Tree => "Up/Down move  Enter/Space toggle  e expand all  c collapse all  q quit",
        };

        let text = Text::from(vec![
            Line::from(status),
            Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray))),
        ]);
        f.render_widget(Paragraph::new(text), area);
    }
}
