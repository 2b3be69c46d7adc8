use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{Component, border_style};
use crate::tui::app::{AppState, Focus};

pub(crate) struct InputComponent;

impl Component for InputComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let title = match state.pipeline.session().selection() {
            Some(buffer) => format!(" Savefile: {} ({} bytes) ", buffer.name(), buffer.len()),
            None => " Savefile path ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(state, Focus::Input))
            .title(title);

        let mut spans = vec![Span::raw(state.input.clone())];
        if state.focus == Focus::Input {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }

        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

pub(crate) struct SavesComponent;

impl Component for SavesComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(state, Focus::Saves))
            .title(" Detected saves ");

        if state.saves.is_empty() {
            let hint = state
                .saves_hint
                .clone()
                .unwrap_or_else(|| "No savefiles found".to_string());
            let empty = Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = state
            .saves
            .iter()
            .map(|save| ListItem::new(Line::from(save.name.clone())))
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state.saves_list);
    }
}
