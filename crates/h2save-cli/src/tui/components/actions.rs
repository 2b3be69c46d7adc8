use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Component;
use crate::tui::app::AppState;
use h2save_types::Action;

pub(crate) struct ActionsComponent;

impl Component for ActionsComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let enablement = state.pipeline.session().enablement();

        let mut spans = Vec::new();
        for (index, action) in Action::ALL.into_iter().enumerate() {
            let style = if enablement.is_enabled(action) {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(
                format!(" [{}] {} ", index + 1, action.label()),
                style,
            ));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Actions ");
        f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}
