use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
};

use super::app::{AppState, Focus};

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState);
}

pub(crate) mod actions;
pub(crate) mod picker;
pub(crate) mod status;
pub(crate) mod tree;

pub(crate) use actions::ActionsComponent;
pub(crate) use picker::{InputComponent, SavesComponent};
pub(crate) use status::StatusComponent;
pub(crate) use tree::TreeComponent;

fn border_style(state: &AppState, focus: Focus) -> Style {
    if state.focus == focus {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
