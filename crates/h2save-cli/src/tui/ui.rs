use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::AppState;
use super::components::{
    ActionsComponent, Component, InputComponent, SavesComponent, StatusComponent, TreeComponent,
};

pub(crate) fn draw(f: &mut Frame, state: &mut AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(rows[1]);

    InputComponent.render(f, rows[0], state);
    SavesComponent.render(f, main[0], state);
    TreeComponent.render(f, main[1], state);
    ActionsComponent.render(f, rows[2], state);
    StatusComponent.render(f, rows[3], state);
}
