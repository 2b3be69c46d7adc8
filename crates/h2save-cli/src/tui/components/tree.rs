use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{Component, border_style};
use crate::tui::app::{AppState, Focus};
use h2save_runtime::{NodeKind, TreeNode};

pub(crate) struct TreeComponent;

impl Component for TreeComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(state, Focus::Tree))
            .title(" Tree ");

        let Some(tree) = state.pipeline.presenter().tree() else {
            let empty = Paragraph::new(Line::from(Span::styled(
                "Press 3 to view the savefile as a tree",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block);
            f.render_widget(empty, area);
            return;
        };

        let items: Vec<ListItem> = tree
            .visible_rows()
            .iter()
            .map(|row| ListItem::new(render_row(row.node, row.depth)))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(list, area, &mut state.tree_list);
    }
}

fn render_row(node: &TreeNode, depth: usize) -> Line<'static> {
    let fold = match (node.has_children(), node.expanded) {
        (false, _) => "  ",
        (true, true) => "▾ ",
        (true, false) => "▸ ",
    };
    let key = node.key.clone().unwrap_or_else(|| "root".to_string());

    let mut spans = vec![
        Span::raw("  ".repeat(depth)),
        Span::styled(fold, Style::default().fg(Color::DarkGray)),
        Span::styled(key, Style::default().fg(Color::Cyan)),
    ];

    match &node.kind {
        NodeKind::Object => spans.push(Span::styled(
            format!(" {{{}}}", node.children.len()),
            Style::default().fg(Color::DarkGray),
        )),
        NodeKind::Array => spans.push(Span::styled(
            format!(" [{}]", node.children.len()),
            Style::default().fg(Color::DarkGray),
        )),
        NodeKind::Leaf(value) => {
            let color = if value.starts_with('"') {
                Color::Green
            } else {
                Color::Yellow
            };
            spans.push(Span::raw(": "));
            spans.push(Span::styled(value.clone(), Style::default().fg(color)));
        }
    }

    Line::from(spans)
}
