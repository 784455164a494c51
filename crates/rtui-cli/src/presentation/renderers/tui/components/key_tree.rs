use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::Component;
use crate::presentation::renderers::tui::app::{AppState, Focus};

pub(crate) struct KeyTreeComponent;

impl Component for KeyTreeComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let items: Vec<ListItem> = state
            .tree
            .rows()
            .iter()
            .map(|row| {
                let marker = match (row.has_children, row.expanded) {
                    (true, true) => "▾ ",
                    (true, false) => "▸ ",
                    (false, _) => "  ",
                };
                let label_style = if row.full_key.is_some() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::Blue)
                };
                ListItem::new(Line::from(vec![
                    Span::raw("  ".repeat(row.depth)),
                    Span::styled(marker, Style::default().fg(Color::DarkGray)),
                    Span::styled(row.label.clone(), label_style),
                    Span::styled(row.badge.clone(), Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let border = if state.focus == Focus::Tree {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let title = format!(" Keys: {} ({}) ", state.pattern, state.tree.key_count());

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let selected = (!state.tree.rows().is_empty()).then(|| state.tree.cursor());
        state.list_state.select(selected);
        f.render_stateful_widget(list, area, &mut state.list_state);
    }
}
