use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::presentation::renderers::tui::app::AppState;

const HELP: &str = "q quit  r refresh  f focus  d raw  / filter  t ttl  x delete";

pub(crate) struct StatusBarComponent;

impl Component for StatusBarComponent {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let line = if let Some(prompt) = state.prompt() {
            Line::from(vec![
                Span::styled(prompt, Style::default().fg(Color::Yellow)),
                Span::styled("█", Style::default().fg(Color::Yellow)),
            ])
        } else {
            let mut spans = vec![Span::styled(
                format!(" {} ", state.store_name),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            )];
            match &state.status {
                Some(status) => {
                    let color = if status.is_error { Color::Red } else { Color::Green };
                    spans.push(Span::styled(
                        format!(" {}", status.text),
                        Style::default().fg(color),
                    ));
                }
                None => spans.push(Span::styled(
                    format!(" {}", HELP),
                    Style::default().fg(Color::DarkGray),
                )),
            }
            Line::from(spans)
        };

        f.render_widget(Paragraph::new(line), area);
    }
}
