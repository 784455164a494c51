use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use rtui_engine::{RenderKind, SourceBlock};

use super::Component;
use crate::presentation::formatters::{Highlighter, JSON_SYNTAX, Segment};
use crate::presentation::renderers::tui::app::{AppState, Focus};

/// Value of the selected key.
pub(crate) struct DataPanel;

/// Source snippet split out of the selected value, if any.
pub(crate) struct SourcePanel;

impl Component for DataPanel {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let border = if state.focus == Focus::Content {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));

        let Some(sel) = &state.selection else {
            let hint = Paragraph::new("Select a key to view its value")
                .style(Style::default().fg(Color::DarkGray))
                .block(block.title(" Data "));
            f.render_widget(hint, area);
            return;
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("type ", Style::default().fg(Color::DarkGray)),
                Span::raw(sel.tag.to_string()),
                Span::styled("  ttl ", Style::default().fg(Color::DarkGray)),
                Span::raw(sel.ttl.to_string()),
                Span::styled(
                    if state.raw { "  raw" } else { "" },
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::default(),
        ];

        let primary = &sel.view.primary;
        match primary.kind {
            RenderKind::Json => lines.extend(
                highlighted(&primary.lines, JSON_SYNTAX)
                    .into_iter()
                    .map(Line::from),
            ),
            RenderKind::Error => lines.extend(
                primary
                    .lines
                    .iter()
                    .map(|line| Line::styled(line.clone(), Style::default().fg(Color::Red))),
            ),
            RenderKind::Plain => lines.extend(primary.lines.iter().map(|l| Line::raw(l.clone()))),
        }

        let title = format!(" {} ", sel.view.title);
        let paragraph = Paragraph::new(Text::from(lines))
            .block(block.title(title))
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0));
        f.render_widget(paragraph, area);
    }
}

impl Component for SourcePanel {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState) {
        let block = Block::default()
            .title(" Source ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let source = state.selection.as_ref().map(|sel| &sel.view.source);
        let paragraph = match source {
            Some(SourceBlock::Code(code)) => {
                let width = code.len().to_string().len();
                let lines: Vec<Line> = highlighted(code, &state.source_syntax)
                    .into_iter()
                    .enumerate()
                    .map(|(idx, spans)| {
                        let number = Span::styled(
                            format!("{:>width$} ", idx + 1, width = width),
                            Style::default().fg(Color::DarkGray),
                        );
                        Line::from(std::iter::once(number).chain(spans).collect::<Vec<_>>())
                    })
                    .collect();
                Paragraph::new(Text::from(lines))
            }
            Some(SourceBlock::Empty) | None => Paragraph::new("No source code")
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)),
        };

        f.render_widget(paragraph.block(block), area);
    }
}

fn highlighted(lines: &[String], syntax: &str) -> Vec<Vec<Span<'static>>> {
    Highlighter::shared()
        .highlight(lines, syntax)
        .into_iter()
        .map(|segments| segments.into_iter().map(span).collect())
        .collect()
}

fn span(segment: Segment) -> Span<'static> {
    match segment.rgb {
        Some((r, g, b)) => Span::styled(segment.text, Style::default().fg(Color::Rgb(r, g, b))),
        None => Span::raw(segment.text),
    }
}
