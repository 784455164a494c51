use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use super::app::AppState;
use super::components::{
    Component, DataPanel, KeyTreeComponent, SourcePanel, StatusBarComponent,
};

pub(crate) fn draw(f: &mut Frame, state: &mut AppState) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[0]);

    let content = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(panes[1]);

    KeyTreeComponent.render(f, panes[0], state);
    DataPanel.render(f, content[0], state);
    SourcePanel.render(f, content[1], state);
    StatusBarComponent.render(f, main_chunks[1], state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use rtui_engine::build_hierarchy;
    use rtui_types::{StoreValue, Ttl, ValueTypeTag};

    fn screen(state: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_draws_all_panes() {
        let mut state = AppState::new("memory", "*");
        state.set_keys(build_hierarchy(["user:1", "code:x"], ":"));
        state.show_value(
            "code:x",
            ValueTypeTag::Hash,
            Ttl::Expires(30),
            StoreValue::pairs([("name", "x"), ("code", "fn x() {}")]),
        );

        let text = screen(&mut state);
        assert!(text.contains("Keys: * (2)"));
        assert!(text.contains("Data for code:x"));
        assert!(text.contains("ttl 30s"));
        assert!(text.contains("name: x"));
        assert!(text.contains("1 fn x() {}"));
        assert!(text.contains("q quit"));
    }

    #[test]
    fn test_empty_selection_placeholders() {
        let mut state = AppState::new("memory", "*");
        let text = screen(&mut state);

        assert!(text.contains("Select a key to view its value"));
        assert!(text.contains("No source code"));
    }

    #[test]
    fn test_source_pane_is_highlighted() {
        let mut state = AppState::new("memory", "*").with_source_syntax("python");
        state.show_value(
            "code:x",
            ValueTypeTag::Hash,
            Ttl::Persistent,
            StoreValue::pairs([("code", "def x():\n    return 1")]),
        );

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| draw(f, &mut state)).unwrap();
        let buffer = terminal.backend().buffer();

        assert!(
            buffer
                .content()
                .iter()
                .any(|cell| matches!(cell.fg, ratatui::style::Color::Rgb(..)))
        );
        assert!(screen(&mut state).contains("2     return 1"));
    }
}
