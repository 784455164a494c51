use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;
use rtui_engine::{ContentView, HierarchyNode, compose};
use rtui_types::{StoreValue, Ttl, ValueTypeTag};

use super::tree::KeyTreeState;
use crate::presentation::formatters::DEFAULT_SOURCE_SYNTAX;

const PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Tree,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Filter(String),
    Ttl(String),
    ConfirmDelete(String),
}

/// Work the browser asks the store to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    Load(String),
    Filter(String),
    Expire(String, i64),
    Delete(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine {
    pub text: String,
    pub is_error: bool,
}

/// The value currently shown in the content pane.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    pub key: String,
    pub tag: ValueTypeTag,
    pub ttl: Ttl,
    pub value: StoreValue,
    pub view: ContentView,
}

pub struct AppState {
    pub(crate) tree: KeyTreeState,
    pub(crate) list_state: ListState,
    pub(crate) pattern: String,
    pub(crate) store_name: String,
    pub(crate) focus: Focus,
    pub(crate) raw: bool,
    pub(crate) scroll: u16,
    pub(crate) selection: Option<Selection>,
    pub(crate) input: InputMode,
    pub(crate) status: Option<StatusLine>,
    pub(crate) source_syntax: String,
}

impl AppState {
    pub fn new(store_name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            tree: KeyTreeState::default(),
            list_state: ListState::default(),
            pattern: pattern.into(),
            store_name: store_name.into(),
            focus: Focus::Tree,
            raw: false,
            scroll: 0,
            selection: None,
            input: InputMode::Normal,
            status: None,
            source_syntax: DEFAULT_SOURCE_SYNTAX.to_string(),
        }
    }

    /// Language used to highlight the source pane.
    pub fn with_source_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.source_syntax = syntax.into();
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into();
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selection.as_ref().map(|s| s.key.as_str())
    }

    pub fn set_keys(&mut self, root: HierarchyNode) {
        self.tree.replace(root);
    }

    pub fn show_value(&mut self, key: &str, tag: ValueTypeTag, ttl: Ttl, value: StoreValue) {
        let view = self.compose_view(key, &tag, &value);
        if self.selected_key() != Some(key) {
            self.scroll = 0;
        }
        self.selection = Some(Selection {
            key: key.to_string(),
            tag,
            ttl,
            value,
            view,
        });
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.scroll = 0;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: true,
        });
    }

    fn compose_view(&self, key: &str, tag: &ValueTypeTag, value: &StoreValue) -> ContentView {
        if self.raw {
            ContentView::raw(key, value)
        } else {
            compose(key, value, tag)
        }
    }

    fn toggle_raw(&mut self) {
        self.raw = !self.raw;
        if let Some(sel) = self.selection.take() {
            let view = self.compose_view(&sel.key, &sel.tag, &sel.value);
            self.selection = Some(Selection { view, ..sel });
        }
        self.info(if self.raw { "Raw view" } else { "Formatted view" });
    }

    /// Update local state for a key press and return what the store
    /// should do, if anything.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        match std::mem::replace(&mut self.input, InputMode::Normal) {
            InputMode::Normal => self.handle_normal(key),
            InputMode::Filter(buf) => self.handle_input(key, buf, InputMode::Filter),
            InputMode::Ttl(buf) => self.handle_input(key, buf, InputMode::Ttl),
            InputMode::ConfirmDelete(target) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Delete(target)),
                _ => {
                    self.info("Delete cancelled");
                    None
                }
            },
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Char('r') => return Some(Action::Refresh),
            KeyCode::Char('f') => {
                self.focus = match self.focus {
                    Focus::Tree => Focus::Content,
                    Focus::Content => Focus::Tree,
                };
            }
            KeyCode::Char('d') => self.toggle_raw(),
            KeyCode::Down | KeyCode::Char('j') => match self.focus {
                Focus::Tree => self.tree.move_down(1),
                Focus::Content => self.scroll = self.scroll.saturating_add(1),
            },
            KeyCode::Up | KeyCode::Char('k') => match self.focus {
                Focus::Tree => self.tree.move_up(1),
                Focus::Content => self.scroll = self.scroll.saturating_sub(1),
            },
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::Right | KeyCode::Char('l') => self.tree.expand(),
            KeyCode::Left | KeyCode::Char('h') => self.tree.collapse(),
            KeyCode::Enter => {
                let row = self.tree.selected()?.clone();
                if row.has_children {
                    self.tree.toggle();
                }
                return row.full_key.map(Action::Load);
            }
            KeyCode::Char('/') => self.input = InputMode::Filter(self.pattern.clone()),
            KeyCode::Char('t') => match self.selected_key() {
                Some(_) => self.input = InputMode::Ttl(String::new()),
                None => self.error("Select a key first"),
            },
            KeyCode::Char('x') => match self.selected_key().map(str::to_string) {
                Some(target) => self.input = InputMode::ConfirmDelete(target),
                None => self.error("Select a key first"),
            },
            _ => {}
        }
        None
    }

    fn handle_input(
        &mut self,
        key: KeyEvent,
        mut buf: String,
        mode: fn(String) -> InputMode,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Enter => return self.submit(mode(buf)),
            KeyCode::Backspace => {
                buf.pop();
            }
            KeyCode::Char(c) => buf.push(c),
            _ => {}
        }
        self.input = mode(buf);
        None
    }

    fn submit(&mut self, input: InputMode) -> Option<Action> {
        match input {
            InputMode::Filter(pattern) => {
                let pattern = pattern.trim();
                Some(Action::Filter(if pattern.is_empty() {
                    "*".to_string()
                } else {
                    pattern.to_string()
                }))
            }
            InputMode::Ttl(text) => {
                let key = self.selected_key()?.to_string();
                match text.trim().parse::<i64>() {
                    Ok(seconds) => Some(Action::Expire(key, seconds)),
                    Err(_) => {
                        self.error(format!("Not a number of seconds: '{}'", text.trim()));
                        None
                    }
                }
            }
            InputMode::Normal | InputMode::ConfirmDelete(_) => None,
        }
    }

    /// Prompt shown in the status bar while collecting input.
    pub(crate) fn prompt(&self) -> Option<String> {
        match &self.input {
            InputMode::Normal => None,
            InputMode::Filter(buf) => Some(format!("Filter: {}", buf)),
            InputMode::Ttl(buf) => Some(format!("TTL seconds: {}", buf)),
            InputMode::ConfirmDelete(key) => Some(format!("Delete {}? (y/n)", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtui_engine::build_hierarchy;

    fn press(state: &mut AppState, code: KeyCode) -> Option<Action> {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new("memory", "*");
        state.set_keys(build_hierarchy(["a", "a:b", "c"], ":"));
        state
    }

    #[test]
    fn test_quit_keys() {
        let mut state = loaded_state();
        assert_eq!(press(&mut state, KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(press(&mut state, KeyCode::Esc), Some(Action::Quit));
        assert_eq!(
            state.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_enter_on_dual_role_loads_and_expands() {
        let mut state = loaded_state();

        assert_eq!(press(&mut state, KeyCode::Enter), Some(Action::Load("a".to_string())));
        assert_eq!(state.tree.rows().len(), 3);
    }

    #[test]
    fn test_filter_input() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Char('/'));
        assert_eq!(state.prompt().as_deref(), Some("Filter: *"));

        press(&mut state, KeyCode::Backspace);
        type_text(&mut state, "a:*");
        assert_eq!(
            press(&mut state, KeyCode::Enter),
            Some(Action::Filter("a:*".to_string()))
        );
        assert_eq!(state.input, InputMode::Normal);
    }

    #[test]
    fn test_empty_filter_means_everything() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Char('/'));
        press(&mut state, KeyCode::Backspace);

        assert_eq!(press(&mut state, KeyCode::Enter), Some(Action::Filter("*".to_string())));
    }

    #[test]
    fn test_ttl_requires_selection() {
        let mut state = loaded_state();
        assert_eq!(press(&mut state, KeyCode::Char('t')), None);
        assert!(state.status.as_ref().unwrap().is_error);
        assert_eq!(state.input, InputMode::Normal);
    }

    #[test]
    fn test_ttl_input() {
        let mut state = loaded_state();
        state.show_value("c", ValueTypeTag::String, Ttl::Persistent, StoreValue::text("v"));

        press(&mut state, KeyCode::Char('t'));
        type_text(&mut state, "90");
        assert_eq!(
            press(&mut state, KeyCode::Enter),
            Some(Action::Expire("c".to_string(), 90))
        );

        press(&mut state, KeyCode::Char('t'));
        type_text(&mut state, "soon");
        assert_eq!(press(&mut state, KeyCode::Enter), None);
        assert!(state.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let mut state = loaded_state();
        state.show_value("c", ValueTypeTag::String, Ttl::Persistent, StoreValue::text("v"));

        press(&mut state, KeyCode::Char('x'));
        assert_eq!(state.prompt().as_deref(), Some("Delete c? (y/n)"));
        assert_eq!(press(&mut state, KeyCode::Char('n')), None);

        press(&mut state, KeyCode::Char('x'));
        assert_eq!(
            press(&mut state, KeyCode::Char('y')),
            Some(Action::Delete("c".to_string()))
        );
    }

    #[test]
    fn test_raw_toggle_recomposes() {
        let mut state = loaded_state();
        state.show_value(
            "c",
            ValueTypeTag::String,
            Ttl::Persistent,
            StoreValue::text(r#"{"a":1}"#),
        );
        assert_eq!(state.selection.as_ref().unwrap().view.primary.lines.len(), 3);

        press(&mut state, KeyCode::Char('d'));
        assert!(state.raw);
        assert_eq!(
            state.selection.as_ref().unwrap().view.primary.lines,
            vec![r#""{\"a\":1}""#]
        );
    }

    #[test]
    fn test_focus_switches_scrolling() {
        let mut state = loaded_state();
        press(&mut state, KeyCode::Char('f'));
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::Char('j'));
        press(&mut state, KeyCode::PageDown);

        assert_eq!(state.scroll, 12);
        assert_eq!(state.tree.cursor(), 0);
    }
}
