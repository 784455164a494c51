use ratatui::{Frame, layout::Rect};

use super::app::AppState;

pub(crate) trait Component {
    fn render(&self, f: &mut Frame, area: Rect, state: &mut AppState);
}

pub(crate) mod content;
pub(crate) mod key_tree;
pub(crate) mod status_bar;

pub(crate) use content::{DataPanel, SourcePanel};
pub(crate) use key_tree::KeyTreeComponent;
pub(crate) use status_bar::StatusBarComponent;
