use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quill_core::Category;

use crate::app::state::{App, UiAction};

const HISTORY_PAGE_STEP: u16 = 10;

/// Returns true when the app should exit.
pub fn perform_action(app: &mut App, action: UiAction) -> bool {
    match action {
        UiAction::Quit => return true,
        UiAction::SelectCategory(category) => app.select_category(category),
        UiAction::Generate => {
            if !app.start_generation() {
                tracing::debug!("Generate ignored while a request is in flight");
            }
        }
    }
    false
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let selected = app.orchestrator.state().selected();
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            perform_action(app, UiAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => perform_action(app, UiAction::Quit),
        KeyCode::Enter | KeyCode::Char('g') => perform_action(app, UiAction::Generate),
        KeyCode::Right | KeyCode::Tab => {
            perform_action(app, UiAction::SelectCategory(selected.next()))
        }
        KeyCode::Left | KeyCode::BackTab => {
            perform_action(app, UiAction::SelectCategory(selected.prev()))
        }
        KeyCode::Char(c @ '1'..='3') => {
            let idx = c as usize - '1' as usize;
            perform_action(app, UiAction::SelectCategory(Category::ALL[idx]))
        }
        KeyCode::Up => {
            app.scroll_history_up(1);
            false
        }
        KeyCode::Down => {
            app.scroll_history_down(1);
            false
        }
        KeyCode::PageUp => {
            app.scroll_history_up(HISTORY_PAGE_STEP);
            false
        }
        KeyCode::PageDown => {
            app.scroll_history_down(HISTORY_PAGE_STEP);
            false
        }
        KeyCode::Home => {
            app.history_scroll = 0;
            app.dirty = true;
            false
        }
        _ => false,
    }
}
