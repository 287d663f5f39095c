//! src/controller/keymap.rs
//! Maps terminal key presses to actions. The active overlay wins over the
//! focus mode; `Ctrl+C` quits from anywhere.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    controller::actions::Action,
    model::ui_state::{UIMode, UIOverlay, UIState},
};

pub fn map_key(key: KeyEvent, ui: &UIState) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match ui.overlay {
        UIOverlay::Confirm => map_confirm(key),
        UIOverlay::Help => map_help(key),
        UIOverlay::None => match ui.mode {
            UIMode::Search => map_search(key),
            UIMode::Browse => map_browse(key),
        },
    }
}

fn map_confirm(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::ConfirmOpen),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::CancelConfirm),
        _ => None,
    }
}

fn map_help(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseOverlay),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

fn map_search(key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearch),
        KeyCode::Char('u') if ctrl => Some(Action::ClearSearch),
        KeyCode::Char(c) if !ctrl => Some(Action::SearchInput(c)),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Delete => Some(Action::SearchDelete),
        KeyCode::Left => Some(Action::SearchCursorLeft),
        KeyCode::Right => Some(Action::SearchCursorRight),
        KeyCode::Home => Some(Action::SearchCursorHome),
        KeyCode::End => Some(Action::SearchCursorEnd),
        KeyCode::Up => Some(Action::MoveSelectionUp),
        KeyCode::Down => Some(Action::MoveSelectionDown),
        KeyCode::Tab => Some(Action::NextCategory),
        KeyCode::BackTab => Some(Action::PrevCategory),
        _ => None,
    }
}

fn map_browse(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::EnterSearch),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::F(5) => Some(Action::Reload),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveSelectionUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveSelectionDown),
        KeyCode::Char('h') => Some(Action::MoveSelectionLeft),
        KeyCode::Char('l') => Some(Action::MoveSelectionRight),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::SelectFirst),
        KeyCode::End | KeyCode::Char('G') => Some(Action::SelectLast),
        KeyCode::Enter => Some(Action::ActivateSelected),

        KeyCode::Tab | KeyCode::Right => Some(Action::NextCategory),
        KeyCode::BackTab | KeyCode::Left => Some(Action::PrevCategory),

        KeyCode::Esc => Some(Action::DismissNotification),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ui(mode: UIMode, overlay: UIOverlay) -> UIState {
        let mut ui = UIState::default();
        ui.mode = mode;
        ui.overlay = overlay;
        ui
    }

    #[test]
    fn browse_keys() {
        let ui = ui(UIMode::Browse, UIOverlay::None);
        assert!(matches!(map_key(press(KeyCode::Enter), &ui), Some(Action::ActivateSelected)));
        assert!(matches!(map_key(press(KeyCode::Char('/')), &ui), Some(Action::EnterSearch)));
        assert!(matches!(map_key(press(KeyCode::Tab), &ui), Some(Action::NextCategory)));
        assert!(matches!(map_key(press(KeyCode::Left), &ui), Some(Action::PrevCategory)));
        assert!(matches!(map_key(press(KeyCode::F(5)), &ui), Some(Action::Reload)));
        assert!(matches!(map_key(press(KeyCode::Char('q')), &ui), Some(Action::Quit)));
        assert!(map_key(press(KeyCode::Char('z')), &ui).is_none());
    }

    #[test]
    fn search_mode_types_letters() {
        let ui = ui(UIMode::Search, UIOverlay::None);
        assert!(matches!(map_key(press(KeyCode::Char('q')), &ui), Some(Action::SearchInput('q'))));
        assert!(matches!(map_key(press(KeyCode::Backspace), &ui), Some(Action::SearchBackspace)));
        assert!(matches!(map_key(press(KeyCode::Esc), &ui), Some(Action::ExitSearch)));
        assert!(matches!(map_key(press(KeyCode::Enter), &ui), Some(Action::ExitSearch)));
        assert!(matches!(
            map_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &ui),
            Some(Action::ClearSearch)
        ));
    }

    #[test]
    fn confirm_overlay_takes_precedence() {
        let ui = ui(UIMode::Search, UIOverlay::Confirm);
        assert!(matches!(map_key(press(KeyCode::Char('y')), &ui), Some(Action::ConfirmOpen)));
        assert!(matches!(map_key(press(KeyCode::Enter), &ui), Some(Action::ConfirmOpen)));
        assert!(matches!(map_key(press(KeyCode::Char('n')), &ui), Some(Action::CancelConfirm)));
        assert!(matches!(map_key(press(KeyCode::Esc), &ui), Some(Action::CancelConfirm)));
        assert!(map_key(press(KeyCode::Char('x')), &ui).is_none());
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for (mode, overlay) in [
            (UIMode::Browse, UIOverlay::None),
            (UIMode::Search, UIOverlay::None),
            (UIMode::Browse, UIOverlay::Help),
            (UIMode::Browse, UIOverlay::Confirm),
        ] {
            assert!(matches!(map_key(ctrl_c, &ui(mode, overlay)), Some(Action::Quit)));
        }
    }

    #[test]
    fn key_release_is_ignored() {
        let ui = ui(UIMode::Browse, UIOverlay::None);
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert!(map_key(key, &ui).is_none());
    }
}
