//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Top-level screen, derived from whether a session token is present
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Screen {
    #[default]
    Auth,
    Main,
}

/// Views reachable from the navigation bar once signed in
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum View {
    #[default]
    Feed,
    Rates,
}

impl View {
    pub fn toggle(&self) -> View {
        match self {
            View::Feed => View::Rates,
            View::Rates => View::Feed,
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    SwitchView(View),
    ToggleView,
    SelectPrev,
    SelectNext,

    // Text entry
    StartComposing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,
    PrevField,
    /// Enter: submits the auth form, or advances/submits the composer
    Confirm,

    // Auth screen
    ToggleAuthMode,

    // Feed actions
    LikeSelected,
    Reload,
    Logout,

    // Popups
    ToggleHelp,
    CloseHelp,
    DismissAlert,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Auth form field
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

impl AuthField {
    pub fn next(&self) -> AuthField {
        match self {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        }
    }
}

/// Composer field
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum ComposerField {
    #[default]
    Title,
    Content,
    Author,
}

impl ComposerField {
    pub fn next(&self) -> ComposerField {
        match self {
            ComposerField::Title => ComposerField::Content,
            ComposerField::Content => ComposerField::Author,
            ComposerField::Author => ComposerField::Title,
        }
    }

    pub fn prev(&self) -> ComposerField {
        match self {
            ComposerField::Title => ComposerField::Author,
            ComposerField::Content => ComposerField::Title,
            ComposerField::Author => ComposerField::Content,
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    screen: Screen,
    view: View,
    input_mode: InputMode,
    show_help: bool,
    has_alert: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('t') if screen == Screen::Auth => {
                return Some(UiEvent::ToggleAuthMode)
            }
            _ => {}
        }
    }

    // A blocking alert swallows everything until dismissed
    if has_alert {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(UiEvent::DismissAlert),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match screen {
        Screen::Auth => handle_auth_keys(key),
        Screen::Main => handle_main_keys(key, view, input_mode),
    }
}

/// The auth form is always in text entry
fn handle_auth_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::F(2) => Some(UiEvent::ToggleAuthMode),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Enter => Some(UiEvent::Confirm),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_main_keys(key: KeyEvent, view: View, input_mode: InputMode) -> Option<UiEvent> {
    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('1') => Some(UiEvent::SwitchView(View::Feed)),
            KeyCode::Char('2') => Some(UiEvent::SwitchView(View::Rates)),
            KeyCode::Tab => Some(UiEvent::ToggleView),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            KeyCode::Char('r') => Some(UiEvent::Reload),
            KeyCode::Char('o') => Some(UiEvent::Logout),
            KeyCode::Char('n') | KeyCode::Char('e') if view == View::Feed => {
                Some(UiEvent::StartComposing)
            }
            KeyCode::Char('l') | KeyCode::Enter if view == View::Feed => {
                Some(UiEvent::LikeSelected)
            }
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::BackTab => Some(UiEvent::PrevField),
            KeyCode::Enter => Some(UiEvent::Confirm),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_auth_screen_types_letters() {
        let ev = key_to_ui_event(
            press(KeyCode::Char('q')),
            Screen::Auth,
            View::Feed,
            InputMode::Normal,
            false,
            false,
        );
        assert_eq!(ev, Some(UiEvent::CharInput('q')));
    }

    #[test]
    fn test_alert_blocks_other_keys() {
        let ev = key_to_ui_event(
            press(KeyCode::Char('q')),
            Screen::Main,
            View::Feed,
            InputMode::Normal,
            false,
            true,
        );
        assert_eq!(ev, None);

        let ev = key_to_ui_event(
            press(KeyCode::Enter),
            Screen::Main,
            View::Feed,
            InputMode::Normal,
            false,
            true,
        );
        assert_eq!(ev, Some(UiEvent::DismissAlert));
    }

    #[test]
    fn test_like_only_on_feed() {
        let on_feed = key_to_ui_event(
            press(KeyCode::Char('l')),
            Screen::Main,
            View::Feed,
            InputMode::Normal,
            false,
            false,
        );
        assert_eq!(on_feed, Some(UiEvent::LikeSelected));

        let on_rates = key_to_ui_event(
            press(KeyCode::Char('l')),
            Screen::Main,
            View::Rates,
            InputMode::Normal,
            false,
            false,
        );
        assert_eq!(on_rates, None);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let ev = key_to_ui_event(key, Screen::Main, View::Feed, InputMode::Editing, false, true);
        assert_eq!(ev, Some(UiEvent::Quit));
    }
}
