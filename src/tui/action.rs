use crate::tui::state::InputMode;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Previous,
    JumpForward(usize),
    JumpBackward(usize),
    ToggleFocus,
    SwitchView,
    NextDay,
    PreviousDay,
    Toggle,
    ClearSelection,
    ImportSelection,
    ExportSelection,
    ReloadLineup,
    StartSearch,
    StartAlias,
    SaveAliases,
    TextInput(char),
    TextBackspace,
    Submit,
    Cancel,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent, mode: InputMode) -> Action {
    match mode {
        InputMode::Searching | InputMode::EditingAlias => match key.code {
            KeyCode::Enter => Action::Submit,
            KeyCode::Esc => Action::Cancel,
            KeyCode::Backspace => Action::TextBackspace,
            KeyCode::Char(c) => Action::TextInput(c),
            _ => Action::None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Down | KeyCode::Char('j') => Action::Next,
            KeyCode::Up | KeyCode::Char('k') => Action::Previous,
            KeyCode::PageDown => Action::JumpForward(10),
            KeyCode::PageUp => Action::JumpBackward(10),
            KeyCode::Right | KeyCode::Char('l') => Action::NextDay,
            KeyCode::Left | KeyCode::Char('h') => Action::PreviousDay,
            KeyCode::Tab => Action::ToggleFocus,
            KeyCode::Char('v') => Action::SwitchView,
            KeyCode::Char(' ') | KeyCode::Enter => Action::Toggle,
            KeyCode::Char('c') => Action::ClearSelection,
            KeyCode::Char('i') => Action::ImportSelection,
            KeyCode::Char('e') => Action::ExportSelection,
            KeyCode::Char('r') => Action::ReloadLineup,
            KeyCode::Char('/') => Action::StartSearch,
            KeyCode::Char('a') => Action::StartAlias,
            KeyCode::Char('A') => Action::SaveAliases,
            _ => Action::None,
        },
    }
}

pub fn map_mouse(mouse: MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Next,
        MouseEventKind::ScrollUp => Action::Previous,
        _ => Action::None,
    }
}
