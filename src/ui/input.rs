//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::{Action, Effect};
use super::state::{App, Focus};

/// 根据当前焦点和按键获取对应的 Action
pub fn get_action(focus: Focus, key: KeyEvent) -> Option<Action> {
    // 全局快捷键，与焦点无关
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('s') => Some(Action::Submit),
            KeyCode::Char('u') => Some(Action::Reset),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab => return Some(Action::FocusNext),
        KeyCode::PageUp => return Some(Action::ScrollUp),
        KeyCode::PageDown => return Some(Action::ScrollDown),
        _ => {}
    }

    match focus {
        Focus::Question => match key.code {
            KeyCode::Enter => Some(Action::NewLine),
            KeyCode::Backspace => Some(Action::DeleteChar),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        },
        Focus::SubmitButton => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Submit),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<Effect> {
    get_action(app.focus, key).and_then(|action| app.dispatch(action))
}
