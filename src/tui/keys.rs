/// Keyboard event to action mapping
///
/// Which action a key means depends on whether the popover is open, which
/// part has focus, and the trigger style.
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use crate::config::TriggerStyle;

use super::action::Action;
use super::app::{App, Focus};

/// Days moved by Up/Down
const WEEK: i64 = 7;

/// Months moved by PageUp/PageDown
const YEAR: i32 = 12;

pub fn key_to_action(key: KeyEvent, app: &App) -> Option<Action> {
    trace!("KEY: {:?} (open: {}, focus: {:?})", key.code, app.is_open(), app.focus());

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('u') => Some(Action::ClearText),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc if app.is_open() => {
            debug!("KEY: ESC with popover open - closing");
            return Some(Action::Close);
        }
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Tab | KeyCode::BackTab if app.is_open() => return Some(Action::ToggleFocus),
        _ => {}
    }

    if app.is_open() && app.focus() == Focus::Calendar {
        return calendar_key(key.code);
    }

    match app.trigger() {
        TriggerStyle::Input => input_key(key.code, app.is_open()),
        TriggerStyle::Button => button_key(key.code, app.is_open()),
    }
}

fn calendar_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left => Some(Action::MoveCursor(-1)),
        KeyCode::Right => Some(Action::MoveCursor(1)),
        KeyCode::Up => Some(Action::MoveCursor(-WEEK)),
        KeyCode::Down => Some(Action::MoveCursor(WEEK)),
        KeyCode::Char('<') => Some(Action::NavigateMonths(-1)),
        KeyCode::Char('>') => Some(Action::NavigateMonths(1)),
        KeyCode::PageUp => Some(Action::NavigateMonths(-YEAR)),
        KeyCode::PageDown => Some(Action::NavigateMonths(YEAR)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::SelectCursor),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        _ => None,
    }
}

fn input_key(code: KeyCode, open: bool) -> Option<Action> {
    match code {
        // Space opens a closed picker instead of typing
        KeyCode::Char(' ') if !open => Some(Action::Open),
        KeyCode::Char(c) => Some(Action::TypeChar(c)),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Enter | KeyCode::Down if !open => Some(Action::Open),
        KeyCode::Enter | KeyCode::Down => Some(Action::ToggleFocus),
        _ => None,
    }
}

fn button_key(code: KeyCode, open: bool) -> Option<Action> {
    match code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down if !open => Some(Action::Open),
        KeyCode::Enter | KeyCode::Down => Some(Action::ToggleFocus),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;

    use crate::picker::{FixedClock, SingleProps};

    fn app(trigger: TriggerStyle) -> App {
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()));
        App::single(SingleProps::default(), trigger, clock)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_esc_closes_then_quits() {
        let mut app = app(TriggerStyle::Button);
        app.handle(Action::Open);
        assert_eq!(key_to_action(key(KeyCode::Esc), &app), Some(Action::Close));
        app.handle(Action::Close);
        assert_eq!(key_to_action(key(KeyCode::Esc), &app), Some(Action::Quit));
    }

    #[test]
    fn test_calendar_keys() {
        let mut app = app(TriggerStyle::Button);
        app.handle(Action::Open);
        assert_eq!(key_to_action(key(KeyCode::Up), &app), Some(Action::MoveCursor(-7)));
        assert_eq!(key_to_action(key(KeyCode::Right), &app), Some(Action::MoveCursor(1)));
        assert_eq!(key_to_action(key(KeyCode::Char('>')), &app), Some(Action::NavigateMonths(1)));
        assert_eq!(key_to_action(key(KeyCode::PageUp), &app), Some(Action::NavigateMonths(-12)));
        assert_eq!(key_to_action(key(KeyCode::Enter), &app), Some(Action::SelectCursor));
        assert_eq!(key_to_action(key(KeyCode::Char('q')), &app), Some(Action::Quit));
    }

    #[test]
    fn test_input_keys() {
        let mut app = app(TriggerStyle::Input);
        assert_eq!(key_to_action(key(KeyCode::Char('2')), &app), Some(Action::TypeChar('2')));
        assert_eq!(key_to_action(key(KeyCode::Char(' ')), &app), Some(Action::Open));
        assert_eq!(key_to_action(key(KeyCode::Char('q')), &app), Some(Action::TypeChar('q')));
        assert_eq!(key_to_action(key(KeyCode::Backspace), &app), Some(Action::Backspace));
        assert_eq!(
            key_to_action(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL), &app),
            Some(Action::ClearText)
        );

        app.handle(Action::Open);
        app.handle(Action::ToggleFocus);
        assert_eq!(app.focus(), Focus::Input);
        assert_eq!(key_to_action(key(KeyCode::Char(' ')), &app), Some(Action::TypeChar(' ')));
        assert_eq!(key_to_action(key(KeyCode::Tab), &app), Some(Action::ToggleFocus));
    }

    #[test]
    fn test_button_ignores_typing() {
        let app = app(TriggerStyle::Button);
        assert_eq!(key_to_action(key(KeyCode::Char('2')), &app), None);
        assert_eq!(key_to_action(key(KeyCode::Enter), &app), Some(Action::Open));
        assert_eq!(key_to_action(key(KeyCode::Tab), &app), None);
    }
}
