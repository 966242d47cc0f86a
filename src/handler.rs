use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use dsa_visualizer::phrases::QUICK_REPLIES;
use dsa_visualizer::IntroPath;
use crate::app::{App, Focus};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Timer(fired) => app.on_timer(fired),
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if is_ctrl(&key, 'c') {
        app.should_quit = true;
        return;
    }

    // Any key dismisses a notice
    if app.notice.take().is_some() {
        return;
    }

    if !app.controller.intro_phase().is_terminal() {
        handle_intro(app, key);
        return;
    }

    if is_ctrl(&key, 'k') {
        if app.controller.chat_available() {
            app.toggle_chat();
        }
        return;
    }

    if app.chat_open() {
        match app.focus {
            Focus::ChatInput => return handle_chat_input(app, key),
            Focus::QuickReplies => return handle_quick_replies(app, key),
            Focus::Catalog => {}
        }
    }

    handle_catalog(app, key);
}

fn handle_intro(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('s') => app.skip_intro(),
        KeyCode::Char('a') | KeyCode::Char('1') | KeyCode::Left => app.choose(IntroPath::Algorithms),
        KeyCode::Char('d') | KeyCode::Char('2') | KeyCode::Right => app.choose(IntroPath::DataStructures),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_catalog(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Categories
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => app.next_category(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => app.prev_category(),

        // Entries
        KeyCode::Char('j') | KeyCode::Down => app.select_next_entry(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_entry(),
        KeyCode::Enter | KeyCode::Char('v') => app.visualize_selected(),

        // Chat
        KeyCode::Char('c') if app.controller.chat_available() => app.toggle_chat(),
        KeyCode::Char('i') if app.chat_open() => app.focus = Focus::ChatInput,
        KeyCode::Esc if app.chat_open() => app.close_chat(),

        // Menu
        KeyCode::Char('p') => app.show_practice(),
        KeyCode::Char('?') => app.show_about(),

        _ => {}
    }
}

fn handle_chat_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_chat(),
        KeyCode::Enter => app.send_chat_input(),
        KeyCode::Tab => app.focus_quick_replies(),
        KeyCode::BackTab => app.focus = Focus::Catalog,
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Home => app.cursor_home(),
        KeyCode::End => app.cursor_end(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}

fn handle_quick_replies(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_chat(),
        KeyCode::Tab | KeyCode::Char('i') => app.focus = Focus::ChatInput,
        KeyCode::BackTab => app.focus = Focus::Catalog,
        KeyCode::Char('j') | KeyCode::Down => app.quick_reply_down(),
        KeyCode::Char('k') | KeyCode::Up => app.quick_reply_up(),
        KeyCode::Enter => {
            if let Some(i) = app.quick_reply_state.selected() {
                app.send_quick_reply(i);
            }
        }
        KeyCode::Char(c) => {
            if let Some(i) = c.to_digit(10).and_then(|d| (d as usize).checked_sub(1)) {
                if i < QUICK_REPLIES.len() {
                    app.send_quick_reply(i);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_visualizer::phrases::PhraseKey;
    use dsa_visualizer::{ChatRole, Config, Controller, IntroPhase, TimerSet};

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn started_app() -> App {
        let (timers, _rx) = TimerSet::channel();
        let mut app = App::new(Controller::with_seed(&Config::default(), 5), timers);
        app.start(false);
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_skips_intro_then_closes_chat() {
        let mut app = started_app();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.controller.intro_phase(), IntroPhase::Skipped);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.chat_open());
        assert_eq!(app.controller.transcript()[0].content, PhraseKey::Greeting.text());

        press(&mut app, KeyCode::Esc);
        assert!(!app.chat_open());
        assert_eq!(app.focus, Focus::Catalog);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_keys_stay_in_intro_until_skipped() {
        let mut app = started_app();
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert!(!app.chat_open());
        press(&mut app, KeyCode::Char('c'));
        assert!(!app.chat_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_and_sending() {
        let mut app = started_app();
        press(&mut app, KeyCode::Esc);
        handle_key(&mut app, KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(app.focus, Focus::ChatInput);

        for c in "big o?".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.chat_input.is_empty());

        let last = app.controller.transcript().last().cloned();
        assert_eq!(last.map(|m| (m.role, m.content)), Some((ChatRole::User, "big o?".to_string())));
        assert!(app.controller.is_composing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_reply_by_number() {
        let mut app = started_app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('c'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::QuickReplies);

        press(&mut app, KeyCode::Char('6'));
        let last = app.controller.transcript().last().map(|m| m.content.clone());
        assert_eq!(last.as_deref(), Some("Interview preparation"));

        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.controller.transcript().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notice_swallows_next_key() {
        let mut app = started_app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.notice.is_some());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.notice.is_none());
        assert!(!app.should_quit);
    }
}
