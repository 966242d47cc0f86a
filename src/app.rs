use ratatui::widgets::ListState;
use tracing::info;

use dsa_visualizer::phrases::{self, QUICK_REPLIES};
use dsa_visualizer::{Controller, Effect, IntroPath, TimerFired, TimerSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Catalog,
    ChatInput,
    QuickReplies,
}

/// Modal message box (the page's stand-in for browser alerts)
#[derive(Debug, Clone)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub controller: Controller,
    pub timers: TimerSet,
    pub focus: Focus,

    // Catalog state
    pub catalog_state: ListState,

    // Chat state
    pub chat_input: String,
    pub chat_cursor: usize, // cursor position in chat_input, in chars
    pub quick_reply_state: ListState,

    pub notice: Option<Notice>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    /// Set once the intro hands off to a destination page
    pub navigation: Option<String>,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl App {
    pub fn new(controller: Controller, timers: TimerSet) -> Self {
        let mut catalog_state = ListState::default();
        catalog_state.select(Some(0));

        Self {
            should_quit: false,
            controller,
            timers,
            focus: Focus::Catalog,
            catalog_state,
            chat_input: String::new(),
            chat_cursor: 0,
            quick_reply_state: ListState::default(),
            notice: None,
            animation_frame: 0,
            navigation: None,
        }
    }

    pub fn start(&mut self, skip_intro: bool) {
        let effects = self.controller.start();
        self.apply(effects);
        if skip_intro {
            self.skip_intro();
        }
    }

    /// Hand timer effects to the timer set and act on navigation.
    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in self.timers.apply(effects) {
            if let Effect::Navigate { target, .. } = effect {
                info!(%target, "leaving landing page");
                self.navigation = Some(target);
                self.should_quit = true;
            }
        }
    }

    pub fn on_timer(&mut self, fired: TimerFired) {
        if let Some(timer) = self.timers.accept(fired) {
            let effects = self.controller.timer_fired(timer);
            self.apply(effects);
        }
    }

    pub fn tick_animation(&mut self) {
        if self.controller.is_composing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    // Intro

    pub fn skip_intro(&mut self) {
        let effects = self.controller.skip_intro();
        self.apply(effects);
    }

    pub fn choose(&mut self, path: IntroPath) {
        let effects = self.controller.choose_intro_path(path);
        self.apply(effects);
    }

    // Catalog

    pub fn next_category(&mut self) {
        let next = self.controller.state().active_category().next();
        self.controller.set_category(next);
        self.catalog_state.select(Some(0));
    }

    pub fn prev_category(&mut self) {
        let prev = self.controller.state().active_category().prev();
        self.controller.set_category(prev);
        self.catalog_state.select(Some(0));
    }

    pub fn select_next_entry(&mut self) {
        let len = self.controller.visible_entries().len();
        if len > 0 {
            let i = self.catalog_state.selected().unwrap_or(0);
            self.catalog_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn select_prev_entry(&mut self) {
        let i = self.catalog_state.selected().unwrap_or(0);
        self.catalog_state.select(Some(i.saturating_sub(1)));
    }

    pub fn selected_entry_name(&self) -> Option<String> {
        let entries = self.controller.visible_entries();
        self.catalog_state
            .selected()
            .and_then(|i| entries.get(i))
            .map(|e| e.name.clone())
    }

    pub fn visualize_selected(&mut self) {
        if let Some(name) = self.selected_entry_name() {
            if self.controller.visualize(&name) {
                self.notice = Some(Notice {
                    title: name.clone(),
                    body: phrases::visualize_notice(&name),
                });
                self.focus = Focus::ChatInput;
            }
        }
    }

    pub fn show_practice(&mut self) {
        self.notice = Some(Notice {
            title: "Practice".to_string(),
            body: phrases::PRACTICE_NOTICE.to_string(),
        });
    }

    pub fn show_about(&mut self) {
        self.notice = Some(Notice {
            title: "About".to_string(),
            body: phrases::about_notice(),
        });
    }

    // Chat

    pub fn chat_open(&self) -> bool {
        self.controller.state().chat_open()
    }

    pub fn toggle_chat(&mut self) {
        self.controller.toggle_chat();
        self.focus = if self.chat_open() { Focus::ChatInput } else { Focus::Catalog };
    }

    pub fn close_chat(&mut self) {
        self.controller.close_chat();
        self.focus = Focus::Catalog;
    }

    pub fn send_chat_input(&mut self) {
        let text = std::mem::take(&mut self.chat_input);
        self.chat_cursor = 0;
        let effects = self.controller.submit_chat_text(&text);
        self.apply(effects);
    }

    pub fn send_quick_reply(&mut self, index: usize) {
        let effects = self.controller.quick_reply(index);
        self.apply(effects);
    }

    pub fn quick_reply_down(&mut self) {
        let i = self.quick_reply_state.selected().unwrap_or(0);
        self.quick_reply_state.select(Some((i + 1).min(QUICK_REPLIES.len() - 1)));
    }

    pub fn quick_reply_up(&mut self) {
        let i = self.quick_reply_state.selected().unwrap_or(0);
        self.quick_reply_state.select(Some(i.saturating_sub(1)));
    }

    pub fn focus_quick_replies(&mut self) {
        if self.quick_reply_state.selected().is_none() {
            self.quick_reply_state.select(Some(0));
        }
        self.focus = Focus::QuickReplies;
    }

    // Chat input editing

    pub fn insert_char(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.chat_input, self.chat_cursor);
        self.chat_input.insert(byte_pos, c);
        self.chat_cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.chat_cursor > 0 {
            self.chat_cursor -= 1;
            let byte_pos = char_to_byte_index(&self.chat_input, self.chat_cursor);
            self.chat_input.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.chat_cursor < self.chat_input.chars().count() {
            let byte_pos = char_to_byte_index(&self.chat_input, self.chat_cursor);
            self.chat_input.remove(byte_pos);
        }
    }

    pub fn cursor_left(&mut self) {
        self.chat_cursor = self.chat_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.chat_cursor = (self.chat_cursor + 1).min(self.chat_input.chars().count());
    }

    pub fn cursor_home(&mut self) {
        self.chat_cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.chat_cursor = self.chat_input.chars().count();
    }
}
