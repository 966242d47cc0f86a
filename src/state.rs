//! UI-agnostic application state.
//!
//! The flags are private so that `redirect_in_flight` can only be raised
//! together with `intro_completed`.

use crate::catalog::Category;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    active_category: Category,
    chat_open: bool,
    intro_completed: bool,
    redirect_in_flight: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_category(&self) -> Category {
        self.active_category
    }

    pub fn chat_open(&self) -> bool {
        self.chat_open
    }

    pub fn intro_completed(&self) -> bool {
        self.intro_completed
    }

    pub fn redirect_in_flight(&self) -> bool {
        self.redirect_in_flight
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.active_category = category;
    }

    pub(crate) fn set_chat_open(&mut self, open: bool) {
        self.chat_open = open;
    }

    /// Mark the intro as finished without navigating away (skip).
    pub(crate) fn complete_intro(&mut self) {
        self.intro_completed = true;
    }

    /// Mark the intro as finished and a redirect as pending, in one step.
    pub(crate) fn begin_redirect(&mut self) {
        self.intro_completed = true;
        self.redirect_in_flight = true;
    }

    /// True while intro timers are still allowed to act.
    pub fn intro_running(&self) -> bool {
        !self.intro_completed && !self.redirect_in_flight
    }
}
