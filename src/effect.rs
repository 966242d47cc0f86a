//! Effects returned by controller inputs, executed by the front end.

use std::time::Duration;

use crate::intro::IntroPath;

/// Identity of a scheduled timer. Scheduling an id that is already pending
/// replaces the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Next intro status line
    IntroStep,
    /// Robot has materialized, show the two choices
    RevealChoices,
    /// Decorative particle spawn
    Particles,
    /// Fade the choice buttons after a choice
    HideChoices,
    /// Start the farewell animation
    Goodbye,
    /// Perform the navigation
    Redirect,
    /// Deliver the bot reply for a submitted chat message
    ChatReply(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire `timer` after `delay`
    Schedule { timer: TimerId, delay: Duration },

    /// Drop a pending timer
    Cancel(TimerId),

    /// Leave the landing page for `target`. Emitted at most once.
    Navigate { path: IntroPath, target: String },
}

impl Effect {
    pub fn schedule(timer: TimerId, delay: Duration) -> Self {
        Effect::Schedule { timer, delay }
    }
}
