//! Canned-response chat with DSA Bot.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::classify;
use crate::config::Timings;
use crate::effect::{Effect, TimerId};
use crate::phrases::{self, PhraseKey};
use crate::state::AppState;

/// A chat message in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Bot, content: content.into() }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    // Replies waiting for their delay, keyed by reply id
    pending: BTreeMap<u64, PhraseKey>,
    next_reply_id: u64,
    greeted: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// True while at least one reply is still "being typed".
    pub fn is_composing(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_replies(&self) -> usize {
        self.pending.len()
    }

    pub fn open(&mut self, state: &mut AppState) {
        state.set_chat_open(true);
        if self.transcript.is_empty() && !self.greeted {
            self.transcript.push(ChatMessage::bot(PhraseKey::Greeting.text()));
        }
        // Seeding is a once-per-session thing, even if the first open found
        // messages already there.
        self.greeted = true;
    }

    pub fn close(&mut self, state: &mut AppState) {
        state.set_chat_open(false);
    }

    pub fn toggle(&mut self, state: &mut AppState) {
        if state.chat_open() {
            self.close(state);
        } else {
            self.open(state);
        }
    }

    /// Append the user's text and schedule the bot's answer.
    pub fn submit<R: Rng>(&mut self, text: &str, timings: &Timings, rng: &mut R) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() {
            debug!("ignoring empty chat submission");
            return Vec::new();
        }

        self.transcript.push(ChatMessage::user(text));

        let key = classify(text);
        let id = self.next_reply_id;
        self.next_reply_id += 1;
        self.pending.insert(id, key);
        debug!(id, ?key, "reply queued");

        let (min, max) = timings.reply_delay_bounds();
        let delay = Duration::from_millis(rng.gen_range(min..=max));
        vec![Effect::schedule(TimerId::ChatReply(id), delay)]
    }

    /// Deliver the reply for `id`. Unknown or already delivered ids are ignored.
    pub fn deliver(&mut self, id: u64) {
        match self.pending.remove(&id) {
            Some(key) => self.transcript.push(ChatMessage::bot(key.text())),
            None => debug!(id, "no pending reply"),
        }
    }

    /// Bot follow-up after the user launches a visualization.
    pub fn visualize(&mut self, name: &str, state: &mut AppState) {
        self.transcript.push(ChatMessage::bot(phrases::visualize_message(name)));
        if !state.chat_open() {
            self.open(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut chat = ChatSession::new();
        let timings = Timings::default();
        let mut rng = rng();

        assert!(chat.submit("", &timings, &mut rng).is_empty());
        assert!(chat.submit("   ", &timings, &mut rng).is_empty());
        assert!(chat.submit("\t\n", &timings, &mut rng).is_empty());
        assert!(chat.transcript().is_empty());
        assert!(!chat.is_composing());
    }

    #[test]
    fn test_submit_appends_user_then_reply_on_delivery() {
        let mut chat = ChatSession::new();
        let timings = Timings::default();
        let mut rng = rng();

        let effects = chat.submit("  What is DSA?  ", &timings, &mut rng);
        assert_eq!(chat.transcript(), &[ChatMessage::user("What is DSA?")]);
        assert!(chat.is_composing());

        let (timer, delay) = match effects.as_slice() {
            [Effect::Schedule { timer, delay }] => (*timer, *delay),
            other => panic!("unexpected effects: {:?}", other),
        };
        assert_eq!(timer, TimerId::ChatReply(0));
        assert!(delay >= Duration::from_millis(1000) && delay <= Duration::from_millis(2000));

        chat.deliver(0);
        assert!(!chat.is_composing());
        assert_eq!(chat.transcript()[1], ChatMessage::bot(PhraseKey::WhatIsDsa.text()));

        // Delivering twice changes nothing
        chat.deliver(0);
        assert_eq!(chat.transcript().len(), 2);
    }

    #[test]
    fn test_composing_until_all_replies_arrive() {
        let mut chat = ChatSession::new();
        let timings = Timings::default();
        let mut rng = rng();

        chat.submit("hello", &timings, &mut rng);
        chat.submit("thanks", &timings, &mut rng);
        assert_eq!(chat.pending_replies(), 2);

        chat.deliver(1);
        assert!(chat.is_composing());
        chat.deliver(0);
        assert!(!chat.is_composing());

        let roles: Vec<ChatRole> = chat.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::User, ChatRole::Bot, ChatRole::Bot]);
        assert_eq!(chat.transcript()[2].content, PhraseKey::Thanks.text());
    }

    #[test]
    fn test_greeting_seeded_once() {
        let mut chat = ChatSession::new();
        let mut state = AppState::new();

        chat.open(&mut state);
        chat.open(&mut state);
        assert!(state.chat_open());
        assert_eq!(chat.transcript(), &[ChatMessage::bot(PhraseKey::Greeting.text())]);

        chat.close(&mut state);
        assert!(!state.chat_open());
        chat.toggle(&mut state);
        assert!(state.chat_open());
        assert_eq!(chat.transcript().len(), 1);
    }

    #[test]
    fn test_visualize_opens_chat_without_greeting() {
        let mut chat = ChatSession::new();
        let mut state = AppState::new();

        chat.visualize("Quick Sort", &mut state);
        assert!(state.chat_open());
        assert_eq!(chat.transcript().len(), 1);
        assert!(chat.transcript()[0].content.starts_with("Great choice! Quick Sort"));
    }

    #[test]
    fn test_fixed_delay_when_bounds_equal() {
        let mut chat = ChatSession::new();
        let timings = Timings {
            reply_delay_min_ms: 250,
            reply_delay_max_ms: 250,
            ..Timings::default()
        };
        let effects = chat.submit("graphs", &timings, &mut rng());
        assert_eq!(
            effects,
            vec![Effect::schedule(TimerId::ChatReply(0), Duration::from_millis(250))]
        );
    }
}
