//! Single owner of the landing page state.
//!
//! Every input returns the effects the front end has to carry out. Fired
//! timers come back through [`Controller::timer_fired`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogEntry, Category};
use crate::chat::{ChatMessage, ChatSession};
use crate::config::{Config, NavigationTargets, Timings};
use crate::effect::{Effect, TimerId};
use crate::intro::{IntroPath, IntroPhase, IntroSequencer};
use crate::phrases::QUICK_REPLIES;
use crate::state::AppState;

pub struct Controller {
    state: AppState,
    intro: IntroSequencer,
    chat: ChatSession,
    catalog: Catalog,
    timings: Timings,
    targets: NavigationTargets,
    rng: StdRng,
}

impl Controller {
    pub fn new(config: &Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic controller for tests and replays.
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &Config, rng: StdRng) -> Self {
        Self {
            state: AppState::new(),
            intro: IntroSequencer::new(),
            chat: ChatSession::new(),
            catalog: Catalog::new(),
            timings: config.timings.clone(),
            targets: config.targets.clone(),
            rng,
        }
    }

    // Inputs

    pub fn start(&mut self) -> Vec<Effect> {
        self.intro.start(&self.timings)
    }

    pub fn choose_intro_path(&mut self, path: IntroPath) -> Vec<Effect> {
        self.intro.choose(path, &mut self.state, &self.timings)
    }

    pub fn skip_intro(&mut self) -> Vec<Effect> {
        self.intro.skip(&mut self.state)
    }

    pub fn set_category(&mut self, category: Category) {
        debug!(category = category.as_str(), "category changed");
        self.state.set_category(category);
    }

    pub fn submit_chat_text(&mut self, text: &str) -> Vec<Effect> {
        self.chat.submit(text, &self.timings, &mut self.rng)
    }

    /// Send the quick reply at `index`, exactly as if it had been typed.
    pub fn quick_reply(&mut self, index: usize) -> Vec<Effect> {
        match QUICK_REPLIES.get(index) {
            Some(text) => self.submit_chat_text(text),
            None => {
                debug!(index, "no such quick reply");
                Vec::new()
            }
        }
    }

    pub fn open_chat(&mut self) {
        self.chat.open(&mut self.state);
    }

    pub fn close_chat(&mut self) {
        self.chat.close(&mut self.state);
    }

    pub fn toggle_chat(&mut self) {
        self.chat.toggle(&mut self.state);
    }

    /// Launch the (stub) visualization for a catalog entry by name.
    /// Returns false when no entry has that name.
    pub fn visualize(&mut self, name: &str) -> bool {
        let Some(entry) = self.catalog.find(name) else {
            debug!(name, "visualize on unknown entry");
            return false;
        };
        let name = entry.name.clone();
        info!(%name, "visualization requested");
        self.chat.visualize(&name, &mut self.state);
        true
    }

    pub fn timer_fired(&mut self, timer: TimerId) -> Vec<Effect> {
        match timer {
            TimerId::IntroStep => self.intro.on_status_step(&self.state, &self.timings),
            TimerId::RevealChoices => self.intro.on_reveal_choices(&self.state),
            TimerId::Particles => self.intro.on_particles(&self.state, &self.timings, &mut self.rng),
            TimerId::HideChoices => self.intro.on_hide_choices(),
            TimerId::Goodbye => self.intro.on_goodbye(&self.timings),
            TimerId::Redirect => self.intro.on_redirect(&self.targets),
            TimerId::ChatReply(id) => {
                self.chat.deliver(id);
                Vec::new()
            }
        }
    }

    // Projections

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn intro(&self) -> &IntroSequencer {
        &self.intro
    }

    pub fn intro_phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        self.chat.transcript()
    }

    pub fn is_composing(&self) -> bool {
        self.chat.is_composing()
    }

    pub fn visible_entries(&self) -> Vec<&CatalogEntry> {
        self.catalog.entries(self.state.active_category())
    }

    /// The chat affordance appears once the intro was skipped.
    pub fn chat_available(&self) -> bool {
        self.intro.phase() == IntroPhase::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrases::{PhraseKey, INTRO_MESSAGES};

    fn controller() -> Controller {
        Controller::with_seed(&Config::default(), 3)
    }

    /// Fire timers in scheduling order until nothing is pending, like a
    /// clock that jumps straight to the next deadline. Cancelled timers are
    /// still delivered afterwards to exercise the guards.
    fn drain(ctrl: &mut Controller, mut effects: Vec<Effect>) -> Vec<Effect> {
        let mut emitted = Vec::new();
        let mut cancelled = Vec::new();
        let mut steps = 0;
        while !effects.is_empty() {
            steps += 1;
            assert!(steps < 10_000, "timers never settled");
            let mut next = Vec::new();
            for effect in effects {
                match effect {
                    Effect::Schedule { timer, .. } => next.extend(ctrl.timer_fired(timer)),
                    Effect::Cancel(timer) => cancelled.push(timer),
                    navigate @ Effect::Navigate { .. } => emitted.push(navigate),
                }
            }
            effects = next;
        }
        for timer in cancelled {
            emitted.extend(ctrl.timer_fired(timer));
        }
        emitted
    }

    fn advance_to_choice(ctrl: &mut Controller) {
        ctrl.start();
        // Run only the intro script (not particles) until choices show up
        for _ in 0..=INTRO_MESSAGES.len() {
            assert_eq!(ctrl.timer_fired(TimerId::IntroStep).len(), 1);
        }
        ctrl.timer_fired(TimerId::RevealChoices);
        assert_eq!(ctrl.intro_phase(), IntroPhase::AwaitingChoice);
    }

    #[test]
    fn test_double_choice_navigates_once_to_first_path() {
        let mut ctrl = controller();
        advance_to_choice(&mut ctrl);

        let mut effects = ctrl.choose_intro_path(IntroPath::Algorithms);
        effects.extend(ctrl.choose_intro_path(IntroPath::DataStructures));

        let emitted = drain(&mut ctrl, effects);
        assert_eq!(
            emitted,
            vec![Effect::Navigate {
                path: IntroPath::Algorithms,
                target: "algorithms.html".to_string(),
            }]
        );
        assert_eq!(ctrl.intro_phase(), IntroPhase::Redirected);
        assert_eq!(ctrl.intro().choice(), Some(IntroPath::Algorithms));

        // Replaying every intro timer after the redirect is inert
        for timer in [TimerId::IntroStep, TimerId::RevealChoices, TimerId::Goodbye, TimerId::Redirect] {
            assert!(ctrl.timer_fired(timer).is_empty());
        }
    }

    #[test]
    fn test_full_run_keeps_redirect_invariant() {
        let mut ctrl = controller();
        let mut effects = ctrl.start();
        let mut navigations = 0;
        let mut steps = 0;

        while let Some(effect) = effects.pop() {
            steps += 1;
            assert!(steps < 10_000);
            match effect {
                Effect::Schedule { timer, .. } => effects.extend(ctrl.timer_fired(timer)),
                Effect::Navigate { .. } => navigations += 1,
                Effect::Cancel(_) => {}
            }
            if ctrl.intro_phase() == IntroPhase::AwaitingChoice && ctrl.intro().choice().is_none() {
                effects.extend(ctrl.choose_intro_path(IntroPath::DataStructures));
            }
            let state = ctrl.state();
            assert!(!state.redirect_in_flight() || state.intro_completed());
        }

        assert_eq!(navigations, 1);
        assert_eq!(ctrl.intro_phase(), IntroPhase::Redirected);
    }

    #[test]
    fn test_skip_twice_stays_skipped_and_unlocks_chat() {
        let mut ctrl = controller();
        let effects = ctrl.start();
        assert!(!ctrl.chat_available());

        let mut skip_effects = ctrl.skip_intro();
        skip_effects.extend(ctrl.skip_intro());
        assert_eq!(ctrl.intro_phase(), IntroPhase::Skipped);
        assert!(ctrl.chat_available());

        // Timers that were already in flight when skip happened
        let emitted = drain(&mut ctrl, effects);
        assert!(emitted.is_empty());
        assert_eq!(ctrl.intro_phase(), IntroPhase::Skipped);
        assert!(ctrl.intro().particles().is_empty());
    }

    #[test]
    fn test_category_filter() {
        let mut ctrl = controller();
        ctrl.set_category(Category::Trees);
        let names: Vec<&str> = ctrl.visible_entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Binary Tree", "BST", "AVL Tree"]);

        ctrl.set_category(Category::All);
        assert_eq!(ctrl.visible_entries().len(), 13);
        assert_eq!(ctrl.state().active_category(), Category::All);
    }

    #[test]
    fn test_open_chat_twice_greets_once() {
        let mut ctrl = controller();
        ctrl.open_chat();
        ctrl.open_chat();
        assert_eq!(ctrl.transcript().len(), 1);
        assert_eq!(ctrl.transcript()[0].content, PhraseKey::Greeting.text());
    }

    #[test]
    fn test_quick_reply_round_trip() {
        let mut ctrl = controller();
        ctrl.open_chat();
        let effects = ctrl.quick_reply(4);
        assert_eq!(ctrl.transcript()[1], ChatMessage::user("Give me study tips"));
        assert!(ctrl.is_composing());

        drain(&mut ctrl, effects);
        assert!(!ctrl.is_composing());
        assert_eq!(ctrl.transcript()[2], ChatMessage::bot(PhraseKey::StudyTips.text()));

        assert!(ctrl.quick_reply(99).is_empty());
        assert_eq!(ctrl.transcript().len(), 3);
    }

    #[test]
    fn test_blank_chat_text_leaves_transcript() {
        let mut ctrl = controller();
        assert!(ctrl.submit_chat_text("").is_empty());
        assert!(ctrl.submit_chat_text("   ").is_empty());
        assert!(ctrl.transcript().is_empty());
    }

    #[test]
    fn test_visualize_known_and_unknown() {
        let mut ctrl = controller();
        assert!(ctrl.visualize("merge sort"));
        assert!(ctrl.state().chat_open());
        assert!(ctrl.transcript()[0].content.contains("Merge Sort"));

        assert!(!ctrl.visualize("Bogo Sort"));
        assert_eq!(ctrl.transcript().len(), 1);
    }
}
