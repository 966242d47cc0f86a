//! Robot onboarding sequence.
//!
//! Phases run `Loading -> RobotVisible -> AwaitingChoice -> Farewell ->
//! Redirected`, with `Skipped` reachable from any phase before `Farewell`.
//! Every handler checks the phase first: a timer that was already queued when
//! it got cancelled still arrives here and must do nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{NavigationTargets, Timings};
use crate::effect::{Effect, TimerId};
use crate::phrases::{PhraseKey, INTRO_MESSAGES};
use crate::state::AppState;

/// Total particles spawned over the whole intro.
const PARTICLE_BUDGET: usize = 100;
/// Ticks a particle stays on screen.
const PARTICLE_LIFETIME: u8 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntroPath {
    Algorithms,
    #[serde(rename = "datastructures")]
    DataStructures,
}

impl IntroPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntroPath::Algorithms => "algorithms",
            IntroPath::DataStructures => "datastructures",
        }
    }

    fn speech_title(&self) -> &'static str {
        match self {
            IntroPath::Algorithms => "Excellent Choice! 🔄",
            IntroPath::DataStructures => "Perfect Choice! 🏗️",
        }
    }

    fn phrase(&self) -> PhraseKey {
        match self {
            IntroPath::Algorithms => PhraseKey::AlgorithmsChoice,
            IntroPath::DataStructures => PhraseKey::DataStructureChoice,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntroPhase {
    Loading,
    RobotVisible,
    AwaitingChoice,
    Farewell,
    Redirected,
    Skipped,
}

impl IntroPhase {
    /// Phases from which skip is still accepted.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            IntroPhase::Loading | IntroPhase::RobotVisible | IntroPhase::AwaitingChoice
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, IntroPhase::Redirected | IntroPhase::Skipped)
    }
}

/// Decorative sparkle drifting across the intro overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Horizontal position as a fraction of the overlay width (0.0..1.0)
    pub column: f32,
    pub age: u8,
}

#[derive(Debug, Clone)]
pub struct IntroSequencer {
    phase: IntroPhase,
    next_status: usize,
    status: Option<&'static str>,
    choice: Option<IntroPath>,
    choices_visible: bool,
    farewell_playing: bool,
    particles: Vec<Particle>,
    particles_spawned: usize,
}

impl IntroSequencer {
    pub fn new() -> Self {
        Self {
            phase: IntroPhase::Loading,
            next_status: 0,
            status: None,
            choice: None,
            choices_visible: false,
            farewell_playing: false,
            particles: Vec::new(),
            particles_spawned: 0,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Status line currently displayed while loading.
    pub fn status(&self) -> Option<&'static str> {
        self.status
    }

    pub fn choice(&self) -> Option<IntroPath> {
        self.choice
    }

    /// Whether the two choice buttons are on screen.
    pub fn choices_visible(&self) -> bool {
        self.choices_visible
    }

    /// Whether the choice buttons accept input.
    pub fn choices_enabled(&self) -> bool {
        self.phase == IntroPhase::AwaitingChoice
    }

    pub fn robot_visible(&self) -> bool {
        matches!(
            self.phase,
            IntroPhase::RobotVisible | IntroPhase::AwaitingChoice | IntroPhase::Farewell
        )
    }

    pub fn farewell_playing(&self) -> bool {
        self.farewell_playing
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn speech_title(&self) -> &'static str {
        match self.choice {
            Some(path) => path.speech_title(),
            None => "Hi, I'm DSA Bot! 👋",
        }
    }

    pub fn speech_text(&self) -> String {
        match self.choice {
            Some(path) => format!("{} {}", path.phrase().text(), PhraseKey::Goodbye.text()),
            None => "I'll be your guide today. What would you like to explore first?".to_string(),
        }
    }

    /// Kick off the status cycle and the particle system.
    pub fn start(&mut self, timings: &Timings) -> Vec<Effect> {
        if self.phase != IntroPhase::Loading || self.next_status > 0 {
            debug!(phase = ?self.phase, "intro already started");
            return Vec::new();
        }
        info!("intro started");
        vec![
            Effect::schedule(TimerId::IntroStep, timings.status_interval()),
            Effect::schedule(TimerId::Particles, timings.particle_delay()),
        ]
    }

    /// Show the next status line, or hand over to the robot once the script ran out.
    pub fn on_status_step(&mut self, state: &AppState, timings: &Timings) -> Vec<Effect> {
        if self.phase != IntroPhase::Loading || !state.intro_running() {
            debug!(phase = ?self.phase, "ignoring stale status step");
            return Vec::new();
        }

        if let Some(line) = INTRO_MESSAGES.get(self.next_status) {
            self.status = Some(line);
            self.next_status += 1;
            return vec![Effect::schedule(TimerId::IntroStep, timings.status_interval())];
        }

        self.status = None;
        self.phase = IntroPhase::RobotVisible;
        info!("robot visible");
        vec![Effect::schedule(TimerId::RevealChoices, timings.reveal_delay())]
    }

    pub fn on_reveal_choices(&mut self, state: &AppState) -> Vec<Effect> {
        if self.phase != IntroPhase::RobotVisible || !state.intro_running() {
            debug!(phase = ?self.phase, "ignoring stale reveal");
            return Vec::new();
        }
        self.phase = IntroPhase::AwaitingChoice;
        self.choices_visible = true;
        info!("awaiting intro choice");
        Vec::new()
    }

    /// Record the user's path. Only the first accepted call has any effect.
    pub fn choose(&mut self, path: IntroPath, state: &mut AppState, timings: &Timings) -> Vec<Effect> {
        if self.phase != IntroPhase::AwaitingChoice || !state.intro_running() {
            debug!(?path, phase = ?self.phase, "ignoring intro choice");
            return Vec::new();
        }

        state.begin_redirect();
        self.choice = Some(path);
        self.phase = IntroPhase::Farewell;
        self.particles.clear();
        info!(path = path.as_str(), "intro choice recorded");

        vec![
            Effect::Cancel(TimerId::IntroStep),
            Effect::Cancel(TimerId::RevealChoices),
            Effect::Cancel(TimerId::Particles),
            Effect::schedule(TimerId::HideChoices, timings.hide_choices_delay()),
            Effect::schedule(TimerId::Goodbye, timings.farewell_delay(path)),
        ]
    }

    pub fn on_hide_choices(&mut self) -> Vec<Effect> {
        if self.phase != IntroPhase::Farewell {
            return Vec::new();
        }
        self.choices_visible = false;
        Vec::new()
    }

    pub fn on_goodbye(&mut self, timings: &Timings) -> Vec<Effect> {
        if self.phase != IntroPhase::Farewell || self.farewell_playing {
            debug!(phase = ?self.phase, "ignoring goodbye");
            return Vec::new();
        }
        self.farewell_playing = true;
        vec![Effect::schedule(TimerId::Redirect, timings.redirect_delay())]
    }

    /// Finish the farewell and emit the one navigation intent.
    pub fn on_redirect(&mut self, targets: &NavigationTargets) -> Vec<Effect> {
        let path = match (self.phase, self.choice) {
            (IntroPhase::Farewell, Some(path)) if self.farewell_playing => path,
            _ => {
                debug!(phase = ?self.phase, "ignoring redirect");
                return Vec::new();
            }
        };

        self.phase = IntroPhase::Redirected;
        let target = targets.target(path).to_string();
        info!(path = path.as_str(), %target, "redirecting");
        vec![Effect::Navigate { path, target }]
    }

    /// Abandon the intro. Idempotent, and refused once a choice was made.
    pub fn skip(&mut self, state: &mut AppState) -> Vec<Effect> {
        if !self.phase.is_skippable() || state.redirect_in_flight() {
            debug!(phase = ?self.phase, "ignoring skip");
            return Vec::new();
        }

        state.complete_intro();
        self.phase = IntroPhase::Skipped;
        self.status = None;
        self.choices_visible = false;
        self.particles.clear();
        info!("intro skipped");

        vec![
            Effect::Cancel(TimerId::IntroStep),
            Effect::Cancel(TimerId::RevealChoices),
            Effect::Cancel(TimerId::Particles),
        ]
    }

    /// Age existing particles and spawn a new one while the budget lasts.
    pub fn on_particles<R: Rng>(&mut self, state: &AppState, timings: &Timings, rng: &mut R) -> Vec<Effect> {
        if !self.phase.is_skippable() || !state.intro_running() {
            self.particles.clear();
            return Vec::new();
        }

        for particle in &mut self.particles {
            particle.age += 1;
        }
        self.particles.retain(|p| p.age < PARTICLE_LIFETIME);

        if self.particles_spawned < PARTICLE_BUDGET {
            self.particles.push(Particle { column: rng.gen_range(0.0..1.0), age: 0 });
            self.particles_spawned += 1;
        }

        if self.particles_spawned >= PARTICLE_BUDGET && self.particles.is_empty() {
            return Vec::new();
        }
        vec![Effect::schedule(TimerId::Particles, timings.particle_interval())]
    }
}

impl Default for IntroSequencer {
    fn default() -> Self {
        Self::new()
    }
}
