pub mod catalog;
pub mod chat;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod effect;
pub mod intro;
pub mod phrases;
pub mod state;
pub mod timer;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogEntry, Category};
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use classifier::classify;
pub use config::{Config, NavigationTargets, Timings};
pub use controller::Controller;
pub use effect::{Effect, TimerId};
pub use intro::{IntroPath, IntroPhase, IntroSequencer, Particle};
pub use phrases::PhraseKey;
pub use state::AppState;
pub use timer::{TimerFired, TimerSet};
