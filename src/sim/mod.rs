//! Deterministic simulation module
//!
//! All card behavior lives here. This module must be pure and deterministic:
//! - Driven only by the sim clock (`CardState::clock_ms`), never wall time
//! - Seeded RNG only
//! - Monotonic entity IDs, stable iteration order
//! - No rendering or platform dependencies

pub mod confetti;
pub mod evasion;
pub mod particle;
pub mod state;
pub mod tick;

pub use confetti::{ConfettiBody, ConfettiField, TripleClick, CONFETTI_COLORS, CONFETTI_GLYPHS};
pub use evasion::{clamp_to_container, evade_from, NO_PHRASES};
pub use particle::{Particle, ParticleSet, PARTICLE_GLYPHS};
pub use state::{CardPhase, CardState, CelebrationState, QuestionState, RESPONSE_SUBTITLE, RESPONSE_TEXT};
pub use tick::{tick, TickInput};
