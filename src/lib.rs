//! Valentine Card - an interactive greeting card web page
//!
//! Core modules:
//! - `sim`: Deterministic simulation (evasive button, particles, confetti)
//! - `settings`: Effect toggles
//!
//! The simulation is pure Rust with no platform dependencies; the wasm
//! host in `main.rs` feeds it pointer/click events, ticks it once per
//! frame, and renders its state into the DOM.

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Card tuning constants
pub mod consts {
    /// Pointer distance (px) at which the No button starts fleeing
    pub const PROXIMITY_RADIUS: f32 = 150.0;
    /// How far the No button jumps per evade
    pub const FLEE_DISTANCE: f32 = 150.0;
    /// Inset from the container edges the button center may never cross
    pub const EDGE_MARGIN: f32 = 100.0;

    /// Yes button scale: start, growth per evade, cap
    pub const YES_SCALE_BASE: f32 = 1.0;
    pub const YES_SCALE_STEP: f32 = 0.15;
    pub const YES_SCALE_MAX: f32 = 2.5;

    /// Particles puffed out when the button flees
    pub const EVADE_BURST_COUNT: usize = 5;
    pub const EVADE_PARTICLE_TTL_MS: f64 = 1000.0;

    /// Ambient heart drizzle on the question screen
    pub const AMBIENT_SPAWN_INTERVAL_MS: f64 = 200.0;
    pub const AMBIENT_PARTICLE_TTL_MS: f64 = 5000.0;
    /// Spawn height above the viewport for ambient particles and confetti
    pub const SPAWN_Y: f32 = -20.0;

    /// Confetti trickle cadence and batch size
    pub const CONFETTI_SPAWN_INTERVAL_MS: f64 = 100.0;
    pub const CONFETTI_BATCH: usize = 10;
    /// Per-frame confetti kinematics
    pub const CONFETTI_GRAVITY: f32 = 0.1;
    pub const CONFETTI_SPIN_DEG: f32 = 5.0;
    /// Bodies are dropped once below viewport height plus this margin
    pub const OFFSCREEN_MARGIN: f32 = 100.0;

    /// Triple-click burst
    pub const BURST_COUNT: usize = 100;
    pub const TRIPLE_CLICK_WINDOW_MS: f64 = 500.0;

    /// Celebration typewriter
    pub const TYPE_INTERVAL_MS: f64 = 80.0;
    pub const SUBTITLE_DELAY_MS: f64 = 500.0;
}

/// Unit vector pointing along `theta` (radians)
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle (radians) of the vector from `from` toward `to`
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}
