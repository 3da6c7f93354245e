//! Effect toggles
//!
//! In-memory only; the card keeps no state across sessions.

/// Visual effect settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Ambient heart drizzle on the question screen
    pub ambient_particles: bool,
    /// Confetti on the celebration screen
    pub confetti: bool,
    /// Cursor-follower ornament
    pub cursor_follower: bool,
    /// Minimize motion (suppresses drizzle and confetti)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ambient_particles: true,
            confetti: true,
            cursor_follower: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective drizzle toggle (respects reduced_motion)
    pub fn effective_ambient(&self) -> bool {
        self.ambient_particles && !self.reduced_motion
    }

    /// Effective confetti toggle (respects reduced_motion)
    pub fn effective_confetti(&self) -> bool {
        self.confetti && !self.reduced_motion
    }
}
