//! Card state and per-event handlers
//!
//! One `CardState` owns everything: the current screen, both screens'
//! state, the sim clock, and the seeded RNG. Host events (pointer moves,
//! clicks, the Yes press) call the synchronous methods here; timed
//! behavior advances in [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::confetti::{ConfettiField, TripleClick};
use super::evasion::{clamp_to_container, evade_from, NO_PHRASES};
use super::particle::ParticleSet;
use crate::consts::*;

/// Celebration headline, revealed by the typewriter
pub const RESPONSE_TEXT: &str = "¡Sabía que dirías que sí!";
/// Shown shortly after the headline completes
pub const RESPONSE_SUBTITLE: &str = "Seremos el mejor San Valentín 💕";

/// Which screen the card is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    /// Asking the question; the No button evades the pointer
    Question,
    /// She said yes: confetti
    Celebration,
}

/// Question-screen state
#[derive(Debug, Clone)]
pub struct QuestionState {
    /// Where the No button has fled to; `None` until the first evade
    /// (the host keeps the stylesheet's resting position until then)
    pub no_button_pos: Option<Vec2>,
    /// Index into [`NO_PHRASES`], saturating at the last entry
    pub refusal_index: usize,
    /// Yes-button scale, grown per evade up to the cap
    pub yes_scale: f32,
    /// Last pointer sample, for the cursor-follower ornament
    pub pointer: Vec2,
    /// Evade puffs and ambient drizzle, shared id space
    pub particles: ParticleSet,
    /// Time since the last ambient spawn
    pub ambient_accum_ms: f64,
}

impl Default for QuestionState {
    fn default() -> Self {
        Self {
            no_button_pos: None,
            refusal_index: 0,
            yes_scale: YES_SCALE_BASE,
            pointer: Vec2::ZERO,
            particles: ParticleSet::default(),
            ambient_accum_ms: 0.0,
        }
    }
}

impl QuestionState {
    /// Current refusal phrase
    pub fn refusal_phrase(&self) -> &'static str {
        NO_PHRASES[self.refusal_index.min(NO_PHRASES.len() - 1)]
    }
}

/// Celebration-screen state
#[derive(Debug, Clone, Default)]
pub struct CelebrationState {
    pub confetti: ConfettiField,
    /// Time since the last trickle batch
    pub trickle_accum_ms: f64,
    pub gesture: TripleClick,
    /// Typewriter: characters of [`RESPONSE_TEXT`] revealed so far
    pub chars_shown: usize,
    pub type_accum_ms: f64,
    /// Delay between headline completion and the subtitle
    pub subtitle_accum_ms: f64,
    pub show_subtitle: bool,
}

impl CelebrationState {
    /// Revealed prefix of the headline (respects char boundaries)
    pub fn revealed_text(&self) -> &'static str {
        match RESPONSE_TEXT.char_indices().nth(self.chars_shown) {
            Some((byte, _)) => &RESPONSE_TEXT[..byte],
            None => RESPONSE_TEXT,
        }
    }

    pub fn headline_complete(&self) -> bool {
        self.chars_shown >= RESPONSE_TEXT.chars().count()
    }
}

/// Complete card state
#[derive(Debug, Clone)]
pub struct CardState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) rng: Pcg32,
    /// Sim clock in milliseconds, advanced only by the tick
    pub clock_ms: f64,
    pub phase: CardPhase,
    pub question: QuestionState,
    pub celebration: CelebrationState,
}

impl CardState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock_ms: 0.0,
            phase: CardPhase::Question,
            question: QuestionState::default(),
            celebration: CelebrationState::default(),
        }
    }

    /// Handle one pointer-move sample on the question screen.
    ///
    /// `button_center` and `container` are measured by the host from the
    /// live DOM, so the clamp tracks window resizes. Runs to completion:
    /// proximity check, relocation, escalation, and the particle puff are
    /// atomic with respect to other events.
    pub fn pointer_moved(&mut self, pointer: Vec2, button_center: Vec2, container: Vec2) {
        if self.phase != CardPhase::Question {
            return;
        }
        let q = &mut self.question;
        q.pointer = pointer;

        let Some(fled) = evade_from(pointer, button_center) else {
            return;
        };
        q.no_button_pos = Some(clamp_to_container(fled, container));
        // Saturating escalation; extra evades past the cap are no-ops
        q.refusal_index = (q.refusal_index + 1).min(NO_PHRASES.len() - 1);
        q.yes_scale = (q.yes_scale + YES_SCALE_STEP).min(YES_SCALE_MAX);
        q.particles
            .spawn_evade_burst(button_center, self.clock_ms, &mut self.rng);
        log::debug!(
            "no button fled to {:?} (refusal {}, yes scale {:.2})",
            q.no_button_pos,
            q.refusal_index,
            q.yes_scale
        );
    }

    /// Handle a click on the celebration screen; fires the radial burst
    /// on the third click inside the gesture window.
    pub fn clicked(&mut self, viewport: Vec2) {
        if self.phase != CardPhase::Celebration {
            return;
        }
        if self.celebration.gesture.register(self.clock_ms) {
            self.celebration.confetti.spawn_burst(viewport, &mut self.rng);
            log::info!("triple click: {} confetti burst", BURST_COUNT);
        }
    }

    /// The Yes press: one-way switch to the celebration screen.
    ///
    /// The question view is torn down here: its particles are dropped and
    /// its timers stop, because the tick no longer drives that screen.
    pub fn accept(&mut self) {
        if self.phase != CardPhase::Question {
            return;
        }
        self.phase = CardPhase::Celebration;
        self.question.particles.clear();
        log::info!("she said yes (after {} refusals)", self.question.refusal_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_far_pointer_leaves_state_untouched() {
        let mut state = CardState::new(1);
        state.pointer_moved(
            Vec2::new(0.0, 0.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(1000.0, 1000.0),
        );
        assert!(state.question.no_button_pos.is_none());
        assert_eq!(state.question.refusal_index, 0);
        assert_eq!(state.question.yes_scale, YES_SCALE_BASE);
        assert!(state.question.particles.is_empty());
    }

    #[test]
    fn test_evade_relocates_escalates_and_puffs() {
        let mut state = CardState::new(1);
        // Pointer 10px right of center in a 1000x1000 box: flees straight left
        state.pointer_moved(
            Vec2::new(510.0, 500.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(1000.0, 1000.0),
        );
        let pos = state.question.no_button_pos.unwrap();
        assert!((pos.x - 350.0).abs() < 0.001);
        assert!((pos.y - 500.0).abs() < 0.001);
        assert_eq!(state.question.refusal_index, 1);
        assert_eq!(state.question.refusal_phrase(), "¿Segura?");
        assert!((state.question.yes_scale - 1.15).abs() < 1e-6);
        assert_eq!(state.question.particles.len(), EVADE_BURST_COUNT);
        // Puff appears at the pre-move center
        for p in state.question.particles.live() {
            assert_eq!(p.pos, Vec2::new(500.0, 500.0));
        }
    }

    #[test]
    fn test_escalation_saturates() {
        let mut state = CardState::new(1);
        for _ in 0..50 {
            state.pointer_moved(
                Vec2::new(510.0, 500.0),
                Vec2::new(500.0, 500.0),
                Vec2::new(1000.0, 1000.0),
            );
        }
        assert_eq!(state.question.refusal_index, NO_PHRASES.len() - 1);
        assert_eq!(state.question.refusal_phrase(), "Porfa 🥺");
        assert!((state.question.yes_scale - YES_SCALE_MAX).abs() < 1e-6);
    }

    #[test]
    fn test_evade_clamped_near_edges() {
        let mut state = CardState::new(1);
        // Button near the left edge, pointer to its right: flees left, hits the margin
        state.pointer_moved(
            Vec2::new(130.0, 400.0),
            Vec2::new(120.0, 400.0),
            Vec2::new(1000.0, 800.0),
        );
        let pos = state.question.no_button_pos.unwrap();
        assert_eq!(pos, Vec2::new(100.0, 400.0));
    }

    #[test]
    fn test_accept_is_one_way_and_clears_question() {
        let mut state = CardState::new(1);
        state.pointer_moved(
            Vec2::new(510.0, 500.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(1000.0, 1000.0),
        );
        assert!(!state.question.particles.is_empty());

        state.accept();
        assert_eq!(state.phase, CardPhase::Celebration);
        assert!(state.question.particles.is_empty());

        // Question-screen events are ignored after the switch
        state.pointer_moved(
            Vec2::new(510.0, 500.0),
            Vec2::new(500.0, 500.0),
            Vec2::new(1000.0, 1000.0),
        );
        assert!(state.question.particles.is_empty());
        state.accept();
        assert_eq!(state.phase, CardPhase::Celebration);
    }

    #[test]
    fn test_clicks_ignored_on_question_screen() {
        let mut state = CardState::new(1);
        for _ in 0..6 {
            state.clicked(Vec2::new(800.0, 600.0));
        }
        assert!(state.celebration.confetti.is_empty());
    }

    #[test]
    fn test_triple_click_burst_count() {
        let mut state = CardState::new(1);
        state.accept();
        let viewport = Vec2::new(800.0, 600.0);
        // All three clicks land at the same sim time: well inside the window
        state.clicked(viewport);
        state.clicked(viewport);
        assert!(state.celebration.confetti.is_empty());
        state.clicked(viewport);
        assert_eq!(state.celebration.confetti.len(), BURST_COUNT);
    }

    #[test]
    fn test_revealed_text_char_boundaries() {
        let mut celebration = CelebrationState::default();
        assert_eq!(celebration.revealed_text(), "");
        celebration.chars_shown = 1;
        assert_eq!(celebration.revealed_text(), "¡");
        celebration.chars_shown = 6;
        assert_eq!(celebration.revealed_text(), "¡Sabía");
        celebration.chars_shown = 9999;
        assert_eq!(celebration.revealed_text(), RESPONSE_TEXT);
        assert!(celebration.headline_complete());
    }
}
