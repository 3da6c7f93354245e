//! Per-frame simulation tick
//!
//! The host calls [`tick`] once per animation frame with the elapsed
//! milliseconds. Interval behavior (ambient drizzle, confetti trickle,
//! the typewriter) runs off accumulators so cadence is preserved across
//! uneven frame times, and only the active screen is advanced.

use crate::consts::*;

use super::state::{CardPhase, CardState, RESPONSE_TEXT};

/// Frame-level input sampled by the host
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Viewport size in px (width, height)
    pub viewport: glam::Vec2,
}

/// Advance the card by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut CardState, input: &TickInput, dt_ms: f64) {
    state.clock_ms += dt_ms;
    let now = state.clock_ms;

    match state.phase {
        CardPhase::Question => {
            state.question.ambient_accum_ms += dt_ms;
            while state.question.ambient_accum_ms >= AMBIENT_SPAWN_INTERVAL_MS {
                state.question.ambient_accum_ms -= AMBIENT_SPAWN_INTERVAL_MS;
                state
                    .question
                    .particles
                    .spawn_ambient(input.viewport.x, now, &mut state.rng);
            }
            state.question.particles.expire(now);
        }
        CardPhase::Celebration => {
            let c = &mut state.celebration;

            c.trickle_accum_ms += dt_ms;
            while c.trickle_accum_ms >= CONFETTI_SPAWN_INTERVAL_MS {
                c.trickle_accum_ms -= CONFETTI_SPAWN_INTERVAL_MS;
                c.confetti.spawn_trickle(input.viewport.x, &mut state.rng);
            }
            c.confetti.integrate(input.viewport.y);

            if !c.headline_complete() {
                c.type_accum_ms += dt_ms;
                let total = RESPONSE_TEXT.chars().count();
                while c.type_accum_ms >= TYPE_INTERVAL_MS && c.chars_shown < total {
                    c.type_accum_ms -= TYPE_INTERVAL_MS;
                    c.chars_shown += 1;
                }
            } else if !c.show_subtitle {
                c.subtitle_accum_ms += dt_ms;
                if c.subtitle_accum_ms >= SUBTITLE_DELAY_MS {
                    c.show_subtitle = true;
                }
            }
        }
    }
}
