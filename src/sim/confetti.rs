//! Confetti kinematics for the celebration screen
//!
//! Bodies fall under constant gravity with a fixed per-frame spin. The
//! off-screen filter at the end of every integration step is the only
//! bound on the live set; skipping it would let continuous emission grow
//! the set without limit.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::unit_from_angle;

/// Solid confetti colors (0xRRGGBB)
pub const CONFETTI_COLORS: [u32; 6] = [0xff1493, 0xff69b4, 0xffc0cb, 0x8b5cf6, 0xec4899, 0xf97316];

/// Glyph confetti variants
pub const CONFETTI_GLYPHS: [&str; 9] = ["💕", "💖", "💗", "💓", "💝", "🌹", "🌸", "🌺", "🌷"];

/// One piece of confetti
#[derive(Debug, Clone)]
pub struct ConfettiBody {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, advanced a fixed step per frame
    pub rotation: f32,
    pub color: u32,
    /// Rendered instead of the solid color when present
    pub glyph: Option<&'static str>,
}

impl ConfettiBody {
    /// CSS hex string for the body color
    pub fn color_css(&self) -> String {
        format!("#{:06x}", self.color)
    }
}

/// Live confetti bodies plus the id counter
#[derive(Debug, Clone, Default)]
pub struct ConfettiField {
    bodies: Vec<ConfettiBody>,
    next_id: u32,
}

impl ConfettiField {
    fn push(&mut self, pos: Vec2, vel: Vec2, glyph: Option<&'static str>, rng: &mut impl Rng) {
        let id = self.next_id;
        self.next_id += 1;
        self.bodies.push(ConfettiBody {
            id,
            pos,
            vel,
            rotation: rng.random_range(0.0..360.0),
            color: CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())],
            glyph,
        });
    }

    /// Steady trickle: one batch falling in from the top edge
    pub fn spawn_trickle(&mut self, viewport_width: f32, rng: &mut impl Rng) {
        for _ in 0..CONFETTI_BATCH {
            let pos = Vec2::new(rng.random_range(0.0..viewport_width.max(1.0)), SPAWN_Y);
            let vel = Vec2::new(
                rng.random_range(-2.0..2.0),
                rng.random_range(2.0..5.0),
            );
            let glyph = if rng.random_bool(0.5) {
                Some(CONFETTI_GLYPHS[rng.random_range(0..CONFETTI_GLYPHS.len())])
            } else {
                None
            };
            self.push(pos, vel, glyph, rng);
        }
    }

    /// Radial burst from the viewport center, one body per spoke
    pub fn spawn_burst(&mut self, viewport: Vec2, rng: &mut impl Rng) {
        let center = viewport / 2.0;
        for i in 0..BURST_COUNT {
            let angle = std::f32::consts::TAU * i as f32 / BURST_COUNT as f32;
            let dir = unit_from_angle(angle);
            // Speed drawn independently per axis
            let vel = Vec2::new(
                dir.x * rng.random_range(5.0..15.0),
                dir.y * rng.random_range(5.0..15.0),
            );
            let glyph = Some(CONFETTI_GLYPHS[rng.random_range(0..CONFETTI_GLYPHS.len())]);
            self.push(center, vel, glyph, rng);
        }
    }

    /// One animation-frame step: ballistic move, spin, gravity, then the
    /// mandatory off-screen cull
    pub fn integrate(&mut self, viewport_height: f32) {
        for body in self.bodies.iter_mut() {
            body.pos += body.vel;
            body.rotation += CONFETTI_SPIN_DEG;
            body.vel.y += CONFETTI_GRAVITY;
        }
        self.bodies
            .retain(|b| b.pos.y <= viewport_height + OFFSCREEN_MARGIN);
    }

    pub fn live(&self) -> &[ConfettiBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Triple-click gesture detector
///
/// Three clicks, each within the window of the previous one, fire the
/// gesture; the count resets after firing or once the window lapses.
#[derive(Debug, Clone, Default)]
pub struct TripleClick {
    count: u32,
    last_click_ms: f64,
}

impl TripleClick {
    /// Register a click at sim time `now_ms`; returns true when the
    /// gesture fires
    pub fn register(&mut self, now_ms: f64) -> bool {
        if self.count > 0 && now_ms - self.last_click_ms > TRIPLE_CLICK_WINDOW_MS {
            self.count = 0;
        }
        self.count += 1;
        self.last_click_ms = now_ms;
        if self.count >= 3 {
            self.count = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_trickle_batch_shape() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ConfettiField::default();
        field.spawn_trickle(1280.0, &mut rng);

        assert_eq!(field.len(), CONFETTI_BATCH);
        for b in field.live() {
            assert_eq!(b.pos.y, SPAWN_Y);
            assert!(b.pos.x >= 0.0 && b.pos.x < 1280.0);
            assert!(b.vel.x >= -2.0 && b.vel.x < 2.0);
            assert!(b.vel.y >= 2.0 && b.vel.y < 5.0);
            assert!(CONFETTI_COLORS.contains(&b.color));
        }
    }

    #[test]
    fn test_integration_kinematics() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ConfettiField::default();
        field.spawn_trickle(1280.0, &mut rng);

        let before: Vec<_> = field.live().to_vec();
        field.integrate(720.0);
        for (a, b) in before.iter().zip(field.live()) {
            assert_eq!(b.pos, a.pos + a.vel);
            assert_eq!(b.rotation, a.rotation + CONFETTI_SPIN_DEG);
            assert!((b.vel.y - (a.vel.y + CONFETTI_GRAVITY)).abs() < 1e-6);
            assert_eq!(b.vel.x, a.vel.x);
        }
    }

    #[test]
    fn test_offscreen_cull_is_immediate() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ConfettiField::default();
        let viewport_h = 600.0;
        // Body one step above the cull line, falling fast
        field.push(
            Vec2::new(10.0, viewport_h + OFFSCREEN_MARGIN - 1.0),
            Vec2::new(0.0, 2.0),
            None,
            &mut rng,
        );
        field.integrate(viewport_h);
        assert!(field.is_empty());
    }

    #[test]
    fn test_live_set_stays_bounded() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = ConfettiField::default();
        let viewport_h = 600.0;
        // Emit and integrate for a long while; the cull must keep every
        // survivor above the line
        for _ in 0..2000 {
            field.spawn_trickle(800.0, &mut rng);
            field.integrate(viewport_h);
            for b in field.live() {
                assert!(b.pos.y <= viewport_h + OFFSCREEN_MARGIN);
            }
        }
        // Slowest entry (vy=2) reaches the cull line well within 120
        // frames of accelerating fall, bounding the set size
        assert!(field.len() < 120 * CONFETTI_BATCH);
    }

    #[test]
    fn test_burst_is_radial_from_center() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut field = ConfettiField::default();
        let viewport = Vec2::new(1000.0, 800.0);
        field.spawn_burst(viewport, &mut rng);

        assert_eq!(field.len(), BURST_COUNT);
        for (i, b) in field.live().iter().enumerate() {
            assert_eq!(b.pos, viewport / 2.0);
            assert!(b.glyph.is_some());
            let angle = std::f32::consts::TAU * i as f32 / BURST_COUNT as f32;
            let dir = crate::unit_from_angle(angle);
            // Each velocity component keeps its spoke's sign and speed range
            if dir.x.abs() > 1e-4 {
                assert!(b.vel.x / dir.x >= 5.0 && b.vel.x / dir.x < 15.0);
            }
            if dir.y.abs() > 1e-4 {
                assert!(b.vel.y / dir.y >= 5.0 && b.vel.y / dir.y < 15.0);
            }
        }
    }

    #[test]
    fn test_triple_click_within_window_fires_once() {
        let mut gesture = TripleClick::default();
        assert!(!gesture.register(0.0));
        assert!(!gesture.register(200.0));
        assert!(gesture.register(400.0));
        // Counter reset after firing: next click starts over
        assert!(!gesture.register(450.0));
    }

    #[test]
    fn test_slow_clicks_never_fire() {
        let mut gesture = TripleClick::default();
        assert!(!gesture.register(0.0));
        assert!(!gesture.register(600.0));
        assert!(!gesture.register(1200.0));
        assert!(!gesture.register(1800.0));
    }

    #[test]
    fn test_window_measured_between_clicks() {
        // Each gap is 400 ms; total span exceeds 500 ms but every click
        // lands inside the previous click's window
        let mut gesture = TripleClick::default();
        assert!(!gesture.register(0.0));
        assert!(!gesture.register(400.0));
        assert!(gesture.register(800.0));
    }
}
