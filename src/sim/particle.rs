//! Decorative particles for the question screen
//!
//! One set holds both particle sources: the puffs left behind when the No
//! button flees, and the ambient drizzle falling from the top edge. Ids
//! come from a single counter so they stay unique across both. Removal is
//! scheduled: every particle carries its expiry deadline on the sim clock
//! and is dropped on the first tick at or past it, never earlier.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// Glyphs a particle can be rendered as, picked once at spawn
pub const PARTICLE_GLYPHS: [&str; 4] = ["💕", "🌹", "✨", "💖"];

/// A short-lived decorative particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub pos: Vec2,
    pub glyph: &'static str,
    /// Sim-clock time of creation
    pub created_ms: f64,
    /// Sim-clock deadline at which the particle is removed
    pub expires_ms: f64,
}

/// Live particles plus the shared id counter
#[derive(Debug, Clone, Default)]
pub struct ParticleSet {
    particles: Vec<Particle>,
    next_id: u32,
}

impl ParticleSet {
    /// Spawn one particle at `pos`, expiring `ttl_ms` after `now_ms`
    pub fn spawn(&mut self, pos: Vec2, ttl_ms: f64, now_ms: f64, rng: &mut impl Rng) {
        let id = self.next_id;
        self.next_id += 1;
        self.particles.push(Particle {
            id,
            pos,
            glyph: PARTICLE_GLYPHS[rng.random_range(0..PARTICLE_GLYPHS.len())],
            created_ms: now_ms,
            expires_ms: now_ms + ttl_ms,
        });
    }

    /// Spawn the evade puff at the button's pre-move center
    pub fn spawn_evade_burst(&mut self, center: Vec2, now_ms: f64, rng: &mut impl Rng) {
        for _ in 0..EVADE_BURST_COUNT {
            self.spawn(center, EVADE_PARTICLE_TTL_MS, now_ms, rng);
        }
    }

    /// Spawn one ambient particle at a random x along the top edge
    pub fn spawn_ambient(&mut self, viewport_width: f32, now_ms: f64, rng: &mut impl Rng) {
        let x = rng.random_range(0.0..viewport_width.max(1.0));
        self.spawn(
            Vec2::new(x, SPAWN_Y),
            AMBIENT_PARTICLE_TTL_MS,
            now_ms,
            rng,
        );
    }

    /// Drop every particle whose deadline has passed
    pub fn expire(&mut self, now_ms: f64) {
        self.particles.retain(|p| p.expires_ms > now_ms);
    }

    /// Remove everything, keeping the id sequence intact
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn live(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_ids_unique_across_sources() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut set = ParticleSet::default();
        set.spawn_evade_burst(Vec2::new(500.0, 500.0), 0.0, &mut rng);
        set.spawn_ambient(1200.0, 0.0, &mut rng);
        set.spawn_ambient(1200.0, 200.0, &mut rng);

        let mut ids: Vec<u32> = set.live().iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), EVADE_BURST_COUNT + 2);
    }

    #[test]
    fn test_expiry_never_early_never_late() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut set = ParticleSet::default();
        set.spawn(Vec2::ZERO, 1000.0, 0.0, &mut rng);

        set.expire(999.9);
        assert_eq!(set.len(), 1, "removed before its deadline");
        set.expire(1000.0);
        assert_eq!(set.len(), 0, "survived past its deadline");
    }

    #[test]
    fn test_mixed_ttls_expire_independently() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut set = ParticleSet::default();
        set.spawn_evade_burst(Vec2::new(300.0, 300.0), 0.0, &mut rng); // 1000 ms
        set.spawn_ambient(800.0, 0.0, &mut rng); // 5000 ms

        set.expire(1500.0);
        assert_eq!(set.len(), 1);
        assert_eq!(set.live()[0].expires_ms, 5000.0);
        set.expire(5000.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_ambient_spawns_along_top_edge() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut set = ParticleSet::default();
        for i in 0..50 {
            set.spawn_ambient(1920.0, i as f64 * 200.0, &mut rng);
        }
        for p in set.live() {
            assert_eq!(p.pos.y, SPAWN_Y);
            assert!(p.pos.x >= 0.0 && p.pos.x < 1920.0);
        }
    }
}
