//! Balloon-pop and candle mini-games
//!
//! State is deterministic: one seeded PCG generator owned by the state,
//! entity ids from a monotonic allocator, confetti grouped in bursts keyed
//! by id so one burst's expiry never touches another.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Balloon fill palette
pub const BALLOON_COLORS: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9",
];

/// Confetti palette, drawn independently of the balloon palette
pub const CONFETTI_COLORS: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9",
];

/// Which mini-game panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feature {
    Balloons,
    #[default]
    Cake,
}

/// A poppable balloon; `x`/`y` are percentages of the field
#[derive(Debug, Clone, PartialEq)]
pub struct Balloon {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub color: &'static str,
    pub size: f32,
}

/// One confetti particle; positions are percentages of the section
#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiParticle {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub color: &'static str,
    pub rotation: f32,
}

/// A batch of confetti created together and removed together
#[derive(Debug, Clone)]
pub struct ConfettiBurst {
    pub id: u32,
    pub particles: Vec<ConfettiParticle>,
    /// Absolute deadline in milliseconds
    pub expires_at: f64,
}

/// State for the interactive section
#[derive(Debug, Clone)]
pub struct InteractiveState {
    rng: Pcg32,
    active: Feature,
    balloons: Vec<Balloon>,
    bursts: Vec<ConfettiBurst>,
    candles_lit: bool,
    wish_shown: bool,
    next_id: u32,
}

impl InteractiveState {
    /// Create the interactive state with the given seed; the candles start
    /// lit and the balloon field starts empty until `generate_balloons`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            active: Feature::default(),
            balloons: Vec::new(),
            bursts: Vec::new(),
            candles_lit: true,
            wish_shown: false,
            next_id: 1,
        }
    }

    /// Allocate a new entity id
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn active(&self) -> Feature {
        self.active
    }

    pub fn select(&mut self, feature: Feature) {
        self.active = feature;
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn bursts(&self) -> &[ConfettiBurst] {
        &self.bursts
    }

    pub fn burst(&self, burst_id: u32) -> Option<&ConfettiBurst> {
        self.bursts.iter().find(|b| b.id == burst_id)
    }

    /// All live confetti particles across bursts
    pub fn confetti(&self) -> impl Iterator<Item = &ConfettiParticle> {
        self.bursts.iter().flat_map(|b| b.particles.iter())
    }

    pub fn confetti_count(&self) -> usize {
        self.bursts.iter().map(|b| b.particles.len()).sum()
    }

    pub fn candles_lit(&self) -> bool {
        self.candles_lit
    }

    pub fn wish_shown(&self) -> bool {
        self.wish_shown
    }

    /// Replace the whole field with a fresh batch of balloons
    pub fn generate_balloons(&mut self) {
        self.balloons.clear();
        for _ in 0..BALLOON_BATCH {
            let id = self.next_entity_id();
            let balloon = Balloon {
                id,
                x: self.rng.random_range(BALLOON_X_MIN..BALLOON_X_MAX),
                y: self.rng.random_range(BALLOON_Y_MIN..BALLOON_Y_MAX),
                color: BALLOON_COLORS[self.rng.random_range(0..BALLOON_COLORS.len())],
                size: self.rng.random_range(BALLOON_SIZE_MIN..BALLOON_SIZE_MAX),
            };
            self.balloons.push(balloon);
        }
        log::debug!("generated {} balloons", self.balloons.len());
    }

    /// Pop a balloon and anchor a confetti burst at its position; returns
    /// the burst id. Unknown ids (already popped) are silent no-ops.
    pub fn pop_balloon(&mut self, balloon_id: u32, now_ms: f64) -> Option<u32> {
        let index = self.balloons.iter().position(|b| b.id == balloon_id)?;
        let balloon = self.balloons.remove(index);

        let mut particles = Vec::with_capacity(POP_BURST);
        for _ in 0..POP_BURST {
            let id = self.next_entity_id();
            particles.push(ConfettiParticle {
                id,
                x: balloon.x,
                y: balloon.y,
                color: CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())],
                rotation: self.rng.random_range(0.0..360.0),
            });
        }
        Some(self.push_burst(particles, now_ms))
    }

    /// Blow out the candles: reveals the wish message and throws confetti
    /// around the cake. A no-op unless the candles are currently lit.
    pub fn blow_candles(&mut self, now_ms: f64) -> Option<u32> {
        if !self.candles_lit {
            return None;
        }
        self.candles_lit = false;
        self.wish_shown = true;

        let mut particles = Vec::with_capacity(BLOW_BURST);
        for _ in 0..BLOW_BURST {
            let id = self.next_entity_id();
            let x = CAKE_X + (self.rng.random::<f32>() - 0.5) * CAKE_X_SPREAD;
            let y = CAKE_Y + (self.rng.random::<f32>() - 0.5) * CAKE_Y_SPREAD;
            particles.push(ConfettiParticle {
                id,
                x,
                y,
                color: CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())],
                rotation: self.rng.random_range(0.0..360.0),
            });
        }
        Some(self.push_burst(particles, now_ms))
    }

    /// Relight the candles and clear the wish message; a no-op while lit.
    /// Spawns no confetti.
    pub fn reset_candles(&mut self) -> bool {
        if self.candles_lit {
            return false;
        }
        self.candles_lit = true;
        self.wish_shown = false;
        true
    }

    fn push_burst(&mut self, particles: Vec<ConfettiParticle>, now_ms: f64) -> u32 {
        let id = self.next_entity_id();
        self.bursts.push(ConfettiBurst {
            id,
            particles,
            expires_at: now_ms + CONFETTI_TTL_MS,
        });
        id
    }

    /// Remove one burst by id. Idempotent, so a timer firing after the
    /// burst is already gone (or after teardown re-created state) is safe.
    pub fn expire_burst(&mut self, burst_id: u32) -> bool {
        match self.bursts.iter().position(|b| b.id == burst_id) {
            Some(index) => {
                self.bursts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sweep every burst past its deadline; returns how many were removed
    pub fn expire_due(&mut self, now_ms: f64) -> usize {
        let before = self.bursts.len();
        self.bursts.retain(|b| b.expires_at > now_ms);
        before - self.bursts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_replaces_batch() {
        let mut state = InteractiveState::new(12345);
        state.generate_balloons();
        assert_eq!(state.balloons().len(), BALLOON_BATCH);

        let first_ids: Vec<u32> = state.balloons().iter().map(|b| b.id).collect();
        state.generate_balloons();
        assert_eq!(state.balloons().len(), BALLOON_BATCH);
        // A reset is a fresh batch, not a top-up of the old one
        for balloon in state.balloons() {
            assert!(!first_ids.contains(&balloon.id));
        }
    }

    #[test]
    fn test_pop_removes_balloon_and_spawns_burst() {
        let mut state = InteractiveState::new(7);
        state.generate_balloons();
        let target = state.balloons()[3].clone();

        let burst_id = state.pop_balloon(target.id, 1000.0).expect("balloon exists");
        assert_eq!(state.balloons().len(), BALLOON_BATCH - 1);
        assert!(state.balloons().iter().all(|b| b.id != target.id));

        let burst = state.burst(burst_id).expect("burst exists");
        assert_eq!(burst.particles.len(), POP_BURST);
        assert_eq!(burst.expires_at, 1000.0 + CONFETTI_TTL_MS);
        for particle in &burst.particles {
            assert_eq!(particle.x, target.x);
            assert_eq!(particle.y, target.y);
            assert!((0.0..360.0).contains(&particle.rotation));
        }
    }

    #[test]
    fn test_pop_unknown_id_is_noop() {
        let mut state = InteractiveState::new(7);
        state.generate_balloons();
        let target = state.balloons()[0].id;
        state.pop_balloon(target, 0.0).expect("first pop");

        // Rapid duplicate click on the same balloon
        assert_eq!(state.pop_balloon(target, 1.0), None);
        assert_eq!(state.balloons().len(), BALLOON_BATCH - 1);
        assert_eq!(state.confetti_count(), POP_BURST);

        // Entirely made-up id
        assert_eq!(state.pop_balloon(9999, 2.0), None);
        assert_eq!(state.confetti_count(), POP_BURST);
    }

    #[test]
    fn test_bursts_expire_independently() {
        let mut state = InteractiveState::new(42);
        state.generate_balloons();
        let first = state.balloons()[0].id;
        let second = state.balloons()[1].id;

        let burst_a = state.pop_balloon(first, 0.0).unwrap();
        let burst_b = state.pop_balloon(second, 500.0).unwrap();
        assert_eq!(state.confetti_count(), 2 * POP_BURST);

        assert!(state.expire_burst(burst_a));
        assert_eq!(state.confetti_count(), POP_BURST);
        assert!(state.burst(burst_b).is_some());

        // Second fire of the same timer is harmless
        assert!(!state.expire_burst(burst_a));
        assert_eq!(state.confetti_count(), POP_BURST);
    }

    #[test]
    fn test_expire_due_exactly_once_at_deadline() {
        let mut state = InteractiveState::new(42);
        state.generate_balloons();
        let id = state.balloons()[0].id;
        state.pop_balloon(id, 1000.0).unwrap();

        assert_eq!(state.expire_due(1000.0 + CONFETTI_TTL_MS - 1.0), 0);
        assert_eq!(state.confetti_count(), POP_BURST);
        assert_eq!(state.expire_due(1000.0 + CONFETTI_TTL_MS), 1);
        assert_eq!(state.confetti_count(), 0);
        assert_eq!(state.expire_due(1000.0 + CONFETTI_TTL_MS), 0);
    }

    #[test]
    fn test_blow_candles_once() {
        let mut state = InteractiveState::new(3);
        assert!(state.candles_lit());
        assert!(!state.wish_shown());

        let burst_id = state.blow_candles(0.0).expect("candles lit");
        assert!(!state.candles_lit());
        assert!(state.wish_shown());

        let burst = state.burst(burst_id).unwrap();
        assert_eq!(burst.particles.len(), BLOW_BURST);
        for particle in &burst.particles {
            assert!((CAKE_X - CAKE_X_SPREAD / 2.0..=CAKE_X + CAKE_X_SPREAD / 2.0)
                .contains(&particle.x));
            assert!((CAKE_Y - CAKE_Y_SPREAD / 2.0..=CAKE_Y + CAKE_Y_SPREAD / 2.0)
                .contains(&particle.y));
        }

        // Blowing again changes nothing and spawns nothing
        assert_eq!(state.blow_candles(1.0), None);
        assert_eq!(state.confetti_count(), BLOW_BURST);
        assert!(state.wish_shown());
    }

    #[test]
    fn test_reset_candles() {
        let mut state = InteractiveState::new(3);

        // Reset while lit is a no-op
        assert!(!state.reset_candles());
        assert!(state.candles_lit());

        state.blow_candles(0.0).unwrap();
        assert!(state.reset_candles());
        assert!(state.candles_lit());
        assert!(!state.wish_shown());
        // Relighting does not touch the confetti already in flight
        assert_eq!(state.confetti_count(), BLOW_BURST);
    }

    #[test]
    fn test_determinism() {
        let mut a = InteractiveState::new(99999);
        let mut b = InteractiveState::new(99999);
        a.generate_balloons();
        b.generate_balloons();
        assert_eq!(a.balloons(), b.balloons());

        let id = a.balloons()[5].id;
        let burst_a = a.pop_balloon(id, 10.0).unwrap();
        let burst_b = b.pop_balloon(id, 10.0).unwrap();
        assert_eq!(a.burst(burst_a).unwrap().particles, b.burst(burst_b).unwrap().particles);
    }

    proptest! {
        #[test]
        fn balloon_batches_stay_in_bounds(seed in any::<u64>()) {
            let mut state = InteractiveState::new(seed);
            state.generate_balloons();
            prop_assert_eq!(state.balloons().len(), BALLOON_BATCH);
            for balloon in state.balloons() {
                prop_assert!((BALLOON_X_MIN..BALLOON_X_MAX).contains(&balloon.x));
                prop_assert!((BALLOON_Y_MIN..BALLOON_Y_MAX).contains(&balloon.y));
                prop_assert!((BALLOON_SIZE_MIN..BALLOON_SIZE_MAX).contains(&balloon.size));
            }
        }
    }
}
