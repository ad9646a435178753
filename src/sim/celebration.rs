//! Celebration effects
//!
//! Screens fire a [`Burst`] through the [`Celebrate`] capability and never look
//! at the result. [`Confetti`] is the particle field the renderer draws;
//! `Vec<Burst>` records bursts for tests.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::timer::{Countdown, Interval};

/// Sage, ivory, clay
pub const PALETTE_EARTH: &[&str] = &["#CDD4B1", "#FEECD0", "#DCA278"];
/// Pinks and whites
pub const PALETTE_BLUSH: &[&str] = &["#FF69B4", "#FEECD0", "#ffffff"];
/// Gold
pub const PALETTE_GOLD: &[&str] = &["#FFD700", "#FFFFFF"];
/// Used when a burst does not pick its own colors
pub const PALETTE_PARTY: &[&str] = &[
    "#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d", "#ff36ff",
];

/// A one-shot particle burst request
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub particle_count: u32,
    /// Cone width in degrees, centered straight up
    pub spread: f32,
    pub colors: &'static [&'static str],
    /// Emission point in normalized viewport coordinates (0-1, y down)
    pub origin: Vec2,
    /// Initial speed in reference pixels per frame
    pub start_velocity: f32,
    /// Particle lifetime in reference frames
    pub lifetime_frames: u32,
}

impl Default for Burst {
    fn default() -> Self {
        Self {
            particle_count: 50,
            spread: 45.0,
            colors: PALETTE_PARTY,
            origin: Vec2::new(0.5, 0.5),
            start_velocity: 45.0,
            lifetime_frames: 200,
        }
    }
}

/// Fire-and-forget sink for celebration bursts
pub trait Celebrate {
    fn celebrate(&mut self, burst: Burst);
}

/// Recording sink
impl Celebrate for Vec<Burst> {
    fn celebrate(&mut self, burst: Burst) {
        self.push(burst);
    }
}

/// Viewport size the pixel-based burst speeds are scaled against
const REFERENCE_VIEWPORT_PX: f32 = 800.0;
/// Frame rate the per-frame burst parameters assume
const REFERENCE_FPS: f32 = 60.0;
/// Velocity kept per reference frame
const DRAG_PER_FRAME: f32 = 0.9;
/// Constant fall added on top of the burst velocity (reference px per frame)
const FALL_PER_FRAME: f32 = 3.0;

/// A confetti piece (visual only)
#[derive(Debug, Clone)]
pub struct Particle {
    /// Normalized viewport position
    pub pos: Vec2,
    /// Normalized units per second
    pub vel: Vec2,
    pub color: &'static str,
    /// Seconds left
    pub life: f32,
    pub max_life: f32,
    /// Flip phase for the paper-flutter look (radians)
    pub tilt: f32,
    pub tilt_speed: f32,
    /// Pixels
    pub size: f32,
}

impl Particle {
    /// 1 when fresh, 0 when gone
    pub fn opacity(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Particle field that turns bursts into falling confetti
#[derive(Debug, Clone)]
pub struct Confetti {
    particles: Vec<Particle>,
    rng: Pcg32,
    cap: usize,
    scale: f32,
}

impl Confetti {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            cap: 2000,
            scale: 1.0,
        }
    }

    /// Limit live particles and scale burst sizes (0 disables effects)
    pub fn set_limits(&mut self, cap: usize, scale: f32) {
        self.cap = cap;
        self.scale = scale.max(0.0);
        self.particles.truncate(cap);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance all particles
    pub fn tick(&mut self, dt: f32) {
        let frames = REFERENCE_FPS * dt;
        let drag = DRAG_PER_FRAME.powf(frames);
        let fall = FALL_PER_FRAME * REFERENCE_FPS / REFERENCE_VIEWPORT_PX;

        for p in self.particles.iter_mut() {
            p.pos += p.vel * dt;
            p.pos.y += fall * dt;
            p.vel *= drag;
            p.tilt += p.tilt_speed * dt;
            p.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}

impl Celebrate for Confetti {
    fn celebrate(&mut self, burst: Burst) {
        let wanted = (burst.particle_count as f32 * self.scale).round() as usize;
        let room = self.cap.saturating_sub(self.particles.len());
        let count = wanted.min(room);
        if count == 0 || burst.colors.is_empty() {
            return;
        }

        let lifetime = burst.lifetime_frames as f32 / REFERENCE_FPS;
        let speed_scale = REFERENCE_FPS / REFERENCE_VIEWPORT_PX;
        let half_spread = burst.spread / 2.0;

        for _ in 0..count {
            let angle = (90.0 + self.rng.random_range(-half_spread..=half_spread)).to_radians();
            let speed = burst.start_velocity * (0.5 + self.rng.random::<f32>()) * speed_scale;
            let color = burst.colors[self.rng.random_range(0..burst.colors.len())];
            self.particles.push(Particle {
                pos: burst.origin,
                // Screen y grows downward, so "up" is negative
                vel: Vec2::new(angle.cos(), -angle.sin()) * speed,
                color,
                life: lifetime,
                max_life: lifetime,
                tilt: self.rng.random_range(0.0..std::f32::consts::TAU),
                tilt_speed: self.rng.random_range(4.0..12.0),
                size: self.rng.random_range(6.0..11.0),
            });
        }
    }
}

/// Timed, fading two-sided fireworks (the final screen's show)
#[derive(Debug, Clone, PartialEq)]
pub struct FireworksShow {
    remaining: Countdown,
    every: Interval,
    peak_particles: f32,
}

impl FireworksShow {
    pub fn new(duration_ms: u32, burst_every_ms: u32, peak_particles: f32) -> Self {
        Self {
            remaining: Countdown::from_ms(duration_ms),
            every: Interval::from_ms(burst_every_ms),
            peak_particles,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_expired()
    }

    /// Advance one tick, firing a pair of bursts on each interval
    pub fn tick(&mut self, rng: &mut Pcg32, fx: &mut dyn Celebrate) {
        if self.remaining.is_expired() {
            return;
        }
        self.remaining.tick();
        let due = self.every.tick();
        if !due || self.remaining.is_expired() {
            return;
        }

        let count = (self.peak_particles * self.remaining.fraction_left()).round() as u32;
        for x_range in [0.1f32..0.3, 0.7..0.9] {
            let origin = Vec2::new(rng.random_range(x_range), rng.random::<f32>() - 0.2);
            fx.celebrate(Burst {
                particle_count: count,
                spread: 360.0,
                origin,
                start_velocity: 30.0,
                lifetime_frames: 60,
                ..Burst::default()
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    #[test]
    fn test_confetti_spawns_and_expires() {
        let mut confetti = Confetti::new(7);
        confetti.celebrate(Burst {
            particle_count: 40,
            lifetime_frames: 30,
            ..Burst::default()
        });
        assert_eq!(confetti.particles().len(), 40);

        // Initial velocity points upward inside the cone
        assert!(confetti.particles().iter().all(|p| p.vel.y < 0.0));

        for _ in 0..120 {
            confetti.tick(SIM_DT);
        }
        assert!(confetti.is_empty());
    }

    #[test]
    fn test_confetti_respects_cap_and_scale() {
        let mut confetti = Confetti::new(1);
        confetti.set_limits(30, 0.5);
        confetti.celebrate(Burst {
            particle_count: 40,
            ..Burst::default()
        });
        assert_eq!(confetti.particles().len(), 20);
        confetti.celebrate(Burst {
            particle_count: 40,
            ..Burst::default()
        });
        assert_eq!(confetti.particles().len(), 30);

        confetti.set_limits(0, 0.0);
        assert!(confetti.is_empty());
    }

    #[test]
    fn test_fireworks_decay_and_stop() {
        let mut show = FireworksShow::new(5000, 250, 50.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut bursts: Vec<Burst> = Vec::new();

        for _ in 0..(10 * crate::consts::SIM_HZ) {
            show.tick(&mut rng, &mut bursts);
        }

        assert!(show.is_finished());
        // 19 firings between 250ms and 4750ms, two emitters each
        assert_eq!(bursts.len(), 38);
        assert!((47..=48).contains(&bursts[0].particle_count));
        assert!(
            bursts
                .windows(2)
                .all(|w| w[1].particle_count <= w[0].particle_count)
        );
        for pair in bursts.chunks(2) {
            assert!(pair[0].origin.x >= 0.1 && pair[0].origin.x < 0.3);
            assert!(pair[1].origin.x >= 0.7 && pair[1].origin.x < 0.9);
            assert!(pair[0].origin.y >= -0.2 && pair[0].origin.y < 0.8);
        }
    }
}
