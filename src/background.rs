//! Drifting heart backdrop
//!
//! Pure model: each heart loops through a fixed set of keyframes with its own
//! period and start delay. The renderer asks for a pose at a time.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

pub const HEART_COUNT: usize = 15;

const DRIFT_Y: [f32; 3] = [0.0, -100.0, 0.0];
const DRIFT_X: [f32; 3] = [0.0, 50.0, 0.0];
const OPACITY: [f32; 3] = [0.2, 0.5, 0.2];
const ROTATION_DEG: [f32; 4] = [0.0, 45.0, -45.0, 0.0];

/// Sample evenly spaced keyframes at progress `t` in [0, 1]
fn keyframes(frames: &[f32], t: f32) -> f32 {
    match frames.len() {
        0 => 0.0,
        1 => frames[0],
        n => {
            let pos = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i = (pos.floor() as usize).min(n - 2);
            let local = pos - i as f32;
            frames[i] + (frames[i + 1] - frames[i]) * local
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heart {
    /// Anchor in percent of the viewport
    pub anchor: Vec2,
    /// Pixels
    pub size: f32,
    /// Seconds per loop
    pub period: f32,
    /// Seconds before the first loop starts
    pub delay: f32,
}

/// Where a heart is drawn at a moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartPose {
    /// Pixel offset from the anchor
    pub offset: Vec2,
    pub opacity: f32,
    pub rotation_deg: f32,
}

impl Heart {
    pub fn pose(&self, time: f32) -> HeartPose {
        let t = if time <= self.delay || self.period <= 0.0 {
            0.0
        } else {
            ((time - self.delay) % self.period) / self.period
        };
        HeartPose {
            offset: Vec2::new(keyframes(&DRIFT_X, t), keyframes(&DRIFT_Y, t)),
            opacity: keyframes(&OPACITY, t),
            rotation_deg: keyframes(&ROTATION_DEG, t),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Backdrop {
    hearts: Vec<Heart>,
    time: f32,
}

impl Backdrop {
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let hearts = (0..HEART_COUNT)
            .map(|_| Heart {
                anchor: Vec2::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)),
                size: rng.random_range(10.0..30.0),
                period: rng.random_range(10.0..30.0),
                delay: rng.random_range(0.0..10.0),
            })
            .collect();
        Self { hearts, time: 0.0 }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advance the clock (frozen when motion is reduced)
    pub fn advance(&mut self, dt: f32, animate: bool) {
        if animate {
            self.time += dt;
        }
    }

    /// The first `limit` hearts with their current poses
    pub fn poses(&self, limit: usize) -> impl Iterator<Item = (&Heart, HeartPose)> + '_ {
        self.hearts
            .iter()
            .take(limit)
            .map(move |h| (h, h.pose(self.time)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heart() -> Heart {
        Heart {
            anchor: Vec2::new(50.0, 50.0),
            size: 20.0,
            period: 20.0,
            delay: 2.0,
        }
    }

    #[test]
    fn test_rests_during_delay() {
        let pose = heart().pose(1.0);
        assert_eq!(pose.offset, Vec2::ZERO);
        assert!((pose.opacity - 0.2).abs() < 1e-6);
        assert_eq!(pose.rotation_deg, 0.0);
    }

    #[test]
    fn test_midpoint_pose() {
        let pose = heart().pose(12.0);
        assert!((pose.offset.y + 100.0).abs() < 1e-3);
        assert!((pose.offset.x - 50.0).abs() < 1e-3);
        assert!((pose.opacity - 0.5).abs() < 1e-4);
        // Halfway between 45 and -45
        assert!(pose.rotation_deg.abs() < 1e-3);
    }

    #[test]
    fn test_loops() {
        let h = heart();
        let a = h.pose(7.0);
        let b = h.pose(27.0);
        assert!((a.offset - b.offset).length() < 1e-3);
    }

    #[test]
    fn test_backdrop_ranges_and_freeze() {
        let mut bg = Backdrop::new(9);
        assert_eq!(bg.hearts().len(), HEART_COUNT);
        for h in bg.hearts() {
            assert!(h.size >= 10.0 && h.size < 30.0);
            assert!(h.period >= 10.0 && h.period < 30.0);
            assert!(h.delay >= 0.0 && h.delay < 10.0);
        }
        bg.advance(1.0, false);
        assert_eq!(bg.time(), 0.0);
        bg.advance(1.0, true);
        assert_eq!(bg.time(), 1.0);
        assert_eq!(bg.poses(6).count(), 6);
    }
}
