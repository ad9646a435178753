//! Day 5: scratch to reveal
//!
//! The overlay is an alpha mask with one byte per canvas pixel. Scratching
//! clears a disc; every so often the whole mask is scanned to see how much
//! has been cleared.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::celebration::{Burst, Celebrate, PALETTE_GOLD};
use crate::tuning::ScratchTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchPhase {
    Covered,
    Revealed,
}

#[derive(Debug, Clone)]
pub struct ScratchCard {
    phase: ScratchPhase,
    tuning: ScratchTuning,
    rng: Pcg32,
    width: u32,
    height: u32,
    alpha: Vec<u8>,
    /// Highest cleared fraction any scan has seen
    progress: f32,
    scans: u32,
    /// Scratch centers the renderer has not erased yet
    pending: Vec<Vec2>,
}

impl ScratchCard {
    pub fn new(tuning: ScratchTuning, seed: u64, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            phase: ScratchPhase::Covered,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            width,
            height,
            alpha: vec![u8::MAX; (width * height) as usize],
            progress: 0.0,
            scans: 0,
            pending: Vec::new(),
        }
    }

    pub fn phase(&self) -> ScratchPhase {
        self.phase
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Best cleared fraction seen so far, in [0, 1]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// How many full scans have run
    pub fn scans(&self) -> u32 {
        self.scans
    }

    pub fn brush_radius(&self) -> f32 {
        self.tuning.brush_radius
    }

    /// Alpha of the overlay at a pixel (0 outside the card)
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y * self.width + x) as usize]
    }

    /// Scratch at a point in card pixels
    pub fn scratch(&mut self, x: f32, y: f32, fx: &mut dyn Celebrate) {
        if self.phase != ScratchPhase::Covered || !x.is_finite() || !y.is_finite() {
            return;
        }
        self.erase_disc(x, y);
        self.pending.push(Vec2::new(x, y));

        let sample: f32 = self.rng.random();
        if sample > 1.0 - self.tuning.scan_probability {
            self.scan(fx);
        }
    }

    /// Scratch centers since the last call, for the real canvas
    pub fn take_strokes(&mut self) -> Vec<Vec2> {
        std::mem::take(&mut self.pending)
    }

    /// Fraction of pixels below the clear threshold right now
    pub fn cleared_fraction(&self) -> f32 {
        let clear = self
            .alpha
            .iter()
            .filter(|&&a| a < self.tuning.clear_alpha)
            .count();
        clear as f32 / self.alpha.len() as f32
    }

    fn erase_disc(&mut self, cx: f32, cy: f32) {
        let r = self.tuning.brush_radius.max(0.0);
        let x0 = (cx - r).floor().max(0.0) as u32;
        let y0 = (cy - r).floor().max(0.0) as u32;
        let x1 = ((cx + r).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((cy + r).ceil().max(0.0) as u32).min(self.height);
        let r2 = r * r;

        for py in y0..y1 {
            let dy = py as f32 + 0.5 - cy;
            let row = (py * self.width) as usize;
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                if dx * dx + dy * dy <= r2 {
                    self.alpha[row + px as usize] = 0;
                }
            }
        }
    }

    fn scan(&mut self, fx: &mut dyn Celebrate) {
        self.scans += 1;
        let fraction = self.cleared_fraction();
        self.progress = self.progress.max(fraction);
        log::debug!("Scratch scan: {:.1}% cleared", fraction * 100.0);

        if fraction > self.tuning.reveal_fraction {
            self.phase = ScratchPhase::Revealed;
            fx.celebrate(Burst {
                particle_count: 200,
                spread: 100.0,
                colors: PALETTE_GOLD,
                ..Burst::default()
            });
            log::info!("Card revealed");
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == ScratchPhase::Revealed
    }

    /// No loops or timers; scratching is event driven
    pub fn active_tasks(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_scan() -> ScratchTuning {
        ScratchTuning {
            scan_probability: 1.0,
            ..ScratchTuning::default()
        }
    }

    /// Sweep the brush over the card in rows
    fn sweep(card: &mut ScratchCard, fx: &mut Vec<Burst>) {
        let (w, h) = card.size();
        let mut y = 10.0;
        while y < h as f32 && !card.is_terminal() {
            let mut x = 10.0;
            while x < w as f32 && !card.is_terminal() {
                card.scratch(x, y, fx);
                x += 10.0;
            }
            y += 20.0;
        }
    }

    #[test]
    fn test_scratch_clears_a_disc() {
        let mut card = ScratchCard::new(ScratchTuning::default(), 1, 200, 200);
        card.scratch(100.0, 100.0, &mut Vec::<Burst>::new());
        assert_eq!(card.alpha_at(100, 100), 0);
        assert_eq!(card.alpha_at(100, 85), 0);
        assert_eq!(card.alpha_at(100, 75), 255);
        assert_eq!(card.alpha_at(130, 100), 255);

        // Roughly pi * 20^2 pixels cleared
        let cleared = card.cleared_fraction() * 200.0 * 200.0;
        assert!((cleared - 1256.6).abs() < 40.0, "cleared {cleared}");
    }

    #[test]
    fn test_scratch_near_edge_is_clipped() {
        let mut card = ScratchCard::new(ScratchTuning::default(), 2, 50, 50);
        card.scratch(-5.0, 49.0, &mut Vec::<Burst>::new());
        card.scratch(1000.0, 1000.0, &mut Vec::<Burst>::new());
        assert_eq!(card.alpha_at(0, 49), 0);
        assert_eq!(card.alpha_at(49, 0), 255);
    }

    #[test]
    fn test_reveal_once_with_gold_burst() {
        let mut card = ScratchCard::new(always_scan(), 3, 120, 120);
        let mut fx: Vec<Burst> = Vec::new();
        sweep(&mut card, &mut fx);

        assert!(card.is_terminal());
        assert!(card.progress() > 0.6);
        assert_eq!(fx.len(), 1);
        assert_eq!(fx[0].particle_count, 200);
        assert_eq!(fx[0].colors, PALETTE_GOLD);

        let scans = card.scans();
        card.scratch(5.0, 5.0, &mut fx);
        assert_eq!(card.scans(), scans);
        assert_eq!(fx.len(), 1);
    }

    #[test]
    fn test_progress_only_moves_on_scans() {
        let tuning = ScratchTuning {
            scan_probability: 0.0,
            ..ScratchTuning::default()
        };
        let mut card = ScratchCard::new(tuning, 4, 120, 120);
        let mut fx: Vec<Burst> = Vec::new();
        sweep(&mut card, &mut fx);

        assert_eq!(card.scans(), 0);
        assert_eq!(card.progress(), 0.0);
        assert!(card.cleared_fraction() > 0.9);
        assert!(!card.is_terminal());
    }

    #[test]
    fn test_strokes_are_drained() {
        let mut card = ScratchCard::new(ScratchTuning::default(), 5, 100, 100);
        card.scratch(10.0, 10.0, &mut Vec::<Burst>::new());
        card.scratch(20.0, 10.0, &mut Vec::<Burst>::new());
        assert_eq!(card.take_strokes().len(), 2);
        assert!(card.take_strokes().is_empty());
    }
}
