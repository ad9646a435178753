//! Day 1: reaction timing
//!
//! Wait for a randomized go signal, then react fast. Reacting early fails.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::celebration::{Burst, Celebrate, PALETTE_EARTH};
use super::timer::Countdown;
use crate::{ms_to_ticks, ticks_to_ms};
use crate::tuning::ReactionTuning;

/// Why a run failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    /// Reacted before the go signal
    TooEager,
    /// Reacted after the success window
    TooSlow { reaction_ms: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReactionPhase {
    Intro,
    /// Go signal pending
    Waiting { go_in: Countdown },
    /// Go signal shown; ticks counted since, plus the frame time it appeared
    /// at when a display clock drives the ticks
    Ready {
        elapsed_ticks: u32,
        shown_at_ms: Option<f64>,
    },
    Success { reaction_ms: u32 },
    Fail(FailReason),
}

#[derive(Debug, Clone)]
pub struct Reaction {
    phase: ReactionPhase,
    tuning: ReactionTuning,
    rng: Pcg32,
}

impl Reaction {
    pub fn new(tuning: ReactionTuning, seed: u64) -> Self {
        Self {
            phase: ReactionPhase::Intro,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> ReactionPhase {
        self.phase
    }

    /// Arm the go signal after a random delay
    pub fn start(&mut self) {
        if self.phase != ReactionPhase::Intro {
            return;
        }
        // Drawn in whole ticks so the window stays half-open after conversion
        let min = ms_to_ticks(self.tuning.min_delay_ms).max(1);
        let max = ms_to_ticks(self.tuning.max_delay_ms).max(min + 1);
        let delay = self.rng.random_range(min..max);
        log::debug!("Go signal in {} ms", ticks_to_ms(delay));
        self.phase = ReactionPhase::Waiting {
            go_in: Countdown::from_ticks(delay),
        };
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        self.tick_at(None);
    }

    /// Advance one tick inside a display frame stamped `now_ms`
    pub fn tick_at(&mut self, now_ms: Option<f64>) {
        match &mut self.phase {
            ReactionPhase::Waiting { go_in } => {
                if go_in.tick() {
                    self.phase = ReactionPhase::Ready {
                        elapsed_ticks: 0,
                        shown_at_ms: now_ms,
                    };
                }
            }
            ReactionPhase::Ready { elapsed_ticks, .. } => *elapsed_ticks += 1,
            _ => {}
        }
    }

    /// The player's tap, scored on ticks alone
    pub fn react(&mut self, fx: &mut dyn Celebrate) {
        self.react_at(None, fx);
    }

    /// The player's tap at `at_ms` on the same clock as the frame stamps.
    /// Falls back to counted ticks when either stamp is missing.
    pub fn react_at(&mut self, at_ms: Option<f64>, fx: &mut dyn Celebrate) {
        match self.phase {
            ReactionPhase::Waiting { .. } => {
                // Dropping the Waiting phase cancels the pending go signal
                self.phase = ReactionPhase::Fail(FailReason::TooEager);
                log::info!("Reacted before the signal");
            }
            ReactionPhase::Ready {
                elapsed_ticks,
                shown_at_ms,
            } => {
                let reaction_ms = match (shown_at_ms, at_ms) {
                    (Some(shown), Some(at)) => (at - shown).max(0.0).floor() as u32,
                    _ => ticks_to_ms(elapsed_ticks),
                };
                if reaction_ms < self.tuning.success_threshold_ms {
                    self.phase = ReactionPhase::Success { reaction_ms };
                    fx.celebrate(Burst {
                        particle_count: 100,
                        spread: 70.0,
                        origin: Vec2::new(0.5, 0.6),
                        colors: PALETTE_EARTH,
                        ..Burst::default()
                    });
                    log::info!("Reaction success in {} ms", reaction_ms);
                } else {
                    self.phase = ReactionPhase::Fail(FailReason::TooSlow { reaction_ms });
                    log::info!("Reaction too slow: {} ms", reaction_ms);
                }
            }
            _ => {}
        }
    }

    /// Back to the intro after a failure
    pub fn retry(&mut self) {
        if matches!(self.phase, ReactionPhase::Fail(_)) {
            self.phase = ReactionPhase::Intro;
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.phase,
            ReactionPhase::Success { .. } | ReactionPhase::Fail(_)
        )
    }

    /// Pending timers plus running frame loops
    pub fn active_tasks(&self) -> usize {
        match self.phase {
            ReactionPhase::Waiting { .. } | ReactionPhase::Ready { .. } => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(seed: u64) -> Reaction {
        let mut r = Reaction::new(ReactionTuning::default(), seed);
        r.start();
        r
    }

    fn run_until_ready(r: &mut Reaction) -> u32 {
        let mut ticks = 0;
        while matches!(r.phase(), ReactionPhase::Waiting { .. }) {
            r.tick();
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_delay_within_window() {
        for seed in 0..50 {
            let mut r = started(seed);
            let ticks = run_until_ready(&mut r);
            assert!(ticks >= ms_to_ticks(2000), "seed {seed}: {ticks}");
            assert!(ticks < ms_to_ticks(5000), "seed {seed}: {ticks}");
        }
    }

    #[test]
    fn test_longest_delay_stays_below_window_end() {
        let longest = (0..5000)
            .map(|seed| run_until_ready(&mut started(seed)))
            .max()
            .unwrap_or(0);
        assert!(longest < ms_to_ticks(5000));
        assert!(ticks_to_ms(longest) < 5000);
    }

    #[test]
    fn test_wall_clock_reaction_at_threshold_fails() {
        let mut fx: Vec<Burst> = Vec::new();
        let mut r = started(5);
        // The flip lands in a frame stamped 10 s into the page
        while matches!(r.phase(), ReactionPhase::Waiting { .. }) {
            r.tick_at(Some(10_000.0));
        }
        assert_eq!(
            r.phase(),
            ReactionPhase::Ready {
                elapsed_ticks: 0,
                shown_at_ms: Some(10_000.0)
            }
        );

        // A slow display only managed a few ticks in the meantime
        for _ in 0..ms_to_ticks(100) {
            r.tick_at(Some(10_500.0));
        }
        r.react_at(Some(10_800.0), &mut fx);
        assert_eq!(
            r.phase(),
            ReactionPhase::Fail(FailReason::TooSlow { reaction_ms: 800 })
        );
        assert!(fx.is_empty());
    }

    #[test]
    fn test_wall_clock_reaction_under_threshold_succeeds() {
        let mut fx: Vec<Burst> = Vec::new();
        let mut r = started(6);
        while matches!(r.phase(), ReactionPhase::Waiting { .. }) {
            r.tick_at(Some(2_000.0));
        }
        r.react_at(Some(2_799.5), &mut fx);
        assert_eq!(r.phase(), ReactionPhase::Success { reaction_ms: 799 });
        assert_eq!(fx.len(), 1);
    }

    #[test]
    fn test_missing_tap_stamp_falls_back_to_ticks() {
        let mut fx: Vec<Burst> = Vec::new();
        let mut r = started(7);
        while matches!(r.phase(), ReactionPhase::Waiting { .. }) {
            r.tick_at(Some(1_000.0));
        }
        for _ in 0..ms_to_ticks(900) {
            r.tick_at(Some(1_000.0));
        }
        r.react_at(None, &mut fx);
        assert_eq!(
            r.phase(),
            ReactionPhase::Fail(FailReason::TooSlow { reaction_ms: 900 })
        );
    }

    #[test]
    fn test_early_reaction_fails_and_cancels_signal() {
        let mut r = started(1);
        let mut fx: Vec<Burst> = Vec::new();
        r.tick();
        r.react(&mut fx);
        assert_eq!(r.phase(), ReactionPhase::Fail(FailReason::TooEager));
        assert_eq!(r.active_tasks(), 0);

        // The go signal never fires after the failure
        for _ in 0..ms_to_ticks(6000) {
            r.tick();
        }
        assert_eq!(r.phase(), ReactionPhase::Fail(FailReason::TooEager));
        assert!(fx.is_empty());
    }

    #[test]
    fn test_fast_reaction_succeeds_once() {
        let mut r = started(2);
        let mut fx: Vec<Burst> = Vec::new();
        run_until_ready(&mut r);
        for _ in 0..ms_to_ticks(300) {
            r.tick();
        }
        r.react(&mut fx);
        assert_eq!(r.phase(), ReactionPhase::Success { reaction_ms: 300 });
        assert_eq!(fx.len(), 1);
        assert_eq!(fx[0].particle_count, 100);

        // Further taps are ignored
        r.react(&mut fx);
        assert_eq!(fx.len(), 1);
        assert!(r.is_terminal());
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        let mut fx: Vec<Burst> = Vec::new();

        let mut r = started(3);
        run_until_ready(&mut r);
        for _ in 0..ms_to_ticks(800) {
            r.tick();
        }
        r.react(&mut fx);
        assert_eq!(
            r.phase(),
            ReactionPhase::Fail(FailReason::TooSlow { reaction_ms: 800 })
        );

        let mut r = started(3);
        run_until_ready(&mut r);
        for _ in 0..ms_to_ticks(800) - 1 {
            r.tick();
        }
        r.react(&mut fx);
        assert!(matches!(r.phase(), ReactionPhase::Success { .. }));
    }

    #[test]
    fn test_retry_returns_to_intro() {
        let mut r = started(4);
        r.react(&mut Vec::<Burst>::new());
        r.retry();
        assert_eq!(r.phase(), ReactionPhase::Intro);
        r.start();
        assert!(matches!(r.phase(), ReactionPhase::Waiting { .. }));
    }
}
