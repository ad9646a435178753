//! Tick-based timers owned by screen phases
//!
//! A timer is plain data stored inside the phase variant that needs it.
//! Leaving the phase drops the timer, which is the cancellation.

use crate::ms_to_ticks;

/// One-shot countdown. Fires exactly once when it reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: u32,
    remaining: u32,
}

impl Countdown {
    pub fn from_ticks(ticks: u32) -> Self {
        Self {
            total: ticks,
            remaining: ticks,
        }
    }

    pub fn from_ms(ms: u32) -> Self {
        Self::from_ticks(ms_to_ticks(ms))
    }

    /// Advance one tick. Returns true on the tick the countdown expires.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining
    }

    /// Whole seconds left, rounded up (what a HUD shows)
    pub fn remaining_secs_ceil(&self) -> u32 {
        let hz = crate::consts::SIM_HZ;
        self.remaining.div_ceil(hz)
    }

    /// Remaining fraction in [0, 1]
    pub fn fraction_left(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.remaining as f32 / self.total as f32
        }
    }
}

/// Repeating interval. Fires every `period` ticks, first after one full period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: u32,
    elapsed: u32,
}

impl Interval {
    pub fn from_ticks(period: u32) -> Self {
        Self {
            period: period.max(1),
            elapsed: 0,
        }
    }

    pub fn from_ms(ms: u32) -> Self {
        Self::from_ticks(ms_to_ticks(ms))
    }

    /// Advance one tick. Returns true when the interval fires.
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.period {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_fires_once() {
        let mut c = Countdown::from_ticks(3);
        assert!(!c.tick());
        assert!(!c.tick());
        assert!(c.tick());
        assert!(c.is_expired());
        assert!(!c.tick());
        assert!(!c.tick());
    }

    #[test]
    fn test_countdown_seconds_ceil() {
        let c = Countdown::from_ms(15_000);
        assert_eq!(c.remaining_secs_ceil(), 15);
        let mut c = Countdown::from_ms(1000);
        c.tick();
        assert_eq!(c.remaining_secs_ceil(), 1);
    }

    #[test]
    fn test_interval_period() {
        let mut i = Interval::from_ticks(4);
        let fired: Vec<bool> = (0..8).map(|_| i.tick()).collect();
        assert_eq!(
            fired,
            vec![false, false, false, true, false, false, false, true]
        );
    }

    #[test]
    fn test_interval_zero_period_clamped() {
        let mut i = Interval::from_ticks(0);
        assert!(i.tick());
        assert!(i.tick());
    }
}
