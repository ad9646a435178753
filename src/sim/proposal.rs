//! Day 6: the question
//!
//! "Yes" starts a fireworks show. "No" runs away from every attempt.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::celebration::{Celebrate, FireworksShow};
use crate::tuning::ProposalTuning;

#[derive(Debug, Clone, PartialEq)]
pub enum ProposalPhase {
    /// Waiting for an answer; the decline control sits at this offset (px)
    Asking { decline_offset: Vec2 },
    Accepted { show: FireworksShow },
}

#[derive(Debug, Clone)]
pub struct Proposal {
    phase: ProposalPhase,
    tuning: ProposalTuning,
    rng: Pcg32,
    dodges: u32,
}

impl Proposal {
    pub fn new(tuning: ProposalTuning, seed: u64) -> Self {
        Self {
            phase: ProposalPhase::Asking {
                decline_offset: Vec2::ZERO,
            },
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            dodges: 0,
        }
    }

    pub fn phase(&self) -> &ProposalPhase {
        &self.phase
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.phase, ProposalPhase::Accepted { .. })
    }

    /// Current offset of the decline control (zero once accepted)
    pub fn decline_offset(&self) -> Vec2 {
        match self.phase {
            ProposalPhase::Asking { decline_offset } => decline_offset,
            ProposalPhase::Accepted { .. } => Vec2::ZERO,
        }
    }

    /// How many times the decline control has run away
    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    /// Any attempt at the decline control moves it somewhere new
    pub fn dodge(&mut self) {
        let ProposalPhase::Asking { decline_offset } = self.phase else {
            return;
        };
        let range = self.tuning.dodge_range_px;
        let next = loop {
            let candidate = Vec2::new(
                (self.rng.random::<f32>() - 0.5) * range,
                (self.rng.random::<f32>() - 0.5) * range,
            );
            if candidate != decline_offset || range <= 0.0 {
                break candidate;
            }
        };
        self.dodges += 1;
        self.phase = ProposalPhase::Asking {
            decline_offset: next,
        };
    }

    /// Say yes. Only the first call does anything.
    pub fn accept(&mut self) {
        if self.is_accepted() {
            return;
        }
        let t = &self.tuning;
        self.phase = ProposalPhase::Accepted {
            show: FireworksShow::new(t.show_ms, t.burst_every_ms, t.peak_particles),
        };
        log::info!("Accepted after {} dodges", self.dodges);
    }

    /// Drive the fireworks
    pub fn tick(&mut self, fx: &mut dyn Celebrate) {
        if let ProposalPhase::Accepted { show } = &mut self.phase {
            show.tick(&mut self.rng, fx);
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_accepted()
    }

    /// Fireworks timer until the show ends
    pub fn active_tasks(&self) -> usize {
        match &self.phase {
            ProposalPhase::Accepted { show } if !show.is_finished() => 1,
            _ => 0,
        }
    }
}
