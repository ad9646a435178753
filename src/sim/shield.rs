//! Day 2: radial defense
//!
//! Clouds drift in toward the core from random angles. The player swings an
//! arc shield around the core; clouds crossing the shield band inside its
//! angular window are blocked, clouds reaching the core cost health.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::arc::ArcBand;
use super::timer::{Countdown, Interval};
use crate::polar_to_cartesian;
use crate::tuning::ShieldTuning;

/// An incoming cloud
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Position relative to the core (px, y down)
    pub pos: Vec2,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldPhase {
    Intro,
    Playing { spawn: Interval, clock: Countdown },
    Won,
    Lost,
}

/// Something that happened during a tick (for HUD flashes and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShieldEvent {
    Blocked { id: u32 },
    CoreHit { id: u32 },
}

#[derive(Debug, Clone)]
pub struct Shield {
    phase: ShieldPhase,
    tuning: ShieldTuning,
    rng: Pcg32,
    shield: ArcBand,
    enemies: Vec<Enemy>,
    health: u32,
    blocked: u32,
    next_id: u32,
}

impl Shield {
    pub fn new(tuning: ShieldTuning, seed: u64) -> Self {
        let shield = ArcBand::new(
            tuning.shield_radius,
            tuning.shield_band,
            0.0,
            tuning.shield_half_width_deg,
        );
        let health = tuning.max_health;
        Self {
            phase: ShieldPhase::Intro,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            shield,
            enemies: Vec::new(),
            health,
            blocked: 0,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> ShieldPhase {
        self.phase
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn blocked(&self) -> u32 {
        self.blocked
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn shield(&self) -> &ArcBand {
        &self.shield
    }

    pub fn tuning(&self) -> &ShieldTuning {
        &self.tuning
    }

    /// Whole seconds left on the clock (0 outside play)
    pub fn seconds_left(&self) -> u32 {
        match self.phase {
            ShieldPhase::Playing { clock, .. } => clock.remaining_secs_ceil(),
            ShieldPhase::Intro => self.tuning.duration_ms.div_ceil(1000),
            _ => 0,
        }
    }

    /// Start (or restart after a loss) with full health and a fresh clock
    pub fn start(&mut self) {
        if !matches!(self.phase, ShieldPhase::Intro | ShieldPhase::Lost) {
            return;
        }
        self.health = self.tuning.max_health;
        self.blocked = 0;
        self.enemies.clear();
        self.phase = ShieldPhase::Playing {
            spawn: Interval::from_ms(self.tuning.spawn_interval_ms),
            clock: Countdown::from_ms(self.tuning.duration_ms),
        };
        log::info!("Shield round started");
    }

    /// Point the shield at an angle (degrees). Only while playing.
    pub fn aim(&mut self, angle_deg: f32) {
        if matches!(self.phase, ShieldPhase::Playing { .. }) {
            self.shield.aim(angle_deg);
        }
    }

    fn spawn_enemy(&mut self) {
        let angle = self.rng.random_range(0.0..360.0);
        let id = self.next_id;
        self.next_id += 1;
        self.enemies.push(Enemy {
            id,
            pos: polar_to_cartesian(self.tuning.spawn_distance, angle),
            active: true,
        });
    }

    /// Advance one fixed step
    pub fn tick(&mut self, dt: f32) -> Vec<ShieldEvent> {
        let mut events = Vec::new();
        let ShieldPhase::Playing { mut spawn, mut clock } = self.phase else {
            return events;
        };

        if spawn.tick() {
            self.spawn_enemy();
        }

        let step = self.tuning.enemy_speed * dt;
        for enemy in self.enemies.iter_mut().filter(|e| e.active) {
            let dist = enemy.pos.length();
            if dist <= step {
                enemy.pos = Vec2::ZERO;
            } else {
                enemy.pos -= enemy.pos / dist * step;
            }

            if self.shield.contains_point(enemy.pos) {
                enemy.active = false;
                self.blocked += 1;
                events.push(ShieldEvent::Blocked { id: enemy.id });
                continue;
            }

            if enemy.pos.length() < self.tuning.core_radius {
                enemy.active = false;
                self.health = self.health.saturating_sub(self.tuning.hit_damage);
                events.push(ShieldEvent::CoreHit { id: enemy.id });
            }
        }
        self.enemies.retain(|e| e.active);

        if self.health == 0 {
            self.phase = ShieldPhase::Lost;
            self.enemies.clear();
            log::info!("Shield round lost");
            return events;
        }

        if clock.tick() {
            self.phase = ShieldPhase::Won;
            self.enemies.clear();
            log::info!("Shield round won with {} health", self.health);
            return events;
        }

        self.phase = ShieldPhase::Playing { spawn, clock };
        events
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, ShieldPhase::Won | ShieldPhase::Lost)
    }

    /// Frame loop plus countdown while playing
    pub fn active_tasks(&self) -> usize {
        match self.phase {
            ShieldPhase::Playing { .. } => 2,
            _ => 0,
        }
    }
}
