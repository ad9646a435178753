//! Day 3: catch the good food, dodge the bad
//!
//! Items fall from above the top edge. The catcher slides along the bottom
//! of the play field; everything is in percent of the field's size.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::celebration::{Burst, Celebrate, PALETTE_BLUSH};
use super::timer::Interval;
use crate::tuning::{CatchTuning, FoodKind, ItemSpec, ItemTag};

/// A falling item
#[derive(Debug, Clone, PartialEq)]
pub struct FallingItem {
    pub id: u32,
    pub kind: FoodKind,
    pub score: i32,
    pub tag: ItemTag,
    /// Percent of width
    pub x: f32,
    /// Percent of height (negative is above the field)
    pub y: f32,
    /// Percent of height per second
    pub speed: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchPhase {
    Intro,
    Playing { spawn: Interval },
    Won,
}

#[derive(Debug, Clone)]
pub struct Catch {
    phase: CatchPhase,
    tuning: CatchTuning,
    rng: Pcg32,
    items: Vec<FallingItem>,
    catcher_x: f32,
    score: u32,
    next_id: u32,
}

impl Catch {
    pub fn new(tuning: CatchTuning, seed: u64) -> Self {
        Self {
            phase: CatchPhase::Intro,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            items: Vec::new(),
            catcher_x: 50.0,
            score: 0,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> CatchPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target(&self) -> u32 {
        self.tuning.target_score
    }

    pub fn items(&self) -> &[FallingItem] {
        &self.items
    }

    pub fn catcher_x(&self) -> f32 {
        self.catcher_x
    }

    pub fn tuning(&self) -> &CatchTuning {
        &self.tuning
    }

    pub fn start(&mut self) {
        if self.phase != CatchPhase::Intro {
            return;
        }
        self.score = 0;
        self.items.clear();
        self.phase = CatchPhase::Playing {
            spawn: Interval::from_ms(self.tuning.spawn_interval_ms),
        };
        log::info!("Catch round started");
    }

    /// Move the catcher (percent of width)
    pub fn slide(&mut self, percent: f32) {
        if percent.is_finite() {
            self.catcher_x = percent.clamp(0.0, 100.0);
        }
    }

    /// Weighted pick from the item table
    fn pick(&mut self) -> Option<ItemSpec> {
        let total: u32 = self.tuning.items.iter().map(|i| i.weight).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.rng.random_range(0..total);
        for entry in &self.tuning.items {
            if roll < entry.weight {
                return Some(entry.clone());
            }
            roll -= entry.weight;
        }
        None
    }

    fn spawn_item(&mut self) {
        let Some(entry) = self.pick() else {
            return;
        };
        let t = &self.tuning;
        let x = if t.spawn_x_max > t.spawn_x_min {
            self.rng.random_range(t.spawn_x_min..t.spawn_x_max)
        } else {
            t.spawn_x_min
        };
        let speed = if t.max_fall_speed > t.min_fall_speed {
            self.rng.random_range(t.min_fall_speed..t.max_fall_speed)
        } else {
            t.min_fall_speed
        };
        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned {:?} at {:.1}%", entry.kind, x);
        self.items.push(FallingItem {
            id,
            kind: entry.kind,
            score: entry.score,
            tag: entry.tag,
            x,
            y: self.tuning.spawn_y,
            speed,
            active: true,
        });
    }

    fn in_catch_zone(&self, item: &FallingItem) -> bool {
        item.y > self.tuning.catch_top
            && item.y < self.tuning.catch_bottom
            && (item.x - self.catcher_x).abs() < self.tuning.catch_half_width
    }

    /// Advance one fixed step
    pub fn tick(&mut self, dt: f32, fx: &mut dyn Celebrate) {
        let CatchPhase::Playing { mut spawn } = self.phase else {
            return;
        };

        if spawn.tick() {
            self.spawn_item();
        }
        self.phase = CatchPhase::Playing { spawn };

        let target = self.tuning.target_score as i32;
        for i in 0..self.items.len() {
            if !self.items[i].active {
                continue;
            }
            self.items[i].y += self.items[i].speed * dt;

            if self.in_catch_zone(&self.items[i]) {
                let item = &mut self.items[i];
                item.active = false;
                self.score = (self.score as i32 + item.score).clamp(0, target) as u32;
                log::debug!("Caught {:?}, score {}", item.kind, self.score);

                if self.score >= self.tuning.target_score {
                    self.phase = CatchPhase::Won;
                    fx.celebrate(Burst {
                        particle_count: 150,
                        spread: 70.0,
                        origin: Vec2::new(0.5, 0.6),
                        colors: PALETTE_BLUSH,
                        ..Burst::default()
                    });
                    log::info!("Catch round won");
                    break;
                }
            } else if self.items[i].y > self.tuning.despawn_y {
                self.items[i].active = false;
            }
        }
        self.items.retain(|item| item.active);

        if self.phase == CatchPhase::Won {
            self.items.clear();
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == CatchPhase::Won
    }

    /// Frame loop while playing
    pub fn active_tasks(&self) -> usize {
        match self.phase {
            CatchPhase::Playing { .. } => 1,
            _ => 0,
        }
    }
}
