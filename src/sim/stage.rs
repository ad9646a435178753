//! Mount point for the current day
//!
//! At most one screen lives here. Mounting always builds fresh state, and
//! unmounting drops the screen together with every timer its phase owned.

use super::celebration::Celebrate;
use super::screen::{ActiveScreen, ScreenInput};
use crate::route::Day;
use crate::tuning::Tuning;

/// Scratch canvas size used until the page reports the real one
pub const DEFAULT_CARD_SIZE: (u32, u32) = (360, 400);

#[derive(Debug, Clone)]
pub struct Stage {
    tuning: Tuning,
    card_size: (u32, u32),
    screen: Option<ActiveScreen>,
    mounts: u32,
}

impl Stage {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            card_size: DEFAULT_CARD_SIZE,
            screen: None,
            mounts: 0,
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Size of the scratch canvas for the next mount
    pub fn set_card_size(&mut self, width: u32, height: u32) {
        self.card_size = (width.max(1), height.max(1));
    }

    /// Replace whatever is mounted with a fresh screen for `day`
    pub fn mount(&mut self, day: Day, seed: u64) -> &mut ActiveScreen {
        self.unmount();
        self.mounts += 1;
        log::info!("Mounted day {}", day.number());
        self.screen
            .insert(ActiveScreen::new(day, &self.tuning, seed, self.card_size))
    }

    /// Drop the mounted screen (no-op when empty)
    pub fn unmount(&mut self) {
        if let Some(screen) = self.screen.take() {
            log::debug!(
                "Unmounted day {} with {} live tasks",
                screen.day().number(),
                screen.active_tasks()
            );
        }
    }

    pub fn screen(&self) -> Option<&ActiveScreen> {
        self.screen.as_ref()
    }

    pub fn screen_mut(&mut self) -> Option<&mut ActiveScreen> {
        self.screen.as_mut()
    }

    pub fn day(&self) -> Option<Day> {
        self.screen.as_ref().map(ActiveScreen::day)
    }

    /// Number of mounts since creation
    pub fn mounts(&self) -> u32 {
        self.mounts
    }

    pub fn input(&mut self, input: ScreenInput, fx: &mut dyn Celebrate) {
        if let Some(screen) = &mut self.screen {
            screen.input(input, fx);
        }
    }

    /// Advance the mounted screen one fixed step
    pub fn tick(&mut self, dt: f32, fx: &mut dyn Celebrate) {
        if let Some(screen) = &mut self.screen {
            screen.tick(dt, fx);
        }
    }

    /// Advance one fixed step of a display frame stamped `now_ms`
    pub fn tick_at(&mut self, dt: f32, now_ms: f64, fx: &mut dyn Celebrate) {
        if let Some(screen) = &mut self.screen {
            screen.tick_at(dt, Some(now_ms), fx);
        }
    }

    /// Live loops and timers owned by the mounted screen
    pub fn active_tasks(&self) -> usize {
        self.screen.as_ref().map_or(0, ActiveScreen::active_tasks)
    }
}
