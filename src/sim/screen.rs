//! One mounted day, whichever it is
//!
//! Input from the page arrives as a [`ScreenInput`] and is routed to the
//! screen that understands it; everything else is ignored.

use super::catch::Catch;
use super::celebration::Celebrate;
use super::drive::Drive;
use super::proposal::Proposal;
use super::reaction::Reaction;
use super::scratch::ScratchCard;
use super::shield::{Shield, ShieldPhase};
use crate::route::Day;
use crate::tuning::Tuning;

/// A player action, already mapped to screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenInput {
    /// Primary start button
    Start,
    /// Try again after a loss
    Retry,
    /// Tap on the reaction target, stamped on the frame clock when known
    React { at_ms: Option<f64> },
    /// Throttle down / up
    Press,
    Release,
    /// Shield angle (degrees, y down)
    Aim { deg: f32 },
    /// Catcher position (% of width)
    Slide { percent: f32 },
    /// Scratch point (card pixels)
    Scratch { x: f32, y: f32 },
    /// Any attempt at the decline control
    Dodge,
    Accept,
}

#[derive(Debug, Clone)]
pub enum ActiveScreen {
    Reaction(Reaction),
    Shield(Shield),
    Catch(Catch),
    Drive(Drive),
    Scratch(ScratchCard),
    Proposal(Proposal),
}

impl ActiveScreen {
    /// Fresh state for a day. `card_size` is the scratch canvas in pixels.
    pub fn new(day: Day, tuning: &Tuning, seed: u64, card_size: (u32, u32)) -> Self {
        match day {
            Day::One => ActiveScreen::Reaction(Reaction::new(tuning.reaction.clone(), seed)),
            Day::Two => ActiveScreen::Shield(Shield::new(tuning.shield.clone(), seed)),
            Day::Three => ActiveScreen::Catch(Catch::new(tuning.catching.clone(), seed)),
            Day::Four => ActiveScreen::Drive(Drive::new(tuning.drive.clone())),
            Day::Five => ActiveScreen::Scratch(ScratchCard::new(
                tuning.scratch.clone(),
                seed,
                card_size.0,
                card_size.1,
            )),
            Day::Six => ActiveScreen::Proposal(Proposal::new(tuning.proposal.clone(), seed)),
        }
    }

    pub fn day(&self) -> Day {
        match self {
            ActiveScreen::Reaction(_) => Day::One,
            ActiveScreen::Shield(_) => Day::Two,
            ActiveScreen::Catch(_) => Day::Three,
            ActiveScreen::Drive(_) => Day::Four,
            ActiveScreen::Scratch(_) => Day::Five,
            ActiveScreen::Proposal(_) => Day::Six,
        }
    }

    pub fn input(&mut self, input: ScreenInput, fx: &mut dyn Celebrate) {
        use ScreenInput as I;
        match (self, input) {
            (ActiveScreen::Reaction(r), I::Start) => r.start(),
            (ActiveScreen::Reaction(r), I::React { at_ms }) => r.react_at(at_ms, fx),
            (ActiveScreen::Reaction(r), I::Retry) => r.retry(),
            (ActiveScreen::Shield(s), I::Start | I::Retry) => s.start(),
            (ActiveScreen::Shield(s), I::Aim { deg }) => s.aim(deg),
            (ActiveScreen::Catch(c), I::Start) => c.start(),
            (ActiveScreen::Catch(c), I::Slide { percent }) => c.slide(percent),
            (ActiveScreen::Drive(d), I::Press) => d.press(),
            (ActiveScreen::Drive(d), I::Release) => d.release(),
            (ActiveScreen::Scratch(s), I::Scratch { x, y }) => s.scratch(x, y, fx),
            (ActiveScreen::Proposal(p), I::Dodge) => p.dodge(),
            (ActiveScreen::Proposal(p), I::Accept) => p.accept(),
            (screen, input) => {
                log::trace!("{:?} ignores {:?}", screen.day(), input);
            }
        }
    }

    /// Advance one fixed step
    pub fn tick(&mut self, dt: f32, fx: &mut dyn Celebrate) {
        self.tick_at(dt, None, fx);
    }

    /// Advance one fixed step inside a display frame stamped `now_ms`
    pub fn tick_at(&mut self, dt: f32, now_ms: Option<f64>, fx: &mut dyn Celebrate) {
        match self {
            ActiveScreen::Reaction(r) => r.tick_at(now_ms),
            ActiveScreen::Shield(s) => {
                for event in s.tick(dt) {
                    log::trace!("{:?}", event);
                }
            }
            ActiveScreen::Catch(c) => c.tick(dt, fx),
            ActiveScreen::Drive(d) => d.tick(dt),
            ActiveScreen::Scratch(_) => {}
            ActiveScreen::Proposal(p) => p.tick(fx),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            ActiveScreen::Reaction(r) => r.is_terminal(),
            ActiveScreen::Shield(s) => s.is_terminal(),
            ActiveScreen::Catch(c) => c.is_terminal(),
            ActiveScreen::Drive(d) => d.is_terminal(),
            ActiveScreen::Scratch(s) => s.is_terminal(),
            ActiveScreen::Proposal(p) => p.is_terminal(),
        }
    }

    /// Whether the screen is in a phase that wants per-frame steps
    pub fn wants_frames(&self) -> bool {
        self.active_tasks() > 0
    }

    pub fn active_tasks(&self) -> usize {
        match self {
            ActiveScreen::Reaction(r) => r.active_tasks(),
            ActiveScreen::Shield(s) => s.active_tasks(),
            ActiveScreen::Catch(c) => c.active_tasks(),
            ActiveScreen::Drive(d) => d.active_tasks(),
            ActiveScreen::Scratch(s) => s.active_tasks(),
            ActiveScreen::Proposal(p) => p.active_tasks(),
        }
    }

    /// Where the "continue" affordance leads, once it is offered
    pub fn continue_to(&self) -> Option<Day> {
        let won = match self {
            // Day 1 ends on "come back tomorrow"
            ActiveScreen::Reaction(_) => false,
            ActiveScreen::Shield(s) => s.phase() == ShieldPhase::Won,
            ActiveScreen::Catch(c) => c.is_terminal(),
            ActiveScreen::Drive(d) => d.is_terminal(),
            ActiveScreen::Scratch(s) => s.is_terminal(),
            ActiveScreen::Proposal(_) => false,
        };
        if won { self.day().next() } else { None }
    }
}
