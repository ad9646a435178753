//! View model for the page chrome and overlays
//!
//! [`view`] projects the current route and mounted screen into plain data.
//! The browser glue copies it into the DOM; the headless binary prints it.

use glam::Vec2;
use serde::Serialize;

use crate::route::{Day, Route};
use crate::sim::{
    ActiveScreen, CatchPhase, FailReason, ProposalPhase, ReactionPhase, ScratchPhase, ShieldPhase,
};

/// What the primary button does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UiAction {
    /// Go to a day (start of the journey, or continue)
    Open(Day),
    Home,
    Start,
    Retry,
    /// Tap on the reaction target
    React,
    Accept,
    /// Disabled placeholder
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionButton {
    pub label: String,
    pub action: UiAction,
    pub enabled: bool,
}

impl ActionButton {
    fn new(label: &str, action: UiAction) -> Self {
        Self {
            label: label.to_string(),
            action,
            enabled: true,
        }
    }

    fn disabled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            action: UiAction::Nothing,
            enabled: false,
        }
    }
}

/// Everything the page shows outside the canvas
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct View {
    /// Header date ("Feb 9"), absent on the home page
    pub date_label: Option<String>,
    pub show_home_button: bool,
    pub title: String,
    pub heading: Option<String>,
    pub message: String,
    pub detail: Option<String>,
    /// Status line while playing
    pub hud: Option<String>,
    pub primary: Option<ActionButton>,
    /// Day 4 throttle button
    pub show_hold: bool,
    /// Day 6 decline button and its offset (px)
    pub show_decline: bool,
    pub decline_offset: Vec2,
    /// Day 4 landmark popup
    pub notice: Option<String>,
    /// Progress bar fill in [0, 1]
    pub progress: Option<f32>,
}

fn continue_button(screen: &ActiveScreen) -> Option<ActionButton> {
    screen
        .continue_to()
        .map(|day| ActionButton::new("Continue Journey →", UiAction::Open(day)))
}

/// Project the page state into a view
pub fn view(route: &Route, screen: Option<&ActiveScreen>) -> View {
    match route {
        Route::Home => View {
            title: "Hey Nemo,".to_string(),
            message: "Welcome to your dedicated space. A little journey, just for us.".to_string(),
            primary: Some(ActionButton::new("Start the Journey", UiAction::Open(Day::One))),
            ..View::default()
        },
        Route::ComingSoon(_) => View {
            show_home_button: true,
            title: "Day Content Coming Soon".to_string(),
            primary: Some(ActionButton::new("Back Home", UiAction::Home)),
            ..View::default()
        },
        Route::Day(day) => {
            let mut v = View {
                date_label: Some(day.date_label()),
                show_home_button: true,
                title: day.title().to_string(),
                ..View::default()
            };
            if let Some(screen) = screen.filter(|s| s.day() == *day) {
                fill_screen(&mut v, screen);
            }
            v
        }
    }
}

fn fill_screen(v: &mut View, screen: &ActiveScreen) {
    match screen {
        ActiveScreen::Reaction(r) => match r.phase() {
            ReactionPhase::Intro => {
                v.message = "We started as strangers...".to_string();
                v.primary = Some(ActionButton::new("Recreate the Moment", UiAction::Start));
            }
            ReactionPhase::Waiting { .. } => {
                v.message = "She's walking by... act cool...".to_string();
                v.primary = Some(ActionButton::new("...", UiAction::React));
            }
            ReactionPhase::Ready { .. } => {
                v.message = "SUP?? NOW!".to_string();
                v.primary = Some(ActionButton::new("SUP!", UiAction::React));
            }
            ReactionPhase::Success { reaction_ms } => {
                v.message = "Perfect Nod. Smooth.".to_string();
                v.hud = Some(format!("{} ms", reaction_ms));
                v.detail = Some(
                    "I still remember that simple eyebrow raise... just a 'Sup?' \
                     But in that moment, my life changed forever."
                        .to_string(),
                );
                v.heading = Some("Come back tomorrow for another surprise. 🌹".to_string());
                v.primary = Some(ActionButton::disabled("See you tomorrow!"));
            }
            ReactionPhase::Fail(reason) => {
                v.message = match reason {
                    FailReason::TooEager => "Too eager! She got creeped out.".to_string(),
                    FailReason::TooSlow { .. } => "Too slow! She barely noticed.".to_string(),
                };
                if let FailReason::TooSlow { reaction_ms } = reason {
                    v.hud = Some(format!("{} ms", reaction_ms));
                }
                v.detail = Some("Oof. Try again.".to_string());
                v.primary = Some(ActionButton::new("Retry", UiAction::Retry));
            }
        },

        ActiveScreen::Shield(s) => match s.phase() {
            ShieldPhase::Intro => {
                v.message = "Protect Baby Nemo from the gloomy clouds.".to_string();
                v.primary = Some(ActionButton::new("Start Protection", UiAction::Start));
            }
            ShieldPhase::Playing { .. } => {
                v.hud = Some(format!(
                    "Time: {}s | Health: {}%",
                    s.seconds_left(),
                    s.health()
                ));
            }
            ShieldPhase::Won => {
                v.heading = Some("\"Safe in my embrace.\"".to_string());
                v.message = "Your inner child will always be protected here.".to_string();
                v.primary = continue_button(screen);
            }
            ShieldPhase::Lost => {
                v.heading = Some("Oh no!".to_string());
                v.primary = Some(ActionButton::new("Try Again", UiAction::Retry));
            }
        },

        ActiveScreen::Catch(c) => match c.phase() {
            CatchPhase::Intro => {
                v.message = "Catch her favorites! Dodge the broccoli.".to_string();
                v.primary = Some(ActionButton::new("Start Catching", UiAction::Start));
            }
            CatchPhase::Playing { .. } => {
                v.hud = Some(format!("Score: {}/{}", c.score(), c.target()));
            }
            CatchPhase::Won => {
                v.heading = Some("Tummy Full of Love!".to_string());
                v.message =
                    "\"Falling in love over and over, one sushi roll at a time.\"".to_string();
                v.primary = continue_button(screen);
            }
        },

        ActiveScreen::Drive(d) => {
            v.progress = Some(d.distance() / crate::sim::TRIP_LENGTH);
            v.notice = d.notice_label().map(str::to_string);
            if d.is_terminal() {
                v.heading = Some("\"I miss our long drives...\"".to_string());
                v.primary = continue_button(screen);
            } else {
                v.show_hold = true;
            }
        }

        ActiveScreen::Scratch(s) => match s.phase() {
            ScratchPhase::Covered => {
                v.message = "Scratch to Reveal Her Majesty".to_string();
            }
            ScratchPhase::Revealed => {
                v.heading = Some("My Queen".to_string());
                v.message = "\"I promise to treat you like royalty in Jaipur.\"".to_string();
                v.primary = screen
                    .continue_to()
                    .map(|day| ActionButton::new("The Final Question →", UiAction::Open(day)));
            }
        },

        ActiveScreen::Proposal(p) => match p.phase() {
            ProposalPhase::Asking { decline_offset } => {
                v.heading = Some("Will you be my Valentine?".to_string());
                v.message =
                    "From strangers to inseparable. Will you be mine, today and always?"
                        .to_string();
                v.primary = Some(ActionButton::new("Yes", UiAction::Accept));
                v.show_decline = true;
                v.decline_offset = *decline_offset;
            }
            ProposalPhase::Accepted { .. } => {
                v.heading = Some("I Knew It! ❤️".to_string());
                v.message = "See you in Jaipur, my Queen.".to_string();
                v.detail = Some("(Get ready for a LOT of chilli garlic noodles)".to_string());
            }
        },
    }
}

/// Page enter animation: fade in while sliding from the right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    elapsed: f32,
    duration: f32,
    /// Starting horizontal offset (px)
    distance: f32,
}

impl Default for Transition {
    fn default() -> Self {
        Self {
            elapsed: 0.5,
            duration: 0.5,
            distance: 20.0,
        }
    }
}

impl Transition {
    /// Restart from the beginning (on every route change)
    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn is_running(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Eased progress in [0, 1]
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        1.0 - (1.0 - t) * (1.0 - t)
    }

    pub fn opacity(&self) -> f32 {
        self.progress()
    }

    pub fn offset_x(&self) -> f32 {
        self.distance * (1.0 - self.progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Burst, ScreenInput};
    use crate::tuning::Tuning;

    fn mounted(day: Day) -> ActiveScreen {
        ActiveScreen::new(day, &Tuning::default(), 3, (50, 50))
    }

    #[test]
    fn test_home_view() {
        let v = view(&Route::Home, None);
        assert_eq!(v.date_label, None);
        assert!(!v.show_home_button);
        let primary = v.primary.unwrap();
        assert_eq!(primary.label, "Start the Journey");
        assert_eq!(primary.action, UiAction::Open(Day::One));
    }

    #[test]
    fn test_day_chrome() {
        let screen = mounted(Day::Three);
        let v = view(&Route::Day(Day::Three), Some(&screen));
        assert_eq!(v.date_label.as_deref(), Some("Feb 11"));
        assert_eq!(v.title, "Foodie Adventures");
        assert_eq!(v.primary.unwrap().action, UiAction::Start);
    }

    #[test]
    fn test_reaction_success_has_no_continue() {
        let mut screen = mounted(Day::One);
        let mut fx: Vec<Burst> = Vec::new();
        screen.input(ScreenInput::Start, &mut fx);
        while !matches!(
            &screen,
            ActiveScreen::Reaction(r) if matches!(r.phase(), ReactionPhase::Ready { .. })
        ) {
            screen.tick(crate::consts::SIM_DT, &mut fx);
        }
        screen.input(ScreenInput::React { at_ms: None }, &mut fx);

        let v = view(&Route::Day(Day::One), Some(&screen));
        let primary = v.primary.unwrap();
        assert!(!primary.enabled);
        assert_eq!(primary.action, UiAction::Nothing);
    }

    #[test]
    fn test_proposal_views() {
        let mut screen = mounted(Day::Six);
        let mut fx: Vec<Burst> = Vec::new();
        screen.input(ScreenInput::Dodge, &mut fx);
        let v = view(&Route::Day(Day::Six), Some(&screen));
        assert!(v.show_decline);
        assert_ne!(v.decline_offset, Vec2::ZERO);

        screen.input(ScreenInput::Accept, &mut fx);
        let v = view(&Route::Day(Day::Six), Some(&screen));
        assert!(!v.show_decline);
        assert!(v.primary.is_none());
        assert_eq!(v.heading.as_deref(), Some("I Knew It! ❤️"));
    }

    #[test]
    fn test_drive_shows_hold_then_continue() {
        let mut screen = mounted(Day::Four);
        let mut fx: Vec<Burst> = Vec::new();
        assert!(view(&Route::Day(Day::Four), Some(&screen)).show_hold);

        screen.input(ScreenInput::Press, &mut fx);
        screen.tick(1000.0, &mut fx);
        let v = view(&Route::Day(Day::Four), Some(&screen));
        assert!(!v.show_hold);
        assert_eq!(v.progress, Some(1.0));
        assert_eq!(v.primary.unwrap().action, UiAction::Open(Day::Five));
    }

    #[test]
    fn test_stale_screen_is_not_shown() {
        let screen = mounted(Day::Two);
        let v = view(&Route::Day(Day::Five), Some(&screen));
        assert!(v.primary.is_none());
        assert_eq!(v.title, "The Royal Reveal");
    }

    #[test]
    fn test_transition_eases_in() {
        let mut t = Transition::default();
        assert!(!t.is_running());
        assert_eq!(t.opacity(), 1.0);

        t.restart();
        assert_eq!(t.opacity(), 0.0);
        assert_eq!(t.offset_x(), 20.0);
        t.advance(0.25);
        assert!(t.opacity() > 0.5);
        t.advance(1.0);
        assert!(!t.is_running());
        assert_eq!(t.offset_x(), 0.0);
    }

    #[test]
    fn test_view_serializes() {
        let json = serde_json::to_string(&view(&Route::Home, None)).unwrap();
        assert!(json.contains("Start the Journey"));
    }
}
