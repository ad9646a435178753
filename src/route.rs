//! Hash routes and day ordering

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the six unlockable days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

impl Day {
    pub const ALL: [Day; 6] = [Day::One, Day::Two, Day::Three, Day::Four, Day::Five, Day::Six];

    pub fn number(&self) -> u32 {
        match self {
            Day::One => 1,
            Day::Two => 2,
            Day::Three => 3,
            Day::Four => 4,
            Day::Five => 5,
            Day::Six => 6,
        }
    }

    pub fn from_number(n: u32) -> Option<Self> {
        match n {
            1 => Some(Day::One),
            2 => Some(Day::Two),
            3 => Some(Day::Three),
            4 => Some(Day::Four),
            5 => Some(Day::Five),
            6 => Some(Day::Six),
            _ => None,
        }
    }

    /// The day after this one (none after the last)
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Day::One => "The 'Sup?' Incident",
            Day::Two => "The Safe Embrace",
            Day::Three => "Foodie Adventures",
            Day::Four => "Kolkata Nights",
            Day::Five => "The Royal Reveal",
            Day::Six => "The Question",
        }
    }

    /// Header date, Feb 9 through Feb 14
    pub fn date_label(&self) -> String {
        format!("Feb {}", 8 + self.number())
    }
}

/// A resolved page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Day(Day),
    /// `#/day/<id>` for an id that is not a playable day
    ComingSoon(String),
}

impl Route {
    /// Parse a location hash. `None` means the path is unknown.
    pub fn parse(hash: &str) -> Option<Self> {
        let path = hash.strip_prefix('#').unwrap_or(hash);
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        match path {
            "" | "/" => Some(Route::Home),
            _ => {
                let id = path.strip_prefix("/day/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let day = id.parse::<u32>().ok().and_then(Day::from_number);
                Some(match day {
                    Some(day) if id == day.number().to_string() => Route::Day(day),
                    _ => Route::ComingSoon(id.to_string()),
                })
            }
        }
    }

    /// Parse a hash, falling back to home. The flag is true when the
    /// location must be replaced with the home route.
    pub fn resolve(hash: &str) -> (Self, bool) {
        match Self::parse(hash) {
            Some(route) => (route, false),
            None => {
                log::info!("Unknown route {:?}, redirecting home", hash);
                (Route::Home, true)
            }
        }
    }

    /// Location hash for this route
    pub fn path(&self) -> String {
        match self {
            Route::Home => "#/".to_string(),
            Route::Day(day) => format!("#/day/{}", day.number()),
            Route::ComingSoon(id) => format!("#/day/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Moves the page between routes
pub trait Navigator {
    /// Push a new history entry
    fn navigate(&mut self, route: &Route);
    /// Replace the current entry (used for redirects)
    fn replace(&mut self, route: &Route);
}

/// Recording navigator for headless runs and tests
#[derive(Debug, Default)]
pub struct History {
    pub entries: Vec<Route>,
}

impl History {
    pub fn current(&self) -> Option<&Route> {
        self.entries.last()
    }
}

impl Navigator for History {
    fn navigate(&mut self, route: &Route) {
        self.entries.push(route.clone());
    }

    fn replace(&mut self, route: &Route) {
        self.entries.pop();
        self.entries.push(route.clone());
    }
}
