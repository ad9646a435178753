//! Day 4: the drive
//!
//! Hold the throttle to build speed, let go to coast. Distance only grows.
//! Landmarks along the way pop a short notice when passed.

use super::timer::Countdown;
use crate::tuning::DriveTuning;

/// Distance at which the trip is over (%)
pub const TRIP_LENGTH: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivePhase {
    Cruising,
    Arrived,
}

/// A landmark notice on screen, with its dismiss timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// Index into the landmark table
    pub landmark: usize,
    pub dismiss: Countdown,
}

#[derive(Debug, Clone)]
pub struct Drive {
    phase: DrivePhase,
    tuning: DriveTuning,
    throttle: bool,
    speed: f32,
    distance: f32,
    passed: Vec<bool>,
    notices_fired: u32,
    notice: Option<Notice>,
}

impl Drive {
    pub fn new(tuning: DriveTuning) -> Self {
        let passed = vec![false; tuning.landmarks.len()];
        Self {
            phase: DrivePhase::Cruising,
            tuning,
            throttle: false,
            speed: 0.0,
            distance: 0.0,
            passed,
            notices_fired: 0,
            notice: None,
        }
    }

    pub fn phase(&self) -> DrivePhase {
        self.phase
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn throttle(&self) -> bool {
        self.throttle
    }

    /// Total landmark notices fired this trip
    pub fn notices_fired(&self) -> u32 {
        self.notices_fired
    }

    pub fn tuning(&self) -> &DriveTuning {
        &self.tuning
    }

    /// Label of the landmark notice currently shown
    pub fn notice_label(&self) -> Option<&str> {
        self.notice
            .and_then(|n| self.tuning.landmarks.get(n.landmark))
            .map(|l| l.label.as_str())
    }

    pub fn press(&mut self) {
        self.throttle = true;
    }

    pub fn release(&mut self) {
        self.throttle = false;
    }

    /// Advance one fixed step
    pub fn tick(&mut self, dt: f32) {
        let dismissed = self.notice.as_mut().is_some_and(|n| n.dismiss.tick());
        if dismissed {
            self.notice = None;
        }

        if self.phase == DrivePhase::Arrived {
            return;
        }

        self.speed = if self.throttle {
            (self.speed + self.tuning.acceleration * dt).min(self.tuning.max_speed)
        } else {
            (self.speed - self.tuning.deceleration * dt).max(0.0)
        };

        let prev = self.distance;
        let next = (prev + self.speed * dt).min(TRIP_LENGTH);
        self.distance = next;

        for (i, landmark) in self.tuning.landmarks.iter().enumerate() {
            if !self.passed[i] && prev < landmark.at && next >= landmark.at {
                self.passed[i] = true;
                self.notices_fired += 1;
                self.notice = Some(Notice {
                    landmark: i,
                    dismiss: Countdown::from_ms(self.tuning.notice_ms),
                });
                log::debug!("Passed {}", landmark.label);
            }
        }

        if next >= TRIP_LENGTH {
            self.phase = DrivePhase::Arrived;
            self.speed = 0.0;
            self.throttle = false;
            log::info!("Arrived");
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == DrivePhase::Arrived
    }

    /// Frame loop until arrival, plus the notice timer while shown
    pub fn active_tasks(&self) -> usize {
        let frame = usize::from(self.phase == DrivePhase::Cruising);
        frame + usize::from(self.notice.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SIM_DT, SIM_HZ};
    use crate::ms_to_ticks;

    #[test]
    fn test_speed_ramps_and_caps() {
        let mut d = Drive::new(DriveTuning::default());
        d.press();
        for _ in 0..SIM_HZ / 4 {
            d.tick(SIM_DT);
        }
        assert!((d.speed() - 4.5).abs() < 0.05, "speed {}", d.speed());
        for _ in 0..SIM_HZ {
            d.tick(SIM_DT);
        }
        assert_eq!(d.speed(), 9.0);
    }

    #[test]
    fn test_coasting_decelerates_slower() {
        let mut d = Drive::new(DriveTuning::default());
        d.press();
        for _ in 0..SIM_HZ {
            d.tick(SIM_DT);
        }
        d.release();
        for _ in 0..SIM_HZ / 2 {
            d.tick(SIM_DT);
        }
        assert!((d.speed() - 4.5).abs() < 0.05, "speed {}", d.speed());
        for _ in 0..SIM_HZ {
            d.tick(SIM_DT);
        }
        assert_eq!(d.speed(), 0.0);
    }

    #[test]
    fn test_distance_monotonic_while_coasting() {
        let mut d = Drive::new(DriveTuning::default());
        d.press();
        for _ in 0..SIM_HZ {
            d.tick(SIM_DT);
        }
        d.release();
        let mut last = d.distance();
        for _ in 0..SIM_HZ * 3 {
            d.tick(SIM_DT);
            assert!(d.distance() >= last);
            last = d.distance();
        }
        assert_eq!(d.speed(), 0.0);
    }

    #[test]
    fn test_full_trip_fires_each_landmark_once() {
        let mut d = Drive::new(DriveTuning::default());
        d.press();
        let mut labels = Vec::new();
        let mut shown: Option<String> = None;
        while !d.is_terminal() {
            d.tick(SIM_DT);
            let now = d.notice_label().map(str::to_string);
            if now.is_some() && now != shown {
                labels.push(now.clone().unwrap_or_default());
            }
            shown = now;
        }
        assert_eq!(
            labels,
            vec!["Late Night Office", "Burger Stop", "Third Wave Coffee"]
        );
        assert_eq!(d.notices_fired(), 3);
        assert_eq!(d.distance(), 100.0);
    }

    #[test]
    fn test_huge_step_fires_all_crossed_landmarks() {
        let mut d = Drive::new(DriveTuning::default());
        d.speed = 9.0;
        d.press();
        d.tick(1000.0);
        assert_eq!(d.distance(), 100.0);
        assert_eq!(d.notices_fired(), 3);
        assert_eq!(d.notice_label(), Some("Third Wave Coffee"));
        assert!(d.is_terminal());

        d.tick(1000.0);
        assert_eq!(d.notices_fired(), 3);
    }

    #[test]
    fn test_notice_outlives_arrival_then_clears() {
        let tuning = DriveTuning {
            landmarks: vec![crate::tuning::Landmark {
                at: 99.9,
                label: "Driveway".to_string(),
            }],
            ..DriveTuning::default()
        };
        let mut d = Drive::new(tuning);
        d.distance = 99.85;
        d.speed = 9.0;
        d.press();
        while !d.is_terminal() {
            d.tick(SIM_DT);
        }
        assert_eq!(d.notice_label(), Some("Driveway"));
        assert_eq!(d.active_tasks(), 1);

        for _ in 0..ms_to_ticks(2000) {
            d.tick(SIM_DT);
        }
        assert_eq!(d.notice_label(), None);
        assert_eq!(d.active_tasks(), 0);
    }
}
