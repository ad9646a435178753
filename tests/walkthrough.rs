//! Play every day through the stage and check nothing is left running

use valentine_days::consts::SIM_DT;
use valentine_days::route::{History, Navigator};
use valentine_days::sim::{ActiveScreen, Burst, ReactionPhase, ScreenInput, Stage};
use valentine_days::tuning::{ShieldTuning, Tuning};
use valentine_days::ui::{self, UiAction};
use valentine_days::{Day, Route};

fn tick_until_idle(stage: &mut Stage, fx: &mut Vec<Burst>, max_ticks: u32) {
    for _ in 0..max_ticks {
        if stage.active_tasks() == 0 {
            return;
        }
        stage.tick(SIM_DT, fx);
    }
}

/// A shield wide enough to block everything, so the run always wins
fn forgiving() -> Tuning {
    Tuning {
        shield: ShieldTuning {
            shield_half_width_deg: 181.0,
            ..ShieldTuning::default()
        },
        ..Tuning::default()
    }
}

#[test]
fn test_each_day_reaches_its_end() {
    let mut stage = Stage::new(forgiving());
    let mut fx: Vec<Burst> = Vec::new();

    // Day 1
    stage.mount(Day::One, 11);
    stage.input(ScreenInput::Start, &mut fx);
    for _ in 0..10_000 {
        if let Some(ActiveScreen::Reaction(r)) = stage.screen() {
            if matches!(r.phase(), ReactionPhase::Ready { .. }) {
                break;
            }
        }
        stage.tick(SIM_DT, &mut fx);
    }
    stage.input(ScreenInput::React { at_ms: None }, &mut fx);
    assert!(matches!(
        stage.screen(),
        Some(ActiveScreen::Reaction(r)) if matches!(r.phase(), ReactionPhase::Success { .. })
    ));
    assert_eq!(stage.active_tasks(), 0);

    // Day 2
    stage.mount(Day::Two, 12);
    stage.input(ScreenInput::Start, &mut fx);
    tick_until_idle(&mut stage, &mut fx, 120 * 60);
    assert!(stage.screen().is_some_and(ActiveScreen::is_terminal));
    assert_eq!(
        stage.screen().and_then(ActiveScreen::continue_to),
        Some(Day::Three)
    );

    // Day 3: a perfect plate that follows every good dish
    stage.mount(Day::Three, 13);
    stage.input(ScreenInput::Start, &mut fx);
    for _ in 0..120 * 600 {
        let target = match stage.screen() {
            Some(ActiveScreen::Catch(c)) if !c.is_terminal() => c
                .items()
                .iter()
                .filter(|i| i.active && i.score > 0)
                .max_by(|a, b| a.y.total_cmp(&b.y))
                .map(|i| i.x),
            _ => break,
        };
        if let Some(percent) = target {
            stage.input(ScreenInput::Slide { percent }, &mut fx);
        }
        stage.tick(SIM_DT, &mut fx);
    }
    assert_eq!(
        stage.screen().and_then(ActiveScreen::continue_to),
        Some(Day::Four)
    );

    // Day 4
    stage.mount(Day::Four, 14);
    stage.input(ScreenInput::Press, &mut fx);
    tick_until_idle(&mut stage, &mut fx, 120 * 120);
    assert!(stage.screen().is_some_and(ActiveScreen::is_terminal));

    // Day 5
    stage.set_card_size(100, 100);
    stage.mount(Day::Five, 15);
    'grid: for _ in 0..20 {
        for y in (0..100).step_by(10) {
            for x in (0..100).step_by(10) {
                stage.input(
                    ScreenInput::Scratch {
                        x: x as f32,
                        y: y as f32,
                    },
                    &mut fx,
                );
                if stage.screen().is_some_and(ActiveScreen::is_terminal) {
                    break 'grid;
                }
            }
        }
    }
    assert!(stage.screen().is_some_and(ActiveScreen::is_terminal));
    assert_eq!(
        stage.screen().and_then(ActiveScreen::continue_to),
        Some(Day::Six)
    );

    // Day 6
    stage.mount(Day::Six, 16);
    stage.input(ScreenInput::Dodge, &mut fx);
    stage.input(ScreenInput::Accept, &mut fx);
    tick_until_idle(&mut stage, &mut fx, 120 * 10);
    assert!(stage.screen().is_some_and(ActiveScreen::is_terminal));
    assert_eq!(stage.active_tasks(), 0);

    stage.unmount();
    assert_eq!(stage.active_tasks(), 0);
    assert_eq!(stage.mounts(), 6);
    assert!(!fx.is_empty());
}

#[test]
fn test_leaving_mid_game_leaves_nothing_running() {
    let mut stage = Stage::new(Tuning::default());
    let mut fx: Vec<Burst> = Vec::new();

    for day in Day::ALL {
        stage.mount(day, 7);
        stage.input(ScreenInput::Start, &mut fx);
        stage.input(ScreenInput::Press, &mut fx);
        stage.input(ScreenInput::Accept, &mut fx);
        for _ in 0..30 {
            stage.tick(SIM_DT, &mut fx);
        }
        stage.unmount();
        assert_eq!(stage.active_tasks(), 0, "day {} left work behind", day.number());
        assert!(stage.screen().is_none());
    }
}

#[test]
fn test_continue_buttons_chain_the_days() {
    let mut history = History::default();
    history.navigate(&Route::Home);

    let home = ui::view(&Route::Home, None);
    let Some(UiAction::Open(first)) = home.primary.map(|b| b.action) else {
        panic!("home should open a day");
    };
    assert_eq!(first, Day::One);
    history.navigate(&Route::Day(first));
    assert_eq!(history.current(), Some(&Route::Day(Day::One)));

    let (route, redirect) = Route::resolve("#/nowhere");
    assert!(redirect);
    history.replace(&route);
    assert_eq!(history.current(), Some(&Route::Home));
    assert_eq!(history.entries.len(), 2);
}
