//! Property tests for the day simulations

use proptest::prelude::*;

use valentine_days::consts::SIM_DT;
use valentine_days::sim::{
    Burst, Catch, CatchPhase, Drive, Proposal, Reaction, ReactionPhase, ScratchCard, Shield,
};
use valentine_days::ticks_to_ms;
use valentine_days::tuning::{
    CatchTuning, DriveTuning, ProposalTuning, ReactionTuning, ScratchTuning, ShieldTuning,
};

/// Tick a started reaction game until the go signal shows
fn ready_reaction(seed: u64) -> Reaction {
    let mut r = Reaction::new(ReactionTuning::default(), seed);
    r.start();
    for _ in 0..10_000 {
        if matches!(r.phase(), ReactionPhase::Ready { .. }) {
            break;
        }
        r.tick();
    }
    r
}

proptest! {
    #[test]
    fn prop_reaction_success_iff_under_threshold(seed in any::<u64>(), wait in 0u32..300) {
        let mut r = ready_reaction(seed);
        prop_assert!(matches!(r.phase(), ReactionPhase::Ready { .. }), "go signal never showed");
        for _ in 0..wait {
            r.tick();
        }
        let mut fx: Vec<Burst> = Vec::new();
        r.react(&mut fx);

        let threshold = ReactionTuning::default().success_threshold_ms;
        if ticks_to_ms(wait) < threshold {
            prop_assert!(matches!(r.phase(), ReactionPhase::Success { .. }), "fast tap should succeed");
            prop_assert_eq!(fx.len(), 1);
        } else {
            prop_assert!(matches!(r.phase(), ReactionPhase::Fail(_)), "slow tap should fail");
            prop_assert!(fx.is_empty());
        }
        prop_assert!(r.is_terminal());
    }

    #[test]
    fn prop_shield_health_never_rises(
        seed in any::<u64>(),
        aims in prop::collection::vec(-360.0f32..360.0, 1..60),
    ) {
        let mut shield = Shield::new(ShieldTuning::default(), seed);
        shield.start();
        let mut last = shield.health();
        for aim in aims {
            shield.aim(aim);
            for _ in 0..30 {
                shield.tick(SIM_DT);
                prop_assert!(shield.health() <= last);
                last = shield.health();
            }
        }
    }

    #[test]
    fn prop_catch_score_bounded_and_wins_once(
        seed in any::<u64>(),
        slides in prop::collection::vec(0.0f32..100.0, 1..80),
    ) {
        let mut game = Catch::new(CatchTuning::default(), seed);
        game.start();
        let mut fx: Vec<Burst> = Vec::new();
        for percent in slides {
            game.slide(percent);
            for _ in 0..60 {
                game.tick(SIM_DT, &mut fx);
                prop_assert!(game.score() <= game.target());
            }
        }
        prop_assert!(fx.len() <= 1);
        prop_assert_eq!(fx.len() == 1, game.phase() == CatchPhase::Won);
    }

    #[test]
    fn prop_drive_is_monotonic_and_fires_each_landmark_once(
        steps in prop::collection::vec((0.0f32..2.0, any::<bool>()), 1..200),
    ) {
        let tuning = DriveTuning::default();
        let landmarks = tuning.landmarks.len() as u32;
        let mut drive = Drive::new(tuning);
        let mut last = drive.distance();
        for (dt, held) in steps {
            if held { drive.press() } else { drive.release() }
            drive.tick(dt);
            prop_assert!(drive.distance() >= last);
            prop_assert!(drive.distance() <= 100.0);
            last = drive.distance();
        }
        prop_assert!(drive.notices_fired() <= landmarks);
    }

    #[test]
    fn prop_scratch_progress_never_drops(
        seed in any::<u64>(),
        points in prop::collection::vec((0.0f32..80.0, 0.0f32..80.0), 1..150),
    ) {
        let mut card = ScratchCard::new(ScratchTuning::default(), seed, 80, 80);
        let mut fx: Vec<Burst> = Vec::new();
        let mut last = card.progress();
        for (x, y) in points {
            card.scratch(x, y, &mut fx);
            prop_assert!(card.progress() >= last);
            last = card.progress();
        }
        prop_assert!(fx.len() <= 1);
    }

    #[test]
    fn prop_dodge_always_moves(seed in any::<u64>(), dodges in 1usize..40) {
        let mut proposal = Proposal::new(ProposalTuning::default(), seed);
        for _ in 0..dodges {
            let before = proposal.decline_offset();
            proposal.dodge();
            prop_assert_ne!(proposal.decline_offset(), before);
        }
    }
}
