//! Turn sequencing: the processing lock, turn rotation, skips, extra turns,
//! scheduling waits and the end of the game.

use std::time::Duration;

use sugoroku::testing::{Scenario, TestEngine};
use sugoroku::{ActionOutcome, BgmTrack, Cue, MysteryOutcome, PlayerId, RejectReason, Timings};

const KEN: PlayerId = PlayerId::new(0);
const PAPA: PlayerId = PlayerId::new(1);
const MAMA: PlayerId = PlayerId::new(2);

fn roll(engine: &mut TestEngine) -> ActionOutcome {
    let outcome = engine.roll_dice();
    engine.run_until_idle();
    outcome
}

#[test]
fn test_plain_square_passes_turn() {
    let mut engine = Scenario::new().rolls([1]).build();

    assert_eq!(roll(&mut engine), ActionOutcome::Accepted);

    let session = engine.session();
    assert_eq!(session.player(KEN).position, 1);
    assert_eq!(session.current, PAPA);
    assert_eq!(session.turn_number, 1);
    assert!(!session.processing);
    assert!(session.roll_enabled);
    assert_eq!(engine.renderer().path_of(KEN), vec![1]);
    assert_eq!(engine.sink().count(Cue::Move), 1);
    assert!(engine.sink().heard(Cue::LowRoll));
    assert!(engine.sink().logged("けんちゃんが1を出しました！"));
    assert!(engine.sink().logged("けんちゃんが1に移動しました。"));
}

#[test]
fn test_turn_number_increments_after_last_seat() {
    let mut engine = Scenario::new().rolls([1, 2, 3]).build();

    roll(&mut engine);
    roll(&mut engine);
    assert_eq!(engine.session().turn_number, 1);
    assert_eq!(engine.session().current, MAMA);

    roll(&mut engine);
    assert_eq!(engine.session().turn_number, 2);
    assert_eq!(engine.session().current, KEN);
    assert_eq!(engine.snapshot().positions(), vec![1, 2, 3]);
}

#[test]
fn test_lock_rejects_second_action() {
    let mut engine = Scenario::new().rolls([2]).build();

    assert_eq!(engine.roll_dice(), ActionOutcome::Accepted);
    assert_eq!(
        engine.roll_dice(),
        ActionOutcome::Rejected(RejectReason::Busy)
    );
    assert_eq!(
        engine.confirm_mystery_outcome(),
        ActionOutcome::Rejected(RejectReason::Busy)
    );
    assert_eq!(
        engine.grant_double_roll(KEN),
        ActionOutcome::Rejected(RejectReason::Busy)
    );

    engine.run_until_idle();
    assert_eq!(engine.session().player(KEN).stats.roll_count, 1);
    assert_eq!(engine.session().current, PAPA);
}

#[test]
fn test_skip_consumes_turn_without_roll() {
    // けんちゃん lands on お昼寝タイム (14).
    let mut engine = Scenario::new().place(KEN, 10).rolls([4, 1, 2]).build();

    roll(&mut engine);
    assert_eq!(engine.snapshot().player(KEN).skip_turns, 1);
    assert!(engine.sink().heard(Cue::Sleep));
    roll(&mut engine);
    roll(&mut engine);
    assert_eq!(engine.session().current, KEN);

    assert_eq!(engine.roll_dice(), ActionOutcome::Skipped);
    assert!(engine.is_idle());

    let session = engine.session();
    assert_eq!(session.player(KEN).position, 14);
    assert_eq!(session.player(KEN).skip_turns, 0);
    assert_eq!(session.player(KEN).stats.roll_count, 1);
    assert_eq!(session.current, PAPA);
    assert_eq!(session.turn_number, 2);
    assert!(!session.processing);
    assert!(engine.sink().logged("けんちゃんは1回休みです。"));
}

#[test]
fn test_double_roll_doubles_steps() {
    let mut engine = Scenario::new().rolls([3]).build();
    engine.grant_double_roll(KEN);

    roll(&mut engine);

    let ken = engine.session().player(KEN);
    assert_eq!(ken.position, 6);
    assert!(!ken.double_next_roll);
    assert_eq!(ken.stats.value_sum, 3);
    assert_eq!(engine.renderer().dice, vec![(3, 6)]);
    assert!(engine.sink().heard(Cue::DoubleBonus));
    assert!(engine.sink().logged("サイコロ2倍適用！最終値: 6"));
}

#[test]
fn test_roll_into_gimmick_into_mystery() {
    // Roll 5 onto ロケットダッシュ (+3), landing on the mystery square 8.
    let mut engine = Scenario::new()
        .rolls([5])
        .mystery(MysteryOutcome::ExtraTurn)
        .build();

    roll(&mut engine);

    let session = engine.session();
    assert_eq!(session.player(KEN).position, 8);
    assert_eq!(session.current, KEN);
    assert!(!session.processing);
    let pending = session.pending_mystery.expect("mystery outcome staged");
    assert_eq!(pending.player, KEN);
    assert_eq!(pending.outcome, MysteryOutcome::ExtraTurn);
    assert_eq!(session.player(KEN).stats.gimmick_hits, 1);
    assert_eq!(session.player(KEN).stats.mystery_hits, 1);

    assert_eq!(engine.renderer().path_of(KEN), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(engine.rng_mut().remaining(), (0, 0));
    // Only the dice walk plays the move cue.
    assert_eq!(engine.sink().count(Cue::Move), 5);
    assert!(engine.sink().heard(Cue::Rocket));
    assert!(engine.sink().heard(Cue::MysteryBox));

    assert_eq!(
        engine.roll_dice(),
        ActionOutcome::Rejected(RejectReason::AwaitingConfirmation)
    );
    assert_eq!(engine.confirm_mystery_outcome(), ActionOutcome::Accepted);
    assert_eq!(engine.session().current, KEN);
    assert!(engine.session().roll_enabled);
}

#[test]
fn test_scheduling_waits() {
    let mut engine = Scenario::new().rolls([2]).timings(Timings::default()).build();

    engine.roll_dice();
    assert_eq!(engine.next_wait(), Some(Duration::from_millis(1000)));

    assert!(engine.advance());
    assert_eq!(engine.session().prediction, Some(2));
    assert_eq!(engine.renderer().predictions.last(), Some(&Some(2)));
    assert_eq!(engine.next_wait(), Some(Duration::from_millis(1000)));

    assert!(engine.advance());
    assert_eq!(engine.session().prediction, None);
    assert_eq!(engine.session().player(KEN).position, 1);
    assert_eq!(engine.next_wait(), Some(Duration::from_millis(200)));

    assert!(engine.advance());
    assert_eq!(engine.session().player(KEN).position, 2);
    assert_eq!(engine.next_wait(), Some(Duration::from_millis(200)));
    assert!(engine.is_processing());

    assert!(engine.advance());
    assert!(engine.is_idle());
    assert!(!engine.advance());
    assert_eq!(engine.session().current, PAPA);
}

#[test]
fn test_exact_goal_wins() {
    let mut engine = Scenario::new().place(KEN, 34).rolls([2]).build();

    roll(&mut engine);

    let session = engine.session();
    assert!(session.ended);
    assert_eq!(session.winner, Some(KEN));
    assert!(session.processing);
    assert!(!session.roll_enabled);
    assert_eq!(session.bgm, BgmTrack::Stopped);
    assert!(engine.sink().heard(Cue::Win));
    assert!(engine.sink().heard(Cue::Firework));
    assert!(engine.sink().logged("けんちゃんがゴール！勝利です！🎉"));

    let report = session.final_report.as_ref().expect("final report");
    assert_eq!(report.winner, KEN);
    assert_eq!(report.players[KEN].average_roll, 2.0);

    assert_eq!(
        engine.roll_dice(),
        ActionOutcome::Rejected(RejectReason::GameOver)
    );
}

#[test]
fn test_overshoot_clamps_to_goal() {
    let mut engine = Scenario::new().place(KEN, 33).rolls([6]).build();

    roll(&mut engine);

    assert_eq!(engine.renderer().path_of(KEN), vec![34, 35, 36]);
    assert_eq!(engine.renderer().dice, vec![(6, 6)]);
    assert_eq!(engine.session().winner, Some(KEN));
    assert!(engine.sink().heard(Cue::CriticalHit));
    assert_eq!(engine.session().player(KEN).stats.sixes, 1);
}

#[test]
fn test_primary_resets_finished_game() {
    let mut engine = Scenario::new().place(KEN, 34).rolls([2]).build();
    roll(&mut engine);

    assert_eq!(engine.press_primary(), ActionOutcome::Accepted);

    let session = engine.session();
    assert!(!session.started);
    assert!(!session.ended);
    assert_eq!(session.winner, None);
    assert_eq!(engine.snapshot().positions(), vec![0, 0, 0]);
    assert!(engine.sink().logged("ゲーム開始を待っています..."));
    assert!(!engine.sink().logged("勝利"));
    assert_eq!(
        engine.roll_dice(),
        ActionOutcome::Rejected(RejectReason::NotStarted)
    );
}

#[test]
fn test_reset_mid_animation_discards_steps() {
    let mut engine = Scenario::new().rolls([4]).build();
    engine.roll_dice();
    engine.advance();
    engine.advance();
    assert_eq!(engine.session().player(KEN).position, 1);

    engine.reset();

    assert!(engine.is_idle());
    assert!(!engine.is_processing());
    assert_eq!(engine.run_until_idle(), 0);
    assert_eq!(engine.session().player(KEN).position, 0);

    assert_eq!(engine.start(), ActionOutcome::Accepted);
    assert_eq!(engine.session().turn_number, 1);
}

#[test]
fn test_reach_rises_and_clears() {
    let mut engine = Scenario::new()
        .place(KEN, 31)
        .current(PAPA)
        .rolls([1, 2, 2])
        .mystery(MysteryOutcome::ReturnToStart)
        .build();

    roll(&mut engine);
    assert!(engine.session().reach);
    assert!(engine.sink().heard(Cue::Reach));
    assert!(engine.sink().logged("けんちゃんがゴールまであと少し！リーチ！"));
    assert_eq!(engine.session().bgm, BgmTrack::Finale);
    assert!(engine.snapshot().player(KEN).in_reach);

    roll(&mut engine);
    assert_eq!(engine.sink().count(Cue::Reach), 1);

    // けんちゃん lands on mystery square 33 and is sent back to the start.
    roll(&mut engine);
    assert_eq!(engine.session().player(KEN).position, 33);
    engine.confirm_mystery_outcome();

    assert_eq!(engine.session().player(KEN).position, 0);
    assert!(!engine.session().reach);
    assert_eq!(engine.session().bgm, BgmTrack::Normal);
    assert_eq!(
        engine.sink().bgm,
        vec![BgmTrack::Normal, BgmTrack::Finale, BgmTrack::Normal]
    );
}
