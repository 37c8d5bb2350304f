//! Gimmick squares on the standard board, plus custom layouts.

use sugoroku::present::RecordingRenderer;
use sugoroku::testing::{Scenario, ScriptedRandom, TestEngine};
use sugoroku::{
    Board, BoardError, BoardLayout, Cue, EngineConfig, EventLog, PlayerId, Timings, TurnEngine,
};

const KEN: PlayerId = PlayerId::new(0);
const PAPA: PlayerId = PlayerId::new(1);
const MAMA: PlayerId = PlayerId::new(2);

fn roll(engine: &mut TestEngine) {
    engine.roll_dice();
    engine.run_until_idle();
}

#[test]
fn test_retreat_chains_into_advance_and_mystery() {
    // 7 (-2) lands on 5 (+3) which lands on mystery square 8.
    let mut engine = Scenario::new().place(KEN, 1).rolls([6]).build();

    roll(&mut engine);

    let session = engine.session();
    assert_eq!(session.player(KEN).position, 8);
    assert_eq!(session.player(KEN).stats.gimmick_hits, 2);
    assert!(session.pending_mystery.is_some());
    assert_eq!(
        engine.renderer().path_of(KEN),
        vec![2, 3, 4, 5, 6, 7, 6, 5, 6, 7, 8]
    );
    assert!(engine.sink().heard(Cue::Sad));
    assert!(engine.sink().heard(Cue::Rocket));
    assert!(engine.sink().logged("けんちゃんが「忘れ物」マスに！"));
    assert!(engine.sink().logged("けんちゃんが2マス戻る！"));
    assert!(engine.sink().logged("けんちゃんが3マス進む！"));
}

#[test]
fn test_lucky_seven_grants_extra_turn() {
    let mut engine = Scenario::new().place(KEN, 10).rolls([1, 1]).build();

    roll(&mut engine);

    let session = engine.session();
    assert_eq!(session.player(KEN).position, 11);
    assert_eq!(session.current, KEN);
    assert_eq!(session.turn_number, 1);
    assert!(!session.processing);
    assert!(session.roll_enabled);
    assert!(engine.sink().heard(Cue::Lucky));
    assert!(engine.sink().logged("けんちゃんはもう一度サイコロを振れます！"));

    roll(&mut engine);
    assert_eq!(engine.session().player(KEN).stats.roll_count, 2);
}

#[test]
fn test_random_big_forward() {
    let mut engine = Scenario::new().place(KEN, 9).rolls([3]).floats([0.2]).build();

    roll(&mut engine);

    assert_eq!(engine.session().player(KEN).position, 15);
    assert_eq!(engine.session().current, PAPA);
    assert!(engine.sink().heard(Cue::Fortune));
}

#[test]
fn test_random_big_backward() {
    let mut engine = Scenario::new().place(KEN, 9).rolls([3]).floats([0.7]).build();

    roll(&mut engine);

    assert_eq!(engine.session().player(KEN).position, 9);
    assert_eq!(engine.renderer().path_of(KEN), vec![10, 11, 12, 11, 10, 9]);
    assert_eq!(engine.session().current, PAPA);
}

#[test]
fn test_swap_with_random_other() {
    let mut engine = Scenario::new()
        .place(KEN, 18)
        .place(PAPA, 3)
        .place(MAMA, 10)
        .rolls([2, 1])
        .build();

    roll(&mut engine);

    assert_eq!(engine.snapshot().positions(), vec![10, 3, 20]);
    assert_eq!(engine.renderer().path_of(MAMA), vec![20]);
    assert!(engine.sink().logged("けんちゃんとママの位置が交換！"));
    assert_eq!(engine.session().current, PAPA);
}

#[test]
fn test_black_hole_sends_to_start() {
    let mut engine = Scenario::new().place(KEN, 27).rolls([3]).build();

    roll(&mut engine);

    assert_eq!(engine.session().player(KEN).position, 0);
    assert!(engine.sink().heard(Cue::Blackhole));
    assert!(engine.sink().logged("けんちゃんはスタートへ。"));
    assert_eq!(engine.session().current, PAPA);
}

#[test]
fn test_storm_moves_everyone_back() {
    let mut engine = Scenario::new()
        .place(KEN, 29)
        .place(PAPA, 5)
        .rolls([3])
        .build();

    roll(&mut engine);

    assert_eq!(engine.snapshot().positions(), vec![31, 4, 0]);
    assert!(engine.renderer().path_of(MAMA).is_empty());
    assert!(engine.sink().heard(Cue::Storm));
    assert!(engine.sink().logged("全員が1マス後退！"));
}

#[test]
fn test_nap_square_sets_skip() {
    let mut engine = Scenario::new().place(KEN, 10).rolls([4]).build();

    roll(&mut engine);

    assert_eq!(engine.snapshot().player(KEN).skip_turns, 1);
    assert!(engine.sink().logged("けんちゃんは次回1回休み。"));
}

#[test]
fn test_custom_layout_effect_walk_reaches_goal() {
    let mut layout = BoardLayout::standard();
    layout.gimmicks.retain(|g| g.square != 5);
    layout.gimmicks[0].square = 3;
    layout.gimmicks[0].effect = "+40".to_string();
    let board = Board::from_layout(&layout).expect("valid layout");

    let mut rng = ScriptedRandom::new(0);
    rng.push_ints([3]);
    let config = EngineConfig::new(0).with_timings(Timings::instant());
    let mut engine = TurnEngine::with_parts(board, config, rng, EventLog::new(50), RecordingRenderer::new());
    engine.start();

    engine.roll_dice();
    engine.run_until_idle();

    assert_eq!(engine.session().winner, Some(KEN));
    assert_eq!(engine.session().player(KEN).position, 36);
}

#[test]
fn test_invalid_layouts_rejected() {
    let mut unknown = BoardLayout::standard();
    unknown.gimmicks[0].effect = "fly".to_string();
    assert!(matches!(
        Board::from_layout(&unknown),
        Err(BoardError::UnknownEffect { square: 5, .. })
    ));

    let mut overlap = BoardLayout::standard();
    overlap.mystery.push(5);
    assert_eq!(
        Board::from_layout(&overlap),
        Err(BoardError::Overlap { square: 5 })
    );

    for tag in ["+0", "-0", "++1", "-+2"] {
        let mut degenerate = BoardLayout::standard();
        degenerate.gimmicks[0].effect = tag.to_string();
        assert_eq!(
            Board::from_layout(&degenerate),
            Err(BoardError::UnknownEffect { square: 5, tag: tag.to_string() }),
            "tag {tag:?}"
        );
    }

    let mut goal = BoardLayout::standard();
    goal.mystery.push(36);
    assert_eq!(
        Board::from_layout(&goal),
        Err(BoardError::ReservedSquare { square: 36 })
    );
}

#[test]
fn test_one_step_gimmick_settles() {
    // The smallest walk a layout can express still moves off the square.
    let mut layout = BoardLayout::standard();
    layout.gimmicks[0].effect = "+1".to_string();
    let board = Board::from_layout(&layout).expect("valid layout");

    let mut rng = ScriptedRandom::new(0);
    rng.push_ints([5]);
    let config = EngineConfig::new(0).with_timings(Timings::instant());
    let mut engine = TurnEngine::with_parts(board, config, rng, EventLog::new(50), RecordingRenderer::new());
    engine.start();

    engine.roll_dice();
    let steps = engine.run_until_idle();

    assert!(steps < 50, "ran {steps} steps");
    assert_eq!(engine.session().player(KEN).position, 6);
    assert_eq!(engine.session().player(KEN).stats.gimmick_hits, 1);
    assert_eq!(engine.session().current, PAPA);
}
