use tui_match3::core::{BoardEngine, Grid, RejectReason, ScriptedRng};
use tui_match3::term::{PlayEvent, PlayState};
use tui_match3::types::{BoardAction, BoardConfig, Coord, TileKind, WRONG_MOVE_FLASH_MS};

fn grid_from(rows: &[&str]) -> Grid {
    let rows: Vec<Vec<_>> = rows
        .iter()
        .map(|r| {
            r.chars()
                .map(|ch| ch.to_digit(10).map(|d| d as TileKind))
                .collect()
        })
        .collect();
    Grid::from_rows(&rows).unwrap()
}

/// 3x3 board where swapping (2,0) up with (2,1) completes the bottom row.
fn engine() -> BoardEngine<ScriptedRng> {
    let grid = grid_from(&[
        "202", //
        "021", //
        "110", //
    ]);
    BoardEngine::from_grid(
        BoardConfig::new(3, 3, 3, 1, 1),
        grid,
        ScriptedRng::new(vec![0, 2, 0]),
    )
    .unwrap()
}

fn walk_to(state: &mut PlayState, engine: &mut BoardEngine<ScriptedRng>, target: Coord) {
    while state.cursor().x > target.x {
        state.apply_action(engine, BoardAction::CursorLeft).unwrap();
    }
    while state.cursor().x < target.x {
        state.apply_action(engine, BoardAction::CursorRight).unwrap();
    }
    while state.cursor().y > target.y {
        state.apply_action(engine, BoardAction::CursorDown).unwrap();
    }
    while state.cursor().y < target.y {
        state.apply_action(engine, BoardAction::CursorUp).unwrap();
    }
    assert_eq!(state.cursor(), target);
}

#[test]
fn cursor_stops_at_edges() {
    let mut engine = engine();
    let mut state = PlayState::new(3, 3);
    assert_eq!(state.cursor(), Coord::new(1, 1));

    walk_to(&mut state, &mut engine, Coord::new(0, 0));
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::CursorLeft).unwrap(),
        PlayEvent::Ignored
    );
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::CursorDown).unwrap(),
        PlayEvent::Ignored
    );
    assert_eq!(state.cursor(), Coord::new(0, 0));
}

#[test]
fn select_twice_deselects_and_far_pick_moves_selection() {
    let mut engine = engine();
    let mut state = PlayState::new(3, 3);

    walk_to(&mut state, &mut engine, Coord::new(0, 0));
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::Select).unwrap(),
        PlayEvent::Selected(Coord::new(0, 0))
    );
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::Select).unwrap(),
        PlayEvent::Deselected
    );

    state.apply_action(&mut engine, BoardAction::Select).unwrap();
    walk_to(&mut state, &mut engine, Coord::new(2, 2));
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::Select).unwrap(),
        PlayEvent::Selected(Coord::new(2, 2))
    );
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::Cancel).unwrap(),
        PlayEvent::Deselected
    );
    assert_eq!(state.selected(), None);
}

#[test]
fn neighbor_pick_swaps_through_engine() {
    let mut engine = engine();
    let mut state = PlayState::new(3, 3);

    walk_to(&mut state, &mut engine, Coord::new(2, 0));
    state.apply_action(&mut engine, BoardAction::Select).unwrap();
    walk_to(&mut state, &mut engine, Coord::new(2, 1));
    let event = state.apply_action(&mut engine, BoardAction::Select).unwrap();

    assert_eq!(event, PlayEvent::Swapped { points: 3, combo: 1 });
    assert_eq!(engine.current_score(), 3);
    assert_eq!(state.selected(), None);
    assert_eq!(state.overlay().last_points, Some(3));
}

#[test]
fn wrong_move_flashes_then_fades() {
    let mut engine = engine();
    let mut state = PlayState::new(3, 3);
    let before = engine.grid().clone();

    walk_to(&mut state, &mut engine, Coord::new(0, 2));
    state.apply_action(&mut engine, BoardAction::Select).unwrap();
    walk_to(&mut state, &mut engine, Coord::new(1, 2));
    let event = state.apply_action(&mut engine, BoardAction::Select).unwrap();

    assert_eq!(event, PlayEvent::Rejected(RejectReason::NoMatch));
    assert_eq!(engine.grid(), &before);
    assert_eq!(
        state.overlay().wrong_move,
        Some((Coord::new(0, 2), Coord::new(1, 2)))
    );

    state.tick(&mut engine, WRONG_MOVE_FLASH_MS);
    assert_eq!(state.overlay().wrong_move, None);
}

#[test]
fn round_end_blocks_selection_until_restart() {
    let config = BoardConfig::new(5, 5, 4, 1, 1).with_round_duration_ms(100);
    let mut engine = BoardEngine::with_rng(config, ScriptedRng::new(vec![0, 1, 2, 3])).unwrap();
    let mut state = PlayState::new(5, 5);

    state.tick(&mut engine, 100);
    assert!(state.game_over().is_some());
    assert_eq!(
        state.apply_action(&mut engine, BoardAction::Select).unwrap(),
        PlayEvent::Ignored
    );

    assert_eq!(
        state.apply_action(&mut engine, BoardAction::Restart).unwrap(),
        PlayEvent::Restarted
    );
    assert!(state.game_over().is_none());
    assert!(!engine.is_game_over());
    assert_eq!(engine.remaining_ms(), Some(100));
}
