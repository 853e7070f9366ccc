use tui_match3::core::{BoardError, Grid};
use tui_match3::types::{ConfigError, Coord, MAX_BOARD_DIM};

#[test]
fn new_grid_is_empty_and_sized() {
    let grid = Grid::new(5, 3).unwrap();
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.empty_count(), 15);
    assert!(!grid.is_full());
    assert_eq!(grid.is_empty(Coord::new(4, 2)), Ok(true));
}

#[test]
fn zero_or_oversized_dimensions_are_rejected() {
    assert_eq!(
        Grid::new(0, 4).unwrap_err(),
        BoardError::InvalidConfiguration(ConfigError::ZeroWidth)
    );
    assert_eq!(
        Grid::new(4, 0).unwrap_err(),
        BoardError::InvalidConfiguration(ConfigError::ZeroHeight)
    );
    assert_eq!(
        Grid::new(MAX_BOARD_DIM + 1, 4).unwrap_err(),
        BoardError::InvalidConfiguration(ConfigError::TooLarge)
    );
}

#[test]
fn checked_access_never_clamps() {
    let mut grid = Grid::new(3, 3).unwrap();
    for c in [
        Coord::new(-1, 0),
        Coord::new(0, -1),
        Coord::new(3, 0),
        Coord::new(0, 3),
    ] {
        assert_eq!(
            grid.get(c),
            Err(BoardError::OutOfBounds {
                coord: c,
                width: 3,
                height: 3
            })
        );
        assert!(grid.set(c, Some(1)).is_err());
        assert_eq!(grid.tile_at(c), None);
    }
    assert_eq!(grid.empty_count(), 9);
}

#[test]
fn failed_swap_changes_nothing() {
    let mut grid = Grid::new(2, 1).unwrap();
    grid.set(Coord::new(0, 0), Some(1)).unwrap();
    grid.set(Coord::new(1, 0), Some(2)).unwrap();
    let before = grid.clone();

    assert!(grid.swap(Coord::new(0, 0), Coord::new(2, 0)).is_err());
    assert_eq!(grid, before);

    grid.swap(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
    assert_eq!(grid.kind_at(Coord::new(0, 0)), Some(2));
    assert_eq!(grid.kind_at(Coord::new(1, 0)), Some(1));
}

#[test]
fn rows_round_trip_top_first() {
    let rows = vec![
        vec![Some(0), None, Some(2)],
        vec![Some(1), Some(1), None],
    ];
    let grid = Grid::from_rows(&rows).unwrap();
    assert_eq!(grid.kind_at(Coord::new(0, 1)), Some(0));
    assert_eq!(grid.kind_at(Coord::new(0, 0)), Some(1));
    assert_eq!(grid.to_rows(), rows);
}

#[test]
fn gravity_then_fill_restores_columns() {
    let mut grid = Grid::from_rows(&[
        vec![Some(3), Some(4)],
        vec![None, Some(5)],
        vec![Some(1), None],
    ])
    .unwrap();

    let mut moves = Vec::new();
    for x in 0..2 {
        grid.compact_column(x, &mut moves);
    }
    assert_eq!(
        moves,
        vec![
            (Coord::new(0, 2), Coord::new(0, 1)),
            (Coord::new(1, 1), Coord::new(1, 0)),
            (Coord::new(1, 2), Coord::new(1, 1)),
        ]
    );

    let mut spawned = Vec::new();
    grid.fill_empty(|_, c| c.x as u8 + 7, &mut spawned);
    assert_eq!(spawned, vec![(Coord::new(0, 2), 7), (Coord::new(1, 2), 8)]);
    assert!(grid.is_full());
}
