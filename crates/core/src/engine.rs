//! BoardEngine - the single owner of one board's state
//!
//! Everything mutable about a board (grid, random source, score, round clock,
//! resolver) lives here behind `&mut self`. Callers hand in two coordinates
//! per swap; selection state stays on the caller side.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::cascade::{CascadeResolver, ResolveReport};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::init::populate;
use crate::rng::{SimpleRng, TileRng};
use crate::round_clock::RoundClock;
use crate::scoring::ScoreEngine;
use crate::snapshot::BoardSnapshot;
use crate::swap::{validate_swap, RejectReason, SwapVerdict};
use crate::types::{BoardConfig, ConfigError, Coord, Tile};

/// Result of a swap request that passed the bounds check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    Accepted(ResolveReport),
    Rejected(RejectReason),
}

impl SwapOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted(_))
    }

    pub fn report(&self) -> Option<&ResolveReport> {
        match self {
            SwapOutcome::Accepted(report) => Some(report),
            SwapOutcome::Rejected(_) => None,
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            SwapOutcome::Accepted(_) => None,
            SwapOutcome::Rejected(reason) => Some(*reason),
        }
    }
}

/// Emitted once when a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverReport {
    pub final_score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
}

#[derive(Debug, Clone)]
pub struct BoardEngine<R: TileRng = SimpleRng> {
    config: BoardConfig,
    grid: Grid,
    rng: R,
    score: ScoreEngine,
    resolver: CascadeResolver,
    clock: Option<RoundClock>,
    game_over: bool,
}

impl BoardEngine<SimpleRng> {
    /// Build and populate a board from `config`, seeding the default RNG.
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, BoardError> {
        Self::with_rng(config, SimpleRng::new(seed))
    }
}

impl<R: TileRng> BoardEngine<R> {
    /// Build and populate a board drawing every tile from `rng`.
    pub fn with_rng(config: BoardConfig, mut rng: R) -> Result<Self, BoardError> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height)?;
        populate(&mut grid, &mut rng, config.tile_type_count);
        Ok(Self::assemble(config, grid, rng))
    }

    /// Adopt an existing layout as-is. The grid must match the configured
    /// dimensions and only hold known tile kinds; matches already on it are
    /// left for [`BoardEngine::resolve`].
    pub fn from_grid(config: BoardConfig, grid: Grid, rng: R) -> Result<Self, BoardError> {
        config.validate()?;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(ConfigError::GridMismatch.into());
        }
        if let Some(kind) = grid
            .cells()
            .iter()
            .flatten()
            .copied()
            .find(|&k| k >= config.tile_type_count)
        {
            return Err(ConfigError::UnknownTileKind { kind }.into());
        }
        Ok(Self::assemble(config, grid, rng))
    }

    fn assemble(config: BoardConfig, grid: Grid, rng: R) -> Self {
        Self {
            score: ScoreEngine::new(config.tile_ratio, config.combo_ratio),
            resolver: CascadeResolver::new(config.tile_type_count, config.cascade_cap()),
            clock: config.round_duration_ms.map(RoundClock::new),
            game_over: false,
            config,
            grid,
            rng,
        }
    }

    /// Try to swap `a` and `b`. Accepted swaps are resolved to a settled
    /// board before returning; rejected ones leave the grid untouched.
    #[instrument(skip_all, fields(a = %a, b = %b))]
    pub fn request_swap(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, BoardError> {
        self.grid.get(a)?;
        self.grid.get(b)?;
        if self.game_over {
            return Ok(SwapOutcome::Rejected(RejectReason::GameOver));
        }

        match validate_swap(&mut self.grid, a, b)? {
            SwapVerdict::Rejected(reason) => {
                debug!(reason = reason.as_str(), "swap rejected");
                Ok(SwapOutcome::Rejected(reason))
            }
            SwapVerdict::Accepted => {
                let report = self.resolver.resolve_swap(
                    a,
                    b,
                    &mut self.grid,
                    &mut self.rng,
                    &mut self.score,
                );
                debug!(
                    combo = report.final_combo_depth,
                    points = report.total_score_delta,
                    "swap resolved"
                );
                Ok(SwapOutcome::Accepted(report))
            }
        }
    }

    /// Clear any matches sitting on the board right now.
    #[instrument(skip(self))]
    pub fn resolve(&mut self) -> ResolveReport {
        self.resolver
            .resolve(&mut self.grid, &mut self.rng, &mut self.score)
    }

    /// Advance the round clock. Returns the game-over report on the tick
    /// that ends the round and `None` otherwise; untimed boards never end
    /// here.
    #[instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<GameOverReport> {
        if self.game_over {
            return None;
        }
        let expired = self.clock.as_mut().is_some_and(|c| c.advance(elapsed_ms));
        if !expired {
            return None;
        }
        Some(self.finish_round())
    }

    /// End the round now. `None` when it is already over.
    pub fn end_game(&mut self) -> Option<GameOverReport> {
        if self.game_over {
            return None;
        }
        Some(self.finish_round())
    }

    fn finish_round(&mut self) -> GameOverReport {
        self.game_over = true;
        let new_high_score = self.score.check_and_commit_high_score();
        let report = GameOverReport {
            final_score: self.score.current_score(),
            high_score: self.score.high_score(),
            new_high_score,
        };
        info!(
            final_score = report.final_score,
            high_score = report.high_score,
            new_high_score,
            "round over"
        );
        report
    }

    /// Fresh layout, zero score, rearmed clock. The high score is kept.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        populate(&mut self.grid, &mut self.rng, self.config.tile_type_count);
        self.score.reset_score();
        if let Some(clock) = self.clock.as_mut() {
            clock.reset();
        }
        self.game_over = false;
    }

    pub fn reset_score(&mut self) {
        self.score.reset_score();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Tile at `c`; errors when `c` is off the board.
    pub fn tile(&self, c: Coord) -> Result<Tile, BoardError> {
        self.grid.get(c)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn current_score(&self) -> u32 {
        self.score.current_score()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high_score()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Time left in a timed round; `None` for untimed boards.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.clock.map(|c| c.remaining_ms())
    }

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.write_grid(&self.grid);
        out.score = self.score.current_score();
        out.high_score = self.score.high_score();
        out.game_over = self.game_over;
        out.remaining_ms = self.remaining_ms();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut s = BoardSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::find_all_matches;
    use crate::rng::ScriptedRng;
    use crate::types::TileKind;

    fn grid(rows: &[&str]) -> Grid {
        let rows: Vec<Vec<_>> = rows
            .iter()
            .map(|r| r.chars().map(|ch| ch.to_digit(10).map(|d| d as TileKind)).collect())
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_new_board_is_full_and_quiet() {
        let engine = BoardEngine::new(BoardConfig::default(), 99).unwrap();
        assert!(engine.grid().is_full());
        assert!(find_all_matches(engine.grid()).is_empty());
        assert_eq!(engine.current_score(), 0);
        assert_eq!(engine.remaining_ms(), None);
    }

    #[test]
    fn test_invalid_config_builds_nothing() {
        let config = BoardConfig::new(0, 8, 5, 1, 1);
        let err = BoardEngine::new(config, 1).unwrap_err();
        assert_eq!(err, BoardError::InvalidConfiguration(ConfigError::ZeroWidth));
    }

    #[test]
    fn test_from_grid_checks_shape_and_kinds() {
        let config = BoardConfig::new(3, 2, 3, 1, 1);
        let wrong_shape = grid(&["01", "10"]);
        assert_eq!(
            BoardEngine::from_grid(config, wrong_shape, ScriptedRng::new(vec![0]))
                .unwrap_err(),
            BoardError::InvalidConfiguration(ConfigError::GridMismatch)
        );

        let unknown_kind = grid(&["015", "120"]);
        assert_eq!(
            BoardEngine::from_grid(config, unknown_kind, ScriptedRng::new(vec![0])).unwrap_err(),
            BoardError::InvalidConfiguration(ConfigError::UnknownTileKind { kind: 5 })
        );
    }

    #[test]
    fn test_out_of_bounds_swap_is_error_even_when_over() {
        let mut engine = BoardEngine::new(BoardConfig::default(), 3).unwrap();
        engine.end_game();
        assert!(matches!(
            engine.request_swap(Coord::new(0, 0), Coord::new(-1, 0)),
            Err(BoardError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_game_over_rejects_swaps() {
        let config = BoardConfig::new(3, 2, 3, 1, 1);
        let g = grid(&["021", "110"]);
        let mut engine = BoardEngine::from_grid(config, g, ScriptedRng::new(vec![2])).unwrap();
        assert!(engine.end_game().is_some());
        assert!(engine.end_game().is_none());

        let before = engine.grid().clone();
        let outcome = engine.request_swap(Coord::new(2, 0), Coord::new(2, 1)).unwrap();
        assert_eq!(outcome, SwapOutcome::Rejected(RejectReason::GameOver));
        assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn test_tick_reports_once_when_round_runs_out() {
        let config = BoardConfig::default().with_round_duration_ms(1000);
        let mut engine = BoardEngine::new(config, 5).unwrap();
        assert_eq!(engine.remaining_ms(), Some(1000));

        assert!(engine.tick(999).is_none());
        let report = engine.tick(16).unwrap();
        assert_eq!(report.final_score, 0);
        assert!(!report.new_high_score);
        assert!(engine.is_game_over());
        assert!(engine.tick(16).is_none());
    }

    #[test]
    fn test_untimed_board_never_expires() {
        let mut engine = BoardEngine::new(BoardConfig::default(), 5).unwrap();
        for _ in 0..1000 {
            assert!(engine.tick(u32::MAX).is_none());
        }
        assert!(!engine.is_game_over());
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let config = BoardConfig::new(3, 2, 3, 1, 1).with_round_duration_ms(500);
        let g = grid(&["021", "110"]);
        // Refill the top row as 1 0 1 so the swap does not chain.
        let mut engine =
            BoardEngine::from_grid(config, g, ScriptedRng::new(vec![1, 0, 1])).unwrap();

        let outcome = engine.request_swap(Coord::new(2, 0), Coord::new(2, 1)).unwrap();
        assert!(outcome.is_accepted());
        let scored = engine.current_score();
        assert!(scored > 0);

        let report = engine.end_game().unwrap();
        assert!(report.new_high_score);
        assert_eq!(report.high_score, scored);

        engine.restart();
        assert!(!engine.is_game_over());
        assert_eq!(engine.current_score(), 0);
        assert_eq!(engine.high_score(), scored);
        assert_eq!(engine.remaining_ms(), Some(500));
        assert!(engine.grid().is_full());
    }

    #[test]
    fn test_snapshot_mirrors_engine() {
        let config = BoardConfig::new(4, 3, 4, 1, 1).with_round_duration_ms(2000);
        let mut engine = BoardEngine::new(config, 11).unwrap();
        engine.tick(500);

        let snap = engine.snapshot();
        assert_eq!((snap.width, snap.height), (4, 3));
        assert_eq!(snap.cells.len(), 12);
        assert!(snap.cells.iter().all(|&c| (1..=4).contains(&c)));
        assert_eq!(snap.remaining_ms, Some(1500));
        assert!(snap.playable());

        let mut reused = BoardSnapshot::default();
        engine.snapshot_into(&mut reused);
        assert_eq!(reused, snap);
    }
}
