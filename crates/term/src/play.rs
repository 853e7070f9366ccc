//! PlayState: the caller-side half of a board session.
//!
//! The engine only ever sees two coordinates per swap. Cursor position, the
//! pending selection and the "wrong move" flash live here and are turned
//! into a [`BoardOverlay`] for the view.

use tracing::debug;

use crate::board_view::BoardOverlay;
use crate::core::{BoardEngine, BoardError, GameOverReport, RejectReason, SwapOutcome, TileRng};
use crate::types::{BoardAction, Coord, WRONG_MOVE_FLASH_MS};

/// What a single action did, for callers that want to react (sound, logs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayEvent {
    Ignored,
    CursorMoved(Coord),
    Selected(Coord),
    Deselected,
    Swapped { points: u32, combo: u32 },
    Rejected(RejectReason),
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayState {
    cursor: Coord,
    selected: Option<Coord>,
    wrong_move: Option<(Coord, Coord)>,
    flash_ms: u32,
    last_points: Option<u32>,
    game_over: Option<GameOverReport>,
}

impl PlayState {
    /// Start with the cursor in the middle of a `width` x `height` board.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            cursor: Coord::new((width / 2) as i8, (height / 2) as i8),
            selected: None,
            wrong_move: None,
            flash_ms: 0,
            last_points: None,
            game_over: None,
        }
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Report of the round that just ended, until the next restart.
    pub fn game_over(&self) -> Option<&GameOverReport> {
        self.game_over.as_ref()
    }

    pub fn overlay(&self) -> BoardOverlay {
        BoardOverlay {
            cursor: Some(self.cursor),
            selected: self.selected,
            wrong_move: self.wrong_move.filter(|_| self.flash_ms > 0),
            last_points: self.last_points,
        }
    }

    /// Advance the engine clock and fade the flash.
    pub fn tick<R: TileRng>(&mut self, engine: &mut BoardEngine<R>, elapsed_ms: u32) {
        self.flash_ms = self.flash_ms.saturating_sub(elapsed_ms);
        if let Some(report) = engine.tick(elapsed_ms) {
            self.record_game_over(report);
        }
    }

    fn record_game_over(&mut self, report: GameOverReport) {
        self.selected = None;
        self.game_over = Some(report);
    }

    pub fn apply_action<R: TileRng>(
        &mut self,
        engine: &mut BoardEngine<R>,
        action: BoardAction,
    ) -> Result<PlayEvent, BoardError> {
        if let Some(dir) = action.direction() {
            let next = self.cursor.step(dir);
            if !engine.grid().in_bounds(next) {
                return Ok(PlayEvent::Ignored);
            }
            self.cursor = next;
            return Ok(PlayEvent::CursorMoved(next));
        }

        match action {
            BoardAction::Restart => {
                engine.restart();
                self.selected = None;
                self.wrong_move = None;
                self.flash_ms = 0;
                self.last_points = None;
                self.game_over = None;
                Ok(PlayEvent::Restarted)
            }
            BoardAction::Cancel => Ok(match self.selected.take() {
                Some(_) => PlayEvent::Deselected,
                None => PlayEvent::Ignored,
            }),
            BoardAction::Select => self.select(engine),
            _ => Ok(PlayEvent::Ignored),
        }
    }

    /// Picking the selected tile again drops it; picking a neighbor swaps;
    /// picking anything else moves the selection there.
    fn select<R: TileRng>(&mut self, engine: &mut BoardEngine<R>) -> Result<PlayEvent, BoardError> {
        if engine.is_game_over() {
            return Ok(PlayEvent::Ignored);
        }
        let here = self.cursor;
        let Some(first) = self.selected else {
            self.selected = Some(here);
            return Ok(PlayEvent::Selected(here));
        };
        if first == here {
            self.selected = None;
            return Ok(PlayEvent::Deselected);
        }
        if !first.is_adjacent(here) {
            self.selected = Some(here);
            return Ok(PlayEvent::Selected(here));
        }

        self.selected = None;
        match engine.request_swap(first, here)? {
            SwapOutcome::Accepted(report) => {
                self.last_points = Some(report.total_score_delta);
                self.wrong_move = None;
                self.flash_ms = 0;
                Ok(PlayEvent::Swapped {
                    points: report.total_score_delta,
                    combo: report.final_combo_depth,
                })
            }
            SwapOutcome::Rejected(reason) => {
                debug!(%first, %here, reason = reason.as_str(), "wrong move");
                self.wrong_move = Some((first, here));
                self.flash_ms = WRONG_MOVE_FLASH_MS;
                Ok(PlayEvent::Rejected(reason))
            }
        }
    }
}
