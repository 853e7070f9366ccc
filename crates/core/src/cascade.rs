//! Cascade resolution - the clear / drop / refill loop
//!
//! After an accepted swap the board is driven through
//!
//! ```text
//! Idle -> Matching -> Clearing -> Dropping -> Refilling -> Settling -> Matching ...
//!            |
//!            +-> Idle (no matches left, SettleComplete emitted)
//! ```
//!
//! Each phase commits its grid mutation before emitting the events that
//! describe it, so a consumer replaying [`ResolveReport::events`] in order
//! always sees a consistent board.
//!
//! Refill draws each new tile uniformly and may create new matches; that is
//! what makes chains happen. To keep the loop finite even with a degenerate
//! random source, from half the cap on the refill only picks kinds that do
//! not complete a run, and a resolve never runs more than `cap` passes.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::grid::Grid;
use crate::matcher::{find_all_matches, would_complete_run, MatchSet};
use crate::rng::TileRng;
use crate::scoring::ScoreEngine;
use crate::types::{CascadeEvent, Coord, TileKind, MAX_TILE_TYPES};

/// Resolver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CascadePhase {
    Idle,
    Matching,
    Clearing,
    Dropping,
    Refilling,
    Settling,
}

/// Outcome of one resolve: the ordered events plus the totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolveReport {
    pub events: Vec<CascadeEvent>,
    pub total_score_delta: u32,
    pub final_combo_depth: u32,
}

impl ResolveReport {
    /// Number of tiles destroyed across all passes.
    pub fn cleared_tiles(&self) -> usize {
        self.events
            .iter()
            .map(|e| match e {
                CascadeEvent::Cleared { coords, .. } => coords.len(),
                _ => 0,
            })
            .sum()
    }

    /// Whether the report ends with `SettleComplete`.
    pub fn settled(&self) -> bool {
        matches!(self.events.last(), Some(CascadeEvent::SettleComplete))
    }
}

#[derive(Debug, Clone)]
pub struct CascadeResolver {
    tile_type_count: TileKind,
    cap: u32,
    phase: CascadePhase,
    combo_depth: u32,
    score_delta: u32,
    pending: MatchSet,
    pending_points: u32,
    events: Vec<CascadeEvent>,
    moves: Vec<(Coord, Coord)>,
    spawned: Vec<(Coord, TileKind)>,
}

impl CascadeResolver {
    pub fn new(tile_type_count: TileKind, cap: u32) -> Self {
        Self {
            tile_type_count: tile_type_count.clamp(1, MAX_TILE_TYPES),
            cap: cap.max(1),
            phase: CascadePhase::Idle,
            combo_depth: 0,
            score_delta: 0,
            pending: MatchSet::default(),
            pending_points: 0,
            events: Vec::new(),
            moves: Vec::new(),
            spawned: Vec::new(),
        }
    }

    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    pub fn combo_depth(&self) -> u32 {
        self.combo_depth
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Events emitted since the last `begin`.
    pub fn events(&self) -> &[CascadeEvent] {
        &self.events
    }

    /// Reset combo and event log and arm the resolver at `Matching`.
    pub fn begin(&mut self) {
        self.phase = CascadePhase::Matching;
        self.combo_depth = 0;
        self.score_delta = 0;
        self.pending = MatchSet::default();
        self.pending_points = 0;
        self.events.clear();
    }

    pub(crate) fn record(&mut self, event: CascadeEvent) {
        self.events.push(event);
    }

    /// Advance one phase and return the new phase. A no-op when idle.
    pub fn step<R: TileRng>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        score: &mut ScoreEngine,
    ) -> CascadePhase {
        self.phase = match self.phase {
            CascadePhase::Idle => CascadePhase::Idle,
            CascadePhase::Matching => self.match_pass(grid, score),
            CascadePhase::Clearing => {
                grid.clear_cells(self.pending.as_slice());
                let coords = std::mem::take(&mut self.pending).into_vec();
                self.events.push(CascadeEvent::Cleared {
                    coords,
                    combo: self.combo_depth,
                    points: self.pending_points,
                });
                CascadePhase::Dropping
            }
            CascadePhase::Dropping => {
                self.moves.clear();
                for x in 0..grid.width() as i8 {
                    grid.compact_column(x, &mut self.moves);
                }
                self.events.extend(
                    self.moves
                        .iter()
                        .map(|&(from, to)| CascadeEvent::Dropped { from, to }),
                );
                CascadePhase::Refilling
            }
            CascadePhase::Refilling => {
                self.refill(grid, rng);
                CascadePhase::Settling
            }
            CascadePhase::Settling => CascadePhase::Matching,
        };
        self.phase
    }

    fn match_pass(&mut self, grid: &Grid, score: &mut ScoreEngine) -> CascadePhase {
        let matches = find_all_matches(grid);
        if matches.is_empty() {
            self.events.push(CascadeEvent::SettleComplete);
            return CascadePhase::Idle;
        }
        if self.combo_depth >= self.cap {
            warn!(
                combo = self.combo_depth,
                cap = self.cap,
                remaining = matches.len(),
                "cascade hit its hard stop; leaving remaining matches in place"
            );
            self.events.push(CascadeEvent::SettleComplete);
            return CascadePhase::Idle;
        }

        self.combo_depth += 1;
        let points = score.apply_clear(matches.len(), self.combo_depth);
        self.score_delta = self.score_delta.saturating_add(points);
        debug!(
            combo = self.combo_depth,
            cleared = matches.len(),
            points,
            "cascade pass"
        );

        self.pending = matches;
        self.pending_points = points;
        CascadePhase::Clearing
    }

    /// Combo depth from which refills stop spawning matches.
    fn guard_depth(&self) -> u32 {
        (self.cap / 2).max(1)
    }

    fn refill<R: TileRng>(&mut self, grid: &mut Grid, rng: &mut R) {
        let count = self.tile_type_count;
        let guard_from = self.guard_depth();
        let guarded = self.combo_depth >= guard_from;
        if self.combo_depth == guard_from {
            warn!(
                combo = self.combo_depth,
                cap = self.cap,
                "long cascade; refilling without new matches"
            );
        }

        self.spawned.clear();
        grid.fill_empty(
            |g, c| {
                if !guarded {
                    return rng.next_range(count as u32) as TileKind;
                }
                let safe: Vec<TileKind> = (0..count)
                    .filter(|&k| !would_complete_run(g, c, k))
                    .collect();
                if safe.is_empty() {
                    rng.next_range(count as u32) as TileKind
                } else {
                    rng.pick(&safe)
                }
            },
            &mut self.spawned,
        );
        self.events.extend(
            self.spawned
                .iter()
                .map(|&(coord, kind)| CascadeEvent::Spawned { coord, kind }),
        );
    }

    /// Step until idle and hand back the report.
    fn drive<R: TileRng>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        score: &mut ScoreEngine,
    ) -> ResolveReport {
        while self.step(grid, rng, score) != CascadePhase::Idle {}
        ResolveReport {
            events: std::mem::take(&mut self.events),
            total_score_delta: self.score_delta,
            final_combo_depth: self.combo_depth,
        }
    }

    /// Resolve whatever matches the board currently holds.
    #[instrument(skip_all, fields(cap = self.cap))]
    pub fn resolve<R: TileRng>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        score: &mut ScoreEngine,
    ) -> ResolveReport {
        self.begin();
        self.drive(grid, rng, score)
    }

    /// Resolve after an accepted swap; the report opens with `Swapped`.
    pub(crate) fn resolve_swap<R: TileRng>(
        &mut self,
        a: Coord,
        b: Coord,
        grid: &mut Grid,
        rng: &mut R,
        score: &mut ScoreEngine,
    ) -> ResolveReport {
        self.begin();
        self.record(CascadeEvent::Swapped { a, b });
        self.drive(grid, rng, score)
    }
}
