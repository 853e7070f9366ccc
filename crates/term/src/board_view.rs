//! BoardView: maps a [`BoardSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::BoardSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{Coord, TileKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Caller-side interaction state drawn on top of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardOverlay {
    pub cursor: Option<Coord>,
    pub selected: Option<Coord>,
    /// Highlight the last rejected pair.
    pub wrong_move: Option<(Coord, Coord)>,
    /// Points from the most recent accepted swap.
    pub last_points: Option<u32>,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 90);
const SELECTED_BG: Rgb = Rgb::new(128, 128, 128);
const WRONG_BG: Rgb = Rgb::new(150, 40, 40);

/// Tile glyphs, indexed by kind (wrapping). Each kind also gets its own
/// color, but the glyph keeps kinds apart on monochrome terminals.
const GLYPHS: [char; 8] = ['@', '#', '%', '&', '$', '+', '*', '='];

const PALETTE: [Rgb; 8] = [
    Rgb::new(220, 80, 80),
    Rgb::new(80, 200, 120),
    Rgb::new(90, 140, 230),
    Rgb::new(240, 210, 80),
    Rgb::new(200, 120, 220),
    Rgb::new(80, 220, 220),
    Rgb::new(255, 165, 0),
    Rgb::new(230, 230, 230),
];

/// Lightweight terminal view of one board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl BoardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    fn layout(&self, snap: &BoardSnapshot, viewport: Viewport) -> Layout {
        let frame_w = snap.width as u16 * self.cell_w + 2;
        let frame_h = snap.height as u16 * self.cell_h + 2;
        Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        }
    }

    /// Top-left terminal position of board cell `c`. Row `y = 0` is drawn
    /// at the bottom of the frame.
    pub fn cell_origin(&self, snap: &BoardSnapshot, viewport: Viewport, c: Coord) -> Option<(u16, u16)> {
        if c.x < 0 || c.y < 0 || c.x as u8 >= snap.width || c.y as u8 >= snap.height {
            return None;
        }
        let l = self.layout(snap, viewport);
        let row = (snap.height - 1 - c.y as u8) as u16;
        Some((
            l.start_x + 1 + c.x as u16 * self.cell_w,
            l.start_y + 1 + row * self.cell_h,
        ))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        overlay: &BoardOverlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let l = self.layout(snap, viewport);
        fb.draw_box(
            l.start_x,
            l.start_y,
            l.frame_w,
            l.frame_h,
            CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        for y in 0..snap.height as i8 {
            for x in 0..snap.width as i8 {
                let c = Coord::new(x, y);
                self.draw_cell(fb, snap, viewport, c, snap.cell(x as u8, y as u8), overlay);
            }
        }

        self.draw_side_panel(fb, snap, overlay, viewport, l);

        if snap.game_over {
            self.draw_centered(fb, l, 0, "GAME OVER");
            self.draw_centered(fb, l, 1, "r: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, overlay: &BoardOverlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        viewport: Viewport,
        c: Coord,
        encoded: u8,
        overlay: &BoardOverlay,
    ) {
        let Some((px, py)) = self.cell_origin(snap, viewport, c) else {
            return;
        };

        let wrong = overlay
            .wrong_move
            .is_some_and(|(a, b)| a == c || b == c);
        let bg = if wrong {
            WRONG_BG
        } else if overlay.selected == Some(c) {
            SELECTED_BG
        } else if overlay.cursor == Some(c) {
            CURSOR_BG
        } else {
            BOARD_BG
        };

        let (ch, style) = match decode_kind(encoded) {
            Some(kind) => (tile_glyph(kind), CellStyle::new(tile_color(kind), bg).bold()),
            None => ('·', CellStyle::new(Rgb::new(90, 90, 100), bg).dim()),
        };
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(px, py + self.cell_h / 2, ch, style);
        if overlay.cursor == Some(c) && self.cell_w > 1 {
            fb.put_char(px + self.cell_w - 1, py + self.cell_h / 2, '<', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &BoardSnapshot,
        overlay: &BoardOverlay,
        viewport: Viewport,
        l: Layout,
    ) {
        let panel_x = l.start_x.saturating_add(l.frame_w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = l.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        let end = fb.put_u32(panel_x, y + 1, snap.score, value);
        if let Some(points) = overlay.last_points.filter(|&p| p > 0) {
            let cx = fb.put_str(end + 1, y + 1, "+", hint);
            fb.put_u32(cx, y + 1, points, hint);
        }
        y += 3;

        fb.put_str(panel_x, y, "HIGH", label);
        fb.put_u32(panel_x, y + 1, snap.high_score, value);
        y += 3;

        if let Some(ms) = snap.remaining_ms {
            fb.put_str(panel_x, y, "TIME", label);
            fb.put_clock(panel_x, y + 1, ms, value);
            y += 3;
        }

        for line in ["arrows: move", "enter: pick", "esc: drop", "r: restart", "q: quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, l: Layout, line: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = l.start_x.saturating_add(l.frame_w.saturating_sub(text_w) / 2);
        let y = l.start_y.saturating_add(l.frame_h / 2).saturating_add(line);
        fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold());
    }
}

/// Snapshot cells store `kind + 1`; `0` is empty.
fn decode_kind(v: u8) -> Option<TileKind> {
    v.checked_sub(1)
}

pub fn tile_glyph(kind: TileKind) -> char {
    GLYPHS[kind as usize % GLYPHS.len()]
}

fn tile_color(kind: TileKind) -> Rgb {
    PALETTE[kind as usize % PALETTE.len()]
}
