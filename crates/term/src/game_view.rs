//! GameView: maps a [`RenderSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Skins are resolved here, not in the simulation: a label whose first
//! character is a wide emoji is drawn as that emoji, anything else (custom
//! asset names) as a solid block in a palette color picked by token index.
//! Wildcard pieces cycle through the catalog on the wall clock.

use crate::core::{RenderSnapshot, ShapeMatrix, SkinCatalog};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, SkinToken, BOARD_HEIGHT, BOARD_WIDTH};

/// How long a wildcard shows each skin.
pub const WILDCARD_CYCLE_MS: u64 = 120;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);

const PALETTE: [Rgb; 7] = [
    Rgb::new(220, 80, 80),
    Rgb::new(255, 165, 0),
    Rgb::new(240, 220, 80),
    Rgb::new(100, 220, 120),
    Rgb::new(80, 120, 220),
    Rgb::new(200, 120, 220),
    Rgb::new(170, 120, 80),
];

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// How one skin token is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkinGlyph {
    /// Wide emoji to draw, if the label starts with one.
    pub emoji: Option<char>,
    /// Block color used when there is no emoji (and for previews).
    pub color: Rgb,
}

/// Whether `c` renders two columns wide in common terminals.
pub fn is_wide_emoji(c: char) -> bool {
    matches!(c as u32, 0x1F300..=0x1F64F | 0x1F680..=0x1F6FF | 0x1F7E0..=0x1F7EB | 0x1F900..=0x1FAFF)
}

/// Resolve a token against the catalog.
pub fn skin_glyph(skins: &SkinCatalog, token: SkinToken) -> SkinGlyph {
    let emoji = skins.label(token).chars().next().filter(|&c| is_wide_emoji(c));
    SkinGlyph {
        emoji,
        color: PALETTE[token.index() % PALETTE.len()],
    }
}

/// Token a wildcard block shows at `now_ms`.
pub fn wildcard_token(token: SkinToken, now_ms: u64, catalog_len: usize) -> SkinToken {
    let len = catalog_len.max(1);
    let step = (now_ms / WILDCARD_CYCLE_MS) as usize;
    SkinToken(((token.index() + step) % len) as u16)
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    /// Draw emoji glyphs (otherwise always colored blocks).
    emoji: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 matches the width of an emoji glyph.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            emoji: true,
        }
    }
}

/// Frame-local inputs shared by the drawing helpers.
struct Frame<'a> {
    skins: &'a SkinCatalog,
    now_ms: u64,
    start_x: u16,
    start_y: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w,
            cell_h,
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_emoji(mut self, emoji: bool) -> Self {
        self.emoji = emoji;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only resized when
    /// the viewport changes. `now_ms` drives wildcard cycling.
    pub fn render_into(
        &self,
        snap: &RenderSnapshot,
        skins: &SkinCatalog,
        now_ms: u64,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = Frame {
            skins,
            now_ms,
            start_x,
            start_y,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        // Locked board cells.
        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(block) => self.draw_block(
                        fb,
                        &frame,
                        x as u16,
                        y as u16,
                        block.token,
                        block.wildcard,
                    ),
                    None => self.draw_empty_cell(fb, &frame, x as u16, y as u16),
                }
            }
        }

        // Ghost piece.
        if let (Some(active), Some(ghost_y)) = (snap.active, snap.ghost_y) {
            let ghost_style = CellStyle {
                dim: true,
                ..CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG)
            };
            for (dx, dy) in active.piece.matrix.filled() {
                if let Some((x, y)) = on_board(active.x + dx, ghost_y + dy) {
                    self.fill_cell_rect(fb, &frame, x, y, '░', ghost_style);
                }
            }
        }

        // Active piece.
        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_block(fb, &frame, x, y, active.piece.token, active.piece.wildcard);
                }
            }
        }

        self.draw_side_panel(fb, snap, &frame, viewport, frame_w);

        match snap.status {
            GameStatus::Paused => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "PAUSED")
            }
            GameStatus::GameOver => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            GameStatus::Idle => {
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "READY")
            }
            GameStatus::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &RenderSnapshot,
        skins: &SkinCatalog,
        now_ms: u64,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, skins, now_ms, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: &Frame<'_>, x: u16, y: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG)
        };
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_block(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame<'_>,
        x: u16,
        y: u16,
        token: SkinToken,
        wildcard: bool,
    ) {
        let shown = if wildcard {
            wildcard_token(token, frame.now_ms, frame.skins.len())
        } else {
            token
        };
        let glyph = skin_glyph(frame.skins, shown);
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(glyph.color, BOARD_BG)
        };

        match glyph.emoji {
            Some(c) if self.emoji && self.cell_w == 2 => {
                let px = frame.start_x + 1 + x * self.cell_w;
                let py = frame.start_y + 1 + y * self.cell_h;
                for dy in 0..self.cell_h {
                    fb.put_wide(px, py + dy, c, style);
                }
            }
            _ => self.fill_cell_rect(fb, frame, x, y, '█', style),
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame<'_>,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.start_x + 1 + cell_x * self.cell_w;
        let py = frame.start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &RenderSnapshot,
        frame: &Frame<'_>,
        viewport: Viewport,
        frame_w: u16,
    ) {
        let panel_x = frame.start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let mut y = frame.start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "HOLD", label);
        if !snap.can_hold {
            let dim = CellStyle { dim: true, ..value };
            fb.put_str(panel_x + 5, y, "(used)", dim);
        }
        y = y.saturating_add(1);
        match snap.hold {
            Some(piece) => {
                y = self.draw_preview(fb, frame, panel_x, y, &piece.matrix, piece.token);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(1);
            }
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        for piece in snap.next.iter() {
            if y >= viewport.height {
                break;
            }
            y = self.draw_preview(fb, frame, panel_x, y, &piece.matrix, piece.token);
            y = y.saturating_add(1);
        }
    }

    /// Draw the non-empty rows of a matrix; returns the next free row.
    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame<'_>,
        x: u16,
        mut y: u16,
        matrix: &ShapeMatrix,
        token: SkinToken,
    ) -> u16 {
        let glyph = skin_glyph(frame.skins, token);
        let style = CellStyle::new(glyph.color, Rgb::new(0, 0, 0));
        let n = matrix.size() as usize;
        for row in 0..n {
            if !(0..n).any(|col| matrix.is_filled(col, row)) {
                continue;
            }
            for col in 0..n {
                if !matrix.is_filled(col, row) {
                    continue;
                }
                let px = x.saturating_add(col as u16 * 2);
                match glyph.emoji {
                    Some(c) if self.emoji => fb.put_wide(px, y, c, style),
                    _ => fb.fill_rect(px, y, 2, 1, '█', style),
                }
            }
            y = y.saturating_add(1);
        }
        y
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}
