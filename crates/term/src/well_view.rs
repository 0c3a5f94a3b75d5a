//! WellView: paints a timeline's current state into a framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested against a framebuffer.

use crate::core::{Piece, Rules, Timeline};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Mode, PieceKind};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const DANGER_BG: Rgb = Rgb::new(50, 28, 32);
const LOCKED_FG: Rgb = Rgb::new(170, 170, 180);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

pub struct WellView {
    /// Terminal columns per well cell.
    cell_w: u16,
}

impl Default for WellView {
    fn default() -> Self {
        // 2x1 roughly squares the cells on typical terminal fonts
        Self { cell_w: 2 }
    }
}

impl WellView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into a reusable framebuffer, resizing it to the viewport.
    pub fn render_into(&self, timeline: &Timeline, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let rules = timeline.rules();
        let well_w = rules.width() as u16 * self.cell_w;
        let well_h = rules.depth() as u16;
        let frame_w = well_w + 2;
        let frame_h = well_h + 2;
        let origin_x = viewport.width.saturating_sub(frame_w + PANEL_WIDTH) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        if let Some(state) = timeline.current() {
            for y in 0..rules.depth() {
                for x in 0..rules.width() {
                    let danger = y < rules.bar();
                    let (ch, style) = if state.core.well.is_cell_filled(x, y as usize) {
                        ('█', CellStyle::new(LOCKED_FG, bg_for(danger)))
                    } else {
                        ('·', CellStyle::new(Rgb::new(90, 90, 100), bg_for(danger)).dim())
                    };
                    self.fill_cell(fb, origin_x, origin_y, x as i32, y as i32, ch, style);
                }
            }
            if let Some(piece) = state.piece {
                self.draw_piece(fb, rules, &piece, origin_x, origin_y);
            }
        } else {
            fb.fill_rect(origin_x + 1, origin_y + 1, well_w, well_h, ' ', CellStyle::new(WELL_BG, WELL_BG));
        }

        draw_panel(fb, timeline, origin_x + frame_w + 2, origin_y);

        match timeline.mode() {
            Mode::GameOver => draw_overlay(fb, origin_x, origin_y, frame_w, frame_h, "GAME OVER"),
            Mode::NotStarted => draw_overlay(fb, origin_x, origin_y, frame_w, frame_h, "PRESS N"),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, timeline: &Timeline, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(timeline, viewport, &mut fb);
        fb
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, rules: &Rules, piece: &Piece, origin_x: u16, origin_y: u16) {
        let orientation = rules.orientation(piece);
        let letter = rules.rotation().piece(piece.id).letter;
        let fg = piece_color(letter);
        let left = piece.x + orientation.x_min;
        let top = piece.y + orientation.y_min;

        for (dy, &bits) in orientation.rows.iter().enumerate() {
            for dx in 0..orientation.x_dim as i32 {
                if (bits >> dx) & 1 == 0 {
                    continue;
                }
                let (x, y) = (left + dx, top + dy as i32);
                let danger = y < rules.bar() as i32;
                let style = CellStyle::new(fg, bg_for(danger)).bold();
                self.fill_cell(fb, origin_x, origin_y, x, y, '█', style);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        x: i32,
        y: i32,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 {
            return;
        }
        let px = origin_x + 1 + x as u16 * self.cell_w;
        let py = origin_y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }
}

const PANEL_WIDTH: u16 = 24;

fn bg_for(danger: bool) -> Rgb {
    if danger {
        DANGER_BG
    } else {
        WELL_BG
    }
}

fn piece_color(letter: char) -> Rgb {
    match PieceKind::from_str(&letter.to_string()) {
        Some(PieceKind::I) => Rgb::new(80, 220, 220),
        Some(PieceKind::O) => Rgb::new(240, 220, 80),
        Some(PieceKind::T) => Rgb::new(200, 120, 220),
        Some(PieceKind::S) => Rgb::new(100, 220, 120),
        Some(PieceKind::Z) => Rgb::new(220, 80, 80),
        Some(PieceKind::J) => Rgb::new(80, 120, 220),
        Some(PieceKind::L) => Rgb::new(255, 165, 0),
        None => Rgb::new(230, 230, 230),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

fn draw_panel(fb: &mut FrameBuffer, timeline: &Timeline, x: u16, y: u16) {
    if x >= fb.width() {
        return;
    }
    let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
    let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

    let mut row = y;
    let mut field = |fb: &mut FrameBuffer, name: &str, text: &str| {
        fb.put_str(x, row, name, label);
        fb.put_str(x, row + 1, text, value);
        row += 3;
    };

    field(fb, "SCORE", &timeline.score().to_string());
    field(fb, "MODE", timeline.mode().as_str());

    let position = timeline.position().unwrap_or_default();
    field(fb, "MOVE", &format!("{}/{}", position, timeline.moves().len()));
    field(fb, "AI", timeline.selector_name());

    let piece = timeline
        .current()
        .and_then(|s| s.piece)
        .map(|p| timeline.rules().rotation().piece(p.id).letter.to_string())
        .unwrap_or_else(|| "-".to_string());
    field(fb, "PIECE", &piece);

    if let Some(replay) = timeline.encoded_replay() {
        fb.put_str(x, row, "REPLAY", label);
        let width = fb.width().saturating_sub(x).max(1) as usize;
        let chars: Vec<char> = replay.chars().collect();
        for (i, line) in chars.chunks(width).enumerate() {
            let text: String = line.iter().collect();
            fb.put_str(x, row + 1 + i as u16, &text, value);
        }
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let text_w = text.chars().count() as u16;
    let cx = x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    fb.put_str(cx, y.saturating_add(frame_h / 2), text, style);
}
