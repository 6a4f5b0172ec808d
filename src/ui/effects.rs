//! Drawing for hover particles and click ripples.  The page draws the
//! document layer into its off-screen buffer and the navbar draws its own.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
};

use crate::core::effects::{DocRect, Effects, Layer};

use super::theme::ACCENT;

/// `r` as a buffer rect, or `None` when any of it lies past `u16::MAX`.
pub fn to_rect(r: DocRect) -> Option<Rect> {
    let y = u16::try_from(r.y).ok()?;
    let height = u16::try_from(r.height).ok()?;
    y.checked_add(height)?;
    r.x.checked_add(r.width)?;
    Some(Rect::new(r.x, y, r.width, height))
}

/// Expanding accent rings on `layer`, each clipped to the control it
/// started on.
pub fn render_ripples(effects: &Effects, layer: Layer, now: Instant, buf: &mut Buffer) {
    for ripple in effects.ripples().iter().filter(|r| r.layer == layer) {
        let Some(rect) = to_rect(ripple.clip) else {
            continue;
        };
        let r = ripple.radius(now);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                // Radius is in columns and a row spans two of them.
                let dx = x as f64 - ripple.center_x;
                let dy = (y as f64 - ripple.center_y) * 2.0;
                let d = (dx * dx + dy * dy).sqrt();
                if d <= r && d > r - 2.0 {
                    if let Some(cell) = buf.cell_mut(Position::new(x, y)) {
                        cell.set_bg(ACCENT);
                    }
                }
            }
        }
    }
}

/// Rising particles on `layer` that fall inside `bounds`.
pub fn render_particles(effects: &Effects, layer: Layer, bounds: Rect, now: Instant, buf: &mut Buffer) {
    for p in effects.particles(now).filter(|p| p.layer == layer) {
        if p.x < 0.0 || p.y < 0.0 {
            continue;
        }
        let pos = Position::new(p.x as u16, p.y as u16);
        if !bounds.contains(pos) {
            continue;
        }
        let glyph = if p.opacity > 0.4 { '•' } else { '·' };
        if let Some(cell) = buf.cell_mut(pos) {
            cell.set_char(glyph).set_fg(ACCENT);
        }
    }
}
