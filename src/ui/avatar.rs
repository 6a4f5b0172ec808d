//! Profile picture: the uploaded image in half-block cells, or the
//! placeholder inviting an upload.

use image::{imageops::FilterType, RgbaImage};
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier},
    widgets::{Block, BorderType, Borders, Widget},
};

use crate::core::avatar::Avatar;

use super::theme::Theme;

pub struct AvatarWidget<'a> {
    pub avatar: &'a Avatar,
    /// Picture already scaled for the current frame size, if any.
    pub fitted: Option<&'a FittedAvatar>,
    pub theme: &'a Theme,
    pub hovered: bool,
    pub loading: bool,
}

/// An avatar scaled and cropped once to cover a box of half-block cells.
#[derive(Debug, Clone)]
pub struct FittedAvatar {
    cells: (u16, u16),
    pixels: RgbaImage,
}

impl FittedAvatar {
    /// Fit `img` to the inside of an avatar frame drawn over `outer`.
    pub fn for_frame(img: &RgbaImage, outer: Rect) -> Option<Self> {
        Self::new(img, frame().inner(outer))
    }

    pub fn new(img: &RgbaImage, area: Rect) -> Option<Self> {
        if area.width == 0 || area.height == 0 || img.width() == 0 || img.height() == 0 {
            return None;
        }
        let (box_w, box_h) = (area.width as u32, area.height as u32 * 2);
        let src_w = img.width() as f64;
        let src_h = img.height() as f64;

        // Cover the box, then crop the overflow evenly from both sides.
        let scale = (box_w as f64 / src_w).max(box_h as f64 / src_h);
        let fit_w = ((src_w * scale).round() as u32).max(box_w);
        let fit_h = ((src_h * scale).round() as u32).max(box_h);
        let scaled = image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle);
        let pixels = image::imageops::crop_imm(
            &scaled,
            (fit_w - box_w) / 2,
            (fit_h - box_h) / 2,
            box_w,
            box_h,
        )
        .to_image();
        Some(Self { cells: (area.width, area.height), pixels })
    }

    pub fn fits(&self, area: Rect) -> bool {
        self.cells == (area.width, area.height)
    }
}

fn frame() -> Block<'static> {
    Block::default().borders(Borders::ALL).border_type(BorderType::Rounded)
}

impl Widget for AvatarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.hovered {
            self.theme.accent_style()
        } else {
            self.theme.border_style()
        };
        let block = frame().border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        match self.avatar.image() {
            Some(img) => match self.fitted.filter(|f| f.fits(inner)) {
                Some(fitted) => render_halfblocks(fitted, inner, buf),
                None => {
                    if let Some(fitted) = FittedAvatar::new(img, inner) {
                        render_halfblocks(&fitted, inner, buf);
                    }
                }
            },
            None => {
                let label = if self.loading { "loading…" } else { "＋ photo" };
                let mid = inner.y + inner.height / 2;
                let w = label.chars().count() as u16;
                let x = inner.x + inner.width.saturating_sub(w) / 2;
                let style = if self.hovered {
                    self.theme.accent_style().add_modifier(Modifier::BOLD)
                } else {
                    self.theme.muted_style()
                };
                buf.set_stringn(x, mid, label, inner.width as usize, style);
                if self.hovered && !self.loading && mid + 1 < inner.y + inner.height {
                    let hint = "click to upload";
                    let hx = inner.x + inner.width.saturating_sub(hint.chars().count() as u16) / 2;
                    buf.set_stringn(hx, mid + 1, hint, inner.width as usize, self.theme.muted_style());
                }
            }
        }
    }
}

/// Draw a fitted image with `▀`: each cell shows two vertical pixels, the
/// top one as foreground and the bottom one as background.
fn render_halfblocks(fitted: &FittedAvatar, area: Rect, buf: &mut Buffer) {
    let px = &fitted.pixels;
    for row in 0..area.height.min(fitted.cells.1) {
        let yt = row as u32 * 2;
        for col in 0..area.width.min(fitted.cells.0) {
            let t = px.get_pixel(col as u32, yt);
            let b = px.get_pixel(col as u32, yt + 1);
            if let Some(cell) = buf.cell_mut(Position::new(area.x + col, area.y + row)) {
                cell.set_char('▀')
                    .set_fg(Color::Rgb(t[0], t[1], t[2]))
                    .set_bg(Color::Rgb(b[0], b[1], b[2]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::core::theme::ThemeState;

    #[test]
    fn halfblocks_fill_the_box() {
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]));
        let area = Rect::new(0, 0, 6, 3);
        let mut buf = Buffer::empty(area);
        let fitted = FittedAvatar::new(&img, area).unwrap();
        assert_eq!(fitted.pixels.dimensions(), (6, 6));
        render_halfblocks(&fitted, area, &mut buf);
        let cell = &buf[(2, 1)];
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(10, 20, 30));
        assert_eq!(cell.bg, Color::Rgb(10, 20, 30));
    }

    #[test]
    fn placeholder_shows_upload_hint_on_hover() {
        let theme = Theme::new(&ThemeState::default());
        let area = Rect::new(0, 0, 20, 8);
        let mut buf = Buffer::empty(area);
        AvatarWidget { avatar: &Avatar::Placeholder, fitted: None, theme: &theme, hovered: true, loading: false }
            .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("photo"));
        assert!(text.contains("click to upload"));
    }

    #[test]
    fn loaded_image_replaces_placeholder() {
        let theme = Theme::new(&ThemeState::default());
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 0, 0, 255]));
        let avatar = Avatar::Loaded { path: "me.png".into(), image: Arc::new(img) };
        let area = Rect::new(0, 0, 10, 6);
        let mut buf = Buffer::empty(area);
        AvatarWidget { avatar: &avatar, fitted: None, theme: &theme, hovered: false, loading: false }
            .render(area, &mut buf);
        assert_eq!(buf[(4, 2)].fg, Color::Rgb(200, 0, 0));
    }

    #[test]
    fn prefitted_image_is_drawn_as_is() {
        let theme = Theme::new(&ThemeState::default());
        let red = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 0, 0, 255]));
        let blue = image::RgbaImage::from_pixel(8, 8, image::Rgba([0, 0, 200, 255]));
        let avatar = Avatar::Loaded { path: "me.png".into(), image: Arc::new(red) };
        let area = Rect::new(0, 0, 10, 6);
        // A cached fit of a different picture proves nothing is rescaled.
        let fitted = FittedAvatar::for_frame(&blue, area).unwrap();
        let mut buf = Buffer::empty(area);
        AvatarWidget { avatar: &avatar, fitted: Some(&fitted), theme: &theme, hovered: false, loading: false }
            .render(area, &mut buf);
        assert_eq!(buf[(4, 2)].fg, Color::Rgb(0, 0, 200));

        // A stale fit for another size is ignored.
        let small = FittedAvatar::for_frame(&blue, Rect::new(0, 0, 6, 4)).unwrap();
        let mut buf = Buffer::empty(area);
        AvatarWidget { avatar: &avatar, fitted: Some(&small), theme: &theme, hovered: false, loading: false }
            .render(area, &mut buf);
        assert_eq!(buf[(4, 2)].fg, Color::Rgb(200, 0, 0));
    }
}
