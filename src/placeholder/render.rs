use std::path::Path;

use ab_glyph::{point, Font, FontVec, OutlinedGlyph, PxScale, Rect, ScaleFont};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::font::{bitmap_glyph, FontChoice, BITMAP_HEIGHT, BITMAP_WIDTH};

/// Encoding chosen from the target file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::WebP => ImageFormat::WebP,
        }
    }

    /// Encode `canvas` to `path`. Jpeg has no alpha channel, so it is flattened to RGB first.
    pub fn save(self, canvas: RgbaImage, path: &Path) -> image::ImageResult<()> {
        let img = match self {
            OutputFormat::Jpeg => {
                DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(canvas).to_rgb8())
            }
            OutputFormat::Png | OutputFormat::WebP => DynamicImage::ImageRgba8(canvas),
        };
        img.save_with_format(path, self.image_format())
    }
}

/// Colors and label height for one placeholder.
#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub fill: [u8; 4],
    pub text: [u8; 4],
    pub label_px: u32,
}

/// Square canvas filled with `style.fill` and `label` centered on it.
pub fn render_placeholder(
    size: u32,
    label: &str,
    font: &FontChoice,
    style: &LabelStyle,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size, size, Rgba(style.fill));
    if label.is_empty() {
        return canvas;
    }
    match font {
        FontChoice::Outline { font, .. } => draw_outline_label(&mut canvas, label, font, style),
        FontChoice::Builtin => draw_bitmap_label(&mut canvas, label, style),
    }
    canvas
}

fn blend(canvas: &mut RgbaImage, x: i64, y: i64, color: [u8; 4], coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    let a = (coverage.clamp(0.0, 1.0) * color[3] as f32) / 255.0;
    if a <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        dst.0[i] = (color[i] as f32 * a + dst.0[i] as f32 * (1.0 - a)).round() as u8;
    }
    dst.0[3] = (255.0 * a + dst.0[3] as f32 * (1.0 - a)).round() as u8;
}

/// Lay out `label` on one baseline and return its outlined glyphs.
fn layout_outline(label: &str, font: &FontVec, px: f32) -> Vec<OutlinedGlyph> {
    let scaled = font.as_scaled(PxScale::from(px));
    let mut caret = 0.0f32;
    let mut previous = None;
    let mut outlined = Vec::with_capacity(label.len());
    for ch in label.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scaled.scale(), point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        previous = Some(id);
        if let Some(o) = font.outline_glyph(glyph) {
            outlined.push(o);
        }
    }
    outlined
}

fn union_bounds(glyphs: &[OutlinedGlyph]) -> Option<Rect> {
    glyphs.iter().map(|g| g.px_bounds()).reduce(|a, b| Rect {
        min: point(a.min.x.min(b.min.x), a.min.y.min(b.min.y)),
        max: point(a.max.x.max(b.max.x), a.max.y.max(b.max.y)),
    })
}

fn draw_outline_label(canvas: &mut RgbaImage, label: &str, font: &FontVec, style: &LabelStyle) {
    let glyphs = layout_outline(label, font, style.label_px.max(1) as f32);
    let Some(bounds) = union_bounds(&glyphs) else { return };
    let size = canvas.width() as f32;
    let dx = ((size - bounds.width()) / 2.0 - bounds.min.x).round();
    let dy = ((size - bounds.height()) / 2.0 - bounds.min.y).round();
    for g in &glyphs {
        let gb = g.px_bounds();
        g.draw(|x, y, c| {
            let px = (gb.min.x + dx) as i64 + x as i64;
            let py = (gb.min.y + dy) as i64 + y as i64;
            blend(canvas, px, py, style.text, c);
        });
    }
}

/// Integer cell scale so the bitmap cap height approximates `label_px`.
pub fn bitmap_scale(label_px: u32) -> u32 {
    (label_px / BITMAP_HEIGHT).max(1)
}

/// Pixel extent of `label` in the bitmap font at `scale`.
pub fn bitmap_extent(label: &str, scale: u32) -> (u32, u32) {
    let n = label.chars().count() as u32;
    if n == 0 {
        return (0, 0);
    }
    let advance = (BITMAP_WIDTH + 1) * scale;
    (n * advance - scale, BITMAP_HEIGHT * scale)
}

fn draw_bitmap_label(canvas: &mut RgbaImage, label: &str, style: &LabelStyle) {
    let scale = bitmap_scale(style.label_px);
    let (w, h) = bitmap_extent(label, scale);
    let size = canvas.width() as i64;
    let x0 = (size - w as i64) / 2;
    let y0 = (size - h as i64) / 2;
    let advance = ((BITMAP_WIDTH + 1) * scale) as i64;
    let scale = scale as i64;
    for (i, ch) in label.chars().enumerate() {
        let cell_x = x0 + i as i64 * advance;
        for (row, bits) in bitmap_glyph(ch).iter().enumerate() {
            for col in 0..BITMAP_WIDTH as i64 {
                if bits & (0x10 >> col) == 0 {
                    continue;
                }
                let bx = cell_x + col * scale;
                let by = y0 + row as i64 * scale;
                for sy in 0..scale {
                    for sx in 0..scale {
                        blend(canvas, bx + sx, by + sy, style.text, 1.0);
                    }
                }
            }
        }
    }
}
