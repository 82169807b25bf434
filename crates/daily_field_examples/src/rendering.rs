use std::path::Path;

use daily_field::prelude::{ExclusionZone, LabelBox, LayoutResult};
use glam::Vec2;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Colors and size for rendering a layout into a PNG.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub zone_color: [u8; 3],
    pub label_color: [u8; 3],
    pub priority_color: [u8; 3],
    pub fallback_color: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [18, 18, 20],
            zone_color: [40, 32, 44],
            label_color: [150, 150, 160],
            priority_color: [236, 72, 153],
            fallback_color: [74, 222, 128],
        }
    }

    pub fn with_background(mut self, color: [u8; 3]) -> Self {
        self.background = color;
        self
    }

    pub fn with_zone_color(mut self, color: [u8; 3]) -> Self {
        self.zone_color = color;
        self
    }

    /// Pixel coordinates of a percent-space point.
    fn to_pixel(&self, p: Vec2) -> (i64, i64) {
        let (w, h) = self.image_size;
        (
            (p.x / 100.0 * w as f32).round() as i64,
            (p.y / 100.0 * h as f32).round() as i64,
        )
    }
}

/// Draws zones as filled areas, label boxes as outlines and anchors as dots.
pub fn render_layout_to_png(
    result: &LayoutResult,
    zones: &[ExclusionZone],
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    if !zones.is_empty() {
        for y in 0..h {
            for x in 0..w {
                let p = Vec2::new(
                    (x as f32 + 0.5) / w as f32 * 100.0,
                    (y as f32 + 0.5) / h as f32 * 100.0,
                );
                if zones.iter().any(|z| z.contains(p)) {
                    img.put_pixel(x, y, Rgb(rc.zone_color));
                }
            }
        }
    }

    for placement in &result.placements {
        let color = if placement.is_fallback() {
            rc.fallback_color
        } else if placement.priority {
            rc.priority_color
        } else {
            rc.label_color
        };
        draw_box(&mut img, rc, &placement.label_box, color);
        let (cx, cy) = rc.to_pixel(placement.position);
        fill_square(&mut img, cx, cy, 2, color);
    }

    img.save(path.as_ref())?;
    info!(
        "Wrote {} placements to {}.",
        result.len(),
        path.as_ref().display()
    );
    Ok(())
}

fn draw_box(img: &mut RgbImage, rc: &RenderConfig, label_box: &LabelBox, color: [u8; 3]) {
    let (x0, y0) = rc.to_pixel(Vec2::new(label_box.left, label_box.top));
    let (x1, y1) = rc.to_pixel(Vec2::new(label_box.right, label_box.bottom));
    for x in x0..=x1 {
        put(img, x, y0, color);
        put(img, x, y1, color);
    }
    for y in y0..=y1 {
        put(img, x0, y, color);
        put(img, x1, y, color);
    }
}

fn fill_square(img: &mut RgbImage, cx: i64, cy: i64, half: i64, color: [u8; 3]) {
    for y in (cy - half)..=(cy + half) {
        for x in (cx - half)..=(cx + half) {
            put(img, x, y, color);
        }
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}
