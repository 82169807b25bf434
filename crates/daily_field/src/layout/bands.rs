//! Banded scatter for sparse word clouds.
//!
//! Word `i` is dropped into band `i % bands.len()` at a uniformly drawn point. No
//! collision checks: bands are chosen so a handful of words stay apart.
use std::ops::Range;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seed::unit_f32;

/// Rectangular sub-range of the canvas in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub x: Range<f32>,
    pub y: Range<f32>,
}

impl Band {
    pub fn new(x: Range<f32>, y: Range<f32>) -> Self {
        Self { x, y }
    }

    fn point(&self, u: f32, v: f32) -> Vec2 {
        Vec2::new(
            self.x.start + u * (self.x.end - self.x.start),
            self.y.start + v * (self.y.end - self.y.start),
        )
    }
}

/// Scatter over a fixed cycle of bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScatter {
    pub bands: Vec<Band>,
}

impl Default for BandScatter {
    /// Top strip, bottom strip, left edge, right edge of a side panel.
    fn default() -> Self {
        Self {
            bands: vec![
                Band::new(10.0..45.0, 8.0..23.0),
                Band::new(10.0..45.0, 75.0..93.0),
                Band::new(3.0..15.0, 25.0..75.0),
                Band::new(38.0..48.0, 25.0..75.0),
            ],
        }
    }
}

impl BandScatter {
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(Error::InvalidArgument(
                "band scatter needs at least one band".into(),
            ));
        }
        for band in &self.bands {
            let finite = [band.x.start, band.x.end, band.y.start, band.y.end]
                .iter()
                .all(|v| v.is_finite());
            if !finite || band.x.start > band.x.end || band.y.start > band.y.end {
                return Err(Error::InvalidArgument(format!(
                    "malformed band {:?} x {:?}",
                    band.x, band.y
                )));
            }
        }
        Ok(())
    }

    /// Positions for `count` words. Draws `v` then `u` per word.
    pub fn place(&self, count: usize, rng: &mut dyn Rng) -> Result<Vec<Vec2>> {
        self.validate()?;
        let mut out = Vec::with_capacity(count);
        for i in 0..count {
            let band = &self.bands[i % self.bands.len()];
            let v = unit_f32(rng);
            let u = unit_f32(rng);
            out.push(band.point(u, v));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::test_rng::CycleRng;
    use crate::seed::SeededStream;

    #[test]
    fn words_cycle_through_bands() {
        let scatter = BandScatter::default();
        let mut rng = SeededStream::new("2024-01-01-words");
        let points = scatter.place(8, &mut rng).unwrap();
        assert_eq!(points.len(), 8);
        for (i, p) in points.iter().enumerate() {
            let band = &scatter.bands[i % 4];
            assert!(band.x.start <= p.x && p.x <= band.x.end, "word {i}: {p}");
            assert!(band.y.start <= p.y && p.y <= band.y.end, "word {i}: {p}");
        }
    }

    #[test]
    fn draws_vertical_before_horizontal() {
        let scatter = BandScatter::new(vec![Band::new(0.0..100.0, 0.0..100.0)]);
        let mut rng = CycleRng::new(vec![0, u32::MAX / 2 + 1]);
        let points = scatter.place(1, &mut rng).unwrap();
        assert_eq!(points[0], Vec2::new(50.0, 0.0));
    }

    #[test]
    fn rejects_empty_or_inverted_bands() {
        let mut rng = SeededStream::new("x");
        assert!(BandScatter::new(Vec::new()).place(1, &mut rng).is_err());
        assert!(BandScatter::new(vec![Band::new(10.0..5.0, 0.0..1.0)])
            .place(1, &mut rng)
            .is_err());
    }

    #[test]
    fn zero_words_draw_nothing() {
        let mut rng = SeededStream::new("none");
        let before = rng.state();
        assert!(BandScatter::default().place(0, &mut rng).unwrap().is_empty());
        assert_eq!(rng.state(), before);
    }
}
