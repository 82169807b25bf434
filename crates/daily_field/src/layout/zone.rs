//! Exclusion zones: canvas regions where no label may be centered.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ExclusionZone {
    /// Half-open rectangle `[min, max)` in percent.
    Rect { min: Vec2, max: Vec2 },
    /// Open disk: points strictly closer than `radius` to `center`.
    Circle { center: Vec2, radius: f32 },
}

impl ExclusionZone {
    pub fn rect(min: impl Into<Vec2>, max: impl Into<Vec2>) -> Self {
        Self::Rect {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Rectangle anchored at the canvas origin covering `x < left` and `y < top`.
    pub fn top_left_corner(left: f32, top: f32) -> Self {
        Self::rect(Vec2::ZERO, Vec2::new(left, top))
    }

    pub fn circle(center: impl Into<Vec2>, radius: f32) -> Self {
        Self::Circle {
            center: center.into(),
            radius,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            ExclusionZone::Rect { min, max } => {
                p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
            }
            ExclusionZone::Circle { center, radius } => p.distance(center) < radius,
        }
    }

    /// Approximate share of the canvas covered, clipped to [0, 100]^2. Disks are not clipped.
    pub fn area(&self) -> f32 {
        match *self {
            ExclusionZone::Rect { min, max } => {
                let lo = min.clamp(Vec2::ZERO, Vec2::splat(100.0));
                let hi = max.clamp(Vec2::ZERO, Vec2::splat(100.0));
                ((hi.x - lo.x).max(0.0) * (hi.y - lo.y).max(0.0)) / 10_000.0
            }
            ExclusionZone::Circle { radius, .. } => {
                (std::f32::consts::PI * radius * radius) / 10_000.0
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            ExclusionZone::Rect { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err(Error::InvalidArgument(
                        "rect zone bounds must be finite".into(),
                    ));
                }
                if min.x > max.x || min.y > max.y {
                    return Err(Error::InvalidArgument(format!(
                        "rect zone min {min} must not exceed max {max}"
                    )));
                }
            }
            ExclusionZone::Circle { center, radius } => {
                if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
                    return Err(Error::InvalidArgument(
                        "circle zone needs a finite center and radius >= 0".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Whether `p` falls inside any of `zones`.
pub fn in_any_zone(zones: &[ExclusionZone], p: Vec2) -> bool {
    zones.iter().any(|z| z.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_rect_is_half_open() {
        let zone = ExclusionZone::top_left_corner(35.0, 14.0);
        assert!(zone.contains(Vec2::new(10.0, 5.0)));
        assert!(!zone.contains(Vec2::new(35.0, 5.0)));
        assert!(!zone.contains(Vec2::new(10.0, 14.0)));
    }

    #[test]
    fn circle_excludes_its_boundary() {
        let zone = ExclusionZone::circle(Vec2::new(50.0, 50.0), 26.0);
        assert!(zone.contains(Vec2::new(50.0, 50.0)));
        assert!(zone.contains(Vec2::new(75.9, 50.0)));
        assert!(!zone.contains(Vec2::new(76.0, 50.0)));
    }

    #[test]
    fn area_is_a_canvas_fraction() {
        let half = ExclusionZone::rect(Vec2::ZERO, Vec2::new(50.0, 100.0));
        assert!((half.area() - 0.5).abs() < 1e-6);
        let clipped = ExclusionZone::rect(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 10.0));
        assert!((clipped.area() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_malformed_zones() {
        assert!(ExclusionZone::rect(Vec2::new(10.0, 0.0), Vec2::new(5.0, 5.0))
            .validate()
            .is_err());
        assert!(ExclusionZone::circle(Vec2::ZERO, -1.0).validate().is_err());
        assert!(ExclusionZone::circle(Vec2::new(f32::NAN, 0.0), 1.0)
            .validate()
            .is_err());
        assert!(ExclusionZone::circle(Vec2::ZERO, 0.0).validate().is_ok());
    }

    #[test]
    fn zones_deserialize_from_tagged_json() {
        let zones: Vec<ExclusionZone> = serde_json::from_str(
            r#"[
                {"shape":"rect","min":[0.0,0.0],"max":[35.0,14.0]},
                {"shape":"circle","center":[50.0,50.0],"radius":26.0}
            ]"#,
        )
        .expect("valid zones");
        assert_eq!(zones[0], ExclusionZone::top_left_corner(35.0, 14.0));
        assert!(in_any_zone(&zones, Vec2::new(50.0, 60.0)));
        assert!(!in_any_zone(&zones, Vec2::new(90.0, 90.0)));
    }
}
