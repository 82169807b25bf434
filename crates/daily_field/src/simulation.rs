//! Bouncing box animation, decoupled from any frame source.
//!
//! [`BounceSimulation`] owns its state; a [`FrameClock`] supplies frame deltas and
//! [`drive`] advances the simulation once per delta. Velocities are expressed in
//! units per frame, so a delta of `1.0` is one display frame.
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::seed::unit_f32;

/// Largest initial speed on each axis, in units per frame.
pub const MAX_START_SPEED: f32 = 0.75;

/// A box of `size` moving inside `[0, bounds]` and reflecting off the walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceSimulation {
    /// Top-left corner.
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub bounds: Vec2,
}

impl BounceSimulation {
    pub fn new(position: Vec2, velocity: Vec2, size: Vec2, bounds: Vec2) -> Self {
        Self {
            position,
            velocity,
            size,
            bounds,
        }
    }

    /// Random start inside `[0, bounds - size]` with each velocity component in
    /// `[-0.75, 0.75)`. Draws x, y, vx, vy in that order.
    pub fn seeded(bounds: Vec2, size: Vec2, rng: &mut dyn Rng) -> Result<Self> {
        if !bounds.is_finite() || !size.is_finite() || size.min_element() < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "bounce bounds {bounds} and size {size} must be finite and non-negative"
            )));
        }
        let room = (bounds - size).max(Vec2::ZERO);
        let position = Vec2::new(unit_f32(rng) * room.x, unit_f32(rng) * room.y);
        let velocity = Vec2::new(
            (unit_f32(rng) - 0.5) * 2.0 * MAX_START_SPEED,
            (unit_f32(rng) - 0.5) * 2.0 * MAX_START_SPEED,
        );
        Ok(Self::new(position, velocity, size, bounds))
    }

    /// Advance by `dt` frames and reflect off any wall that was reached.
    pub fn update(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        for axis in 0..2 {
            let far = self.bounds[axis] - self.size[axis];
            if self.position[axis] + self.size[axis] >= self.bounds[axis] {
                self.position[axis] = far;
                self.velocity[axis] = -self.velocity[axis];
            } else if self.position[axis] <= 0.0 {
                self.position[axis] = 0.0;
                self.velocity[axis] = -self.velocity[axis];
            }
        }
    }

    /// Change the walls, e.g. after a viewport resize. The next update snaps back inside.
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }
}

/// Source of frame deltas. `None` ends the animation.
pub trait FrameClock {
    fn next_frame(&mut self) -> Option<f32>;
}

/// Yields the same delta a fixed number of times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    dt: f32,
    remaining: usize,
}

impl FixedClock {
    pub fn new(dt: f32, frames: usize) -> Self {
        Self {
            dt,
            remaining: frames,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl FrameClock for FixedClock {
    fn next_frame(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.dt)
    }
}

impl<F> FrameClock for F
where
    F: FnMut() -> Option<f32>,
{
    fn next_frame(&mut self) -> Option<f32> {
        self()
    }
}

/// Run `sim` until `clock` is exhausted, calling `on_frame` after every update.
///
/// Returns the number of frames simulated.
pub fn drive<C, F>(sim: &mut BounceSimulation, clock: &mut C, mut on_frame: F) -> usize
where
    C: FrameClock + ?Sized,
    F: FnMut(&BounceSimulation),
{
    let mut frames = 0;
    while let Some(dt) = clock.next_frame() {
        sim.update(dt);
        on_frame(sim);
        frames += 1;
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::test_rng::FixedRng;
    use crate::seed::SeededStream;

    fn sim(position: Vec2, velocity: Vec2) -> BounceSimulation {
        BounceSimulation::new(position, velocity, Vec2::new(10.0, 10.0), Vec2::new(100.0, 50.0))
    }

    #[test]
    fn moves_by_velocity_times_dt() {
        let mut s = sim(Vec2::new(20.0, 20.0), Vec2::new(1.0, -0.5));
        s.update(2.0);
        assert_eq!(s.position, Vec2::new(22.0, 19.0));
        assert_eq!(s.velocity, Vec2::new(1.0, -0.5));
    }

    #[test]
    fn far_wall_snaps_and_reflects() {
        let mut s = sim(Vec2::new(89.5, 20.0), Vec2::new(1.0, 0.0));
        s.update(1.0);
        assert_eq!(s.position.x, 90.0);
        assert_eq!(s.velocity.x, -1.0);
    }

    #[test]
    fn near_wall_snaps_and_reflects() {
        let mut s = sim(Vec2::new(20.0, 0.25), Vec2::new(0.0, -0.5));
        s.update(1.0);
        assert_eq!(s.position.y, 0.0);
        assert_eq!(s.velocity.y, 0.5);
    }

    #[test]
    fn stays_inside_over_many_frames() {
        let mut s = BounceSimulation::seeded(
            Vec2::new(100.0, 50.0),
            Vec2::new(10.0, 10.0),
            &mut SeededStream::new("bounce"),
        )
        .unwrap();
        let mut clock = FixedClock::new(1.0, 5_000);
        let frames = drive(&mut s, &mut clock, |s| {
            assert!(s.position.min_element() >= 0.0);
            assert!(s.position.x <= 90.0 && s.position.y <= 40.0);
        });
        assert_eq!(frames, 5_000);
        assert_eq!(clock.remaining(), 0);
    }

    #[test]
    fn seeded_start_is_within_room() {
        let s = BounceSimulation::seeded(
            Vec2::new(100.0, 50.0),
            Vec2::new(10.0, 10.0),
            &mut FixedRng { value: 0 },
        )
        .unwrap();
        assert_eq!(s.position, Vec2::ZERO);
        assert_eq!(s.velocity, Vec2::splat(-MAX_START_SPEED));

        let s = BounceSimulation::seeded(
            Vec2::new(100.0, 50.0),
            Vec2::new(10.0, 10.0),
            &mut SeededStream::new("2024-01-01"),
        )
        .unwrap();
        assert!(s.position.x <= 90.0 && s.position.y <= 40.0);
        assert!(s.velocity.abs().max_element() < MAX_START_SPEED);
    }

    #[test]
    fn seeded_rejects_negative_size() {
        let mut rng = SeededStream::new("x");
        assert!(BounceSimulation::seeded(Vec2::splat(10.0), Vec2::new(-1.0, 1.0), &mut rng).is_err());
    }

    #[test]
    fn closure_clock_drives_until_none() {
        let mut s = sim(Vec2::new(20.0, 20.0), Vec2::new(1.0, 0.0));
        let mut left = 3;
        let mut clock = || {
            if left == 0 {
                None
            } else {
                left -= 1;
                Some(1.0)
            }
        };
        let mut seen = Vec::new();
        assert_eq!(drive(&mut s, &mut clock, |s| seen.push(s.position.x)), 3);
        assert_eq!(seen, vec![21.0, 22.0, 23.0]);
    }
}
