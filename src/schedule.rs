//! The canned zoom animation.  Each frame's budget and region come
//! from its index alone, never from the frame before it, so any frame
//! can be rendered on its own.
//!
//! The half-width shrinks by 0.02 a frame from 1.5, which reaches zero
//! at frame 75 and goes negative after.  `frame_params` reproduces
//! that as-is, and the generator refuses those regions.
//! `ZoomPolicy::Clamped` floors the half-width instead.

use num::Complex;

use error::FieldError;
use field::{Field, FieldGenerator};
use planes::Region;

/// Iteration budget of frame 0.
pub const BASE_ITERATIONS: u32 = 50;
/// Budget added per frame.
pub const ITERATIONS_PER_FRAME: u32 = 10;
/// Half-width of frame 0.
pub const BASE_ZOOM: f64 = 1.5;
/// Half-width lost per frame.
pub const ZOOM_PER_FRAME: f64 = 0.02;
/// The point the animation zooms toward.
pub const CENTER: Complex<f64> = Complex { re: -0.5, im: 0.0 };

/// What a single frame needs to be rendered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameParams {
    /// Iteration budget for the frame.
    pub max_iter: u32,
    /// Region of the complex plane for the frame.  Not validated.
    pub region: Region,
}

fn max_iter_for(frame_index: u32) -> u32 {
    frame_index
        .saturating_mul(ITERATIONS_PER_FRAME)
        .saturating_add(BASE_ITERATIONS)
}

fn zoom_for(frame_index: u32) -> f64 {
    BASE_ZOOM - f64::from(frame_index) * ZOOM_PER_FRAME
}

/// The parameters of frame `frame_index`, exactly as scheduled,
/// including the empty and inverted regions from frame 75 on.
pub fn frame_params(frame_index: u32) -> FrameParams {
    FrameParams {
        max_iter: max_iter_for(frame_index),
        region: Region::around(CENTER, zoom_for(frame_index)),
    }
}

/// How the schedule treats a half-width that has shrunk to nothing.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ZoomPolicy {
    /// Use the scheduled half-width unchanged.
    Faithful,
    /// Never let the half-width drop below this.
    Clamped(f64),
}

/// A zoom schedule with a policy for its late frames.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationSchedule {
    policy: ZoomPolicy,
}

impl AnimationSchedule {
    /// A schedule that matches `frame_params` exactly.
    pub fn faithful() -> AnimationSchedule {
        AnimationSchedule {
            policy: ZoomPolicy::Faithful,
        }
    }

    /// A schedule whose half-width stops shrinking at `min_zoom`.
    pub fn clamped(min_zoom: f64) -> AnimationSchedule {
        AnimationSchedule {
            policy: ZoomPolicy::Clamped(min_zoom),
        }
    }

    /// The policy in force.
    pub fn policy(&self) -> ZoomPolicy {
        self.policy
    }

    /// The parameters of frame `frame_index` under this policy.
    pub fn params(&self, frame_index: u32) -> FrameParams {
        match self.policy {
            ZoomPolicy::Faithful => frame_params(frame_index),
            ZoomPolicy::Clamped(min_zoom) => {
                let zoom = zoom_for(frame_index);
                FrameParams {
                    max_iter: max_iter_for(frame_index),
                    region: Region::around(CENTER, if zoom < min_zoom { min_zoom } else { zoom }),
                }
            }
        }
    }

    /// Render frame `frame_index`.  This is the whole per-frame
    /// computation; pacing the frames is up to the caller.
    pub fn frame_field(
        &self,
        frame_index: u32,
        width: usize,
        height: usize,
        threads: usize,
    ) -> Result<(Field, FrameParams), FieldError> {
        let params = self.params(frame_index);
        let field =
            FieldGenerator::new(width, height, params.region, params.max_iter)?.render(threads)?;
        Ok((field, params))
    }
}

impl Default for AnimationSchedule {
    fn default() -> AnimationSchedule {
        AnimationSchedule::faithful()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_matches_the_reference_view() {
        let p = frame_params(0);
        assert_eq!(p.max_iter, 50);
        assert_eq!(p.region, Region::new(-2.0, 1.0, -1.5, 1.5));
    }

    #[test]
    fn budget_grows_by_ten_a_frame() {
        assert_eq!(frame_params(1).max_iter, 60);
        assert_eq!(frame_params(10).max_iter, 150);
        assert_eq!(frame_params(99).max_iter, 1040);
        assert_eq!(frame_params(::std::u32::MAX).max_iter, ::std::u32::MAX);
    }

    #[test]
    fn frames_depend_only_on_their_index() {
        let later = frame_params(40);
        let _ = frame_params(3);
        assert_eq!(frame_params(40), later);
    }

    #[test]
    fn late_frames_are_degenerate_and_refused() {
        assert!(frame_params(74).region.validate().is_ok());

        let p = frame_params(75);
        assert_eq!(p.region.x_min, p.region.x_max);
        assert!(p.region.validate().is_err());

        let p = frame_params(80);
        assert!(p.region.x_min > p.region.x_max);
        assert!(p.region.y_min > p.region.y_max);
        let err = AnimationSchedule::faithful()
            .frame_field(80, 8, 8, 1)
            .unwrap_err();
        match err {
            FieldError::InvertedReal(lo, hi) => assert!(lo > hi),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn clamped_schedule_stays_valid() {
        let schedule = AnimationSchedule::clamped(0.001);
        for frame in 0..100 {
            let p = schedule.params(frame);
            assert!(p.region.validate().is_ok(), "frame {}", frame);
            assert_eq!(p.max_iter, frame_params(frame).max_iter);
        }
        assert_eq!(schedule.policy(), ZoomPolicy::Clamped(0.001));
        assert_eq!(AnimationSchedule::default().policy(), ZoomPolicy::Faithful);
        assert_eq!(schedule.params(10), frame_params(10));
        assert_eq!(schedule.params(90).region, Region::around(CENTER, 0.001));
    }

    #[test]
    fn frame_field_renders_the_scheduled_view() {
        let (field, params) = AnimationSchedule::default().frame_field(5, 16, 12, 2).unwrap();
        assert_eq!(params, frame_params(5));
        assert_eq!(field.width(), 16);
        assert_eq!(field.height(), 12);
        assert!(field.cells().iter().all(|&n| n <= params.max_iter));
    }
}
