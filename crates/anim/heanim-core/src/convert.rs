//! Numeric conversion utilities crossing the host/engine boundary.
//!
//! All functions are pure. The FOV pair is an exact inverse for
//! `aspect > 0` and angles in (0, π).

use crate::error::ConvertError;
use crate::model::FrameSpan;

/// Negate one spatial axis. The host and the engine disagree on the sign of
/// one axis; this is applied in both directions, and applying it twice is
/// the exact identity.
#[inline]
pub fn flip_axis(v: f64) -> f64 {
    -v
}

/// Engine FOV → host vertical view angle: `2·atan(tan(fov/2)·aspect)`.
pub fn fov_to_angle(fov: f64, aspect: f64) -> Result<f64, ConvertError> {
    check_aspect(aspect)?;
    Ok(2.0 * ((fov / 2.0).tan() * aspect).atan())
}

/// Host vertical view angle → engine FOV: `2·atan(tan(angle/2)/aspect)`.
pub fn angle_to_fov(angle: f64, aspect: f64) -> Result<f64, ConvertError> {
    check_aspect(aspect)?;
    Ok(2.0 * ((angle / 2.0).tan() / aspect).atan())
}

fn check_aspect(aspect: f64) -> Result<(), ConvertError> {
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(ConvertError::InvalidAspectRatio(aspect));
    }
    Ok(())
}

/// Reduce the clips of one document to `(min start_frame, max end_frame)`.
/// Sample order inside channels does not matter here; only the clip extents
/// participate.
pub fn aggregate_frame_range<S: FrameSpan>(clips: &[S]) -> Result<(i32, i32), ConvertError> {
    let mut clips = clips.iter();
    let first = clips.next().ok_or(ConvertError::EmptyInput)?;
    let mut range = (first.start_frame(), first.end_frame());
    for clip in clips {
        range.0 = range.0.min(clip.start_frame());
        range.1 = range.1.max(clip.end_frame());
    }
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Span(i32, i32);

    impl FrameSpan for Span {
        fn start_frame(&self) -> i32 {
            self.0
        }

        fn end_frame(&self) -> i32 {
            self.1
        }
    }

    #[test]
    fn flip_axis_is_an_exact_involution() {
        for v in [0.0, -0.0, 1.5, -2.75, 1e-300, f64::MAX, f64::MIN_POSITIVE] {
            assert_eq!(flip_axis(flip_axis(v)), v);
            assert_eq!(flip_axis(flip_axis(-v)), -v);
        }
    }

    #[test]
    fn fov_angle_pair_is_inverse() {
        let mut fov = 0.01f64;
        while fov < 3.0 {
            let mut aspect = 0.1f64;
            while aspect < 5.0 {
                let angle = fov_to_angle(fov, aspect).unwrap();
                let back = angle_to_fov(angle, aspect).unwrap();
                assert!(
                    (back - fov).abs() < 1e-9,
                    "fov={fov} aspect={aspect} back={back}"
                );
                aspect += 0.17;
            }
            fov += 0.07;
        }
    }

    #[test]
    fn known_reprojection_value() {
        // Square aspect is the identity.
        let angle = fov_to_angle(1.2, 1.0).unwrap();
        assert!((angle - 1.2).abs() < 1e-12);
    }

    #[test]
    fn invalid_aspect_is_rejected_not_nan() {
        for aspect in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                fov_to_angle(1.0, aspect),
                Err(ConvertError::InvalidAspectRatio(_))
            ));
            assert!(matches!(
                angle_to_fov(1.0, aspect),
                Err(ConvertError::InvalidAspectRatio(_))
            ));
        }
    }

    #[test]
    fn aggregates_min_start_max_end() {
        let clips = [Span(10, 50), Span(0, 30), Span(20, 100)];
        assert_eq!(aggregate_frame_range(&clips), Ok((0, 100)));
    }

    #[test]
    fn empty_aggregation_fails() {
        let clips: [Span; 0] = [];
        assert_eq!(aggregate_frame_range(&clips), Err(ConvertError::EmptyInput));
    }
}
