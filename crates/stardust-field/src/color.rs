//! Color space conversion used by the compositor.

use glam::Vec3;

use crate::noise::fract;

/// Convert HSV (all components in `[0, 1]`) to linear RGB.
///
/// Branch-free formulation identical to the WGSL `hsv2rgb`.
pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let channel = |offset: f32| {
        let p = (fract(hsv.x + offset) * 6.0 - 3.0).abs();
        let ramp = (p - 1.0).clamp(0.0, 1.0);
        hsv.z * (1.0 + (ramp - 1.0) * hsv.y)
    };
    Vec3::new(channel(1.0), channel(2.0 / 3.0), channel(1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).abs().max_element() < 1e-5,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let rgb = hsv_to_rgb(Vec3::new(0.37, 0.0, 0.6));
        assert_close(rgb, Vec3::splat(0.6));
    }

    #[test]
    fn test_primary_hues() {
        assert_close(hsv_to_rgb(Vec3::new(0.0, 1.0, 1.0)), Vec3::new(1.0, 0.0, 0.0));
        assert_close(
            hsv_to_rgb(Vec3::new(1.0 / 3.0, 1.0, 1.0)),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert_close(
            hsv_to_rgb(Vec3::new(2.0 / 3.0, 1.0, 1.0)),
            Vec3::new(0.0, 0.0, 1.0),
        );
    }

    #[test]
    fn test_value_scales_output() {
        let full = hsv_to_rgb(Vec3::new(0.15, 0.8, 1.0));
        let half = hsv_to_rgb(Vec3::new(0.15, 0.8, 0.5));
        assert_close(half, full * 0.5);
    }

    #[test]
    fn test_black_stays_black() {
        assert_close(hsv_to_rgb(Vec3::new(0.9, 1.0, 0.0)), Vec3::ZERO);
    }
}
