//! Stateless hash and value noise.
//!
//! Both functions are pure: the same coordinate always produces the same
//! bits, which keeps star positions fixed from frame to frame.

use glam::Vec2;

/// Largest `f32` strictly below 1.0.
const ONE_BELOW: f32 = 1.0 - f32::EPSILON / 2.0;

/// Fractional part, `x - floor(x)`, kept inside `[0, 1)`.
///
/// For tiny negative inputs the subtraction rounds up to exactly 1.0 in
/// `f32`; that case is pinned to the largest value below one.
#[inline]
pub fn fract(x: f32) -> f32 {
    (x - x.floor()).min(ONE_BELOW)
}

/// Pseudo-random scalar in `[0, 1)` for a 2D coordinate.
#[inline]
pub fn hash(p: Vec2) -> f32 {
    fract(p.dot(Vec2::new(127.1, 311.7)).sin() * 43758.545)
}

/// Smooth value noise: bilinear blend of the four lattice-corner hashes
/// with smoothstep weights.
pub fn noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = Vec2::new(fract(p.x), fract(p.y));
    let w = f * f * (Vec2::splat(3.0) - 2.0 * f);

    let a = hash(i);
    let b = hash(i + Vec2::X);
    let c = hash(i + Vec2::Y);
    let d = hash(i + Vec2::ONE);

    let bottom = a + (b - a) * w.x;
    let top = c + (d - c) * w.x;
    bottom + (top - bottom) * w.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_points(seed: u64, count: usize, magnitude: f32) -> Vec<Vec2> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                Vec2::new(
                    rng.random_range(-magnitude..magnitude),
                    rng.random_range(-magnitude..magnitude),
                )
            })
            .collect()
    }

    #[test]
    fn test_fract_matches_floor_definition() {
        assert_eq!(fract(2.25), 0.25);
        assert_eq!(fract(-0.25), 0.75);
        assert_eq!(fract(3.0), 0.0);
    }

    #[test]
    fn test_fract_never_reaches_one() {
        let tiny = -1.0e-9_f32;
        let f = fract(tiny);
        assert!(f < 1.0, "fract({tiny}) = {f}");
        assert!(f > 0.99);
    }

    #[test]
    fn test_hash_in_unit_range_for_small_coordinates() {
        for p in sample_points(7, 10_000, 10.0) {
            let h = hash(p);
            assert!((0.0..1.0).contains(&h), "hash({p}) = {h}");
        }
    }

    #[test]
    fn test_hash_in_unit_range_for_negative_and_large_coordinates() {
        for magnitude in [1.0e3, 1.0e6, 1.0e9, 1.0e20] {
            for p in sample_points(11, 2_000, magnitude) {
                let h = hash(p);
                assert!((0.0..1.0).contains(&h), "hash({p}) = {h}");
            }
        }
        for p in [
            Vec2::new(-1.0, -1.0),
            Vec2::new(-12345.0, 0.0),
            Vec2::new(0.0, -98765.5),
            Vec2::new(f32::MAX, f32::MIN),
        ] {
            let h = hash(p);
            assert!((0.0..1.0).contains(&h), "hash({p}) = {h}");
        }
    }

    #[test]
    fn test_hash_is_bit_stable() {
        for p in sample_points(3, 500, 100.0) {
            assert_eq!(hash(p).to_bits(), hash(p).to_bits());
        }
    }

    #[test]
    fn test_noise_in_unit_range() {
        for p in sample_points(5, 5_000, 500.0) {
            let n = noise(p);
            assert!((0.0..1.0).contains(&n), "noise({p}) = {n}");
        }
    }

    #[test]
    fn test_noise_equals_hash_on_lattice_points() {
        for (x, y) in [(0.0, 0.0), (3.0, -2.0), (-7.0, 11.0)] {
            let p = Vec2::new(x, y);
            assert!((noise(p) - hash(p)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_noise_is_continuous_across_cell_edges() {
        let edge = Vec2::new(4.0, 2.5);
        let before = noise(edge - Vec2::new(1e-4, 0.0));
        let after = noise(edge + Vec2::new(1e-4, 0.0));
        assert!((before - after).abs() < 1e-2, "{before} vs {after}");
    }
}
