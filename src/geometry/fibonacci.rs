//! Fibonacci lattice sampling of the unit sphere
//!
//! Point `i` of `n` sits at height `y = 1 - i * (2 / n)` and azimuth `i * φ`,
//! where `φ = π(3 - √5)` is the golden angle. Successive points spiral down
//! from the north pole without the banding of latitude/longitude grids.
//!
//! The cosine and sine of `i * φ` for the first [`TABLE_SIZE`] indices come from
//! a read-only table built on first use. Larger indices are computed directly.

use std::f64::consts::PI;
use std::sync::OnceLock;

use super::Vec3;

/// Golden angle in radians, `π(3 - √5)`
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Number of precomputed lattice angles
pub const TABLE_SIZE: usize = 4096;

static GOLDEN_TRIG: OnceLock<Box<[(f64, f64)]>> = OnceLock::new();

fn golden_table() -> &'static [(f64, f64)] {
    GOLDEN_TRIG.get_or_init(|| {
        (0..TABLE_SIZE)
            .map(|i| {
                let (sin, cos) = (GOLDEN_ANGLE * i as f64).sin_cos();
                (cos, sin)
            })
            .collect()
    })
}

/// Cosine and sine of the `i`-th lattice azimuth
#[inline]
pub fn golden_trig(i: usize) -> (f64, f64) {
    match golden_table().get(i) {
        Some(&pair) => pair,
        None => {
            let (sin, cos) = (GOLDEN_ANGLE * i as f64).sin_cos();
            (cos, sin)
        }
    }
}

/// Lattice size for a sphere of `radius` at `density`: `4 * ⌈π r² / d²⌉`
#[inline]
pub fn lattice_size(radius: f64, density: f64) -> usize {
    4 * (PI * radius * radius / (density * density)).ceil() as usize
}

/// Number of lattice points kept when truncating at a polar cutoff
///
/// Matches the points `extend_unit_lattice` emits exactly, including its
/// floating point comparison at the cutoff.
pub fn cap_count(n: usize, cutoff_angle: f64) -> usize {
    if n == 0 {
        return 0;
    }
    let min_y = cutoff_angle.cos();
    let y_step = 2.0 / n as f64;
    let kept_at = |i: usize| 1.0 - i as f64 * y_step >= min_y;
    let mut kept = ((((1.0 - min_y) / y_step).floor().max(0.0) as usize) + 1).min(n);
    while kept > 1 && !kept_at(kept - 1) {
        kept -= 1;
    }
    while kept < n && kept_at(kept) {
        kept += 1;
    }
    kept
}

/// Append `n` lattice points on the unit sphere to `out`, stopping once the
/// polar angle passes `cutoff_angle`
///
/// Every emitted point is mapped through `place` so callers can scale or
/// stretch the unit lattice without a second pass.
pub fn extend_unit_lattice<F>(out: &mut Vec<Vec3>, n: usize, cutoff_angle: f64, mut place: F)
where
    F: FnMut(Vec3) -> Vec3,
{
    if n == 0 {
        return;
    }
    let min_y = cutoff_angle.cos();
    let y_step = 2.0 / n as f64;
    for i in 0..n {
        let y = 1.0 - i as f64 * y_step;
        if y < min_y {
            break;
        }
        let ring = (1.0 - y * y).max(0.0).sqrt();
        let (cos, sin) = golden_trig(i);
        out.push(place(Vec3::new(cos * ring, y, sin * ring)));
    }
}

/// Sample a sphere (or spherical cap) of `radius` at `density`
pub fn sphere(radius: f64, density: f64, cutoff_angle: f64) -> Vec<Vec3> {
    let mut points = Vec::new();
    extend_sphere(&mut points, radius, density, cutoff_angle);
    points
}

/// Append a sphere (or spherical cap) to `out`
pub fn extend_sphere(out: &mut Vec<Vec3>, radius: f64, density: f64, cutoff_angle: f64) {
    let n = lattice_size(radius, density);
    extend_unit_lattice(out, n, cutoff_angle, |p| p * radius);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_golden_angle_constant() {
        assert_relative_eq!(GOLDEN_ANGLE, PI * (3.0 - 5.0_f64.sqrt()), epsilon = 1e-12);
    }

    #[test]
    fn test_table_matches_direct_evaluation() {
        for &i in &[0, 1, 17, TABLE_SIZE - 1, TABLE_SIZE, TABLE_SIZE + 10] {
            let (cos, sin) = golden_trig(i);
            let theta = GOLDEN_ANGLE * i as f64;
            assert_eq!(cos, theta.cos());
            assert_eq!(sin, theta.sin());
        }
    }

    #[test]
    fn test_sphere_points_on_surface() {
        let points = sphere(2.0, 0.3, PI);
        assert_eq!(points.len(), lattice_size(2.0, 0.3));
        for p in &points {
            assert_relative_eq!(p.norm(), 2.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_cap_truncates() {
        let cutoff = PI / 3.0;
        let points = sphere(1.0, 0.05, cutoff);
        let n = lattice_size(1.0, 0.05);
        assert!(points.len() < n);
        assert_eq!(points.len(), cap_count(n, cutoff));
        for p in &points {
            assert!(p.y >= cutoff.cos() - 1e-12);
        }
    }

    #[test]
    fn test_zero_cutoff_keeps_pole() {
        let points = sphere(1.0, 0.1, 0.0);
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0].y, 1.0);
    }
}
