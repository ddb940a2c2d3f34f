//! Primitive curves - lines, circles, discs, ellipses and regular polygons
//!
//! These are the building blocks every shape generator composes. Each sampler
//! has a matching `*_count` / `*_steps` function returning how many points the
//! sampler emits, so density inversion can predict counts without allocating.
//!
//! Flat primitives lie in the XZ plane at the requested `y`.

use std::f64::consts::{PI, TAU};

use super::{Vec3, EPSILON};

/// Number of segments a line of `length` is split into
#[inline]
pub fn line_steps(length: f64, density: f64) -> usize {
    ((length / density).round() as usize).max(1)
}

/// Sample a line segment, including both endpoints
///
/// ## Example
/// ```text
/// (0,0,0) -> (10,0,0) at density 2.0 gives x = 0, 2, 4, 6, 8, 10
/// ```
pub fn line(start: &Vec3, end: &Vec3, density: f64) -> Vec<Vec3> {
    let mut points = Vec::new();
    extend_line(&mut points, start, end, density, true);
    points
}

/// Append a sampled line segment to `out`
///
/// When `include_end` is false the final point is skipped, which lets
/// consecutive segments of a polyline share vertices without duplicates.
pub fn extend_line(out: &mut Vec<Vec3>, start: &Vec3, end: &Vec3, density: f64, include_end: bool) {
    let direction = end - start;
    let steps = line_steps(direction.norm(), density);
    let step = direction / steps as f64;
    let last = if include_end { steps } else { steps - 1 };
    out.reserve(last + 1);
    for i in 0..=last {
        out.push(start + step * i as f64);
    }
}

/// Number of points on an arc of `radius` spanning `cutoff` radians
#[inline]
pub fn arc_steps(radius: f64, density: f64, cutoff: f64) -> usize {
    ((cutoff * radius / density).round() as usize).max(1)
}

/// Sample a circle or arc in the XZ plane, angles in `[0, cutoff)`
pub fn circle(radius: f64, density: f64, cutoff: f64) -> Vec<Vec3> {
    let mut points = Vec::new();
    extend_circle(&mut points, radius, density, cutoff, 0.0);
    points
}

/// Append a circle or arc at height `y` to `out`
pub fn extend_circle(out: &mut Vec<Vec3>, radius: f64, density: f64, cutoff: f64, y: f64) {
    let steps = arc_steps(radius, density, cutoff);
    let angle_step = cutoff / steps as f64;
    out.reserve(steps);
    for i in 0..steps {
        let theta = angle_step * i as f64;
        out.push(Vec3::new(radius * theta.cos(), y, radius * theta.sin()));
    }
}

/// Number of concentric rings used to fill a disc
#[inline]
pub fn disc_rings(radius: f64, density: f64) -> usize {
    ((radius / density).round() as usize).max(1)
}

/// Append a filled disc (or sector) at height `y` to `out`
///
/// Rings shrink from the rim towards the centre, then the centre point closes
/// the disc.
pub fn extend_disc(out: &mut Vec<Vec3>, radius: f64, density: f64, cutoff: f64, y: f64) {
    let rings = disc_rings(radius, density);
    for k in (1..=rings).rev() {
        let sub_radius = radius * k as f64 / rings as f64;
        extend_circle(out, sub_radius, density, cutoff, y);
    }
    out.push(Vec3::new(0.0, y, 0.0));
}

/// Sample a filled disc in the XZ plane
pub fn disc(radius: f64, density: f64, cutoff: f64) -> Vec<Vec3> {
    let mut points = Vec::new();
    extend_disc(&mut points, radius, density, cutoff, 0.0);
    points
}

/// Number of points `extend_disc` emits
pub fn disc_count(radius: f64, density: f64, cutoff: f64) -> usize {
    let rings = disc_rings(radius, density);
    let ring_points: usize = (1..=rings)
        .map(|k| arc_steps(radius * k as f64 / rings as f64, density, cutoff))
        .sum();
    ring_points + 1
}

/// Ramanujan's approximation of an ellipse circumference
///
/// ```text
/// h = ((a - b) / (a + b))²
/// C ≈ π (a + b) (1 + 3h / (10 + √(4 - 3h)))
/// ```
pub fn ellipse_circumference(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum <= 0.0 {
        return 0.0;
    }
    let h = ((a - b) / sum).powi(2);
    PI * sum * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

/// Append an ellipse (or elliptical arc) at height `y` to `out`
///
/// `a` is the X radius and `b` the Z radius. The parametric angle advances by
/// `density / |d(a cosθ, b sinθ)/dθ|` each step, so neighbouring points stay
/// roughly `density` apart along the curve. The cutoff is a parametric angle,
/// which only matches the swept polar angle for circles.
pub fn extend_ellipse(out: &mut Vec<Vec3>, a: f64, b: f64, density: f64, cutoff: f64, y: f64) {
    for theta in ellipse_angles(a, b, density, cutoff) {
        let (sin, cos) = theta.sin_cos();
        out.push(Vec3::new(a * cos, y, b * sin));
    }
}

/// Parametric angles visited when sampling an ellipse
fn ellipse_angles(a: f64, b: f64, density: f64, cutoff: f64) -> impl Iterator<Item = f64> {
    std::iter::successors(Some(0.0_f64), move |&theta| {
        let (sin, cos) = theta.sin_cos();
        let speed = ((a * sin).powi(2) + (b * cos).powi(2)).sqrt().max(EPSILON);
        Some(theta + density / speed)
    })
    .take_while(move |&theta| theta < cutoff)
}

/// Sample an ellipse in the XZ plane
pub fn ellipse(a: f64, b: f64, density: f64, cutoff: f64) -> Vec<Vec3> {
    let mut points = Vec::new();
    extend_ellipse(&mut points, a, b, density, cutoff, 0.0);
    points
}

/// Number of points `extend_ellipse` emits
pub fn ellipse_count(a: f64, b: f64, density: f64, cutoff: f64) -> f64 {
    ellipse_angles(a, b, density, cutoff).count() as f64
}

/// Append a filled ellipse (concentric scaled ellipses plus centre) to `out`
pub fn extend_elliptical_disc(out: &mut Vec<Vec3>, a: f64, b: f64, density: f64, cutoff: f64, y: f64) {
    let rings = disc_rings(a.max(b), density);
    for k in (1..=rings).rev() {
        let factor = k as f64 / rings as f64;
        extend_ellipse(out, a * factor, b * factor, density, cutoff, y);
    }
    out.push(Vec3::new(0.0, y, 0.0));
}

/// Number of points `extend_elliptical_disc` emits
pub fn elliptical_disc_count(a: f64, b: f64, density: f64, cutoff: f64) -> f64 {
    let rings = disc_rings(a.max(b), density);
    let ring_points: f64 = (1..=rings)
        .map(|k| {
            let factor = k as f64 / rings as f64;
            ellipse_count(a * factor, b * factor, density, cutoff)
        })
        .sum();
    ring_points + 1.0
}

/// Vertices of a regular polygon in the XZ plane, first vertex on +X
pub fn polygon_vertices(sides: usize, radius: f64) -> Vec<Vec3> {
    let angle = TAU / sides as f64;
    (0..sides)
        .map(|i| {
            let theta = angle * i as f64;
            Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
        })
        .collect()
}

/// Append a closed polyline through `vertices` to `out`
///
/// Every edge is sampled without its end point; the next edge starts there.
pub fn extend_closed_polyline(out: &mut Vec<Vec3>, vertices: &[Vec3], density: f64) {
    let n = vertices.len();
    for i in 0..n {
        extend_line(out, &vertices[i], &vertices[(i + 1) % n], density, false);
    }
}

/// Sample a closed polyline through `vertices`
pub fn closed_polyline(vertices: &[Vec3], density: f64) -> Vec<Vec3> {
    let mut points = Vec::new();
    extend_closed_polyline(&mut points, vertices, density);
    points
}

/// Number of points `extend_closed_polyline` emits
pub fn closed_polyline_count(vertices: &[Vec3], density: f64) -> usize {
    let n = vertices.len();
    (0..n)
        .map(|i| line_steps((vertices[(i + 1) % n] - vertices[i]).norm(), density))
        .sum()
}

/// Number of rings used to fill a regular polygon
///
/// Chosen so the apothem divides evenly by the density.
#[inline]
pub fn polygon_rings(sides: usize, radius: f64, density: f64) -> usize {
    let apothem = radius * (PI / sides as f64).cos();
    ((apothem / density).round() as usize).max(1)
}

/// Append a filled regular polygon at height `y` to `out`
pub fn extend_filled_polygon(out: &mut Vec<Vec3>, sides: usize, radius: f64, density: f64, y: f64) {
    let rings = polygon_rings(sides, radius, density);
    let lift = Vec3::new(0.0, y, 0.0);
    for k in (1..=rings).rev() {
        let vertices: Vec<Vec3> = polygon_vertices(sides, radius * k as f64 / rings as f64)
            .into_iter()
            .map(|v| v + lift)
            .collect();
        extend_closed_polyline(out, &vertices, density);
    }
    out.push(lift);
}

/// Number of points `extend_filled_polygon` emits
pub fn filled_polygon_count(sides: usize, radius: f64, density: f64) -> usize {
    let rings = polygon_rings(sides, radius, density);
    let ring_points: usize = (1..=rings)
        .map(|k| regular_outline_count(sides, radius * k as f64 / rings as f64, density))
        .sum();
    ring_points + 1
}

/// Number of points on the outline of a regular polygon
pub fn regular_outline_count(sides: usize, radius: f64, density: f64) -> usize {
    let edge = 2.0 * radius * (PI / sides as f64).sin();
    sides * line_steps(edge, density)
}

/// Evenly spaced positions covering `[start, start + length]`, both ends included
pub fn axis_positions(start: f64, length: f64, density: f64) -> Vec<f64> {
    let steps = line_steps(length, density);
    let step = length / steps as f64;
    (0..=steps).map(|i| start + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_includes_endpoints() {
        let points = line(&Vec3::zeros(), &Vec3::new(10.0, 0.0, 0.0), 2.0);
        assert_eq!(points.len(), 6);
        for (i, p) in points.iter().enumerate() {
            assert_relative_eq!(p.x, 2.0 * i as f64, epsilon = 1e-12);
            assert_eq!(p.y, 0.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_line_shorter_than_density() {
        let points = line(&Vec3::zeros(), &Vec3::new(0.1, 0.0, 0.0), 5.0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], Vec3::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn test_circle_count_and_radius() {
        let points = circle(10.0, 1.0, TAU);
        assert_eq!(points.len(), 63);
        for p in &points {
            assert_relative_eq!(p.norm(), 10.0, epsilon = 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_disc_count_matches() {
        for &(radius, density) in &[(1.0, 0.25), (3.0, 0.1), (0.5, 2.0)] {
            assert_eq!(disc(radius, density, TAU).len(), disc_count(radius, density, TAU));
        }
    }

    #[test]
    fn test_disc_ends_at_centre() {
        let points = disc(2.0, 0.5, TAU);
        assert_eq!(*points.last().unwrap(), Vec3::zeros());
        assert!(points.iter().all(|p| p.norm() <= 2.0 + 1e-9));
    }

    #[test]
    fn test_ellipse_circumference_of_circle() {
        assert_relative_eq!(ellipse_circumference(2.0, 2.0), TAU * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ellipse_points_on_curve() {
        let points = ellipse(3.0, 1.0, 0.1, TAU);
        assert_eq!(points.len() as f64, ellipse_count(3.0, 1.0, 0.1, TAU));
        let expected = ellipse_circumference(3.0, 1.0) / 0.1;
        assert!((points.len() as f64 - expected).abs() <= 0.05 * expected);
        for p in &points {
            let value = (p.x / 3.0).powi(2) + (p.z / 1.0).powi(2);
            assert_relative_eq!(value, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_elliptical_disc_count_matches() {
        let mut points = Vec::new();
        extend_elliptical_disc(&mut points, 2.0, 1.0, 0.3, PI, 0.5);
        assert_eq!(points.len() as f64, elliptical_disc_count(2.0, 1.0, 0.3, PI));
    }

    #[test]
    fn test_polygon_outline_count() {
        let vertices = polygon_vertices(6, 2.0);
        assert_eq!(
            closed_polyline(&vertices, 0.3).len(),
            closed_polyline_count(&vertices, 0.3)
        );
        assert_eq!(closed_polyline_count(&vertices, 0.3), regular_outline_count(6, 2.0, 0.3));
    }

    #[test]
    fn test_filled_polygon_count() {
        let mut points = Vec::new();
        extend_filled_polygon(&mut points, 5, 1.5, 0.2, 1.0);
        assert_eq!(points.len(), filled_polygon_count(5, 1.5, 0.2));
        assert!(points.iter().all(|p| p.y == 1.0));
    }

    #[test]
    fn test_axis_positions() {
        let xs = axis_positions(-1.0, 2.0, 0.5);
        assert_eq!(xs.len(), 5);
        assert_relative_eq!(xs[0], -1.0);
        assert_relative_eq!(xs[4], 1.0, epsilon = 1e-12);
    }
}
