//! Irregular polygon and prism
//!
//! Arbitrary vertices are flattened onto the plane of the lowest one. The
//! interior of a face is tiled with the cell centres of a grid spanning the
//! bounding box, clipped by even-odd ray casting. Centres closer than half a
//! cell to an edge are dropped so they don't crowd the outline.

use crate::error::{Result, ShapeError};
use crate::geometry::primitives::{
    closed_polyline_count, extend_closed_polyline, extend_line, line_steps,
};
use crate::geometry::{clamp_non_negative, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

pub const MIN_VERTICES: usize = 3;

#[derive(Clone, Debug)]
pub struct IrregularPolygon {
    base: ShapeBase,
    vertices: Vec<Vec3>,
    height: f64,
}

impl IrregularPolygon {
    /// Create a flat polygon, at least three vertices required
    pub fn new(vertices: &[Vec3]) -> Result<Self> {
        Ok(Self {
            base: ShapeBase::new(),
            vertices: flatten(vertices)?,
            height: 0.0,
        })
    }

    /// Set the prism height (builder pattern)
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = clamp_non_negative(height);
        self
    }

    /// Flattened vertices
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn set_vertices(&mut self, vertices: &[Vec3]) -> Result<()> {
        self.vertices = flatten(vertices)?;
        self.base.mark_changed();
        Ok(())
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = clamp_non_negative(height);
        self.base.mark_changed();
    }

    /// Y of the polygon plane
    pub fn base_y(&self) -> f64 {
        self.vertices[0].y
    }

    /// Area of the flattened polygon (shoelace formula)
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let (a, b) = (&self.vertices[i], &self.vertices[(i + 1) % n]);
                a.x * b.z - b.x * a.z
            })
            .sum();
        twice.abs() / 2.0
    }

    /// Even-odd containment, including the height band of a prism
    pub fn contains(&self, point: &Vec3) -> bool {
        let bottom = self.base_y();
        if point.y < bottom - 1e-9 || point.y > bottom + self.height + 1e-9 {
            return false;
        }
        contains_xz(&self.vertices, point.x, point.z)
    }

    fn lifted(&self, dy: f64) -> Vec<Vec3> {
        self.vertices.iter().map(|v| v + Vec3::new(0.0, dy, 0.0)).collect()
    }

    /// Interior grid positions `(x, z)` for one face
    fn grid(&self, density: f64) -> Vec<(f64, f64)> {
        let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
        let (mut min_z, mut max_z) = (f64::MAX, f64::MIN);
        for v in &self.vertices {
            min_x = min_x.min(v.x);
            max_x = max_x.max(v.x);
            min_z = min_z.min(v.z);
            max_z = max_z.max(v.z);
        }
        let (xs, cell_x) = cell_centres(min_x, max_x - min_x, density);
        let (zs, cell_z) = cell_centres(min_z, max_z - min_z, density);
        let clearance = cell_x.min(cell_z) / 2.0 - 1e-9;
        let mut cells = Vec::new();
        for &z in &zs {
            for &x in &xs {
                if contains_xz(&self.vertices, x, z) && edge_distance(&self.vertices, x, z) >= clearance {
                    cells.push((x, z));
                }
            }
        }
        cells
    }

    fn extend_face(&self, out: &mut Vec<Vec3>, dy: f64, density: f64) {
        extend_closed_polyline(out, &self.lifted(dy), density);
        let y = self.base_y() + dy;
        out.extend(self.grid(density).into_iter().map(|(x, z)| Vec3::new(x, y, z)));
    }

    fn levels(&self, density: f64) -> (usize, f64) {
        let steps = line_steps(self.height, density);
        (steps, self.height / steps as f64)
    }
}

fn flatten(vertices: &[Vec3]) -> Result<Vec<Vec3>> {
    if vertices.len() < MIN_VERTICES {
        return Err(ShapeError::TooFewVertices(vertices.len()));
    }
    let y = vertices.iter().map(|v| v.y).fold(f64::MAX, f64::min);
    Ok(vertices.iter().map(|v| Vec3::new(v.x, y, v.z)).collect())
}

/// Centres of the cells splitting `[start, start + length]`, and the cell size
fn cell_centres(start: f64, length: f64, density: f64) -> (Vec<f64>, f64) {
    let cells = line_steps(length, density);
    let size = length / cells as f64;
    let centres = (0..cells).map(|i| start + size * (i as f64 + 0.5)).collect();
    (centres, size)
}

fn contains_xz(vertices: &[Vec3], x: f64, z: f64) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (a, b) = (&vertices[i], &vertices[j]);
        if (a.z > z) != (b.z > z) && x < (b.x - a.x) * (z - a.z) / (b.z - a.z) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from `(x, z)` to the nearest polygon edge
fn edge_distance(vertices: &[Vec3], x: f64, z: f64) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let (a, b) = (&vertices[i], &vertices[(i + 1) % n]);
            let (ex, ez) = (b.x - a.x, b.z - a.z);
            let length_sq = ex * ex + ez * ez;
            let t = if length_sq > 0.0 {
                (((x - a.x) * ex + (z - a.z) * ez) / length_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (dx, dz) = (x - (a.x + t * ex), z - (a.z + t * ez));
            (dx * dx + dz * dz).sqrt()
        })
        .fold(f64::MAX, f64::min)
}

impl Shape for IrregularPolygon {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        if self.height > 0.0 {
            "Irregular Prism"
        } else {
            "Irregular Polygon"
        }
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        extend_closed_polyline(&mut points, &self.vertices, density);
        if self.height > 0.0 {
            let top = self.lifted(self.height);
            extend_closed_polyline(&mut points, &top, density);
            for (low, high) in self.vertices.iter().zip(&top) {
                let mut edge = Vec::new();
                extend_line(&mut edge, low, high, density, false);
                points.extend(edge.into_iter().skip(1));
            }
        }
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        self.extend_face(&mut points, 0.0, density);
        if self.height > 0.0 {
            self.extend_face(&mut points, self.height, density);
            let (steps, step) = self.levels(density);
            for level in 1..steps {
                extend_closed_polyline(&mut points, &self.lifted(step * level as f64), density);
            }
        }
        points
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let mut points = Vec::new();
        if self.height > 0.0 {
            let (steps, step) = self.levels(density);
            for level in 0..=steps {
                self.extend_face(&mut points, step * level as f64, density);
            }
        } else {
            self.extend_face(&mut points, 0.0, density);
        }
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let outline = closed_polyline_count(&self.vertices, density) as f64;
        let face = outline + self.grid(density).len() as f64;
        if self.height <= 0.0 {
            return match style {
                Style::Outline => outline,
                Style::Surface | Style::Fill => face,
            };
        }
        let steps = line_steps(self.height, density) as f64;
        match style {
            Style::Outline => 2.0 * outline + self.vertices.len() as f64 * (steps - 1.0),
            Style::Surface => 2.0 * face + (steps - 1.0) * outline,
            Style::Fill => (steps + 1.0) * face,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn l_shape() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]
    }

    #[test]
    fn test_too_few_vertices() {
        let err = IrregularPolygon::new(&[Vec3::zeros(), Vec3::x()]).unwrap_err();
        assert_eq!(err, ShapeError::TooFewVertices(2));
    }

    #[test]
    fn test_flattened_to_lowest_vertex() {
        let polygon = IrregularPolygon::new(&[
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 5.0, 1.0),
        ])
        .unwrap();
        assert!(polygon.vertices().iter().all(|v| v.y == -1.0));
    }

    #[test]
    fn test_contains_even_odd() {
        let polygon = IrregularPolygon::new(&l_shape()).unwrap().with_height(1.0);
        assert!(polygon.contains(&Vec3::new(0.5, 0.5, 0.5)));
        assert!(polygon.contains(&Vec3::new(1.5, 0.0, 0.5)));
        assert!(!polygon.contains(&Vec3::new(1.5, 0.5, 1.5)));
        assert!(!polygon.contains(&Vec3::new(0.5, 1.5, 0.5)));
        assert_relative_eq!(polygon.area(), 3.0);
    }

    #[test]
    fn test_surface_inside_polygon() {
        let mut polygon = IrregularPolygon::new(&l_shape()).unwrap();
        polygon.set_style(Style::Surface);
        polygon.set_particle_density(0.1);
        let outline = polygon.generate_outline().len();
        let points = polygon.get_points().to_vec();
        assert!(points.len() > outline + 200);
        for p in &points[outline..] {
            assert!(!(p.x > 1.0 + 1e-9 && p.z > 1.0 + 1e-9), "{:?}", p);
        }
    }

    #[test]
    fn test_grid_centred_in_bounds() {
        let square = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let polygon = IrregularPolygon::new(&square).unwrap();
        let cells = polygon.grid(0.3);
        assert_eq!(cells.len(), 9);
        let (sum_x, sum_z) = cells.iter().fold((0.0, 0.0), |(x, z), c| (x + c.0, z + c.1));
        assert_relative_eq!(sum_x / 9.0, 0.5, epsilon = 1e-12);
        assert_relative_eq!(sum_z / 9.0, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_interior_grows_steadily() {
        // Coarse densities on an L-shaped prism used to drop from dozens of
        // interior points to none between neighbouring densities
        let l_prism = IrregularPolygon::new(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 3.0),
        ])
        .unwrap()
        .with_height(1.0);
        assert!(!l_prism.grid(0.681).is_empty());
        let mut previous = 0.0;
        for i in 0..40 {
            let density = 1.0 - 0.02 * i as f64;
            let count = l_prism.estimate_count(Style::Surface, density);
            assert!(count >= previous, "{} at {}", count, density);
            previous = count;
        }
    }

    #[test]
    fn test_counts_match_estimate() {
        let mut prism = IrregularPolygon::new(&l_shape()).unwrap().with_height(0.5);
        assert_eq!(prism.name(), "Irregular Prism");
        for &style in Style::all() {
            prism.set_style(style);
            let n = prism.get_points().len() as f64;
            assert_eq!(n, prism.estimate_count(style, 0.25), "{:?}", style);
        }
    }

    #[test]
    fn test_set_vertices_validates() {
        let mut polygon = IrregularPolygon::new(&l_shape()).unwrap();
        assert!(polygon.set_vertices(&[Vec3::zeros()]).is_err());
        assert_eq!(polygon.vertices().len(), 6);
    }
}
