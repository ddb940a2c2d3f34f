//! Regular polyhedra
//!
//! Tetrahedron, octahedron, dodecahedron and icosahedron, sized by their
//! circumradius. Every face is drawn as a regular polygon patch built once in
//! a canonical frame (centred on +Y at the inradius, first corner towards +X)
//! and rotated into place by a per-face quaternion.
//!
//! The face quaternions are derived from each solid's vertex set on first use
//! and shared read-only afterwards.

use std::f64::consts::PI;
use std::sync::OnceLock;

use nalgebra::{Rotation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::geometry::primitives::{
    disc_rings, extend_closed_polyline, extend_filled_polygon, filled_polygon_count,
    polygon_vertices, regular_outline_count,
};
use crate::geometry::{clamp_positive, Quat, Vec3};

use super::base::ShapeBase;
use super::style::Style;
use super::traits::Shape;

/// Supported platonic solids
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Solid {
    #[default]
    Tetrahedron,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl Solid {
    /// Solid with the given face count
    pub fn from_faces(faces: u32) -> Option<Self> {
        match faces {
            4 => Some(Solid::Tetrahedron),
            8 => Some(Solid::Octahedron),
            12 => Some(Solid::Dodecahedron),
            20 => Some(Solid::Icosahedron),
            _ => None,
        }
    }

    pub fn faces(self) -> usize {
        match self {
            Solid::Tetrahedron => 4,
            Solid::Octahedron => 8,
            Solid::Dodecahedron => 12,
            Solid::Icosahedron => 20,
        }
    }

    /// Corners per face
    pub fn face_sides(self) -> usize {
        match self {
            Solid::Dodecahedron => 5,
            _ => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Solid::Tetrahedron => "Tetrahedron",
            Solid::Octahedron => "Octahedron",
            Solid::Dodecahedron => "Dodecahedron",
            Solid::Icosahedron => "Icosahedron",
        }
    }

    /// Edge length of a solid with unit circumradius
    pub fn edge_per_circumradius(self) -> f64 {
        match self {
            Solid::Tetrahedron => (8.0_f64 / 3.0).sqrt(),
            Solid::Octahedron => 2.0_f64.sqrt(),
            Solid::Dodecahedron => 4.0 / (3.0_f64.sqrt() * (1.0 + 5.0_f64.sqrt())),
            Solid::Icosahedron => 1.0 / (2.0 * PI / 5.0).sin(),
        }
    }

    /// Inradius of a solid with unit edge length
    pub fn inradius_per_edge(self) -> f64 {
        let sqrt5 = 5.0_f64.sqrt();
        match self {
            Solid::Tetrahedron => 1.0 / 24.0_f64.sqrt(),
            Solid::Octahedron => 1.0 / 6.0_f64.sqrt(),
            Solid::Dodecahedron => ((25.0 + 11.0 * sqrt5) / 10.0).sqrt() / 2.0,
            Solid::Icosahedron => (3.0 + sqrt5) / (4.0 * 3.0_f64.sqrt()),
        }
    }

    /// Rotations carrying the canonical face onto each face of the solid
    pub fn face_rotations(self) -> &'static [Quat] {
        static ROTATIONS: OnceLock<[Box<[Quat]>; 4]> = OnceLock::new();
        let all = ROTATIONS.get_or_init(|| {
            [
                Solid::Tetrahedron,
                Solid::Octahedron,
                Solid::Dodecahedron,
                Solid::Icosahedron,
            ]
            .map(|solid| {
                let (vertices, normals) = solid.vertices_and_normals();
                normals.iter().map(|normal| face_rotation(&vertices, normal)).collect()
            })
        });
        &all[self as usize]
    }

    /// Vertex directions and outward face directions of the solid
    fn vertices_and_normals(self) -> (Vec<Vec3>, Vec<Vec3>) {
        let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
        match self {
            Solid::Tetrahedron => {
                let vertices = vec![
                    Vec3::new(1.0, 1.0, 1.0),
                    Vec3::new(1.0, -1.0, -1.0),
                    Vec3::new(-1.0, 1.0, -1.0),
                    Vec3::new(-1.0, -1.0, 1.0),
                ];
                let normals = vertices.iter().map(|v| -v).collect();
                (vertices, normals)
            }
            Solid::Octahedron => {
                let vertices = vec![
                    Vec3::x(),
                    -Vec3::x(),
                    Vec3::y(),
                    -Vec3::y(),
                    Vec3::z(),
                    -Vec3::z(),
                ];
                (vertices, cube_corners())
            }
            Solid::Dodecahedron => {
                let mut vertices = cube_corners();
                vertices.extend(cyclic_signed(1.0 / phi, phi));
                (vertices, cyclic_signed(phi, 1.0))
            }
            Solid::Icosahedron => {
                let mut normals = cube_corners();
                normals.extend(cyclic_signed(phi, 1.0 / phi));
                (cyclic_signed(1.0, phi), normals)
            }
        }
    }
}

/// The eight points `(±1, ±1, ±1)`
fn cube_corners() -> Vec<Vec3> {
    let signs = [1.0, -1.0];
    let mut corners = Vec::with_capacity(8);
    for x in signs {
        for y in signs {
            for z in signs {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    corners
}

/// The twelve points `(0, ±a, ±b)` under cyclic permutation of the axes
fn cyclic_signed(a: f64, b: f64) -> Vec<Vec3> {
    let signs = [1.0, -1.0];
    let mut points = Vec::with_capacity(12);
    for sa in signs {
        for sb in signs {
            let (p, q) = (sa * a, sb * b);
            points.push(Vec3::new(0.0, p, q));
            points.push(Vec3::new(q, 0.0, p));
            points.push(Vec3::new(p, q, 0.0));
        }
    }
    points
}

/// Vertices of the face whose outward direction is `normal`
fn face_vertices(vertices: &[Vec3], normal: &Vec3) -> Vec<Vec3> {
    let best = vertices.iter().map(|v| v.dot(normal)).fold(f64::MIN, f64::max);
    vertices
        .iter()
        .filter(|v| v.dot(normal) > best - 1e-6)
        .copied()
        .collect()
}

/// Rotation taking +Y to the face centre and +X to the face's first vertex
fn face_rotation(vertices: &[Vec3], normal: &Vec3) -> Quat {
    let face = face_vertices(vertices, normal);
    let centroid = face.iter().sum::<Vec3>() / face.len() as f64;
    let up = centroid.normalize();
    let across = (face[0] - centroid).normalize();
    let side = across.cross(&up);
    let basis = Rotation3::from_basis_unchecked(&[across, up, side]);
    UnitQuaternion::from_rotation_matrix(&basis)
}

#[derive(Clone, Debug)]
pub struct RegularPolyhedron {
    base: ShapeBase,
    solid: Solid,
    radius: f64,
}

impl RegularPolyhedron {
    /// Create a polyhedron from a face count in {4, 8, 12, 20}
    ///
    /// Any other count falls back to a tetrahedron.
    pub fn new(radius: f64, faces: u32) -> Self {
        let solid = Solid::from_faces(faces).unwrap_or_else(|| {
            log::warn!("Unsupported polyhedron face count {}, using a tetrahedron", faces);
            Solid::Tetrahedron
        });
        Self::with_solid(radius, solid)
    }

    pub fn with_solid(radius: f64, solid: Solid) -> Self {
        Self {
            base: ShapeBase::new(),
            solid,
            radius: clamp_positive(radius),
        }
    }

    pub fn solid(&self) -> Solid {
        self.solid
    }

    pub fn set_solid(&mut self, solid: Solid) {
        self.solid = solid;
        self.base.mark_changed();
    }

    /// Circumradius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.radius = clamp_positive(radius);
        self.base.mark_changed();
    }

    pub fn edge_length(&self) -> f64 {
        edge_length(self.solid, self.radius)
    }

    pub fn inradius(&self) -> f64 {
        self.edge_length() * self.solid.inradius_per_edge()
    }

    /// Circumradius of a single face
    pub fn face_radius(&self) -> f64 {
        face_radius(self.solid, self.radius)
    }

    /// Corners of every face, rotated into place
    pub fn face_corners(&self) -> Vec<Vec<Vec3>> {
        let canonical = canonical_corners(self.solid, self.radius);
        self.solid
            .face_rotations()
            .iter()
            .map(|rotation| canonical.iter().map(|corner| rotation * corner).collect())
            .collect()
    }

    /// Sampled point patch of every face for the current style
    ///
    /// Surfaces tile each face with concentric rings; every other style
    /// keeps just the face outline.
    pub fn face_patches(&self) -> Vec<Vec<Vec3>> {
        let filled = self.base.style() == Style::Surface;
        let canonical = self.canonical_patch(self.radius, filled, self.base.particle_density());
        self.solid
            .face_rotations()
            .iter()
            .map(|rotation| canonical.iter().map(|p| rotation * p).collect())
            .collect()
    }

    /// One face in the canonical frame
    fn canonical_patch(&self, radius: f64, filled: bool, density: f64) -> Vec<Vec3> {
        let mut patch = Vec::new();
        if filled {
            let (sides, lift) = (self.solid.face_sides(), inradius(self.solid, radius));
            extend_filled_polygon(&mut patch, sides, face_radius(self.solid, radius), density, lift);
        } else {
            extend_closed_polyline(&mut patch, &canonical_corners(self.solid, radius), density);
        }
        patch
    }

    fn extend_faces(&self, out: &mut Vec<Vec3>, radius: f64, filled: bool, density: f64) {
        let canonical = self.canonical_patch(radius, filled, density);
        for rotation in self.solid.face_rotations() {
            out.extend(canonical.iter().map(|p| rotation * p));
        }
    }
}

fn edge_length(solid: Solid, radius: f64) -> f64 {
    radius * solid.edge_per_circumradius()
}

fn inradius(solid: Solid, radius: f64) -> f64 {
    edge_length(solid, radius) * solid.inradius_per_edge()
}

fn face_radius(solid: Solid, radius: f64) -> f64 {
    edge_length(solid, radius) / (2.0 * (PI / solid.face_sides() as f64).sin())
}

/// Face corners centred on +Y at the inradius
fn canonical_corners(solid: Solid, radius: f64) -> Vec<Vec3> {
    let lift = Vec3::new(0.0, inradius(solid, radius), 0.0);
    polygon_vertices(solid.face_sides(), face_radius(solid, radius))
        .into_iter()
        .map(|v| v + lift)
        .collect()
}

impl Shape for RegularPolyhedron {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn name(&self) -> &str {
        self.solid.name()
    }

    fn generate_outline(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        self.extend_faces(&mut points, self.radius, false, self.base.particle_density());
        points
    }

    fn generate_surface(&self) -> Vec<Vec3> {
        let mut points = Vec::new();
        self.extend_faces(&mut points, self.radius, true, self.base.particle_density());
        points
    }

    fn generate_filled(&self) -> Vec<Vec3> {
        let density = self.base.particle_density();
        let shells = disc_rings(self.radius, density);
        let mut points = Vec::new();
        for k in (1..=shells).rev() {
            let radius = self.radius * k as f64 / shells as f64;
            self.extend_faces(&mut points, radius, false, density);
        }
        points.push(Vec3::zeros());
        points
    }

    fn estimate_count(&self, style: Style, density: f64) -> f64 {
        let (solid, faces, sides) = (self.solid, self.solid.faces(), self.solid.face_sides());
        let outline = |radius: f64| faces * regular_outline_count(sides, face_radius(solid, radius), density);
        match style {
            Style::Outline => outline(self.radius) as f64,
            Style::Surface => (faces * filled_polygon_count(sides, self.face_radius(), density)) as f64,
            Style::Fill => {
                let shells = disc_rings(self.radius, density);
                let total: usize = (1..=shells)
                    .map(|k| outline(self.radius * k as f64 / shells as f64))
                    .sum();
                (total + 1) as f64
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SOLIDS: [Solid; 4] = [
        Solid::Tetrahedron,
        Solid::Octahedron,
        Solid::Dodecahedron,
        Solid::Icosahedron,
    ];

    #[test]
    fn test_every_face_finds_its_vertices() {
        for solid in SOLIDS {
            let (vertices, normals) = solid.vertices_and_normals();
            assert_eq!(normals.len(), solid.faces());
            for normal in &normals {
                assert_eq!(face_vertices(&vertices, normal).len(), solid.face_sides(), "{:?}", solid);
            }
        }
    }

    #[test]
    fn test_corners_on_circumsphere() {
        for solid in SOLIDS {
            let polyhedron = RegularPolyhedron::with_solid(2.0, solid);
            let corners = polyhedron.face_corners();
            assert_eq!(corners.len(), solid.faces());
            for corner in corners.iter().flatten() {
                assert_relative_eq!(corner.norm(), 2.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_corners_match_solid_vertices() {
        for solid in SOLIDS {
            let (vertices, _) = solid.vertices_and_normals();
            let polyhedron = RegularPolyhedron::with_solid(1.0, solid);
            for corner in polyhedron.face_corners().iter().flatten() {
                let hit = vertices.iter().any(|v| (v.normalize() - corner).norm() < 1e-9);
                assert!(hit, "{:?} corner {:?}", solid, corner);
            }
        }
    }

    #[test]
    fn test_tetrahedron_outline_patches_closed() {
        let mut tetra = RegularPolyhedron::new(1.0, 4);
        tetra.set_particle_density(0.1);
        let patches = tetra.face_patches();
        assert_eq!(patches.len(), 4);
        let corners = tetra.face_corners();
        for (patch, corners) in patches.iter().zip(&corners) {
            assert!(!patch.is_empty());
            assert_relative_eq!(patch[0], corners[0], epsilon = 1e-9);
            let step = tetra.edge_length() / (tetra.edge_length() / 0.1).round();
            let closing = (patch[patch.len() - 1] - patch[0]).norm();
            assert!(closing <= step + 1e-9);
        }
    }

    #[test]
    fn test_octahedron_centroids_at_inradius() {
        let octa = RegularPolyhedron::new(1.0, 8);
        assert_relative_eq!(octa.inradius(), 1.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
        for corners in octa.face_corners() {
            let centroid = corners.iter().sum::<Vec3>() / corners.len() as f64;
            assert_relative_eq!(centroid.norm(), octa.inradius(), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_radius_constants_consistent() {
        for solid in SOLIDS {
            let polyhedron = RegularPolyhedron::with_solid(1.0, solid);
            let (fr, ir) = (polyhedron.face_radius(), polyhedron.inradius());
            assert_relative_eq!(fr * fr + ir * ir, 1.0, epsilon = 1e-12);
        }
        let tetra = RegularPolyhedron::with_solid(3.0, Solid::Tetrahedron);
        assert_relative_eq!(tetra.inradius(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unsupported_faces_fall_back() {
        let polyhedron = RegularPolyhedron::new(1.0, 6);
        assert_eq!(polyhedron.solid(), Solid::Tetrahedron);
    }

    #[test]
    fn test_counts_match_estimate() {
        for solid in SOLIDS {
            let mut polyhedron = RegularPolyhedron::with_solid(1.5, solid);
            for &style in Style::all() {
                polyhedron.set_style(style);
                let n = polyhedron.get_points().len() as f64;
                assert_eq!(n, polyhedron.estimate_count(style, 0.25), "{:?} {:?}", solid, style);
            }
        }
    }

    #[test]
    fn test_surface_points_inside() {
        let mut icosa = RegularPolyhedron::new(1.0, 20);
        icosa.set_style(Style::Surface);
        let inradius = icosa.inradius();
        for p in icosa.get_points() {
            assert!(p.norm() <= 1.0 + 1e-9);
            assert!(p.norm() >= inradius - 1e-9);
        }
    }
}
