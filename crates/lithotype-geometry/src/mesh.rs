//! Extruded 3D meshes from resolved glyph polygons.
//!
//! A [`PolygonWithHoles`] becomes a closed solid: a front face at
//! `z = -depth / scale`, a back face at `z = 0` with flipped winding, and a
//! strip of side walls around the outline and around every hole.

use glam::DVec3;
use lithotype_core::profiling::profile_function;

use crate::{MeshVertex, Placement, Point2D, PolygonWithHoles, Shape, ShapeId, Transform, Triangulator};

/// Extrusion parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshOptions {
    /// Extrusion depth in world units.
    pub depth: f64,
    /// Fraction of the depth reserved for a bevel, clamped to `[0, 1]`.
    /// Only selects the bevel plane; no chamfer geometry is generated.
    pub bevel: f64,
    /// Negate x and y of every emitted point.
    pub mirror_xy: bool,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            depth: 1.0,
            bevel: 0.0,
            mirror_xy: true,
        }
    }
}

impl MeshOptions {
    pub fn new(depth: f64) -> Self {
        Self {
            depth: depth.max(0.0),
            ..Self::default()
        }
    }

    pub fn with_bevel(mut self, bevel: f64) -> Self {
        self.bevel = bevel.clamp(0.0, 1.0);
        self
    }

    pub fn with_mirror_xy(mut self, mirror_xy: bool) -> Self {
        self.mirror_xy = mirror_xy;
        self
    }

    /// Local z of the front face for a shape placed at `scale`.
    pub fn front_z(&self, scale: f64) -> f64 {
        if scale == 0.0 {
            return 0.0;
        }
        -self.depth / scale
    }

    /// Local z where a bevel starting from the front face would begin.
    pub fn bevel_z(&self, scale: f64) -> f64 {
        self.front_z(scale) * (1.0 - self.bevel.clamp(0.0, 1.0))
    }
}

/// Indexed triangle mesh. Every index refers to `points` of the same mesh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh3D {
    pub points: Vec<DVec3>,
    pub indices: Vec<u32>,
}

impl Mesh3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Append another mesh, offsetting its indices.
    pub fn append(&mut self, other: &Mesh3D) {
        let base = self.points.len() as u32;
        self.points.extend_from_slice(&other.points);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Points converted for GPU upload.
    pub fn vertices(&self) -> Vec<MeshVertex> {
        self.points
            .iter()
            .map(|p| MeshVertex::new(p.x as f32, p.y as f32, p.z as f32))
            .collect()
    }
}

/// World-space mesh of one polygon leaf, see [`Shape::create_meshes`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMesh {
    pub id: ShapeId,
    pub transform: Transform,
    pub mesh: Mesh3D,
}

/// Appends points through a transform, optionally mirrored in x and y.
struct MeshWriter<'a> {
    mesh: &'a mut Mesh3D,
    transform: Transform,
    mirror_xy: bool,
}

impl MeshWriter<'_> {
    fn push_point(&mut self, p: Point2D, z: f64) {
        let mut v = self.transform.apply(p.x, p.y, z);
        if self.mirror_xy {
            v.x = -v.x;
            v.y = -v.y;
        }
        self.mesh.points.push(v);
    }

    /// Triangulated face at `z`. Returns the number of triangles added.
    fn face(
        &mut self,
        geometry: &PolygonWithHoles,
        z: f64,
        reverse: bool,
        triangulator: &dyn Triangulator,
    ) -> usize {
        let base = self.mesh.points.len();
        let mut coords = Vec::with_capacity(geometry.point_count() * 2);
        let mut hole_starts = Vec::with_capacity(geometry.holes().len());

        let rings = std::iter::once(geometry.positive()).chain(geometry.holes());
        for (n, ring) in rings.enumerate() {
            if n > 0 {
                hole_starts.push(coords.len() / 2);
            }
            for &p in ring.points() {
                coords.extend([p.x, p.y]);
                self.push_point(p, z);
            }
        }

        let mut indices = match triangulator.triangulate(&coords, &hole_starts) {
            Ok(indices) => indices,
            Err(err) => {
                tracing::warn!(points = coords.len() / 2, "Face produced no triangles: {}", err);
                return 0;
            }
        };
        if reverse {
            indices.reverse();
        }
        self.mesh
            .indices
            .extend(indices.iter().map(|&i| (base + i) as u32));
        indices.len() / 3
    }

    /// Quad strip joining the back (`z = 0`) and front copies of every ring.
    fn side_walls(&mut self, geometry: &PolygonWithHoles, z_front: f64) {
        let rings = std::iter::once(geometry.positive()).chain(geometry.holes());
        for ring in rings {
            let base = self.mesh.points.len() as u32;
            let n = (ring.len() * 2) as u32;
            for (k, &p) in ring.points().iter().enumerate() {
                let i = (k * 2) as u32;
                self.push_point(p, 0.0);
                self.push_point(p, z_front);
                self.mesh.indices.extend([
                    base + i + 1,
                    base + i,
                    base + (i + 2) % n,
                    base + i + 1,
                    base + (i + 2) % n,
                    base + (i + 3) % n,
                ]);
            }
        }
    }
}

impl PolygonWithHoles {
    /// Append the extruded solid to `mesh`, with the front face at local
    /// `z_front` and every point mapped through `transform`.
    pub fn append_mesh(
        &self,
        mesh: &mut Mesh3D,
        z_front: f64,
        transform: &Transform,
        mirror_xy: bool,
        triangulator: &dyn Triangulator,
    ) {
        let mut writer = MeshWriter {
            mesh,
            transform: *transform,
            mirror_xy,
        };
        writer.face(self, z_front, false, triangulator);
        writer.face(self, 0.0, true, triangulator);
        writer.side_walls(self, z_front);
    }

    /// Mesh placed by `transform`, depth given in world units.
    pub fn mesh(
        &self,
        options: &MeshOptions,
        transform: &Transform,
        triangulator: &dyn Triangulator,
    ) -> Mesh3D {
        profile_function!();
        let mut mesh = Mesh3D::new();
        self.append_mesh(
            &mut mesh,
            options.front_z(transform.scale),
            transform,
            options.mirror_xy,
            triangulator,
        );
        mesh
    }

    /// Mesh in glyph-local coordinates for instances drawn at `scale`.
    ///
    /// Drawing the result through [`Placement::instance_transform`] gives the
    /// same points as [`mesh`](Self::mesh) with the placement's transform.
    pub fn template_mesh(
        &self,
        options: &MeshOptions,
        scale: f64,
        triangulator: &dyn Triangulator,
    ) -> Mesh3D {
        profile_function!();
        let mut mesh = Mesh3D::new();
        self.append_mesh(
            &mut mesh,
            options.front_z(scale),
            &Transform::IDENTITY,
            options.mirror_xy,
            triangulator,
        );
        mesh
    }
}

impl Placement {
    /// Template mesh for this placement's identity and scale.
    pub fn template_mesh(&self, options: &MeshOptions, triangulator: &dyn Triangulator) -> Mesh3D {
        self.geometry
            .template_mesh(options, self.transform.scale, triangulator)
    }

    /// Transform positioning a template instance in world space.
    pub fn instance_transform(&self, options: &MeshOptions) -> Transform {
        if options.mirror_xy {
            self.transform.mirror_xy()
        } else {
            self.transform
        }
    }
}

impl Shape {
    /// One world-space mesh per polygon leaf, composed under `incoming`.
    pub fn create_meshes(
        &self,
        options: &MeshOptions,
        incoming: &Transform,
        triangulator: &dyn Triangulator,
    ) -> Vec<GlyphMesh> {
        profile_function!();
        self.placements(incoming)
            .into_iter()
            .map(|placement| GlyphMesh {
                mesh: placement
                    .geometry
                    .mesh(options, &placement.transform, triangulator),
                id: placement.id,
                transform: placement.transform,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EarcutTriangulator, GeometryError, GeometryResult, Polygon2D};

    fn triangle() -> PolygonWithHoles {
        let poly = Polygon2D::new(vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(1.0, 0.0),
            Point2D::new(0.0, 1.0),
        ])
        .unwrap();
        PolygonWithHoles::new(poly, vec![])
    }

    fn square(x: f64, y: f64, size: f64) -> Polygon2D {
        Polygon2D::new(vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
        ])
        .unwrap()
    }

    struct FailingTriangulator;

    impl Triangulator for FailingTriangulator {
        fn triangulate(&self, _: &[f64], _: &[usize]) -> GeometryResult<Vec<usize>> {
            Err(GeometryError::Triangulation {
                message: "refused".into(),
            })
        }
    }

    #[test]
    fn test_triangle_extrusion_counts() {
        let options = MeshOptions::new(1.0).with_bevel(0.0);
        let mesh = triangle().mesh(&options, &Transform::IDENTITY, &EarcutTriangulator);

        // 3 front + 3 back + 6 side points, 1 + 1 + 6 triangles
        assert_eq!(mesh.points.len(), 12);
        assert_eq!(mesh.indices.len(), 24);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.points.len()));
    }

    #[test]
    fn test_front_and_back_planes() {
        let options = MeshOptions::new(2.0).with_mirror_xy(false);
        let transform = Transform::new(0.0, 0.0, 0.0, 4.0);
        let mesh = triangle().mesh(&options, &transform, &EarcutTriangulator);

        // Local front z is -depth/scale, so the world front plane sits at -depth.
        assert!(mesh.points[..3].iter().all(|p| (p.z + 2.0).abs() < 1e-12));
        assert!(mesh.points[3..6].iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_back_face_reversed() {
        let options = MeshOptions::new(1.0);
        let mesh = triangle().mesh(&options, &Transform::IDENTITY, &EarcutTriangulator);

        let front = &mesh.indices[0..3];
        let back: Vec<u32> = mesh.indices[3..6].iter().map(|i| i - 3).collect();
        assert_eq!(back, vec![front[2], front[1], front[0]]);
    }

    #[test]
    fn test_mirror_xy() {
        let transform = Transform::new(10.0, 20.0, 0.0, 2.0);
        let plain = triangle().mesh(
            &MeshOptions::new(1.0).with_mirror_xy(false),
            &transform,
            &EarcutTriangulator,
        );
        let mirrored = triangle().mesh(
            &MeshOptions::new(1.0).with_mirror_xy(true),
            &transform,
            &EarcutTriangulator,
        );

        for (a, b) in plain.points.iter().zip(&mirrored.points) {
            assert_eq!(b.x, -a.x);
            assert_eq!(b.y, -a.y);
            assert_eq!(b.z, a.z);
        }
    }

    #[test]
    fn test_template_matches_world_mesh() {
        let options = MeshOptions::new(1.5);
        let placement = Placement {
            id: ShapeId::from("t"),
            transform: Transform::new(3.0, -2.0, 0.5, 0.25),
            geometry: std::sync::Arc::new(triangle()),
        };

        let world = placement
            .geometry
            .mesh(&options, &placement.transform, &EarcutTriangulator);
        let template = placement.template_mesh(&options, &EarcutTriangulator);
        let instance = placement.instance_transform(&options);

        assert_eq!(world.indices, template.indices);
        for (w, t) in world.points.iter().zip(&template.points) {
            let placed = instance.apply(t.x, t.y, t.z);
            assert!((placed - *w).length() < 1e-9);
        }
    }

    #[test]
    fn test_holes_add_side_walls() {
        let pwh = PolygonWithHoles::new(square(0.0, 0.0, 10.0), vec![square(3.0, 3.0, 4.0)]);
        let mesh = pwh.mesh(&MeshOptions::new(1.0), &Transform::IDENTITY, &EarcutTriangulator);

        // 8 points per face, two per ring point for the side walls
        assert_eq!(mesh.points.len(), 8 + 8 + 16);
        // 8 triangles per face, 2 per outline edge
        assert_eq!(mesh.triangle_count(), 8 + 8 + 16);
    }

    #[test]
    fn test_triangulation_failure_keeps_side_walls() {
        let mesh = triangle().mesh(&MeshOptions::new(1.0), &Transform::IDENTITY, &FailingTriangulator);
        assert_eq!(mesh.points.len(), 12);
        assert_eq!(mesh.triangle_count(), 6);
    }

    #[test]
    fn test_create_meshes_per_leaf() {
        let shape = Shape::group(vec![
            Shape::polygon("a", triangle()),
            Shape::polygon("b", triangle()).with_transform(Transform::translate(5.0, 0.0, 0.0)),
        ]);
        let meshes = shape.create_meshes(&MeshOptions::new(1.0), &Transform::IDENTITY, &EarcutTriangulator);
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[1].id.as_str(), "b");
        assert_eq!(meshes[1].transform.tx, 5.0);
        assert_eq!(meshes[1].mesh.indices.len(), 24);
    }

    #[test]
    fn test_bevel_plane() {
        let options = MeshOptions::new(2.0).with_bevel(1.5);
        assert_eq!(options.bevel, 1.0);
        assert_eq!(options.bevel_z(1.0), 0.0);
        assert_eq!(MeshOptions::new(2.0).with_bevel(0.25).bevel_z(1.0), -1.5);
    }

    #[test]
    fn test_vertices_and_append() {
        let mut mesh = triangle().mesh(&MeshOptions::new(1.0), &Transform::IDENTITY, &EarcutTriangulator);
        let other = mesh.clone();
        mesh.append(&other);
        assert_eq!(mesh.points.len(), 24);
        assert_eq!(*mesh.indices.iter().max().unwrap(), 23);
        assert_eq!(mesh.vertices().len(), 24);
    }
}
