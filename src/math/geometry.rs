use std::f32::consts::{PI, TAU};

use nalgebra::{Point2, Point3, Vector3};

/// Raw triangle mesh, ready to hand to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub coords: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub uvs: Vec<Point2<f32>>,
    pub faces: Vec<Point3<u16>>,
}

impl MeshData {
    pub fn num_vertices(&self) -> usize {
        self.coords.len()
    }

    /// Points every normal the other way. Winding is left alone, so backface
    /// culling still sees the same faces.
    pub fn flip_normals(&mut self) {
        for n in self.normals.iter_mut() {
            *n = -*n;
        }
    }
}

// Faces index with u16, so we can't have more vertices than this
const MAX_VERTICES: usize = u16::MAX as usize + 1;

fn index(i: usize) -> u16 {
    debug_assert!(i < MAX_VERTICES);
    i as u16
}

/// A longitude/latitude sphere centered at the origin, with +y as the pole.
///
/// There are `subdivisions + 1` vertices along each direction; the seam and the
/// poles are duplicated so that texture coordinates don't wrap.
pub fn uv_sphere(radius: f32, subdivisions: usize) -> MeshData {
    assert!(
        subdivisions >= 3,
        "Must have at least three subdivisions, subdivisions was {}",
        subdivisions
    );
    let n = subdivisions;
    assert!((n + 1) * (n + 1) <= MAX_VERTICES, "Too many subdivisions: {}", n);

    let mut coords = Vec::with_capacity((n + 1) * (n + 1));
    let mut normals = Vec::with_capacity((n + 1) * (n + 1));
    let mut uvs = Vec::with_capacity((n + 1) * (n + 1));

    for j in 0..=n {
        let v = j as f32 / n as f32;
        let theta = v * PI; // polar angle, from +y
        for i in 0..=n {
            let u = i as f32 / n as f32;
            let phi = u * TAU; // longitude

            let normal = Vector3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            coords.push(Point3::from(normal * radius));
            normals.push(normal);
            uvs.push(Point2::new(u, v));
        }
    }

    let row = n + 1;
    let mut faces = Vec::with_capacity(2 * n * n);
    for j in 0..n {
        for i in 0..n {
            let a = j * row + i + 1;
            let b = j * row + i;
            let c = (j + 1) * row + i;
            let d = (j + 1) * row + i + 1;

            // The triangles touching the poles would be degenerate
            if j != 0 {
                faces.push(Point3::new(index(a), index(b), index(d)));
            }
            if j != n - 1 {
                faces.push(Point3::new(index(b), index(c), index(d)));
            }
        }
    }

    MeshData {
        coords,
        normals,
        uvs,
        faces,
    }
}

/// A flat annulus in the xy-plane, facing +z.
///
/// Texture coordinates are a planar projection of the xy-plane onto the unit
/// square, scaled so the outer edge touches its sides.
pub fn ring(inner_radius: f32, outer_radius: f32, segments: usize) -> MeshData {
    assert!(
        segments >= 3,
        "Must have at least three segments, segments was {}",
        segments
    );
    assert!(
        inner_radius < outer_radius,
        "Inner radius {} must be smaller than outer radius {}",
        inner_radius,
        outer_radius
    );

    let mut coords = Vec::with_capacity(2 * (segments + 1));
    for radius in [inner_radius, outer_radius] {
        for i in 0..=segments {
            let angle = i as f32 / segments as f32 * TAU;
            coords.push(Point3::new(radius * angle.cos(), radius * angle.sin(), 0.0));
        }
    }

    let normals = vec![Vector3::z(); coords.len()];
    let uvs = coords
        .iter()
        .map(|p| Point2::new((p.x / outer_radius + 1.0) / 2.0, (p.y / outer_radius + 1.0) / 2.0))
        .collect();

    let row = segments + 1;
    let mut faces = Vec::with_capacity(2 * segments);
    for i in 0..segments {
        let a = i;
        let b = i + row;
        let c = i + row + 1;
        let d = i + 1;
        faces.push(Point3::new(index(a), index(b), index(d)));
        faces.push(Point3::new(index(b), index(c), index(d)));
    }

    MeshData {
        coords,
        normals,
        uvs,
        faces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_faces_in_bounds(mesh: &MeshData) {
        for face in mesh.faces.iter() {
            for &k in face.iter() {
                assert!((k as usize) < mesh.num_vertices());
            }
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let sphere = uv_sphere(9.0, 70);

        assert_eq!(sphere.num_vertices(), 71 * 71);
        assert_eq!(sphere.normals.len(), sphere.num_vertices());
        assert_eq!(sphere.uvs.len(), sphere.num_vertices());
        // Two triangles per quad, except at the poles
        assert_eq!(sphere.faces.len(), 2 * 70 * 70 - 2 * 70);
        assert_faces_in_bounds(&sphere);

        for (p, n) in sphere.coords.iter().zip(sphere.normals.iter()) {
            approx::assert_relative_eq!(p.coords.norm(), 9.0, epsilon = 1e-4);
            approx::assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-5);
            approx::assert_relative_eq!(p.coords / 9.0, *n, epsilon = 1e-5);
        }

        // Poles are on the y-axis
        approx::assert_relative_eq!(sphere.coords[0], Point3::new(0.0, 9.0, 0.0), epsilon = 1e-5);
        approx::assert_relative_eq!(
            sphere.coords[sphere.num_vertices() - 1],
            Point3::new(0.0, -9.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_sphere_faces_point_outwards() {
        let sphere = uv_sphere(1.0, 8);
        for face in sphere.faces.iter() {
            let [a, b, c] = [face.x, face.y, face.z].map(|k| sphere.coords[k as usize]);
            let face_normal = (b - a).cross(&(c - a));
            let centroid = (a.coords + b.coords + c.coords) / 3.0;
            assert!(face_normal.dot(&centroid) > 0.0);
        }
    }

    #[test]
    fn test_ring_shape() {
        let ring = ring(20.0, 33.0, 70);

        assert_eq!(ring.num_vertices(), 2 * 71);
        assert_eq!(ring.faces.len(), 2 * 70);
        assert_faces_in_bounds(&ring);

        for p in ring.coords.iter() {
            let r = p.coords.norm();
            assert_eq!(p.z, 0.0);
            assert!(r > 20.0 - 1e-3 && r < 33.0 + 1e-3, "radius {} out of range", r);
        }
        for uv in ring.uvs.iter() {
            assert!((0.0..=1.0).contains(&uv.x));
            assert!((0.0..=1.0).contains(&uv.y));
        }
        assert!(ring.normals.iter().all(|n| *n == Vector3::z()));
    }

    #[test]
    fn test_flip_normals() {
        let mut sphere = uv_sphere(2.0, 4);
        let faces = sphere.faces.clone();
        sphere.flip_normals();

        assert_eq!(sphere.faces, faces);
        for (p, n) in sphere.coords.iter().zip(sphere.normals.iter()) {
            assert!(p.coords.dot(n) < 0.0);
        }
    }

    #[test]
    #[should_panic]
    fn test_ring_rejects_inverted_radii() {
        ring(5.0, 4.0, 10);
    }
}
