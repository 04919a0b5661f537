mod tessellate_facet;

pub use tessellate_facet::TessellateFacet;

use crate::math::intersect_2d::orient_2d;
use crate::math::Point2;

/// A triangle mesh covering a facet, in feet.
///
/// Only [`TessellateFacet`] builds meshes, so every index refers to a vertex.
#[derive(Debug, Clone, Default)]
pub struct FacetMesh {
    vertices: Vec<Point2>,
    indices: Vec<[u32; 3]>,
}

impl FacetMesh {
    /// Vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Triangle indices (each triple defines a triangle).
    #[must_use]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// Corner positions of each triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Point2; 3]> + '_ {
        self.indices.iter().filter_map(|tri| {
            let corner = |i: u32| self.vertices.get(i as usize).copied();
            Some([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?])
        })
    }

    /// Sum of triangle areas in square feet.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| orient_2d(&a, &b, &c).abs() * 0.5)
            .sum()
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }
}
