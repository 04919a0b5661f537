use std::collections::HashMap;

use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use super::FacetMesh;
use crate::calibration::Calibration;
use crate::error::{FacetError, Result, TessellationError};
use crate::facet::validate_outline;
use crate::math::intersect_2d::find_self_intersection;
use crate::math::polygon_2d::contains_point_2d;
use crate::math::Point2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a facet outline for filling and shading.
///
/// Concave outlines are supported; self-intersecting ones are rejected since
/// their interior is ambiguous.
pub struct TessellateFacet<'a> {
    points: &'a [Point2],
    calibration: Calibration,
}

impl<'a> TessellateFacet<'a> {
    /// Creates a new `TessellateFacet` operation for an outline in canvas pixels.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            calibration: Calibration::default(),
        }
    }

    /// Sets the canvas calibration used to convert the mesh to feet.
    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns `FacetError::InsufficientPoints` or
    /// `FacetError::NonFiniteCoordinate` for an unusable outline,
    /// `FacetError::SelfIntersecting` for a crossing outline, or
    /// `TessellationError::Failed` if a vertex cannot be inserted.
    pub fn execute(&self) -> Result<FacetMesh> {
        validate_outline(self.points)?;
        if let Some((first, second)) = find_self_intersection(self.points) {
            return Err(FacetError::SelfIntersecting { first, second }.into());
        }

        let cdt = constrained_outline(self.points)?;

        // Every triangle's corners are outline vertices and no constraint edge
        // passes through it, so its centroid decides the whole triangle.
        let mut mesh = FacetMesh::default();
        let mut vertex_map: HashMap<FixedVertexHandle, u32> = HashMap::new();
        for face in cdt.inner_faces() {
            let corners = face.vertices();
            let [a, b, c] = corners.map(|v| v.position());
            let centroid = Point2::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
            if !contains_point_2d(self.points, &centroid) {
                continue;
            }

            let mut triangle = [0u32; 3];
            for (slot, vertex) in triangle.iter_mut().zip(corners) {
                *slot = match vertex_map.get(&vertex.fix()) {
                    Some(&index) => index,
                    None => {
                        let index = u32::try_from(mesh.vertices.len()).map_err(|_| {
                            TessellationError::Failed("too many vertices for u32 indices".into())
                        })?;
                        let pos = vertex.position();
                        mesh.vertices.push(Point2::new(
                            self.calibration.to_feet(pos.x),
                            self.calibration.to_feet(pos.y),
                        ));
                        vertex_map.insert(vertex.fix(), index);
                        index
                    }
                };
            }
            mesh.indices.push(triangle);
        }

        tracing::debug!(
            points = self.points.len(),
            triangles = mesh.triangle_count(),
            "tessellated facet"
        );
        Ok(mesh)
    }
}

/// Builds a CDT whose constraint edges trace the closed outline.
fn constrained_outline(points: &[Point2]) -> Result<Cdt> {
    let mut cdt = Cdt::new();
    let handles = points
        .iter()
        .map(|p| {
            cdt.insert(SpadePoint2::new(p.x, p.y))
                .map_err(|e| TessellationError::Failed(format!("outline vertex: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let next = handles.iter().copied().skip(1).chain(handles.first().copied());
    for (from, to) in handles.iter().copied().zip(next) {
        if from != to {
            cdt.add_constraint(from, to);
        }
    }
    Ok(cdt)
}
