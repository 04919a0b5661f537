//! Roof diagrams: the facets drawn for one property.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{FacetError, Result};
use crate::facet::{FacetId, RoofFacet, SQUARE_FEET_PER_SQUARE};
use crate::operations::query::TotalArea;

/// Unique identifier of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagramId(Uuid);

impl DiagramId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DiagramId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Serialized form of a diagram, handed to storage and report export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramSnapshot {
    pub id: DiagramId,
    pub facets: Vec<RoofFacet>,
    /// Derived on save; ignored on restore.
    pub total_area: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ordered collection of facets for one property.
///
/// The total area is not stored: every read sums the current facets.
#[derive(Debug, Clone)]
pub struct RoofDiagram {
    id: DiagramId,
    facets: Vec<RoofFacet>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for RoofDiagram {
    fn default() -> Self {
        Self::new()
    }
}

impl RoofDiagram {
    /// Creates an empty diagram.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: DiagramId::new(),
            facets: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn id(&self) -> DiagramId {
        self.id
    }

    #[must_use]
    pub fn facets(&self) -> &[RoofFacet] {
        &self.facets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Looks up a facet by id.
    #[must_use]
    pub fn facet(&self, id: FacetId) -> Option<&RoofFacet> {
        self.facets.iter().find(|f| f.id() == id)
    }

    /// Appends a finalized facet.
    pub fn add_facet(&mut self, facet: RoofFacet) {
        tracing::debug!(
            diagram = %self.id,
            facet = %facet.id(),
            area = facet.area(),
            "adding facet"
        );
        self.facets.push(facet);
        self.touch();
    }

    /// Removes a facet and returns it.
    ///
    /// # Errors
    ///
    /// Returns `FacetError::NotFound` if no facet has this id.
    pub fn remove_facet(&mut self, id: FacetId) -> Result<RoofFacet> {
        let index = self.position(id)?;
        let removed = self.facets.remove(index);
        tracing::debug!(diagram = %self.id, facet = %id, "removed facet");
        self.touch();
        Ok(removed)
    }

    /// Swaps the facet `id` for `replacement` at the same position, returning
    /// the removed facet.
    ///
    /// # Errors
    ///
    /// Returns `FacetError::NotFound` if no facet has this id; the diagram is
    /// left unchanged.
    pub fn replace_facet(&mut self, id: FacetId, replacement: RoofFacet) -> Result<RoofFacet> {
        let index = self.position(id)?;
        let removed = self.facets.remove(index);
        tracing::debug!(
            diagram = %self.id,
            removed = %id,
            added = %replacement.id(),
            "replaced facet"
        );
        self.facets.insert(index, replacement);
        self.touch();
        Ok(removed)
    }

    /// Sum of facet plan areas in square feet.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        TotalArea::new(&self.facets).execute()
    }

    /// Sum of pitch-adjusted facet surface areas in square feet.
    #[must_use]
    pub fn total_sloped_area(&self) -> f64 {
        TotalArea::new(&self.facets).sloped(true).execute()
    }

    /// Total plan area in roofing squares.
    #[must_use]
    pub fn total_squares(&self) -> f64 {
        self.total_area() / SQUARE_FEET_PER_SQUARE
    }

    /// Captures the current state for persistence or export.
    #[must_use]
    pub fn snapshot(&self) -> DiagramSnapshot {
        DiagramSnapshot {
            id: self.id,
            facets: self.facets.clone(),
            total_area: self.total_area(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Rebuilds a diagram from a snapshot. The stored total is discarded.
    #[must_use]
    pub fn from_snapshot(snapshot: DiagramSnapshot) -> Self {
        let diagram = Self {
            id: snapshot.id,
            facets: snapshot.facets,
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        };
        if (diagram.total_area() - snapshot.total_area).abs() > 1e-6 {
            tracing::warn!(
                diagram = %diagram.id,
                stored = snapshot.total_area,
                recomputed = diagram.total_area(),
                "snapshot total area disagrees with its facets"
            );
        }
        diagram
    }

    /// Serializes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns `RoofError::Snapshot` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Restores a diagram from snapshot JSON. Facet areas and measurements are
    /// rebuilt from their outlines.
    ///
    /// # Errors
    ///
    /// Returns `RoofError::Snapshot` if the text is not a valid snapshot,
    /// including facets with fewer than 3 points or an invalid pitch or scale.
    pub fn from_json(text: &str) -> Result<Self> {
        let snapshot: DiagramSnapshot = serde_json::from_str(text)?;
        Ok(Self::from_snapshot(snapshot))
    }

    fn position(&self, id: FacetId) -> Result<usize> {
        self.facets
            .iter()
            .position(|f| f.id() == id)
            .ok_or_else(|| FacetError::NotFound(id).into())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
