use crate::facet::RoofFacet;

/// Sums facet areas in square feet.
///
/// Always computed from the facets passed in; nothing is cached.
pub struct TotalArea<'a> {
    facets: &'a [RoofFacet],
    sloped: bool,
}

impl<'a> TotalArea<'a> {
    /// Creates a new `TotalArea` query over plan areas.
    #[must_use]
    pub fn new(facets: &'a [RoofFacet]) -> Self {
        Self {
            facets,
            sloped: false,
        }
    }

    /// Sums pitch-adjusted surface areas instead of plan areas.
    #[must_use]
    pub fn sloped(mut self, sloped: bool) -> Self {
        self.sloped = sloped;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> f64 {
        if self.sloped {
            self.facets.iter().map(RoofFacet::sloped_area).sum()
        } else {
            self.facets.iter().map(RoofFacet::area).sum()
        }
    }
}
