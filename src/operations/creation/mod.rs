mod finalize_facet;

pub use finalize_facet::FinalizeFacet;
