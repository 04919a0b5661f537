mod is_simple;
mod total_area;

pub use is_simple::IsSimplePolygon;
pub use total_area::TotalArea;
