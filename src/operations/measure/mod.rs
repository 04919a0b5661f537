mod area;
mod measurements;

pub use area::ComputeArea;
pub use measurements::ComputeMeasurements;
