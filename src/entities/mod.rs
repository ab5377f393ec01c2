mod coordinates;
mod point;
mod point_type;

pub use coordinates::Coordinates;
pub use point::{PointDetails, PointOfInterest};
pub use point_type::PointType;
