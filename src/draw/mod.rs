pub mod geometry;
pub mod map;
pub mod marey;
pub mod page;
pub mod xml;

/// Radius of a stop or vehicle circle, and of every circle of a trip under the pointer
pub const DEFAULT_CIRCLE_RADIUS: f64 = 3.;
pub const AUGMENTED_CIRCLE_RADIUS: f64 = 6.;
/// Stroke of a trip's path, and of the paths of a trip under the pointer
pub const DEFAULT_TRIPPATH_THICKNESS: &str = "1px";
pub const AUGMENTED_TRIPPATH_THICKNESS: &str = "3px";
