pub mod geometry;
pub mod ordered_map;
