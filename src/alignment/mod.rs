pub mod assembly;
pub mod detection;
pub mod dp;
pub mod edit_distance;
pub mod normalize;
