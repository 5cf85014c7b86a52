pub mod deleted;
pub mod seed;
