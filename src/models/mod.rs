//! Typed records shared by the store and the HTTP layer.

pub mod response;
pub mod wish;
